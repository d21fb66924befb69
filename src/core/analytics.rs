//! View analytics - records menu browsing and ranks what guests look at.
//!
//! Views are append-only telemetry. Stats are computed over a trailing window
//! ending at a caller supplied instant, which keeps them testable without a
//! clock. Counting is pushed into the database; only the menu itself is
//! loaded to break ties by menu order.

use crate::{
    entities::{
        Category, CategoryView, Product, ProductView, category, category_view, product,
        product_view,
    },
    errors::{Error, Result},
};
use chrono::{DateTime, Duration, Utc};
use sea_orm::{Condition, QuerySelect, Set, prelude::*};
use serde::{Deserialize, Serialize};
use std::{
    collections::{HashMap, HashSet},
    fmt,
    str::FromStr,
};
use tracing::{debug, instrument};

/// How many entries each ranking holds
pub const TOP_N: usize = 10;

/// What was viewed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewKind {
    /// A product detail
    Product,
    /// A category listing
    Category,
}

impl ViewKind {
    /// Parses the wire name; unknown kinds yield `None`.
    #[must_use]
    pub fn parse(kind: &str) -> Option<Self> {
        match kind {
            "product" => Some(Self::Product),
            "category" => Some(Self::Category),
            _ => None,
        }
    }
}

/// A single view event to record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewView {
    /// Kind of view
    pub kind: ViewKind,
    /// Product id for product views, category id for category views
    pub subject_id: String,
    /// Category a product was viewed from
    pub category_id: Option<String>,
    /// Visitor session
    pub session_id: String,
    /// Client address
    pub ip: String,
    /// Client user agent
    pub user_agent: String,
}

/// Appends a view to the matching log table.
///
/// # Errors
/// Returns an error if the subject id is blank or the insert fails.
pub async fn record_view(db: &DatabaseConnection, view: NewView) -> Result<()> {
    if view.subject_id.trim().is_empty() {
        return Err(Error::validation("View subject id is required"));
    }
    let now = Utc::now();

    match view.kind {
        ViewKind::Product => {
            product_view::ActiveModel {
                product_id: Set(view.subject_id),
                category_id: Set(view.category_id.filter(|c| !c.is_empty())),
                session_id: Set(view.session_id),
                ip_address: Set(view.ip),
                user_agent: Set(view.user_agent),
                created_at: Set(now),
                ..Default::default()
            }
            .insert(db)
            .await?;
        }
        ViewKind::Category => {
            category_view::ActiveModel {
                category_id: Set(view.subject_id),
                session_id: Set(view.session_id),
                ip_address: Set(view.ip),
                user_agent: Set(view.user_agent),
                created_at: Set(now),
                ..Default::default()
            }
            .insert(db)
            .await?;
        }
    }
    Ok(())
}

/// Trailing window for stats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StatsPeriod {
    /// Last 24 hours
    #[serde(rename = "24h")]
    Day,
    /// Last 7 days
    #[default]
    #[serde(rename = "7d")]
    Week,
    /// Last 30 days
    #[serde(rename = "30d")]
    Month,
}

impl StatsPeriod {
    /// Length of the window.
    #[must_use]
    pub fn duration(self) -> Duration {
        match self {
            Self::Day => Duration::hours(24),
            Self::Week => Duration::days(7),
            Self::Month => Duration::days(30),
        }
    }

    /// Wire name of the period.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Day => "24h",
            Self::Week => "7d",
            Self::Month => "30d",
        }
    }
}

impl fmt::Display for StatsPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatsPeriod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "24h" => Ok(Self::Day),
            "7d" => Ok(Self::Week),
            "30d" => Ok(Self::Month),
            other => Err(Error::InvalidPeriod {
                period: other.to_string(),
            }),
        }
    }
}

/// A ranked product
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopProduct {
    /// Product id
    pub id: String,
    /// Turkish name
    pub name_tr: String,
    /// English name
    pub name_en: String,
    /// Image URL
    pub image: String,
    /// Current price
    pub price: f64,
    /// Turkish name of its category
    pub category_name: Option<String>,
    /// Views in the window
    pub view_count: u64,
}

/// A ranked category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopCategory {
    /// Category id
    pub id: String,
    /// Turkish name
    pub name_tr: String,
    /// English name
    pub name_en: String,
    /// Icon
    pub icon: String,
    /// Views in the window
    pub view_count: u64,
}

/// Window totals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewTotals {
    /// Product views in the window
    pub total_product_views: u64,
    /// Category views in the window
    pub total_category_views: u64,
    /// Distinct sessions across both logs
    pub unique_visitors: u64,
}

/// Rankings plus totals for one window
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewStats {
    /// Most viewed products
    pub top_products: Vec<TopProduct>,
    /// Most viewed active categories
    pub top_categories: Vec<TopCategory>,
    /// Totals
    pub stats: ViewTotals,
}

/// `column` falls inside `[cutoff, now]`.
fn in_window(column: impl ColumnTrait, cutoff: DateTime<Utc>, now: DateTime<Utc>) -> Condition {
    Condition::all()
        .add(column.gte(cutoff))
        .add(column.lte(now))
}

fn into_counts(rows: Vec<(String, i64)>) -> HashMap<String, u64> {
    rows.into_iter()
        .map(|(id, count)| (id, u64::try_from(count).unwrap_or(0)))
        .collect()
}

/// Computes rankings and totals for the window ending at `now`.
///
/// Products and categories with no views still rank, with a count of zero.
/// Equal counts keep menu order.
///
/// # Errors
/// Returns an error if a database query fails.
#[instrument(skip(db))]
pub async fn get_view_stats(
    db: &DatabaseConnection,
    period: StatsPeriod,
    now: DateTime<Utc>,
) -> Result<ViewStats> {
    let cutoff = now - period.duration();

    let product_window = in_window(product_view::Column::CreatedAt, cutoff, now);
    let category_window = in_window(category_view::Column::CreatedAt, cutoff, now);

    let product_counts = into_counts(
        ProductView::find()
            .select_only()
            .column(product_view::Column::ProductId)
            .column_as(Expr::col(product_view::Column::Id).count(), "view_count")
            .filter(product_window.clone())
            .group_by(product_view::Column::ProductId)
            .into_tuple::<(String, i64)>()
            .all(db)
            .await?,
    );
    let category_counts = into_counts(
        CategoryView::find()
            .select_only()
            .column(category_view::Column::CategoryId)
            .column_as(Expr::col(category_view::Column::Id).count(), "view_count")
            .filter(category_window.clone())
            .group_by(category_view::Column::CategoryId)
            .into_tuple::<(String, i64)>()
            .all(db)
            .await?,
    );

    let mut categories = Category::find().all(db).await?;
    categories.sort_by(|a, b| a.sort_order.cmp(&b.sort_order).then_with(|| a.id.cmp(&b.id)));
    let category_rank: HashMap<&str, (usize, &category::Model)> = categories
        .iter()
        .enumerate()
        .map(|(rank, c)| (c.id.as_str(), (rank, c)))
        .collect();

    let mut products = Product::find().all(db).await?;
    products.sort_by_key(|p: &product::Model| {
        (
            category_rank
                .get(p.category_id.as_str())
                .map_or(usize::MAX, |(rank, _)| *rank),
            p.sort_order,
            p.id.clone(),
        )
    });

    let mut top_products: Vec<TopProduct> = products
        .iter()
        .map(|p| TopProduct {
            id: p.id.clone(),
            name_tr: p.name_tr.clone(),
            name_en: p.name_en.clone(),
            image: p.image.clone(),
            price: p.price,
            category_name: category_rank
                .get(p.category_id.as_str())
                .map(|(_, c)| c.name_tr.clone()),
            view_count: product_counts.get(&p.id).copied().unwrap_or(0),
        })
        .collect();
    // Stable sort keeps menu order between equal counts
    top_products.sort_by(|a, b| b.view_count.cmp(&a.view_count));
    top_products.truncate(TOP_N);

    let mut top_categories: Vec<TopCategory> = categories
        .iter()
        .filter(|c| c.is_active)
        .map(|c| TopCategory {
            id: c.id.clone(),
            name_tr: c.name_tr.clone(),
            name_en: c.name_en.clone(),
            icon: c.icon.clone(),
            view_count: category_counts.get(&c.id).copied().unwrap_or(0),
        })
        .collect();
    top_categories.sort_by(|a, b| b.view_count.cmp(&a.view_count));
    top_categories.truncate(TOP_N);

    // A visitor counts once even when seen in both tables
    let mut sessions: HashSet<String> = ProductView::find()
        .select_only()
        .column(product_view::Column::SessionId)
        .distinct()
        .filter(product_window.clone())
        .filter(product_view::Column::SessionId.ne(""))
        .into_tuple::<String>()
        .all(db)
        .await?
        .into_iter()
        .collect();
    sessions.extend(
        CategoryView::find()
            .select_only()
            .column(category_view::Column::SessionId)
            .distinct()
            .filter(category_window.clone())
            .filter(category_view::Column::SessionId.ne(""))
            .into_tuple::<String>()
            .all(db)
            .await?,
    );

    let stats = ViewTotals {
        total_product_views: ProductView::find().filter(product_window).count(db).await?,
        total_category_views: CategoryView::find().filter(category_window).count(db).await?,
        unique_visitors: sessions.len() as u64,
    };
    debug!(?stats, %period, "Computed view stats");

    Ok(ViewStats {
        top_products,
        top_categories,
        stats,
    })
}
