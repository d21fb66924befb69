//! Order lifecycle - placing orders and moving them through the kitchen.
//!
//! This module provides functions for creating orders from a checked-out cart,
//! listing and inspecting them for the admin screen, and changing their status.
//! Status changes follow a fixed table (see [`OrderStatus::can_transition_to`]);
//! anything else is rejected at this boundary rather than written to the
//! database. An order and its lines are written in a single database transaction.

use crate::{
    core::menu::{Translation, get_restaurant},
    entities::{Order, OrderItem, Product, order, order_item, product},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, QuerySelect, Set, TransactionTrait, prelude::*};
use serde::{Deserialize, Serialize};
use std::{
    collections::{HashMap, HashSet},
    fmt,
    str::FromStr,
};
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// Number of orders the admin list shows when no limit is given.
pub const DEFAULT_ORDER_LIMIT: u64 = 50;

/// Kitchen status of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Placed, not yet picked up by the kitchen
    Pending,
    /// Being prepared
    Preparing,
    /// Ready to be served
    Ready,
    /// Served to the table
    Delivered,
    /// Withdrawn before delivery
    Cancelled,
}

impl OrderStatus {
    /// Storage and wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Preparing => "preparing",
            Self::Ready => "ready",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    /// The status the admin screen offers as the next step, if any.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Pending => Some(Self::Preparing),
            Self::Preparing => Some(Self::Ready),
            Self::Ready => Some(Self::Delivered),
            Self::Delivered | Self::Cancelled => None,
        }
    }

    /// Delivered and cancelled orders never change again.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    /// Whether an order in this status may move to `target`.
    ///
    /// Forward moves go one step at a time; any open order may be cancelled.
    #[must_use]
    pub fn can_transition_to(self, target: Self) -> bool {
        if self.is_terminal() {
            return false;
        }
        target == Self::Cancelled || self.next() == Some(target)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "preparing" => Ok(Self::Preparing),
            "ready" => Ok(Self::Ready),
            "delivered" => Ok(Self::Delivered),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            _ => Err(Error::InvalidStatus {
                status: s.to_string(),
            }),
        }
    }
}

/// One line of an order request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrderItem {
    /// Ordered product
    pub product_id: String,
    /// Number of units
    pub quantity: i32,
    /// Price per unit the guest saw when adding to the cart
    pub unit_price: f64,
}

/// An order request, usually produced by [`crate::core::cart::Cart::checkout`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    /// Table the order is for
    pub table_number: String,
    /// Lines, at least one
    pub items: Vec<NewOrderItem>,
    /// Free-text notes for the kitchen
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewOrder {
    /// Sum of quantity x unit price.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.items
            .iter()
            .map(|item| f64::from(item.quantity) * item.unit_price)
            .sum()
    }

    fn validate(&self) -> Result<()> {
        if self.table_number.trim().is_empty() {
            return Err(Error::validation("Table number is required"));
        }
        if self.items.is_empty() {
            return Err(Error::validation("Order must contain at least one item"));
        }

        for item in &self.items {
            if item.product_id.trim().is_empty() {
                return Err(Error::validation("Every order item needs a product id"));
            }
            if item.quantity < 1 {
                return Err(Error::InvalidQuantity {
                    quantity: item.quantity,
                });
            }
            if !item.unit_price.is_finite() || item.unit_price < 0.0 {
                return Err(Error::InvalidAmount {
                    amount: item.unit_price,
                });
            }
        }

        Ok(())
    }
}

/// Result of placing an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedOrder {
    /// Id of the new order
    pub order_id: String,
    /// Stored total
    pub total: f64,
}

/// Order row with its number of lines, for the admin list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderSummary {
    /// The order row
    #[serde(flatten)]
    pub order: order::Model,
    /// Number of lines on the order
    pub item_count: u64,
}

/// Order line joined with the product it refers to
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderLine {
    /// Line id
    pub id: i64,
    /// Ordered product
    pub product_id: String,
    /// Product name, `None` when the product has since been removed
    pub product_name: Option<Translation>,
    /// Product image, empty when unknown
    pub image: String,
    /// Number of units
    pub quantity: i32,
    /// Price per unit at purchase time
    pub unit_price: f64,
}

/// Order with all of its lines
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderWithItems {
    /// The order row
    #[serde(flatten)]
    pub order: order::Model,
    /// Lines in the order they were placed
    pub items: Vec<OrderLine>,
}

/// Places an order for `restaurant_id`.
///
/// The total is computed from the unit prices in the request; they are not
/// compared with current product prices. The order row and every line are
/// inserted inside one transaction, so either all of them exist or none.
///
/// # Errors
/// Returns an error if:
/// - The table number is blank or there are no items
/// - A quantity is below one or a unit price is negative or not finite
/// - The restaurant or one of the products does not exist
/// - A database operation fails
#[instrument(skip(db, new_order), fields(table = %new_order.table_number, items = new_order.items.len()))]
pub async fn create_order(
    db: &DatabaseConnection,
    restaurant_id: &str,
    new_order: NewOrder,
) -> Result<CreatedOrder> {
    new_order.validate()?;
    let total = new_order.total();
    if !total.is_finite() {
        return Err(Error::InvalidAmount { amount: total });
    }

    let txn = db.begin().await?;

    get_restaurant(&txn, restaurant_id).await?;

    let wanted: HashSet<String> = new_order
        .items
        .iter()
        .map(|item| item.product_id.clone())
        .collect();
    let known: HashSet<String> = Product::find()
        .filter(product::Column::Id.is_in(wanted.iter().cloned()))
        .all(&txn)
        .await?
        .into_iter()
        .map(|p| p.id)
        .collect();
    if let Some(missing) = new_order
        .items
        .iter()
        .find(|item| !known.contains(&item.product_id))
    {
        return Err(Error::validation(format!(
            "Unknown product: {}",
            missing.product_id
        )));
    }

    let now = chrono::Utc::now();
    let order_id = Uuid::new_v4().to_string();

    order::ActiveModel {
        id: Set(order_id.clone()),
        restaurant_id: Set(restaurant_id.to_string()),
        table_number: Set(new_order.table_number.trim().to_string()),
        status: Set(OrderStatus::Pending.to_string()),
        total: Set(total),
        notes: Set(new_order.notes.filter(|n| !n.trim().is_empty())),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&txn)
    .await?;

    let lines = new_order.items.into_iter().map(|item| order_item::ActiveModel {
        order_id: Set(order_id.clone()),
        product_id: Set(item.product_id),
        quantity: Set(item.quantity),
        unit_price: Set(item.unit_price),
        ..Default::default()
    });
    OrderItem::insert_many(lines).exec(&txn).await?;

    txn.commit().await?;

    info!(order_id = %order_id, total, "Order created");
    Ok(CreatedOrder { order_id, total })
}

/// Returns the most recent orders of a restaurant, newest first.
///
/// # Errors
/// Returns an error if a database query fails.
pub async fn get_orders(
    db: &DatabaseConnection,
    restaurant_id: &str,
    limit: u64,
) -> Result<Vec<OrderSummary>> {
    let orders = Order::find()
        .filter(order::Column::RestaurantId.eq(restaurant_id))
        .order_by_desc(order::Column::CreatedAt)
        .order_by_desc(order::Column::Id)
        .limit(limit)
        .all(db)
        .await?;

    if orders.is_empty() {
        return Ok(Vec::new());
    }

    let order_ids: Vec<String> = orders.iter().map(|o| o.id.clone()).collect();
    let mut counts: HashMap<String, u64> = HashMap::new();
    for line in OrderItem::find()
        .filter(order_item::Column::OrderId.is_in(order_ids))
        .all(db)
        .await?
    {
        *counts.entry(line.order_id).or_default() += 1;
    }

    debug!(count = orders.len(), "Fetched orders");
    Ok(orders
        .into_iter()
        .map(|order| OrderSummary {
            item_count: counts.get(&order.id).copied().unwrap_or(0),
            order,
        })
        .collect())
}

/// Returns one order of `restaurant_id` with its lines and the products they
/// refer to.
///
/// # Errors
/// Returns [`Error::OrderNotFound`] if the order does not exist or belongs to
/// another restaurant, or an error if a database query fails.
pub async fn get_order_details(
    db: &DatabaseConnection,
    restaurant_id: &str,
    order_id: &str,
) -> Result<OrderWithItems> {
    let order = Order::find_by_id(order_id)
        .filter(order::Column::RestaurantId.eq(restaurant_id))
        .one(db)
        .await?
        .ok_or_else(|| Error::OrderNotFound {
            id: order_id.to_string(),
        })?;

    let items = OrderItem::find()
        .filter(order_item::Column::OrderId.eq(order_id))
        .order_by_asc(order_item::Column::Id)
        .find_also_related(Product)
        .all(db)
        .await?
        .into_iter()
        .map(|(line, product)| OrderLine {
            id: line.id,
            product_name: product
                .as_ref()
                .map(|p| Translation::with_fallback(&p.name_tr, &p.name_en)),
            image: product.map(|p| p.image).unwrap_or_default(),
            product_id: line.product_id,
            quantity: line.quantity,
            unit_price: line.unit_price,
        })
        .collect();

    Ok(OrderWithItems { order, items })
}

/// Moves an order to `status`.
///
/// Setting the status an order already has succeeds without writing.
///
/// # Errors
/// Returns an error if:
/// - `status` is not a known status
/// - The order does not exist
/// - The lifecycle does not allow moving from the current status to `status`
/// - The database update fails
#[instrument(skip(db))]
pub async fn update_order_status(
    db: &DatabaseConnection,
    order_id: &str,
    status: &str,
) -> Result<order::Model> {
    let target: OrderStatus = status.parse()?;

    let order = Order::find_by_id(order_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::OrderNotFound {
            id: order_id.to_string(),
        })?;

    let current: OrderStatus = order.status.parse()?;
    if current == target {
        return Ok(order);
    }
    if !current.can_transition_to(target) {
        return Err(Error::IllegalTransition {
            from: current.to_string(),
            to: target.to_string(),
        });
    }

    let mut active: order::ActiveModel = order.into();
    active.status = Set(target.to_string());
    active.updated_at = Set(chrono::Utc::now());
    let updated = active.update(db).await?;

    info!(%current, %target, "Order status updated");
    Ok(updated)
}
