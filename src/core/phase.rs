//! Demo phases and the feature flags each one turns on.
//!
//! A phase is a fixed lookup: nothing here touches the database. Persisting the
//! selected phase is handled by [`crate::core::settings`].

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Demo feature level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Phase {
    /// Digital showcase: categories and products only
    #[default]
    One,
    /// Adds view analytics and the review prompt
    Two,
    /// Full commerce: cart, ordering, upsells, stock and timed menus
    Three,
}

/// Capabilities the frontend enables for a phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(clippy::struct_excessive_bools)]
pub struct PhaseFeatures {
    /// "Add to cart" button on product cards
    pub show_add_to_cart: bool,
    /// Cart drawer and checkout
    pub show_cart: bool,
    /// Related-product suggestions
    pub show_upsells: bool,
    /// Out-of-stock badges
    pub show_stock_status: bool,
    /// Hide categories outside their availability window
    pub check_availability_hours: bool,
    /// "Call waiter" button
    pub show_waiter_button: bool,
    /// Record product and category views
    pub enable_analytics: bool,
    /// Review prompt after browsing
    pub show_review_funnel: bool,
}

impl Phase {
    /// All phases in ascending order.
    pub const ALL: [Self; 3] = [Self::One, Self::Two, Self::Three];

    /// Numeric value, 1 to 3.
    #[must_use]
    pub const fn number(self) -> i32 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
        }
    }

    /// Feature flags for this phase.
    #[must_use]
    pub const fn features(self) -> PhaseFeatures {
        let analytics = matches!(self, Self::Two | Self::Three);
        let commerce = matches!(self, Self::Three);

        PhaseFeatures {
            show_add_to_cart: commerce,
            show_cart: commerce,
            show_upsells: commerce,
            show_stock_status: commerce,
            check_availability_hours: commerce,
            show_waiter_button: commerce,
            enable_analytics: analytics,
            show_review_funnel: analytics,
        }
    }

    /// Short description shown when the demo switches phase.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::One => "Phase 1: Dijital Vitrin - Kategoriler, Ürünler, Temel Görünüm",
            Self::Two => "Phase 2: Analitik - + Analitik Hooks, Değerlendirme Popup",
            Self::Three => "Phase 3: Tam Ticaret - + Sipariş, Upsell, Stok, Zamanlı Menü",
        }
    }
}

impl TryFrom<i32> for Phase {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self> {
        match value {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            phase => Err(Error::InvalidPhase { phase }),
        }
    }
}

impl From<Phase> for i32 {
    fn from(phase: Phase) -> Self {
        phase.number()
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

impl Serialize for Phase {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.number())
    }
}

impl<'de> Deserialize<'de> for Phase {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        let value = i32::deserialize(deserializer)?;
        Self::try_from(value).map_err(serde::de::Error::custom)
    }
}
