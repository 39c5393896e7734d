// src/stores/traits.rs

use crate::model::reference::{PriceResponseCurve, ProductLifecycleFactor, UserDiscountStat};

/// Read access to per-category price-response curves.
///
/// Implementations are expected to be cheap lookups over already-fetched
/// data; the estimator never triggers I/O through these traits. `Send +
/// Sync` so a portfolio run can be spread across worker threads with shared
/// read access.
pub trait PriceCurveStore: Send + Sync {
    fn curve(&self, category: &str) -> Option<&PriceResponseCurve>;
}

/// Read access to per-(customer, product) discount statistics.
pub trait UserStatStore: Send + Sync {
    /// All stat rows for the pair, across every discount bin. An unknown
    /// pair yields an empty slice, never an error.
    fn stats(&self, user_id: u64, product_name: &str) -> &[UserDiscountStat];
}

/// Read access to per-product life-cycle-assessment factors.
pub trait LifecycleStore: Send + Sync {
    fn factor(&self, product_name: &str) -> Option<&ProductLifecycleFactor>;
}
