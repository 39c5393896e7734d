// src/model/inventory.rs

use serde::Serialize;

/// One batch of a perishable product on the shelf.
///
/// Lots are owned by the caller's inventory system; the estimator only
/// reads them. Prices are per unit.
#[derive(Debug, Clone, Serialize)]
pub struct InventoryLot {
    pub id: u64,
    pub product_name: String,
    pub category: String,
    pub quantity: u32,
    pub current_price: f64,
    pub original_price: f64,
    /// Hours since the lot arrived in store. Informational only; decay is
    /// driven by the freshness score, not the clock.
    pub arrival_hours_ago: f64,
    pub store_id: u32,
    /// Latest freshness reading, if one exists for this lot.
    pub freshness: Option<FreshnessState>,
}

impl InventoryLot {
    /// Price used for revenue attribution: the live discounted price, or
    /// the original price when the current one is missing or non-positive.
    pub fn effective_price(&self) -> f64 {
        if self.current_price > 0.0 {
            self.current_price
        } else {
            self.original_price
        }
    }
}

/// A freshness reading linked to one lot at estimation time.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FreshnessState {
    /// Raw score as reported upstream. Canonically on the [0, 1] scale,
    /// but some sources emit [0, 100].
    pub score: f64,
}

impl FreshnessState {
    pub fn new(score: f64) -> Self {
        Self { score }
    }

    /// Freshness on the canonical [0, 1] scale.
    ///
    /// Contract with upstream sources: scores above 1.0 are read as
    /// percent-scale ([0, 100]) and divided by 100; the result is then
    /// clamped into [0, 1]. A consequence is that raw scores in (1.0, 2.0)
    /// are read as 1-2% freshness, so sources that really mean the [0, 1]
    /// scale must not exceed 1.0. This is the only place the rescale
    /// happens; everything downstream assumes [0, 1].
    pub fn normalized(&self) -> f64 {
        let score = if self.score > 1.0 {
            self.score / 100.0
        } else {
            self.score
        };
        score.clamp(0.0, 1.0)
    }
}
