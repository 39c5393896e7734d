// src/impact/aggregate.rs

use serde::Serialize;

use crate::error::EstimatorError;
use crate::impact::estimator::ImpactEstimator;
use crate::impact::lifecycle;
use crate::model::inventory::InventoryLot;
use crate::pricing::curve::PolicyParameters;

/// Impact attributed to a single lot. Serializable so runs can be exported
/// to CSV for inspection.
#[derive(Debug, Clone, Serialize)]
pub struct LotImpact {
    pub lot_id: u64,
    pub product_name: String,
    pub units_saved: f64,
    pub waste_saved_kg: f64,
    pub co2e_saved: f64,
    pub revenue_generated: f64,
}

/// Totals across a portfolio of lots, each rounded to two decimals.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PortfolioImpact {
    pub units_saved: f64,
    pub waste_saved_kg: f64,
    pub co2e_saved: f64,
    pub revenue_generated: f64,
    pub lots_processed: usize,
    pub lots_skipped: usize,
}

/// Full impact estimate for one lot: units, weight, emissions, revenue.
pub fn estimate_lot(
    estimator: &ImpactEstimator<'_>,
    lot: &InventoryLot,
    baseline: PolicyParameters,
    dynamic: PolicyParameters,
    user_id: u64,
) -> Result<LotImpact, EstimatorError> {
    let units_saved = estimator.estimate_units_saved(lot, baseline, dynamic, user_id)?;
    let co2e_saved = estimator.estimate_co2e_saved(units_saved, &lot.product_name);
    let revenue_generated =
        estimator.estimate_revenue_generated(units_saved, lot.effective_price());
    let waste_saved_kg = lifecycle::weight_from_quantity(&lot.product_name, units_saved);

    Ok(LotImpact {
        lot_id: lot.id,
        product_name: lot.product_name.clone(),
        units_saved,
        waste_saved_kg,
        co2e_saved,
        revenue_generated,
    })
}

/// Single-lot estimate addressed by lot id, the shape a reporting endpoint
/// calls with. Unlike the portfolio loop, an unknown id here is a hard
/// failure at the call boundary.
pub fn estimate_lot_by_id(
    estimator: &ImpactEstimator<'_>,
    lots: &[InventoryLot],
    lot_id: u64,
    baseline: PolicyParameters,
    dynamic: PolicyParameters,
    user_id: u64,
) -> Result<LotImpact, EstimatorError> {
    let lot = lots
        .iter()
        .find(|lot| lot.id == lot_id)
        .ok_or(EstimatorError::UnknownLot(lot_id))?;
    estimate_lot(estimator, lot, baseline, dynamic, user_id)
}

/// Runs the per-lot estimate across a portfolio and sums the results.
///
/// The lot set is taken as given; filtering (store, positive quantity) is
/// the caller's job. A failure on one lot is logged and that lot skipped,
/// never aborting the rest of the portfolio.
pub fn aggregate_impact(
    estimator: &ImpactEstimator<'_>,
    lots: &[InventoryLot],
    user_id: u64,
    baseline: PolicyParameters,
    dynamic: PolicyParameters,
) -> PortfolioImpact {
    let mut totals = PortfolioImpact::default();

    for lot in lots {
        match estimate_lot(estimator, lot, baseline, dynamic, user_id) {
            Ok(impact) => {
                totals.units_saved += impact.units_saved;
                totals.waste_saved_kg += impact.waste_saved_kg;
                totals.co2e_saved += impact.co2e_saved;
                totals.revenue_generated += impact.revenue_generated;
                totals.lots_processed += 1;
            }
            Err(error) => {
                tracing::warn!(
                    lot_id = lot.id,
                    product = %lot.product_name,
                    %error,
                    "skipping lot in portfolio aggregate"
                );
                totals.lots_skipped += 1;
            }
        }
    }

    totals.units_saved = round2(totals.units_saved);
    totals.waste_saved_kg = round2(totals.waste_saved_kg);
    totals.co2e_saved = round2(totals.co2e_saved);
    totals.revenue_generated = round2(totals.revenue_generated);
    totals
}

/// Keeps only lots worth estimating: positive quantity, optionally a single
/// store. Mirrors the inventory query the reporting layer runs.
pub fn filter_lots(lots: Vec<InventoryLot>, store_id: Option<u32>) -> Vec<InventoryLot> {
    lots.into_iter()
        .filter(|lot| lot.quantity > 0)
        .filter(|lot| store_id.map_or(true, |id| lot.store_id == id))
        .collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
