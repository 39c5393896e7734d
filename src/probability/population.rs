// src/probability/population.rs

use crate::model::reference::PriceResponseCurve;
use crate::stores::traits::PriceCurveStore;

/// Population-wide buy probability at a given discount, from the category's
/// empirical price-response curve.
///
/// This function must never fail: when no curve exists for the category, or
/// the stored curve is malformed, it falls back to a flat linear
/// approximation of discount response. Outside the curve's discount domain
/// it clamps to the boundary probability rather than extrapolating.
pub fn population_probability(
    curves: &dyn PriceCurveStore,
    category: &str,
    discount_pct: f64,
) -> f64 {
    match curves.curve(category) {
        Some(curve) if curve.is_well_formed() => interpolate(curve, discount_pct),
        _ => linear_fallback(discount_pct),
    }
}

/// Safety-net response curve for categories with no empirical data:
/// 5% base appetite plus 0.85 probability points per discount point,
/// capped at 0.9.
pub fn linear_fallback(discount_pct: f64) -> f64 {
    (0.05 + 0.85 * discount_pct / 100.0).min(0.9)
}

fn interpolate(curve: &PriceResponseCurve, discount_pct: f64) -> f64 {
    let points = &curve.points;
    let first = points[0];
    let last = points[points.len() - 1];

    // Clamp outside the observed discount range.
    if discount_pct <= first.discount_pct {
        return first.probability;
    }
    if discount_pct >= last.discount_pct {
        return last.probability;
    }

    for pair in points.windows(2) {
        let (lo, hi) = (pair[0], pair[1]);
        if lo.discount_pct <= discount_pct && discount_pct <= hi.discount_pct {
            let span = hi.discount_pct - lo.discount_pct;
            if span == 0.0 {
                return lo.probability;
            }
            let ratio = (discount_pct - lo.discount_pct) / span;
            return lo.probability + ratio * (hi.probability - lo.probability);
        }
    }

    // Unreachable for a well-formed curve; keep the conservative boundary.
    last.probability
}
