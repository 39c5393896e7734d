// src/model/reference.rs

use serde::{Deserialize, Serialize};

/// One control point of an empirical price-response curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    /// Discount level, in percent (0-100).
    pub discount_pct: f64,
    /// Observed population buy probability at that discount.
    pub probability: f64,
}

/// Empirical discount -> buy-probability curve for one product category.
///
/// Points must be ordered by non-decreasing discount with probabilities in
/// [0, 1]; curves that fail the check are treated as absent and the caller
/// falls back to the linear approximation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceResponseCurve {
    pub points: Vec<CurvePoint>,
}

impl PriceResponseCurve {
    pub fn new(points: Vec<CurvePoint>) -> Self {
        Self { points }
    }

    /// Convenience constructor from parallel bin/probability slices, the
    /// shape reference curves are usually published in. Mismatched lengths
    /// yield an empty (ill-formed) curve.
    pub fn from_bins(discount_bins: &[f64], probabilities: &[f64]) -> Self {
        if discount_bins.len() != probabilities.len() {
            return Self { points: Vec::new() };
        }
        let points = discount_bins
            .iter()
            .zip(probabilities)
            .map(|(&discount_pct, &probability)| CurvePoint {
                discount_pct,
                probability,
            })
            .collect();
        Self { points }
    }

    pub fn is_well_formed(&self) -> bool {
        if self.points.is_empty() {
            return false;
        }
        let ordered = self
            .points
            .windows(2)
            .all(|w| w[0].discount_pct <= w[1].discount_pct);
        let in_range = self
            .points
            .iter()
            .all(|p| (0.0..=1.0).contains(&p.probability) && p.discount_pct.is_finite());
        ordered && in_range
    }
}

/// Observed purchase outcomes for one (customer, product) pair within one
/// discount bin: out of `trials` offers in [bin_low, bin_high), the customer
/// bought `buys` times.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UserDiscountStat {
    pub bin_low: f64,
    pub bin_high: f64,
    pub trials: u32,
    pub buys: u32,
}

impl UserDiscountStat {
    /// Bin membership rule: low-inclusive, high-exclusive.
    pub fn contains(&self, discount_pct: f64) -> bool {
        self.bin_low <= discount_pct && discount_pct < self.bin_high
    }
}

/// Cradle-to-disposal emission constants for one product.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProductLifecycleFactor {
    /// Average mass of one unit, in kg.
    pub mass_kg: f64,
    /// Production emissions, kg CO2e per kg of product.
    pub production_ef: f64,
    /// Disposal emissions, kg CO2e per unit.
    pub disposal_ef: f64,
    /// Fraction of saved units that truly displace new production.
    pub displacement: f64,
}

impl ProductLifecycleFactor {
    pub fn new(mass_kg: f64, production_ef: f64, disposal_ef: f64) -> Self {
        Self {
            mass_kg,
            production_ef,
            disposal_ef,
            displacement: 1.0,
        }
    }

    /// kg CO2e avoided per unit saved from the bin.
    pub fn co2e_per_unit(&self) -> f64 {
        self.displacement * self.mass_kg * self.production_ef + self.disposal_ef
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_curve_passes() {
        let curve = PriceResponseCurve::from_bins(&[0.0, 25.0, 75.0], &[0.05, 0.45, 0.90]);
        assert!(curve.is_well_formed());
    }

    #[test]
    fn empty_and_unordered_curves_fail() {
        assert!(!PriceResponseCurve::new(Vec::new()).is_well_formed());
        let unordered = PriceResponseCurve::from_bins(&[50.0, 25.0], &[0.5, 0.4]);
        assert!(!unordered.is_well_formed());
    }

    #[test]
    fn mismatched_bins_yield_ill_formed_curve() {
        let curve = PriceResponseCurve::from_bins(&[0.0, 25.0, 75.0], &[0.05, 0.45]);
        assert!(!curve.is_well_formed());
    }

    #[test]
    fn bin_membership_is_half_open() {
        let stat = UserDiscountStat {
            bin_low: 20.0,
            bin_high: 40.0,
            trials: 5,
            buys: 2,
        };
        assert!(stat.contains(20.0));
        assert!(stat.contains(39.9));
        assert!(!stat.contains(40.0));
        assert!(!stat.contains(10.0));
    }

    #[test]
    fn co2e_per_unit_combines_production_and_disposal() {
        let factor = ProductLifecycleFactor {
            mass_kg: 0.18,
            production_ef: 0.43,
            disposal_ef: 0.08,
            displacement: 1.0,
        };
        let expected = 0.18 * 0.43 + 0.08;
        assert!((factor.co2e_per_unit() - expected).abs() < 1e-12);
    }
}
