// src/pricing/curve.rs

use crate::error::EstimatorError;
use serde::{Deserialize, Serialize};

/// Shape of one discounting policy: how deep discounts go and how fast they
/// ramp up as freshness decays.
///
/// The estimator always compares two of these, a baseline and a dynamic
/// policy. It never invents a policy of its own.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolicyParameters {
    /// Maximum discount, as a fraction (0.75 = 75% off at zero freshness).
    /// Values above 1.0 are read as percent and normalized down.
    pub max_discount: f64,
    /// Exponent of the freshness curve. Higher powers hold price longer and
    /// discount harder near spoilage.
    pub power: f64,
}

impl PolicyParameters {
    pub fn new(max_discount: f64, power: f64) -> Self {
        Self { max_discount, power }
    }

    /// The no-discount reference policy.
    pub fn baseline() -> Self {
        Self::new(0.0, 1.0)
    }

    /// The production dynamic-discount policy: up to 75% off, power 1.5.
    pub fn dynamic() -> Self {
        Self::new(0.75, 1.5)
    }
}

/// Maps a freshness score to a discount fraction under the given policy.
///
/// Formula: `max_discount * (1 - freshness^power)`, clamped to
/// `[0, max_discount]`. Non-increasing in freshness for positive powers:
/// a fully fresh item gets no discount, a fully decayed one gets the
/// policy maximum.
///
/// `freshness` must already be on the [0, 1] scale; out-of-range values are
/// a caller error, not something to silently clamp here.
pub fn discount_for_freshness(
    freshness: f64,
    policy: PolicyParameters,
) -> Result<f64, EstimatorError> {
    if !(0.0..=1.0).contains(&freshness) {
        return Err(EstimatorError::InvalidFreshness(freshness));
    }

    // Accept percent-style maxima (75 instead of 0.75).
    let max_discount = if policy.max_discount > 1.0 {
        policy.max_discount / 100.0
    } else {
        policy.max_discount
    };

    let discount = max_discount * (1.0 - freshness.powf(policy.power));
    Ok(discount.clamp(0.0, max_discount.max(0.0)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn fresh_item_gets_no_discount() {
        let d = discount_for_freshness(1.0, PolicyParameters::dynamic()).unwrap();
        assert!(d.abs() < EPS);
    }

    #[test]
    fn decayed_item_gets_the_policy_maximum() {
        let d = discount_for_freshness(0.0, PolicyParameters::dynamic()).unwrap();
        assert!((d - 0.75).abs() < EPS);
    }

    #[test]
    fn discount_is_non_increasing_in_freshness() {
        let policy = PolicyParameters::new(0.6, 2.0);
        let mut previous = f64::INFINITY;
        for step in 0..=20 {
            let f = step as f64 / 20.0;
            let d = discount_for_freshness(f, policy).unwrap();
            assert!(d <= previous + EPS);
            assert!((0.0..=0.6 + EPS).contains(&d));
            previous = d;
        }
    }

    #[test]
    fn percent_maximum_is_normalized() {
        let policy = PolicyParameters::new(75.0, 1.0);
        let d = discount_for_freshness(0.0, policy).unwrap();
        assert!((d - 0.75).abs() < EPS);
    }

    #[test]
    fn out_of_range_freshness_is_rejected() {
        let policy = PolicyParameters::dynamic();
        assert_eq!(
            discount_for_freshness(-0.1, policy),
            Err(EstimatorError::InvalidFreshness(-0.1))
        );
        assert_eq!(
            discount_for_freshness(1.5, policy),
            Err(EstimatorError::InvalidFreshness(1.5))
        );
    }

    #[test]
    fn baseline_policy_never_discounts() {
        for step in 0..=10 {
            let f = step as f64 / 10.0;
            let d = discount_for_freshness(f, PolicyParameters::baseline()).unwrap();
            assert!(d.abs() < EPS);
        }
    }
}
