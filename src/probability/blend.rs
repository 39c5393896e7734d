// src/probability/blend.rs

use crate::config::EstimatorConfig;
use crate::probability::personal::personal_probability;
use crate::probability::population::population_probability;
use crate::stores::traits::{PriceCurveStore, UserStatStore};

/// Buy probability for one customer at one discount level, blending the
/// population curve with the customer's own history.
///
/// Empirical-Bayes shrinkage: the personal estimate gets weight
/// `w = n / (n + m)` where n is the customer's trial count and m the
/// credibility constant. With no personal evidence the population value is
/// returned unchanged; as n grows past m the blend approaches the personal
/// estimate.
pub fn blended_probability(
    curves: &dyn PriceCurveStore,
    stats: &dyn UserStatStore,
    user_id: u64,
    product_name: &str,
    category: &str,
    discount_pct: f64,
    config: &EstimatorConfig,
) -> f64 {
    let p_pop = population_probability(curves, category, discount_pct);
    let personal = personal_probability(stats, user_id, product_name, discount_pct, config);

    if personal.trials == 0 {
        return p_pop;
    }

    let n = f64::from(personal.trials);
    let w = n / (n + config.credibility_m);
    w * personal.probability + (1.0 - w) * p_pop
}
