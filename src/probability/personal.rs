// src/probability/personal.rs

use crate::config::EstimatorConfig;
use crate::stores::traits::UserStatStore;

/// A customer's personal buy probability at a discount, plus the amount of
/// evidence behind it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PersonalEstimate {
    pub probability: f64,
    /// Total trials backing the estimate. 0 means "no personal signal";
    /// the probability is 0.0 in that case and must be ignored by callers.
    pub trials: u32,
}

impl PersonalEstimate {
    pub const NONE: Self = Self {
        probability: 0.0,
        trials: 0,
    };
}

/// Beta-Binomial posterior mean over the customer's observed outcomes in
/// every discount bin containing `discount_pct`.
///
/// Trials and buys are summed across matching bins, then smoothed with the
/// configured Beta prior: `(buys + a) / (trials + a + b)`. With the default
/// Beta(1, 1) this is add-one smoothing, which never returns exactly 0 or 1
/// for finite trials and so never extrapolates overconfidently from a
/// handful of observations.
pub fn personal_probability(
    stats: &dyn UserStatStore,
    user_id: u64,
    product_name: &str,
    discount_pct: f64,
    config: &EstimatorConfig,
) -> PersonalEstimate {
    let mut trials: u64 = 0;
    let mut buys: u64 = 0;
    for stat in stats.stats(user_id, product_name) {
        if stat.contains(discount_pct) {
            trials += u64::from(stat.trials);
            buys += u64::from(stat.buys);
        }
    }

    if trials == 0 {
        return PersonalEstimate::NONE;
    }

    let probability =
        (buys as f64 + config.prior_alpha) / (trials as f64 + config.prior_alpha + config.prior_beta);
    PersonalEstimate {
        probability,
        trials: trials.min(u64::from(u32::MAX)) as u32,
    }
}
