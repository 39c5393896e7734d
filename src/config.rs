// src/config.rs

/// Tunable parameters of the estimator.
///
/// Everything here was a hard-coded constant at some point in the model's
/// history; they are collected into one injected struct so a caller can
/// calibrate them without touching the algorithm.
#[derive(Debug, Clone)]
pub struct EstimatorConfig {
    /// Number of discrete freshness buckets in the decay chain.
    /// 48 buckets of one hour each covers a two-day shelf window.
    pub buckets: usize,
    /// Duration of a single bucket, in hours.
    pub bucket_hours: f64,
    /// Credibility constant m in the blend weight w = n / (n + m).
    /// Roughly: how many personal observations it takes before personal and
    /// population evidence carry equal weight.
    pub credibility_m: f64,
    /// Beta prior for the personal buy-probability posterior.
    /// (1.0, 1.0) is the uniform prior, i.e. add-one smoothing.
    pub prior_alpha: f64,
    pub prior_beta: f64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            buckets: 48,
            bucket_hours: 1.0,
            credibility_m: 15.0,
            prior_alpha: 1.0,
            prior_beta: 1.0,
        }
    }
}
