// src/impact/estimator.rs

use crate::config::EstimatorConfig;
use crate::error::EstimatorError;
use crate::impact::lifecycle;
use crate::markov::chain::sale_probability;
use crate::markov::solver::{DenseLuSolver, LinearSolver};
use crate::model::inventory::InventoryLot;
use crate::pricing::curve::{discount_for_freshness, PolicyParameters};
use crate::probability::blend::blended_probability;
use crate::stores::traits::{LifecycleStore, PriceCurveStore, UserStatStore};

/// Estimates, per inventory lot, the waste a dynamic discount policy avoids
/// relative to a no-discount baseline.
///
/// Borrows the reference-data stores and holds no state of its own between
/// calls; every estimate is a pure function of the lot, the two policies and
/// the stores, so lots can be evaluated on parallel workers sharing one
/// estimator.
pub struct ImpactEstimator<'a> {
    curves: &'a dyn PriceCurveStore,
    user_stats: &'a dyn UserStatStore,
    lifecycle: &'a dyn LifecycleStore,
    solver: Box<dyn LinearSolver>,
    config: EstimatorConfig,
}

impl<'a> ImpactEstimator<'a> {
    pub fn new(
        curves: &'a dyn PriceCurveStore,
        user_stats: &'a dyn UserStatStore,
        lifecycle: &'a dyn LifecycleStore,
        config: EstimatorConfig,
    ) -> Self {
        Self {
            curves,
            user_stats,
            lifecycle,
            solver: Box::new(DenseLuSolver),
            config,
        }
    }

    /// Swaps the dense LU solve for another linear-solve method.
    pub fn with_solver(mut self, solver: Box<dyn LinearSolver>) -> Self {
        self.solver = solver;
        self
    }

    /// Whole-lifetime probability that the lot's product sells before it
    /// spoils, for one customer under one policy.
    ///
    /// Each freshness bucket gets its policy discount, then the blended
    /// population/personal buy probability at that discount; the absorbing
    /// chain races sale against spoilage across the buckets.
    pub fn sale_probability(
        &self,
        initial_freshness: f64,
        policy: PolicyParameters,
        user_id: u64,
        product_name: &str,
        category: &str,
    ) -> Result<f64, EstimatorError> {
        if !(0.0..=1.0).contains(&initial_freshness) {
            return Err(EstimatorError::InvalidFreshness(initial_freshness));
        }
        if self.config.buckets == 0 {
            return Err(EstimatorError::InvalidBucketCount(0));
        }

        let probability = sale_probability(
            initial_freshness,
            self.config.buckets,
            |bucket_freshness| {
                // Bucket freshness is in [0, 1] by construction, so the
                // discount curve cannot reject it.
                let discount = discount_for_freshness(bucket_freshness, policy).unwrap_or(0.0);
                blended_probability(
                    self.curves,
                    self.user_stats,
                    user_id,
                    product_name,
                    category,
                    discount * 100.0,
                    &self.config,
                )
            },
            self.solver.as_ref(),
        );
        Ok(probability)
    }

    /// Units of the lot expected to sell under the dynamic policy that would
    /// have spoiled under the baseline.
    ///
    /// Clamped at zero: a dynamic policy is never credited with negative
    /// savings, a negative delta is model noise rather than a real effect.
    pub fn estimate_units_saved(
        &self,
        lot: &InventoryLot,
        baseline: PolicyParameters,
        dynamic: PolicyParameters,
        user_id: u64,
    ) -> Result<f64, EstimatorError> {
        let freshness = lot
            .freshness
            .map(|state| state.normalized())
            .unwrap_or(1.0); // no reading: assume fully fresh

        let p_dynamic = self.sale_probability(
            freshness,
            dynamic,
            user_id,
            &lot.product_name,
            &lot.category,
        )?;
        let p_baseline = self.sale_probability(
            freshness,
            baseline,
            user_id,
            &lot.product_name,
            &lot.category,
        )?;

        Ok((f64::from(lot.quantity) * (p_dynamic - p_baseline)).max(0.0))
    }

    /// kg CO2e avoided by the saved units, from the lifecycle store or the
    /// per-category fallback tables.
    pub fn estimate_co2e_saved(&self, units_saved: f64, product_name: &str) -> f64 {
        if units_saved <= 0.0 {
            return 0.0;
        }
        let co2e_per_unit = match self.lifecycle.factor(product_name) {
            Some(factor) => factor.co2e_per_unit(),
            None => {
                tracing::debug!(product_name, "no lifecycle factor, using fallback tables");
                lifecycle::average_weight_kg(product_name) * lifecycle::emission_factor(product_name)
            }
        };
        units_saved * co2e_per_unit
    }

    /// Revenue recovered by selling the saved units at the given price.
    pub fn estimate_revenue_generated(&self, units_saved: f64, price_per_unit: f64) -> f64 {
        units_saved * price_per_unit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::inventory::{FreshnessState, InventoryLot};
    use crate::model::reference::{PriceResponseCurve, ProductLifecycleFactor};
    use crate::stores::memory::{InMemoryCurveStore, InMemoryLifecycleStore, InMemoryUserStatStore};

    fn lot(quantity: u32, freshness: Option<f64>) -> InventoryLot {
        InventoryLot {
            id: 1,
            product_name: "apple".into(),
            category: "apple".into(),
            quantity,
            current_price: 1.50,
            original_price: 2.00,
            arrival_hours_ago: 12.0,
            store_id: 1,
            freshness: freshness.map(FreshnessState::new),
        }
    }

    fn seeded_curves() -> InMemoryCurveStore {
        let mut store = InMemoryCurveStore::new();
        store.insert(
            "apple",
            PriceResponseCurve::from_bins(&[0.0, 50.0, 75.0], &[0.05, 0.75, 0.90]),
        );
        store
    }

    #[test]
    fn concrete_scenario_from_the_model_notes() {
        // quantity=100, freshness=0.2, the reference apple curve, baseline
        // (0, 1) vs dynamic (0.75, 1.5), K=48, no personal stats.
        let curves = seeded_curves();
        let stats = InMemoryUserStatStore::new();
        let lca = InMemoryLifecycleStore::new();
        let estimator =
            ImpactEstimator::new(&curves, &stats, &lca, EstimatorConfig::default());

        let p_base = estimator
            .sale_probability(0.2, PolicyParameters::baseline(), 1, "apple", "apple")
            .unwrap();
        let p_dyn = estimator
            .sale_probability(0.2, PolicyParameters::dynamic(), 1, "apple", "apple")
            .unwrap();

        // Baseline never discounts, so every bucket sells at the curve's
        // 0%-discount probability; starting at bucket 39 of 48 leaves 10
        // draws at p=0.05.
        let expected_base = 1.0 - 0.95_f64.powi(10);
        assert!((p_base - expected_base).abs() < 1e-9);
        assert!(p_dyn > p_base);

        let units = estimator
            .estimate_units_saved(
                &lot(100, Some(0.2)),
                PolicyParameters::baseline(),
                PolicyParameters::dynamic(),
                1,
            )
            .unwrap();
        assert!(units > 0.0 && units < 100.0);
    }

    #[test]
    fn deeper_discounts_never_reduce_sale_probability() {
        let curves = seeded_curves();
        let stats = InMemoryUserStatStore::new();
        let lca = InMemoryLifecycleStore::new();
        let estimator =
            ImpactEstimator::new(&curves, &stats, &lca, EstimatorConfig::default());

        let mut previous = 0.0;
        for max_discount in [0.0, 0.25, 0.5, 0.75] {
            let policy = PolicyParameters::new(max_discount, 1.5);
            let p = estimator
                .sale_probability(0.5, policy, 1, "apple", "apple")
                .unwrap();
            assert!(p >= previous - 1e-9);
            previous = p;
        }
    }

    #[test]
    fn units_saved_is_clamped_at_zero() {
        let curves = seeded_curves();
        let stats = InMemoryUserStatStore::new();
        let lca = InMemoryLifecycleStore::new();
        let estimator =
            ImpactEstimator::new(&curves, &stats, &lca, EstimatorConfig::default());

        // Dynamic policy weaker than baseline: delta would be negative.
        let units = estimator
            .estimate_units_saved(
                &lot(50, Some(0.3)),
                PolicyParameters::dynamic(),
                PolicyParameters::baseline(),
                1,
            )
            .unwrap();
        assert_eq!(units, 0.0);
    }

    #[test]
    fn missing_freshness_defaults_to_fully_fresh() {
        let curves = seeded_curves();
        let stats = InMemoryUserStatStore::new();
        let lca = InMemoryLifecycleStore::new();
        let estimator =
            ImpactEstimator::new(&curves, &stats, &lca, EstimatorConfig::default());

        let with_reading = estimator
            .estimate_units_saved(
                &lot(100, Some(1.0)),
                PolicyParameters::baseline(),
                PolicyParameters::dynamic(),
                1,
            )
            .unwrap();
        let without_reading = estimator
            .estimate_units_saved(
                &lot(100, None),
                PolicyParameters::baseline(),
                PolicyParameters::dynamic(),
                1,
            )
            .unwrap();
        assert!((with_reading - without_reading).abs() < 1e-12);
    }

    #[test]
    fn percent_scale_freshness_is_normalized_at_the_boundary() {
        let curves = seeded_curves();
        let stats = InMemoryUserStatStore::new();
        let lca = InMemoryLifecycleStore::new();
        let estimator =
            ImpactEstimator::new(&curves, &stats, &lca, EstimatorConfig::default());

        let unit_scale = estimator
            .estimate_units_saved(
                &lot(100, Some(0.4)),
                PolicyParameters::baseline(),
                PolicyParameters::dynamic(),
                1,
            )
            .unwrap();
        let percent_scale = estimator
            .estimate_units_saved(
                &lot(100, Some(40.0)),
                PolicyParameters::baseline(),
                PolicyParameters::dynamic(),
                1,
            )
            .unwrap();
        assert!((unit_scale - percent_scale).abs() < 1e-12);
    }

    #[test]
    fn direct_call_with_bad_freshness_is_a_hard_error() {
        let curves = seeded_curves();
        let stats = InMemoryUserStatStore::new();
        let lca = InMemoryLifecycleStore::new();
        let estimator =
            ImpactEstimator::new(&curves, &stats, &lca, EstimatorConfig::default());
        let result =
            estimator.sale_probability(1.4, PolicyParameters::dynamic(), 1, "apple", "apple");
        assert_eq!(result, Err(EstimatorError::InvalidFreshness(1.4)));
    }

    #[test]
    fn co2e_prefers_the_lifecycle_store() {
        let curves = seeded_curves();
        let stats = InMemoryUserStatStore::new();
        let mut lca = InMemoryLifecycleStore::new();
        lca.insert("apple", ProductLifecycleFactor::new(0.18, 0.43, 0.08));
        let estimator =
            ImpactEstimator::new(&curves, &stats, &lca, EstimatorConfig::default());

        let expected_per_unit = 1.0 * 0.18 * 0.43 + 0.08;
        let co2e = estimator.estimate_co2e_saved(10.0, "apple");
        assert!((co2e - 10.0 * expected_per_unit).abs() < 1e-12);
    }

    #[test]
    fn co2e_falls_back_to_category_tables_then_defaults() {
        let curves = seeded_curves();
        let stats = InMemoryUserStatStore::new();
        let lca = InMemoryLifecycleStore::new();
        let estimator =
            ImpactEstimator::new(&curves, &stats, &lca, EstimatorConfig::default());

        // Known category fallback: mass * emission factor, no disposal term.
        let apple = estimator.estimate_co2e_saved(10.0, "apple");
        assert!((apple - 10.0 * 0.18 * 0.43).abs() < 1e-12);

        // Product absent from every table: global default constants.
        let durian = estimator.estimate_co2e_saved(10.0, "durian");
        assert!((durian - 10.0 * 0.15 * 0.45).abs() < 1e-12);
    }

    #[test]
    fn solver_seam_accepts_a_substitute_method() {
        use crate::markov::solver::LinearSolver;
        use nalgebra::DMatrix;

        // A solver that always reports singularity: every chain degrades to
        // the conservative zero.
        #[derive(Debug)]
        struct GivesUp;
        impl LinearSolver for GivesUp {
            fn solve(&self, _a: DMatrix<f64>, _b: DMatrix<f64>) -> Option<DMatrix<f64>> {
                None
            }
        }

        let curves = seeded_curves();
        let stats = InMemoryUserStatStore::new();
        let lca = InMemoryLifecycleStore::new();
        let estimator =
            ImpactEstimator::new(&curves, &stats, &lca, EstimatorConfig::default())
                .with_solver(Box::new(GivesUp));
        let p = estimator
            .sale_probability(0.5, PolicyParameters::dynamic(), 1, "apple", "apple")
            .unwrap();
        assert_eq!(p, 0.0);
    }

    #[test]
    fn revenue_is_units_times_price() {
        let curves = seeded_curves();
        let stats = InMemoryUserStatStore::new();
        let lca = InMemoryLifecycleStore::new();
        let estimator =
            ImpactEstimator::new(&curves, &stats, &lca, EstimatorConfig::default());
        assert!((estimator.estimate_revenue_generated(12.5, 1.6) - 20.0).abs() < 1e-12);
    }

    #[test]
    fn zero_buckets_is_rejected_at_the_boundary() {
        let curves = seeded_curves();
        let stats = InMemoryUserStatStore::new();
        let lca = InMemoryLifecycleStore::new();
        let config = EstimatorConfig {
            buckets: 0,
            ..EstimatorConfig::default()
        };
        let estimator = ImpactEstimator::new(&curves, &stats, &lca, config);
        let result =
            estimator.sale_probability(0.5, PolicyParameters::dynamic(), 1, "apple", "apple");
        assert_eq!(result, Err(EstimatorError::InvalidBucketCount(0)));
    }

    #[test]
    fn single_bucket_config_reduces_to_one_draw() {
        let curves = seeded_curves();
        let stats = InMemoryUserStatStore::new();
        let lca = InMemoryLifecycleStore::new();
        let config = EstimatorConfig {
            buckets: 1,
            ..EstimatorConfig::default()
        };
        let estimator = ImpactEstimator::new(&curves, &stats, &lca, config);
        let p = estimator
            .sale_probability(1.0, PolicyParameters::baseline(), 1, "apple", "apple")
            .unwrap();
        // One bucket at full freshness, no discount: the curve's 0% point.
        assert!((p - 0.05).abs() < 1e-9);
    }
}
