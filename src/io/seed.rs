// src/io/seed.rs

use rand::{thread_rng, Rng};
use rand_distr::{Distribution, Normal};

use crate::model::inventory::{FreshnessState, InventoryLot};
use crate::model::reference::{PriceResponseCurve, ProductLifecycleFactor, UserDiscountStat};
use crate::stores::memory::{InMemoryCurveStore, InMemoryLifecycleStore, InMemoryUserStatStore};

/// Categories covered by the reference curves and lifecycle seed data.
pub const SEED_CATEGORIES: &[&str] = &[
    "apple",
    "banana",
    "orange",
    "strawberry",
    "grape",
    "avocado",
    "tomato",
    "lettuce",
    "blueberry",
    "mango",
];

const SEED_DISCOUNT_BINS: [f64; 5] = [0.0, 10.0, 25.0, 50.0, 75.0];

/// Conservative per-category buy probabilities at the seed discount bins,
/// from observed discount-response behaviour for common produce.
const SEED_CURVES: &[(&str, [f64; 5])] = &[
    ("apple", [0.05, 0.15, 0.45, 0.75, 0.90]),
    ("banana", [0.05, 0.18, 0.50, 0.78, 0.92]),
    ("orange", [0.05, 0.15, 0.45, 0.75, 0.90]),
    ("strawberry", [0.05, 0.20, 0.55, 0.80, 0.95]), // more price-sensitive
    ("grape", [0.05, 0.15, 0.45, 0.75, 0.90]),
    ("avocado", [0.05, 0.25, 0.60, 0.85, 0.95]), // very price-sensitive
    ("tomato", [0.05, 0.15, 0.45, 0.75, 0.90]),
    ("lettuce", [0.05, 0.20, 0.50, 0.78, 0.92]),
    ("blueberry", [0.05, 0.18, 0.48, 0.76, 0.91]),
    ("mango", [0.05, 0.22, 0.55, 0.80, 0.93]),
];

/// (mass kg, production EF, disposal EF) per product.
const SEED_LIFECYCLE: &[(&str, f64, f64, f64)] = &[
    ("apple", 0.18, 0.43, 0.08),
    ("banana", 0.12, 0.48, 0.06),
    ("orange", 0.15, 0.39, 0.07),
    ("strawberry", 0.02, 0.67, 0.01),
    ("grape", 0.005, 0.46, 0.002),
    ("avocado", 0.20, 0.85, 0.09),
    ("tomato", 0.15, 0.25, 0.06),
    ("lettuce", 0.30, 0.35, 0.12),
    ("blueberry", 0.001, 0.72, 0.0005),
    ("mango", 0.35, 0.55, 0.15),
];

/// Reference price-response curves for the seed categories.
pub fn seed_price_curves() -> InMemoryCurveStore {
    let mut store = InMemoryCurveStore::new();
    for (category, probabilities) in SEED_CURVES {
        store.insert(
            *category,
            PriceResponseCurve::from_bins(&SEED_DISCOUNT_BINS, probabilities),
        );
    }
    store
}

/// Lifecycle factors for the seed categories, full displacement.
pub fn seed_lifecycle_factors() -> InMemoryLifecycleStore {
    let mut store = InMemoryLifecycleStore::new();
    for (product, mass_kg, production_ef, disposal_ef) in SEED_LIFECYCLE {
        store.insert(
            *product,
            ProductLifecycleFactor::new(*mass_kg, *production_ef, *disposal_ef),
        );
    }
    store
}

/// Random purchase history for one customer: for each category, a few
/// discount bins with a plausible number of offers and buys. Buy appetite
/// rises with the bin's discount level.
pub fn seed_user_stats(user_id: u64) -> InMemoryUserStatStore {
    let mut rng = thread_rng();
    let mut store = InMemoryUserStatStore::new();

    for category in SEED_CATEGORIES {
        for window in SEED_DISCOUNT_BINS.windows(2) {
            let (bin_low, bin_high) = (window[0], window[1]);
            let trials = rng.gen_range(0..12u32);
            if trials == 0 {
                continue;
            }
            let appetite = 0.1 + 0.8 * bin_high / 100.0;
            let buys = (0..trials).filter(|_| rng.gen_bool(appetite)).count() as u32;
            store.insert(
                user_id,
                *category,
                UserDiscountStat {
                    bin_low,
                    bin_high,
                    trials,
                    buys,
                },
            );
        }
    }
    store
}

/// Random shelf of lots across the seed categories, with normally
/// distributed freshness around mid-decay.
pub fn seed_inventory(lot_count: usize, store_id: u32) -> Vec<InventoryLot> {
    let mut rng = thread_rng();
    let freshness_dist = Normal::new(0.55, 0.2).unwrap();

    (0..lot_count)
        .map(|i| {
            let category = SEED_CATEGORIES[rng.gen_range(0..SEED_CATEGORIES.len())];
            let original_price = rng.gen_range(0.8..4.0);
            let freshness: f64 = freshness_dist.sample(&mut rng);
            InventoryLot {
                id: i as u64 + 1,
                product_name: category.to_string(),
                category: category.to_string(),
                quantity: rng.gen_range(1..60),
                current_price: original_price * rng.gen_range(0.5..1.0),
                original_price,
                arrival_hours_ago: rng.gen_range(0.0..48.0),
                store_id,
                freshness: Some(FreshnessState::new(freshness.clamp(0.0, 1.0))),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::traits::{LifecycleStore, PriceCurveStore, UserStatStore};

    #[test]
    fn every_seed_category_has_a_well_formed_curve() {
        let store = seed_price_curves();
        for category in SEED_CATEGORIES {
            let curve = store.curve(category).expect("seed curve missing");
            assert!(curve.is_well_formed());
        }
    }

    #[test]
    fn every_seed_category_has_a_lifecycle_factor() {
        let store = seed_lifecycle_factors();
        for category in SEED_CATEGORIES {
            let factor = store.factor(category).expect("seed factor missing");
            assert!(factor.co2e_per_unit() > 0.0);
            assert_eq!(factor.displacement, 1.0);
        }
    }

    #[test]
    fn seeded_stats_never_exceed_their_trials() {
        let store = seed_user_stats(1);
        for category in SEED_CATEGORIES {
            for stat in store.stats(1, category) {
                assert!(stat.buys <= stat.trials);
                assert!(stat.bin_low < stat.bin_high);
            }
        }
    }

    #[test]
    fn seeded_inventory_is_estimable() {
        let lots = seed_inventory(20, 1);
        assert_eq!(lots.len(), 20);
        for lot in &lots {
            assert!(lot.quantity >= 1);
            let freshness = lot.freshness.expect("seed lots carry freshness");
            assert!((0.0..=1.0).contains(&freshness.normalized()));
            assert!(lot.effective_price() > 0.0);
        }
    }
}
