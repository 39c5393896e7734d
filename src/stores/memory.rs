// src/stores/memory.rs

use std::collections::HashMap;

use crate::model::reference::{PriceResponseCurve, ProductLifecycleFactor, UserDiscountStat};
use crate::stores::traits::{LifecycleStore, PriceCurveStore, UserStatStore};

/// HashMap-backed curve store, used by the demo driver and tests. A real
/// deployment would put a database snapshot behind the same trait.
#[derive(Debug, Default)]
pub struct InMemoryCurveStore {
    curves: HashMap<String, PriceResponseCurve>,
}

impl InMemoryCurveStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, category: impl Into<String>, curve: PriceResponseCurve) {
        self.curves.insert(category.into(), curve);
    }
}

impl PriceCurveStore for InMemoryCurveStore {
    fn curve(&self, category: &str) -> Option<&PriceResponseCurve> {
        self.curves.get(category)
    }
}

/// HashMap-backed user-stat store keyed by (customer id, product name).
#[derive(Debug, Default)]
pub struct InMemoryUserStatStore {
    stats: HashMap<(u64, String), Vec<UserDiscountStat>>,
}

impl InMemoryUserStatStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, user_id: u64, product_name: impl Into<String>, stat: UserDiscountStat) {
        self.stats
            .entry((user_id, product_name.into()))
            .or_default()
            .push(stat);
    }
}

impl UserStatStore for InMemoryUserStatStore {
    fn stats(&self, user_id: u64, product_name: &str) -> &[UserDiscountStat] {
        self.stats
            .get(&(user_id, product_name.to_string()))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// HashMap-backed lifecycle-factor store keyed by product name.
#[derive(Debug, Default)]
pub struct InMemoryLifecycleStore {
    factors: HashMap<String, ProductLifecycleFactor>,
}

impl InMemoryLifecycleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, product_name: impl Into<String>, factor: ProductLifecycleFactor) {
        self.factors.insert(product_name.into(), factor);
    }
}

impl LifecycleStore for InMemoryLifecycleStore {
    fn factor(&self, product_name: &str) -> Option<&ProductLifecycleFactor> {
        self.factors.get(product_name)
    }
}
