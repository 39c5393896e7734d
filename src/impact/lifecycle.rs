// src/impact/lifecycle.rs

//! Per-category emission and weight fallback tables.
//!
//! Used when a product has no entry in the lifecycle-factor store. The
//! numbers are full-lifecycle figures (production, transport, disposal)
//! drawn from EPA/FAO data for common produce; anything not listed gets the
//! global produce averages, so a lookup can never fail.

/// kg CO2e emitted per kg of product wasted.
const EMISSION_FACTORS: &[(&str, f64)] = &[
    ("apple", 0.43),
    ("banana", 0.48),
    ("orange", 0.39),
    ("strawberry", 0.67), // refrigeration-heavy
    ("grape", 0.46),
    ("avocado", 0.85), // water-intensive production
    ("tomato", 0.25),
    ("lettuce", 0.35),
    ("blueberry", 0.72),
    ("mango", 0.55),
    ("pear", 0.40),
    ("watermelon", 0.30),
    ("peach", 0.38),
    ("cherry", 0.65),
];

/// Average mass of one unit, in kg.
const AVERAGE_WEIGHTS: &[(&str, f64)] = &[
    ("apple", 0.18),
    ("banana", 0.12),
    ("orange", 0.15),
    ("strawberry", 0.02),
    ("grape", 0.005),
    ("avocado", 0.20),
    ("tomato", 0.15),
    ("lettuce", 0.30), // per head
    ("blueberry", 0.001),
    ("mango", 0.35),
    ("pear", 0.18),
    ("watermelon", 4.5),
    ("peach", 0.15),
    ("cherry", 0.008),
];

/// Average across produce, used for products missing from both tables.
pub const DEFAULT_EMISSION_FACTOR: f64 = 0.45;
pub const DEFAULT_WEIGHT_KG: f64 = 0.15;

fn lookup(table: &[(&str, f64)], product_name: &str, default: f64) -> f64 {
    let needle = product_name.to_lowercase();
    table
        .iter()
        .find(|(name, _)| *name == needle)
        .map(|(_, value)| *value)
        .unwrap_or(default)
}

/// kg CO2e per kg for the product, or the produce average.
pub fn emission_factor(product_name: &str) -> f64 {
    lookup(EMISSION_FACTORS, product_name, DEFAULT_EMISSION_FACTOR)
}

/// Average unit weight in kg for the product, or the produce average.
pub fn average_weight_kg(product_name: &str) -> f64 {
    lookup(AVERAGE_WEIGHTS, product_name, DEFAULT_WEIGHT_KG)
}

/// Converts a unit count into kilograms via the average-weight table.
pub fn weight_from_quantity(product_name: &str, quantity: f64) -> f64 {
    quantity * average_weight_kg(product_name)
}
