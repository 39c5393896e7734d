pub mod aggregate;
pub mod estimator;
pub mod lifecycle;
