pub mod reporting;
pub mod seed;
