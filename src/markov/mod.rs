pub mod chain;
pub mod solver;
