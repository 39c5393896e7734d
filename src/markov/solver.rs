// src/markov/solver.rs

use nalgebra::DMatrix;
use std::fmt::Debug;

/// Solves the dense linear system A X = B.
///
/// The absorbing-chain math only needs "solve against (I - Q)", so the
/// method lives behind a trait: the default is a direct LU factorization,
/// fine at the ~48x48 sizes the decay model produces, but an iterative or
/// sparse solver can be swapped in without touching the chain code.
pub trait LinearSolver: Debug + Send + Sync {
    /// Returns `None` when A is singular (or near enough that the
    /// factorization gives up). Callers treat that as a degenerate chain.
    fn solve(&self, a: DMatrix<f64>, b: DMatrix<f64>) -> Option<DMatrix<f64>>;
}

/// Direct dense LU solve. O(n^3), exact up to floating-point conditioning.
#[derive(Debug, Clone, Default)]
pub struct DenseLuSolver;

impl LinearSolver for DenseLuSolver {
    fn solve(&self, a: DMatrix<f64>, b: DMatrix<f64>) -> Option<DMatrix<f64>> {
        a.lu().solve(&b)
    }
}
