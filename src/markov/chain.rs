// src/markov/chain.rs

use nalgebra::DMatrix;

use crate::markov::solver::LinearSolver;

// Column indices of the two absorbing states in R and B.
const SOLD: usize = 0;
const SPOILED: usize = 1;

/// Probability that an item starting at `initial_freshness` is eventually
/// sold, under a per-bucket sale probability supplied by `bucket_probability`.
///
/// The item's remaining life is split into `buckets` equal steps; bucket k
/// carries the interpolated freshness `F_k = 1 - (k-1)/K`. In each step the
/// item either sells (probability `p_k = bucket_probability(F_k)`) or
/// survives into the next, less fresh, bucket; anything unsold at the end of
/// the final bucket is spoiled. That race is an absorbing Markov chain with
/// transient states = buckets and absorbing states {Sold, Spoiled}, so the
/// answer is the Sold column of `B = (I - Q)^-1 R` at the starting bucket.
///
/// A closed-form survival function would not do here: `p_k` depends on a
/// policy discount curve that changes nonlinearly with freshness, and on the
/// customer's personal response to each discount level, so sale and spoilage
/// have to race bucket by bucket.
///
/// Degenerate inputs (`buckets == 0`, a singular `(I - Q)`) yield 0.0, the
/// conservative "assume it will not sell" answer.
pub fn sale_probability<F>(
    initial_freshness: f64,
    buckets: usize,
    bucket_probability: F,
    solver: &dyn LinearSolver,
) -> f64
where
    F: Fn(f64) -> f64,
{
    let k = buckets;
    if k == 0 {
        return 0.0;
    }

    let mut q = DMatrix::<f64>::zeros(k, k);
    let mut r = DMatrix::<f64>::zeros(k, 2);

    for bucket in 1..=k {
        let bucket_freshness = 1.0 - (bucket - 1) as f64 / k as f64;
        let p = bucket_probability(bucket_freshness).clamp(0.0, 1.0);

        if bucket < k {
            // Unsold items survive into the next bucket.
            q[(bucket - 1, bucket)] = 1.0 - p;
            r[(bucket - 1, SOLD)] = p;
        } else {
            // No bucket after the last one; unsold means spoiled.
            r[(bucket - 1, SOLD)] = p;
            r[(bucket - 1, SPOILED)] = 1.0 - p;
        }
    }

    let identity = DMatrix::<f64>::identity(k, k);
    // Solving (I - Q) B = R gives the absorption matrix B = N R directly,
    // without forming the fundamental matrix N.
    let absorption = match solver.solve(identity - q, r) {
        Some(b) => b,
        None => return 0.0,
    };

    let k0 = starting_bucket(initial_freshness, k);
    absorption[(k0 - 1, SOLD)].clamp(0.0, 1.0)
}

/// 1-indexed bucket an item with the given freshness starts in.
/// Fully fresh maps to bucket 1, fully decayed to bucket K.
pub fn starting_bucket(freshness: f64, buckets: usize) -> usize {
    let clamped = freshness.clamp(0.0, 1.0);
    let k0 = ((1.0 - clamped) * buckets as f64) as usize + 1;
    k0.min(buckets)
}
