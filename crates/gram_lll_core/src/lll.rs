//! LLL reduction on a Gram matrix
//!
//! In-place LLL operating on a Gram matrix, accumulating the basis change
//! into a transformation matrix. Every basis operation b_k ← b_k - q·b_j or
//! swap is applied symmetrically to the Gram matrix (rows and columns) and
//! as a row operation to the transformation, so the invariant
//! `G_current = T · G_input · Tᵀ` holds throughout.
//!
//! Linearly dependent input vectors collapse to zero under reduction and
//! migrate to the leading rows: a zero vector below a nonzero one always
//! fails the Lovász condition and is swapped upward, while a zero vector
//! below another zero satisfies it vacuously. Callers strip the resulting
//! all-zero prefix afterwards.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};

use crate::gram_schmidt::GramSchmidt;
use crate::matrix::IntMat;

/// Tuning parameters for the reduction routine
#[derive(Debug, Clone)]
pub struct LllContext {
    /// Lovász parameter δ as an exact fraction; sensible values lie in
    /// (1/4, 1). Not range-checked: out-of-range values are bounded by
    /// `max_iterations` rather than rejected.
    pub delta_num: i64,
    pub delta_den: i64,
    /// Safety limit on loop iterations
    pub max_iterations: usize,
    /// Verbosity level (0 = silent, 1 = summary, 2 = detailed)
    pub verbose: u32,
}

impl Default for LllContext {
    fn default() -> Self {
        Self {
            delta_num: 99,
            delta_den: 100,
            max_iterations: 1_000_000,
            verbose: 0,
        }
    }
}

impl LllContext {
    /// Context with δ given as a float, other tuning at defaults.
    ///
    /// δ is snapped to the dyadic grid 2⁻²⁰, which is exact for every value
    /// a caller can reasonably distinguish in this parameter.
    pub fn with_delta(delta: f64) -> Self {
        const SCALE: i64 = 1 << 20;
        Self {
            delta_num: (delta * SCALE as f64).round() as i64,
            delta_den: SCALE,
            ..Self::default()
        }
    }
}

/// Statistics from a reduction run
#[derive(Debug, Clone, Default)]
pub struct LllStats {
    /// Number of size reductions performed
    pub size_reductions: usize,
    /// Number of swaps performed
    pub swaps: usize,
    /// Total iterations
    pub iterations: usize,
}

/// LLL reduction over Gram matrices
pub struct GramLll;

impl GramLll {
    /// Reduce `gram` in place, accumulating row operations into `trans`.
    ///
    /// # Arguments
    /// * `gram` - n×n symmetric Gram matrix, mutated into its reduced form
    /// * `trans` - n×n accumulator, normally the identity on entry
    /// * `ctx` - tuning parameters
    ///
    /// On return `gram = trans · gram_input · transᵀ` holds exactly.
    pub fn reduce(gram: &mut IntMat, trans: &mut IntMat, ctx: &LllContext) -> LllStats {
        let n = gram.rows();
        debug_assert_eq!(gram.cols(), n);
        debug_assert_eq!(trans.dims(), (n, n));

        let mut stats = LllStats::default();
        if n <= 1 {
            return stats;
        }

        let mut gs = GramSchmidt::from_gram(gram);
        let mut k = 1usize;

        while k < n && stats.iterations < ctx.max_iterations {
            stats.iterations += 1;

            Self::size_reduce(gram, trans, &mut gs, k, k - 1, &mut stats);

            if gs.check_lovasz(k, ctx.delta_num, ctx.delta_den) {
                for j in (0..k.saturating_sub(1)).rev() {
                    Self::size_reduce(gram, trans, &mut gs, k, j, &mut stats);
                }
                k += 1;
            } else {
                gram.swap_rows(k, k - 1);
                gram.swap_cols(k, k - 1);
                trans.swap_rows(k, k - 1);
                // Recompute Gram-Schmidt (simpler and more robust than
                // incremental update, especially around vanished vectors)
                gs = GramSchmidt::from_gram(gram);
                stats.swaps += 1;

                k = if k > 1 { k - 1 } else { 1 };
            }

            if ctx.verbose >= 2 && stats.iterations % 1000 == 0 {
                eprintln!(
                    "gram-lll iteration {}: k={}, swaps={}, reductions={}",
                    stats.iterations, k, stats.swaps, stats.size_reductions
                );
            }
        }

        if ctx.verbose >= 1 {
            eprintln!(
                "gram-lll completed: {} iterations, {} swaps, {} reductions",
                stats.iterations, stats.swaps, stats.size_reductions
            );
        }

        stats
    }

    /// Perform size reduction: b_k = b_k - round(μ_kj)·b_j
    fn size_reduce(
        gram: &mut IntMat,
        trans: &mut IntMat,
        gs: &mut GramSchmidt,
        k: usize,
        j: usize,
        stats: &mut LllStats,
    ) {
        if !gs.needs_size_reduction(k, j) {
            return;
        }

        // q = round(μ_kj) = floor(μ_kj + 1/2)
        let half = BigRational::new(BigInt::one(), BigInt::from(2));
        let q: BigInt = (gs.get_mu(k, j) + half).floor().to_integer();
        if q.is_zero() {
            return;
        }

        // Row pass then column pass; together they realize
        // G[k][k] ← G[k][k] - 2q·G[k][j] + q²·G[j][j] on the diagonal
        let n = gram.cols();
        for t in 0..n {
            let upd = gram.get(k, t) - &q * gram.get(j, t);
            *gram.get_mut(k, t) = upd;
        }
        for t in 0..n {
            let upd = gram.get(t, k) - &q * gram.get(t, j);
            *gram.get_mut(t, k) = upd;
        }
        for t in 0..trans.cols() {
            let upd = trans.get(k, t) - &q * trans.get(j, t);
            *trans.get_mut(k, t) = upd;
        }

        gs.update_size_reduction(k, j, &q);
        stats.size_reductions += 1;
    }

    /// Check whether a Gram matrix is LLL-reduced under `ctx`, ignoring a
    /// leading block of vanished vectors.
    pub fn is_reduced(gram: &IntMat, ctx: &LllContext) -> bool {
        let gs = GramSchmidt::from_gram(gram);
        let n = gram.rows();

        for i in 1..n {
            for j in 0..i {
                if gs.needs_size_reduction(i, j) {
                    return false;
                }
            }
        }
        for k in 1..n {
            if !gs.check_lovasz(k, ctx.delta_num, ctx.delta_den) {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gram(rows: &[&[i64]]) -> IntMat {
        let n = rows.len();
        let data = rows
            .iter()
            .flat_map(|r| r.iter().map(|&v| BigInt::from(v)))
            .collect();
        IntMat::from_flat(data, n, n)
    }

    /// trans · g0 · transᵀ, the invariant every reduction must preserve
    fn conjugate(trans: &IntMat, g0: &IntMat) -> IntMat {
        trans.mul(g0).mul(&trans.transpose())
    }

    fn run(g0: &IntMat, ctx: &LllContext) -> (IntMat, IntMat, LllStats) {
        let mut g = g0.clone();
        let mut t = IntMat::identity(g0.rows());
        let stats = GramLll::reduce(&mut g, &mut t, ctx);
        (g, t, stats)
    }

    #[test]
    fn test_identity_gram_untouched() {
        let g0 = IntMat::identity(3);
        let (g, t, stats) = run(&g0, &LllContext::default());

        assert_eq!(g, g0);
        assert_eq!(t, IntMat::identity(3));
        assert_eq!(stats.swaps, 0);
        assert_eq!(stats.size_reductions, 0);
    }

    #[test]
    fn test_already_reduced_gram() {
        // μ = 1/2 exactly, Lovász holds: nothing to do even at δ = 0.99
        let g0 = gram(&[&[2, 1], &[1, 2]]);
        let (g, t, _) = run(&g0, &LllContext::with_delta(0.99));

        assert_eq!(g, g0);
        assert_eq!(t, IntMat::identity(2));
    }

    #[test]
    fn test_size_reduction_case() {
        // Gram of [(1,0), (3,1)]: one size reduction yields the identity
        let g0 = gram(&[&[1, 3], &[3, 10]]);
        let (g, t, _) = run(&g0, &LllContext::default());

        assert_eq!(g, IntMat::identity(2));
        assert_eq!(conjugate(&t, &g0), g);
        assert!(GramLll::is_reduced(&g, &LllContext::default()));
    }

    #[test]
    fn test_swap_case() {
        // Gram of [(2,0), (1,1)]: Lovász fails, vectors must swap
        let g0 = gram(&[&[4, 2], &[2, 2]]);
        let (g, t, stats) = run(&g0, &LllContext::default());

        assert!(stats.swaps > 0);
        assert_eq!(conjugate(&t, &g0), g);
        assert!(GramLll::is_reduced(&g, &LllContext::default()));
        // Shortest vector of this lattice has norm² 2
        assert_eq!(g.get(0, 0), &BigInt::from(2));
    }

    #[test]
    fn test_dependent_pair_collapses_to_zero_row() {
        // Gram of [v, v]: one vector must vanish and park at the top
        let g0 = gram(&[&[1, 1], &[1, 1]]);
        let (g, t, _) = run(&g0, &LllContext::default());

        assert_eq!(g, gram(&[&[0, 0], &[0, 1]]));
        assert_eq!(conjugate(&t, &g0), g);
    }

    #[test]
    fn test_proportional_vectors_gcd_out() {
        // Gram of [2v, 3v] with ||v||² = 1: the lattice is Z·v, so the
        // surviving vector has norm² 1
        let g0 = gram(&[&[4, 6], &[6, 9]]);
        let (g, t, _) = run(&g0, &LllContext::default());

        assert_eq!(g, gram(&[&[0, 0], &[0, 1]]));
        assert_eq!(conjugate(&t, &g0), g);
    }

    #[test]
    fn test_zero_matrix_stable() {
        let g0 = IntMat::zeros(2, 2);
        let (g, _, stats) = run(&g0, &LllContext::default());

        assert_eq!(g, g0);
        // Both vectors are zero; Lovász holds vacuously, no work done
        assert_eq!(stats.swaps, 0);
    }

    #[test]
    fn test_random_psd_gram_invariant() {
        use rand::Rng;
        let mut rng = rand::thread_rng();
        let ctx = LllContext::default();

        for _ in 0..10 {
            // Random basis B, G = B·Bᵀ is symmetric PSD by construction
            let n = rng.gen_range(2..6);
            let m = n + rng.gen_range(0..3);
            let mut b = IntMat::zeros(n, m);
            for i in 0..n {
                for j in 0..m {
                    *b.get_mut(i, j) = BigInt::from(rng.gen_range(-20i64..=20));
                }
            }
            let g0 = b.mul(&b.transpose());

            let (g, t, _) = run(&g0, &ctx);
            assert!(g.is_symmetric());
            assert_eq!(conjugate(&t, &g0), g);
            assert!(GramLll::is_reduced(&g, &ctx));
        }
    }

    #[test]
    fn test_with_delta_is_close() {
        let ctx = LllContext::with_delta(0.75);
        // 0.75 is exactly representable on the dyadic grid
        assert_eq!(ctx.delta_num * 4, ctx.delta_den * 3);
    }
}
