//! Gram–Schmidt orthogonalization from a Gram matrix
//!
//! Computes the Gram–Schmidt coefficients μ_ij and squared norms ||b*_i||²
//! directly from a Gram matrix, using exact rational arithmetic.
//!
//! # The recurrence
//!
//! With G[i][j] = <b_i, b_j> given, no basis vectors are needed:
//!
//! ```text
//! <b_i, b*_j> = G[i][j] - Σ_{k<j} μ_jk <b_i, b*_k>
//! μ_ij        = <b_i, b*_j> / ||b*_j||²
//! ||b*_i||²   = G[i][i] - Σ_{j<i} μ_ij <b_i, b*_j>
//! ```
//!
//! Rank deficiency is first-class: a linearly dependent b_i has b*_i = 0,
//! so ||b*_i||² = 0, and every μ against a vanished b*_j is taken to be 0
//! (the projection onto the zero vector).

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, Zero};

use crate::matrix::IntMat;

/// Gram–Schmidt data (exact rational representation)
#[derive(Debug, Clone)]
pub struct GramSchmidt {
    /// Coefficients μ_ij, stored as lower triangular: mu[i][j] for j < i
    pub mu: Vec<Vec<BigRational>>,
    /// Squared norms ||b*_i||²; zero marks a dependent vector
    pub b_star_norms_sq: Vec<BigRational>,
    /// Dimension
    pub n: usize,
}

impl GramSchmidt {
    /// Compute Gram–Schmidt data from a square Gram matrix.
    pub fn from_gram(gram: &IntMat) -> Self {
        let n = gram.rows();
        debug_assert_eq!(gram.cols(), n);

        let mut mu: Vec<Vec<BigRational>> =
            (0..n).map(|i| vec![BigRational::zero(); i]).collect();
        let mut b_star_norms_sq = vec![BigRational::zero(); n];

        for i in 0..n {
            // <b_i, b*_j> for j < i, built up left to right
            let mut inner_with_b_star: Vec<BigRational> = Vec::with_capacity(i);

            for j in 0..i {
                let mut inner = BigRational::from(gram.get(i, j).clone());
                for k in 0..j {
                    inner -= &mu[j][k] * &inner_with_b_star[k];
                }
                mu[i][j] = if b_star_norms_sq[j].is_zero() {
                    BigRational::zero()
                } else {
                    &inner / &b_star_norms_sq[j]
                };
                inner_with_b_star.push(inner);
            }

            let mut norm = BigRational::from(gram.get(i, i).clone());
            for j in 0..i {
                norm -= &mu[i][j] * &inner_with_b_star[j];
            }
            b_star_norms_sq[i] = norm;
        }

        Self {
            mu,
            b_star_norms_sq,
            n,
        }
    }

    /// Get μ_ij (only defined for j < i)
    pub fn get_mu(&self, i: usize, j: usize) -> &BigRational {
        &self.mu[i][j]
    }

    /// Get ||b*_i||²
    pub fn get_norm_sq(&self, i: usize) -> &BigRational {
        &self.b_star_norms_sq[i]
    }

    /// Check if μ_ij needs size reduction (|μ_ij| > 1/2)
    pub fn needs_size_reduction(&self, i: usize, j: usize) -> bool {
        // |μ| > 1/2  ⟺  |2·num| > den  (denominator is positive)
        let mu = &self.mu[i][j];
        let two_num: BigInt = mu.numer() * 2;
        two_num.abs() > *mu.denom()
    }

    /// Check Lovász condition at position k:
    /// δ ||b*_{k-1}||² ≤ ||b*_k||² + μ_{k,k-1}² ||b*_{k-1}||²
    ///
    /// Holds vacuously when ||b*_{k-1}||² = 0, so zero vectors parked at
    /// the front of the basis never trigger further swaps.
    pub fn check_lovasz(&self, k: usize, delta_num: i64, delta_den: i64) -> bool {
        if k == 0 {
            return true;
        }
        let delta = BigRational::new(BigInt::from(delta_num), BigInt::from(delta_den));
        let mu = &self.mu[k][k - 1];
        let prev = &self.b_star_norms_sq[k - 1];

        let lhs = &delta * prev;
        let rhs = &self.b_star_norms_sq[k] + (mu * mu) * prev;
        lhs <= rhs
    }

    /// Update coefficients after the size reduction b_k = b_k - q·b_j
    pub fn update_size_reduction(&mut self, k: usize, j: usize, q: &BigInt) {
        let q_rat = BigRational::from(q.clone());
        for i in 0..j {
            let adj = &q_rat * &self.mu[j][i];
            self.mu[k][i] -= adj;
        }
        self.mu[k][j] -= q_rat;
    }
}
