//! Least-squares regression on a polynomial basis orthogonal over the samples.
//!
//! The basis `g_0 … g_d` is built recursively: `g_0 = 1`, and each `g_k` is
//! monic (`x^k` plus lower terms) with its lower coefficients chosen so that
//! `Σ w_i · g_m(x_i) · g_k(x_i) = 0` for every `m < k`. Those coefficients come
//! from the `k×k` moment system
//!
//! ```text
//! Σ_n c_n · Σ_i w_i g_m(x_i) x_i^n = −Σ_i w_i g_m(x_i) x_i^k     (m, n < k)
//! ```
//!
//! which is solved in the least-squares sense so that near-degenerate systems
//! still produce a usable basis. The observations are then regressed onto the
//! basis columns to get the main coefficients. A moment system or design
//! matrix that loses rank (fewer distinct abscissae than `degree + 1`) is a
//! `NumericalDegeneracy`.

use super::linalg::{solve_least_squares, solve_weighted_least_squares};
use super::polynomial::{eval_ascending, linear_combination};
use nalgebra::{DMatrix, DVector};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum FitError {
    #[error("Insufficient data: {samples} sample(s) cannot determine a degree-{degree} polynomial")]
    InsufficientData { samples: usize, degree: usize },

    #[error("Numerical degeneracy while solving the {stage}")]
    NumericalDegeneracy { stage: &'static str },

    #[error("Input length mismatch: {x} abscissae, {y} ordinates, {weights} weights")]
    MismatchedInput { x: usize, y: usize, weights: usize },

    #[error("Weight #{index} must be finite and positive (got {value})")]
    InvalidWeight { index: usize, value: f64 },
}

/// Outcome of one orthogonal polynomial regression.
#[derive(Debug, Clone, PartialEq)]
pub struct OrthogonalFit {
    pub basis: Vec<Vec<f64>>, // Row k: the k+1 coefficients of g_k, lowest order first
    pub main_coeffs: Vec<f64>,
    pub residual_sum: f64, // Σ w_i (y_i − ŷ_i)²
    pub deviation: f64,    // sqrt(residual_sum / (n − d))
}

impl OrthogonalFit {
    pub fn degree(&self) -> usize {
        self.main_coeffs.len().saturating_sub(1)
    }

    pub fn eval(&self, x: f64) -> f64 {
        self.basis
            .iter()
            .zip(&self.main_coeffs)
            .map(|(g, c)| c * eval_ascending(g, x))
            .sum()
    }

    /// The fitted curve re-expressed in the power basis, lowest order first.
    pub fn power_coefficients(&self) -> Vec<f64> {
        linear_combination(&self.basis, &self.main_coeffs)
    }
}

/// Fits `y ≈ Σ_k c_k g_k(x)` with optional per-point weights (default 1).
pub fn fit(
    x: &[f64],
    y: &[f64],
    weights: Option<&[f64]>,
    degree: usize,
) -> Result<OrthogonalFit, FitError> {
    let n = x.len();
    let uniform;
    let w = match weights {
        Some(w) => w,
        None => {
            uniform = vec![1.0; n];
            uniform.as_slice()
        }
    };
    if y.len() != n || w.len() != n {
        return Err(FitError::MismatchedInput {
            x: n,
            y: y.len(),
            weights: w.len(),
        });
    }
    if n <= degree {
        return Err(FitError::InsufficientData {
            samples: n,
            degree,
        });
    }
    if let Some((index, &value)) = w
        .iter()
        .enumerate()
        .find(|(_, v)| !(v.is_finite() && **v > 0.0))
    {
        return Err(FitError::InvalidWeight { index, value });
    }

    let basis = build_basis(x, w, degree)?;

    let design = DMatrix::from_fn(n, degree + 1, |i, k| eval_ascending(&basis[k], x[i]));
    let observed = DVector::from_column_slice(y);
    let main = solve_weighted_least_squares(&design, &observed, w)
        .filter(|solve| solve.is_full_rank())
        .ok_or(FitError::NumericalDegeneracy {
            stage: "main coefficient regression",
        })?
        .solution;

    let fitted = &design * &main;
    let residual_sum: f64 = (0..n)
        .map(|i| w[i] * (observed[i] - fitted[i]).powi(2))
        .sum();
    let deviation = (residual_sum / (n - degree) as f64).sqrt();
    if !deviation.is_finite() {
        return Err(FitError::NumericalDegeneracy {
            stage: "residual deviation",
        });
    }

    Ok(OrthogonalFit {
        basis,
        main_coeffs: main.iter().copied().collect(),
        residual_sum,
        deviation,
    })
}

/// Builds the monic orthogonal basis `g_0 … g_degree` over the weighted samples.
pub fn build_basis(x: &[f64], w: &[f64], degree: usize) -> Result<Vec<Vec<f64>>, FitError> {
    let mut basis: Vec<Vec<f64>> = Vec::with_capacity(degree + 1);
    basis.push(vec![1.0]);
    // values[m][i] = w_i · g_m(x_i)
    let mut weighted_values: Vec<Vec<f64>> = vec![w.to_vec()];

    for k in 1..=degree {
        let mut moments = DMatrix::<f64>::zeros(k, k);
        let mut rhs = DVector::<f64>::zeros(k);
        for (m, wg) in weighted_values.iter().enumerate() {
            for (&xi, &wgi) in x.iter().zip(wg) {
                let mut x_pow = 1.0;
                for col in 0..k {
                    moments[(m, col)] += wgi * x_pow;
                    x_pow *= xi;
                }
                rhs[m] -= wgi * x_pow;
            }
        }

        let lower = solve_least_squares(&moments, &rhs)
            .filter(|solve| solve.is_full_rank())
            .ok_or(FitError::NumericalDegeneracy {
                stage: "orthogonal basis moment system",
            })?;
        let mut g_k: Vec<f64> = lower.solution.iter().copied().collect();
        g_k.push(1.0);

        weighted_values.push(
            x.iter()
                .zip(w)
                .map(|(&xi, &wi)| wi * eval_ascending(&g_k, xi))
                .collect(),
        );
        basis.push(g_k);
    }

    Ok(basis)
}
