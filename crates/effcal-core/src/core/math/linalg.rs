//! Least-squares solves for the small dense systems of the fitter.
//!
//! Both the moment systems of the orthogonal basis and the main regression are
//! solved through an SVD. Singular values below `σ_max · ε · max(rows, cols)`
//! are treated as zero, so near-singular systems (expected at high zone degrees)
//! yield the minimum-norm solution instead of an error. The result is rejected
//! only when it is not finite.
//!
//! Each solve also reports the effective rank: the number of singular values
//! above `σ_max · RANK_RTOL`. Callers that need a unique solution compare it
//! with the column count.

use nalgebra::{DMatrix, DVector};

/// Singular values at or below `σ_max · RANK_RTOL` do not count towards the rank.
pub const RANK_RTOL: f64 = 1e-12;

#[derive(Debug, Clone, PartialEq)]
pub struct LeastSquares {
    pub solution: DVector<f64>,
    pub rank: usize,
}

impl LeastSquares {
    pub fn is_full_rank(&self) -> bool {
        self.rank == self.solution.len()
    }
}

/// Solve `a · β ≈ b` in the least-squares sense.
///
/// Returns `None` when the system is empty or the solution is not finite.
pub fn solve_least_squares(a: &DMatrix<f64>, b: &DVector<f64>) -> Option<LeastSquares> {
    if a.nrows() == 0 || a.ncols() == 0 || a.nrows() != b.len() {
        return None;
    }
    if a.iter().chain(b.iter()).any(|v| !v.is_finite()) {
        return None;
    }

    let svd = a.clone().svd(true, true);
    let largest = svd.singular_values.max();
    let tol = largest * f64::EPSILON * a.nrows().max(a.ncols()) as f64;

    let rank = svd
        .singular_values
        .iter()
        .filter(|&&s| s > largest * RANK_RTOL)
        .count();

    let solution = svd.solve(b, tol).ok()?;
    solution
        .iter()
        .all(|v| v.is_finite())
        .then_some(LeastSquares { solution, rank })
}

/// Solve `minimize Σ w_i (b_i − a_i·β)²` by scaling each row with `sqrt(w_i)`.
pub fn solve_weighted_least_squares(
    a: &DMatrix<f64>,
    b: &DVector<f64>,
    weights: &[f64],
) -> Option<LeastSquares> {
    if weights.len() != a.nrows() {
        return None;
    }
    let mut scaled_a = a.clone();
    let mut scaled_b = b.clone();
    for (i, &w) in weights.iter().enumerate() {
        let s = w.sqrt();
        scaled_a.row_mut(i).scale_mut(s);
        scaled_b[i] *= s;
    }
    solve_least_squares(&scaled_a, &scaled_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn least_squares_solves_simple_system() {
        // y = 2 + 3x on x = [0, 1, 2]
        let a = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0]);
        let b = DVector::from_row_slice(&[2.0, 5.0, 8.0]);

        let fit = solve_least_squares(&a, &b).unwrap();
        assert!(fit.is_full_rank());
        assert!((fit.solution[0] - 2.0).abs() < 1e-10);
        assert!((fit.solution[1] - 3.0).abs() < 1e-10);
    }

    #[test]
    fn singular_system_still_yields_a_solution() {
        // Two identical columns: any split of the slope is a solution.
        let a = DMatrix::from_row_slice(3, 2, &[1.0, 1.0, 2.0, 2.0, 3.0, 3.0]);
        let b = DVector::from_row_slice(&[2.0, 4.0, 6.0]);

        let fit = solve_least_squares(&a, &b).unwrap();
        assert_eq!(fit.rank, 1);
        assert!(!fit.is_full_rank());
        assert!((fit.solution[0] + fit.solution[1] - 2.0).abs() < 1e-9);
    }

    #[test]
    fn ill_conditioned_system_keeps_full_rank() {
        let a = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 1.0, 1e-6, 1.0, 2e-6]);
        let b = DVector::from_row_slice(&[1.0, 1.0, 1.0]);

        let fit = solve_least_squares(&a, &b).unwrap();
        assert_eq!(fit.rank, 2);
    }

    #[test]
    fn non_finite_input_is_rejected() {
        let a = DMatrix::from_row_slice(2, 1, &[1.0, f64::NAN]);
        let b = DVector::from_row_slice(&[1.0, 2.0]);
        assert!(solve_least_squares(&a, &b).is_none());
    }

    #[test]
    fn weights_pull_the_fit_towards_heavy_points() {
        // Constant model through two points; the heavy one dominates.
        let a = DMatrix::from_row_slice(2, 1, &[1.0, 1.0]);
        let b = DVector::from_row_slice(&[0.0, 10.0]);

        let fit = solve_weighted_least_squares(&a, &b, &[1.0, 9.0]).unwrap();
        assert!((fit.solution[0] - 9.0).abs() < 1e-10);
    }
}
