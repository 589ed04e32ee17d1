/// Evaluates `c[0] + c[1]·x + c[2]·x² + …` with Horner's scheme.
pub fn eval_ascending(coeffs: &[f64], x: f64) -> f64 {
    coeffs.iter().rev().fold(0.0, |acc, &c| acc * x + c)
}

/// Collapses `Σ_k weights[k] · rows[k]` into a single ascending coefficient vector.
pub fn linear_combination(rows: &[Vec<f64>], weights: &[f64]) -> Vec<f64> {
    let len = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut out = vec![0.0; len];
    for (row, &w) in rows.iter().zip(weights) {
        for (slot, &c) in out.iter_mut().zip(row) {
            *slot += w * c;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eval_ascending_matches_direct_expansion() {
        let coeffs = [1.0, -2.0, 0.5];
        let x = 3.0;
        assert_eq!(eval_ascending(&coeffs, x), 1.0 - 6.0 + 4.5);
    }

    #[test]
    fn eval_ascending_of_empty_slice_is_zero() {
        assert_eq!(eval_ascending(&[], 42.0), 0.0);
    }

    #[test]
    fn linear_combination_handles_ragged_rows() {
        let rows = vec![vec![1.0], vec![-2.0, 1.0]];
        assert_eq!(linear_combination(&rows, &[3.0, 2.0]), vec![-1.0, 2.0]);
    }
}
