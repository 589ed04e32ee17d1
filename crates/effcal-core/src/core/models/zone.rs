use crate::core::math::polynomial;

/// A polynomial approximation of `log10(efficiency)` over one energy sub-range.
///
/// Boundaries live in the `log10(keV)` domain, the same domain the polynomials
/// are evaluated in.
#[derive(Debug, Clone, PartialEq)]
pub struct Zone {
    pub degree: usize,
    pub left: f64,
    pub right: f64,
    pub deviation: f64,             // RMS residual of the fit, log10 units
    pub main_coeffs: Vec<f64>,      // One coefficient per orthogonal polynomial
    pub orth_coeffs: Vec<Vec<f64>>, // Row k: the k+1 coefficients of g_k, lowest order first
}

impl Zone {
    pub fn new(degree: usize, left: f64, right: f64, deviation: f64) -> Self {
        Self {
            degree,
            left,
            right,
            deviation,
            main_coeffs: Vec::new(),
            orth_coeffs: Vec::new(),
        }
    }

    pub fn left_kev(&self) -> f64 {
        10f64.powf(self.left)
    }

    pub fn right_kev(&self) -> f64 {
        10f64.powf(self.right)
    }

    pub fn contains(&self, x: f64) -> bool {
        self.left <= x && x <= self.right
    }

    /// A zone can be evaluated once every main coefficient has a basis row to pair with.
    pub fn is_evaluable(&self) -> bool {
        !self.main_coeffs.is_empty() && self.orth_coeffs.len() >= self.main_coeffs.len()
    }

    /// Values `g_k(x)` of the stored orthogonal polynomials.
    pub fn basis_values(&self, x: f64) -> Vec<f64> {
        self.orth_coeffs
            .iter()
            .map(|row| polynomial::eval_ascending(row, x))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear_zone() -> Zone {
        let mut zone = Zone::new(1, 1.0, 2.0, 0.01);
        zone.orth_coeffs = vec![vec![1.0], vec![-1.5, 1.0]];
        zone.main_coeffs = vec![-2.0, 0.5];
        zone
    }

    #[test]
    fn boundaries_convert_back_to_kev() {
        let zone = linear_zone();
        assert!((zone.left_kev() - 10.0).abs() < 1e-9);
        assert!((zone.right_kev() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn contains_is_inclusive_at_both_ends() {
        let zone = linear_zone();
        assert!(zone.contains(1.0));
        assert!(zone.contains(2.0));
        assert!(!zone.contains(2.0001));
    }

    #[test]
    fn basis_values_evaluate_each_row() {
        let values = linear_zone().basis_values(2.0);
        assert_eq!(values, vec![1.0, 0.5]);
    }

    #[test]
    fn zone_without_rows_is_not_evaluable() {
        let mut zone = linear_zone();
        zone.orth_coeffs.pop();
        assert!(!zone.is_evaluable());
    }
}
