//! Numerical primitives behind the calibration fitter.
//!
//! - [`polynomial`]: evaluation of coefficient vectors stored lowest order first.
//! - [`linalg`]: small dense least-squares solves on top of `nalgebra`.
//! - [`orthogonal`]: the recursive orthogonal polynomial basis and the regression on it.

pub mod linalg;
pub mod orthogonal;
pub mod polynomial;
