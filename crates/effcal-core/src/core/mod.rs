//! # Core Module
//!
//! The stateless foundation of the calibration engine.
//!
//! - **Data Model** ([`models`]) - Records, points, zones and record names
//! - **File I/O** ([`io`]) - The calibration record codec, its codepage and TSV exports
//! - **Numerics** ([`math`]) - Polynomials, least-squares solves and the orthogonal polynomial fitter
//!
//! Nothing in this layer holds state between calls; every operation takes its
//! inputs by reference and returns owned results.

pub mod io;
pub mod math;
pub mod models;
