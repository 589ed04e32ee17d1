//! # Workflows Module
//!
//! High-level procedures that tie the calibration file codec and the fitting
//! engine together.
//!
//! ## Architecture
//!
//! - **Calibration Workflow** ([`calibrate`]) - Fits zone polynomials to measured points
//!   and writes the result with EFA naming, for one record or a whole file.
//! - **Resampling Workflow** ([`resample`]) - Evaluates a fitted calibration on an energy
//!   grid and turns the samples into an EFR record or a plain table.
//! - **Record Selection** ([`selection`]) - Chooses which records of a multi-record file
//!   a workflow operates on.

pub mod calibrate;
pub mod resample;
pub mod selection;
