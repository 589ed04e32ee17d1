//! # Engine Module
//!
//! This module turns raw calibration points into a piecewise efficiency curve
//! and evaluates that curve at arbitrary energies.
//!
//! ## Overview
//!
//! A calibration is split into energy zones. Each zone carries its own
//! orthogonal polynomial fit of `log10(efficiency)` against `log10(energy)`.
//! The engine fits those zones from a validated [`config::FitConfig`] and
//! evaluates the result with extrapolation beyond the outer zones and linear
//! blending across overlaps and gaps.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Zone layout, weighting scheme and the validating builder
//! - **Fitting** ([`fitting`]) - Point selection, weighting and per-zone regression
//! - **Evaluation** ([`evaluator`]) - Zone lookup, blending and uncertainty propagation
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress reporting for batch work
//! - **Error Handling** ([`error`]) - The aggregate error type of calibration workflows

pub mod config;
pub mod error;
pub mod evaluator;
pub mod fitting;
pub mod progress;
