//! # Efficiency Calibration Core Library
//!
//! Reading, fitting and evaluating detector full-energy peak efficiency
//! calibrations stored in the LSRM EFR/EFA record format.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer layout, each layer depending only on the ones below it.
//!
//! - **[`core`]: The Foundation.** Stateless data models (`CalibrationRecord`, `EffPoint`,
//!   `Zone`), the record codec with its legacy text encoding, and numerical primitives such as
//!   the orthogonal polynomial fitter.
//!
//! - **[`engine`]: The Logic Core.** Validated fit configuration, per-zone fitting with optional
//!   inverse-variance weighting, and the zone evaluator that extrapolates and blends between zones.
//!
//! - **[`workflows`]: The Public API.** End-to-end procedures built from the layers below:
//!   calibrating a file of measured points and resampling a fitted calibration on an energy grid.

pub mod core;
pub mod engine;
pub mod workflows;
