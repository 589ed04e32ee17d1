//! # Calibration Models
//!
//! In-memory representation of calibration records.
//!
//! - [`point`] - measured efficiency points ([`point::EffPoint`])
//! - [`zone`] - fitted polynomial zones in the `log10(keV)` domain ([`zone::Zone`])
//! - [`name`] - the bracketed EFR/EFA record name token ([`name::RecordName`])
//! - [`record`] - a complete named record with header, points and zones
//! - [`curve`] - samples of an evaluated efficiency curve
//!
//! Records are plain owned values. The fitter replaces their zones and the
//! name conversions rewrite their name and header in place.

pub mod curve;
pub mod name;
pub mod point;
pub mod record;
pub mod zone;
