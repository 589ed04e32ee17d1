//! Provides input/output for calibration record files.
//!
//! Calibration files are line-oriented `key=value` text in a fixed single-byte
//! codepage. One file may hold several records, each introduced by a bracketed
//! name token. The same grammar serves both naming conventions: `.efr` files
//! (one nuclide per record, raw points) and `.efa` files (generic nuclide,
//! fitted zones).

pub mod efa;
pub mod encoding;
pub mod error;
pub mod traits;
pub mod tsv;
