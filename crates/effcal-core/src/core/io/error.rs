use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Format error on line {line}: {kind} (line: '{content}')")]
    Format {
        line: usize,
        content: String,
        kind: FormatErrorKind,
    },
    #[error("Encoding error: {0}")]
    Encoding(String),
    #[error("Record not found: {name}")]
    NotFound { name: String },
    #[error("TSV error: {0}")]
    Tsv(#[from] csv::Error),
}

#[derive(Debug, Error, PartialEq)]
pub enum FormatErrorKind {
    #[error("expected a 'key=value' line")]
    MissingSeparator,
    #[error("record name must be '[Detector;Geometry]' or '[Detector;Geometry;Nuclide]'")]
    InvalidNameToken,
    #[error("invalid float in {field} (value: '{value}')")]
    InvalidFloat { field: &'static str, value: String },
    #[error("invalid integer in {field} (value: '{value}')")]
    InvalidInt { field: &'static str, value: String },
    #[error("expected {expected} comma-separated fields, found {found}")]
    FieldCount { expected: usize, found: usize },
    #[error("zone {found} declared where zone {expected} was expected")]
    ZoneOutOfOrder { expected: usize, found: usize },
    #[error("curve row {found} of zone {zone} declared where row {expected} was expected")]
    CurveRowOutOfOrder {
        zone: usize,
        expected: usize,
        found: usize,
    },
    #[error("curve refers to undeclared zone {zone}")]
    UnknownZone { zone: usize },
}

impl CodecError {
    pub(crate) fn format(line_index: usize, content: &str, kind: FormatErrorKind) -> Self {
        Self::Format {
            line: line_index + 1,
            content: content.to_string(),
            kind,
        }
    }
}
