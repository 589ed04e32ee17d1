use effcal::engine::config::ZoneConfig;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid zone '{0}'. Expected 'degree:left:right' in keV (e.g., '4:50:400').")]
    InvalidZoneFormat(String),

    #[error("Invalid grid '{0}'. Expected 'start:end:points' in keV (e.g., '50:3000:100').")]
    InvalidGridFormat(String),

    #[error("Invalid parameter '{0}'. Expected KEY=VALUE.")]
    InvalidKeyValue(String),

    #[error("Component '{component}' is not a valid number in '{input}'.")]
    InvalidNumber {
        component: &'static str,
        input: String,
    },
}

/// A `start:end:points` energy grid request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    pub start: f64,
    pub end: f64,
    pub points: usize,
}

fn split_triple(input: &str) -> Option<(&str, &str, &str)> {
    let mut parts = input.split(':').map(str::trim);
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(a), Some(b), Some(c), None) => Some((a, b, c)),
        _ => None,
    }
}

fn number<T: std::str::FromStr>(
    value: &str,
    component: &'static str,
    input: &str,
) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidNumber {
        component,
        input: input.to_string(),
    })
}

pub fn parse_zone(input: &str) -> Result<ZoneConfig, ParseError> {
    let (degree, left, right) =
        split_triple(input).ok_or_else(|| ParseError::InvalidZoneFormat(input.to_string()))?;
    Ok(ZoneConfig::new(
        number(degree, "degree", input)?,
        number(left, "left", input)?,
        number(right, "right", input)?,
    ))
}

pub fn parse_grid(input: &str) -> Result<GridSpec, ParseError> {
    let (start, end, points) =
        split_triple(input).ok_or_else(|| ParseError::InvalidGridFormat(input.to_string()))?;
    Ok(GridSpec {
        start: number(start, "start", input)?,
        end: number(end, "end", input)?,
        points: number(points, "points", input)?,
    })
}

/// Splits at the first `=`; the key must be non-empty, the value may be.
pub fn parse_key_value(input: &str) -> Result<(String, String), ParseError> {
    match input.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(ParseError::InvalidKeyValue(input.to_string())),
    }
}
