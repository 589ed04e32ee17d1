use std::fmt;

/// The two on-disk naming conventions of a calibration record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameFormat {
    Efr, // [Detector;Geometry;Nuclide]
    Efa, // [Detector;Geometry]
}

/// The bracketed record name token, e.g. `[GC3019;Marinelli;Eu-152]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordName {
    pub detector: String,
    pub geometry: String,
    pub nuclide: Option<String>,
}

impl RecordName {
    pub fn efr(detector: &str, geometry: &str, nuclide: &str) -> Self {
        Self {
            detector: detector.to_string(),
            geometry: geometry.to_string(),
            nuclide: Some(nuclide.to_string()),
        }
    }

    pub fn efa(detector: &str, geometry: &str) -> Self {
        Self {
            detector: detector.to_string(),
            geometry: geometry.to_string(),
            nuclide: None,
        }
    }

    pub fn format(&self) -> NameFormat {
        if self.nuclide.is_some() {
            NameFormat::Efr
        } else {
            NameFormat::Efa
        }
    }

    /// Parses a trimmed `[a;b]` or `[a;b;c]` token. Any other shape yields `None`.
    pub fn parse(token: &str) -> Option<Self> {
        let inner = token.strip_prefix('[')?.strip_suffix(']')?;
        let parts: Vec<&str> = inner.split(';').collect();
        match parts.as_slice() {
            [detector, geometry] => Some(Self::efa(detector, geometry)),
            [detector, geometry, nuclide] => Some(Self::efr(detector, geometry, nuclide)),
            _ => None,
        }
    }
}

impl fmt::Display for RecordName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.nuclide {
            Some(nuclide) => write!(f, "[{};{};{}]", self.detector, self.geometry, nuclide),
            None => write!(f, "[{};{}]", self.detector, self.geometry),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_name_shapes() {
        let efr = RecordName::parse("[GC3019;Point 25cm;Eu-152]").unwrap();
        assert_eq!(efr.format(), NameFormat::Efr);
        assert_eq!(efr.nuclide.as_deref(), Some("Eu-152"));
        assert_eq!(efr.geometry, "Point 25cm");

        let efa = RecordName::parse("[GC3019;Point 25cm]").unwrap();
        assert_eq!(efa.format(), NameFormat::Efa);
        assert_eq!(efa.detector, "GC3019");
    }

    #[test]
    fn rejects_other_shapes() {
        assert!(RecordName::parse("[OnlyOne]").is_none());
        assert!(RecordName::parse("[a;b;c;d]").is_none());
        assert!(RecordName::parse("a;b").is_none());
    }

    #[test]
    fn display_round_trips() {
        for token in ["[Det;Geom;Nuclide]", "[Det;Geom]"] {
            assert_eq!(RecordName::parse(token).unwrap().to_string(), token);
        }
    }
}
