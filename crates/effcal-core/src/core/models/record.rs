use super::name::RecordName;
use super::point::EffPoint;
use super::zone::Zone;
use tracing::debug;

/// Header value written for the nuclide entry when a record gains an EFR name.
pub const NUCLIDE_ENTRY_VALUE: &str = "100,1,1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderEntry {
    pub key: String,
    pub value: String,
}

impl HeaderEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// One named calibration entry: header metadata, raw points and fitted zones.
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationRecord {
    pub name: RecordName,
    pub header: Vec<HeaderEntry>, // File order is preserved for round-trips
    pub points: Vec<EffPoint>,
    pub zones: Vec<Zone>, // Ascending by `left`
}

impl CalibrationRecord {
    pub fn new(name: RecordName) -> Self {
        Self {
            name,
            header: Vec::new(),
            points: Vec::new(),
            zones: Vec::new(),
        }
    }

    pub fn is_fitted(&self) -> bool {
        !self.zones.is_empty()
    }

    pub fn header_value(&self, key: &str) -> Option<&str> {
        self.header
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.value.as_str())
    }

    pub fn add_parameters<K, V>(&mut self, params: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in params {
            self.header.push(HeaderEntry::new(key, value));
        }
    }

    /// Distinct point nuclides in first-seen order.
    pub fn nuclides(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for p in &self.points {
            if !seen.contains(&p.nuclide.as_str()) {
                seen.push(&p.nuclide);
            }
        }
        seen
    }

    /// Energy span in keV: the zone span when fitted, otherwise the point span.
    pub fn energy_range_kev(&self) -> Option<(f64, f64)> {
        if let (Some(first), Some(last)) = (self.zones.first(), self.zones.last()) {
            let right = self
                .zones
                .iter()
                .map(|z| z.right)
                .fold(last.right, f64::max);
            return Some((first.left_kev(), 10f64.powf(right)));
        }
        let mut energies = self.points.iter().map(|p| p.energy);
        let first = energies.next()?;
        Some(energies.fold((first, first), |(lo, hi), e| (lo.min(e), hi.max(e))))
    }

    /// Strips the nuclide token from the name and drops the header entry keyed by it.
    ///
    /// Only the first matching header entry is removed; a record whose header carries
    /// several nuclide-shaped entries therefore does not convert back losslessly.
    pub fn to_efa_name(&mut self) {
        let Some(nuclide) = self.name.nuclide.take() else {
            return;
        };
        if let Some(pos) = self.header.iter().position(|e| e.key == nuclide) {
            self.header.remove(pos);
        }
        debug!("Converted record to EFA name {}", self.name);
    }

    /// Appends a nuclide token to the name and a `nuclide=100,1,1` header entry.
    pub fn to_efr_name(&mut self, nuclide: &str) {
        self.to_efa_name();
        self.name.nuclide = Some(nuclide.to_string());
        self.header.push(HeaderEntry::new(nuclide, NUCLIDE_ENTRY_VALUE));
        debug!("Converted record to EFR name {}", self.name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::name::NameFormat;

    fn efr_record() -> CalibrationRecord {
        let mut record = CalibrationRecord::new(RecordName::efr("Det", "Geom", "Nuclide"));
        record.add_parameters([
            ("Detector", "Det"),
            ("Geometry", "Geom"),
            ("Nuclide", NUCLIDE_ENTRY_VALUE),
        ]);
        record.points = vec![
            EffPoint::new(121.78, 0.05, 1.2, "Eu-152", 1.0, 1.0, 28.5),
            EffPoint::new(59.54, 0.03, 1.5, "Am-241", 1.0, 1.0, 35.9),
            EffPoint::new(1408.0, 0.006, 1.1, "Eu-152", 1.0, 1.0, 20.9),
        ];
        record
    }

    #[test]
    fn efr_to_efa_strips_token_and_matching_header() {
        let mut record = efr_record();
        record.to_efa_name();
        assert_eq!(record.name.format(), NameFormat::Efa);
        assert_eq!(record.name.to_string(), "[Det;Geom]");
        assert!(record.header_value("Nuclide").is_none());
        assert_eq!(record.header.len(), 2);
    }

    #[test]
    fn efa_to_efr_appends_token_and_header() {
        let mut record = efr_record();
        record.to_efa_name();
        record.to_efr_name("nuclide");
        assert_eq!(record.name.to_string(), "[Det;Geom;nuclide]");
        let last = record.header.last().unwrap();
        assert_eq!(last.key, "nuclide");
        assert_eq!(last.value, "100,1,1");
    }

    #[test]
    fn to_efa_on_efa_record_is_a_no_op() {
        let mut record = efr_record();
        record.to_efa_name();
        let snapshot = record.clone();
        record.to_efa_name();
        assert_eq!(record, snapshot);
    }

    #[test]
    fn nuclides_are_distinct_in_first_seen_order() {
        assert_eq!(efr_record().nuclides(), vec!["Eu-152", "Am-241"]);
    }

    #[test]
    fn energy_range_prefers_zones_over_points() {
        let mut record = efr_record();
        let (lo, hi) = record.energy_range_kev().unwrap();
        assert_eq!((lo, hi), (59.54, 1408.0));

        record.zones.push(Zone::new(1, 1.0, 2.0, 0.0));
        record.zones.push(Zone::new(1, 1.5, 3.0, 0.0));
        let (lo, hi) = record.energy_range_kev().unwrap();
        assert!((lo - 10.0).abs() < 1e-9);
        assert!((hi - 1000.0).abs() < 1e-6);
    }

    #[test]
    fn empty_record_has_no_energy_range() {
        let record = CalibrationRecord::new(RecordName::efa("a", "b"));
        assert!(record.energy_range_kev().is_none());
    }
}
