use crate::core::io::efa;
use crate::core::io::error::CodecError;
use crate::core::models::record::CalibrationRecord;
use std::path::Path;

/// Which records of a multi-record file a workflow operates on.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RecordSelection {
    #[default]
    First,
    Named(String),
    Index(usize),
    All,
}

impl RecordSelection {
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Vec<CalibrationRecord>, CodecError> {
        let path = path.as_ref();
        match self {
            Self::First => efa::parse(path).map(|r| vec![r]),
            Self::Named(name) => efa::parse_at(path, name).map(|r| vec![r]),
            Self::Index(index) => efa::get_by_index(path, *index).map(|r| vec![r]),
            Self::All => efa::parse_all(path),
        }
    }

    /// Position of the selected record among `records`; `All` resolves to the first one.
    pub fn position(&self, records: &[CalibrationRecord]) -> Result<usize, CodecError> {
        let found = match self {
            Self::First | Self::All => (!records.is_empty()).then_some(0),
            Self::Named(name) => records.iter().position(|r| r.name.to_string() == *name),
            Self::Index(index) => (*index < records.len()).then_some(*index),
        };
        found.ok_or_else(|| CodecError::NotFound {
            name: match self {
                Self::Named(name) => name.clone(),
                Self::Index(index) => format!("record #{}", index),
                _ => "any record".to_string(),
            },
        })
    }

    /// Loads exactly one record; `All` resolves to the first one.
    pub fn load_one(&self, path: impl AsRef<Path>) -> Result<CalibrationRecord, CodecError> {
        match self {
            Self::All => efa::parse(path),
            _ => {
                let path = path.as_ref();
                self.load(path)?
                    .into_iter()
                    .next()
                    .ok_or_else(|| CodecError::NotFound {
                        name: format!("any record in '{}'", path.display()),
                    })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const TWO_RECORDS: &str = "\
[Det;Geom;Cs-137]
Cs-137=100,1,1
661.657=0.0123,1.5,Cs-137,1000.0,10.0,0.851

[Det;Geom2;Co-60]
1173.2=0.008,2.0,Co-60,500.0,8.0,0.999
1332.5=0.007,2.0,Co-60,480.0,8.0,0.999
";

    #[test]
    fn position_resolves_within_loaded_records() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("two.efr");
        fs::write(&path, TWO_RECORDS).unwrap();
        let records = RecordSelection::All.load(&path).unwrap();

        assert_eq!(RecordSelection::First.position(&records).unwrap(), 0);
        assert_eq!(
            RecordSelection::Named("[Det;Geom2;Co-60]".to_string())
                .position(&records)
                .unwrap(),
            1
        );
        assert_eq!(RecordSelection::Index(1).position(&records).unwrap(), 1);
        assert!(matches!(
            RecordSelection::Index(2).position(&records),
            Err(CodecError::NotFound { .. })
        ));
        assert!(RecordSelection::First.position(&[]).is_err());
    }

    #[test]
    fn selections_pick_the_expected_records() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("two.efr");
        fs::write(&path, TWO_RECORDS).unwrap();

        let first = RecordSelection::First.load(&path).unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].name.geometry, "Geom");

        let named = RecordSelection::Named("[Det;Geom2;Co-60]".to_string())
            .load_one(&path)
            .unwrap();
        assert_eq!(named.points.len(), 2);

        let indexed = RecordSelection::Index(1).load_one(&path).unwrap();
        assert_eq!(indexed, named);

        assert_eq!(RecordSelection::All.load(&path).unwrap().len(), 2);
        assert!(matches!(
            RecordSelection::Index(5).load(&path),
            Err(CodecError::NotFound { .. })
        ));
    }
}
