//! Tab-separated exports consumed by plotting and spreadsheet tooling.

use super::error::CodecError;
use crate::core::models::curve::CurveSample;
use crate::core::models::point::EffPoint;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

#[derive(Serialize)]
struct PointRow {
    energy: f64,
    efficiency: f64,
    defficiency: f64,
    count_rate: f64,
    dcount_rate: f64,
    intensity: f64,
}

impl From<&EffPoint> for PointRow {
    fn from(p: &EffPoint) -> Self {
        Self {
            energy: p.energy,
            efficiency: p.efficiency,
            defficiency: p.deff,
            count_rate: p.area,
            dcount_rate: p.darea,
            intensity: p.intensity,
        }
    }
}

fn write_rows<T: Serialize>(
    rows: impl IntoIterator<Item = T>,
    writer: impl Write,
) -> Result<(), CodecError> {
    let mut tsv = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_writer(writer);
    for row in rows {
        tsv.serialize(row)?;
    }
    tsv.flush()?;
    Ok(())
}

pub fn write_points(points: &[EffPoint], writer: impl Write) -> Result<(), CodecError> {
    write_rows(points.iter().map(PointRow::from), writer)
}

pub fn write_curve(samples: &[CurveSample], writer: impl Write) -> Result<(), CodecError> {
    write_rows(samples.iter().copied(), writer)
}

pub fn write_points_to_path(points: &[EffPoint], path: &Path) -> Result<(), CodecError> {
    write_points(points, File::create(path)?)
}

pub fn write_curve_to_path(samples: &[CurveSample], path: &Path) -> Result<(), CodecError> {
    write_curve(samples, File::create(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn points_export_uses_count_rate_column_names() {
        let points = vec![EffPoint::new(59.54, 0.03, 1.5, "Am-241", 120.0, 2.0, 35.9)];
        let mut out = Vec::new();
        write_points(&points, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("energy\tefficiency\tdefficiency\tcount_rate\tdcount_rate\tintensity")
        );
        assert_eq!(lines.next(), Some("59.54\t0.03\t1.5\t120.0\t2.0\t35.9"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn curve_export_writes_one_row_per_sample() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("curve.tsv");
        let samples = vec![
            CurveSample {
                energy: 100.0,
                efficiency: 0.01,
                uncertainty: 0.02,
            },
            CurveSample {
                energy: 200.0,
                efficiency: 0.008,
                uncertainty: 0.03,
            },
        ];
        write_curve_to_path(&samples, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("energy\tefficiency\tuncertainty\n"));
        assert_eq!(text.lines().count(), 3);
    }
}
