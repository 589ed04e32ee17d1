use super::encoding;
use super::error::{CodecError, FormatErrorKind};
use super::traits::CalibrationFile;
use crate::core::models::name::RecordName;
use crate::core::models::point::{EffPoint, format_float};
use crate::core::models::record::{CalibrationRecord, HeaderEntry};
use crate::core::models::zone::Zone;
use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;
use tracing::{debug, warn};

/// Section header that looks like a record name but never starts a record.
pub const MATERIALS_SECTION: &str = "[MaterialsDescription]";

const ZONES_KEY: &str = "Zones";
const ZONE_PREFIX: &str = "Zone_";
const CURVE_PREFIX: &str = "Curve_";
const POINT_FIELDS: usize = 6;
const ZONE_FIELDS: usize = 4;

fn is_name_token(line: &str) -> bool {
    line.starts_with('[') && line != MATERIALS_SECTION
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Header,
    Points,
    Zones,
}

/// A record together with the line span it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRecord {
    pub record: CalibrationRecord,
    pub start_line: usize, // Index of the name line
    pub end_line: usize,   // Index of the first line after the record
}

/// Location of one record inside a multi-record file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordOffset {
    pub name: String, // The name token exactly as written, brackets included
    pub line: usize,  // Zero-based line of the name token
}

/// Records of a file in file order, addressable by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordIndex {
    entries: Vec<RecordOffset>,
}

impl RecordIndex {
    pub fn build(lines: &[&str]) -> Self {
        let entries = lines
            .iter()
            .enumerate()
            .filter_map(|(line, raw)| {
                let trimmed = raw.trim();
                is_name_token(trimmed).then(|| RecordOffset {
                    name: trimmed.to_string(),
                    line,
                })
            })
            .collect();
        Self { entries }
    }

    /// Line offset of the first record named `name`.
    pub fn offset_of(&self, name: &str) -> Option<usize> {
        self.entries.iter().find(|e| e.name == name).map(|e| e.line)
    }

    pub fn get(&self, index: usize) -> Option<&RecordOffset> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RecordOffset> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parses the first record found at or after `start`.
///
/// Returns `Ok(None)` at end of input. The record ends at end of input, at a blank
/// line, or at the next name token.
pub fn parse_lines(lines: &[&str], start: usize) -> Result<Option<ParsedRecord>, CodecError> {
    let Some(name_line) = (start..lines.len()).find(|&i| is_name_token(lines[i].trim())) else {
        return Ok(None);
    };
    let token = lines[name_line].trim();
    let name = RecordName::parse(token).ok_or_else(|| {
        CodecError::format(name_line, token, FormatErrorKind::InvalidNameToken)
    })?;

    let mut parser = RecordParser::new(name);
    let mut idx = name_line + 1;
    while idx < lines.len() {
        let line = lines[idx].trim();
        if line.is_empty() || is_name_token(line) {
            break;
        }
        if line != MATERIALS_SECTION {
            parser
                .feed(line)
                .map_err(|kind| CodecError::format(idx, line, kind))?;
        }
        idx += 1;
    }

    let record = parser.finish();
    debug!(
        "Parsed record {} ({} header entries, {} points, {} zones) from lines {}..{}",
        record.name,
        record.header.len(),
        record.points.len(),
        record.zones.len(),
        name_line + 1,
        idx
    );
    Ok(Some(ParsedRecord {
        record,
        start_line: name_line,
        end_line: idx,
    }))
}

/// Parses every record of the input, in file order.
pub fn parse_all_lines(lines: &[&str]) -> Result<Vec<CalibrationRecord>, CodecError> {
    let mut records = Vec::new();
    let mut pos = 0;
    // Each record consumes at least its name line, so this bound is never hit on
    // well-behaved input.
    for _ in 0..=lines.len() {
        match parse_lines(lines, pos)? {
            Some(parsed) => {
                pos = parsed.end_line.max(pos + 1);
                records.push(parsed.record);
            }
            None => return Ok(records),
        }
    }
    warn!("Record scan stopped after {} iterations", lines.len() + 1);
    Ok(records)
}

struct RecordParser {
    record: CalibrationRecord,
    mode: Mode,
    declared_zones: Option<usize>,
}

impl RecordParser {
    fn new(name: RecordName) -> Self {
        Self {
            record: CalibrationRecord::new(name),
            mode: Mode::Header,
            declared_zones: None,
        }
    }

    fn feed(&mut self, line: &str) -> Result<(), FormatErrorKind> {
        let (key, value) = line
            .split_once('=')
            .ok_or(FormatErrorKind::MissingSeparator)?;

        match self.mode {
            Mode::Header => {
                if key.trim().parse::<f64>().is_ok() {
                    self.mode = Mode::Points;
                    self.record.points.push(parse_point(key, value)?);
                } else if key == ZONES_KEY {
                    self.start_zones(value)?;
                } else {
                    self.record.header.push(HeaderEntry::new(key, value));
                }
            }
            Mode::Points => {
                if key == ZONES_KEY {
                    self.start_zones(value)?;
                } else {
                    self.record.points.push(parse_point(key, value)?);
                }
            }
            Mode::Zones => self.feed_zone_line(line, key, value)?,
        }
        Ok(())
    }

    fn start_zones(&mut self, value: &str) -> Result<(), FormatErrorKind> {
        let count = parse_int(value, "zone count")?;
        self.declared_zones = Some(count);
        self.mode = Mode::Zones;
        Ok(())
    }

    fn feed_zone_line(&mut self, line: &str, key: &str, value: &str) -> Result<(), FormatErrorKind> {
        if let Some(index) = key.strip_prefix(ZONE_PREFIX) {
            let index = parse_int(index, "zone number")?;
            let expected = self.record.zones.len() + 1;
            if index != expected {
                return Err(FormatErrorKind::ZoneOutOfOrder {
                    expected,
                    found: index,
                });
            }
            self.record.zones.push(parse_zone(value)?);
        } else if let Some(suffix) = key.strip_prefix(CURVE_PREFIX) {
            let (zone_part, row_part) = match suffix.split_once('_') {
                Some((zone, row)) => (zone, Some(row)),
                None => (suffix, None),
            };
            let zone_num = parse_int(zone_part, "curve zone number")?;
            let coeffs = parse_coefficients(value)?;
            let zone = zone_num
                .checked_sub(1)
                .and_then(|i| self.record.zones.get_mut(i))
                .ok_or(FormatErrorKind::UnknownZone { zone: zone_num })?;
            match row_part {
                Some(row) => {
                    let row = parse_int(row, "curve row number")?;
                    let expected = zone.orth_coeffs.len() + 1;
                    if row != expected {
                        return Err(FormatErrorKind::CurveRowOutOfOrder {
                            zone: zone_num,
                            expected,
                            found: row,
                        });
                    }
                    zone.orth_coeffs.push(coeffs);
                }
                None => zone.main_coeffs = coeffs,
            }
        } else {
            warn!("Skipping unrecognised line in zone section: '{}'", line);
        }
        Ok(())
    }

    fn finish(self) -> CalibrationRecord {
        if let Some(declared) = self.declared_zones {
            if declared != self.record.zones.len() {
                warn!(
                    "Record {} declares {} zone(s) but defines {}",
                    self.record.name,
                    declared,
                    self.record.zones.len()
                );
            }
        }
        self.record
    }
}

fn parse_float(value: &str, field: &'static str) -> Result<f64, FormatErrorKind> {
    let value = value.trim();
    value.parse().map_err(|_| FormatErrorKind::InvalidFloat {
        field,
        value: value.to_string(),
    })
}

fn parse_int(value: &str, field: &'static str) -> Result<usize, FormatErrorKind> {
    let value = value.trim();
    value.parse().map_err(|_| FormatErrorKind::InvalidInt {
        field,
        value: value.to_string(),
    })
}

fn parse_point(key: &str, value: &str) -> Result<EffPoint, FormatErrorKind> {
    let energy = parse_float(key, "energy")?;
    let fields: Vec<&str> = value.split(',').collect();
    if fields.len() != POINT_FIELDS {
        return Err(FormatErrorKind::FieldCount {
            expected: POINT_FIELDS,
            found: fields.len(),
        });
    }
    Ok(EffPoint {
        energy,
        efficiency: parse_float(fields[0], "efficiency")?,
        deff: parse_float(fields[1], "efficiency uncertainty")?,
        nuclide: fields[2].trim().to_string(),
        area: parse_float(fields[3], "peak area")?,
        darea: parse_float(fields[4], "peak area uncertainty")?,
        intensity: parse_float(fields[5], "intensity")?,
    })
}

fn parse_zone(value: &str) -> Result<Zone, FormatErrorKind> {
    let fields: Vec<&str> = value.split(',').collect();
    if fields.len() != ZONE_FIELDS {
        return Err(FormatErrorKind::FieldCount {
            expected: ZONE_FIELDS,
            found: fields.len(),
        });
    }
    Ok(Zone::new(
        parse_int(fields[0], "zone degree")?,
        parse_float(fields[1], "zone left boundary")?,
        parse_float(fields[2], "zone right boundary")?,
        parse_float(fields[3], "zone deviation")?,
    ))
}

fn parse_coefficients(value: &str) -> Result<Vec<f64>, FormatErrorKind> {
    value
        .split(',')
        .map(|c| parse_float(c, "curve coefficient"))
        .collect()
}

fn join_floats(values: &[f64]) -> String {
    values
        .iter()
        .map(|&v| format_float(v))
        .collect::<Vec<_>>()
        .join(",")
}

/// Renders a record in the calibration file layout, one `\n`-terminated line each.
pub fn render(record: &CalibrationRecord) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(out, "{}", record.name);
    for entry in &record.header {
        let _ = writeln!(out, "{}={}", entry.key, entry.value);
    }
    for point in &record.points {
        let _ = writeln!(out, "{}", point);
    }
    if !record.zones.is_empty() {
        let _ = writeln!(out, "{}={}", ZONES_KEY, record.zones.len());
        for (i, zone) in record.zones.iter().enumerate() {
            let num = i + 1;
            let _ = writeln!(
                out,
                "{}{}={},{},{},{}",
                ZONE_PREFIX,
                num,
                zone.degree,
                format_float(zone.left),
                format_float(zone.right),
                format_float(zone.deviation)
            );
            for (k, row) in zone.orth_coeffs.iter().enumerate() {
                let _ = writeln!(out, "{}{}_{}={}", CURVE_PREFIX, num, k + 1, join_floats(row));
            }
            let _ = writeln!(
                out,
                "{}{}={}",
                CURVE_PREFIX,
                num,
                join_floats(&zone.main_coeffs)
            );
        }
    }
    out
}

fn read_text(reader: &mut impl Read) -> Result<String, CodecError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    encoding::decode(&bytes)
}

/// The LSRM calibration record format, shared by `.efr` and `.efa` files.
pub struct EfaFile;

impl CalibrationFile for EfaFile {
    type Error = CodecError;

    fn read_from(
        reader: &mut impl Read,
        start_line: usize,
    ) -> Result<Option<CalibrationRecord>, Self::Error> {
        let text = read_text(reader)?;
        let lines: Vec<&str> = text.lines().collect();
        Ok(parse_lines(&lines, start_line)?.map(|parsed| parsed.record))
    }

    fn read_all_from(reader: &mut impl Read) -> Result<Vec<CalibrationRecord>, Self::Error> {
        let text = read_text(reader)?;
        let lines: Vec<&str> = text.lines().collect();
        parse_all_lines(&lines)
    }

    fn write_to(record: &CalibrationRecord, writer: &mut impl Write) -> Result<(), Self::Error> {
        let bytes = encoding::encode(&render(record))?;
        writer.write_all(&bytes)?;
        Ok(())
    }

    fn write_separator(writer: &mut impl Write) -> Result<(), Self::Error> {
        writer.write_all(b"\n")?;
        Ok(())
    }
}

fn read_path_text(path: &Path) -> Result<String, CodecError> {
    encoding::decode(&std::fs::read(path)?)
}

/// Reads the first record of the file.
pub fn parse(path: impl AsRef<Path>) -> Result<CalibrationRecord, CodecError> {
    let path = path.as_ref();
    EfaFile::read_from_path(path, 0)?.ok_or_else(|| CodecError::NotFound {
        name: format!("any record in '{}'", path.display()),
    })
}

/// Lists every record name token with the line it starts on.
pub fn list_records(path: impl AsRef<Path>) -> Result<RecordIndex, CodecError> {
    let text = read_path_text(path.as_ref())?;
    let lines: Vec<&str> = text.lines().collect();
    Ok(RecordIndex::build(&lines))
}

/// Reads the record whose name token is exactly `name`.
pub fn parse_at(path: impl AsRef<Path>, name: &str) -> Result<CalibrationRecord, CodecError> {
    let text = read_path_text(path.as_ref())?;
    let lines: Vec<&str> = text.lines().collect();
    let offset = RecordIndex::build(&lines)
        .offset_of(name)
        .ok_or_else(|| CodecError::NotFound {
            name: name.to_string(),
        })?;
    parse_lines(&lines, offset)?
        .map(|parsed| parsed.record)
        .ok_or_else(|| CodecError::NotFound {
            name: name.to_string(),
        })
}

/// Reads the `index`-th record (zero-based, file order).
pub fn get_by_index(path: impl AsRef<Path>, index: usize) -> Result<CalibrationRecord, CodecError> {
    let text = read_path_text(path.as_ref())?;
    let lines: Vec<&str> = text.lines().collect();
    let not_found = || CodecError::NotFound {
        name: format!("record #{}", index),
    };
    let offset = RecordIndex::build(&lines).get(index).ok_or_else(not_found)?.line;
    parse_lines(&lines, offset)?
        .map(|parsed| parsed.record)
        .ok_or_else(not_found)
}

/// Reads every record of the file, in file order.
pub fn parse_all(path: impl AsRef<Path>) -> Result<Vec<CalibrationRecord>, CodecError> {
    EfaFile::read_all_from_path(path)
}

/// Writes the record as a standalone file, replacing any existing content.
pub fn write_efr(record: &CalibrationRecord, path: impl AsRef<Path>) -> Result<(), CodecError> {
    EfaFile::write_to_path(record, path)
}

/// Writes every record to a fresh file in order, separated as in a multi-record file.
pub fn write_all(records: &[CalibrationRecord], path: impl AsRef<Path>) -> Result<(), CodecError> {
    let mut writer = BufWriter::new(File::create(path)?);
    for (i, record) in records.iter().enumerate() {
        if i > 0 {
            EfaFile::write_separator(&mut writer)?;
        }
        EfaFile::write_to(record, &mut writer)?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes the record, either replacing the file or appending it as a new section.
pub fn write_efa(
    record: &CalibrationRecord,
    path: impl AsRef<Path>,
    append: bool,
) -> Result<(), CodecError> {
    if append {
        EfaFile::append_to_path(record, path)
    } else {
        EfaFile::write_to_path(record, path)
    }
}
