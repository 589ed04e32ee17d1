use crate::core::models::record::CalibrationRecord;
use std::error::Error;
use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Defines the interface for reading and writing calibration record files.
///
/// A file holds one or more records. Readers address records by the zero-based
/// line offset at which scanning starts, which is what the record index reports.
pub trait CalibrationFile {
    /// The error type for I/O operations.
    type Error: Error + From<io::Error>;

    /// Reads the first record found at or after `start_line`.
    ///
    /// # Return
    ///
    /// Returns `Ok(None)` when the stream ends before any record name is found.
    ///
    /// # Errors
    ///
    /// Returns an error if decoding or parsing fails.
    fn read_from(
        reader: &mut impl Read,
        start_line: usize,
    ) -> Result<Option<CalibrationRecord>, Self::Error>;

    /// Reads every record of the stream, in file order.
    ///
    /// # Errors
    ///
    /// Returns an error if decoding or parsing of any record fails.
    fn read_all_from(reader: &mut impl Read) -> Result<Vec<CalibrationRecord>, Self::Error>;

    /// Writes one record to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be encoded or writing fails.
    fn write_to(record: &CalibrationRecord, writer: &mut impl Write) -> Result<(), Self::Error>;

    /// Writes the separator placed between two records of a multi-record file.
    fn write_separator(writer: &mut impl Write) -> Result<(), Self::Error>;

    fn read_from_path<P: AsRef<Path>>(
        path: P,
        start_line: usize,
    ) -> Result<Option<CalibrationRecord>, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader, start_line)
    }

    fn read_all_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<CalibrationRecord>, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_all_from(&mut reader)
    }

    /// Creates (or truncates) `path` and writes the record to it.
    fn write_to_path<P: AsRef<Path>>(
        record: &CalibrationRecord,
        path: P,
    ) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(record, &mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Appends the record to `path`, separating it from any existing content.
    fn append_to_path<P: AsRef<Path>>(
        record: &CalibrationRecord,
        path: P,
    ) -> Result<(), Self::Error> {
        let path = path.as_ref();
        let has_content = path.metadata().map(|m| m.len() > 0).unwrap_or(false);
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let mut writer = BufWriter::new(file);
        if has_content {
            Self::write_separator(&mut writer)?;
        }
        Self::write_to(record, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
