use super::selection::RecordSelection;
use crate::core::io::efa;
use crate::core::models::record::CalibrationRecord;
use crate::engine::config::FitConfig;
use crate::engine::error::CalibrationError;
use crate::engine::fitting::fit_record;
use crate::engine::progress::{Progress, ProgressReporter};
use std::path::Path;
use tracing::{info, instrument};

/// Fits the record's zones and converts it to EFA naming.
#[instrument(skip_all, name = "calibrate_workflow", fields(record = %record.name))]
pub fn run(
    mut record: CalibrationRecord,
    config: &FitConfig,
) -> Result<CalibrationRecord, CalibrationError> {
    fit_record(&mut record, config)?;
    record.to_efa_name();
    Ok(record)
}

/// Calibrates the selected records of `input` and writes them to `output`.
///
/// Every record is fitted before anything is written, so a failed fit leaves
/// `output` untouched. With `append` the first record is appended to an
/// existing file; the rest always follow it.
#[instrument(skip_all, name = "calibrate_file_workflow")]
pub fn run_file(
    input: &Path,
    output: &Path,
    selection: &RecordSelection,
    config: &FitConfig,
    append: bool,
    reporter: &ProgressReporter,
) -> Result<Vec<CalibrationRecord>, CalibrationError> {
    reporter.report(Progress::PhaseStart { name: "Loading" });
    let records = selection.load(input)?;
    reporter.report(Progress::PhaseFinish);
    info!(
        "Loaded {} record(s) from '{}'.",
        records.len(),
        input.display()
    );

    reporter.report(Progress::RecordsStart {
        total: records.len() as u64,
    });
    let mut fitted = Vec::with_capacity(records.len());
    for record in records {
        let record = run(record, config)?;
        reporter.report(Progress::RecordFinished {
            name: record.name.to_string(),
            zones: record.zones.len(),
        });
        fitted.push(record);
    }
    reporter.report(Progress::RecordsFinish);

    reporter.report(Progress::PhaseStart { name: "Writing" });
    for (i, record) in fitted.iter().enumerate() {
        efa::write_efa(record, output, append || i > 0)?;
    }
    reporter.report(Progress::PhaseFinish);
    info!(
        "Wrote {} calibration(s) to '{}'.",
        fitted.len(),
        output.display()
    );
    Ok(fitted)
}
