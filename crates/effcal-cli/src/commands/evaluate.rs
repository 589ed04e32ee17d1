use crate::cli::EvalArgs;
use crate::error::{CliError, Result};
use effcal::core::io::tsv;
use effcal::workflows::resample;
use tracing::info;

pub fn run(args: EvalArgs) -> Result<()> {
    let grid = args.grid.energy_grid().ok_or_else(|| {
        CliError::Argument("Provide energies with --energy or a grid with --grid.".to_string())
    })?;
    let record = args.record.selection().load_one(&args.file)?;
    let samples = resample::tabulate(&record, &grid.energies())?;
    info!("Evaluated {} at {} energies.", record.name, samples.len());

    match &args.output {
        Some(path) => {
            tsv::write_curve_to_path(&samples, path)?;
            println!("Wrote {} row(s) to {}", samples.len(), path.display());
        }
        None => tsv::write_curve(&samples, std::io::stdout().lock())?,
    }
    Ok(())
}
