use crate::cli::ResampleArgs;
use crate::error::Result;
use effcal::core::io::efa;
use effcal::workflows::resample;
use tracing::info;

pub fn run(args: ResampleArgs) -> Result<()> {
    let record = args.record.selection().load_one(&args.input)?;
    let grid = args.grid.energy_grid();
    if grid.is_none() {
        info!("No grid given; sampling at the record's own point energies.");
    }

    let resampled = resample::run(&record, grid.as_ref())?;
    efa::write_efa(&resampled, &args.output, args.append)?;
    println!(
        "✓ {} sampled at {} energies, written to {}",
        resampled.name,
        resampled.points.len(),
        args.output.display()
    );
    Ok(())
}
