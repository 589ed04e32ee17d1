use crate::cli::FitArgs;
use crate::config::PartialFitConfig;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use effcal::engine::progress::ProgressReporter;
use effcal::workflows::calibrate;
use tracing::info;

pub fn run(args: FitArgs) -> Result<()> {
    let partial_config = PartialFitConfig::load(args.config.as_deref())?;
    info!("Merging fit configuration from file and CLI arguments...");
    let config = partial_config.merge_with_cli(&args)?;
    info!(
        zones = config.zones.len(),
        weighting = ?config.weighting,
        "Fit configuration ready."
    );

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    let fitted = calibrate::run_file(
        &args.input,
        &args.output,
        &args.selection(),
        &config,
        args.append,
        &reporter,
    )?;

    for record in &fitted {
        println!("✓ {} fitted with {} zone(s)", record.name, record.zones.len());
    }
    println!(
        "Wrote {} calibration(s) to {}",
        fitted.len(),
        args.output.display()
    );
    Ok(())
}
