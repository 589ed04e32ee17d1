use crate::cli::ExportArgs;
use crate::error::Result;
use effcal::core::io::tsv;
use tracing::warn;

pub fn run(args: ExportArgs) -> Result<()> {
    let record = args.record.selection().load_one(&args.input)?;
    if record.points.is_empty() {
        warn!("Record {} has no points; the table will only contain a header.", record.name);
    }
    tsv::write_points_to_path(&record.points, &args.output)?;
    println!(
        "Exported {} point(s) of {} to {}",
        record.points.len(),
        record.name,
        args.output.display()
    );
    Ok(())
}
