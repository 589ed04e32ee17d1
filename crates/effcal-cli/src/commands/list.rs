use crate::cli::ListArgs;
use crate::error::Result;
use effcal::core::io::efa;
use tracing::info;

pub fn run(args: ListArgs) -> Result<()> {
    let index = efa::list_records(&args.file)?;
    info!("Found {} record(s) in {:?}", index.len(), &args.file);

    if index.is_empty() {
        println!("No calibration records found in {}.", args.file.display());
        return Ok(());
    }
    for entry in index.iter() {
        println!("{:>6}  {}", entry.line + 1, entry.name);
    }
    Ok(())
}
