use crate::cli::{ConvertArgs, NameFormatChoice};
use crate::error::Result;
use effcal::core::io::efa;
use tracing::info;

pub fn run(args: ConvertArgs) -> Result<()> {
    let mut records = efa::parse_all(&args.input)?;
    let position = args.record.selection().position(&records)?;
    let record = &mut records[position];
    let original = record.name.to_string();
    match args.format {
        NameFormatChoice::Efa => record.to_efa_name(),
        NameFormatChoice::Efr => record.to_efr_name(&args.nuclide),
    }
    let converted = record.name.to_string();
    info!("Converted {} to {}", original, converted);

    efa::write_all(&records, &args.output)?;
    println!("✓ {} -> {} ({})", original, converted, args.output.display());
    Ok(())
}
