use crate::cli::SetParamArgs;
use crate::error::Result;
use effcal::core::io::efa;
use tracing::info;

pub fn run(args: SetParamArgs) -> Result<()> {
    let mut records = efa::parse_all(&args.input)?;
    let position = args.record.selection().position(&records)?;
    let record = &mut records[position];
    info!(
        "Appending {} parameter(s) to {}",
        args.parameters.len(),
        record.name
    );
    record.add_parameters(args.parameters.iter().cloned());
    let (name, entries) = (record.name.to_string(), record.header.len());

    efa::write_all(&records, &args.output)?;
    println!(
        "✓ {} written to {} with {} header entr(ies)",
        name,
        args.output.display(),
        entries
    );
    Ok(())
}
