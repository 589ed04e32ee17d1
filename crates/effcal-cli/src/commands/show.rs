use crate::cli::ShowArgs;
use crate::error::Result;
use effcal::core::models::name::NameFormat;
use effcal::core::models::record::CalibrationRecord;
use std::fmt::Write;
use tracing::info;

pub fn run(args: ShowArgs) -> Result<()> {
    let record = args.record.selection().load_one(&args.file)?;
    info!("Loaded record {} from {:?}", record.name, &args.file);
    print!("{}", summarize(&record));
    Ok(())
}

fn summarize(record: &CalibrationRecord) -> String {
    let mut out = String::new();
    let format = match record.name.format() {
        NameFormat::Efr => "EFR",
        NameFormat::Efa => "EFA",
    };
    // Writing into a String cannot fail.
    let _ = writeln!(out, "Record:   {} ({})", record.name, format);
    let _ = writeln!(out, "Header:   {} entr(ies)", record.header.len());
    for entry in &record.header {
        let _ = writeln!(out, "  {} = {}", entry.key, entry.value);
    }
    let _ = writeln!(out, "Points:   {}", record.points.len());
    let nuclides = record.nuclides();
    if !nuclides.is_empty() {
        let _ = writeln!(out, "Nuclides: {}", nuclides.join(", "));
    }
    if let Some((low, high)) = record.energy_range_kev() {
        let _ = writeln!(out, "Range:    {:.2} - {:.2} keV", low, high);
    }
    let _ = writeln!(out, "Zones:    {}", record.zones.len());
    for (i, zone) in record.zones.iter().enumerate() {
        let _ = writeln!(
            out,
            "  #{} degree {} over {:.2} - {:.2} keV, deviation {:.3e}",
            i + 1,
            zone.degree,
            zone.left_kev(),
            zone.right_kev(),
            zone.deviation
        );
    }
    out
}
