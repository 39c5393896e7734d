// src/io/reporting.rs

use crate::impact::aggregate::LotImpact;
use std::error::Error;
use std::path::Path;

/// Writes per-lot impact estimates to a CSV file.
///
/// # Arguments
/// * `file_path` - The path to save the file (e.g., "results/impact.csv").
/// * `data` - Per-lot impact records from an estimation run.
pub fn write_impact_report(file_path: &str, data: &[LotImpact]) -> Result<(), Box<dyn Error>> {
    let path = Path::new(file_path);

    let mut wtr = csv::Writer::from_path(path)?;

    for record in data {
        wtr.serialize(record)?;
    }

    // Flush the buffer to ensure all data is written
    wtr.flush()?;

    println!(
        "Successfully exported {} rows to '{}'",
        data.len(),
        file_path
    );
    Ok(())
}
