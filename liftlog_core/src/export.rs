//! CSV export of progression series.

use crate::projection::DataPoint;
use crate::Result;
use std::io::Write;
use std::path::Path;

/// Write `date,value` rows (with header) to any writer
pub fn write_csv<W: Write>(series: &[DataPoint], writer: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(writer);

    for point in series {
        writer.serialize(point)?;
    }

    writer.flush()?;
    Ok(())
}

/// Write a series to a CSV file, creating parent directories as needed
pub fn export_csv(series: &[DataPoint], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::File::create(path)?;
    write_csv(series, file)?;
    tracing::info!("Exported {} points to {:?}", series.len(), path);
    Ok(())
}
