//! Manifest of the models discovered for a session
//!
//! Header `,FileNames`, then one `<row>,<file name>` line per model in
//! session order.

use crate::csv_row::{join_row, split_row};
use log::debug;
use pointselector_core::{Error, ModelList, Result};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

const FILE_NAMES_COLUMN: &str = "FileNames";

/// Write the manifest for `models`, replacing any existing file
pub fn write_manifest<P: AsRef<Path>>(path: P, models: &ModelList) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "{}", join_row(&["", FILE_NAMES_COLUMN]))?;
    for (row, model) in models.iter().enumerate() {
        writeln!(writer, "{}", join_row(&[row.to_string().as_str(), model.file_name.as_str()]))?;
    }

    writer.flush()?;
    debug!("Wrote manifest of {} models to {}", models.len(), path.display());
    Ok(())
}

/// Read back the model file names of a manifest, in row order
pub fn read_manifest<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)?;
    let mut lines = content.lines();

    match lines.next().map(split_row).transpose()? {
        Some(header) if header.last().map(String::as_str) == Some(FILE_NAMES_COLUMN) => {}
        _ => return Err(Error::InvalidData("Manifest header is missing".to_string())),
    }

    lines
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let mut fields = split_row(line)?;
            if fields.len() != 2 {
                return Err(Error::InvalidData(format!("Malformed manifest row: {}", line)));
            }
            Ok(fields.remove(1))
        })
        .collect()
}
