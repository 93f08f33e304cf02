//! The per-session landmark log
//!
//! One header row followed by one row per logged placement. The file is never
//! held open between operations: appends open, write, flush and close within
//! a single call, and row removal rewrites the log into a sibling temporary
//! file that is renamed over the original. An interrupted session therefore
//! leaves a well-formed log containing every row written so far.

use crate::csv_row::{join_row, split_row};
use log::{debug, trace};
use pointselector_core::{Error, LandmarkRecord, Result, LANDMARK_COLUMNS};
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Handle to a landmark log file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LandmarkLog {
    path: PathBuf,
}

impl LandmarkLog {
    /// Create (or truncate) the log at `path` and write the header row
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path)?;
        let mut writer = BufWriter::new(file);
        writeln!(writer, "{}", join_row(&LANDMARK_COLUMNS))?;
        writer.flush()?;

        debug!("Created landmark log {}", path.display());
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one row. A model name with a line break is rejected, since
    /// rows are read back one line at a time.
    pub fn append(&self, record: &LandmarkRecord) -> Result<()> {
        if record.model.contains(['\n', '\r']) {
            return Err(Error::InvalidData(format!(
                "Model name {:?} contains a line break",
                record.model
            )));
        }
        let line = join_row(&record.fields());
        let mut file = OpenOptions::new().append(true).open(&self.path)?;
        writeln!(file, "{}", line)?;
        file.flush()?;

        trace!("Appended landmark row: {}", line);
        Ok(())
    }

    /// Remove the most recently appended row and return it. The header row
    /// is never removed; `None` means the log has no data rows.
    pub fn pop_last(&self) -> Result<Option<LandmarkRecord>> {
        let content = fs::read_to_string(&self.path)?;
        let mut lines: Vec<&str> = content.lines().collect();

        while lines.last().is_some_and(|line| line.trim().is_empty()) {
            lines.pop();
        }
        if lines.len() <= 1 {
            return Ok(None);
        }

        let removed = match lines.pop() {
            Some(line) => parse_record(line)?,
            None => return Ok(None),
        };

        let mut rewritten = lines.join("\n");
        rewritten.push('\n');
        self.replace_contents(&rewritten)?;

        trace!("Removed landmark row for {} #{}", removed.model, removed.index);
        Ok(Some(removed))
    }

    /// All data rows, oldest first
    pub fn rows(&self) -> Result<Vec<LandmarkRecord>> {
        let content = fs::read_to_string(&self.path)?;
        content
            .lines()
            .skip(1)
            .filter(|line| !line.trim().is_empty())
            .map(parse_record)
            .collect()
    }

    /// Number of data rows
    pub fn row_count(&self) -> Result<usize> {
        let content = fs::read_to_string(&self.path)?;
        Ok(content
            .lines()
            .skip(1)
            .filter(|line| !line.trim().is_empty())
            .count())
    }

    fn replace_contents(&self, content: &str) -> Result<()> {
        let file_name = self
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .ok_or_else(|| Error::InvalidData(format!("Invalid log path: {}", self.path.display())))?;
        let temp_path = self.path.with_file_name(format!(".{}.tmp", file_name));

        {
            let file = File::create(&temp_path)?;
            let mut writer = BufWriter::new(file);
            writer.write_all(content.as_bytes())?;
            writer.flush()?;
        }

        if let Err(e) = fs::rename(&temp_path, &self.path) {
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }
        Ok(())
    }
}

fn parse_record(line: &str) -> Result<LandmarkRecord> {
    let fields = split_row(line)?;
    LandmarkRecord::from_fields(&fields)
        .ok_or_else(|| Error::InvalidData(format!("Malformed landmark row: {}", line)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pointselector_core::Point3d;

    fn record(model: &str, index: usize, x: f64) -> LandmarkRecord {
        LandmarkRecord::new(model, index, Point3d::new(x, 2.0, -3.5))
    }

    #[test]
    fn test_create_writes_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("landmarks.csv");

        let log = LandmarkLog::create(&path).unwrap();
        assert_eq!(log.path(), path.as_path());
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "FileName,Index_no,\"Position/Location-x,y,z\"\n"
        );
        assert_eq!(log.row_count().unwrap(), 0);
    }

    #[test]
    fn test_create_truncates_existing_log() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("landmarks.csv");
        fs::write(&path, "old,content\nmore,rows\n").unwrap();

        let log = LandmarkLog::create(&path).unwrap();
        assert_eq!(log.row_count().unwrap(), 0);
    }

    #[test]
    fn test_append_rows() {
        let dir = tempfile::tempdir().unwrap();
        let log = LandmarkLog::create(dir.path().join("landmarks.csv")).unwrap();

        log.append(&record("a.ply", 0, 1.0)).unwrap();
        log.append(&record("a.ply", 1, 1.25)).unwrap();

        let content = fs::read_to_string(log.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "a.ply,0,\"[1.0, 2.0, -3.5]\"");
        assert_eq!(lines[2], "a.ply,1,\"[1.25, 2.0, -3.5]\"");

        let rows = log.rows().unwrap();
        assert_eq!(rows, vec![record("a.ply", 0, 1.0), record("a.ply", 1, 1.25)]);
    }

    #[test]
    fn test_pop_last() {
        let dir = tempfile::tempdir().unwrap();
        let log = LandmarkLog::create(dir.path().join("landmarks.csv")).unwrap();
        log.append(&record("a.ply", 0, 1.0)).unwrap();
        log.append(&record("b.ply", 0, 4.0)).unwrap();

        let removed = log.pop_last().unwrap();
        assert_eq!(removed, Some(record("b.ply", 0, 4.0)));
        assert_eq!(log.rows().unwrap(), vec![record("a.ply", 0, 1.0)]);

        assert_eq!(log.pop_last().unwrap(), Some(record("a.ply", 0, 1.0)));
        assert_eq!(log.pop_last().unwrap(), None);

        // Header survives
        assert_eq!(
            fs::read_to_string(log.path()).unwrap(),
            "FileName,Index_no,\"Position/Location-x,y,z\"\n"
        );

        // No temporary file left behind
        let leftovers = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[test]
    fn test_pop_last_malformed_row_leaves_log_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let log = LandmarkLog::create(dir.path().join("landmarks.csv")).unwrap();
        log.append(&record("a.ply", 0, 1.0)).unwrap();

        let mut file = OpenOptions::new().append(true).open(log.path()).unwrap();
        writeln!(file, "garbage").unwrap();
        drop(file);

        let before = fs::read_to_string(log.path()).unwrap();
        assert!(log.pop_last().is_err());
        assert_eq!(fs::read_to_string(log.path()).unwrap(), before);
    }

    #[test]
    fn test_append_rejects_line_break_in_model_name() {
        let dir = tempfile::tempdir().unwrap();
        let log = LandmarkLog::create(dir.path().join("landmarks.csv")).unwrap();
        log.append(&record("a.ply", 0, 1.0)).unwrap();

        assert!(matches!(log.append(&record("a\nb.ply", 0, 1.0)), Err(Error::InvalidData(_))));
        assert!(log.append(&record("c\r.ply", 0, 1.0)).is_err());

        assert_eq!(log.row_count().unwrap(), 1);
        assert_eq!(log.pop_last().unwrap(), Some(record("a.ply", 0, 1.0)));
        assert_eq!(log.row_count().unwrap(), 0);
    }

    #[test]
    fn test_append_to_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let log = LandmarkLog::create(dir.path().join("landmarks.csv")).unwrap();
        fs::remove_file(log.path()).unwrap();

        assert!(matches!(log.append(&record("a.ply", 0, 1.0)), Err(Error::Io(_))));
    }
}
