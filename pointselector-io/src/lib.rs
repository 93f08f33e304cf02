//! I/O operations for landmark sessions
//!
//! This crate owns every file a session touches: discovering the model files
//! of an input directory, the manifest of discovered models, the landmark log,
//! and readers for surface models (PLY) and their companion point sets
//! (markups JSON).

pub mod csv_row;
pub mod discovery;
pub mod manifest;
pub mod landmark_log;
pub mod ply;
pub mod markups;

pub use discovery::{discover_models, DiscoveryOptions};
pub use landmark_log::LandmarkLog;
pub use manifest::{read_manifest, write_manifest};

use pointselector_core::{Error, PointSet, Result, SurfaceModel};
use std::path::Path;

/// Trait for reading surface models from files
pub trait ModelReader {
    fn read_model<P: AsRef<Path>>(path: P) -> Result<SurfaceModel>;
}

/// Trait for reading point sets from files
pub trait PointSetReader {
    fn read_point_set<P: AsRef<Path>>(path: P) -> Result<PointSet>;
}

/// Auto-detect format and read a surface model
pub fn read_model<P: AsRef<Path>>(path: P) -> Result<SurfaceModel> {
    let path = path.as_ref();
    match extension_of(path).as_deref() {
        Some("ply") => ply::PlyReader::read_model(path),
        _ => Err(Error::UnsupportedFormat(format!(
            "Unsupported model format: {:?}",
            path.extension()
        ))),
    }
}

/// Auto-detect format and read a point set
pub fn read_point_set<P: AsRef<Path>>(path: P) -> Result<PointSet> {
    let path = path.as_ref();
    let name = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    if name.ends_with(".json") {
        markups::MarkupsJsonReader::read_point_set(path)
    } else {
        Err(Error::UnsupportedFormat(format!(
            "Unsupported point set format: {}",
            path.display()
        )))
    }
}

fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase())
}
