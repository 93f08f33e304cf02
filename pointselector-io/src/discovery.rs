//! Discovery of model files and their companion point sets

use log::{debug, info, warn};
use pointselector_core::{Error, ModelEntry, ModelList, Result};
use std::fs;
use std::path::Path;

/// How model files and their point sets are recognised in a directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryOptions {
    /// Model file extension, without the leading dot
    pub model_extension: String,
    /// Appended to the model stem to name its point set file
    pub point_set_suffix: String,
    /// Fail discovery when a model has no point set file
    pub require_point_sets: bool,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            model_extension: "ply".to_string(),
            point_set_suffix: ".mrk.json".to_string(),
            require_point_sets: true,
        }
    }
}

/// Enumerate the model files of `dir`.
///
/// Models are ordered by file name. Fails when the directory does not
/// exist, holds no model files, or (with `require_point_sets`) a model has
/// no companion point set.
pub fn discover_models<P: AsRef<Path>>(dir: P, options: &DiscoveryOptions) -> Result<ModelList> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(Error::MissingDirectory {
            path: dir.to_path_buf(),
        });
    }

    let extension = options.model_extension.trim_start_matches('.');
    let mut file_names = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }

        let path = entry.path();
        let matches = path
            .extension()
            .and_then(|s| s.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(extension));
        if !matches {
            continue;
        }

        match entry.file_name().into_string() {
            Ok(name) if name.contains(['\n', '\r']) => {
                warn!("Skipping model with a line break in its file name: {:?}", name)
            }
            Ok(name) => file_names.push(name),
            Err(name) => warn!("Skipping model with non UTF-8 file name: {:?}", name),
        }
    }

    if file_names.is_empty() {
        return Err(Error::EmptyModelDirectory {
            path: dir.to_path_buf(),
            extension: extension.to_string(),
        });
    }

    file_names.sort();

    let mut entries = Vec::with_capacity(file_names.len());
    for file_name in file_names {
        let stem = &file_name[..file_name.len() - extension.len() - 1];
        let point_set_path = dir.join(format!("{}{}", stem, options.point_set_suffix));

        if !point_set_path.is_file() {
            if options.require_point_sets {
                return Err(Error::MissingCompanion {
                    model: file_name,
                    expected: point_set_path,
                });
            }
            warn!("Model {} has no point set at {}", file_name, point_set_path.display());
        }

        debug!("Discovered model {} ({})", file_name, point_set_path.display());
        entries.push(ModelEntry::new(
            file_name.as_str(),
            stem,
            dir.join(&file_name),
            point_set_path,
        ));
    }

    info!("Discovered {} models in {}", entries.len(), dir.display());
    Ok(ModelList::from_entries(entries))
}
