//! Session configuration

use crate::error::SessionError;
use pointselector_io::DiscoveryOptions;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Settings for a landmark session. Every field has a default, so a config
/// file only needs the values it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Landmarks to log per model
    pub points_per_model: usize,
    /// Model file extension, without the leading dot
    pub model_extension: String,
    /// Appended to the model stem to find its point set
    pub point_set_suffix: String,
    /// Manifest file written into the model directory
    pub manifest_file_name: String,
    /// Landmark log written into the model directory
    pub landmark_file_name: String,
    /// Refuse to start when a model has no point set
    pub require_point_sets: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            points_per_model: 3,
            model_extension: "ply".to_string(),
            point_set_suffix: ".mrk.json".to_string(),
            manifest_file_name: "models_ids.csv".to_string(),
            landmark_file_name: "landmarks.csv".to_string(),
            require_point_sets: true,
        }
    }
}

impl SessionConfig {
    /// Load a JSON config file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, SessionError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(pointselector_core::Error::from)?;
        serde_json::from_reader(BufReader::new(file))
            .map_err(|e| SessionError::InvalidConfig(format!("{}: {}", path.display(), e)))
    }

    pub fn with_points_per_model(mut self, points_per_model: usize) -> Self {
        self.points_per_model = points_per_model;
        self
    }

    pub fn validate(&self) -> Result<(), SessionError> {
        if self.points_per_model == 0 {
            return Err(SessionError::InvalidPointBudget);
        }
        if self.model_extension.trim_start_matches('.').is_empty() {
            return Err(SessionError::InvalidConfig("model extension is empty".to_string()));
        }
        if self.point_set_suffix.is_empty() {
            return Err(SessionError::InvalidConfig("point set suffix is empty".to_string()));
        }
        if self.manifest_file_name.is_empty() || self.landmark_file_name.is_empty() {
            return Err(SessionError::InvalidConfig("output file names must not be empty".to_string()));
        }
        if self.manifest_file_name == self.landmark_file_name {
            return Err(SessionError::InvalidConfig(
                "manifest and landmark log must be different files".to_string(),
            ));
        }
        Ok(())
    }

    pub fn discovery_options(&self) -> DiscoveryOptions {
        DiscoveryOptions {
            model_extension: self.model_extension.clone(),
            point_set_suffix: self.point_set_suffix.clone(),
            require_point_sets: self.require_point_sets,
        }
    }
}
