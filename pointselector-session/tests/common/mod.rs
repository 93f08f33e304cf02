#![allow(dead_code)]

use pointselector_core::{Error, ModelEntry, Result};
use pointselector_session::{SceneHost, SessionSummary};
use std::fs;
use std::path::Path;

const TRIANGLE_PLY: &str = "ply\nformat ascii 1.0\nelement vertex 3\nproperty float x\nproperty float y\nproperty float z\nelement face 1\nproperty list uchar int vertex_indices\nend_header\n0 0 0\n1 0 0\n0 1 0\n3 0 1 2\n";

const EMPTY_MARKUPS: &str = r#"{"markups":[{"type":"Fiducial","coordinateSystem":"LPS","controlPoints":[]}]}"#;

/// Everything the tracker asked of the host, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    ClearScene,
    LoadModel(String),
    LoadPointSet(String, usize),
    Watch(String),
    PlaceMode(bool),
    Completed(usize),
    Error(String),
}

#[derive(Default)]
pub struct RecordingHost {
    pub calls: Vec<HostCall>,
    /// Model file names whose load should fail
    pub fail_loads: Vec<String>,
}

impl RecordingHost {
    pub fn errors(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                HostCall::Error(message) => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn loaded_models(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                HostCall::LoadModel(name) => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, call: &HostCall) -> usize {
        self.calls.iter().filter(|c| *c == call).count()
    }
}

impl SceneHost for RecordingHost {
    fn clear_scene(&mut self) {
        self.calls.push(HostCall::ClearScene);
    }

    fn load_model(&mut self, model: &ModelEntry) -> Result<()> {
        if self.fail_loads.contains(&model.file_name) {
            return Err(Error::InvalidData("corrupt model".to_string()));
        }
        self.calls.push(HostCall::LoadModel(model.file_name.clone()));
        Ok(())
    }

    fn load_point_set(&mut self, model: &ModelEntry, points_per_model: usize) -> Result<()> {
        self.calls
            .push(HostCall::LoadPointSet(model.stem.clone(), points_per_model));
        Ok(())
    }

    fn watch_point_placement(&mut self, model: &ModelEntry) {
        self.calls.push(HostCall::Watch(model.file_name.clone()));
    }

    fn set_place_mode(&mut self, enabled: bool) {
        self.calls.push(HostCall::PlaceMode(enabled));
    }

    fn session_completed(&mut self, summary: &SessionSummary) {
        self.calls.push(HostCall::Completed(summary.landmarks_logged));
    }

    fn show_error(&mut self, message: &str) {
        self.calls.push(HostCall::Error(message.to_string()));
    }
}

/// Write `count` models (`case_0.ply`, ...) with their point sets into `dir`
pub fn write_models(dir: &Path, count: usize) {
    for i in 0..count {
        fs::write(dir.join(format!("case_{}.ply", i)), TRIANGLE_PLY).unwrap();
        fs::write(dir.join(format!("case_{}.mrk.json", i)), EMPTY_MARKUPS).unwrap();
    }
}

/// Data rows of the landmark log, as raw lines
pub fn log_lines(dir: &Path) -> Vec<String> {
    fs::read_to_string(dir.join("landmarks.csv"))
        .unwrap()
        .lines()
        .skip(1)
        .map(str::to_string)
        .collect()
}

/// Data rows of the log that belong to `model`
pub fn rows_for(dir: &Path, model: &str) -> usize {
    log_lines(dir)
        .iter()
        .filter(|line| line.starts_with(&format!("{},", model)))
        .count()
}

pub fn init_logging() {
    env_logger::try_init().ok();
}
