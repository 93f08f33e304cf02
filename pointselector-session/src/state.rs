//! Session state

use pointselector_core::{ModelEntry, ModelList};
use pointselector_io::LandmarkLog;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Lifecycle of a session: `Uninitialized → Active → Completed`
#[derive(Debug)]
pub enum SessionState {
    Uninitialized,
    Active(ActiveSession),
    Completed(SessionSummary),
}

impl SessionState {
    /// Display name of the state
    pub fn name(&self) -> &'static str {
        match self {
            SessionState::Uninitialized => "Uninitialized",
            SessionState::Active(_) => "Active",
            SessionState::Completed(_) => "Completed",
        }
    }

    /// Whether a session is in progress
    pub fn is_active(&self) -> bool {
        matches!(self, SessionState::Active(_))
    }

    /// Whether every model has been visited
    pub fn is_completed(&self) -> bool {
        matches!(self, SessionState::Completed(_))
    }
}

/// A session in progress
#[derive(Debug)]
pub struct ActiveSession {
    pub(crate) directory: PathBuf,
    pub(crate) models: ModelList,
    /// Always a valid index into `models`
    pub(crate) cursor: usize,
    /// Rows logged for the current model
    pub(crate) placed: usize,
    pub(crate) points_per_model: usize,
    pub(crate) log: LandmarkLog,
    pub(crate) landmarks_logged: usize,
}

impl ActiveSession {
    pub(crate) fn new(
        directory: PathBuf,
        models: ModelList,
        points_per_model: usize,
        log: LandmarkLog,
    ) -> Self {
        Self {
            directory,
            models,
            cursor: 0,
            placed: 0,
            points_per_model,
            log,
            landmarks_logged: 0,
        }
    }

    /// Directory the models were discovered in
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Models of the session, in visiting order
    pub fn models(&self) -> &ModelList {
        &self.models
    }

    /// Index of the current model
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Landmarks logged for the current model
    pub fn placed(&self) -> usize {
        self.placed
    }

    /// Landmark budget per model
    pub fn points_per_model(&self) -> usize {
        self.points_per_model
    }

    /// The session's landmark log
    pub fn log(&self) -> &LandmarkLog {
        &self.log
    }

    /// The model at the cursor
    pub fn current_model(&self) -> &ModelEntry {
        &self.models[self.cursor]
    }

    pub(crate) fn summary(&self) -> SessionSummary {
        SessionSummary {
            directory: self.directory.clone(),
            models: self.models.len(),
            landmarks_logged: self.landmarks_logged,
            log_path: self.log.path().to_path_buf(),
        }
    }
}

/// What a finished session produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub directory: PathBuf,
    pub models: usize,
    pub landmarks_logged: usize,
    pub log_path: PathBuf,
}

/// Snapshot of session progress for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionProgress {
    pub state: String,
    pub cursor: Option<usize>,
    pub model_count: usize,
    pub current_model: Option<String>,
    pub placed: usize,
    pub points_per_model: usize,
    pub landmarks_logged: usize,
}

impl SessionProgress {
    pub(crate) fn from_state(state: &SessionState) -> Self {
        match state {
            SessionState::Uninitialized => Self {
                state: state.name().to_string(),
                cursor: None,
                model_count: 0,
                current_model: None,
                placed: 0,
                points_per_model: 0,
                landmarks_logged: 0,
            },
            SessionState::Active(session) => Self {
                state: state.name().to_string(),
                cursor: Some(session.cursor),
                model_count: session.models.len(),
                current_model: Some(session.current_model().file_name.clone()),
                placed: session.placed,
                points_per_model: session.points_per_model,
                landmarks_logged: session.landmarks_logged,
            },
            SessionState::Completed(summary) => Self {
                state: state.name().to_string(),
                cursor: None,
                model_count: summary.models,
                current_model: None,
                placed: 0,
                points_per_model: 0,
                landmarks_logged: summary.landmarks_logged,
            },
        }
    }
}
