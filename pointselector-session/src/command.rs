//! Inbound commands and their outcomes

use crate::error::SessionError;
use crate::state::SessionSummary;
use pointselector_core::{LandmarkRecord, Point3d};
use std::path::PathBuf;

/// A notification or user command delivered by the host
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Start/apply: begin a session over `directory`
    Start {
        directory: PathBuf,
        points_per_model: usize,
    },
    /// A point placement finished on the current model
    PointPlaced { index: usize, position: Point3d },
    /// Remove the most recently logged point
    Undo,
    /// Move on to the next model (the keyboard shortcut)
    NextModel,
    /// The host scene was closed behind the session's back
    SceneClosed,
}

/// Why a command changed nothing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The command needs an active session
    NotActive { state: &'static str },
    /// A session was already started on this tracker
    AlreadyStarted { state: &'static str },
    /// The current model already has its full set of landmarks
    BudgetReached { points_per_model: usize },
    /// No landmark has been logged for the current model
    NothingToUndo,
}

/// Result of handling one command
#[derive(Debug)]
pub enum Outcome {
    Started { models: usize },
    Logged(LandmarkRecord),
    Retracted(LandmarkRecord),
    Advanced { cursor: usize },
    Reloaded,
    Completed(SessionSummary),
    Ignored(IgnoreReason),
    /// The command failed; the error was already shown by the host
    Failed(SessionError),
}

impl Outcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }

    pub fn is_ignored(&self) -> bool {
        matches!(self, Outcome::Ignored(_))
    }
}
