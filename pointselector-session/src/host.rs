//! The seam between a session and the application that renders it

use crate::state::SessionSummary;
use pointselector_core::{ModelEntry, Result};

/// Services the rendering application provides to a session.
///
/// The tracker calls these synchronously from whichever thread drives it.
/// A host must not feed `Command::SceneClosed` back for scene clears the
/// tracker itself requested through [`SceneHost::clear_scene`].
pub trait SceneHost {
    /// Remove every loaded model and point set from the scene
    fn clear_scene(&mut self);

    /// Load and display the surface model of `model`
    fn load_model(&mut self, model: &ModelEntry) -> Result<()>;

    /// Load the companion point set of `model`. A point set without control
    /// points should be prepared for `points_per_model` placements.
    fn load_point_set(&mut self, model: &ModelEntry, points_per_model: usize) -> Result<()>;

    /// Start delivering point-placement notifications for `model`,
    /// replacing any earlier subscription
    fn watch_point_placement(&mut self, model: &ModelEntry);

    /// Enter (persistent) or leave point placement mode
    fn set_place_mode(&mut self, enabled: bool);

    /// The last model has been processed
    fn session_completed(&mut self, summary: &SessionSummary);

    /// Show an error to the user
    fn show_error(&mut self, message: &str);
}
