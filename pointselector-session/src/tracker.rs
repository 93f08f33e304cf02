//! Landmark session tracker
//!
//! Implements the session state machine. Every host notification maps to
//! exactly one transition function; each returns an [`Outcome`] and never
//! panics or exits. Failures are shown through [`SceneHost::show_error`] and
//! leave the counter untouched, so the number of log rows for the current
//! model always equals the placed-point counter.

use crate::command::{Command, IgnoreReason, Outcome};
use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::host::SceneHost;
use crate::state::{ActiveSession, SessionProgress, SessionState};
use log::{debug, error, info, warn};
use pointselector_core::{Error, LandmarkRecord, ModelEntry, Point3d};
use pointselector_io::{discover_models, write_manifest, LandmarkLog};
use std::path::Path;

/// Drives one landmark session against a host
pub struct LandmarkTracker<H: SceneHost> {
    host: H,
    config: SessionConfig,
    state: SessionState,
}

impl<H: SceneHost> LandmarkTracker<H> {
    /// Create an uninitialized tracker
    pub fn new(host: H, config: SessionConfig) -> Self {
        Self {
            host,
            config,
            state: SessionState::Uninitialized,
        }
    }

    /// The host this tracker drives
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host, for delivering its own UI actions
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Consume the tracker and hand back the host
    pub fn into_host(self) -> H {
        self.host
    }

    /// Configuration of the current (or next) session
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Current lifecycle state
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The active session, if any
    pub fn session(&self) -> Option<&ActiveSession> {
        match &self.state {
            SessionState::Active(session) => Some(session),
            _ => None,
        }
    }

    /// Snapshot of where the session stands
    pub fn progress(&self) -> SessionProgress {
        SessionProgress::from_state(&self.state)
    }

    /// Dispatch a host command to its transition
    pub fn handle(&mut self, command: Command) -> Outcome {
        debug!("Handling {:?} in state {}", command, self.state.name());
        match command {
            Command::Start {
                directory,
                points_per_model,
            } => self.start_session(directory, points_per_model),
            Command::PointPlaced { index, position } => self.on_point_placed(index, position),
            Command::Undo => self.undo(),
            Command::NextModel => self.advance_to_next_model(),
            Command::SceneClosed => self.on_scene_closed(),
        }
    }

    /// Discover the models of `directory`, write the manifest, create the
    /// landmark log and load the first model.
    pub fn start_session<P: AsRef<Path>>(&mut self, directory: P, points_per_model: usize) -> Outcome {
        if !matches!(self.state, SessionState::Uninitialized) {
            let state = self.state.name();
            warn!("Ignoring session start: session is already {}", state);
            return Outcome::Ignored(IgnoreReason::AlreadyStarted { state });
        }

        match self.try_start(directory.as_ref(), points_per_model) {
            Ok(session) => {
                let models = session.models.len();
                info!(
                    "Session started in {}: {} models, {} points per model",
                    session.directory.display(),
                    models,
                    points_per_model
                );
                self.state = SessionState::Active(session);
                Outcome::Started { models }
            }
            Err(e) => report(&mut self.host, e),
        }
    }

    fn try_start(&mut self, directory: &Path, points_per_model: usize) -> Result<ActiveSession, SessionError> {
        let config = self.config.clone().with_points_per_model(points_per_model);
        config.validate()?;

        let options = config.discovery_options();
        let models = discover_models(directory, &options)?;
        let first = models.get(0).ok_or_else(|| Error::EmptyModelDirectory {
            path: directory.to_path_buf(),
            extension: options.model_extension.clone(),
        })?;
        write_manifest(directory.join(&config.manifest_file_name), &models)?;

        // The previous log is only truncated once the first model is on screen
        load_model(&mut self.host, first, points_per_model)?;
        let log = match LandmarkLog::create(directory.join(&config.landmark_file_name)) {
            Ok(log) => log,
            Err(e) => {
                self.host.clear_scene();
                return Err(e.into());
            }
        };

        let session = ActiveSession::new(directory.to_path_buf(), models, points_per_model, log);
        self.host.set_place_mode(true);

        self.config = config;
        Ok(session)
    }

    /// Log a completed placement on the current model, up to the point
    /// budget. Extra placements are dropped.
    pub fn on_point_placed(&mut self, index: usize, position: Point3d) -> Outcome {
        let session = match &mut self.state {
            SessionState::Active(session) => session,
            other => return not_active(other, "point placement"),
        };

        if session.placed >= session.points_per_model {
            info!(
                "{} already has {} points, not logging point {}",
                session.current_model().file_name,
                session.points_per_model,
                index
            );
            return Outcome::Ignored(IgnoreReason::BudgetReached {
                points_per_model: session.points_per_model,
            });
        }

        let record = LandmarkRecord::new(session.current_model().file_name.as_str(), index, position);
        if let Err(e) = session.log.append(&record) {
            return report(&mut self.host, e.into());
        }

        session.placed += 1;
        session.landmarks_logged += 1;
        debug!(
            "Logged point {} on {} ({}/{})",
            index, record.model, session.placed, session.points_per_model
        );
        Outcome::Logged(record)
    }

    /// Remove the most recently logged point of the current model
    pub fn undo(&mut self) -> Outcome {
        let session = match &mut self.state {
            SessionState::Active(session) => session,
            other => return not_active(other, "undo"),
        };

        if session.placed == 0 {
            info!("Nothing to undo for {}", session.current_model().file_name);
            return Outcome::Ignored(IgnoreReason::NothingToUndo);
        }

        match session.log.pop_last() {
            Ok(Some(record)) => {
                session.placed -= 1;
                session.landmarks_logged -= 1;
                debug!(
                    "Removed point {} on {} ({}/{})",
                    record.index, record.model, session.placed, session.points_per_model
                );
                Outcome::Retracted(record)
            }
            Ok(None) => {
                let message = format!(
                    "{} has no rows but {} points are counted",
                    session.log.path().display(),
                    session.placed
                );
                report(&mut self.host, SessionError::LogOutOfSync(message))
            }
            Err(e) => report(&mut self.host, e.into()),
        }
    }

    /// Move to the next model, or complete the session after the last one
    pub fn advance_to_next_model(&mut self) -> Outcome {
        let session = match &mut self.state {
            SessionState::Active(session) => session,
            other => return not_active(other, "next model"),
        };

        session.cursor += 1;
        session.placed = 0;

        if session.cursor >= session.models.len() {
            let summary = session.summary();
            info!(
                "Session complete: {} models, {} landmarks logged to {}",
                summary.models,
                summary.landmarks_logged,
                summary.log_path.display()
            );
            self.host.set_place_mode(false);
            self.host.session_completed(&summary);
            self.state = SessionState::Completed(summary.clone());
            return Outcome::Completed(summary);
        }

        let cursor = session.cursor;
        let points_per_model = session.points_per_model;
        info!(
            "Switching to model {}/{}: {}",
            cursor + 1,
            session.models.len(),
            session.current_model().file_name
        );

        self.host.clear_scene();
        if let Err(e) = load_model(&mut self.host, session.current_model(), points_per_model) {
            return report(&mut self.host, e);
        }
        Outcome::Advanced { cursor }
    }

    /// Reload the current model after the host scene was closed
    pub fn on_scene_closed(&mut self) -> Outcome {
        let session = match &self.state {
            SessionState::Active(session) => session,
            other => return not_active(other, "scene reload"),
        };

        info!("Scene closed, reloading {}", session.current_model().file_name);
        match load_model(&mut self.host, session.current_model(), session.points_per_model) {
            Ok(()) => Outcome::Reloaded,
            Err(e) => report(&mut self.host, e),
        }
    }
}

fn load_model<H: SceneHost>(host: &mut H, model: &ModelEntry, points_per_model: usize) -> Result<(), SessionError> {
    let wrap = |source| SessionError::HostLoad {
        model: model.file_name.clone(),
        source,
    };
    host.load_model(model).map_err(wrap)?;
    host.load_point_set(model, points_per_model).map_err(wrap)?;
    host.watch_point_placement(model);
    Ok(())
}

fn report<H: SceneHost>(host: &mut H, e: SessionError) -> Outcome {
    error!("{}", e);
    host.show_error(&e.to_string());
    Outcome::Failed(e)
}

fn not_active(state: &SessionState, operation: &str) -> Outcome {
    warn!("Ignoring {}: session is {}", operation, state.name());
    Outcome::Ignored(IgnoreReason::NotActive { state: state.name() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::SessionSummary;
    use pointselector_core::Result;

    #[derive(Default)]
    struct CountingHost {
        loads: usize,
        errors: Vec<String>,
    }

    impl SceneHost for CountingHost {
        fn clear_scene(&mut self) {}
        fn load_model(&mut self, _model: &ModelEntry) -> Result<()> {
            self.loads += 1;
            Ok(())
        }
        fn load_point_set(&mut self, _model: &ModelEntry, _points_per_model: usize) -> Result<()> {
            Ok(())
        }
        fn watch_point_placement(&mut self, _model: &ModelEntry) {}
        fn set_place_mode(&mut self, _enabled: bool) {}
        fn session_completed(&mut self, _summary: &SessionSummary) {}
        fn show_error(&mut self, message: &str) {
            self.errors.push(message.to_string());
        }
    }

    fn tracker() -> LandmarkTracker<CountingHost> {
        LandmarkTracker::new(CountingHost::default(), SessionConfig::default())
    }

    #[test]
    fn test_commands_before_start_are_ignored() {
        let mut tracker = tracker();

        for command in [
            Command::PointPlaced {
                index: 0,
                position: Point3d::origin(),
            },
            Command::Undo,
            Command::NextModel,
            Command::SceneClosed,
        ] {
            match tracker.handle(command) {
                Outcome::Ignored(IgnoreReason::NotActive { state }) => assert_eq!(state, "Uninitialized"),
                other => panic!("unexpected outcome: {:?}", other),
            }
        }

        assert!(matches!(tracker.state(), SessionState::Uninitialized));
        assert!(tracker.host().errors.is_empty());
        assert_eq!(tracker.host().loads, 0);
    }

    #[test]
    fn test_zero_budget_is_a_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut tracker = tracker();

        let outcome = tracker.start_session(dir.path(), 0);
        match outcome {
            Outcome::Failed(e) => assert!(matches!(e, SessionError::InvalidPointBudget)),
            other => panic!("unexpected outcome: {:?}", other),
        }
        assert_eq!(tracker.host().errors.len(), 1);
        assert!(matches!(tracker.state(), SessionState::Uninitialized));
        assert!(!dir.path().join("landmarks.csv").exists());
    }

    #[test]
    fn test_progress_before_start() {
        let progress = tracker().progress();
        assert_eq!(progress.state, "Uninitialized");
        assert_eq!(progress.cursor, None);
        assert_eq!(progress.model_count, 0);
    }
}
