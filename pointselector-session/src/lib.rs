//! Landmark placement sessions
//!
//! A session walks through the models of a directory one at a time. For each
//! model the user places up to a fixed number of landmark points; every
//! accepted placement is appended to the session's landmark log, and undo
//! removes the most recent row. The rendering application is reached only
//! through the [`SceneHost`] trait, and every host notification enters the
//! tracker as a [`Command`].
//!
//! ```no_run
//! use pointselector_session::{Command, LandmarkTracker, SessionConfig};
//! # use pointselector_session::{SceneHost, SessionSummary};
//! # use pointselector_core::{ModelEntry, Result};
//! # struct Viewer;
//! # impl SceneHost for Viewer {
//! #     fn clear_scene(&mut self) {}
//! #     fn load_model(&mut self, _: &ModelEntry) -> Result<()> { Ok(()) }
//! #     fn load_point_set(&mut self, _: &ModelEntry, _: usize) -> Result<()> { Ok(()) }
//! #     fn watch_point_placement(&mut self, _: &ModelEntry) {}
//! #     fn set_place_mode(&mut self, _: bool) {}
//! #     fn session_completed(&mut self, _: &SessionSummary) {}
//! #     fn show_error(&mut self, _: &str) {}
//! # }
//! let mut tracker = LandmarkTracker::new(Viewer, SessionConfig::default());
//! tracker.handle(Command::Start { directory: "cases/".into(), points_per_model: 3 });
//! tracker.handle(Command::PointPlaced { index: 0, position: [1.0, 2.0, 3.0].into() });
//! tracker.handle(Command::NextModel);
//! ```

pub mod config;
pub mod error;
pub mod host;
pub mod state;
pub mod command;
pub mod tracker;

pub use command::{Command, IgnoreReason, Outcome};
pub use config::SessionConfig;
pub use error::{ErrorKind, SessionError};
pub use host::SceneHost;
pub use state::{ActiveSession, SessionProgress, SessionState, SessionSummary};
pub use tracker::LandmarkTracker;
