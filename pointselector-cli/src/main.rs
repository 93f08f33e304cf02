//! pointselector - landmark placement sessions from the console
//!
//! Starts a session over a directory of surface models and reads placement
//! commands from stdin, one per line. Set `RUST_LOG=debug` for a trace of
//! every session transition.

mod console_host;
mod input;

use anyhow::{bail, Context, Result};
use clap::Parser;
use console_host::ConsoleHost;
use input::{parse_command, ConsoleCommand, HELP};
use log::info;
use pointselector_core::format_position;
use pointselector_session::{Command, IgnoreReason, LandmarkTracker, Outcome, SessionConfig};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pointselector")]
#[command(about = "Place landmark points on every model of a directory")]
struct Args {
    /// Directory holding the surface models
    directory: PathBuf,

    /// Landmarks to place per model
    #[arg(short, long)]
    points: Option<usize>,

    /// JSON session config; flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Model file extension
    #[arg(short, long)]
    extension: Option<String>,

    /// Suffix of each model's point set file
    #[arg(long)]
    point_set_suffix: Option<String>,

    /// Start even when some models have no point set file
    #[arg(long)]
    allow_missing_point_sets: bool,
}

impl Args {
    fn session_config(&self) -> Result<SessionConfig> {
        let mut config = match &self.config {
            Some(path) => SessionConfig::from_json_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => SessionConfig::default(),
        };
        if let Some(points) = self.points {
            config.points_per_model = points;
        }
        if let Some(extension) = &self.extension {
            config.model_extension = extension.trim_start_matches('.').to_string();
        }
        if let Some(suffix) = &self.point_set_suffix {
            config.point_set_suffix = suffix.clone();
        }
        if self.allow_missing_point_sets {
            config.require_point_sets = false;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = args.session_config()?;
    let points_per_model = config.points_per_model;
    let mut tracker = LandmarkTracker::new(ConsoleHost::new(), config);

    match tracker.start_session(&args.directory, points_per_model) {
        Outcome::Started { models } => {
            println!(
                "{} models in {}, {} points each. Type 'help' for commands.",
                models,
                args.directory.display(),
                points_per_model
            );
        }
        Outcome::Failed(e) => {
            return Err(e).with_context(|| format!("Cannot start a session in {}", args.directory.display()));
        }
        other => bail!("Unexpected start outcome: {:?}", other),
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    run(&mut tracker, stdin.lock(), &mut stdout.lock())?;

    if tracker.host().summary().is_none() {
        println!("Session left unfinished, landmarks so far are in {}", args.directory.display());
    }
    Ok(())
}

/// Feed console lines to the tracker until `quit`, end of input or the
/// session completes.
fn run<R: BufRead, W: Write>(tracker: &mut LandmarkTracker<ConsoleHost>, input: R, out: &mut W) -> Result<()> {
    for line in input.lines() {
        let line = line.context("Failed to read console input")?;
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                writeln!(out, "{}", e)?;
                continue;
            }
        };

        let outcome = match command {
            ConsoleCommand::Place(position) => match tracker.host_mut().place_next(position) {
                Some(index) => tracker.handle(Command::PointPlaced { index, position }),
                None => {
                    writeln!(out, "Placement mode is off")?;
                    continue;
                }
            },
            ConsoleCommand::Label(label, position) => match tracker.host_mut().place_label(&label, position) {
                Ok(index) => tracker.handle(Command::PointPlaced { index, position }),
                Err(message) => {
                    writeln!(out, "{}", message)?;
                    continue;
                }
            },
            ConsoleCommand::Undo => {
                let outcome = tracker.handle(Command::Undo);
                if let Outcome::Retracted(record) = &outcome {
                    tracker.host_mut().retract(record);
                }
                outcome
            }
            ConsoleCommand::Next => tracker.handle(Command::NextModel),
            ConsoleCommand::Status => {
                let progress = serde_json::to_string_pretty(&tracker.progress())?;
                writeln!(out, "{}", progress)?;
                if let Some(model) = tracker.host().model() {
                    writeln!(out, "Surface: {} vertices, {} faces", model.vertex_count(), model.face_count())?;
                }
                if let Some(point_set) = tracker.host().point_set() {
                    for cp in &point_set.control_points {
                        let position = cp.position.as_ref().map(format_position);
                        writeln!(out, "  {}: {}", cp.label, position.as_deref().unwrap_or("unset"))?;
                    }
                }
                if let Some(session) = tracker.session() {
                    let current = &session.current_model().file_name;
                    match session.log().rows() {
                        Ok(rows) => {
                            for row in rows.iter().filter(|row| &row.model == current) {
                                writeln!(out, "Logged #{} {}", row.index, format_position(&row.position))?;
                            }
                        }
                        Err(e) => writeln!(out, "Cannot read the landmark log: {}", e)?,
                    }
                }
                continue;
            }
            ConsoleCommand::Help => {
                writeln!(out, "{}", HELP)?;
                continue;
            }
            ConsoleCommand::Quit => break,
        };

        if let Some(message) = describe(&outcome, tracker) {
            writeln!(out, "{}", message)?;
        }
        if tracker.state().is_completed() {
            break;
        }
    }

    info!("Leaving session in state {}", tracker.state().name());
    Ok(())
}

/// One-line report of an outcome. Failures were already shown by the host.
fn describe(outcome: &Outcome, tracker: &LandmarkTracker<ConsoleHost>) -> Option<String> {
    let counter = tracker
        .session()
        .map(|s| format!(" ({}/{})", s.placed(), s.points_per_model()))
        .unwrap_or_default();

    let message = match outcome {
        Outcome::Logged(record) => format!(
            "Logged point {} at {} on {}{}",
            record.index,
            format_position(&record.position),
            record.model,
            counter
        ),
        Outcome::Retracted(record) => format!("Removed point {} on {}{}", record.index, record.model, counter),
        Outcome::Advanced { .. } => {
            let session = tracker.session()?;
            format!(
                "Model {}/{}: {}",
                session.cursor() + 1,
                session.models().len(),
                session.current_model().file_name
            )
        }
        Outcome::Ignored(IgnoreReason::BudgetReached { points_per_model }) => {
            format!("All {} points placed, type 'next' to continue", points_per_model)
        }
        Outcome::Ignored(IgnoreReason::NothingToUndo) => "Nothing to undo".to_string(),
        Outcome::Ignored(reason) => format!("Ignored: {:?}", reason),
        Outcome::Started { .. } | Outcome::Reloaded | Outcome::Completed(_) | Outcome::Failed(_) => return None,
    };
    Some(message)
}
