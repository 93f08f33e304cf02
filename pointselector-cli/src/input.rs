//! Console command parsing

use anyhow::{anyhow, bail, Result};
use pointselector_core::Point3d;

pub const HELP: &str = "\
Commands:
  place <x> <y> <z>          place the next landmark on the current model
  label <LABEL> <x> <y> <z>  place the landmark with the given label
  undo | u                   remove the last logged landmark
  next | n                   move to the next model
  status | s                 show session progress
  help | h                   show this help
  quit | q                   leave the session";

/// One line of console input
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleCommand {
    Place(Point3d),
    Label(String, Point3d),
    Undo,
    Next,
    Status,
    Help,
    Quit,
}

/// Parse a console line. Blank lines and `#` comments yield `None`.
pub fn parse_command(line: &str) -> Result<Option<ConsoleCommand>> {
    let mut words = line.split_whitespace();
    let keyword = match words.next() {
        Some(word) if !word.starts_with('#') => word.to_ascii_lowercase(),
        _ => return Ok(None),
    };
    let args: Vec<&str> = words.collect();

    let command = match keyword.as_str() {
        "place" | "p" => ConsoleCommand::Place(parse_position(&args)?),
        "label" | "l" => match args.split_first() {
            Some((label, rest)) => ConsoleCommand::Label(label.to_string(), parse_position(rest)?),
            None => bail!("usage: label <LABEL> <x> <y> <z>"),
        },
        "undo" | "u" => ConsoleCommand::Undo,
        "next" | "n" => ConsoleCommand::Next,
        "status" | "s" => ConsoleCommand::Status,
        "help" | "h" | "?" => ConsoleCommand::Help,
        "quit" | "q" | "exit" => ConsoleCommand::Quit,
        other => bail!("unknown command '{}', type 'help' for a list", other),
    };
    Ok(Some(command))
}

fn parse_position(args: &[&str]) -> Result<Point3d> {
    if args.len() != 3 {
        bail!("expected 3 coordinates, got {}", args.len());
    }
    let mut coords = [0.0; 3];
    for (coord, arg) in coords.iter_mut().zip(args) {
        *coord = arg
            .trim_matches(|c| c == ',' || c == '[' || c == ']')
            .parse::<f64>()
            .map_err(|_| anyhow!("'{}' is not a number", arg))?;
    }
    Ok(Point3d::from(coords))
}
