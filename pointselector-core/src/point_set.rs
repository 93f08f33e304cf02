//! Point sets: the named landmark locations that accompany a model
//!
//! A point set is an ordered list of control points. Each control point has a
//! label and an optional position; a point without a position is "unset" and
//! waits to be placed by the user.

use crate::point::Point3d;
use serde::{Deserialize, Serialize};

/// Default label format, `%d` is replaced with the 1-based point number and
/// `%N` with the point set name
pub const DEFAULT_LABEL_FORMAT: &str = "P%d";

/// A single named landmark location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    pub label: String,
    pub position: Option<Point3d>,
}

impl ControlPoint {
    pub fn unset(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            position: None,
        }
    }

    pub fn placed(label: impl Into<String>, position: Point3d) -> Self {
        Self {
            label: label.into(),
            position: Some(position),
        }
    }

    pub fn is_placed(&self) -> bool {
        self.position.is_some()
    }
}

/// Ordered set of control points for one model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointSet {
    pub name: String,
    pub control_points: Vec<ControlPoint>,
    pub label_format: String,
    /// Upper bound on the number of control points, `None` for unbounded
    pub max_points: Option<usize>,
}

impl PointSet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            control_points: Vec::new(),
            label_format: DEFAULT_LABEL_FORMAT.to_string(),
            max_points: None,
        }
    }

    pub fn with_control_points(name: impl Into<String>, control_points: Vec<ControlPoint>) -> Self {
        Self {
            control_points,
            ..Self::new(name)
        }
    }

    pub fn len(&self) -> usize {
        self.control_points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.control_points.is_empty()
    }

    /// Replace the contents with `count` unset points labelled by the label
    /// format and cap the set at `count` points.
    pub fn initialize(&mut self, count: usize) {
        self.control_points = (1..=count)
            .map(|n| ControlPoint::unset(self.label_for(n)))
            .collect();
        self.max_points = Some(count);
    }

    /// Label for the 1-based point `number`
    pub fn label_for(&self, number: usize) -> String {
        format_label(&self.label_format.replace("%N", &self.name), number)
    }

    /// Index of the control point carrying `label`.
    pub fn find_by_label(&self, label: &str) -> Option<usize> {
        self.control_points.iter().position(|cp| cp.label == label)
    }

    /// Index of the first control point that has no position yet
    pub fn next_unset(&self) -> Option<usize> {
        self.control_points.iter().position(|cp| !cp.is_placed())
    }

    /// Number of control points that have a position
    pub fn placed_count(&self) -> usize {
        self.control_points.iter().filter(|cp| cp.is_placed()).count()
    }

    /// Set the position of the point at `index`. Returns `false` if the
    /// index is out of range.
    pub fn place(&mut self, index: usize, position: Point3d) -> bool {
        match self.control_points.get_mut(index) {
            Some(cp) => {
                cp.position = Some(position);
                true
            }
            None => false,
        }
    }

    /// Append a new placed point, labelled by the label format. Returns the
    /// new index, or `None` when the set is already at `max_points`.
    pub fn push(&mut self, position: Point3d) -> Option<usize> {
        if self.max_points.is_some_and(|max| self.control_points.len() >= max) {
            return None;
        }
        let index = self.control_points.len();
        let label = self.label_for(index + 1);
        self.control_points.push(ControlPoint::placed(label, position));
        Some(index)
    }

    /// Clear the position of the point at `index`, keeping its label
    pub fn unset(&mut self, index: usize) -> bool {
        match self.control_points.get_mut(index) {
            Some(cp) => {
                cp.position = None;
                true
            }
            None => false,
        }
    }
}

/// Expand a label format such as `P%d` for the given point number
pub fn format_label(format: &str, number: usize) -> String {
    if format.contains("%d") {
        format.replacen("%d", &number.to_string(), 1)
    } else {
        format!("{}{}", format, number)
    }
}
