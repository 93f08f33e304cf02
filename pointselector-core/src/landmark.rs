//! Landmark log records

use crate::point::{format_position, parse_position, Point3d};
use serde::{Deserialize, Serialize};

/// Header columns of the landmark log
pub const LANDMARK_COLUMNS: [&str; 3] = ["FileName", "Index_no", "Position/Location-x,y,z"];

/// One logged placement: which model, which point, where
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandmarkRecord {
    /// Model file name the point was placed on
    pub model: String,
    /// Index of the point within the model's point set
    pub index: usize,
    pub position: Point3d,
}

impl LandmarkRecord {
    pub fn new(model: impl Into<String>, index: usize, position: Point3d) -> Self {
        Self {
            model: model.into(),
            index,
            position,
        }
    }

    /// Field values in column order, unescaped
    pub fn fields(&self) -> [String; 3] {
        [
            self.model.clone(),
            self.index.to_string(),
            format_position(&self.position),
        ]
    }

    /// Rebuild a record from unescaped field values
    pub fn from_fields(fields: &[String]) -> Option<Self> {
        match fields {
            [model, index, position] => Some(Self {
                model: model.clone(),
                index: index.trim().parse().ok()?,
                position: parse_position(position)?,
            }),
            _ => None,
        }
    }
}
