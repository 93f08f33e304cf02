//! Markups JSON point sets (`.mrk.json`)
//!
//! Only the first markup of a document is read. Positions stored in the LPS
//! coordinate system are converted to RAS.

use crate::PointSetReader;
use log::debug;
use pointselector_core::{ControlPoint, Error, Point3d, PointSet, Result, DEFAULT_LABEL_FORMAT};
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct MarkupsDocument {
    #[serde(default)]
    markups: Vec<Markup>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Markup {
    #[serde(default = "default_coordinate_system")]
    coordinate_system: String,
    #[serde(default)]
    label_format: Option<String>,
    #[serde(default)]
    control_points: Vec<MarkupControlPoint>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MarkupControlPoint {
    #[serde(default)]
    label: String,
    #[serde(default)]
    position: Option<[f64; 3]>,
    #[serde(default)]
    position_status: Option<String>,
}

fn default_coordinate_system() -> String {
    "LPS".to_string()
}

pub struct MarkupsJsonReader;

impl MarkupsJsonReader {
    /// Parse a markups document from a string. `name` becomes the point set
    /// name.
    pub fn parse_str(name: &str, json: &str) -> Result<PointSet> {
        let document: MarkupsDocument =
            serde_json::from_str(json).map_err(|e| Error::Serialization(e.to_string()))?;
        Self::convert(name, document)
    }

    fn convert(name: &str, document: MarkupsDocument) -> Result<PointSet> {
        let mut point_set = PointSet::new(name);
        let markup = match document.markups.into_iter().next() {
            Some(markup) => markup,
            None => return Ok(point_set),
        };

        let flip = match markup.coordinate_system.to_ascii_uppercase().as_str() {
            "LPS" => true,
            "RAS" => false,
            other => {
                return Err(Error::InvalidData(format!(
                    "Unknown coordinate system: {}",
                    other
                )))
            }
        };

        point_set.label_format = markup
            .label_format
            .unwrap_or_else(|| DEFAULT_LABEL_FORMAT.to_string());
        point_set.control_points = markup
            .control_points
            .into_iter()
            .map(|cp| {
                let defined = cp
                    .position_status
                    .as_deref()
                    .map_or(true, |status| status == "defined");
                let position = cp.position.filter(|_| defined).map(|[x, y, z]| {
                    if flip {
                        Point3d::new(-x, -y, z)
                    } else {
                        Point3d::new(x, y, z)
                    }
                });
                ControlPoint {
                    label: cp.label,
                    position,
                }
            })
            .collect();

        Ok(point_set)
    }
}

impl PointSetReader for MarkupsJsonReader {
    fn read_point_set<P: AsRef<Path>>(path: P) -> Result<PointSet> {
        let path = path.as_ref();
        let name = point_set_name(path);
        let reader = BufReader::new(File::open(path)?);
        let document: MarkupsDocument =
            serde_json::from_reader(reader).map_err(|e| Error::Serialization(e.to_string()))?;

        let point_set = Self::convert(&name, document)?;
        debug!(
            "Read point set {} with {} control points ({} placed)",
            point_set.name,
            point_set.len(),
            point_set.placed_count()
        );
        Ok(point_set)
    }
}

/// File name with everything from the first dot removed
fn point_set_name(path: &Path) -> String {
    let file_name = path.file_name().and_then(|s| s.to_str()).unwrap_or_default();
    file_name
        .split_once('.')
        .map_or(file_name, |(stem, _)| stem)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const DOCUMENT: &str = r#"{
        "markups": [
            {
                "type": "Fiducial",
                "coordinateSystem": "LPS",
                "labelFormat": "P%d",
                "controlPoints": [
                    { "id": "1", "label": "P1", "position": [10.0, -4.0, 2.5], "positionStatus": "defined" },
                    { "id": "2", "label": "P2", "position": [0.0, 0.0, 0.0], "positionStatus": "undefined" },
                    { "id": "3", "label": "P3" }
                ]
            }
        ]
    }"#;

    #[test]
    fn test_parse_lps_document() {
        let set = MarkupsJsonReader::parse_str("case1", DOCUMENT).unwrap();
        assert_eq!(set.name, "case1");
        assert_eq!(set.len(), 3);
        assert_eq!(set.control_points[0].position, Some(Point3d::new(-10.0, 4.0, 2.5)));
        assert_eq!(set.control_points[1].position, None);
        assert_eq!(set.control_points[2].position, None);
        assert_eq!(set.placed_count(), 1);
        assert_eq!(set.find_by_label("P2"), Some(1));
    }

    #[test]
    fn test_parse_ras_document() {
        let json = r#"{"markups":[{"coordinateSystem":"RAS","controlPoints":[{"label":"tip","position":[1.0,2.0,3.0]}]}]}"#;
        let set = MarkupsJsonReader::parse_str("case1", json).unwrap();
        assert_eq!(set.control_points[0].position, Some(Point3d::new(1.0, 2.0, 3.0)));
        assert_eq!(set.label_format, DEFAULT_LABEL_FORMAT);
    }

    #[test]
    fn test_parse_empty_document() {
        let set = MarkupsJsonReader::parse_str("case1", r#"{"markups": []}"#).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            MarkupsJsonReader::parse_str("case1", "{ not json"),
            Err(Error::Serialization(_))
        ));
        let json = r#"{"markups":[{"coordinateSystem":"XYZ","controlPoints":[]}]}"#;
        assert!(matches!(
            MarkupsJsonReader::parse_str("case1", json),
            Err(Error::InvalidData(_))
        ));
    }

    #[test]
    fn test_read_point_set_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("femur_07.mrk.json");
        fs::write(&path, DOCUMENT).unwrap();

        let set = crate::read_point_set(&path).unwrap();
        assert_eq!(set.name, "femur_07");
        assert_eq!(set.len(), 3);
    }
}
