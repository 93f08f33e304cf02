//! A headless host: loads models and point sets from disk and keeps the
//! placement state that a viewer would otherwise own.

use log::{info, warn};
use pointselector_core::{LandmarkRecord, ModelEntry, Point3d, PointSet, Result, SurfaceModel};
use pointselector_io::{read_model, read_point_set};
use pointselector_session::{SceneHost, SessionSummary};

#[derive(Debug, Default)]
pub struct ConsoleHost {
    model: Option<SurfaceModel>,
    point_set: Option<PointSet>,
    /// Model whose placements are delivered to the tracker
    watching: Option<String>,
    place_mode: bool,
    summary: Option<SessionSummary>,
}

impl ConsoleHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn model(&self) -> Option<&SurfaceModel> {
        self.model.as_ref()
    }

    pub fn point_set(&self) -> Option<&PointSet> {
        self.point_set.as_ref()
    }

    pub fn summary(&self) -> Option<&SessionSummary> {
        self.summary.as_ref()
    }

    fn accepting(&self) -> bool {
        self.place_mode && self.watching.is_some()
    }

    /// Place the next unset control point. Returns the point index to report,
    /// or `None` when placements are not being delivered.
    pub fn place_next(&mut self, position: Point3d) -> Option<usize> {
        if !self.accepting() {
            return None;
        }
        let point_set = self.point_set.get_or_insert_with(|| PointSet::new("landmarks"));
        let index = match point_set.next_unset() {
            Some(index) => {
                point_set.place(index, position);
                index
            }
            // A full set still reports the click; the tracker drops extras
            None => point_set.push(position).unwrap_or(point_set.len()),
        };
        Some(index)
    }

    /// Place the control point carrying `label`
    pub fn place_label(&mut self, label: &str, position: Point3d) -> std::result::Result<usize, String> {
        if !self.accepting() {
            return Err("Placement mode is off".to_string());
        }
        let point_set = self
            .point_set
            .as_mut()
            .ok_or_else(|| "No point set loaded".to_string())?;
        match point_set.find_by_label(label) {
            Some(index) => {
                point_set.place(index, position);
                Ok(index)
            }
            None => Err(format!("Point {} not found.", label)),
        }
    }

    /// Clear the control point behind a retracted log row
    pub fn retract(&mut self, record: &LandmarkRecord) {
        if self.watching.as_deref() != Some(record.model.as_str()) {
            return;
        }
        if let Some(point_set) = self.point_set.as_mut() {
            point_set.unset(record.index);
        }
    }
}

impl SceneHost for ConsoleHost {
    fn clear_scene(&mut self) {
        self.model = None;
        self.point_set = None;
        self.watching = None;
    }

    fn load_model(&mut self, model: &ModelEntry) -> Result<()> {
        let surface = read_model(&model.model_path)?;
        match surface.bounding_box() {
            Some((min, max)) => info!(
                "{}: {} vertices, {} faces, bounds [{:.2}, {:.2}, {:.2}] - [{:.2}, {:.2}, {:.2}]",
                model.file_name,
                surface.vertex_count(),
                surface.face_count(),
                min.x,
                min.y,
                min.z,
                max.x,
                max.y,
                max.z
            ),
            None => warn!("{} has no vertices", model.file_name),
        }
        println!(
            "Loaded {} ({} vertices, {} faces)",
            model.file_name,
            surface.vertex_count(),
            surface.face_count()
        );
        self.model = Some(surface);
        Ok(())
    }

    fn load_point_set(&mut self, model: &ModelEntry, points_per_model: usize) -> Result<()> {
        let mut point_set = if model.point_set_path.is_file() {
            read_point_set(&model.point_set_path)?
        } else {
            warn!("{} has no point set, starting an empty one", model.file_name);
            PointSet::new(model.stem.as_str())
        };

        if point_set.is_empty() {
            point_set.initialize(points_per_model);
        }
        let labels: Vec<&str> = point_set
            .control_points
            .iter()
            .map(|cp| cp.label.as_str())
            .collect();
        println!("Points: {}", labels.join(", "));

        self.point_set = Some(point_set);
        Ok(())
    }

    fn watch_point_placement(&mut self, model: &ModelEntry) {
        self.watching = Some(model.file_name.clone());
    }

    fn set_place_mode(&mut self, enabled: bool) {
        self.place_mode = enabled;
    }

    fn session_completed(&mut self, summary: &SessionSummary) {
        println!(
            "All {} models done, {} landmarks written to {}",
            summary.models,
            summary.landmarks_logged,
            summary.log_path.display()
        );
        self.summary = Some(summary.clone());
    }

    fn show_error(&mut self, message: &str) {
        eprintln!("error: {}", message);
    }
}
