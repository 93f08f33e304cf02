//! Point types and coordinate formatting

use nalgebra::{Point3, Vector3};

/// A 3D point with floating point coordinates (mesh vertices)
pub type Point3f = Point3<f32>;

/// A 3D point with double precision coordinates (landmark positions)
pub type Point3d = Point3<f64>;

/// A 3D vector with floating point components
pub type Vector3f = Vector3<f32>;

/// Format a landmark position as a bracketed coordinate triple, `[x, y, z]`.
///
/// Integral values keep one fractional digit so the column reads as floats
/// throughout (`[1.0, -2.5, 0.0]`).
pub fn format_position(position: &Point3d) -> String {
    format!(
        "[{}, {}, {}]",
        format_coordinate(position.x),
        format_coordinate(position.y),
        format_coordinate(position.z)
    )
}

/// Parse a coordinate triple written by [`format_position`].
pub fn parse_position(text: &str) -> Option<Point3d> {
    let inner = text.trim().strip_prefix('[')?.strip_suffix(']')?;
    let values: Vec<f64> = inner
        .split(',')
        .map(|s| s.trim().parse::<f64>())
        .collect::<std::result::Result<_, _>>()
        .ok()?;

    match values.as_slice() {
        [x, y, z] => Some(Point3d::new(*x, *y, *z)),
        _ => None,
    }
}

fn format_coordinate(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}
