//! PLY surface model support

use crate::ModelReader;
use log::{debug, warn};
use ply_rs::{
    parser::Parser,
    ply::{DefaultElement, Property},
};
use pointselector_core::{Error, Point3f, Result, SurfaceModel, Vector3f};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub struct PlyReader;

impl ModelReader for PlyReader {
    fn read_model<P: AsRef<Path>>(path: P) -> Result<SurfaceModel> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);

        // Parse PLY header and payload
        let parser = Parser::<DefaultElement>::new();
        let ply = parser.read_ply(&mut reader)?;

        let vertex_element = ply.payload.get("vertex");

        // Extract vertices
        let mut vertices = Vec::new();
        if let Some(vertex_element) = vertex_element {
            for vertex in vertex_element {
                let x = extract_property_value(vertex, "x")?;
                let y = extract_property_value(vertex, "y")?;
                let z = extract_property_value(vertex, "z")?;

                vertices.push(Point3f::new(x, y, z));
            }
        }

        // Extract faces, fanning polygons into triangles
        let mut faces = Vec::new();
        if let Some(face_element) = ply.payload.get("face") {
            for face in face_element {
                let indices = extract_face_indices(face)?;
                for i in 1..indices.len().saturating_sub(1) {
                    faces.push([indices[0], indices[i], indices[i + 1]]);
                }
            }
        }

        // Extract normals if every vertex has them
        let normals = vertex_element.and_then(|vertex_element| {
            vertex_element
                .iter()
                .map(|vertex| {
                    Some(Vector3f::new(
                        extract_property_value(vertex, "nx").ok()?,
                        extract_property_value(vertex, "ny").ok()?,
                        extract_property_value(vertex, "nz").ok()?,
                    ))
                })
                .collect::<Option<Vec<_>>>()
                .filter(|normals| !normals.is_empty())
        });

        let mut model = SurfaceModel::from_vertices_and_faces(vertices, faces);
        if let Some(normals) = normals {
            model.set_normals(normals);
        }

        let invalid = model.invalid_faces();
        if invalid > 0 {
            warn!("{}: {} faces reference missing vertices", path.display(), invalid);
        }

        debug!(
            "Read {} vertices and {} faces from {}",
            model.vertex_count(),
            model.face_count(),
            path.display()
        );
        Ok(model)
    }
}

/// Extract a property value as f32 from a PLY element
fn extract_property_value(element: &DefaultElement, name: &str) -> Result<f32> {
    match element.get(name) {
        Some(Property::Float(val)) => Ok(*val),
        Some(Property::Double(val)) => Ok(*val as f32),
        Some(Property::Int(val)) => Ok(*val as f32),
        Some(Property::UInt(val)) => Ok(*val as f32),
        Some(Property::Short(val)) => Ok(*val as f32),
        Some(Property::UShort(val)) => Ok(*val as f32),
        _ => Err(Error::InvalidData(format!(
            "Property '{}' not found or invalid type",
            name
        ))),
    }
}

/// Extract face indices from a PLY face element
fn extract_face_indices(element: &DefaultElement) -> Result<Vec<usize>> {
    match element.get("vertex_indices").or_else(|| element.get("vertex_index")) {
        Some(Property::ListInt(indices)) => Ok(indices.iter().map(|&idx| idx as usize).collect()),
        Some(Property::ListUInt(indices)) => Ok(indices.iter().map(|&idx| idx as usize).collect()),
        Some(Property::ListUShort(indices)) => Ok(indices.iter().map(|&idx| idx as usize).collect()),
        Some(Property::ListUChar(indices)) => Ok(indices.iter().map(|&idx| idx as usize).collect()),
        _ => Err(Error::InvalidData("Face indices not found".to_string())),
    }
}
