//! OBJ file loader for terrain meshes
//!
//! Only geometry matters for the terrain index: `v` and `f` records are read,
//! everything else (normals, texture coordinates, groups, materials) is
//! skipped. Polygons are fan-triangulated.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

use crate::foundation::math::Vec3;
use crate::spatial::{SpatialError, TerrainMesh};

/// Errors raised while loading an OBJ file
#[derive(Error, Debug)]
pub enum ObjError {
    /// The file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A record could not be parsed
    #[error("Parse error on line {line}: {message}")]
    Parse {
        /// 1-based line number
        line: usize,
        /// What was wrong
        message: String,
    },

    /// The parsed geometry is not a valid terrain mesh
    #[error("Invalid mesh: {0}")]
    Mesh(#[from] SpatialError),
}

/// Wavefront OBJ terrain loader
pub struct ObjLoader;

impl ObjLoader {
    /// Load a terrain mesh from an OBJ file
    pub fn load_terrain<P: AsRef<Path>>(path: P) -> Result<TerrainMesh, ObjError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let mesh = Self::read_terrain(BufReader::new(file))?;
        log::info!(
            "Loaded terrain {}: {} vertices, {} triangles",
            path.display(),
            mesh.vertices().len(),
            mesh.triangle_count()
        );
        Ok(mesh)
    }

    /// Parse a terrain mesh from OBJ text
    pub fn parse_terrain(source: &str) -> Result<TerrainMesh, ObjError> {
        Self::read_terrain(source.as_bytes())
    }

    fn read_terrain<R: BufRead>(reader: R) -> Result<TerrainMesh, ObjError> {
        let mut positions: Vec<Vec3> = Vec::new();
        let mut triangles: Vec<[u32; 3]> = Vec::new();

        for (number, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = number + 1;
            let mut parts = line.split_whitespace();

            match parts.next() {
                Some("v") => {
                    let mut coords = [0.0f32; 3];
                    for coord in &mut coords {
                        let token = parts.next().ok_or_else(|| parse_error(line_no, "vertex needs three coordinates"))?;
                        *coord = token
                            .parse()
                            .map_err(|_| parse_error(line_no, &format!("invalid coordinate '{token}'")))?;
                    }
                    positions.push(Vec3::new(coords[0], coords[1], coords[2]));
                }
                Some("f") => {
                    let corners = parts
                        .map(|token| resolve_index(token, positions.len(), line_no))
                        .collect::<Result<Vec<u32>, ObjError>>()?;
                    if corners.len() < 3 {
                        return Err(parse_error(line_no, "face needs at least three vertices"));
                    }
                    for i in 1..corners.len() - 1 {
                        triangles.push([corners[0], corners[i], corners[i + 1]]);
                    }
                }
                _ => {}
            }
        }

        if triangles.is_empty() {
            log::warn!("OBJ source contained no faces");
        }

        Ok(TerrainMesh::new(positions, triangles)?)
    }
}

fn parse_error(line: usize, message: &str) -> ObjError {
    ObjError::Parse { line, message: message.to_string() }
}

/// Resolve the position part of a face corner (`v`, `v/vt`, `v//vn` or
/// `v/vt/vn`) to a 0-based index. Negative indices count back from the most
/// recent vertex.
fn resolve_index(token: &str, vertex_count: usize, line: usize) -> Result<u32, ObjError> {
    let position = token.split('/').next().unwrap_or_default();
    let raw: i64 = position
        .parse()
        .map_err(|_| parse_error(line, &format!("invalid face index '{token}'")))?;

    let resolved = match raw {
        0 => None,
        r if r > 0 => Some(r - 1),
        r => Some(vertex_count as i64 + r),
    };

    resolved
        .filter(|&index| index >= 0 && index < vertex_count as i64)
        .and_then(|index| u32::try_from(index).ok())
        .ok_or_else(|| parse_error(line, &format!("face index {raw} out of range for {vertex_count} vertices")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const QUAD: &str = "\
# unit quad
v 0 0 0
v 1 0 0
v 1 0 1
v 0 0 1
vn 0 1 0
vt 0 0
f 1/1/1 2/1/1 3/1/1 4/1/1
";

    #[test]
    fn test_quad_is_fan_triangulated() {
        let mesh = ObjLoader::parse_terrain(QUAD).unwrap();
        assert_eq!(mesh.vertices().len(), 4);
        assert_eq!(mesh.indices(), &[[0, 1, 2], [0, 2, 3]]);
    }

    #[test]
    fn test_negative_and_slash_indices() {
        let source = "v 0 1 0\nv 2 1 0\nv 0 1 2\nf -3//1 -2//1 -1//1\n";
        let mesh = ObjLoader::parse_terrain(source).unwrap();
        assert_eq!(mesh.indices(), &[[0, 1, 2]]);
        let bounds = mesh.bounds().unwrap();
        assert_relative_eq!(bounds.max, Vec3::new(2.0, 1.0, 2.0));
    }

    #[test]
    fn test_bad_coordinate_reports_line() {
        let err = ObjLoader::parse_terrain("v 0 0 0\nv 1 x 0\n").unwrap_err();
        assert!(matches!(err, ObjError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_out_of_range_face() {
        let err = ObjLoader::parse_terrain("v 0 0 0\nv 1 0 0\nf 1 2 3\n").unwrap_err();
        assert!(matches!(err, ObjError::Parse { line: 3, .. }));
        let err = ObjLoader::parse_terrain("v 0 0 0\nf 0 1 1\n").unwrap_err();
        assert!(matches!(err, ObjError::Parse { .. }));
    }

    #[test]
    fn test_degenerate_face_rejected() {
        let err = ObjLoader::parse_terrain("v 0 0 0\nv 1 0 0\nf 1 2\n").unwrap_err();
        assert!(matches!(err, ObjError::Parse { line: 3, .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = ObjLoader::load_terrain("definitely/not/here.obj").unwrap_err();
        assert!(matches!(err, ObjError::Io(_)));
    }

    #[test]
    fn test_loaded_mesh_builds_an_index() {
        use crate::spatial::{Octree, OctreeConfig};
        let mesh = ObjLoader::parse_terrain(QUAD).unwrap();
        let octree = Octree::build(mesh, OctreeConfig::default()).unwrap();
        assert!(octree.is_built());
    }
}
