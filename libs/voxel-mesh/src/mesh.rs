//! # Mesh Data Structure
//!
//! Triangle mesh with vertices, triangles, and optional per-vertex normals.

use config::constants::DEGENERATE_AREA_EPSILON;
use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::error::MeshError;

/// A triangle mesh with vertices and indices.
///
/// # Example
///
/// ```rust
/// use voxel_mesh::Mesh;
/// use glam::DVec3;
///
/// let mut mesh = Mesh::new();
/// mesh.add_vertex(DVec3::new(0.0, 0.0, 0.0));
/// mesh.add_vertex(DVec3::new(1.0, 0.0, 0.0));
/// mesh.add_vertex(DVec3::new(0.0, 1.0, 0.0));
/// mesh.add_triangle(0, 1, 2);
/// assert!(mesh.validate());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MeshParts")]
pub struct Mesh {
    /// Vertex positions
    vertices: Vec<DVec3>,
    /// Triangle indices (3 indices per triangle)
    triangles: Vec<[u32; 3]>,
    /// Optional vertex normals
    normals: Option<Vec<DVec3>>,
}

/// Unchecked serialized form of [`Mesh`].
#[derive(Deserialize)]
struct MeshParts {
    vertices: Vec<DVec3>,
    triangles: Vec<[u32; 3]>,
    normals: Option<Vec<DVec3>>,
}

impl TryFrom<MeshParts> for Mesh {
    type Error = MeshError;

    fn try_from(parts: MeshParts) -> Result<Self, MeshError> {
        Self::from_parts(parts.vertices, parts.triangles, parts.normals)
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

impl Mesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            triangles: Vec::new(),
            normals: None,
        }
    }

    /// Creates a mesh with pre-allocated capacity.
    pub fn with_capacity(vertex_count: usize, triangle_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            triangles: Vec::with_capacity(triangle_count),
            normals: None,
        }
    }

    /// Builds a mesh from buffers, checking that every triangle index refers
    /// to an existing vertex and that normals (if any) match the vertex count.
    ///
    /// # Example
    ///
    /// ```rust
    /// use voxel_mesh::Mesh;
    /// use glam::DVec3;
    ///
    /// let mesh = Mesh::from_parts(
    ///     vec![DVec3::ZERO, DVec3::X, DVec3::Y],
    ///     vec![[0, 1, 2]],
    ///     None,
    /// ).unwrap();
    /// assert_eq!(mesh.triangle_count(), 1);
    ///
    /// assert!(Mesh::from_parts(vec![DVec3::ZERO], vec![[0, 1, 2]], None).is_err());
    /// ```
    pub fn from_parts(
        vertices: Vec<DVec3>,
        triangles: Vec<[u32; 3]>,
        normals: Option<Vec<DVec3>>,
    ) -> Result<Self, MeshError> {
        let vertex_count = vertices.len();
        if let Some(tri) = triangles
            .iter()
            .find(|tri| tri.iter().any(|&i| i as usize >= vertex_count))
        {
            return Err(MeshError::invalid_topology(format!(
                "triangle {:?} references a vertex outside 0..{}",
                tri, vertex_count
            )));
        }

        if let Some(normals) = &normals {
            if normals.len() != vertex_count {
                return Err(MeshError::invalid_topology(format!(
                    "{} normals for {} vertices",
                    normals.len(),
                    vertex_count
                )));
            }
        }

        Ok(Self::from_parts_unchecked(vertices, triangles, normals))
    }

    /// Builds a mesh from buffers without any integrity checks.
    pub fn from_parts_unchecked(
        vertices: Vec<DVec3>,
        triangles: Vec<[u32; 3]>,
        normals: Option<Vec<DVec3>>,
    ) -> Self {
        Self {
            vertices,
            triangles,
            normals,
        }
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Returns true if the mesh is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Adds a vertex and returns its index.
    pub fn add_vertex(&mut self, position: DVec3) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(position);
        index
    }

    /// Adds a triangle by vertex indices.
    pub fn add_triangle(&mut self, v0: u32, v1: u32, v2: u32) {
        self.triangles.push([v0, v1, v2]);
    }

    /// Returns a reference to the vertices.
    #[inline]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Returns a reference to the triangles.
    #[inline]
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Returns the vertex at the given index.
    #[inline]
    pub fn vertex(&self, index: u32) -> DVec3 {
        self.vertices[index as usize]
    }

    /// Returns the triangle at the given index.
    #[inline]
    pub fn triangle(&self, index: usize) -> [u32; 3] {
        self.triangles[index]
    }

    /// Returns the vertex normals.
    pub fn normals(&self) -> Option<&[DVec3]> {
        self.normals.as_deref()
    }

    /// Reverses the vertex order of every triangle in place.
    ///
    /// Flips the facing direction of all faces; normals are left untouched.
    pub fn reverse_winding(&mut self) {
        for tri in &mut self.triangles {
            tri.reverse();
        }
    }

    /// Returns the unnormalized right-hand normal of a triangle.
    pub fn face_normal(&self, index: usize) -> DVec3 {
        let [a, b, c] = self.triangles[index];
        let v0 = self.vertex(a);
        (self.vertex(b) - v0).cross(self.vertex(c) - v0)
    }

    /// Computes the axis-aligned bounding box.
    ///
    /// Returns (min, max) corners of the bounding box.
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        if self.vertices.is_empty() {
            return (DVec3::ZERO, DVec3::ZERO);
        }

        let mut min = self.vertices[0];
        let mut max = self.vertices[0];

        for v in &self.vertices[1..] {
            min = min.min(*v);
            max = max.max(*v);
        }

        (min, max)
    }

    /// Validates the mesh for correctness.
    ///
    /// Checks:
    /// - All triangle indices are valid
    /// - No degenerate triangles (repeated index or zero area)
    ///
    /// Returns true if valid.
    pub fn validate(&self) -> bool {
        let vertex_count = self.vertices.len() as u32;

        for tri in &self.triangles {
            if tri[0] >= vertex_count || tri[1] >= vertex_count || tri[2] >= vertex_count {
                return false;
            }

            if tri[0] == tri[1] || tri[1] == tri[2] || tri[0] == tri[2] {
                return false;
            }

            let v0 = self.vertices[tri[0] as usize];
            let v1 = self.vertices[tri[1] as usize];
            let v2 = self.vertices[tri[2] as usize];
            let area = (v1 - v0).cross(v2 - v0).length() / 2.0;
            if area < DEGENERATE_AREA_EPSILON {
                return false;
            }
        }

        true
    }
}
