use crate::core::geometry::Vector3f;
use crate::Float;

#[derive(Debug, Default, Copy, Clone)]
pub struct MeshVertex {
    pub position: Vector3f,
    pub normal: Vector3f,
}

#[derive(Debug, Default, Copy, Clone)]
pub struct MeshTriangle {
    /// Indices into the vertex list of the 3 vertices, CCW order.
    pub vertices: [u32; 3],
}

/// Immutable triangle mesh. Centroids are computed once at construction so
/// the builder's sort comparators never touch vertex data.
pub struct Mesh {
    vertices: Vec<MeshVertex>,
    triangles: Vec<MeshTriangle>,
    centroids: Vec<Vector3f>,
}

impl Mesh {
    pub fn new(vertices: Vec<MeshVertex>, triangles: Vec<MeshTriangle>) -> Self {
        let centroids = triangles
            .iter()
            .map(|t| {
                let p0 = vertices[t.vertices[0] as usize].position;
                let p1 = vertices[t.vertices[1] as usize].position;
                let p2 = vertices[t.vertices[2] as usize].position;
                (p0 + p1 + p2) / 3.0
            })
            .collect();
        Mesh {
            vertices,
            triangles,
            centroids,
        }
    }

    pub fn num_triangles(&self) -> usize {
        self.triangles.len()
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangles(&self) -> &[MeshTriangle] {
        &self.triangles
    }

    pub fn vertices(&self) -> &[MeshVertex] {
        &self.vertices
    }

    pub fn triangle_centroid(&self, index: usize) -> &Vector3f {
        &self.centroids[index]
    }

    pub fn triangle_positions(&self, index: usize) -> [Vector3f; 3] {
        let t = &self.triangles[index];
        [
            self.vertices[t.vertices[0] as usize].position,
            self.vertices[t.vertices[1] as usize].position,
            self.vertices[t.vertices[2] as usize].position,
        ]
    }

    /// Square grid of `res` x `res` cells on the y = 0 plane spanning
    /// [-1, 1] in x and z, normals up.
    pub fn plane(res: usize) -> Self {
        let n = res.max(1);
        let up = Vector3f::new(0.0, 1.0, 0.0);
        let mut vertices = Vec::with_capacity((n + 1) * (n + 1));
        for j in 0..=n {
            for i in 0..=n {
                let x = -1.0 + 2.0 * i as Float / n as Float;
                let z = -1.0 + 2.0 * j as Float / n as Float;
                vertices.push(MeshVertex {
                    position: Vector3f::new(x, 0.0, z),
                    normal: up,
                });
            }
        }
        let mut triangles = Vec::with_capacity(2 * n * n);
        let stride = (n + 1) as u32;
        for j in 0..n as u32 {
            for i in 0..n as u32 {
                let v0 = j * stride + i;
                let v1 = v0 + 1;
                let v2 = v0 + stride;
                let v3 = v2 + 1;
                triangles.push(MeshTriangle {
                    vertices: [v0, v2, v1],
                });
                triangles.push(MeshTriangle {
                    vertices: [v1, v2, v3],
                });
            }
        }
        Mesh::new(vertices, triangles)
    }

    /// Unit cube centered at the origin, 24 vertices for flat face normals.
    pub fn cube() -> Self {
        let faces: [(Vector3f, Vector3f, Vector3f); 6] = [
            // (normal, tangent u, tangent v) per face
            (
                Vector3f::new(1.0, 0.0, 0.0),
                Vector3f::new(0.0, 1.0, 0.0),
                Vector3f::new(0.0, 0.0, 1.0),
            ),
            (
                Vector3f::new(-1.0, 0.0, 0.0),
                Vector3f::new(0.0, 0.0, 1.0),
                Vector3f::new(0.0, 1.0, 0.0),
            ),
            (
                Vector3f::new(0.0, 1.0, 0.0),
                Vector3f::new(0.0, 0.0, 1.0),
                Vector3f::new(1.0, 0.0, 0.0),
            ),
            (
                Vector3f::new(0.0, -1.0, 0.0),
                Vector3f::new(1.0, 0.0, 0.0),
                Vector3f::new(0.0, 0.0, 1.0),
            ),
            (
                Vector3f::new(0.0, 0.0, 1.0),
                Vector3f::new(1.0, 0.0, 0.0),
                Vector3f::new(0.0, 1.0, 0.0),
            ),
            (
                Vector3f::new(0.0, 0.0, -1.0),
                Vector3f::new(0.0, 1.0, 0.0),
                Vector3f::new(1.0, 0.0, 0.0),
            ),
        ];
        let mut vertices = Vec::with_capacity(24);
        let mut triangles = Vec::with_capacity(12);
        for (normal, u, v) in faces.iter() {
            let base = vertices.len() as u32;
            let center = *normal * 0.5;
            let corners: [(Float, Float); 4] =
                [(-0.5, -0.5), (0.5, -0.5), (0.5, 0.5), (-0.5, 0.5)];
            for (su, sv) in corners.iter() {
                vertices.push(MeshVertex {
                    position: center + *u * *su + *v * *sv,
                    normal: *normal,
                });
            }
            triangles.push(MeshTriangle {
                vertices: [base, base + 1, base + 2],
            });
            triangles.push(MeshTriangle {
                vertices: [base, base + 2, base + 3],
            });
        }
        Mesh::new(vertices, triangles)
    }
}
