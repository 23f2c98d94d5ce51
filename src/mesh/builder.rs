//! Mesh construction utilities.
//!
//! This module provides functions for building half-edge meshes from
//! face-vertex lists, plus a regular quad grid generator used for fixtures
//! and benchmarks.
//!
//! Construction is deterministic: half-edges are created face by face in
//! input order, and an undirected edge is created the first time one of its
//! sides is met. Boundary half-edges are appended afterwards. Every edge is
//! oriented from its lower vertex index to its higher one, whichever side
//! was met first.

use std::collections::HashMap;

use nalgebra::Point3;

use super::halfedge::{Edge, Face, HalfEdge, HalfEdgeMesh};
use super::index::{EdgeId, FaceId, HalfEdgeId, MeshIndex, VertexId};
use crate::error::{MeshError, Result};

/// Build a half-edge mesh from vertices and polygonal faces.
///
/// # Arguments
/// * `vertices` - List of vertex positions
/// * `faces` - List of faces, each a list of at least three vertex indices
///   in consistent (counter-clockwise) winding
///
/// # Errors
/// - [`MeshError::EmptyMesh`] if there are no faces
/// - [`MeshError::InvalidVertexIndex`] for out-of-range indices
/// - [`MeshError::DegenerateFace`] for faces with repeated or too few vertices
/// - [`MeshError::NonManifoldEdge`] if an edge is shared by more than two faces
/// - [`MeshError::InconsistentWinding`] if two faces traverse an edge the same way
/// - [`MeshError::NonManifoldVertex`] if faces meet at a vertex through more
///   than one gap in the boundary
///
/// # Example
/// ```
/// use rframe::mesh::{build_from_polygons, HalfEdgeMesh};
/// use nalgebra::Point3;
///
/// let vertices = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(1.0, 1.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
///     Point3::new(2.0, 0.5, 0.0),
/// ];
/// let faces = vec![vec![0, 1, 2, 3], vec![1, 4, 2]];
///
/// let mesh: HalfEdgeMesh = build_from_polygons(&vertices, &faces).unwrap();
/// assert_eq!(mesh.num_faces(), 2);
/// assert_eq!(mesh.num_edges(), 6);
/// ```
pub fn build_from_polygons<I: MeshIndex, F: AsRef<[usize]>>(
    vertices: &[Point3<f64>],
    faces: &[F],
) -> Result<HalfEdgeMesh<I>> {
    if faces.is_empty() {
        return Err(MeshError::EmptyMesh);
    }

    let mut num_corners = 0;
    for (fi, face) in faces.iter().enumerate() {
        let face = face.as_ref();
        if let Some(&vi) = face.iter().find(|&&vi| vi >= vertices.len()) {
            return Err(MeshError::InvalidVertexIndex { face: fi, vertex: vi });
        }
        let repeats = face
            .iter()
            .enumerate()
            .any(|(i, v)| face[i + 1..].contains(v));
        if face.len() < 3 || repeats {
            return Err(MeshError::DegenerateFace { face: fi });
        }
        num_corners += face.len();
    }

    let mut mesh = HalfEdgeMesh::with_capacity(vertices.len(), faces.len(), num_corners);

    let vertex_ids: Vec<VertexId<I>> = vertices.iter().map(|&pos| mesh.add_vertex(pos)).collect();

    // Directed edge (v0, v1) -> half-edge running v0 -> v1
    let mut directed: HashMap<(usize, usize), HalfEdgeId<I>> = HashMap::with_capacity(num_corners);

    // First pass: face half-edges, twins and edges
    for face in faces {
        let face = face.as_ref();
        let n = face.len();
        let base = mesh.num_halfedges();
        let face_id = FaceId::<I>::new(mesh.num_faces());
        mesh.faces.push(Face::new(HalfEdgeId::new(base)));
        mesh.halfedges
            .extend(std::iter::repeat(HalfEdge::new()).take(n));

        for k in 0..n {
            let he_id = HalfEdgeId::<I>::new(base + k);
            let (v0, v1) = (face[k], face[(k + 1) % n]);

            if directed.contains_key(&(v0, v1)) {
                return Err(if directed.contains_key(&(v1, v0)) {
                    MeshError::NonManifoldEdge { v0, v1 }
                } else {
                    MeshError::InconsistentWinding { v0, v1 }
                });
            }

            let (twin, edge) = match directed.get(&(v1, v0)) {
                Some(&twin) => (twin, mesh.edge_of(twin)),
                None => {
                    let edge = EdgeId::<I>::new(mesh.num_edges());
                    mesh.edges.push(Edge { halfedge: he_id });
                    (HalfEdgeId::invalid(), edge)
                }
            };

            {
                let he = mesh.halfedge_mut(he_id);
                he.origin = vertex_ids[v0];
                he.next = HalfEdgeId::new(base + (k + 1) % n);
                he.prev = HalfEdgeId::new(base + (k + n - 1) % n);
                he.face = face_id;
                he.edge = edge;
                he.twin = twin;
            }
            if twin.is_valid() {
                mesh.halfedge_mut(twin).twin = he_id;
            }

            // Will be overwritten for shared vertices
            mesh.vertex_mut(vertex_ids[v0]).halfedge = he_id;
            directed.insert((v0, v1), he_id);
        }
    }

    // Second pass: boundary half-edges for every unpaired side
    let num_face_halfedges = mesh.num_halfedges();
    for he_id in (0..num_face_halfedges).map(HalfEdgeId::<I>::new) {
        if mesh.twin(he_id).is_valid() {
            continue;
        }
        let boundary_he = HalfEdgeId::<I>::new(mesh.num_halfedges());
        let origin = mesh.origin(mesh.next(he_id));
        let edge = mesh.edge_of(he_id);
        mesh.halfedges.push(HalfEdge {
            origin,
            twin: he_id,
            edge,
            ..HalfEdge::new()
        });
        mesh.halfedge_mut(he_id).twin = boundary_he;
    }

    // Third pass: link boundary half-edges into loops
    link_boundary_loops(&mut mesh)?;

    // Fourth pass: ensure boundary vertices point to boundary half-edges
    fix_boundary_vertex_halfedges(&mut mesh);

    // Fifth pass: orient every edge from its lower vertex to its higher one
    orient_edges(&mut mesh);

    Ok(mesh)
}

/// Build a half-edge mesh from vertices and triangle faces.
pub fn build_from_triangles<I: MeshIndex>(
    vertices: &[Point3<f64>],
    faces: &[[usize; 3]],
) -> Result<HalfEdgeMesh<I>> {
    build_from_polygons(vertices, faces)
}

/// Build a half-edge mesh from vertices and quad faces.
///
/// Each face is `[v0, v1, v2, v3]` in counter-clockwise order.
pub fn build_from_quads<I: MeshIndex>(
    vertices: &[Point3<f64>],
    faces: &[[usize; 4]],
) -> Result<HalfEdgeMesh<I>> {
    build_from_polygons(vertices, faces)
}

/// Build a planar grid of `nx` by `ny` square quads in the XY plane.
///
/// Vertex `(i, j)` has index `j * (nx + 1) + i` and sits at
/// `(i * spacing, j * spacing, 0)`. Faces are emitted row by row with
/// counter-clockwise winding, so all face normals point along `+Z`.
///
/// # Example
/// ```
/// use rframe::mesh::{build_quad_grid, HalfEdgeMesh};
///
/// let mesh: HalfEdgeMesh = build_quad_grid(2, 2, 1.0).unwrap();
/// assert_eq!(mesh.num_vertices(), 9);
/// assert_eq!(mesh.num_faces(), 4);
/// assert_eq!(mesh.num_edges(), 12);
/// ```
pub fn build_quad_grid<I: MeshIndex>(nx: usize, ny: usize, spacing: f64) -> Result<HalfEdgeMesh<I>> {
    if nx == 0 {
        return Err(MeshError::invalid_param("nx", nx, "must be at least 1"));
    }
    if ny == 0 {
        return Err(MeshError::invalid_param("ny", ny, "must be at least 1"));
    }
    if !(spacing.is_finite() && spacing > 0.0) {
        return Err(MeshError::invalid_param("spacing", spacing, "must be positive"));
    }

    let vertices: Vec<Point3<f64>> = (0..=ny)
        .flat_map(|j| (0..=nx).map(move |i| Point3::new(i as f64 * spacing, j as f64 * spacing, 0.0)))
        .collect();

    let mut faces = Vec::with_capacity(nx * ny);
    for j in 0..ny {
        for i in 0..nx {
            let v00 = j * (nx + 1) + i;
            let v10 = v00 + 1;
            let v01 = v00 + (nx + 1);
            let v11 = v01 + 1;
            faces.push([v00, v10, v11, v01]);
        }
    }

    build_from_quads(&vertices, &faces)
}

/// Link boundary half-edges into proper loops.
///
/// A vertex with two outgoing boundary half-edges joins faces that only
/// touch at that vertex; its loops cannot be linked unambiguously.
fn link_boundary_loops<I: MeshIndex>(mesh: &mut HalfEdgeMesh<I>) -> Result<()> {
    let boundary_hes: Vec<HalfEdgeId<I>> = mesh
        .halfedge_ids()
        .filter(|&he| mesh.is_boundary_halfedge(he))
        .collect();

    let mut outgoing: HashMap<VertexId<I>, HalfEdgeId<I>> =
        HashMap::with_capacity(boundary_hes.len());
    for &he in &boundary_hes {
        let origin = mesh.origin(he);
        if outgoing.insert(origin, he).is_some() {
            return Err(MeshError::NonManifoldVertex {
                vertex: origin.index(),
            });
        }
    }

    // The next boundary half-edge starts where this one ends
    for &he in &boundary_hes {
        if let Some(&next_he) = outgoing.get(&mesh.dest(he)) {
            mesh.halfedge_mut(he).next = next_he;
            mesh.halfedge_mut(next_he).prev = he;
        }
    }
    Ok(())
}

/// Ensure boundary vertices point to a boundary half-edge.
fn fix_boundary_vertex_halfedges<I: MeshIndex>(mesh: &mut HalfEdgeMesh<I>) {
    for vid in mesh.vertex_ids().collect::<Vec<_>>() {
        let boundary = mesh
            .vertex_halfedges(vid)
            .find(|&he| mesh.is_boundary_halfedge(he));
        if let Some(he) = boundary {
            mesh.vertex_mut(vid).halfedge = he;
        }
    }
}

/// Point every edge at the side running from the lower vertex index to the higher.
fn orient_edges<I: MeshIndex>(mesh: &mut HalfEdgeMesh<I>) {
    for e in 0..mesh.edges.len() {
        let he = mesh.edges[e].halfedge;
        if mesh.origin(he) > mesh.dest(he) {
            mesh.edges[e].halfedge = mesh.twin(he);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_triangle() -> (Vec<Point3<f64>>, Vec<[usize; 3]>) {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, 1.0, 0.0),
        ];
        let faces = vec![[0, 1, 2]];
        (vertices, faces)
    }

    fn two_quads() -> (Vec<Point3<f64>>, Vec<[usize; 4]>) {
        // Two quads sharing an edge (1-2)
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(2.0, 1.0, 0.0),
        ];
        let faces = vec![[0, 1, 2, 3], [1, 4, 5, 2]];
        (vertices, faces)
    }

    #[test]
    fn test_single_triangle() {
        let (vertices, faces) = single_triangle();
        let mesh: HalfEdgeMesh<u32> = build_from_triangles(&vertices, &faces).unwrap();

        assert_eq!(mesh.num_vertices(), 3);
        assert_eq!(mesh.num_faces(), 1);
        assert_eq!(mesh.num_edges(), 3);
        // 3 interior half-edges + 3 boundary half-edges
        assert_eq!(mesh.num_halfedges(), 6);
        assert!(mesh.is_valid());

        for v in mesh.vertex_ids() {
            assert!(mesh.is_boundary_vertex(v));
        }
    }

    #[test]
    fn test_two_quads() {
        let (vertices, faces) = two_quads();
        let mesh: HalfEdgeMesh<u32> = build_from_quads(&vertices, &faces).unwrap();

        assert_eq!(mesh.num_vertices(), 6);
        assert_eq!(mesh.num_faces(), 2);
        assert_eq!(mesh.num_edges(), 7);
        // 8 face half-edges + 6 boundary half-edges (shared edge has no boundary)
        assert_eq!(mesh.num_halfedges(), 14);
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_edge_order_follows_faces() {
        let (vertices, faces) = two_quads();
        let mesh: HalfEdgeMesh<u32> = build_from_quads(&vertices, &faces).unwrap();

        let pairs: Vec<(usize, usize)> = mesh
            .edge_ids()
            .map(|e| {
                let [a, b] = mesh.edge_vertices(e);
                (a.index(), b.index())
            })
            .collect();
        // First-met order, each pair from lower to higher vertex.
        assert_eq!(
            pairs,
            vec![(0, 1), (1, 2), (2, 3), (0, 3), (1, 4), (4, 5), (2, 5)]
        );

        // The canonical side of 3 -> 0 is the boundary half-edge 0 -> 3.
        let he = mesh.edge_halfedge(EdgeId::new(3));
        assert!(mesh.is_boundary_halfedge(he));
    }

    #[test]
    fn test_boundary_loop() {
        let (vertices, faces) = two_quads();
        let mesh: HalfEdgeMesh<u32> = build_from_quads(&vertices, &faces).unwrap();

        let start = mesh
            .halfedge_ids()
            .find(|&he| mesh.is_boundary_halfedge(he))
            .unwrap();
        let mut he = start;
        let mut steps = 0;
        loop {
            assert!(mesh.is_boundary_halfedge(he));
            he = mesh.next(he);
            steps += 1;
            if he == start {
                break;
            }
            assert!(steps <= mesh.num_halfedges());
        }
        assert_eq!(steps, 6);
    }

    #[test]
    fn test_faces_keep_input_corners() {
        let (vertices, faces) = two_quads();
        let mesh: HalfEdgeMesh<u32> = build_from_quads(&vertices, &faces).unwrap();

        for (f, expected) in mesh.face_ids().zip(&faces) {
            let corners: Vec<usize> = mesh.face_vertices(f).map(|v| v.index()).collect();
            assert_eq!(&corners[..], &expected[..]);
        }
        for (v, p) in mesh.vertex_ids().zip(&vertices) {
            assert_eq!(mesh.position(v), p);
        }
    }

    #[test]
    fn test_invalid_vertex_index() {
        let vertices = vec![Point3::new(0.0, 0.0, 0.0)];
        let faces = vec![[0, 1, 2]];

        let result: Result<HalfEdgeMesh<u32>> = build_from_triangles(&vertices, &faces);
        assert_eq!(result.unwrap_err(), MeshError::InvalidVertexIndex { face: 0, vertex: 1 });
    }

    #[test]
    fn test_degenerate_faces() {
        let (vertices, _) = two_quads();

        let repeated = vec![[0, 1, 0, 3]];
        let result: Result<HalfEdgeMesh<u32>> = build_from_quads(&vertices, &repeated);
        assert_eq!(result.unwrap_err(), MeshError::DegenerateFace { face: 0 });

        let too_short: Vec<Vec<usize>> = vec![vec![0, 1]];
        let result: Result<HalfEdgeMesh<u32>> = build_from_polygons(&vertices, &too_short);
        assert_eq!(result.unwrap_err(), MeshError::DegenerateFace { face: 0 });
    }

    #[test]
    fn test_empty_faces() {
        let (vertices, _) = two_quads();
        let faces: Vec<[usize; 4]> = Vec::new();
        let result: Result<HalfEdgeMesh<u32>> = build_from_quads(&vertices, &faces);
        assert_eq!(result.unwrap_err(), MeshError::EmptyMesh);
    }

    #[test]
    fn test_inconsistent_winding() {
        let (vertices, _) = two_quads();
        let faces = vec![[0, 1, 2, 3], [1, 4, 5, 2]];
        // Flipped second quad walks the shared edge 1 -> 2 like the first one.
        let faces_flipped = vec![[0, 1, 2, 3], [2, 5, 4, 1]];

        let result: Result<HalfEdgeMesh<u32>> = build_from_quads(&vertices, &faces);
        assert!(result.is_ok());

        let result: Result<HalfEdgeMesh<u32>> = build_from_quads(&vertices, &faces_flipped);
        assert_eq!(result.unwrap_err(), MeshError::InconsistentWinding { v0: 1, v1: 2 });
    }

    #[test]
    fn test_non_manifold_edge() {
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, 1.0, 0.0),
            Point3::new(0.5, -1.0, 0.0),
            Point3::new(0.5, 0.0, 1.0),
        ];
        let faces = vec![[0, 1, 2], [1, 0, 3], [0, 1, 4]];

        let result: Result<HalfEdgeMesh<u32>> = build_from_triangles(&vertices, &faces);
        assert_eq!(result.unwrap_err(), MeshError::NonManifoldEdge { v0: 0, v1: 1 });
    }

    #[test]
    fn test_non_manifold_vertex() {
        // Two quads touching only at vertex 2.
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(2.0, 1.0, 0.0),
            Point3::new(2.0, 2.0, 0.0),
            Point3::new(1.0, 2.0, 0.0),
        ];
        let faces = vec![[0, 1, 2, 3], [2, 4, 5, 6]];

        let result: Result<HalfEdgeMesh<u32>> = build_from_quads(&vertices, &faces);
        assert_eq!(result.unwrap_err(), MeshError::NonManifoldVertex { vertex: 2 });
    }

    #[test]
    fn test_quad_grid() {
        let mesh: HalfEdgeMesh<u16> = build_quad_grid(3, 2, 0.5).unwrap();
        assert_eq!(mesh.num_vertices(), 12);
        assert_eq!(mesh.num_faces(), 6);
        // 3 * 3 horizontal + 4 * 2 vertical
        assert_eq!(mesh.num_edges(), 17);
        assert!(mesh.is_valid());

        let boundary = mesh.edge_ids().filter(|&e| mesh.is_edge_on_boundary(e)).count();
        assert_eq!(boundary, 10);

        let area: f64 = mesh
            .face_ids()
            .map(|f| 0.5 * mesh.face_area_vector(f).norm())
            .sum();
        assert!((area - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_quad_grid_rejects_bad_parameters() {
        assert!(build_quad_grid::<u32>(0, 2, 1.0).is_err());
        assert!(build_quad_grid::<u32>(2, 0, 1.0).is_err());
        assert!(matches!(
            build_quad_grid::<u32>(2, 2, -1.0),
            Err(MeshError::InvalidParameter { name: "spacing", .. })
        ));
    }
}
