//! Derivation of member records from mesh topology.
//!
//! For an edge `e` with canonical half-edge `u -> v` lying on face `A`, and
//! twin `v -> u` lying on face `B`:
//!
//! - the **centerline** is the segment `u -> v`;
//! - the **normal** is the unit sum of the normals of `A` and `B`;
//! - **next** is the half-edge after `u -> v` around `A`;
//! - **prev** is the half-edge after `v -> u` around `B`.
//!
//! Both neighbors leave a vertex of `e`: `next` starts at `v`, `prev` starts
//! at `u`. That is what makes members around a vertex form a reciprocal fan.
//! Note that `prev` is taken on the *other* face, so `prev(next(e))` is in
//! general not `e`.

use nalgebra::Vector3;

use super::member::{Member, Neighborhood};
use crate::error::{RfError, RfResult};
use crate::mesh::{DirectedEdge, EdgeId, HalfEdgeMesh, MeshIndex};

/// Below this length a sum of face normals is treated as vanished.
const NORMAL_EPSILON: f64 = 1e-12;

/// Compute the record for one edge from vertex positions and topology.
pub(crate) fn build_member<I: MeshIndex>(mesh: &HalfEdgeMesh<I>, e: EdgeId<I>) -> RfResult<Member<I>> {
    let centerline = mesh.edge_line(e);
    if mesh.is_edge_on_boundary(e) {
        return Ok(Member::boundary(centerline));
    }

    let forward = DirectedEdge::forward(e);
    let neighborhood = Neighborhood {
        normal: edge_normal(mesh, e)?,
        next_edge: next_rf_edge(mesh, forward)?,
        prev_edge: prev_rf_edge(mesh, forward)?,
    };
    Ok(Member::interior(centerline, neighborhood))
}

/// Unit average of the normals of the two faces incident to `e`.
///
/// # Errors
/// - [`RfError::InvalidTopology`] if `e` does not have two incident faces
/// - [`RfError::DegenerateGeometry`] if a face has no area or the two face
///   normals cancel out
pub fn edge_normal<I: MeshIndex>(mesh: &HalfEdgeMesh<I>, e: EdgeId<I>) -> RfResult<Vector3<f64>> {
    let faces = mesh.edge_faces(e);
    let count = faces.iter().filter(|f| f.is_valid()).count();
    if count != 2 {
        return Err(RfError::InvalidTopology {
            edge: e.index(),
            faces: count,
        });
    }

    let mut sum = Vector3::zeros();
    for f in faces {
        sum += mesh.try_face_normal(f).ok_or(RfError::DegenerateGeometry {
            edge: e.index(),
            reason: "incident face has zero area",
        })?;
    }

    sum.try_normalize(NORMAL_EPSILON)
        .ok_or(RfError::DegenerateGeometry {
            edge: e.index(),
            reason: "incident face normals cancel out",
        })
}

/// The directed edge following `d` around the face `d` lies on.
///
/// # Errors
/// [`RfError::InvalidTopology`] if `d` runs along the outside of the boundary.
pub fn next_rf_edge<I: MeshIndex>(
    mesh: &HalfEdgeMesh<I>,
    d: DirectedEdge<I>,
) -> RfResult<DirectedEdge<I>> {
    let he = mesh.directed_halfedge(d);
    if mesh.is_boundary_halfedge(he) {
        let faces = mesh
            .edge_faces(d.edge())
            .iter()
            .filter(|f| f.is_valid())
            .count();
        return Err(RfError::InvalidTopology {
            edge: d.edge().index(),
            faces,
        });
    }
    Ok(mesh.directed_edge(mesh.next(he)))
}

/// The directed edge following the reversal of `d` around the opposite face.
pub fn prev_rf_edge<I: MeshIndex>(
    mesh: &HalfEdgeMesh<I>,
    d: DirectedEdge<I>,
) -> RfResult<DirectedEdge<I>> {
    next_rf_edge(mesh, d.reversed())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{build_from_quads, build_quad_grid};
    use nalgebra::Point3;

    fn grid() -> HalfEdgeMesh {
        build_quad_grid(2, 2, 1.0).unwrap()
    }

    fn fwd(i: usize) -> DirectedEdge {
        DirectedEdge::forward(EdgeId::new(i))
    }

    #[test]
    fn test_boundary_member() {
        let mesh = grid();
        let member = build_member(&mesh, EdgeId::new(0)).unwrap();
        assert!(member.neighborhood().is_none());
        assert_eq!(member.centerline(), &mesh.edge_line(EdgeId::new(0)));
    }

    #[test]
    fn test_next_and_prev() {
        let mesh = grid();
        // Edge 1 runs 1 -> 4 on the first face; its twin 4 -> 1 lies on the second.
        // The first face continues 4 -> 3, which is edge 2 walked backwards.
        assert_eq!(next_rf_edge(&mesh, fwd(1)).unwrap(), fwd(2).reversed());
        assert_eq!(prev_rf_edge(&mesh, fwd(1)).unwrap(), fwd(4));

        // Edge 6 runs 4 -> 5 on the fourth face; its twin continues 4 -> 1.
        assert_eq!(next_rf_edge(&mesh, fwd(6)).unwrap(), fwd(10));
        assert_eq!(prev_rf_edge(&mesh, fwd(6)).unwrap(), fwd(1).reversed());
    }

    #[test]
    fn test_next_on_outer_side_is_invalid_topology() {
        let mesh = grid();
        let outside = fwd(0).reversed();
        assert_eq!(
            next_rf_edge(&mesh, outside).unwrap_err(),
            RfError::InvalidTopology { edge: 0, faces: 1 }
        );
        assert!(prev_rf_edge(&mesh, fwd(0)).is_err());

        // Edge 3 runs 0 -> 3 along the outside; only its reversal has a face.
        assert!(next_rf_edge(&mesh, fwd(3)).is_err());
        assert_eq!(next_rf_edge(&mesh, fwd(3).reversed()).unwrap(), fwd(0));
    }

    #[test]
    fn test_edge_normal() {
        let mesh = grid();
        let n = edge_normal(&mesh, EdgeId::new(1)).unwrap();
        assert!((n - Vector3::z()).norm() < 1e-12);

        assert_eq!(
            edge_normal(&mesh, EdgeId::new(0)).unwrap_err(),
            RfError::InvalidTopology { edge: 0, faces: 1 }
        );
    }

    #[test]
    fn test_edge_normal_on_fold() {
        // Roof ridge along the Y axis: both slopes tilt away from it.
        let vertices = vec![
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(0.0, 1.0, 1.0),
            Point3::new(-1.0, 1.0, 0.0),
            Point3::new(-1.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
        ];
        let faces = vec![[0, 1, 2, 3], [1, 0, 4, 5]];
        let mesh: HalfEdgeMesh = build_from_quads(&vertices, &faces).unwrap();

        let ridge = EdgeId::new(0);
        assert!(!mesh.is_edge_on_boundary(ridge));
        let n = edge_normal(&mesh, ridge).unwrap();
        assert!((n - Vector3::z()).norm() < 1e-12);
    }

    #[test]
    fn test_edge_normal_cancels_out() {
        // Second quad is folded flat back onto the first one.
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.5, 0.0),
            Point3::new(1.0, 0.5, 0.0),
        ];
        let faces = vec![[0, 1, 2, 3], [1, 0, 4, 5]];
        let mesh: HalfEdgeMesh = build_from_quads(&vertices, &faces).unwrap();

        assert!(matches!(
            edge_normal(&mesh, EdgeId::new(0)),
            Err(RfError::DegenerateGeometry { edge: 0, .. })
        ));
        assert!(build_member(&mesh, EdgeId::new(0)).is_err());
    }
}
