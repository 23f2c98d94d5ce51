//! # rframe
//!
//! Reciprocal-frame member topology derived from polygonal meshes.
//!
//! In a reciprocal frame no more than two members meet at a point: around
//! every node the members support each other in a fan, each one resting on
//! its neighbor. rframe takes a polygonal mesh, turns every edge into a
//! member, and prepares the member axes for a fabrication pipeline.
//!
//! ## Features
//!
//! - **Half-edge data structure**: polygonal faces, explicit undirected edges,
//!   O(1) adjacency queries with type-safe indices
//! - **Flexible indexing**: 16-bit, 32-bit, and 64-bit indices
//! - **Member records**: centerline, orientation normal, and the next and
//!   previous neighbor of every interior member
//! - **Eccentrization**: offsets member ends so members overlap pairwise
//! - **Extension and trimming**: lengthens members and cuts them at the
//!   boundary
//! - **Optional parallelism**: passes can run on the rayon thread pool
//!
//! ## Quick Start
//!
//! ```
//! use rframe::prelude::*;
//!
//! // A 3x2 grid of unit quads in the XY plane.
//! let mesh: HalfEdgeMesh = build_quad_grid(3, 2, 1.0).unwrap();
//! let mut rf = RfSystem::from_mesh(mesh).unwrap();
//!
//! // Keep the untouched system around for comparison.
//! let original = rf.clone();
//!
//! rf.eccentrize_centerlines(0.1).unwrap();
//! rf.extend_centerlines(0.05).unwrap();
//!
//! for (edge, member) in rf.members() {
//!     let before = original.member(edge).unwrap().centerline();
//!     match member.category() {
//!         MemberCategory::Boundary => assert_eq!(member.centerline(), before),
//!         MemberCategory::Interior => assert!(member.normal().is_some()),
//!     }
//! }
//! ```
//!
//! ## Building Meshes Programmatically
//!
//! ```
//! use rframe::prelude::*;
//! use nalgebra::Point3;
//!
//! // A quad and a triangle sharing the edge 1-2.
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//!     Point3::new(2.0, 0.5, 0.0),
//! ];
//! let faces = vec![vec![0, 1, 2, 3], vec![1, 4, 2]];
//!
//! let mesh: HalfEdgeMesh = build_from_polygons(&vertices, &faces).unwrap();
//! assert_eq!(mesh.num_edges(), 6);
//!
//! let rf = RfSystem::from_mesh(mesh).unwrap();
//! let interior: Vec<_> = rf
//!     .members()
//!     .filter(|(_, m)| m.category() == MemberCategory::Interior)
//!     .collect();
//! assert_eq!(interior.len(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod geom;
pub mod mesh;
pub mod rf;

/// Prelude module for convenient imports.
///
/// ```
/// use rframe::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{MeshError, Result, RfError, RfResult};
    pub use crate::geom::Line;
    pub use crate::mesh::{
        build_from_polygons, build_from_quads, build_from_triangles, build_quad_grid,
        DirectedEdge, EdgeId, FaceId, HalfEdgeId, HalfEdgeMesh, MeshIndex, VertexId,
    };
    pub use crate::rf::{Member, MemberCategory, Neighborhood, RfOptions, RfSystem};
}

// Re-export nalgebra types for convenience
pub use nalgebra;

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use nalgebra::Point3;

    #[test]
    fn test_mixed_polygons() {
        // Quad strip with a triangle cap.
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(2.0, 1.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(3.0, 0.5, 0.0),
        ];
        let faces = vec![vec![0, 1, 4, 5], vec![1, 2, 3, 4], vec![2, 6, 3]];

        let mesh: HalfEdgeMesh = build_from_polygons(&vertices, &faces).unwrap();
        assert_eq!(mesh.num_vertices(), 7);
        assert_eq!(mesh.num_faces(), 3);
        assert_eq!(mesh.num_edges(), 9);
        assert!(mesh.is_valid());

        let mut rf = RfSystem::from_mesh(mesh).unwrap();
        let interior: Vec<EdgeId> = rf
            .members()
            .filter(|(_, m)| m.category() == MemberCategory::Interior)
            .map(|(e, _)| e)
            .collect();
        assert_eq!(interior.len(), 2);

        rf.eccentrize_centerlines(0.05).unwrap();
        for e in interior {
            let member = rf.member(e).unwrap();
            let n = member.normal().unwrap();
            assert!((n - nalgebra::Vector3::z()).norm() < 1e-10);
            assert!(member.centerline().length() > 0.0);
        }
    }
}
