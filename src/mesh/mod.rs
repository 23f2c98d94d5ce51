//! Core mesh data structures.
//!
//! This module provides the polygonal half-edge mesh that the
//! reciprocal-frame passes read from, and related types.
//!
//! # Overview
//!
//! The primary type is [`HalfEdgeMesh`], a half-edge (doubly-connected edge
//! list) representation with an explicit table of undirected edges. It answers
//! the adjacency queries the passes need in O(1): the faces on either side of
//! an edge, the next half-edge around a face, whether an edge is on the
//! boundary, and the edges around a vertex.
//!
//! # Index Types
//!
//! Mesh elements are identified by type-safe index wrappers:
//! - [`VertexId`] - Identifies a vertex
//! - [`HalfEdgeId`] - Identifies a half-edge
//! - [`EdgeId`] - Identifies an undirected edge
//! - [`FaceId`] - Identifies a face
//!
//! [`DirectedEdge`] pairs an [`EdgeId`] with an orientation bit and converts
//! to and from half-edges via [`HalfEdgeMesh::directed_halfedge`] and
//! [`HalfEdgeMesh::directed_edge`].
//!
//! These indices are generic over the underlying integer type ([`MeshIndex`] trait),
//! allowing you to choose `u16`, `u32`, or `u64` based on mesh size.
//!
//! # Construction
//!
//! ```
//! use rframe::mesh::{HalfEdgeMesh, build_from_quads};
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//! ];
//! let faces = vec![[0, 1, 2, 3]];
//!
//! let mesh: HalfEdgeMesh = build_from_quads(&vertices, &faces).unwrap();
//! assert_eq!(mesh.num_edges(), 4);
//! ```

mod builder;
mod halfedge;
mod index;

pub use builder::{build_from_polygons, build_from_quads, build_from_triangles, build_quad_grid};
pub use halfedge::{
    Edge, Face, FaceHalfEdgeIter, HalfEdge, HalfEdgeMesh, Vertex, VertexHalfEdgeIter,
};
pub use index::{DirectedEdge, EdgeId, FaceId, HalfEdgeId, MeshIndex, VertexId};
