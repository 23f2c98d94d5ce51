//! Per-edge member records.

use nalgebra::Vector3;

use crate::geom::Line;
use crate::mesh::{DirectedEdge, MeshIndex};

/// Whether a member sits on the mesh boundary or between two faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberCategory {
    /// The edge has a single incident face.
    Boundary,
    /// The edge is shared by two faces.
    Interior,
}

impl MemberCategory {
    /// Lowercase name, suitable as a category tag for downstream tools.
    pub fn as_str(self) -> &'static str {
        match self {
            MemberCategory::Boundary => "boundary",
            MemberCategory::Interior => "interior",
        }
    }
}

impl std::fmt::Display for MemberCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Orientation and adjacency of an interior member.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighborhood<I: MeshIndex = u32> {
    /// Unit average of the two incident face normals.
    pub normal: Vector3<f64>,
    /// The half-edge following this member's canonical half-edge in its face.
    pub next_edge: DirectedEdge<I>,
    /// The half-edge following the reversed half-edge in the opposite face.
    pub prev_edge: DirectedEdge<I>,
}

/// The reciprocal-frame record stored for one mesh edge.
///
/// Every member has a centerline. Only interior members carry a
/// [`Neighborhood`]; boundary members have no normal and no neighbors.
#[derive(Debug, Clone, PartialEq)]
pub struct Member<I: MeshIndex = u32> {
    pub(crate) centerline: Line,
    pub(crate) neighborhood: Option<Neighborhood<I>>,
}

impl<I: MeshIndex> Member<I> {
    /// A boundary member.
    pub(crate) fn boundary(centerline: Line) -> Self {
        Self {
            centerline,
            neighborhood: None,
        }
    }

    /// An interior member.
    pub(crate) fn interior(centerline: Line, neighborhood: Neighborhood<I>) -> Self {
        Self {
            centerline,
            neighborhood: Some(neighborhood),
        }
    }

    /// The member's current axis.
    #[inline]
    pub fn centerline(&self) -> &Line {
        &self.centerline
    }

    /// Normal, next and previous neighbor, for interior members.
    #[inline]
    pub fn neighborhood(&self) -> Option<&Neighborhood<I>> {
        self.neighborhood.as_ref()
    }

    /// Orientation normal (interior members only).
    #[inline]
    pub fn normal(&self) -> Option<Vector3<f64>> {
        self.neighborhood.map(|n| n.normal)
    }

    /// Next neighbor (interior members only).
    #[inline]
    pub fn next_edge(&self) -> Option<DirectedEdge<I>> {
        self.neighborhood.map(|n| n.next_edge)
    }

    /// Previous neighbor (interior members only).
    #[inline]
    pub fn prev_edge(&self) -> Option<DirectedEdge<I>> {
        self.neighborhood.map(|n| n.prev_edge)
    }

    /// Boundary or interior.
    pub fn category(&self) -> MemberCategory {
        if self.neighborhood.is_some() {
            MemberCategory::Interior
        } else {
            MemberCategory::Boundary
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::EdgeId;
    use nalgebra::Point3;

    fn axis() -> Line {
        Line::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0))
    }

    #[test]
    fn test_boundary_member_has_no_neighborhood() {
        let member: Member = Member::boundary(axis());
        assert_eq!(member.category(), MemberCategory::Boundary);
        assert!(member.normal().is_none());
        assert!(member.next_edge().is_none());
        assert!(member.prev_edge().is_none());
        assert_eq!(member.centerline(), &axis());
    }

    #[test]
    fn test_interior_member() {
        let next = DirectedEdge::forward(EdgeId::new(2));
        let prev = DirectedEdge::forward(EdgeId::new(5)).reversed();
        let member: Member = Member::interior(
            axis(),
            Neighborhood {
                normal: Vector3::z(),
                next_edge: next,
                prev_edge: prev,
            },
        );
        assert_eq!(member.category(), MemberCategory::Interior);
        assert_eq!(member.normal(), Some(Vector3::z()));
        assert_eq!(member.next_edge(), Some(next));
        assert_eq!(member.prev_edge(), Some(prev));
        assert_eq!(member.category().to_string(), "interior");
    }
}
