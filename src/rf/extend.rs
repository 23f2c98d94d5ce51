//! Extension of member centerlines and trimming at the boundary.
//!
//! A centerline with unit direction `dir` is first lengthened to
//! `start - dir * x .. end + dir * 2x`. If the previous neighbor lies on the
//! boundary (checked first), or else the next neighbor does, the lengthened
//! centerline is cut at that boundary edge: the endpoint farther from the
//! cut point is kept and the result runs from it to the cut point. On a tie
//! the end is kept.

use log::trace;
use nalgebra::Point3;

use super::member::Neighborhood;
use crate::error::{RfError, RfResult};
use crate::geom::{intersection_segment_segment, Line};
use crate::mesh::{DirectedEdge, EdgeId, HalfEdgeMesh, MeshIndex};

/// The extended and, where needed, trimmed centerline of interior edge `e`.
pub(crate) fn extended_centerline<I: MeshIndex>(
    mesh: &HalfEdgeMesh<I>,
    e: EdgeId<I>,
    centerline: &Line,
    neighborhood: &Neighborhood<I>,
    extension: f64,
    tolerance: f64,
) -> RfResult<Line> {
    let direction = centerline.direction().ok_or(RfError::DegenerateGeometry {
        edge: e.index(),
        reason: "centerline has zero length",
    })?;

    let extended = Line::new(
        centerline.start - direction * extension,
        centerline.end + direction * (extension * 2.0),
    );

    match boundary_neighbor(mesh, neighborhood) {
        Some(boundary) => trim_at_boundary(mesh, e, &extended, boundary, tolerance),
        None => Ok(extended),
    }
}

/// The neighbor to trim against: `prev_edge` wins over `next_edge`.
pub(crate) fn boundary_neighbor<I: MeshIndex>(
    mesh: &HalfEdgeMesh<I>,
    neighborhood: &Neighborhood<I>,
) -> Option<DirectedEdge<I>> {
    [neighborhood.prev_edge, neighborhood.next_edge]
        .into_iter()
        .find(|d| mesh.is_edge_on_boundary(d.edge()))
}

/// Cut `centerline` where it meets the mesh segment of `boundary`.
fn trim_at_boundary<I: MeshIndex>(
    mesh: &HalfEdgeMesh<I>,
    e: EdgeId<I>,
    centerline: &Line,
    boundary: DirectedEdge<I>,
    tolerance: f64,
) -> RfResult<Line> {
    let boundary_line = mesh.directed_line(boundary);
    let (cut, _) = intersection_segment_segment(centerline, &boundary_line, tolerance).ok_or(
        RfError::NoIntersection {
            edge: e.index(),
            boundary: boundary.edge().index(),
        },
    )?;

    trace!("trimming {:?} at {:?} against {:?}", e, cut, boundary);
    Ok(Line::new(farther_endpoint(centerline, &cut), cut))
}

fn farther_endpoint(line: &Line, point: &Point3<f64>) -> Point3<f64> {
    if (line.end - point).norm() < (line.start - point).norm() {
        line.start
    } else {
        line.end
    }
}
