//! Eccentrization: offsetting member ends along their neighbors.
//!
//! With `nd` and `pd` the unit directions of a member's next and previous
//! neighbor, and `d` the eccentricity:
//!
//! ```text
//! start' = start + pd * d
//! end'   = end   - pd * d + nd * d
//! ```
//!
//! The start slides along the previous neighbor, which leaves the member's
//! start vertex. The end is pulled back by the same amount and pushed along
//! the next neighbor, which leaves the member's end vertex. The offsets are
//! applied to the *current* centerline, so repeated passes accumulate.

use nalgebra::Vector3;

use super::member::Neighborhood;
use crate::error::{RfError, RfResult};
use crate::geom::Line;
use crate::mesh::{DirectedEdge, EdgeId, HalfEdgeMesh, MeshIndex};

/// The eccentrized centerline of interior edge `e`.
pub(crate) fn eccentrized_centerline<I: MeshIndex>(
    mesh: &HalfEdgeMesh<I>,
    e: EdgeId<I>,
    centerline: &Line,
    neighborhood: &Neighborhood<I>,
    eccentricity: f64,
) -> RfResult<Line> {
    let next_direction = neighbor_direction(mesh, e, neighborhood.next_edge, "next neighbor has zero length")?;
    let prev_direction = neighbor_direction(mesh, e, neighborhood.prev_edge, "previous neighbor has zero length")?;

    let start_shift = prev_direction * eccentricity;
    let end_shift = -start_shift + next_direction * eccentricity;

    Ok(Line::new(
        centerline.start + start_shift,
        centerline.end + end_shift,
    ))
}

fn neighbor_direction<I: MeshIndex>(
    mesh: &HalfEdgeMesh<I>,
    e: EdgeId<I>,
    neighbor: DirectedEdge<I>,
    reason: &'static str,
) -> RfResult<Vector3<f64>> {
    mesh.directed_direction(neighbor)
        .ok_or(RfError::DegenerateGeometry {
            edge: e.index(),
            reason,
        })
}
