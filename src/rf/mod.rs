//! Reciprocal-frame members derived from a mesh.
//!
//! Every mesh edge becomes a structural member. [`RfSystem`] owns the mesh and
//! one [`Member`] record per edge, indexed by [`EdgeId`]:
//!
//! 1. [`RfSystem::create_rf_datastructure`] derives a centerline for every
//!    edge and, for interior edges, a normal plus the next and previous
//!    neighboring members.
//! 2. [`RfSystem::eccentrize_centerlines`] offsets interior centerlines so
//!    that members overlap pairwise instead of meeting at the vertices.
//! 3. [`RfSystem::extend_centerlines`] lengthens interior centerlines and
//!    trims them where they run into a boundary member.
//!
//! Each pass first computes all new records from the unchanged system and
//! only then writes them back, so a failing pass leaves the system as it
//! was. Passes fail on the first offending edge.
//!
//! # Example
//!
//! ```
//! use rframe::prelude::*;
//!
//! let mesh: HalfEdgeMesh = build_quad_grid(2, 2, 1.0).unwrap();
//! let mut rf = RfSystem::from_mesh(mesh).unwrap();
//!
//! rf.eccentrize_centerlines(0.1).unwrap();
//! rf.extend_centerlines(0.05).unwrap();
//!
//! let interior = rf
//!     .members()
//!     .filter(|(_, m)| m.category() == MemberCategory::Interior)
//!     .count();
//! assert_eq!(interior, 4);
//! ```

pub mod build;
mod eccentrize;
mod extend;
mod member;

use log::{debug, info};
use rayon::prelude::*;

pub use build::{edge_normal, next_rf_edge, prev_rf_edge};
pub use member::{Member, MemberCategory, Neighborhood};

use crate::error::{RfError, RfResult};
use crate::geom::{Line, DEFAULT_TOLERANCE};
use crate::mesh::{EdgeId, HalfEdgeMesh, MeshIndex};

/// Options for the reciprocal-frame passes.
#[derive(Debug, Clone)]
pub struct RfOptions {
    /// Distance tolerance for boundary trimming (default: 1e-6).
    ///
    /// Must be finite and non-negative; [`RfSystem::extend_centerlines`]
    /// rejects anything else.
    pub tolerance: f64,

    /// Whether to compute records on the rayon thread pool (default: false).
    ///
    /// Results are identical to the sequential path. When several edges fail,
    /// which error is reported is unspecified.
    pub parallel: bool,
}

impl Default for RfOptions {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            parallel: false,
        }
    }
}

impl RfOptions {
    /// Set the trimming tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set whether to use parallel execution.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// A mesh together with the reciprocal-frame member of each of its edges.
///
/// `Clone` performs a deep copy of both the mesh and the records, which is
/// how an unmodified input system is kept next to a transformed one.
#[derive(Debug, Clone)]
pub struct RfSystem<I: MeshIndex = u32> {
    mesh: HalfEdgeMesh<I>,
    members: Vec<Member<I>>,
    options: RfOptions,
}

impl<I: MeshIndex> RfSystem<I> {
    /// Wrap a mesh. No records exist until [`Self::create_rf_datastructure`] runs.
    pub fn new(mesh: HalfEdgeMesh<I>) -> Self {
        Self::with_options(mesh, RfOptions::default())
    }

    /// Wrap a mesh with custom options.
    pub fn with_options(mesh: HalfEdgeMesh<I>, options: RfOptions) -> Self {
        Self {
            mesh,
            members: Vec::new(),
            options,
        }
    }

    /// Wrap a mesh and create its records.
    pub fn from_mesh(mesh: HalfEdgeMesh<I>) -> RfResult<Self> {
        let mut system = Self::new(mesh);
        system.create_rf_datastructure()?;
        Ok(system)
    }

    /// The underlying mesh.
    #[inline]
    pub fn mesh(&self) -> &HalfEdgeMesh<I> {
        &self.mesh
    }

    /// Give back the mesh, dropping the records.
    pub fn into_mesh(self) -> HalfEdgeMesh<I> {
        self.mesh
    }

    /// The pass options.
    #[inline]
    pub fn options(&self) -> &RfOptions {
        &self.options
    }

    /// Whether records exist for the current mesh.
    pub fn is_built(&self) -> bool {
        !self.members.is_empty() && self.members.len() == self.mesh.num_edges()
    }

    /// The record of edge `e`, if records have been created.
    pub fn member(&self, e: EdgeId<I>) -> Option<&Member<I>> {
        self.members.get(e.index())
    }

    /// All records with their edges, in native edge order.
    pub fn members(&self) -> impl Iterator<Item = (EdgeId<I>, &Member<I>)> + '_ {
        self.members
            .iter()
            .enumerate()
            .map(|(i, m)| (EdgeId::new(i), m))
    }

    /// All centerlines, in native edge order.
    pub fn centerlines(&self) -> impl Iterator<Item = &Line> + '_ {
        self.members.iter().map(Member::centerline)
    }

    /// Whether edge `e` is a boundary or an interior member.
    ///
    /// Answered from the mesh, so it is available before records exist.
    pub fn category(&self, e: EdgeId<I>) -> MemberCategory {
        if self.mesh.is_edge_on_boundary(e) {
            MemberCategory::Boundary
        } else {
            MemberCategory::Interior
        }
    }

    /// Derive the record of every edge from vertex positions and topology.
    ///
    /// Running this again discards transformed centerlines and starts over
    /// from the mesh.
    ///
    /// # Errors
    /// [`RfError::InvalidTopology`] or [`RfError::DegenerateGeometry`] for the
    /// first interior edge whose normal or neighbors cannot be derived.
    pub fn create_rf_datastructure(&mut self) -> RfResult<()> {
        let mesh = &self.mesh;
        let edges: Vec<EdgeId<I>> = mesh.edge_ids().collect();
        let members = self.map_edges(&edges, |e| build::build_member(mesh, e))?;

        let interior = members.iter().filter(|m| m.neighborhood().is_some()).count();
        info!(
            "created {} members ({} interior, {} boundary)",
            members.len(),
            interior,
            members.len() - interior
        );

        self.members = members;
        Ok(())
    }

    /// Offset interior centerlines by `eccentricity` along their neighbors.
    ///
    /// Offsets accumulate over repeated calls. An eccentricity of zero leaves
    /// the geometry unchanged.
    ///
    /// # Errors
    /// - [`RfError::NotBuilt`] before [`Self::create_rf_datastructure`]
    /// - [`RfError::InvalidParameter`] for a negative or non-finite distance
    /// - [`RfError::DegenerateGeometry`] if a neighbor has zero length
    pub fn eccentrize_centerlines(&mut self, eccentricity: f64) -> RfResult<()> {
        RfError::check_distance("eccentricity", eccentricity)?;
        let interior = self.interior_edges()?;

        let mesh = &self.mesh;
        let members = &self.members;
        let lines = self.map_edges(&interior, |e| {
            let member = &members[e.index()];
            match member.neighborhood() {
                Some(nb) => {
                    eccentrize::eccentrized_centerline(mesh, e, member.centerline(), nb, eccentricity)
                }
                None => Ok(*member.centerline()),
            }
        })?;

        debug!("eccentrized {} interior centerlines by {}", lines.len(), eccentricity);
        self.write_centerlines(&interior, lines);
        Ok(())
    }

    /// Lengthen interior centerlines by `extension` and trim them at
    /// neighboring boundary members.
    ///
    /// The start moves back by `extension`, the end forward by twice that.
    ///
    /// # Errors
    /// - [`RfError::NotBuilt`] before [`Self::create_rf_datastructure`]
    /// - [`RfError::InvalidParameter`] for a negative or non-finite distance
    ///   or trimming tolerance
    /// - [`RfError::DegenerateGeometry`] for a zero-length centerline
    /// - [`RfError::NoIntersection`] if an extended centerline misses the
    ///   boundary member it should be trimmed at
    pub fn extend_centerlines(&mut self, extension: f64) -> RfResult<()> {
        RfError::check_distance("extension", extension)?;
        RfError::check_distance("tolerance", self.options.tolerance)?;
        let interior = self.interior_edges()?;

        let mesh = &self.mesh;
        let members = &self.members;
        let tolerance = self.options.tolerance;
        let lines = self.map_edges(&interior, |e| {
            let member = &members[e.index()];
            match member.neighborhood() {
                Some(nb) => extend::extended_centerline(
                    mesh,
                    e,
                    member.centerline(),
                    nb,
                    extension,
                    tolerance,
                ),
                None => Ok(*member.centerline()),
            }
        })?;

        debug!("extended {} interior centerlines by {}", lines.len(), extension);
        self.write_centerlines(&interior, lines);
        Ok(())
    }

    /// Interior edges, in native edge order.
    fn interior_edges(&self) -> RfResult<Vec<EdgeId<I>>> {
        if !self.is_built() {
            return Err(RfError::NotBuilt);
        }
        Ok(self
            .members()
            .filter(|(_, m)| m.neighborhood().is_some())
            .map(|(e, _)| e)
            .collect())
    }

    /// Apply `f` to every edge in `edges`, keeping input order.
    fn map_edges<T, F>(&self, edges: &[EdgeId<I>], f: F) -> RfResult<Vec<T>>
    where
        T: Send,
        F: Fn(EdgeId<I>) -> RfResult<T> + Sync + Send,
    {
        if self.options.parallel {
            edges.par_iter().map(|&e| f(e)).collect()
        } else {
            edges.iter().map(|&e| f(e)).collect()
        }
    }

    fn write_centerlines(&mut self, edges: &[EdgeId<I>], lines: Vec<Line>) {
        for (e, line) in edges.iter().zip(lines) {
            self.members[e.index()].centerline = line;
        }
    }
}
