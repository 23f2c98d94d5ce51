//! Index types for mesh elements.
//!
//! This module provides type-safe index wrappers for vertices, half-edges, edges
//! and faces, plus the [`DirectedEdge`] handle used for member adjacency.
//! The indices are generic over the underlying integer type to support meshes of
//! different sizes (u16 for small meshes, u32 for typical meshes, u64 for massive meshes).

use std::fmt::{self, Debug};
use std::hash::Hash;

/// Integer types usable as mesh indices (`u16`, `u32`, `u64`).
///
/// The largest value of each type is reserved as the null sentinel.
pub trait MeshIndex: Copy + Clone + Eq + PartialEq + Ord + PartialOrd + Hash + Debug + Send + Sync + 'static {
    /// The maximum valid index value.
    const MAX: Self;

    /// A sentinel value representing an invalid/null index.
    const INVALID: Self;

    /// Convert from usize to this index type.
    ///
    /// Overflow is only checked in debug builds.
    fn from_usize(v: usize) -> Self;

    /// Convert to usize.
    fn to_usize(self) -> usize;

    /// Check if this is a valid (non-sentinel) index.
    fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

macro_rules! impl_mesh_index {
    ($($ty:ty),*) => {
        $(
            impl MeshIndex for $ty {
                const MAX: Self = <$ty>::MAX - 1;
                const INVALID: Self = <$ty>::MAX;

                #[inline]
                fn from_usize(v: usize) -> Self {
                    debug_assert!(
                        v as u128 <= Self::MAX as u128,
                        "index {} too large for {}",
                        v,
                        stringify!($ty)
                    );
                    v as $ty
                }

                #[inline]
                fn to_usize(self) -> usize {
                    self as usize
                }
            }
        )*
    };
}

impl_mesh_index!(u16, u32, u64);

/// A type-safe vertex index.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct VertexId<I: MeshIndex = u32>(I);

/// A type-safe half-edge index.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct HalfEdgeId<I: MeshIndex = u32>(I);

/// A type-safe face index.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct FaceId<I: MeshIndex = u32>(I);

/// A type-safe edge index (for full edges, not half-edges).
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct EdgeId<I: MeshIndex = u32>(I);

macro_rules! impl_index_type {
    ($name:ident, $display:literal) => {
        impl<I: MeshIndex> $name<I> {
            /// Create a new index from a raw value.
            #[inline]
            pub fn new(index: usize) -> Self {
                Self(I::from_usize(index))
            }

            /// Create an invalid/null index.
            #[inline]
            pub fn invalid() -> Self {
                Self(I::INVALID)
            }

            /// Get the raw index value.
            #[inline]
            pub fn index(self) -> usize {
                self.0.to_usize()
            }

            /// Get the raw value of the underlying type.
            #[inline]
            pub fn raw(self) -> I {
                self.0
            }

            /// Check if this is a valid (non-null) index.
            #[inline]
            pub fn is_valid(self) -> bool {
                self.0.is_valid()
            }
        }

        impl<I: MeshIndex> Debug for $name<I> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_valid() {
                    write!(f, "{}({})", $display, self.index())
                } else {
                    write!(f, "{}(INVALID)", $display)
                }
            }
        }

        impl<I: MeshIndex> Default for $name<I> {
            fn default() -> Self {
                Self::invalid()
            }
        }

        impl<I: MeshIndex> From<usize> for $name<I> {
            fn from(v: usize) -> Self {
                Self::new(v)
            }
        }
    };
}

impl_index_type!(VertexId, "V");
impl_index_type!(HalfEdgeId, "HE");
impl_index_type!(FaceId, "F");
impl_index_type!(EdgeId, "E");

/// One of the two traversal directions of an undirected edge.
///
/// A directed edge is an [`EdgeId`] plus an orientation bit. The forward
/// orientation is the edge's canonical orientation, from its lower vertex
/// index to its higher one. Attributes
/// are stored per undirected edge, so [`DirectedEdge::edge`] is the key used
/// to look them up.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DirectedEdge<I: MeshIndex = u32> {
    edge: EdgeId<I>,
    reversed: bool,
}

impl<I: MeshIndex> DirectedEdge<I> {
    /// Create a directed edge from an edge and an orientation bit.
    #[inline]
    pub fn new(edge: EdgeId<I>, reversed: bool) -> Self {
        Self { edge, reversed }
    }

    /// The canonical orientation of `edge`.
    #[inline]
    pub fn forward(edge: EdgeId<I>) -> Self {
        Self::new(edge, false)
    }

    /// The undirected edge this traverses.
    #[inline]
    pub fn edge(self) -> EdgeId<I> {
        self.edge
    }

    /// Whether this runs against the canonical orientation.
    #[inline]
    pub fn is_reversed(self) -> bool {
        self.reversed
    }

    /// The same edge traversed the other way.
    #[inline]
    pub fn reversed(self) -> Self {
        Self::new(self.edge, !self.reversed)
    }
}

impl<I: MeshIndex> Debug for DirectedEdge<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.reversed { '-' } else { '+' };
        write!(f, "{:?}{}", self.edge, sign)
    }
}

impl<I: MeshIndex> From<DirectedEdge<I>> for EdgeId<I> {
    fn from(d: DirectedEdge<I>) -> Self {
        d.edge
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_id() {
        let v: VertexId = VertexId::new(42);
        assert_eq!(v.index(), 42);
        assert!(v.is_valid());

        let invalid: VertexId = VertexId::invalid();
        assert!(!invalid.is_valid());
    }

    #[test]
    fn test_type_safety() {
        // These are different types and cannot be mixed
        let v: VertexId = VertexId::new(0);
        let he: HalfEdgeId = HalfEdgeId::new(0);
        let f: FaceId = FaceId::new(0);

        // All have the same raw value but are distinct types
        assert_eq!(v.index(), he.index());
        assert_eq!(he.index(), f.index());
    }

    #[test]
    fn test_small_indices() {
        let v: VertexId<u16> = VertexId::new(1000);
        assert_eq!(v.index(), 1000);
    }

    #[test]
    fn test_debug_format() {
        let v: VertexId = VertexId::new(42);
        assert_eq!(format!("{:?}", v), "V(42)");

        let invalid: VertexId = VertexId::invalid();
        assert_eq!(format!("{:?}", invalid), "V(INVALID)");
    }

    #[test]
    fn test_directed_edge() {
        let e: EdgeId = EdgeId::new(7);
        let d = DirectedEdge::forward(e);
        assert!(!d.is_reversed());
        assert_eq!(d.edge(), e);

        let r = d.reversed();
        assert!(r.is_reversed());
        assert_eq!(r.edge(), e);
        assert_eq!(r.reversed(), d);
        assert_ne!(r, d);

        let back: EdgeId = r.into();
        assert_eq!(back, e);
        assert_eq!(format!("{:?}", d), "E(7)+");
        assert_eq!(format!("{:?}", r), "E(7)-");
    }
}
