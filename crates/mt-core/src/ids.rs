//! Dense, typed indices into `GraphIndex` storage.
//!
//! The graph payload names nodes and ports with strings.  Those strings are
//! resolved once at load time; everything after that (adjacency, routing
//! back-pointers, port → node links) works on these `u32` wrappers so the
//! hot loops index plain `Vec`s.

use std::fmt;

/// Generate a typed index wrapper around `u32`.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident, $label:literal;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub u32);

        impl $name {
            /// Sentinel for "unset"; never produced by a loaded graph.
            pub const INVALID: $name = $name(u32::MAX);

            /// Position of this id in its backing `Vec`.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }

            /// Inverse of [`index`](Self::index).
            ///
            /// The payload loader rejects graphs that would overflow `u32`.
            #[inline(always)]
            pub fn from_index(i: usize) -> Self {
                debug_assert!(i < u32::MAX as usize);
                $name(i as u32)
            }
        }

        impl Default for $name {
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, "#{}"), self.0)
            }
        }
    };
}

typed_id! {
    /// Index of a navigable mesh node.
    pub struct NodeId, "node";
}

typed_id! {
    /// Index of an undirected lane (source data or dateline bridge).
    pub struct EdgeId, "edge";
}

typed_id! {
    /// Index of a port in the port catalog.
    pub struct PortId, "port";
}
