//! Error types for checked handle access.

use core::fmt;

use crate::Handle;

/// Handle rejected by a checked accessor.
///
/// Returned when the handle is the empty sentinel or addresses a slot the
/// pool has never materialised. Stale handles (already popped) are not
/// detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidHandle<N> {
    /// The handle that was rejected.
    pub handle: N,
    /// Number of slots in the pool at the time of the access.
    pub len: usize,
}

impl<N> InvalidHandle<N> {
    /// Returns the rejected handle.
    pub fn into_inner(self) -> N {
        self.handle
    }
}

impl<N: Handle> fmt::Display for InvalidHandle<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.handle.is_empty() {
            write!(f, "empty-stack sentinel does not address a node")
        } else {
            write!(
                f,
                "handle {} out of range (pool has {} nodes)",
                self.handle.as_usize(),
                self.len
            )
        }
    }
}

impl<N: Handle + fmt::Debug> std::error::Error for InvalidHandle<N> {}
