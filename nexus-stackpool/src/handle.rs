//! Handle trait for 1-indexed node addresses.
//!
//! A handle names a node in a [`StackPool`](crate::StackPool), or the empty
//! sentinel `0`. Storage slot `i` is addressed by handle `i + 1`, which keeps
//! `0` free to mean "empty stack" and "end of chain".

/// Integer-like type used to address nodes in a pool.
///
/// Implemented for the unsigned integer types. Narrow types (`u8`, `u16`,
/// `u32`) shrink every node's link field at the cost of a smaller handle
/// space; the pool panics if growth would produce a handle that does not fit.
///
/// # Example
///
/// ```
/// use nexus_stackpool::Handle;
///
/// assert!(u32::EMPTY.is_empty());
/// assert_eq!(u32::from_slot(0), Some(1));
/// assert_eq!(7u32.slot(), 6);
/// ```
///
/// # Custom Handle Types
///
/// ```
/// use nexus_stackpool::Handle;
///
/// #[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// struct FrontierId(u32);
///
/// impl Handle for FrontierId {
///     const EMPTY: Self = FrontierId(0);
///
///     fn from_usize(val: usize) -> Option<Self> {
///         u32::try_from(val).ok().map(FrontierId)
///     }
///
///     fn as_usize(&self) -> usize {
///         self.0 as usize
///     }
/// }
///
/// assert!(FrontierId::EMPTY.is_empty());
/// assert_eq!(FrontierId::from_slot(4), Some(FrontierId(5)));
/// ```
pub trait Handle: Copy + Eq {
    /// The sentinel: empty stack, end of chain, empty free list.
    ///
    /// Must convert to `0` through [`as_usize`](Handle::as_usize).
    const EMPTY: Self;

    /// Converts a raw handle value, or `None` if it does not fit.
    fn from_usize(val: usize) -> Option<Self>;

    /// Returns the raw handle value.
    fn as_usize(&self) -> usize;

    /// Returns `true` if this is the sentinel.
    #[inline]
    fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }

    /// Returns the handle addressing storage slot `slot` (0-based).
    #[inline]
    fn from_slot(slot: usize) -> Option<Self> {
        slot.checked_add(1).and_then(Self::from_usize)
    }

    /// Returns the 0-based storage slot this handle addresses.
    ///
    /// Meaningless (wraps) for the sentinel.
    #[inline]
    fn slot(&self) -> usize {
        self.as_usize().wrapping_sub(1)
    }
}

macro_rules! impl_handle_for_unsigned {
    ($($ty:ty),*) => {
        $(
            impl Handle for $ty {
                const EMPTY: Self = 0;

                #[inline]
                fn from_usize(val: usize) -> Option<Self> {
                    <$ty>::try_from(val).ok()
                }

                #[inline]
                fn as_usize(&self) -> usize {
                    *self as usize
                }
            }
        )*
    };
}

impl_handle_for_unsigned!(u8, u16, u32, usize);

impl Handle for u64 {
    const EMPTY: Self = 0;

    #[inline]
    fn from_usize(val: usize) -> Option<Self> {
        Some(val as u64)
    }

    // Handles only ever come from `from_usize`, so this never truncates.
    #[inline]
    fn as_usize(&self) -> usize {
        *self as usize
    }
}
