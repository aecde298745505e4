//! Forward traversal over a stack.

use core::fmt;
use core::iter::FusedIterator;

use crate::Handle;
use crate::pool::Node;

/// Iterator over the values of one stack, top first.
///
/// Created by [`StackPool::iter`](crate::StackPool::iter). Single pass and
/// finite: it stops at the first empty handle. Two iterators compare equal
/// iff they sit at the same [`position`](Iter::position).
///
/// # Example
///
/// ```
/// use nexus_stackpool::StackPool;
///
/// let mut pool: StackPool<char> = StackPool::new();
/// let mut head = pool.new_stack();
/// for c in ['a', 'b', 'c'] {
///     head = pool.push(c, head);
/// }
///
/// let mut iter = pool.iter(head);
/// assert_eq!(iter.next(), Some(&'c'));
/// assert_eq!(iter.by_ref().count(), 2);
/// assert_eq!(iter.position(), pool.end());
/// ```
pub struct Iter<'a, T, N> {
    nodes: &'a [Node<T, N>],
    current: N,
}

impl<'a, T, N: Handle> Iter<'a, T, N> {
    #[inline]
    pub(crate) fn new(nodes: &'a [Node<T, N>], head: N) -> Self {
        Self {
            nodes,
            current: head,
        }
    }

    /// Returns the handle of the node the next call to `next` yields.
    ///
    /// Equals the empty sentinel once the iterator is exhausted.
    #[inline]
    pub fn position(&self) -> N {
        self.current
    }
}

impl<'a, T, N: Handle> Iterator for Iter<'a, T, N> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.current.is_empty() {
            return None;
        }

        let node = &self.nodes[self.current.slot()];
        self.current = node.next;
        Some(&node.value)
    }
}

impl<T, N: Handle> FusedIterator for Iter<'_, T, N> {}

impl<T, N: Handle> Clone for Iter<'_, T, N> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes,
            current: self.current,
        }
    }
}

impl<T, N: Handle> PartialEq for Iter<'_, T, N> {
    fn eq(&self, other: &Self) -> bool {
        self.current == other.current
    }
}

impl<T, N: Handle> Eq for Iter<'_, T, N> {}

impl<T, N: Handle + fmt::Debug> fmt::Debug for Iter<'_, T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("position", &self.current)
            .finish()
    }
}
