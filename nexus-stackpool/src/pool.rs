//! Stack pool: many singly-linked stacks over one recycling node array.
//!
//! Nodes live in a single `Vec`. A stack is nothing but the handle of its
//! head node; each node links to the next through its `next` handle. Popped
//! nodes go onto a pool-owned free list and are reused by later pushes, so
//! storage only grows when every slot is in use.

use std::collections::TryReserveError;

use crate::{Handle, InvalidHandle, Iter};

/// A value plus the handle of its successor.
#[derive(Debug, Clone)]
pub(crate) struct Node<T, N> {
    pub(crate) value: T,
    pub(crate) next: N,
}

/// Pool of singly-linked stacks sharing one contiguous storage array.
///
/// Stacks are represented by the [`Handle`] of their head node. The empty
/// stack is [`Handle::EMPTY`] (`0`); handles are 1-indexed into storage.
///
/// # Example
///
/// ```
/// use nexus_stackpool::StackPool;
///
/// let mut pool: StackPool<u64> = StackPool::with_capacity(16);
///
/// let mut a = pool.new_stack();
/// let mut b = pool.new_stack();
///
/// a = pool.push(1, a);
/// b = pool.push(10, b);
/// a = pool.push(2, a);
///
/// assert_eq!(pool.iter(a).copied().collect::<Vec<_>>(), vec![2, 1]);
/// assert_eq!(*pool.value(b), 10);
///
/// a = pool.pop(a);
/// assert_eq!(*pool.value(a), 1);
///
/// // Popped node is recycled: no growth.
/// let before = pool.len();
/// b = pool.push(20, b);
/// assert_eq!(pool.len(), before);
///
/// b = pool.free_stack(b);
/// assert!(pool.empty(b));
/// ```
///
/// # Handle Discipline
///
/// The pool trusts its caller. It does not track which stack a node belongs
/// to, so the following are contract violations:
///
/// - using a handle after it was popped or freed
/// - letting two live stacks share a node
/// - passing a handle from a different pool
///
/// Safe accessors panic on a handle that addresses no slot (including the
/// sentinel) and otherwise return whatever the slot currently holds. The
/// `unsafe` `*_unchecked` accessors skip even that check.
#[derive(Debug, Clone)]
pub struct StackPool<T, N: Handle = usize> {
    nodes: Vec<Node<T, N>>,
    free_nodes: N,
}

impl<T, N: Handle> Default for StackPool<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, N: Handle> StackPool<T, N> {
    /// Creates an empty pool. Does not allocate.
    #[inline]
    pub const fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free_nodes: N::EMPTY,
        }
    }

    /// Creates an empty pool with room for at least `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut pool = Self::new();
        pool.reserve(capacity);
        pool
    }

    /// Returns a new, empty stack.
    #[inline]
    pub const fn new_stack(&self) -> N {
        N::EMPTY
    }

    /// Returns the end-of-chain marker.
    #[inline]
    pub const fn end(&self) -> N {
        N::EMPTY
    }

    /// Returns `true` if `head` is the empty stack.
    #[inline]
    pub fn empty(&self, head: N) -> bool {
        head.is_empty()
    }

    /// Reserves storage for at least `n` nodes in total.
    ///
    /// A hint only: handles are unaffected and `n` below the current
    /// length is a no-op.
    ///
    /// # Panics
    ///
    /// Panics if the new capacity overflows `isize::MAX` bytes. Allocation
    /// failure aborts through the global allocation error handler.
    pub fn reserve(&mut self, n: usize) {
        let additional = n.saturating_sub(self.nodes.len());
        self.nodes.reserve(additional);
        tracing::trace!(
            requested = n,
            capacity = self.nodes.capacity(),
            "stack pool reserved"
        );
    }

    /// Fallible [`reserve`](Self::reserve).
    ///
    /// # Errors
    ///
    /// Returns the allocator's error if the capacity overflows or the
    /// allocation fails. The pool is left unchanged.
    pub fn try_reserve(&mut self, n: usize) -> Result<(), TryReserveError> {
        let additional = n.saturating_sub(self.nodes.len());
        self.nodes.try_reserve(additional)?;
        tracing::trace!(
            requested = n,
            capacity = self.nodes.capacity(),
            "stack pool reserved"
        );
        Ok(())
    }

    /// Returns the number of nodes storage can hold without reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Returns the number of slots in storage, live or free.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if no slot was ever materialised.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the head of the free list.
    #[inline]
    pub fn free_head(&self) -> N {
        self.free_nodes
    }

    /// Counts the nodes waiting on the free list. O(free nodes).
    pub fn free_len(&self) -> usize {
        self.stack_len(self.free_nodes)
    }

    /// Counts the nodes of the stack starting at `head`. O(length).
    pub fn stack_len(&self, head: N) -> usize {
        let mut len = 0;
        let mut current = head;
        while !current.is_empty() {
            len += 1;
            current = self.nodes[current.slot()].next;
        }
        len
    }

    /// Returns the value stored at `handle`.
    ///
    /// # Panics
    ///
    /// Panics if `handle` is the sentinel or beyond [`len`](Self::len).
    #[inline]
    pub fn value(&self, handle: N) -> &T {
        &self.nodes[handle.slot()].value
    }

    /// Returns the value stored at `handle`, mutably.
    ///
    /// # Panics
    ///
    /// Panics if `handle` is the sentinel or beyond [`len`](Self::len).
    #[inline]
    pub fn value_mut(&mut self, handle: N) -> &mut T {
        &mut self.nodes[handle.slot()].value
    }

    /// Returns the successor of `handle`.
    ///
    /// # Panics
    ///
    /// Panics if `handle` is the sentinel or beyond [`len`](Self::len).
    #[inline]
    pub fn next(&self, handle: N) -> N {
        self.nodes[handle.slot()].next
    }

    /// Returns the successor link of `handle` for splicing.
    ///
    /// Writing through it relinks chains; keeping them disjoint is up to
    /// the caller.
    ///
    /// # Panics
    ///
    /// Panics if `handle` is the sentinel or beyond [`len`](Self::len).
    #[inline]
    pub fn next_mut(&mut self, handle: N) -> &mut N {
        &mut self.nodes[handle.slot()].next
    }

    /// Checked [`value`](Self::value).
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHandle`] for the sentinel or an out-of-range handle.
    #[inline]
    pub fn try_value(&self, handle: N) -> Result<&T, InvalidHandle<N>> {
        self.node(handle).map(|node| &node.value)
    }

    /// Checked [`value_mut`](Self::value_mut).
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHandle`] for the sentinel or an out-of-range handle.
    #[inline]
    pub fn try_value_mut(&mut self, handle: N) -> Result<&mut T, InvalidHandle<N>> {
        self.node_mut(handle).map(|node| &mut node.value)
    }

    /// Checked [`next`](Self::next).
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHandle`] for the sentinel or an out-of-range handle.
    #[inline]
    pub fn try_next(&self, handle: N) -> Result<N, InvalidHandle<N>> {
        self.node(handle).map(|node| node.next)
    }

    /// Checked [`next_mut`](Self::next_mut).
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHandle`] for the sentinel or an out-of-range handle.
    #[inline]
    pub fn try_next_mut(&mut self, handle: N) -> Result<&mut N, InvalidHandle<N>> {
        self.node_mut(handle).map(|node| &mut node.next)
    }

    /// Returns the value at `handle` without bounds checking.
    ///
    /// # Safety
    ///
    /// `handle` must be in `1..=self.len()`.
    #[inline]
    pub unsafe fn value_unchecked(&self, handle: N) -> &T {
        unsafe { &self.nodes.get_unchecked(handle.slot()).value }
    }

    /// Returns the value at `handle` mutably without bounds checking.
    ///
    /// # Safety
    ///
    /// `handle` must be in `1..=self.len()`.
    #[inline]
    pub unsafe fn value_unchecked_mut(&mut self, handle: N) -> &mut T {
        unsafe { &mut self.nodes.get_unchecked_mut(handle.slot()).value }
    }

    /// Returns the successor of `handle` without bounds checking.
    ///
    /// # Safety
    ///
    /// `handle` must be in `1..=self.len()`.
    #[inline]
    pub unsafe fn next_unchecked(&self, handle: N) -> N {
        unsafe { self.nodes.get_unchecked(handle.slot()).next }
    }

    /// Pushes `value` onto the stack headed by `head`, returning the new head.
    ///
    /// Reuses the most recently freed node if there is one; otherwise
    /// appends to storage, which may reallocate. Handles stay valid across
    /// reallocation.
    ///
    /// # Panics
    ///
    /// Panics if storage would grow past the largest value `N` can hold.
    #[inline]
    pub fn push(&mut self, value: T, head: N) -> N {
        if self.free_nodes.is_empty() {
            return self.push_new(value, head);
        }

        let handle = self.free_nodes;
        let node = &mut self.nodes[handle.slot()];
        self.free_nodes = node.next;
        node.value = value;
        node.next = head;
        handle
    }

    fn push_new(&mut self, value: T, head: N) -> N {
        let Some(handle) = N::from_slot(self.nodes.len()) else {
            panic!(
                "stack pool exhausted handle space at {} nodes",
                self.nodes.len()
            );
        };

        let capacity = self.nodes.capacity();
        self.nodes.push(Node { value, next: head });
        if self.nodes.capacity() != capacity {
            tracing::trace!(
                from = capacity,
                to = self.nodes.capacity(),
                "stack pool storage grew"
            );
        }
        handle
    }

    /// Removes the head of a stack, returning the new head.
    ///
    /// The node moves to the free list with its value left in place until
    /// a later push overwrites it. Popping the empty stack returns the
    /// empty stack.
    ///
    /// # Panics
    ///
    /// Panics if `head` is beyond [`len`](Self::len).
    #[inline]
    pub fn pop(&mut self, head: N) -> N {
        if head.is_empty() {
            return N::EMPTY;
        }

        let next = core::mem::replace(&mut self.nodes[head.slot()].next, self.free_nodes);
        self.free_nodes = head;
        next
    }

    /// Pops every node of the stack headed by `head`. Returns the empty stack.
    ///
    /// Nodes are released head first, so the old tail ends up at the front
    /// of the free list.
    pub fn free_stack(&mut self, head: N) -> N {
        let mut current = head;
        while !current.is_empty() {
            current = self.pop(current);
        }
        current
    }

    /// Drops every value and empties storage, keeping its capacity.
    ///
    /// Every handle obtained so far is invalidated.
    pub fn clear(&mut self) {
        tracing::debug!(nodes = self.nodes.len(), "stack pool cleared");
        self.nodes.clear();
        self.free_nodes = N::EMPTY;
    }

    /// Iterates the values of the stack headed by `head`, top first.
    #[inline]
    pub fn iter(&self, head: N) -> Iter<'_, T, N> {
        Iter::new(&self.nodes, head)
    }

    /// Calls `f` on every value of the stack headed by `head`, top first.
    pub fn for_each_mut<F>(&mut self, head: N, mut f: F)
    where
        F: FnMut(&mut T),
    {
        let mut current = head;
        while !current.is_empty() {
            let node = &mut self.nodes[current.slot()];
            f(&mut node.value);
            current = node.next;
        }
    }

    #[inline]
    fn node(&self, handle: N) -> Result<&Node<T, N>, InvalidHandle<N>> {
        let len = self.nodes.len();
        self.nodes
            .get(handle.slot())
            .ok_or(InvalidHandle { handle, len })
    }

    #[inline]
    fn node_mut(&mut self, handle: N) -> Result<&mut Node<T, N>, InvalidHandle<N>> {
        let len = self.nodes.len();
        self.nodes
            .get_mut(handle.slot())
            .ok_or(InvalidHandle { handle, len })
    }
}
