//! Many singly-linked stacks backed by one contiguous node pool.
//!
//! Workloads that juggle thousands of small, short-lived stacks (DFS
//! frontiers, per-vertex adjacency buffers, undo logs) spend most of their
//! time in the allocator when each stack owns a `Vec`. This crate keeps every
//! node of every stack in a single array and recycles freed nodes through an
//! internal free list.
//!
//! ```text
//! storage:  [ (a1, 0) | (b1, 0) | (a2, 1) | (x, 0) ]
//! handles:      1         2         3        4
//!
//! stack A = 3  ->  a2 -> a1
//! stack B = 2  ->  b1
//! free    = 4  ->  x (stale)
//! ```
//!
//! A stack is just the [`Handle`] of its head node. `0` is the empty stack,
//! so handles are 1-indexed. Push and pop are O(1) and never allocate while
//! the free list has nodes.
//!
//! # Quick Start
//!
//! ```
//! use nexus_stackpool::StackPool;
//!
//! let mut pool: StackPool<u32> = StackPool::with_capacity(1024);
//!
//! let mut head = pool.new_stack();
//! for v in [1, 2, 3] {
//!     head = pool.push(v, head);
//! }
//! assert_eq!(pool.iter(head).copied().collect::<Vec<_>>(), vec![3, 2, 1]);
//!
//! head = pool.pop(head);
//! assert_eq!(pool.iter(head).copied().collect::<Vec<_>>(), vec![2, 1]);
//!
//! head = pool.free_stack(head);
//! assert!(pool.empty(head));
//! ```
//!
//! # Critical Invariant: Handle Discipline
//!
//! The pool does not know which stack a node belongs to. Keeping stacks
//! disjoint, not touching a handle after popping it, and not mixing handles
//! between pools is the caller's responsibility (same discipline as the
//! `slab` crate). Breaking it never causes memory unsafety through the safe
//! API, but the pool will hand out aliased nodes.
//!
//! # Access Layers
//!
//! | Method | On bad handle | Use case |
//! |--------|---------------|----------|
//! | `value` / `next` | panics | Default |
//! | `try_value` / `try_next` | `Err(InvalidHandle)` | Handles from untrusted code |
//! | `value_unchecked` / `next_unchecked` | undefined behavior | Proven hot loops |
//!
//! # Handle Width
//!
//! `StackPool<T, N>` is generic over the handle type. The default is
//! `usize`; `u32` halves the link field on 64-bit targets.

#![warn(missing_docs)]

pub mod error;
pub mod handle;
pub mod iter;
pub mod pool;

pub use error::InvalidHandle;
pub use handle::Handle;
pub use iter::Iter;
pub use pool::StackPool;
