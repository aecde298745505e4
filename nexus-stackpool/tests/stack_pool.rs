use nexus_stackpool::{Handle, StackPool};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn collect<T: Copy, N: Handle>(pool: &StackPool<T, N>, head: N) -> Vec<T> {
    pool.iter(head).copied().collect()
}

// =============================================================================
// Sentinel
// =============================================================================

#[test]
fn sentinel_is_zero() {
    let pool: StackPool<u64> = StackPool::new();
    assert_eq!(pool.new_stack(), 0);
    assert_eq!(pool.end(), 0);
    assert_eq!(pool.free_head(), 0);
    assert!(pool.empty(0));
    assert_eq!(usize::EMPTY, 0);
}

#[test]
fn free_stack_of_empty_is_noop() {
    let mut pool: StackPool<u64> = StackPool::new();
    assert_eq!(pool.free_stack(0), 0);
    assert!(pool.is_empty());
}

// =============================================================================
// Push / pop
// =============================================================================

#[test]
fn push_three_then_pop_and_free() {
    init_tracing();
    let mut pool: StackPool<u64> = StackPool::new();

    let mut head = pool.new_stack();
    head = pool.push(1, head);
    head = pool.push(2, head);
    let h3 = pool.push(3, head);

    assert_eq!(collect(&pool, h3), vec![3, 2, 1]);

    let h2 = pool.pop(h3);
    assert_eq!(collect(&pool, h2), vec![2, 1]);

    assert_eq!(pool.free_stack(h2), 0);
    assert_eq!(pool.free_len(), 3);
}

#[test]
fn pops_come_back_in_reverse_order() {
    let mut pool: StackPool<u64> = StackPool::new();
    let mut head = pool.new_stack();
    for v in 0..100 {
        head = pool.push(v, head);
    }

    for expected in (0..100).rev() {
        assert_eq!(*pool.value(head), expected);
        head = pool.pop(head);
    }
    assert!(pool.empty(head));
    assert_eq!(pool.pop(head), 0);
}

#[test]
fn recycled_push_does_not_grow() {
    let mut pool: StackPool<u64> = StackPool::new();
    let head = pool.push(1, 0);
    let head = pool.pop(head);
    let cap = pool.capacity();
    let len = pool.len();

    let head = pool.push(2, head);
    assert_eq!(pool.capacity(), cap);
    assert_eq!(pool.len(), len);
    assert_eq!(*pool.value(head), 2);
}

#[test]
fn free_stack_makes_every_node_reusable() {
    init_tracing();
    let mut pool: StackPool<u64, u32> = StackPool::new();
    let mut head = 0;
    for v in 0..37 {
        head = pool.push(v, head);
    }
    let cap = pool.capacity();
    let len = pool.len();

    assert_eq!(pool.free_stack(head), 0);
    assert_eq!(pool.capacity(), cap);
    assert_eq!(pool.free_len(), 37);

    let mut other = 0;
    for v in 0..37 {
        other = pool.push(v * 2, other);
    }
    assert_eq!(pool.capacity(), cap);
    assert_eq!(pool.len(), len);
    assert_eq!(pool.free_len(), 0);
    assert_eq!(pool.stack_len(other), 37);
}

// =============================================================================
// Multiple stacks
// =============================================================================

#[test]
fn interleaved_stacks_stay_separate() {
    let mut pool: StackPool<u64> = StackPool::new();
    let mut evens = pool.new_stack();
    let mut odds = pool.new_stack();

    for v in 0..20 {
        if v % 2 == 0 {
            evens = pool.push(v, evens);
        } else {
            odds = pool.push(v, odds);
        }
    }

    assert_eq!(collect(&pool, evens), vec![18, 16, 14, 12, 10, 8, 6, 4, 2, 0]);
    assert_eq!(collect(&pool, odds), vec![19, 17, 15, 13, 11, 9, 7, 5, 3, 1]);

    evens = pool.free_stack(evens);
    for v in 100..105 {
        evens = pool.push(v, evens);
    }
    assert_eq!(collect(&pool, evens), vec![104, 103, 102, 101, 100]);
    assert_eq!(collect(&pool, odds), vec![19, 17, 15, 13, 11, 9, 7, 5, 3, 1]);
}

#[test]
fn splice_through_next_mut() {
    let mut pool: StackPool<&str> = StackPool::new();
    let mut top = pool.push("c", 0);
    top = pool.push("d", top);
    let mut bottom = pool.push("a", 0);
    bottom = pool.push("b", bottom);

    // Find tail of `top` and hang `bottom` under it.
    let mut tail = top;
    while !pool.empty(pool.next(tail)) {
        tail = pool.next(tail);
    }
    *pool.next_mut(tail) = bottom;

    assert_eq!(collect(&pool, top), vec!["d", "c", "b", "a"]);
}

#[test]
fn graph_frontier_workload() {
    // Breadth-first levels, one stack per level, reusing nodes between levels.
    let mut pool: StackPool<u32, u32> = StackPool::with_capacity(64);
    let mut frontier = pool.push(1, pool.new_stack());
    let mut visited = Vec::new();

    while !pool.empty(frontier) {
        let mut next_level = pool.new_stack();
        let mut cursor = frontier;
        while !pool.empty(cursor) {
            let node = *pool.value(cursor);
            visited.push(node);
            for child in [node * 2, node * 2 + 1] {
                if child < 16 {
                    next_level = pool.push(child, next_level);
                }
            }
            cursor = pool.next(cursor);
        }
        pool.free_stack(frontier);
        frontier = next_level;
    }

    visited.sort_unstable();
    assert_eq!(visited, (1..16).collect::<Vec<_>>());
    // Never more than two levels alive at once.
    assert!(pool.len() <= 8 + 4);
}

// =============================================================================
// Handle discipline violations
// =============================================================================

// These document what happens when callers break the contract. They are not
// bugs to be fixed.

#[test]
fn double_pop_aliases_next_two_pushes() {
    let mut pool: StackPool<u64> = StackPool::new();
    let h = pool.push(1, 0);

    pool.pop(h);
    pool.pop(h);
    // Free list is now h -> h.

    let a = pool.push(10, 0);
    let b = pool.push(20, 0);
    assert_eq!(a, b);
    assert_eq!(*pool.value(a), 20);
    assert_eq!(pool.free_head(), 0);
}

#[test]
fn shared_tail_is_visible_from_both_stacks() {
    let mut pool: StackPool<u64> = StackPool::new();
    let shared = pool.push(1, 0);
    let a = pool.push(2, shared);
    let b = pool.push(3, shared);

    *pool.value_mut(shared) = 99;
    assert_eq!(collect(&pool, a), vec![2, 99]);
    assert_eq!(collect(&pool, b), vec![3, 99]);
}

#[test]
fn stale_handle_reads_recycled_value() {
    let mut pool: StackPool<u64> = StackPool::new();
    let stale = pool.push(1, 0);
    pool.pop(stale);
    let fresh = pool.push(2, 0);

    assert_eq!(stale, fresh);
    assert_eq!(pool.try_value(stale), Ok(&2));
}
