// SPDX-License-Identifier: MIT OR Apache-2.0
//! Unique node identity allocation.

use crate::node::NodeId;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Monotonically increasing source of node ids
///
/// One allocator is shared (behind an [`Arc`]) by the node factory and every
/// graph of a session, so ids stay unique across copies and merges. It is the
/// only engine state that is safe to use from several threads at once.
#[derive(Debug, Default)]
pub struct IdAllocator {
    next: AtomicU64,
}

impl IdAllocator {
    /// Create an allocator whose first id is 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new allocator ready to be shared
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Hand out the next id
    pub fn allocate(&self) -> NodeId {
        NodeId(self.next.fetch_add(1, Ordering::Relaxed))
    }

    /// The id the next call to [`allocate`](Self::allocate) returns
    pub fn peek(&self) -> u64 {
        self.next.load(Ordering::Relaxed)
    }

    /// Make sure `id` is never handed out again
    pub fn reserve_past(&self, id: NodeId) {
        self.next.fetch_max(id.0.saturating_add(1), Ordering::Relaxed);
    }

    /// Restart numbering from 0.
    ///
    /// Only valid when no id issued so far is still referenced by a live
    /// graph; otherwise new nodes collide with old ones.
    pub fn reset(&self) {
        self.next.store(0, Ordering::Relaxed);
    }
}
