// Copyright 2025 Eric Jingryd (tidynest@proton.me)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! src/core/shared.rs
//!
//! Process-wide binding table slot
//!
//! Scripts read and write the table through the facade while the live input
//! component reads it on its own schedule. The slot hands out whole-table
//! snapshots and accepts whole-table posts; a post swaps one `Arc` under the
//! write lock, so a reader sees either the old table or the new one.
//!
//! Posts bump a generation counter which consumers compare against the last
//! value they saw (`poll`) to pick up new tables without being notified.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::core::table::BindingTable;

pub type SharedBindings = Arc<BindingSlot>;

#[derive(Debug, Default)]
pub struct BindingSlot {
    table: RwLock<Arc<BindingTable>>,
    generation: AtomicU64,
}

impl BindingSlot {
    pub fn new(table: BindingTable) -> Self {
        Self {
            table: RwLock::new(Arc::new(table)),
            generation: AtomicU64::new(0),
        }
    }

    /// Convenience constructor for the shared handle
    pub fn shared(table: BindingTable) -> SharedBindings {
        Arc::new(Self::new(table))
    }

    /// Owned copy of the current table
    pub fn get(&self) -> BindingTable {
        self.table.read().as_ref().clone()
    }

    /// Shared snapshot of the current table
    pub fn snapshot(&self) -> Arc<BindingTable> {
        Arc::clone(&self.table.read())
    }

    /// Replaces the whole table
    pub fn post(&self, table: BindingTable) {
        let mut slot = self.table.write();
        *slot = Arc::new(table);
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        debug!("Posted binding table ({} entries, generation {})", slot.len(), generation);
    }

    /// Computes a new table from the current one and posts it
    ///
    /// The write lock is held across `f`, so two updates never interleave.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(BindingTable) -> BindingTable,
    {
        let mut slot = self.table.write();
        let next = f(slot.as_ref().clone());
        *slot = Arc::new(next);
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        debug!("Updated binding table ({} entries, generation {})", slot.len(), generation);
    }

    /// Number of posts so far
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Returns the current table if anything was posted since `seen`
    ///
    /// `seen` is advanced to the generation the returned table belongs to.
    pub fn poll(&self, seen: &mut u64) -> Option<Arc<BindingTable>> {
        let slot = self.table.read();
        let current = self.generation.load(Ordering::Acquire);
        if current == *seen {
            return None;
        }
        *seen = current;
        Some(Arc::clone(&slot))
    }
}
