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

//! src/core/conflict.rs
//!
//! Shared-source and duplicate detection
//!
//! A physical source may legitimately drive several actions (both Shift
//! keys drive `A` and `SHIFT` under RGSS2+), so sharing is reported as
//! information. Binding the same source to the same action twice is always
//! redundant and is reported as a duplicate.

use std::collections::HashMap;

use crate::core::table::BindingTable;
use crate::core::types::{ButtonCode, SourceDesc};

/// Indexes bindings by source.
pub struct ConflictDetector {
    /// Maps each source to the actions it drives, in table order.
    bindings: HashMap<SourceDesc, Vec<ButtonCode>>,
}

/// A source driving more than one distinct action.
#[derive(Clone, Debug, PartialEq)]
pub struct SharedSource {
    pub source: SourceDesc,

    /// Distinct actions, in first-appearance order (always 2 or more)
    pub actions: Vec<ButtonCode>,
}

/// A source bound to the same action more than once.
#[derive(Clone, Debug, PartialEq)]
pub struct Duplicate {
    pub source: SourceDesc,
    pub action: ButtonCode,
    pub count: usize,
}

impl ConflictDetector {
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Builds a detector over every entry of `table`.
    pub fn from_table(table: &BindingTable) -> Self {
        let mut detector = Self::new();
        for binding in table {
            detector.add_binding(binding.target, binding.source);
        }
        detector
    }

    /// Time complexity: O(1) average case
    pub fn add_binding(&mut self, action: ButtonCode, source: SourceDesc) {
        self.bindings.entry(source).or_default().push(action);
    }

    /// Sources that drive two or more distinct actions.
    pub fn find_shared_sources(&self) -> Vec<SharedSource> {
        let mut shared: Vec<SharedSource> = self
            .bindings
            .iter()
            .filter_map(|(source, actions)| {
                let distinct = distinct(actions);
                (distinct.len() > 1).then(|| SharedSource {
                    source: *source,
                    actions: distinct,
                })
            })
            .collect();
        shared.sort_by(|a, b| {
            a.actions
                .cmp(&b.actions)
                .then_with(|| a.source.to_string().cmp(&b.source.to_string()))
        });
        shared
    }

    /// (source, action) pairs that appear more than once.
    pub fn find_duplicates(&self) -> Vec<Duplicate> {
        let mut duplicates = Vec::new();
        for (source, actions) in &self.bindings {
            for action in distinct(actions) {
                let count = actions.iter().filter(|a| **a == action).count();
                if count > 1 {
                    duplicates.push(Duplicate {
                        source: *source,
                        action,
                        count,
                    });
                }
            }
        }
        duplicates.sort_by(|a, b| {
            a.action
                .cmp(&b.action)
                .then_with(|| a.source.to_string().cmp(&b.source.to_string()))
        });
        duplicates
    }

    pub fn is_shared(&self, source: &SourceDesc) -> bool {
        self.bindings
            .get(source)
            .map(|actions| distinct(actions).len() > 1)
            .unwrap_or(false)
    }

    pub fn total_bindings(&self) -> usize {
        self.bindings.values().map(|v| v.len()).sum()
    }
}

impl Default for ConflictDetector {
    fn default() -> Self {
        Self::new()
    }
}

fn distinct(actions: &[ButtonCode]) -> Vec<ButtonCode> {
    let mut out = Vec::new();
    for action in actions {
        if !out.contains(action) {
            out.push(*action);
        }
    }
    out
}
