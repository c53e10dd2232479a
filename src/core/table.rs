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

//! src/core/table.rs
//!
//! Ordered binding table
//!
//! The table is a plain list of `BindingDesc` entries. Duplicates are
//! allowed and insertion order is kept, because order decides what
//! `lookup` returns to scripts. Tables have value semantics: cloning one
//! is taking a snapshot.

use serde::{Deserialize, Serialize};

use crate::core::codec;
use crate::core::types::{BindingDesc, ButtonCode, SourceDesc};

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct BindingTable {
    entries: Vec<BindingDesc>,
}

impl BindingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sources bound to `action`, in table order
    pub fn lookup(&self, action: ButtonCode) -> Vec<SourceDesc> {
        self.entries
            .iter()
            .filter(|entry| entry.target == action)
            .map(|entry| entry.source)
            .collect()
    }

    /// Replaces every binding of `action` with the decoded `tokens`
    ///
    /// Entries for other actions keep their content and relative order; the
    /// new entries are appended at the end in token order. Tokens that name
    /// nothing still produce (sentinel) entries. An empty token list clears
    /// the action.
    pub fn replace_for_action<I, S>(mut self, action: ButtonCode, tokens: I) -> BindingTable
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.entries.retain(|entry| entry.target != action);
        self.entries.extend(
            tokens
                .into_iter()
                .map(|token| BindingDesc::new(action, codec::decode(token.as_ref()))),
        );
        self
    }

    pub fn push(&mut self, binding: BindingDesc) {
        self.entries.push(binding);
    }

    /// Drops every binding of `action`, returning how many were removed
    pub fn remove_action(&mut self, action: ButtonCode) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.target != action);
        before - self.entries.len()
    }

    /// Distinct targets in first-appearance order
    pub fn actions(&self) -> Vec<ButtonCode> {
        let mut actions = Vec::new();
        for entry in &self.entries {
            if !actions.contains(&entry.target) {
                actions.push(entry.target);
            }
        }
        actions
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BindingDesc> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<BindingDesc> for BindingTable {
    fn from_iter<T: IntoIterator<Item = BindingDesc>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a BindingTable {
    type Item = &'a BindingDesc;
    type IntoIter = std::slice::Iter<'a, BindingDesc>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl IntoIterator for BindingTable {
    type Item = BindingDesc;
    type IntoIter = std::vec::IntoIter<BindingDesc>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
