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

//! src/facade/mod.rs
//!
//! Binding query/update facade
//!
//! `BindingController` is what scripts and the CLI talk to. It resolves
//! action arguments, reads and replaces bindings in the shared slot, and
//! moves whole tables between the slot and the store:
//!
//! ```text
//! script ──► BindingController ──► BindingSlot (snapshot / post)
//!                  │                    ▲
//!                  ▼                    │ poll
//!             BindingStore        live input component
//! ```
//!
//! Every mutation is a snapshot/modify/post cycle on the slot, so readers
//! never observe a half-applied change.

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::{BindingStore, ConfigError, Settings};
use crate::core::codec;
use crate::core::names;
use crate::core::shared::{BindingSlot, SharedBindings};
use crate::core::table::BindingTable;
use crate::core::types::{ButtonArg, ButtonCode, ControllerAxis, ControllerButton, SourceDesc};

#[derive(Debug, Error)]
pub enum FacadeError {
    /// A mutation was addressed at an argument that names no action
    #[error("{0} does not name an input action")]
    UnknownAction(String),

    #[error(transparent)]
    Store(#[from] ConfigError),
}

/// Display names of the sources bound to one action
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct KeyMapping {
    /// Keyboard (and mouse) sources
    #[serde(rename = "KBM")]
    pub kbm: Vec<String>,

    /// Controller buttons and axes
    #[serde(rename = "GAMEPAD")]
    pub gamepad: Vec<String>,
}

pub struct BindingController {
    slot: SharedBindings,
    settings: Settings,
    store: BindingStore,
}

impl BindingController {
    pub fn new(slot: SharedBindings, settings: Settings, store: BindingStore) -> Self {
        Self {
            slot,
            settings,
            store,
        }
    }

    /// Seeds a fresh slot from the store, or from the default layout when
    /// the store has nothing.
    pub fn open(settings: Settings, store: BindingStore) -> Result<Self, FacadeError> {
        let table = match store.load()? {
            Some(table) => table,
            None => {
                info!(
                    "No stored bindings, seeding {} defaults",
                    settings.rgss_version
                );
                settings.default_table()
            }
        };
        Ok(Self::new(BindingSlot::shared(table), settings, store))
    }

    /// Handle to the slot, for the live input component
    pub fn shared(&self) -> SharedBindings {
        SharedBindings::clone(&self.slot)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &BindingStore {
        &self.store
    }

    /// Current table snapshot
    pub fn table(&self) -> BindingTable {
        self.slot.get()
    }

    /// Action an argument names under the configured ruleset
    pub fn resolve_action(&self, arg: &ButtonArg) -> ButtonCode {
        ButtonCode::resolve(arg, self.settings.rgss_version)
    }

    /// Tokens bound to an action, in table order
    ///
    /// Entries without a textual form (`SourceDesc::None`) come back as
    /// `None`. Unknown actions have no bindings.
    pub fn bindings(&self, arg: &ButtonArg) -> Vec<Option<String>> {
        let action = self.resolve_action(arg);
        self.slot
            .snapshot()
            .lookup(action)
            .iter()
            .map(codec::encode)
            .collect()
    }

    /// Replaces every binding of an action with the decoded `tokens`
    ///
    /// Tokens that name nothing are kept as unresolved bindings. The new
    /// table is posted to the slot; nothing is written to disk.
    ///
    /// # Errors
    ///
    /// `FacadeError::UnknownAction` if `arg` does not resolve to an action.
    pub fn apply_bindings<I, S>(&self, arg: &ButtonArg, tokens: I) -> Result<(), FacadeError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let action = self.resolve_action(arg);
        if action == ButtonCode::None {
            return Err(FacadeError::UnknownAction(describe_arg(arg)));
        }

        let tokens: Vec<S> = tokens.into_iter().collect();
        debug!("Applying {} binding(s) to {}", tokens.len(), action);
        self.slot
            .update(|table| table.replace_for_action(action, tokens));
        Ok(())
    }

    /// Writes the current table to the store
    pub fn save_bindings(&self) -> Result<(), FacadeError> {
        self.store.save(&self.slot.snapshot())?;
        Ok(())
    }

    /// Replaces the live table with the default layout (not persisted)
    pub fn reset_bindings(&self) {
        self.slot.post(self.settings.default_table());
    }

    /// Display names of an action's sources, using platform names
    pub fn key_mapping(&self, arg: &ButtonArg) -> KeyMapping {
        self.key_mapping_with(
            arg,
            |button| names::button_name(button).unwrap_or("").to_string(),
            |axis| names::axis_name(axis).unwrap_or("").to_string(),
        )
    }

    /// Display names of an action's sources
    ///
    /// Controller names come from the supplied callbacks (devices name
    /// their buttons differently); axes get a `+`/`-` suffix. Unresolved
    /// sources are left out.
    pub fn key_mapping_with<B, A>(&self, arg: &ButtonArg, button_name: B, axis_name: A) -> KeyMapping
    where
        B: Fn(ControllerButton) -> String,
        A: Fn(ControllerAxis) -> String,
    {
        let action = self.resolve_action(arg);
        let mut mapping = KeyMapping::default();

        for source in self.slot.snapshot().lookup(action) {
            if !source.is_resolved() {
                continue;
            }
            match source {
                SourceDesc::Key(scancode) => {
                    mapping.kbm.push(names::scancode_name(scancode).to_string())
                }
                SourceDesc::ControllerButton(button) => mapping.gamepad.push(button_name(button)),
                SourceDesc::ControllerAxis { axis, dir } => {
                    mapping.gamepad.push(format!("{}{}", axis_name(axis), dir.sign()))
                }
                SourceDesc::None => {}
            }
        }

        mapping
    }
}

fn describe_arg(arg: &ButtonArg) -> String {
    match arg {
        ButtonArg::Code(code) => code.to_string(),
        ButtonArg::Name(name) => format!(":{}", name),
    }
}

#[cfg(test)]
mod tests;
