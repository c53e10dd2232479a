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

//! src/config/settings.rs
//!
//! Engine settings
//!
//! A small JSON file in the style of `mkxp.json`:
//! ```json
//! {
//!     "rgssVersion": 3,
//!     "bindingsPath": "~/.config/game/bindings.conf",
//!     "backupsToKeep": 10
//! }
//! ```
//! Every key is optional.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::ConfigError;
use crate::core::defaults::default_table;
use crate::core::table::BindingTable;
use crate::core::types::RgssVersion;

/// Bindings file used when neither the settings nor the CLI name one
pub const DEFAULT_BINDINGS_FILE: &str = "bindings.conf";

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub rgss_version: RgssVersion,
    pub bindings_path: Option<PathBuf>,
    pub backups_to_keep: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rgss_version: RgssVersion::default(),
            bindings_path: None,
            backups_to_keep: 10,
        }
    }
}

impl Settings {
    /// Loads settings from `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(content).map_err(|e| ConfigError::InvalidSettings(e.to_string()))
    }

    /// Bindings file path with `~` expanded
    ///
    /// Relative paths resolve against `base` (normally the directory the
    /// settings file lives in).
    pub fn resolved_bindings_path(&self, base: &Path) -> PathBuf {
        let path = match &self.bindings_path {
            Some(path) => PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned()),
            None => PathBuf::from(DEFAULT_BINDINGS_FILE),
        };
        if path.is_absolute() {
            path
        } else {
            base.join(path)
        }
    }

    /// Default binding table for the configured ruleset
    pub fn default_table(&self) -> BindingTable {
        default_table(self.rgss_version)
    }
}
