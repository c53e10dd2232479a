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

//! src/config/mod.rs
//!
//! Bindings file management with atomic writes and backups
//!
//! The store owns one bindings file and a sibling `backups/` directory.
//! Every write goes through a `StoreTransaction`, which snapshots the
//! current file first so a bad write can be rolled back.
//!
//! # Example
//! ```no_run
//! use input_binding_manager::config::BindingStore;
//! use input_binding_manager::core::{default_table, RgssVersion};
//!
//! let store = BindingStore::new("/home/user/.config/game/bindings.conf".into())?;
//! store.save(&default_table(RgssVersion::Rgss3))?;
//!
//! let table = store.load()?;
//! # Ok::<(), input_binding_manager::config::ConfigError>(())
//! ```

pub mod error;
pub mod settings;
pub mod transaction;
pub mod validator;

pub use error::ConfigError;
pub use settings::Settings;
pub use transaction::StoreTransaction;
pub use validator::{ConfigValidator, ValidationIssue, ValidationLevel, ValidationReport};

use chrono::{Local, NaiveDateTime};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::core::codec;
use crate::core::parser;
use crate::core::table::BindingTable;
use crate::core::types::BindingDesc;

const BACKUP_TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H%M%S";

/// Manages a bindings file with safe atomic operations.
#[derive(Debug)]
pub struct BindingStore {
    /// Path to the bindings file.
    bindings_path: PathBuf,
    backup_dir: PathBuf,
    backups_to_keep: usize,
}

impl BindingStore {
    /// Creates a store for the given bindings file.
    ///
    /// The file itself does not have to exist yet (a fresh install has no
    /// bindings); the backup directory next to it is created if missing.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::BackupDirNotWritable` if the backup directory
    /// cannot be created or is read-only.
    pub fn new(bindings_path: PathBuf) -> Result<Self, ConfigError> {
        if bindings_path.read_link().is_ok() {
            warn!(
                "Bindings file is a symlink: {} (allowed, writes go to the target)",
                bindings_path.display()
            );
        }

        // e.g. ~/.config/game/bindings.conf -> ~/.config/game/backups/
        let backup_dir = bindings_path
            .parent()
            .map(|parent| {
                if parent.as_os_str().is_empty() {
                    Path::new(".")
                } else {
                    parent
                }
            })
            .ok_or_else(|| ConfigError::BackupDirNotWritable(bindings_path.clone()))?
            .join("backups");

        if !backup_dir.exists() {
            fs::create_dir_all(&backup_dir)
                .map_err(|_| ConfigError::BackupDirNotWritable(backup_dir.clone()))?;
        }

        if backup_dir.metadata()?.permissions().readonly() {
            return Err(ConfigError::BackupDirNotWritable(backup_dir));
        }

        Ok(Self {
            bindings_path,
            backup_dir,
            backups_to_keep: Settings::default().backups_to_keep,
        })
    }

    /// Sets how many backups `save` keeps around.
    pub fn with_backups_to_keep(mut self, keep: usize) -> Self {
        self.backups_to_keep = keep;
        self
    }

    pub fn path(&self) -> &Path {
        &self.bindings_path
    }

    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    pub fn exists(&self) -> bool {
        self.bindings_path.is_file()
    }

    /// Reads the raw bindings file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the file does not exist.
    pub fn read_bindings_file(&self) -> Result<String, ConfigError> {
        if !self.exists() {
            return Err(ConfigError::NotFound(self.bindings_path.clone()));
        }
        Ok(fs::read_to_string(&self.bindings_path)?)
    }

    /// Restores the persisted table.
    ///
    /// Returns `Ok(None)` only when the file is missing; callers seed the
    /// default table then. A file without bind lines is an empty table, so
    /// a layout the player cleared stays cleared.
    pub fn load(&self) -> Result<Option<BindingTable>, ConfigError> {
        if !self.exists() {
            debug!("No bindings file at {}", self.bindings_path.display());
            return Ok(None);
        }

        let content = self.read_bindings_file()?;
        let table = parser::parse_bindings_file(&content)?;

        info!(
            "Loaded {} bindings from {}",
            table.len(),
            self.bindings_path.display()
        );
        Ok(Some(table))
    }

    /// Persists `table`, keeping comments and unrelated lines.
    ///
    /// The previous file (if any) is backed up first and old backups are
    /// pruned to the configured count.
    ///
    /// # Errors
    ///
    /// `ConfigError::ValidationFailed` if a binding has no target action.
    /// Such bindings cannot be rendered, so the table is checked before
    /// anything is written or backed up.
    pub fn save(&self, table: &BindingTable) -> Result<(), ConfigError> {
        let report = ConfigValidator::new().validate_table(table);
        if report.has_errors() {
            for issue in report
                .issues
                .iter()
                .filter(|i| i.validation_level == ValidationLevel::Error)
            {
                warn!("Binding {}: {}", issue.binding_index, issue.message);
            }
            return Err(ConfigError::ValidationFailed(format!(
                "{} binding(s) cannot be saved",
                report.count(ValidationLevel::Error)
            )));
        }

        let existing = if self.exists() {
            self.read_bindings_file()?
        } else {
            String::new()
        };
        let content = Self::write_bindings(&existing, table);

        // A failed commit leaves the previous file in place
        self.begin_transaction()?.commit_with_validation(&content)?;

        info!(
            "Saved {} bindings to {}",
            table.len(),
            self.bindings_path.display()
        );

        let removed = self.cleanup_old_backups(self.backups_to_keep)?;
        if removed > 0 {
            debug!("Removed {} old backup(s)", removed);
        }
        Ok(())
    }

    /// Starts a transaction on this store.
    pub fn begin_transaction(&self) -> Result<StoreTransaction<'_>, ConfigError> {
        StoreTransaction::begin(self)
    }

    /// Renders `table` into `existing` file content.
    ///
    /// Every existing bind line is dropped; the new bind lines take the
    /// place of the first one (or are appended). All other lines stay where
    /// they were.
    pub fn write_bindings(existing: &str, table: &BindingTable) -> String {
        let mut output = Vec::new();
        let mut inserted = false;

        for line in existing.lines() {
            if parser::is_bind_line(line) {
                if !inserted {
                    output.extend(table.iter().filter_map(Self::format_binding));
                    inserted = true;
                }
                continue;
            }
            output.push(line.to_string());
        }

        if !inserted {
            output.extend(table.iter().filter_map(Self::format_binding));
        }

        let mut content = output.join("\n");
        content.push('\n');
        content
    }

    /// Formats one binding as a bind line.
    ///
    /// Returns `None` for bindings that cannot be written back: those with
    /// no source or no target action.
    pub fn format_binding(binding: &BindingDesc) -> Option<String> {
        let action = binding.target.name()?;
        let token = codec::encode(&binding.source)?;
        Some(format!("bind = {}, {}", action, token))
    }

    /// Creates a timestamped copy of the bindings file in the backup dir.
    ///
    /// Names are `<file>.<YYYY-MM-DD_HHMMSS>`; a second backup within the
    /// same second gets a `-N` suffix.
    pub(crate) fn create_timestamped_backup(&self) -> Result<PathBuf, ConfigError> {
        let content = self.read_bindings_file()?;

        let timestamp = Local::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let original_name = self.file_name()?;

        let mut backup_path = self
            .backup_dir
            .join(format!("{}.{}", original_name, timestamp));
        let mut counter = 1;
        while backup_path.exists() {
            backup_path = self
                .backup_dir
                .join(format!("{}.{}-{}", original_name, timestamp, counter));
            counter += 1;
        }

        fs::write(&backup_path, content).map_err(|e| {
            ConfigError::BackupFailed(format!("{}: {}", backup_path.display(), e))
        })?;

        debug!("Created backup {}", backup_path.display());
        Ok(backup_path)
    }

    /// Lists backups of this file, newest first.
    ///
    /// Files in the backup directory whose names do not carry a valid
    /// timestamp are ignored.
    pub fn list_backups(&self) -> Result<Vec<PathBuf>, ConfigError> {
        let original_name = self.file_name()?;
        let prefix = format!("{}.", original_name);

        let mut backups: Vec<((NaiveDateTime, u32), PathBuf)> = Vec::new();
        for entry in fs::read_dir(&self.backup_dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let Some(stamp) = name.strip_prefix(&prefix) else {
                continue;
            };
            if let Some(key) = parse_backup_stamp(stamp) {
                backups.push((key, path));
            }
        }

        backups.sort_by(|a, b| b.0.cmp(&a.0));
        Ok(backups.into_iter().map(|(_, path)| path).collect())
    }

    /// Deletes all but the `keep` newest backups.
    ///
    /// Returns the number of files removed.
    pub fn cleanup_old_backups(&self, keep: usize) -> Result<usize, ConfigError> {
        let backups = self.list_backups()?;
        let mut removed = 0;
        for old in backups.iter().skip(keep) {
            fs::remove_file(old)?;
            removed += 1;
        }
        Ok(removed)
    }

    /// Replaces the bindings file with the content of `backup_path`.
    ///
    /// The current file is backed up first, so a restore can be undone by
    /// restoring that safety backup.
    pub fn restore_backup(&self, backup_path: &Path) -> Result<(), ConfigError> {
        if !backup_path.exists() {
            return Err(ConfigError::BackupFailed(format!(
                "Backup file does not exist: {}",
                backup_path.display()
            )));
        }
        if !backup_path.is_file() {
            return Err(ConfigError::BackupFailed(format!(
                "Backup path is not a file: {}",
                backup_path.display()
            )));
        }

        let content = fs::read_to_string(backup_path)?;
        let tx = self.begin_transaction()?;
        tx.commit(&content)?;

        info!("Restored bindings from {}", backup_path.display());
        Ok(())
    }

    fn file_name(&self) -> Result<&str, ConfigError> {
        self.bindings_path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                ConfigError::BackupFailed(format!(
                    "Bindings path has no UTF-8 file name: {}",
                    self.bindings_path.display()
                ))
            })
    }
}

/// Parses `2025-10-10_221500` or `2025-10-10_221500-2`
fn parse_backup_stamp(stamp: &str) -> Option<(NaiveDateTime, u32)> {
    // The timestamp is always 17 bytes; anything after it is the `-N` suffix
    let time = stamp.get(..17)?;
    let counter = match stamp.get(17..)? {
        "" => 0,
        suffix => suffix.strip_prefix('-')?.parse().ok()?,
    };
    let parsed = NaiveDateTime::parse_from_str(time, BACKUP_TIMESTAMP_FORMAT).ok()?;
    Some((parsed, counter))
}

#[cfg(test)]
mod tests;
