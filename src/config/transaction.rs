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

//! src/config/transaction.rs
//!
//! Bindings file transactions with automatic backups
//!
//! Provides atomic write operations with a rollback point.

use atomic_write_file::AtomicWriteFile;
use std::{fs, io::Write, path::Path, path::PathBuf};
use tracing::{info, warn};

use crate::config::{
    validator::{ConfigValidator, ValidationLevel},
    BindingStore, ConfigError,
};

/// Atomic bindings file transaction with automatic backup.
///
/// # Lifecycle
///
/// 1. `begin()` - Backs up the current file (if there is one)
/// 2. Caller prepares new content in memory
/// 3. `commit()` - Writes atomically, or `rollback()` - Restores the backup
///
/// When the file did not exist at `begin()`, rolling back removes it again.
///
/// # Example
///
/// ```no_run
/// use input_binding_manager::config::{BindingStore, StoreTransaction};
/// use std::path::PathBuf;
///
/// let store = BindingStore::new(PathBuf::from("bindings.conf"))?;
/// let tx = StoreTransaction::begin(&store)?;
///
/// tx.commit("bind = C, Return\n")?;
/// # Ok::<(), input_binding_manager::config::ConfigError>(())
/// ```
pub struct StoreTransaction<'a> {
    store: &'a BindingStore,
    backup_path: Option<PathBuf>,
}

impl<'a> StoreTransaction<'a> {
    /// Begins a new transaction by creating a timestamped backup.
    ///
    /// The backup exists before any modification is attempted. A store
    /// without a file yet gets no backup.
    ///
    /// # Errors
    ///
    /// Returns an error if the current file cannot be read or the backup
    /// cannot be written. Nothing is modified in that case.
    pub fn begin(store: &'a BindingStore) -> Result<Self, ConfigError> {
        let backup_path = if store.exists() {
            Some(store.create_timestamped_backup()?)
        } else {
            None
        };

        Ok(Self { store, backup_path })
    }

    /// Backup taken at `begin()`, if the file existed
    pub fn backup_path(&self) -> Option<&Path> {
        self.backup_path.as_deref()
    }

    /// Commits after validating the bindings in `new_content`
    ///
    /// Error-level issues block the commit; warnings are logged and the
    /// commit proceeds. `BindingStore::save` checks its table before
    /// rendering, so in practice this gate catches hand-supplied content.
    ///
    /// # Errors
    ///
    /// * `ConfigError::Parse` - content is not a valid bindings file
    /// * `ConfigError::ValidationFailed` - a binding cannot be written back
    pub fn commit_with_validation(self, new_content: &str) -> Result<(), ConfigError> {
        let report = ConfigValidator::new().validate_content(new_content)?;

        if report.has_errors() {
            let errors: Vec<_> = report
                .issues
                .iter()
                .filter(|i| i.validation_level == ValidationLevel::Error)
                .collect();

            for issue in &errors {
                warn!("Binding {}: {}", issue.binding_index, issue.message);
            }

            return Err(ConfigError::ValidationFailed(format!(
                "{} validation error(s) detected",
                errors.len()
            )));
        }

        for issue in report
            .issues
            .iter()
            .filter(|i| i.validation_level == ValidationLevel::Warning)
        {
            match &issue.suggestion {
                Some(suggestion) => warn!(
                    "Binding {}: {} ({})",
                    issue.binding_index, issue.message, suggestion
                ),
                None => warn!("Binding {}: {}", issue.binding_index, issue.message),
            }
        }

        self.commit(new_content)
    }

    /// Commits the transaction by atomically writing `new_content`.
    ///
    /// Temp file plus rename: the bindings file is never half written. The
    /// backup from `begin()` stays in the backup directory; pruning is
    /// `BindingStore::cleanup_old_backups`'s job.
    ///
    /// Consumes the transaction, so it cannot be committed twice.
    pub fn commit(self, new_content: &str) -> Result<(), ConfigError> {
        write_atomically(self.store.path(), new_content)
    }

    /// Restores the file to its state at `begin()`.
    ///
    /// Borrows `self`, so a failed rollback can be retried.
    pub fn rollback(&self) -> Result<(), ConfigError> {
        match &self.backup_path {
            Some(backup_path) => {
                let backup_content = fs::read_to_string(backup_path)?;
                write_atomically(self.store.path(), &backup_content)?;
                info!("Rolled back to {}", backup_path.display());
            }
            None => {
                if self.store.exists() {
                    fs::remove_file(self.store.path())?;
                }
                info!("Rolled back: removed {}", self.store.path().display());
            }
        }
        Ok(())
    }
}

fn write_atomically(path: &Path, content: &str) -> Result<(), ConfigError> {
    let mut file = AtomicWriteFile::options().open(path).map_err(|e| {
        ConfigError::WriteFailed(format!("Failed to open for atomic write: {}", e))
    })?;

    file.write_all(content.as_bytes())
        .map_err(|e| ConfigError::WriteFailed(format!("Failed to write content: {}", e)))?;

    file.commit()
        .map_err(|e| ConfigError::WriteFailed(format!("Failed to commit atomic write: {}", e)))?;

    Ok(())
}
