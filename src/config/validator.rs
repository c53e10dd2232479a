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

//! src/config/validator.rs
//!
//! Table-level validation report
//!
//! Combines per-binding checks (`core::validator`) with shared-source and
//! duplicate detection (`core::conflict`) into one report that the
//! transaction layer uses to decide whether a write may proceed.
//!
//! # Example
//! ```
//! use input_binding_manager::config::validator::ConfigValidator;
//!
//! let validator = ConfigValidator::new();
//! let report = validator.validate_content("bind = C, Return\n")?;
//!
//! assert!(!report.has_errors());
//! # Ok::<(), input_binding_manager::config::ConfigError>(())
//! ```

use crate::config::ConfigError;
use crate::core::conflict::ConflictDetector;
use crate::core::parser::parse_bindings_file;
use crate::core::table::BindingTable;
use crate::core::types::SourceDesc;
use crate::core::validator::{validate_binding, ValidationError};

/// Validation severity level
///
/// - **Error**: Blocks commit
/// - **Warning**: Allows commit but is logged
/// - **Info**: Informational only
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ValidationLevel {
    Error,
    Warning,
    Info,
}

/// A single validation issue
#[derive(Clone, Debug)]
pub struct ValidationIssue {
    /// Index of the binding with the issue (0-based, table order)
    pub binding_index: usize,
    pub validation_level: ValidationLevel,
    pub message: String,
    pub suggestion: Option<String>,
}

/// All issues found in one table
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if any issue blocks a commit
    pub fn has_errors(&self) -> bool {
        self.issues
            .iter()
            .any(|issue| issue.validation_level == ValidationLevel::Error)
    }

    pub fn count(&self, level: ValidationLevel) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.validation_level == level)
            .count()
    }

    pub fn add_error(&mut self, binding_index: usize, message: String) {
        self.push(binding_index, ValidationLevel::Error, message, None);
    }

    pub fn add_warning(&mut self, binding_index: usize, message: String, suggestion: Option<String>) {
        self.push(binding_index, ValidationLevel::Warning, message, suggestion);
    }

    pub fn add_info(&mut self, binding_index: usize, message: String) {
        self.push(binding_index, ValidationLevel::Info, message, None);
    }

    fn push(
        &mut self,
        binding_index: usize,
        validation_level: ValidationLevel,
        message: String,
        suggestion: Option<String>,
    ) {
        self.issues.push(ValidationIssue {
            binding_index,
            validation_level,
            message,
            suggestion,
        });
    }
}

/// Validates whole binding tables
#[derive(Debug, Default)]
pub struct ConfigValidator;

impl ConfigValidator {
    pub fn new() -> Self {
        Self
    }

    /// Parses bindings file content and validates the resulting table
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` if the content is not a valid bindings
    /// file; validation problems are reported, not returned.
    pub fn validate_content(&self, content: &str) -> Result<ValidationReport, ConfigError> {
        let table = parse_bindings_file(content)?;
        Ok(self.validate_table(&table))
    }

    /// Validates every binding of `table`
    pub fn validate_table(&self, table: &BindingTable) -> ValidationReport {
        let mut report = ValidationReport::new();

        for (index, binding) in table.iter().enumerate() {
            match validate_binding(binding) {
                Ok(()) => {}
                Err(e @ ValidationError::NoTarget) => report.add_error(index, e.to_string()),
                Err(e @ ValidationError::NoSource(_)) => {
                    report.add_info(index, format!("{} (not written)", e))
                }
                Err(e) => report.add_warning(
                    index,
                    e.to_string(),
                    Some("The binding will never fire; check the token spelling".to_string()),
                ),
            }
        }

        let detector = ConflictDetector::from_table(table);

        for duplicate in detector.find_duplicates() {
            report.add_warning(
                first_index(table, &duplicate.source),
                format!(
                    "{} is bound to {} {} times",
                    describe(&duplicate.source),
                    duplicate.action,
                    duplicate.count
                ),
                Some("Remove the repeated binding".to_string()),
            );
        }

        for shared in detector.find_shared_sources() {
            let actions: Vec<String> = shared.actions.iter().map(|a| a.to_string()).collect();
            report.add_info(
                first_index(table, &shared.source),
                format!(
                    "{} drives {}",
                    describe(&shared.source),
                    actions.join(", ")
                ),
            );
        }

        report
    }
}

fn first_index(table: &BindingTable, source: &SourceDesc) -> usize {
    table
        .iter()
        .position(|binding| binding.source == *source)
        .unwrap_or(0)
}

fn describe(source: &SourceDesc) -> String {
    match source {
        SourceDesc::None => "(no source)".to_string(),
        other => format!("'{}'", other),
    }
}
