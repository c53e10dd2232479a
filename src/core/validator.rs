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

//! src/core/validator.rs
//!
//! Per-binding validation
//!
//! The codec never rejects a token, so a table can hold bindings that will
//! never fire: sentinel sources from unknown names, or entries with no
//! target. This module finds them. It reports; it does not repair.

use thiserror::Error;

use crate::core::names;
use crate::core::types::{BindingDesc, ButtonCode, SourceDesc};

/// Validation errors
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// Binding drives no action
    #[error("Binding has no target action")]
    NoTarget,

    /// Binding has no source
    #[error("Binding for {0} has no source")]
    NoSource(ButtonCode),

    /// Key source that the platform has no name for
    #[error("Unknown key (scancode {0}) bound to {1}")]
    UnknownKey(u32, ButtonCode),

    /// Controller button that does not exist
    #[error("Unknown controller button bound to {0}")]
    UnknownButton(ButtonCode),

    /// Controller axis that does not exist
    #[error("Unknown controller axis bound to {0}")]
    UnknownAxis(ButtonCode),
}

/// Validates one binding
pub fn validate_binding(binding: &BindingDesc) -> Result<(), ValidationError> {
    if binding.target == ButtonCode::None {
        return Err(ValidationError::NoTarget);
    }
    validate_source(binding.target, &binding.source)
}

/// Checks that `source` resolves to something the platform can deliver
pub fn validate_source(target: ButtonCode, source: &SourceDesc) -> Result<(), ValidationError> {
    match source {
        SourceDesc::None => Err(ValidationError::NoSource(target)),
        SourceDesc::Key(scancode) => {
            if names::scancode_name(*scancode).is_empty() {
                Err(ValidationError::UnknownKey(scancode.0, target))
            } else {
                Ok(())
            }
        }
        SourceDesc::ControllerButton(button) => match names::button_name(*button) {
            Some(_) => Ok(()),
            None => Err(ValidationError::UnknownButton(target)),
        },
        SourceDesc::ControllerAxis { axis, .. } => match names::axis_name(*axis) {
            Some(_) => Ok(()),
            None => Err(ValidationError::UnknownAxis(target)),
        },
    }
}
