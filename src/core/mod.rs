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

//! src/core/mod.rs
//!
//! Core binding model
//!
//! This module contains the data structures and algorithms for input
//! binding management, including:
//! - Type definitions for sources, actions and bindings
//! - The token codec and the platform name tables behind it
//! - The ordered binding table, its default layout and the shared slot
//! - Bindings file parsing, validation and shared-source detection
//!
//! Nothing here touches the filesystem or a script engine, so everything
//! can be unit tested without a device.

pub mod codec;
pub mod conflict;
pub mod defaults;
pub mod names;
pub mod parser;
pub mod shared;
pub mod table;
pub mod types;
pub mod validator;

pub use codec::{decode, encode};
pub use conflict::{ConflictDetector, Duplicate, SharedSource};
pub use defaults::default_table;
pub use names::NameError;
pub use shared::{BindingSlot, SharedBindings};
pub use table::BindingTable;
pub use types::*;
pub use validator::{validate_binding, ValidationError};

#[cfg(test)]
mod tests;
