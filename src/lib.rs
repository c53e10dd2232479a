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

//! Input Binding Manager
//!
//! Rebindable input for RGSS-style game runtimes: physical sources
//! (keyboard keys, controller buttons, controller axes) bound to logical
//! actions, with a text codec for sources, a persistent binding store and
//! a Rhai `Input` module for game scripts.
//!
//! # Features
//!
//! - **Source Codec:** `"Return"`, `"pad_a"`, `"axis_leftx-"` to and from
//!   typed source descriptors; decoding never fails
//! - **Binding Tables:** Ordered, duplicate-tolerant, per-ruleset defaults
//! - **Shared Slot:** Lock-protected snapshot/post handle polled by the
//!   live input component
//! - **Automatic Backups:** Timestamped backups before every bindings write
//! - **Atomic Operations:** Safe file writes with rollback on failure
//! - **Script Surface:** `Input` and `Input::Controller` for Rhai scripts
//!
//! # Architecture
//!
//! - **`core`:** Types, name tables, codec, tables, defaults, parser, checks
//! - **`config`:** Settings, bindings file store, transactions, reports
//! - **`facade`:** `BindingController`, the query/update entry point
//! - **`script`:** Input device contract and the Rhai module
//!
//! # Examples
//!
//! ## Decoding tokens
//!
//! ```
//! use input_binding_manager::core::codec::{decode, encode};
//! use input_binding_manager::core::types::{AxisDir, ControllerAxis, SourceDesc};
//!
//! let source = decode("axis_leftx-");
//! assert_eq!(
//!     source,
//!     SourceDesc::ControllerAxis { axis: ControllerAxis::LEFTX, dir: AxisDir::Negative }
//! );
//! assert_eq!(encode(&source).as_deref(), Some("axis_leftx-"));
//! ```
//!
//! ## Rebinding an action
//!
//! ```no_run
//! use input_binding_manager::config::{BindingStore, Settings};
//! use input_binding_manager::core::types::ButtonArg;
//! use input_binding_manager::facade::BindingController;
//! use std::path::PathBuf;
//!
//! let store = BindingStore::new(PathBuf::from("bindings.conf"))?;
//! let controller = BindingController::open(Settings::default(), store)?;
//!
//! controller.apply_bindings(&ButtonArg::Name("C".into()), ["Return", "pad_a"])?;
//! controller.save_bindings()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod core;
pub mod facade;
pub mod script;

// Re-export commonly used types for convenience
pub use core::{BindingDesc, BindingTable, ButtonCode, SourceDesc};
