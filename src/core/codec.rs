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

//! src/core/codec.rs
//!
//! Conversion between `SourceDesc` values and their textual tokens
//!
//! Token grammar:
//! - `axis_<name><sign>`: controller axis, `<sign>` is `-` or `+`
//! - `pad_<name>`: controller button
//! - anything else: keyboard key display name
//!
//! Decoding is total. Tokens that name nothing the platform knows decode to
//! the matching sentinel (`Scancode::UNKNOWN`, `ControllerButton::INVALID`,
//! `ControllerAxis::INVALID`) so a stale or hand-edited binding never aborts
//! a whole table load.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::core::names;
use crate::core::types::{AxisDir, SourceDesc};

pub const AXIS_PREFIX: &str = "axis_";
pub const PAD_PREFIX: &str = "pad_";

/// Renders a source as a token
///
/// Returns `None` for `SourceDesc::None`, which has no textual form.
pub fn encode(desc: &SourceDesc) -> Option<String> {
    match desc {
        SourceDesc::None => None,
        SourceDesc::Key(scancode) => Some(names::scancode_name(*scancode).to_string()),
        SourceDesc::ControllerButton(button) => Some(format!(
            "{}{}",
            PAD_PREFIX,
            names::button_name(*button).unwrap_or("")
        )),
        SourceDesc::ControllerAxis { axis, dir } => Some(format!(
            "{}{}{}",
            AXIS_PREFIX,
            names::axis_name(*axis).unwrap_or(""),
            dir.sign()
        )),
    }
}

/// Parses a token into a source
///
/// Never fails. See the module docs for the fallback rules.
pub fn decode(token: &str) -> SourceDesc {
    if let Some(rest) = token.strip_prefix(AXIS_PREFIX) {
        let mut chars = rest.chars();
        let dir = match chars.next_back() {
            Some('-') => AxisDir::Negative,
            _ => AxisDir::Positive,
        };
        let axis = names::axis_from_name(chars.as_str());
        if !axis.is_valid() {
            debug!("Unknown controller axis in token {:?}", token);
        }
        return SourceDesc::ControllerAxis { axis, dir };
    }

    if let Some(rest) = token.strip_prefix(PAD_PREFIX) {
        let button = names::button_from_name(rest);
        if !button.is_valid() {
            debug!("Unknown controller button in token {:?}", token);
        }
        return SourceDesc::ControllerButton(button);
    }

    let scancode = names::scancode_from_name(token);
    if !scancode.is_known() {
        debug!("Unknown key name in token {:?}", token);
    }
    SourceDesc::Key(scancode)
}

impl FromStr for SourceDesc {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(decode(s))
    }
}

impl fmt::Display for SourceDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match encode(self) {
            Some(token) => f.write_str(&token),
            None => Ok(()),
        }
    }
}
