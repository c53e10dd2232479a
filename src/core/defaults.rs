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

//! src/core/defaults.rs
//!
//! Built-in binding layout
//!
//! The layout depends only on the ruleset. RGSS1 binds `Z` to `A` and `C`
//! to `C`; later rulesets bind `Z` to `C` and both Shift keys to `A` as
//! well as `SHIFT`.

use crate::core::table::BindingTable;
use crate::core::types::{
    AxisDir, BindingDesc, ButtonCode, ControllerAxis, ControllerButton, RgssVersion, Scancode,
    SourceDesc,
};

const KEY_UP: u32 = 82;
const KEY_DOWN: u32 = 81;
const KEY_LEFT: u32 = 80;
const KEY_RIGHT: u32 = 79;
const KEY_SPACE: u32 = 44;
const KEY_RETURN: u32 = 40;
const KEY_ESCAPE: u32 = 41;
const KEY_KP_0: u32 = 98;
const KEY_LSHIFT: u32 = 225;
const KEY_RSHIFT: u32 = 229;
const KEY_LCTRL: u32 = 224;
const KEY_RCTRL: u32 = 228;
const KEY_LALT: u32 = 226;
const KEY_RALT: u32 = 230;
const KEY_PAUSE: u32 = 72;
const KEY_F5: u32 = 62;
const KEY_A: u32 = 4;
const KEY_C: u32 = 6;
const KEY_D: u32 = 7;
const KEY_Q: u32 = 20;
const KEY_S: u32 = 22;
const KEY_W: u32 = 26;
const KEY_X: u32 = 27;
const KEY_Z: u32 = 29;

/// Keyboard bindings shared by every ruleset
const COMMON_KEYS: &[(ButtonCode, u32)] = &[
    (ButtonCode::Up, KEY_UP),
    (ButtonCode::Down, KEY_DOWN),
    (ButtonCode::Left, KEY_LEFT),
    (ButtonCode::Right, KEY_RIGHT),
    (ButtonCode::C, KEY_SPACE),
    (ButtonCode::C, KEY_RETURN),
    (ButtonCode::B, KEY_ESCAPE),
    (ButtonCode::B, KEY_KP_0),
    (ButtonCode::B, KEY_X),
    (ButtonCode::Shift, KEY_LSHIFT),
    (ButtonCode::Shift, KEY_RSHIFT),
    (ButtonCode::Z, KEY_D),
    (ButtonCode::L, KEY_Q),
    (ButtonCode::R, KEY_W),
    (ButtonCode::X, KEY_A),
    (ButtonCode::Y, KEY_S),
    (ButtonCode::Ctrl, KEY_LCTRL),
    (ButtonCode::Ctrl, KEY_RCTRL),
    (ButtonCode::Alt, KEY_LALT),
    (ButtonCode::Alt, KEY_RALT),
    (ButtonCode::Pause, KEY_PAUSE),
];

const RGSS1_KEYS: &[(ButtonCode, u32)] = &[(ButtonCode::A, KEY_Z), (ButtonCode::C, KEY_C)];

const RGSS2_KEYS: &[(ButtonCode, u32)] = &[
    (ButtonCode::C, KEY_Z),
    (ButtonCode::A, KEY_LSHIFT),
    (ButtonCode::A, KEY_RSHIFT),
];

const FUNCTION_KEYS: &[ButtonCode] = &[
    ButtonCode::F5,
    ButtonCode::F6,
    ButtonCode::F7,
    ButtonCode::F8,
    ButtonCode::F9,
];

const PAD_BUTTONS: &[(ButtonCode, ControllerButton)] = &[
    (ButtonCode::C, ControllerButton::A),
    (ButtonCode::B, ControllerButton::B),
    (ButtonCode::A, ControllerButton::X),
    (ButtonCode::X, ControllerButton::Y),
    (ButtonCode::L, ControllerButton::LEFTSHOULDER),
    (ButtonCode::R, ControllerButton::RIGHTSHOULDER),
    (ButtonCode::Up, ControllerButton::DPAD_UP),
    (ButtonCode::Down, ControllerButton::DPAD_DOWN),
    (ButtonCode::Left, ControllerButton::DPAD_LEFT),
    (ButtonCode::Right, ControllerButton::DPAD_RIGHT),
    (ButtonCode::Z, ControllerButton::BACK),
    (ButtonCode::Pause, ControllerButton::START),
];

const PAD_AXES: &[(ButtonCode, ControllerAxis, AxisDir)] = &[
    (ButtonCode::Left, ControllerAxis::LEFTX, AxisDir::Negative),
    (ButtonCode::Right, ControllerAxis::LEFTX, AxisDir::Positive),
    (ButtonCode::Up, ControllerAxis::LEFTY, AxisDir::Negative),
    (ButtonCode::Down, ControllerAxis::LEFTY, AxisDir::Positive),
];

/// Builds the default table for `version`
pub fn default_table(version: RgssVersion) -> BindingTable {
    let ruleset_keys = match version {
        RgssVersion::Rgss1 => RGSS1_KEYS,
        RgssVersion::Rgss2 | RgssVersion::Rgss3 => RGSS2_KEYS,
    };

    let keys = COMMON_KEYS
        .iter()
        .chain(ruleset_keys)
        .map(|&(target, code)| BindingDesc::new(target, SourceDesc::Key(Scancode(code))));

    let function_keys = FUNCTION_KEYS
        .iter()
        .zip(KEY_F5..)
        .map(|(&target, code)| BindingDesc::new(target, SourceDesc::Key(Scancode(code))));

    let buttons = PAD_BUTTONS
        .iter()
        .map(|&(target, button)| BindingDesc::new(target, SourceDesc::ControllerButton(button)));

    let axes = PAD_AXES.iter().map(|&(target, axis, dir)| {
        BindingDesc::new(target, SourceDesc::ControllerAxis { axis, dir })
    });

    keys.chain(function_keys).chain(buttons).chain(axes).collect()
}
