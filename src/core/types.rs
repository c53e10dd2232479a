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

//! src/core/types.rs
//!
//! Core type definitions for input binding management
//!
//! This module defines the fundamental types used throughout the crate:
//! - `Scancode`, `ControllerButton`, `ControllerAxis`: physical input ids
//! - `SourceDesc`: one physical input source (key, pad button, pad axis)
//! - `ButtonCode`: the logical RGSS action a source is bound to
//! - `BindingDesc`: a single action ← source pairing
//! - `RgssVersion`: the ruleset the game runs under
//!
//! All types implement serialisation so tables can be dumped as JSON.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Physical keyboard key identifier (SDL scancode numbering)
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Scancode(pub u32);

impl Scancode {
    /// Sentinel for keys that have no scancode (unresolvable names)
    pub const UNKNOWN: Scancode = Scancode(0);

    pub fn is_known(self) -> bool {
        self != Self::UNKNOWN
    }
}

/// Game controller button identifier (SDL game controller numbering)
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct ControllerButton(pub i32);

impl ControllerButton {
    pub const INVALID: ControllerButton = ControllerButton(-1);
    pub const A: ControllerButton = ControllerButton(0);
    pub const B: ControllerButton = ControllerButton(1);
    pub const X: ControllerButton = ControllerButton(2);
    pub const Y: ControllerButton = ControllerButton(3);
    pub const BACK: ControllerButton = ControllerButton(4);
    pub const GUIDE: ControllerButton = ControllerButton(5);
    pub const START: ControllerButton = ControllerButton(6);
    pub const LEFTSTICK: ControllerButton = ControllerButton(7);
    pub const RIGHTSTICK: ControllerButton = ControllerButton(8);
    pub const LEFTSHOULDER: ControllerButton = ControllerButton(9);
    pub const RIGHTSHOULDER: ControllerButton = ControllerButton(10);
    pub const DPAD_UP: ControllerButton = ControllerButton(11);
    pub const DPAD_DOWN: ControllerButton = ControllerButton(12);
    pub const DPAD_LEFT: ControllerButton = ControllerButton(13);
    pub const DPAD_RIGHT: ControllerButton = ControllerButton(14);
    pub const MISC1: ControllerButton = ControllerButton(15);
    pub const PADDLE1: ControllerButton = ControllerButton(16);
    pub const PADDLE2: ControllerButton = ControllerButton(17);
    pub const PADDLE3: ControllerButton = ControllerButton(18);
    pub const PADDLE4: ControllerButton = ControllerButton(19);
    pub const TOUCHPAD: ControllerButton = ControllerButton(20);

    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

/// Game controller axis identifier (SDL game controller numbering)
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct ControllerAxis(pub i32);

impl ControllerAxis {
    pub const INVALID: ControllerAxis = ControllerAxis(-1);
    pub const LEFTX: ControllerAxis = ControllerAxis(0);
    pub const LEFTY: ControllerAxis = ControllerAxis(1);
    pub const RIGHTX: ControllerAxis = ControllerAxis(2);
    pub const RIGHTY: ControllerAxis = ControllerAxis(3);
    pub const TRIGGERLEFT: ControllerAxis = ControllerAxis(4);
    pub const TRIGGERRIGHT: ControllerAxis = ControllerAxis(5);

    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

/// Which way an axis has to be pushed for a binding to fire
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum AxisDir {
    Positive,
    Negative,
}

impl AxisDir {
    /// The sign character used in `axis_` tokens
    pub fn sign(self) -> char {
        match self {
            AxisDir::Positive => '+',
            AxisDir::Negative => '-',
        }
    }
}

/// Discriminant of a `SourceDesc`
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum SourceKind {
    None,
    KeyboardKey,
    ControllerButton,
    ControllerAxis,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::None => write!(f, "none"),
            SourceKind::KeyboardKey => write!(f, "key"),
            SourceKind::ControllerButton => write!(f, "button"),
            SourceKind::ControllerAxis => write!(f, "axis"),
        }
    }
}

/// A physical input source
///
/// The variant decides which payload is meaningful, so a descriptor can
/// never carry data for two kinds at once. Unresolvable names are kept as
/// sentinel payloads (`Scancode::UNKNOWN`, `ControllerButton::INVALID`,
/// `ControllerAxis::INVALID`) rather than rejected.
///
/// # Example
/// ```ignore
/// let source = SourceDesc::ControllerAxis {
///     axis: ControllerAxis::LEFTX,
///     dir: AxisDir::Negative,
/// };
/// assert_eq!(source.to_string(), "axis_leftx-");
/// ```
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum SourceDesc {
    /// No source at all ("no binding")
    #[default]
    None,
    /// Keyboard key
    Key(Scancode),
    /// Game controller button
    ControllerButton(ControllerButton),
    /// Game controller axis pushed in one direction
    ControllerAxis { axis: ControllerAxis, dir: AxisDir },
}

impl SourceDesc {
    pub fn kind(&self) -> SourceKind {
        match self {
            SourceDesc::None => SourceKind::None,
            SourceDesc::Key(_) => SourceKind::KeyboardKey,
            SourceDesc::ControllerButton(_) => SourceKind::ControllerButton,
            SourceDesc::ControllerAxis { .. } => SourceKind::ControllerAxis,
        }
    }

    /// True when the payload refers to something the platform knows about
    pub fn is_resolved(&self) -> bool {
        match self {
            SourceDesc::None => false,
            SourceDesc::Key(scancode) => scancode.is_known(),
            SourceDesc::ControllerButton(button) => button.is_valid(),
            SourceDesc::ControllerAxis { axis, .. } => axis.is_valid(),
        }
    }
}

/// Logical RGSS action (button code)
///
/// Several physical sources may be bound to the same action. `None` is the
/// "no action" code that unresolvable action names degrade to.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ButtonCode {
    None,
    Down,
    Left,
    Right,
    Up,
    A,
    B,
    C,
    X,
    Y,
    Z,
    L,
    R,
    Shift,
    Ctrl,
    Alt,
    F5,
    F6,
    F7,
    F8,
    F9,
    Pause,
    MouseLeft,
    MouseMiddle,
    MouseRight,
    MouseX1,
    MouseX2,
}

/// Action name table, in the order the script surface defines constants
const BUTTON_CODES: &[(&str, ButtonCode, i32)] = &[
    ("DOWN", ButtonCode::Down, 2),
    ("LEFT", ButtonCode::Left, 4),
    ("RIGHT", ButtonCode::Right, 6),
    ("UP", ButtonCode::Up, 8),
    ("C", ButtonCode::C, 13),
    ("Z", ButtonCode::Z, 16),
    ("A", ButtonCode::A, 11),
    ("B", ButtonCode::B, 12),
    ("X", ButtonCode::X, 14),
    ("Y", ButtonCode::Y, 15),
    ("L", ButtonCode::L, 17),
    ("R", ButtonCode::R, 18),
    ("SHIFT", ButtonCode::Shift, 21),
    ("CTRL", ButtonCode::Ctrl, 22),
    ("ALT", ButtonCode::Alt, 23),
    ("F5", ButtonCode::F5, 25),
    ("F6", ButtonCode::F6, 26),
    ("F7", ButtonCode::F7, 27),
    ("F8", ButtonCode::F8, 28),
    ("F9", ButtonCode::F9, 29),
    ("PAUSE", ButtonCode::Pause, 30),
    ("MOUSELEFT", ButtonCode::MouseLeft, 38),
    ("MOUSEMIDDLE", ButtonCode::MouseMiddle, 39),
    ("MOUSERIGHT", ButtonCode::MouseRight, 40),
    ("MOUSEX1", ButtonCode::MouseX1, 41),
    ("MOUSEX2", ButtonCode::MouseX2, 42),
];

impl ButtonCode {
    /// Integer code as seen by scripts
    pub fn code(self) -> i32 {
        BUTTON_CODES
            .iter()
            .find(|(_, button, _)| *button == self)
            .map(|(_, _, code)| *code)
            .unwrap_or(0)
    }

    /// Looks up an action by integer code
    pub fn from_code(code: i64) -> Option<ButtonCode> {
        if code == 0 {
            return Some(ButtonCode::None);
        }
        BUTTON_CODES
            .iter()
            .find(|(_, _, c)| i64::from(*c) == code)
            .map(|(_, button, _)| *button)
    }

    /// Symbolic name (`"DOWN"`, `"MOUSELEFT"`); `None` has no name
    pub fn name(self) -> Option<&'static str> {
        BUTTON_CODES
            .iter()
            .find(|(_, button, _)| *button == self)
            .map(|(name, _, _)| *name)
    }

    /// Looks up an action by symbolic name (case-insensitive)
    pub fn from_name(name: &str) -> Option<ButtonCode> {
        BUTTON_CODES
            .iter()
            .find(|(n, _, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, button, _)| *button)
    }

    /// Every named action, in definition order
    pub fn named() -> impl Iterator<Item = (&'static str, ButtonCode)> {
        BUTTON_CODES.iter().map(|(name, button, _)| (*name, *button))
    }

    /// Resolves a script argument to an action
    ///
    /// Integer codes always resolve (unknown codes become `None`); names
    /// only resolve from RGSS3 onward and otherwise degrade to `None`.
    pub fn resolve(arg: &ButtonArg, version: RgssVersion) -> ButtonCode {
        match arg {
            ButtonArg::Code(code) => ButtonCode::from_code(*code).unwrap_or(ButtonCode::None),
            ButtonArg::Name(name) if version.has_symbolic_buttons() => {
                ButtonCode::from_name(name).unwrap_or(ButtonCode::None)
            }
            ButtonArg::Name(_) => ButtonCode::None,
        }
    }
}

impl fmt::Display for ButtonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "NONE"),
        }
    }
}

/// How a script addressed an action
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ButtonArg {
    /// Integer action code
    Code(i64),
    /// Symbolic action name
    Name(String),
}

/// A single binding: one physical source driving one action
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct BindingDesc {
    /// Action this source drives
    pub target: ButtonCode,

    /// Physical source
    pub source: SourceDesc,
}

impl BindingDesc {
    pub fn new(target: ButtonCode, source: SourceDesc) -> Self {
        Self { target, source }
    }
}

impl fmt::Display for BindingDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ← {}", self.target, self.source)
    }
}

/// RGSS ruleset version
///
/// Decides the default key layout and whether action names may be used in
/// place of integer codes.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum RgssVersion {
    Rgss1,
    Rgss2,
    #[default]
    Rgss3,
}

impl RgssVersion {
    pub fn number(self) -> u8 {
        match self {
            RgssVersion::Rgss1 => 1,
            RgssVersion::Rgss2 => 2,
            RgssVersion::Rgss3 => 3,
        }
    }

    /// Action names are accepted (and constants are symbols) from RGSS3 on
    pub fn has_symbolic_buttons(self) -> bool {
        self >= RgssVersion::Rgss3
    }
}

impl TryFrom<u8> for RgssVersion {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(RgssVersion::Rgss1),
            2 => Ok(RgssVersion::Rgss2),
            3 => Ok(RgssVersion::Rgss3),
            other => Err(format!("unsupported RGSS version {} (expected 1, 2 or 3)", other)),
        }
    }
}

impl From<RgssVersion> for u8 {
    fn from(version: RgssVersion) -> Self {
        version.number()
    }
}

impl fmt::Display for RgssVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RGSS{}", self.number())
    }
}
