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

//! src/core/names.rs
//!
//! Platform name tables for keys, controller buttons and controller axes
//!
//! Names follow the SDL2 conventions so that binding files written by
//! SDL-based runtimes stay readable:
//! - Scancodes have a display name ("Return", "Left Shift") used in binding
//!   tokens, and an identifier ("RETURN", "LSHIFT") used by scripts that
//!   query raw keys
//! - Controller buttons and axes have lower-case names ("a", "dpup",
//!   "leftx") used in binding tokens, and upper-case identifiers for scripts
//!
//! # Two lookup flavours
//! The `*_from_name` functions are lenient: an unknown name yields the
//! sentinel id. The `lookup_*` functions are strict and return a
//! `NameError` carrying the offending name.

use thiserror::Error;

use crate::core::types::{ControllerAxis, ControllerButton, Scancode};

/// Strict name resolution failures
#[derive(Debug, Error, PartialEq)]
pub enum NameError {
    #[error("{0} is not a valid name of an SDL scancode.")]
    UnknownScancode(String),

    #[error("{0} is not a valid name of an SDL Controller button.")]
    UnknownControllerButton(String),
}

/// (identifier, scancode, display name)
const SCANCODES: &[(&str, u32, &str)] = &[
    ("A", 4, "A"),
    ("B", 5, "B"),
    ("C", 6, "C"),
    ("D", 7, "D"),
    ("E", 8, "E"),
    ("F", 9, "F"),
    ("G", 10, "G"),
    ("H", 11, "H"),
    ("I", 12, "I"),
    ("J", 13, "J"),
    ("K", 14, "K"),
    ("L", 15, "L"),
    ("M", 16, "M"),
    ("N", 17, "N"),
    ("O", 18, "O"),
    ("P", 19, "P"),
    ("Q", 20, "Q"),
    ("R", 21, "R"),
    ("S", 22, "S"),
    ("T", 23, "T"),
    ("U", 24, "U"),
    ("V", 25, "V"),
    ("W", 26, "W"),
    ("X", 27, "X"),
    ("Y", 28, "Y"),
    ("Z", 29, "Z"),
    ("1", 30, "1"),
    ("2", 31, "2"),
    ("3", 32, "3"),
    ("4", 33, "4"),
    ("5", 34, "5"),
    ("6", 35, "6"),
    ("7", 36, "7"),
    ("8", 37, "8"),
    ("9", 38, "9"),
    ("0", 39, "0"),
    ("RETURN", 40, "Return"),
    ("ESCAPE", 41, "Escape"),
    ("BACKSPACE", 42, "Backspace"),
    ("TAB", 43, "Tab"),
    ("SPACE", 44, "Space"),
    ("MINUS", 45, "-"),
    ("EQUALS", 46, "="),
    ("LEFTBRACKET", 47, "["),
    ("RIGHTBRACKET", 48, "]"),
    ("BACKSLASH", 49, "\\"),
    ("NONUSHASH", 50, "#"),
    ("SEMICOLON", 51, ";"),
    ("APOSTROPHE", 52, "'"),
    ("GRAVE", 53, "`"),
    ("COMMA", 54, ","),
    ("PERIOD", 55, "."),
    ("SLASH", 56, "/"),
    ("CAPSLOCK", 57, "CapsLock"),
    ("F1", 58, "F1"),
    ("F2", 59, "F2"),
    ("F3", 60, "F3"),
    ("F4", 61, "F4"),
    ("F5", 62, "F5"),
    ("F6", 63, "F6"),
    ("F7", 64, "F7"),
    ("F8", 65, "F8"),
    ("F9", 66, "F9"),
    ("F10", 67, "F10"),
    ("F11", 68, "F11"),
    ("F12", 69, "F12"),
    ("PRINTSCREEN", 70, "PrintScreen"),
    ("SCROLLLOCK", 71, "ScrollLock"),
    ("PAUSE", 72, "Pause"),
    ("INSERT", 73, "Insert"),
    ("HOME", 74, "Home"),
    ("PAGEUP", 75, "PageUp"),
    ("DELETE", 76, "Delete"),
    ("END", 77, "End"),
    ("PAGEDOWN", 78, "PageDown"),
    ("RIGHT", 79, "Right"),
    ("LEFT", 80, "Left"),
    ("DOWN", 81, "Down"),
    ("UP", 82, "Up"),
    ("NUMLOCKCLEAR", 83, "Numlock"),
    ("KP_DIVIDE", 84, "Keypad /"),
    ("KP_MULTIPLY", 85, "Keypad *"),
    ("KP_MINUS", 86, "Keypad -"),
    ("KP_PLUS", 87, "Keypad +"),
    ("KP_ENTER", 88, "Keypad Enter"),
    ("KP_1", 89, "Keypad 1"),
    ("KP_2", 90, "Keypad 2"),
    ("KP_3", 91, "Keypad 3"),
    ("KP_4", 92, "Keypad 4"),
    ("KP_5", 93, "Keypad 5"),
    ("KP_6", 94, "Keypad 6"),
    ("KP_7", 95, "Keypad 7"),
    ("KP_8", 96, "Keypad 8"),
    ("KP_9", 97, "Keypad 9"),
    ("KP_0", 98, "Keypad 0"),
    ("KP_PERIOD", 99, "Keypad ."),
    ("APPLICATION", 101, "Application"),
    ("POWER", 102, "Power"),
    ("KP_EQUALS", 103, "Keypad ="),
    ("F13", 104, "F13"),
    ("F14", 105, "F14"),
    ("F15", 106, "F15"),
    ("F16", 107, "F16"),
    ("F17", 108, "F17"),
    ("F18", 109, "F18"),
    ("F19", 110, "F19"),
    ("F20", 111, "F20"),
    ("F21", 112, "F21"),
    ("F22", 113, "F22"),
    ("F23", 114, "F23"),
    ("F24", 115, "F24"),
    ("EXECUTE", 116, "Execute"),
    ("HELP", 117, "Help"),
    ("MENU", 118, "Menu"),
    ("SELECT", 119, "Select"),
    ("STOP", 120, "Stop"),
    ("AGAIN", 121, "Again"),
    ("UNDO", 122, "Undo"),
    ("CUT", 123, "Cut"),
    ("COPY", 124, "Copy"),
    ("PASTE", 125, "Paste"),
    ("FIND", 126, "Find"),
    ("MUTE", 127, "Mute"),
    ("VOLUMEUP", 128, "VolumeUp"),
    ("VOLUMEDOWN", 129, "VolumeDown"),
    ("KP_COMMA", 133, "Keypad ,"),
    ("LCTRL", 224, "Left Ctrl"),
    ("LSHIFT", 225, "Left Shift"),
    ("LALT", 226, "Left Alt"),
    ("LGUI", 227, "Left GUI"),
    ("RCTRL", 228, "Right Ctrl"),
    ("RSHIFT", 229, "Right Shift"),
    ("RALT", 230, "Right Alt"),
    ("RGUI", 231, "Right GUI"),
    ("MODE", 257, "ModeSwitch"),
];

/// (identifier, token name), indexed by button id
const CONTROLLER_BUTTONS: &[(&str, &str)] = &[
    ("A", "a"),
    ("B", "b"),
    ("X", "x"),
    ("Y", "y"),
    ("BACK", "back"),
    ("GUIDE", "guide"),
    ("START", "start"),
    ("LEFTSTICK", "leftstick"),
    ("RIGHTSTICK", "rightstick"),
    ("LEFTSHOULDER", "leftshoulder"),
    ("RIGHTSHOULDER", "rightshoulder"),
    ("DPAD_UP", "dpup"),
    ("DPAD_DOWN", "dpdown"),
    ("DPAD_LEFT", "dpleft"),
    ("DPAD_RIGHT", "dpright"),
    ("MISC1", "misc1"),
    ("PADDLE1", "paddle1"),
    ("PADDLE2", "paddle2"),
    ("PADDLE3", "paddle3"),
    ("PADDLE4", "paddle4"),
    ("TOUCHPAD", "touchpad"),
];

/// Token names, indexed by axis id
const CONTROLLER_AXES: &[&str] = &[
    "leftx",
    "lefty",
    "rightx",
    "righty",
    "lefttrigger",
    "righttrigger",
];

/// Display name of a scancode, `""` when it has none
pub fn scancode_name(scancode: Scancode) -> &'static str {
    SCANCODES
        .iter()
        .find(|(_, code, _)| *code == scancode.0)
        .map(|(_, _, name)| *name)
        .unwrap_or("")
}

/// Resolves a display name to a scancode (case-insensitive)
///
/// Returns `Scancode::UNKNOWN` for empty or unknown names.
pub fn scancode_from_name(name: &str) -> Scancode {
    if name.is_empty() {
        return Scancode::UNKNOWN;
    }
    SCANCODES
        .iter()
        .find(|(_, _, n)| n.eq_ignore_ascii_case(name))
        .map(|(_, code, _)| Scancode(*code))
        .unwrap_or(Scancode::UNKNOWN)
}

/// Resolves a scancode identifier such as `RETURN` or `LSHIFT`
pub fn lookup_scancode(ident: &str) -> Result<Scancode, NameError> {
    SCANCODES
        .iter()
        .find(|(i, _, _)| i.eq_ignore_ascii_case(ident))
        .map(|(_, code, _)| Scancode(*code))
        .ok_or_else(|| NameError::UnknownScancode(ident.to_string()))
}

/// Every named scancode
pub fn scancodes() -> impl Iterator<Item = Scancode> {
    SCANCODES.iter().map(|(_, code, _)| Scancode(*code))
}

/// Token name of a controller button (`"a"`, `"dpup"`)
pub fn button_name(button: ControllerButton) -> Option<&'static str> {
    usize::try_from(button.0)
        .ok()
        .and_then(|index| CONTROLLER_BUTTONS.get(index))
        .map(|(_, name)| *name)
}

/// Resolves a controller button token name (case-insensitive)
pub fn button_from_name(name: &str) -> ControllerButton {
    CONTROLLER_BUTTONS
        .iter()
        .position(|(_, n)| n.eq_ignore_ascii_case(name))
        .map(|index| ControllerButton(index as i32))
        .unwrap_or(ControllerButton::INVALID)
}

/// Resolves a controller button identifier such as `DPAD_UP`
pub fn lookup_controller_button(ident: &str) -> Result<ControllerButton, NameError> {
    CONTROLLER_BUTTONS
        .iter()
        .position(|(i, _)| i.eq_ignore_ascii_case(ident))
        .map(|index| ControllerButton(index as i32))
        .ok_or_else(|| NameError::UnknownControllerButton(ident.to_string()))
}

/// Every named controller button
pub fn controller_buttons() -> impl Iterator<Item = ControllerButton> {
    (0..CONTROLLER_BUTTONS.len()).map(|index| ControllerButton(index as i32))
}

/// Token name of a controller axis (`"leftx"`)
pub fn axis_name(axis: ControllerAxis) -> Option<&'static str> {
    usize::try_from(axis.0)
        .ok()
        .and_then(|index| CONTROLLER_AXES.get(index))
        .copied()
}

/// Resolves a controller axis token name (case-insensitive)
///
/// A single leading `+` or `-` is ignored.
pub fn axis_from_name(name: &str) -> ControllerAxis {
    let name = name
        .strip_prefix('+')
        .or_else(|| name.strip_prefix('-'))
        .unwrap_or(name);

    CONTROLLER_AXES
        .iter()
        .position(|n| n.eq_ignore_ascii_case(name))
        .map(|index| ControllerAxis(index as i32))
        .unwrap_or(ControllerAxis::INVALID)
}

/// Every named controller axis
pub fn controller_axes() -> impl Iterator<Item = ControllerAxis> {
    (0..CONTROLLER_AXES.len()).map(|index| ControllerAxis(index as i32))
}
