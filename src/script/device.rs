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

//! src/script/device.rs
//!
//! Live input collaborator
//!
//! Button-state tracking, repeat timing and controller enumeration belong
//! to whatever drives the window. The script layer only needs the
//! `InputDevice` contract below. `HeadlessInput` implements it without a
//! window: sources are held and released programmatically, and the binding
//! table is picked up from the shared slot on every `update`.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use thiserror::Error;
use tracing::debug;

use crate::core::names;
use crate::core::shared::SharedBindings;
use crate::core::table::BindingTable;
use crate::core::types::{ButtonCode, ControllerAxis, ControllerButton, Scancode, SourceDesc};

/// Platform access failures (clipboard and the like)
#[derive(Debug, Error, PartialEq)]
pub enum DeviceError {
    #[error("Clipboard unavailable: {0}")]
    Clipboard(String),
}

/// How a raw-key query names its key
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum KeyRef {
    /// Physical key position
    Scancode(Scancode),
    /// Layout-dependent key code
    VirtualKey(i32),
}

/// Controller battery state
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum PowerLevel {
    #[default]
    Unknown,
    Empty,
    Low,
    Medium,
    Full,
    Wired,
    Max,
}

impl PowerLevel {
    pub fn name(self) -> &'static str {
        match self {
            PowerLevel::Unknown => "UNKNOWN",
            PowerLevel::Empty => "EMPTY",
            PowerLevel::Low => "LOW",
            PowerLevel::Medium => "MEDIUM",
            PowerLevel::Full => "FULL",
            PowerLevel::Wired => "WIRED",
            PowerLevel::Max => "MAX",
        }
    }
}

/// Everything the script surface asks of the live input component
///
/// Methods take `&self`; implementors keep their own state behind interior
/// mutability so one device can be shared with the script engine.
pub trait InputDevice: Send + Sync {
    /// Advances one frame
    fn update(&self);
    /// Seconds since the previous `update`
    fn delta(&self) -> f64;

    fn is_pressed(&self, action: ButtonCode) -> bool;
    fn is_triggered(&self, action: ButtonCode) -> bool;
    fn is_repeated(&self, action: ButtonCode) -> bool;
    fn is_released(&self, action: ButtonCode) -> bool;
    /// Frames the action has been held
    fn count(&self, action: ButtonCode) -> u32;
    /// Seconds the action has been held
    fn repeat_time(&self, action: ButtonCode) -> f64;

    fn is_pressed_ex(&self, key: KeyRef) -> bool;
    fn is_triggered_ex(&self, key: KeyRef) -> bool;
    fn is_repeated_ex(&self, key: KeyRef) -> bool;
    fn is_released_ex(&self, key: KeyRef) -> bool;
    fn repeat_count_ex(&self, key: KeyRef) -> u32;
    fn repeat_time_ex(&self, key: KeyRef) -> f64;

    /// 0, or 2/4/6/8 for the dominant direction
    fn dir4(&self) -> i32;
    /// 0, or 1..=9 keypad-style
    fn dir8(&self) -> i32;

    fn mouse_x(&self) -> i32;
    fn mouse_y(&self) -> i32;
    fn scroll_v(&self) -> i32;
    fn mouse_in_window(&self) -> bool;
    /// One entry per scancode
    fn raw_key_states(&self) -> Vec<bool>;

    fn controller_connected(&self) -> bool;
    fn controller_name(&self) -> String;
    fn controller_power_level(&self) -> PowerLevel;
    /// Raw axis value in `-32768..=32767`
    fn controller_axis(&self, axis: ControllerAxis) -> i16;
    fn raw_button_states(&self) -> Vec<bool>;
    fn raw_axes(&self) -> Vec<i16>;
    fn controller_is_pressed_ex(&self, button: ControllerButton) -> bool;
    fn controller_is_triggered_ex(&self, button: ControllerButton) -> bool;
    fn controller_is_repeated_ex(&self, button: ControllerButton) -> bool;
    fn controller_is_released_ex(&self, button: ControllerButton) -> bool;
    fn controller_repeat_count(&self, button: ControllerButton) -> u32;
    fn controller_repeat_time_ex(&self, button: ControllerButton) -> f64;

    fn text_input_mode(&self) -> bool;
    fn set_text_input_mode(&self, enabled: bool);
    /// Returns and clears the text typed since the last call
    fn take_text(&self) -> String;

    fn clipboard_text(&self) -> Result<String, DeviceError>;
    fn set_clipboard_text(&self, text: &str) -> Result<(), DeviceError>;

    /// Kind of device that produced the most recent input
    fn last_device(&self) -> String;
    /// Most recently pressed source
    fn last_input(&self) -> SourceDesc;
    fn clear_last_input(&self);

    /// Name shown to players for a controller button
    fn button_display_name(&self, button: ControllerButton) -> String {
        names::button_name(button).unwrap_or("").to_string()
    }

    /// Name shown to players for a controller axis
    fn axis_display_name(&self, axis: ControllerAxis) -> String {
        names::axis_name(axis).unwrap_or("").to_string()
    }
}

const FRAME_RATE: f64 = 60.0;
const REPEAT_DELAY: u32 = 24;
const REPEAT_INTERVAL: u32 = 6;
const SCANCODE_COUNT: usize = 512;
const AXIS_COUNT: usize = 6;

#[derive(Debug, Default)]
struct HeadlessState {
    table: Arc<BindingTable>,
    seen_generation: u64,

    /// Sources held right now (applied on the next update)
    held: Vec<SourceDesc>,
    /// Sources held as of the last update
    current: Vec<SourceDesc>,
    previous: Vec<SourceDesc>,
    held_frames: HashMap<SourceDesc, u32>,

    last_input: SourceDesc,
    last_device: String,

    controller: Option<String>,
    power_level: PowerLevel,
    axes: [i16; AXIS_COUNT],

    mouse: (i32, i32),
    scroll_v: i32,
    mouse_in_window: bool,

    text_input: bool,
    text: String,
    clipboard: String,
}

/// Window-less `InputDevice`
///
/// # Example
/// ```ignore
/// let device = HeadlessInput::new(controller.shared());
/// device.hold(SourceDesc::Key(Scancode(40)));
/// device.update();
/// assert!(device.is_pressed(ButtonCode::C));
/// ```
#[derive(Debug)]
pub struct HeadlessInput {
    bindings: SharedBindings,
    state: Mutex<HeadlessState>,
}

impl HeadlessInput {
    pub fn new(bindings: SharedBindings) -> Self {
        let state = HeadlessState {
            table: bindings.snapshot(),
            seen_generation: bindings.generation(),
            last_device: "keyboard".to_string(),
            ..HeadlessState::default()
        };
        Self {
            bindings,
            state: Mutex::new(state),
        }
    }

    /// Starts holding a source; visible after the next `update`
    pub fn hold(&self, source: SourceDesc) {
        let mut state = self.state.lock();
        if !state.held.contains(&source) {
            state.held.push(source);
        }
    }

    /// Stops holding a source; visible after the next `update`
    pub fn release(&self, source: SourceDesc) {
        self.state.lock().held.retain(|held| *held != source);
    }

    pub fn connect_controller(&self, name: &str) {
        let mut state = self.state.lock();
        state.controller = Some(name.to_string());
        state.power_level = PowerLevel::Wired;
    }

    pub fn disconnect_controller(&self) {
        let mut state = self.state.lock();
        state.controller = None;
        state.power_level = PowerLevel::Unknown;
        state.axes = [0; AXIS_COUNT];
    }

    pub fn set_axis(&self, axis: ControllerAxis, value: i16) {
        let Ok(index) = usize::try_from(axis.0) else {
            return;
        };
        if let Some(slot) = self.state.lock().axes.get_mut(index) {
            *slot = value;
        }
    }

    pub fn move_mouse(&self, x: i32, y: i32) {
        let mut state = self.state.lock();
        state.mouse = (x, y);
        state.mouse_in_window = true;
    }

    /// Types text; dropped unless text input mode is on
    pub fn type_text(&self, text: &str) {
        let mut state = self.state.lock();
        if state.text_input {
            state.text.push_str(text);
        }
    }

    fn action_sources(&self, state: &HeadlessState, action: ButtonCode) -> Vec<SourceDesc> {
        if action == ButtonCode::None {
            return Vec::new();
        }
        state.table.lookup(action)
    }

    fn action_active(&self, sources: &[SourceDesc], held: &[SourceDesc]) -> bool {
        sources.iter().any(|source| held.contains(source))
    }

    fn action_frames(&self, state: &HeadlessState, action: ButtonCode) -> u32 {
        self.action_sources(state, action)
            .iter()
            .filter_map(|source| state.held_frames.get(source))
            .copied()
            .max()
            .unwrap_or(0)
    }

    fn source_for_key(key: KeyRef) -> Option<SourceDesc> {
        match key {
            KeyRef::Scancode(scancode) => Some(SourceDesc::Key(scancode)),
            // No keyboard layout without a window
            KeyRef::VirtualKey(_) => None,
        }
    }

    fn source_state<F>(&self, source: Option<SourceDesc>, f: F) -> bool
    where
        F: Fn(bool, bool) -> bool,
    {
        let Some(source) = source else {
            return false;
        };
        let state = self.state.lock();
        f(state.current.contains(&source), state.previous.contains(&source))
    }

    fn source_frames(&self, source: Option<SourceDesc>) -> u32 {
        source
            .and_then(|source| self.state.lock().held_frames.get(&source).copied())
            .unwrap_or(0)
    }
}

fn is_repeat_frame(frames: u32) -> bool {
    frames == 1 || (frames > REPEAT_DELAY && (frames - REPEAT_DELAY) % REPEAT_INTERVAL == 0)
}

fn device_kind(source: &SourceDesc) -> &'static str {
    match source {
        SourceDesc::ControllerButton(_) | SourceDesc::ControllerAxis { .. } => "controller",
        _ => "keyboard",
    }
}

impl InputDevice for HeadlessInput {
    fn update(&self) {
        let mut state = self.state.lock();

        let mut seen = state.seen_generation;
        if let Some(table) = self.bindings.poll(&mut seen) {
            debug!("Input picked up new bindings ({} entries)", table.len());
            state.table = table;
            state.seen_generation = seen;
        }

        let held = state.held.clone();
        state.previous = std::mem::replace(&mut state.current, held.clone());

        state.held_frames.retain(|source, _| held.contains(source));
        for source in &held {
            *state.held_frames.entry(*source).or_insert(0) += 1;
        }

        let newly_pressed = held
            .iter()
            .find(|source| !state.previous.contains(*source))
            .copied();
        if let Some(source) = newly_pressed {
            state.last_device = device_kind(&source).to_string();
            state.last_input = source;
        }
    }

    fn delta(&self) -> f64 {
        1.0 / FRAME_RATE
    }

    fn is_pressed(&self, action: ButtonCode) -> bool {
        let state = self.state.lock();
        let sources = self.action_sources(&state, action);
        self.action_active(&sources, &state.current)
    }

    fn is_triggered(&self, action: ButtonCode) -> bool {
        let state = self.state.lock();
        let sources = self.action_sources(&state, action);
        self.action_active(&sources, &state.current) && !self.action_active(&sources, &state.previous)
    }

    fn is_repeated(&self, action: ButtonCode) -> bool {
        let state = self.state.lock();
        let sources = self.action_sources(&state, action);
        self.action_active(&sources, &state.current)
            && is_repeat_frame(self.action_frames(&state, action))
    }

    fn is_released(&self, action: ButtonCode) -> bool {
        let state = self.state.lock();
        let sources = self.action_sources(&state, action);
        !self.action_active(&sources, &state.current) && self.action_active(&sources, &state.previous)
    }

    fn count(&self, action: ButtonCode) -> u32 {
        let state = self.state.lock();
        self.action_frames(&state, action)
    }

    fn repeat_time(&self, action: ButtonCode) -> f64 {
        f64::from(self.count(action)) / FRAME_RATE
    }

    fn is_pressed_ex(&self, key: KeyRef) -> bool {
        self.source_state(Self::source_for_key(key), |now, _| now)
    }

    fn is_triggered_ex(&self, key: KeyRef) -> bool {
        self.source_state(Self::source_for_key(key), |now, before| now && !before)
    }

    fn is_repeated_ex(&self, key: KeyRef) -> bool {
        let source = Self::source_for_key(key);
        self.source_state(source, |now, _| now) && is_repeat_frame(self.source_frames(source))
    }

    fn is_released_ex(&self, key: KeyRef) -> bool {
        self.source_state(Self::source_for_key(key), |now, before| !now && before)
    }

    fn repeat_count_ex(&self, key: KeyRef) -> u32 {
        self.source_frames(Self::source_for_key(key))
    }

    fn repeat_time_ex(&self, key: KeyRef) -> f64 {
        f64::from(self.repeat_count_ex(key)) / FRAME_RATE
    }

    fn dir4(&self) -> i32 {
        let pressed = |action| self.is_pressed(action);
        match (
            pressed(ButtonCode::Down),
            pressed(ButtonCode::Left),
            pressed(ButtonCode::Right),
            pressed(ButtonCode::Up),
        ) {
            (true, _, _, false) => 2,
            (_, true, false, _) => 4,
            (_, false, true, _) => 6,
            (false, _, _, true) => 8,
            _ => 0,
        }
    }

    fn dir8(&self) -> i32 {
        let pressed = |action| self.is_pressed(action);
        let vertical = match (pressed(ButtonCode::Down), pressed(ButtonCode::Up)) {
            (true, false) => -1,
            (false, true) => 1,
            _ => 0,
        };
        let horizontal = match (pressed(ButtonCode::Left), pressed(ButtonCode::Right)) {
            (true, false) => -1,
            (false, true) => 1,
            _ => 0,
        };
        if vertical == 0 && horizontal == 0 {
            return 0;
        }
        // Keypad layout: 1 2 3 on the bottom row, 7 8 9 on top
        5 + horizontal + 3 * vertical
    }

    fn mouse_x(&self) -> i32 {
        self.state.lock().mouse.0
    }

    fn mouse_y(&self) -> i32 {
        self.state.lock().mouse.1
    }

    fn scroll_v(&self) -> i32 {
        self.state.lock().scroll_v
    }

    fn mouse_in_window(&self) -> bool {
        self.state.lock().mouse_in_window
    }

    fn raw_key_states(&self) -> Vec<bool> {
        let state = self.state.lock();
        let mut keys = vec![false; SCANCODE_COUNT];
        for source in &state.current {
            if let SourceDesc::Key(scancode) = source {
                if let Some(key) = keys.get_mut(scancode.0 as usize) {
                    *key = true;
                }
            }
        }
        keys
    }

    fn controller_connected(&self) -> bool {
        self.state.lock().controller.is_some()
    }

    fn controller_name(&self) -> String {
        self.state.lock().controller.clone().unwrap_or_default()
    }

    fn controller_power_level(&self) -> PowerLevel {
        self.state.lock().power_level
    }

    fn controller_axis(&self, axis: ControllerAxis) -> i16 {
        usize::try_from(axis.0)
            .ok()
            .and_then(|index| self.state.lock().axes.get(index).copied())
            .unwrap_or(0)
    }

    fn raw_button_states(&self) -> Vec<bool> {
        let state = self.state.lock();
        names::controller_buttons()
            .map(|button| state.current.contains(&SourceDesc::ControllerButton(button)))
            .collect()
    }

    fn raw_axes(&self) -> Vec<i16> {
        self.state.lock().axes.to_vec()
    }

    fn controller_is_pressed_ex(&self, button: ControllerButton) -> bool {
        self.source_state(Some(SourceDesc::ControllerButton(button)), |now, _| now)
    }

    fn controller_is_triggered_ex(&self, button: ControllerButton) -> bool {
        self.source_state(Some(SourceDesc::ControllerButton(button)), |now, before| {
            now && !before
        })
    }

    fn controller_is_repeated_ex(&self, button: ControllerButton) -> bool {
        let source = Some(SourceDesc::ControllerButton(button));
        self.source_state(source, |now, _| now) && is_repeat_frame(self.source_frames(source))
    }

    fn controller_is_released_ex(&self, button: ControllerButton) -> bool {
        self.source_state(Some(SourceDesc::ControllerButton(button)), |now, before| {
            !now && before
        })
    }

    fn controller_repeat_count(&self, button: ControllerButton) -> u32 {
        self.source_frames(Some(SourceDesc::ControllerButton(button)))
    }

    fn controller_repeat_time_ex(&self, button: ControllerButton) -> f64 {
        f64::from(self.controller_repeat_count(button)) / FRAME_RATE
    }

    fn text_input_mode(&self) -> bool {
        self.state.lock().text_input
    }

    fn set_text_input_mode(&self, enabled: bool) {
        self.state.lock().text_input = enabled;
    }

    fn take_text(&self) -> String {
        std::mem::take(&mut self.state.lock().text)
    }

    fn clipboard_text(&self) -> Result<String, DeviceError> {
        Ok(self.state.lock().clipboard.clone())
    }

    fn set_clipboard_text(&self, text: &str) -> Result<(), DeviceError> {
        self.state.lock().clipboard = text.to_string();
        Ok(())
    }

    fn last_device(&self) -> String {
        self.state.lock().last_device.clone()
    }

    fn last_input(&self) -> SourceDesc {
        self.state.lock().last_input
    }

    fn clear_last_input(&self) {
        self.state.lock().last_input = SourceDesc::None;
    }
}
