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

//! HeadlessInput tests

use crate::core::{
    defaults::default_table,
    shared::{BindingSlot, SharedBindings},
    table::BindingTable,
    types::{BindingDesc, ButtonCode, ControllerAxis, ControllerButton, RgssVersion, Scancode, SourceDesc},
};
use crate::script::device::{HeadlessInput, InputDevice, KeyRef, PowerLevel};

const RETURN: SourceDesc = SourceDesc::Key(Scancode(40));
const UP: SourceDesc = SourceDesc::Key(Scancode(82));
const DOWN: SourceDesc = SourceDesc::Key(Scancode(81));
const LEFT: SourceDesc = SourceDesc::Key(Scancode(80));
const RIGHT: SourceDesc = SourceDesc::Key(Scancode(79));

/// Helper: device over the RGSS3 default layout.
fn create_device() -> (SharedBindings, HeadlessInput) {
    let slot = BindingSlot::shared(default_table(RgssVersion::Rgss3));
    let device = HeadlessInput::new(SharedBindings::clone(&slot));
    (slot, device)
}

#[test]
fn test_nothing_pressed_initially() {
    let (_slot, device) = create_device();
    device.update();

    assert!(!device.is_pressed(ButtonCode::C));
    assert_eq!(device.count(ButtonCode::C), 0);
    assert_eq!(device.dir4(), 0);
    assert_eq!(device.dir8(), 0);
    assert_eq!(device.last_input(), SourceDesc::None);
}

#[test]
fn test_press_trigger_release_cycle() {
    let (_slot, device) = create_device();

    device.hold(RETURN);
    device.update();
    assert!(device.is_pressed(ButtonCode::C));
    assert!(device.is_triggered(ButtonCode::C));
    assert!(!device.is_released(ButtonCode::C));

    device.update();
    assert!(device.is_pressed(ButtonCode::C));
    assert!(!device.is_triggered(ButtonCode::C));
    assert_eq!(device.count(ButtonCode::C), 2);

    device.release(RETURN);
    device.update();
    assert!(!device.is_pressed(ButtonCode::C));
    assert!(device.is_released(ButtonCode::C));
    assert_eq!(device.count(ButtonCode::C), 0);
}

#[test]
fn test_hold_is_visible_only_after_update() {
    let (_slot, device) = create_device();
    device.hold(RETURN);
    assert!(!device.is_pressed(ButtonCode::C));
    device.update();
    assert!(device.is_pressed(ButtonCode::C));
}

#[test]
fn test_repeat_timing() {
    let (_slot, device) = create_device();
    device.hold(RETURN);

    let mut repeats = Vec::new();
    for frame in 1..=36 {
        device.update();
        if device.is_repeated(ButtonCode::C) {
            repeats.push(frame);
        }
    }

    assert_eq!(repeats, vec![1, 30, 36]);
    assert!((device.repeat_time(ButtonCode::C) - 36.0 / 60.0).abs() < 1e-9);
}

#[test]
fn test_directions() {
    let (_slot, device) = create_device();

    device.hold(UP);
    device.update();
    assert_eq!(device.dir4(), 8);
    assert_eq!(device.dir8(), 8);

    device.hold(RIGHT);
    device.update();
    assert_eq!(device.dir8(), 9);

    device.release(UP);
    device.release(RIGHT);
    device.hold(DOWN);
    device.hold(LEFT);
    device.update();
    assert_eq!(device.dir8(), 1);
    assert_eq!(device.dir4(), 2);
}

#[test]
fn test_picks_up_posted_table() {
    let (slot, device) = create_device();
    let f_key = SourceDesc::Key(Scancode(9));

    device.hold(f_key);
    device.update();
    assert!(!device.is_pressed(ButtonCode::C));

    let table: BindingTable = vec![BindingDesc::new(ButtonCode::C, f_key)]
        .into_iter()
        .collect();
    slot.post(table);

    device.update();
    assert!(device.is_pressed(ButtonCode::C));

    device.release(f_key);
    device.hold(RETURN);
    device.update();
    assert!(!device.is_pressed(ButtonCode::C));
}

#[test]
fn test_raw_keys() {
    let (_slot, device) = create_device();
    device.hold(RETURN);
    device.update();

    assert!(device.is_pressed_ex(KeyRef::Scancode(Scancode(40))));
    assert!(device.is_triggered_ex(KeyRef::Scancode(Scancode(40))));
    assert_eq!(device.repeat_count_ex(KeyRef::Scancode(Scancode(40))), 1);
    assert!(!device.is_pressed_ex(KeyRef::VirtualKey(13)));

    let states = device.raw_key_states();
    assert_eq!(states.len(), 512);
    assert!(states[40]);
    assert_eq!(states.iter().filter(|pressed| **pressed).count(), 1);
}

#[test]
fn test_controller_state() {
    let (_slot, device) = create_device();
    assert!(!device.controller_connected());
    assert_eq!(device.controller_name(), "");
    assert_eq!(device.controller_power_level(), PowerLevel::Unknown);

    device.connect_controller("Test Pad");
    device.set_axis(ControllerAxis::LEFTX, -32768);
    device.hold(SourceDesc::ControllerButton(ControllerButton::A));
    device.update();

    assert_eq!(device.controller_name(), "Test Pad");
    assert_eq!(device.controller_power_level(), PowerLevel::Wired);
    assert_eq!(device.controller_axis(ControllerAxis::LEFTX), -32768);
    assert_eq!(device.controller_axis(ControllerAxis::INVALID), 0);
    assert!(device.controller_is_pressed_ex(ControllerButton::A));
    assert!(device.is_pressed(ButtonCode::C));
    assert_eq!(device.raw_button_states().len(), 21);
    assert_eq!(device.last_device(), "controller");

    device.disconnect_controller();
    assert_eq!(device.raw_axes(), vec![0; 6]);
}

#[test]
fn test_last_input() {
    let (_slot, device) = create_device();
    device.hold(RETURN);
    device.update();
    assert_eq!(device.last_input(), RETURN);
    assert_eq!(device.last_device(), "keyboard");

    device.clear_last_input();
    assert_eq!(device.last_input(), SourceDesc::None);

    // Still held: no new press, nothing recorded
    device.update();
    assert_eq!(device.last_input(), SourceDesc::None);
}

#[test]
fn test_text_input_only_while_enabled() {
    let (_slot, device) = create_device();
    device.type_text("lost");
    assert_eq!(device.take_text(), "");

    device.set_text_input_mode(true);
    device.type_text("abc");
    device.type_text("de");
    assert_eq!(device.take_text(), "abcde");
    assert_eq!(device.take_text(), "");
}

#[test]
fn test_clipboard_round_trip() {
    let (_slot, device) = create_device();
    device.set_clipboard_text("copied").unwrap();
    assert_eq!(device.clipboard_text().unwrap(), "copied");
}

#[test]
fn test_display_names_default_to_platform_names() {
    let (_slot, device) = create_device();
    assert_eq!(device.button_display_name(ControllerButton::DPAD_UP), "dpup");
    assert_eq!(device.axis_display_name(ControllerAxis::TRIGGERLEFT), "lefttrigger");
    assert_eq!(device.button_display_name(ControllerButton::INVALID), "");
}
