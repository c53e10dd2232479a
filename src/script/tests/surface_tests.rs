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

//! Rhai `Input` module tests

use std::fs;
use std::sync::Arc;

use rhai::{Array, Engine, Map};
use tempfile::TempDir;

use crate::config::{BindingStore, Settings};
use crate::core::{
    defaults::default_table,
    types::{ControllerAxis, ControllerButton, RgssVersion, Scancode, SourceDesc},
};
use crate::facade::BindingController;
use crate::script::{create_engine, run_file, HeadlessInput, InputDevice, ScriptContext};

struct Harness {
    temp_dir: TempDir,
    device: Arc<HeadlessInput>,
    controller: Arc<BindingController>,
    engine: Engine,
}

/// Helper: engine wired to a headless device and an empty store.
fn create_harness(version: RgssVersion) -> Harness {
    let temp_dir = TempDir::new().unwrap();
    let store = BindingStore::new(temp_dir.path().join("bindings.conf")).unwrap();
    let settings = Settings {
        rgss_version: version,
        ..Settings::default()
    };
    let controller = Arc::new(BindingController::open(settings, store).unwrap());
    let device = Arc::new(HeadlessInput::new(controller.shared()));

    let dyn_device: Arc<dyn InputDevice> = device.clone();
    let engine = create_engine(ScriptContext::new(dyn_device, Arc::clone(&controller)));

    Harness {
        temp_dir,
        device,
        controller,
        engine,
    }
}

fn strings(array: Array) -> Vec<String> {
    array
        .into_iter()
        .map(|value| value.into_string().unwrap())
        .collect()
}

fn floats(array: Array) -> Vec<f64> {
    array
        .into_iter()
        .map(|value| value.as_float().unwrap())
        .collect()
}

// ============================================================================
// Constants and action arguments
// ============================================================================

#[test]
fn test_constants_are_names_under_rgss3() {
    let harness = create_harness(RgssVersion::Rgss3);
    assert_eq!(harness.engine.eval::<String>("Input::C").unwrap(), "C");
    assert_eq!(
        harness.engine.eval::<String>("Input::MOUSELEFT").unwrap(),
        "MOUSELEFT"
    );
}

#[test]
fn test_constants_are_codes_before_rgss3() {
    let harness = create_harness(RgssVersion::Rgss1);
    assert_eq!(harness.engine.eval::<i64>("Input::C").unwrap(), 13);
    assert_eq!(harness.engine.eval::<i64>("Input::PAUSE").unwrap(), 30);
}

#[test]
fn test_press_by_name_and_code() {
    let harness = create_harness(RgssVersion::Rgss3);
    harness.device.hold(SourceDesc::Key(Scancode(40)));
    harness.device.update();

    let engine = &harness.engine;
    assert!(engine.eval::<bool>("Input::press(Input::C)").unwrap());
    assert!(engine.eval::<bool>("Input::press(13)").unwrap());
    assert!(engine.eval::<bool>(r#"Input::press("c")"#).unwrap());
    assert!(engine.eval::<bool>("Input::trigger(Input::C)").unwrap());
    assert!(!engine.eval::<bool>("Input::press(Input::B)").unwrap());
    assert_eq!(engine.eval::<i64>("Input::count(Input::C)").unwrap(), 1);
}

#[test]
fn test_names_do_not_resolve_before_rgss3() {
    let harness = create_harness(RgssVersion::Rgss1);
    harness.device.hold(SourceDesc::Key(Scancode(40)));
    harness.device.update();

    assert!(harness.engine.eval::<bool>("Input::press(Input::C)").unwrap());
    assert!(!harness.engine.eval::<bool>(r#"Input::press("C")"#).unwrap());
}

#[test]
fn test_other_argument_types_name_no_action() {
    let harness = create_harness(RgssVersion::Rgss3);
    harness.device.hold(SourceDesc::Key(Scancode(40)));
    harness.device.update();

    assert!(!harness.engine.eval::<bool>("Input::press(1.5)").unwrap());
    assert!(!harness.engine.eval::<bool>("Input::press(true)").unwrap());
    assert!(!harness.engine.eval::<bool>("Input::press(999)").unwrap());
}

// ============================================================================
// Raw keys and controller buttons
// ============================================================================

#[test]
fn test_pressex_uses_scancode_identifiers() {
    let harness = create_harness(RgssVersion::Rgss3);
    harness.device.hold(SourceDesc::Key(Scancode(40)));
    harness.device.update();

    assert!(harness.engine.eval::<bool>(r#"Input::pressex("RETURN")"#).unwrap());
    assert!(!harness.engine.eval::<bool>(r#"Input::pressex("SPACE")"#).unwrap());
    assert_eq!(
        harness.engine.eval::<i64>(r#"Input::repeatcount("RETURN")"#).unwrap(),
        1
    );
}

#[test]
fn test_pressex_rejects_unknown_names() {
    let harness = create_harness(RgssVersion::Rgss3);
    let error = harness
        .engine
        .eval::<bool>(r#"Input::pressex("NOTAKEY")"#)
        .unwrap_err();
    assert!(
        error
            .to_string()
            .contains("NOTAKEY is not a valid name of an SDL scancode."),
        "unexpected error: {}",
        error
    );
}

#[test]
fn test_controller_pressex_rejects_unknown_names() {
    let harness = create_harness(RgssVersion::Rgss3);
    let error = harness
        .engine
        .eval::<bool>(r#"Input::Controller::pressex("TURBO")"#)
        .unwrap_err();
    assert!(error
        .to_string()
        .contains("TURBO is not a valid name of an SDL Controller button."));
}

#[test]
fn test_controller_repeatcount_is_an_integer() {
    let harness = create_harness(RgssVersion::Rgss3);
    harness.device.connect_controller("Test Pad");
    harness
        .device
        .hold(SourceDesc::ControllerButton(ControllerButton::A));
    harness.device.update();
    harness.device.update();

    assert_eq!(
        harness
            .engine
            .eval::<i64>(r#"Input::Controller::repeatcount("A")"#)
            .unwrap(),
        2
    );
    assert!(harness
        .engine
        .eval::<bool>("Input::Controller::pressex(0)")
        .unwrap());
}

// ============================================================================
// Controller state
// ============================================================================

#[test]
fn test_disconnected_controller() {
    let harness = create_harness(RgssVersion::Rgss3);
    let engine = &harness.engine;

    assert!(!engine.eval::<bool>("Input::Controller::connected()").unwrap());
    assert_eq!(engine.eval::<String>("Input::Controller::name()").unwrap(), "");
    assert_eq!(
        engine.eval::<String>("Input::Controller::power_level()").unwrap(),
        "UNKNOWN"
    );
    assert_eq!(
        floats(engine.eval::<Array>("Input::Controller::axes_left()").unwrap()),
        vec![0.0, 0.0]
    );
}

#[test]
fn test_axes_are_normalised() {
    let harness = create_harness(RgssVersion::Rgss3);
    harness.device.connect_controller("Test Pad");
    harness.device.set_axis(ControllerAxis::LEFTX, 32767);
    harness.device.set_axis(ControllerAxis::LEFTY, -32768);
    harness.device.set_axis(ControllerAxis::TRIGGERRIGHT, 0);

    let engine = &harness.engine;
    assert_eq!(
        floats(engine.eval::<Array>("Input::Controller::axes_left()").unwrap()),
        vec![1.0, -1.0]
    );
    assert_eq!(
        floats(engine.eval::<Array>("Input::Controller::axes_trigger()").unwrap()),
        vec![0.0, 0.0]
    );
    assert_eq!(
        engine.eval::<String>("Input::Controller::power_level()").unwrap(),
        "WIRED"
    );
    assert_eq!(
        engine
            .eval::<Array>("Input::Controller::raw_axes()")
            .unwrap()
            .len(),
        6
    );
}

// ============================================================================
// Binding management
// ============================================================================

#[test]
fn test_apply_then_query_bindings() {
    let harness = create_harness(RgssVersion::Rgss3);
    let tokens = harness
        .engine
        .eval::<Array>(
            r#"
            Input::apply_bindings(Input::C, ["Return", "pad_a", "axis_leftx-"]);
            Input::bindings(Input::C)
            "#,
        )
        .unwrap();

    assert_eq!(strings(tokens), vec!["Return", "pad_a", "axis_leftx-"]);
}

#[test]
fn test_apply_bindings_reaches_the_device() {
    let harness = create_harness(RgssVersion::Rgss3);
    harness
        .engine
        .run(r#"Input::apply_bindings(Input::C, ["F"]);"#)
        .unwrap();

    harness.device.hold(SourceDesc::Key(Scancode(9)));
    harness.device.update();
    assert!(harness.engine.eval::<bool>("Input::press(Input::C)").unwrap());
}

#[test]
fn test_apply_bindings_rejects_non_string_tokens() {
    let harness = create_harness(RgssVersion::Rgss3);
    let error = harness
        .engine
        .run(r#"Input::apply_bindings(Input::C, ["Return", 42]);"#)
        .unwrap_err();
    assert!(error.to_string().contains("Binding tokens must be strings"));

    // Nothing was applied
    assert_eq!(
        harness.controller.table(),
        default_table(RgssVersion::Rgss3)
    );
}

#[test]
fn test_apply_bindings_to_unknown_action_fails() {
    let harness = create_harness(RgssVersion::Rgss3);
    let error = harness
        .engine
        .run(r#"Input::apply_bindings("JUMP", ["Space"]);"#)
        .unwrap_err();
    assert!(error.to_string().contains("does not name an input action"));
}

#[test]
fn test_bindings_of_unknown_action_is_empty() {
    let harness = create_harness(RgssVersion::Rgss3);
    assert!(harness
        .engine
        .eval::<Array>(r#"Input::bindings("JUMP")"#)
        .unwrap()
        .is_empty());
}

#[test]
fn test_key_mapping() {
    let harness = create_harness(RgssVersion::Rgss3);
    let mapping = harness
        .engine
        .eval::<Map>(
            r#"
            Input::apply_bindings(Input::UP, ["Up", "pad_dpup", "axis_lefty-", "pad_turbo"]);
            Input::key_mapping(Input::UP)
            "#,
        )
        .unwrap();

    let kbm = mapping.get("KBM").unwrap().clone().into_array().unwrap();
    let gamepad = mapping.get("GAMEPAD").unwrap().clone().into_array().unwrap();
    assert_eq!(strings(kbm), vec!["Up"]);
    assert_eq!(strings(gamepad), vec!["dpup", "lefty-"]);
}

#[test]
fn test_reset_and_save_bindings() {
    let harness = create_harness(RgssVersion::Rgss3);
    harness
        .engine
        .run(
            r#"
            Input::apply_bindings(Input::C, []);
            Input::save_bindings();
            Input::reset_bindings();
            "#,
        )
        .unwrap();

    assert_eq!(
        harness.controller.table(),
        default_table(RgssVersion::Rgss3)
    );

    let saved = fs::read_to_string(harness.temp_dir.path().join("bindings.conf")).unwrap();
    assert!(saved.contains("bind = B, Escape"));
    assert!(!saved.contains("bind = C,"));
}

// ============================================================================
// Text, clipboard and last input
// ============================================================================

#[test]
fn test_clipboard() {
    let harness = create_harness(RgssVersion::Rgss3);
    let text = harness
        .engine
        .eval::<String>(r#"Input::set_clipboard("hello"); Input::clipboard()"#)
        .unwrap();
    assert_eq!(text, "hello");
}

#[test]
fn test_text_input() {
    let harness = create_harness(RgssVersion::Rgss3);
    harness.engine.run("Input::set_text_input(true);").unwrap();
    harness.device.type_text("typed");

    assert!(harness.engine.eval::<bool>("Input::text_input()").unwrap());
    assert_eq!(harness.engine.eval::<String>("Input::gets()").unwrap(), "typed");
    assert_eq!(harness.engine.eval::<String>("Input::gets()").unwrap(), "");
}

#[test]
fn test_last_input() {
    let harness = create_harness(RgssVersion::Rgss3);
    harness
        .device
        .hold(SourceDesc::ControllerButton(ControllerButton::B));
    harness.device.update();

    assert_eq!(harness.engine.eval::<String>("Input::last()").unwrap(), "pad_b");
    assert_eq!(
        harness.engine.eval::<String>("Input::last_device()").unwrap(),
        "controller"
    );

    harness.engine.run("Input::clear_last();").unwrap();
    assert!(harness.engine.eval::<()>("Input::last()").is_ok());
}

#[test]
fn test_run_file() {
    let harness = create_harness(RgssVersion::Rgss3);
    let path = harness.temp_dir.path().join("probe.rhai");
    fs::write(&path, "Input::update();\nInput::dir4()\n").unwrap();

    let result = run_file(&harness.engine, &path).unwrap();
    assert_eq!(result.as_int().unwrap(), 0);
}
