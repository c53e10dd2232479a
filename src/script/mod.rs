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

//! src/script/mod.rs
//!
//! Script surface
//!
//! Installs a static `Input` module (with an `Input::Controller`
//! sub-module) into a Rhai engine. Polling functions forward to an
//! `InputDevice`; binding functions go through the `BindingController`.
//!
//! # Example
//!
//! ```ignore
//! let engine = create_engine(context);
//! run_script(&engine, r#"
//!     if Input::trigger(Input::C) {
//!         Input::apply_bindings(Input::C, ["Return", "pad_a"]);
//!     }
//!     Input::bindings(Input::C)
//! "#)?;
//! ```
//!
//! Action arguments are integer codes or, from RGSS3 on, action names.
//! The `Input::DOWN`, `Input::C`, ... constants hold whichever form the
//! configured ruleset uses, so scripts work unchanged under both.

pub mod device;

pub use device::{DeviceError, HeadlessInput, InputDevice, KeyRef, PowerLevel};

use std::fs;
use std::path::Path;
use std::sync::Arc;

use rhai::{Array, Dynamic, Engine, EvalAltResult, ImmutableString, Map, Module, Position, Scope, Variant};
use thiserror::Error;
use tracing::{debug, info};

use crate::core::codec;
use crate::core::names;
use crate::core::types::{ButtonArg, ButtonCode, ControllerAxis, ControllerButton, RgssVersion};
use crate::facade::BindingController;

type ScriptResult<T> = Result<T, Box<EvalAltResult>>;

const AXIS_MAX: f64 = 32767.0;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Failed to read script: {0}")]
    Io(#[from] std::io::Error),

    #[error("Script failed: {0}")]
    Eval(#[from] Box<EvalAltResult>),
}

/// Collaborators the `Input` module forwards to
#[derive(Clone)]
pub struct ScriptContext {
    pub device: Arc<dyn InputDevice>,
    pub controller: Arc<BindingController>,
}

impl ScriptContext {
    pub fn new(device: Arc<dyn InputDevice>, controller: Arc<BindingController>) -> Self {
        Self { device, controller }
    }
}

/// Creates an engine with safety limits and the `Input` module installed
pub fn create_engine(context: ScriptContext) -> Engine {
    let mut engine = Engine::new();

    engine.set_max_expr_depths(64, 64);
    engine.set_max_operations(1_000_000);
    engine.set_max_modules(10);
    engine.set_max_string_size(1_000_000);
    engine.set_max_array_size(10_000);
    engine.set_max_map_size(10_000);

    engine.on_print(|text| info!("script: {}", text));
    engine.on_debug(|text, source, pos| debug!("script {:?} @ {}: {}", source, pos, text));

    register_input_module(&mut engine, context);
    engine
}

/// Evaluates `source` in a fresh scope
pub fn run_script(engine: &Engine, source: &str) -> Result<Dynamic, ScriptError> {
    let mut scope = Scope::new();
    Ok(engine.eval_with_scope::<Dynamic>(&mut scope, source)?)
}

/// Reads and evaluates a script file
pub fn run_file(engine: &Engine, path: &Path) -> Result<Dynamic, ScriptError> {
    let source = fs::read_to_string(path)?;
    debug!("Running script {}", path.display());
    run_script(engine, &source)
}

/// Installs `Input` and `Input::Controller` as static modules
pub fn register_input_module(engine: &mut Engine, context: ScriptContext) {
    let mut module = Module::new();

    register_action_functions(&mut module, &context);
    register_raw_key_functions(&mut module, &context);
    register_pointer_functions(&mut module, &context);
    register_text_functions(&mut module, &context);
    register_binding_functions(&mut module, &context);
    register_action_constants(&mut module, context.controller.settings().rgss_version);

    let mut controller = Module::new();
    register_controller_functions(&mut controller, &context);
    module.set_sub_module("Controller", controller);

    engine.register_static_module("Input", module.into());
}

fn runtime_error(message: impl Into<String>) -> Box<EvalAltResult> {
    let message: String = message.into();
    EvalAltResult::ErrorRuntime(message.into(), Position::NONE).into()
}

/// Integer code, action name, or anything else (which names no action)
fn button_arg(value: &Dynamic) -> ButtonArg {
    if let Ok(code) = value.as_int() {
        return ButtonArg::Code(code);
    }
    match value.clone().try_cast::<ImmutableString>() {
        Some(name) => ButtonArg::Name(name.to_string()),
        None => ButtonArg::Code(0),
    }
}

/// Scancode identifier (strict) or virtual key code
fn key_ref(value: &Dynamic) -> ScriptResult<KeyRef> {
    if let Ok(code) = value.as_int() {
        return i32::try_from(code)
            .map(KeyRef::VirtualKey)
            .map_err(|_| runtime_error(format!("{} is out of range for a key code", code)));
    }
    match value.clone().try_cast::<ImmutableString>() {
        Some(name) => names::lookup_scancode(&name)
            .map(KeyRef::Scancode)
            .map_err(|e| runtime_error(e.to_string())),
        None => Err(runtime_error(format!(
            "Expected a key name or code, got {}",
            value.type_name()
        ))),
    }
}

/// Controller button identifier (strict) or button index
fn controller_button_arg(value: &Dynamic) -> ScriptResult<ControllerButton> {
    if let Ok(code) = value.as_int() {
        return Ok(i32::try_from(code)
            .map(ControllerButton)
            .unwrap_or(ControllerButton::INVALID));
    }
    match value.clone().try_cast::<ImmutableString>() {
        Some(name) => names::lookup_controller_button(&name).map_err(|e| runtime_error(e.to_string())),
        None => Err(runtime_error(format!(
            "Expected a controller button name or code, got {}",
            value.type_name()
        ))),
    }
}

fn normalise_axis(raw: i16) -> f64 {
    (f64::from(raw) / AXIS_MAX).max(-1.0)
}

fn bool_array(states: Vec<bool>) -> Array {
    states.into_iter().map(Dynamic::from).collect()
}

fn string_array(values: Vec<String>) -> Array {
    values.into_iter().map(Dynamic::from).collect()
}

fn register_action_query<R>(
    module: &mut Module,
    name: &str,
    context: &ScriptContext,
    query: fn(&dyn InputDevice, ButtonCode) -> R,
) where
    R: Variant + Clone,
{
    let device = Arc::clone(&context.device);
    let controller = Arc::clone(&context.controller);
    module.set_native_fn(name, move |arg: Dynamic| -> ScriptResult<R> {
        let action = controller.resolve_action(&button_arg(&arg));
        Ok(query(device.as_ref(), action))
    });
}

fn register_key_query<R>(
    module: &mut Module,
    name: &str,
    context: &ScriptContext,
    query: fn(&dyn InputDevice, KeyRef) -> R,
) where
    R: Variant + Clone,
{
    let device = Arc::clone(&context.device);
    module.set_native_fn(name, move |arg: Dynamic| -> ScriptResult<R> {
        Ok(query(device.as_ref(), key_ref(&arg)?))
    });
}

fn register_button_query<R>(
    module: &mut Module,
    name: &str,
    context: &ScriptContext,
    query: fn(&dyn InputDevice, ControllerButton) -> R,
) where
    R: Variant + Clone,
{
    let device = Arc::clone(&context.device);
    module.set_native_fn(name, move |arg: Dynamic| -> ScriptResult<R> {
        Ok(query(device.as_ref(), controller_button_arg(&arg)?))
    });
}

/// Frame update and per-action state
fn register_action_functions(module: &mut Module, context: &ScriptContext) {
    let device = Arc::clone(&context.device);
    module.set_native_fn("update", move || -> ScriptResult<()> {
        device.update();
        Ok(())
    });

    let device = Arc::clone(&context.device);
    module.set_native_fn("delta", move || -> ScriptResult<f64> { Ok(device.delta()) });

    register_action_query(module, "press", context, |d, a| d.is_pressed(a));
    register_action_query(module, "trigger", context, |d, a| d.is_triggered(a));
    register_action_query(module, "repeat", context, |d, a| d.is_repeated(a));
    register_action_query(module, "release", context, |d, a| d.is_released(a));
    register_action_query(module, "count", context, |d, a| i64::from(d.count(a)));
    register_action_query(module, "time", context, |d, a| d.repeat_time(a));

    let device = Arc::clone(&context.device);
    module.set_native_fn("dir4", move || -> ScriptResult<i64> { Ok(i64::from(device.dir4())) });

    let device = Arc::clone(&context.device);
    module.set_native_fn("dir8", move || -> ScriptResult<i64> { Ok(i64::from(device.dir8())) });
}

/// Queries addressing a physical key directly
fn register_raw_key_functions(module: &mut Module, context: &ScriptContext) {
    register_key_query(module, "pressex", context, |d, k| d.is_pressed_ex(k));
    register_key_query(module, "triggerex", context, |d, k| d.is_triggered_ex(k));
    register_key_query(module, "repeatex", context, |d, k| d.is_repeated_ex(k));
    register_key_query(module, "releaseex", context, |d, k| d.is_released_ex(k));
    register_key_query(module, "repeatcount", context, |d, k| i64::from(d.repeat_count_ex(k)));
    register_key_query(module, "timeex", context, |d, k| d.repeat_time_ex(k));

    let device = Arc::clone(&context.device);
    module.set_native_fn("raw_key_states", move || -> ScriptResult<Array> {
        Ok(bool_array(device.raw_key_states()))
    });
}

fn register_pointer_functions(module: &mut Module, context: &ScriptContext) {
    let device = Arc::clone(&context.device);
    module.set_native_fn("mouse_x", move || -> ScriptResult<i64> { Ok(i64::from(device.mouse_x())) });

    let device = Arc::clone(&context.device);
    module.set_native_fn("mouse_y", move || -> ScriptResult<i64> { Ok(i64::from(device.mouse_y())) });

    let device = Arc::clone(&context.device);
    module.set_native_fn("scroll_v", move || -> ScriptResult<i64> { Ok(i64::from(device.scroll_v())) });

    let device = Arc::clone(&context.device);
    module.set_native_fn("mouse_in_window", move || -> ScriptResult<bool> {
        Ok(device.mouse_in_window())
    });
}

/// Text input, clipboard and last-input tracking
fn register_text_functions(module: &mut Module, context: &ScriptContext) {
    let device = Arc::clone(&context.device);
    module.set_native_fn("text_input", move || -> ScriptResult<bool> { Ok(device.text_input_mode()) });

    let device = Arc::clone(&context.device);
    module.set_native_fn("set_text_input", move |enabled: bool| -> ScriptResult<bool> {
        device.set_text_input_mode(enabled);
        Ok(enabled)
    });

    let device = Arc::clone(&context.device);
    module.set_native_fn("gets", move || -> ScriptResult<String> { Ok(device.take_text()) });

    let device = Arc::clone(&context.device);
    module.set_native_fn("clipboard", move || -> ScriptResult<String> {
        device.clipboard_text().map_err(|e| runtime_error(e.to_string()))
    });

    let device = Arc::clone(&context.device);
    module.set_native_fn("set_clipboard", move |text: ImmutableString| -> ScriptResult<ImmutableString> {
        device
            .set_clipboard_text(&text)
            .map_err(|e| runtime_error(e.to_string()))?;
        Ok(text)
    });

    let device = Arc::clone(&context.device);
    module.set_native_fn("last_device", move || -> ScriptResult<String> { Ok(device.last_device()) });

    let device = Arc::clone(&context.device);
    module.set_native_fn("last", move || -> ScriptResult<Dynamic> {
        Ok(codec::encode(&device.last_input())
            .map(Dynamic::from)
            .unwrap_or(Dynamic::UNIT))
    });

    let device = Arc::clone(&context.device);
    module.set_native_fn("clear_last", move || -> ScriptResult<()> {
        device.clear_last_input();
        Ok(())
    });
}

fn register_binding_functions(module: &mut Module, context: &ScriptContext) {
    // bindings(action) -> [token | ()]
    let controller = Arc::clone(&context.controller);
    module.set_native_fn("bindings", move |arg: Dynamic| -> ScriptResult<Array> {
        Ok(controller
            .bindings(&button_arg(&arg))
            .into_iter()
            .map(|token| token.map(Dynamic::from).unwrap_or(Dynamic::UNIT))
            .collect())
    });

    // apply_bindings(action, [token])
    let controller = Arc::clone(&context.controller);
    module.set_native_fn("apply_bindings", move |arg: Dynamic, tokens: Array| -> ScriptResult<()> {
        let tokens = tokens
            .into_iter()
            .map(|token| {
                let type_name = token.type_name();
                token
                    .try_cast::<ImmutableString>()
                    .map(|token| token.to_string())
                    .ok_or_else(|| runtime_error(format!("Binding tokens must be strings, got {}", type_name)))
            })
            .collect::<ScriptResult<Vec<String>>>()?;

        controller
            .apply_bindings(&button_arg(&arg), tokens)
            .map_err(|e| runtime_error(e.to_string()))
    });

    let controller = Arc::clone(&context.controller);
    module.set_native_fn("save_bindings", move || -> ScriptResult<()> {
        controller.save_bindings().map_err(|e| runtime_error(e.to_string()))
    });

    let controller = Arc::clone(&context.controller);
    module.set_native_fn("reset_bindings", move || -> ScriptResult<()> {
        controller.reset_bindings();
        Ok(())
    });

    // key_mapping(action) -> #{ KBM: [...], GAMEPAD: [...] }
    let controller = Arc::clone(&context.controller);
    let device = Arc::clone(&context.device);
    module.set_native_fn("key_mapping", move |arg: Dynamic| -> ScriptResult<Map> {
        let mapping = controller.key_mapping_with(
            &button_arg(&arg),
            |button| device.button_display_name(button),
            |axis| device.axis_display_name(axis),
        );

        let mut map = Map::new();
        map.insert("KBM".into(), Dynamic::from_array(string_array(mapping.kbm)));
        map.insert("GAMEPAD".into(), Dynamic::from_array(string_array(mapping.gamepad)));
        Ok(map)
    });
}

/// `Input::DOWN`, `Input::C`, ...: names under RGSS3, integer codes before
fn register_action_constants(module: &mut Module, version: RgssVersion) {
    for (name, button) in ButtonCode::named() {
        if version.has_symbolic_buttons() {
            module.set_var(name, name.to_string());
        } else {
            module.set_var(name, i64::from(button.code()));
        }
    }
}

fn register_controller_functions(module: &mut Module, context: &ScriptContext) {
    let device = Arc::clone(&context.device);
    module.set_native_fn("connected", move || -> ScriptResult<bool> {
        Ok(device.controller_connected())
    });

    let device = Arc::clone(&context.device);
    module.set_native_fn("name", move || -> ScriptResult<String> { Ok(device.controller_name()) });

    let device = Arc::clone(&context.device);
    module.set_native_fn("power_level", move || -> ScriptResult<String> {
        let level = if device.controller_connected() {
            device.controller_power_level()
        } else {
            PowerLevel::Unknown
        };
        Ok(level.name().to_string())
    });

    register_axis_pair(module, "axes_left", context, ControllerAxis::LEFTX, ControllerAxis::LEFTY);
    register_axis_pair(module, "axes_right", context, ControllerAxis::RIGHTX, ControllerAxis::RIGHTY);
    register_axis_pair(
        module,
        "axes_trigger",
        context,
        ControllerAxis::TRIGGERLEFT,
        ControllerAxis::TRIGGERRIGHT,
    );

    let device = Arc::clone(&context.device);
    module.set_native_fn("raw_button_states", move || -> ScriptResult<Array> {
        Ok(bool_array(device.raw_button_states()))
    });

    let device = Arc::clone(&context.device);
    module.set_native_fn("raw_axes", move || -> ScriptResult<Array> {
        Ok(device
            .raw_axes()
            .into_iter()
            .map(|raw| Dynamic::from(normalise_axis(raw)))
            .collect())
    });

    register_button_query(module, "pressex", context, |d, b| d.controller_is_pressed_ex(b));
    register_button_query(module, "triggerex", context, |d, b| d.controller_is_triggered_ex(b));
    register_button_query(module, "repeatex", context, |d, b| d.controller_is_repeated_ex(b));
    register_button_query(module, "releaseex", context, |d, b| d.controller_is_released_ex(b));
    register_button_query(module, "repeatcount", context, |d, b| {
        i64::from(d.controller_repeat_count(b))
    });
    register_button_query(module, "timeex", context, |d, b| d.controller_repeat_time_ex(b));
}

/// `[x, y]` in `[-1.0, 1.0]`; `[0.0, 0.0]` while disconnected
fn register_axis_pair(
    module: &mut Module,
    name: &str,
    context: &ScriptContext,
    x: ControllerAxis,
    y: ControllerAxis,
) {
    let device = Arc::clone(&context.device);
    module.set_native_fn(name, move || -> ScriptResult<Array> {
        if !device.controller_connected() {
            return Ok(vec![Dynamic::from(0.0_f64), Dynamic::from(0.0_f64)]);
        }
        Ok(vec![
            Dynamic::from(normalise_axis(device.controller_axis(x))),
            Dynamic::from(normalise_axis(device.controller_axis(y))),
        ])
    });
}

#[cfg(test)]
mod tests;
