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

//! Validator module tests

use crate::core::{
    codec::decode,
    types::{BindingDesc, ButtonCode, SourceDesc},
    validator::*,
};

#[test]
fn test_valid_bindings() {
    for token in ["Return", "pad_leftshoulder", "axis_righttrigger+", "Keypad ,"] {
        let binding = BindingDesc::new(ButtonCode::C, decode(token));
        assert!(validate_binding(&binding).is_ok(), "{}", token);
    }
}

#[test]
fn test_no_target() {
    let binding = BindingDesc::new(ButtonCode::None, decode("Return"));
    assert_eq!(validate_binding(&binding), Err(ValidationError::NoTarget));
}

#[test]
fn test_no_source() {
    let binding = BindingDesc::new(ButtonCode::B, SourceDesc::None);
    assert_eq!(validate_binding(&binding), Err(ValidationError::NoSource(ButtonCode::B)));
}

#[test]
fn test_unknown_sources() {
    let key = BindingDesc::new(ButtonCode::B, decode("Nope"));
    assert_eq!(validate_binding(&key), Err(ValidationError::UnknownKey(0, ButtonCode::B)));

    let button = BindingDesc::new(ButtonCode::B, decode("pad_nope"));
    assert_eq!(validate_binding(&button), Err(ValidationError::UnknownButton(ButtonCode::B)));

    let axis = BindingDesc::new(ButtonCode::B, decode("axis_nope-"));
    assert_eq!(validate_binding(&axis), Err(ValidationError::UnknownAxis(ButtonCode::B)));
}

#[test]
fn test_error_messages_name_the_action() {
    let err = validate_source(ButtonCode::Left, &decode("pad_"));
    assert!(err.unwrap_err().to_string().contains("LEFT"));
}
