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

//! Parser module tests
//!
//! Tests for parsing bindings files:
//! - Action references (names and integer codes)
//! - Token extraction, including tokens with commas
//! - Skipping of comments, unrelated lines and unknown actions
//! - Line numbers in syntax errors

use crate::core::{
    codec::decode,
    parser::*,
    types::ButtonCode,
};

#[test]
fn test_parse_action() {
    assert_eq!(parse_action("C, Return").unwrap().1, ActionRef::Name("C"));
    assert_eq!(parse_action("13, Return").unwrap().1, ActionRef::Code(13));
    assert_eq!(parse_action("MOUSELEFT,x").unwrap().1, ActionRef::Name("MOUSELEFT"));
    assert!(parse_action(", Return").is_err());
}

#[test]
fn test_action_ref_resolve() {
    assert_eq!(ActionRef::Name("shift").resolve(), Some(ButtonCode::Shift));
    assert_eq!(ActionRef::Code(8).resolve(), Some(ButtonCode::Up));
    assert_eq!(ActionRef::Code(0).resolve(), None);
    assert_eq!(ActionRef::Name("JUMP").resolve(), None);
}

#[test]
fn test_parse_bind_line() {
    let (_, line) = parse_bind_line("bind = LEFT, axis_leftx-").unwrap();
    assert_eq!(line.action, ActionRef::Name("LEFT"));
    assert_eq!(line.token, "axis_leftx-");

    let (_, line) = parse_bind_line("bind=C,Return").unwrap();
    assert_eq!(line.token, "Return");
}

#[test]
fn test_token_may_contain_commas_and_spaces() {
    let (_, line) = parse_bind_line("bind = B, Keypad ,").unwrap();
    assert_eq!(line.token, "Keypad ,");

    let (_, line) = parse_bind_line("bind = SHIFT, Left Shift   ").unwrap();
    assert_eq!(line.token, "Left Shift");
}

#[test]
fn test_empty_token() {
    let (_, line) = parse_bind_line("bind = C,").unwrap();
    assert_eq!(line.token, "");
}

#[test]
fn test_is_bind_line() {
    assert!(is_bind_line("bind = C, Return"));
    assert!(is_bind_line("  bind\t= C, Return"));
    assert!(!is_bind_line("# bind = C, Return"));
    assert!(!is_bind_line("binding_style = compact"));
    assert!(!is_bind_line(""));
}

#[test]
fn test_parse_full_file() {
    let content = r#"
# Confirm
bind = C, Return
bind = C, pad_a

# Movement
bind = LEFT, axis_leftx-
bind = 13, Space
volume = 80
"#;

    let table = parse_bindings_file(content).unwrap();

    assert_eq!(table.len(), 4);
    assert_eq!(
        table.lookup(ButtonCode::C),
        vec![decode("Return"), decode("pad_a"), decode("Space")]
    );
    assert_eq!(table.lookup(ButtonCode::Left), vec![decode("axis_leftx-")]);
}

#[test]
fn test_unknown_actions_are_skipped() {
    let content = "bind = JUMP, Space\nbind = 99, Return\nbind = 0, X\nbind = B, Escape\n";

    let table = parse_bindings_file(content).unwrap();

    assert_eq!(table.len(), 1);
    assert_eq!(table.lookup(ButtonCode::B), vec![decode("Escape")]);
}

#[test]
fn test_syntax_error_reports_line() {
    let content = "# header\nbind = C, Return\nbind = , Space\n";

    match parse_bindings_file(content) {
        Err(ParseError::InvalidSyntax { line, .. }) => assert_eq!(line, 3),
        other => panic!("Expected InvalidSyntax, got {:?}", other),
    }
}

#[test]
fn test_missing_comma_is_an_error() {
    assert!(parse_bindings_file("bind = C Return\n").is_err());
}
