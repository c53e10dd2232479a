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

//! src/core/parser.rs
//!
//! Bindings file parser
//!
//! A bindings file is line oriented:
//! ```text
//! # Confirm
//! bind = C, Return
//! bind = C, pad_a
//! bind = LEFT, axis_leftx-
//! bind = 13, Space
//! ```
//! - `#` comments and blank lines are skipped
//! - lines that do not start with the `bind` keyword are left alone
//! - the action is an action name (any case) or an integer action code
//! - the token is the rest of the line, so it may contain commas (`Keypad ,`)
//!
//! # Architecture
//! Each bind line is split with nom combinators into an action reference and
//! a raw token; the token then goes through the codec. Bindings whose action
//! does not resolve are skipped with a warning instead of failing the file.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{char, digit1, space0, space1},
    combinator::{map, map_res, peek, rest},
    sequence::preceded,
    IResult, Parser,
};
use thiserror::Error;
use tracing::warn;

use crate::core::codec;
use crate::core::table::BindingTable;
use crate::core::types::{BindingDesc, ButtonCode};

/// Parse errors with line number context
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Parse error on line {line}: {message}")]
    InvalidSyntax { line: usize, message: String },

    #[error("IO error reading bindings: {0}")]
    IoError(#[from] std::io::Error),
}

/// How a bind line names its action
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ActionRef<'a> {
    Code(i64),
    Name(&'a str),
}

impl ActionRef<'_> {
    /// The action this reference names, if any
    ///
    /// Code 0 is the "no action" code and counts as unresolved.
    pub fn resolve(&self) -> Option<ButtonCode> {
        let action = match self {
            ActionRef::Code(code) => ButtonCode::from_code(*code)?,
            ActionRef::Name(name) => ButtonCode::from_name(name)?,
        };
        (action != ButtonCode::None).then_some(action)
    }
}

/// A bind line split into its parts
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BindLine<'a> {
    pub action: ActionRef<'a>,
    pub token: &'a str,
}

/// Parse a complete bindings file into a table
///
/// # Example
/// ```ignore
/// let content = std::fs::read_to_string("bindings.conf")?;
/// let table = parse_bindings_file(&content)?;
/// ```
pub fn parse_bindings_file(content: &str) -> Result<BindingTable, ParseError> {
    let mut table = BindingTable::new();

    for (line_num, line) in content.lines().enumerate() {
        let line_num = line_num + 1;
        let line_trimmed = line.trim();

        if !is_bind_line(line_trimmed) {
            continue;
        }

        let (_, bind) = parse_bind_line(line_trimmed).map_err(|e| ParseError::InvalidSyntax {
            line: line_num,
            message: format!("{:?}", e),
        })?;

        match bind.action.resolve() {
            Some(action) => table.push(BindingDesc::new(action, codec::decode(bind.token))),
            None => warn!(
                "Skipping binding on line {}: unknown action {:?}",
                line_num, bind.action
            ),
        }
    }

    Ok(table)
}

/// True for lines the parser is responsible for
///
/// A bind line is the `bind` keyword followed by whitespace or `=`. Lines
/// such as `binding_style = x` are not bind lines.
pub fn is_bind_line(line: &str) -> bool {
    let line = line.trim_start();
    if line.starts_with('#') {
        return false;
    }
    bind_keyword(line).is_ok()
}

fn bind_keyword(input: &str) -> IResult<&str, &str> {
    let (input, keyword) = tag("bind").parse(input)?;
    let (input, _) = peek(alt((space1, tag("=")))).parse(input)?;
    Ok((input, keyword))
}

/// Parse a single bind line
///
/// Format: `bind = ACTION, TOKEN`
pub fn parse_bind_line(input: &str) -> IResult<&str, BindLine<'_>> {
    let (input, _) = bind_keyword(input)?;
    let (input, _) = (space0, char('='), space0).parse(input)?;
    let (input, action) = parse_action(input)?;
    let (input, token) = preceded((space0, char(','), space0), rest).parse(input)?;

    Ok((
        input,
        BindLine {
            action,
            token: token.trim_end(),
        },
    ))
}

/// Parse the action reference: an integer code or an action name
pub fn parse_action(input: &str) -> IResult<&str, ActionRef<'_>> {
    alt((
        map_res(digit1, |digits: &str| digits.parse::<i64>().map(ActionRef::Code)),
        map(
            take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_'),
            ActionRef::Name,
        ),
    ))
    .parse(input)
}
