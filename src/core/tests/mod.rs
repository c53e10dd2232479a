//! Core module tests
//!
//! Contains test suites for core functionality:
//! - Token codec tests (including property tests)
//! - Binding table, default layout and shared slot tests
//! - Bindings file parser tests
//! - Validation and shared-source detection tests

#[cfg(test)]
mod conflict_tests;
#[cfg(test)]
mod parser_tests;
#[cfg(test)]
mod validator_tests;
