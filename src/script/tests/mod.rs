//! Script layer tests
//!
//! Contains test suites for:
//! - The headless input device
//! - The `Input` module as seen from Rhai

#[cfg(test)]
mod device_tests;
#[cfg(test)]
mod surface_tests;
