//! Facade tests
//!
//! Contains test suites for the binding controller:
//! - Query and replacement through action arguments
//! - Seeding, saving and resetting
//! - Key mapping display names
