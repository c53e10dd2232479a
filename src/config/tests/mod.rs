//! Config module tests
//!
//! Contains test suites for the binding store:
//! - Load/save round trips and content preservation
//! - Backup listing, pruning and restore
//! - Transactions and rollback
//! - Table validation reports

#[cfg(test)]
mod transaction_tests;
