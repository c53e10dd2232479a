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

//! Transaction tests

use std::fs;

use tempfile::TempDir;

use crate::config::{BindingStore, ConfigError, StoreTransaction};

fn create_test_store(content: Option<&str>) -> (TempDir, BindingStore) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("bindings.conf");
    if let Some(content) = content {
        fs::write(&path, content).unwrap();
    }
    let store = BindingStore::new(path).unwrap();
    (temp_dir, store)
}

#[test]
fn test_begin_creates_backup() {
    let (_temp_dir, store) = create_test_store(Some("bind = C, Return\n"));

    let tx = StoreTransaction::begin(&store).unwrap();

    let backup = tx.backup_path().unwrap();
    assert!(backup.exists());
    assert_eq!(fs::read_to_string(backup).unwrap(), "bind = C, Return\n");
}

#[test]
fn test_begin_without_file_has_no_backup() {
    let (_temp_dir, store) = create_test_store(None);

    let tx = StoreTransaction::begin(&store).unwrap();
    assert!(tx.backup_path().is_none());
}

#[test]
fn test_commit_writes_content() {
    let (_temp_dir, store) = create_test_store(Some("bind = C, Return\n"));

    store.begin_transaction().unwrap().commit("bind = B, Escape\n").unwrap();

    assert_eq!(store.read_bindings_file().unwrap(), "bind = B, Escape\n");
}

#[test]
fn test_rollback_restores_original() {
    let (_temp_dir, store) = create_test_store(Some("bind = C, Return\n"));

    let tx = store.begin_transaction().unwrap();
    fs::write(store.path(), "bind = B, Escape\n").unwrap();

    tx.rollback().unwrap();
    assert_eq!(store.read_bindings_file().unwrap(), "bind = C, Return\n");

    // Rollback can be repeated
    tx.rollback().unwrap();
    assert_eq!(store.read_bindings_file().unwrap(), "bind = C, Return\n");
}

#[test]
fn test_rollback_of_new_file_removes_it() {
    let (_temp_dir, store) = create_test_store(None);

    let tx = store.begin_transaction().unwrap();
    fs::write(store.path(), "bind = B, Escape\n").unwrap();

    tx.rollback().unwrap();
    assert!(!store.exists());
}

#[test]
fn test_commit_with_validation_accepts_warnings() {
    let (_temp_dir, store) = create_test_store(None);

    // Unknown key is a warning, not an error
    let content = "bind = C, NoSuchKey\nbind = C, Return\n";
    store
        .begin_transaction()
        .unwrap()
        .commit_with_validation(content)
        .unwrap();

    assert_eq!(store.read_bindings_file().unwrap(), content);
}

#[test]
fn test_commit_with_validation_rejects_malformed_content() {
    let (_temp_dir, store) = create_test_store(Some("bind = C, Return\n"));

    let result = store
        .begin_transaction()
        .unwrap()
        .commit_with_validation("bind = C Return\n");

    assert!(matches!(result, Err(ConfigError::Parse(_))));
    assert_eq!(store.read_bindings_file().unwrap(), "bind = C, Return\n");
}
