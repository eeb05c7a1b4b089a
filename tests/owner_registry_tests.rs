#![allow(clippy::unwrap_used)]

use account_manager_bot::owner::{FileOwnerRegistry, OwnerRegistry};
use tempfile::tempdir;

#[test]
fn test_save_and_load_roundtrip() {
    let dir = tempdir().unwrap();
    let registry = FileOwnerRegistry::new(dir.path().join("owner.txt"));

    assert_eq!(registry.load(), None);
    registry.save(123456789).unwrap();
    assert_eq!(registry.load(), Some(123456789));
}

#[test]
fn test_save_overwrites_previous_owner() {
    let dir = tempdir().unwrap();
    let registry = FileOwnerRegistry::new(dir.path().join("owner.txt"));

    registry.save(111).unwrap();
    registry.save(-100200300).unwrap(); // group chats are negative
    assert_eq!(registry.load(), Some(-100200300));
}

#[test]
fn test_missing_file_is_not_an_error() {
    let registry = FileOwnerRegistry::new("/nonexistent/dir/owner.txt");
    assert_eq!(registry.load(), None);
}

#[test]
fn test_garbage_content_reads_as_unconfigured() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("owner.txt");
    std::fs::write(&path, "not a chat id").unwrap();

    let registry = FileOwnerRegistry::new(path);
    assert_eq!(registry.load(), None);
}

#[test]
fn test_load_tolerates_surrounding_whitespace() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("owner.txt");
    std::fs::write(&path, "  42\n").unwrap();

    let registry = FileOwnerRegistry::new(path);
    assert_eq!(registry.load(), Some(42));
}
