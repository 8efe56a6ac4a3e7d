//! Key encoding utilities for `RocksDB`.
//!
//! This module provides functions to encode and decode keys for the primary
//! column families and their indexes. All composite keys are designed to
//! support efficient prefix scans; numeric IDs are encoded big-endian so
//! scan order matches numeric order.

use bookstack_core::{BookId, CategoryId, UserId};

/// Sequence names stored in the `meta` column family.
pub mod seq {
    /// User ID counter.
    pub const USERS: &[u8] = b"seq:users";

    /// Category ID counter.
    pub const CATEGORIES: &[u8] = b"seq:categories";

    /// Book ID counter.
    pub const BOOKS: &[u8] = b"seq:books";
}

/// Encode a user key (big-endian user ID).
#[must_use]
pub fn user_key(user_id: &UserId) -> Vec<u8> {
    user_id.to_be_bytes().to_vec()
}

/// Encode a username index key (the raw username bytes).
#[must_use]
pub fn username_key(username: &str) -> Vec<u8> {
    username.as_bytes().to_vec()
}

/// Encode a category key (big-endian category ID).
#[must_use]
pub fn category_key(category_id: &CategoryId) -> Vec<u8> {
    category_id.to_be_bytes().to_vec()
}

/// Encode a book key (big-endian book ID).
#[must_use]
pub fn book_key(book_id: &BookId) -> Vec<u8> {
    book_id.to_be_bytes().to_vec()
}

/// Encode a category-book index key: `category_id || book_id`.
///
/// This allows efficient prefix scans for all books in a category.
#[must_use]
pub fn category_book_key(category_id: &CategoryId, book_id: &BookId) -> Vec<u8> {
    let mut key = Vec::with_capacity(16);
    key.extend_from_slice(&category_id.to_be_bytes());
    key.extend_from_slice(&book_id.to_be_bytes());
    key
}

/// Encode a category prefix for scanning all books in a category.
#[must_use]
pub fn category_prefix(category_id: &CategoryId) -> Vec<u8> {
    category_id.to_be_bytes().to_vec()
}

/// Extract the book ID from a category-book key.
///
/// # Panics
///
/// Panics if the key is not at least 16 bytes.
#[must_use]
pub fn extract_book_id_from_category_book_key(key: &[u8]) -> BookId {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&key[8..16]);
    BookId::from_be_bytes(bytes)
}

/// Encode an association edge key: `user_id || category_id`.
///
/// The association column family holds only these keys with empty values,
/// so the edge set for a user is a set by construction and repeated
/// connects/disconnects are idempotent.
#[must_use]
pub fn user_category_key(user_id: &UserId, category_id: &CategoryId) -> Vec<u8> {
    let mut key = Vec::with_capacity(16);
    key.extend_from_slice(&user_id.to_be_bytes());
    key.extend_from_slice(&category_id.to_be_bytes());
    key
}

/// Encode a user prefix for scanning all association edges of a user.
#[must_use]
pub fn user_prefix(user_id: &UserId) -> Vec<u8> {
    user_id.to_be_bytes().to_vec()
}

/// Extract the category ID from an association edge key.
///
/// # Panics
///
/// Panics if the key is not at least 16 bytes.
#[must_use]
pub fn extract_category_id_from_user_category_key(key: &[u8]) -> CategoryId {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&key[8..16]);
    CategoryId::from_be_bytes(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_category_key_roundtrip() {
        let user_id = UserId::new(7);
        let category_id = CategoryId::new(5);

        let key = user_category_key(&user_id, &category_id);
        assert_eq!(key.len(), 16);

        let extracted = extract_category_id_from_user_category_key(&key);
        assert_eq!(extracted, category_id);
    }

    #[test]
    fn category_book_key_roundtrip() {
        let category_id = CategoryId::new(3);
        let book_id = BookId::new(11);

        let key = category_book_key(&category_id, &book_id);
        assert_eq!(key.len(), 16);

        let extracted = extract_book_id_from_category_book_key(&key);
        assert_eq!(extracted, book_id);
    }

    #[test]
    fn prefix_scan_simulation() {
        let user_id = UserId::new(1);
        let key1 = user_category_key(&user_id, &CategoryId::new(2));
        let key2 = user_category_key(&user_id, &CategoryId::new(300));
        let prefix = user_prefix(&user_id);

        assert!(key1.starts_with(&prefix));
        assert!(key2.starts_with(&prefix));
        // Big-endian encoding keeps edges in ascending category order
        assert!(key1 < key2);
    }
}
