//! Database schema definitions and column families.
//!
//! This module defines the column families used in `RocksDB` storage.

/// Column family names for the `RocksDB` database.
pub mod cf {
    /// Primary user records, keyed by `user_id`.
    pub const USERS: &str = "users";

    /// Index: user lookup by username, keyed by the username bytes.
    pub const USERS_BY_USERNAME: &str = "users_by_username";

    /// Primary category records, keyed by `category_id`.
    pub const CATEGORIES: &str = "categories";

    /// Primary book records, keyed by `book_id`.
    pub const BOOKS: &str = "books";

    /// Index: books by category, keyed by `category_id || book_id`.
    pub const BOOKS_BY_CATEGORY: &str = "books_by_category";

    /// Association edges, keyed by `user_id || category_id`.
    pub const USER_CATEGORIES: &str = "user_categories";

    /// ID allocation counters, keyed by sequence name.
    pub const META: &str = "meta";
}

/// Returns all column family names for database initialization.
#[must_use]
pub fn all_column_families() -> Vec<&'static str> {
    vec![
        cf::USERS,
        cf::USERS_BY_USERNAME,
        cf::CATEGORIES,
        cf::BOOKS,
        cf::BOOKS_BY_CATEGORY,
        cf::USER_CATEGORIES,
        cf::META,
    ]
}
