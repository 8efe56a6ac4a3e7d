//! `RocksDB` record store for bookstack.
//!
//! This crate provides persistent storage for users, categories, and books
//! using `RocksDB` with column families for efficient indexing.
//!
//! # Architecture
//!
//! The storage uses the following column families:
//!
//! - `users`: Primary user records, keyed by `user_id`
//! - `users_by_username`: Index for login lookup, keyed by username
//! - `categories`: Primary category records, keyed by `category_id`
//! - `books`: Primary book records, keyed by `book_id`
//! - `books_by_category`: Index for listing books by category
//! - `user_categories`: User↔category association edges, keyed by
//!   `user_id || category_id` (an edge set by construction)
//! - `meta`: Per-entity ID allocation counters
//!
//! Books are never removed: deletion flips the `is_deleted` flag, keeping
//! the row addressable for aggregate counting while excluding it from
//! default listings.
//!
//! # Example
//!
//! ```no_run
//! use bookstack_store::{RocksStore, Store};
//!
//! let store = RocksStore::open("/tmp/bookstack-db").unwrap();
//! let users = store.list_users().unwrap();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod keys;
pub mod rocks;
pub mod schema;
pub mod types;

pub use error::{Result, StoreError};
pub use rocks::RocksStore;
pub use types::{AuthorCount, Book, Category, User};

use bookstack_core::{BookId, CategoryId, UserId};

/// The storage trait defining all record store operations.
///
/// This trait abstracts the storage layer, allowing for different
/// implementations. Every operation is per-record atomic; no multi-statement
/// transactions are assumed; callers that need multi-step consistency
/// (such as association reconciliation) must sequence their own calls.
pub trait Store: Send + Sync {
    // =========================================================================
    // User Operations
    // =========================================================================

    /// Allocate the next user ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the counter cannot be read or persisted.
    fn allocate_user_id(&self) -> Result<UserId>;

    /// Insert or update a user record.
    ///
    /// This also maintains the username index.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn put_user(&self, user: &User) -> Result<()>;

    /// Get a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_user(&self, user_id: &UserId) -> Result<Option<User>>;

    /// Look up a user by username via the login index.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn find_user_by_username(&self, username: &str) -> Result<Option<User>>;

    /// List all users in creation order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_users(&self) -> Result<Vec<User>>;

    // =========================================================================
    // Category Operations
    // =========================================================================

    /// Allocate the next category ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the counter cannot be read or persisted.
    fn allocate_category_id(&self) -> Result<CategoryId>;

    /// Insert or update a category record.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn put_category(&self, category: &Category) -> Result<()>;

    /// Get a category by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_category(&self, category_id: &CategoryId) -> Result<Option<Category>>;

    /// List all categories in creation order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_categories(&self) -> Result<Vec<Category>>;

    // =========================================================================
    // Book Operations
    // =========================================================================

    /// Allocate the next book ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the counter cannot be read or persisted.
    fn allocate_book_id(&self) -> Result<BookId>;

    /// Insert or update a book record.
    ///
    /// This also maintains the category index.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn put_book(&self, book: &Book) -> Result<()>;

    /// Get a book by ID.
    ///
    /// Soft-deleted books remain addressable here.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_book(&self, book_id: &BookId) -> Result<Option<Book>>;

    /// List books in creation order.
    ///
    /// Soft-deleted books are excluded unless `include_deleted` is set.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_books(&self, include_deleted: bool) -> Result<Vec<Book>>;

    /// List non-deleted books belonging to a category.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_books_by_category(&self, category_id: &CategoryId) -> Result<Vec<Book>>;

    /// Flip the `is_deleted` flag on a book. The row is never removed.
    ///
    /// Returns the updated record.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the book doesn't exist.
    fn soft_delete_book(&self, book_id: &BookId) -> Result<Book>;

    /// Count books that have not been soft-deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn count_active_books(&self) -> Result<u64>;

    /// Count soft-deleted books.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn count_deleted_books(&self) -> Result<u64>;

    /// Group non-deleted books by author, with counts.
    ///
    /// Results are sorted by author name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn count_books_per_author(&self) -> Result<Vec<AuthorCount>>;

    // =========================================================================
    // Association Operations
    // =========================================================================

    /// Connect a user to each of the given categories.
    ///
    /// Idempotent: connecting an already-connected edge is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn connect_categories(&self, user_id: &UserId, category_ids: &[CategoryId]) -> Result<()>;

    /// Disconnect a user from each of the given categories.
    ///
    /// Idempotent: disconnecting an absent edge is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn disconnect_categories(&self, user_id: &UserId, category_ids: &[CategoryId]) -> Result<()>;

    /// List the category IDs associated with a user, in ascending order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_user_categories(&self, user_id: &UserId) -> Result<Vec<CategoryId>>;
}
