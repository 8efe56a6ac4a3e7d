//! Domain types stored in the database.
//!
//! These types represent the persisted state of users, categories, and books.

use bookstack_core::{BookId, CategoryId, Role, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user record stored in the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier for the user.
    pub user_id: UserId,
    /// Login name, unique across users.
    pub username: String,
    /// Argon2 PHC-string hash of the user's password.
    pub password_hash: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Role driving visibility rules.
    pub role: Role,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// A category record stored in the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Unique identifier for the category.
    pub category_id: CategoryId,
    /// Display name.
    pub name: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A book record stored in the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Unique identifier for the book.
    pub book_id: BookId,
    /// Title.
    pub title: String,
    /// Author name, free text.
    pub author: String,
    /// Description.
    pub description: String,
    /// Category this book belongs to.
    pub category_id: CategoryId,
    /// User who created the record.
    pub created_by: UserId,
    /// Soft-deletion flag. Deleted books stay addressable by ID but are
    /// excluded from default listings.
    pub is_deleted: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Per-author count of non-deleted books, for the dashboard aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorCount {
    /// Author name as stored on the book records.
    pub author: String,
    /// Number of non-deleted books by this author.
    pub count: u64,
}
