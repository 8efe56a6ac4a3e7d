//! Wire mirrors of the gateway's response payloads.

use bookstack_core::{BookId, CategoryId, Role, UserId};
use serde::{Deserialize, Serialize};

use crate::cache::Keyed;

/// A user as returned by the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// Primary key.
    pub id: UserId,
    /// Login name.
    pub username: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Assigned role.
    pub role: Role,
    /// Categories linked to this user.
    #[serde(default)]
    pub category_ids: Vec<CategoryId>,
}

/// A category as returned by the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRecord {
    /// Primary key.
    pub category_id: CategoryId,
    /// Category name.
    pub name: String,
}

/// A book as returned by the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookRecord {
    /// Primary key.
    pub book_id: BookId,
    /// Title.
    pub title: String,
    /// Author name.
    pub author: String,
    /// Free-form description.
    pub description: String,
    /// Category this book belongs to.
    pub category_id: CategoryId,
    /// User who created the record.
    pub created_by: UserId,
}

/// Dashboard totals as returned by the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    /// Number of active books.
    #[serde(rename = "total")]
    pub total: u64,
    /// Number of soft-deleted books.
    #[serde(rename = "totalDeleted")]
    pub total_deleted: u64,
    /// Active book counts per author.
    #[serde(rename = "totalPerAuthor")]
    pub total_per_author: Vec<AuthorTotal>,
}

/// Per-author count inside [`Totals`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorTotal {
    /// Author name.
    pub author: String,
    /// Number of active books by this author.
    pub count: u64,
}

impl Keyed for UserRecord {
    type Key = UserId;

    fn key(&self) -> UserId {
        self.id
    }
}

impl Keyed for CategoryRecord {
    type Key = CategoryId;

    fn key(&self) -> CategoryId {
        self.category_id
    }
}

impl Keyed for BookRecord {
    type Key = BookId;

    fn key(&self) -> BookId {
        self.book_id
    }
}
