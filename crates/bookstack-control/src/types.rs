//! Request and response payloads for the records service.

use bookstack_core::{CategoryId, Role, UserId};
use bookstack_store::{AuthorCount, User};
use serde::{Deserialize, Serialize};

/// Fields for creating a user account.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    /// Login name, unique across all users.
    pub username: String,
    /// Plaintext password, hashed before storage.
    pub password: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Role assigned to the account.
    #[serde(default)]
    pub role: Role,
}

/// Fields for updating a user account, including the desired category links.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    /// New login name.
    pub username: String,
    /// New password; `None` keeps the stored hash.
    #[serde(default)]
    pub password: Option<String>,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Role assigned to the account.
    pub role: Role,
    /// Complete desired set of category links for this user.
    #[serde(default)]
    pub category_ids: Vec<CategoryId>,
}

/// Fields for creating a book record.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookRequest {
    /// Title of the book.
    pub title: String,
    /// Author name, used for the per-author dashboard totals.
    pub author: String,
    /// Free-form description.
    pub description: String,
    /// Category the book belongs to.
    pub category_id: CategoryId,
}

/// Fields for updating a book record.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookRequest {
    /// Title of the book.
    pub title: String,
    /// Author name.
    pub author: String,
    /// Free-form description.
    pub description: String,
    /// Category the book belongs to.
    pub category_id: CategoryId,
}

/// A user as presented to API callers.
///
/// Never carries the password hash. The `category_ids` field reflects
/// the stored association edges at the time the record was read.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// Primary key.
    #[serde(rename = "id")]
    pub user_id: UserId,
    /// Login name.
    pub username: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Assigned role.
    pub role: Role,
    /// Categories linked to this user, ascending by id.
    pub category_ids: Vec<CategoryId>,
}

impl UserRecord {
    /// Builds the API view of a stored user and its category links.
    #[must_use]
    pub fn from_parts(user: User, category_ids: Vec<CategoryId>) -> Self {
        Self {
            user_id: user.user_id,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            role: user.role,
            category_ids,
        }
    }
}

/// Aggregate book counts for the admin dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookTotals {
    /// Number of books not soft-deleted.
    #[serde(rename = "total")]
    pub active: u64,
    /// Number of soft-deleted books.
    #[serde(rename = "totalDeleted")]
    pub deleted: u64,
    /// Active book counts grouped by author.
    #[serde(rename = "totalPerAuthor")]
    pub per_author: Vec<AuthorCount>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookstack_core::Role;
    use chrono::Utc;

    #[test]
    fn user_record_drops_password_hash() {
        let now = Utc::now();
        let user = User {
            user_id: UserId::new(4),
            username: "nadia".into(),
            password_hash: "$argon2id$secret".into(),
            first_name: "Nadia".into(),
            last_name: "Reyes".into(),
            role: Role::Admin,
            created_at: now,
            updated_at: now,
        };
        let record = UserRecord::from_parts(user, vec![CategoryId::new(2)]);
        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("argon2"));
        assert!(json.contains("\"id\":4"));
        assert!(json.contains("\"categoryIds\":[2]"));
        assert!(json.contains("\"role\":\"ADMIN\""));
    }

    #[test]
    fn totals_wire_names() {
        let totals = BookTotals {
            active: 10,
            deleted: 2,
            per_author: vec![AuthorCount {
                author: "Le Guin".into(),
                count: 3,
            }],
        };
        let json = serde_json::to_string(&totals).unwrap();
        assert!(json.contains("\"total\":10"));
        assert!(json.contains("\"totalDeleted\":2"));
        assert!(json.contains("\"totalPerAuthor\""));
    }
}
