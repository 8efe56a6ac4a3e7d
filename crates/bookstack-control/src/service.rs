//! Records service implementation.
//!
//! This module provides the `Records` trait and `RecordsService`
//! implementation that coordinates credential checks, role gates, and
//! the user/category association reconciler on top of the store.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use bookstack_auth::{authenticate, hash_password, Identity};
use bookstack_core::{BookId, CategoryId, UserId};
use bookstack_store::{Book, Category, Store};
use chrono::Utc;

use crate::error::{ControlError, Result};
use crate::reconcile::reconcile;
use crate::types::{
    BookTotals, CreateBookRequest, CreateUserRequest, UpdateBookRequest, UpdateUserRequest,
    UserRecord,
};

/// Trait defining the records operations exposed to the gateway.
///
/// Every operation except `login` takes the verified identity of the
/// caller and enforces role gates before touching the store.
#[async_trait]
pub trait Records: Send + Sync {
    // =========================================================================
    // Authentication
    // =========================================================================

    /// Check credentials and return the matching user.
    ///
    /// # Errors
    ///
    /// Returns `ControlError::Auth(InvalidCredentials)` when the
    /// username is unknown or the password does not match.
    async fn login(&self, username: &str, password: &str) -> Result<UserRecord>;

    // =========================================================================
    // User Administration (ADMIN only)
    // =========================================================================

    /// List all users with their category links.
    async fn list_users(&self, actor: &Identity) -> Result<Vec<UserRecord>>;

    /// Create a user account.
    ///
    /// # Errors
    ///
    /// Returns `ControlError::UsernameTaken` when the username is
    /// already held by another account.
    async fn create_user(&self, actor: &Identity, request: CreateUserRequest)
        -> Result<UserRecord>;

    /// Update a user account and reconcile its category links.
    ///
    /// The returned record reflects a re-read of stored state after the
    /// reconciliation plan has been applied.
    async fn update_user(
        &self,
        actor: &Identity,
        user_id: &UserId,
        request: UpdateUserRequest,
    ) -> Result<UserRecord>;

    // =========================================================================
    // Categories
    // =========================================================================

    /// List all categories. Open to any authenticated caller.
    async fn list_categories(&self, actor: &Identity) -> Result<Vec<Category>>;

    /// Create a category. ADMIN only.
    async fn create_category(&self, actor: &Identity, name: &str) -> Result<Category>;

    /// Rename a category. ADMIN only.
    async fn update_category(
        &self,
        actor: &Identity,
        category_id: &CategoryId,
        name: &str,
    ) -> Result<Category>;

    // =========================================================================
    // Books
    // =========================================================================

    /// List active books visible to the caller.
    ///
    /// ADMIN callers see every active book; USER callers see only books
    /// in categories linked to their account.
    async fn list_books(&self, actor: &Identity) -> Result<Vec<Book>>;

    /// Create a book record attributed to the caller.
    async fn create_book(&self, actor: &Identity, request: CreateBookRequest) -> Result<Book>;

    /// Update a book record. Clears any soft-delete mark.
    async fn update_book(
        &self,
        actor: &Identity,
        book_id: &BookId,
        request: UpdateBookRequest,
    ) -> Result<Book>;

    /// Soft-delete a book. The record is retained for the dashboard totals.
    async fn delete_book(&self, actor: &Identity, book_id: &BookId) -> Result<Book>;

    // =========================================================================
    // Dashboard (ADMIN only)
    // =========================================================================

    /// Aggregate book counts for the admin dashboard.
    async fn dashboard_totals(&self, actor: &Identity) -> Result<BookTotals>;
}

/// The main records service implementation.
pub struct RecordsService<S: Store> {
    store: Arc<S>,
}

impl<S: Store> RecordsService<S> {
    /// Create a new records service.
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Get a reference to the store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    fn require_admin(actor: &Identity) -> Result<()> {
        if actor.is_admin() {
            Ok(())
        } else {
            Err(ControlError::NotPermitted)
        }
    }

    fn category_must_exist(&self, category_id: &CategoryId) -> Result<Category> {
        self.store
            .get_category(category_id)?
            .ok_or(ControlError::CategoryNotFound(*category_id))
    }

    fn user_record(&self, user: bookstack_store::User) -> Result<UserRecord> {
        let category_ids = self.store.list_user_categories(&user.user_id)?;
        Ok(UserRecord::from_parts(user, category_ids))
    }
}

#[async_trait]
impl<S: Store + 'static> Records for RecordsService<S> {
    // =========================================================================
    // Authentication
    // =========================================================================

    async fn login(&self, username: &str, password: &str) -> Result<UserRecord> {
        let user = authenticate(self.store.as_ref(), username, password)?;
        self.user_record(user)
    }

    // =========================================================================
    // User Administration
    // =========================================================================

    async fn list_users(&self, actor: &Identity) -> Result<Vec<UserRecord>> {
        Self::require_admin(actor)?;
        let users = self.store.list_users()?;
        users
            .into_iter()
            .map(|user| self.user_record(user))
            .collect()
    }

    async fn create_user(
        &self,
        actor: &Identity,
        request: CreateUserRequest,
    ) -> Result<UserRecord> {
        Self::require_admin(actor)?;

        if self
            .store
            .find_user_by_username(&request.username)?
            .is_some()
        {
            return Err(ControlError::UsernameTaken(request.username));
        }

        let now = Utc::now();
        let user = bookstack_store::User {
            user_id: self.store.allocate_user_id()?,
            username: request.username,
            password_hash: hash_password(&request.password)?,
            first_name: request.first_name,
            last_name: request.last_name,
            role: request.role,
            created_at: now,
            updated_at: now,
        };
        self.store.put_user(&user)?;

        tracing::info!(
            user_id = %user.user_id,
            username = %user.username,
            role = %user.role,
            "Created user"
        );

        Ok(UserRecord::from_parts(user, Vec::new()))
    }

    async fn update_user(
        &self,
        actor: &Identity,
        user_id: &UserId,
        request: UpdateUserRequest,
    ) -> Result<UserRecord> {
        Self::require_admin(actor)?;

        let mut user = self
            .store
            .get_user(user_id)?
            .ok_or(ControlError::UserNotFound(*user_id))?;

        if request.username != user.username {
            if let Some(holder) = self.store.find_user_by_username(&request.username)? {
                if holder.user_id != *user_id {
                    return Err(ControlError::UsernameTaken(request.username));
                }
            }
        }

        // Validate every requested link before anything is written, so a
        // rejected request leaves the stored user untouched.
        for category_id in &request.category_ids {
            self.category_must_exist(category_id)?;
        }

        user.username = request.username;
        user.first_name = request.first_name;
        user.last_name = request.last_name;
        user.role = request.role;
        if let Some(password) = &request.password {
            user.password_hash = hash_password(password)?;
        }
        user.updated_at = Utc::now();
        self.store.put_user(&user)?;

        let existing: BTreeSet<CategoryId> =
            self.store.list_user_categories(user_id)?.into_iter().collect();
        let desired: BTreeSet<CategoryId> = request.category_ids.iter().copied().collect();
        let plan = reconcile(&existing, &desired);

        // Stale links must be gone before new ones land.
        if !plan.to_disconnect.is_empty() {
            let stale: Vec<CategoryId> = plan.to_disconnect.iter().copied().collect();
            self.store.disconnect_categories(user_id, &stale)?;
        }
        if !plan.to_connect.is_empty() {
            let fresh: Vec<CategoryId> = plan.to_connect.iter().copied().collect();
            self.store.connect_categories(user_id, &fresh)?;
        }

        tracing::info!(
            user_id = %user_id,
            disconnected = plan.to_disconnect.len(),
            connected = plan.to_connect.len(),
            "Updated user"
        );

        // Re-read so the caller sees what was actually persisted.
        let confirmed = self
            .store
            .get_user(user_id)?
            .ok_or(ControlError::UserNotFound(*user_id))?;
        self.user_record(confirmed)
    }

    // =========================================================================
    // Categories
    // =========================================================================

    async fn list_categories(&self, _actor: &Identity) -> Result<Vec<Category>> {
        Ok(self.store.list_categories()?)
    }

    async fn create_category(&self, actor: &Identity, name: &str) -> Result<Category> {
        Self::require_admin(actor)?;

        let category = Category {
            category_id: self.store.allocate_category_id()?,
            name: name.to_owned(),
            created_at: Utc::now(),
        };
        self.store.put_category(&category)?;

        tracing::info!(category_id = %category.category_id, name = %category.name, "Created category");

        Ok(category)
    }

    async fn update_category(
        &self,
        actor: &Identity,
        category_id: &CategoryId,
        name: &str,
    ) -> Result<Category> {
        Self::require_admin(actor)?;

        let mut category = self.category_must_exist(category_id)?;
        category.name = name.to_owned();
        self.store.put_category(&category)?;

        Ok(category)
    }

    // =========================================================================
    // Books
    // =========================================================================

    async fn list_books(&self, actor: &Identity) -> Result<Vec<Book>> {
        if actor.is_admin() {
            return Ok(self.store.list_books(false)?);
        }

        let category_ids = self.store.list_user_categories(&actor.user_id)?;
        let mut books = Vec::new();
        for category_id in &category_ids {
            books.extend(self.store.list_books_by_category(category_id)?);
        }
        books.sort_by_key(|book| book.book_id);
        Ok(books)
    }

    async fn create_book(&self, actor: &Identity, request: CreateBookRequest) -> Result<Book> {
        self.category_must_exist(&request.category_id)?;

        let now = Utc::now();
        let book = Book {
            book_id: self.store.allocate_book_id()?,
            title: request.title,
            author: request.author,
            description: request.description,
            category_id: request.category_id,
            created_by: actor.user_id,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        };
        self.store.put_book(&book)?;

        tracing::info!(
            book_id = %book.book_id,
            title = %book.title,
            created_by = %actor.user_id,
            "Created book"
        );

        Ok(book)
    }

    async fn update_book(
        &self,
        _actor: &Identity,
        book_id: &BookId,
        request: UpdateBookRequest,
    ) -> Result<Book> {
        self.category_must_exist(&request.category_id)?;

        let mut book = self
            .store
            .get_book(book_id)?
            .ok_or(ControlError::BookNotFound(*book_id))?;

        book.title = request.title;
        book.author = request.author;
        book.description = request.description;
        book.category_id = request.category_id;
        // An edit resurfaces a soft-deleted record.
        book.is_deleted = false;
        book.updated_at = Utc::now();
        self.store.put_book(&book)?;

        Ok(book)
    }

    async fn delete_book(&self, _actor: &Identity, book_id: &BookId) -> Result<Book> {
        match self.store.soft_delete_book(book_id) {
            Ok(book) => {
                tracing::info!(book_id = %book_id, "Soft-deleted book");
                Ok(book)
            }
            Err(bookstack_store::StoreError::NotFound) => Err(ControlError::BookNotFound(*book_id)),
            Err(err) => Err(err.into()),
        }
    }

    // =========================================================================
    // Dashboard
    // =========================================================================

    async fn dashboard_totals(&self, actor: &Identity) -> Result<BookTotals> {
        Self::require_admin(actor)?;

        Ok(BookTotals {
            active: self.store.count_active_books()?,
            deleted: self.store.count_deleted_books()?,
            per_author: self.store.count_books_per_author()?,
        })
    }
}
