//! `RocksDB` storage implementation.
//!
//! This module provides the `RocksStore` implementation of the `Store` trait.

use std::path::Path;
use std::sync::Arc;

use bookstack_core::{BookId, CategoryId, UserId};
use parking_lot::Mutex;
use rocksdb::{
    BoundColumnFamily, ColumnFamilyDescriptor, DBWithThreadMode, IteratorMode, MultiThreaded,
    Options, WriteBatch,
};

use crate::error::{Result, StoreError};
use crate::keys;
use crate::schema::{all_column_families, cf};
use crate::types::{AuthorCount, Book, Category, User};
use crate::Store;

/// RocksDB-backed record store implementation.
pub struct RocksStore {
    db: Arc<DBWithThreadMode<MultiThreaded>>,
    // Serializes read-increment-write on the meta counters.
    seq_lock: Mutex<()>,
}

impl RocksStore {
    /// Open or create a `RocksDB` database at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_descriptors: Vec<_> = all_column_families()
            .into_iter()
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()))
            .collect();

        let db = DBWithThreadMode::open_cf_descriptors(&opts, path, cf_descriptors)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(Self {
            db: Arc::new(db),
            seq_lock: Mutex::new(()),
        })
    }

    /// Get a column family handle.
    fn cf(&self, name: &str) -> Result<Arc<BoundColumnFamily<'_>>> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| StoreError::Database(format!("column family not found: {name}")))
    }

    /// Serialize a value using CBOR.
    fn serialize<T: serde::Serialize>(value: &T) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        ciborium::into_writer(value, &mut buf)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(buf)
    }

    /// Deserialize a value from CBOR.
    fn deserialize<T: serde::de::DeserializeOwned>(data: &[u8]) -> Result<T> {
        ciborium::from_reader(data).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    /// Allocate the next value of a persisted counter.
    fn next_seq(&self, seq_key: &[u8]) -> Result<u64> {
        let cf_meta = self.cf(cf::META)?;
        let _guard = self.seq_lock.lock();

        let current = self
            .db
            .get_cf(&cf_meta, seq_key)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| {
                let bytes: [u8; 8] = data
                    .as_slice()
                    .try_into()
                    .map_err(|_| StoreError::Serialization("bad counter encoding".into()))?;
                Ok::<u64, StoreError>(u64::from_be_bytes(bytes))
            })
            .transpose()?
            .unwrap_or(0);

        let next = current + 1;
        self.db
            .put_cf(&cf_meta, seq_key, next.to_be_bytes())
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(next)
    }
}

impl Store for RocksStore {
    // =========================================================================
    // User Operations
    // =========================================================================

    fn allocate_user_id(&self) -> Result<UserId> {
        Ok(UserId::new(self.next_seq(keys::seq::USERS)?))
    }

    fn put_user(&self, user: &User) -> Result<()> {
        let cf_users = self.cf(cf::USERS)?;
        let cf_by_username = self.cf(cf::USERS_BY_USERNAME)?;

        let user_key = keys::user_key(&user.user_id);
        let value = Self::serialize(user)?;

        // Check for a previous record to keep the username index consistent
        // when the username changes.
        let old_username = self
            .db
            .get_cf(&cf_users, &user_key)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize::<User>(&data))
            .transpose()?
            .map(|u| u.username);

        let mut batch = WriteBatch::default();
        batch.put_cf(&cf_users, &user_key, &value);

        if let Some(old) = old_username {
            if old != user.username {
                batch.delete_cf(&cf_by_username, keys::username_key(&old));
            }
        }
        batch.put_cf(
            &cf_by_username,
            keys::username_key(&user.username),
            user.user_id.to_be_bytes(),
        );

        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    fn get_user(&self, user_id: &UserId) -> Result<Option<User>> {
        let cf = self.cf(cf::USERS)?;

        self.db
            .get_cf(&cf, keys::user_key(user_id))
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let cf_by_username = self.cf(cf::USERS_BY_USERNAME)?;

        let Some(id_bytes) = self
            .db
            .get_cf(&cf_by_username, keys::username_key(username))
            .map_err(|e| StoreError::Database(e.to_string()))?
        else {
            return Ok(None);
        };

        let bytes: [u8; 8] = id_bytes
            .as_slice()
            .try_into()
            .map_err(|_| StoreError::Serialization("bad username index encoding".into()))?;

        self.get_user(&UserId::from_be_bytes(bytes))
    }

    fn list_users(&self) -> Result<Vec<User>> {
        let cf = self.cf(cf::USERS)?;

        let mut users = Vec::new();
        for item in self.db.iterator_cf(&cf, IteratorMode::Start) {
            let (_, value) = item.map_err(|e| StoreError::Database(e.to_string()))?;
            users.push(Self::deserialize::<User>(&value)?);
        }

        Ok(users)
    }

    // =========================================================================
    // Category Operations
    // =========================================================================

    fn allocate_category_id(&self) -> Result<CategoryId> {
        Ok(CategoryId::new(self.next_seq(keys::seq::CATEGORIES)?))
    }

    fn put_category(&self, category: &Category) -> Result<()> {
        let cf = self.cf(cf::CATEGORIES)?;
        let value = Self::serialize(category)?;

        self.db
            .put_cf(&cf, keys::category_key(&category.category_id), value)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    fn get_category(&self, category_id: &CategoryId) -> Result<Option<Category>> {
        let cf = self.cf(cf::CATEGORIES)?;

        self.db
            .get_cf(&cf, keys::category_key(category_id))
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    fn list_categories(&self) -> Result<Vec<Category>> {
        let cf = self.cf(cf::CATEGORIES)?;

        let mut categories = Vec::new();
        for item in self.db.iterator_cf(&cf, IteratorMode::Start) {
            let (_, value) = item.map_err(|e| StoreError::Database(e.to_string()))?;
            categories.push(Self::deserialize::<Category>(&value)?);
        }

        Ok(categories)
    }

    // =========================================================================
    // Book Operations
    // =========================================================================

    fn allocate_book_id(&self) -> Result<BookId> {
        Ok(BookId::new(self.next_seq(keys::seq::BOOKS)?))
    }

    fn put_book(&self, book: &Book) -> Result<()> {
        let cf_books = self.cf(cf::BOOKS)?;
        let cf_by_category = self.cf(cf::BOOKS_BY_CATEGORY)?;

        let book_key = keys::book_key(&book.book_id);
        let value = Self::serialize(book)?;

        // Check for a previous record to keep the category index consistent
        // when the book moves between categories.
        let old_category = self
            .db
            .get_cf(&cf_books, &book_key)
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize::<Book>(&data))
            .transpose()?
            .map(|b| b.category_id);

        let mut batch = WriteBatch::default();
        batch.put_cf(&cf_books, &book_key, &value);

        if let Some(old) = old_category {
            if old != book.category_id {
                batch.delete_cf(
                    &cf_by_category,
                    keys::category_book_key(&old, &book.book_id),
                );
            }
        }
        batch.put_cf(
            &cf_by_category,
            keys::category_book_key(&book.category_id, &book.book_id),
            b"",
        );

        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    fn get_book(&self, book_id: &BookId) -> Result<Option<Book>> {
        let cf = self.cf(cf::BOOKS)?;

        self.db
            .get_cf(&cf, keys::book_key(book_id))
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    fn list_books(&self, include_deleted: bool) -> Result<Vec<Book>> {
        let cf = self.cf(cf::BOOKS)?;

        let mut books = Vec::new();
        for item in self.db.iterator_cf(&cf, IteratorMode::Start) {
            let (_, value) = item.map_err(|e| StoreError::Database(e.to_string()))?;
            let book: Book = Self::deserialize(&value)?;
            if include_deleted || !book.is_deleted {
                books.push(book);
            }
        }

        Ok(books)
    }

    fn list_books_by_category(&self, category_id: &CategoryId) -> Result<Vec<Book>> {
        let cf_by_category = self.cf(cf::BOOKS_BY_CATEGORY)?;
        let prefix = keys::category_prefix(category_id);

        let mut books = Vec::new();
        let iter = self.db.iterator_cf(
            &cf_by_category,
            IteratorMode::From(&prefix, rocksdb::Direction::Forward),
        );

        for item in iter {
            let (key, _) = item.map_err(|e| StoreError::Database(e.to_string()))?;

            if !key.starts_with(&prefix) {
                break;
            }

            let book_id = keys::extract_book_id_from_category_book_key(&key);
            if let Some(book) = self.get_book(&book_id)? {
                if !book.is_deleted {
                    books.push(book);
                }
            }
        }

        Ok(books)
    }

    fn soft_delete_book(&self, book_id: &BookId) -> Result<Book> {
        let mut book = self.get_book(book_id)?.ok_or(StoreError::NotFound)?;
        book.is_deleted = true;
        book.updated_at = chrono::Utc::now();
        self.put_book(&book)?;

        tracing::debug!(book_id = %book_id, "book soft-deleted");
        Ok(book)
    }

    fn count_active_books(&self) -> Result<u64> {
        Ok(self.list_books(false)?.len() as u64)
    }

    fn count_deleted_books(&self) -> Result<u64> {
        let cf = self.cf(cf::BOOKS)?;

        let mut count = 0u64;
        for item in self.db.iterator_cf(&cf, IteratorMode::Start) {
            let (_, value) = item.map_err(|e| StoreError::Database(e.to_string()))?;
            let book: Book = Self::deserialize(&value)?;
            if book.is_deleted {
                count += 1;
            }
        }

        Ok(count)
    }

    fn count_books_per_author(&self) -> Result<Vec<AuthorCount>> {
        let mut counts = std::collections::BTreeMap::<String, u64>::new();
        for book in self.list_books(false)? {
            *counts.entry(book.author).or_insert(0) += 1;
        }

        Ok(counts
            .into_iter()
            .map(|(author, count)| AuthorCount { author, count })
            .collect())
    }

    // =========================================================================
    // Association Operations
    // =========================================================================

    fn connect_categories(&self, user_id: &UserId, category_ids: &[CategoryId]) -> Result<()> {
        let cf_edges = self.cf(cf::USER_CATEGORIES)?;

        let mut batch = WriteBatch::default();
        for category_id in category_ids {
            batch.put_cf(&cf_edges, keys::user_category_key(user_id, category_id), b"");
        }

        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    fn disconnect_categories(&self, user_id: &UserId, category_ids: &[CategoryId]) -> Result<()> {
        let cf_edges = self.cf(cf::USER_CATEGORIES)?;

        let mut batch = WriteBatch::default();
        for category_id in category_ids {
            batch.delete_cf(&cf_edges, keys::user_category_key(user_id, category_id));
        }

        self.db
            .write(batch)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    fn list_user_categories(&self, user_id: &UserId) -> Result<Vec<CategoryId>> {
        let cf_edges = self.cf(cf::USER_CATEGORIES)?;
        let prefix = keys::user_prefix(user_id);

        let mut category_ids = Vec::new();
        let iter = self.db.iterator_cf(
            &cf_edges,
            IteratorMode::From(&prefix, rocksdb::Direction::Forward),
        );

        for item in iter {
            let (key, _) = item.map_err(|e| StoreError::Database(e.to_string()))?;

            if !key.starts_with(&prefix) {
                break;
            }

            category_ids.push(keys::extract_category_id_from_user_category_key(&key));
        }

        Ok(category_ids)
    }
}
