//! Per-session state behind the books screen.
//!
//! Mutation results flow into the listing cache optimistically, but the
//! dashboard totals cannot be patched from a single mutation result. A
//! confirmed mutation therefore marks the totals dirty and a fresh fetch
//! recomputes them. Only admin sessions display the dashboard, so
//! non-admin mutations skip the invalidation entirely.

use bookstack_auth::Identity;
use bookstack_core::BookId;

use crate::cache::{CollectionCache, DashboardCache};
use crate::types::{BookRecord, Totals};

/// The books screen: the listing cache plus the dashboard totals,
/// scoped to one signed-in identity.
pub struct BooksSection {
    identity: Identity,
    books: CollectionCache<BookRecord>,
    dashboard: DashboardCache<Totals>,
}

impl BooksSection {
    /// Create the section for the signed-in identity.
    #[must_use]
    pub fn new(identity: Identity) -> Self {
        Self {
            identity,
            books: CollectionCache::new(),
            dashboard: DashboardCache::new(),
        }
    }

    /// The cached book listing.
    #[must_use]
    pub fn books(&self) -> &CollectionCache<BookRecord> {
        &self.books
    }

    /// The cached dashboard totals.
    #[must_use]
    pub fn dashboard(&self) -> &DashboardCache<Totals> {
        &self.dashboard
    }

    /// Record a server-confirmed create.
    pub fn book_created(&self, book: BookRecord) {
        self.books.apply_created(book);
        self.invalidate_totals();
    }

    /// Record a server-confirmed update.
    pub fn book_updated(&self, book: BookRecord) {
        self.books.apply_updated(book);
        self.invalidate_totals();
    }

    /// Record a server-confirmed soft delete.
    pub fn book_deleted(&self, book_id: BookId) {
        self.books.apply_deleted(&book_id);
        self.invalidate_totals();
    }

    /// Feed a totals fetch back into the dashboard cache.
    ///
    /// A failed fetch keeps the previous totals on display and leaves
    /// the dirty flag set.
    pub fn totals_fetched<E>(&self, outcome: Result<Totals, E>) {
        self.dashboard.refresh(outcome);
    }

    // Totals are only displayed to admins, so only admin mutations
    // force a recompute.
    fn invalidate_totals(&self) {
        if self.identity.is_admin() {
            self.dashboard.mark_dirty();
        }
    }
}
