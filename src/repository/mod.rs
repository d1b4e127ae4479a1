//! Repository layer for database operations

pub mod books;
pub mod employees;
pub mod memory;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::book::{Book, BookForm},
};

pub use memory::MemoryBookStore;

/// Storage contract for the book collection.
///
/// Implementations are shared across request handlers, so every method takes
/// `&self` and concurrent writers race with last-write-wins semantics.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    /// All records in insertion order
    async fn list_all(&self) -> AppResult<Vec<Book>>;

    /// Record with this identifier, or `None`
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Book>>;

    /// Insert a new record under a freshly assigned identifier
    async fn create(&self, form: &BookForm) -> AppResult<Book>;

    /// Replace title and author. Unknown identifiers are a no-op and return
    /// `None`.
    async fn update_by_id(&self, id: Uuid, form: &BookForm) -> AppResult<Option<Book>>;

    /// Remove the record, returning how many were removed (0 or 1)
    async fn delete_by_id(&self, id: Uuid) -> AppResult<u64>;

    /// Cheap connectivity check used by the readiness endpoint
    async fn ping(&self) -> AppResult<()>;

    /// Release underlying connections at shutdown
    async fn close(&self) {}
}

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}
