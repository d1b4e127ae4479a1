//! Catalog management service

use std::sync::Arc;

use crate::{
    error::AppResult,
    models::book::{parse_book_id, Book, BookForm},
    repository::BookStore,
};

/// What a delete request actually did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
}

#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn BookStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        Self { store }
    }

    /// All books in insertion order
    pub async fn list(&self) -> AppResult<Vec<Book>> {
        self.store.list_all().await
    }

    /// Look up the book targeted by an edit link
    pub async fn find(&self, raw_id: &str) -> AppResult<Option<Book>> {
        let id = parse_book_id(raw_id)?;
        self.store.find_by_id(id).await
    }

    pub async fn create(&self, form: &BookForm) -> AppResult<Book> {
        let book = self.store.create(form).await?;
        tracing::info!("Catalog create: book id={}", book.id);
        Ok(book)
    }

    /// Replace title and author. An unknown identifier is not an error.
    pub async fn update(&self, raw_id: &str, form: &BookForm) -> AppResult<Option<Book>> {
        let id = parse_book_id(raw_id)?;
        let updated = self.store.update_by_id(id, form).await?;
        if updated.is_none() {
            tracing::warn!("Catalog update: no book with id={}", id);
        }
        Ok(updated)
    }

    pub async fn delete(&self, raw_id: &str) -> AppResult<DeleteOutcome> {
        let id = parse_book_id(raw_id)?;
        match self.store.delete_by_id(id).await? {
            0 => {
                tracing::warn!("Catalog delete: no book with id={}", id);
                Ok(DeleteOutcome::NotFound)
            }
            _ => {
                tracing::info!("Catalog delete: book id={}", id);
                Ok(DeleteOutcome::Deleted)
            }
        }
    }

    /// Store connectivity check
    pub async fn ping(&self) -> AppResult<()> {
        self.store.ping().await
    }
}
