//! In-process book store

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::BookStore;
use crate::{
    error::AppResult,
    models::book::{Book, BookForm},
};

/// Book store kept in memory, in insertion order. Contents are lost when the
/// process exits.
#[derive(Debug, Default)]
pub struct MemoryBookStore {
    books: RwLock<Vec<Book>>,
}

impl MemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with the given records
    pub fn with_books(books: Vec<Book>) -> Self {
        Self {
            books: RwLock::new(books),
        }
    }
}

#[async_trait]
impl BookStore for MemoryBookStore {
    async fn list_all(&self) -> AppResult<Vec<Book>> {
        Ok(self.books.read().await.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Book>> {
        Ok(self.books.read().await.iter().find(|b| b.id == id).cloned())
    }

    async fn create(&self, form: &BookForm) -> AppResult<Book> {
        let book = Book::new(form);
        self.books.write().await.push(book.clone());
        Ok(book)
    }

    async fn update_by_id(&self, id: Uuid, form: &BookForm) -> AppResult<Option<Book>> {
        let mut books = self.books.write().await;
        Ok(books.iter_mut().find(|b| b.id == id).map(|book| {
            book.title = form.title.clone();
            book.author = form.author.clone();
            book.clone()
        }))
    }

    async fn delete_by_id(&self, id: Uuid) -> AppResult<u64> {
        let mut books = self.books.write().await;
        let before = books.len();
        books.retain(|b| b.id != id);
        Ok((before - books.len()) as u64)
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_then_list_preserves_insertion_order() {
        let store = MemoryBookStore::new();
        let dune = store.create(&BookForm::new("Dune", "Herbert")).await.unwrap();
        let emma = store.create(&BookForm::new("Emma", "Austen")).await.unwrap();

        let books = store.list_all().await.unwrap();
        assert_eq!(books.iter().map(|b| b.id).collect::<Vec<_>>(), vec![dune.id, emma.id]);
    }

    #[tokio::test]
    async fn update_replaces_fields_and_keeps_identifier() {
        let store = MemoryBookStore::new();
        let book = store.create(&BookForm::new("Dune", "Herbert")).await.unwrap();

        let updated = store
            .update_by_id(book.id, &BookForm::new("Dune Messiah", "Frank Herbert"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, book.id);
        assert_eq!(updated.title.as_deref(), Some("Dune Messiah"));
        assert_eq!(store.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_of_unknown_identifier_is_a_no_op() {
        let store = MemoryBookStore::new();
        store.create(&BookForm::new("Dune", "Herbert")).await.unwrap();
        let before = store.list_all().await.unwrap();

        let result = store
            .update_by_id(Uuid::new_v4(), &BookForm::new("x", "y"))
            .await
            .unwrap();

        assert!(result.is_none());
        assert_eq!(store.list_all().await.unwrap(), before);
    }

    #[tokio::test]
    async fn delete_reports_removed_count() {
        let store = MemoryBookStore::new();
        let book = store.create(&BookForm::new("Dune", "Herbert")).await.unwrap();

        assert_eq!(store.delete_by_id(Uuid::new_v4()).await.unwrap(), 0);
        assert_eq!(store.delete_by_id(book.id).await.unwrap(), 1);
        assert!(store.find_by_id(book.id).await.unwrap().is_none());
        assert!(store.list_all().await.unwrap().is_empty());
    }
}
