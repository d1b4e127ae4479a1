//! Book domain methods on Repository

use async_trait::async_trait;
use uuid::Uuid;

use super::{BookStore, Repository};
use crate::{
    error::AppResult,
    models::book::{Book, BookForm},
};

#[async_trait]
impl BookStore for Repository {
    async fn list_all(&self) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, Book>(
            "SELECT id, title, author, created_at FROM books ORDER BY position",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Book>> {
        let row = sqlx::query_as::<_, Book>(
            "SELECT id, title, author, created_at FROM books WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn create(&self, form: &BookForm) -> AppResult<Book> {
        let book = Book::new(form);
        let row = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (id, title, author, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, author, created_at
            "#,
        )
        .bind(book.id)
        .bind(&book.title)
        .bind(&book.author)
        .bind(book.created_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update_by_id(&self, id: Uuid, form: &BookForm) -> AppResult<Option<Book>> {
        let row = sqlx::query_as::<_, Book>(
            r#"
            UPDATE books SET title = $2, author = $3
            WHERE id = $1
            RETURNING id, title, author, created_at
            "#,
        )
        .bind(id)
        .bind(&form.title)
        .bind(&form.author)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn delete_by_id(&self, id: Uuid) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
