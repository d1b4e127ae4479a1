//! Book record model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Book record as stored in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    /// Identifier assigned by the store, never changed afterwards
    pub id: Uuid,
    pub title: Option<String>,
    pub author: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Book {
    /// Build a fresh record with a newly assigned identifier
    pub fn new(form: &BookForm) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: form.title.clone(),
            author: form.author.clone(),
            created_at: Utc::now(),
        }
    }
}

/// Create / update form submitted by the catalog page
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
pub struct BookForm {
    pub title: Option<String>,
    pub author: Option<String>,
}

impl BookForm {
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            author: Some(author.into()),
        }
    }
}

/// Parse an identifier received through a URL.
pub fn parse_book_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| {
        AppError::MalformedId(format!("\"{}\" is not a valid book identifier", raw))
    })
}
