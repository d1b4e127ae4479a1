//! HTML rendering for the catalog page
//!
//! The page lives in `templates/main.hbs` and is rendered with Handlebars,
//! which HTML-escapes every `{{value}}` it substitutes.

use handlebars::Handlebars;
use serde::Serialize;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::book::{parse_book_id, Book},
};

const MAIN_TEMPLATE: &str = "main";

/// Everything the catalog page shows
#[derive(Debug, Default)]
pub struct IndexPage<'a> {
    /// Banner text, if any
    pub message: Option<&'a str>,
    pub books: &'a [Book],
    /// Identifier of the row being edited, as received in the URL
    pub edit_id: Option<&'a str>,
    /// Record used to pre-fill the form
    pub edit_book: Option<&'a Book>,
    /// Page is shown because the store failed
    pub store_error: bool,
}

#[derive(Serialize)]
struct PageContext<'a> {
    message: Option<&'a str>,
    store_error: bool,
    form: FormContext<'a>,
    books: Vec<RowContext<'a>>,
}

#[derive(Serialize)]
struct FormContext<'a> {
    heading: &'static str,
    action: String,
    title: Option<&'a str>,
    author: Option<&'a str>,
    submit: &'static str,
    editing: bool,
}

#[derive(Serialize)]
struct RowContext<'a> {
    n: usize,
    id: Uuid,
    title: Option<&'a str>,
    author: Option<&'a str>,
    editing: bool,
}

impl<'a> PageContext<'a> {
    fn new(page: &IndexPage<'a>) -> Self {
        let form = match page.edit_book {
            Some(book) => FormContext {
                heading: "Edit book",
                action: format!("/update_book/{}", book.id),
                title: book.title.as_deref(),
                author: book.author.as_deref(),
                submit: "Update",
                editing: true,
            },
            None => FormContext {
                heading: "Add book",
                action: "/store_book".to_string(),
                title: None,
                author: None,
                submit: "Add",
                editing: false,
            },
        };

        // Identifiers compare as UUIDs so any textual spelling highlights the row
        let editing_id = page
            .edit_id
            .and_then(|raw| parse_book_id(raw).ok())
            .or_else(|| page.edit_book.map(|b| b.id));

        let books = page
            .books
            .iter()
            .enumerate()
            .map(|(index, book)| RowContext {
                n: index + 1,
                id: book.id,
                title: book.title.as_deref(),
                author: book.author.as_deref(),
                editing: editing_id == Some(book.id),
            })
            .collect();

        Self {
            message: page.message,
            store_error: page.store_error,
            form,
            books,
        }
    }
}

/// Template registry, built once at startup and shared through the app state
pub struct Views {
    registry: Handlebars<'static>,
}

impl Views {
    pub fn new() -> AppResult<Self> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(false);
        registry
            .register_template_string(MAIN_TEMPLATE, include_str!("../../templates/main.hbs"))
            .map_err(|e| AppError::Internal(format!("Invalid page template: {}", e)))?;
        Ok(Self { registry })
    }

    /// Render the full catalog document
    pub fn render_index(&self, page: &IndexPage<'_>) -> AppResult<String> {
        self.registry
            .render(MAIN_TEMPLATE, &PageContext::new(page))
            .map_err(|e| AppError::Internal(format!("Failed to render page: {}", e)))
    }
}
