//! Catalog page and book form endpoints
//!
//! Every write ends in a 302 back to `/` carrying an outcome code, so the
//! browser always lands on the list page again. Store failures never surface
//! as error statuses on these routes. When the list itself cannot be fetched
//! the page is rendered with an error banner instead of redirecting to a URL
//! that would fail the same way.

use axum::{
    extract::{
        rejection::{FormRejection, QueryRejection},
        Path, Query, State,
    },
    response::{Html, IntoResponse, Response},
    Form,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    error::AppError,
    models::{book::BookForm, Outcome},
    services::catalog::DeleteOutcome,
    views::IndexPage,
    AppState,
};

use super::{redirect_error, redirect_outcome};

/// Query parameters understood by the catalog page
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct IndexQuery {
    /// Book to pre-fill the form with
    pub edit_id: Option<String>,
    /// Book to delete (kept for old links; prefer `POST /delete_book/{id}`)
    pub delete_id: Option<String>,
    /// Outcome code of the previous action
    pub status: Option<String>,
    /// Free-text message shown when `status` has no fixed text
    pub message: Option<String>,
}

impl IndexQuery {
    /// Empty values count as absent, the way a blank form field does
    fn normalized(self) -> Self {
        fn present(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.trim().is_empty())
        }
        Self {
            edit_id: present(self.edit_id),
            delete_id: present(self.delete_id),
            status: present(self.status),
            message: present(self.message),
        }
    }
}

/// Catalog page
#[utoipa::path(
    get,
    path = "/",
    tag = "books",
    params(IndexQuery),
    responses(
        (status = 200, description = "Catalog page, with an error banner when the store is unreachable", content_type = "text/html", body = String),
        (status = 302, description = "Redirect after a `delete_id` request")
    )
)]
pub async fn index(
    State(state): State<AppState>,
    query: Result<Query<IndexQuery>, QueryRejection>,
) -> Response {
    let (query, rejected) = match query {
        Ok(Query(query)) => (query.normalized(), None),
        Err(rejection) => {
            tracing::warn!("Ignoring unreadable query string: {}", rejection.body_text());
            (IndexQuery::default(), Some(rejection.body_text()))
        }
    };

    if let Some(delete_id) = query.delete_id.as_deref() {
        return delete_and_redirect(&state, delete_id).await;
    }

    let catalog = &state.services.catalog;

    let books = match catalog.list().await {
        Ok(books) => books,
        Err(e) => {
            tracing::error!("Error fetching books: {}", e);
            let message = e.to_string();
            return render_page(
                &state,
                &IndexPage {
                    message: Some(&message),
                    store_error: true,
                    ..Default::default()
                },
            );
        }
    };

    let mut message = rejected.or_else(|| {
        Outcome::resolve_message(query.status.as_deref(), query.message.as_deref())
    });

    let edit_book = match query.edit_id.as_deref() {
        Some(edit_id) => match catalog.find(edit_id).await {
            Ok(book) => book,
            Err(e) => {
                tracing::warn!("Error fetching book to edit: {}", e);
                message = Some(e.to_string());
                None
            }
        },
        None => None,
    };

    render_page(
        &state,
        &IndexPage {
            message: message.as_deref(),
            books: &books,
            edit_id: query.edit_id.as_deref(),
            edit_book: edit_book.as_ref(),
            store_error: false,
        },
    )
}

fn render_page(state: &AppState, page: &IndexPage<'_>) -> Response {
    match state.views.render_index(page) {
        Ok(html) => Html(html).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Create a book
#[utoipa::path(
    post,
    path = "/store_book",
    tag = "books",
    request_body(content = BookForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Redirect to `/?status=create`, or `/?status=error&message=...`")
    )
)]
pub async fn store_book(
    State(state): State<AppState>,
    form: Result<Form<BookForm>, FormRejection>,
) -> Response {
    let result = match form {
        Ok(Form(form)) => state.services.catalog.create(&form).await.map(|_| ()),
        Err(rejection) => Err(AppError::BadRequest(rejection.body_text())),
    };

    match result {
        Ok(()) => redirect_outcome(Outcome::Create),
        Err(e) => {
            tracing::error!("Error inserting book: {}", e);
            redirect_error(&e)
        }
    }
}

/// Update a book's title and author
#[utoipa::path(
    post,
    path = "/update_book/{edit_id}",
    tag = "books",
    params(("edit_id" = String, Path, description = "Book ID")),
    request_body(content = BookForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Redirect to `/?status=update`, or `/?status=error&message=...`")
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    Path(edit_id): Path<String>,
    form: Result<Form<BookForm>, FormRejection>,
) -> Response {
    let result = match form {
        Ok(Form(form)) => state.services.catalog.update(&edit_id, &form).await.map(|_| ()),
        Err(rejection) => Err(AppError::BadRequest(rejection.body_text())),
    };

    match result {
        Ok(()) => redirect_outcome(Outcome::Update),
        Err(e) => {
            tracing::error!("Error updating book: {}", e);
            redirect_error(&e)
        }
    }
}

/// Delete a book
#[utoipa::path(
    post,
    path = "/delete_book/{id}",
    tag = "books",
    params(("id" = String, Path, description = "Book ID")),
    responses(
        (status = 302, description = "Redirect to `/?status=delete`, or `/?status=error&message=...`")
    )
)]
pub async fn delete_book(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    delete_and_redirect(&state, &id).await
}

/// Shared by `POST /delete_book/{id}` and `GET /?delete_id=`. A missing
/// record still reports `delete`, as existing clients expect.
async fn delete_and_redirect(state: &AppState, id: &str) -> Response {
    match state.services.catalog.delete(id).await {
        Ok(DeleteOutcome::Deleted) | Ok(DeleteOutcome::NotFound) => {
            redirect_outcome(Outcome::Delete)
        }
        Err(e) => {
            tracing::error!("Error deleting a book: {}", e);
            redirect_error(&e)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        Router,
    };
    use tower::ServiceExt;

    use crate::{
        config::AppConfig,
        create_router,
        models::book::Book,
        repository::{BookStore, MemoryBookStore, MockBookStore},
        services::Services,
        views::Views,
    };

    use super::*;

    fn app_with(store: Arc<dyn BookStore>) -> Router {
        create_router(AppState {
            config: Arc::new(AppConfig::default()),
            services: Arc::new(Services::new(store)),
            views: Arc::new(Views::new().unwrap()),
        })
    }

    async fn get(app: &Router, uri: &str) -> Response {
        app.clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn post_form(app: &Router, uri: &str, body: &str) -> Response {
        app.clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    fn location(response: &Response) -> String {
        response.headers()[header::LOCATION].to_str().unwrap().to_string()
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn create_then_list_shows_message_and_record() {
        let store = Arc::new(MemoryBookStore::new());
        let app = app_with(store.clone());

        let response = post_form(&app, "/store_book", "title=Dune&author=Herbert").await;
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location(&response), "/?status=create");

        let response = get(&app, "/?status=create").await;
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("📖 Book added successfully!"));
        assert!(html.contains("<td>Dune</td><td>Herbert</td>"));

        let books = store.list_all().await.unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].title.as_deref(), Some("Dune"));
        assert_eq!(books[0].author.as_deref(), Some("Herbert"));
    }

    #[tokio::test]
    async fn delete_via_query_parameter_redirects_and_removes() {
        let dune = Book::new(&BookForm::new("Dune", "Herbert"));
        let store = Arc::new(MemoryBookStore::with_books(vec![dune.clone()]));
        let app = app_with(store.clone());

        let response = get(&app, &format!("/?delete_id={}", dune.id)).await;
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location(&response), "/?status=delete");

        let html = body_text(get(&app, "/?status=delete").await).await;
        assert!(html.contains("🗑️ Book deleted successfully!"));
        assert!(!html.contains("Dune"));
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_endpoint_reports_delete_even_when_missing() {
        let kept = Book::new(&BookForm::new("Emma", "Austen"));
        let store = Arc::new(MemoryBookStore::with_books(vec![kept.clone()]));
        let app = app_with(store.clone());

        let response = post_form(&app, &format!("/delete_book/{}", uuid::Uuid::new_v4()), "").await;
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location(&response), "/?status=delete");
        assert_eq!(store.list_all().await.unwrap(), vec![kept]);
    }

    #[tokio::test]
    async fn malformed_delete_identifier_redirects_with_error() {
        let app = app_with(Arc::new(MemoryBookStore::new()));

        let response = get(&app, "/?delete_id=not-an-id").await;
        assert_eq!(response.status(), StatusCode::FOUND);
        assert!(location(&response).starts_with("/?status=error&message=Malformed+identifier"));
    }

    #[tokio::test]
    async fn update_replaces_fields_and_keeps_identifier() {
        let dune = Book::new(&BookForm::new("Dune", "Herbert"));
        let store = Arc::new(MemoryBookStore::with_books(vec![dune.clone()]));
        let app = app_with(store.clone());

        let uri = format!("/update_book/{}", dune.id);
        let response = post_form(&app, &uri, "title=Dune+Messiah&author=Frank+Herbert").await;
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location(&response), "/?status=update");

        let books = store.list_all().await.unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].id, dune.id);
        assert_eq!(books[0].title.as_deref(), Some("Dune Messiah"));
        assert_eq!(books[0].author.as_deref(), Some("Frank Herbert"));
    }

    #[tokio::test]
    async fn update_of_unknown_book_still_redirects_with_update() {
        let store = Arc::new(MemoryBookStore::new());
        let app = app_with(store.clone());

        let uri = format!("/update_book/{}", uuid::Uuid::new_v4());
        let response = post_form(&app, &uri, "title=x&author=y").await;
        assert_eq!(location(&response), "/?status=update");
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn edit_id_prefills_the_form() {
        let dune = Book::new(&BookForm::new("Dune", "Herbert"));
        let app = app_with(Arc::new(MemoryBookStore::with_books(vec![dune.clone()])));

        let html = body_text(get(&app, &format!("/?edit_id={}", dune.id)).await).await;
        assert!(html.contains(&format!("action=\"/update_book/{}\"", dune.id)));
        assert!(html.contains("name=\"title\" value=\"Dune\""));
        assert!(html.contains("class=\"editing\""));
    }

    #[tokio::test]
    async fn unknown_edit_id_renders_without_edit_data() {
        let dune = Book::new(&BookForm::new("Dune", "Herbert"));
        let app = app_with(Arc::new(MemoryBookStore::with_books(vec![dune])));

        let response = get(&app, &format!("/?edit_id={}", uuid::Uuid::new_v4())).await;
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("action=\"/store_book\""));
        assert!(!html.contains("class=\"editing\""));
    }

    #[tokio::test]
    async fn error_status_shows_the_raw_message() {
        let app = app_with(Arc::new(MemoryBookStore::new()));

        let html = body_text(get(&app, "/?status=error&message=disk+full").await).await;
        assert!(html.contains("<p class=\"message\">disk full</p>"));
    }

    #[tokio::test]
    async fn store_failure_on_create_redirects_with_error() {
        let mut store = MockBookStore::new();
        store
            .expect_create()
            .returning(|_| Err(AppError::Unavailable("connection refused".into())));
        let app = app_with(Arc::new(store));

        let response = post_form(&app, "/store_book", "title=Dune&author=Herbert").await;
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            location(&response),
            "/?status=error&message=Store+unavailable%3A+connection+refused"
        );
    }

    #[tokio::test]
    async fn repeated_query_keys_render_the_page_with_a_message() {
        let dune = Book::new(&BookForm::new("Dune", "Herbert"));
        let app = app_with(Arc::new(MemoryBookStore::with_books(vec![dune])));

        for uri in [
            "/?status=create&status=update",
            "/?message=a&message=b",
            "/?edit_id=x&edit_id=y",
        ] {
            let response = get(&app, uri).await;
            assert_eq!(response.status(), StatusCode::OK, "{}", uri);
            let html = body_text(response).await;
            assert!(html.contains("Failed to deserialize query string"), "{}", uri);
            assert!(html.contains("<td>Dune</td><td>Herbert</td>"), "{}", uri);
        }
    }

    #[tokio::test]
    async fn list_failure_renders_error_state_instead_of_redirecting() {
        let mut store = MockBookStore::new();
        store
            .expect_list_all()
            .returning(|| Err(AppError::Unavailable("connection refused".into())));
        let app = app_with(Arc::new(store));

        let response = get(&app, "/").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(header::LOCATION).is_none());
        let html = body_text(response).await;
        assert!(html.contains("message error"));
        assert!(html.contains("connection refused"));
    }

    #[tokio::test]
    async fn undecodable_form_redirects_with_error() {
        let app = app_with(Arc::new(MemoryBookStore::new()));

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/store_book")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FOUND);
        assert!(location(&response).starts_with("/?status=error&message="));
    }
}
