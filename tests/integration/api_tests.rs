//! End-to-end tests against a running server
//!
//! Start the server (any backend) on port 3000, then run:
//! `cargo test --test integration -- --ignored`

use reqwest::{redirect::Policy, Client, StatusCode};

const BASE_URL: &str = "http://localhost:3000";

/// Client that leaves redirects for the test to inspect
fn client() -> Client {
    Client::builder()
        .redirect(Policy::none())
        .build()
        .expect("Failed to build client")
}

fn location(response: &reqwest::Response) -> String {
    response
        .headers()
        .get("location")
        .expect("No location header")
        .to_str()
        .expect("Location is not ASCII")
        .to_string()
}

/// Find the id of the row showing `title` on the catalog page
fn book_id_for(html: &str, title: &str) -> Option<String> {
    let row = html
        .lines()
        .find(|line| line.contains(&format!("<td>{}</td>", title)))?;
    let start = row.find("edit_id=")? + "edit_id=".len();
    let end = row[start..].find('"')? + start;
    Some(row[start..end].to_string())
}

async fn catalog_page(client: &Client, query: &str) -> String {
    client
        .get(format!("{}/{}", BASE_URL, query))
        .send()
        .await
        .expect("Failed to send request")
        .text()
        .await
        .expect("Failed to read body")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let response = client()
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_readiness() {
    let response = client()
        .get(format!("{}/ready", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore]
async fn test_create_list_and_delete_book() {
    let client = client();
    let title = format!("Dune {}", uuid::Uuid::new_v4());

    // Create
    let response = client
        .post(format!("{}/store_book", BASE_URL))
        .form(&[("title", title.as_str()), ("author", "Herbert")])
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/?status=create");

    let html = catalog_page(&client, "?status=create").await;
    assert!(html.contains("📖 Book added successfully!"));
    let id = book_id_for(&html, &title).expect("Created book not listed");

    // Delete through the compatibility query parameter
    let response = client
        .get(format!("{}/?delete_id={}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/?status=delete");

    let html = catalog_page(&client, "?status=delete").await;
    assert!(html.contains("🗑️ Book deleted successfully!"));
    assert!(book_id_for(&html, &title).is_none());
}

#[tokio::test]
#[ignore]
async fn test_update_book_keeps_identifier() {
    let client = client();
    let title = format!("Emma {}", uuid::Uuid::new_v4());
    let renamed = format!("{} (revised)", title);

    client
        .post(format!("{}/store_book", BASE_URL))
        .form(&[("title", title.as_str()), ("author", "Austen")])
        .send()
        .await
        .expect("Failed to send request");
    let id = book_id_for(&catalog_page(&client, "").await, &title).expect("Book not listed");

    let response = client
        .post(format!("{}/update_book/{}", BASE_URL, id))
        .form(&[("title", renamed.as_str()), ("author", "Jane Austen")])
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/?status=update");

    let html = catalog_page(&client, "").await;
    assert_eq!(book_id_for(&html, &renamed).as_deref(), Some(id.as_str()));

    // Cleanup
    let _ = client
        .post(format!("{}/delete_book/{}", BASE_URL, id))
        .send()
        .await;
}

#[tokio::test]
#[ignore]
async fn test_malformed_identifier_redirects_with_error() {
    let response = client()
        .post(format!("{}/update_book/not-an-id", BASE_URL))
        .form(&[("title", "x"), ("author", "y")])
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::FOUND);
    assert!(location(&response).starts_with("/?status=error&message="));
}
