//! HTTP client tests against the fake book service

use axum::http::StatusCode;
use bookshelf::{
    api::{BookApi, HttpBookApi},
    config::ApiConfig,
    error::{ApiErrorKind, AppError, NETWORK_ERROR_MESSAGE},
    models::{BookFormData, BookQuery, NumericInput},
};
use serde_json::json;

use crate::common::{api_config, record, unreachable_url, FakeBackend};

fn seeded() -> FakeBackend {
    FakeBackend::with_books(vec![
        record("1", "Dune", "Frank Herbert", 1965, "Science Fiction"),
        record("2", "Emma", "Jane Austen", 1815, "Romance"),
    ])
}

async fn client(backend: FakeBackend) -> HttpBookApi {
    let url = backend.spawn().await;
    HttpBookApi::new(&api_config(&url)).expect("Failed to build client")
}

fn api_error(err: AppError) -> bookshelf::ApiError {
    match err {
        AppError::Api(e) => e,
        other => panic!("expected a remote error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_list_books_unwraps_and_maps() {
    let api = client(seeded()).await;

    let books = api
        .list_books(&BookQuery::default())
        .await
        .expect("Failed to list books");

    assert_eq!(books.len(), 2);
    assert_eq!(books[0].title, "Dune");
    assert_eq!(books[0].genre.as_deref(), Some("Science Fiction"));
    assert_eq!(
        books[0].cover_image_url.as_deref(),
        Some("https://covers.example.com/1.jpg")
    );
    assert_eq!(books[1].id, "2");
}

#[tokio::test]
async fn test_list_books_sends_server_side_filters() {
    let api = client(seeded()).await;

    let books = api
        .list_books(&BookQuery {
            author: Some("AUSTEN".to_string()),
            ..Default::default()
        })
        .await
        .expect("Failed to list books");
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].title, "Emma");

    let books = api
        .list_books(&BookQuery {
            year: Some(1965),
            genre: Some("Science Fiction".to_string()),
            ..Default::default()
        })
        .await
        .expect("Failed to list books");
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].id, "1");
}

#[tokio::test]
async fn test_get_book_not_found() {
    let api = client(seeded()).await;

    let err = api_error(api.get_book("missing").await.unwrap_err());

    assert_eq!(err.message, "Book not found");
    assert_eq!(err.status, Some(404));
    assert_eq!(err.kind, ApiErrorKind::Backend);
}

#[tokio::test]
async fn test_failure_without_error_field_uses_status() {
    let backend = seeded();
    *backend.fail_list_with.lock().unwrap() = Some(StatusCode::SERVICE_UNAVAILABLE);
    let api = client(backend).await;

    let err = api_error(api.list_books(&BookQuery::default()).await.unwrap_err());

    assert_eq!(err.message, "HTTP error! status: 503");
    assert_eq!(err.status, Some(503));
}

#[tokio::test]
async fn test_create_book_sends_backend_shape() {
    let backend = FakeBackend::default();
    let api = client(backend.clone()).await;

    let form = BookFormData {
        title: "1984".to_string(),
        author: "George Orwell".to_string(),
        year: NumericInput::from("1949"),
        isbn: Some(String::new()),
        genre: Some("Fiction".to_string()),
        pages: NumericInput::Number(328),
        publisher: Some("Plume".to_string()),
        cover_image_url: Some("https://example.com/1984.jpg".to_string()),
        ..Default::default()
    };
    let created = api.create_book(&form).await.expect("Failed to create book");

    assert_eq!(created.id, "new-1");
    assert_eq!(created.year, 1949);
    assert_eq!(created.pages, Some(328));
    assert_eq!(created.created_at.as_deref(), Some("2024-06-01T12:00:00Z"));

    let stored = backend.stored("new-1").expect("Book not stored");
    assert_eq!(stored["cover_image_url"], "https://example.com/1984.jpg");
    assert_eq!(stored["type"], "Fiction");
    assert!(stored.get("isbn").is_none());
    assert!(stored.get("coverImageURL").is_none());
}

#[tokio::test]
async fn test_create_rejects_unparsable_year_before_sending() {
    let backend = FakeBackend::default();
    let api = client(backend.clone()).await;

    let form = BookFormData {
        title: "1984".to_string(),
        author: "George Orwell".to_string(),
        year: NumericInput::from("nineteen"),
        ..Default::default()
    };
    let err = api.create_book(&form).await.unwrap_err();

    assert!(matches!(err, AppError::InvalidInput { field: "year", .. }));
    assert!(backend.books.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_update_book() {
    let api = client(seeded()).await;

    let form = BookFormData {
        title: "Dune".to_string(),
        author: "Frank Herbert".to_string(),
        year: NumericInput::Number(1965),
        genre: Some("Science Fiction".to_string()),
        pages: NumericInput::Number(412),
        ..Default::default()
    };
    let updated = api.update_book("1", &form).await.expect("Failed to update");

    assert_eq!(updated.id, "1");
    assert_eq!(updated.pages, Some(412));
    assert_eq!(updated.updated_at.as_deref(), Some("2024-06-02T08:00:00Z"));
}

#[tokio::test]
async fn test_delete_book() {
    let api = client(seeded()).await;

    api.delete_book("1").await.expect("Failed to delete");

    let err = api_error(api.get_book("1").await.unwrap_err());
    assert_eq!(err.status, Some(404));

    let err = api_error(api.delete_book("1").await.unwrap_err());
    assert_eq!(err.message, "Book not found");
}

#[tokio::test]
async fn test_structurally_invalid_record_is_rejected() {
    let backend = FakeBackend::with_books(vec![json!({ "id": "broken", "year": 1999 })]);
    let api = client(backend).await;

    let err = api_error(api.get_book("broken").await.unwrap_err());

    assert_eq!(err.kind, ApiErrorKind::InvalidPayload);
    assert_eq!(err.status, Some(200));
}

#[tokio::test]
async fn test_network_error_has_no_status() {
    let url = unreachable_url().await;
    let api = HttpBookApi::new(&api_config(&url)).expect("Failed to build client");

    let err = api_error(api.list_books(&BookQuery::default()).await.unwrap_err());

    assert_eq!(err.message, NETWORK_ERROR_MESSAGE);
    assert_eq!(err.status, None);
    assert_eq!(err.kind, ApiErrorKind::Network);
}

#[tokio::test]
async fn test_api_key_is_sent_as_bearer_token() {
    let backend = seeded();
    let url = backend.clone().spawn().await;
    let api = HttpBookApi::new(&ApiConfig {
        api_key: Some("s3cret".to_string()),
        ..api_config(&url)
    })
    .expect("Failed to build client");

    api.list_books(&BookQuery::default())
        .await
        .expect("Failed to list books");

    assert_eq!(
        backend.last_authorization.lock().unwrap().as_deref(),
        Some("Bearer s3cret")
    );
}

#[tokio::test]
async fn test_health_check() {
    let api = client(FakeBackend::default()).await;

    let health = api.health().await.expect("Health check failed");

    assert!(health.is_ok());
    assert_eq!(health.status, "ok");
}

#[tokio::test]
async fn test_ids_with_reserved_characters_reach_their_record() {
    let ids = ["isbn/978", "a?b", "a#b"];
    let backend = FakeBackend::with_books(
        ids.iter()
            .map(|id| record(id, "Dune", "Frank Herbert", 1965, "Science Fiction"))
            .collect(),
    );
    let api = client(backend.clone()).await;

    for id in ids {
        let book = api.get_book(id).await.expect("Failed to fetch book");
        assert_eq!(book.id, id);
    }

    let form = BookFormData {
        title: "Dune".to_string(),
        author: "Frank Herbert".to_string(),
        year: NumericInput::Number(1965),
        pages: NumericInput::Number(412),
        ..Default::default()
    };
    let updated = api
        .update_book("isbn/978", &form)
        .await
        .expect("Failed to update");
    assert_eq!(updated.id, "isbn/978");
    assert_eq!(updated.pages, Some(412));

    api.delete_book("a?b").await.expect("Failed to delete");
    assert!(backend.stored("a?b").is_none());
    assert!(backend.stored("a#b").is_some());
    assert!(backend.stored("isbn/978").is_some());
}
