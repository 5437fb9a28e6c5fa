//! End-to-end catalog flows: HTTP client, orchestration, store and views

use bookshelf::{
    config::AppConfig,
    models::{BookField, FilterOptions, YearRange},
    query::BookFilter,
    AppError, AppState,
};

use crate::common::{api_config, record, unreachable_url, FakeBackend};

async fn app(backend: FakeBackend) -> AppState {
    let url = backend.spawn().await;
    let config = AppConfig {
        api: api_config(&url),
        ..AppConfig::default()
    };
    AppState::new(config).expect("Failed to build app state")
}

#[tokio::test]
async fn test_search_scenario() {
    let state = app(FakeBackend::with_books(vec![record(
        "1",
        "Dune",
        "Frank Herbert",
        1965,
        "Science Fiction",
    )]))
    .await;
    state
        .services
        .catalog
        .fetch_books()
        .await
        .expect("Failed to fetch books");

    let view = state.filtered_view(BookFilter::default());
    assert_eq!(view.books().len(), 1);

    view.set_query("dune");
    assert_eq!(view.books().len(), 1);
    view.set_query("herbert");
    assert_eq!(view.books()[0].id, "1");
    view.set_query("asimov");
    assert!(view.books().is_empty());
}

#[tokio::test]
async fn test_year_range_scenario() {
    let state = app(FakeBackend::with_books(vec![
        record("1", "Dune", "Frank Herbert", 1965, "Science Fiction"),
        record("2", "Anathem", "Neal Stephenson", 2008, "Science Fiction"),
        record("3", "The Testaments", "Margaret Atwood", 2020, "Fiction"),
    ]))
    .await;
    state
        .services
        .catalog
        .fetch_books()
        .await
        .expect("Failed to fetch books");

    let view = state.filtered_view(BookFilter::new(
        "",
        FilterOptions {
            genre: None,
            year_range: Some(YearRange {
                min: Some(2000),
                max: Some(2024),
            }),
        },
    ));
    let years: Vec<i32> = view.books().iter().map(|b| b.year).collect();
    assert_eq!(years, vec![2008, 2020]);
    assert_eq!(view.total_count(), 3);
}

#[tokio::test]
async fn test_form_submit_appends_and_view_follows() {
    let backend = FakeBackend::with_books(vec![record(
        "1",
        "Dune",
        "Frank Herbert",
        1965,
        "Science Fiction",
    )]);
    let state = app(backend.clone()).await;
    let catalog = &state.services.catalog;
    catalog.fetch_books().await.expect("Failed to fetch books");

    let mut view = state.filtered_view(BookFilter::new("orwell", FilterOptions::default()));
    assert!(view.books().is_empty());

    let mut form = state.new_form();
    form.set_field(BookField::Title, "1984");
    form.set_field(BookField::Author, "George Orwell");
    form.set_field(BookField::Year, "1949");
    form.set_field(BookField::Type, "Fiction");
    let created = form.submit(catalog).await.expect("Failed to submit");

    let books = view.changed().await.expect("Store dropped");
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].id, created.id);

    let ids: Vec<String> = state.store.books().into_iter().map(|b| b.id).collect();
    assert_eq!(ids, vec!["1".to_string(), created.id.clone()]);
    assert!(backend.stored(&created.id).is_some());
}

#[tokio::test]
async fn test_invalid_form_never_reaches_backend() {
    let backend = FakeBackend::default();
    let state = app(backend.clone()).await;

    let mut form = state.new_form();
    form.set_field(BookField::Title, "1984");
    form.set_field(BookField::Author, "George Orwell");
    form.set_field(BookField::Year, "1949");
    form.set_field(BookField::Type, "Fiction");
    form.set_field(BookField::Pages, "0");

    let err = form
        .submit(&state.services.catalog)
        .await
        .expect_err("Form should be rejected");

    match err {
        AppError::Validation(errors) => {
            assert_eq!(errors.get("pages"), Some("Pages must be a positive number"));
            assert_eq!(errors.len(), 1);
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(backend.books.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_edit_flow_updates_in_place() {
    let state = app(FakeBackend::with_books(vec![
        record("1", "Dune", "Frank Herbert", 1965, "Science Fiction"),
        record("2", "Emma", "Jane Austen", 1815, "Romance"),
    ]))
    .await;
    let catalog = &state.services.catalog;
    catalog.fetch_books().await.expect("Failed to fetch books");

    let existing = catalog
        .fetch_book_by_id("2")
        .await
        .expect("Failed to fetch book");
    assert_eq!(state.store.selected_book().map(|b| b.id), Some("2".to_string()));

    let mut form = state.edit_form(&existing);
    form.set_field(BookField::Publisher, "John Murray");
    form.submit(catalog).await.expect("Failed to submit");

    let books = state.store.books();
    assert_eq!(books.len(), 2);
    assert_eq!(books[1].id, "2");
    assert_eq!(books[1].publisher.as_deref(), Some("John Murray"));
}

#[tokio::test]
async fn test_remote_failure_is_recorded_and_resignaled() {
    let state = app(FakeBackend::with_books(vec![record(
        "1",
        "Dune",
        "Frank Herbert",
        1965,
        "Science Fiction",
    )]))
    .await;
    let catalog = &state.services.catalog;
    catalog.fetch_books().await.expect("Failed to fetch books");

    let err = catalog
        .delete_book("missing")
        .await
        .expect_err("Delete should fail");

    assert_eq!(err.status(), Some(404));
    let snapshot = state.store.snapshot();
    assert_eq!(snapshot.error.as_deref(), Some("Book not found"));
    assert!(!snapshot.loading);
    assert_eq!(snapshot.books.len(), 1);
}

#[tokio::test]
async fn test_network_failure_uses_fallback_message() {
    let url = unreachable_url().await;
    let state = AppState::new(AppConfig {
        api: api_config(&url),
        ..AppConfig::default()
    })
    .expect("Failed to build app state");

    let err = state
        .services
        .catalog
        .fetch_books()
        .await
        .expect_err("Fetch should fail");

    assert_eq!(err.status(), None);
    assert_eq!(state.store.error().as_deref(), Some("Failed to fetch books"));
    assert!(!state.store.is_loading());
}

#[tokio::test]
async fn test_health_through_services() {
    let state = app(FakeBackend::default()).await;
    let health = state.services.health().await.expect("Health check failed");
    assert!(health.is_ok());
}
