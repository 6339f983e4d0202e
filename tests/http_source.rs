//! HTTP catalog source against an in-process server.

use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use catalog_grid::domain::{ErrorKind, RecordId};
use catalog_grid::storage::RecordStore;
use catalog_grid::sync::{load, CatalogSource, HttpCatalogSource};
use serde_json::json;
use std::time::Duration;

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn catalog_router() -> Router {
    Router::new()
        .route(
            "/products",
            get(|| async {
                Json(json!({
                    "products": [
                        {"id": 1, "title": "Essence Mascara", "price": 9.99, "category": "beauty", "brand": "Essence", "rating": 4.94},
                        {"id": 2, "title": "Eyeshadow Palette", "price": 19.99, "category": "beauty"},
                        {"id": 3, "title": "Apple", "price": 1.99, "category": "groceries", "brand": ""}
                    ],
                    "total": 194,
                    "skip": 0,
                    "limit": 30
                }))
            }),
        )
        .route(
            "/broken",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        )
        .route("/garbage", get(|| async { "<html>not json</html>" }))
        .route(
            "/duplicates",
            get(|| async {
                Json(json!({
                    "products": [
                        {"id": 7, "title": "A", "price": 1.0},
                        {"id": 7, "title": "B", "price": 2.0}
                    ]
                }))
            }),
        )
}

fn source(base: &str, path: &str) -> HttpCatalogSource {
    HttpCatalogSource::new(format!("{base}{path}"), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn fetches_records_in_source_order() {
    let base = serve(catalog_router()).await;

    let records = source(&base, "/products").fetch().await.unwrap();

    let ids: Vec<u64> = records.iter().map(|r| r.id.0).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(records[0].brand, "Essence");
    assert_eq!(records[1].brand, "");
    assert!((records[2].price - 1.99).abs() < f64::EPSILON);
}

#[tokio::test]
async fn load_fills_the_store() {
    let base = serve(catalog_router()).await;
    let mut store = RecordStore::new();

    let count = load(&source(&base, "/products"), &mut store).await.unwrap();

    assert_eq!(count, 3);
    assert_eq!(store.len(), 3);
    assert_eq!(store.get(RecordId(2)).map(|r| r.title.as_str()), Some("Eyeshadow Palette"));
}

#[tokio::test]
async fn error_status_is_source_unavailable() {
    let base = serve(catalog_router()).await;

    let err = source(&base, "/broken").fetch().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::SourceUnavailable);
    assert!(err.to_string().contains("500"));
}

#[tokio::test]
async fn malformed_body_is_source_unavailable() {
    let base = serve(catalog_router()).await;

    let err = source(&base, "/garbage").fetch().await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::SourceUnavailable);
}

#[tokio::test]
async fn duplicate_ids_leave_store_untouched() {
    let base = serve(catalog_router()).await;
    let mut store = RecordStore::new();

    let err = load(&source(&base, "/duplicates"), &mut store).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::SourceUnavailable);
    assert!(store.is_empty());
}

#[tokio::test]
async fn unreachable_host_is_source_unavailable() {
    // Bind then drop to get a port nothing listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let source = HttpCatalogSource::new(format!("http://{addr}/products"), Duration::from_secs(2)).unwrap();
    let mut store = RecordStore::new();

    let err = load(&source, &mut store).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::SourceUnavailable);
    assert_eq!(store.revision(), 0);
}
