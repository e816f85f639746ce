//! The http surface exercised without a listening socket: handlers called
//! directly as functions, plus one pass through the assembled router.

#![cfg(feature = "axum")]

use std::sync::atomic::AtomicU64;
use std::sync::Arc;

use axum::extract::Path;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use tower::ServiceExt;

use photobin::axum::photo::{add_photo, delete_photo, photo, photos};
use photobin::{Config, Database, Photo, PhotoId, PhotoUpload};

fn temp_db() -> (tempfile::TempDir, Arc<Database>) {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::new(dir.path()).unwrap();
    (dir, Arc::new(db))
}

fn upload(name: &str, r#type: &str, data: &str) -> PhotoUpload {
    PhotoUpload {
        name: name.to_string(),
        r#type: r#type.to_string(),
        data: data.to_string(),
    }
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn add_then_list_roundtrip() {
    let (_dir, db) = temp_db();

    let response = add_photo(
        Extension(db.clone()),
        Json(upload("a.png", "image/png", "X")),
    )
    .await
    .into_response();
    assert_eq!(response.status(), 200);

    let body = body_json(response).await;
    let id: PhotoId = body["id"].as_str().unwrap().parse().unwrap();
    assert!(!id.is_nil());

    let response = photos(Extension(db.clone())).await.into_response();
    assert_eq!(response.status(), 200);
    let listed: Vec<Photo> = serde_json::from_value(body_json(response).await).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, id);
    assert_eq!(listed[0].name, "a.png");
}

#[tokio::test]
async fn add_rejects_non_image_type() {
    let (_dir, db) = temp_db();

    let response = add_photo(
        Extension(db.clone()),
        Json(upload("a.txt", "text/plain", "X")),
    )
    .await
    .into_response();
    assert_eq!(response.status(), 400);

    let response = photos(Extension(db.clone())).await.into_response();
    let listed: Vec<Photo> = serde_json::from_value(body_json(response).await).unwrap();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn delete_of_absent_id_answers_ok() {
    let (_dir, db) = temp_db();

    let response = delete_photo(Path(PhotoId::new_v4()), Extension(db.clone()))
        .await
        .into_response();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn get_of_absent_id_answers_not_found() {
    let (_dir, db) = temp_db();

    let response = photo(Path(PhotoId::new_v4()), Extension(db.clone()))
        .await
        .into_response();
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn serialized_record_uses_the_type_key() {
    let (_dir, db) = temp_db();

    add_photo(
        Extension(db.clone()),
        Json(upload("a.png", "image/png", "X")),
    )
    .await
    .into_response();

    let response = photos(Extension(db.clone())).await.into_response();
    let body = body_json(response).await;
    assert_eq!(body[0]["type"], "image/png");
    assert_eq!(body[0]["name"], "a.png");
    assert_eq!(body[0]["data"], "X");
}

#[tokio::test]
async fn counter_reads_and_increments() {
    use photobin::axum::counter::{counter, increment};

    let shared = Arc::new(AtomicU64::new(0));

    let response = counter(Extension(shared.clone())).await.into_response();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(String::from_utf8(bytes.to_vec()).unwrap(), "0");

    increment(Extension(shared.clone())).await.into_response();
    let response = counter(Extension(shared.clone())).await.into_response();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(String::from_utf8(bytes.to_vec()).unwrap(), "1");
}

#[tokio::test]
async fn assembled_router_serves_the_photo_routes() {
    let (_dir, db) = temp_db();
    let config = Config::default();

    let router = photobin::axum::router(photobin::axum::Router::new(), &config)
        .layer(Extension(Arc::new(config)))
        .layer(Extension(db))
        .layer(Extension(Arc::new(AtomicU64::new(0))));

    let request = http::Request::builder()
        .uri("/api/photos")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), 200);

    let listed: Vec<Photo> = serde_json::from_value(body_json(response).await).unwrap();
    assert!(listed.is_empty());
}
