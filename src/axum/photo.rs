//! The photo actions: list, add, delete, plus direct record and raw image
//! reads. All input validation happens here, before anything touches the
//! store.

use axum::extract::Path;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json};
use serde_json::json;

use crate::{util, Photo, PhotoId, PhotoUpload, Result};

use super::{DbExt, Router};

pub fn router() -> Router {
    Router::new()
        .route("/api/photos", get(photos).post(add_photo))
        .route("/api/photos/:id", get(photo).delete(delete_photo))
        .route("/photo/:id", get(photo_raw))
}

/// Lists every stored photo. An empty store answers with an empty list.
pub async fn photos(Extension(db): DbExt) -> Result<impl IntoResponse> {
    let photos = Photo::collection(&db)?;
    Ok(Json(photos))
}

/// Validates the upload and stores it, answering with the assigned id.
pub async fn add_photo(
    Extension(db): DbExt,
    Json(upload): Json<PhotoUpload>,
) -> Result<impl IntoResponse> {
    upload.validate()?;

    let photo = Photo::new(upload.name, upload.r#type, upload.data);
    photo.store(&db)?;

    tracing::debug!("stored photo {} ({})", photo.id, photo.name);
    Ok(Json(json!({ "id": photo.id })))
}

pub async fn photo(Path(id): Path<PhotoId>, Extension(db): DbExt) -> Result<impl IntoResponse> {
    let photo = Photo::get(id, &db)?;
    Ok(Json(photo))
}

/// Deletes by id. An id that isn't there still answers 200, per the
/// collection's remove policy.
pub async fn delete_photo(
    Path(id): Path<PhotoId>,
    Extension(db): DbExt,
) -> Result<impl IntoResponse> {
    Photo::remove(id, &db)?;
    Ok(())
}

/// Serves the decoded image bytes under the stored content type, for direct
/// use in `img` tags. Only records whose payload is a well-formed data url
/// can be served this way.
pub async fn photo_raw(
    Path(id): Path<PhotoId>,
    Extension(db): DbExt,
) -> Result<impl IntoResponse> {
    let photo = Photo::get(id, &db)?;
    let (_, bytes) = util::decode_data_url(&photo.data)?;
    Ok((
        axum::response::AppendHeaders([(axum::http::header::CONTENT_TYPE, photo.r#type)]),
        bytes,
    ))
}
