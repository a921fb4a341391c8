// src/handlers/upload.rs

use axum::{
    Json,
    extract::{Multipart, State},
    response::IntoResponse,
};
use serde_json::json;

use crate::{config::Config, error::AppError, utils::media};

/// Accepts a single multipart image (field name: 'image') and passes the
/// bytes through to the media host. Only the returned URL ever reaches the
/// database, attached to a question or form header by the editor.
pub async fn upload_image(
    State(config): State<Config>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("image") {
            continue;
        }

        let filename = field.file_name().unwrap_or("upload").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        let uploaded = media::upload_image(&config, bytes.to_vec(), filename).await?;

        return Ok(Json(json!({
            "url": uploaded.url,
            "public_id": uploaded.public_id,
        })));
    }

    Err(AppError::BadRequest("No file uploaded".to_string()))
}
