// src/utils/media.rs

use serde::Deserialize;

use crate::{config::Config, error::AppError};

/// What the media host hands back for a stored image. Only `url` is ever
/// persisted on a question or form header; the bytes are never interpreted
/// by this service.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadedImage {
    pub url: String,
    pub public_id: String,
}

#[derive(Debug, Deserialize)]
struct MediaHostResponse {
    secure_url: String,
    public_id: String,
}

/// Delegates an image blob to the configured media host (cloudinary-style
/// unsigned upload). Fire-and-forget: a failure is surfaced to the caller
/// immediately, with no retry.
pub async fn upload_image(
    config: &Config,
    bytes: Vec<u8>,
    filename: String,
) -> Result<UploadedImage, AppError> {
    if config.media_upload_url.is_empty() {
        return Err(AppError::InternalServerError(
            "MEDIA_UPLOAD_URL is not configured".to_string(),
        ));
    }

    let part = reqwest::multipart::Part::bytes(bytes).file_name(filename);
    let body = reqwest::multipart::Form::new()
        .text("upload_preset", config.media_upload_preset.clone())
        .text("folder", "form-builder")
        .part("file", part);

    let response = reqwest::Client::new()
        .post(&config.media_upload_url)
        .multipart(body)
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        tracing::error!("Media host rejected upload with status {}", status);
        return Err(AppError::InternalServerError(format!(
            "Media upload failed with status {}",
            status
        )));
    }

    let uploaded: MediaHostResponse = response.json().await?;

    Ok(UploadedImage {
        url: uploaded.secure_url,
        public_id: uploaded.public_id,
    })
}
