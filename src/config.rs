// src/config.rs

use dotenvy::dotenv;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    /// Token lifetime in seconds.
    pub jwt_expiration: u64,
    pub rust_log: String,
    /// Media host upload endpoint (cloudinary-style unsigned upload).
    pub media_upload_url: String,
    pub media_upload_preset: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET must be set");

        let jwt_expiration = env::var("JWT_EXPIRATION")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(86400);

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let media_upload_url = env::var("MEDIA_UPLOAD_URL").unwrap_or_default();
        let media_upload_preset = env::var("MEDIA_UPLOAD_PRESET").unwrap_or_default();

        Self {
            database_url,
            jwt_secret,
            jwt_expiration,
            rust_log,
            media_upload_url,
            media_upload_preset,
        }
    }
}
