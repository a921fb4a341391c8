// src/handlers/mod.rs

pub mod auth;
pub mod form;
pub mod response;
pub mod upload;
