// src/models/mod.rs

pub mod form;
pub mod response;
pub mod user;
