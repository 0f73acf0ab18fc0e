//! HTTP route handlers

pub mod auth;
pub mod guardian;
pub mod learners;
pub mod settings;
pub mod study;
pub mod words;
