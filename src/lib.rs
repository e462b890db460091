// Library interface for the translate-search service
// Exposes modules for the server binary and integration tests

pub mod config;
pub mod error;
pub mod handler;
pub mod openai;
pub mod pipeline;
pub mod retry;
pub mod search;
pub mod security;
pub mod translation;
