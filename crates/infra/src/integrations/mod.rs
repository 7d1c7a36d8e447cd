//! External service integrations

pub mod ollama;
