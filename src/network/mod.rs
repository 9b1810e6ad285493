//! # Network module
//!
//! Client for the local chat-completion service that produces translations.
//!
//! - `types` - request and response bodies of the chat endpoint
//! - `client` - the blocking translator and the `Translate` seam

pub mod client;
pub mod types;

// Re-export commonly used items for convenience
pub use client::{Translate, Translator};
pub use types::{ChatMessage, ChatRequest, ChatResponse};
