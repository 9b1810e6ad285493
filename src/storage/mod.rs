//! Durable storage for finished translations

pub mod cache;

pub use cache::{CacheStore, TranslationRecord};
