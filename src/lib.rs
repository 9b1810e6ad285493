//! # llm-cache
//!
//! Drains a queue of untranslated game text, translates every line through a
//! local chat-completion service and stores the results in a SQLite cache
//! keyed by source text.
//!
//! ## Modules
//!
//! - `core` - error type, run summary and output helpers
//! - `config` - worker configuration and its defaults
//! - `env` - typed environment variable overrides
//! - `logging` - tagged tracing subscriber
//! - `queue` - the pending-line file (drain and enqueue)
//! - `network` - the translation service client
//! - `storage` - the translation cache
//! - `inspector` - read-only cache report
//! - `worker` - one full drain → translate → save run

pub mod config;
pub mod core;
pub mod env;
pub mod inspector;
pub mod logging;
pub mod network;
pub mod queue;
pub mod storage;
pub mod worker;

// Re-export commonly used items for convenience
pub use config::WorkerConfig;
pub use core::{RunSummary, WorkerError, WorkerResult};
pub use network::{Translate, Translator};
pub use queue::PendingQueue;
pub use storage::{CacheStore, TranslationRecord};
pub use worker::Worker;
