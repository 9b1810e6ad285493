//! One worker run: drain the queue, translate every line, save the results

use std::thread;
use std::time::Duration;

use tracing::info;

use crate::config::WorkerConfig;
use crate::core::{RunSummary, WorkerResult};
use crate::network::Translate;
use crate::queue::PendingQueue;
use crate::storage::{CacheStore, TranslationRecord};

pub struct Worker<T> {
    config: WorkerConfig,
    translator: T,
}

impl<T: Translate> Worker<T> {
    pub fn new(config: WorkerConfig, translator: T) -> Self {
        Self { config, translator }
    }

    /// Runs to completion over whatever is pending right now
    ///
    /// Lines are translated strictly in queue order with a fixed pause after
    /// each request. Successful pairs are written in one transaction at the
    /// end; the store is not opened at all when there is nothing to do.
    pub fn run(&self) -> WorkerResult<RunSummary> {
        info!("Starting. Data dir: {}", self.config.data_dir.display());
        info!("Using model: {}", self.config.model);

        let queue = PendingQueue::new(self.config.pending_file());
        let pending = queue.read_pending()?;
        if pending.is_empty() {
            info!("Nothing to translate.");
            return Ok(RunSummary::default());
        }

        info!("{} new lines to translate.", pending.len());
        let mut store = CacheStore::ensure(self.config.cache_file())?;

        let translated = self.translate_all(&pending);

        let saved = store.upsert_all(&translated)?;
        info!("{} translations saved to cache.", saved);

        Ok(RunSummary {
            pending: pending.len(),
            translated: saved,
            failed: pending.len() - translated.len(),
        })
    }

    fn translate_all(&self, pending: &[String]) -> Vec<TranslationRecord> {
        let mut translated = Vec::with_capacity(pending.len());
        for line in pending {
            info!("Translating: '{}'", line);
            if let Some(result) = self.translator.translate(line) {
                translated.push(TranslationRecord::new(line.as_str(), result));
            }
            pause(self.config.throttle);
        }
        translated
    }
}

fn pause(throttle: Duration) {
    if !throttle.is_zero() {
        thread::sleep(throttle);
    }
}
