use std::sync::atomic::{AtomicUsize, Ordering};
use crate::domain::entities::CrawlStats;

/// 抓取过程中的计数，多个任务共享
#[derive(Debug, Default)]
pub struct CrawlCounters {
    pages_fetched: AtomicUsize,
    extraction_misses: AtomicUsize,
}

impl CrawlCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page_fetched(&self) {
        self.pages_fetched.fetch_add(1, Ordering::Relaxed);
    }

    pub fn extraction_miss(&self) {
        self.extraction_misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> CrawlStats {
        CrawlStats {
            pages_fetched: self.pages_fetched.load(Ordering::Relaxed),
            extraction_misses: self.extraction_misses.load(Ordering::Relaxed),
        }
    }
}
