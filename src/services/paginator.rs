use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};
use crate::domain::tokens::tokenize;
use crate::ports::extractor::FieldExtractor;
use crate::ports::fetcher::PageFetcher;
use crate::services::counters::CrawlCounters;
use crate::shared::config::Config;
use crate::shared::error::GitcrawlError;
use crate::shared::result::Result;

/// 分页抓取器 - 逐页抓取并拼接各页条目
///
/// 同时负责单页抓取，所有请求共享同一个并发上限。
pub struct PaginatedCollector {
    fetcher: Arc<dyn PageFetcher>,
    extractor: Arc<dyn FieldExtractor>,
    counters: Arc<CrawlCounters>,
    permits: Semaphore,
    base_url: String,
    max_pages: usize,
    progress_interval: usize,
}

impl PaginatedCollector {
    pub fn new(
        config: &Config,
        fetcher: Arc<dyn PageFetcher>,
        extractor: Arc<dyn FieldExtractor>,
        counters: Arc<CrawlCounters>,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            counters,
            permits: Semaphore::new(config.crawl.workers),
            base_url: config.source.base_url.trim_end_matches('/').to_string(),
            max_pages: config.crawl.max_pages,
            progress_interval: config.markers.progress_interval,
        }
    }

    pub fn extractor(&self) -> &dyn FieldExtractor {
        self.extractor.as_ref()
    }

    pub fn counters(&self) -> &CrawlCounters {
        &self.counters
    }

    /// 拼接来源地址与路径段
    pub fn url(&self, segments: &[&str]) -> String {
        let mut url = self.base_url.clone();
        for segment in segments {
            url.push('/');
            url.push_str(segment.trim_matches('/'));
        }
        url
    }

    /// 抓取单个页面，非成功状态码视为失败
    pub async fn fetch_page(&self, url: &str, query: &[(String, String)]) -> Result<String> {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|e| GitcrawlError::Other(e.into()))?;

        let page = self.fetcher.fetch(url, query).await?;
        self.counters.page_fetched();

        if !page.is_success() {
            return Err(GitcrawlError::fetch(with_query(url, query), page.status));
        }
        Ok(page.body)
    }

    /// 从第 1 页开始抓取，直到没有可用的下一页或达到页数上限。
    ///
    /// `extract` 从每页的 token 中取出条目；任何一页失败则整体失败。
    pub async fn collect<T, F>(
        &self,
        url: &str,
        params: &[(String, String)],
        mut extract: F,
    ) -> Result<Vec<T>>
    where
        F: FnMut(&[&str]) -> Vec<T>,
    {
        let mut items = Vec::new();
        let mut page = 1usize;

        loop {
            let mut query = params.to_vec();
            query.push(("page".to_string(), page.to_string()));

            let body = self.fetch_page(url, &query).await?;
            let tokens = tokenize(&body);
            let page_items = extract(&tokens);
            debug!("Page {} of {}: {} items", page, url, page_items.len());
            items.extend(page_items);

            if page % self.progress_interval == 0 {
                info!("Fetched {} pages from {} ({} items so far)", page, url, items.len());
            }

            if !self.extractor.has_next_page(&tokens) {
                break;
            }
            if page >= self.max_pages {
                warn!(
                    "Stopping {} at page limit {}; later pages are not collected",
                    url, self.max_pages
                );
                break;
            }
            page += 1;
        }

        Ok(items)
    }
}

fn with_query(url: &str, query: &[(String, String)]) -> String {
    if query.is_empty() {
        return url.to_string();
    }
    let params: Vec<String> = query.iter().map(|(k, v)| format!("{k}={v}")).collect();
    format!("{}?{}", url, params.join("&"))
}
