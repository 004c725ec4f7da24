use std::time::{Duration, Instant};
use async_trait::async_trait;
use crate::ports::fetcher::{Page, PageFetcher};
use crate::shared::config::SourceConfig;
use crate::shared::result::Result;

/// 页面抓取实现（基于 reqwest）
pub struct ReqwestFetcher {
    client: reqwest::Client,
}

impl ReqwestFetcher {
    pub fn new(config: &SourceConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for ReqwestFetcher {
    async fn fetch(&self, url: &str, query: &[(String, String)]) -> Result<Page> {
        tracing::debug!("[http:fetch] >>> GET {} {:?}", url, query);
        let start = Instant::now();

        let response = self.client.get(url).query(query).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        tracing::debug!(
            "[http:fetch] <<< {} ({}ms, {} bytes)",
            status,
            start.elapsed().as_millis(),
            body.len()
        );

        Ok(Page::new(status, body))
    }
}
