use std::sync::Arc;
use tracing::{debug, warn};
use crate::ports::extractor::{Field, Scope};
use crate::services::paginator::PaginatedCollector;
use crate::shared::result::Result;

/// 仓库列表服务
pub struct RepositoryLister {
    collector: Arc<PaginatedCollector>,
}

impl RepositoryLister {
    pub fn new(collector: Arc<PaginatedCollector>) -> Self {
        Self { collector }
    }

    /// 列出用户的全部仓库，按页面出现顺序
    pub async fn list_repositories(&self, username: &str) -> Result<Vec<String>> {
        let url = self.collector.url(&[username]);
        let params = vec![("tab".to_string(), "repositories".to_string())];
        let extractor = self.collector.extractor();
        let counters = self.collector.counters();
        let scope = Scope::user(username);

        let repos = self
            .collector
            .collect(&url, &params, |tokens| {
                extractor
                    .anchors(Field::Repository, tokens, &scope)
                    .into_iter()
                    .filter_map(|at| {
                        let name = extractor.extract(Field::Repository, tokens, at, &scope);
                        if name.is_none() {
                            warn!("Repository marker at token {} has no name", at);
                            counters.extraction_miss();
                        }
                        name
                    })
                    .collect()
            })
            .await?;

        debug!("Listed {} repositories for {}", repos.len(), username);
        Ok(repos)
    }
}
