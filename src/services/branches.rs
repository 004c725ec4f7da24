use std::sync::Arc;
use tracing::{debug, warn};
use crate::domain::tokens::tokenize;
use crate::ports::extractor::{Field, Scope};
use crate::services::paginator::PaginatedCollector;
use crate::shared::result::Result;

/// 分支列表服务
pub struct BranchLister {
    collector: Arc<PaginatedCollector>,
}

impl BranchLister {
    pub fn new(collector: Arc<PaginatedCollector>) -> Self {
        Self { collector }
    }

    /// 列出仓库的活跃分支（单页，不分页）
    pub async fn list_branches(&self, username: &str, repo: &str) -> Result<Vec<String>> {
        let url = self.collector.url(&[username, repo, "branches"]);
        let body = self.collector.fetch_page(&url, &[]).await?;
        let tokens = tokenize(&body);

        let extractor = self.collector.extractor();
        let scope = Scope::repository(username, repo);

        let mut branches = Vec::new();
        for at in extractor.anchors(Field::Branch, &tokens, &scope) {
            match extractor.extract(Field::Branch, &tokens, at, &scope) {
                Some(name) => branches.push(name),
                None => {
                    warn!("Branch marker at token {} in {} has no name", at, url);
                    self.collector.counters().extraction_miss();
                }
            }
        }

        debug!("Found {} branches in {}/{}", branches.len(), username, repo);
        Ok(branches)
    }
}
