use std::sync::Arc;
use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::{error, info, warn};
use crate::domain::entities::{BranchHistory, CrawlResult, RepositoryHistory, SkippedRepository};
use crate::services::branches::BranchLister;
use crate::services::commits::CommitHistoryCollector;
use crate::services::counters::CrawlCounters;
use crate::services::paginator::PaginatedCollector;
use crate::services::repositories::RepositoryLister;
use crate::shared::config::{Config, OnError};
use crate::shared::error::GitcrawlError;
use crate::shared::result::Result;

/// 抓取调度器 - 仓库 → 分支 → 提交
///
/// 仓库与分支按 `crawl.workers` 并发，结果保持发现顺序。
/// 仓库是失败的最小单位：任一分支失败，整个仓库失败。
pub struct Crawler {
    config: Arc<Config>,
    counters: Arc<CrawlCounters>,
    repositories: RepositoryLister,
    branches: BranchLister,
    commits: CommitHistoryCollector,
}

impl Crawler {
    pub fn new(config: Arc<Config>, counters: Arc<CrawlCounters>, collector: Arc<PaginatedCollector>) -> Self {
        Self {
            config,
            counters,
            repositories: RepositoryLister::new(collector.clone()),
            branches: BranchLister::new(collector.clone()),
            commits: CommitHistoryCollector::new(collector),
        }
    }

    /// 抓取用户的全部仓库
    pub async fn crawl(&self, username: &str) -> Result<CrawlResult> {
        let repos = self.repositories.list_repositories(username).await?;
        let repo_count = repos.len();
        info!("Discovered {} repositories for {}", repo_count, username);

        let mut outcomes = stream::iter(repos.into_iter().enumerate())
            .map(|(idx, repo)| async move {
                info!("[{}/{}] Crawling repository: {}", idx + 1, repo_count, repo);
                let outcome = self.crawl_repository(username, &repo).await;
                (repo, outcome)
            })
            .buffered(self.config.crawl.workers);

        let mut repositories = Vec::with_capacity(repo_count);
        let mut skipped = Vec::new();

        while let Some((repo, outcome)) = outcomes.next().await {
            match outcome {
                Ok(history) => {
                    info!(
                        "✓ Finished {}: {} branches",
                        history.name,
                        history.branch_count()
                    );
                    repositories.push(history);
                }
                Err(e) => match self.config.crawl.on_error {
                    OnError::Abort => {
                        error!("Failed to crawl repository {}: {}", repo, e);
                        return Err(e);
                    }
                    OnError::Skip => {
                        warn!("Skipping repository {}: {}", repo, e);
                        skipped.push(SkippedRepository {
                            name: repo,
                            reason: e.to_string(),
                        });
                    }
                },
            }
        }

        Ok(CrawlResult {
            username: username.to_string(),
            repositories,
            skipped,
            stats: self.counters.snapshot(),
        })
    }

    /// 抓取单个仓库的全部分支
    async fn crawl_repository(&self, username: &str, repo: &str) -> Result<RepositoryHistory> {
        let branch_names = self.branches.list_branches(username, repo).await?;
        info!("Found {} branches in {}", branch_names.len(), repo);

        let branches: Vec<BranchHistory> = stream::iter(branch_names)
            .map(|branch| async move {
                info!("Scraping branch {} from repo {}", branch, repo);
                let commits = self.commits.list_commits(username, repo, &branch).await?;
                Ok::<_, GitcrawlError>(BranchHistory::new(branch, commits))
            })
            .buffered(self.config.crawl.workers)
            .try_collect()
            .await?;

        Ok(RepositoryHistory::new(repo.to_string(), branches))
    }
}
