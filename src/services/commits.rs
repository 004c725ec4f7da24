use std::collections::HashSet;
use std::sync::Arc;
use chrono::{DateTime, Utc};
use tracing::{debug, warn};
use crate::domain::entities::CommitRecord;
use crate::domain::value_objects::{BranchName, CommitSha};
use crate::ports::extractor::{Field, FieldExtractor, Scope};
use crate::services::counters::CrawlCounters;
use crate::services::paginator::PaginatedCollector;
use crate::shared::result::Result;

/// 提交历史服务
pub struct CommitHistoryCollector {
    collector: Arc<PaginatedCollector>,
}

impl CommitHistoryCollector {
    pub fn new(collector: Arc<PaginatedCollector>) -> Self {
        Self { collector }
    }

    /// 抓取某分支上该用户的提交，最新在前
    pub async fn list_commits(
        &self,
        username: &str,
        repo: &str,
        branch: &str,
    ) -> Result<Vec<CommitRecord>> {
        let branch_segment = BranchName::from(branch).url_segment();
        let url = self.collector.url(&[username, repo, "commits", branch_segment.as_str()]);
        let extractor = self.collector.extractor();
        let counters = self.collector.counters();
        let scope = Scope::repository(username, repo);

        let mut seen = HashSet::new();
        let commits = self
            .collector
            .collect(&url, &[], |tokens| {
                scan_commits(extractor, counters, tokens, &scope)
                    .into_iter()
                    // 同一分支上的提交不重复
                    .filter(|c| seen.insert(c.sha.clone()))
                    .collect()
            })
            .await?;

        debug!(
            "Collected {} commits from {}/{} on {} (newest {})",
            commits.len(),
            username,
            repo,
            branch,
            commits.first().map_or("-", |c| c.sha.short())
        );
        Ok(commits)
    }
}

/// 从一页 token 中提取属于 `scope.username` 的提交。
///
/// 每个时间标记往回查找作者标记，范围不超过 lookback 窗口，也不越过上一个时间标记；
/// 找到作者后继续往回查找提交链接。找不到作者的时间标记直接丢弃。
fn scan_commits(
    extractor: &dyn FieldExtractor,
    counters: &CrawlCounters,
    tokens: &[&str],
    scope: &Scope<'_>,
) -> Vec<CommitRecord> {
    let mut commits = Vec::new();
    let mut previous: Option<usize> = None;

    for at in extractor.anchors(Field::CommitTime, tokens, scope) {
        let mut window = extractor.lookback(at);
        if let Some(prev) = previous {
            window.start = window.start.max(prev + 1);
        }
        previous = Some(at);

        let Some(author_at) = extractor.locate_before(Field::CommitAuthor, tokens, window.clone(), scope) else {
            continue;
        };

        let Some(timestamp) = extractor
            .extract(Field::CommitTime, tokens, at, scope)
            .and_then(|raw| parse_timestamp(&raw))
        else {
            warn!("Commit time at token {} could not be parsed", at);
            counters.extraction_miss();
            continue;
        };

        let sha = extractor
            .locate_before(Field::CommitSha, tokens, window.start..author_at, scope)
            .and_then(|sha_at| extractor.extract(Field::CommitSha, tokens, sha_at, scope))
            .and_then(|raw| CommitSha::new(raw).ok());

        match sha {
            Some(sha) => commits.push(CommitRecord::new(timestamp, sha)),
            None => {
                warn!("Commit at {} has no permalink before its author", timestamp);
                counters.extraction_miss();
            }
        }
    }

    commits
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tokens::tokenize;
    use crate::infrastructure::http::mock::{commits_page, MockFetcher};
    use crate::infrastructure::markup::MarkerScanner;
    use crate::shared::config::Config;
    use chrono::TimeZone;

    fn collector(fetcher: Arc<MockFetcher>) -> CommitHistoryCollector {
        let collector = PaginatedCollector::new(
            &Config::default(),
            fetcher,
            Arc::new(MarkerScanner::default()),
            Arc::new(CrawlCounters::new()),
        );
        CommitHistoryCollector::new(Arc::new(collector))
    }

    fn shas(commits: &[CommitRecord]) -> Vec<&str> {
        commits.iter().map(|c| c.sha.as_str()).collect()
    }

    #[tokio::test]
    async fn test_collects_commits_across_pages() {
        let fetcher = Arc::new(MockFetcher::new());
        let url = "https://github.com/alice/demo/commits/main";
        fetcher.set_paged(
            url,
            1,
            commits_page(
                "alice",
                "demo",
                &[("c3", "2023-01-03T00:00:00Z", "alice"), ("c2", "2023-01-02T00:00:00Z", "alice")],
                Some(true),
            ),
        );
        fetcher.set_paged(
            url,
            2,
            commits_page("alice", "demo", &[("c1", "2023-01-01T00:00:00Z", "alice")], Some(false)),
        );

        let commits = collector(fetcher).list_commits("alice", "demo", "main").await.unwrap();

        assert_eq!(shas(&commits), vec!["c3", "c2", "c1"]);
        assert_eq!(
            commits[2].timestamp,
            Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap()
        );
    }

    #[tokio::test]
    async fn test_skips_other_authors() {
        let fetcher = Arc::new(MockFetcher::new());
        fetcher.set_paged(
            "https://github.com/alice/demo/commits/dev",
            1,
            commits_page(
                "alice",
                "demo",
                &[
                    ("c3", "2023-01-03T00:00:00Z", "alice"),
                    ("b1", "2023-01-02T12:00:00Z", "bob"),
                    ("c2", "2023-01-02T00:00:00Z", "alice"),
                ],
                None,
            ),
        );

        let commits = collector(fetcher).list_commits("alice", "demo", "dev").await.unwrap();
        assert_eq!(shas(&commits), vec!["c3", "c2"]);
    }

    #[test]
    fn test_datetime_without_author_in_window_is_dropped() {
        let filler = "<span>x</span> ".repeat(120);
        let body = format!(
            r#"<a href="/alice/demo/commit/c1"> <a href="?author=alice"> {filler} <relative-time datetime="2023-01-01T00:00:00Z">"#
        );
        let tokens = tokenize(&body);
        let counters = CrawlCounters::new();
        let scanner = MarkerScanner::default();

        let commits = scan_commits(&scanner, &counters, &tokens, &Scope::repository("alice", "demo"));

        assert!(commits.is_empty());
        assert_eq!(counters.snapshot().extraction_misses, 0);
    }

    #[test]
    fn test_author_without_permalink_is_miss() {
        let body = r#"<a href="?author=alice">alice</a> <relative-time datetime="2023-01-01T00:00:00Z">"#;
        let tokens = tokenize(body);
        let counters = CrawlCounters::new();

        let commits = scan_commits(
            &MarkerScanner::default(),
            &counters,
            &tokens,
            &Scope::repository("alice", "demo"),
        );

        assert!(commits.is_empty());
        assert_eq!(counters.snapshot().extraction_misses, 1);
    }

    #[test]
    fn test_bad_timestamp_is_miss() {
        let body = r#"<a href="/alice/demo/commit/c1"> <a href="?author=alice"> <relative-time datetime="yesterday">"#;
        let tokens = tokenize(body);
        let counters = CrawlCounters::new();

        let commits = scan_commits(
            &MarkerScanner::default(),
            &counters,
            &tokens,
            &Scope::repository("alice", "demo"),
        );

        assert!(commits.is_empty());
        assert_eq!(counters.snapshot().extraction_misses, 1);
    }

    #[tokio::test]
    async fn test_repeated_commit_across_pages_kept_once() {
        let fetcher = Arc::new(MockFetcher::new());
        let url = "https://github.com/alice/demo/commits/main";
        fetcher.set_paged(
            url,
            1,
            commits_page(
                "alice",
                "demo",
                &[("c3", "2023-01-03T00:00:00Z", "alice"), ("c2", "2023-01-02T00:00:00Z", "alice")],
                Some(true),
            ),
        );
        // 抓取期间有新提交，c2 被挤到第 2 页
        fetcher.set_paged(
            url,
            2,
            commits_page(
                "alice",
                "demo",
                &[("c2", "2023-01-02T00:00:00Z", "alice"), ("c1", "2023-01-01T00:00:00Z", "alice")],
                Some(false),
            ),
        );

        let commits = collector(fetcher).list_commits("alice", "demo", "main").await.unwrap();
        assert_eq!(shas(&commits), vec!["c3", "c2", "c1"]);
    }

    #[test]
    fn test_other_author_does_not_inherit_previous_author() {
        // alice 的提交没有永久链接，紧随其后的是 bob 的提交
        let body = r#"
            <a href="/alice/demo/commits?author=alice">alice</a>
            <relative-time datetime="2023-01-01T00:00:00Z">
            <a href="/alice/demo/commit/b1">fix</a>
            <a href="/alice/demo/commits?author=bob">bob</a>
            <relative-time datetime="2023-01-02T00:00:00Z">
        "#;
        let tokens = tokenize(body);
        let counters = CrawlCounters::new();

        let commits = scan_commits(
            &MarkerScanner::default(),
            &counters,
            &tokens,
            &Scope::repository("alice", "demo"),
        );

        assert!(commits.is_empty());
        assert_eq!(counters.snapshot().extraction_misses, 1);
    }

    #[test]
    fn test_other_author_does_not_take_previous_sha() {
        let body = r#"
            <a href="/alice/demo/commit/a1">feat</a>
            <a href="/alice/demo/commits?author=alice">alice</a>
            <relative-time datetime="2023-01-01T00:00:00Z">
            <a href="/alice/demo/commit/b1">fix</a>
            <a href="/alice/demo/commits?author=bob">bob</a>
            <relative-time datetime="2023-01-02T00:00:00Z">
        "#;
        let tokens = tokenize(body);
        let counters = CrawlCounters::new();

        let commits = scan_commits(
            &MarkerScanner::default(),
            &counters,
            &tokens,
            &Scope::repository("alice", "demo"),
        );

        assert_eq!(shas(&commits), vec!["a1"]);
        assert_eq!(
            commits[0].timestamp,
            Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap()
        );
    }

    #[tokio::test]
    async fn test_branch_with_slash_in_url() {
        let fetcher = Arc::new(MockFetcher::new());
        fetcher.set_paged(
            "https://github.com/alice/demo/commits/feature/login",
            1,
            commits_page("alice", "demo", &[("f1", "2023-02-01T00:00:00Z", "alice")], None),
        );

        let commits = collector(fetcher)
            .list_commits("alice", "demo", "feature/login")
            .await
            .unwrap();
        assert_eq!(shas(&commits), vec!["f1"]);
    }
}
