use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};
use crate::domain::value_objects::CommitSha;

/// 提交记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    pub timestamp: DateTime<Utc>,
    pub sha: CommitSha,
}

impl CommitRecord {
    pub fn new(timestamp: DateTime<Utc>, sha: CommitSha) -> Self {
        Self { timestamp, sha }
    }
}

/// 分支及其提交（按页面顺序，最新在前）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchHistory {
    pub name: String,
    pub commits: Vec<CommitRecord>,
}

impl BranchHistory {
    pub fn new(name: String, commits: Vec<CommitRecord>) -> Self {
        Self { name, commits }
    }
}

/// 仓库及其全部分支
///
/// 每个发现的分支都有一项，即使提交列表为空。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryHistory {
    pub name: String,
    pub branches: Vec<BranchHistory>,
}

impl RepositoryHistory {
    pub fn new(name: String, branches: Vec<BranchHistory>) -> Self {
        Self { name, branches }
    }

    pub fn branch(&self, name: &str) -> Option<&BranchHistory> {
        self.branches.iter().find(|b| b.name == name)
    }

    pub fn branch_count(&self) -> usize {
        self.branches.len()
    }
}

/// 因抓取失败而跳过的仓库
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedRepository {
    pub name: String,
    pub reason: String,
}

/// 抓取计数快照
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlStats {
    pub pages_fetched: usize,
    pub extraction_misses: usize,
}

/// 一次抓取的完整结果，按发现顺序排列
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlResult {
    pub username: String,
    pub repositories: Vec<RepositoryHistory>,
    pub skipped: Vec<SkippedRepository>,
    pub stats: CrawlStats,
}

impl CrawlResult {
    pub fn repository(&self, name: &str) -> Option<&RepositoryHistory> {
        self.repositories.iter().find(|r| r.name == name)
    }
}

/// 单个仓库的去重统计
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositorySummary {
    pub name: String,
    pub branch_count: usize,
    /// 提交最多的分支；没有分支时为空
    pub baseline_branch: Option<String>,
    pub baseline_commits: usize,
    pub unique_commits: usize,
}

/// 仓库维度的最大值
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryLeader {
    pub repository: String,
    pub value: usize,
}

/// 分支维度的最大值
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchLeader {
    pub repository: String,
    pub branch: String,
    pub value: usize,
}

/// 跨仓库汇总
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CrawlSummary {
    pub repositories: Vec<RepositorySummary>,
    pub max_branches: Option<RepositoryLeader>,
    pub max_commits: Option<BranchLeader>,
    pub max_unique: Option<RepositoryLeader>,
    pub total_unique: usize,
}

impl CrawlSummary {
    pub fn unique_commits(&self, repository: &str) -> Option<usize> {
        self.repositories
            .iter()
            .find(|r| r.name == repository)
            .map(|r| r.unique_commits)
    }
}

/// 个人主页贡献日历统计
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionProfile {
    pub username: String,
    /// 日历中出现的第一天
    pub first_day: Option<NaiveDate>,
    /// 按星期累计的提交数，周一在前
    pub per_weekday: [u32; 7],
    pub days: usize,
}

impl ContributionProfile {
    pub fn new(username: String) -> Self {
        Self {
            username,
            ..Default::default()
        }
    }

    /// 记录日历中出现的日期；只保留第一个
    pub fn observe_day(&mut self, day: NaiveDate) {
        if self.first_day.is_none() {
            self.first_day = Some(day);
        }
    }

    pub fn record(&mut self, day: NaiveDate, count: u32) {
        self.observe_day(day);
        self.per_weekday[day.weekday().num_days_from_monday() as usize] += count;
        self.days += 1;
    }

    pub fn total(&self) -> u32 {
        self.per_weekday.iter().sum()
    }

    pub fn busiest_weekday(&self) -> Option<Weekday> {
        let (idx, count) = self
            .per_weekday
            .iter()
            .enumerate()
            .fold((0, 0), |best, (i, &c)| if c > best.1 { (i, c) } else { best });
        if count == 0 {
            return None;
        }
        WEEKDAYS.get(idx).copied()
    }
}

pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];
