use serde::Serialize;
use crate::domain::entities::{
    BranchLeader, ContributionProfile, CrawlResult, CrawlStats, CrawlSummary, RepositoryLeader,
    RepositorySummary, SkippedRepository, WEEKDAYS,
};
use crate::shared::config::DedupStrategy;

/// 抓取报告 DTO
#[derive(Debug, Clone, Serialize)]
pub struct ReportDto {
    pub username: String,
    pub dedup: DedupStrategy,
    pub repositories: Vec<RepositorySummary>,
    pub max_branches: Option<RepositoryLeader>,
    pub max_commits: Option<BranchLeader>,
    pub max_unique: Option<RepositoryLeader>,
    pub total_unique: usize,
    pub skipped: Vec<SkippedRepository>,
    pub stats: CrawlStats,
}

impl ReportDto {
    pub fn new(result: &CrawlResult, summary: CrawlSummary, dedup: DedupStrategy) -> Self {
        Self {
            username: result.username.clone(),
            dedup,
            repositories: summary.repositories,
            max_branches: summary.max_branches,
            max_commits: summary.max_commits,
            max_unique: summary.max_unique,
            total_unique: summary.total_unique,
            skipped: result.skipped.clone(),
            stats: result.stats,
        }
    }
}

/// 单个星期几的提交数
#[derive(Debug, Clone, Serialize)]
pub struct WeekdayDto {
    pub weekday: String,
    pub commits: u32,
}

/// 贡献概况 DTO
#[derive(Debug, Clone, Serialize)]
pub struct ProfileDto {
    pub username: String,
    pub first_day: Option<String>,
    pub total: u32,
    pub days: usize,
    pub busiest_weekday: Option<String>,
    pub per_weekday: Vec<WeekdayDto>,
}

impl From<ContributionProfile> for ProfileDto {
    fn from(profile: ContributionProfile) -> Self {
        Self {
            total: profile.total(),
            first_day: profile.first_day.map(|d| d.format("%Y-%m-%d").to_string()),
            busiest_weekday: profile.busiest_weekday().map(|d| d.to_string()),
            per_weekday: WEEKDAYS
                .iter()
                .zip(profile.per_weekday)
                .map(|(weekday, commits)| WeekdayDto {
                    weekday: weekday.to_string(),
                    commits,
                })
                .collect(),
            username: profile.username,
            days: profile.days,
        }
    }
}
