use std::fmt::Write;
use crate::presentation::dto::{ProfileDto, ReportDto};

/// 纯文本抓取报告
pub fn render_report(report: &ReportDto) -> String {
    let mut out = String::new();

    for repo in &report.repositories {
        let baseline = repo.baseline_branch.as_deref().unwrap_or("-");
        let _ = writeln!(
            out,
            "{}: {} branches, baseline {} ({} commits), {} unique commits",
            repo.name, repo.branch_count, baseline, repo.baseline_commits, repo.unique_commits
        );
    }
    if !report.repositories.is_empty() {
        out.push('\n');
    }

    match &report.max_branches {
        Some(m) => {
            let _ = writeln!(out, "The repo with the most branches is {} with {} branches", m.repository, m.value);
        }
        None => out.push_str("No repositories found\n"),
    }
    if let Some(m) = &report.max_commits {
        let _ = writeln!(
            out,
            "The repo with the most commits is {} on branch {} with {} commits",
            m.repository, m.branch, m.value
        );
    }
    if let Some(m) = &report.max_unique {
        let _ = writeln!(
            out,
            "The repo with the most unique commits is {} with {} unique commits",
            m.repository, m.value
        );
    }
    let _ = writeln!(out, "In total there are {} unique commits", report.total_unique);

    for skipped in &report.skipped {
        let _ = writeln!(out, "Skipped {}: {}", skipped.name, skipped.reason);
    }
    let _ = writeln!(
        out,
        "Fetched {} pages, {} extraction misses",
        report.stats.pages_fetched, report.stats.extraction_misses
    );

    out
}

/// 纯文本贡献概况
pub fn render_profile(profile: &ProfileDto) -> String {
    let mut out = String::new();

    match &profile.first_day {
        Some(day) => {
            let _ = writeln!(out, "In total there were {} commits since {}", profile.total, day);
        }
        None => {
            let _ = writeln!(out, "No contribution days found for {}", profile.username);
        }
    }
    if let Some(weekday) = &profile.busiest_weekday {
        let _ = writeln!(out, "Most active on {}", weekday);
    }
    for day in &profile.per_weekday {
        let _ = writeln!(out, "{:>4} {}", day.weekday, day.commits);
    }

    out
}
