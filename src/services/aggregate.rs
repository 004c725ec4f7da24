use std::collections::HashSet;
use crate::domain::entities::{
    BranchHistory, BranchLeader, CrawlResult, CrawlSummary, RepositoryHistory, RepositoryLeader,
    RepositorySummary,
};
use crate::domain::value_objects::CommitSha;
use crate::shared::config::DedupStrategy;

/// 提交最多的分支，并列时取先发现的
pub fn baseline_branch(branches: &[BranchHistory]) -> Option<&BranchHistory> {
    branches.iter().fold(None, |best: Option<&BranchHistory>, branch| match best {
        Some(b) if b.commits.len() >= branch.commits.len() => Some(b),
        _ => Some(branch),
    })
}

/// 仓库内跨分支去重后的提交数。
///
/// `Baseline`：基准分支全部计入，其余分支只计入不在基准分支中的提交。
/// 三个以上分支存在部分重叠时会多计，与精确并集不同。
/// `Union`：所有分支提交集合的并集大小。
pub fn unique_commits(branches: &[BranchHistory], strategy: DedupStrategy) -> usize {
    match strategy {
        DedupStrategy::Baseline => {
            let Some(baseline) = baseline_branch(branches) else {
                return 0;
            };
            let baseline_set: HashSet<&CommitSha> = baseline.commits.iter().map(|c| &c.sha).collect();

            let others: usize = branches
                .iter()
                .filter(|b| !std::ptr::eq(*b, baseline))
                .map(|b| {
                    let branch_set: HashSet<&CommitSha> = b.commits.iter().map(|c| &c.sha).collect();
                    branch_set.len() - branch_set.intersection(&baseline_set).count()
                })
                .sum();

            baseline_set.len() + others
        }
        DedupStrategy::Union => branches
            .iter()
            .flat_map(|b| b.commits.iter().map(|c| &c.sha))
            .collect::<HashSet<_>>()
            .len(),
    }
}

pub fn summarize_repository(repo: &RepositoryHistory, strategy: DedupStrategy) -> RepositorySummary {
    let baseline = baseline_branch(&repo.branches);
    RepositorySummary {
        name: repo.name.clone(),
        branch_count: repo.branch_count(),
        baseline_branch: baseline.map(|b| b.name.clone()),
        baseline_commits: baseline.map_or(0, |b| b.commits.len()),
        unique_commits: unique_commits(&repo.branches, strategy),
    }
}

/// 跨仓库汇总；各项最大值并列时取先发现的
pub fn summarize(result: &CrawlResult, strategy: DedupStrategy) -> CrawlSummary {
    let mut summary = CrawlSummary::default();

    for repo in &result.repositories {
        let repo_summary = summarize_repository(repo, strategy);

        if summary
            .max_branches
            .as_ref()
            .map_or(true, |m| repo_summary.branch_count > m.value)
        {
            summary.max_branches = Some(RepositoryLeader {
                repository: repo.name.clone(),
                value: repo_summary.branch_count,
            });
        }

        for branch in &repo.branches {
            if summary
                .max_commits
                .as_ref()
                .map_or(true, |m| branch.commits.len() > m.value)
            {
                summary.max_commits = Some(BranchLeader {
                    repository: repo.name.clone(),
                    branch: branch.name.clone(),
                    value: branch.commits.len(),
                });
            }
        }

        if summary
            .max_unique
            .as_ref()
            .map_or(true, |m| repo_summary.unique_commits > m.value)
        {
            summary.max_unique = Some(RepositoryLeader {
                repository: repo.name.clone(),
                value: repo_summary.unique_commits,
            });
        }

        summary.total_unique += repo_summary.unique_commits;
        summary.repositories.push(repo_summary);
    }

    summary
}
