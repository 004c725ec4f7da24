use serde::{Deserialize, Serialize};
use crate::shared::error::GitcrawlError;
use crate::shared::result::Result;

/// 页面标记配置
///
/// 描述当前页面格式下各字段附近的标记串和扫描窗口。
/// `{user}` 与 `{repo}` 在使用时替换为实际的用户名和仓库名。
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MarkerProfile {
    pub repository_item: String,
    /// 仓库名所在 token 位于标记 token 之前的距离
    pub repository_offset: usize,

    pub branch_item: String,
    /// 分支列表结束标记，之后的分支不再统计
    pub branch_end: String,

    pub commit_time: String,
    pub commit_author: String,
    pub commit_permalink: String,
    /// 从提交时间往回查找作者的 token 数
    pub author_window: usize,

    pub pagination: String,
    pub next_page: String,
    pub disabled: String,
    /// 分页标记之后查找下一页链接的 token 数
    pub pagination_window: usize,

    pub contribution_date: String,
    /// 提交数所在 token 位于日期 token 之前的距离
    pub contribution_count_offset: usize,

    /// 每抓取多少页记录一次进度
    pub progress_interval: usize,
}

impl Default for MarkerProfile {
    fn default() -> Self {
        Self {
            repository_item: "codeRepository".to_string(),
            repository_offset: 2,
            branch_item: "data-branch-name".to_string(),
            branch_end: "Active branches".to_string(),
            commit_time: "datetime".to_string(),
            commit_author: "author={user}".to_string(),
            commit_permalink: "/{user}/{repo}/commit/".to_string(),
            author_window: 100,
            pagination: "pagination".to_string(),
            next_page: "next_page".to_string(),
            disabled: "disabled".to_string(),
            pagination_window: 20,
            contribution_date: "data-date".to_string(),
            contribution_count_offset: 1,
            progress_interval: 10,
        }
    }
}

impl MarkerProfile {
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("repository_item", &self.repository_item),
            ("branch_item", &self.branch_item),
            ("commit_time", &self.commit_time),
            ("commit_author", &self.commit_author),
            ("commit_permalink", &self.commit_permalink),
            ("pagination", &self.pagination),
            ("next_page", &self.next_page),
            ("contribution_date", &self.contribution_date),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(GitcrawlError::Config(format!("Marker `{name}` cannot be empty")));
            }
        }

        if !self.commit_author.contains("{user}") {
            return Err("Marker `commit_author` must contain {user}".into());
        }
        if !self.commit_permalink.contains("{user}") || !self.commit_permalink.contains("{repo}") {
            return Err("Marker `commit_permalink` must contain {user} and {repo}".into());
        }

        if self.author_window == 0 || self.pagination_window == 0 {
            return Err("Scan windows must be greater than 0".into());
        }
        if self.progress_interval == 0 {
            return Err("Progress interval must be greater than 0".into());
        }
        Ok(())
    }

    /// 作者标记，如 `author=alice`
    pub fn author_marker(&self, username: &str) -> String {
        self.commit_author.replace("{user}", username)
    }

    /// 提交链接标记，如 `/alice/demo/commit/`
    pub fn permalink_marker(&self, username: &str, repository: &str) -> String {
        self.commit_permalink
            .replace("{user}", username)
            .replace("{repo}", repository)
    }
}
