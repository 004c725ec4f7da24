use std::fmt;
use serde::{Deserialize, Serialize};

/// 提交 SHA 值对象
///
/// 页面上的提交标识是不透明的哈希串，长度不固定（可能是缩写），
/// 只要求非空且不含空白或引号。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CommitSha(String);

impl CommitSha {
    pub fn new(sha: impl Into<String>) -> Result<Self, String> {
        let sha = sha.into();
        if sha.is_empty() {
            return Err("Empty commit SHA".to_string());
        }

        if sha.chars().any(|c| c.is_whitespace() || c == '"') {
            return Err(format!("Invalid commit SHA: {sha}"));
        }

        Ok(Self(sha))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn short(&self) -> &str {
        let end = self.0.char_indices().nth(8).map(|(i, _)| i).unwrap_or(self.0.len());
        &self.0[..end]
    }
}

impl fmt::Display for CommitSha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 分支名称值对象
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BranchName(String);

impl BranchName {
    pub fn new(name: String) -> Self {
        Self(name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 用于 URL 路径段：分支名里的 `/` 保留，其余保留字符转义
    pub fn url_segment(&self) -> String {
        let mut out = String::with_capacity(self.0.len());
        for c in self.0.chars() {
            match c {
                '#' => out.push_str("%23"),
                '?' => out.push_str("%3F"),
                '%' => out.push_str("%25"),
                ' ' => out.push_str("%20"),
                _ => out.push(c),
            }
        }
        out
    }
}

impl From<String> for BranchName {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for BranchName {
    fn from(s: &str) -> Self {
        Self::new(s.to_string())
    }
}

impl fmt::Display for BranchName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
