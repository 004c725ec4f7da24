/// 统一的错误类型
#[derive(Debug, thiserror::Error)]
pub enum GitcrawlError {
    /// 页面返回非成功状态码
    #[error("Failed to fetch {url}: HTTP status {status}")]
    Fetch { url: String, status: u16 },

    /// HTTP 传输错误
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// IO 错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// 配置错误
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON 序列化错误
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Anyhow 错误兼容
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GitcrawlError {
    pub fn fetch(url: impl Into<String>, status: u16) -> Self {
        GitcrawlError::Fetch {
            url: url.into(),
            status,
        }
    }
}

/// 从字符串创建配置错误
impl From<String> for GitcrawlError {
    fn from(s: String) -> Self {
        GitcrawlError::Config(s)
    }
}

/// 从 &str 创建配置错误
impl From<&str> for GitcrawlError {
    fn from(s: &str) -> Self {
        GitcrawlError::Config(s.to_string())
    }
}

impl From<toml::de::Error> for GitcrawlError {
    fn from(e: toml::de::Error) -> Self {
        GitcrawlError::Config(e.to_string())
    }
}
