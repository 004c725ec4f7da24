use std::path::Path;
use serde::{Deserialize, Serialize};
use crate::infrastructure::markup::MarkerProfile;
use crate::shared::error::GitcrawlError;
use crate::shared::result::Result;

/// 默认配置文件名
pub const DEFAULT_CONFIG_FILE: &str = "gitcrawl.toml";

/// 应用配置
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    pub crawl: CrawlConfig,
    pub markers: MarkerProfile,
}

/// 页面来源配置
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SourceConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://github.com".to_string(),
            user_agent: concat!("gitcrawl/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: 30,
        }
    }
}

/// 抓取配置
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CrawlConfig {
    /// 单个分页资源最多抓取的页数
    pub max_pages: usize,
    /// 并发抓取的仓库/分支数，1 表示顺序执行
    pub workers: usize,
    pub on_error: OnError,
    pub dedup: DedupStrategy,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_pages: 500,
            workers: 1,
            on_error: OnError::Abort,
            dedup: DedupStrategy::Baseline,
        }
    }
}

/// 单个仓库抓取失败时的处理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OnError {
    /// 终止整个抓取
    Abort,
    /// 跳过该仓库，继续其余仓库
    Skip,
}

/// 跨分支去重方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DedupStrategy {
    /// 以提交最多的分支为基准，逐个分支扣除与基准的交集
    Baseline,
    /// 所有分支提交集合的精确并集
    Union,
}

/// 命令行覆盖项
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub workers: Option<usize>,
    pub max_pages: Option<usize>,
    pub skip_failed: bool,
    pub exact: bool,
}

impl Config {
    /// 从文件加载配置
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// 从命令行参数和文件加载配置
    pub fn from_args_and_file(config_path: Option<&Path>, overrides: Overrides) -> Result<Self> {
        let mut config = match config_path {
            // 显式指定的配置文件必须能读取
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    Config::default()
                }
            }
        };

        // 命令行参数覆盖配置文件
        if let Some(base_url) = overrides.base_url {
            config.source.base_url = base_url;
        }
        if let Some(workers) = overrides.workers {
            config.crawl.workers = workers;
        }
        if let Some(max_pages) = overrides.max_pages {
            config.crawl.max_pages = max_pages;
        }
        if overrides.skip_failed {
            config.crawl.on_error = OnError::Skip;
        }
        if overrides.exact {
            config.crawl.dedup = DedupStrategy::Union;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let base_url = &self.source.base_url;
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(GitcrawlError::Config(format!(
                "Base URL must start with http:// or https://, got {base_url}"
            )));
        }
        if self.source.timeout_secs == 0 {
            return Err("Timeout must be greater than 0".into());
        }
        if self.crawl.workers == 0 {
            return Err("Worker count must be greater than 0".into());
        }
        if self.crawl.max_pages == 0 {
            return Err("Page limit must be greater than 0".into());
        }
        self.markers.validate()
    }
}
