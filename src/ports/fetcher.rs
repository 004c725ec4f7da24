use async_trait::async_trait;
use crate::shared::result::Result;

/// 页面抓取接口
///
/// 只负责一次 GET 请求；状态码是否可接受由调用方判断。
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// 请求 `url`，附带查询参数
    async fn fetch(&self, url: &str, query: &[(String, String)]) -> Result<Page>;
}

/// 一次请求的结果
#[derive(Debug, Clone)]
pub struct Page {
    pub status: u16,
    pub body: String,
}

impl Page {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
