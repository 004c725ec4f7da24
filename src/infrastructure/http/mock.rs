use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use async_trait::async_trait;
use crate::ports::fetcher::{Page, PageFetcher};
use crate::shared::result::Result;

/// 测试用抓取实现 - 按 URL 与页码返回预设页面
///
/// 未设置的页面返回 404。
#[derive(Default)]
pub struct MockFetcher {
    /// key: (url, page 参数) → 页面
    pages: Mutex<HashMap<(String, Option<String>), Page>>,
    /// 请求记录：`url` 或 `url?k=v&...`，参数按发送顺序
    pub requests: Mutex<Vec<String>>,
    /// URL 包含该片段时延迟响应
    delays: Mutex<Vec<(String, Duration)>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置不带页码的页面
    pub fn set_page(&self, url: &str, body: impl Into<String>) {
        self.insert(url, None, Page::new(200, body));
    }

    /// 设置第 `page` 页
    pub fn set_paged(&self, url: &str, page: u32, body: impl Into<String>) {
        self.insert(url, Some(page), Page::new(200, body));
    }

    /// 设置返回错误状态码的页面
    pub fn set_status(&self, url: &str, page: Option<u32>, status: u16) {
        self.insert(url, page, Page::new(status, "error"));
    }

    /// URL 包含 `fragment` 的请求在响应前等待 `delay`
    pub fn set_delay(&self, fragment: &str, delay: Duration) {
        self.delays.lock().unwrap().push((fragment.to_string(), delay));
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn insert(&self, url: &str, page: Option<u32>, value: Page) {
        let key = (url.to_string(), page.map(|p| p.to_string()));
        self.pages.lock().unwrap().insert(key, value);
    }
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch(&self, url: &str, query: &[(String, String)]) -> Result<Page> {
        let page = query
            .iter()
            .find(|(k, _)| k == "page")
            .map(|(_, v)| v.clone());

        let record = if query.is_empty() {
            url.to_string()
        } else {
            let params: Vec<String> = query.iter().map(|(k, v)| format!("{k}={v}")).collect();
            format!("{url}?{}", params.join("&"))
        };
        self.requests.lock().unwrap().push(record);

        let delay = self
            .delays
            .lock()
            .unwrap()
            .iter()
            .find(|(fragment, _)| url.contains(fragment.as_str()))
            .map(|(_, d)| *d);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let key = (url.to_string(), page);
        Ok(self
            .pages
            .lock()
            .unwrap()
            .get(&key)
            .cloned()
            .unwrap_or_else(|| Page::new(404, "not found")))
    }
}

/// 分页区块；`None` 表示页面没有分页
pub fn pagination(next: Option<bool>) -> String {
    match next {
        Some(true) => r#"<div class="pagination"> <a class="next_page" rel="next" href="?page=n">Next</a> </div>"#.to_string(),
        Some(false) => r#"<div class="pagination"> <span class="next_page disabled">Next</span> </div>"#.to_string(),
        None => String::new(),
    }
}

/// 仓库列表页
pub fn repositories_page(username: &str, repos: &[&str], next: Option<bool>) -> String {
    let mut body = String::from("<html> <body> <ul>\n");
    for repo in repos {
        body.push_str(&format!(
            "<li> <h3> <a href=\"/{username}/{repo}\" itemprop=\"name codeRepository\" > {repo} </a> </h3> </li>\n"
        ));
    }
    body.push_str("</ul>\n");
    body.push_str(&pagination(next));
    body.push_str("\n</body> </html>");
    body
}

/// 分支页，`stale` 中的分支位于结束标记之后
pub fn branches_page(active: &[&str], stale: &[&str]) -> String {
    let mut body = String::from("<html> <body> <h3>Your branches</h3>\n");
    for branch in active {
        body.push_str(&format!("<li class=\"branch\" data-branch-name=\"{branch}\"> {branch} </li>\n"));
    }
    body.push_str("<h3>Active branches</h3>\n");
    for branch in stale {
        body.push_str(&format!("<li class=\"branch\" data-branch-name=\"{branch}\"> {branch} </li>\n"));
    }
    body.push_str("</body> </html>");
    body
}

/// 提交列表页，每项为 (sha, 时间, 作者)
pub fn commits_page(
    username: &str,
    repo: &str,
    commits: &[(&str, &str, &str)],
    next: Option<bool>,
) -> String {
    let mut body = String::from("<html> <body> <ol>\n");
    for (sha, timestamp, author) in commits {
        body.push_str(&format!(
            "<li class=\"commit\"> <p> <a href=\"/{username}/{repo}/commit/{sha}\" class=\"message\">Update readme</a> </p>\n\
             <div class=\"meta\"> <a href=\"/{username}/{repo}/commits?author={author}\" class=\"commit-author\">{author}</a>\n\
             committed <relative-time datetime=\"{timestamp}\">on a day</relative-time> </div> </li>\n"
        ));
    }
    body.push_str("</ol>\n");
    body.push_str(&pagination(next));
    body.push_str("\n</body> </html>");
    body
}
