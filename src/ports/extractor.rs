use std::ops::Range;

/// 页面中可提取的字段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// 仓库列表页中的仓库名
    Repository,
    /// 分支页中的分支名
    Branch,
    /// 提交列表页中的提交时间
    CommitTime,
    /// 提交列表页中的作者链接
    CommitAuthor,
    /// 提交列表页中的提交永久链接
    CommitSha,
    /// 贡献日历中的日期
    ContributionDate,
    /// 贡献日历中某天的提交数
    ContributionCount,
}

/// 提取时用到的用户/仓库上下文
#[derive(Debug, Clone, Copy)]
pub struct Scope<'a> {
    pub username: &'a str,
    pub repository: Option<&'a str>,
}

impl<'a> Scope<'a> {
    pub fn user(username: &'a str) -> Self {
        Self {
            username,
            repository: None,
        }
    }

    pub fn repository(username: &'a str, repository: &'a str) -> Self {
        Self {
            username,
            repository: Some(repository),
        }
    }
}

/// 页面字段提取接口
///
/// 标记串与窗口大小由实现持有，页面格式变化时替换实现或其配置即可。
pub trait FieldExtractor: Send + Sync {
    /// 字段锚点所在的 token 下标，按页面顺序
    fn anchors(&self, field: Field, tokens: &[&str], scope: &Scope<'_>) -> Vec<usize>;

    /// 在 `window` 内从后往前查找字段标记，返回最近的下标
    fn locate_before(
        &self,
        field: Field,
        tokens: &[&str],
        window: Range<usize>,
        scope: &Scope<'_>,
    ) -> Option<usize>;

    /// 从锚点附近提取字段值；标记存在但取不到值时返回 None
    fn extract(&self, field: Field, tokens: &[&str], at: usize, scope: &Scope<'_>) -> Option<String>;

    /// 从锚点往回查找作者时允许的范围
    fn lookback(&self, at: usize) -> Range<usize>;

    /// 当前页是否有可用的下一页链接
    fn has_next_page(&self, tokens: &[&str]) -> bool;
}
