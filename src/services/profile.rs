use std::sync::Arc;
use chrono::NaiveDate;
use tracing::{debug, warn};
use crate::domain::entities::ContributionProfile;
use crate::domain::tokens::tokenize;
use crate::ports::extractor::{Field, Scope};
use crate::services::paginator::PaginatedCollector;
use crate::shared::result::Result;

/// 个人主页贡献日历服务
pub struct ProfileScraper {
    collector: Arc<PaginatedCollector>,
}

impl ProfileScraper {
    pub fn new(collector: Arc<PaginatedCollector>) -> Self {
        Self { collector }
    }

    /// 按星期汇总用户主页贡献日历中的提交数
    pub async fn scrape_profile(&self, username: &str) -> Result<ContributionProfile> {
        let url = self.collector.url(&[username]);
        let body = self.collector.fetch_page(&url, &[]).await?;
        let tokens = tokenize(&body);

        let extractor = self.collector.extractor();
        let scope = Scope::user(username);
        let mut profile = ContributionProfile::new(username.to_string());

        for at in extractor.anchors(Field::ContributionDate, &tokens, &scope) {
            let day = extractor
                .extract(Field::ContributionDate, &tokens, at, &scope)
                .and_then(|raw| NaiveDate::parse_from_str(&raw, "%Y%m%d").ok());
            let count = extractor
                .extract(Field::ContributionCount, &tokens, at, &scope)
                .and_then(|raw| raw.parse::<u32>().ok());

            match (day, count) {
                (Some(day), Some(count)) => profile.record(day, count),
                (day, _) => {
                    // 提交数读不出时，日期仍计入起始日
                    if let Some(day) = day {
                        profile.observe_day(day);
                    }
                    warn!("Contribution day at token {} could not be read", at);
                    self.collector.counters().extraction_miss();
                }
            }
        }

        debug!("Read {} contribution days for {}", profile.days, username);
        Ok(profile)
    }
}
