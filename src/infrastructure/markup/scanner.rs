use std::ops::Range;
use crate::domain::tokens::{contains_word, digits, first_digit, phrase_at, quoted, quoted_after};
use crate::ports::extractor::{Field, FieldExtractor, Scope};
use super::profile::MarkerProfile;

/// 基于标记邻近关系的字段提取实现
#[derive(Debug, Clone, Default)]
pub struct MarkerScanner {
    profile: MarkerProfile,
}

impl MarkerScanner {
    pub fn new(profile: MarkerProfile) -> Self {
        Self { profile }
    }

    fn matches(&self, field: Field, token: &str, scope: &Scope<'_>) -> bool {
        let p = &self.profile;
        match field {
            Field::Repository => token.contains(&p.repository_item),
            Field::Branch => token.contains(&p.branch_item),
            Field::CommitTime => token.contains(&p.commit_time),
            Field::CommitAuthor => contains_word(token, &p.author_marker(scope.username)),
            Field::CommitSha => scope
                .repository
                .is_some_and(|repo| token.contains(&p.permalink_marker(scope.username, repo))),
            Field::ContributionDate | Field::ContributionCount => {
                token.contains(&p.contribution_date)
            }
        }
    }

    /// 去掉 `/<user>/` 路径段和首尾斜杠
    fn strip_user_segment(raw: &str, username: &str) -> String {
        let segment = format!("/{username}/");
        raw.replacen(&segment, "", 1).trim_matches('/').to_string()
    }

    fn sha_after_marker(&self, token: &str, scope: &Scope<'_>) -> Option<String> {
        let repo = scope.repository?;
        let marker = self.profile.permalink_marker(scope.username, repo);
        let start = token.find(&marker)? + marker.len();
        Some(
            token[start..]
                .chars()
                .take_while(|c| !matches!(c, '"' | '\'' | '/' | '#' | '?' | '&' | '>'))
                .collect(),
        )
    }
}

impl FieldExtractor for MarkerScanner {
    fn anchors(&self, field: Field, tokens: &[&str], scope: &Scope<'_>) -> Vec<usize> {
        let mut found = Vec::new();
        for (i, token) in tokens.iter().enumerate() {
            if self.matches(field, token, scope) {
                found.push(i);
            }
            // 分支页在结束标记之后只剩非活跃分支
            if field == Field::Branch && phrase_at(tokens, i, &self.profile.branch_end) {
                break;
            }
        }
        found
    }

    fn locate_before(
        &self,
        field: Field,
        tokens: &[&str],
        window: Range<usize>,
        scope: &Scope<'_>,
    ) -> Option<usize> {
        let end = window.end.min(tokens.len());
        (window.start..end)
            .rev()
            .find(|&i| self.matches(field, tokens[i], scope))
    }

    fn extract(&self, field: Field, tokens: &[&str], at: usize, scope: &Scope<'_>) -> Option<String> {
        let p = &self.profile;
        let token = tokens.get(at)?;
        let value = match field {
            Field::Repository => {
                let raw = quoted(tokens.get(at.checked_sub(p.repository_offset)?)?);
                Self::strip_user_segment(&raw, scope.username)
            }
            Field::Branch => quoted_after(token, &p.branch_item),
            Field::CommitTime => quoted_after(token, &p.commit_time),
            Field::CommitAuthor => {
                if !self.matches(field, token, scope) {
                    return None;
                }
                scope.username.to_string()
            }
            Field::CommitSha => self.sha_after_marker(token, scope)?,
            Field::ContributionDate => digits(token),
            Field::ContributionCount => {
                let count_token = tokens.get(at.checked_sub(p.contribution_count_offset)?)?;
                first_digit(count_token)?.to_string()
            }
        };

        if value.is_empty() {
            None
        } else {
            Some(value)
        }
    }

    fn lookback(&self, at: usize) -> Range<usize> {
        at.saturating_sub(self.profile.author_window)..at
    }

    fn has_next_page(&self, tokens: &[&str]) -> bool {
        let p = &self.profile;
        for (i, token) in tokens.iter().enumerate() {
            if !token.contains(&p.pagination) {
                continue;
            }

            let window_end = (i + p.pagination_window).min(tokens.len());
            for j in i..window_end {
                if !tokens[j].contains(&p.next_page) {
                    continue;
                }
                let disabled = !p.disabled.is_empty()
                    && (tokens[j].contains(&p.disabled)
                        || tokens.get(j + 1).is_some_and(|t| t.contains(&p.disabled)));
                if !disabled {
                    return true;
                }
            }
        }
        false
    }
}
