//! 基于空白分词的页面文本提取。
//!
//! 页面不按 HTML 结构解析，而是视为一串以空白分隔的 token，
//! 通过已知标记串定位字段后从相邻 token 中取值。

/// 将页面正文切分为 token
pub fn tokenize(body: &str) -> Vec<&str> {
    body.split_whitespace().collect()
}

/// 从 `marker` 所在位置开始，取 token 中第一对双引号之间的文本。
///
/// 找不到 `marker` 时从 token 开头扫描；没有引号返回空串；
/// 只有左引号时返回已收集的部分。
pub fn quoted_after(token: &str, marker: &str) -> String {
    let start = token.find(marker).unwrap_or(0);
    let rest = &token[start..];

    let Some(open) = rest.find('"') else {
        return String::new();
    };

    let inner = &rest[open + 1..];
    match inner.find('"') {
        Some(close) => inner[..close].to_string(),
        None => inner.to_string(),
    }
}

/// token 中第一对双引号之间的文本
pub fn quoted(token: &str) -> String {
    quoted_after(token, "")
}

/// 只保留 token 中的数字字符
pub fn digits(token: &str) -> String {
    token.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// token 中从左到右第一个数字
pub fn first_digit(token: &str) -> Option<u32> {
    token.chars().find_map(|c| c.to_digit(10))
}

/// token 是否包含 `marker`，且 `marker` 之后不是用户名字符。
///
/// 用于 `author=alice` 这类以用户名结尾的标记，避免匹配到 `author=alice2`。
pub fn contains_word(token: &str, marker: &str) -> bool {
    if marker.is_empty() {
        return false;
    }

    token.match_indices(marker).any(|(idx, _)| {
        token[idx + marker.len()..]
            .chars()
            .next()
            .map_or(true, |c| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
    })
}

/// 从 `at` 开始的连续 token 是否组成 `phrase`。
///
/// 单词标记按子串匹配；多词标记要求首词在 token 末尾、末词在 token 开头，
/// 中间各词完全相同，例如 `<h3>Active branches</h3>`。
pub fn phrase_at(tokens: &[&str], at: usize, phrase: &str) -> bool {
    let words: Vec<&str> = phrase.split_whitespace().collect();
    match words.as_slice() {
        [] => false,
        [word] => tokens.get(at).is_some_and(|t| t.contains(word)),
        [first, middle @ .., last] => {
            let n = words.len();
            if at + n > tokens.len() {
                return false;
            }
            tokens[at].ends_with(first)
                && middle.iter().enumerate().all(|(i, w)| tokens[at + 1 + i] == *w)
                && tokens[at + n - 1].starts_with(last)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phrase_at() {
        let tokens = tokenize("<h3>Active branches</h3> <li>");
        assert!(phrase_at(&tokens, 0, "Active branches"));
        assert!(!phrase_at(&tokens, 1, "Active branches"));
        assert!(phrase_at(&tokens, 2, "li"));
        assert!(!phrase_at(&tokens, 2, "Active branches"));
        assert!(!phrase_at(&tokens, 0, "  "));
    }

    #[test]
    fn test_tokenize_splits_on_any_whitespace() {
        let tokens = tokenize("<a\n  href=\"/alice/demo\"\titemprop=\"name codeRepository\">");
        assert_eq!(
            tokens,
            vec!["<a", "href=\"/alice/demo\"", "itemprop=\"name", "codeRepository\">"]
        );
    }

    #[test]
    fn test_quoted_after_marker() {
        assert_eq!(
            quoted_after("data-branch-name=\"feature/x\"", "data-branch-name"),
            "feature/x"
        );
        assert_eq!(
            quoted_after("class=\"a\"datetime=\"2023-01-01T00:00:00Z\">", "datetime"),
            "2023-01-01T00:00:00Z"
        );
    }

    #[test]
    fn test_quoted_without_marker_scans_whole_token() {
        assert_eq!(quoted("href=\"/alice/my-repo/\""), "/alice/my-repo/");
        assert_eq!(quoted_after("href=\"/alice/x\"", "missing"), "/alice/x");
    }

    #[test]
    fn test_quoted_unterminated_returns_partial() {
        assert_eq!(quoted("href=\"/alice/trunc"), "/alice/trunc");
    }

    #[test]
    fn test_quoted_no_quotes_is_empty() {
        assert_eq!(quoted("codeRepository>"), "");
        assert_eq!(quoted_after("", "x"), "");
    }

    #[test]
    fn test_digits_and_first_digit() {
        assert_eq!(digits("data-date=\"2023-01-15\""), "20230115");
        assert_eq!(first_digit("data-count=\"7\""), Some(7));
        assert_eq!(first_digit("data-count=\"12\""), Some(1));
        assert_eq!(first_digit("none"), None);
    }

    #[test]
    fn test_contains_word_respects_boundary() {
        assert!(contains_word("href=\"/alice/demo/commits?author=alice\"", "author=alice"));
        assert!(contains_word("author=alice", "author=alice"));
        assert!(!contains_word("href=\"?author=alice2\"", "author=alice"));
        assert!(!contains_word("author=alice-bot", "author=alice"));
        assert!(contains_word("?author=alice-bot&author=alice\"", "author=alice"));
        assert!(!contains_word("anything", ""));
    }
}
