//! コミットメッセージの先頭に付けるカテゴリ（絵文字）表。

use crate::error::AppError;

/// 既定のカテゴリ表。先頭の空白までがトークン、残りは説明。
pub const DEFAULT_CATEGORIES: &[&str] = &[
    "🎉 init",
    "✨ feature",
    "🐛 bugfix",
    "📝 docs",
    "🎨 style",
    "♻️ refactor",
    "⚡ perf",
    "✅ test",
    "🔧 config",
    "📦 build",
    "👷 ci",
    "🔥 remove",
    "🚑 hotfix",
    "🔒 security",
    "⬆️ deps",
    "🚀 release",
    "🚧 wip",
    "⏪ revert",
];

/// 番号からトークンを引く読み取り専用の表。
#[derive(Clone, Debug)]
pub struct CategoryIndex {
    entries: Vec<String>,
}

impl Default for CategoryIndex {
    fn default() -> Self {
        Self::new(DEFAULT_CATEGORIES.iter().map(|s| s.to_string()).collect())
    }
}

impl CategoryIndex {
    pub fn new(entries: Vec<String>) -> Self {
        Self { entries }
    }

    /// 表示用に全エントリを返す。
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// 入力された番号を解釈し、対応するトークンを返す。
    pub fn resolve(&self, selector: &str) -> Result<&str, AppError> {
        let invalid = || AppError::SelectorResolution {
            selector: selector.to_string(),
            len: self.entries.len(),
        };
        let idx: usize = selector.trim().parse().map_err(|_| invalid())?;
        let entry = self.entries.get(idx).ok_or_else(invalid)?;
        Ok(token_of(entry))
    }
}

/// エントリ先頭の空白までを取り出す。
fn token_of(entry: &str) -> &str {
    entry.split(' ').next().unwrap_or(entry)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn five() -> CategoryIndex {
        CategoryIndex::new(
            ["🎉 init", "✨ feature", "🐛 bugfix", "📝 docs", "🎨 style"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        )
    }

    #[test]
    fn test_resolve_returns_token_only() {
        assert_eq!(five().resolve("2").unwrap(), "🐛");
    }

    #[test]
    fn test_every_index_in_bounds_resolves() {
        let idx = five();
        for i in 0..idx.entries().len() {
            assert!(idx.resolve(&i.to_string()).is_ok(), "index {i}");
        }
    }

    #[test]
    fn test_out_of_range_and_malformed_selectors_fail() {
        let idx = five();
        for bad in ["5", "99", "-1", "", "two", "1.5", "18446744073709551616"] {
            assert!(
                matches!(
                    idx.resolve(bad),
                    Err(AppError::SelectorResolution { len: 5, .. })
                ),
                "selector {bad:?}"
            );
        }
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        assert_eq!(five().resolve(" 1 ").unwrap(), "✨");
    }

    #[test]
    fn test_default_table_matches_bugfix_slot() {
        // コミット画面の例示と同じ並び。
        assert_eq!(CategoryIndex::default().resolve("2").unwrap(), "🐛");
    }

    #[test]
    fn test_entry_without_description() {
        let idx = CategoryIndex::new(vec!["🔖".into()]);
        assert_eq!(idx.resolve("0").unwrap(), "🔖");
    }
}
