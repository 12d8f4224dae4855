//! Config model and loading helpers.

use std::{fs, path::Path, str::FromStr};

use anyhow::{Context, Result, anyhow};
use ratatui::style::Color;
use serde::Deserialize;

use crate::{category::CategoryIndex, shortcuts::Shortcuts};

/// Config file looked up in the working directory when nothing else is given.
pub const DEFAULT_CONFIG_FILE: &str = ".emogit.toml";
/// Environment variable that points at an alternative config file.
pub const CONFIG_ENV: &str = "EMOGIT_CONFIG";

/// Top-level configuration, read from TOML and never written back.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Colors used for focused / blurred elements.
    pub theme: ThemeCfg,
    /// Character limits of the commit form fields.
    pub limits: LimitsCfg,
    /// Replacement category table (`"<token> <description>"` per entry).
    pub categories: Option<Vec<String>>,
    /// Key bindings per screen.
    pub shortcuts: Shortcuts,
}

/// Color names or `#RRGGBB` values.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ThemeCfg {
    pub focused: String,
    pub blurred: String,
}

/// Maximum number of characters per field.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LimitsCfg {
    pub selector: usize,
    pub message: usize,
}

impl Default for ThemeCfg {
    fn default() -> Self {
        Self {
            focused: "#DC143C".into(),
            blurred: "#696969".into(),
        }
    }
}

impl Default for LimitsCfg {
    fn default() -> Self {
        Self {
            selector: 32,
            message: 72,
        }
    }
}

/// Parsed, immutable styling shared by every screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub focused: Color,
    pub blurred: Color,
}

impl Config {
    /// Load from the explicit path, `$EMOGIT_CONFIG`, or `.emogit.toml`.
    /// Only an explicitly requested file has to exist.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Self::from_file(Path::new(&path));
        }
        let path = Path::new(DEFAULT_CONFIG_FILE);
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    fn from_file(path: &Path) -> Result<Self> {
        let s = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let cfg = Self::parse(&s).with_context(|| format!("invalid config {}", path.display()))?;
        tracing::info!("config loaded from {}", path.display());
        Ok(cfg)
    }

    pub fn parse(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Resolve the color strings once at startup.
    pub fn theme(&self) -> Result<Theme> {
        let parse = |s: &str| Color::from_str(s).map_err(|_| anyhow!("invalid color {s:?}"));
        Ok(Theme {
            focused: parse(&self.theme.focused)?,
            blurred: parse(&self.theme.blurred)?,
        })
    }

    /// Configured category table, or the built-in one.
    pub fn category_index(&self) -> CategoryIndex {
        match &self.categories {
            Some(entries) if !entries.is_empty() => CategoryIndex::new(entries.clone()),
            Some(_) => {
                tracing::warn!("empty category table in config, using defaults");
                CategoryIndex::default()
            }
            None => CategoryIndex::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let cfg = Config::parse("").unwrap();
        assert_eq!(cfg.limits.selector, 32);
        assert_eq!(cfg.limits.message, 72);
        assert_eq!(cfg.shortcuts.stage.stage_all, vec!["a"]);
        assert_eq!(
            cfg.theme().unwrap(),
            Theme {
                focused: Color::Rgb(0xDC, 0x14, 0x3C),
                blurred: Color::Rgb(0x69, 0x69, 0x69),
            }
        );
    }

    #[test]
    fn test_partial_sections_keep_other_defaults() {
        let cfg = Config::parse(
            r#"
categories = ["🔖 tag", "🐛 fix"]

[limits]
message = 50

[theme]
focused = "yellow"

[shortcuts.stage]
next = ["Tab"]
"#,
        )
        .unwrap();

        assert_eq!(cfg.limits.message, 50);
        assert_eq!(cfg.limits.selector, 32);
        assert_eq!(cfg.theme().unwrap().focused, Color::Yellow);
        assert_eq!(cfg.shortcuts.stage.next, vec!["Tab"]);
        assert_eq!(cfg.shortcuts.stage.quit, vec!["Esc", "q"]);
        assert_eq!(cfg.category_index().resolve("1").unwrap(), "🐛");
    }

    #[test]
    fn test_invalid_color_is_rejected() {
        let cfg = Config::parse("[theme]\nblurred = \"#zzz\"\n").unwrap();
        assert!(cfg.theme().is_err());
    }

    #[test]
    fn test_empty_category_list_falls_back() {
        let cfg = Config::parse("categories = []\n").unwrap();
        assert_eq!(
            cfg.category_index().entries().len(),
            crate::category::DEFAULT_CATEGORIES.len()
        );
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        assert!(Config::load(Some(Path::new("/nonexistent/emogit.toml"))).is_err());
    }
}
