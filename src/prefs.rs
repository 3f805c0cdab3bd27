//! Global UI preferences
//!
//! One [`PreferenceContext`] is created at startup and handed to whoever
//! needs it. Updates persist to `preferences.toml` and are broadcast over a
//! watch channel, so every subscriber observes the latest value.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::config::{load_toml_file, write_toml_file};
use crate::error::Result;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
    System,
}

impl ThemeMode {
    pub const ALL: [ThemeMode; 3] = [ThemeMode::Dark, ThemeMode::Light, ThemeMode::System];

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Dark => "dark",
            ThemeMode::Light => "light",
            ThemeMode::System => "system",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::System,
            ThemeMode::System => ThemeMode::Dark,
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ThemeMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        ThemeMode::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown theme '{}' (expected dark, light or system)", s))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Zh,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Zh => "zh",
        }
    }

    pub fn toggle(&self) -> Self {
        match self {
            Language::En => Language::Zh,
            Language::Zh => Language::En,
        }
    }

    pub fn labels(&self) -> &'static Labels {
        match self {
            Language::En => &EN,
            Language::Zh => &ZH,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Language::En),
            "zh" => Ok(Language::Zh),
            other => Err(format!("unknown language '{}' (expected en or zh)", other)),
        }
    }
}

/// Screen labels for one language
#[derive(Debug)]
pub struct Labels {
    pub title: &'static str,
    pub status: &'static str,
    pub preferences: &'static str,
    pub theme: &'static str,
    pub language: &'static str,
    pub active: &'static str,
    pub default: &'static str,
    pub unknown: &'static str,
    pub not_configured: &'static str,
    pub no_records: &'static str,
    pub add_title: &'static str,
    pub edit_title: &'static str,
    pub uses_env: &'static str,
    pub delete_prompt: &'static str,
}

static EN: Labels = Labels {
    title: "Provider Settings",
    status: "Status",
    preferences: "Preferences",
    theme: "Theme",
    language: "Language",
    active: "active",
    default: "default",
    unknown: "unknown",
    not_configured: "not configured",
    no_records: "No configurations yet. Press 'n' to add one.",
    add_title: "Add configuration",
    edit_title: "Edit configuration",
    uses_env: "uses",
    delete_prompt: "Delete configuration",
};

static ZH: Labels = Labels {
    title: "服务配置",
    status: "状态",
    preferences: "偏好设置",
    theme: "主题",
    language: "语言",
    active: "使用中",
    default: "默认",
    unknown: "未知",
    not_configured: "未配置",
    no_records: "暂无配置，按 'n' 添加。",
    add_title: "添加配置",
    edit_title: "编辑配置",
    uses_env: "使用",
    delete_prompt: "删除配置",
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub theme: ThemeMode,
    pub language: Language,
}

/// Shared preference state with persist-and-notify updates
pub struct PreferenceContext {
    path: PathBuf,
    tx: watch::Sender<Preferences>,
}

impl PreferenceContext {
    /// Load persisted preferences, or defaults when the file is missing or bad
    pub fn init(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let prefs: Preferences = match load_toml_file(&path) {
            Ok(loaded) => loaded.unwrap_or_default(),
            Err(e) => {
                tracing::warn!("{}; using default preferences", e);
                Preferences::default()
            }
        };
        tracing::debug!("Loaded preferences from {}: {:?}", path.display(), prefs);
        let (tx, _rx) = watch::channel(prefs);
        Self { path, tx }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self) -> Preferences {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<Preferences> {
        self.tx.subscribe()
    }

    /// Apply `f`, persist, and notify subscribers. The in-memory value is
    /// only changed once the file write succeeds.
    pub fn update(&self, f: impl FnOnce(&mut Preferences)) -> Result<Preferences> {
        let mut next = self.get();
        f(&mut next);
        write_toml_file(&self.path, &next)?;
        self.tx.send_replace(next);
        tracing::info!("Preferences updated: theme={}, language={}", next.theme, next.language);
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = PreferenceContext::init(temp_dir.path().join("preferences.toml"));
        assert_eq!(ctx.get(), Preferences::default());
        assert_eq!(ctx.get().theme, ThemeMode::Dark);
        assert_eq!(ctx.get().language, Language::En);
    }

    #[test]
    fn test_update_persists_and_reloads() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("preferences.toml");
        let ctx = PreferenceContext::init(&path);
        ctx.update(|p| {
            p.theme = ThemeMode::Light;
            p.language = Language::Zh;
        })
        .unwrap();

        let reloaded = PreferenceContext::init(&path);
        assert_eq!(
            reloaded.get(),
            Preferences {
                theme: ThemeMode::Light,
                language: Language::Zh
            }
        );
    }

    #[tokio::test]
    async fn test_subscribers_see_latest_value() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = PreferenceContext::init(temp_dir.path().join("preferences.toml"));
        let mut first = ctx.subscribe();
        let second = ctx.subscribe();

        ctx.update(|p| p.theme = ThemeMode::System).unwrap();
        ctx.update(|p| p.theme = ThemeMode::Light).unwrap();

        assert!(first.has_changed().unwrap());
        assert_eq!(first.borrow_and_update().theme, ThemeMode::Light);
        assert!(!first.has_changed().unwrap());
        assert_eq!(second.borrow().theme, ThemeMode::Light);
    }

    #[test]
    fn test_failed_write_leaves_value_unchanged() {
        let temp_dir = TempDir::new().unwrap();
        // A directory where the file should be makes the write fail
        let path = temp_dir.path().join("preferences.toml");
        std::fs::create_dir_all(&path).unwrap();

        let ctx = PreferenceContext::init(&path);
        assert!(ctx.update(|p| p.language = Language::Zh).is_err());
        assert_eq!(ctx.get().language, Language::En);
    }

    #[test]
    fn test_partial_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("preferences.toml");
        std::fs::write(&path, "language = \"zh\"\n").unwrap();
        let ctx = PreferenceContext::init(&path);
        assert_eq!(ctx.get().language, Language::Zh);
        assert_eq!(ctx.get().theme, ThemeMode::Dark);
    }

    #[test]
    fn test_malformed_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("preferences.toml");
        std::fs::write(&path, "theme = = \"neon\"").unwrap();
        let ctx = PreferenceContext::init(&path);
        assert_eq!(ctx.get(), Preferences::default());
    }

    #[rstest]
    #[case("dark", Ok(ThemeMode::Dark))]
    #[case("LIGHT", Ok(ThemeMode::Light))]
    #[case(" system ", Ok(ThemeMode::System))]
    #[case("solarized", Err(()))]
    fn test_theme_mode_parse(#[case] input: &str, #[case] expected: std::result::Result<ThemeMode, ()>) {
        assert_eq!(input.parse::<ThemeMode>().map_err(|_| ()), expected);
    }

    #[test]
    fn test_language_labels() {
        assert_eq!(Language::En.labels().title, "Provider Settings");
        assert_ne!(Language::Zh.labels().title, Language::En.labels().title);
        assert_eq!("zh".parse::<Language>(), Ok(Language::Zh));
        assert!("fr".parse::<Language>().is_err());
    }
}
