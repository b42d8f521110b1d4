//! Command line and config file handling for githubba.
//!
//! Settings come from three layers, later ones winning: built-in defaults,
//! `$XDG_CONFIG_HOME/githubba/config.toml`, then command line flags (some of
//! which also read environment variables). A config file that is missing is
//! not an error; one that fails to parse is reported and the defaults are used.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use githubba_core::github::DEFAULT_API_URL;
use githubba_core::pagination::{LatchPolicy, LOOKAHEAD_THRESHOLD, RESET_GROWTH};
use githubba_core::stack::{EndOfList, StackConfig, WINDOW_SIZE};
use githubba_core::types::FeedType;
use serde::Deserialize;

/// Swipe through GitHub repositories in your terminal.
#[derive(Debug, Default, Parser)]
#[command(name = "githubba", version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "GITHUBBA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Feed to start with (random, new)
    #[arg(short, long)]
    pub feed: Option<FeedType>,

    /// Restrict the feed to one language, e.g. "Rust"
    #[arg(short, long)]
    pub language: Option<String>,

    /// Color theme (dark, catppuccin-mocha)
    #[arg(long)]
    pub theme: Option<String>,

    /// GitHub token; raises the search rate limit
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// GitHub API base URL
    #[arg(long)]
    pub api_url: Option<String>,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log filter used when GITHUBBA_LOG is unset, e.g. "debug"
    #[arg(long)]
    pub log_level: Option<String>,

    /// Do not show the swipe hint on startup
    #[arg(long)]
    pub no_hint: bool,
}

/// How the "next page requested" latch is released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LatchMode {
    /// After the list grows by more than `latch_reset_growth` records.
    #[default]
    Growth,
    /// When the page request finishes, successfully or not.
    Acknowledged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EndOfListMode {
    #[default]
    Exhaust,
    Hold,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("invalid config in {path}: {source}")]
    Parse { path: PathBuf, source: toml::de::Error },
}

/// Effective settings for one run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub theme: String,
    /// `None` searches every language.
    pub language: Option<String>,
    pub feed: FeedType,
    pub token: Option<String>,
    pub api_url: String,
    pub log_level: String,
    pub log_file: Option<PathBuf>,
    pub feedback_ms: u64,
    pub lookahead: usize,
    pub latch: LatchMode,
    pub latch_reset_growth: usize,
    pub end_of_list: EndOfListMode,
    pub hint: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "catppuccin-mocha".to_owned(),
            language: None,
            feed: FeedType::default(),
            token: None,
            api_url: DEFAULT_API_URL.to_owned(),
            log_level: "info".to_owned(),
            log_file: None,
            feedback_ms: 600,
            lookahead: LOOKAHEAD_THRESHOLD,
            latch: LatchMode::default(),
            latch_reset_growth: RESET_GROWTH,
            end_of_list: EndOfListMode::default(),
            hint: true,
        }
    }
}

impl Config {
    /// Reads `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => return Err(ConfigError::Read { path: path.to_owned(), source }),
        };
        let mut config: Config = toml::from_str(&raw)
            .map_err(|source| ConfigError::Parse { path: path.to_owned(), source })?;
        config.normalize();
        Ok(config)
    }

    /// Lays command line values over the file values.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(feed) = cli.feed {
            self.feed = feed;
        }
        if let Some(language) = &cli.language {
            self.language = Some(language.clone());
        }
        if let Some(theme) = &cli.theme {
            self.theme = theme.clone();
        }
        if let Some(token) = &cli.token {
            self.token = Some(token.clone());
        }
        if let Some(api_url) = &cli.api_url {
            self.api_url = api_url.clone();
        }
        if let Some(log_file) = &cli.log_file {
            self.log_file = Some(log_file.clone());
        }
        if let Some(log_level) = &cli.log_level {
            self.log_level = log_level.clone();
        }
        if cli.no_hint {
            self.hint = false;
        }
        self.normalize();
    }

    fn normalize(&mut self) {
        self.language = self
            .language
            .take()
            .map(|l| l.trim().to_owned())
            .filter(|l| !l.is_empty() && !l.eq_ignore_ascii_case("all"));
        self.token = self.token.take().filter(|t| !t.trim().is_empty());
    }

    /// Engine settings derived from this config.
    pub fn stack_config(&self) -> StackConfig {
        StackConfig {
            window_size: WINDOW_SIZE,
            lookahead: self.lookahead,
            latch: match self.latch {
                LatchMode::Growth => LatchPolicy::GrowthThreshold(self.latch_reset_growth),
                LatchMode::Acknowledged => LatchPolicy::Acknowledged,
            },
            feedback_duration: Duration::from_millis(self.feedback_ms),
            end_of_list: match self.end_of_list {
                EndOfListMode::Exhaust => EndOfList::Exhaust,
                EndOfListMode::Hold => EndOfList::HoldLastCard,
            },
            show_hint: self.hint,
        }
    }

    /// Log file path, defaulting to the XDG state directory.
    pub fn log_path(&self) -> PathBuf {
        self.log_file.clone().unwrap_or_else(|| {
            xdg_dir("XDG_STATE_HOME", ".local/state").join("githubba").join("githubba.log")
        })
    }
}

/// Returns the path to the githubba config file.
///
/// Prefers `$XDG_CONFIG_HOME/githubba/config.toml`; falls back to
/// `~/.config/githubba/config.toml` when the env var is absent.
pub fn config_path() -> PathBuf {
    xdg_dir("XDG_CONFIG_HOME", ".config").join("githubba").join("config.toml")
}

fn xdg_dir(var: &str, home_relative: &str) -> PathBuf {
    std::env::var(var)
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| std::env::var("HOME").ok().map(|h| PathBuf::from(h).join(home_relative)))
        .unwrap_or_else(|| PathBuf::from(home_relative))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn missing_file_is_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let (_dir, path) = write_config(
            r#"
            theme = "dark"
            feed = "new"
            language = "Rust"
            latch = "acknowledged"
            end_of_list = "hold"
            feedback_ms = 250
            "#,
        );
        let config = Config::load(&path).unwrap();

        assert_eq!(config.theme, "dark");
        assert_eq!(config.feed, FeedType::New);
        assert_eq!(config.language.as_deref(), Some("Rust"));
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.lookahead, LOOKAHEAD_THRESHOLD);

        let stack = config.stack_config();
        assert_eq!(stack.latch, LatchPolicy::Acknowledged);
        assert_eq!(stack.end_of_list, EndOfList::HoldLastCard);
        assert_eq!(stack.feedback_duration, Duration::from_millis(250));
    }

    #[test]
    fn parse_errors_are_reported() {
        let (_dir, path) = write_config("feed = \"sideways\"");
        assert!(matches!(Config::load(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn blank_and_all_languages_mean_no_filter() {
        let (_dir, path) = write_config("language = \"  \"\ntoken = \"\"");
        let config = Config::load(&path).unwrap();
        assert_eq!(config.language, None);
        assert_eq!(config.token, None);

        let mut config = Config::default();
        config.apply_cli(&Cli { language: Some("all".into()), ..Cli::default() });
        assert_eq!(config.language, None);
    }

    #[test]
    fn command_line_overrides_file() {
        let (_dir, path) = write_config("theme = \"dark\"\nfeed = \"new\"\nhint = true");
        let mut config = Config::load(&path).unwrap();
        let cli = Cli::try_parse_from([
            "githubba",
            "--feed",
            "random",
            "--theme",
            "catppuccin-mocha",
            "--api-url",
            "http://127.0.0.1:9",
            "--no-hint",
        ])
        .unwrap();
        config.apply_cli(&cli);

        assert_eq!(config.feed, FeedType::Random);
        assert_eq!(config.theme, "catppuccin-mocha");
        assert_eq!(config.api_url, "http://127.0.0.1:9");
        assert!(!config.stack_config().show_hint);
    }

    #[test]
    fn growth_latch_uses_configured_threshold() {
        let config = Config { latch_reset_growth: 12, ..Config::default() };
        assert_eq!(config.stack_config().latch, LatchPolicy::GrowthThreshold(12));
    }
}
