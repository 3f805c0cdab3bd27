use clap::{Parser, Subcommand};

use crate::model::Category;
use crate::prefs::{Language, ThemeMode};

/// provider-console: manage LLM, embedding, TTS and search provider configurations
#[derive(Parser, Debug, Clone)]
#[command(name = "provider-console")]
#[command(version)]
#[command(about = "Terminal console for provider configurations", long_about = None)]
pub struct Cli {
    /// Backend base URL (e.g. http://localhost:8000/api). Overrides config.toml.
    #[arg(long, env = "PROVIDER_CONSOLE_API_URL", value_name = "URL")]
    pub api_url: Option<String>,

    /// Log level (trace, debug, info, warn, error). Overrides config.toml.
    #[arg(long)]
    pub log_level: Option<String>,

    /// Run a single operation and exit instead of opening the TUI
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show the per-category status snapshot
    Status,

    /// List configurations for a category
    List { category: Category },

    /// Make a configuration the active one for its category
    Activate { category: Category, id: String },

    /// Delete a configuration (default configurations are refused)
    Delete { category: Category, id: String },

    /// Run a live connection test for a saved configuration
    Test { category: Category, id: String },

    /// Show the providers available for a category
    Providers { category: Category },

    /// Show or change UI preferences
    Prefs {
        #[arg(long)]
        theme: Option<ThemeMode>,
        #[arg(long)]
        language: Option<Language>,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_cli_defaults() {
        std::env::remove_var("PROVIDER_CONSOLE_API_URL");
        let cli = Cli::parse_from(["provider-console"]);
        assert!(cli.api_url.is_none());
        assert!(cli.log_level.is_none());
        assert!(cli.command.is_none());
    }

    #[test]
    #[serial]
    fn test_api_url_from_env() {
        std::env::set_var("PROVIDER_CONSOLE_API_URL", "http://backend:8000/api");
        let cli = Cli::parse_from(["provider-console"]);
        std::env::remove_var("PROVIDER_CONSOLE_API_URL");
        assert_eq!(cli.api_url.as_deref(), Some("http://backend:8000/api"));
    }

    #[test]
    #[serial]
    fn test_api_url_flag_beats_env() {
        std::env::set_var("PROVIDER_CONSOLE_API_URL", "http://from-env/api");
        let cli = Cli::parse_from(["provider-console", "--api-url", "http://from-flag/api"]);
        std::env::remove_var("PROVIDER_CONSOLE_API_URL");
        assert_eq!(cli.api_url.as_deref(), Some("http://from-flag/api"));
    }

    #[test]
    fn test_subcommands() {
        let cli = Cli::parse_from(["provider-console", "activate", "llm", "42"]);
        assert_eq!(
            cli.command,
            Some(Command::Activate {
                category: Category::Llm,
                id: "42".to_string()
            })
        );

        let cli = Cli::parse_from(["provider-console", "prefs", "--theme", "light"]);
        assert_eq!(
            cli.command,
            Some(Command::Prefs {
                theme: Some(ThemeMode::Light),
                language: None
            })
        );
    }

    #[test]
    fn test_unknown_category_rejected() {
        assert!(Cli::try_parse_from(["provider-console", "list", "vision"]).is_err());
    }
}
