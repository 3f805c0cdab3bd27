//! Non-interactive subcommands

use std::io::Write;

use crate::api::ConfigApi;
use crate::cli::Command;
use crate::error::{ConsoleError, Result};
use crate::model::providers::providers_for;
use crate::model::{Category, ConfigRecord};
use crate::prefs::PreferenceContext;

pub async fn run_command(
    command: &Command,
    api: &dyn ConfigApi,
    prefs: &PreferenceContext,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        Command::Status => print_status(api, out).await,
        Command::List { category } => {
            let records = api.list(*category).await?;
            print_records(*category, &records, out)
        }
        Command::Activate { category, id } => {
            api.activate(*category, id).await?;
            tracing::info!("Activated {} configuration {}", category, id);
            writeln!(out, "Activated {} configuration {}", category, id)?;
            Ok(())
        }
        Command::Delete { category, id } => {
            let records = api.list(*category).await?;
            let record = find_record(*category, &records, id)?;
            if !record.can_delete() {
                return Err(ConsoleError::Invalid(format!(
                    "'{}' is the default {} configuration and cannot be deleted",
                    record.name, category
                )));
            }
            api.delete(*category, id).await?;
            tracing::info!("Deleted {} configuration {}", category, id);
            writeln!(out, "Deleted {} configuration '{}'", category, record.name)?;
            Ok(())
        }
        Command::Test { category, id } => {
            let outcome = api.test_saved(*category, id).await?;
            let verdict = if outcome.success { "OK" } else { "FAILED" };
            if outcome.message.is_empty() {
                writeln!(out, "{}", verdict)?;
            } else {
                writeln!(out, "{}: {}", verdict, outcome.message)?;
            }
            if outcome.success {
                Ok(())
            } else {
                Err(ConsoleError::Invalid("Connection test failed".to_string()))
            }
        }
        Command::Providers { category } => {
            for provider in providers_for(*category) {
                let local = if provider.local { " (local)" } else { "" };
                if provider.default_endpoint.is_empty() {
                    writeln!(out, "{:<12} {}{}", provider.id, provider.label, local)?;
                } else {
                    writeln!(
                        out,
                        "{:<12} {}{}  {}",
                        provider.id, provider.label, local, provider.default_endpoint
                    )?;
                }
            }
            Ok(())
        }
        Command::Prefs { theme, language } => {
            let current = if theme.is_some() || language.is_some() {
                prefs.update(|p| {
                    if let Some(theme) = theme {
                        p.theme = *theme;
                    }
                    if let Some(language) = language {
                        p.language = *language;
                    }
                })?
            } else {
                prefs.get()
            };
            writeln!(out, "theme    = {}", current.theme)?;
            writeln!(out, "language = {}", current.language)?;
            Ok(())
        }
    }
}

fn find_record<'a>(category: Category, records: &'a [ConfigRecord], id: &str) -> Result<&'a ConfigRecord> {
    records
        .iter()
        .find(|r| r.id == id)
        .ok_or_else(|| ConsoleError::Invalid(format!("No {} configuration with id '{}'", category, id)))
}

async fn print_status(api: &dyn ConfigApi, out: &mut impl Write) -> Result<()> {
    let snapshot = api.status().await?;
    for category in Category::ALL {
        match snapshot.get(*category) {
            Some(status) if status.configured => {
                let name = status.active_name.as_deref().unwrap_or("-");
                let detail = match (&status.provider, &status.model) {
                    (Some(p), Some(m)) => format!("{} / {}", p, m),
                    (Some(p), None) => p.clone(),
                    _ => String::new(),
                };
                writeln!(
                    out,
                    "{:<10} configured  {} ({})  [{} total]",
                    category, name, detail, status.total
                )?;
            }
            Some(status) => writeln!(out, "{:<10} not configured  [{} total]", category, status.total)?,
            None => writeln!(out, "{:<10} unknown", category)?,
        }
    }
    let summary = snapshot.summary();
    writeln!(out, "{}/{} services configured", summary.configured, summary.total)?;

    match api.ports().await {
        Ok(ports) => {
            let fmt_port = |p: Option<u16>| p.map(|p| p.to_string()).unwrap_or_else(|| "-".to_string());
            writeln!(
                out,
                "ports: backend {}, frontend {}",
                fmt_port(ports.backend),
                fmt_port(ports.frontend)
            )?;
        }
        Err(e) => tracing::warn!("Failed to fetch ports: {}", e),
    }
    Ok(())
}

fn print_records(category: Category, records: &[ConfigRecord], out: &mut impl Write) -> Result<()> {
    if records.is_empty() {
        writeln!(out, "No {} configurations", category)?;
        return Ok(());
    }
    for record in records {
        let mut flags = Vec::new();
        if record.is_active {
            flags.push("active");
        }
        if record.is_default {
            flags.push("default");
        }
        let model = record.model.as_deref().unwrap_or("-");
        write!(
            out,
            "{:<8} {:<20} {:<12} {:<24}",
            record.id, record.name, record.provider, model
        )?;
        if category.has_endpoint() {
            write!(out, " endpoint={}", record.endpoint_display())?;
        }
        write!(out, " key={}", record.credential_display())?;
        if !flags.is_empty() {
            write!(out, " [{}]", flags.join(", "))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::api::{ApiError, ApiResult};
    use crate::model::{ConfigPayload, EnvValue, PortsInfo, ServiceStatus, StatusSnapshot, TestOutcome};
    use crate::prefs::{Language, ThemeMode};
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// In-memory backend recording the calls it receives
    #[derive(Default)]
    pub(crate) struct FakeApi {
        pub records: Vec<ConfigRecord>,
        pub calls: Mutex<Vec<String>>,
    }

    impl FakeApi {
        fn log(&self, call: String) {
            if let Ok(mut calls) = self.calls.lock() {
                calls.push(call);
            }
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().map(|c| c.clone()).unwrap_or_default()
        }
    }

    #[async_trait]
    impl ConfigApi for FakeApi {
        async fn status(&self) -> ApiResult<StatusSnapshot> {
            Ok(StatusSnapshot {
                llm: Some(ServiceStatus {
                    configured: true,
                    active_name: Some("local".to_string()),
                    provider: Some("ollama".to_string()),
                    model: Some("llama3".to_string()),
                    total: 2,
                    ..Default::default()
                }),
                tts: Some(ServiceStatus::default()),
                ..Default::default()
            })
        }

        async fn ports(&self) -> ApiResult<PortsInfo> {
            Err(ApiError::Network {
                message: "refused".to_string(),
            })
        }

        async fn list(&self, category: Category) -> ApiResult<Vec<ConfigRecord>> {
            self.log(format!("list {}", category));
            Ok(self.records.iter().filter(|r| r.category == category).cloned().collect())
        }

        async fn create(&self, category: Category, _payload: &ConfigPayload) -> ApiResult<ConfigRecord> {
            self.log(format!("create {}", category));
            Err(ApiError::Rejected {
                status: 400,
                detail: "not supported by fake".to_string(),
            })
        }

        async fn update(&self, category: Category, id: &str, _payload: &ConfigPayload) -> ApiResult<ConfigRecord> {
            self.log(format!("update {} {}", category, id));
            self.records
                .iter()
                .find(|r| r.id == id)
                .cloned()
                .ok_or_else(|| ApiError::Rejected {
                    status: 404,
                    detail: "not found".to_string(),
                })
        }

        async fn delete(&self, category: Category, id: &str) -> ApiResult<()> {
            self.log(format!("delete {} {}", category, id));
            Ok(())
        }

        async fn activate(&self, category: Category, id: &str) -> ApiResult<()> {
            self.log(format!("activate {} {}", category, id));
            Ok(())
        }

        async fn test_saved(&self, category: Category, id: &str) -> ApiResult<TestOutcome> {
            self.log(format!("test {} {}", category, id));
            Ok(TestOutcome {
                success: id != "bad",
                message: format!("checked {}", id),
            })
        }

        async fn test_draft(&self, category: Category, _payload: &ConfigPayload) -> ApiResult<TestOutcome> {
            self.log(format!("test-draft {}", category));
            Ok(TestOutcome {
                success: true,
                message: String::new(),
            })
        }
    }

    pub(crate) fn record(id: &str, category: Category, is_default: bool) -> ConfigRecord {
        ConfigRecord {
            id: id.to_string(),
            category,
            name: format!("cfg-{}", id),
            provider: "openai".to_string(),
            endpoint: Some(EnvValue::env("LLM_HOST")),
            credential: Some(EnvValue::literal("sk-never-shown")),
            model: Some("gpt-4o".to_string()),
            dimensions: None,
            voice: None,
            is_default,
            is_active: is_default,
        }
    }

    async fn run(api: &FakeApi, command: Command) -> (Result<()>, String) {
        let temp_dir = TempDir::new().unwrap();
        let prefs = PreferenceContext::init(temp_dir.path().join("preferences.toml"));
        let mut out = Vec::new();
        let result = run_command(&command, api, &prefs, &mut out).await;
        (result, String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn test_list_never_prints_credentials() {
        let api = FakeApi {
            records: vec![record("1", Category::Llm, true), record("2", Category::Llm, false)],
            ..Default::default()
        };
        let (result, output) = run(&api, Command::List { category: Category::Llm }).await;
        assert!(result.is_ok());
        assert!(output.contains("cfg-1"));
        assert!(output.contains("endpoint=$LLM_HOST"));
        assert!(output.contains("[active, default]"));
        assert!(!output.contains("sk-never-shown"));
    }

    #[tokio::test]
    async fn test_delete_refuses_default_without_calling_backend() {
        let api = FakeApi {
            records: vec![record("1", Category::Llm, true)],
            ..Default::default()
        };
        let (result, _) = run(
            &api,
            Command::Delete {
                category: Category::Llm,
                id: "1".to_string(),
            },
        )
        .await;
        assert!(matches!(result, Err(ConsoleError::Invalid(_))));
        assert_eq!(api.calls(), vec!["list llm"]);
    }

    #[tokio::test]
    async fn test_delete_custom_record() {
        let api = FakeApi {
            records: vec![record("1", Category::Llm, true), record("2", Category::Llm, false)],
            ..Default::default()
        };
        let (result, output) = run(
            &api,
            Command::Delete {
                category: Category::Llm,
                id: "2".to_string(),
            },
        )
        .await;
        assert!(result.is_ok());
        assert_eq!(output, "Deleted llm configuration 'cfg-2'\n");
        assert_eq!(api.calls(), vec!["list llm", "delete llm 2"]);
    }

    #[tokio::test]
    async fn test_failed_connection_test_is_an_error() {
        let api = FakeApi::default();
        let (result, output) = run(
            &api,
            Command::Test {
                category: Category::Llm,
                id: "bad".to_string(),
            },
        )
        .await;
        assert!(result.is_err());
        assert_eq!(output, "FAILED: checked bad\n");
    }

    #[tokio::test]
    async fn test_status_degrades_missing_categories() {
        let api = FakeApi::default();
        let (result, output) = run(&api, Command::Status).await;
        assert!(result.is_ok());
        assert!(output.contains("configured  local (ollama / llama3)"));
        assert!(output.contains("tts        not configured"));
        assert!(output.contains("search     unknown"));
        assert!(!output.contains("ports:"));
    }

    #[tokio::test]
    async fn test_providers_lists_catalog() {
        let api = FakeApi::default();
        let (_, output) = run(&api, Command::Providers { category: Category::Search }).await;
        assert_eq!(output.lines().count(), 4);
        assert!(output.contains("searxng"));
        assert!(output.contains("(local)"));
    }

    #[tokio::test]
    async fn test_prefs_update() {
        let temp_dir = TempDir::new().unwrap();
        let prefs = PreferenceContext::init(temp_dir.path().join("preferences.toml"));
        let api = FakeApi::default();
        let mut out = Vec::new();
        run_command(
            &Command::Prefs {
                theme: Some(ThemeMode::Light),
                language: Some(Language::Zh),
            },
            &api,
            &prefs,
            &mut out,
        )
        .await
        .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "theme    = light\nlanguage = zh\n");
        assert_eq!(prefs.get().theme, ThemeMode::Light);
    }
}
