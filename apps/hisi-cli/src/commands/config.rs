//! # Config Commands
//!
//! Shows the effective client configuration and persists the backend URL.
//!
//! `set-url` edits the file alone: values that came from `HISI_*` variables
//! or `--api-url` in this invocation are never written back.

use std::path::PathBuf;

use hisi_client::ClientConfig;
use serde_json::{json, Value};
use tracing::info;

use crate::cli::ConfigCommand;
use crate::error::{CommandError, CommandResult, ErrorCode};
use crate::state::AppContext;

pub fn run(ctx: &AppContext, command: ConfigCommand) -> CommandResult<Value> {
    match command {
        ConfigCommand::Show => show(ctx),
        ConfigCommand::SetUrl { url } => set_url(ctx, url),
    }
}

fn config_file(ctx: &AppContext) -> CommandResult<PathBuf> {
    ClientConfig::config_file_path(ctx.config_path.clone()).ok_or_else(|| {
        CommandError::new(
            ErrorCode::ConfigError,
            "No location for the config file; pass --config or set HISI_CONFIG",
        )
    })
}

fn show(ctx: &AppContext) -> CommandResult<Value> {
    let path = ClientConfig::config_file_path(ctx.config_path.clone());
    Ok(json!({
        "path": path.map(|p| p.display().to_string()),
        "config": serde_json::to_value(&ctx.config)?,
    }))
}

fn set_url(ctx: &AppContext, url: String) -> CommandResult<Value> {
    let path = config_file(ctx)?;

    let mut file = ClientConfig::load_file(Some(&path))?;
    file.api.base_url = url.trim().to_string();
    file.validate()?;
    file.save(&path)?;

    info!(path = %path.display(), base_url = %file.api.base_url, "API URL saved");
    Ok(json!({
        "message": "API URL saved",
        "path": path.display().to_string(),
        "base_url": file.api.base_url,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hisi_client::{ApiClient, MemoryStorage};
    use std::sync::Arc;

    fn context(path: PathBuf) -> AppContext {
        let config = ClientConfig::with_base_url("https://env.hisistudio.com");
        let client = ApiClient::connect(&config, Arc::new(MemoryStorage::new())).unwrap();
        AppContext::with_client(config, client).with_config_path(path)
    }

    #[test]
    fn test_set_url_keeps_other_file_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("client.toml");
        std::fs::write(&path, "[api]\nrequest_timeout_secs = 12\n").unwrap();

        let value = run(&context(path.clone()), ConfigCommand::SetUrl {
            url: " https://api.hisistudio.com ".into(),
        })
        .unwrap();
        assert_eq!(value["base_url"], "https://api.hisistudio.com");

        let saved = ClientConfig::load_file(Some(&path)).unwrap();
        assert_eq!(saved.api.base_url, "https://api.hisistudio.com");
        assert_eq!(saved.api.request_timeout_secs, 12);
    }

    #[test]
    fn test_set_url_rejects_bad_url_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("client.toml");

        let err = run(&context(path.clone()), ConfigCommand::SetUrl {
            url: "ftp://files.hisistudio.com".into(),
        })
        .unwrap_err();

        assert_eq!(err.code, ErrorCode::ConfigError);
        assert!(!path.exists());
    }

    #[test]
    fn test_show_reports_effective_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("client.toml");

        let value = run(&context(path.clone()), ConfigCommand::Show).unwrap();
        assert_eq!(value["config"]["api"]["base_url"], "https://env.hisistudio.com");
        assert_eq!(value["path"], path.display().to_string());
    }
}
