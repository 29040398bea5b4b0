// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow};
use std::env;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

const LOG_ENV: &str = "HELPDESK_LOG";

/// Installs the global subscriber. The terminal belongs to the UI, so events
/// go to the log file as plain text; with no resolvable file, logging is off.
pub fn init(config: &Config) -> Result<Option<PathBuf>> {
    let directive = resolve_directive(env::var(LOG_ENV).ok(), config.log_level());
    let filter = EnvFilter::try_new(&directive)
        .with_context(|| format!("invalid log filter {directive:?}; check {LOG_ENV} or [log].level"))?;

    let Some(path) = config.log_file() else {
        return Ok(None);
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| {
            format!(
                "open log file {}; set [log].file to a writable path",
                path.display()
            )
        })?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(true)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|error| anyhow!("install log subscriber: {error}"))?;
    Ok(Some(path))
}

fn resolve_directive(env_override: Option<String>, configured: &str) -> String {
    env_override
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| configured.to_owned())
}

#[cfg(test)]
mod tests {
    use super::resolve_directive;

    #[test]
    fn env_override_wins_over_config() {
        assert_eq!(
            resolve_directive(Some("helpdesk_app=trace".to_owned()), "info"),
            "helpdesk_app=trace"
        );
    }

    #[test]
    fn blank_env_override_falls_back_to_config() {
        assert_eq!(resolve_directive(Some("  ".to_owned()), "warn"), "warn");
        assert_eq!(resolve_directive(None, "debug"), "debug");
    }
}
