// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use helpdesk_app::{AssistDelays, SUGGESTION_DELAY, SUMMARY_DELAY, ViewKind};
use helpdesk_tui::{DEFAULT_NARROW_WIDTH, SettingRow};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const CONFIG_VERSION: i64 = 1;
const DEFAULT_LOG_LEVEL: &str = "info";
const LOG_FILE_NAME: &str = "helpdesk.log";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub ui: Ui,
    #[serde(default)]
    pub assist: Assist,
    #[serde(default)]
    pub data: Data,
    #[serde(default)]
    pub log: Log,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            ui: Ui::default(),
            assist: Assist::default(),
            data: Data::default(),
            log: Log::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Ui {
    pub start_view: Option<String>,
    pub narrow_width: Option<u16>,
}

impl Default for Ui {
    fn default() -> Self {
        Self {
            start_view: Some(ViewKind::Inbox.as_str().to_owned()),
            narrow_width: Some(DEFAULT_NARROW_WIDTH),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Assist {
    pub enabled: Option<bool>,
    pub suggestion_delay: Option<String>,
    pub summary_delay: Option<String>,
}

impl Default for Assist {
    fn default() -> Self {
        Self {
            enabled: Some(true),
            suggestion_delay: Some("1500ms".to_owned()),
            summary_delay: Some("2s".to_owned()),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Data {
    pub seed_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Log {
    pub level: Option<String>,
    pub file: Option<String>,
}

impl Default for Log {
    fn default() -> Self {
        Self {
            level: Some(DEFAULT_LOG_LEVEL.to_owned()),
            file: None,
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("HELPDESK_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set HELPDESK_CONFIG_PATH to the config file")
        })?;

        let app_dir = config_root.join(helpdesk_store::APP_NAME);
        fs::create_dir_all(&app_dir)
            .with_context(|| format!("create config directory {}", app_dir.display()))?;
        Ok(app_dir.join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} is not versioned. Add `version = 1` and put values under [ui], [assist], [data], and [log]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if let Some(view) = &self.ui.start_view
            && ViewKind::parse(view).is_none()
        {
            let known = ViewKind::ALL
                .iter()
                .map(|view| view.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            bail!(
                "ui.start_view in {} must be one of {known}, got {view:?}",
                path.display()
            );
        }

        if self.ui.narrow_width == Some(0) {
            bail!("ui.narrow_width in {} must be positive", path.display());
        }

        for (key, raw) in [
            ("assist.suggestion_delay", &self.assist.suggestion_delay),
            ("assist.summary_delay", &self.assist.summary_delay),
        ] {
            if let Some(raw) = raw {
                let parsed =
                    parse_duration(raw).with_context(|| format!("{key} in {}", path.display()))?;
                if parsed <= Duration::ZERO {
                    bail!("{key} in {} must be positive, got {raw}", path.display());
                }
            }
        }

        if let Some(level) = &self.log.level {
            EnvFilter::try_new(level).with_context(|| {
                format!(
                    "log.level in {} is not a valid filter; use a level like info or a directive like helpdesk_app=debug",
                    path.display()
                )
            })?;
        }

        if let Some(seed) = &self.data.seed_path
            && seed.trim().is_empty()
        {
            bail!(
                "data.seed_path in {} is empty; remove it to use the demo seed",
                path.display()
            );
        }

        Ok(())
    }

    pub fn start_view(&self) -> ViewKind {
        self.ui
            .start_view
            .as_deref()
            .and_then(ViewKind::parse)
            .unwrap_or(ViewKind::Inbox)
    }

    pub fn narrow_width(&self) -> u16 {
        self.ui.narrow_width.unwrap_or(DEFAULT_NARROW_WIDTH)
    }

    pub fn assist_enabled(&self) -> bool {
        self.assist.enabled.unwrap_or(true)
    }

    pub fn assist_delays(&self) -> Result<AssistDelays> {
        let suggestions = match &self.assist.suggestion_delay {
            Some(raw) => parse_duration(raw)?,
            None => SUGGESTION_DELAY,
        };
        let summary = match &self.assist.summary_delay {
            Some(raw) => parse_duration(raw)?,
            None => SUMMARY_DELAY,
        };
        Ok(AssistDelays {
            suggestions,
            summary,
        })
    }

    pub fn seed_path(&self) -> Option<PathBuf> {
        self.data.seed_path.as_deref().map(PathBuf::from)
    }

    pub fn log_level(&self) -> &str {
        self.log.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    /// The configured log file, else `<data dir>/helpdesk/helpdesk.log`.
    pub fn log_file(&self) -> Option<PathBuf> {
        match &self.log.file {
            Some(path) => Some(PathBuf::from(path)),
            None => dirs::data_dir()
                .map(|root| root.join(helpdesk_store::APP_NAME).join(LOG_FILE_NAME)),
        }
    }

    /// Effective values, as shown read-only in the settings view.
    pub fn settings_rows(&self, config_path: &Path, seed: &str) -> Vec<SettingRow> {
        let delays = self.assist_delays().unwrap_or_default();
        let log_file = self
            .log_file()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "off".to_owned());
        vec![
            SettingRow::new("config", config_path.display().to_string()),
            SettingRow::new("ui.start_view", self.start_view().as_str()),
            SettingRow::new("ui.narrow_width", self.narrow_width().to_string()),
            SettingRow::new("assist.enabled", self.assist_enabled().to_string()),
            SettingRow::new(
                "assist.suggestion_delay",
                format_duration(delays.suggestions),
            ),
            SettingRow::new("assist.summary_delay", format_duration(delays.summary)),
            SettingRow::new("data.seed", seed),
            SettingRow::new("log.level", self.log_level()),
            SettingRow::new("log.file", log_file),
        ]
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# helpdesk config\n# Place this file at: {}\n\nversion = 1\n\n[ui]\n# inbox | conversations | customers | analytics | settings\nstart_view = \"inbox\"\n# Terminal columns below which list and detail stack instead of sitting side by side\nnarrow_width = {}\n\n[assist]\nenabled = true\nsuggestion_delay = \"1500ms\"\nsummary_delay = \"2s\"\n\n[data]\n# Optional. Default is the built-in demo seed\n# seed_path = \"/absolute/path/to/seed.json\"\n\n[log]\n# Overridden by HELPDESK_LOG\nlevel = \"{}\"\n# Optional. Default is the platform data dir (for example ~/.local/share/helpdesk/helpdesk.log)\n# file = \"/absolute/path/to/helpdesk.log\"\n",
            path.display(),
            DEFAULT_NARROW_WIDTH,
            DEFAULT_LOG_LEVEL,
        )
    }
}

fn parse_duration(raw: &str) -> Result<Duration> {
    if let Some(value) = raw.strip_suffix("ms") {
        let millis: u64 = value
            .parse()
            .with_context(|| format!("invalid duration {raw:?}"))?;
        return Ok(Duration::from_millis(millis));
    }
    if let Some(value) = raw.strip_suffix('s') {
        let secs: u64 = value
            .parse()
            .with_context(|| format!("invalid duration {raw:?}"))?;
        return Ok(Duration::from_secs(secs));
    }
    if let Some(value) = raw.strip_suffix('m') {
        let mins: u64 = value
            .parse()
            .with_context(|| format!("invalid duration {raw:?}"))?;
        return Ok(Duration::from_secs(mins * 60));
    }

    bail!("invalid duration {raw:?}; use one of: <N>ms, <N>s, <N>m (for example 1500ms or 2s)")
}

fn format_duration(duration: Duration) -> String {
    if duration.subsec_millis() == 0 {
        format!("{}s", duration.as_secs())
    } else {
        format!("{}ms", duration.as_millis())
    }
}

#[cfg(test)]
mod tests {
    use super::{Config, format_duration, parse_duration};
    use anyhow::Result;
    use helpdesk_app::ViewKind;
    use std::path::{Path, PathBuf};
    use std::sync::{Mutex, OnceLock};
    use std::time::Duration;

    fn write_config(content: &str) -> Result<(tempfile::TempDir, PathBuf)> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("config.toml");
        std::fs::write(&path, content)?;
        Ok((temp, path))
    }

    fn env_lock() -> std::sync::MutexGuard<'static, ()> {
        static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        match ENV_LOCK.get_or_init(|| Mutex::new(())).lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    #[test]
    fn missing_config_uses_defaults() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let config = Config::load(&temp.path().join("missing.toml"))?;
        assert_eq!(config.version, 1);
        assert_eq!(config.start_view(), ViewKind::Inbox);
        assert_eq!(config.narrow_width(), 100);
        assert!(config.assist_enabled());
        let delays = config.assist_delays()?;
        assert_eq!(delays.suggestions, Duration::from_millis(1500));
        assert_eq!(delays.summary, Duration::from_secs(2));
        assert_eq!(config.log_level(), "info");
        assert!(config.seed_path().is_none());
        Ok(())
    }

    #[test]
    fn unversioned_config_is_rejected_with_actionable_message() -> Result<()> {
        let (_temp, path) = write_config("[assist]\nenabled = false\n")?;
        let error = Config::load(&path).expect_err("unversioned config should fail");
        let message = error.to_string();
        assert!(message.contains("version = 1"));
        assert!(message.contains("[ui], [assist], [data], and [log]"));
        Ok(())
    }

    #[test]
    fn full_config_parses() -> Result<()> {
        let (_temp, path) = write_config(
            "version = 1\n[ui]\nstart_view = \"customers\"\nnarrow_width = 80\n[assist]\nenabled = false\nsuggestion_delay = \"250ms\"\nsummary_delay = \"1m\"\n[data]\nseed_path = \"/srv/seed.json\"\n[log]\nlevel = \"helpdesk_app=debug\"\nfile = \"/tmp/helpdesk-test.log\"\n",
        )?;

        let config = Config::load(&path)?;
        assert_eq!(config.start_view(), ViewKind::Customers);
        assert_eq!(config.narrow_width(), 80);
        assert!(!config.assist_enabled());
        let delays = config.assist_delays()?;
        assert_eq!(delays.suggestions, Duration::from_millis(250));
        assert_eq!(delays.summary, Duration::from_secs(60));
        assert_eq!(config.seed_path(), Some(PathBuf::from("/srv/seed.json")));
        assert_eq!(config.log_level(), "helpdesk_app=debug");
        assert_eq!(
            config.log_file(),
            Some(PathBuf::from("/tmp/helpdesk-test.log"))
        );
        Ok(())
    }

    #[test]
    fn malformed_config_returns_parse_error() -> Result<()> {
        let (_temp, path) = write_config("{{not toml")?;
        let error = Config::load(&path).expect_err("malformed config should fail");
        assert!(error.to_string().contains("parse TOML config"));
        Ok(())
    }

    #[test]
    fn unsupported_config_version_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 2\n")?;
        let error = Config::load(&path).expect_err("v2 config should fail");
        assert!(error.to_string().contains("unsupported config version 2"));
        Ok(())
    }

    #[test]
    fn unknown_start_view_lists_choices() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[ui]\nstart_view = \"dashboard\"\n")?;
        let error = Config::load(&path).expect_err("unknown view should fail");
        let message = error.to_string();
        assert!(message.contains("inbox, conversations, customers, analytics, settings"));
        assert!(message.contains("\"dashboard\""));
        Ok(())
    }

    #[test]
    fn zero_delay_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[assist]\nsummary_delay = \"0s\"\n")?;
        let error = Config::load(&path).expect_err("zero delay should fail");
        assert!(error.to_string().contains("must be positive"));
        Ok(())
    }

    #[test]
    fn malformed_delay_names_the_key() -> Result<()> {
        let (_temp, path) =
            write_config("version = 1\n[assist]\nsuggestion_delay = \"soon\"\n")?;
        let error = Config::load(&path).expect_err("bad delay should fail");
        assert!(format!("{error:#}").contains("assist.suggestion_delay"));
        Ok(())
    }

    #[test]
    fn zero_narrow_width_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[ui]\nnarrow_width = 0\n")?;
        let error = Config::load(&path).expect_err("zero width should fail");
        assert!(error.to_string().contains("ui.narrow_width"));
        Ok(())
    }

    #[test]
    fn invalid_log_filter_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[log]\nlevel = \"helpdesk=verbose\"\n")?;
        let error = Config::load(&path).expect_err("bad filter should fail");
        assert!(error.to_string().contains("log.level"));
        Ok(())
    }

    #[test]
    fn default_path_honors_env_override() -> Result<()> {
        let _guard = env_lock();
        let temp = tempfile::tempdir()?;
        let override_path = temp.path().join("custom-config.toml");
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::set_var("HELPDESK_CONFIG_PATH", &override_path);
        }
        let resolved = Config::default_path()?;
        // SAFETY: test cleanup for process-local env mutation.
        unsafe {
            std::env::remove_var("HELPDESK_CONFIG_PATH");
        }
        assert_eq!(resolved, override_path);
        Ok(())
    }

    #[test]
    fn default_path_uses_config_toml_suffix_when_no_env_override() -> Result<()> {
        let _guard = env_lock();
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::remove_var("HELPDESK_CONFIG_PATH");
        }
        let path = Config::default_path()?;
        assert!(path.ends_with("helpdesk/config.toml"));
        Ok(())
    }

    #[test]
    fn durations_parse_ms_seconds_and_minutes() -> Result<()> {
        assert_eq!(parse_duration("500ms")?, Duration::from_millis(500));
        assert_eq!(parse_duration("5s")?, Duration::from_secs(5));
        assert_eq!(parse_duration("2m")?, Duration::from_secs(120));
        let error = parse_duration("oops").expect_err("invalid duration should fail");
        assert!(error.to_string().contains("invalid duration"));
        Ok(())
    }

    #[test]
    fn settings_rows_show_effective_values() {
        let config = Config::default();
        let rows = config.settings_rows(Path::new("/etc/helpdesk.toml"), "demo");
        let find = |label: &str| {
            rows.iter()
                .find(|row| row.label == label)
                .map(|row| row.value.clone())
        };
        assert_eq!(find("config").as_deref(), Some("/etc/helpdesk.toml"));
        assert_eq!(find("assist.suggestion_delay").as_deref(), Some("1500ms"));
        assert_eq!(find("assist.summary_delay").as_deref(), Some("2s"));
        assert_eq!(find("data.seed").as_deref(), Some("demo"));
        assert_eq!(format_duration(Duration::from_millis(250)), "250ms");
    }

    #[test]
    fn example_config_round_trips_through_load() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("config.toml");
        std::fs::write(&path, Config::example_config(&path))?;
        let config = Config::load(&path)?;
        assert_eq!(config.start_view(), ViewKind::Inbox);
        assert!(config.assist_enabled());
        Ok(())
    }
}
