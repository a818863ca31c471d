use std::{fs, time::Duration};

use anyhow::Context;
use serde::Deserialize;

pub const CONFIG_FILE: &str = "console.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_url: String,
    /// `{server}` and `{id}` are substituted when a tab is opened.
    pub admin_url_template: String,
    pub event_timeout_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8080".into(),
            admin_url_template: "{server}/cache.html?id={id}".into(),
            event_timeout_ms: 10_000,
        }
    }
}

impl Settings {
    pub fn event_timeout(&self) -> Duration {
        Duration::from_millis(self.event_timeout_ms)
    }

    pub fn admin_url(&self, id: &str) -> String {
        self.admin_url_template
            .replace("{server}", self.server_url.trim_end_matches('/'))
            .replace("{id}", id)
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    server_url: Option<String>,
    admin_url_template: Option<String>,
    event_timeout_ms: Option<u64>,
}

pub fn load_settings() -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(CONFIG_FILE) {
        apply_file_config(&mut settings, &raw)
            .with_context(|| format!("failed to parse {CONFIG_FILE}"))?;
    }

    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());
    Ok(settings)
}

/// Later keys win: `APP__SERVER_URL` beats `CONSOLE_SERVER_URL`.
fn apply_env_overrides(settings: &mut Settings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("CONSOLE_SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = var("APP__SERVER_URL") {
        settings.server_url = v;
    }

    if let Some(v) = var("APP__ADMIN_URL_TEMPLATE") {
        settings.admin_url_template = v;
    }

    if let Some(v) = var("APP__EVENT_TIMEOUT_MS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.event_timeout_ms = parsed;
        }
    }
}

fn apply_file_config(settings: &mut Settings, raw: &str) -> Result<(), toml::de::Error> {
    let file_cfg: FileConfig = toml::from_str(raw)?;
    if let Some(v) = file_cfg.server_url {
        settings.server_url = v;
    }
    if let Some(v) = file_cfg.admin_url_template {
        settings.admin_url_template = v;
    }
    if let Some(v) = file_cfg.event_timeout_ms {
        settings.event_timeout_ms = v;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn file_values_override_defaults() {
        let mut settings = Settings::default();
        apply_file_config(
            &mut settings,
            r#"
server_url = "http://redis-admin.internal:9000"
event_timeout_ms = 2500
"#,
        )
        .expect("parse");

        assert_eq!(settings.server_url, "http://redis-admin.internal:9000");
        assert_eq!(settings.event_timeout(), Duration::from_millis(2500));
        assert_eq!(
            settings.admin_url_template,
            Settings::default().admin_url_template
        );
    }

    #[test]
    fn malformed_file_is_rejected() {
        let mut settings = Settings::default();
        assert!(apply_file_config(&mut settings, "event_timeout_ms = \"soon\"").is_err());
        assert_eq!(settings, Settings::default());
    }

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn app_server_url_beats_console_server_url() {
        let mut settings = Settings::default();
        apply_env_overrides(
            &mut settings,
            env(&[
                ("CONSOLE_SERVER_URL", "http://console.example:1"),
                ("APP__SERVER_URL", "http://app.example:2"),
            ]),
        );
        assert_eq!(settings.server_url, "http://app.example:2");

        let mut settings = Settings::default();
        apply_env_overrides(
            &mut settings,
            env(&[("CONSOLE_SERVER_URL", "http://console.example:1")]),
        );
        assert_eq!(settings.server_url, "http://console.example:1");
    }

    #[test]
    fn env_overrides_file_values() {
        let mut settings = Settings::default();
        apply_file_config(
            &mut settings,
            "server_url = \"http://from-file:9000\"\nevent_timeout_ms = 2500\n",
        )
        .expect("parse");
        apply_env_overrides(
            &mut settings,
            env(&[
                ("APP__SERVER_URL", "http://from-env:9001"),
                ("APP__ADMIN_URL_TEMPLATE", "{server}/admin/{id}"),
                ("APP__EVENT_TIMEOUT_MS", "750"),
            ]),
        );
        assert_eq!(settings.server_url, "http://from-env:9001");
        assert_eq!(settings.admin_url("3"), "http://from-env:9001/admin/3");
        assert_eq!(settings.event_timeout(), Duration::from_millis(750));
    }

    #[test]
    fn unparsable_timeout_env_keeps_previous_value() {
        let mut settings = Settings::default();
        apply_env_overrides(&mut settings, env(&[("APP__EVENT_TIMEOUT_MS", "soon")]));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn admin_url_substitutes_server_and_id() {
        let settings = Settings {
            server_url: "http://127.0.0.1:8080/".into(),
            ..Settings::default()
        };
        assert_eq!(
            settings.admin_url("7"),
            "http://127.0.0.1:8080/cache.html?id=7"
        );
    }
}
