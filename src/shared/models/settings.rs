use std::{env, fs, path::Path};

use serde::Deserialize;
use thiserror::Error;

const SETTINGS_FILENAME: &str = "settings.json";
const SETTINGS_PATH_VARIABLE: &str = "TASKLIST_SETTINGS";

/// Ten years.
pub const MAX_SESSION_TTL_MINUTES: i64 = 10 * 365 * 24 * 60;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot read settings file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("cannot parse JSON content from settings file {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
    #[error("invalid settings: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub tcp_socket_binding: String,
    pub tcp_socket_port: u16,
    #[serde(default = "default_database_path")]
    pub database_path: String,
    /// Mount point of the JSON task API, without trailing slash.
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,
    #[serde(default = "default_session_cookie_name")]
    pub session_cookie_name: String,
    #[serde(default = "default_session_ttl_minutes")]
    pub session_ttl_minutes: i64,
    #[serde(default = "default_admin_username")]
    pub default_admin_username: String,
    #[serde(default = "default_admin_password")]
    pub default_admin_password: String,
    /// Directory served under `/static`.
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

impl Settings {
    /// Loads `settings.json` from the working directory, or from the path in
    /// `TASKLIST_SETTINGS` when that variable is set.
    pub fn load() -> Result<Settings, SettingsError> {
        let path = env::var(SETTINGS_PATH_VARIABLE).unwrap_or_else(|_| SETTINGS_FILENAME.to_string());
        Settings::load_from(path)
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Settings, SettingsError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let settings: Settings = serde_json::from_str(&content).map_err(|source| SettingsError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        settings.validated()
    }

    /// Settings for in-process use (tests, tooling) backed by the given database file.
    pub fn for_database(database_path: impl Into<String>) -> Settings {
        Settings {
            tcp_socket_binding: "127.0.0.1".to_string(),
            tcp_socket_port: 0,
            database_path: database_path.into(),
            api_prefix: default_api_prefix(),
            session_cookie_name: default_session_cookie_name(),
            session_ttl_minutes: default_session_ttl_minutes(),
            default_admin_username: default_admin_username(),
            default_admin_password: default_admin_password(),
            static_dir: default_static_dir(),
        }
    }

    /// Session lifetime in minutes, kept inside `1..=MAX_SESSION_TTL_MINUTES`
    /// even for settings built in code.
    pub fn session_ttl(&self) -> i64 {
        self.session_ttl_minutes.clamp(1, MAX_SESSION_TTL_MINUTES)
    }

    fn validated(mut self) -> Result<Settings, SettingsError> {
        let prefix = self.api_prefix.trim_end_matches('/');
        if !prefix.starts_with('/') {
            return Err(SettingsError::Invalid(format!(
                "api_prefix must start with '/', got {:?}",
                self.api_prefix
            )));
        }
        self.api_prefix = prefix.to_string();

        if self.session_ttl_minutes <= 0 {
            return Err(SettingsError::Invalid("session_ttl_minutes must be positive".to_string()));
        }
        if self.session_ttl_minutes > MAX_SESSION_TTL_MINUTES {
            return Err(SettingsError::Invalid(format!(
                "session_ttl_minutes must be at most {MAX_SESSION_TTL_MINUTES}"
            )));
        }
        if self.session_cookie_name.trim().is_empty() {
            return Err(SettingsError::Invalid("session_cookie_name must not be empty".to_string()));
        }
        Ok(self)
    }
}

fn default_database_path() -> String {
    "tasklist.redb".to_string()
}

fn default_api_prefix() -> String {
    "/api".to_string()
}

fn default_session_cookie_name() -> String {
    "sessionid".to_string()
}

// Two weeks.
fn default_session_ttl_minutes() -> i64 {
    14 * 24 * 60
}

fn default_admin_username() -> String {
    "admin".to_string()
}

fn default_admin_password() -> String {
    "admin".to_string()
}

fn default_static_dir() -> String {
    "static".to_string()
}
