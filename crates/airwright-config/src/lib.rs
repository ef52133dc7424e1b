//! Shared configuration for airwright.
//!
//! TOML profiles, credential resolution (env + keyring + plaintext), and
//! loading of the declarative pipeline documents. The CLI adds flag-aware
//! wrappers on top.

pub mod documents;

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use airwright_core::{Credentials, EnvLookup};

pub use documents::{
    DocumentFormat, DocumentPaths, apply_connection_overrides, file_backed_env, load_document,
    load_pipeline,
};

/// Keyring service name; entries are keyed `<profile>/password`.
pub const KEYRING_SERVICE: &str = "airwright";

/// Remote used when neither a profile nor a flag names one.
pub const DEFAULT_URL: &str = "http://localhost:8000";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("unsupported document format for {} (expected .json, .yaml, .yml or .toml)", path.display())]
    UnknownFormat { path: PathBuf },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named server profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "json".into()
}
fn default_timeout() -> u64 {
    30
}
fn default_url() -> String {
    DEFAULT_URL.into()
}

/// A named server profile.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Profile {
    /// Server root URL (e.g., "http://localhost:8000").
    #[serde(default = "default_url")]
    pub url: String,

    /// Username for basic auth.
    pub username: Option<String>,

    /// Password for basic auth (plaintext; prefer keyring or env var).
    pub password: Option<String>,

    /// Environment variable name containing the password.
    pub password_env: Option<String>,

    /// Override timeout, seconds.
    pub timeout: Option<u64>,

    /// Placeholder variables whose values are read from files.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub file_vars: BTreeMap<String, PathBuf>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            url: default_url(),
            username: None,
            password: None,
            password_env: None,
            timeout: None,
            file_vars: BTreeMap::new(),
        }
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "airwright", "airwright").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("airwright");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load Config from `path`, with `AIRWRIGHT_`-prefixed env layered on top.
///
/// Nested keys use a double underscore: `AIRWRIGHT_DEFAULTS__TIMEOUT=60`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("AIRWRIGHT_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Credential resolution (without CLI flags) ───────────────────────

fn keyring_entry(profile_name: &str) -> Result<keyring::Entry, ConfigError> {
    Ok(keyring::Entry::new(
        KEYRING_SERVICE,
        &format!("{profile_name}/password"),
    )?)
}

/// Store a profile's password in the system keyring.
pub fn store_password(profile_name: &str, password: &str) -> Result<(), ConfigError> {
    keyring_entry(profile_name)?.set_password(password)?;
    Ok(())
}

/// Resolve the basic-auth password for a profile.
///
/// Order: the profile's `password_env` variable, `AIRBYTE_PASSWORD`, the
/// system keyring, then plaintext in the config.
pub fn resolve_password(
    profile: &Profile,
    profile_name: &str,
    env: &dyn EnvLookup,
) -> Option<SecretString> {
    // 1. Profile's password_env → env var lookup
    if let Some(val) = profile.password_env.as_deref().and_then(|name| env.get(name)) {
        return Some(SecretString::from(val));
    }

    // 2. Well-known env var
    if let Some(val) = env.get("AIRBYTE_PASSWORD") {
        return Some(SecretString::from(val));
    }

    // 3. System keyring
    if let Some(pw) = keyring_entry(profile_name)
        .ok()
        .and_then(|entry| entry.get_password().ok())
    {
        return Some(SecretString::from(pw));
    }

    // 4. Plaintext in config
    profile.password.clone().map(SecretString::from)
}

/// Resolve basic-auth credentials.
///
/// `None` unless both a username and a password resolve; a lone username
/// never produces an `Authorization` header.
pub fn resolve_credentials(
    profile: &Profile,
    profile_name: &str,
    env: &dyn EnvLookup,
) -> Option<Credentials> {
    let username = profile
        .username
        .clone()
        .or_else(|| env.get("AIRBYTE_USERNAME"))
        .filter(|u| !u.is_empty())?;
    let password = resolve_password(profile, profile_name, env)?;

    Some(Credentials {
        username,
        password: Some(password),
    })
}

/// Parse and validate a server URL.
pub fn parse_url(raw: &str) -> Result<url::Url, ConfigError> {
    let url: url::Url = raw.parse().map_err(|e| ConfigError::Validation {
        field: "url".into(),
        reason: format!("invalid URL '{raw}': {e}"),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::Validation {
            field: "url".into(),
            reason: format!("unsupported scheme '{other}' (expected http or https)"),
        }),
    }
}
