//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and a process exit code.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use airwright_config::ConfigError;
use airwright_core::CoreError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not connect to Airbyte at {url}")]
    #[diagnostic(
        code(airwright::connection_failed),
        help(
            "Check that the server is running and reachable.\n\
             Reason: {reason}\n\
             Override the URL with --url or AIRBYTE_URL."
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Request to {url} timed out")]
    #[diagnostic(
        code(airwright::timeout),
        help("Increase the timeout with --timeout or check server responsiveness.")
    )]
    Timeout { url: String },

    // ── Authentication ───────────────────────────────────────────────

    #[error("Authentication failed calling {endpoint} (HTTP {status})")]
    #[diagnostic(
        code(airwright::auth_failed),
        help(
            "Verify the basic-auth credentials.\n\
             Set them with --username/--password, AIRBYTE_USERNAME/AIRBYTE_PASSWORD,\n\
             or run: airwright config set-password"
        )
    )]
    AuthFailed { endpoint: String, status: u16 },

    // ── Resolution ───────────────────────────────────────────────────

    #[error("No workspace exists on the server")]
    #[diagnostic(
        code(airwright::no_workspace),
        help("Create a workspace in the Airbyte UI, then run again.")
    )]
    NoWorkspace,

    #[error("{kind} definition '{name}' not found")]
    #[diagnostic(
        code(airwright::unknown_definition),
        help(
            "Is the connector available on this server?\n\
             Run: airwright list {kind}-definitions"
        )
    )]
    UnknownDefinition { kind: String, name: String },

    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(airwright::not_found),
        help("Run: airwright {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── API ──────────────────────────────────────────────────────────

    #[error("{endpoint} failed (HTTP {status}): {message}")]
    #[diagnostic(code(airwright::api_error))]
    ApiError {
        endpoint: String,
        status: u16,
        message: String,
    },

    #[error("Unexpected response from {endpoint}: {message}")]
    #[diagnostic(
        code(airwright::malformed_response),
        help("Check that the server speaks the v1 configuration API.")
    )]
    MalformedResponse { endpoint: String, message: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(airwright::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(airwright::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: airwright config set url <URL> --profile {name}"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("Could not read {}", path.display())]
    #[diagnostic(
        code(airwright::read),
        help("Check that the file exists and is readable.")
    )]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(code(airwright::config))]
    Config(Box<ConfigError>),

    // ── Serialization ────────────────────────────────────────────────

    #[error("Failed to render JSON output: {0}")]
    #[diagnostic(code(airwright::json))]
    Json(#[from] serde_json::Error),

    #[error("Failed to render YAML output: {0}")]
    #[diagnostic(code(airwright::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::AuthFailed { .. } => exit_code::AUTH,
            Self::NoWorkspace | Self::UnknownDefinition { .. } | Self::NotFound { .. } => {
                exit_code::NOT_FOUND
            }
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NoWorkspace => CliError::NoWorkspace,

            CoreError::UnknownDefinition { kind, name } => CliError::UnknownDefinition {
                kind: kind.to_string(),
                name,
            },

            CoreError::NotFound { kind, name } => CliError::NotFound {
                list_command: format!("list {kind}s"),
                resource_type: kind.to_string(),
                identifier: name,
            },

            CoreError::Transport {
                endpoint,
                status: status @ (401 | 403),
                message: _,
            } => CliError::AuthFailed { endpoint, status },

            CoreError::Transport {
                endpoint,
                status,
                message,
            } => CliError::ApiError {
                endpoint,
                status,
                message,
            },

            CoreError::ConnectionFailed { url, reason } => {
                CliError::ConnectionFailed { url, reason }
            }

            CoreError::Timeout { url } => CliError::Timeout { url },

            CoreError::MalformedResponse { endpoint, message } => {
                CliError::MalformedResponse { endpoint, message }
            }

            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },
        }
    }
}

impl From<airwright_core::ApiError> for CliError {
    fn from(err: airwright_core::ApiError) -> Self {
        CoreError::from(err).into()
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::Read { path, source } => CliError::Read { path, source },
            other => CliError::Config(Box::new(other)),
        }
    }
}
