// Declarative pipeline documents: loading by extension, connection
// overrides from the environment, and file-backed placeholder variables.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::debug;

use airwright_core::{
    ConnectionDocument, DestinationSyncMode, EntityDocument, EnvLookup, LayeredEnv, Pipeline,
    SyncMode,
};

use crate::ConfigError;

/// Variable naming a service-account key file.
pub const GCP_SA_KEY_PATH: &str = "GCP_SA_KEY_PATH";
/// Variable receiving that file's contents.
pub const GCP_SA_KEY_JSON: &str = "GCP_SA_KEY_JSON";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
    Toml,
}

impl DocumentFormat {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("yaml" | "yml") => Ok(Self::Yaml),
            Some("toml") => Ok(Self::Toml),
            _ => Err(ConfigError::UnknownFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Parse `text` as a document of `format`. `path` is only used in errors.
pub fn parse_document<T: DeserializeOwned>(
    text: &str,
    format: DocumentFormat,
    path: &Path,
) -> Result<T, ConfigError> {
    let parsed = match format {
        DocumentFormat::Json => serde_json::from_str(text).map_err(|e| e.to_string()),
        DocumentFormat::Yaml => serde_yaml::from_str(text).map_err(|e| e.to_string()),
        DocumentFormat::Toml => toml::from_str(text).map_err(|e| e.to_string()),
    };
    parsed.map_err(|message| ConfigError::Parse {
        path: path.to_path_buf(),
        message,
    })
}

fn read(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a document, picking the parser from the file extension.
pub fn load_document<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let format = DocumentFormat::from_path(path)?;
    let text = read(path)?;
    debug!(path = %path.display(), ?format, "loaded document");
    parse_document(&text, format, path)
}

/// Where the three pipeline documents live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentPaths {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub connection: PathBuf,
}

impl Default for DocumentPaths {
    fn default() -> Self {
        Self {
            source: PathBuf::from("resources/sources/s3_to_bigquery.json"),
            destination: PathBuf::from("resources/destinations/bigquery.json"),
            connection: PathBuf::from("resources/connections/s3_to_bigquery.yaml"),
        }
    }
}

fn non_empty(env: &dyn EnvLookup, key: &str) -> Option<String> {
    env.get(key).filter(|v| !v.is_empty())
}

fn parse_override<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, ConfigError> {
    raw.parse().map_err(|_| ConfigError::Validation {
        field: key.into(),
        reason: format!("unrecognized value '{raw}'"),
    })
}

/// Apply `CONNECTION_NAME`, `CONNECTION_PREFIX`, `SYNC_MODE` and
/// `DEST_SYNC_MODE` over a connection document.
///
/// Empty values are ignored, except for the prefix where `""` is a real
/// setting.
pub fn apply_connection_overrides(
    doc: &mut ConnectionDocument,
    env: &dyn EnvLookup,
) -> Result<(), ConfigError> {
    if let Some(name) = non_empty(env, "CONNECTION_NAME") {
        doc.name = name;
    }
    if let Some(prefix) = env.get("CONNECTION_PREFIX") {
        doc.prefix = Some(prefix);
    }
    if let Some(raw) = non_empty(env, "SYNC_MODE") {
        doc.sync_mode = parse_override::<SyncMode>("SYNC_MODE", &raw)?;
    }
    if let Some(raw) = non_empty(env, "DEST_SYNC_MODE") {
        doc.destination_sync_mode = parse_override::<DestinationSyncMode>("DEST_SYNC_MODE", &raw)?;
    }
    Ok(())
}

/// Load all three documents and apply connection overrides.
pub fn load_pipeline(paths: &DocumentPaths, env: &dyn EnvLookup) -> Result<Pipeline, ConfigError> {
    let source: EntityDocument = load_document(&paths.source)?;
    let destination: EntityDocument = load_document(&paths.destination)?;
    let mut connection: ConnectionDocument = load_document(&paths.connection)?;
    apply_connection_overrides(&mut connection, env)?;

    Ok(Pipeline {
        source,
        destination,
        connection,
    })
}

/// Layer file-backed variables over `base`.
///
/// `GCP_SA_KEY_JSON` is filled from the file named by `GCP_SA_KEY_PATH`
/// when that file exists. Explicit `file_vars` entries win over it. The
/// process environment is never modified.
pub fn file_backed_env<E: EnvLookup>(
    base: E,
    file_vars: &BTreeMap<String, PathBuf>,
) -> Result<LayeredEnv<E>, ConfigError> {
    let sa_key = non_empty(&base, GCP_SA_KEY_PATH)
        .map(PathBuf::from)
        .filter(|p| p.is_file());

    let mut env = LayeredEnv::new(base);

    if let Some(path) = sa_key {
        env.insert(GCP_SA_KEY_JSON, read(&path)?);
        debug!(path = %path.display(), "loaded service account key from file");
    }

    for (var, path) in file_vars {
        env.insert(var.clone(), read(path)?);
        debug!(var = %var, path = %path.display(), "loaded variable from file");
    }

    Ok(env)
}
