//! Request and response types for the Airbyte configuration API (`/api/v1/`).
//!
//! Field names use camelCase via `#[serde(rename_all = "camelCase")]`.
//! Connector configurations are opaque JSON; the API never inspects them.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use strum::{Display, EnumString};

/// Treat an explicit JSON `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Supported sync modes, skipping any the client does not know.
///
/// Newer servers advertise extra modes; one unknown string must not fail
/// the whole discovery.
fn known_sync_modes<'de, D>(deserializer: D) -> Result<Vec<SyncMode>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<String>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .iter()
        .filter_map(|mode| mode.parse().ok())
        .collect())
}

// ── Shared request bodies ────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceIdRequest {
    pub workspace_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceIdRequest {
    pub source_id: String,
}

// ── Workspaces ───────────────────────────────────────────────────────

/// Workspace overview from `workspaces/list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceRead {
    pub workspace_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub default_workspace: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceReadList {
    #[serde(default, deserialize_with = "null_as_default")]
    pub workspaces: Vec<WorkspaceRead>,
}

// ── Definitions ──────────────────────────────────────────────────────

/// Connector type available for sources from `source_definitions/list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceDefinitionRead {
    pub source_definition_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docker_image_tag: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceDefinitionReadList {
    #[serde(default, deserialize_with = "null_as_default")]
    pub source_definitions: Vec<SourceDefinitionRead>,
}

/// Connector type available for destinations from `destination_definitions/list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationDefinitionRead {
    pub destination_definition_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docker_image_tag: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationDefinitionReadList {
    #[serde(default, deserialize_with = "null_as_default")]
    pub destination_definitions: Vec<DestinationDefinitionRead>,
}

// ── Sources ──────────────────────────────────────────────────────────

/// Configured source instance from `sources/list` and `sources/create`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceRead {
    pub source_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_definition_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceReadList {
    #[serde(default, deserialize_with = "null_as_default")]
    pub sources: Vec<SourceRead>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceCreate {
    pub workspace_id: String,
    pub name: String,
    pub source_definition_id: String,
    pub connection_configuration: Value,
}

/// Full replacement of a source's configuration blob.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceUpdate {
    pub source_id: String,
    pub connection_configuration: Value,
}

// ── Destinations ─────────────────────────────────────────────────────

/// Configured destination instance from `destinations/list` and `destinations/create`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationRead {
    pub destination_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_definition_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationReadList {
    #[serde(default, deserialize_with = "null_as_default")]
    pub destinations: Vec<DestinationRead>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationCreate {
    pub workspace_id: String,
    pub name: String,
    pub destination_definition_id: String,
    pub connection_configuration: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationUpdate {
    pub destination_id: String,
    pub connection_configuration: Value,
}

// ── Sync modes ───────────────────────────────────────────────────────

/// Read strategy for a stream.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SyncMode {
    FullRefresh,
    Incremental,
}

/// Write strategy on the destination side.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DestinationSyncMode {
    Append,
    Overwrite,
    AppendDedup,
    OverwriteDedup,
}

// ── Catalog ──────────────────────────────────────────────────────────

/// One stream exposed by a discovered source schema.
///
/// Fields the reconciler does not interpret (`jsonSchema`, `namespace`,
/// `sourceDefinedCursor`, ...) are kept in `extra` and sent back untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirbyteStream {
    pub name: String,
    #[serde(default, deserialize_with = "known_sync_modes")]
    pub supported_sync_modes: Vec<SyncMode>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub default_cursor_field: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub source_defined_primary_key: Vec<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Discovery entries arrive either bare or wrapped as `{stream, config}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum StreamEntry {
    Wrapped { stream: AirbyteStream },
    Bare(AirbyteStream),
}

impl StreamEntry {
    fn into_stream(self) -> AirbyteStream {
        match self {
            Self::Wrapped { stream } | Self::Bare(stream) => stream,
        }
    }
}

fn discovered_streams<'de, D>(deserializer: D) -> Result<Vec<AirbyteStream>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries: Option<Vec<StreamEntry>> = Option::deserialize(deserializer)?;
    Ok(entries
        .unwrap_or_default()
        .into_iter()
        .map(StreamEntry::into_stream)
        .collect())
}

/// Schema discovered for a source, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiscoveredCatalog {
    #[serde(default, deserialize_with = "discovered_streams")]
    pub streams: Vec<AirbyteStream>,
}

/// Response of `sources/discover_schema`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceDiscoverSchemaRead {
    #[serde(default)]
    pub catalog: Option<DiscoveredCatalog>,
    #[serde(default)]
    pub catalog_id: Option<String>,
}

/// A stream with its negotiated sync settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfiguredStream {
    pub stream: AirbyteStream,
    pub sync_mode: SyncMode,
    pub destination_sync_mode: DestinationSyncMode,
    pub cursor_field: Vec<String>,
    pub primary_key: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfiguredCatalog {
    pub streams: Vec<ConfiguredStream>,
}

// ── Connections ──────────────────────────────────────────────────────

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ScheduleType {
    #[default]
    Manual,
    Basic,
    Cron,
}

/// Both schedule shapes are always transmitted; only the one matching
/// `scheduleType` is meaningful to the remote.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleData {
    pub basic_schedule: Option<Value>,
    pub cron: Option<Value>,
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NamespaceDefinition {
    Source,
    #[default]
    Destination,
    #[serde(rename = "customformat")]
    #[strum(serialize = "customformat")]
    CustomFormat,
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ConnectionStatus {
    #[default]
    Active,
    Inactive,
    Deprecated,
}

/// Body shared by `connections/create` and `connections/update`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionSpec {
    pub name: String,
    pub source_id: String,
    pub destination_id: String,
    pub namespace_definition: NamespaceDefinition,
    pub namespace_format: Option<String>,
    pub prefix: String,
    pub schedule_type: ScheduleType,
    pub schedule_data: ScheduleData,
    pub sync_catalog: ConfiguredCatalog,
    pub status: ConnectionStatus,
    pub geography: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionUpdate {
    pub connection_id: String,
    #[serde(flatten)]
    pub spec: ConnectionSpec,
}

/// Connection overview from `connections/list`, `connections/list_all`
/// and `connections/create`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionRead {
    pub connection_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionReadList {
    #[serde(default, deserialize_with = "null_as_default")]
    pub connections: Vec<ConnectionRead>,
}
