// ── Declarative documents and reconciliation outcomes ──
//
// Documents are the user's declared state. They are format-agnostic:
// the config crate decides whether they came from JSON, YAML or TOML.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::{Display, EnumString};

use airwright_api::types::{
    ConnectionStatus, DestinationSyncMode, NamespaceDefinition, ScheduleType, SyncMode,
};

use crate::ids::{DefinitionId, EntityId, WorkspaceId};

/// Connector-backed entity kinds that share the upsert flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Source,
    Destination,
}

/// Anything the reconciler manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Source,
    Destination,
    Connection,
}

impl From<EntityKind> for Resource {
    fn from(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Source => Self::Source,
            EntityKind::Destination => Self::Destination,
        }
    }
}

// ── Documents ────────────────────────────────────────────────────────

fn empty_object() -> Value {
    Value::Object(Map::new())
}

/// A declared source or destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityDocument {
    pub name: String,
    /// Human-readable connector name, e.g. "S3" or "BigQuery".
    pub definition_name: String,
    /// Opaque connector configuration; may contain `${VAR}` placeholders.
    #[serde(default = "empty_object")]
    pub configuration: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleDocument {
    #[serde(rename = "type", default)]
    pub schedule_type: ScheduleType,
    #[serde(default)]
    pub basic_schedule: Option<Value>,
    #[serde(default)]
    pub cron: Option<Value>,
}

pub const DEFAULT_CONNECTION_NAME: &str = "s3_to_bigquery";

fn default_connection_name() -> String {
    DEFAULT_CONNECTION_NAME.to_owned()
}

fn default_sync_mode() -> SyncMode {
    SyncMode::FullRefresh
}

fn default_destination_sync_mode() -> DestinationSyncMode {
    DestinationSyncMode::Overwrite
}

/// A declared connection between the pipeline's source and destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionDocument {
    #[serde(default = "default_connection_name")]
    pub name: String,
    #[serde(default)]
    pub prefix: Option<String>,
    #[serde(default)]
    pub schedule: ScheduleDocument,
    #[serde(default)]
    pub namespace_definition: NamespaceDefinition,
    #[serde(default)]
    pub namespace_format: Option<String>,
    #[serde(default = "default_sync_mode")]
    pub sync_mode: SyncMode,
    #[serde(default = "default_destination_sync_mode")]
    pub destination_sync_mode: DestinationSyncMode,
    /// Accepted for compatibility; the remote API no longer takes it.
    #[serde(default)]
    pub normalize: bool,
    #[serde(default)]
    pub status: ConnectionStatus,
}

impl Default for ConnectionDocument {
    fn default() -> Self {
        Self {
            name: default_connection_name(),
            prefix: None,
            schedule: ScheduleDocument::default(),
            namespace_definition: NamespaceDefinition::default(),
            namespace_format: None,
            sync_mode: default_sync_mode(),
            destination_sync_mode: default_destination_sync_mode(),
            normalize: false,
            status: ConnectionStatus::default(),
        }
    }
}

/// Everything one reconciliation run declares.
#[derive(Debug, Clone, PartialEq)]
pub struct Pipeline {
    pub source: EntityDocument,
    pub destination: EntityDocument,
    pub connection: ConnectionDocument,
}

// ── Outcomes ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Create,
    Update,
}

/// Result of a single upsert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upsert {
    pub id: EntityId,
    pub action: Action,
}

impl Upsert {
    pub fn created(id: EntityId) -> Self {
        Self {
            id,
            action: Action::Create,
        }
    }

    pub fn updated(id: EntityId) -> Self {
        Self {
            id,
            action: Action::Update,
        }
    }
}

/// The canonical record of a run, consumed by callers as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileResult {
    pub workspace_id: WorkspaceId,
    pub source_id: EntityId,
    pub destination_id: EntityId,
    pub connection_id: EntityId,
}

/// Stage of a reconciliation run, reported to progress observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Step {
    #[strum(serialize = "Resolving workspace")]
    ResolveWorkspace,
    #[strum(serialize = "Upserting source")]
    UpsertSource,
    #[strum(serialize = "Discovering source schema")]
    DiscoverSchema,
    #[strum(serialize = "Upserting destination")]
    UpsertDestination,
    #[strum(serialize = "Upserting connection")]
    UpsertConnection,
}

/// Result plus the action taken for each resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileReport {
    pub result: ReconcileResult,
    pub source: Action,
    pub destination: Action,
    pub connection: Action,
}

/// What `apply` would do to one resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedChange {
    pub resource: Resource,
    pub name: String,
    pub action: Action,
    /// Existing id when the resource would be updated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    /// Resolved connector definition when the resource would be created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition_id: Option<DefinitionId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanReport {
    pub workspace_id: WorkspaceId,
    pub changes: Vec<PlannedChange>,
}
