// airwright-core: Reconciliation between declared pipelines and a remote Airbyte server.

pub mod catalog;
pub mod config;
pub mod error;
pub mod ids;
pub mod materialize;
pub mod model;
pub mod reconciler;
pub mod resolve;

// ── Primary re-exports ──────────────────────────────────────────────
pub use catalog::build_configured_catalog;
pub use config::{Credentials, RemoteConfig};
pub use error::CoreError;
pub use ids::{DefinitionId, EntityId, WorkspaceId};
pub use materialize::{EnvLookup, LayeredEnv, ProcessEnv, materialize};
pub use model::{
    Action, ConnectionDocument, EntityDocument, EntityKind, Pipeline, PlanReport, PlannedChange,
    ReconcileReport, ReconcileResult, Resource, ScheduleDocument, Step, Upsert,
};
pub use reconciler::Reconciler;
pub use resolve::Resolver;

// Wire types consumers need without depending on airwright-api directly.
pub use airwright_api::{ApiClient, Error as ApiError};
pub use airwright_api::types::{
    AirbyteStream, ConfiguredCatalog, ConfiguredStream, ConnectionRead, ConnectionStatus,
    DestinationDefinitionRead, DestinationRead, DestinationSyncMode, DiscoveredCatalog,
    NamespaceDefinition, ScheduleType, SourceDefinitionRead, SourceRead, SyncMode, WorkspaceRead,
};
