// ── Reconciler ──
//
// Drives a pipeline's declared state onto the remote. Every step is
// awaited before the next starts; a failure aborts the run and leaves
// already-upserted entities in place for the next run to find by name.

use tracing::{info, warn};

use airwright_api::ApiClient;
use airwright_api::types::{
    ConfiguredCatalog, ConnectionSpec, ConnectionUpdate, DestinationCreate, DestinationUpdate,
    DiscoveredCatalog, ScheduleData, SourceCreate, SourceUpdate,
};

use crate::catalog::build_configured_catalog;
use crate::error::CoreError;
use crate::ids::{EntityId, WorkspaceId};
use crate::materialize::{EnvLookup, ProcessEnv, materialize};
use crate::model::{
    Action, ConnectionDocument, EntityDocument, EntityKind, Pipeline, PlanReport, PlannedChange,
    ReconcileReport, ReconcileResult, Resource, Step, Upsert,
};
use crate::resolve::Resolver;

/// Geography sent with every connection payload.
pub const GEOGRAPHY: &str = "AUTO";

/// Connection payload for a document and its resolved endpoints.
pub fn connection_spec(
    document: &ConnectionDocument,
    source_id: &EntityId,
    destination_id: &EntityId,
    sync_catalog: ConfiguredCatalog,
) -> ConnectionSpec {
    ConnectionSpec {
        name: document.name.clone(),
        source_id: source_id.to_string(),
        destination_id: destination_id.to_string(),
        namespace_definition: document.namespace_definition,
        namespace_format: document.namespace_format.clone(),
        prefix: document.prefix.clone().unwrap_or_default(),
        schedule_type: document.schedule.schedule_type,
        schedule_data: ScheduleData {
            basic_schedule: document.schedule.basic_schedule.clone(),
            cron: document.schedule.cron.clone(),
        },
        sync_catalog,
        status: document.status,
        geography: GEOGRAPHY.to_owned(),
    }
}

fn non_empty_id(endpoint: &str, id: String) -> Result<EntityId, CoreError> {
    if id.is_empty() {
        return Err(CoreError::MalformedResponse {
            endpoint: endpoint.to_owned(),
            message: "response carried an empty id".into(),
        });
    }
    Ok(EntityId::from(id))
}

/// Applies pipelines against one remote server.
pub struct Reconciler<E = ProcessEnv> {
    client: ApiClient,
    env: E,
}

impl<E: EnvLookup> Reconciler<E> {
    pub fn new(client: ApiClient, env: E) -> Self {
        Self { client, env }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Environment used to materialize configurations.
    pub fn env(&self) -> &E {
        &self.env
    }

    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.client)
    }

    /// Create or update a source or destination by name.
    ///
    /// The configuration is materialized first. An existing entity gets its
    /// configuration fully replaced; a missing one is created after its
    /// definition is resolved.
    pub async fn upsert_entity(
        &self,
        kind: EntityKind,
        workspace_id: &WorkspaceId,
        document: &EntityDocument,
    ) -> Result<Upsert, CoreError> {
        let configuration = materialize(&document.configuration, &self.env);
        let resolver = self.resolver();

        if let Some(id) = resolver
            .find_existing_by_name(kind, workspace_id, &document.name)
            .await?
        {
            match kind {
                EntityKind::Source => {
                    self.client
                        .update_source(&SourceUpdate {
                            source_id: id.to_string(),
                            connection_configuration: configuration,
                        })
                        .await?;
                }
                EntityKind::Destination => {
                    self.client
                        .update_destination(&DestinationUpdate {
                            destination_id: id.to_string(),
                            connection_configuration: configuration,
                        })
                        .await?;
                }
            }
            info!(%kind, name = %document.name, %id, "updated");
            return Ok(Upsert::updated(id));
        }

        let definition_id = resolver
            .resolve_definition(kind, &document.definition_name)
            .await?;

        let id = match kind {
            EntityKind::Source => {
                let created = self
                    .client
                    .create_source(&SourceCreate {
                        workspace_id: workspace_id.to_string(),
                        name: document.name.clone(),
                        source_definition_id: definition_id.to_string(),
                        connection_configuration: configuration,
                    })
                    .await?;
                non_empty_id("sources/create", created.source_id)?
            }
            EntityKind::Destination => {
                let created = self
                    .client
                    .create_destination(&DestinationCreate {
                        workspace_id: workspace_id.to_string(),
                        name: document.name.clone(),
                        destination_definition_id: definition_id.to_string(),
                        connection_configuration: configuration,
                    })
                    .await?;
                non_empty_id("destinations/create", created.destination_id)?
            }
        };

        info!(%kind, name = %document.name, %id, "created");
        Ok(Upsert::created(id))
    }

    pub async fn upsert_source(
        &self,
        workspace_id: &WorkspaceId,
        document: &EntityDocument,
    ) -> Result<Upsert, CoreError> {
        self.upsert_entity(EntityKind::Source, workspace_id, document)
            .await
    }

    pub async fn upsert_destination(
        &self,
        workspace_id: &WorkspaceId,
        document: &EntityDocument,
    ) -> Result<Upsert, CoreError> {
        self.upsert_entity(EntityKind::Destination, workspace_id, document)
            .await
    }

    /// Discovered schema of an existing source.
    pub async fn discover_schema(
        &self,
        source_id: &EntityId,
    ) -> Result<DiscoveredCatalog, CoreError> {
        let read = self
            .client
            .discover_source_schema(source_id.as_str())
            .await?;
        let catalog = read.catalog.ok_or_else(|| CoreError::MalformedResponse {
            endpoint: "sources/discover_schema".into(),
            message: format!("no catalog returned for source {source_id}"),
        })?;
        info!(%source_id, streams = catalog.streams.len(), "discovered schema");
        Ok(catalog)
    }

    /// Create or update a connection by name.
    pub async fn upsert_connection(
        &self,
        document: &ConnectionDocument,
        source_id: &EntityId,
        destination_id: &EntityId,
        catalog: &DiscoveredCatalog,
    ) -> Result<Upsert, CoreError> {
        if document.normalize {
            warn!(name = %document.name, "normalize is no longer supported by the server; ignoring");
        }

        let sync_catalog =
            build_configured_catalog(catalog, document.sync_mode, document.destination_sync_mode);
        let spec = connection_spec(document, source_id, destination_id, sync_catalog);

        if let Some(id) = self.resolver().find_connection_by_name(&document.name).await? {
            self.client
                .update_connection(&ConnectionUpdate {
                    connection_id: id.to_string(),
                    spec,
                })
                .await?;
            info!(kind = "connection", name = %document.name, %id, "updated");
            return Ok(Upsert::updated(id));
        }

        let created = self.client.create_connection(&spec).await?;
        let id = non_empty_id("connections/create", created.connection_id)?;
        info!(kind = "connection", name = %document.name, %id, "created");
        Ok(Upsert::created(id))
    }

    /// Run a full reconciliation: workspace, source, discovery,
    /// destination, connection.
    pub async fn reconcile(&self, pipeline: &Pipeline) -> Result<ReconcileReport, CoreError> {
        self.reconcile_with_progress(pipeline, |_| {}).await
    }

    /// Same as [`reconcile`](Self::reconcile), calling `on_step` before
    /// each stage starts.
    pub async fn reconcile_with_progress(
        &self,
        pipeline: &Pipeline,
        mut on_step: impl FnMut(Step) + Send,
    ) -> Result<ReconcileReport, CoreError> {
        on_step(Step::ResolveWorkspace);
        let workspace_id = self.resolver().resolve_workspace().await?;

        on_step(Step::UpsertSource);
        let source = self.upsert_source(&workspace_id, &pipeline.source).await?;

        on_step(Step::DiscoverSchema);
        let catalog = self.discover_schema(&source.id).await?;

        on_step(Step::UpsertDestination);
        let destination = self
            .upsert_destination(&workspace_id, &pipeline.destination)
            .await?;

        on_step(Step::UpsertConnection);
        let connection = self
            .upsert_connection(&pipeline.connection, &source.id, &destination.id, &catalog)
            .await?;

        Ok(ReconcileReport {
            result: ReconcileResult {
                workspace_id,
                source_id: source.id,
                destination_id: destination.id,
                connection_id: connection.id,
            },
            source: source.action,
            destination: destination.action,
            connection: connection.action,
        })
    }

    /// Report what `reconcile` would do without writing anything.
    ///
    /// Definitions are resolved for entities that would be created, so an
    /// unavailable connector is reported here rather than mid-apply.
    pub async fn plan(&self, pipeline: &Pipeline) -> Result<PlanReport, CoreError> {
        let resolver = self.resolver();
        let workspace_id = resolver.resolve_workspace().await?;
        let mut changes = Vec::with_capacity(3);

        for (kind, document) in [
            (EntityKind::Source, &pipeline.source),
            (EntityKind::Destination, &pipeline.destination),
        ] {
            let change = match resolver
                .find_existing_by_name(kind, &workspace_id, &document.name)
                .await?
            {
                Some(id) => PlannedChange {
                    resource: Resource::from(kind),
                    name: document.name.clone(),
                    action: Action::Update,
                    id: Some(id),
                    definition_id: None,
                },
                None => PlannedChange {
                    resource: Resource::from(kind),
                    name: document.name.clone(),
                    action: Action::Create,
                    id: None,
                    definition_id: Some(
                        resolver
                            .resolve_definition(kind, &document.definition_name)
                            .await?,
                    ),
                },
            };
            changes.push(change);
        }

        let existing = resolver
            .find_connection_by_name(&pipeline.connection.name)
            .await?;
        changes.push(PlannedChange {
            resource: Resource::Connection,
            name: pipeline.connection.name.clone(),
            action: if existing.is_some() {
                Action::Update
            } else {
                Action::Create
            },
            id: existing,
            definition_id: None,
        });

        Ok(PlanReport {
            workspace_id,
            changes,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use airwright_api::types::{ScheduleType, SyncMode};

    use super::*;
    use crate::model::ScheduleDocument;

    #[test]
    fn connection_spec_fills_fixed_fields() {
        let doc = ConnectionDocument::default();
        let spec = connection_spec(
            &doc,
            &EntityId::from("src"),
            &EntityId::from("dst"),
            ConfiguredCatalog::default(),
        );

        assert_eq!(
            serde_json::to_value(&spec).unwrap(),
            json!({
                "name": "s3_to_bigquery",
                "sourceId": "src",
                "destinationId": "dst",
                "namespaceDefinition": "destination",
                "namespaceFormat": null,
                "prefix": "",
                "scheduleType": "manual",
                "scheduleData": { "basicSchedule": null, "cron": null },
                "syncCatalog": { "streams": [] },
                "status": "active",
                "geography": "AUTO"
            })
        );
    }

    #[test]
    fn connection_spec_carries_cron_schedule() {
        let doc = ConnectionDocument {
            prefix: Some("raw_".into()),
            schedule: ScheduleDocument {
                schedule_type: ScheduleType::Cron,
                basic_schedule: None,
                cron: Some(json!({ "cronExpression": "0 0 * * * ?", "cronTimeZone": "UTC" })),
            },
            sync_mode: SyncMode::Incremental,
            ..ConnectionDocument::default()
        };
        let spec = connection_spec(
            &doc,
            &EntityId::from("src"),
            &EntityId::from("dst"),
            ConfiguredCatalog::default(),
        );

        assert_eq!(spec.prefix, "raw_");
        assert_eq!(spec.schedule_type, ScheduleType::Cron);
        assert_eq!(spec.schedule_data.basic_schedule, None);
        assert_eq!(
            spec.schedule_data.cron,
            Some(json!({ "cronExpression": "0 0 * * * ?", "cronTimeZone": "UTC" }))
        );
    }

    #[test]
    fn empty_created_id_is_rejected() {
        let err = non_empty_id("sources/create", String::new()).unwrap_err();
        assert!(matches!(err, CoreError::MalformedResponse { .. }));
    }
}
