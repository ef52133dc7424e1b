//! `list`: remote entities and connector definitions.

use tabled::Tabled;

use airwright_core::{
    ConnectionRead, DestinationDefinitionRead, DestinationRead, SourceDefinitionRead, SourceRead,
};

use crate::cli::{GlobalOpts, ListArgs, ListResource};
use crate::config::AppReconciler;
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct EntityRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Connector")]
    connector: String,
}

impl From<&SourceRead> for EntityRow {
    fn from(s: &SourceRead) -> Self {
        Self {
            id: s.source_id.clone(),
            name: s.name.clone(),
            connector: s.source_name.clone().unwrap_or_default(),
        }
    }
}

impl From<&DestinationRead> for EntityRow {
    fn from(d: &DestinationRead) -> Self {
        Self {
            id: d.destination_id.clone(),
            name: d.name.clone(),
            connector: d.destination_name.clone().unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct ConnectionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Source")]
    source: String,
    #[tabled(rename = "Destination")]
    destination: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&ConnectionRead> for ConnectionRow {
    fn from(c: &ConnectionRead) -> Self {
        Self {
            id: c.connection_id.clone(),
            name: c.name.clone(),
            source: c.source_id.clone().unwrap_or_default(),
            destination: c.destination_id.clone().unwrap_or_default(),
            status: c.status.clone().unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct DefinitionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Version")]
    version: String,
}

impl From<&SourceDefinitionRead> for DefinitionRow {
    fn from(d: &SourceDefinitionRead) -> Self {
        Self {
            id: d.source_definition_id.clone(),
            name: d.name.clone(),
            version: d.docker_image_tag.clone().unwrap_or_default(),
        }
    }
}

impl From<&DestinationDefinitionRead> for DefinitionRow {
    fn from(d: &DestinationDefinitionRead) -> Self {
        Self {
            id: d.destination_definition_id.clone(),
            name: d.name.clone(),
            version: d.docker_image_tag.clone().unwrap_or_default(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    reconciler: &AppReconciler,
    args: &ListArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let client = reconciler.client();
    let format = util::output_format(global);

    let out = match args.resource {
        ListResource::Sources => {
            let ws = reconciler.resolver().resolve_workspace().await?;
            let items = client.list_sources(ws.as_str()).await?;
            output::render_list(format, &items, |s| EntityRow::from(s), |s| s.source_id.clone())?
        }
        ListResource::Destinations => {
            let ws = reconciler.resolver().resolve_workspace().await?;
            let items = client.list_destinations(ws.as_str()).await?;
            output::render_list(format, &items, |s| EntityRow::from(s), |d| {
                d.destination_id.clone()
            })?
        }
        ListResource::Connections => {
            let ws = reconciler.resolver().resolve_workspace().await?;
            let items = client.list_connections(ws.as_str()).await?;
            output::render_list(format, &items, |c| ConnectionRow::from(c), |c| {
                c.connection_id.clone()
            })?
        }
        ListResource::SourceDefinitions => {
            let items = client.list_source_definitions().await?;
            output::render_list(format, &items, |d| DefinitionRow::from(d), |d| {
                d.source_definition_id.clone()
            })?
        }
        ListResource::DestinationDefinitions => {
            let items = client.list_destination_definitions().await?;
            output::render_list(format, &items, |d| DefinitionRow::from(d), |d| {
                d.destination_definition_id.clone()
            })?
        }
    };

    output::print_output(&out, global.quiet);
    Ok(())
}
