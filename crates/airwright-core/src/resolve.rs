// ── Entity resolver ──
//
// Maps human-readable names to remote ids. Every lookup is an exact-name
// linear scan over a listing; when names collide the first listed entry
// wins.

use tracing::debug;

use airwright_api::ApiClient;
use airwright_api::types::WorkspaceRead;

use crate::error::CoreError;
use crate::ids::{DefinitionId, EntityId, WorkspaceId};
use crate::model::EntityKind;

/// Name the remote gives its bootstrap workspace.
pub const DEFAULT_WORKSPACE_NAME: &str = "Default Workspace";

/// Pick the workspace to target.
///
/// Preference: the one flagged default, then one named "Default Workspace",
/// then the first listed.
pub fn select_workspace(workspaces: &[WorkspaceRead]) -> Option<&WorkspaceRead> {
    workspaces
        .iter()
        .find(|w| w.default_workspace)
        .or_else(|| {
            workspaces.iter().find(|w| {
                w.name == DEFAULT_WORKSPACE_NAME
                    || w.display_name.as_deref() == Some(DEFAULT_WORKSPACE_NAME)
            })
        })
        .or_else(|| workspaces.first())
}

/// First item whose name matches exactly.
pub fn first_named<'a, T>(
    items: &'a [T],
    name: &str,
    name_of: impl Fn(&T) -> &str,
) -> Option<&'a T> {
    items.iter().find(|item| name_of(item) == name)
}

/// Name-to-id lookups against the remote.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    client: &'a ApiClient,
}

impl<'a> Resolver<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn resolve_workspace(&self) -> Result<WorkspaceId, CoreError> {
        let workspaces = self.client.list_workspaces().await?;
        let chosen = select_workspace(&workspaces).ok_or(CoreError::NoWorkspace)?;
        debug!(workspace_id = %chosen.workspace_id, name = %chosen.name, "resolved workspace");
        Ok(WorkspaceId::from(chosen.workspace_id.clone()))
    }

    /// Connector definition id for a human-readable connector name.
    pub async fn resolve_definition(
        &self,
        kind: EntityKind,
        name: &str,
    ) -> Result<DefinitionId, CoreError> {
        let found = match kind {
            EntityKind::Source => {
                let defs = self.client.list_source_definitions().await?;
                first_named(&defs, name, |d| d.name.as_str())
                    .map(|d| d.source_definition_id.clone())
            }
            EntityKind::Destination => {
                let defs = self.client.list_destination_definitions().await?;
                first_named(&defs, name, |d| d.name.as_str())
                    .map(|d| d.destination_definition_id.clone())
            }
        };

        let id = found.ok_or_else(|| CoreError::UnknownDefinition {
            kind,
            name: name.to_owned(),
        })?;
        debug!(%kind, name, definition_id = %id, "resolved definition");
        Ok(DefinitionId::from(id))
    }

    /// Existing source or destination in `workspace_id` named `name`.
    pub async fn find_existing_by_name(
        &self,
        kind: EntityKind,
        workspace_id: &WorkspaceId,
        name: &str,
    ) -> Result<Option<EntityId>, CoreError> {
        let id = match kind {
            EntityKind::Source => {
                let sources = self.client.list_sources(workspace_id.as_str()).await?;
                first_named(&sources, name, |s| s.name.as_str()).map(|s| s.source_id.clone())
            }
            EntityKind::Destination => {
                let destinations = self.client.list_destinations(workspace_id.as_str()).await?;
                first_named(&destinations, name, |d| d.name.as_str())
                    .map(|d| d.destination_id.clone())
            }
        };
        Ok(id.map(EntityId::from))
    }

    /// Existing connection named `name`, searched across all workspaces.
    ///
    /// A server without the global listing is treated as having no
    /// connections.
    pub async fn find_connection_by_name(&self, name: &str) -> Result<Option<EntityId>, CoreError> {
        let listing = self.client.probe_all_connections().await?.unwrap_or_default();
        Ok(first_named(&listing, name, |c| c.name.as_str())
            .map(|c| EntityId::from(c.connection_id.clone())))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn ws(id: &str, name: &str, default: bool) -> WorkspaceRead {
        WorkspaceRead {
            workspace_id: id.into(),
            name: name.into(),
            display_name: None,
            default_workspace: default,
        }
    }

    #[test]
    fn prefers_flagged_default() {
        let list = vec![
            ws("a", "A", false),
            ws("dw", DEFAULT_WORKSPACE_NAME, false),
            ws("flagged", "Team", true),
        ];
        assert_eq!(select_workspace(&list).map(|w| w.workspace_id.as_str()), Some("flagged"));
    }

    #[test]
    fn falls_back_to_default_workspace_name() {
        let list = vec![ws("a", "A", false), ws("dw", DEFAULT_WORKSPACE_NAME, false)];
        assert_eq!(select_workspace(&list).map(|w| w.workspace_id.as_str()), Some("dw"));
    }

    #[test]
    fn matches_display_name() {
        let mut dw = ws("dw", "", false);
        dw.display_name = Some(DEFAULT_WORKSPACE_NAME.into());
        let list = vec![ws("a", "A", false), dw];
        assert_eq!(select_workspace(&list).map(|w| w.workspace_id.as_str()), Some("dw"));
    }

    #[test]
    fn falls_back_to_first_listed() {
        let list = vec![ws("a", "A", false), ws("b", "B", false)];
        assert_eq!(select_workspace(&list).map(|w| w.workspace_id.as_str()), Some("a"));
    }

    #[test]
    fn empty_listing_selects_nothing() {
        assert!(select_workspace(&[]).is_none());
    }

    #[test]
    fn first_named_takes_first_duplicate() {
        let items = vec![("dup", 1), ("other", 2), ("dup", 3)];
        let found = first_named(&items, "dup", |(name, _)| *name);
        assert_eq!(found, Some(&("dup", 1)));
    }

    #[test]
    fn first_named_is_exact() {
        let items = vec![("S3", 1)];
        assert_eq!(first_named(&items, "s3", |(name, _)| *name), None);
        assert_eq!(first_named(&items, "S3 ", |(name, _)| *name), None);
    }
}
