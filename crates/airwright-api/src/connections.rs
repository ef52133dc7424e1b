// Connection endpoints
//
// `connections/list_all` spans every workspace but is missing on some
// server versions, so it is exposed as a capability probe.

use serde_json::json;
use tracing::{debug, warn};

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{
    ConnectionRead, ConnectionReadList, ConnectionSpec, ConnectionUpdate, WorkspaceIdRequest,
};

/// Statuses meaning the server has no `connections/list_all`.
const UNSUPPORTED_STATUSES: [u16; 3] = [404, 405, 501];

impl ApiClient {
    /// `POST connections/list` scoped to one workspace.
    pub async fn list_connections(
        &self,
        workspace_id: &str,
    ) -> Result<Vec<ConnectionRead>, Error> {
        debug!(workspace_id, "listing connections");
        let body = WorkspaceIdRequest {
            workspace_id: workspace_id.to_owned(),
        };
        let list: ConnectionReadList = self.call("connections/list", &body).await?;
        Ok(list.connections)
    }

    /// `POST connections/list_all` across every workspace.
    pub async fn list_all_connections(&self) -> Result<Vec<ConnectionRead>, Error> {
        let list: ConnectionReadList = self.call("connections/list_all", &json!({})).await?;
        Ok(list.connections)
    }

    /// Global connection listing, or `None` if the server lacks the endpoint.
    ///
    /// Only 404, 405 and 501 mean "capability absent". Any other status,
    /// a connection failure or a malformed body is still an error.
    pub async fn probe_all_connections(&self) -> Result<Option<Vec<ConnectionRead>>, Error> {
        match self.list_all_connections().await {
            Ok(connections) => Ok(Some(connections)),
            Err(Error::Api {
                endpoint, status, ..
            }) if UNSUPPORTED_STATUSES.contains(&status) => {
                warn!(%endpoint, status, "global connection listing unavailable");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// `POST connections/create`
    pub async fn create_connection(&self, body: &ConnectionSpec) -> Result<ConnectionRead, Error> {
        self.call("connections/create", body).await
    }

    /// `POST connections/update`
    pub async fn update_connection(&self, body: &ConnectionUpdate) -> Result<(), Error> {
        let _: serde_json::Value = self.call("connections/update", body).await?;
        Ok(())
    }
}
