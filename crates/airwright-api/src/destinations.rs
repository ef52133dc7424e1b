// Destination endpoints

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{
    DestinationCreate, DestinationRead, DestinationReadList, DestinationUpdate,
    WorkspaceIdRequest,
};

impl ApiClient {
    /// `POST destinations/list` scoped to one workspace.
    pub async fn list_destinations(
        &self,
        workspace_id: &str,
    ) -> Result<Vec<DestinationRead>, Error> {
        debug!(workspace_id, "listing destinations");
        let body = WorkspaceIdRequest {
            workspace_id: workspace_id.to_owned(),
        };
        let list: DestinationReadList = self.call("destinations/list", &body).await?;
        Ok(list.destinations)
    }

    /// `POST destinations/create`
    pub async fn create_destination(
        &self,
        body: &DestinationCreate,
    ) -> Result<DestinationRead, Error> {
        self.call("destinations/create", body).await
    }

    /// `POST destinations/update`
    pub async fn update_destination(&self, body: &DestinationUpdate) -> Result<(), Error> {
        let _: serde_json::Value = self.call("destinations/update", body).await?;
        Ok(())
    }
}
