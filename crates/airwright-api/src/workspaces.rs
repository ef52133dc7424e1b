// Workspace endpoints

use serde_json::json;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{WorkspaceRead, WorkspaceReadList};

impl ApiClient {
    /// List every workspace visible to the caller, in remote order.
    ///
    /// `POST workspaces/list`
    pub async fn list_workspaces(&self) -> Result<Vec<WorkspaceRead>, Error> {
        debug!("listing workspaces");
        let list: WorkspaceReadList = self.call("workspaces/list", &json!({})).await?;
        Ok(list.workspaces)
    }
}
