// Source endpoints

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{
    SourceCreate, SourceDiscoverSchemaRead, SourceIdRequest, SourceRead, SourceReadList,
    SourceUpdate, WorkspaceIdRequest,
};

impl ApiClient {
    /// `POST sources/list` scoped to one workspace.
    pub async fn list_sources(&self, workspace_id: &str) -> Result<Vec<SourceRead>, Error> {
        debug!(workspace_id, "listing sources");
        let body = WorkspaceIdRequest {
            workspace_id: workspace_id.to_owned(),
        };
        let list: SourceReadList = self.call("sources/list", &body).await?;
        Ok(list.sources)
    }

    /// `POST sources/create`
    pub async fn create_source(&self, body: &SourceCreate) -> Result<SourceRead, Error> {
        self.call("sources/create", body).await
    }

    /// `POST sources/update`
    ///
    /// The response body is ignored; the source keeps its id.
    pub async fn update_source(&self, body: &SourceUpdate) -> Result<(), Error> {
        let _: serde_json::Value = self.call("sources/update", body).await?;
        Ok(())
    }

    /// `POST sources/discover_schema`
    pub async fn discover_source_schema(
        &self,
        source_id: &str,
    ) -> Result<SourceDiscoverSchemaRead, Error> {
        debug!(source_id, "discovering source schema");
        let body = SourceIdRequest {
            source_id: source_id.to_owned(),
        };
        self.call("sources/discover_schema", &body).await
    }
}
