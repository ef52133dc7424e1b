// Connector definition endpoints
//
// Definitions are global catalog entries, not workspace-scoped.

use serde_json::json;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{
    DestinationDefinitionRead, DestinationDefinitionReadList, SourceDefinitionRead,
    SourceDefinitionReadList,
};

impl ApiClient {
    /// `POST source_definitions/list`
    pub async fn list_source_definitions(&self) -> Result<Vec<SourceDefinitionRead>, Error> {
        debug!("listing source definitions");
        let list: SourceDefinitionReadList =
            self.call("source_definitions/list", &json!({})).await?;
        Ok(list.source_definitions)
    }

    /// `POST destination_definitions/list`
    pub async fn list_destination_definitions(
        &self,
    ) -> Result<Vec<DestinationDefinitionRead>, Error> {
        debug!("listing destination definitions");
        let list: DestinationDefinitionReadList =
            self.call("destination_definitions/list", &json!({})).await?;
        Ok(list.destination_definitions)
    }
}
