// ── Catalog builder ──
//
// Turns a discovered schema into the configured catalog a connection
// syncs. Pure: no I/O, stream order preserved.

use airwright_api::types::{
    AirbyteStream, ConfiguredCatalog, ConfiguredStream, DestinationSyncMode, DiscoveredCatalog,
    SyncMode,
};

/// Sync mode for one stream: the requested mode when the stream supports
/// it, otherwise the stream's first supported mode.
///
/// A stream advertising no modes is treated as full-refresh only.
pub fn choose_sync_mode(stream: &AirbyteStream, requested: SyncMode) -> SyncMode {
    if stream.supported_sync_modes.contains(&requested) {
        return requested;
    }
    stream
        .supported_sync_modes
        .first()
        .copied()
        .unwrap_or(SyncMode::FullRefresh)
}

/// Configure every discovered stream with the requested modes.
pub fn build_configured_catalog(
    catalog: &DiscoveredCatalog,
    sync_mode: SyncMode,
    destination_sync_mode: DestinationSyncMode,
) -> ConfiguredCatalog {
    let streams = catalog
        .streams
        .iter()
        .map(|stream| ConfiguredStream {
            sync_mode: choose_sync_mode(stream, sync_mode),
            destination_sync_mode,
            cursor_field: stream.default_cursor_field.clone(),
            primary_key: stream.source_defined_primary_key.clone(),
            stream: stream.clone(),
        })
        .collect();

    ConfiguredCatalog { streams }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn stream(name: &str, modes: &[SyncMode]) -> AirbyteStream {
        AirbyteStream {
            name: name.into(),
            supported_sync_modes: modes.to_vec(),
            default_cursor_field: Vec::new(),
            source_defined_primary_key: Vec::new(),
            extra: serde_json::Map::new(),
        }
    }

    #[test]
    fn falls_back_when_requested_mode_unsupported() {
        let s = stream("orders", &[SyncMode::FullRefresh]);
        assert_eq!(choose_sync_mode(&s, SyncMode::Incremental), SyncMode::FullRefresh);
    }

    #[test]
    fn keeps_requested_mode_when_supported() {
        let s = stream("orders", &[SyncMode::FullRefresh, SyncMode::Incremental]);
        assert_eq!(choose_sync_mode(&s, SyncMode::Incremental), SyncMode::Incremental);
    }

    #[test]
    fn falls_back_to_first_listed_mode() {
        let s = stream("events", &[SyncMode::Incremental, SyncMode::FullRefresh]);
        assert_eq!(choose_sync_mode(&s, SyncMode::FullRefresh), SyncMode::FullRefresh);

        let only_incremental = stream("events", &[SyncMode::Incremental]);
        assert_eq!(
            choose_sync_mode(&only_incremental, SyncMode::FullRefresh),
            SyncMode::Incremental
        );
    }

    #[test]
    fn no_supported_modes_means_full_refresh() {
        let s = stream("legacy", &[]);
        assert_eq!(choose_sync_mode(&s, SyncMode::Incremental), SyncMode::FullRefresh);
    }

    #[test]
    fn builds_catalog_in_discovery_order() {
        let discovered: DiscoveredCatalog = serde_json::from_value(json!({
            "streams": [
                {
                    "stream": {
                        "name": "orders",
                        "jsonSchema": { "type": "object" },
                        "supportedSyncModes": ["full_refresh", "incremental"],
                        "defaultCursorField": ["updated_at"],
                        "sourceDefinedPrimaryKey": [["id"]]
                    }
                },
                { "name": "customers", "supportedSyncModes": ["full_refresh"] }
            ]
        }))
        .unwrap();

        let configured = build_configured_catalog(
            &discovered,
            SyncMode::Incremental,
            DestinationSyncMode::AppendDedup,
        );

        let names: Vec<_> = configured.streams.iter().map(|s| s.stream.name.as_str()).collect();
        assert_eq!(names, vec!["orders", "customers"]);

        let orders = &configured.streams[0];
        assert_eq!(orders.sync_mode, SyncMode::Incremental);
        assert_eq!(orders.destination_sync_mode, DestinationSyncMode::AppendDedup);
        assert_eq!(orders.cursor_field, vec!["updated_at"]);
        assert_eq!(orders.primary_key, vec![vec!["id".to_owned()]]);

        let customers = &configured.streams[1];
        assert_eq!(customers.sync_mode, SyncMode::FullRefresh);
        assert!(customers.cursor_field.is_empty());
        assert!(customers.primary_key.is_empty());
    }

    #[test]
    fn configured_stream_wire_shape() {
        let discovered = DiscoveredCatalog {
            streams: vec![stream("orders", &[SyncMode::FullRefresh])],
        };
        let configured =
            build_configured_catalog(&discovered, SyncMode::FullRefresh, DestinationSyncMode::Overwrite);

        assert_eq!(
            serde_json::to_value(&configured).unwrap(),
            json!({
                "streams": [{
                    "stream": {
                        "name": "orders",
                        "supportedSyncModes": ["full_refresh"],
                        "defaultCursorField": [],
                        "sourceDefinedPrimaryKey": []
                    },
                    "syncMode": "full_refresh",
                    "destinationSyncMode": "overwrite",
                    "cursorField": [],
                    "primaryKey": []
                }]
            })
        );
    }
}
