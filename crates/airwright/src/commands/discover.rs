//! `discover`: list the streams an existing source exposes.

use tabled::Tabled;

use airwright_core::{AirbyteStream, CoreError, EntityKind};

use crate::cli::{DiscoverArgs, GlobalOpts};
use crate::config::AppReconciler;
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct StreamRow {
    #[tabled(rename = "Stream")]
    name: String,
    #[tabled(rename = "Sync Modes")]
    modes: String,
    #[tabled(rename = "Cursor")]
    cursor: String,
    #[tabled(rename = "Primary Key")]
    primary_key: String,
}

impl From<&AirbyteStream> for StreamRow {
    fn from(s: &AirbyteStream) -> Self {
        let modes: Vec<String> = s.supported_sync_modes.iter().map(ToString::to_string).collect();
        let keys: Vec<String> = s
            .source_defined_primary_key
            .iter()
            .map(|path| path.join("."))
            .collect();
        Self {
            name: s.name.clone(),
            modes: output::join_or_dash(&modes),
            cursor: output::join_or_dash(&s.default_cursor_field),
            primary_key: output::join_or_dash(&keys),
        }
    }
}

pub async fn handle(
    reconciler: &AppReconciler,
    args: &DiscoverArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let resolver = reconciler.resolver();
    let workspace_id = resolver.resolve_workspace().await?;
    let source_id = resolver
        .find_existing_by_name(EntityKind::Source, &workspace_id, &args.source)
        .await?
        .ok_or_else(|| CoreError::NotFound {
            kind: EntityKind::Source,
            name: args.source.clone(),
        })?;

    let spinner = util::spinner(global, "Discovering source schema");
    let discovered = reconciler.discover_schema(&source_id).await;
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    let catalog = discovered?;

    let out = output::render_list(
        util::output_format(global),
        &catalog.streams,
        |s| StreamRow::from(s),
        |s| s.name.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
