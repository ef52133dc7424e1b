//! `plan`: report what `apply` would do, without writing.

use tabled::Tabled;

use airwright_core::{PlanReport, PlannedChange};

use crate::cli::{GlobalOpts, PipelineArgs};
use crate::config::AppReconciler;
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct ChangeRow {
    #[tabled(rename = "Resource")]
    resource: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Action")]
    action: String,
    #[tabled(rename = "Existing ID")]
    id: String,
    #[tabled(rename = "Definition")]
    definition: String,
}

fn change_row(change: &PlannedChange, color: bool) -> ChangeRow {
    ChangeRow {
        resource: change.resource.to_string(),
        name: change.name.clone(),
        action: output::action_label(change.action, color),
        id: change
            .id
            .as_ref()
            .map_or_else(|| "-".into(), ToString::to_string),
        definition: change
            .definition_id
            .as_ref()
            .map_or_else(|| "-".into(), ToString::to_string),
    }
}

/// `create source s3` style lines.
fn plain_changes(plan: &PlanReport) -> String {
    plan.changes
        .iter()
        .map(|c| format!("{} {} {}", c.action, c.resource, c.name))
        .collect::<Vec<_>>()
        .join("\n")
}

pub async fn handle(
    reconciler: &AppReconciler,
    args: &PipelineArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let pipeline = airwright_config::load_pipeline(&util::document_paths(args), reconciler.env())?;
    let plan = reconciler.plan(&pipeline).await?;

    let color = util::color(global);
    let out = output::render_single(
        util::output_format(global),
        &plan,
        |p| {
            let rows: Vec<ChangeRow> = p.changes.iter().map(|c| change_row(c, color)).collect();
            format!(
                "Workspace: {}\n{}",
                p.workspace_id,
                output::render_table(&rows)
            )
        },
        plain_changes,
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
