//! `apply`: reconcile the pipeline documents onto the server.

use tabled::Tabled;

use airwright_core::{Action, EntityId, Pipeline, ReconcileReport, ReconcileResult};

use crate::cli::{GlobalOpts, PipelineArgs};
use crate::config::AppReconciler;
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct OutcomeRow {
    #[tabled(rename = "Resource")]
    resource: &'static str,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Action")]
    action: String,
    #[tabled(rename = "ID")]
    id: String,
}

fn outcome_table(pipeline: &Pipeline, report: &ReconcileReport, color: bool) -> String {
    let row = |resource: &'static str, name: &str, action: Action, id: &EntityId| OutcomeRow {
        resource,
        name: name.to_owned(),
        action: output::action_label(action, color),
        id: id.to_string(),
    };
    let result = &report.result;
    let rows = [
        row(
            "source",
            &pipeline.source.name,
            report.source,
            &result.source_id,
        ),
        row(
            "destination",
            &pipeline.destination.name,
            report.destination,
            &result.destination_id,
        ),
        row(
            "connection",
            &pipeline.connection.name,
            report.connection,
            &result.connection_id,
        ),
    ];
    format!(
        "Workspace: {}\n{}",
        result.workspace_id,
        output::render_table(&rows)
    )
}

fn plain_ids(result: &ReconcileResult) -> String {
    [
        result.workspace_id.as_str(),
        result.source_id.as_str(),
        result.destination_id.as_str(),
        result.connection_id.as_str(),
    ]
    .join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    reconciler: &AppReconciler,
    args: &PipelineArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let pipeline = airwright_config::load_pipeline(&util::document_paths(args), reconciler.env())?;

    let spinner = util::spinner(global, "Reconciling pipeline");
    let outcome = reconciler
        .reconcile_with_progress(&pipeline, |step| {
            tracing::debug!(%step, "reconcile step");
            if let Some(pb) = &spinner {
                pb.set_message(step.to_string());
            }
        })
        .await;
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    let report = outcome?;

    let color = util::color(global);
    let out = output::render_single(
        util::output_format(global),
        &report.result,
        |_| outcome_table(&pipeline, &report, color),
        plain_ids,
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
