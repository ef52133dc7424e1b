//! `workspace`: show which workspace reconciliation targets.

use std::fmt::Write as _;

use airwright_core::resolve::select_workspace;
use airwright_core::{CoreError, WorkspaceRead};

use crate::cli::GlobalOpts;
use crate::config::AppReconciler;
use crate::error::CliError;
use crate::output;

use super::util;

fn detail(ws: &WorkspaceRead) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "ID:       {}", ws.workspace_id);
    let _ = writeln!(out, "Name:     {}", ws.name);
    if let Some(display) = &ws.display_name {
        let _ = writeln!(out, "Display:  {display}");
    }
    let _ = write!(out, "Default:  {}", ws.default_workspace);
    out
}

pub async fn handle(reconciler: &AppReconciler, global: &GlobalOpts) -> Result<(), CliError> {
    let workspaces = reconciler.client().list_workspaces().await?;
    let selected = select_workspace(&workspaces).ok_or(CoreError::NoWorkspace)?;

    let out = output::render_single(util::output_format(global), selected, detail, |ws| {
        ws.workspace_id.clone()
    })?;
    output::print_output(&out, global.quiet);
    Ok(())
}
