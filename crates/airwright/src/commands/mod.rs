//! Command handlers, one module per top-level subcommand.

pub mod apply;
pub mod config_cmd;
pub mod discover;
pub mod list;
pub mod plan;
pub mod util;
pub mod workspace;

use crate::cli::{Command, GlobalOpts};
use crate::config::AppReconciler;
use crate::error::CliError;

/// Route a remote command to its handler.
///
/// `config` and `completions` never reach here; they run without a server.
pub async fn dispatch(
    command: Command,
    reconciler: &AppReconciler,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match command {
        Command::Apply(args) => apply::handle(reconciler, &args, global).await,
        Command::Plan(args) => plan::handle(reconciler, &args, global).await,
        Command::Discover(args) => discover::handle(reconciler, &args, global).await,
        Command::List(args) => list::handle(reconciler, &args, global).await,
        Command::Workspace => workspace::handle(reconciler, global).await,
        Command::Config(_) | Command::Completions(_) => unreachable!("handled before dispatch"),
    }
}
