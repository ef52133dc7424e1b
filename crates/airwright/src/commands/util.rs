//! Helpers shared across command handlers.

use std::io::{self, IsTerminal};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use airwright_config::DocumentPaths;

use crate::cli::{GlobalOpts, OutputFormat, PipelineArgs};
use crate::output;

/// Output format after config defaults were applied; JSON otherwise.
pub fn output_format(global: &GlobalOpts) -> OutputFormat {
    global.output.unwrap_or(OutputFormat::Json)
}

pub fn color(global: &GlobalOpts) -> bool {
    output::should_color(global.color)
}

pub fn document_paths(args: &PipelineArgs) -> DocumentPaths {
    DocumentPaths {
        source: args.source.clone(),
        destination: args.destination.clone(),
        connection: args.connection.clone(),
    }
}

/// A stderr spinner, only when stderr is a terminal and not `--quiet`.
pub fn spinner(global: &GlobalOpts, message: &str) -> Option<ProgressBar> {
    if global.quiet || !io::stderr().is_terminal() {
        return None;
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_owned());
    pb.enable_steady_tick(Duration::from_millis(100));
    Some(pb)
}
