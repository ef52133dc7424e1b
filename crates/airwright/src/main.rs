mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command, LogFormat, OutputFormat};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    // A .env in the working directory feeds both clap's `env` args and
    // placeholder expansion.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(cli.global.verbose, cli.global.log_format);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_tracing(verbosity: u8, format: LogFormat) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_target(false)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let Cli {
        mut global,
        command,
    } = cli;
    let cfg = config::load_config_or_default();

    if global.output.is_none() {
        global.output = OutputFormat::from_str(&cfg.defaults.output, true).ok();
    }

    match command {
        // Config commands don't need a server
        Command::Config(args) => commands::config_cmd::handle(args, &global),

        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "airwright", &mut std::io::stdout());
            Ok(())
        }

        cmd => {
            let reconciler = config::build_reconciler(&global, &cfg)?;
            tracing::debug!(command = ?cmd, "dispatching command");
            commands::dispatch(cmd, &reconciler, &global).await
        }
    }
}
