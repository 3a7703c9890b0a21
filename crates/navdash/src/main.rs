mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use navdash_core::Store;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    init_tracing(cli.global.verbose);

    // Dispatch and handle errors with proper exit codes
    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let global = cli.global;
    match cli.command {
        // Config commands don't need a dashboard
        Command::Config(args) => commands::config_cmd::handle(args, &global),

        // Shell completions generation
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "navdash", &mut std::io::stdout());
            Ok(())
        }

        // Theme is local state only
        Command::Theme(args) => {
            let cfg = config::load_config_or_default();
            let mut theme = commands::theme::open(
                config::resolve_state_dir(&global, &cfg),
                output::should_color(&global.color),
            );
            commands::theme::handle(args, &mut theme, &global)
        }

        // Everything else goes through the store
        cmd => {
            let cfg = config::load_config_or_default();
            let dashboard = config::resolve_dashboard_config(&global, &cfg)?;
            let theme = commands::theme::open(
                config::resolve_state_dir(&global, &cfg),
                output::should_color(&global.color),
            );
            let palette = *theme.surface();

            let mut store = Store::connect(&dashboard)?;
            store.fetch_config().await;

            tracing::debug!(command = ?cmd, api_base = %dashboard.api_base, "dispatching command");
            let result = commands::dispatch(cmd, &mut store, &global, palette).await;
            let closed = store.close();
            result?;
            closed.map_err(CliError::from)
        }
    }
}
