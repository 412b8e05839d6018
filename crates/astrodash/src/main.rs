mod cli;
mod commands;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use astrodash_config::Config;
use astrodash_core::Dashboard;

use crate::cli::{Cli, Command, GlobalOpts};
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
    match cli.command {
        // Config commands don't need the proxy
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        // Shell completions generation
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "astrodash", &mut std::io::stdout());
            Ok(())
        }

        // All other commands talk to the proxy
        cmd => {
            let cfg = load_effective_config(&cli.global)?;
            let client_config = cfg.to_client_config()?;
            let dashboard = Dashboard::new(&client_config)?;

            tracing::debug!(
                command = ?cmd,
                proxy = %client_config.proxy_url,
                "dispatching command"
            );
            commands::dispatch(cmd, &dashboard, &cfg, &cli.global).await
        }
    }
}

/// Config file + environment, with CLI flag overrides applied on top.
pub(crate) fn load_effective_config(global: &GlobalOpts) -> Result<Config, CliError> {
    let mut cfg = match &global.config {
        Some(path) => astrodash_config::load_config_from(path)?,
        None => astrodash_config::load_config()?,
    };
    if let Some(url) = &global.proxy_url {
        cfg.proxy.url.clone_from(url);
    }
    if let Some(timeout) = global.timeout {
        cfg.proxy.timeout_secs = timeout;
    }
    Ok(cfg)
}
