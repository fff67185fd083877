mod cli;
mod config;
mod error;
mod output;
mod prompt;

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use cgx_api::CgxClient;
use cgx_core::{BfdMode, ChangeRequest, CredentialSources, RunConfig, RunOutcome, Toggle};

use crate::cli::{BfdModeArg, Cli, ToggleArg};
use crate::error::CliError;
use crate::output::TerminalReporter;
use crate::prompt::TerminalPrompter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

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

impl From<BfdModeArg> for BfdMode {
    fn from(arg: BfdModeArg) -> Self {
        match arg {
            BfdModeArg::Aggressive => Self::Aggressive,
            BfdModeArg::NonAggressive => Self::NonAggressive,
        }
    }
}

impl From<ToggleArg> for Toggle {
    fn from(arg: ToggleArg) -> Self {
        match arg {
            ToggleArg::Nochange => Self::NoChange,
            ToggleArg::On => Self::On,
            ToggleArg::Off => Self::Off,
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let settings = config::resolve(config::load_config()?, &cli.global)?;
    let color = output::should_color(&cli.global.color);

    let credential = CredentialSources {
        token: cli.auth.token,
        token_file: cli.auth.token_file,
    }
    .resolve()?;

    println!("AUTHENTICATING...");
    println!("     Authenticating using {}", credential.describe());

    debug!(controller = %settings.controller, "connecting");
    let client = CgxClient::new(settings.controller, &settings.transport)?;
    let mut prompter = TerminalPrompter::new();

    let tenant_id = cgx_core::authenticate(&client, credential, &mut prompter).await?;
    println!("     SUCCESS: Authentication Complete");
    debug!(%tenant_id, "session established");

    let run_config = RunConfig {
        match_text: cli.change.match_text,
        request: ChangeRequest {
            bfd_mode: cli.change.bfd_mode.into(),
            lqm: cli.change.lqm.into(),
            bwm: cli.change.bwm.into(),
        },
        exclude_hub_sites: settings.exclude_hub_sites,
        assume_yes: cli.global.yes,
    };

    let mut reporter = TerminalReporter::new(color);
    let outcome = cgx_core::run(&client, &run_config, &mut prompter, &mut reporter).await?;

    match outcome {
        RunOutcome::Applied(summary) => {
            info!(updated = summary.updated, failed = summary.failed, "run complete");
        }
        RunOutcome::Declined => info!("changes declined"),
        RunOutcome::NothingMatched => {
            println!(
                "No matching interfaces found for \"{}\"",
                run_config.match_text
            );
        }
    }

    Ok(())
}
