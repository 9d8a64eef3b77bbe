//! rekey: change the password for another user
//!
//! Usable by authorized users only. Bootstraps a short-lived
//! administrative credential from the operator's existing identity, asks
//! for confirmation of the target account, then drives the reset against
//! the site's password-change service.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use rekey_credential::{KinitGrantor, KlistProbe, Principal};
use rekey_engine::{
    ChangeOrchestrator, PasswdFile, RetryBudget, RunOutcome, TerminalPrompter,
};
use rekey_remctl::{Endpoint, RemctlClient};

mod config;
use config::Config;

/// Change the password for another user.
///
/// The username will be prompted for if not supplied on the command line.
#[derive(Parser, Debug)]
#[command(name = "rekey", version, about, long_about = None)]
struct Cli {
    /// Account whose password should be changed
    #[arg(value_name = "username")]
    username: Option<String>,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Password-change server host
    #[arg(long)]
    server: Option<String>,

    /// Password-change server port
    #[arg(long)]
    port: Option<u16>,

    /// Service principal for the administrative credential
    #[arg(long)]
    principal: Option<String>,

    /// Site password file for the confirmation lookup
    #[arg(long)]
    passwd_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

impl Cli {
    /// Command-line flags are the outermost configuration layer.
    fn apply(&self, mut config: Config) -> Config {
        if let Some(server) = &self.server {
            config.server = server.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(principal) = &self.principal {
            config.principal = principal.clone();
        }
        if let Some(passwd_file) = &self.passwd_file {
            config.passwd_file = passwd_file.clone();
        }
        config
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.debug {
        EnvFilter::new("debug")
    } else if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::new("warn")
    };
    // Logs go to stderr; stdout belongs to the operator dialogue.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(cli.debug)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(RunOutcome::Success) => ExitCode::SUCCESS,
        Ok(RunOutcome::Aborted | RunOutcome::Failed) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("rekey: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<RunOutcome> {
    let config = Config::load(cli.config.as_deref()).context("cannot load configuration")?;
    let config = cli.apply(config);
    tracing::debug!(?config, "resolved configuration");

    let service: Principal = config
        .principal
        .parse()
        .context("invalid service principal in configuration")?;
    let endpoint = Endpoint::new(config.server.clone(), config.port, config.principal.clone());

    let identity = KlistProbe::new();
    let grantor = KinitGrantor::new();
    let channel = RemctlClient::new();
    let directory = PasswdFile::new(&config.passwd_file);
    let mut prompter = TerminalPrompter;

    let mut orchestrator = ChangeOrchestrator {
        identity: &identity,
        grantor: &grantor,
        channel: &channel,
        directory: &directory,
        prompter: &mut prompter,
        endpoint,
        service,
        budget: RetryBudget::new(config.retry_attempts),
    };
    Ok(orchestrator.run(cli.username.as_deref())?)
}
