//! The password-change state machine

use tracing::{debug, warn};

use rekey_credential::{IdentitySource, Principal, TicketGrantor, bootstrap};
use rekey_remctl::{Endpoint, RemoteChannel};

use crate::collector::{CollectError, collect_secret};
use crate::directory::Directory;
use crate::error::{EngineError, Result};
use crate::invoker::ResetInvoker;
use crate::outcome::ResetOutcome;
use crate::prompt::Prompter;

/// Maximum number of remote reset attempts per run.
///
/// Mismatch re-prompts are local and unlimited; only attempts that reach
/// the remote service consume the budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryBudget(u32);

impl RetryBudget {
    /// Allow `attempts` remote invocations.
    pub fn new(attempts: u32) -> Self {
        Self(attempts)
    }

    /// The number of remote invocations allowed.
    pub fn attempts(self) -> u32 {
        self.0
    }
}

impl Default for RetryBudget {
    fn default() -> Self {
        Self(5)
    }
}

/// How a completed run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The password was changed.
    Success,
    /// The operator declined the confirmation gate; the remote service was
    /// never contacted.
    Aborted,
    /// A permanent failure, or the retry budget ran out.
    Failed,
}

/// Drives bootstrap, identity confirmation, and the bounded reset loop.
///
/// The ordering is strictly sequential: bootstrap completes fully before
/// the confirmation gate, which completes fully before any reset attempt.
pub struct ChangeOrchestrator<'a> {
    /// Reader of the operator's current identity.
    pub identity: &'a dyn IdentitySource,
    /// Interactive, service-scoped credential acquisition.
    pub grantor: &'a dyn TicketGrantor,
    /// The authenticated remote-command channel.
    pub channel: &'a dyn RemoteChannel,
    /// Display-name lookup for the confirmation gate.
    pub directory: &'a dyn Directory,
    /// Operator interaction.
    pub prompter: &'a mut dyn Prompter,
    /// Where the password-change service listens.
    pub endpoint: Endpoint,
    /// Service principal the administrative credential is scoped to.
    pub service: Principal,
    /// Remote attempts allowed per run.
    pub budget: RetryBudget,
}

impl ChangeOrchestrator<'_> {
    /// Run the full flow for `username` (prompted for when `None`).
    pub fn run(&mut self, username: Option<&str>) -> Result<RunOutcome> {
        println!("Authenticating to Kerberos....");
        let _cache = bootstrap(self.identity, self.grantor, &self.service)
            .map_err(EngineError::Bootstrap)?;
        // The cache stays live, and published, until the run returns.
        println!();

        let target = self.acquire_target(username)?;
        if !self.confirm_target(&target) {
            println!("Aborted");
            println!();
            return Ok(RunOutcome::Aborted);
        }

        self.reset_loop(&target)
    }

    /// Resolve the target account, prompting when no argument was given.
    fn acquire_target(&mut self, username: Option<&str>) -> Result<Principal> {
        let name = match username {
            Some(name) => name.trim().to_string(),
            None => self
                .prompter
                .line("Enter username whose password you wish to change: ")
                .map_err(EngineError::UsernameRead)?
                .trim()
                .to_string(),
        };
        name.parse().map_err(EngineError::InvalidTarget)
    }

    /// The human-in-the-loop safety gate before any destructive remote
    /// call. A missing directory entry is not fatal — the operator is
    /// asked to confirm the bare name instead.
    fn confirm_target(&mut self, target: &Principal) -> bool {
        let name = match self.directory.lookup(target.primary()) {
            Ok(name) => name,
            Err(err) => {
                warn!(error = %err, "display-name lookup failed");
                None
            }
        };
        let answer = match name {
            Some(name) => {
                println!("{target}\t{name}");
                println!();
                self.prompter.line("Is this correct? ")
            }
            None => self
                .prompter
                .line("That username was not found in the password file.  Continue? "),
        };
        answer.map(|ans| ans.starts_with(['y', 'Y'])).unwrap_or(false)
    }

    /// Collect and transmit secrets until success, a permanent failure, or
    /// an exhausted budget. Mismatches re-prompt without consuming the
    /// budget; a rejected secret is discarded and never reused.
    fn reset_loop(&mut self, target: &Principal) -> Result<RunOutcome> {
        let invoker = ResetInvoker::new(self.channel, self.endpoint.clone());

        let mut attempts = 0;
        while attempts < self.budget.attempts() {
            let secret = loop {
                match collect_secret(self.prompter) {
                    Ok(secret) => {
                        println!();
                        break secret;
                    }
                    Err(err @ CollectError::Mismatch) => {
                        eprintln!("{err}");
                        println!();
                    }
                    Err(CollectError::Input(err)) => {
                        return Err(EngineError::SecretInput(err));
                    }
                }
            };

            match invoker.reset(target, &secret) {
                ResetOutcome::Success => return Ok(RunOutcome::Success),
                ResetOutcome::Permanent => return Ok(RunOutcome::Failed),
                ResetOutcome::Retriable => {
                    attempts += 1;
                    debug!(attempts, limit = self.budget.attempts(), "reset attempt rejected");
                    if attempts < self.budget.attempts() {
                        println!();
                    }
                }
            }
        }
        Ok(RunOutcome::Failed)
    }
}
