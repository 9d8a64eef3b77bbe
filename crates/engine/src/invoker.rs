//! Remote reset invocation and outcome classification

use std::io::{self, Write};

use tracing::{debug, warn};
use zeroize::Zeroize;

use rekey_credential::{Principal, Secret};
use rekey_remctl::{Endpoint, RemoteChannel};

use crate::outcome::ResetOutcome;

/// Exit status the remote service uses for authorization failures and
/// unknown entries.
const STATUS_UNAUTHORIZED: i32 = 2;

/// Sends structured reset requests over the remote channel.
pub struct ResetInvoker<'a> {
    channel: &'a dyn RemoteChannel,
    endpoint: Endpoint,
}

impl<'a> ResetInvoker<'a> {
    /// Invoke against `endpoint` through `channel`.
    pub fn new(channel: &'a dyn RemoteChannel, endpoint: Endpoint) -> Self {
        Self { channel, endpoint }
    }

    /// Issue one reset attempt and classify the result.
    ///
    /// Captured remote output is relayed to the operator verbatim before
    /// the outcome is returned; diagnostic content is never parsed. The
    /// argv copy of the secret is scrubbed as soon as the channel call
    /// returns.
    pub fn reset(&self, target: &Principal, secret: &Secret) -> ResetOutcome {
        let mut command = vec![
            "password".to_string(),
            "reset".to_string(),
            target.to_string(),
            secret.expose().to_string(),
        ];
        let result = self.channel.invoke(&self.endpoint, &command);
        for arg in &mut command {
            arg.zeroize();
        }

        match result {
            Err(err) => {
                eprintln!("{err}");
                warn!(endpoint = %self.endpoint, error = %err, "remote channel failed");
                ResetOutcome::Permanent
            }
            Ok(output) => {
                let _ = io::stderr().write_all(&output.stderr);
                let _ = io::stdout().write_all(&output.stdout);
                if output.is_clean() {
                    println!("Password for {target} successfully changed");
                    ResetOutcome::Success
                } else if output.status == STATUS_UNAUTHORIZED {
                    debug!(status = output.status, "reset rejected as unauthorized");
                    ResetOutcome::Permanent
                } else {
                    // Other non-zero statuses, and chatter with status
                    // zero, stay retriable: a fresh secret may satisfy a
                    // server-side policy. Remote status codes are not
                    // assumed stable across deployments.
                    debug!(status = output.status, "reset rejected, worth retrying");
                    ResetOutcome::Retriable
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use rekey_remctl::{ChannelError, InvocationOutput};

    use super::*;

    /// Returns one canned result and records what was sent.
    struct OneShotChannel {
        result: RefCell<Option<Result<InvocationOutput, ChannelError>>>,
        sent: RefCell<Vec<String>>,
    }

    impl OneShotChannel {
        fn returning(result: Result<InvocationOutput, ChannelError>) -> Self {
            Self {
                result: RefCell::new(Some(result)),
                sent: RefCell::new(Vec::new()),
            }
        }
    }

    impl RemoteChannel for OneShotChannel {
        fn invoke(
            &self,
            _endpoint: &Endpoint,
            command: &[String],
        ) -> Result<InvocationOutput, ChannelError> {
            self.sent.borrow_mut().extend(command.iter().cloned());
            self.result.borrow_mut().take().expect("single invocation")
        }
    }

    fn endpoint() -> Endpoint {
        Endpoint::new("password-change.example.org", 4443, "service/password-change")
    }

    fn target() -> Principal {
        "jdoe".parse().unwrap()
    }

    #[test]
    fn builds_the_fixed_verb_pair() {
        let channel = OneShotChannel::returning(Ok(InvocationOutput::default()));
        let invoker = ResetInvoker::new(&channel, endpoint());

        invoker.reset(&target(), &Secret::new("abc123"));

        assert_eq!(
            *channel.sent.borrow(),
            vec!["password", "reset", "jdoe", "abc123"]
        );
    }

    #[test]
    fn channel_error_is_permanent() {
        let channel = OneShotChannel::returning(Err(ChannelError::Spawn {
            program: "remctl".to_string(),
            source: io::Error::new(io::ErrorKind::ConnectionRefused, "connection refused"),
        }));
        let invoker = ResetInvoker::new(&channel, endpoint());

        assert_eq!(
            invoker.reset(&target(), &Secret::new("abc123")),
            ResetOutcome::Permanent
        );
    }

    #[rstest]
    #[case::clean_exit(0, b"".to_vec(), ResetOutcome::Success)]
    #[case::unauthorized(2, b"".to_vec(), ResetOutcome::Permanent)]
    #[case::policy_rejection(1, b"password too short\n".to_vec(), ResetOutcome::Retriable)]
    #[case::odd_status(17, b"".to_vec(), ResetOutcome::Retriable)]
    #[case::chatter_with_zero_status(0, b"warning: weak\n".to_vec(), ResetOutcome::Retriable)]
    fn classifies_completed_commands(
        #[case] status: i32,
        #[case] stdout: Vec<u8>,
        #[case] expected: ResetOutcome,
    ) {
        let channel = OneShotChannel::returning(Ok(InvocationOutput {
            status,
            stdout,
            stderr: Vec::new(),
        }));
        let invoker = ResetInvoker::new(&channel, endpoint());

        assert_eq!(invoker.reset(&target(), &Secret::new("abc123")), expected);
    }

    #[test]
    fn stderr_alone_does_not_spoil_success() {
        let channel = OneShotChannel::returning(Ok(InvocationOutput {
            status: 0,
            stdout: Vec::new(),
            stderr: b"notice: replication delayed\n".to_vec(),
        }));
        let invoker = ResetInvoker::new(&channel, endpoint());

        assert_eq!(
            invoker.reset(&target(), &Secret::new("abc123")),
            ResetOutcome::Success
        );
    }
}
