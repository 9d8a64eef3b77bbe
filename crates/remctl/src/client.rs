//! Production channel client wrapping the system `remctl` tool

use std::ffi::OsString;
use std::process::Command;

use tracing::debug;

use crate::channel::{Endpoint, InvocationOutput, RemoteChannel};
use crate::error::ChannelError;

/// Invokes remote commands through the system `remctl` client.
///
/// The client authenticates with the credential the process environment
/// currently points at, which after bootstrap is the ephemeral
/// administrative cache.
#[derive(Debug, Clone)]
pub struct RemctlClient {
    program: String,
}

impl RemctlClient {
    /// Use the system `remctl` from the search path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific client program.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Argument vector for one invocation.
    fn args(endpoint: &Endpoint, command: &[String]) -> Vec<OsString> {
        let mut args = vec![
            OsString::from("-s"),
            OsString::from(&endpoint.service),
            OsString::from("-p"),
            OsString::from(endpoint.port.to_string()),
            OsString::from(&endpoint.host),
        ];
        args.extend(command.iter().map(OsString::from));
        args
    }
}

impl Default for RemctlClient {
    fn default() -> Self {
        Self {
            program: "remctl".to_string(),
        }
    }
}

impl RemoteChannel for RemctlClient {
    fn invoke(
        &self,
        endpoint: &Endpoint,
        command: &[String],
    ) -> Result<InvocationOutput, ChannelError> {
        // The command vector may carry a secret; log the endpoint only.
        debug!(endpoint = %endpoint, "invoking remote command");
        let output = Command::new(&self.program)
            .args(Self::args(endpoint, command))
            .output()
            .map_err(|source| ChannelError::Spawn {
                program: self.program.clone(),
                source,
            })?;
        let status = output.status.code().ok_or_else(|| ChannelError::Terminated {
            program: self.program.clone(),
        })?;
        Ok(InvocationOutput {
            status,
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn argument_vector_places_endpoint_before_command() {
        let endpoint = Endpoint::new("password-change.example.org", 4443, "service/password-change");
        let command = vec!["password".to_string(), "reset".to_string()];

        let args = RemctlClient::args(&endpoint, &command);

        let rendered: Vec<String> = args
            .iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            rendered,
            vec![
                "-s",
                "service/password-change",
                "-p",
                "4443",
                "password-change.example.org",
                "password",
                "reset",
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn missing_client_tool_is_a_spawn_error() {
        let client = RemctlClient::with_program("/nonexistent/remctl");
        let endpoint = Endpoint::new("localhost", 4443, "service/password-change");
        let err = client
            .invoke(&endpoint, &["password".to_string()])
            .unwrap_err();
        assert!(matches!(err, ChannelError::Spawn { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn completed_command_reports_its_exit_status() {
        // `false` completes with status 1; that is a channel success.
        let client = RemctlClient::with_program("false");
        let endpoint = Endpoint::new("localhost", 4443, "service/password-change");
        let output = client.invoke(&endpoint, &[]).unwrap();
        assert_eq!(output.status, 1);
    }
}
