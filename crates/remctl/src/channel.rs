//! The remote-command channel seam

use std::fmt;

use crate::error::ChannelError;

/// Where the remote command service listens, and which service principal
/// the channel authenticates to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Server host name.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Service principal presented during channel authentication.
    pub service: String,
}

impl Endpoint {
    /// Describe an endpoint.
    pub fn new(host: impl Into<String>, port: u16, service: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port,
            service: service.into(),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Captured result of a remote command that completed.
///
/// `status` is the remote exit status; the output streams are raw bytes,
/// surfaced verbatim and never parsed here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvocationOutput {
    /// Remote exit status.
    pub status: i32,
    /// Captured remote standard output.
    pub stdout: Vec<u8>,
    /// Captured remote standard error.
    pub stderr: Vec<u8>,
}

impl InvocationOutput {
    /// True when the remote command exited zero with no standard output.
    pub fn is_clean(&self) -> bool {
        self.status == 0 && self.stdout.is_empty()
    }
}

/// An authenticated remote-command channel.
pub trait RemoteChannel {
    /// Run `command` against the endpoint, capturing status and output.
    ///
    /// `Err` means the channel itself failed (connection, authentication
    /// to the remote service); a completed command with a non-zero exit
    /// status is an `Ok` result.
    fn invoke(
        &self,
        endpoint: &Endpoint,
        command: &[String],
    ) -> Result<InvocationOutput, ChannelError>;
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn endpoint_displays_host_and_port() {
        let endpoint = Endpoint::new("password-change.example.org", 4443, "service/password-change");
        assert_eq!(endpoint.to_string(), "password-change.example.org:4443");
    }

    #[test]
    fn clean_means_zero_status_and_silent_stdout() {
        let clean = InvocationOutput::default();
        assert!(clean.is_clean());

        // Remote chatter on stderr alone does not spoil a clean result.
        let stderr_only = InvocationOutput {
            stderr: b"deprecation notice\n".to_vec(),
            ..InvocationOutput::default()
        };
        assert!(stderr_only.is_clean());

        let chatty = InvocationOutput {
            stdout: b"policy: too short\n".to_vec(),
            ..InvocationOutput::default()
        };
        assert!(!chatty.is_clean());

        let failed = InvocationOutput {
            status: 1,
            ..InvocationOutput::default()
        };
        assert!(!failed.is_clean());
    }
}
