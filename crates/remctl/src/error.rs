//! Channel-level error types

use thiserror::Error;

/// Failures of the channel itself: the command never completed on the
/// remote side, so there is no status to interpret.
#[derive(Debug, Error)]
pub enum ChannelError {
    /// The client tool could not be started at all
    #[error("cannot run {program}: {source}")]
    Spawn {
        /// Client program that failed to start
        program: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The client was killed before reporting a status
    #[error("{program} terminated by signal")]
    Terminated {
        /// Client program that died
        program: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_error_names_the_program() {
        let err = ChannelError::Spawn {
            program: "remctl".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.to_string().contains("remctl"));
        assert!(err.to_string().contains("not found"));
    }
}
