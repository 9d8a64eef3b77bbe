//! Layered configuration: defaults → system file → user file → environment

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Resolved configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Host running the password-change service.
    pub server: String,
    /// Port of the remote command service.
    pub port: u16,
    /// Service principal used both for the scoped administrative
    /// credential and for channel authentication.
    pub principal: String,
    /// Site password file used for the display-name confirmation.
    pub passwd_file: PathBuf,
    /// Remote reset attempts allowed per run.
    pub retry_attempts: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: "password-change.example.org".to_string(),
            port: 4443,
            principal: "service/password-change".to_string(),
            passwd_file: PathBuf::from("/etc/rekey/passwd"),
            retry_attempts: 5,
        }
    }
}

impl Config {
    /// System-wide configuration file.
    pub const SYSTEM_FILE: &'static str = "/etc/rekey/config.toml";

    /// Merge defaults, configuration files, and `REKEY_*` environment
    /// variables. An explicit `path` replaces both file locations.
    pub fn load(explicit: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        match explicit {
            Some(path) => figment = figment.merge(Toml::file(path)),
            None => {
                figment = figment.merge(Toml::file(Self::SYSTEM_FILE));
                if let Some(dir) = dirs::config_dir() {
                    figment = figment.merge(Toml::file(dir.join("rekey/config.toml")));
                }
            }
        }
        figment.merge(Env::prefixed("REKEY_")).extract()
    }
}
