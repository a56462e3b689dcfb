//! Configuration file for the `email-posture` binary.
//!
//! Every field has a default, so an absent file and an empty file behave the
//! same. Command-line flags take precedence over values read here.

use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use hickory_resolver::config::{NameServerConfigGroup, ResolverConfig, ResolverOpts};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::common::dns::HickoryResolver;
use crate::report::OutputFormat;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid nameserver address: {0}")]
    InvalidNameserver(String),
    #[error("failed to create resolver: {0}")]
    Resolver(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub resolver: ResolverSettings,
    pub output: OutputSettings,
}

/// DNS resolver settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ResolverSettings {
    /// Name server IPs. Empty means use the system configuration.
    pub nameservers: Vec<String>,
    pub port: u16,
    /// Per-query timeout in seconds
    pub timeout_secs: u64,
    pub attempts: usize,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            nameservers: Vec::new(),
            port: 53,
            timeout_secs: 5,
            attempts: 2,
        }
    }
}

/// Output settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub format: OutputFormat,
    pub color: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            color: true,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Load `path` if given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

impl ResolverSettings {
    pub fn nameserver_ips(&self) -> Result<Vec<IpAddr>, ConfigError> {
        self.nameservers
            .iter()
            .map(|s| {
                s.trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidNameserver(s.clone()))
            })
            .collect()
    }

    pub fn resolver_opts(&self) -> ResolverOpts {
        let mut opts = ResolverOpts::default();
        opts.timeout = Duration::from_secs(self.timeout_secs);
        opts.attempts = self.attempts;
        opts
    }

    /// Build a resolver from these settings.
    ///
    /// Without explicit name servers the system configuration is used, falling
    /// back to the resolver library's defaults when it cannot be read.
    pub fn build_resolver(&self) -> Result<HickoryResolver, ConfigError> {
        let ips = self.nameserver_ips()?;
        let opts = self.resolver_opts();

        if ips.is_empty() {
            return match HickoryResolver::from_system_conf_with_opts(opts.clone()) {
                Ok(resolver) => Ok(resolver),
                Err(e) => {
                    warn!(error = %e, "system resolver configuration unavailable, using defaults");
                    Ok(HickoryResolver::with_config(ResolverConfig::default(), opts))
                }
            };
        }

        debug!(nameservers = ?ips, port = self.port, "using configured name servers");
        let group = NameServerConfigGroup::from_ips_clear(&ips, self.port, true);
        let config = ResolverConfig::from_parts(None, vec![], group);
        Ok(HickoryResolver::with_config(config, opts))
    }
}
