//! Flag service location configuration.

use std::env;
use std::path::PathBuf;

use crate::error::ConfigError;

/// Default flag service host.
pub const DEFAULT_HOST: &str = "localhost";
/// Default flag service port.
pub const DEFAULT_PORT: u16 = 8013;

pub const HOST_ENV: &str = "FLAGD_HOST";
pub const PORT_ENV: &str = "FLAGD_PORT";
pub const CERT_PATH_ENV: &str = "FLAGD_SERVER_CERT_PATH";
pub const SOCKET_PATH_ENV: &str = "FLAGD_SOCKET_PATH";

/// Where the flag evaluation service lives.
///
/// This is a plain record handed to whatever builds the transport; nothing
/// here opens a connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfiguration {
    /// Service host.
    pub host: String,
    /// Service port.
    pub port: u16,
    /// Server certificate; enables TLS when set.
    pub certificate_path: Option<PathBuf>,
    /// Unix domain socket; takes precedence over host and port.
    pub socket_path: Option<PathBuf>,
}

impl Default for ServiceConfiguration {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            certificate_path: None,
            socket_path: None,
        }
    }
}

impl ServiceConfiguration {
    /// Create a new builder.
    pub fn builder() -> ServiceConfigurationBuilder {
        ServiceConfigurationBuilder::default()
    }

    /// Load from `FLAGD_*` environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load using `lookup` to read each variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup(HOST_ENV).filter(|h| !h.is_empty()) {
            config.host = host;
        }
        if let Some(port) = lookup(PORT_ENV).filter(|p| !p.is_empty()) {
            config.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                key: PORT_ENV.to_string(),
                value: port.clone(),
            })?;
        }
        config.certificate_path = lookup(CERT_PATH_ENV)
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);
        config.socket_path = lookup(SOCKET_PATH_ENV)
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);

        Ok(config)
    }

    /// Whether TLS should be used.
    pub fn is_tls(&self) -> bool {
        self.certificate_path.is_some()
    }

    /// Endpoint URI for the configured location.
    pub fn endpoint_uri(&self) -> String {
        if let Some(socket) = &self.socket_path {
            return format!("unix:{}", socket.display());
        }

        let scheme = if self.is_tls() { "https" } else { "http" };
        format!("{}://{}:{}", scheme, self.host, self.port)
    }
}

/// Builder for service configuration.
#[derive(Debug, Default)]
pub struct ServiceConfigurationBuilder {
    config: ServiceConfiguration,
}

impl ServiceConfigurationBuilder {
    /// Set the host.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set the port.
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Set the server certificate path.
    pub fn certificate_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.certificate_path = Some(path.into());
        self
    }

    /// Set the Unix socket path.
    pub fn socket_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.socket_path = Some(path.into());
        self
    }

    /// Build the configuration.
    pub fn build(self) -> ServiceConfiguration {
        self.config
    }
}
