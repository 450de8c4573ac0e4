//! Greeter configuration
//!
//! Echo Service discovery is environment driven: `ECHO_SERVICE_HOST` and
//! `ECHO_SERVICE_PORT` are read once at startup, falling back to the cluster
//! DNS name and the echo service's well-known port.

use std::env;
use std::path::PathBuf;

pub const ECHO_HOST_VAR: &str = "ECHO_SERVICE_HOST";
pub const ECHO_PORT_VAR: &str = "ECHO_SERVICE_PORT";

pub const DEFAULT_ECHO_HOST: &str = "echo-service";
pub const DEFAULT_ECHO_PORT: &str = "8081";

/// Static landing page, relative to the working directory.
pub const INDEX_PAGE: &str = "index.html";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GreeterConfig {
    pub echo_host: String,
    pub echo_port: String,
    pub index_page: PathBuf,
}

impl GreeterConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.is_empty());

        Self {
            echo_host: non_empty(ECHO_HOST_VAR).unwrap_or_else(|| DEFAULT_ECHO_HOST.to_string()),
            echo_port: non_empty(ECHO_PORT_VAR).unwrap_or_else(|| DEFAULT_ECHO_PORT.to_string()),
            index_page: PathBuf::from(INDEX_PAGE),
        }
    }

    pub fn echo_url(&self) -> String {
        format!("http://{}:{}/echo", self.echo_host, self.echo_port)
    }
}
