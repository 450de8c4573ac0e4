//! Admin configuration
//!
//! The shared secret is provided out-of-band through `API_KEY` and read once
//! at startup.

use std::env;
use std::path::PathBuf;
use thiserror::Error;

pub const API_KEY_VAR: &str = "API_KEY";

/// Static admin page, relative to the working directory.
pub const ADMIN_PAGE: &str = "admin.html";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),
}

#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// Raw value of `API_KEY`, surrounding whitespace included.
    pub api_key: String,
    pub admin_page: PathBuf,
}

impl AdminConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR).ok_or(ConfigError::Missing(API_KEY_VAR))?;

        Ok(Self {
            api_key,
            admin_page: PathBuf::from(ADMIN_PAGE),
        })
    }

    /// The value callers must present in `X-API-KEY`.
    pub fn expected_key(&self) -> &str {
        self.api_key.trim()
    }
}
