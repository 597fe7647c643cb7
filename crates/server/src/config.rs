// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Server configuration.
//!
//! Values come from an optional TOML file and are then overridden by
//! command-line flags.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};

/// Settings for one server process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Address to listen on.
    #[serde(default = "default_bind")]
    pub bind: SocketAddr,

    /// Directory holding `notes.db`.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Origins allowed by CORS. Empty allows any origin.
    #[serde(default)]
    pub cors_origins: Vec<String>,

    #[serde(default)]
    pub verbose: bool,

    /// Secret for signing access tokens, at least 32 bytes. A random one is
    /// used when absent, so tokens do not survive a restart.
    #[serde(default)]
    pub token_secret: Option<String>,

    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: u64,

    /// Reject note requests that carry no bearer token.
    #[serde(default)]
    pub require_token: bool,

    #[serde(default)]
    pub hasher: HasherConfig,
}

/// Argon2 cost parameters for password hashes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HasherConfig {
    /// Memory in KiB.
    #[serde(default = "default_argon2_m_cost")]
    pub argon2_m_cost: u32,

    #[serde(default = "default_argon2_t_cost")]
    pub argon2_t_cost: u32,

    #[serde(default = "default_argon2_p_cost")]
    pub argon2_p_cost: u32,
}

impl Default for HasherConfig {
    fn default() -> Self {
        HasherConfig {
            argon2_m_cost: default_argon2_m_cost(),
            argon2_t_cost: default_argon2_t_cost(),
            argon2_p_cost: default_argon2_p_cost(),
        }
    }
}

fn default_argon2_m_cost() -> u32 {
    19 * 1024
}

fn default_argon2_t_cost() -> u32 {
    2
}

fn default_argon2_p_cost() -> u32 {
    1
}

fn default_token_ttl_hours() -> u64 {
    12
}

fn default_bind() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 5000))
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind: default_bind(),
            data_dir: default_data_dir(),
            cors_origins: Vec::new(),
            verbose: false,
            token_secret: None,
            token_ttl_hours: default_token_ttl_hours(),
            require_token: false,
            hasher: HasherConfig::default(),
        }
    }
}

impl Config {
    /// Loads a config file. Missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {}", path.display(), e)))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.token_ttl_hours * 3600)
    }

    /// Applies command-line overrides on top of file values.
    pub fn with_overrides(
        mut self,
        bind: Option<SocketAddr>,
        data_dir: Option<PathBuf>,
        verbose: bool,
    ) -> Self {
        if let Some(bind) = bind {
            self.bind = bind;
        }
        if let Some(data_dir) = data_dir {
            self.data_dir = data_dir;
        }
        self.verbose |= verbose;
        self
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
