// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of Liquicomun.
//
// Licensed under the Creative Commons Attribution-NonCommercial-NoDerivatives 4.0 International
// (CC BY-NC-ND 4.0). You may use and share this file for non-commercial purposes only and you may not
// create derivatives. See <https://creativecommons.org/licenses/by-nc-nd/4.0/>.
//
// This software is provided "AS IS", without warranty of any kind.
//
// For commercial licensing, please contact: info@solare.cz

//! Engine configuration: access credential, cache location and freshness.

use crate::error::{LiquicomunError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

pub const DEFAULT_API_URL: &str = "https://api.esios.ree.es";

fn default_cache_dir() -> PathBuf {
    std::env::temp_dir()
}

fn default_3600() -> u64 {
    3600
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_archive_id() -> u32 {
    2
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LiquicomunConfig {
    /// ESIOS access token, required only when files must be downloaded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Directory holding downloaded files
    #[serde(default = "default_cache_dir")]
    pub cache_dir: PathBuf,

    /// How long a cached provisional revision stays valid (seconds)
    #[serde(default = "default_3600")]
    pub cache_ttl_secs: u64,

    #[serde(default = "default_api_url")]
    pub api_base_url: String,

    /// ESIOS archive id of the liquicomun bundle
    #[serde(default = "default_archive_id")]
    pub archive_id: u32,
}

impl Default for LiquicomunConfig {
    fn default() -> Self {
        Self {
            token: None,
            cache_dir: default_cache_dir(),
            cache_ttl_secs: 3600,
            api_base_url: default_api_url(),
            archive_id: 2,
        }
    }
}

impl LiquicomunConfig {
    /// Loads the file at `path` when given (TOML, or JSON by extension), then applies the
    /// environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            LiquicomunError::Config(format!("Failed to read {}: {e}", path.display()))
        })?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let config = if is_json {
            serde_json::from_str(&content)
                .map_err(|e| LiquicomunError::Config(format!("Failed to parse config: {e}")))?
        } else {
            toml::from_str(&content)
                .map_err(|e| LiquicomunError::Config(format!("Failed to parse config: {e}")))?
        };
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Applies `ESIOS_TOKEN`, `LIQUICOMUN_CACHE_DIR`, `LIQUICOMUN_CACHE_TTL_SECS` and
    /// `ESIOS_API_URL` as returned by `lookup`.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(token) = lookup("ESIOS_TOKEN")
            && !token.trim().is_empty()
        {
            self.token = Some(token);
        }

        if let Some(dir) = lookup("LIQUICOMUN_CACHE_DIR") {
            self.cache_dir = PathBuf::from(dir);
        }

        if let Some(ttl) = lookup("LIQUICOMUN_CACHE_TTL_SECS") {
            match ttl.parse::<u64>() {
                Ok(secs) => self.cache_ttl_secs = secs,
                Err(e) => debug!("Ignoring LIQUICOMUN_CACHE_TTL_SECS={ttl}: {e}"),
            }
        }

        if let Some(url) = lookup("ESIOS_API_URL") {
            self.api_base_url = url;
        }
    }

    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    #[must_use]
    pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = dir.into();
        self
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}
