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

//! ESIOS archive download client.

use crate::config::LiquicomunConfig;
use crate::source::ArchiveSource;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use reqwest::StatusCode;
use reqwest::blocking::Client;
use std::time::Duration;
use tracing::{debug, info};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub struct EsiosClient {
    client: Client,
    base_url: String,
    archive_id: u32,
}

impl EsiosClient {
    pub fn new(base_url: impl Into<String>, archive_id: u32) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("liquicomun/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            archive_id,
        })
    }

    pub fn from_config(config: &LiquicomunConfig) -> Result<Self> {
        Self::new(config.api_base_url.clone(), config.archive_id)
    }

    fn download_url(&self) -> String {
        format!(
            "{}/archives/{}/download",
            self.base_url.trim_end_matches('/'),
            self.archive_id
        )
    }
}

impl ArchiveSource for EsiosClient {
    fn fetch(
        &self,
        token: &str,
        start: NaiveDate,
        end: NaiveDate,
        attempt: usize,
    ) -> Result<Option<Vec<u8>>> {
        let url = self.download_url();
        let start_date = start.format("%Y-%m-%dT00:00:00").to_string();
        let end_date = end.format("%Y-%m-%dT23:59:59").to_string();
        let next = attempt.to_string();

        info!("Downloading liquicomun {start} - {end} (attempt {attempt}) from {url}");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("start_date", start_date.as_str()),
                ("end_date", end_date.as_str()),
                ("date_type", "datos"),
                ("locale", "es"),
                ("next", next.as_str()),
            ])
            .header("Authorization", format!("Token token=\"{token}\""))
            .header("x-api-key", token)
            .send()
            .context("Failed to send request to ESIOS")?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!("No archive for attempt {attempt}");
            return Ok(None);
        }
        if !response.status().is_success() {
            anyhow::bail!("Failed to download archive: HTTP {}", response.status());
        }

        let bytes = response.bytes().context("Failed to read response bytes")?;
        if bytes.is_empty() {
            return Ok(None);
        }
        Ok(Some(bytes.to_vec()))
    }
}
