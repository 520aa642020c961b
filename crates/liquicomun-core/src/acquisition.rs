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

//! Download of a settlement file out of the liquicomun archives.

use crate::cache::Cache;
use crate::error::{LiquicomunError, Result};
use crate::filename::FileName;
use crate::revision::RevisionTag;
use crate::rows::{Rows, parse_rows};
use crate::source::ArchiveSource;
use anyhow::Context;
use std::io::{Cursor, Read};
use tracing::{debug, error, info, warn};
use zip::ZipArchive;
use zip::result::ZipError;

#[derive(Debug)]
pub struct Acquired {
    pub rows: Rows,
    /// Archive member that was used, carrying the actual revision.
    pub file_name: FileName,
}

#[derive(Debug)]
pub struct Acquisition<'a, S: ?Sized> {
    source: &'a S,
    token: Option<&'a str>,
    cache: &'a Cache,
}

impl<'a, S: ArchiveSource + ?Sized> Acquisition<'a, S> {
    pub fn new(source: &'a S, token: Option<&'a str>, cache: &'a Cache) -> Self {
        Self {
            source,
            token,
            cache,
        }
    }

    /// Walks the archive attempts until one contains `template` under its own revision.
    pub fn acquire(&self, template: &FileName) -> Result<Acquired> {
        let token = self
            .token
            .filter(|t| !t.is_empty())
            .ok_or(LiquicomunError::MissingCredential)?;

        for attempt in 0..RevisionTag::ALL.len() {
            match self.try_attempt(token, template, attempt) {
                Ok(Some(acquired)) => {
                    info!(
                        "Downloaded {} on attempt {attempt}",
                        acquired.file_name.as_str()
                    );
                    return Ok(acquired);
                }
                Ok(None) => continue,
                Err(e) => debug!("Exception processing download [{e:#}]"),
            }
        }

        error!("Requested file {} not found on the server", template.as_str());
        Err(LiquicomunError::SourceUnavailable(template.to_string()))
    }

    fn try_attempt(
        &self,
        token: &str,
        template: &FileName,
        attempt: usize,
    ) -> anyhow::Result<Option<Acquired>> {
        let Some(bytes) = self.source.fetch(
            token,
            template.start_date(),
            template.end_date(),
            attempt,
        )?
        else {
            debug!("No valid data has been downloaded on attempt {attempt}");
            return Ok(None);
        };

        let mut archive = ZipArchive::new(Cursor::new(bytes)).context("Failed to open archive")?;
        let first = archive.by_index(0)?.name().to_string();
        let revision = first
            .get(..2)
            .with_context(|| format!("Unexpected archive member '{first}'"))?;
        let expected = template.with_revision(revision);

        let mut content = Vec::new();
        match archive.by_name(expected.as_str()) {
            Ok(mut member) => {
                member.read_to_end(&mut content)?;
            }
            Err(ZipError::FileNotFound) => {
                debug!("File '{}' is not inside the archive", expected.as_str());
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        }

        let rows = parse_rows(&content)?;
        if let Err(e) = self.cache.store(expected.as_str(), &content) {
            warn!("Failed to cache {expected}: {e}");
        }
        Ok(Some(Acquired {
            rows,
            file_name: expected,
        }))
    }
}
