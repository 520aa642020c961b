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

//! Settlement file names.
//!
//! Names follow `<RR>_<kind-token>_<YYYYMMDD>_<YYYYMMDD>` where `RR` is the revision tag (or any
//! two-character placeholder in a template) and the dates bound the settled month.

use crate::error::{LiquicomunError, Result};
use chrono::NaiveDate;
use std::fmt;
use std::path::Path;

const DATE_FORMAT: &str = "%Y%m%d";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileName {
    name: String,
    start: NaiveDate,
    end: NaiveDate,
}

impl FileName {
    /// Parses the base name of `path`.
    pub fn parse(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| LiquicomunError::BadFilename(path.display().to_string()))?;
        let bad = || LiquicomunError::BadFilename(name.to_string());

        let mut parts = name.rsplitn(3, '_');
        let end = parts.next().and_then(parse_date).ok_or_else(bad)?;
        let start = parts.next().and_then(parse_date).ok_or_else(bad)?;
        let head = parts.next().ok_or_else(bad)?;

        let (prefix, token) = head.split_once('_').ok_or_else(bad)?;
        if prefix.chars().count() != 2 || !prefix.is_ascii() || token.is_empty() {
            return Err(bad());
        }

        Ok(Self {
            name: name.to_string(),
            start,
            end,
        })
    }

    /// Parses and checks that the kind token is `token`.
    pub fn parse_expecting(path: impl AsRef<Path>, token: &str) -> Result<Self> {
        let parsed = Self::parse(path)?;
        if parsed.token() != token {
            return Err(LiquicomunError::BadFilename(format!(
                "{} is not a {token} file",
                parsed.name
            )));
        }
        Ok(parsed)
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// The two leading characters, the revision of a concrete file.
    pub fn prefix(&self) -> &str {
        self.name.get(..2).unwrap_or_default()
    }

    /// Kind token between the prefix and the dates, subsystem suffix included.
    pub fn token(&self) -> &str {
        // prefix is two ASCII chars plus '_', dates are 2 * 9 chars
        self.name
            .get(3..self.name.len() - 18)
            .unwrap_or_default()
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end
    }

    /// Same name with the first two characters replaced by `revision`.
    #[must_use]
    pub fn with_revision(&self, revision: &str) -> Self {
        Self {
            name: format!("{revision}{}", self.name.get(2..).unwrap_or_default()),
            start: self.start,
            end: self.end,
        }
    }

    /// Same name with the kind token swapped, e.g. `Kreal` for `Kestimado`.
    #[must_use]
    pub fn with_token(&self, token: &str) -> Self {
        Self {
            name: format!(
                "{}_{token}_{}_{}",
                self.prefix(),
                self.start.format(DATE_FORMAT),
                self.end.format(DATE_FORMAT)
            ),
            start: self.start,
            end: self.end,
        }
    }
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    if text.len() != 8 || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(text, DATE_FORMAT).ok()
}

impl fmt::Display for FileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
