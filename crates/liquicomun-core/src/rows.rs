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

//! Raw `;` separated rows of a settlement file.

use crate::error::Result;
use csv::ReaderBuilder;
use std::path::Path;

pub type Row = Vec<String>;
pub type Rows = Vec<Row>;

/// Parses file content. Rows keep their own width; cells are not trimmed.
pub fn parse_rows(content: &[u8]) -> Result<Rows> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .flexible(true)
        .from_reader(content);

    let mut rows = Vec::new();
    for record in reader.byte_records() {
        let record = record?;
        rows.push(
            record
                .iter()
                .map(|field| String::from_utf8_lossy(field).into_owned())
                .collect(),
        );
    }
    Ok(rows)
}

pub fn read_rows(path: &Path) -> Result<Rows> {
    let content = std::fs::read(path)?;
    parse_rows(&content)
}

/// File version stamp: the first six cells of the generation row joined.
pub fn version_stamp(rows: &[Row]) -> String {
    rows.get(1)
        .map(|row| row.iter().take(6).map(String::as_str).collect())
        .unwrap_or_default()
}
