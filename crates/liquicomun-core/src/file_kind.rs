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

//! File kind descriptors.
//!
//! Every file of a liquicomun bundle is one of a handful of shapes. A [`FileKind`] says how to
//! validate its rows and how to turn them into a grid, so a single loader serves them all.

use crate::error::{LiquicomunError, Result};

/// Row layout checked before the data is trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schema {
    /// Two header rows, one row per day, footer.
    Standard,
    /// Two header rows, one row per hour, footer.
    Accumulated,
}

/// How validated rows become grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Direct,
    CostComponent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileKind {
    pub name: String,
    pub token: String,
    pub schema: Schema,
    pub layout: Layout,
    /// Whether the header's first cell must start with the kind name.
    pub checks_header: bool,
}

pub const REAL_COEFFICIENTS: &str = "Kreal";
pub const ESTIMATED_COEFFICIENTS: &str = "Kestimado";

/// Price and cost files of the bundle.
const PRICE_KINDS: &[(&str, Schema, Layout)] = &[
    ("prmdiari", Schema::Standard, Layout::Direct),
    ("prmncur", Schema::Standard, Layout::Direct),
    ("prgpncur", Schema::Standard, Layout::Direct),
    ("grcosdnc", Schema::Accumulated, Layout::CostComponent),
];

impl FileKind {
    fn direct(token: &str, checks_header: bool) -> Self {
        Self {
            name: token.to_string(),
            token: token.to_string(),
            schema: Schema::Standard,
            layout: Layout::Direct,
            checks_header,
        }
    }

    /// Loss file token, `perd20A` or `Sperd20A_BALEARES`.
    pub fn losses(token: &str) -> Self {
        Self::direct(token, true)
    }

    /// `Kreal` / `Kestimado` hourly values weighted by the loss coefficients.
    pub fn coefficients(token: &str) -> Self {
        Self::direct(token, true)
    }

    /// Tariff period tables (`pertarif`, `peta*`, `petar*`).
    pub fn periods(token: &str) -> Self {
        Self::direct(token, false)
    }

    pub fn lookup(token: &str) -> Option<Self> {
        PRICE_KINDS
            .iter()
            .find(|(name, _, _)| *name == token)
            .map(|(name, schema, layout)| Self {
                name: (*name).to_string(),
                token: (*name).to_string(),
                schema: *schema,
                layout: *layout,
                checks_header: true,
            })
    }

    /// Infers the kind from the token of a file name.
    pub fn from_token(token: &str) -> Result<Self> {
        if let Some(kind) = Self::lookup(token) {
            return Ok(kind);
        }
        if token.starts_with("perd") || token.starts_with("Sperd") {
            return Ok(Self::losses(token));
        }
        if token == REAL_COEFFICIENTS || token == ESTIMATED_COEFFICIENTS {
            return Ok(Self::coefficients(token));
        }
        if token.starts_with("pet") || token == "pertarif" {
            return Ok(Self::periods(token));
        }
        if token.starts_with("prm") || token.starts_with("prg") {
            return Ok(Self::direct(token, true));
        }
        Err(LiquicomunError::UnknownKind(token.to_string()))
    }

    /// Expected start of the header's first cell.
    pub fn header_prefix(&self) -> Option<&str> {
        if !self.checks_header {
            return None;
        }
        Some(self.name.get(..4).unwrap_or(&self.name))
    }
}
