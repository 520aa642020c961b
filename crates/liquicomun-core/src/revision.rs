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

//! Revision tags of the settlement files.
//!
//! Every liquicomun file is republished several times. The two-character tag at the start of the
//! file name says which publication it is: `A` series are the regular closings, `C` series are
//! the corrections. [`RevisionTag::ALL`] lists them most authoritative first.

use crate::error::LiquicomunError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RevisionTag {
    C7,
    A7,
    C6,
    A6,
    C5,
    C4,
    A5,
    A4,
    C3,
    A3,
    C2,
    A2,
    C1,
    A1,
}

impl RevisionTag {
    /// Priority order used when walking the cache and the archive.
    pub const ALL: [RevisionTag; 14] = [
        Self::C7,
        Self::A7,
        Self::C6,
        Self::A6,
        Self::C5,
        Self::C4,
        Self::A5,
        Self::A4,
        Self::C3,
        Self::A3,
        Self::C2,
        Self::A2,
        Self::C1,
        Self::A1,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::C7 => "C7",
            Self::A7 => "A7",
            Self::C6 => "C6",
            Self::A6 => "A6",
            Self::C5 => "C5",
            Self::C4 => "C4",
            Self::A5 => "A5",
            Self::A4 => "A4",
            Self::C3 => "C3",
            Self::A3 => "A3",
            Self::C2 => "C2",
            Self::A2 => "A2",
            Self::C1 => "C1",
            Self::A1 => "A1",
        }
    }

    /// Provisional revisions may still be superseded, so cached copies expire.
    pub fn is_provisional(self) -> bool {
        matches!(self, Self::A2 | Self::C1 | Self::A1)
    }

    pub fn is_final(self) -> bool {
        !self.is_provisional()
    }

    /// Revisions whose coefficient files are published as `Kestimado`.
    pub fn is_estimated(self) -> bool {
        matches!(self, Self::C2 | Self::A2 | Self::C1 | Self::A1)
    }
}

impl fmt::Display for RevisionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RevisionTag {
    type Err = LiquicomunError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|tag| tag.as_str() == upper)
            .ok_or_else(|| LiquicomunError::InvalidInput(format!("unknown revision tag '{s}'")))
    }
}
