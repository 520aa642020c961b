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

//! Loss file requests built from a tariff, a date range and an electric subsystem.

use crate::error::{LiquicomunError, Result};
use crate::file_kind::REAL_COEFFICIENTS;
use crate::revision::RevisionTag;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Tariff label to the token of its loss file (`perd<token>`).
pub const LOSS_FILE_TARIFFS: &[(&str, &str)] = &[
    ("2.0A", "20A"),
    ("2.0DHA", "20D"),
    ("2.0DHS", "20DHS"),
    ("2.1A", "21A"),
    ("2.1DHA", "21D"),
    ("2.1DHS", "21DHS"),
    ("3.0A", "30A"),
    ("3.1A", "31A"),
    ("3.1A LB", "31A"),
    ("6.1A", "g61A"),
    ("6.1B", "g61B"),
    ("6.2", "g62"),
    ("6.3", "g63"),
    ("6.4", "g64"),
    ("2.0TD", "20TD"),
    ("3.0TD", "30TD"),
    ("6.1TD", "61TD"),
    ("6.2TD", "62TD"),
    ("6.3TD", "63TD"),
    ("6.4TD", "64TD"),
    ("3.0TDVE", "30TD"),
    ("6.1TDVE", "61TD"),
];

/// Tariff label to its key in the coefficient table.
pub const COEFFICIENT_TARIFFS: &[(&str, &str)] = &[
    ("2.0A", "20A"),
    ("2.0DHA", "20DH"),
    ("2.0DHS", "20DHS"),
    ("2.1A", "21A"),
    ("2.1DHA", "21DH"),
    ("2.1DHS", "21DHS"),
    ("3.0A", "30A"),
    ("3.1A", "31A"),
    ("3.1A LB", "31A"),
    ("6.1A", "g61A"),
    ("6.1B", "g61B"),
    ("6.2", "g62"),
    ("6.3", "g63"),
    ("6.4", "g64"),
    ("2.0TD", "20TD"),
    ("3.0TD", "30TD"),
    ("6.1TD", "61TD"),
    ("6.2TD", "62TD"),
    ("6.3TD", "63TD"),
    ("6.4TD", "64TD"),
    ("3.0TDVE", "30TD"),
    ("6.1TDVE", "61TD"),
];

/// Tariffs in force from June 2021.
const TD_TARIFFS: &[&str] = &[
    "2.0TD", "3.0TD", "6.1TD", "6.2TD", "6.3TD", "6.4TD", "3.0TDVE", "6.1TDVE",
];

const DATE_FORMAT: &str = "%Y%m%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subsystem {
    Peninsula,
    Baleares,
    Canarias,
    Ceuta,
    Melilla,
}

impl Subsystem {
    pub const ALL: [Subsystem; 5] = [
        Self::Peninsula,
        Self::Baleares,
        Self::Canarias,
        Self::Ceuta,
        Self::Melilla,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Peninsula => "peninsula",
            Self::Baleares => "baleares",
            Self::Canarias => "canarias",
            Self::Ceuta => "ceuta",
            Self::Melilla => "melilla",
        }
    }

    /// Suffix REE appends to the loss file token, none for the peninsula.
    pub fn ree_suffix(self) -> Option<&'static str> {
        match self {
            Self::Peninsula => None,
            Self::Baleares => Some("BALEARES"),
            Self::Canarias => Some("CANARIAS"),
            Self::Ceuta => Some("CEUTA"),
            Self::Melilla => Some("MELILLA"),
        }
    }

    pub fn loss_prefix(self) -> &'static str {
        match self {
            Self::Peninsula => "perd",
            _ => "Sperd",
        }
    }
}

impl fmt::Display for Subsystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Subsystem {
    type Err = LiquicomunError;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|sub| sub.name() == lower)
            .ok_or_else(|| LiquicomunError::InvalidInput(format!("unknown subsystem '{s}'")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImportType {
    /// Published loss files, one per tariff and subsystem.
    LossFiles,
    /// Hourly values weighted by the standard loss coefficients.
    Coefficients,
}

impl ImportType {
    fn tariffs(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::LossFiles => LOSS_FILE_TARIFFS,
            Self::Coefficients => COEFFICIENT_TARIFFS,
        }
    }
}

fn lookup(table: &[(&str, &'static str)], label: &str) -> Option<&'static str> {
    table.iter().find(|(l, _)| *l == label).map(|(_, t)| *t)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LossRequest {
    /// Tariff label (`2.0A`) or an REE tariff token used as is.
    pub tariff: String,
    pub date_start: NaiveDate,
    pub date_end: NaiveDate,
    pub subsystem: Subsystem,
    pub version: RevisionTag,
    pub import: ImportType,
}

impl LossRequest {
    pub fn new(
        tariff: impl Into<String>,
        date_start: NaiveDate,
        date_end: NaiveDate,
        import: ImportType,
    ) -> Self {
        Self {
            tariff: tariff.into(),
            date_start,
            date_end,
            subsystem: Subsystem::Peninsula,
            version: RevisionTag::A1,
            import,
        }
    }

    #[must_use]
    pub fn with_subsystem(mut self, subsystem: Subsystem) -> Self {
        self.subsystem = subsystem;
        self
    }

    #[must_use]
    pub fn with_version(mut self, version: RevisionTag) -> Self {
        self.version = version;
        self
    }

    /// REE name of the tariff for this kind of import.
    pub fn ree_tariff(&self) -> &str {
        lookup(self.import.tariffs(), &self.tariff).unwrap_or(self.tariff.as_str())
    }

    fn dated(&self, token: &str) -> String {
        format!(
            "{}_{token}_{}_{}",
            self.version,
            self.date_start.format(DATE_FORMAT),
            self.date_end.format(DATE_FORMAT)
        )
    }

    /// Kind token of the values file.
    pub fn kind_token(&self) -> String {
        match self.import {
            ImportType::LossFiles => {
                let mut token = format!("{}{}", self.subsystem.loss_prefix(), self.ree_tariff());
                if let Some(suffix) = self.subsystem.ree_suffix() {
                    token.push('_');
                    token.push_str(suffix);
                }
                token
            }
            ImportType::Coefficients => REAL_COEFFICIENTS.to_string(),
        }
    }

    pub fn file_name(&self) -> String {
        self.dated(&self.kind_token())
    }

    /// Token of the tariff periods table paired with the coefficient values.
    pub fn periods_token(&self) -> String {
        let tariff = self.ree_tariff();
        if tariff.starts_with('g') {
            "pertarif".to_string()
        } else if tariff.contains("DH") {
            format!("peta{tariff}")
        } else {
            format!("petar{tariff}")
        }
    }

    pub fn periods_file_name(&self) -> String {
        self.dated(&self.periods_token())
    }
}

impl fmt::Display for LossRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.tariff, self.subsystem, self.file_name())
    }
}

/// Every tariff and subsystem combination of a date range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LossBatch {
    pub date_start: NaiveDate,
    pub date_end: NaiveDate,
    pub tariffs: Vec<String>,
    pub subsystems: Vec<Subsystem>,
    pub import: ImportType,
}

impl LossBatch {
    /// Tariffs and subsystems default to all of them. Tariffs not yet in force at
    /// `date_start` are dropped, an unknown one is rejected.
    pub fn new(
        date_start: NaiveDate,
        date_end: NaiveDate,
        import: ImportType,
        tariffs: Option<&[String]>,
        subsystems: Option<&[String]>,
    ) -> Result<Self> {
        let in_force = |label: &&str| {
            let before_2020 = date_start < NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or_default();
            let before_td = date_start < NaiveDate::from_ymd_opt(2021, 6, 1).unwrap_or_default();
            !(before_2020 && *label == "6.1B") && !(before_td && TD_TARIFFS.contains(label))
        };

        let mut available: Vec<&str> = import
            .tariffs()
            .iter()
            .map(|(label, _)| *label)
            .filter(in_force)
            .collect();
        available.sort_unstable();

        let tariffs = match tariffs {
            Some(requested) if !requested.is_empty() => {
                let mut kept = Vec::new();
                for label in requested {
                    if !in_force(&label.as_str()) {
                        continue;
                    }
                    if !available.contains(&label.as_str()) {
                        return Err(LiquicomunError::InvalidInput(format!(
                            "unknown tariff '{label}'"
                        )));
                    }
                    kept.push(label.clone());
                }
                kept
            }
            _ => available.iter().map(ToString::to_string).collect(),
        };

        let subsystems = match subsystems {
            Some(requested) if !requested.is_empty() => requested
                .iter()
                .map(|name| name.parse())
                .collect::<Result<Vec<Subsystem>>>()?,
            _ => Subsystem::ALL.to_vec(),
        };

        Ok(Self {
            date_start,
            date_end,
            tariffs,
            subsystems,
            import,
        })
    }

    /// Requests by subsystem, then tariff.
    pub fn requests(&self) -> Vec<LossRequest> {
        self.subsystems
            .iter()
            .flat_map(|subsystem| {
                self.tariffs.iter().map(|tariff| {
                    LossRequest::new(tariff.clone(), self.date_start, self.date_end, self.import)
                        .with_subsystem(*subsystem)
                })
            })
            .collect()
    }
}
