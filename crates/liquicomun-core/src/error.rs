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

//! Error types for the liquicomun engine

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LiquicomunError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("bad filename: {0}")]
    BadFilename(String),

    #[error("empty file")]
    EmptyFile,

    #[error("bad format: {0}")]
    BadFormat(String),

    #[error("no access token configured")]
    MissingCredential,

    #[error("{0} not found")]
    SourceUnavailable(String),

    #[error("no loss coefficient for tariff {tariff} period {period}")]
    UnknownCoefficient { tariff: String, period: String },

    #[error("unknown file kind: {0}")]
    UnknownKind(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("grid error: {0}")]
    Grid(#[from] GridError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("archive error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// Shape and bounds failures of a [`crate::grid::Grid`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("day {day} hour {hour} out of range")]
    OutOfRange { day: u32, hour: u32 },

    #[error("expected {expected_rows} rows of {expected_width} cells, got {rows} rows")]
    ShapeMismatch {
        expected_rows: usize,
        expected_width: usize,
        rows: usize,
    },

    #[error("grids differ: {left} vs {right}")]
    Incompatible { left: String, right: String },
}

pub type Result<T> = std::result::Result<T, LiquicomunError>;
