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

//! Liquicomun - versioned acquisition of REE settlement files
//!
//! The monthly liquicomun bundles published on ESIOS carry loss coefficients and price components
//! as `;` separated files, each republished under several revisions. This crate finds the best
//! revision of a file (local, cached or downloaded), validates its shape and loads it into a
//! day by hour [`Grid`].

pub mod acquisition;
pub mod cache;
pub mod coefficients;
pub mod config;
pub mod error;
pub mod esios;
pub mod file_kind;
pub mod filename;
pub mod formatter;
pub mod grid;
pub mod loader;
pub mod losses;
pub mod resolver;
pub mod revision;
pub mod rows;
pub mod schema;
pub mod season;
pub mod source;

pub use config::LiquicomunConfig;
pub use error::{GridError, LiquicomunError, Result};
pub use esios::EsiosClient;
pub use file_kind::FileKind;
pub use filename::FileName;
pub use grid::{AuditRecord, Grid};
pub use loader::{BatchItem, Liquicomun, LoadedFile};
pub use losses::{ImportType, LossBatch, LossRequest, Subsystem};
pub use resolver::{Origin, VersionResolver};
pub use revision::RevisionTag;
pub use source::ArchiveSource;
