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

//! Entry point tying resolution, validation and formatting together.

use crate::cache::Cache;
use crate::config::LiquicomunConfig;
use crate::error::Result;
use crate::file_kind::{FileKind, Layout};
use crate::filename::FileName;
use crate::formatter::RowFormatter;
use crate::grid::Grid;
use crate::losses::{ImportType, LossBatch, LossRequest};
use crate::resolver::{Origin, Resolved, VersionResolver};
use crate::revision::RevisionTag;
use crate::rows::version_stamp;
use crate::schema::SchemaValidator;
use crate::source::ArchiveSource;
use std::path::Path;
use tracing::{info, warn};

/// A settlement file loaded into a grid.
#[derive(Debug)]
pub struct LoadedFile {
    pub grid: Grid,
    pub origin: Origin,
    pub file_name: FileName,
    /// Tariff periods table used to weigh the values, coefficient imports only.
    pub periods_file: Option<FileName>,
}

#[derive(Debug)]
pub struct BatchItem {
    pub request: LossRequest,
    pub result: Result<LoadedFile>,
}

#[derive(Debug)]
pub struct Liquicomun<S> {
    config: LiquicomunConfig,
    cache: Cache,
    source: S,
}

impl<S: ArchiveSource> Liquicomun<S> {
    pub fn new(config: LiquicomunConfig, source: S) -> Self {
        let cache = Cache::new(config.cache_dir.clone(), config.cache_ttl());
        Self {
            config,
            cache,
            source,
        }
    }

    pub fn config(&self) -> &LiquicomunConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    pub fn resolver(&self) -> VersionResolver<'_, S> {
        VersionResolver::new(&self.source, self.config.token.as_deref(), &self.cache)
    }

    /// Loads a file, inferring its kind from the name.
    pub fn load(&self, request: impl AsRef<Path>) -> Result<LoadedFile> {
        let name = FileName::parse(request.as_ref())?;
        let kind = FileKind::from_token(name.token())?;
        self.load_kind(request, &kind)
    }

    pub fn load_kind(&self, request: impl AsRef<Path>, kind: &FileKind) -> Result<LoadedFile> {
        let resolved = self.resolver().resolve(request.as_ref(), &kind.token)?;
        SchemaValidator::for_kind(kind).validate(&resolved.rows)?;

        let mut grid = grid_for(&resolved);
        let matrix = match kind.layout {
            Layout::Direct => RowFormatter::direct(&resolved.rows)?,
            Layout::CostComponent => {
                RowFormatter::cost_component(&resolved.rows, grid.num_days() as usize)?
            }
        };
        grid.load(&matrix)?;

        info!(
            "Loaded {} from {} ({})",
            resolved.file_name, resolved.origin, resolved.revision
        );
        Ok(LoadedFile {
            grid,
            origin: resolved.origin,
            file_name: resolved.file_name,
            periods_file: None,
        })
    }

    pub fn load_losses(&self, request: &LossRequest) -> Result<LoadedFile> {
        match request.import {
            ImportType::LossFiles => {
                self.load_kind(request.file_name(), &FileKind::losses(&request.kind_token()))
            }
            ImportType::Coefficients => self.load_with_coefficients(request),
        }
    }

    /// Hourly `Kreal` values, or `Kestimado` when no real ones are published, weighted by the
    /// loss coefficients of the request's tariff.
    pub fn load_with_coefficients(&self, request: &LossRequest) -> Result<LoadedFile> {
        let resolver = self.resolver();
        let values = resolver.resolve_coefficients(Path::new(&request.file_name()))?;
        let kind = FileKind::coefficients(values.file_name.token());

        let periods_kind = FileKind::periods(&request.periods_token());
        let periods =
            resolver.resolve(Path::new(&request.periods_file_name()), &periods_kind.token)?;

        SchemaValidator::for_kind(&kind).validate(&values.rows)?;
        SchemaValidator::for_kind(&periods_kind).validate(&periods.rows)?;

        let mut grid = grid_for(&values);
        grid.load(&RowFormatter::weighted(
            &values.rows,
            &periods.rows,
            request.ree_tariff(),
        )?)?;

        info!(
            "Loaded {} weighted by {} from {}",
            values.file_name, periods.file_name, values.origin
        );
        Ok(LoadedFile {
            grid,
            origin: values.origin,
            file_name: values.file_name,
            periods_file: Some(periods.file_name),
        })
    }

    /// One result per request, a failing request does not stop the batch.
    pub fn load_batch(&self, batch: &LossBatch) -> Vec<BatchItem> {
        batch
            .requests()
            .into_iter()
            .map(|request| {
                let result = self.load_losses(&request);
                if let Err(e) = &result {
                    warn!("Failed to load {request}: {e}");
                }
                BatchItem { request, result }
            })
            .collect()
    }

    pub fn clear_cache(&self, revision: Option<RevisionTag>) -> Result<usize> {
        self.cache.clear(revision)
    }
}

/// Empty grid for the month of the file, stamped with its generation time.
fn grid_for(resolved: &Resolved) -> Grid {
    let mut grid =
        Grid::new(resolved.file_name.end_date()).with_version(version_stamp(&resolved.rows));
    grid.file_version = Some(resolved.revision.clone());
    grid
}
