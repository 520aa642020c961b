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

//! Resolution of a requested file to its best available revision.
//!
//! A request is first served from the path itself when it exists, then from the cache walking
//! [`RevisionTag::ALL`] most authoritative first, and finally from the remote archive.
//! Coefficient requests walk the cache under both their real and estimated names before the
//! archive is asked for either.

use crate::acquisition::Acquisition;
use crate::cache::Cache;
use crate::error::{LiquicomunError, Result};
use crate::file_kind::{ESTIMATED_COEFFICIENTS, REAL_COEFFICIENTS};
use crate::filename::FileName;
use crate::revision::RevisionTag;
use crate::rows::{Rows, read_rows};
use crate::source::ArchiveSource;
use serde::Serialize;
use std::fmt;
use std::path::Path;
use tracing::{debug, info, warn};

/// Where the rows of a resolved file came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    File,
    Cache,
    Server,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::File => "file",
            Self::Cache => "cache",
            Self::Server => "server",
        })
    }
}

#[derive(Debug)]
pub struct Resolved {
    pub rows: Rows,
    pub origin: Origin,
    /// Revision tag of the rows, the two leading characters of `file_name`.
    pub revision: String,
    pub file_name: FileName,
}

#[derive(Debug)]
pub struct VersionResolver<'a, S: ?Sized> {
    cache: &'a Cache,
    acquisition: Acquisition<'a, S>,
}

impl<'a, S: ArchiveSource + ?Sized> VersionResolver<'a, S> {
    pub fn new(source: &'a S, token: Option<&'a str>, cache: &'a Cache) -> Self {
        Self {
            cache,
            acquisition: Acquisition::new(source, token, cache),
        }
    }

    /// Resolves `request`, a path or a bare template name whose kind token must be `token`.
    pub fn resolve(&self, request: &Path, token: &str) -> Result<Resolved> {
        let name = FileName::parse_expecting(request, token)?;

        if let Some(resolved) = from_file(request, &name) {
            return Ok(resolved);
        }
        if let Some(resolved) = self.from_cache(|_| &name) {
            return Ok(resolved);
        }
        self.from_server(&name)
    }

    /// Resolves a `Kreal` request, falling back to the `Kestimado` publication.
    ///
    /// The cache walk names C2 and later revisions `Kestimado`, so a cached estimated file is
    /// found before anything is downloaded.
    pub fn resolve_coefficients(&self, request: &Path) -> Result<Resolved> {
        let real = FileName::parse_expecting(request, REAL_COEFFICIENTS)?;

        if let Some(resolved) = from_file(request, &real) {
            return Ok(resolved);
        }
        let estimated = real.with_token(ESTIMATED_COEFFICIENTS);
        let cached = self.from_cache(|tag| {
            if tag.is_estimated() {
                &estimated
            } else {
                &real
            }
        });
        if let Some(resolved) = cached {
            return Ok(resolved);
        }

        match self.from_server(&real) {
            Err(LiquicomunError::SourceUnavailable(_) | LiquicomunError::MissingCredential) => {
                info!("No {REAL_COEFFICIENTS} available. Switching to {ESTIMATED_COEFFICIENTS}");
                self.from_server(&estimated)
            }
            resolved => resolved,
        }
    }

    /// Walks the cache most authoritative first, `name_for` giving the template of each revision.
    fn from_cache<'n>(&self, name_for: impl Fn(RevisionTag) -> &'n FileName) -> Option<Resolved> {
        for tag in RevisionTag::ALL {
            let candidate = name_for(tag).with_revision(tag.as_str());
            let Some(path) = self.cache.lookup(candidate.as_str(), tag) else {
                continue;
            };
            match read_rows(&path) {
                Ok(rows) => {
                    info!("Using cached {} ({tag})", candidate.as_str());
                    return Some(Resolved {
                        rows,
                        origin: Origin::Cache,
                        revision: tag.to_string(),
                        file_name: candidate,
                    });
                }
                Err(e) => warn!("Skipping unreadable cache file {}: {e}", path.display()),
            }
        }
        None
    }

    fn from_server(&self, name: &FileName) -> Result<Resolved> {
        let acquired = self.acquisition.acquire(name)?;
        Ok(Resolved {
            rows: acquired.rows,
            origin: Origin::Server,
            revision: acquired.file_name.prefix().to_string(),
            file_name: acquired.file_name,
        })
    }
}

fn from_file(request: &Path, name: &FileName) -> Option<Resolved> {
    if !request.is_file() {
        return None;
    }
    match read_rows(request) {
        Ok(rows) => {
            debug!("Using local file {}", request.display());
            Some(Resolved {
                rows,
                origin: Origin::File,
                revision: name.prefix().to_string(),
                file_name: name.clone(),
            })
        }
        Err(e) => {
            warn!("Failed to read {}: {e}", request.display());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::NoSource;
    use std::time::Duration;
    use tempfile::tempdir;

    #[test]
    fn test_bad_filename_before_io() {
        let dir = tempdir().unwrap();
        let cache = Cache::new(dir.path().join("never"), Duration::from_secs(60));
        let resolver = VersionResolver::new(&NoSource, Some("t"), &cache);

        assert!(matches!(
            resolver.resolve(Path::new("A1_prmdiari_2016_20160331"), "prmdiari"),
            Err(LiquicomunError::BadFilename(_))
        ));
        assert!(matches!(
            resolver.resolve(Path::new("A1_prmncur_20160301_20160331"), "prmdiari"),
            Err(LiquicomunError::BadFilename(_))
        ));
        assert!(!dir.path().join("never").exists());
    }

    #[test]
    fn test_prefers_most_authoritative_cached() {
        let dir = tempdir().unwrap();
        let cache = Cache::new(dir.path(), Duration::from_secs(60));
        cache.store("A3_prmdiari_20160301_20160331", b"a3\n").unwrap();
        cache.store("C4_prmdiari_20160301_20160331", b"c4\n").unwrap();
        let resolver = VersionResolver::new(&NoSource, None, &cache);

        let resolved = resolver
            .resolve(Path::new("A1_prmdiari_20160301_20160331"), "prmdiari")
            .unwrap();
        assert_eq!(resolved.origin, Origin::Cache);
        assert_eq!(resolved.revision, "C4");
        assert_eq!(resolved.rows, vec![vec!["c4".to_string()]]);
    }

    #[test]
    fn test_full_miss_without_token() {
        let dir = tempdir().unwrap();
        let cache = Cache::new(dir.path(), Duration::from_secs(60));
        let resolver = VersionResolver::new(&NoSource, None, &cache);
        assert!(matches!(
            resolver.resolve(Path::new("A1_prmdiari_20160301_20160331"), "prmdiari"),
            Err(LiquicomunError::MissingCredential)
        ));
    }

    #[test]
    fn test_coefficient_cache_walk_names_estimated_revisions() {
        let dir = tempdir().unwrap();
        let cache = Cache::new(dir.path(), Duration::from_secs(60));
        // A final revision under the estimated name is never looked up.
        cache.store("A3_Kestimado_20160301_20160331", b"a3\n").unwrap();
        cache.store("C2_Kestimado_20160301_20160331", b"c2\n").unwrap();
        let resolver = VersionResolver::new(&NoSource, None, &cache);

        let resolved = resolver
            .resolve_coefficients(Path::new("A1_Kreal_20160301_20160331"))
            .unwrap();
        assert_eq!(resolved.origin, Origin::Cache);
        assert_eq!(resolved.file_name.as_str(), "C2_Kestimado_20160301_20160331");
        assert_eq!(resolved.rows, vec![vec!["c2".to_string()]]);
    }

    #[test]
    fn test_coefficients_without_token_or_cache() {
        let dir = tempdir().unwrap();
        let cache = Cache::new(dir.path(), Duration::from_secs(60));
        let resolver = VersionResolver::new(&NoSource, None, &cache);
        assert!(matches!(
            resolver.resolve_coefficients(Path::new("A1_Kreal_20160301_20160331")),
            Err(LiquicomunError::MissingCredential)
        ));
    }

    #[test]
    fn test_origin_display() {
        assert_eq!(Origin::File.to_string(), "file");
        assert_eq!(Origin::Cache.to_string(), "cache");
        assert_eq!(Origin::Server.to_string(), "server");
    }
}
