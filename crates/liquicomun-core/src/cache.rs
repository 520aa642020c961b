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

//! Flat directory of downloaded settlement files.

use crate::error::Result;
use crate::revision::RevisionTag;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct Cache {
    dir: PathBuf,
    ttl: Duration,
}

impl Cache {
    pub fn new(dir: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            dir: dir.into(),
            ttl,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    /// A cached file may be used when its revision is final or it is younger than the TTL.
    pub fn is_fresh(&self, path: &Path, tag: RevisionTag) -> bool {
        if tag.is_final() {
            return true;
        }
        let age = std::fs::metadata(path)
            .and_then(|meta| meta.modified())
            .ok()
            .and_then(|modified| SystemTime::now().duration_since(modified).ok());
        match age {
            Some(age) => age < self.ttl,
            // mtime in the future
            None => path.is_file(),
        }
    }

    /// Path of a usable cached copy of `name` under revision `tag`.
    pub fn lookup(&self, name: &str, tag: RevisionTag) -> Option<PathBuf> {
        let path = self.path(name);
        if !path.is_file() {
            return None;
        }
        if self.is_fresh(&path, tag) {
            Some(path)
        } else {
            debug!("Cached {name} expired");
            None
        }
    }

    pub fn store(&self, name: &str, content: &[u8]) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path(name);
        std::fs::write(&path, content)?;
        debug!("Cached {} ({} bytes)", path.display(), content.len());
        Ok(path)
    }

    /// Removes the cached files of one revision, or of every revision when `None`.
    ///
    /// Only names starting with `<tag>_` and ending in a month-end day digit are touched.
    pub fn clear(&self, revision: Option<RevisionTag>) -> Result<usize> {
        if !self.dir.is_dir() {
            return Ok(0);
        }
        let tags: Vec<RevisionTag> = match revision {
            Some(tag) => vec![tag],
            None => RevisionTag::ALL.to_vec(),
        };

        let mut removed = 0;
        for entry in std::fs::read_dir(&self.dir)? {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if tags.iter().any(|tag| is_cached_name(name, *tag)) && entry.path().is_file() {
                std::fs::remove_file(entry.path())?;
                removed += 1;
            }
        }
        info!("Removed {removed} cached files from {}", self.dir.display());
        Ok(removed)
    }
}

fn is_cached_name(name: &str, tag: RevisionTag) -> bool {
    name.strip_prefix(tag.as_str())
        .is_some_and(|rest| rest.starts_with('_'))
        && name.ends_with(['0', '1', '8', '9'])
}
