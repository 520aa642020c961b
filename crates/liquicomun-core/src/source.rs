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

//! Remote archive seam.

use chrono::NaiveDate;

/// Something that can hand out liquicomun archives.
///
/// `attempt` is the index of the download attempt; sources use it to step back through older
/// publications of the same month. `Ok(None)` means no archive for that attempt.
pub trait ArchiveSource {
    fn fetch(
        &self,
        token: &str,
        start: NaiveDate,
        end: NaiveDate,
        attempt: usize,
    ) -> anyhow::Result<Option<Vec<u8>>>;
}

impl<T: ArchiveSource + ?Sized> ArchiveSource for &T {
    fn fetch(
        &self,
        token: &str,
        start: NaiveDate,
        end: NaiveDate,
        attempt: usize,
    ) -> anyhow::Result<Option<Vec<u8>>> {
        (**self).fetch(token, start, end, attempt)
    }
}

impl<T: ArchiveSource + ?Sized> ArchiveSource for Box<T> {
    fn fetch(
        &self,
        token: &str,
        start: NaiveDate,
        end: NaiveDate,
        attempt: usize,
    ) -> anyhow::Result<Option<Vec<u8>>> {
        (**self).fetch(token, start, end, attempt)
    }
}

/// Source for offline use, never has anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSource;

impl ArchiveSource for NoSource {
    fn fetch(
        &self,
        _token: &str,
        _start: NaiveDate,
        _end: NaiveDate,
        _attempt: usize,
    ) -> anyhow::Result<Option<Vec<u8>>> {
        Ok(None)
    }
}
