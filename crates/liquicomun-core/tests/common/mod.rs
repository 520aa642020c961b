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

//! Fixtures shared by the integration tests.

#![allow(dead_code)]

use chrono::NaiveDate;
use liquicomun_core::ArchiveSource;
use liquicomun_core::season::days_in_month;
use std::cell::RefCell;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;

/// Daily file of `token` for a month: two header rows, one row per day, footer.
pub fn standard_file(
    token: &str,
    year: i32,
    month: u32,
    cell: impl Fn(u32, u32) -> String,
) -> String {
    let days = days_in_month(year, month).unwrap();
    let mut out = format!("{token};{year:04}{month:02}01\n");
    out.push_str("2016;03;07;12;30;00;\n");
    for day in 1..=days {
        out.push_str(&format!("{day:02}"));
        for hour in 0..25 {
            out.push(';');
            out.push_str(&cell(day, hour));
        }
        out.push('\n');
    }
    out.push_str("*\n");
    out
}

/// Hourly `grcosdnc` file with a constant power factor and total per hour.
pub fn cost_file(year: i32, month: u32, power_factor: &str, total: &str) -> String {
    let days = days_in_month(year, month).unwrap();
    let mut out = format!("grcosdnc;{year:04}{month:02}01\n");
    out.push_str("2016;03;07;12;30;00;\n");
    for day in 1..=days {
        for hour in 1..=24 {
            out.push_str(&format!("{year:04}{month:02} {day:02} {hour:02}"));
            for _ in 1..11 {
                out.push_str(";0");
            }
            out.push_str(&format!(";{power_factor};{total};0;0\n"));
        }
    }
    out.push_str("*\n");
    out
}

pub fn archive(members: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (name, content) in members {
        writer
            .start_file(*name, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// In-memory archive source answering attempt `n` with `archives[n]`, recording every call.
#[derive(Debug, Default)]
pub struct RecordingSource {
    pub archives: Vec<Option<Vec<u8>>>,
    /// Answer given to attempts past the end of `archives`.
    pub fallback: Option<Vec<u8>>,
    pub calls: RefCell<Vec<(NaiveDate, NaiveDate, usize)>>,
}

impl RecordingSource {
    pub fn new(archives: Vec<Option<Vec<u8>>>) -> Self {
        Self {
            archives,
            ..Self::default()
        }
    }

    pub fn always(archive: Vec<u8>) -> Self {
        Self {
            fallback: Some(archive),
            ..Self::default()
        }
    }

    pub fn attempts(&self) -> Vec<usize> {
        self.calls.borrow().iter().map(|(_, _, a)| *a).collect()
    }
}

impl ArchiveSource for RecordingSource {
    fn fetch(
        &self,
        _token: &str,
        start: NaiveDate,
        end: NaiveDate,
        attempt: usize,
    ) -> anyhow::Result<Option<Vec<u8>>> {
        self.calls.borrow_mut().push((start, end, attempt));
        Ok(self
            .archives
            .get(attempt)
            .cloned()
            .unwrap_or_else(|| self.fallback.clone()))
    }
}
