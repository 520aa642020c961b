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

//! Day by hour matrix of a settlement month.
//!
//! A [`Grid`] holds one row per calendar day of a month and 25 cells per row: hours 1 to 24 plus
//! the extra hour of the autumn daylight-saving change. Cells are addressed by day (1-based) and
//! hour slot (0-based, `0..=24`).

use crate::error::{GridError, LiquicomunError, Result};
use crate::season::{days_in_month, hours_in_day};
use chrono::{Datelike, Local, NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::fmt;
use std::ops::{Add, Mul, Sub};

pub const HOURS_PER_ROW: usize = 25;

const VERSION_FORMAT: &str = "%Y%m%d%H%M%S";

pub type DayRow = [f64; HOURS_PER_ROW];

#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    year: i32,
    month: u32,
    matrix: Vec<DayRow>,
    /// Revision stamp of the data, the generation timestamp of the source file when loaded.
    pub version: String,
    /// Revision tag of the file the data came from.
    pub file_version: Option<String>,
}

/// One hourly value as exported for auditing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditRecord {
    pub timestamp: String,
    pub value: f64,
    pub revision: String,
    pub marker: String,
}

impl Grid {
    /// Zeroed grid for the month of `date`, stamped with that date.
    pub fn new(date: NaiveDate) -> Self {
        Self::at(date.and_time(chrono::NaiveTime::MIN))
    }

    pub fn at(datetime: NaiveDateTime) -> Self {
        let days = days_in_month(datetime.year(), datetime.month()).unwrap_or(28);
        Self {
            year: datetime.year(),
            month: datetime.month(),
            matrix: vec![[0.0; HOURS_PER_ROW]; days as usize],
            version: datetime.format(VERSION_FORMAT).to_string(),
            file_version: None,
        }
    }

    pub fn now() -> Self {
        Self::at(Local::now().naive_local())
    }

    pub fn from_ymd(year: i32, month: u32) -> Result<Self> {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(Self::new)
            .ok_or_else(|| LiquicomunError::InvalidInput(format!("invalid month {year}-{month}")))
    }

    /// Accepts `YYYYMMDD` or `YYYY-MM-DD`.
    pub fn parse_date(text: &str) -> Result<Self> {
        let text = text.trim();
        NaiveDate::parse_from_str(text, "%Y%m%d")
            .or_else(|_| NaiveDate::parse_from_str(text, "%Y-%m-%d"))
            .map(Self::new)
            .map_err(|e| LiquicomunError::InvalidInput(format!("invalid date '{text}': {e}")))
    }

    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn matrix(&self) -> &[DayRow] {
        &self.matrix
    }

    pub fn num_days(&self) -> u32 {
        self.matrix.len() as u32
    }

    pub fn start_date(&self) -> NaiveDateTime {
        self.date(1)
            .unwrap_or_default()
            .and_time(chrono::NaiveTime::MIN)
    }

    /// Last day of the month at 23:00.
    pub fn end_date(&self) -> NaiveDateTime {
        self.date(self.num_days())
            .and_then(|d| d.and_hms_opt(23, 0, 0))
            .unwrap_or_default()
    }

    fn date(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }

    /// Monday is 0, Sunday is 6.
    pub fn weekday(&self, day: u32) -> Option<u32> {
        self.date(day).map(|d| d.weekday().num_days_from_monday())
    }

    /// Hour 25 passes on purpose: the slot lookup that follows reports it as missing.
    fn in_range(&self, day: u32, hour: u32) -> bool {
        (1..=self.num_days()).contains(&day) && hour <= HOURS_PER_ROW as u32
    }

    /// Stored value, `None` when the cell does not exist.
    pub fn get(&self, day: u32, hour: u32) -> Option<f64> {
        if !self.in_range(day, hour) {
            return None;
        }
        self.matrix
            .get(day as usize - 1)
            .and_then(|row| row.get(hour as usize))
            .copied()
    }

    pub fn set(&mut self, day: u32, hour: u32, value: f64) -> std::result::Result<(), GridError> {
        let cell = if self.in_range(day, hour) {
            self.matrix
                .get_mut(day as usize - 1)
                .and_then(|row| row.get_mut(hour as usize))
        } else {
            None
        };
        match cell {
            Some(cell) => {
                *cell = value;
                Ok(())
            }
            None => Err(GridError::OutOfRange { day, hour }),
        }
    }

    /// Replaces the whole matrix. The shape must match, the grid is never resized.
    pub fn load(&mut self, rows: &[Vec<f64>]) -> std::result::Result<(), GridError> {
        let mismatch = GridError::ShapeMismatch {
            expected_rows: self.matrix.len(),
            expected_width: HOURS_PER_ROW,
            rows: rows.len(),
        };
        if rows.len() != self.matrix.len() || rows.iter().any(|r| r.len() != HOURS_PER_ROW) {
            return Err(mismatch);
        }
        for (target, source) in self.matrix.iter_mut().zip(rows) {
            target.copy_from_slice(source);
        }
        Ok(())
    }

    /// Fresh zeroed grid of the same month, stamped with its first day.
    fn blank(&self) -> Self {
        Self {
            year: self.year,
            month: self.month,
            matrix: vec![[0.0; HOURS_PER_ROW]; self.matrix.len()],
            version: format!("{:04}{:02}01000000", self.year, self.month),
            file_version: None,
        }
    }

    fn check_compatible(&self, other: &Grid) -> std::result::Result<(), GridError> {
        if self.year != other.year
            || self.month != other.month
            || self.matrix.len() != other.matrix.len()
        {
            return Err(GridError::Incompatible {
                left: format!("{:04}-{:02}/{}", self.year, self.month, self.num_days()),
                right: format!("{:04}-{:02}/{}", other.year, other.month, other.num_days()),
            });
        }
        Ok(())
    }

    fn combine(
        &self,
        other: &Grid,
        op: impl Fn(f64, f64) -> f64,
    ) -> std::result::Result<Grid, GridError> {
        self.check_compatible(other)?;
        let mut out = self.blank();
        for ((row, a), b) in out.matrix.iter_mut().zip(&self.matrix).zip(&other.matrix) {
            for ((cell, x), y) in row.iter_mut().zip(a).zip(b) {
                *cell = op(*x, *y);
            }
        }
        Ok(out)
    }

    fn map(&self, op: impl Fn(f64) -> f64) -> Grid {
        let mut out = self.blank();
        for (row, a) in out.matrix.iter_mut().zip(&self.matrix) {
            for (cell, x) in row.iter_mut().zip(a) {
                *cell = op(*x);
            }
        }
        out
    }

    pub fn try_add(&self, other: &Grid) -> std::result::Result<Grid, GridError> {
        self.combine(other, |a, b| a + b)
    }

    pub fn try_sub(&self, other: &Grid) -> std::result::Result<Grid, GridError> {
        self.combine(other, |a, b| a - b)
    }

    pub fn try_mul(&self, other: &Grid) -> std::result::Result<Grid, GridError> {
        self.combine(other, |a, b| a * b)
    }

    /// `k - self`, cell by cell.
    pub fn rsub(&self, k: f64) -> Grid {
        self.map(|x| k - x)
    }

    /// Zeroes every day outside `[start_day, end_day]` in place.
    pub fn sub_component(&mut self, start_day: u32, end_day: Option<u32>) -> Result<&mut Self> {
        let days = self.num_days();
        if !(1..=days).contains(&start_day) {
            return Err(LiquicomunError::InvalidInput(format!(
                "start day {start_day} out of bounds 1..={days}"
            )));
        }
        let end_day = end_day.unwrap_or(days);
        if !(1..=days).contains(&end_day) {
            return Err(LiquicomunError::InvalidInput(format!(
                "end day {end_day} out of bounds 1..={days}"
            )));
        }
        if end_day < start_day {
            return Err(LiquicomunError::InvalidInput(format!(
                "end day {end_day} before start day {start_day}"
            )));
        }

        for (index, row) in self.matrix.iter_mut().enumerate() {
            let day = index as u32 + 1;
            if day < start_day || day > end_day {
                *row = [0.0; HOURS_PER_ROW];
            }
        }
        Ok(self)
    }

    pub fn total_sum(&self) -> f64 {
        self.matrix.iter().flat_map(|row| row.iter()).sum()
    }

    /// Hourly records for days `start..=end` (whole month by default), honouring the 23 and 25
    /// hour days of the daylight-saving changes.
    pub fn audit_data(&self, start: Option<u32>, end: Option<u32>) -> Vec<AuditRecord> {
        let start = start.unwrap_or(1).max(1);
        let end = end.unwrap_or(self.num_days()).min(self.num_days());
        let revision = self.file_version.clone().unwrap_or_default();

        let mut records = Vec::new();
        for day in start..=end {
            let hours = hours_in_day(self.year, self.month, day) as usize;
            let Some(row) = self.matrix.get(day as usize - 1) else {
                continue;
            };
            for (index, value) in row.iter().take(hours).enumerate() {
                records.push(AuditRecord {
                    timestamp: format!(
                        "{:04}-{:02}-{:02} {:02}",
                        self.year,
                        self.month,
                        day,
                        index + 1
                    ),
                    value: round_to(*value, 6),
                    revision: revision.clone(),
                    marker: String::new(),
                });
            }
        }
        records
    }
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "['{}-{}', '{}',",
            self.start_date().format("%Y%m%d%H%M"),
            self.end_date().format("%Y%m%d%H%M"),
            self.version
        )?;
        for (index, row) in self.matrix.iter().enumerate() {
            let open = if index == 0 { " [" } else { "  " };
            writeln!(f, "{open}['{:02}', {:?}],", index + 1, row)?;
        }
        write!(f, " ]]")
    }
}

impl Add<&Grid> for &Grid {
    type Output = std::result::Result<Grid, GridError>;

    fn add(self, rhs: &Grid) -> Self::Output {
        self.try_add(rhs)
    }
}

impl Sub<&Grid> for &Grid {
    type Output = std::result::Result<Grid, GridError>;

    fn sub(self, rhs: &Grid) -> Self::Output {
        self.try_sub(rhs)
    }
}

impl Mul<&Grid> for &Grid {
    type Output = std::result::Result<Grid, GridError>;

    fn mul(self, rhs: &Grid) -> Self::Output {
        self.try_mul(rhs)
    }
}

impl Add<f64> for &Grid {
    type Output = Grid;

    fn add(self, rhs: f64) -> Grid {
        self.map(|x| x + rhs)
    }
}

impl Sub<f64> for &Grid {
    type Output = Grid;

    fn sub(self, rhs: f64) -> Grid {
        self.map(|x| x - rhs)
    }
}

impl Mul<f64> for &Grid {
    type Output = Grid;

    fn mul(self, rhs: f64) -> Grid {
        self.map(|x| x * rhs)
    }
}

impl Add<&Grid> for f64 {
    type Output = Grid;

    fn add(self, rhs: &Grid) -> Grid {
        rhs + self
    }
}

impl Sub<&Grid> for f64 {
    type Output = Grid;

    fn sub(self, rhs: &Grid) -> Grid {
        rhs.rsub(self)
    }
}

impl Mul<&Grid> for f64 {
    type Output = Grid;

    fn mul(self, rhs: &Grid) -> Grid {
        rhs * self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn month(year: i32, month: u32) -> Grid {
        Grid::from_ymd(year, month).unwrap()
    }

    #[test]
    fn test_fresh_grid_shape() {
        for (m, days) in [(1, 31), (2, 29), (4, 30), (12, 31)] {
            let grid = month(2024, m);
            assert_eq!(grid.num_days(), days);
            assert_eq!(grid.matrix().len(), days as usize);
            assert!(grid.matrix().iter().all(|row| row.iter().all(|v| *v == 0.0)));
        }
        assert_eq!(month(2023, 2).num_days(), 28);
    }

    #[test]
    fn test_default_version_is_creation_stamp() {
        let grid = Grid::new(NaiveDate::from_ymd_opt(2016, 2, 14).unwrap());
        assert_eq!(grid.version, "20160214000000");
        let grid = grid.with_version("201603071200");
        assert_eq!(grid.version, "201603071200");
    }

    #[test]
    fn test_invalid_constructor_input() {
        assert!(matches!(
            Grid::from_ymd(2024, 13),
            Err(LiquicomunError::InvalidInput(_))
        ));
        assert!(matches!(
            Grid::parse_date("not a date"),
            Err(LiquicomunError::InvalidInput(_))
        ));
        assert_eq!(Grid::parse_date("2016-03-01").unwrap().month(), 3);
        assert_eq!(Grid::parse_date("20160301").unwrap().year(), 2016);
    }

    #[test]
    fn test_dates() {
        let grid = month(2016, 2);
        assert_eq!(grid.start_date().to_string(), "2016-02-01 00:00:00");
        assert_eq!(grid.end_date().to_string(), "2016-02-29 23:00:00");
        assert_eq!(grid.weekday(1), Some(0));
        assert_eq!(grid.weekday(7), Some(6));
        assert_eq!(grid.weekday(30), None);
    }

    #[test]
    fn test_get_sentinel() {
        let mut grid = month(2016, 2);
        grid.set(3, 4, 12.5).unwrap();
        assert_eq!(grid.get(3, 4), Some(12.5));
        assert_eq!(grid.get(3, 5), Some(0.0));
        assert_eq!(grid.get(30, 0), None);
        assert_eq!(grid.get(0, 0), None);
        assert_eq!(grid.get(1, 26), None);
        assert_eq!(grid.get(1, 25), None);
        assert_eq!(grid.get(1, 24), Some(0.0));
    }

    #[test]
    fn test_set_out_of_range() {
        let mut grid = month(2016, 2);
        assert_eq!(
            grid.set(30, 1, 1.0),
            Err(GridError::OutOfRange { day: 30, hour: 1 })
        );
        assert!(grid.set(1, 25, 1.0).is_err());
    }

    #[test]
    fn test_load_shape() {
        let mut grid = month(2016, 2);
        let rows = vec![vec![1.0; HOURS_PER_ROW]; 29];
        grid.load(&rows).unwrap();
        assert!((grid.total_sum() - 29.0 * 25.0).abs() < 1e-9);

        let short = vec![vec![1.0; HOURS_PER_ROW]; 28];
        assert!(grid.load(&short).is_err());
        let narrow = vec![vec![1.0; 24]; 29];
        assert!(grid.load(&narrow).is_err());
        assert_eq!(grid.num_days(), 29);
    }

    #[test]
    fn test_arithmetic_is_pure() {
        let mut a = month(2016, 3);
        let mut b = month(2016, 3);
        a.set(1, 0, 2.0).unwrap();
        b.set(1, 0, 3.0).unwrap();
        let a_before = a.clone();
        let b_before = b.clone();

        let sum = (&a + &b).unwrap();
        assert_eq!(sum.get(1, 0), Some(5.0));
        assert_eq!(sum.version, "20160301000000");
        assert_eq!((&a - &b).unwrap().get(1, 0), Some(-1.0));
        assert_eq!((&a * &b).unwrap().get(1, 0), Some(6.0));
        assert_eq!(a, a_before);
        assert_eq!(b, b_before);

        for day in 1..=a.num_days() {
            for hour in 0..25 {
                assert_eq!(
                    sum.get(day, hour).unwrap(),
                    a.get(day, hour).unwrap() + b.get(day, hour).unwrap()
                );
            }
        }
    }

    #[test]
    fn test_scalar_arithmetic() {
        let mut a = month(2016, 3);
        a.set(2, 1, 4.0).unwrap();
        assert_eq!((&a + 1.0).get(2, 1), Some(5.0));
        assert_eq!((1.0 + &a).get(1, 1), Some(1.0));
        assert_eq!((&a - 1.0).get(2, 1), Some(3.0));
        assert_eq!((10.0 - &a).get(2, 1), Some(6.0));
        assert_eq!((&a * 2.5).get(2, 1), Some(10.0));
        assert_eq!((2.0 * &a).get(2, 1), Some(8.0));
        assert_eq!(a.get(2, 1), Some(4.0));
    }

    #[test]
    fn test_mismatched_grids() {
        let a = month(2016, 3);
        let b = month(2016, 4);
        let c = month(2017, 3);
        assert!((&a + &b).is_err());
        assert!((&a * &c).is_err());
        assert_eq!(a, month(2016, 3));
    }

    #[test]
    fn test_sub_component() {
        let mut grid = &month(2016, 3) + 1.0;
        grid.sub_component(5, Some(10)).unwrap();
        assert_eq!(grid.get(4, 0), Some(0.0));
        assert_eq!(grid.get(5, 0), Some(1.0));
        assert_eq!(grid.get(10, 24), Some(1.0));
        assert_eq!(grid.get(11, 0), Some(0.0));
        assert!((grid.total_sum() - 6.0 * 25.0).abs() < 1e-9);

        let mut open = &month(2016, 3) + 1.0;
        open.sub_component(30, None).unwrap();
        assert!((open.total_sum() - 2.0 * 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_sub_component_bounds() {
        let mut grid = month(2016, 2);
        assert!(grid.sub_component(0, None).is_err());
        assert!(grid.sub_component(30, None).is_err());
        assert!(grid.sub_component(5, Some(4)).is_err());
        assert!(grid.sub_component(5, Some(30)).is_err());
    }

    #[test]
    fn test_audit_daylight_saving() {
        let mut march = month(2016, 3);
        march.file_version = Some("A3".to_string());
        let per_day = |grid: &Grid, day: u32| grid.audit_data(Some(day), Some(day)).len();

        assert_eq!(per_day(&march, 27), 23);
        assert_eq!(per_day(&march, 26), 24);
        assert_eq!(per_day(&march, 28), 24);

        let october = month(2016, 10);
        assert_eq!(per_day(&october, 30), 25);
        assert_eq!(per_day(&october, 29), 24);

        assert_eq!(march.audit_data(None, None).len(), 31 * 24 - 1);
        assert_eq!(october.audit_data(None, None).len(), 31 * 24 + 1);
    }

    #[test]
    fn test_audit_record_format() {
        let mut grid = month(2016, 3);
        grid.file_version = Some("C2".to_string());
        grid.set(2, 0, 1.123_456_789).unwrap();
        let records = grid.audit_data(Some(2), Some(2));
        assert_eq!(records[0].timestamp, "2016-03-02 01");
        assert!((records[0].value - 1.123_457).abs() < 1e-12);
        assert_eq!(records[0].revision, "C2");
        assert_eq!(records[0].marker, "");
        assert_eq!(records[23].timestamp, "2016-03-02 24");
    }

    #[test]
    fn test_display() {
        let grid = month(2016, 2).with_version("v1");
        let text = grid.to_string();
        assert!(text.starts_with("['201602010000-201602292300', 'v1',"));
        assert!(text.contains("['29', "));
    }
}
