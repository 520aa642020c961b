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

//! Calendar helpers for monthly grids and daylight-saving days.

use chrono::{Datelike, NaiveDate};

/// Number of days of `month` in `year`, `None` for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    u32::try_from(next.signed_duration_since(first).num_days()).ok()
}

/// Day of month of the last Sunday.
pub fn last_sunday(year: i32, month: u32) -> Option<u32> {
    let days = days_in_month(year, month)?;
    let last = NaiveDate::from_ymd_opt(year, month, days)?;
    let back = last.weekday().num_days_from_sunday();
    Some(days - back)
}

/// Hours in a settlement day: 23 on the spring change, 25 on the autumn change, 24 otherwise.
pub fn hours_in_day(year: i32, month: u32, day: u32) -> u32 {
    let change = match month {
        3 | 10 => last_sunday(year, month),
        _ => None,
    };
    match (month, change) {
        (3, Some(d)) if d == day => 23,
        (10, Some(d)) if d == day => 25,
        _ => 24,
    }
}
