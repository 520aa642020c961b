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

//! Conversion of validated rows into grid rows.

use crate::coefficients::loss_coefficient;
use crate::error::{LiquicomunError, Result};
use crate::grid::{HOURS_PER_ROW, round_to};
use crate::rows::Row;

/// Power factor column of the cost component rows.
const POWER_FACTOR_COLUMN: usize = 11;
/// Total cost column of the cost component rows.
const TOTAL_COLUMN: usize = 12;

#[derive(Debug, Clone, Copy, Default)]
pub struct RowFormatter;

/// Rows between the two header rows and the footer.
fn data_rows(rows: &[Row]) -> &[Row] {
    if rows.len() < 3 {
        return &[];
    }
    &rows[2..rows.len() - 1]
}

fn parse_cell(cell: &str) -> Result<f64> {
    let cell = cell.trim();
    if cell.is_empty() {
        return Ok(0.0);
    }
    cell.parse::<f64>()
        .map_err(|_| LiquicomunError::BadFormat(format!("'{cell}' is not a number")))
}

/// Hourly cells of a day row, padded to the grid width.
fn hourly_cells(row: &Row) -> impl Iterator<Item = &str> {
    row.iter()
        .skip(1)
        .map(String::as_str)
        .chain(std::iter::repeat(""))
        .take(HOURS_PER_ROW)
}

impl RowFormatter {
    /// One grid row per day row, the hourly values taken as they are.
    pub fn direct(rows: &[Row]) -> Result<Vec<Vec<f64>>> {
        data_rows(rows)
            .iter()
            .map(|row| hourly_cells(row).map(parse_cell).collect())
            .collect()
    }

    /// Hourly values weighted by the loss coefficient of the period the same cell holds in
    /// `periods`, a table of identical shape.
    pub fn weighted(rows: &[Row], periods: &[Row], tariff: &str) -> Result<Vec<Vec<f64>>> {
        let period_rows = data_rows(periods);
        data_rows(rows)
            .iter()
            .enumerate()
            .map(|(index, row)| {
                let empty = Row::new();
                let period_row = period_rows.get(index).unwrap_or(&empty);
                hourly_cells(row)
                    .zip(hourly_cells(period_row))
                    .map(|(value, period)| weigh(value, period.trim(), tariff))
                    .collect()
            })
            .collect()
    }

    /// Cost component grid of `num_days` rows from the hourly rows of a `grcosdnc` file.
    pub fn cost_component(rows: &[Row], num_days: usize) -> Result<Vec<Vec<f64>>> {
        let mut matrix = vec![vec![0.0; HOURS_PER_ROW]; num_days];
        for row in data_rows(rows) {
            let Some((day, hour)) = row.first().and_then(|label| day_hour(label)) else {
                continue;
            };
            if day == 0 || day > num_days || hour == 0 || hour > HOURS_PER_ROW {
                continue;
            }

            let power_factor = parse_cell(row.get(POWER_FACTOR_COLUMN).map_or("", String::as_str))?;
            let total = row
                .get(TOTAL_COLUMN)
                .ok_or_else(|| LiquicomunError::BadFormat(format!("no total in row {}", row[0])))
                .and_then(|cell| parse_cell(cell))?;

            matrix[day - 1][hour - 1] = if power_factor < 0.0 {
                total + power_factor.abs()
            } else {
                total
            };
        }
        Ok(matrix)
    }
}

fn weigh(value: &str, period: &str, tariff: &str) -> Result<f64> {
    if period.is_empty() {
        return Ok(0.0);
    }
    let coefficient =
        loss_coefficient(tariff, period).ok_or_else(|| LiquicomunError::UnknownCoefficient {
            tariff: tariff.to_string(),
            period: period.to_string(),
        })?;
    let raw = parse_cell(value)?;
    Ok(round_to(raw * coefficient / 100.0, 1))
}

/// Day and hour of a `YYYYMM DD HH` label.
fn day_hour(label: &str) -> Option<(usize, usize)> {
    let mut parts = label.split_whitespace();
    let _month = parts.next()?;
    let day = parts.next()?.parse().ok()?;
    let hour = parts.next()?.parse().ok()?;
    Some((day, hour))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Row {
        cells.iter().map(ToString::to_string).collect()
    }

    fn wrap(data: Vec<Row>) -> Vec<Row> {
        let mut rows = vec![row(&["x", "y"]), row(&["2016"])];
        rows.extend(data);
        rows.push(row(&["*"]));
        rows
    }

    #[test]
    fn test_direct_pads_and_blanks() {
        let rows = wrap(vec![row(&["01", "1.5", "", "3"]), row(&["02", "-2"])]);
        let matrix = RowFormatter::direct(&rows).unwrap();
        assert_eq!(matrix.len(), 2);
        assert_eq!(matrix[0].len(), HOURS_PER_ROW);
        assert_eq!(&matrix[0][..4], &[1.5, 0.0, 3.0, 0.0]);
        assert_eq!(matrix[1][0], -2.0);
    }

    #[test]
    fn test_direct_ignores_extra_columns() {
        let mut cells = vec!["01".to_string()];
        cells.extend((1..=27).map(|v| v.to_string()));
        let matrix = RowFormatter::direct(&wrap(vec![cells])).unwrap();
        assert_eq!(matrix[0].len(), HOURS_PER_ROW);
        assert_eq!(matrix[0][24], 25.0);
    }

    #[test]
    fn test_direct_rejects_text() {
        let rows = wrap(vec![row(&["01", "abc"])]);
        assert!(matches!(
            RowFormatter::direct(&rows),
            Err(LiquicomunError::BadFormat(_))
        ));
    }

    #[test]
    fn test_weighted_percentage() {
        let values = wrap(vec![row(&["01", "100.0", "100.0", "50"])]);
        let periods = wrap(vec![row(&["01", "1", "", "1"])]);
        let matrix = RowFormatter::weighted(&values, &periods, "20A").unwrap();
        assert_eq!(matrix[0][0], 14.0);
        assert_eq!(matrix[0][1], 0.0);
        assert_eq!(matrix[0][2], 7.0);
        assert_eq!(matrix[0][24], 0.0);
    }

    #[test]
    fn test_weighted_rounding() {
        let values = wrap(vec![row(&["01", "123.456", "10"])]);
        let periods = wrap(vec![row(&["01", "3", "2"])]);
        let matrix = RowFormatter::weighted(&values, &periods, "20TD").unwrap();
        // 123.456 * 18.0 / 100 = 22.22208
        assert_eq!(matrix[0][0], 22.2);
        // 10 * 16.3 / 100 = 1.63
        assert_eq!(matrix[0][1], 1.6);
    }

    #[test]
    fn test_weighted_unknown_coefficient() {
        let values = wrap(vec![row(&["01", "100"])]);
        let periods = wrap(vec![row(&["01", "2"])]);
        assert!(matches!(
            RowFormatter::weighted(&values, &periods, "20A"),
            Err(LiquicomunError::UnknownCoefficient { .. })
        ));
        assert!(matches!(
            RowFormatter::weighted(&values, &periods, "nope"),
            Err(LiquicomunError::UnknownCoefficient { .. })
        ));
    }

    #[test]
    fn test_cost_component() {
        let hour = |label: &str, power: &str, total: &str| {
            let mut cells = vec![label.to_string()];
            cells.extend(std::iter::repeat_n("0".to_string(), 10));
            cells.push(power.to_string());
            cells.push(total.to_string());
            cells.extend(["0".to_string(), "0".to_string()]);
            cells
        };
        let rows = wrap(vec![
            hour("201603 01 01", "-1.5", "10"),
            hour("201603 01 02", "2.0", "10"),
            hour("201603 02 25", "", "4"),
            hour("201603 40 01", "0", "99"),
            hour("bogus", "0", "99"),
        ]);
        let matrix = RowFormatter::cost_component(&rows, 31).unwrap();
        assert_eq!(matrix.len(), 31);
        assert_eq!(matrix[0][0], 11.5);
        assert_eq!(matrix[0][1], 10.0);
        assert_eq!(matrix[1][24], 4.0);
        let total: f64 = matrix.iter().flatten().sum();
        assert_eq!(total, 25.5);
    }
}
