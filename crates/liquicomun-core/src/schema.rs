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

//! Shape checks run on raw rows before they are formatted.

use crate::error::{LiquicomunError, Result};
use crate::file_kind::{FileKind, Schema};
use crate::rows::Row;

const FOOTER: &str = "*";

/// 2 header rows + 28..=31 days + footer.
const STANDARD_ROW_COUNTS: [usize; 4] = [31, 32, 33, 34];

/// Width of an hourly row of the accumulated files.
const ACCUMULATED_WIDTH: usize = 15;

#[derive(Debug, Clone)]
pub struct SchemaValidator {
    name: String,
    schema: Schema,
    header_prefix: Option<String>,
}

impl SchemaValidator {
    pub fn new(name: impl Into<String>, schema: Schema) -> Self {
        Self {
            name: name.into(),
            schema,
            header_prefix: None,
        }
    }

    pub fn for_kind(kind: &FileKind) -> Self {
        Self {
            name: kind.name.clone(),
            schema: kind.schema,
            header_prefix: kind.header_prefix().map(ToString::to_string),
        }
    }

    /// Also require the header's first cell to start with `prefix`.
    #[must_use]
    pub fn with_header_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.header_prefix = Some(prefix.into());
        self
    }

    fn bad(&self, reason: &str) -> LiquicomunError {
        LiquicomunError::BadFormat(format!("Bad {} file format: {reason}", self.name))
    }

    pub fn validate(&self, rows: &[Row]) -> Result<()> {
        if rows.is_empty() {
            return Err(LiquicomunError::EmptyFile);
        }

        match self.schema {
            Schema::Standard => {
                if !STANDARD_ROW_COUNTS.contains(&rows.len()) {
                    return Err(self.bad(&format!("{} rows", rows.len())));
                }
            }
            // one row per hour, a partial day on the DST changes
            Schema::Accumulated => {
                if !matches!((rows.len().saturating_sub(3)) % 24, 0 | 1 | 23) || rows.len() < 3 {
                    return Err(self.bad(&format!("{} rows", rows.len())));
                }
            }
        }

        let header = &rows[0];
        if header.len() != 2 {
            return Err(self.bad("header must have 2 columns"));
        }
        if let Some(prefix) = &self.header_prefix
            && !header[0].starts_with(prefix.as_str())
        {
            return Err(self.bad(&format!("header does not start with {prefix}")));
        }

        if self.schema == Schema::Accumulated && rows[2].len() != ACCUMULATED_WIDTH {
            return Err(self.bad(&format!(
                "hourly rows must have {ACCUMULATED_WIDTH} columns"
            )));
        }

        let footer = rows.last().and_then(|row| row.first());
        if footer.map(String::as_str) != Some(FOOTER) {
            return Err(self.bad("missing footer"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Row {
        cells.iter().map(ToString::to_string).collect()
    }

    fn standard(days: usize) -> Vec<Row> {
        let mut rows = vec![
            row(&["perd20A", "20160301"]),
            row(&["2016", "03", "07", "12", "00", "00"]),
        ];
        for day in 1..=days {
            let mut cells = vec![format!("{day:02}")];
            cells.extend(std::iter::repeat_n("1".to_string(), 25));
            rows.push(cells);
        }
        rows.push(row(&["*"]));
        rows
    }

    fn accumulated(hours: usize) -> Vec<Row> {
        let mut rows = vec![
            row(&["grcosdnc", "20160301"]),
            row(&["2016", "03", "07", "12", "00", "00"]),
        ];
        for hour in 0..hours {
            let mut cells = vec![format!("201603 {:02} {:02}", hour / 24 + 1, hour % 24 + 1)];
            cells.extend(std::iter::repeat_n("0".to_string(), 14));
            rows.push(cells);
        }
        rows.push(row(&["*"]));
        rows
    }

    #[test]
    fn test_standard_accepts_month() {
        let validator = SchemaValidator::new("perd20A", Schema::Standard).with_header_prefix("perd");
        for days in 28..=31 {
            validator.validate(&standard(days)).unwrap();
        }
    }

    #[test]
    fn test_standard_row_count() {
        let validator = SchemaValidator::new("perd20A", Schema::Standard);
        let rows = standard(26);
        assert_eq!(rows.len(), 29);
        assert!(matches!(
            validator.validate(&rows),
            Err(LiquicomunError::BadFormat(_))
        ));
        assert!(matches!(
            validator.validate(&[]),
            Err(LiquicomunError::EmptyFile)
        ));
    }

    #[test]
    fn test_standard_header_and_footer() {
        let validator = SchemaValidator::new("perd20A", Schema::Standard).with_header_prefix("perd");

        let mut wide = standard(30);
        wide[0].push(String::new());
        assert!(validator.validate(&wide).is_err());

        let mut other = standard(30);
        other[0][0] = "prmdiari".to_string();
        assert!(validator.validate(&other).is_err());
        assert!(SchemaValidator::new("pertarif", Schema::Standard)
            .validate(&other)
            .is_ok());

        let mut no_footer = standard(30);
        let last = no_footer.len() - 1;
        no_footer[last] = row(&["#"]);
        assert!(validator.validate(&no_footer).is_err());
    }

    #[test]
    fn test_accumulated_counts() {
        let kind = FileKind::lookup("grcosdnc").unwrap();
        let validator = SchemaValidator::for_kind(&kind);
        validator.validate(&accumulated(31 * 24)).unwrap();
        validator.validate(&accumulated(31 * 24 - 1)).unwrap();
        validator.validate(&accumulated(31 * 24 + 1)).unwrap();
        assert!(validator.validate(&accumulated(31 * 24 - 5)).is_err());
    }

    #[test]
    fn test_accumulated_width() {
        let kind = FileKind::lookup("grcosdnc").unwrap();
        let mut rows = accumulated(24);
        rows[2].pop();
        assert!(matches!(
            SchemaValidator::for_kind(&kind).validate(&rows),
            Err(LiquicomunError::BadFormat(_))
        ));
    }
}
