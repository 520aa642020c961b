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

//! Standard loss coefficients (%) by access tariff and tariff period.
//!
//! Values from BOE-A-2014-1052 and, for the `TD` tariffs, Circular 3/2020.

type PeriodTable = &'static [(&'static str, f64)];

const SIX_PERIODS_61: PeriodTable = &[
    ("1", 6.8),
    ("2", 6.6),
    ("3", 6.5),
    ("4", 6.3),
    ("5", 6.3),
    ("6", 5.4),
];

const SIX_PERIODS_30TD: PeriodTable = &[
    ("1", 16.6),
    ("2", 17.5),
    ("3", 16.5),
    ("4", 16.5),
    ("5", 13.8),
    ("6", 18.0),
];

const SIX_PERIODS_61TD: PeriodTable = &[
    ("1", 6.7),
    ("2", 6.8),
    ("3", 6.5),
    ("4", 6.5),
    ("5", 4.3),
    ("6", 7.7),
];

pub const LOSS_COEFFICIENTS: &[(&str, PeriodTable)] = &[
    ("20A", &[("1", 14.0)]),
    ("20DH", &[("1", 14.8), ("3", 10.7)]),
    ("20DHS", &[("1", 14.8), ("2", 14.4), ("3", 8.6)]),
    ("21A", &[("1", 14.0)]),
    ("21DH", &[("1", 14.0), ("3", 10.7)]),
    ("21DHS", &[("1", 14.0), ("2", 14.4), ("3", 8.6)]),
    ("30A", &[("1", 15.3), ("2", 14.6), ("3", 10.7)]),
    ("31A", &[("1", 6.6), ("2", 6.4), ("3", 4.8)]),
    ("g61A", SIX_PERIODS_61),
    ("g61B", SIX_PERIODS_61),
    (
        "g62",
        &[
            ("1", 4.9),
            ("2", 4.7),
            ("3", 4.6),
            ("4", 4.4),
            ("5", 4.4),
            ("6", 3.8),
        ],
    ),
    (
        "g63",
        &[
            ("1", 3.4),
            ("2", 3.3),
            ("3", 3.2),
            ("4", 3.1),
            ("5", 3.1),
            ("6", 2.7),
        ],
    ),
    (
        "g64",
        &[
            ("1", 1.8),
            ("2", 1.7),
            ("3", 1.7),
            ("4", 1.7),
            ("5", 1.7),
            ("6", 1.4),
        ],
    ),
    ("20TD", &[("1", 16.7), ("2", 16.3), ("3", 18.0)]),
    ("30TD", SIX_PERIODS_30TD),
    ("61TD", SIX_PERIODS_61TD),
    (
        "62TD",
        &[
            ("1", 5.2),
            ("2", 5.4),
            ("3", 4.9),
            ("4", 5.0),
            ("5", 3.5),
            ("6", 5.4),
        ],
    ),
    (
        "63TD",
        &[
            ("1", 4.2),
            ("2", 4.3),
            ("3", 4.0),
            ("4", 4.0),
            ("5", 3.0),
            ("6", 4.4),
        ],
    ),
    (
        "64TD",
        &[
            ("1", 1.6),
            ("2", 1.6),
            ("3", 1.6),
            ("4", 1.6),
            ("5", 1.5),
            ("6", 1.7),
        ],
    ),
    ("30TDVE", SIX_PERIODS_30TD),
    ("61TDVE", SIX_PERIODS_61TD),
];

pub fn has_tariff(tariff: &str) -> bool {
    LOSS_COEFFICIENTS.iter().any(|(t, _)| *t == tariff)
}

/// Coefficient in percent, `None` when the tariff or the period is not in the table.
pub fn loss_coefficient(tariff: &str, period: &str) -> Option<f64> {
    LOSS_COEFFICIENTS
        .iter()
        .find(|(t, _)| *t == tariff)
        .and_then(|(_, periods)| periods.iter().find(|(p, _)| *p == period))
        .map(|(_, coefficient)| *coefficient)
}
