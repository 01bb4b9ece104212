//! Common test utilities for splice-polars tests

#![allow(dead_code)]

use polars::prelude::*;

/// Days since 1970-01-01 of 1990-01-01
pub const DAY_1990: i32 = 7305;

pub fn group_table(rows: &[(i64, &str, &str)]) -> DataFrame {
    let ids: Vec<i64> = rows.iter().map(|r| r.0).collect();
    let primary: Vec<&str> = rows.iter().map(|r| r.1).collect();
    let secondary: Vec<&str> = rows.iter().map(|r| r.2).collect();
    df![
        "group_id" => ids,
        "station_primary_id" => primary,
        "station_secondary_id" => secondary,
    ]
    .unwrap()
}

/// Daily observations for one station, `temp` and `dewp` per day
pub fn observation_table(primary: &str, first_day: i32, days: usize, level: f64) -> DataFrame {
    let day_index: Vec<i32> = (0..days as i32).map(|i| first_day + i).collect();
    let temp: Vec<f64> = (0..days).map(|i| level + (i % 5) as f64).collect();
    let dewp: Vec<Option<f64>> = (0..days)
        .map(|i| (i % 10 != 0).then_some(level - 10.0))
        .collect();
    DataFrame::new(vec![
        Series::new("station_primary_id".into(), vec![primary; days]).into(),
        Series::new("station_secondary_id".into(), vec!["99999"; days]).into(),
        Series::new("date".into(), day_index)
            .cast(&DataType::Date)
            .unwrap()
            .into(),
        Series::new("temp".into(), temp).into(),
        Series::new("dewp".into(), dewp).into(),
    ])
    .unwrap()
}
