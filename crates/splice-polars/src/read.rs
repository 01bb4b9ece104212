//! DataFrame readers for group and observation tables

use std::collections::BTreeMap;

use chrono::NaiveDate;
use polars::prelude::*;
use splice_core::{
    groups_from_rows, SpliceGroup, SpliceGroupRow, StationId, StationSeriesSet, TimeSeries,
};
use tracing::debug;

use crate::{Error, GroupColumns, ObservationColumns, Result, SpliceFrameExt};

/// Days from 0001-01-01 to 1970-01-01
pub(crate) const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

impl SpliceFrameExt for DataFrame {
    fn splice_groups(&self, columns: &GroupColumns) -> Result<Vec<SpliceGroup>> {
        let ids = group_ids(self, &columns.group_id)?;
        let primary = string_values(self, &columns.primary)?;
        let secondary = string_values(self, &columns.secondary)?;

        let rows: Vec<_> = ids
            .into_iter()
            .zip(primary.into_iter().zip(secondary))
            .map(|(id, (p, s))| SpliceGroupRow::new(id, StationId::new(p, s)))
            .collect();
        Ok(groups_from_rows(&rows)?)
    }

    fn station_series(&self, columns: &ObservationColumns) -> Result<StationSeriesSet> {
        let primary = string_values(self, &columns.primary)?;
        let secondary = string_values(self, &columns.secondary)?;
        let dates = date_values(self, &columns.date)?;
        let fields = measurement_fields(self, columns)?;
        let values = fields
            .iter()
            .map(|f| float_values(self, f))
            .collect::<Result<Vec<_>>>()?;

        let mut rows: BTreeMap<StationId, Vec<usize>> = BTreeMap::new();
        for (i, (p, s)) in primary.into_iter().zip(secondary).enumerate() {
            rows.entry(StationId::new(p, s)).or_default().push(i);
        }

        let mut set = StationSeriesSet::new();
        for (station, mut idx) in rows {
            idx.sort_by_key(|&i| dates[i]);
            let series = TimeSeries::new(
                station,
                fields.clone(),
                idx.iter().map(|&i| dates[i]).collect(),
                values
                    .iter()
                    .map(|col| idx.iter().map(|&i| col[i]).collect())
                    .collect(),
            )?;
            set.insert(series)?;
        }

        debug!(stations = set.len(), fields = fields.len(), rows = self.height(), "read observations");
        Ok(set)
    }
}

fn column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column> {
    df.column(name)
        .map_err(|_| Error::InvalidColumn(name.to_string()))
}

fn null_at(name: &str, row: usize) -> Error {
    Error::NullValue {
        column: name.to_string(),
        row,
    }
}

fn string_values(df: &DataFrame, name: &str) -> Result<Vec<String>> {
    let cast = column(df, name)?.cast(&DataType::String)?;
    cast.str()?
        .into_iter()
        .enumerate()
        .map(|(row, v)| v.map(str::to_string).ok_or_else(|| null_at(name, row)))
        .collect()
}

fn group_ids(df: &DataFrame, name: &str) -> Result<Vec<u32>> {
    let col = column(df, name)?;
    if !col.dtype().is_integer() {
        return Err(Error::TypeMismatch {
            column: name.to_string(),
            expected: "integer".to_string(),
            got: format!("{}", col.dtype()),
        });
    }
    let cast = col.cast(&DataType::Int64)?;
    cast.i64()?
        .into_iter()
        .enumerate()
        .map(|(row, v)| {
            let v = v.ok_or_else(|| null_at(name, row))?;
            u32::try_from(v)
                .map_err(|_| Error::InvalidInput(format!("Group id {v} out of range at row {row}")))
        })
        .collect()
}

fn date_values(df: &DataFrame, name: &str) -> Result<Vec<NaiveDate>> {
    let col = column(df, name)?;
    if col.dtype() != &DataType::Date {
        return Err(Error::TypeMismatch {
            column: name.to_string(),
            expected: "date".to_string(),
            got: format!("{}", col.dtype()),
        });
    }
    let days = col.cast(&DataType::Int32)?;
    days.i32()?
        .into_iter()
        .enumerate()
        .map(|(row, v)| {
            let v = v.ok_or_else(|| null_at(name, row))?;
            NaiveDate::from_num_days_from_ce_opt(v + UNIX_EPOCH_DAYS_FROM_CE)
                .ok_or_else(|| Error::InvalidInput(format!("Date out of range at row {row}")))
        })
        .collect()
}

fn float_values(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    let col = column(df, name)?;
    if !is_measurement(col.dtype()) {
        return Err(Error::TypeMismatch {
            column: name.to_string(),
            expected: "numeric".to_string(),
            got: format!("{}", col.dtype()),
        });
    }
    let cast = col.cast(&DataType::Float64)?;
    Ok(cast
        .f64()?
        .into_iter()
        .map(|v| v.unwrap_or(f64::NAN))
        .collect())
}

fn is_measurement(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Float64 | DataType::Float32 | DataType::Int64 | DataType::Int32 | DataType::UInt64 | DataType::UInt32
    )
}

fn measurement_fields(df: &DataFrame, columns: &ObservationColumns) -> Result<Vec<String>> {
    if !columns.fields.is_empty() {
        return Ok(columns.fields.clone());
    }
    let fields: Vec<String> = df
        .get_columns()
        .iter()
        .filter(|c| !columns.is_key(c.name().as_str()) && is_measurement(c.dtype()))
        .map(|c| c.name().to_string())
        .collect();
    if fields.is_empty() {
        return Err(Error::InvalidInput(
            "Observation table has no numeric measurement columns".to_string(),
        ));
    }
    Ok(fields)
}
