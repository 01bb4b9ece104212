//! DataFrame writers for batch reports

use polars::prelude::*;
use splice_continuity::{BatchReport, PairStatus};

use crate::read::UNIX_EPOCH_DAYS_FROM_CE;
use crate::{ReportFrameExt, Result};
use chrono::Datelike;

impl ReportFrameExt for BatchReport {
    fn result_frame(&self) -> Result<DataFrame> {
        let rows = self.rows();
        let mut pair = Vec::with_capacity(rows.len());
        let mut test = Vec::with_capacity(rows.len());
        let mut field = Vec::with_capacity(rows.len());
        let mut statistic = Vec::with_capacity(rows.len());
        let mut quantile = Vec::with_capacity(rows.len());
        let mut value = Vec::with_capacity(rows.len());
        for row in rows {
            pair.push(row.pair);
            test.push(row.test);
            field.push(row.field);
            statistic.push(row.statistic.name());
            quantile.push(row.quantile);
            value.push(row.value);
        }

        Ok(DataFrame::new(vec![
            Series::new("pair".into(), pair).into(),
            Series::new("test".into(), test).into(),
            Series::new("field".into(), field).into(),
            Series::new("statistic".into(), statistic).into(),
            Series::new("quantile".into(), quantile).into(),
            Series::new("value".into(), value).into(),
        ])?)
    }

    fn outcome_frame(&self) -> Result<DataFrame> {
        let n = self.len();
        let mut pair = Vec::with_capacity(n);
        let mut group_id = Vec::with_capacity(n);
        let mut first = Vec::with_capacity(n);
        let mut second = Vec::with_capacity(n);
        let mut status = Vec::with_capacity(n);
        let mut reason = Vec::with_capacity(n);
        let mut boundary = Vec::with_capacity(n);
        let mut early = Vec::with_capacity(n);
        for outcome in &self.outcomes {
            pair.push(outcome.pair.label());
            group_id.push(outcome.pair.group_id);
            first.push(outcome.pair.first.to_string());
            second.push(outcome.pair.second.to_string());
            match &outcome.status {
                PairStatus::Evaluated => {
                    status.push("evaluated");
                    reason.push(None);
                }
                PairStatus::Failed { reason: r } => {
                    status.push("failed");
                    reason.push(Some(r.clone()));
                }
            }
            boundary.push(
                outcome
                    .boundary
                    .map(|d| d.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE),
            );
            early.push(outcome.early.as_ref().map(|s| s.to_string()));
        }

        Ok(DataFrame::new(vec![
            Series::new("pair".into(), pair).into(),
            Series::new("group_id".into(), group_id).into(),
            Series::new("first".into(), first).into(),
            Series::new("second".into(), second).into(),
            Series::new("status".into(), status).into(),
            Series::new("reason".into(), reason).into(),
            Series::new("boundary".into(), boundary)
                .cast(&DataType::Date)?
                .into(),
            Series::new("early".into(), early).into(),
        ])?)
    }

    fn distribution_frame(&self) -> Result<DataFrame> {
        let mut pair = Vec::new();
        let mut test = Vec::new();
        let mut draw = Vec::new();
        let mut field = Vec::new();
        let mut statistic = Vec::new();
        let mut value = Vec::new();
        for outcome in &self.outcomes {
            let label = outcome.pair.label();
            for output in &outcome.outputs {
                let Some(dist) = &output.distribution else {
                    continue;
                };
                for (d, row) in dist.rows().iter().enumerate() {
                    for (key, &v) in dist.keys().iter().zip(row) {
                        pair.push(label.clone());
                        test.push(output.test.clone());
                        draw.push(d as u32);
                        field.push(key.field.clone());
                        statistic.push(key.statistic.name());
                        value.push(v);
                    }
                }
            }
        }

        Ok(DataFrame::new(vec![
            Series::new("pair".into(), pair).into(),
            Series::new("test".into(), test).into(),
            Series::new("draw".into(), draw).into(),
            Series::new("field".into(), field).into(),
            Series::new("statistic".into(), statistic).into(),
            Series::new("value".into(), value).into(),
        ])?)
    }
}
