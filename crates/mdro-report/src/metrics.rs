//! Forecast accuracy and correlation between count series.

use std::collections::{BTreeMap, BTreeSet};

use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, PolarsResult, Series};
use serde::Serialize;

use mdro_ingest::NumericColumn;
use mdro_model::ForecastPoint;

/// Mean absolute error; NaN for empty or mismatched input.
pub fn mae(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.len() != predicted.len() || actual.is_empty() {
        return f64::NAN;
    }
    let sum: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).abs())
        .sum();
    sum / actual.len() as f64
}

pub fn rmse(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.len() != predicted.len() || actual.is_empty() {
        return f64::NAN;
    }
    let sum: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).powi(2))
        .sum();
    (sum / actual.len() as f64).sqrt()
}

/// Mean absolute percentage error in percent.
///
/// Points with a zero actual value are left out; NaN when none remain.
pub fn mape(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.len() != predicted.len() {
        return f64::NAN;
    }
    let ratios: Vec<f64> = actual
        .iter()
        .zip(predicted)
        .filter(|(a, _)| a.abs() > 1e-10)
        .map(|(a, p)| ((a - p) / a).abs())
        .collect();
    if ratios.is_empty() {
        return f64::NAN;
    }
    ratios.iter().sum::<f64>() / ratios.len() as f64 * 100.0
}

/// Forecast accuracy over one year of points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearAccuracy {
    pub year: i32,
    pub points: usize,
    pub mae: f64,
    pub rmse: f64,
    pub mape: f64,
}

/// Average of per-year accuracy figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccuracySummary {
    pub years: Vec<i32>,
    pub mae: f64,
    pub rmse: f64,
    pub mape: f64,
}

/// MAE, RMSE and MAPE per year over points with both observed and expected values.
///
/// With no `years` every year present is reported. Years without a
/// complete point are skipped.
pub fn accuracy_by_year(points: &[ForecastPoint], years: &[i32]) -> Vec<YearAccuracy> {
    let mut by_year: BTreeMap<i32, (Vec<f64>, Vec<f64>)> = BTreeMap::new();
    for point in points {
        if let (Some(observed), Some(expected)) = (point.observed, point.expected) {
            let (actual, predicted) = by_year.entry(point.period.year).or_default();
            actual.push(observed);
            predicted.push(expected);
        }
    }
    let wanted: BTreeSet<i32> = years.iter().copied().collect();
    by_year
        .into_iter()
        .filter(|(year, _)| wanted.is_empty() || wanted.contains(year))
        .map(|(year, (actual, predicted))| YearAccuracy {
            year,
            points: actual.len(),
            mae: mae(&actual, &predicted),
            rmse: rmse(&actual, &predicted),
            mape: mape(&actual, &predicted),
        })
        .collect()
}

/// Mean of the given years' figures (all rows when `years` is empty).
pub fn mean_accuracy(rows: &[YearAccuracy], years: &[i32]) -> Option<AccuracySummary> {
    let selected: Vec<&YearAccuracy> = rows
        .iter()
        .filter(|row| years.is_empty() || years.contains(&row.year))
        .collect();
    if selected.is_empty() {
        return None;
    }
    let mean = |f: fn(&YearAccuracy) -> f64| -> f64 {
        selected.iter().map(|row| f(row)).sum::<f64>() / selected.len() as f64
    };
    Some(AccuracySummary {
        years: selected.iter().map(|row| row.year).collect(),
        mae: mean(|row| row.mae),
        rmse: mean(|row| row.rmse),
        mape: mean(|row| row.mape),
    })
}

pub fn accuracy_frame(rows: &[YearAccuracy]) -> PolarsResult<DataFrame> {
    let years: Vec<i32> = rows.iter().map(|row| row.year).collect();
    let points: Vec<u64> = rows.iter().map(|row| row.points as u64).collect();
    let metric = |f: fn(&YearAccuracy) -> f64| -> Vec<f64> { rows.iter().map(f).collect() };
    DataFrame::new(vec![
        Series::new("year".into(), years).into_column(),
        Series::new("points".into(), points).into_column(),
        Series::new("MAE".into(), metric(|row| row.mae)).into_column(),
        Series::new("RMSE".into(), metric(|row| row.rmse)).into_column(),
        Series::new("MAPE".into(), metric(|row| row.mape)).into_column(),
    ])
}

/// Pearson correlation over positions where both series have a value.
///
/// NaN with fewer than two shared points or a constant series.
pub fn pearson(x: &[Option<f64>], y: &[Option<f64>]) -> f64 {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y)
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .collect();
    if pairs.len() < 2 {
        return f64::NAN;
    }
    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(a, _)| a).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, b)| b).sum::<f64>() / n;
    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (a, b) in &pairs {
        let dx = a - mean_x;
        let dy = b - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    let denom = (var_x * var_y).sqrt();
    if denom == 0.0 {
        return f64::NAN;
    }
    cov / denom
}

/// Pairwise correlations between named series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub names: Vec<String>,
    /// Row-major, `names.len()` × `names.len()`.
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.names.iter().position(|name| name == a)?;
        let j = self.names.iter().position(|name| name == b)?;
        Some(self.values[i][j])
    }

    pub fn to_frame(&self) -> PolarsResult<DataFrame> {
        let mut columns: Vec<Column> =
            vec![Series::new("variable".into(), self.names.clone()).into_column()];
        for (j, name) in self.names.iter().enumerate() {
            let values: Vec<f64> = self.values.iter().map(|row| row[j]).collect();
            columns.push(Series::new(name.as_str().into(), values).into_column());
        }
        DataFrame::new(columns)
    }
}

pub fn correlation_matrix(series: &[NumericColumn]) -> CorrelationMatrix {
    let values = series
        .iter()
        .map(|a| {
            series
                .iter()
                .map(|b| pearson(&a.values, &b.values))
                .collect()
        })
        .collect();
    CorrelationMatrix {
        names: series.iter().map(|column| column.name.clone()).collect(),
        values,
    }
}
