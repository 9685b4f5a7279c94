//! Indicator counts per period and rates per thousand isolates.

use std::collections::{BTreeMap, BTreeSet};

use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, PolarsResult, Series};
use serde::Serialize;
use tracing::debug;

use mdro_model::{Indicator, Isolate, Period, PeriodKey, PipelineOptions, SurveillanceClass};
use mdro_transform::{IsolationFilter, IsolationKey, first_isolation};

/// Name of the period column in count tables.
pub const PERIOD_COLUMN: &str = "period";
pub const TOTAL_ISOLATES_COLUMN: &str = "total_isolates";

/// Count events per bucket. Events without a bucket ([`Period::Whole`]) are not counted.
pub fn count_by_period<'a>(
    events: impl IntoIterator<Item = &'a Isolate>,
    period: Period,
) -> BTreeMap<PeriodKey, usize> {
    let mut counts = BTreeMap::new();
    for event in events {
        if let Some(bucket) = event.bucket(period) {
            *counts.entry(bucket).or_insert(0) += 1;
        }
    }
    counts
}

/// First isolations flagged for one indicator.
pub fn indicator_first_isolations(
    isolates: &[Isolate],
    indicator: Indicator,
    dedupe_period: Period,
) -> Vec<&Isolate> {
    first_isolation(
        isolates,
        &IsolationFilter::Indicator(indicator),
        IsolationKey::new(dedupe_period),
    )
}

/// One period of a count table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountRow {
    pub period: PeriodKey,
    /// One count per indicator, in table column order.
    pub counts: Vec<usize>,
    pub total: usize,
}

/// Indicator counts per period, with a total column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountTable {
    pub period: Period,
    pub indicators: Vec<Indicator>,
    pub total_column: String,
    pub rows: Vec<CountRow>,
}

impl CountTable {
    /// Sum of one indicator over all periods.
    pub fn indicator_total(&self, indicator: Indicator) -> usize {
        self.indicators
            .iter()
            .position(|candidate| *candidate == indicator)
            .map_or(0, |idx| self.rows.iter().map(|row| row.counts[idx]).sum())
    }

    pub fn grand_total(&self) -> usize {
        self.rows.iter().map(|row| row.total).sum()
    }

    pub fn to_frame(&self) -> PolarsResult<DataFrame> {
        let periods: Vec<String> = self.rows.iter().map(|row| row.period.to_string()).collect();
        let mut columns: Vec<Column> =
            vec![Series::new(PERIOD_COLUMN.into(), periods).into_column()];
        for (idx, indicator) in self.indicators.iter().enumerate() {
            let values: Vec<u64> = self.rows.iter().map(|row| row.counts[idx] as u64).collect();
            columns.push(Series::new(indicator.code().into(), values).into_column());
        }
        let totals: Vec<u64> = self.rows.iter().map(|row| row.total as u64).collect();
        columns.push(Series::new(self.total_column.as_str().into(), totals).into_column());
        DataFrame::new(columns)
    }
}

/// Count first isolations of each indicator per `period`.
///
/// Each indicator is deduplicated on its own with `dedupe_period` buckets,
/// then counted. Periods where only some indicators occur get zero for the
/// others; rows are sorted by period.
pub fn surveillance_table(
    isolates: &[Isolate],
    indicators: &[Indicator],
    period: Period,
    dedupe_period: Period,
    total_column: &str,
) -> CountTable {
    let per_indicator: Vec<BTreeMap<PeriodKey, usize>> = indicators
        .iter()
        .map(|indicator| {
            let firsts = indicator_first_isolations(isolates, *indicator, dedupe_period);
            debug!(
                indicator = indicator.code(),
                first_isolations = firsts.len(),
                "indicator deduplicated"
            );
            count_by_period(firsts, period)
        })
        .collect();
    let periods: BTreeSet<PeriodKey> = per_indicator
        .iter()
        .flat_map(|counts| counts.keys().copied())
        .collect();
    let rows = periods
        .into_iter()
        .map(|key| {
            let counts: Vec<usize> = per_indicator
                .iter()
                .map(|by_period| by_period.get(&key).copied().unwrap_or(0))
                .collect();
            let total = counts.iter().sum();
            CountRow {
                period: key,
                counts,
                total,
            }
        })
        .collect();
    CountTable {
        period,
        indicators: indicators.to_vec(),
        total_column: total_column.to_string(),
        rows,
    }
}

/// Monthly sentinel surveillance counts (VRE, MRPA, MRAB, MRSA).
pub fn sentinel_table(isolates: &[Isolate], options: &PipelineOptions) -> CountTable {
    let class = SurveillanceClass::Sentinel;
    surveillance_table(
        isolates,
        class.indicators(),
        Period::Month,
        options.sentinel_period,
        class.total_column(),
    )
}

/// First isolations, all isolates, and the rate per thousand isolates for one year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearRate {
    pub year: PeriodKey,
    pub first_isolations: usize,
    pub total_isolates: usize,
    pub per_thousand: f64,
}

/// Join yearly first-isolation counts with yearly isolate totals.
///
/// Years present in either map are reported; the rate is 0 when a year has
/// no isolates.
pub fn rate_per_thousand(
    events_by_year: &BTreeMap<PeriodKey, usize>,
    isolates_by_year: &BTreeMap<PeriodKey, usize>,
) -> Vec<YearRate> {
    let years: BTreeSet<PeriodKey> = events_by_year
        .keys()
        .chain(isolates_by_year.keys())
        .copied()
        .collect();
    years
        .into_iter()
        .map(|year| {
            let first_isolations = events_by_year.get(&year).copied().unwrap_or(0);
            let total_isolates = isolates_by_year.get(&year).copied().unwrap_or(0);
            let per_thousand = if total_isolates == 0 {
                0.0
            } else {
                first_isolations as f64 / total_isolates as f64 * 1000.0
            };
            YearRate {
                year,
                first_isolations,
                total_isolates,
                per_thousand,
            }
        })
        .collect()
}

/// Class-two surveillance: annual and monthly counts plus yearly rates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassTwoReport {
    pub annual: CountTable,
    pub monthly: CountTable,
    pub rates: BTreeMap<Indicator, Vec<YearRate>>,
}

impl ClassTwoReport {
    /// Annual counts with the isolate total and one rate column per indicator.
    pub fn annual_frame(&self) -> PolarsResult<DataFrame> {
        let mut frame = self.annual.to_frame()?;
        let years: Vec<PeriodKey> = self.annual.rows.iter().map(|row| row.period).collect();
        let mut totals: Vec<u64> = vec![0; years.len()];
        for (indicator, rates) in &self.rates {
            let by_year: BTreeMap<PeriodKey, &YearRate> =
                rates.iter().map(|rate| (rate.year, rate)).collect();
            let per_thousand: Vec<f64> = years
                .iter()
                .map(|year| by_year.get(year).map_or(0.0, |rate| rate.per_thousand))
                .collect();
            for (slot, year) in totals.iter_mut().zip(&years) {
                if let Some(rate) = by_year.get(year) {
                    *slot = rate.total_isolates as u64;
                }
            }
            frame.with_column(Series::new(
                format!("{}_per_1000", indicator.code()).into(),
                per_thousand,
            ))?;
        }
        frame.with_column(Series::new(TOTAL_ISOLATES_COLUMN.into(), totals))?;
        Ok(frame)
    }
}

/// Class-two counts (CRE, VRSA) deduplicated per `options.class_two_period`.
pub fn class_two_report(isolates: &[Isolate], options: &PipelineOptions) -> ClassTwoReport {
    let class = SurveillanceClass::ClassTwo;
    let dedupe = options.class_two_period;
    let annual = surveillance_table(
        isolates,
        class.indicators(),
        Period::Year,
        dedupe,
        class.total_column(),
    );
    let monthly = surveillance_table(
        isolates,
        class.indicators(),
        Period::Month,
        dedupe,
        class.total_column(),
    );
    let isolates_by_year = count_by_period(isolates, Period::Year);
    let rates = class
        .indicators()
        .iter()
        .map(|indicator| {
            let firsts = indicator_first_isolations(isolates, *indicator, dedupe);
            let by_year = count_by_period(firsts, Period::Year);
            (*indicator, rate_per_thousand(&by_year, &isolates_by_year))
        })
        .collect();
    ClassTwoReport {
        annual,
        monthly,
        rates,
    }
}
