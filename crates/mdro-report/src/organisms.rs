//! Organism rankings and specimen × organism counts.

use std::collections::BTreeMap;

use chrono::Datelike;
use polars::prelude::{DataFrame, IntoColumn, NamedFrom, PolarsResult, Series};
use serde::Serialize;

use mdro_model::{Isolate, Period};
use mdro_transform::{IsolationFilter, IsolationKey, first_isolation};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrganismCount {
    pub organism: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpecimenOrganismCount {
    pub year: i32,
    pub specimen: String,
    pub organism: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearOrganismCount {
    pub year: i32,
    pub organism: String,
    pub count: usize,
}

/// Most frequent organisms over first isolations per patient × specimen × organism.
///
/// Sorted by descending count, ties by organism name; at most `n` entries.
pub fn top_organisms(isolates: &[Isolate], n: usize) -> Vec<OrganismCount> {
    let firsts = first_isolation(
        isolates,
        &IsolationFilter::All,
        IsolationKey::new(Period::Whole).by_organism(),
    );
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for isolate in firsts {
        *counts.entry(isolate.organism.as_str()).or_insert(0) += 1;
    }
    let mut ranked: Vec<OrganismCount> = counts
        .into_iter()
        .map(|(organism, count)| OrganismCount {
            organism: organism.to_string(),
            count,
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.organism.cmp(&b.organism)));
    ranked.truncate(n);
    ranked
}

/// Yearly first-isolation counts per specimen and organism.
///
/// Sorted by descending count; ties by year, specimen, then organism.
pub fn specimen_organism_counts(isolates: &[Isolate]) -> Vec<SpecimenOrganismCount> {
    let firsts = first_isolation(
        isolates,
        &IsolationFilter::All,
        IsolationKey::new(Period::Year).by_organism(),
    );
    let mut counts: BTreeMap<(i32, &str, &str), usize> = BTreeMap::new();
    for isolate in firsts {
        let key = (
            isolate.performed_at.year(),
            isolate.specimen.as_str(),
            isolate.organism.as_str(),
        );
        *counts.entry(key).or_insert(0) += 1;
    }
    let mut rows: Vec<SpecimenOrganismCount> = counts
        .into_iter()
        .map(|((year, specimen, organism), count)| SpecimenOrganismCount {
            year,
            specimen: specimen.to_string(),
            organism: organism.to_string(),
            count,
        })
        .collect();
    // Stable sort keeps the (year, specimen, organism) order among equal counts.
    rows.sort_by(|a, b| b.count.cmp(&a.count));
    rows
}

/// Sum specimen counts per year and organism; year ascending, then count descending.
pub fn yearly_organism_totals(rows: &[SpecimenOrganismCount]) -> Vec<YearOrganismCount> {
    let mut totals: BTreeMap<(i32, &str), usize> = BTreeMap::new();
    for row in rows {
        *totals.entry((row.year, row.organism.as_str())).or_insert(0) += row.count;
    }
    let mut out: Vec<YearOrganismCount> = totals
        .into_iter()
        .map(|((year, organism), count)| YearOrganismCount {
            year,
            organism: organism.to_string(),
            count,
        })
        .collect();
    out.sort_by(|a, b| a.year.cmp(&b.year).then_with(|| b.count.cmp(&a.count)));
    out
}

pub fn organism_count_frame(rows: &[OrganismCount]) -> PolarsResult<DataFrame> {
    let organisms: Vec<String> = rows.iter().map(|row| row.organism.clone()).collect();
    let counts: Vec<u64> = rows.iter().map(|row| row.count as u64).collect();
    DataFrame::new(vec![
        Series::new("organism".into(), organisms).into_column(),
        Series::new("count".into(), counts).into_column(),
    ])
}

pub fn specimen_organism_frame(rows: &[SpecimenOrganismCount]) -> PolarsResult<DataFrame> {
    let years: Vec<i32> = rows.iter().map(|row| row.year).collect();
    let specimens: Vec<String> = rows.iter().map(|row| row.specimen.clone()).collect();
    let organisms: Vec<String> = rows.iter().map(|row| row.organism.clone()).collect();
    let counts: Vec<u64> = rows.iter().map(|row| row.count as u64).collect();
    DataFrame::new(vec![
        Series::new("year".into(), years).into_column(),
        Series::new("specimen".into(), specimens).into_column(),
        Series::new("organism".into(), organisms).into_column(),
        Series::new("count".into(), counts).into_column(),
    ])
}

pub fn yearly_organism_frame(rows: &[YearOrganismCount]) -> PolarsResult<DataFrame> {
    let years: Vec<i32> = rows.iter().map(|row| row.year).collect();
    let organisms: Vec<String> = rows.iter().map(|row| row.organism.clone()).collect();
    let counts: Vec<u64> = rows.iter().map(|row| row.count as u64).collect();
    DataFrame::new(vec![
        Series::new("year".into(), years).into_column(),
        Series::new("organism".into(), organisms).into_column(),
        Series::new("count".into(), counts).into_column(),
    ])
}
