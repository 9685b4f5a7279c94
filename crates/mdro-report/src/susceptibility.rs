//! Antibiotic susceptibility statistics for one organism.

use std::collections::BTreeMap;

use polars::prelude::{DataFrame, IntoColumn, NamedFrom, PolarsResult, Series};
use serde::Serialize;

use mdro_model::{Isolate, Judgment, Panel, Period, ReportOutcome, ResistanceScope};
use mdro_transform::{IsolationFilter, IsolationKey, first_isolation, parse_panel, parse_report};

/// Row name used for the ESBL screen.
pub const ESBL_ROW: &str = "ESBL";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SusceptibilityRow {
    pub antibiotic: String,
    pub susceptible: usize,
    pub intermediate: usize,
    pub resistant: usize,
    pub total: usize,
    pub susceptible_pct: f64,
    pub intermediate_pct: f64,
    pub resistant_pct: f64,
}

impl SusceptibilityRow {
    fn from_counts(antibiotic: &str, counts: [usize; 3]) -> Self {
        let [susceptible, intermediate, resistant] = counts;
        let total = susceptible + intermediate + resistant;
        let pct = |count: usize| {
            if total == 0 {
                0.0
            } else {
                count as f64 / total as f64 * 100.0
            }
        };
        Self {
            antibiotic: antibiotic.to_string(),
            susceptible,
            intermediate,
            resistant,
            total,
            susceptible_pct: pct(susceptible),
            intermediate_pct: pct(intermediate),
            resistant_pct: pct(resistant),
        }
    }

    fn esbl(positive: usize) -> Self {
        Self {
            antibiotic: ESBL_ROW.to_string(),
            susceptible: 0,
            intermediate: 0,
            resistant: 0,
            total: positive,
            susceptible_pct: 0.0,
            intermediate_pct: 0.0,
            resistant_pct: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SusceptibilitySummary {
    pub organism: String,
    /// First isolations the panels were read from.
    pub isolates: usize,
    pub rows: Vec<SusceptibilityRow>,
}

fn judgment_slot(judgment: Judgment) -> usize {
    match judgment {
        Judgment::Susceptible => 0,
        Judgment::Intermediate => 1,
        Judgment::Resistant => 2,
    }
}

/// Panel read for one isolate. Under organism scope only the isolate's own
/// identification block counts; the whole report is used when no block names it.
fn isolate_panel(isolate: &Isolate, scope: ResistanceScope) -> Panel {
    if scope == ResistanceScope::Organism
        && let ReportOutcome::Organisms(organisms) = parse_report(&isolate.result_text)
        && let Some(parsed) = organisms.iter().find(|parsed| parsed.name == isolate.organism)
    {
        return parse_panel(&parsed.block);
    }
    parse_panel(&isolate.result_text)
}

/// Tally S/I/R judgments per antibiotic over the organism's yearly first isolations.
///
/// Rows are sorted by total descending, ties by antibiotic name. The ESBL
/// row counts positive screens in `total` and carries no ratios.
pub fn susceptibility_summary(
    isolates: &[Isolate],
    organism: &str,
    scope: ResistanceScope,
) -> SusceptibilitySummary {
    let firsts = first_isolation(
        isolates,
        &IsolationFilter::Organism(organism.to_string()),
        IsolationKey::new(Period::Year),
    );
    let mut counts: BTreeMap<String, [usize; 3]> = BTreeMap::new();
    let mut esbl_positive = 0usize;
    for isolate in &firsts {
        let panel = isolate_panel(isolate, scope);
        if panel.esbl_positive {
            esbl_positive += 1;
        }
        for (antibiotic, judgment) in panel.judgments {
            counts.entry(antibiotic).or_insert([0; 3])[judgment_slot(judgment)] += 1;
        }
    }
    let mut rows: Vec<SusceptibilityRow> = counts
        .iter()
        .filter(|(antibiotic, _)| antibiotic.as_str() != ESBL_ROW)
        .map(|(antibiotic, counts)| SusceptibilityRow::from_counts(antibiotic, *counts))
        .collect();
    if esbl_positive > 0 {
        rows.push(SusceptibilityRow::esbl(esbl_positive));
    }
    rows.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then_with(|| a.antibiotic.cmp(&b.antibiotic))
    });
    SusceptibilitySummary {
        organism: organism.to_string(),
        isolates: firsts.len(),
        rows,
    }
}

pub fn susceptibility_frame(summary: &SusceptibilitySummary) -> PolarsResult<DataFrame> {
    let rows = &summary.rows;
    let names: Vec<String> = rows.iter().map(|row| row.antibiotic.clone()).collect();
    let count = |f: fn(&SusceptibilityRow) -> usize| -> Vec<u64> {
        rows.iter().map(|row| f(row) as u64).collect()
    };
    let ratio = |f: fn(&SusceptibilityRow) -> f64| -> Vec<f64> { rows.iter().map(f).collect() };
    DataFrame::new(vec![
        Series::new("antibiotic".into(), names).into_column(),
        Series::new("S".into(), count(|row| row.susceptible)).into_column(),
        Series::new("I".into(), count(|row| row.intermediate)).into_column(),
        Series::new("R".into(), count(|row| row.resistant)).into_column(),
        Series::new("total".into(), count(|row| row.total)).into_column(),
        Series::new("S_pct".into(), ratio(|row| row.susceptible_pct)).into_column(),
        Series::new("I_pct".into(), ratio(|row| row.intermediate_pct)).into_column(),
        Series::new("R_pct".into(), ratio(|row| row.resistant_pct)).into_column(),
    ])
}
