//! Indicator derivation and row expansion.
//!
//! Each raw report row is validated into a [`LabReport`], parsed, and
//! expanded into one [`Isolate`] per identified organism. Organism groups
//! come from the organism name; resistance markers come from the report
//! text, restricted to markers whose groups the organism belongs to.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tracing::{debug, info};

use mdro_ingest::RawReport;
use mdro_model::{
    Isolate, LabReport, OrganismGroup, ParsedOrganism, PipelineOptions, ReportOutcome,
    ResistanceMarker, ResistanceScope,
};

use crate::datetime::parse_timestamp;
use crate::parse::{marker_reported, parse_report};
use crate::specimen::normalize_specimen;

/// Counts gathered while preprocessing report rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PreprocessStats {
    pub input_rows: usize,
    pub skipped_missing_timestamp: usize,
    pub skipped_missing_patient: usize,
    pub no_growth_reports: usize,
    pub unparsed_reports: usize,
    pub isolates: usize,
    /// Isolates per organism group code.
    pub group_counts: BTreeMap<String, usize>,
    /// Isolates per resistance marker column.
    pub marker_counts: BTreeMap<String, usize>,
}

impl PreprocessStats {
    pub fn reports_used(&self) -> usize {
        self.input_rows - self.skipped_missing_timestamp - self.skipped_missing_patient
    }

    fn record_isolate(&mut self, isolate: &Isolate) {
        self.isolates += 1;
        for group in &isolate.groups {
            *self.group_counts.entry(group.code().to_string()).or_default() += 1;
        }
        for marker in &isolate.markers {
            *self
                .marker_counts
                .entry(marker.column().to_string())
                .or_default() += 1;
        }
    }
}

/// Isolate rows and the statistics of the run that produced them.
#[derive(Debug, Clone, Default)]
pub struct Preprocessed {
    pub isolates: Vec<Isolate>,
    pub stats: PreprocessStats,
}

/// Validated reports plus the number of rows dropped for each reason.
#[derive(Debug, Clone, Default)]
pub struct PreparedReports {
    pub reports: Vec<LabReport>,
    pub missing_timestamp: usize,
    pub missing_patient: usize,
}

/// Validate raw rows: parse timestamps, require a patient id, normalize specimens.
pub fn prepare_reports(rows: &[RawReport], options: &PipelineOptions) -> PreparedReports {
    let mut prepared = PreparedReports::default();
    for row in rows {
        let Some(performed_at) = parse_timestamp(&row.performed_at) else {
            debug!(source_row = row.source_row, "row skipped: unreadable timestamp");
            prepared.missing_timestamp += 1;
            continue;
        };
        let patient_id = row.patient_id.trim();
        if patient_id.is_empty() {
            debug!(source_row = row.source_row, "row skipped: missing patient id");
            prepared.missing_patient += 1;
            continue;
        }
        prepared.reports.push(LabReport {
            source_row: row.source_row,
            patient_id: patient_id.to_string(),
            specimen: normalize_specimen(&row.specimen, options),
            performed_at,
            result_text: row.result_text.clone(),
        });
    }
    prepared
}

/// Organism groups an organism name belongs to.
pub fn organism_groups(organism: &str) -> BTreeSet<OrganismGroup> {
    OrganismGroup::ALL
        .into_iter()
        .filter(|group| group.matches(organism))
        .collect()
}

/// Markers applicable to `groups` that `text` reports as resistant.
pub fn resistance_markers(
    text: &str,
    groups: &BTreeSet<OrganismGroup>,
) -> BTreeSet<ResistanceMarker> {
    ResistanceMarker::ALL
        .into_iter()
        .filter(|marker| groups.iter().any(|group| marker.applies_to(*group)))
        .filter(|marker| marker_reported(text, *marker))
        .collect()
}

/// Build the isolate for one parsed organism of a report.
pub fn derive_isolate(
    report: &LabReport,
    organism: &ParsedOrganism,
    scope: ResistanceScope,
) -> Isolate {
    let groups = organism_groups(&organism.name);
    let scope_text = match scope {
        ResistanceScope::Organism => organism.block.as_str(),
        ResistanceScope::Report => report.result_text.as_str(),
    };
    let markers = resistance_markers(scope_text, &groups);
    Isolate {
        source_row: report.source_row,
        patient_id: report.patient_id.clone(),
        specimen: report.specimen.clone(),
        performed_at: report.performed_at,
        organism: organism.name.clone(),
        groups,
        markers,
        result_text: report.result_text.clone(),
    }
}

/// Parse, expand, and flag report rows.
///
/// No-growth and unparseable reports produce no isolate; a report naming
/// several organisms produces one isolate per organism, in report order.
pub fn preprocess(rows: &[RawReport], options: &PipelineOptions) -> Preprocessed {
    let prepared = prepare_reports(rows, options);
    let mut stats = PreprocessStats {
        input_rows: rows.len(),
        skipped_missing_timestamp: prepared.missing_timestamp,
        skipped_missing_patient: prepared.missing_patient,
        ..PreprocessStats::default()
    };
    let mut isolates = Vec::with_capacity(prepared.reports.len());
    for report in &prepared.reports {
        match parse_report(&report.result_text) {
            ReportOutcome::NoGrowth => stats.no_growth_reports += 1,
            ReportOutcome::Organisms(organisms) if organisms.is_empty() => {
                stats.unparsed_reports += 1;
            }
            ReportOutcome::Organisms(organisms) => {
                for organism in &organisms {
                    let isolate = derive_isolate(report, organism, options.resistance_scope);
                    stats.record_isolate(&isolate);
                    isolates.push(isolate);
                }
            }
        }
    }
    info!(
        input_rows = stats.input_rows,
        isolates = stats.isolates,
        no_growth = stats.no_growth_reports,
        unparsed = stats.unparsed_reports,
        skipped = stats.skipped_missing_timestamp + stats.skipped_missing_patient,
        "reports preprocessed"
    );
    Preprocessed { isolates, stats }
}
