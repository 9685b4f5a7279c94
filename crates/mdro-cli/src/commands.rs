use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use polars::prelude::{DataFrame, PolarsResult};
use tracing::{info, info_span, trace, warn};

use mdro_ingest::{
    IsolateLoad, expand_inputs, load_reports, read_forecast_table, read_isolate_table,
    read_numeric_columns,
};
use mdro_model::{ForecastPoint, Isolate, PipelineOptions};
use mdro_report::{
    accuracy_by_year, accuracy_frame, alert_at, alert_level, annotate_alerts, class_two_report,
    correlation_matrix, detect_alerts, forecast_frame, mean_accuracy, organism_count_frame,
    sentinel_table, specimen_organism_counts, specimen_organism_frame, susceptibility_frame,
    susceptibility_summary, top_organisms, write_frame_csv, write_json, yearly_organism_frame,
    yearly_organism_totals,
};
use mdro_transform::{isolate_frame, preprocess};

use crate::cli::{
    AccuracyArgs, AlertsArgs, ClassTwoArgs, CorrelateArgs, LevelArgs, OrganismsArgs,
    PreprocessArgs, SentinelArgs, SpecimensArgs, SusceptibilityArgs,
};
use crate::logging::redact_value;
use crate::types::{
    AccuracyResult, AlertsResult, ClassTwoResult, CorrelationResult, IsolateInput, LevelResult,
    OrganismsResult, PreprocessResult, SentinelResult, SpecimensResult, SusceptibilityResult,
};

fn write_table(path: &Path, frame: PolarsResult<DataFrame>) -> Result<()> {
    let mut frame = frame.with_context(|| format!("build table for {}", path.display()))?;
    write_frame_csv(path, &mut frame)
}

fn load_isolates(path: &Path) -> Result<(Vec<Isolate>, IsolateInput)> {
    info_span!("load_isolates").in_scope(|| -> Result<_> {
        let start = Instant::now();
        let IsolateLoad { isolates, skipped } = read_isolate_table(path)
            .with_context(|| format!("read isolate table {}", path.display()))?;
        if isolates.is_empty() {
            warn!(path = %path.display(), "isolate table has no usable rows");
        }
        info!(
            isolates = isolates.len(),
            skipped,
            duration_ms = start.elapsed().as_millis(),
            "isolates loaded"
        );
        let input = IsolateInput {
            isolates: isolates.len(),
            skipped,
        };
        Ok((isolates, input))
    })
}

fn load_forecast(path: &Path) -> Result<Vec<ForecastPoint>> {
    let points = read_forecast_table(path)
        .with_context(|| format!("read forecast table {}", path.display()))?;
    if points.is_empty() {
        warn!(path = %path.display(), "forecast table has no periods");
    }
    Ok(points)
}

pub fn run_preprocess(args: &PreprocessArgs, options: &PipelineOptions) -> Result<PreprocessResult> {
    let mut options = options.clone();
    if let Some(scope) = args.resistance_scope {
        options.resistance_scope = scope.into();
    }

    let load = info_span!("ingest").in_scope(|| -> Result<_> {
        let start = Instant::now();
        let paths = expand_inputs(&args.inputs).context("resolve inputs")?;
        let load = load_reports(&paths, &options.columns).context("load reports")?;
        info!(
            file_count = load.files_loaded.len(),
            row_count = load.rows.len(),
            duration_ms = start.elapsed().as_millis(),
            "ingest complete"
        );
        Ok(load)
    })?;

    let processed = info_span!("preprocess").in_scope(|| {
        let start = Instant::now();
        let processed = preprocess(&load.rows, &options);
        for isolate in &processed.isolates {
            trace!(
                source_row = isolate.source_row,
                patient_id = redact_value(&isolate.patient_id),
                organism = %isolate.organism,
                "isolate derived"
            );
        }
        info!(
            isolates = processed.isolates.len(),
            duration_ms = start.elapsed().as_millis(),
            "preprocess complete"
        );
        processed
    });

    info_span!("output").in_scope(|| -> Result<()> {
        let start = Instant::now();
        write_table(&args.output, isolate_frame(&processed.isolates))?;
        if let Some(path) = &args.stats {
            write_json(path, &processed.stats)?;
        }
        info!(
            path = %args.output.display(),
            duration_ms = start.elapsed().as_millis(),
            "output complete"
        );
        Ok(())
    })?;

    Ok(PreprocessResult {
        files_loaded: load.files_loaded,
        files_skipped: load.files_skipped,
        stats: processed.stats,
        output: args.output.clone(),
        stats_output: args.stats.clone(),
    })
}

pub fn run_sentinel(args: &SentinelArgs, options: &PipelineOptions) -> Result<SentinelResult> {
    let mut options = options.clone();
    if let Some(period) = args.dedupe_period {
        options.sentinel_period = period.into();
    }
    let (isolates, input) = load_isolates(&args.isolates)?;
    let table = info_span!("sentinel").in_scope(|| {
        let start = Instant::now();
        let table = sentinel_table(&isolates, &options);
        info!(
            periods = table.rows.len(),
            first_isolations = table.grand_total(),
            duration_ms = start.elapsed().as_millis(),
            "sentinel table built"
        );
        table
    });
    write_table(&args.output, table.to_frame())?;
    Ok(SentinelResult {
        input,
        table,
        output: args.output.clone(),
    })
}

pub fn run_class_two(args: &ClassTwoArgs, options: &PipelineOptions) -> Result<ClassTwoResult> {
    let mut options = options.clone();
    if let Some(period) = args.dedupe_period {
        options.class_two_period = period.into();
    }
    let (isolates, input) = load_isolates(&args.isolates)?;
    let report = info_span!("class_two").in_scope(|| {
        let start = Instant::now();
        let report = class_two_report(&isolates, &options);
        info!(
            years = report.annual.rows.len(),
            months = report.monthly.rows.len(),
            first_isolations = report.annual.grand_total(),
            duration_ms = start.elapsed().as_millis(),
            "class-two report built"
        );
        report
    });
    write_table(&args.output, report.annual_frame())?;
    write_table(&args.monthly_output, report.monthly.to_frame())?;
    Ok(ClassTwoResult {
        input,
        report,
        output: args.output.clone(),
        monthly_output: args.monthly_output.clone(),
    })
}

pub fn run_organisms(args: &OrganismsArgs) -> Result<OrganismsResult> {
    let (isolates, input) = load_isolates(&args.isolates)?;
    let organisms = info_span!("organisms", top = args.top).in_scope(|| {
        let start = Instant::now();
        let organisms = top_organisms(&isolates, args.top);
        info!(
            organisms = organisms.len(),
            duration_ms = start.elapsed().as_millis(),
            "organism ranking built"
        );
        organisms
    });
    write_table(&args.output, organism_count_frame(&organisms))?;
    Ok(OrganismsResult {
        input,
        organisms,
        output: args.output.clone(),
    })
}

pub fn run_specimens(args: &SpecimensArgs) -> Result<SpecimensResult> {
    let (isolates, input) = load_isolates(&args.isolates)?;
    let (counts, totals) = info_span!("specimens").in_scope(|| {
        let start = Instant::now();
        let counts = specimen_organism_counts(&isolates);
        let totals = yearly_organism_totals(&counts);
        info!(
            rows = counts.len(),
            organism_years = totals.len(),
            duration_ms = start.elapsed().as_millis(),
            "specimen counts built"
        );
        (counts, totals)
    });
    write_table(&args.output, specimen_organism_frame(&counts))?;
    write_table(&args.totals_output, yearly_organism_frame(&totals))?;
    Ok(SpecimensResult {
        input,
        counts,
        totals,
        output: args.output.clone(),
        totals_output: args.totals_output.clone(),
    })
}

pub fn run_susceptibility(
    args: &SusceptibilityArgs,
    options: &PipelineOptions,
) -> Result<SusceptibilityResult> {
    let scope = args
        .resistance_scope
        .map_or(options.resistance_scope, Into::into);
    let (isolates, input) = load_isolates(&args.isolates)?;
    let summary = info_span!("susceptibility", organism = %args.organism).in_scope(|| {
        let start = Instant::now();
        let summary = susceptibility_summary(&isolates, &args.organism, scope);
        if summary.isolates == 0 {
            warn!(organism = %args.organism, "no isolates of organism");
        }
        info!(
            first_isolations = summary.isolates,
            antibiotics = summary.rows.len(),
            duration_ms = start.elapsed().as_millis(),
            "susceptibility summary built"
        );
        summary
    });
    write_table(&args.output, susceptibility_frame(&summary))?;
    Ok(SusceptibilityResult {
        input,
        summary,
        output: args.output.clone(),
    })
}

pub fn run_alerts(args: &AlertsArgs) -> Result<AlertsResult> {
    let mut points = load_forecast(&args.forecast)?;
    let alerts = detect_alerts(&points);
    annotate_alerts(&mut points);
    info!(
        periods = points.len(),
        alerts = alerts.len(),
        "forecast checked"
    );
    if let Some(path) = &args.output {
        write_table(path, forecast_frame(&points))?;
    }
    Ok(AlertsResult {
        points,
        alerts,
        output: args.output.clone(),
    })
}

pub fn run_level(args: &LevelArgs) -> Result<LevelResult> {
    let hospital = load_forecast(&args.hospital)?;
    let community = load_forecast(&args.community)?;
    let level = alert_level(&hospital, &community, args.month);
    let month = args
        .month
        .or_else(|| hospital.iter().map(|point| point.period).max());
    let (hospital_alert, community_alert) = month.map_or((false, false), |month| {
        (alert_at(&hospital, month), alert_at(&community, month))
    });
    info!(
        level = level.value(),
        month = %month.map_or_else(|| "-".to_string(), |key| key.to_string()),
        hospital_alert,
        community_alert,
        "alert level evaluated"
    );
    Ok(LevelResult {
        level,
        month,
        hospital_alert,
        community_alert,
    })
}

pub fn run_accuracy(args: &AccuracyArgs) -> Result<AccuracyResult> {
    let points = load_forecast(&args.forecast)?;
    let years = accuracy_by_year(&points, &args.years);
    if years.is_empty() {
        warn!(requested = ?args.years, "no year has observed and expected values");
    }
    let mean = mean_accuracy(&years, &args.mean_years);
    if let Some(path) = &args.output {
        write_table(path, accuracy_frame(&years))?;
    }
    Ok(AccuracyResult {
        years,
        mean,
        output: args.output.clone(),
    })
}

pub fn run_correlate(args: &CorrelateArgs) -> Result<CorrelationResult> {
    let columns = read_numeric_columns(&args.table, &args.columns)
        .with_context(|| format!("read columns from {}", args.table.display()))?;
    let matrix = correlation_matrix(&columns);
    info!(columns = matrix.names.len(), "correlation matrix built");
    if let Some(path) = &args.output {
        write_table(path, matrix.to_frame())?;
    }
    Ok(CorrelationResult {
        matrix,
        output: args.output.clone(),
    })
}
