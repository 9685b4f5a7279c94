use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use mdro_model::AlertLevel;
use mdro_report::CountTable;

use mdro_cli::types::{
    AccuracyResult, AlertsResult, ClassTwoResult, CorrelationResult, IsolateInput, LevelResult,
    OrganismsResult, PreprocessResult, SentinelResult, SpecimensResult, SusceptibilityResult,
};

pub fn print_preprocess(result: &PreprocessResult) {
    println!("Output: {}", result.output.display());
    if let Some(path) = &result.stats_output {
        println!("Stats: {}", path.display());
    }
    let stats = &result.stats;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Stage"), header_cell("Rows")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Input rows"), Cell::new(stats.input_rows)]);
    table.add_row(vec![
        Cell::new("Missing timestamp"),
        count_cell(stats.skipped_missing_timestamp, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Missing patient"),
        count_cell(stats.skipped_missing_patient, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("No growth"),
        dim_cell(stats.no_growth_reports),
    ]);
    table.add_row(vec![
        Cell::new("Unparsed"),
        count_cell(stats.unparsed_reports, Color::Yellow),
    ]);
    table.add_row(vec![
        total_cell("ISOLATES"),
        Cell::new(stats.isolates).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");

    if !stats.group_counts.is_empty() || !stats.marker_counts.is_empty() {
        let mut flags = Table::new();
        flags.set_header(vec![header_cell("Flag"), header_cell("Isolates")]);
        apply_table_style(&mut flags);
        align_column(&mut flags, 1, CellAlignment::Right);
        for (flag, count) in stats.group_counts.iter().chain(&stats.marker_counts) {
            flags.add_row(vec![Cell::new(flag), Cell::new(count)]);
        }
        println!("{flags}");
    }

    if !result.files_skipped.is_empty() {
        eprintln!("Skipped files:");
        for (path, reason) in &result.files_skipped {
            eprintln!("- {}: {reason}", path.display());
        }
    }
}

pub fn print_sentinel(result: &SentinelResult) {
    print_input(&result.input);
    println!("Output: {}", result.output.display());
    println!("{}", count_table(&result.table));
}

pub fn print_class_two(result: &ClassTwoResult) {
    print_input(&result.input);
    println!("Output: {}", result.output.display());
    println!("Monthly: {}", result.monthly_output.display());
    println!("{}", count_table(&result.report.annual));

    let mut rates = Table::new();
    rates.set_header(vec![
        header_cell("Indicator"),
        header_cell("Year"),
        header_cell("First isolations"),
        header_cell("Isolates"),
        header_cell("Per 1000"),
    ]);
    apply_table_style(&mut rates);
    for idx in 2..5 {
        align_column(&mut rates, idx, CellAlignment::Right);
    }
    for (indicator, years) in &result.report.rates {
        for rate in years {
            rates.add_row(vec![
                indicator_cell(indicator.code()),
                Cell::new(rate.year),
                Cell::new(rate.first_isolations),
                Cell::new(rate.total_isolates),
                Cell::new(format!("{:.2}", rate.per_thousand)),
            ]);
        }
    }
    println!("{rates}");
}

pub fn print_organisms(result: &OrganismsResult) {
    print_input(&result.input);
    println!("Output: {}", result.output.display());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Organism"),
        header_cell("Isolates"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for (rank, organism) in result.organisms.iter().enumerate() {
        table.add_row(vec![
            dim_cell(rank + 1),
            Cell::new(&organism.organism),
            Cell::new(organism.count),
        ]);
    }
    println!("{table}");
}

pub fn print_specimens(result: &SpecimensResult) {
    print_input(&result.input);
    println!("Output: {}", result.output.display());
    println!("Totals: {}", result.totals_output.display());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Year"),
        header_cell("Organism"),
        header_cell("Isolates"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for row in &result.totals {
        table.add_row(vec![
            Cell::new(row.year),
            Cell::new(&row.organism),
            Cell::new(row.count),
        ]);
    }
    println!("{table}");
}

pub fn print_susceptibility(result: &SusceptibilityResult) {
    print_input(&result.input);
    let summary = &result.summary;
    println!("Organism: {} ({} first isolations)", summary.organism, summary.isolates);
    println!("Output: {}", result.output.display());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Antibiotic"),
        header_cell("S"),
        header_cell("I"),
        header_cell("R"),
        header_cell("Total"),
        header_cell("R %"),
    ]);
    apply_summary_table_style(&mut table);
    for idx in 1..6 {
        align_column(&mut table, idx, CellAlignment::Right);
    }
    for row in &summary.rows {
        let tested = row.susceptible + row.intermediate + row.resistant;
        let resistant_pct = if tested == 0 {
            dim_cell("-")
        } else {
            Cell::new(format!("{:.1}", row.resistant_pct))
        };
        table.add_row(vec![
            Cell::new(&row.antibiotic),
            count_cell(row.susceptible, Color::Green),
            count_cell(row.intermediate, Color::Yellow),
            count_cell(row.resistant, Color::Red),
            Cell::new(row.total),
            resistant_pct,
        ]);
    }
    println!("{table}");
}

pub fn print_alerts(result: &AlertsResult) {
    if let Some(path) = &result.output {
        println!("Output: {}", path.display());
    }
    println!(
        "Periods: {}, alerts: {}",
        result.points.len(),
        result.alerts.len()
    );
    for alert in &result.alerts {
        println!("{}", mdro_report::alert_message(alert));
    }
}

pub fn print_level(result: &LevelResult) {
    let month = result
        .month
        .map_or_else(|| "-".to_string(), |month| month.to_string());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Month"),
        header_cell("Hospital"),
        header_cell("Community"),
        header_cell("Level"),
        header_cell("Meaning"),
    ]);
    apply_table_style(&mut table);
    table.add_row(vec![
        Cell::new(month),
        flag_cell(result.hospital_alert),
        flag_cell(result.community_alert),
        level_cell(result.level),
        Cell::new(result.level.description()),
    ]);
    println!("{table}");
}

pub fn print_accuracy(result: &AccuracyResult) {
    if let Some(path) = &result.output {
        println!("Output: {}", path.display());
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Year"),
        header_cell("Points"),
        header_cell("MAE"),
        header_cell("RMSE"),
        header_cell("MAPE %"),
    ]);
    apply_summary_table_style(&mut table);
    for idx in 1..5 {
        align_column(&mut table, idx, CellAlignment::Right);
    }
    for row in &result.years {
        table.add_row(vec![
            Cell::new(row.year),
            Cell::new(row.points),
            metric_cell(row.mae),
            metric_cell(row.rmse),
            metric_cell(row.mape),
        ]);
    }
    if let Some(mean) = &result.mean {
        table.add_row(vec![
            total_cell("MEAN"),
            dim_cell(mean.years.len()),
            metric_cell(mean.mae).add_attribute(Attribute::Bold),
            metric_cell(mean.rmse).add_attribute(Attribute::Bold),
            metric_cell(mean.mape).add_attribute(Attribute::Bold),
        ]);
    }
    println!("{table}");
}

pub fn print_correlation(result: &CorrelationResult) {
    if let Some(path) = &result.output {
        println!("Output: {}", path.display());
    }
    let matrix = &result.matrix;
    let mut table = Table::new();
    let mut header = vec![header_cell("")];
    header.extend(matrix.names.iter().map(|name| header_cell(name)));
    table.set_header(header);
    apply_table_style(&mut table);
    for idx in 1..=matrix.names.len() {
        align_column(&mut table, idx, CellAlignment::Right);
    }
    for (name, values) in matrix.names.iter().zip(&matrix.values) {
        let mut row = vec![header_cell(name)];
        row.extend(values.iter().map(|value| metric_cell(*value)));
        table.add_row(row);
    }
    println!("{table}");
}

fn print_input(input: &IsolateInput) {
    if input.skipped > 0 {
        eprintln!(
            "warning: {} isolate rows skipped ({} used)",
            input.skipped, input.isolates
        );
    }
}

fn count_table(counts: &CountTable) -> Table {
    let mut table = Table::new();
    let mut header = vec![header_cell("Period")];
    header.extend(
        counts
            .indicators
            .iter()
            .map(|indicator| header_cell(indicator.code())),
    );
    header.push(header_cell(&counts.total_column));
    table.set_header(header);
    apply_summary_table_style(&mut table);
    for idx in 1..=counts.indicators.len() + 1 {
        align_column(&mut table, idx, CellAlignment::Right);
    }
    for row in &counts.rows {
        let mut cells = vec![Cell::new(row.period)];
        cells.extend(row.counts.iter().map(|count| count_cell(*count, Color::Red)));
        cells.push(Cell::new(row.total).add_attribute(Attribute::Bold));
        table.add_row(cells);
    }
    let mut totals = vec![total_cell("TOTAL")];
    totals.extend(counts.indicators.iter().map(|indicator| {
        Cell::new(counts.indicator_total(*indicator)).add_attribute(Attribute::Bold)
    }));
    totals.push(Cell::new(counts.grand_total()).add_attribute(Attribute::Bold));
    table.add_row(totals);
    table
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn total_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn indicator_cell(code: &str) -> Cell {
    Cell::new(code)
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color)
    } else {
        dim_cell(count)
    }
}

fn metric_cell(value: f64) -> Cell {
    if value.is_nan() {
        dim_cell("-")
    } else {
        Cell::new(format!("{value:.3}"))
    }
}

fn flag_cell(alert: bool) -> Cell {
    if alert {
        Cell::new("ALERT")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold)
    } else {
        dim_cell("-")
    }
}

fn level_cell(level: AlertLevel) -> Cell {
    let color = match level {
        AlertLevel::Stable => Color::Green,
        AlertLevel::Watch => Color::Yellow,
        AlertLevel::CautionMinor | AlertLevel::CautionElevated => Color::DarkYellow,
        AlertLevel::Alarm => Color::Red,
    };
    Cell::new(level.to_string())
        .fg(color)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
