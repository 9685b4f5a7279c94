//! Tests for surveillance count tables.

mod common;

use std::collections::BTreeMap;

use mdro_model::{Indicator, Period, PeriodKey, PipelineOptions, ResistanceMarker};
use mdro_report::{class_two_report, count_by_period, rate_per_thousand, sentinel_table};

use common::isolate;

const MRSA: &str = "Staphylococcus aureus";
const KLEB: &str = "Klebsiella pneumoniae";

fn sample() -> Vec<mdro_model::Isolate> {
    use ResistanceMarker::{Cetp, Cimp, Evan, Oxa, Svan};
    vec![
        isolate(0, "P1", "Whole Blood", (2023, 1, 5), MRSA, &[Oxa]),
        // Same patient/specimen/month: duplicate of row 0.
        isolate(1, "P1", "Whole Blood", (2023, 1, 20), MRSA, &[Oxa]),
        isolate(2, "P1", "Sputum", (2023, 1, 21), MRSA, &[Oxa, Svan]),
        isolate(3, "P2", "Urine", (2023, 3, 2), "Enterococcus faecium", &[Evan]),
        isolate(4, "P3", "Urine", (2023, 2, 1), KLEB, &[Cimp]),
        isolate(5, "P3", "Urine", (2023, 9, 1), KLEB, &[Cetp]),
        isolate(6, "P4", "Urine", (2024, 1, 1), KLEB, &[Cimp]),
        isolate(7, "P5", "Sputum", (2024, 1, 3), "Escherichia coli", &[]),
    ]
}

#[test]
fn counts_by_month_and_year() {
    let rows = sample();
    let monthly = count_by_period(&rows, Period::Month);
    assert_eq!(monthly.get(&PeriodKey::month(2023, 1)), Some(&3));
    assert_eq!(monthly.len(), 5);
    let yearly = count_by_period(&rows, Period::Year);
    assert_eq!(yearly.get(&PeriodKey::year(2024)), Some(&2));
    assert!(count_by_period(&rows, Period::Whole).is_empty());
}

#[test]
fn sentinel_table_dedupes_monthly_and_fills_zeros() {
    let table = sentinel_table(&sample(), &PipelineOptions::default());
    assert_eq!(table.total_column, "SENTINEL");
    let periods: Vec<String> = table.rows.iter().map(|row| row.period.to_string()).collect();
    assert_eq!(periods, vec!["2023-01", "2023-03"]);
    // VRE, MRPA, MRAB, MRSA
    assert_eq!(table.rows[0].counts, vec![0, 0, 0, 2]);
    assert_eq!(table.rows[0].total, 2);
    assert_eq!(table.rows[1].counts, vec![1, 0, 0, 0]);
    assert_eq!(table.indicator_total(Indicator::Mrsa), 2);
    assert_eq!(table.grand_total(), 3);

    let frame = table.to_frame().expect("frame");
    assert_eq!(frame.width(), 6);
    assert_eq!(frame.height(), 2);
}

#[test]
fn class_two_dedupes_per_year_and_reports_rates() {
    let report = class_two_report(&sample(), &PipelineOptions::default());
    let annual: Vec<(String, Vec<usize>)> = report
        .annual
        .rows
        .iter()
        .map(|row| (row.period.to_string(), row.counts.clone()))
        .collect();
    // CRE, VRSA
    assert_eq!(
        annual,
        vec![
            ("2023".to_string(), vec![1, 1]),
            ("2024".to_string(), vec![1, 0]),
        ]
    );
    // The annual first isolation of P3 falls in February.
    let months: Vec<String> = report
        .monthly
        .rows
        .iter()
        .map(|row| row.period.to_string())
        .collect();
    assert_eq!(months, vec!["2023-01", "2023-02", "2024-01"]);

    let cre_rates = &report.rates[&Indicator::Cre];
    assert_eq!(cre_rates[0].total_isolates, 6);
    assert!((cre_rates[0].per_thousand - 1000.0 / 6.0).abs() < 1e-9);
    assert!((cre_rates[1].per_thousand - 500.0).abs() < 1e-9);

    let frame = report.annual_frame().expect("frame");
    assert!(frame.column("CRE_per_1000").is_ok());
    assert!(frame.column("total_isolates").is_ok());
}

#[test]
fn rate_is_zero_without_isolates() {
    let events = BTreeMap::from([(PeriodKey::year(2022), 3)]);
    let rates = rate_per_thousand(&events, &BTreeMap::new());
    assert_eq!(rates.len(), 1);
    assert_eq!(rates[0].per_thousand, 0.0);
}
