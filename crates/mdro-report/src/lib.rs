//! Reporting for isolate surveillance.
//!
//! - **surveillance**: indicator counts per period, rates per 1000 isolates
//! - **organisms**: organism rankings and specimen breakdowns
//! - **susceptibility**: S/I/R statistics for one organism
//! - **alerts**: forecast upper-bound alerts and the combined alert level
//! - **metrics**: forecast accuracy and correlation
//! - **writer**: CSV and JSON output

pub mod alerts;
pub mod metrics;
pub mod organisms;
pub mod surveillance;
pub mod susceptibility;
pub mod writer;

pub use alerts::{
    alert_at, alert_level, alert_message, annotate_alerts, detect_alerts, forecast_frame,
};
pub use metrics::{
    AccuracySummary, CorrelationMatrix, YearAccuracy, accuracy_by_year, accuracy_frame,
    correlation_matrix, mean_accuracy, pearson,
};
pub use organisms::{
    OrganismCount, SpecimenOrganismCount, YearOrganismCount, organism_count_frame,
    specimen_organism_counts, specimen_organism_frame, top_organisms, yearly_organism_frame,
    yearly_organism_totals,
};
pub use surveillance::{
    ClassTwoReport, CountRow, CountTable, YearRate, class_two_report, count_by_period,
    indicator_first_isolations, rate_per_thousand, sentinel_table, surveillance_table,
};
pub use susceptibility::{
    SusceptibilityRow, SusceptibilitySummary, susceptibility_frame, susceptibility_summary,
};
pub use writer::{write_frame_csv, write_json};
