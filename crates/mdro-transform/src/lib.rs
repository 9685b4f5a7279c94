//! Report transformation for isolate surveillance.
//!
//! - **datetime**: report timestamp parsing
//! - **specimen**: specimen alias normalization
//! - **parse**: identification blocks and susceptibility panels
//! - **derive**: row expansion and indicator flags
//! - **isolation**: first-isolation deduplication
//! - **frame**: isolate tables as polars frames

pub mod datetime;
pub mod derive;
pub mod frame;
pub mod isolation;
pub mod parse;
pub mod specimen;

pub use datetime::parse_timestamp;
pub use derive::{
    PreparedReports, PreprocessStats, Preprocessed, derive_isolate, organism_groups,
    prepare_reports, preprocess, resistance_markers,
};
pub use frame::{isolate_columns, isolate_frame};
pub use isolation::{IsolationFilter, IsolationKey, first_isolation};
pub use parse::{marker_reported, parse_panel, parse_report, reports_resistance};
pub use specimen::normalize_specimen;
