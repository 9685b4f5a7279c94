//! Source table ingestion for isolate surveillance.

pub mod csv_table;
pub mod discovery;
pub mod error;
pub mod forecast;
pub mod isolates;
pub mod reports;
pub mod series;
pub mod values;

pub use csv_table::{CsvTable, cell, read_csv_table};
pub use discovery::{expand_inputs, list_csv_files};
pub use error::{IngestError, Result};
pub use forecast::read_forecast_table;
pub use isolates::{IsolateLoad, read_isolate_table};
pub use values::{parse_f64, parse_flag};
pub use reports::{RawReport, ReportLoad, load_reports, read_report_file};
pub use series::{NumericColumn, read_numeric_columns};
