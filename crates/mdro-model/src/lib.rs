//! Data model for microbiology isolate surveillance.
//!
//! Covers parsed culture reports, derived isolate records, the organism
//! groups and resistance markers used as indicator columns, the MDRO
//! indicators built from them, and forecast/alert types.

pub mod error;
pub mod forecast;
pub mod indicator;
pub mod isolate;
pub mod judgment;
pub mod options;
pub mod organism;
pub mod period;
pub mod resistance;

pub use error::{MdroError, Result};
pub use forecast::{Alert, AlertLevel, ForecastPoint};
pub use indicator::{Indicator, SurveillanceClass};
pub use isolate::{Isolate, LabReport};
pub use judgment::{Judgment, Panel, ParsedOrganism, ReportOutcome};
pub use options::{
    BLOOD_SPECIMEN_ALIASES, ColumnNames, PipelineOptions, ResistanceScope, WHOLE_BLOOD,
};
pub use organism::{CRE_SPECIES, OrganismGroup};
pub use period::{Period, PeriodKey};
pub use resistance::ResistanceMarker;
