//! Laboratory reports and the isolate records derived from them.

use std::collections::BTreeSet;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::indicator::Indicator;
use crate::organism::OrganismGroup;
use crate::period::{Period, PeriodKey};
use crate::resistance::ResistanceMarker;

/// Column names of persisted isolate tables.
pub mod columns {
    pub const SOURCE_ROW: &str = "source_row";
    pub const PATIENT_ID: &str = "patient_id";
    pub const SPECIMEN: &str = "specimen";
    pub const PERFORMED_AT: &str = "performed_at";
    pub const ORGANISM: &str = "organism";
    pub const RESULT_TEXT: &str = "result_text";

    /// Timestamp layout of `performed_at`. Fractional seconds are written only
    /// when present.
    pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";
}

/// One culture report row as loaded from a source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabReport {
    /// Zero-based position of the row across all concatenated inputs.
    pub source_row: usize,
    pub patient_id: String,
    /// Specimen type, already normalized.
    pub specimen: String,
    pub performed_at: NaiveDateTime,
    pub result_text: String,
}

/// One identified organism from one report, with derived indicator flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Isolate {
    pub source_row: usize,
    pub patient_id: String,
    pub specimen: String,
    pub performed_at: NaiveDateTime,
    pub organism: String,
    pub groups: BTreeSet<OrganismGroup>,
    pub markers: BTreeSet<ResistanceMarker>,
    pub result_text: String,
}

impl Isolate {
    pub fn in_group(&self, group: OrganismGroup) -> bool {
        self.groups.contains(&group)
    }

    pub fn has_marker(&self, marker: ResistanceMarker) -> bool {
        self.markers.contains(&marker)
    }

    pub fn is_flagged(&self, indicator: Indicator) -> bool {
        indicator.is_flagged(&self.markers)
    }

    pub fn bucket(&self, period: Period) -> Option<PeriodKey> {
        period.bucket_at(self.performed_at)
    }
}
