//! Configuration options for report processing.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::indicator::{Indicator, SurveillanceClass};
use crate::period::Period;

/// Blood culture specimen names collapsed into a single specimen type.
pub const BLOOD_SPECIMEN_ALIASES: &[&str] = &[
    "Whole Blood(C line)",
    "Whole Blood(Cath)",
    "Whole Blood(Chemoport)",
    "Whole Blood(PICC1)",
    "Whole Blood(PICC2)",
    "Whole Blood(Peripheral)",
    "Whole Blood(성인)",
    "Whole Blood(소아)",
    "Serum(Blood)",
];

pub const WHOLE_BLOOD: &str = "Whole Blood";

/// Source column names in raw report files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub patient_id: String,
    pub specimen: String,
    /// Timestamp column; the first of this and `performed_at_fallbacks` present is used.
    pub performed_at: String,
    pub performed_at_fallbacks: Vec<String>,
    pub result_text: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            patient_id: "환자번호".to_string(),
            specimen: "검체명(주검체)".to_string(),
            performed_at: "검사시행일시".to_string(),
            performed_at_fallbacks: vec!["검사시행일자".to_string()],
            result_text: "검사결과".to_string(),
        }
    }
}

/// Which text a resistance marker is evaluated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResistanceScope {
    /// Only the identification block of the organism being flagged.
    #[default]
    Organism,
    /// The full report text, including other organisms' panels.
    Report,
}

/// Options controlling preprocessing and first-isolation bucketing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineOptions {
    pub columns: ColumnNames,
    /// Raw specimen name -> canonical specimen name.
    pub specimen_aliases: BTreeMap<String, String>,
    pub resistance_scope: ResistanceScope,
    /// Deduplication bucket for sentinel indicators.
    pub sentinel_period: Period,
    /// Deduplication bucket for class-two indicators.
    pub class_two_period: Period,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        let specimen_aliases = BLOOD_SPECIMEN_ALIASES
            .iter()
            .map(|alias| ((*alias).to_string(), WHOLE_BLOOD.to_string()))
            .collect();
        Self {
            columns: ColumnNames::default(),
            specimen_aliases,
            resistance_scope: ResistanceScope::default(),
            sentinel_period: SurveillanceClass::Sentinel.default_period(),
            class_two_period: SurveillanceClass::ClassTwo.default_period(),
        }
    }
}

impl PipelineOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resistance_scope(mut self, scope: ResistanceScope) -> Self {
        self.resistance_scope = scope;
        self
    }

    pub fn with_specimen_alias(
        mut self,
        raw: impl Into<String>,
        canonical: impl Into<String>,
    ) -> Self {
        self.specimen_aliases.insert(raw.into(), canonical.into());
        self
    }

    /// First-isolation bucket for an indicator.
    pub fn period_for(&self, indicator: Indicator) -> Period {
        match indicator.class() {
            SurveillanceClass::Sentinel => self.sentinel_period,
            SurveillanceClass::ClassTwo => self.class_two_period,
        }
    }
}
