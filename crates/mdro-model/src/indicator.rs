//! Multidrug-resistant organism indicators reported to surveillance.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MdroError;
use crate::period::Period;
use crate::resistance::ResistanceMarker;

/// Reporting class an indicator belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SurveillanceClass {
    /// Sentinel surveillance, counted monthly.
    Sentinel,
    /// Class-two notifiable infections, counted annually.
    ClassTwo,
}

impl SurveillanceClass {
    /// Name of the total column in combined count tables.
    pub fn total_column(self) -> &'static str {
        match self {
            SurveillanceClass::Sentinel => "SENTINEL",
            SurveillanceClass::ClassTwo => "CLASS_TWO",
        }
    }

    /// Bucket used for first-isolation deduplication unless configured otherwise.
    pub fn default_period(self) -> Period {
        match self {
            SurveillanceClass::Sentinel => Period::Month,
            SurveillanceClass::ClassTwo => Period::Year,
        }
    }

    pub fn indicators(self) -> &'static [Indicator] {
        match self {
            SurveillanceClass::Sentinel => &Indicator::SENTINEL,
            SurveillanceClass::ClassTwo => &Indicator::CLASS_TWO,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Indicator {
    /// Vancomycin-resistant Enterococcus
    Vre,
    /// Multidrug-resistant Pseudomonas aeruginosa
    Mrpa,
    /// Multidrug-resistant Acinetobacter baumannii
    Mrab,
    /// Methicillin-resistant Staphylococcus aureus
    Mrsa,
    /// Carbapenem-resistant Enterobacterales
    Cre,
    /// Vancomycin-resistant Staphylococcus aureus
    Vrsa,
}

impl Indicator {
    pub const ALL: [Indicator; 6] = [
        Indicator::Vre,
        Indicator::Mrpa,
        Indicator::Mrab,
        Indicator::Mrsa,
        Indicator::Cre,
        Indicator::Vrsa,
    ];

    pub const SENTINEL: [Indicator; 4] = [
        Indicator::Vre,
        Indicator::Mrpa,
        Indicator::Mrab,
        Indicator::Mrsa,
    ];

    pub const CLASS_TWO: [Indicator; 2] = [Indicator::Cre, Indicator::Vrsa];

    pub fn code(self) -> &'static str {
        match self {
            Indicator::Vre => "VRE",
            Indicator::Mrpa => "MRPA",
            Indicator::Mrab => "MRAB",
            Indicator::Mrsa => "MRSA",
            Indicator::Cre => "CRE",
            Indicator::Vrsa => "VRSA",
        }
    }

    /// Markers of which any one qualifies an isolate.
    pub fn markers(self) -> &'static [ResistanceMarker] {
        match self {
            Indicator::Vre => &[ResistanceMarker::Evan],
            Indicator::Mrpa => &[ResistanceMarker::Pimp, ResistanceMarker::Pmem],
            Indicator::Mrab => &[ResistanceMarker::Aimp, ResistanceMarker::Amem],
            Indicator::Mrsa => &[ResistanceMarker::Oxa],
            Indicator::Cre => &[
                ResistanceMarker::Cimp,
                ResistanceMarker::Cmem,
                ResistanceMarker::Cetp,
            ],
            Indicator::Vrsa => &[ResistanceMarker::Svan],
        }
    }

    pub fn class(self) -> SurveillanceClass {
        match self {
            Indicator::Vre | Indicator::Mrpa | Indicator::Mrab | Indicator::Mrsa => {
                SurveillanceClass::Sentinel
            }
            Indicator::Cre | Indicator::Vrsa => SurveillanceClass::ClassTwo,
        }
    }

    pub fn default_period(self) -> Period {
        self.class().default_period()
    }

    pub fn is_flagged(self, markers: &BTreeSet<ResistanceMarker>) -> bool {
        self.markers().iter().any(|marker| markers.contains(marker))
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Indicator {
    type Err = MdroError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Indicator::ALL
            .into_iter()
            .find(|indicator| indicator.code().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| MdroError::invalid_value("indicator", s))
    }
}
