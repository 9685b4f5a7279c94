//! Resistance marker columns derived from organism/antibiotic pairs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MdroError;
use crate::organism::OrganismGroup;

/// A resistant call for an antibiotic, restricted to specific organism groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ResistanceMarker {
    /// Vancomycin-resistant Enterococcus
    Evan,
    /// Imipenem-resistant P. aeruginosa
    Pimp,
    /// Meropenem-resistant P. aeruginosa
    Pmem,
    /// Imipenem-resistant A. baumannii
    Aimp,
    /// Meropenem-resistant A. baumannii
    Amem,
    /// Oxacillin-resistant S. aureus
    Oxa,
    /// Vancomycin-resistant S. aureus
    Svan,
    /// Imipenem-resistant Enterobacterales
    Cimp,
    /// Meropenem-resistant Enterobacterales
    Cmem,
    /// Ertapenem-resistant Enterobacterales
    Cetp,
}

impl ResistanceMarker {
    pub const ALL: [ResistanceMarker; 10] = [
        ResistanceMarker::Evan,
        ResistanceMarker::Pimp,
        ResistanceMarker::Pmem,
        ResistanceMarker::Aimp,
        ResistanceMarker::Amem,
        ResistanceMarker::Oxa,
        ResistanceMarker::Svan,
        ResistanceMarker::Cimp,
        ResistanceMarker::Cmem,
        ResistanceMarker::Cetp,
    ];

    /// Column name in isolate tables.
    pub fn column(self) -> &'static str {
        match self {
            ResistanceMarker::Evan => "EVAN(R)",
            ResistanceMarker::Pimp => "PIMP(R)",
            ResistanceMarker::Pmem => "PMEM(R)",
            ResistanceMarker::Aimp => "AIMP(R)",
            ResistanceMarker::Amem => "AMEM(R)",
            ResistanceMarker::Oxa => "OXA(R)",
            ResistanceMarker::Svan => "SVAN(R)",
            ResistanceMarker::Cimp => "CIMP(R)",
            ResistanceMarker::Cmem => "CMEM(R)",
            ResistanceMarker::Cetp => "CETP(R)",
        }
    }

    /// Antibiotic name as it appears in susceptibility panels.
    pub fn antibiotic(self) -> &'static str {
        match self {
            ResistanceMarker::Evan | ResistanceMarker::Svan => "Vancomycin",
            ResistanceMarker::Pimp | ResistanceMarker::Aimp | ResistanceMarker::Cimp => "Imipenem",
            ResistanceMarker::Pmem | ResistanceMarker::Amem | ResistanceMarker::Cmem => "Meropenem",
            ResistanceMarker::Oxa => "Oxacillin",
            ResistanceMarker::Cetp => "Ertapenem",
        }
    }

    /// Organism groups for which the marker is evaluated.
    pub fn groups(self) -> &'static [OrganismGroup] {
        match self {
            ResistanceMarker::Evan => &[OrganismGroup::Efu, OrganismGroup::Efa],
            ResistanceMarker::Pimp | ResistanceMarker::Pmem => &[OrganismGroup::Psa],
            ResistanceMarker::Aimp | ResistanceMarker::Amem => &[OrganismGroup::Aba],
            ResistanceMarker::Oxa | ResistanceMarker::Svan => &[OrganismGroup::Sau],
            ResistanceMarker::Cimp | ResistanceMarker::Cmem | ResistanceMarker::Cetp => {
                &[OrganismGroup::Cre]
            }
        }
    }

    pub fn applies_to(self, group: OrganismGroup) -> bool {
        self.groups().contains(&group)
    }
}

impl fmt::Display for ResistanceMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for ResistanceMarker {
    type Err = MdroError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        ResistanceMarker::ALL
            .into_iter()
            .find(|marker| {
                let column = marker.column();
                column.eq_ignore_ascii_case(trimmed)
                    || column.trim_end_matches("(R)").eq_ignore_ascii_case(trimmed)
            })
            .ok_or_else(|| MdroError::invalid_value("resistance marker", s))
    }
}
