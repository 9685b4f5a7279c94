//! Susceptibility judgments and parsed report contents.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MdroError;

/// Interpretation reported for one organism/antibiotic pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Judgment {
    Susceptible,
    Intermediate,
    Resistant,
}

impl Judgment {
    pub const ALL: [Judgment; 3] = [
        Judgment::Susceptible,
        Judgment::Intermediate,
        Judgment::Resistant,
    ];

    /// Single-letter code used in laboratory reports.
    pub fn code(self) -> char {
        match self {
            Judgment::Susceptible => 'S',
            Judgment::Intermediate => 'I',
            Judgment::Resistant => 'R',
        }
    }

    pub fn from_code(code: char) -> Option<Self> {
        match code.to_ascii_uppercase() {
            'S' => Some(Judgment::Susceptible),
            'I' => Some(Judgment::Intermediate),
            'R' => Some(Judgment::Resistant),
            _ => None,
        }
    }
}

impl fmt::Display for Judgment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Judgment {
    type Err = MdroError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (Some(code), None) => {
                Self::from_code(code).ok_or_else(|| MdroError::invalid_value("judgment", s))
            }
            _ => Err(MdroError::invalid_value("judgment", s)),
        }
    }
}

/// Antibiotic panel extracted from a report section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Panel {
    /// Judgment per antibiotic name, as written in the report.
    pub judgments: BTreeMap<String, Judgment>,
    /// Whether an extended-spectrum beta-lactamase screen was positive.
    pub esbl_positive: bool,
}

impl Panel {
    pub fn is_empty(&self) -> bool {
        self.judgments.is_empty() && !self.esbl_positive
    }

    pub fn judgment(&self, antibiotic: &str) -> Option<Judgment> {
        self.judgments.get(antibiotic).copied()
    }
}

/// One identified organism and its susceptibility panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedOrganism {
    pub name: String,
    pub panel: Panel,
    /// Report text belonging to this organism's identification block.
    pub block: String,
}

/// Result of parsing one free-text culture report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportOutcome {
    /// The culture produced no growth.
    NoGrowth,
    /// Identified organisms in report order. Empty when nothing parsed.
    Organisms(Vec<ParsedOrganism>),
}

impl ReportOutcome {
    pub fn organisms(&self) -> &[ParsedOrganism] {
        match self {
            ReportOutcome::NoGrowth => &[],
            ReportOutcome::Organisms(list) => list,
        }
    }

    pub fn is_no_growth(&self) -> bool {
        matches!(self, ReportOutcome::NoGrowth)
    }

    pub fn is_unparsed(&self) -> bool {
        matches!(self, ReportOutcome::Organisms(list) if list.is_empty())
    }
}
