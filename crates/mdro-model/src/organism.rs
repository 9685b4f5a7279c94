//! Organism groups tracked for antimicrobial resistance surveillance.
//!
//! Group membership is decided by substring match on the identified
//! organism name, so `Klebsiella pneumoniae ssp. pneumoniae` still counts
//! as a carbapenem-resistant Enterobacterales candidate.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MdroError;

/// Enterobacterales species screened for carbapenem resistance.
pub const CRE_SPECIES: &[&str] = &[
    "Escherichia coli",
    "Escherichia hermanii",
    "Escherichia vulneris",
    "Klebsiella aerogenes",
    "Klebsiella ornithinolytica",
    "Klebsiella oxytoca",
    "Klebsiella planticola",
    "Klebsiella pneumoniae",
    "Klebsiella variicola",
    "Enterobacter aerogenes",
    "Enterobacter asburiae",
    "Enterobacter bugandensis",
    "Enterobacter cloacae",
    "Enterobacter gergoviae",
    "Enterobacter kobei",
    "Enterobacter ludwigii",
    "Enterobacter sakazakii",
    "Citrobacter amalonaticus",
    "Citrobacter braakii",
    "Citrobacter farmeri",
    "Citrobacter freundii",
    "Citrobacter sedlakii",
    "Citrobacter youngae",
    "Salmonella Group B",
    "Salmonella Group C",
    "Salmonella Group D",
    "Salmonella species",
    "Proteus hauseri",
    "Proteus mirabilis",
    "Proteus penneri",
    "Proteus vulgaris",
    "Morganella morganii",
    "Providencia rettgeri",
    "Providencia stuartii",
    "Providencia vermicola",
    "Serratia grimesii",
    "Serratia liquefaciens",
    "Serratia marcescens",
    "Serratia nematodiphila",
    "Serratia odorifera",
    "Serratia plymuthica",
    "Serratia rubidaea",
    "Hafnia alvei",
    "Leclercia adecarboxylata",
];

/// Organism groups with a dedicated indicator column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OrganismGroup {
    /// Enterococcus faecium
    Efu,
    /// Enterococcus faecalis
    Efa,
    /// Pseudomonas aeruginosa
    Psa,
    /// Acinetobacter baumannii
    Aba,
    /// Staphylococcus aureus
    Sau,
    /// Carbapenem-resistance screened Enterobacterales
    Cre,
}

impl OrganismGroup {
    pub const ALL: [OrganismGroup; 6] = [
        OrganismGroup::Efu,
        OrganismGroup::Efa,
        OrganismGroup::Psa,
        OrganismGroup::Aba,
        OrganismGroup::Sau,
        OrganismGroup::Cre,
    ];

    /// Column name in isolate tables.
    pub fn code(self) -> &'static str {
        match self {
            OrganismGroup::Efu => "EFU",
            OrganismGroup::Efa => "EFA",
            OrganismGroup::Psa => "PSA",
            OrganismGroup::Aba => "ABA",
            OrganismGroup::Sau => "SAU",
            OrganismGroup::Cre => "CRE",
        }
    }

    /// Species names whose presence in an organism name places it in the group.
    pub fn species(self) -> &'static [&'static str] {
        match self {
            OrganismGroup::Efu => &["Enterococcus faecium"],
            OrganismGroup::Efa => &["Enterococcus faecalis"],
            OrganismGroup::Psa => &["Pseudomonas aeruginosa"],
            OrganismGroup::Aba => &["Acinetobacter baumannii"],
            OrganismGroup::Sau => &["Staphylococcus aureus"],
            OrganismGroup::Cre => CRE_SPECIES,
        }
    }

    pub fn matches(self, organism: &str) -> bool {
        self.species()
            .iter()
            .any(|species| organism.contains(species))
    }
}

impl fmt::Display for OrganismGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for OrganismGroup {
    type Err = MdroError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        OrganismGroup::ALL
            .into_iter()
            .find(|group| group.code().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| MdroError::invalid_value("organism group", s))
    }
}
