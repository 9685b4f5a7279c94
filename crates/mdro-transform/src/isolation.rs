//! First-isolation deduplication.
//!
//! A first isolation is the earliest isolate for a patient and specimen
//! within one time bucket, optionally per organism. Later isolates in the
//! same bucket are repeat cultures of the same episode and are dropped.

use std::collections::BTreeMap;

use mdro_model::{Indicator, Isolate, Period, PeriodKey};

/// Which isolates take part in deduplication.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum IsolationFilter {
    #[default]
    All,
    /// Isolates flagged for the indicator (any of its markers).
    Indicator(Indicator),
    /// Isolates whose organism name equals this one exactly.
    Organism(String),
}

impl IsolationFilter {
    pub fn accepts(&self, isolate: &Isolate) -> bool {
        match self {
            IsolationFilter::All => true,
            IsolationFilter::Indicator(indicator) => isolate.is_flagged(*indicator),
            IsolationFilter::Organism(name) => isolate.organism == *name,
        }
    }
}

/// Grouping key: patient × specimen × bucket, optionally × organism.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IsolationKey {
    pub period: Period,
    pub by_organism: bool,
}

impl IsolationKey {
    pub fn new(period: Period) -> Self {
        Self {
            period,
            by_organism: false,
        }
    }

    pub fn by_organism(mut self) -> Self {
        self.by_organism = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct GroupKey<'a> {
    patient_id: &'a str,
    specimen: &'a str,
    organism: Option<&'a str>,
    bucket: Option<PeriodKey>,
}

fn group_key(isolate: &Isolate, key: IsolationKey) -> GroupKey<'_> {
    GroupKey {
        patient_id: &isolate.patient_id,
        specimen: &isolate.specimen,
        organism: key.by_organism.then_some(isolate.organism.as_str()),
        bucket: isolate.bucket(key.period),
    }
}

fn precedes(candidate: &Isolate, current: &Isolate) -> bool {
    (
        candidate.performed_at,
        candidate.source_row,
        candidate.organism.as_str(),
    ) < (
        current.performed_at,
        current.source_row,
        current.organism.as_str(),
    )
}

/// Keep the first isolate per key among those accepted by `filter`.
///
/// The earliest `performed_at` wins; ties go to the lowest source row and
/// then to the organism name. Output is ordered by key.
pub fn first_isolation<'a>(
    isolates: impl IntoIterator<Item = &'a Isolate>,
    filter: &IsolationFilter,
    key: IsolationKey,
) -> Vec<&'a Isolate> {
    let mut firsts: BTreeMap<GroupKey<'a>, &'a Isolate> = BTreeMap::new();
    for isolate in isolates {
        if !filter.accepts(isolate) {
            continue;
        }
        firsts
            .entry(group_key(isolate, key))
            .and_modify(|current| {
                if precedes(isolate, current) {
                    *current = isolate;
                }
            })
            .or_insert(isolate);
    }
    firsts.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::BTreeSet;

    fn isolate(row: usize, patient: &str, day: u32, organism: &str) -> Isolate {
        Isolate {
            source_row: row,
            patient_id: patient.to_string(),
            specimen: "Sputum".to_string(),
            performed_at: NaiveDate::from_ymd_opt(2023, 1, day)
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .expect("date"),
            organism: organism.to_string(),
            groups: BTreeSet::new(),
            markers: BTreeSet::new(),
            result_text: String::new(),
        }
    }

    #[test]
    fn same_timestamp_prefers_lower_row_then_name() {
        let rows = vec![
            isolate(2, "P1", 3, "B"),
            isolate(1, "P1", 3, "Z"),
            isolate(1, "P1", 3, "A"),
        ];
        let firsts = first_isolation(&rows, &IsolationFilter::All, IsolationKey::new(Period::Month));
        assert_eq!(firsts.len(), 1);
        assert_eq!(firsts[0].source_row, 1);
        assert_eq!(firsts[0].organism, "A");
    }

    #[test]
    fn organism_key_separates_organisms() {
        let rows = vec![isolate(0, "P1", 3, "B"), isolate(1, "P1", 4, "A")];
        let key = IsolationKey::new(Period::Whole).by_organism();
        let firsts = first_isolation(&rows, &IsolationFilter::All, key);
        let names: Vec<&str> = firsts.iter().map(|i| i.organism.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
    }
}
