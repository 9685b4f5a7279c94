//! Whole-report susceptibility panels and resistance lookups.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use mdro_model::{Judgment, Panel, ResistanceMarker};

use super::report::{is_esbl_positive_line, tabular_judgment};

static PANEL_START_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)항생제 감수성결과\s*(.*)").expect("Invalid panel regex"));

static IDENTIFICATION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)동정결과:\s*[^;]+?(?:;|\z)\s*").expect("Invalid identification regex")
});

static COLON_JUDGMENT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Za-z/\- \t]+)\s*:\s*[^()\n]*?\(([SIR+])\)").expect("Invalid judgment regex")
});

static ESBL_COLON_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"ESBL\s*:\s*(?:Pos\s*)?\(\+\)").expect("Invalid ESBL regex")
});

static MARKER_PATTERNS: LazyLock<BTreeMap<ResistanceMarker, Regex>> = LazyLock::new(|| {
    ResistanceMarker::ALL
        .into_iter()
        .map(|marker| {
            let pattern = resistance_pattern(marker.antibiotic())
                .expect("Invalid resistance marker regex");
            (marker, pattern)
        })
        .collect()
});

fn resistance_pattern(antibiotic: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(r"{}\s+\S+\s+\(R\)", regex::escape(antibiotic)))
}

/// Parse the susceptibility panel of a full report.
///
/// Reads the text after the `항생제 감수성결과` header, or the whole report
/// with identification lines removed when there is no header. Both the
/// tabular `<antibiotic> <value> (<S|I|R>)` layout and the
/// `<antibiotic> : ... (<S|I|R>)` layout are recognized.
pub fn parse_panel(text: &str) -> Panel {
    let target = match PANEL_START_REGEX.captures(text).and_then(|c| c.get(1)) {
        Some(rest) => rest.as_str().trim().to_string(),
        None => IDENTIFICATION_REGEX.replace_all(text, "").trim().to_string(),
    };
    let mut panel = Panel::default();
    if target.is_empty() {
        return panel;
    }

    for line in target.lines() {
        if is_esbl_positive_line(line) {
            panel.esbl_positive = true;
        } else if let Some((antibiotic, judgment)) = tabular_judgment(line) {
            panel.judgments.insert(antibiotic, judgment);
        }
    }
    for captures in COLON_JUDGMENT_REGEX.captures_iter(&target) {
        let (Some(antibiotic), Some(code)) = (captures.get(1), captures.get(2)) else {
            continue;
        };
        let antibiotic = antibiotic.as_str().trim();
        let judgment = code.as_str().chars().next().and_then(Judgment::from_code);
        if let (false, Some(judgment)) = (antibiotic.is_empty(), judgment) {
            panel.judgments.insert(antibiotic.to_string(), judgment);
        }
    }
    if ESBL_COLON_REGEX.is_match(&target) {
        panel.esbl_positive = true;
    }
    panel
}

/// True when `text` reports `antibiotic` as resistant: the name, one value
/// token, then `(R)`.
pub fn reports_resistance(text: &str, antibiotic: &str) -> bool {
    resistance_pattern(antibiotic)
        .map(|pattern| pattern.is_match(text))
        .unwrap_or(false)
}

/// [`reports_resistance`] for a marker's antibiotic, with a cached pattern.
pub fn marker_reported(text: &str, marker: ResistanceMarker) -> bool {
    MARKER_PATTERNS
        .get(&marker)
        .is_some_and(|pattern| pattern.is_match(text))
}
