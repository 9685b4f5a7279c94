//! Identification block parsing.
//!
//! A report lists one `동정결과:` block per identified organism. Each block
//! names the organism on its first line, optionally followed by a growth
//! grade (`, 정도: ...`), and may carry an antibiotic susceptibility table
//! introduced by a `항생제 감수성결과` header and a dashed rule.

use std::sync::LazyLock;

use regex::Regex;

use mdro_model::{Judgment, Panel, ParsedOrganism, ReportOutcome};

/// Marker that opens an identification block.
pub const IDENTIFICATION_MARKER: &str = "동정결과:";

const NO_GROWTH: &str = "No Growth";

static ORGANISM_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)동정결과:\s*([^,\n]+?)(?:,\s*정도:\s*.+?)?\s*(?:\n|$)")
        .expect("Invalid organism regex")
});

static SECTION_HEADER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)항생제 감수성결과\s*\n-+\n").expect("Invalid section header regex")
});

static SECTION_END_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\n\nCOMMENT:|\n\n\(최종보고\)").expect("Invalid section end regex")
});

static TABULAR_LINE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([^:]+?)\s+(?:<=|>=|[<>=])?[\d.]+\s+\(([SIR])\)")
        .expect("Invalid susceptibility line regex")
});

static ESBL_LINE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^ESBL\b.*\(\+\)").expect("Invalid ESBL line regex"));

/// Parse a culture report into its identified organisms.
///
/// Any `No Growth` mention marks the whole report as no growth. Otherwise
/// every identification block with a non-empty organism name yields one
/// [`ParsedOrganism`] in report order; an empty list means nothing parsed.
pub fn parse_report(text: &str) -> ReportOutcome {
    if text.contains(NO_GROWTH) {
        return ReportOutcome::NoGrowth;
    }
    let organisms = identification_blocks(text)
        .into_iter()
        .filter_map(|block| {
            let name = organism_name(block)?;
            Some(ParsedOrganism {
                name,
                panel: block_panel(block),
                block: block.to_string(),
            })
        })
        .collect();
    ReportOutcome::Organisms(organisms)
}

/// Split a report at each identification marker. Text before the first
/// marker is dropped.
pub fn identification_blocks(text: &str) -> Vec<&str> {
    let starts: Vec<usize> = text
        .match_indices(IDENTIFICATION_MARKER)
        .map(|(idx, _)| idx)
        .collect();
    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(text.len());
            &text[start..end]
        })
        .collect()
}

fn organism_name(block: &str) -> Option<String> {
    let captures = ORGANISM_REGEX.captures(block)?;
    let raw = captures.get(1)?.as_str().trim();
    let name = raw.strip_suffix('.').unwrap_or(raw).trim();
    (!name.is_empty()).then(|| name.to_string())
}

/// Body of the susceptibility table in one block, if the block has one.
pub(crate) fn susceptibility_section(block: &str) -> Option<&str> {
    let header = SECTION_HEADER_REGEX.find(block)?;
    let body = &block[header.end()..];
    let end = SECTION_END_REGEX
        .find(body)
        .map_or(body.len(), |found| found.start());
    let section = body[..end].trim();
    (!section.is_empty()).then_some(section)
}

/// Parse one `<antibiotic> <value> (<S|I|R>)` line.
pub(crate) fn tabular_judgment(line: &str) -> Option<(String, Judgment)> {
    let captures = TABULAR_LINE_REGEX.captures(line.trim())?;
    let antibiotic = captures.get(1)?.as_str().trim();
    let judgment = captures
        .get(2)?
        .as_str()
        .chars()
        .next()
        .and_then(Judgment::from_code)?;
    Some((antibiotic.to_string(), judgment))
}

pub(crate) fn is_esbl_positive_line(line: &str) -> bool {
    ESBL_LINE_REGEX.is_match(line.trim())
}

fn block_panel(block: &str) -> Panel {
    let mut panel = Panel::default();
    let Some(section) = susceptibility_section(block) else {
        return panel;
    };
    for line in section.lines() {
        if is_esbl_positive_line(line) {
            panel.esbl_positive = true;
        } else if let Some((antibiotic, judgment)) = tabular_judgment(line) {
            panel.judgments.insert(antibiotic, judgment);
        }
    }
    panel
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn organism_name_drops_grade_and_trailing_period() {
        assert_eq!(
            organism_name("동정결과: Escherichia coli, 정도: Many\n").as_deref(),
            Some("Escherichia coli")
        );
        assert_eq!(
            organism_name("동정결과: Staphylococcus aureus.").as_deref(),
            Some("Staphylococcus aureus")
        );
        assert_eq!(organism_name("동정결과: \n"), None);
    }

    #[test]
    fn section_stops_at_comment() {
        let block = "동정결과: E\n항생제 감수성결과\n-----\nAmikacin <=2 (S)\n\ncomment: see note\nOxacillin 4 (R)";
        assert_eq!(susceptibility_section(block), Some("Amikacin <=2 (S)"));
    }

    #[test]
    fn tabular_line_accepts_comparators() {
        assert_eq!(
            tabular_judgment("Piperacillin/Tazobactam >=128 (R)"),
            Some(("Piperacillin/Tazobactam".to_string(), Judgment::Resistant))
        );
        assert_eq!(
            tabular_judgment("Gentamicin 8 (I)"),
            Some(("Gentamicin".to_string(), Judgment::Intermediate))
        );
        assert_eq!(tabular_judgment("Gentamicin (S)"), None);
    }
}
