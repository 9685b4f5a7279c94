//! Tests for report text parsing.

use mdro_model::{Judgment, ReportOutcome, ResistanceMarker};
use mdro_transform::{marker_reported, parse_panel, parse_report, reports_resistance};

const ECOLI_REPORT: &str = "배양결과 최종\n\
동정결과: Escherichia coli, 정도: Many\n\
항생제 감수성결과\n\
----------------------------------\n\
Amikacin            <=2     (S)\n\
Ertapenem           >=8     (R)\n\
Imipenem            4       (R)\n\
Gentamicin          8       (I)\n\
ESBL                Pos     (+)\n\
\n\
COMMENT: Carbapenemase test recommended\n\
Tigecycline 1 (S)\n";

const MIXED_REPORT: &str = "동정결과: Staphylococcus aureus.\n\
항생제 감수성결과\n\
-------------\n\
Oxacillin >=4 (R)\n\
\n\
(최종보고)\n\
동정결과: Enterococcus faecium, 정도: Few\n\
항생제 감수성결과\n\
-------------\n\
Vancomycin >=32 (R)\n\
Ampicillin 16 (R)\n";

#[test]
fn parses_single_organism_panel() {
    let outcome = parse_report(ECOLI_REPORT);
    let organisms = outcome.organisms();
    assert_eq!(organisms.len(), 1);
    let ecoli = &organisms[0];
    assert_eq!(ecoli.name, "Escherichia coli");
    assert_eq!(ecoli.panel.judgment("Amikacin"), Some(Judgment::Susceptible));
    assert_eq!(ecoli.panel.judgment("Ertapenem"), Some(Judgment::Resistant));
    assert_eq!(ecoli.panel.judgment("Gentamicin"), Some(Judgment::Intermediate));
    assert!(ecoli.panel.esbl_positive);
    // Lines after the comment are outside the panel.
    assert_eq!(ecoli.panel.judgment("Tigecycline"), None);
}

#[test]
fn expands_multiple_identification_blocks() {
    let outcome = parse_report(MIXED_REPORT);
    let names: Vec<&str> = outcome
        .organisms()
        .iter()
        .map(|organism| organism.name.as_str())
        .collect();
    assert_eq!(names, vec!["Staphylococcus aureus", "Enterococcus faecium"]);
    let aureus = &outcome.organisms()[0];
    assert_eq!(aureus.panel.judgments.len(), 1);
    assert!(aureus.block.contains("Oxacillin"));
    assert!(!aureus.block.contains("Vancomycin"));
}

#[test]
fn no_growth_wins_over_blocks() {
    let outcome = parse_report("동정결과: No Growth\n");
    assert_eq!(outcome, ReportOutcome::NoGrowth);
    assert!(parse_report("48hr No Growth").is_no_growth());
}

#[test]
fn unparseable_text_yields_empty_outcome() {
    assert!(parse_report("검체 부적합").is_unparsed());
    assert!(parse_report("").is_unparsed());
    assert!(parse_report("동정결과:   \n").is_unparsed());
}

#[test]
fn later_duplicate_lines_overwrite() {
    let text = "동정결과: Klebsiella pneumoniae\n항생제 감수성결과\n---\nImipenem 1 (S)\nImipenem 8 (R)\n";
    let outcome = parse_report(text);
    assert_eq!(
        outcome.organisms()[0].panel.judgment("Imipenem"),
        Some(Judgment::Resistant)
    );
}

#[test]
fn panel_reads_colon_layout_and_esbl() {
    let panel = parse_panel("동정결과: Escherichia coli; Ampicillin : >=32 (R) Cefazolin : 2 (S) ESBL : Pos (+)");
    assert_eq!(panel.judgment("Ampicillin"), Some(Judgment::Resistant));
    assert_eq!(panel.judgment("Cefazolin"), Some(Judgment::Susceptible));
    assert!(panel.esbl_positive);
}

#[test]
fn panel_reads_tabular_section() {
    let panel = parse_panel(ECOLI_REPORT);
    assert_eq!(panel.judgment("Imipenem"), Some(Judgment::Resistant));
    assert!(panel.esbl_positive);
}

#[test]
fn resistance_requires_value_token_and_r() {
    assert!(reports_resistance("Vancomycin >=32 (R)", "Vancomycin"));
    assert!(!reports_resistance("Vancomycin 1 (S)", "Vancomycin"));
    assert!(!reports_resistance("Vancomycin (R)", "Vancomycin"));
    assert!(reports_resistance("Ampicillin/Sulbactam 32 (R)", "Ampicillin/Sulbactam"));
    assert!(marker_reported(ECOLI_REPORT, ResistanceMarker::Cetp));
    assert!(!marker_reported(ECOLI_REPORT, ResistanceMarker::Cmem));
}
