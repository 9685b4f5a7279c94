//! Tests for mdro-model types.

use std::collections::BTreeSet;

use mdro_model::{
    AlertLevel, ForecastPoint, Indicator, Judgment, MdroError, OrganismGroup, Period, PeriodKey,
    PipelineOptions, ResistanceMarker, ResistanceScope, SurveillanceClass, WHOLE_BLOOD,
};

#[test]
fn judgment_codes_round_trip() {
    for judgment in Judgment::ALL {
        assert_eq!(Judgment::from_code(judgment.code()), Some(judgment));
    }
    assert_eq!("r".parse::<Judgment>().unwrap(), Judgment::Resistant);
    assert!("SR".parse::<Judgment>().is_err());
    assert!("".parse::<Judgment>().is_err());
}

#[test]
fn organism_groups_match_by_substring() {
    assert!(OrganismGroup::Efu.matches("Enterococcus faecium"));
    assert!(!OrganismGroup::Efu.matches("Enterococcus faecalis"));
    assert!(OrganismGroup::Cre.matches("Klebsiella pneumoniae ssp. pneumoniae"));
    assert!(OrganismGroup::Cre.matches("Salmonella Group B"));
    assert!(!OrganismGroup::Cre.matches("Pseudomonas aeruginosa"));
    assert!(OrganismGroup::Sau.matches("Staphylococcus aureus (MRSA)"));
}

#[test]
fn markers_apply_to_their_groups_only() {
    assert!(ResistanceMarker::Evan.applies_to(OrganismGroup::Efa));
    assert!(!ResistanceMarker::Evan.applies_to(OrganismGroup::Sau));
    assert!(ResistanceMarker::Svan.applies_to(OrganismGroup::Sau));
    assert_eq!(ResistanceMarker::Cetp.antibiotic(), "Ertapenem");
    assert_eq!(
        "pmem(r)".parse::<ResistanceMarker>().unwrap(),
        ResistanceMarker::Pmem
    );
    assert_eq!("OXA".parse::<ResistanceMarker>().unwrap(), ResistanceMarker::Oxa);
}

#[test]
fn indicators_flag_on_any_marker() {
    let markers: BTreeSet<_> = [ResistanceMarker::Pmem].into_iter().collect();
    assert!(Indicator::Mrpa.is_flagged(&markers));
    assert!(!Indicator::Mrab.is_flagged(&markers));

    let cre: BTreeSet<_> = [ResistanceMarker::Cetp].into_iter().collect();
    assert!(Indicator::Cre.is_flagged(&cre));
    assert_eq!(Indicator::Cre.class(), SurveillanceClass::ClassTwo);
    assert_eq!(Indicator::Cre.default_period(), Period::Year);
    assert_eq!(Indicator::Vre.default_period(), Period::Month);
}

#[test]
fn default_options_collapse_blood_specimens() {
    let options = PipelineOptions::default();
    assert_eq!(
        options.specimen_aliases.get("Whole Blood(PICC1)").map(String::as_str),
        Some(WHOLE_BLOOD)
    );
    assert_eq!(options.resistance_scope, ResistanceScope::Organism);
    assert_eq!(options.period_for(Indicator::Mrsa), Period::Month);
    assert_eq!(options.period_for(Indicator::Vrsa), Period::Year);
}

#[test]
fn options_deserialize_from_partial_toml() {
    let options: PipelineOptions = toml::from_str(
        r#"
resistance_scope = "report"
sentinel_period = "year"

[columns]
patient_id = "PATIENT"
"#,
    )
    .expect("parse options");
    assert_eq!(options.resistance_scope, ResistanceScope::Report);
    assert_eq!(options.sentinel_period, Period::Year);
    assert_eq!(options.class_two_period, Period::Year);
    assert_eq!(options.columns.patient_id, "PATIENT");
    assert_eq!(options.columns.result_text, "검사결과");
}

#[test]
fn forecast_point_alert_falls_back_to_bounds() {
    let mut point = ForecastPoint::new(PeriodKey::month(2023, 10));
    point.observed = Some(9.0);
    point.upper = Some(7.5);
    assert!(point.is_alert());

    point.alert = Some(false);
    assert!(!point.is_alert());

    let missing = ForecastPoint::new(PeriodKey::month(2023, 11));
    assert!(!missing.is_alert());
}

#[test]
fn invalid_text_reports_field_and_value() {
    let error = "2023-13".parse::<PeriodKey>().expect_err("month out of range");
    let MdroError::InvalidValue { field, value } = &error;
    assert_eq!((field.as_str(), value.as_str()), ("period", "2023-13"));
    assert_eq!(error.to_string(), "invalid period: '2023-13'");
    assert!("fortnight".parse::<Period>().is_err());
}

#[test]
fn alert_levels_are_ordered() {
    assert!(AlertLevel::Alarm > AlertLevel::CautionElevated);
    assert_eq!(AlertLevel::Watch.value(), 2);
    assert_eq!(AlertLevel::Stable.to_string(), "level 1 (stable)");
}

#[test]
fn options_serialize_to_json() {
    let options = PipelineOptions::default();
    let json = serde_json::to_string(&options).expect("serialize options");
    let round: PipelineOptions = serde_json::from_str(&json).expect("deserialize options");
    assert_eq!(round, options);
}
