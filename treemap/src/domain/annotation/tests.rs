//! Regression coverage for record annotation.

use rstest::{fixture, rstest};

use super::{
    AnnotationError, DerivedFacts, annotate, annotate_batch, describe, extract_facts,
    girth_to_diameter,
};
use crate::domain::record::{PoiId, RawPoiRecord};

const OAK_BLOB: &str = "Nazwa polska: 'Dąb'\nObwód pnia w cm: 94\nAktualność danych: rok 2020";

fn raw(id: u64, name: &str) -> RawPoiRecord {
    RawPoiRecord {
        id: PoiId::from(id),
        x: 7_500_100.0,
        y: 5_788_200.0,
        name: name.to_owned(),
    }
}

#[fixture]
fn oak() -> RawPoiRecord {
    raw(1, OAK_BLOB)
}

#[rstest]
fn annotation_keeps_the_original_blob(oak: RawPoiRecord) {
    let annotated = annotate(&oak).expect("oak should annotate");
    assert_eq!(annotated.display_name(), "Dąb");
    assert_eq!(annotated.original_name(), OAK_BLOB);
    assert_eq!(annotated.id(), &PoiId::from(1_u64));
    assert_eq!(annotated.position(), oak.position());
}

#[rstest]
#[case("Nazwa polska: \"Klon zwyczajny\"", "Klon zwyczajny")]
#[case("Nazwa polska: Lipa 'Pomnik' drobnolistna", "Lipa Pomnik drobnolistna")]
#[case("Nazwa łacińska: Tilia\nNazwa polska: Lipa", "Lipa")]
#[case("Nazwa polska:  Dąb  ", "Dąb")]
#[case("Nazwa polska: ' Sosna '", "Sosna")]
fn quotes_are_removed_from_names(#[case] blob: &str, #[case] expected: &str) {
    let annotated = annotate(&raw(2, blob)).expect("record should annotate");
    assert_eq!(annotated.display_name(), expected);
}

#[rstest]
#[case("Obwód pnia w cm: 94")]
#[case("Nazwa polska: **Drzewo ukryte")]
#[case("Nazwa polska: '**Drzewo ukryte'")]
#[case("Nazwa polska: ''")]
#[case("Nazwa polska:   **Drzewo ukryte")]
#[case("")]
fn records_without_a_usable_name_are_skipped(#[case] blob: &str) {
    assert!(annotate(&raw(3, blob)).is_none());
}

#[rstest]
fn batches_keep_order_and_drop_skipped_records() {
    let batch = vec![
        raw(1, "Nazwa polska: Wierzba"),
        raw(2, "Wysokość w m: 4"),
        raw(3, "Nazwa polska: Jesion"),
    ];
    let names: Vec<_> = annotate_batch(&batch)
        .iter()
        .map(|record| record.display_name().to_owned())
        .collect();
    assert_eq!(names, ["Wierzba", "Jesion"]);
}

#[rstest]
#[case(94, 30)]
#[case(0, 0)]
#[case(314, 100)]
#[case(5, 2)]
fn girth_converts_to_rounded_diameter(#[case] girth: u32, #[case] diameter: u32) {
    assert_eq!(girth_to_diameter(girth), diameter);
}

#[rstest]
fn facts_are_extracted_independently() {
    let facts = extract_facts("Nazwa polska: Lipa\nWysokość w m: 21").expect("facts should parse");
    assert_eq!(
        facts,
        DerivedFacts {
            height_m: Some(21),
            girth_cm: None,
            data_year: None,
        }
    );
}

#[rstest]
fn oversized_numbers_are_reported() {
    let result = extract_facts("Wysokość w m: 99999999999999999999");
    assert!(matches!(
        result,
        Err(AnnotationError::NumberOutOfRange { field: "height", .. })
    ));
}

#[rstest]
#[case(DerivedFacts::default(), "")]
#[case(DerivedFacts { height_m: Some(12), ..DerivedFacts::default() }, "h 12 m")]
#[case(DerivedFacts { girth_cm: Some(94), ..DerivedFacts::default() }, "𝝓 30 cm")]
#[case(DerivedFacts { data_year: Some(2023), ..DerivedFacts::default() }, "z tego roku")]
#[case(
    DerivedFacts { height_m: Some(12), girth_cm: Some(94), data_year: Some(2016) },
    "7 lat temu, h 12 m, 𝝓 30 cm"
)]
fn summary_joins_present_facts(#[case] facts: DerivedFacts, #[case] expected: &str) {
    assert_eq!(facts.summary(2023), expected);
}

#[rstest]
fn describe_builds_name_and_facts(oak: RawPoiRecord) {
    let annotated = annotate(&oak).expect("oak should annotate");
    let text = describe(&annotated, 2023);
    assert_eq!(text.name, "Dąb");
    assert_eq!(text.facts, "3 lata temu, 𝝓 30 cm");
}

#[rstest]
fn describe_falls_back_to_the_raw_blob_on_bad_numbers() {
    let blob = "Nazwa polska: Topola\nObwód pnia w cm: 123456789012345678901";
    let annotated = annotate(&raw(9, blob)).expect("record should annotate");
    let text = describe(&annotated, 2023);
    assert_eq!(text.name, blob);
    assert!(text.facts.is_empty());
}

#[rstest]
fn non_ascii_digits_leave_the_other_facts_intact() {
    let blob = "Nazwa polska: Lipa\nWysokość w m: １２\nObwód pnia w cm: 94";
    let annotated = annotate(&raw(10, blob)).expect("record should annotate");
    let text = describe(&annotated, 2023);
    assert_eq!(text.name, "Lipa");
    assert_eq!(text.facts, "𝝓 30 cm");
}

#[rstest]
fn describe_falls_back_when_the_name_cannot_be_reread(oak: RawPoiRecord) {
    let mut annotated = annotate(&oak).expect("oak should annotate");
    annotated.original_name = "Obwód pnia w cm: 94".to_owned();
    let text = describe(&annotated, 2023);
    assert_eq!(text.name, "Obwód pnia w cm: 94");
    assert!(text.facts.is_empty());
}
