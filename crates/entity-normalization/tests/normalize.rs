use entity_normalization::{Normalizer, NormalizerConfig, normalize_name};
use proptest::prelude::*;
use serde::Serialize;
use unicode_normalization::UnicodeNormalization;

#[derive(Serialize)]
struct Row {
    input: &'static str,
    normalized: String,
}

#[test]
fn normalization_table_is_stable() {
    let inputs = [
        "Apple Inc.",
        "Apple Inc",
        "BHP Group Ltd",
        "BHP Limited",
        "Microsoft Corporation",
        "Tesla, Inc.",
        "AT&T",
        "Coca-Cola",
        "McDonald's Corp",
        "Siemens AG",
        "Rio Tinto plc",
        "The Co-operative Group",
        "  Acme   Holdings  Pty.  Ltd. ",
        "Inc.",
        "Socie\u{301}te\u{301} Ge\u{301}ne\u{301}rale SA",
        "\u{ff21}\u{ff50}\u{ff50}\u{ff4c}\u{ff45} Inc.",
    ];
    let table: Vec<Row> = inputs
        .into_iter()
        .map(|input| Row {
            input,
            normalized: normalize_name(input),
        })
        .collect();

    insta::assert_json_snapshot!("normalization_table", table);
}

#[test]
fn suffix_vocabulary_round_trips_through_toml_shape() {
    let config = NormalizerConfig::default();
    let json = serde_json::to_value(&config).unwrap();
    let back: NormalizerConfig = serde_json::from_value(json).unwrap();
    assert_eq!(back, config);
    assert!(back.legal_suffixes.iter().any(|s| s == "group"));
}

#[test]
fn partial_config_uses_defaults() {
    let config: NormalizerConfig = serde_json::from_str(r#"{"max_suffix_strips": 2}"#).unwrap();
    assert_eq!(config.max_suffix_strips, Some(2));
    assert_eq!(
        config.legal_suffixes,
        NormalizerConfig::default().legal_suffixes
    );
}

fn name_strategy() -> impl Strategy<Value = String> {
    let word = prop_oneof![
        "[A-Za-z]{1,8}",
        "[0-9]{1,3}",
        Just("Inc.".to_string()),
        Just("Ltd".to_string()),
        Just("Group".to_string()),
        Just("Corp.".to_string()),
        Just("&".to_string()),
        Just("S.A.".to_string()),
    ];
    let sep = prop_oneof![
        Just(" ".to_string()),
        Just(", ".to_string()),
        Just("-".to_string()),
        Just("  ".to_string()),
        Just(". ".to_string()),
    ];
    prop::collection::vec((word, sep), 0..6).prop_map(|parts| {
        parts
            .into_iter()
            .map(|(w, s)| format!("{w}{s}"))
            .collect::<String>()
    })
}

fn accented_name_strategy() -> impl Strategy<Value = String> {
    let word = prop_oneof![
        "[A-Za-z]{1,6}",
        "[A-Za-z\u{c0}-\u{ff}\u{100}-\u{17f}]{1,8}",
        Just("Soci\u{e9}t\u{e9}".to_string()),
        Just("Nestl\u{e9}".to_string()),
        Just("M\u{fc}nchener".to_string()),
        Just("\u{c5}ngstr\u{f6}m".to_string()),
        Just("\u{1ea0}\u{1ead}u".to_string()),
        Just("S.A.".to_string()),
        Just("GmbH".to_string()),
    ];
    prop::collection::vec(word, 0..5).prop_map(|words| words.join(" "))
}

proptest! {
    #[test]
    fn normalize_is_idempotent(raw in name_strategy()) {
        let once = normalize_name(&raw);
        prop_assert_eq!(normalize_name(&once), once);
    }

    #[test]
    fn normalize_is_idempotent_on_any_text(raw in "\\PC{0,30}") {
        let once = normalize_name(&raw);
        prop_assert_eq!(normalize_name(&once), once);
    }

    #[test]
    fn composed_and_decomposed_forms_share_a_key(raw in accented_name_strategy()) {
        let composed: String = raw.nfc().collect();
        let decomposed: String = raw.nfd().collect();
        prop_assert_eq!(normalize_name(&composed), normalize_name(&decomposed));
    }

    #[test]
    fn normalize_is_case_insensitive(raw in name_strategy()) {
        prop_assert_eq!(normalize_name(&raw.to_uppercase()), normalize_name(&raw.to_lowercase()));
    }

    #[test]
    fn normalized_output_has_no_edge_whitespace(raw in "\\PC{0,30}") {
        let out = normalize_name(&raw);
        prop_assert_eq!(out.trim(), out.as_str());
        prop_assert!(!out.contains("  "));
    }

    #[test]
    fn custom_normalizer_never_panics(raw in "\\PC{0,30}") {
        let normalizer = Normalizer::new(&NormalizerConfig::default()).unwrap();
        let _ = normalizer.normalize(&raw);
    }
}
