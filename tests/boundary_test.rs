//! Boundary Tests for sheetvoice
//!
//! This module exercises edge cases of classification, reduction and assembly
//! through the public API, using in-memory worksheets.

use serde_json::json;
use sheetvoice::{
    reduce, CompilerBuilder, MemorySource, RowRecord, RowSource, SheetType, SheetVoiceError,
    Worksheet,
};

fn row(cells: &[(&str, &str)]) -> RowRecord {
    cells.iter().copied().collect()
}

#[test]
fn test_empty_source() {
    let compiler = CompilerBuilder::new().build().unwrap();
    let aggregate = compiler.compile_aggregate(&MemorySource::new("")).unwrap();

    assert_eq!(aggregate.locale, "en-US");
    assert_eq!(aggregate.keys().collect::<Vec<_>>(), vec!["invocations"]);
}

#[test]
fn test_only_unclassified_worksheets() {
    let source = MemorySource::new("Room Booker")
        .with_worksheet(Worksheet::new("Notes", vec![row(&[("text", "hello")])]))
        .with_worksheet(Worksheet::new("Sheet1", Vec::new()));
    let compiler = CompilerBuilder::new().build().unwrap();
    let aggregate = compiler.compile_aggregate(&source).unwrap();
    assert_eq!(aggregate.keys().collect::<Vec<_>>(), vec!["invocations"]);
}

#[test]
fn test_classifier_table_order_breaks_ties() {
    assert_eq!(SheetType::classify("LIST_OF_INTENT_TYPES", &[]), SheetType::Slots);
    assert_eq!(SheetType::classify("UTTERANCES_BookRoom", &[]), SheetType::Utterances);
    assert_eq!(SheetType::classify("INTENT", &["INTENT".to_string()]), SheetType::Intents);
    assert_eq!(SheetType::classify("intent", &[]), SheetType::Ignored);
}

#[test]
fn test_slot_sheet_without_value_column() {
    let worksheet = Worksheet::new(
        "LIST_OF_ROOMS",
        vec![row(&[("rooms", "Main Hall"), ("synonym", "hall")])],
    );
    let fragment = reduce(SheetType::Slots, &worksheet);
    assert_eq!(fragment.get("slots").unwrap(), &json!({"LIST_OF_ROOMS": {}}));
}

#[test]
fn test_alternate_response_before_primary() {
    let worksheet = Worksheet::new(
        "LIST_OF_ROOMS",
        vec![
            row(&[("listofrooms", "Lobby"), ("synonym", "lobby"), ("response-greeting-alternate1", "Hi")]),
            row(&[("listofrooms", "Foyer"), ("synonym", "lobby"), ("response-greeting", "Hello")]),
        ],
    );
    let fragment = reduce(SheetType::Slots, &worksheet);
    assert_eq!(
        fragment.get("responses").unwrap(),
        &json!({"ROOMS": {"lobby": {"greeting": ["Hello", "Hi"]}}})
    );
}

#[test]
fn test_intent_arrays_concatenate_across_worksheets() {
    let worksheets = vec![
        Worksheet::new("INTENT", vec![row(&[("intent", "BookRoom")])]),
        Worksheet::new("INTENT_EXTRA", vec![row(&[("intent", "CancelRoom")])]),
    ];
    let compiler = CompilerBuilder::new().build().unwrap();
    let aggregate = compiler.compile_worksheets("Room Booker", &worksheets);

    let names: Vec<String> = aggregate
        .intents()
        .unwrap()
        .into_iter()
        .map(|intent| intent.name)
        .collect();
    assert_eq!(names, vec!["BookRoom", "CancelRoom"]);
}

#[test]
fn test_intent_rows_without_name_are_dropped() {
    let worksheet = Worksheet::new(
        "INTENT",
        vec![
            row(&[("intent", "  "), ("slotname", "orphan")]),
            row(&[("intent", "")]),
        ],
    );
    let fragment = reduce(SheetType::Intents, &worksheet);
    assert_eq!(fragment.get("intents").unwrap(), &json!([]));
}

#[test]
fn test_utterances_header_only() {
    let worksheet = Worksheet::new(
        "UTTERANCES_Stop",
        vec![row(&[("stopintent", "StopIntent")])],
    );
    let fragment = reduce(SheetType::Utterances, &worksheet);
    assert_eq!(fragment.get("utterances").unwrap(), &json!({"StopIntent": []}));
}

#[test]
fn test_other_sheet_with_header_only() {
    let worksheet = Worksheet::new("FAQ", vec![row(&[("question", "Question")])]);
    let fragment = reduce(SheetType::Other, &worksheet);
    assert_eq!(fragment.get("others").unwrap(), &json!({"FAQ": []}));
}

#[test]
fn test_locale_settings_without_locale_suffix() {
    let worksheet = Worksheet::new(
        "SKILL_LOCALE_INFORMATION-",
        vec![row(&[("key", "publishingInformation.locales.name"), ("value", "Room Booker")])],
    );
    let fragment = reduce(SheetType::SkillLocaleSettings, &worksheet);
    assert_eq!(
        fragment.get("manifest").unwrap(),
        &json!({"publishingInformation": {"locales": {"name": "Room Booker"}}})
    );
}

#[test]
fn test_environment_filters() {
    let source = MemorySource::new("Room Booker")
        .with_worksheet(Worksheet::new(
            "INTENT",
            vec![
                row(&[("intent", "BookRoom"), ("environment", "production")]),
                row(&[("intent", "DebugIntent"), ("environment", "staging")]),
                row(&[("intent", "HelpIntent")]),
            ],
        ))
        .with_worksheet(Worksheet::new(
            "INVOCATION_NAMES",
            vec![
                row(&[("invocationname", "room booker"), ("environment", "production")]),
                row(&[("invocationname", "room booker dev"), ("environment", "staging")]),
            ],
        ));
    let compiler = CompilerBuilder::new().build().unwrap();
    let schema = compiler.compile(&source).unwrap();

    let production: Vec<String> = schema
        .intents_for_environment("production")
        .unwrap()
        .into_iter()
        .map(|intent| intent.name)
        .collect();
    assert_eq!(production, vec!["BookRoom", "HelpIntent"]);

    let staging = schema.invocations_for_environment("staging").unwrap();
    assert_eq!(staging.len(), 1);
    assert_eq!(staging[0].invocation_name, "room booker dev");
}

struct FlakySource {
    inner: MemorySource,
    broken: &'static str,
}

impl RowSource for FlakySource {
    fn title(&self) -> &str {
        self.inner.title()
    }

    fn worksheet_titles(&self) -> Vec<String> {
        self.inner.worksheet_titles()
    }

    fn fetch_rows(&self, index: usize) -> Result<Vec<RowRecord>, SheetVoiceError> {
        let title = &self.inner.worksheet_titles()[index];
        if title == self.broken {
            return Err(SheetVoiceError::Fetch {
                worksheet: title.clone(),
                message: "connection reset".to_string(),
            });
        }
        self.inner.fetch_rows(index)
    }
}

#[test]
fn test_fetch_failure_aborts_compile() {
    let source = FlakySource {
        inner: MemorySource::new("Room Booker")
            .with_worksheet(Worksheet::new("INTENT", vec![row(&[("intent", "BookRoom")])]))
            .with_worksheet(Worksheet::new("LIST_OF_ROOMS", Vec::new())),
        broken: "LIST_OF_ROOMS",
    };
    let compiler = CompilerBuilder::new().build().unwrap();

    let err = compiler.compile(&source).unwrap_err();
    assert!(matches!(
        err,
        SheetVoiceError::Fetch { ref worksheet, .. } if worksheet == "LIST_OF_ROOMS"
    ));
    assert!(err.to_string().contains("connection reset"));
}

#[test]
fn test_unfetched_worksheets_are_not_requested() {
    // Unclassified worksheets are dropped before fetching
    let source = FlakySource {
        inner: MemorySource::new("Room Booker")
            .with_worksheet(Worksheet::new("INTENT", vec![row(&[("intent", "BookRoom")])]))
            .with_worksheet(Worksheet::new("Scratch", Vec::new())),
        broken: "Scratch",
    };
    let compiler = CompilerBuilder::new().build().unwrap();
    assert!(compiler.compile(&source).is_ok());
}

#[test]
fn test_invalid_builder_settings() {
    let result = CompilerBuilder::new().with_locales(Vec::<String>::new()).build();
    assert!(matches!(result, Err(SheetVoiceError::Config(_))));
}

#[test]
fn test_same_titled_worksheets_both_compile() {
    let worksheets = vec![
        Worksheet::new("INTENT", vec![row(&[("intent", "BookRoom")])]),
        Worksheet::new("INTENT", vec![row(&[("intent", "CancelRoom")])]),
    ];
    let mut source = MemorySource::new("Room Booker");
    for worksheet in &worksheets {
        source.push(worksheet.clone());
    }
    let compiler = CompilerBuilder::new().build().unwrap();

    let fetched = compiler.compile_aggregate(&source).unwrap();
    let names: Vec<String> = fetched
        .intents()
        .unwrap()
        .into_iter()
        .map(|intent| intent.name)
        .collect();
    assert_eq!(names, vec!["BookRoom", "CancelRoom"]);

    let prefetched = compiler.compile_worksheets("Room Booker", &worksheets);
    assert_eq!(fetched.data(), prefetched.data());
}

#[test]
fn test_compiler_settings_and_schema_ownership() {
    let compiler = CompilerBuilder::new()
        .with_other_sheet("FAQ")
        .with_locales(["fr-FR"])
        .build()
        .unwrap();
    assert_eq!(compiler.other_sheets(), ["FAQ"]);
    assert_eq!(compiler.locales(), ["fr-FR"]);

    let source = MemorySource::new("Room Booker").with_worksheet(Worksheet::new(
        "FAQ",
        vec![row(&[("question", "Question")]), row(&[("question", "How?")])],
    ));
    let schema = compiler.compile(&source).unwrap();
    let aggregate = schema.into_schema();

    assert_eq!(aggregate.locale, "fr-FR");
    assert_eq!(
        aggregate.data().get("others").unwrap(),
        &json!({"FAQ": [{"question": "How?"}]})
    );
    assert!(aggregate.data().contains_key("invocations"));
}
