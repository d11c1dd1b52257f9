//! Property tests for export and import.

use std::collections::BTreeSet;

use prefport_model::{PreferenceMap, PromptRecord, TypedValue};
use prefport_transfer::{
    DocumentBuilder, MemoryPreferenceStore, MemoryPromptStore, import_document, is_sensitive,
    to_json_bytes,
};
use proptest::prelude::*;

fn typed_value() -> impl Strategy<Value = TypedValue> {
    prop_oneof![
        any::<bool>().prop_map(TypedValue::Boolean),
        any::<i32>().prop_map(TypedValue::Int),
        any::<i64>().prop_map(TypedValue::Long),
        (-1.0e6f32..1.0e6f32).prop_map(TypedValue::Float),
        "\\PC{0,24}".prop_map(TypedValue::String),
        prop::collection::btree_set("[a-z]{0,6}", 0..5).prop_map(TypedValue::StringSet),
    ]
}

fn preference_map() -> impl Strategy<Value = PreferenceMap> {
    prop::collection::btree_map("[a-z_.]{1,24}", typed_value(), 0..12)
}

fn prompt_records() -> impl Strategy<Value = Vec<PromptRecord>> {
    prop::collection::vec(
        ("\\PC{1,16}", "\\PC{1,40}", any::<bool>(), any::<bool>()).prop_map(
            |(name, prompt, requires_selection, auto_apply)| {
                PromptRecord::new_unassigned(name, prompt, requires_selection, auto_apply)
            },
        ),
        0..6,
    )
}

proptest! {
    /// Exporting with secrets and importing restores every key with its type.
    #[test]
    fn prop_round_trip_restores_stores(preferences in preference_map(), prompts in prompt_records()) {
        let (document, report) = DocumentBuilder::new(true).build(&preferences, &prompts);
        prop_assert_eq!(report.preferences, preferences.len());
        let bytes = to_json_bytes(&document).unwrap();

        let mut prefs = MemoryPreferenceStore::default();
        let mut store = MemoryPromptStore::default();
        import_document(&mut prefs, &mut store, &bytes).unwrap();

        prop_assert_eq!(prefs.values(), &preferences);
        let restored = store.records();
        prop_assert_eq!(restored.len(), prompts.len());
        for (restored, original) in restored.iter().zip(&prompts) {
            prop_assert!(restored.same_content(original));
        }
    }

    /// Without secrets no sensitive key reaches the document, and every other
    /// key does.
    #[test]
    fn prop_redaction_drops_only_sensitive_keys(preferences in preference_map(), secret in "\\PC{0,12}") {
        let mut preferences = preferences;
        preferences.insert("net.devemperor.asr.api_key".to_string(), TypedValue::String(secret));
        preferences.insert("vendor.custom_api_key".to_string(), TypedValue::Int(1));

        let (document, report) = DocumentBuilder::new(false).build(&preferences, &[]);

        let kept: BTreeSet<&String> = document.preferences.keys().collect();
        let expected: BTreeSet<&String> =
            preferences.keys().filter(|key| !is_sensitive(key)).collect();
        prop_assert_eq!(kept, expected);
        prop_assert_eq!(
            report.skipped_sensitive,
            preferences.keys().filter(|key| is_sensitive(key)).count()
        );
    }
}
