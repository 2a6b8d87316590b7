use std::sync::Arc;

use henkan_core::candidates::EmojiFilter;
use henkan_core::dict::{DictSlot, Dictionary, MemoryDictionary, Word};
use henkan_core::reading::LanguageProfile;

use super::{drain, make_config, make_engine, make_limits, make_test_dict, NOUN};
use crate::{Engine, EngineState};

#[test]
fn test_predict_exact_then_prefix() {
    let mut engine = make_engine();
    // 今日, 京, 橋 (auxiliary, searched for inputs longer than one unit)
    assert_eq!(engine.predict("きょう", 0, None), 3);
    assert_eq!(engine.state(), &EngineState::Predicting);
    assert_eq!(drain(&mut engine), vec!["今日", "京", "橋", "京都"]);
}

#[test]
fn test_predict_short_input_skips_auxiliary() {
    let mut engine = make_engine();
    engine.predict("き", 0, None);
    let out = drain(&mut engine);
    assert!(out.contains(&"木".to_string()));
    assert!(!out.contains(&"橋".to_string()));
}

#[test]
fn test_predict_max_len_truncates_and_matches_exactly() {
    let mut engine = make_engine();
    assert_eq!(engine.predict("てんきょ", 0, Some(2)), 1);
    assert_eq!(drain(&mut engine), vec!["天"]);
}

#[test]
fn test_predict_min_len() {
    let mut engine = make_engine();
    assert_eq!(engine.predict("き", 2, None), 0);
    assert_eq!(engine.next_candidate(), None);
    assert_eq!(engine.predict("", 1, None), 0);
}

#[test]
fn test_predict_no_match() {
    let mut engine = make_engine();
    assert_eq!(engine.predict("ぬ", 0, None), 0);
    assert_eq!(engine.next_candidate(), None);
}

#[test]
fn test_predict_never_repeats_surface() {
    let mut engine = make_engine();
    engine.predict("ほん", 0, None);
    let out = drain(&mut engine);
    let mut unique = out.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(out.len(), unique.len());
}

#[test]
fn test_convert_yields_sentence_once() {
    let mut engine = make_engine();
    assert_eq!(engine.convert("きょうはいいてんきね", 0), 3);
    assert!(matches!(engine.state(), EngineState::Converting(_)));
    let first = engine.next_candidate().unwrap();
    assert_eq!(first.surface, "今日は良い天気ね");
    assert_eq!(first.reading, "きょうはいいてんきね");
    assert_eq!(engine.next_candidate(), None);
}

#[test]
fn test_convert_with_head_clause() {
    let mut engine = make_engine();
    // Cursor after "きょう": that part becomes one clause on its own.
    assert_eq!(engine.convert("きょうはいい", 3), 3);
    let sentence = engine.state().sentence().cloned().unwrap();
    let surfaces: Vec<String> = sentence.clauses().iter().map(|c| c.surface()).collect();
    assert_eq!(surfaces, vec!["今日", "は", "良い"]);
    // Head clause plus each rest clause, each with its own clause cost.
    let expected: i32 = sentence
        .clauses()
        .iter()
        .map(|c| c.frequency() - 1000)
        .sum();
    assert_eq!(sentence.frequency(), expected);
}

#[test]
fn test_convert_cursor_at_end_is_single_clause() {
    let mut engine = make_engine();
    assert_eq!(engine.convert("ほんを", 3), 1);
    assert_eq!(engine.next_candidate().map(|w| w.surface), Some("本を".to_string()));
}

#[test]
fn test_convert_empty_and_overlong() {
    let mut engine = make_engine();
    assert_eq!(engine.convert("", 0), 0);
    assert_eq!(engine.state(), &EngineState::Idle);
    assert_eq!(engine.next_candidate(), None);
    assert_eq!(engine.convert(&"あ".repeat(51), 0), 0);
}

#[test]
fn test_inactive_dictionary() {
    let mut dict = make_test_dict();
    dict.set_active(false);
    let mut engine = Engine::with_config(
        dict,
        LanguageProfile::japanese(),
        make_config(),
        make_limits(),
    );
    assert_eq!(engine.predict("きょう", 0, None), 0);
    assert_eq!(engine.next_candidate(), None);
    assert_eq!(engine.convert("きょう", 0), 0);
    assert_eq!(engine.make_candidate_list_of(0), 0);
}

#[test]
fn test_filter_rejecting_all_then_removed() {
    let mut engine = make_engine();
    engine.set_filter(Some(Arc::new(|_: &Word| false)));
    assert!(engine.predict("きょう", 0, None) > 0);
    assert_eq!(engine.next_candidate(), None);

    engine.set_filter(None);
    engine.predict("きょう", 0, None);
    assert_eq!(engine.next_candidate().map(|w| w.surface), Some("今日".to_string()));
}

#[test]
fn test_emoji_filter() {
    let mut dict = make_test_dict();
    dict.insert(DictSlot::System, Word::new("えがお", "😊", NOUN, 255));
    dict.insert(DictSlot::System, Word::new("えがお", "笑顔", NOUN, 200));
    let mut engine: Engine<MemoryDictionary> = Engine::with_config(
        dict,
        LanguageProfile::japanese(),
        make_config(),
        make_limits(),
    );
    engine.set_filter(Some(Arc::new(EmojiFilter)));
    engine.predict("えがお", 0, None);
    assert_eq!(drain(&mut engine), vec!["笑顔"]);
}

#[test]
fn test_init_resets_session() {
    let mut engine = make_engine();
    engine.convert("きょう", 0);
    engine
        .learn_word(&Word::new("きょう", "京", NOUN, 0))
        .unwrap();
    engine.init();
    assert_eq!(engine.state(), &EngineState::Idle);
    assert!(engine.previous_word().is_none());
    assert_eq!(engine.next_candidate(), None);
    // Learned data lives in the dictionary and survives init.
    assert_eq!(engine.dictionary().word_count(DictSlot::Learn), 1);
    engine.close();
    assert!(engine.dictionary().is_active());
}
