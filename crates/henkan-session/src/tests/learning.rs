use henkan_core::dict::{DictError, DictSlot, Pos, Word};

use super::{drain, make_engine, NOUN};

fn noun(reading: &str, surface: &str) -> Word {
    Word::new(reading, surface, NOUN, 0)
}

#[test]
fn test_link_prediction_after_learning() {
    let mut engine = make_engine();
    engine.learn_word(&noun("きょう", "今日")).unwrap();
    engine.learn_word(&noun("てんき", "天気")).unwrap();
    engine.learn_word(&noun("きょう", "今日")).unwrap();

    assert_eq!(engine.predict("", 0, None), 1);
    assert_eq!(drain(&mut engine), vec!["天気"]);
}

#[test]
fn test_break_sequence_drops_link_context() {
    let mut engine = make_engine();
    engine.learn_word(&noun("きょう", "今日")).unwrap();
    engine.learn_word(&noun("てんき", "天気")).unwrap();
    engine.learn_word(&noun("きょう", "今日")).unwrap();
    engine.break_sequence();
    assert!(engine.previous_word().is_none());
    assert_eq!(engine.predict("", 0, None), 0);
}

#[test]
fn test_learned_word_ranks_first() {
    let mut engine = make_engine();
    engine.learn_word(&noun("きょう", "京")).unwrap();
    engine.predict("きょう", 0, None);
    assert_eq!(engine.next_candidate().map(|w| w.surface), Some("京".to_string()));
}

#[test]
fn test_learning_invalidates_cached_conversion() {
    let mut engine = make_engine();
    engine.convert("きょう", 0);
    assert_eq!(engine.next_candidate().map(|w| w.surface), Some("今日".to_string()));

    engine.learn_word(&noun("きょう", "京")).unwrap();
    engine.convert("きょう", 0);
    let word = engine.next_candidate().unwrap();
    assert_eq!(word.surface, "京");
    assert_eq!(word.frequency, 600 - 1000);
}

#[test]
fn test_terminal_class_gets_default_pos() {
    let mut engine = make_engine();
    engine
        .learn_word(&Word::new("ぬ", "ヌ", Pos::new(0, 0), 0))
        .unwrap();
    assert_eq!(engine.previous_word().map(|w| w.pos), Some(NOUN));
}

#[test]
fn test_invalid_word_keeps_context() {
    let mut engine = make_engine();
    engine.learn_word(&noun("きょう", "今日")).unwrap();
    let err = engine.learn_word(&noun("きょう", "")).unwrap_err();
    assert!(matches!(err, DictError::InvalidWord(_)));
    assert_eq!(
        engine.previous_word().map(|w| w.surface.as_str()),
        Some("今日")
    );
}

#[test]
fn test_learn_sentence() {
    let mut engine = make_engine();
    engine.convert("きょうはいいてんきね", 0);
    let sentence = engine.state().sentence().cloned().unwrap();
    engine.learn_sentence(&sentence).unwrap();

    // 今日 は 良い 天気 ね
    assert_eq!(engine.dictionary().word_count(DictSlot::Learn), 5);
    assert_eq!(
        engine.previous_word().map(|w| w.surface.as_str()),
        Some("ね")
    );
}

#[test]
fn test_user_words() {
    let mut engine = make_engine();
    let word = noun("ぬま", "沼");
    engine.convert("ぬま", 0);
    assert_eq!(engine.next_candidate().map(|w| w.surface), Some("ぬま".to_string()));

    engine.add_user_word(&word).unwrap();
    assert!(matches!(
        engine.add_user_word(&word),
        Err(DictError::DuplicateWord { .. })
    ));
    engine.convert("ぬま", 0);
    assert_eq!(engine.next_candidate().map(|w| w.surface), Some("沼".to_string()));

    engine.remove_user_word(&word).unwrap();
    engine.convert("ぬま", 0);
    assert_eq!(engine.next_candidate().map(|w| w.surface), Some("ぬま".to_string()));

    engine.add_user_word(&word).unwrap();
    engine.clear_user_dictionary();
    assert!(engine.dictionary().user_words().is_empty());
}

#[test]
fn test_clear_learn_dictionary() {
    let mut engine = make_engine();
    engine.learn_word(&noun("きょう", "京")).unwrap();
    engine.clear_learn_dictionary();
    assert!(engine.previous_word().is_none());
    assert_eq!(engine.dictionary().word_count(DictSlot::Learn), 0);
    engine.predict("きょう", 0, None);
    assert_eq!(engine.next_candidate().map(|w| w.surface), Some("今日".to_string()));
}
