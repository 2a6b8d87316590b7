use crate::converter::testutil::{
    chinese, japanese, pinyin_dict, test_catalog, test_config, test_dict, END, NOUN, PARTICLE,
};
use crate::converter::{Clause, ClauseConverter};
use crate::dict::{ConnectMatrix, DictSlot, MemoryDictionary, Word};
use crate::reading::{LanguageProfile, Reading};

fn surfaces(clauses: &[Clause]) -> Vec<String> {
    clauses.iter().map(Clause::surface).collect()
}

#[test]
fn test_stem_with_ancillary_best() {
    let dict = test_dict();
    let clauses = japanese().convert_clause(&dict, &Reading::chars("ほんを"), END, false);
    assert_eq!(clauses.len(), 1);
    let clause = &clauses[0];
    assert_eq!(clause.surface(), "本を");
    assert_eq!(clause.stem.surface, "本");
    assert_eq!(clause.ancillary.as_ref().map(|a| a.surface.as_str()), Some("を"));
    let stem = clause.stem.frequency;
    let anc = clause.ancillary.as_ref().map_or(0, |a| a.frequency);
    assert_eq!(clause.frequency(), stem + anc);
    assert_eq!(clause.frequency(), 478 + 500);
    assert_eq!(clause.pos(), crate::dict::Pos::new(NOUN.left, PARTICLE.right));
}

#[test]
fn test_want_all_sorted_with_fallback_last() {
    let dict = test_dict();
    let clauses = japanese().convert_clause(&dict, &Reading::chars("ほんを"), END, true);
    assert_eq!(surfaces(&clauses), vec!["本を", "品を", "ほんを"]);
    assert!(clauses
        .windows(2)
        .all(|w| w[0].frequency() >= w[1].frequency()));
    let fallback = clauses.last().unwrap();
    assert!(fallback.ancillary.is_none());
    assert_eq!(fallback.frequency(), (-1000 - 1) * 3);
    assert_eq!(fallback.stem.pos, NOUN);
}

#[test]
fn test_want_all_ties_keep_discovery_order() {
    let mut dict = test_dict();
    dict.insert(DictSlot::System, Word::new("ほん", "翻", NOUN, 200));
    let clauses = japanese().convert_clause(&dict, &Reading::chars("ほん"), END, true);
    assert_eq!(surfaces(&clauses), vec!["本", "翻", "品", "ほん"]);
}

#[test]
fn test_stem_only() {
    let dict = test_dict();
    let clauses = japanese().convert_clause(&dict, &Reading::chars("きょう"), END, true);
    assert_eq!(surfaces(&clauses), vec!["今日", "京", "きょう"]);
}

#[test]
fn test_best_only_keeps_best_per_class() {
    let dict = test_dict();
    // 木 (system) outranks 樹 (auxiliary band) within the same class.
    let best = japanese().convert_clause(&dict, &Reading::chars("き"), END, false);
    assert_eq!(surfaces(&best), vec!["木"]);
    let all = japanese().convert_clause(&dict, &Reading::chars("き"), END, true);
    assert_eq!(surfaces(&all), vec!["木", "樹", "き"]);
}

#[test]
fn test_ancillary_chain() {
    let dict = test_dict();
    let clauses = japanese().convert_clause(&dict, &Reading::chars("ほんでは"), END, false);
    assert_eq!(surfaces(&clauses), vec!["本では"]);
    let anc = clauses[0].ancillary.as_ref().unwrap();
    assert_eq!(anc.reading, "では");
    assert_eq!(anc.pos, PARTICLE);
    assert_eq!(anc.frequency, 0);
}

#[test]
fn test_terminal_connectivity() {
    let dict = test_dict();
    // 貝 cannot end a clause on its own but can take a particle.
    let alone = japanese().convert_clause(&dict, &Reading::chars("かい"), END, true);
    assert_eq!(surfaces(&alone), vec!["かい"]);
    let with_particle = japanese().convert_clause(&dict, &Reading::chars("かいを"), END, false);
    assert_eq!(surfaces(&with_particle), vec!["貝を"]);
}

#[test]
fn test_forbidden_stem_ancillary_pair_never_emitted() {
    let mut matrix = crate::converter::testutil::test_matrix();
    matrix.set(PARTICLE.left, NOUN.right, false);
    let mut dict = MemoryDictionary::new(matrix, test_catalog());
    dict.insert(DictSlot::System, Word::new("ほん", "本", NOUN, 200));
    dict.insert(DictSlot::Ancillary, Word::new("を", "を", PARTICLE, 255));

    let clauses = japanese().convert_clause(&dict, &Reading::chars("ほんを"), END, true);
    assert_eq!(surfaces(&clauses), vec!["ほんを"]);
}

#[test]
fn test_emitted_pairs_respect_matrix() {
    let dict = test_dict();
    let matrix = crate::converter::testutil::test_matrix();
    for reading in ["ほんを", "きょうは", "てんきね", "ほんでは", "かいが", "いいね"] {
        let clauses = japanese().convert_clause(&dict, &Reading::chars(reading), END, true);
        for c in &clauses {
            match &c.ancillary {
                Some(a) => {
                    assert!(matrix.connects(c.stem.pos.right, a.pos.left), "{reading}");
                    assert!(matrix.connects(a.pos.right, END.left), "{reading}");
                }
                None if c.surface() != reading => {
                    assert!(matrix.connects(c.stem.pos.right, END.left), "{reading}");
                }
                None => {}
            }
        }
    }
}

#[test]
fn test_no_candidates_best_only_falls_back() {
    let dict = test_dict();
    let clauses = japanese().convert_clause(&dict, &Reading::chars("ぬぬ"), END, false);
    assert_eq!(surfaces(&clauses), vec!["ぬぬ"]);
    assert!(clauses[0].ancillary.is_none());
    assert_eq!(clauses[0].stem.pos, NOUN);
    assert_eq!(clauses[0].frequency(), (-1000 - 1) * 2);
}

#[test]
fn test_best_only_skips_fallback_when_dictionary_matches() {
    let dict = test_dict();
    let clauses = japanese().convert_clause(&dict, &Reading::chars("ほん"), END, false);
    assert_eq!(surfaces(&clauses), vec!["本"]);
}

#[test]
fn test_rejects_empty_and_overlong() {
    let dict = test_dict();
    let mut conv = japanese();
    assert!(conv
        .convert_clause(&dict, &Reading::chars(""), END, true)
        .is_empty());
    let long = "あ".repeat(51);
    assert!(conv
        .convert_clause(&dict, &Reading::chars(&long), END, true)
        .is_empty());
    let max = "あ".repeat(50);
    assert_eq!(
        conv.convert_clause(&dict, &Reading::chars(&max), END, true)
            .len(),
        1
    );
}

#[test]
fn test_profile_without_ancillary_skips_split() {
    let dict = test_dict();
    let mut conv = ClauseConverter::new(LanguageProfile::chinese(), test_config());
    // No split into 本 + を: only the unconverted reading is left.
    let clauses = conv.convert_clause(&dict, &Reading::chars("ほんを"), END, false);
    assert_eq!(surfaces(&clauses), vec!["ほんを"]);
    assert!(clauses[0].ancillary.is_none());
}

#[test]
fn test_pinyin_units() {
    let dict = pinyin_dict();
    let mut conv = chinese();
    let clauses = conv.convert_clause(&dict, &Reading::pinyin("nihao"), END, true);
    assert_eq!(surfaces(&clauses), vec!["你好", "nihao"]);
    assert_eq!(clauses[1].frequency(), (-1000 - 1) * 2);

    let clauses = conv.convert_clause(&dict, &Reading::pinyin("xi'an"), END, true);
    assert_eq!(surfaces(&clauses), vec!["先", "西安", "xian"]);
}

#[test]
fn test_english_ignores_case() {
    let mut dict = MemoryDictionary::new(ConnectMatrix::all_connected(2), test_catalog());
    dict.insert(DictSlot::System, Word::new("hello", "hello", NOUN, 100));
    let mut conv = ClauseConverter::new(LanguageProfile::english(), test_config());
    let clauses = conv.convert_clause(&dict, &Reading::chars("Hello"), END, false);
    assert_eq!(surfaces(&clauses), vec!["hello"]);
}

#[test]
fn test_learned_word_outranks_system() {
    use crate::dict::Dictionary;
    let mut dict = test_dict();
    dict.learn_word(&Word::new("きょう", "京", NOUN, 0), None)
        .unwrap();
    let clauses = japanese().convert_clause(&dict, &Reading::chars("きょう"), END, false);
    assert_eq!(surfaces(&clauses), vec!["京"]);
    assert_eq!(clauses[0].frequency(), 600);
}
