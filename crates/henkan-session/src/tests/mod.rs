mod basic;
mod learning;

use henkan_core::candidates::StreamLimits;
use henkan_core::converter::ConverterConfig;
use henkan_core::dict::{ConnectMatrix, DictSlot, MemoryDictionary, Pos, PosCatalog, Word};
use henkan_core::reading::LanguageProfile;

use super::Engine;

pub(super) const END: Pos = Pos::new(0, 0);
pub(super) const NOUN: Pos = Pos::new(1, 1);
pub(super) const PARTICLE: Pos = Pos::new(2, 3);
pub(super) const VERB: Pos = Pos::new(4, 4);

fn make_matrix() -> ConnectMatrix {
    let mut m = ConnectMatrix::new_owned(5, Vec::new());
    for (left, right) in [(0, 1), (0, 3), (0, 4), (2, 1), (2, 3), (2, 4)] {
        m.set(left, right, true);
    }
    m
}

fn make_catalog() -> PosCatalog {
    PosCatalog {
        default: NOUN,
        clause_end: END,
        sentence_end: END,
        any_end: END,
    }
}

pub(super) fn make_config() -> ConverterConfig {
    ConverterConfig {
        clause_cost: -1000,
        freq_learn: 600,
        freq_user: 500,
        max_input_length: 50,
        max_clause_length: 20,
    }
}

pub(super) fn make_limits() -> StreamLimits {
    StreamLimits {
        max_surface_length: 50,
        initials_limit: 50,
        initials_scan_limit: 2000,
    }
}

pub(super) fn make_test_dict() -> MemoryDictionary {
    let mut dict = MemoryDictionary::new(make_matrix(), make_catalog()).with_limits(100, 2000);
    dict.insert_all(
        DictSlot::System,
        vec![
            Word::new("きょう", "今日", NOUN, 250),
            Word::new("きょう", "京", NOUN, 100),
            Word::new("きょうと", "京都", NOUN, 200),
            Word::new("てんき", "天気", NOUN, 200),
            Word::new("てん", "天", NOUN, 120),
            Word::new("き", "木", NOUN, 100),
            Word::new("いい", "良い", VERB, 150),
            Word::new("ほん", "本", NOUN, 200),
            Word::new("ほん", "品", NOUN, 50),
        ],
    );
    dict.insert(DictSlot::Auxiliary, Word::new("きょう", "橋", NOUN, 255));
    dict.insert_all(
        DictSlot::Ancillary,
        vec![
            Word::new("を", "を", PARTICLE, 255),
            Word::new("は", "は", PARTICLE, 255),
            Word::new("が", "が", PARTICLE, 200),
            Word::new("ね", "ね", PARTICLE, 100),
        ],
    );
    dict
}

pub(super) fn make_engine() -> Engine<MemoryDictionary> {
    Engine::with_config(
        make_test_dict(),
        LanguageProfile::japanese(),
        make_config(),
        make_limits(),
    )
}

pub(super) fn drain(engine: &mut Engine<MemoryDictionary>) -> Vec<String> {
    std::iter::from_fn(|| engine.next_candidate())
        .map(|w| w.surface)
        .collect()
}
