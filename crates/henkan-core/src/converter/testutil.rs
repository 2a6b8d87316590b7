#![cfg(test)]

use super::{ClauseConverter, ConverterConfig, SentenceConverter};
use crate::dict::{ConnectMatrix, DictSlot, MemoryDictionary, Pos, PosCatalog, Word};
use crate::reading::LanguageProfile;

/// Terminal class: what may end a clause or a sentence.
pub const END: Pos = Pos::new(0, 0);
pub const NOUN: Pos = Pos::new(1, 1);
/// Particles attach after nouns and verbs and may chain.
pub const PARTICLE: Pos = Pos::new(2, 3);
pub const VERB: Pos = Pos::new(4, 4);
/// A noun-like word that can never end a clause.
pub const PREFIX_ONLY: Pos = Pos::new(5, 5);

/// Six classes; `[left][right]` cells listed as (next_left, prev_right).
pub fn test_matrix() -> ConnectMatrix {
    let mut m = ConnectMatrix::new_owned(6, Vec::new());
    for (left, right) in [(0, 1), (0, 3), (0, 4), (2, 1), (2, 3), (2, 4), (2, 5)] {
        m.set(left, right, true);
    }
    m
}

pub fn test_catalog() -> PosCatalog {
    PosCatalog {
        default: NOUN,
        clause_end: END,
        sentence_end: END,
        any_end: END,
    }
}

pub fn test_config() -> ConverterConfig {
    ConverterConfig {
        clause_cost: -1000,
        freq_learn: 600,
        freq_user: 500,
        max_input_length: 50,
        max_clause_length: 20,
    }
}

/// Shared Japanese test dictionary (raw frequencies).
pub fn test_dict() -> MemoryDictionary {
    let mut dict = MemoryDictionary::new(test_matrix(), test_catalog());
    dict.insert_all(
        DictSlot::System,
        vec![
            Word::new("ほん", "本", NOUN, 200),
            Word::new("ほん", "品", NOUN, 50),
            Word::new("きょう", "今日", NOUN, 250),
            Word::new("きょう", "京", NOUN, 100),
            Word::new("てんき", "天気", NOUN, 200),
            Word::new("てん", "天", NOUN, 120),
            Word::new("き", "木", NOUN, 100),
            Word::new("いい", "良い", VERB, 150),
            Word::new("わたし", "私", NOUN, 255),
            Word::new("かい", "貝", PREFIX_ONLY, 255),
        ],
    );
    dict.insert(DictSlot::Auxiliary, Word::new("き", "樹", NOUN, 255));
    dict.insert_all(
        DictSlot::Ancillary,
        vec![
            Word::new("を", "を", PARTICLE, 255),
            Word::new("は", "は", PARTICLE, 255),
            Word::new("が", "が", PARTICLE, 200),
            Word::new("で", "で", PARTICLE, 200),
            Word::new("ね", "ね", PARTICLE, 100),
        ],
    );
    dict
}

pub fn japanese() -> ClauseConverter {
    ClauseConverter::new(LanguageProfile::japanese(), test_config())
}

pub fn sentence_converter() -> SentenceConverter {
    SentenceConverter::new(test_config())
}

/// Pinyin test dictionary; every word is a noun.
pub fn pinyin_dict() -> MemoryDictionary {
    let mut dict = MemoryDictionary::new(test_matrix(), test_catalog());
    dict.insert_all(
        DictSlot::System,
        vec![
            Word::new("nihao", "你好", NOUN, 255),
            Word::new("ni", "你", NOUN, 200),
            Word::new("ni", "泥", NOUN, 20),
            Word::new("hao", "好", NOUN, 200),
            Word::new("zhongguo", "中国", NOUN, 255),
            Word::new("zhong", "中", NOUN, 150),
            Word::new("guo", "国", NOUN, 150),
            Word::new("ren", "人", NOUN, 200),
            Word::new("xian", "先", NOUN, 100),
            Word::new("xian", "西安", NOUN, 90),
        ],
    );
    dict
}

pub fn chinese() -> ClauseConverter {
    ClauseConverter::new(LanguageProfile::chinese(), test_config())
}
