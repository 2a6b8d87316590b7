//! The dictionary port consumed by the converters, plus its in-memory
//! implementation and connection-matrix storage.
//!
//! A search is described by a `SearchConfig` (which sub-dictionaries take part
//! and the frequency band each one maps into) and returns a `WordQuery` that
//! owns its own cursor. Two queries can never share cursor state.

pub mod connection;
mod connection_io;
mod entry;
mod memory;
mod persistence;
pub mod source;
#[cfg(test)]
mod tests;

pub use connection::ConnectMatrix;
pub use entry::{Pos, Word};
pub use memory::{MemoryDictionary, PosCatalog};

use std::io;

/// Unified error type for dictionary I/O and dictionary mutation.
#[derive(Debug, thiserror::Error)]
pub enum DictError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid header (too short)")]
    InvalidHeader,

    #[error("invalid magic bytes")]
    InvalidMagic,

    #[error("unsupported version: {0}")]
    UnsupportedVersion(u8),

    #[error("checksum mismatch")]
    ChecksumMismatch,

    #[error("serialization error: {0}")]
    Serialize(bincode::Error),

    #[error("deserialization error: {0}")]
    Deserialize(bincode::Error),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("invalid word: {0}")]
    InvalidWord(String),

    #[error("word already registered: {reading} → {surface}")]
    DuplicateWord { reading: String, surface: String },

    #[error("word not found: {reading} → {surface}")]
    WordNotFound { reading: String, surface: String },

    #[error("user dictionary is full ({0} words)")]
    UserDictionaryFull(usize),

    #[error("dictionary is not active")]
    Inactive,
}

/// Sub-dictionaries that can take part in a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DictSlot {
    /// General independent words.
    System,
    /// Supplementary independent words (single kanji, proper nouns).
    Auxiliary,
    /// Particles and suffixes attached after a stem.
    Ancillary,
    User,
    Learn,
}

impl DictSlot {
    pub const ALL: [DictSlot; 5] = [
        DictSlot::System,
        DictSlot::Auxiliary,
        DictSlot::Ancillary,
        DictSlot::User,
        DictSlot::Learn,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "system" => Some(Self::System),
            "auxiliary" => Some(Self::Auxiliary),
            "ancillary" => Some(Self::Ancillary),
            "user" => Some(Self::User),
            "learn" => Some(Self::Learn),
            _ => None,
        }
    }
}

/// Largest raw frequency stored in a dictionary.
pub const RAW_FREQ_MAX: i32 = 255;

/// Frequency band a slot's raw frequencies (0..=255) are linearly mapped into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreqBand {
    pub min: i32,
    pub max: i32,
}

impl FreqBand {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// A band every word of the slot scores `freq` in.
    pub const fn fixed(freq: i32) -> Self {
        Self {
            min: freq,
            max: freq,
        }
    }

    pub fn scale(&self, raw: i32) -> i32 {
        let raw = raw.clamp(0, RAW_FREQ_MAX);
        self.min + (self.max - self.min) * raw / RAW_FREQ_MAX
    }
}

/// Approximate key matching applied on top of the search mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApproxPattern {
    IgnoreCase,
}

impl ApproxPattern {
    pub fn normalize(&self, key: &str) -> String {
        match self {
            Self::IgnoreCase => key.to_lowercase(),
        }
    }
}

/// Which sub-dictionaries a search covers and how their frequencies are banded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchConfig {
    slots: Vec<(DictSlot, FreqBand)>,
    approx: Option<ApproxPattern>,
}

impl SearchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or re-band) a slot.
    pub fn with_slot(mut self, slot: DictSlot, band: FreqBand) -> Self {
        match self.slots.iter_mut().find(|(s, _)| *s == slot) {
            Some(entry) => entry.1 = band,
            None => self.slots.push((slot, band)),
        }
        self
    }

    pub fn with_approx(mut self, approx: Option<ApproxPattern>) -> Self {
        self.approx = approx;
        self
    }

    pub fn slots(&self) -> &[(DictSlot, FreqBand)] {
        &self.slots
    }

    pub fn band(&self, slot: DictSlot) -> Option<FreqBand> {
        self.slots
            .iter()
            .find(|(s, _)| *s == slot)
            .map(|&(_, band)| band)
    }

    pub fn approx(&self) -> Option<ApproxPattern> {
        self.approx
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// Reading equals the key.
    Exact,
    /// Reading starts with the key.
    Prefix,
    /// Words learned as following the previous word, reading starting with
    /// the key (which may be empty).
    Link,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOrder {
    /// Descending frequency; ties keep dictionary order.
    ByFrequency,
    /// Ascending reading, then descending frequency.
    ByReading,
}

/// Named POS entries every dictionary provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PosKind {
    /// Noun-like POS given to synthetic and unclassified words.
    Default,
    /// Terminal POS of a clause followed by another clause.
    ClauseEnd,
    /// Terminal POS of the last clause of a sentence.
    SentenceEnd,
    /// Terminal POS used when converting one clause in isolation.
    AnyEnd,
}

/// Results of one search. Owns its cursor: pulling words from it cannot
/// disturb any other query.
#[derive(Debug, Default)]
pub struct WordQuery {
    words: std::vec::IntoIter<Word>,
    count: usize,
}

impl WordQuery {
    pub fn from_words(words: Vec<Word>) -> Self {
        let count = words.len();
        Self {
            words: words.into_iter(),
            count,
        }
    }

    pub fn empty() -> Self {
        Self::from_words(Vec::new())
    }

    /// Number of results the search produced (pulled or not).
    pub fn result_count(&self) -> usize {
        self.count
    }

    /// Pull the next result.
    pub fn next_word(&mut self) -> Option<Word> {
        self.words.next()
    }
}

impl Iterator for WordQuery {
    type Item = Word;

    fn next(&mut self) -> Option<Word> {
        self.next_word()
    }
}

/// The dictionary port.
pub trait Dictionary: Send + Sync {
    /// Run a search. An empty `config` yields an empty query.
    fn search(
        &self,
        config: &SearchConfig,
        mode: SearchMode,
        order: SearchOrder,
        key: &str,
        previous: Option<&Word>,
    ) -> WordQuery;

    fn pos(&self, kind: PosKind) -> Pos;

    fn connect_matrix(&self) -> &ConnectMatrix;

    /// Record a confirmed word, optionally as following `previous`.
    fn learn_word(&mut self, word: &Word, previous: Option<&Word>) -> Result<(), DictError>;

    fn add_user_word(&mut self, word: &Word) -> Result<(), DictError>;

    fn remove_user_word(&mut self, word: &Word) -> Result<(), DictError>;

    fn clear_user_dictionary(&mut self);

    fn clear_learn_dictionary(&mut self);

    /// Whether searches can currently return results.
    fn is_active(&self) -> bool {
        true
    }
}
