//! Reading-to-clause and reading-to-sentence conversion.
//!
//! A clause is an independent word (stem) optionally followed by an ancillary
//! word, checked against the connection matrix at both boundaries. A sentence
//! is a sequence of clauses found by a bounded dynamic program over unit
//! offsets of the reading, scored by summed word frequencies minus a fixed
//! cost per clause.

mod cache;
mod clause;
mod sentence;
pub(crate) mod testutil;

#[cfg(test)]
mod tests;

use std::fmt;
use std::sync::Arc;

use crate::dict::{DictSlot, FreqBand, Pos, SearchConfig, Word};
use crate::reading::{LanguageProfile, Reading};
use crate::settings::{settings, Settings};

pub use cache::SegmentationCache;
pub use clause::ClauseConverter;
pub use sentence::SentenceConverter;

/// Frequency band of system independent words.
pub const SYSTEM_BAND: FreqBand = FreqBand::new(400, 500);
/// Frequency band of auxiliary independent words.
pub const AUXILIARY_BAND: FreqBand = FreqBand::new(0, 10);
/// Frequency band of ancillary words.
pub const ANCILLARY_BAND: FreqBand = FreqBand::new(400, 500);

/// Scoring constants and limits shared by the converters and the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConverterConfig {
    /// Added once per clause of a sentence. Negative.
    pub clause_cost: i32,
    /// Score of a learned word; also the optimistic bound on what one more
    /// clause can add during sentence pruning.
    pub freq_learn: i32,
    pub freq_user: i32,
    /// Longest reading (in units) either converter accepts.
    pub max_input_length: usize,
    /// Longest clause (in units) the sentence converter tries.
    pub max_clause_length: usize,
}

impl ConverterConfig {
    pub fn from_settings(s: &Settings) -> Self {
        Self {
            clause_cost: s.converter.clause_cost,
            freq_learn: s.converter.freq_learn,
            freq_user: s.converter.freq_user,
            max_input_length: s.converter.max_input_length,
            max_clause_length: s.converter.max_clause_length,
        }
    }

    /// Search configuration for independent words (clause stems).
    pub fn stem_search(&self, profile: &LanguageProfile) -> SearchConfig {
        SearchConfig::new()
            .with_slot(DictSlot::System, SYSTEM_BAND)
            .with_slot(DictSlot::Auxiliary, AUXILIARY_BAND)
            .with_slot(DictSlot::User, FreqBand::fixed(self.freq_user))
            .with_slot(DictSlot::Learn, FreqBand::fixed(self.freq_learn))
            .with_approx(profile.approx)
    }

    /// Search configuration for ancillary words.
    pub fn ancillary_search(&self) -> SearchConfig {
        SearchConfig::new().with_slot(DictSlot::Ancillary, ANCILLARY_BAND)
    }

    /// Score of the synthetic clause covering `units` units of unconverted
    /// reading.
    pub fn fallback_frequency(&self, units: usize) -> i32 {
        let units = i32::try_from(units).unwrap_or(i32::MAX);
        (self.clause_cost - 1).saturating_mul(units)
    }
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self::from_settings(settings())
    }
}

/// One segmentation unit: a stem and an optional ancillary word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    /// The reading this clause covers.
    pub reading: String,
    pub stem: Word,
    pub ancillary: Option<Word>,
}

impl Clause {
    pub fn new(reading: &str, stem: Word, ancillary: Option<Word>) -> Self {
        Self {
            reading: reading.to_string(),
            stem,
            ancillary,
        }
    }

    /// Synthetic clause that leaves `reading` unconverted.
    pub fn fallback(reading: &Reading, pos: Pos, config: &ConverterConfig) -> Self {
        let stem = Word::new(
            reading.as_str(),
            reading.as_str(),
            pos,
            config.fallback_frequency(reading.len()),
        );
        Self::new(reading.as_str(), stem, None)
    }

    pub fn frequency(&self) -> i32 {
        self.stem.frequency + self.ancillary.as_ref().map_or(0, |a| a.frequency)
    }

    pub fn surface(&self) -> String {
        match &self.ancillary {
            Some(a) => format!("{}{}", self.stem.surface, a.surface),
            None => self.stem.surface.clone(),
        }
    }

    /// Outer POS: the stem's left class and the right class of whichever word
    /// ends the clause.
    pub fn pos(&self) -> Pos {
        let right = self.ancillary.as_ref().unwrap_or(&self.stem).pos.right;
        Pos::new(self.stem.pos.left, right)
    }

    /// The clause as a single word.
    pub fn to_word(&self) -> Word {
        Word {
            reading: self.reading.clone(),
            surface: self.surface(),
            pos: self.pos(),
            frequency: self.frequency(),
        }
    }
}

#[derive(Debug)]
struct SentenceNode {
    clause: Clause,
    prev: Option<Arc<SentenceNode>>,
}

/// An immutable, non-empty sequence of clauses.
///
/// Appending shares the prefix: `append` allocates one node and never copies
/// or mutates the clauses of `self`.
#[derive(Clone)]
pub struct Sentence {
    last: Arc<SentenceNode>,
    len: usize,
    frequency: i32,
}

impl Sentence {
    /// One-clause sentence.
    pub fn new(clause: Clause, clause_cost: i32) -> Self {
        let frequency = clause.frequency() + clause_cost;
        Self {
            last: Arc::new(SentenceNode { clause, prev: None }),
            len: 1,
            frequency,
        }
    }

    /// A new sentence extending `self` by one clause.
    pub fn append(&self, clause: Clause, clause_cost: i32) -> Self {
        let frequency = self.frequency + clause.frequency() + clause_cost;
        Self {
            last: Arc::new(SentenceNode {
                clause,
                prev: Some(Arc::clone(&self.last)),
            }),
            len: self.len + 1,
            frequency,
        }
    }

    pub fn frequency(&self) -> i32 {
        self.frequency
    }

    /// Number of clauses.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn last_clause(&self) -> &Clause {
        &self.last.clause
    }

    /// Clauses in reading order.
    pub fn clauses(&self) -> Vec<&Clause> {
        let mut out = Vec::with_capacity(self.len);
        let mut node = Some(&self.last);
        while let Some(n) = node {
            out.push(&n.clause);
            node = n.prev.as_ref();
        }
        out.reverse();
        out
    }

    pub fn clause(&self, index: usize) -> Option<&Clause> {
        if index >= self.len {
            return None;
        }
        let mut node = &self.last;
        for _ in 0..(self.len - 1 - index) {
            node = node.prev.as_ref()?;
        }
        Some(&node.clause)
    }

    pub fn reading(&self) -> String {
        self.clauses().iter().map(|c| c.reading.as_str()).collect()
    }

    pub fn surface(&self) -> String {
        self.clauses().iter().map(|c| c.surface()).collect()
    }

    /// The whole sentence as a single word.
    pub fn to_word(&self) -> Word {
        let left = self.clauses().first().map_or(0, |c| c.pos().left);
        Word {
            reading: self.reading(),
            surface: self.surface(),
            pos: Pos::new(left, self.last_clause().pos().right),
            frequency: self.frequency,
        }
    }
}

impl PartialEq for Sentence {
    fn eq(&self, other: &Self) -> bool {
        self.frequency == other.frequency
            && self.len == other.len
            && self.clauses() == other.clauses()
    }
}

impl Eq for Sentence {}

impl fmt::Debug for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sentence")
            .field("frequency", &self.frequency)
            .field("clauses", &self.clauses())
            .finish()
    }
}
