//! Prediction and conversion engine.
//!
//! `Engine` owns a dictionary, both converters and a candidate stream, and
//! exposes the predict / convert / browse / learn cycle an input method
//! drives. Every operation takes `&mut self`, so one engine runs at most one
//! conversion at a time; separate languages use separate engines.

mod types;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use tracing::{debug, debug_span};

use henkan_core::candidates::{CandidateFilter, CandidateStream, StreamLimits};
use henkan_core::converter::{
    Clause, ClauseConverter, ConverterConfig, Sentence, SentenceConverter, AUXILIARY_BAND,
};
use henkan_core::dict::{
    DictError, DictSlot, Dictionary, FreqBand, PosKind, SearchConfig, SearchMode, Word,
};
use henkan_core::pinyin;
use henkan_core::reading::{LanguageProfile, Reading};
use henkan_core::settings::settings;
use henkan_core::unicode;

pub use types::EngineState;

/// Frequency band of system words during prediction.
const PREDICTION_BAND: FreqBand = FreqBand::new(100, 400);

pub struct Engine<D: Dictionary> {
    dict: D,
    profile: LanguageProfile,
    config: ConverterConfig,
    clauses: ClauseConverter,
    sentences: SentenceConverter,
    stream: CandidateStream,
    state: EngineState,
    /// Last learned word; context for link searches.
    previous: Option<Word>,
}

impl<D: Dictionary> Engine<D> {
    /// Engine with converter and candidate settings from `settings()`.
    pub fn new(dict: D, profile: LanguageProfile) -> Self {
        let limits = StreamLimits::from(&settings().candidates);
        Self::with_config(dict, profile, ConverterConfig::default(), limits)
    }

    pub fn with_config(
        dict: D,
        profile: LanguageProfile,
        config: ConverterConfig,
        limits: StreamLimits,
    ) -> Self {
        Self {
            clauses: ClauseConverter::new(profile.clone(), config),
            sentences: SentenceConverter::new(config),
            stream: CandidateStream::new(limits),
            state: EngineState::Idle,
            previous: None,
            dict,
            profile,
            config,
        }
    }

    pub fn dictionary(&self) -> &D {
        &self.dict
    }

    pub fn into_dictionary(self) -> D {
        self.dict
    }

    pub fn profile(&self) -> &LanguageProfile {
        &self.profile
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn previous_word(&self) -> Option<&Word> {
        self.previous.as_ref()
    }

    /// Reset to a fresh session: no state, no context, empty cache.
    pub fn init(&mut self) {
        self.state = EngineState::Idle;
        self.stream.reset(SearchConfig::new(), None);
        self.previous = None;
        self.sentences.clear_cache();
    }

    /// Release per-session state. The engine stays usable.
    pub fn close(&mut self) {
        self.init();
    }

    /// Install or remove the content filter applied to every candidate.
    pub fn set_filter(&mut self, filter: Option<Arc<dyn CandidateFilter>>) {
        self.stream.set_filter(filter);
    }

    /// Start a prediction for `text` and return the result count of the
    /// first non-empty search (0 if there is none).
    ///
    /// Empty text with `min_len == 0` predicts words that followed the last
    /// learned word. Text shorter than `min_len` units predicts nothing. With
    /// `max_len` the text is cut to that many units and matched exactly;
    /// otherwise exact matches come first, then prefix matches.
    pub fn predict(&mut self, text: &str, min_len: usize, max_len: Option<usize>) -> usize {
        let _span = debug_span!("predict", min_len, ?max_len).entered();
        self.state = EngineState::Predicting;
        let reading = self.profile.reading(text);
        let units = reading.len();

        if !self.dict.is_active() || units < min_len || units > self.config.max_input_length {
            self.stream.reset(SearchConfig::new(), None);
            return 0;
        }

        self.stream
            .reset(self.prediction_search(units), self.previous.clone());
        if units == 0 {
            self.stream.push_query(SearchMode::Link, "");
        } else if let Some(max) = max_len {
            self.stream
                .push_query(SearchMode::Exact, reading.slice(0, max.min(units)));
        } else {
            self.stream.push_query(SearchMode::Exact, reading.as_str());
            self.stream.push_query(SearchMode::Prefix, reading.as_str());
            self.push_fallbacks(&reading);
        }

        let count = self.stream.prime(&self.dict);
        debug!(units, count);
        count
    }

    /// Dictionaries searched during prediction. Short inputs skip the
    /// auxiliary dictionary; empty input only searches learned links.
    fn prediction_search(&self, units: usize) -> SearchConfig {
        let learn = FreqBand::fixed(self.config.freq_learn);
        if units == 0 {
            return SearchConfig::new().with_slot(DictSlot::Learn, learn);
        }
        let mut search = SearchConfig::new().with_slot(DictSlot::System, PREDICTION_BAND);
        if units > 1 {
            search = search.with_slot(DictSlot::Auxiliary, AUXILIARY_BAND);
        }
        search
            .with_slot(DictSlot::User, FreqBand::fixed(self.config.freq_user))
            .with_slot(DictSlot::Learn, learn)
            .with_approx(self.profile.approx)
    }

    /// Shrinking-prefix searches, then initials prediction, for profiles that
    /// enable them. A shrunk key must end in a complete syllable.
    fn push_fallbacks(&mut self, reading: &Reading) {
        let units = reading.len();
        if self.profile.shrinking_fallback {
            for n in (1..units).rev() {
                if pinyin::is_syllable(reading.unit(n - 1)) {
                    self.stream
                        .push_fallback_query(SearchMode::Prefix, reading.slice(0, n));
                }
            }
        }
        if self.profile.initials_fallback && units > 1 {
            self.stream.push_initials(reading.clone());
        }
    }

    /// Convert `text` into a sentence and return its clause count (0 when
    /// nothing could be converted).
    ///
    /// Text before `cursor` (in units) becomes a single head clause; the rest
    /// goes through the sentence converter.
    pub fn convert(&mut self, text: &str, cursor: usize) -> usize {
        let _span = debug_span!("convert", cursor).entered();
        self.stream.reset(SearchConfig::new(), None);
        let reading = self.profile.reading(text);
        let len = reading.len();
        let cursor = cursor.min(len);

        let sentence = if self.dict.is_active() && len > 0 {
            self.convert_reading(&reading, cursor)
        } else {
            None
        };
        let Some(sentence) = sentence else {
            self.state = EngineState::Idle;
            return 0;
        };

        let clauses = sentence.len();
        debug!(clauses, frequency = sentence.frequency());
        self.stream.push_words(vec![sentence.to_word()]);
        self.state = EngineState::Converting(sentence);
        clauses
    }

    fn convert_reading(&mut self, reading: &Reading, cursor: usize) -> Option<Sentence> {
        let len = reading.len();
        let head = if cursor > 0 {
            let terminal = self.dict.pos(PosKind::AnyEnd);
            let span = reading.span(0, cursor);
            let best = self
                .clauses
                .convert_clause(&self.dict, &span, terminal, true)
                .into_iter()
                .next()?;
            Some(Sentence::new(best, self.config.clause_cost))
        } else {
            None
        };
        if cursor == len {
            return head;
        }

        let rest = self
            .sentences
            .convert(&self.dict, &mut self.clauses, &reading.span(cursor, len))?;
        match head {
            None => Some(rest),
            Some(head) => Some(rest.clauses().into_iter().fold(head, |acc, clause| {
                acc.append(clause.clone(), self.config.clause_cost)
            })),
        }
    }

    /// Pull the next candidate of the current prediction or conversion.
    pub fn next_candidate(&mut self) -> Option<Word> {
        if self.state == EngineState::Idle {
            return None;
        }
        self.stream.next_candidate(&self.dict)
    }

    /// Offer every alternative for clause `index` of the converted sentence
    /// and return how many there are (0 if there is no such clause).
    pub fn make_candidate_list_of(&mut self, index: usize) -> usize {
        let Some(sentence) = self.state.sentence().cloned() else {
            return 0;
        };
        let Some(clause) = sentence.clause(index) else {
            return 0;
        };

        let reading = self.profile.reading(&clause.reading);
        let terminal = self.dict.pos(PosKind::AnyEnd);
        let mut words: Vec<Word> = self
            .clauses
            .convert_clause(&self.dict, &reading, terminal, true)
            .iter()
            .map(Clause::to_word)
            .collect();
        if self.profile.katakana_alternative {
            words.push(Word::new(
                &clause.reading,
                &unicode::hiragana_to_katakana(&clause.reading),
                self.dict.pos(PosKind::Default),
                self.config.fallback_frequency(reading.len()),
            ));
        }

        self.stream.reset(SearchConfig::new(), None);
        self.stream.push_words(words);
        self.state = EngineState::ClauseBrowsing {
            sentence,
            clause_index: index,
        };
        self.stream.prime(&self.dict)
    }

    /// Learn a confirmed word; it becomes the context of the next link search.
    pub fn learn_word(&mut self, word: &Word) -> Result<(), DictError> {
        let mut word = word.clone();
        if word.pos.right == 0 {
            word.pos = self.dict.pos(PosKind::Default);
        }
        // Cached clauses may now be outranked by the learned word.
        self.sentences.clear_cache();
        self.dict.learn_word(&word, self.previous.as_ref())?;
        self.previous = Some(word);
        Ok(())
    }

    /// Learn each clause of a confirmed sentence in order: the stem, then
    /// the ancillary word when there is a distinct one. Stops at the first
    /// failure.
    pub fn learn_sentence(&mut self, sentence: &Sentence) -> Result<(), DictError> {
        for clause in sentence.clauses() {
            self.learn_word(&clause.stem)?;
            if let Some(anc) = &clause.ancillary {
                if anc != &clause.stem {
                    self.learn_word(anc)?;
                }
            }
        }
        Ok(())
    }

    /// Forget the link context (e.g. after a discontinuous cursor move).
    pub fn break_sequence(&mut self) {
        self.previous = None;
    }

    pub fn add_user_word(&mut self, word: &Word) -> Result<(), DictError> {
        self.sentences.clear_cache();
        self.dict.add_user_word(word)
    }

    pub fn remove_user_word(&mut self, word: &Word) -> Result<(), DictError> {
        self.sentences.clear_cache();
        self.dict.remove_user_word(word)
    }

    pub fn clear_user_dictionary(&mut self) {
        self.sentences.clear_cache();
        self.dict.clear_user_dictionary();
    }

    pub fn clear_learn_dictionary(&mut self) {
        self.sentences.clear_cache();
        self.previous = None;
        self.dict.clear_learn_dictionary();
    }
}
