use std::collections::{HashMap, HashSet};

use tracing::{debug, debug_span};

use super::{Clause, ConverterConfig};
use crate::dict::{Dictionary, Pos, PosKind, SearchConfig, SearchMode, SearchOrder, Word};
use crate::reading::{LanguageProfile, Reading};

/// Converts one reading into clause candidates.
///
/// Holds only search configuration and per-call memos; every call starts
/// from empty memos.
pub struct ClauseConverter {
    profile: LanguageProfile,
    config: ConverterConfig,
    stem_search: SearchConfig,
    ancillary_search: SearchConfig,
    /// Ancillary patterns by suffix reading, valid within one call.
    ancillary_memo: HashMap<String, Vec<Word>>,
}

impl ClauseConverter {
    pub fn new(profile: LanguageProfile, config: ConverterConfig) -> Self {
        let stem_search = config.stem_search(&profile);
        let ancillary_search = config.ancillary_search();
        Self {
            profile,
            config,
            stem_search,
            ancillary_search,
            ancillary_memo: HashMap::new(),
        }
    }

    pub fn profile(&self) -> &LanguageProfile {
        &self.profile
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Clause candidates for the whole of `reading`, best first.
    ///
    /// With `want_all` the list holds every dictionary-backed clause ordered
    /// by descending frequency (ties in discovery order) and ends with the
    /// synthetic fallback clause. Without it the list holds the single best
    /// dictionary-backed clause, or the fallback clause when there is none.
    pub fn convert_clause(
        &mut self,
        dict: &dyn Dictionary,
        reading: &Reading,
        terminal: Pos,
        want_all: bool,
    ) -> Vec<Clause> {
        let _span = debug_span!("convert_clause", units = reading.len(), want_all).entered();
        self.ancillary_memo.clear();

        let len = reading.len();
        if len == 0 || len > self.config.max_input_length {
            return Vec::new();
        }

        let matrix = dict.connect_matrix();
        let mut clauses = Vec::new();

        for stem in self.independent_words(dict, reading.as_str(), want_all) {
            if matrix.connects(stem.pos.right, terminal.left) {
                offer(&mut clauses, Clause::new(reading.as_str(), stem, None), want_all);
            }
        }

        if self.profile.ancillary {
            for split in 1..len {
                let suffix = reading.span(split, len);
                let ancillaries = self.ancillary_pattern(dict, &suffix);
                if ancillaries.is_empty() {
                    continue;
                }

                let prefix = reading.slice(0, split);
                let stems = self.independent_words(dict, prefix, want_all);
                if stems.is_empty() {
                    let extendable = dict
                        .search(
                            &self.stem_search,
                            SearchMode::Prefix,
                            SearchOrder::ByFrequency,
                            prefix,
                            None,
                        )
                        .result_count();
                    if extendable == 0 {
                        // No longer prefix can match either.
                        break;
                    }
                    continue;
                }

                for stem in &stems {
                    for anc in &ancillaries {
                        if matrix.connects(stem.pos.right, anc.pos.left)
                            && matrix.connects(anc.pos.right, terminal.left)
                        {
                            let clause =
                                Clause::new(reading.as_str(), stem.clone(), Some(anc.clone()));
                            offer(&mut clauses, clause, want_all);
                        }
                    }
                }
            }
        }

        if want_all || clauses.is_empty() {
            let fallback = Clause::fallback(reading, dict.pos(PosKind::Default), &self.config);
            offer(&mut clauses, fallback, true);
        }
        debug!(count = clauses.len());
        clauses
    }

    /// Independent words whose reading equals `key`. Without `want_all`, only
    /// the best word of each right-hand POS class is kept.
    fn independent_words(&self, dict: &dyn Dictionary, key: &str, want_all: bool) -> Vec<Word> {
        let query = dict.search(
            &self.stem_search,
            SearchMode::Exact,
            SearchOrder::ByFrequency,
            key,
            None,
        );
        if want_all {
            return query.collect();
        }
        let mut classes = HashSet::new();
        query.filter(|w| classes.insert(w.pos.right)).collect()
    }

    /// Ancillary words and connectible chains of ancillary words whose
    /// combined reading equals `suffix`.
    ///
    /// A chain takes the left class of its first word and the right class of
    /// its last word; its frequency is 0.
    fn ancillary_pattern(&mut self, dict: &dyn Dictionary, suffix: &Reading) -> Vec<Word> {
        if let Some(hit) = self.ancillary_memo.get(suffix.as_str()) {
            return hit.clone();
        }

        let len = suffix.len();
        let mut patterns: Vec<Word> = dict
            .search(
                &self.ancillary_search,
                SearchMode::Exact,
                SearchOrder::ByFrequency,
                suffix.as_str(),
                None,
            )
            .collect();

        for split in 1..len {
            let heads: Vec<Word> = dict
                .search(
                    &self.ancillary_search,
                    SearchMode::Exact,
                    SearchOrder::ByFrequency,
                    suffix.slice(0, split),
                    None,
                )
                .collect();
            if heads.is_empty() {
                continue;
            }
            let tails = self.ancillary_pattern(dict, &suffix.span(split, len));
            let matrix = dict.connect_matrix();
            for head in &heads {
                for tail in &tails {
                    if matrix.connects(head.pos.right, tail.pos.left) {
                        patterns.push(Word {
                            reading: suffix.as_str().to_string(),
                            surface: format!("{}{}", head.surface, tail.surface),
                            pos: Pos::new(head.pos.left, tail.pos.right),
                            frequency: 0,
                        });
                    }
                }
            }
        }

        self.ancillary_memo
            .insert(suffix.as_str().to_string(), patterns.clone());
        patterns
    }
}

/// Add a candidate. `want_all` inserts before the first strictly lower
/// frequency; otherwise only a strictly better clause replaces the current one.
fn offer(clauses: &mut Vec<Clause>, clause: Clause, want_all: bool) {
    let freq = clause.frequency();
    if want_all {
        let at = clauses
            .iter()
            .position(|c| c.frequency() < freq)
            .unwrap_or(clauses.len());
        clauses.insert(at, clause);
    } else if clauses.first().map_or(true, |best| freq > best.frequency()) {
        clauses.clear();
        clauses.push(clause);
    }
}
