//! Pull-based candidate stream.
//!
//! A stream is a queue of stages (dictionary searches, precomputed word lists,
//! the pinyin initials predictor) drained one at a time. Candidates are
//! deduplicated by surface, length-guarded and passed through an optional
//! content filter before being handed out.

mod initials;


use std::collections::{HashSet, VecDeque};
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::dict::{Dictionary, SearchConfig, SearchMode, SearchOrder, Word, WordQuery};
use crate::reading::Reading;
use crate::settings::CandidateSettings;
use crate::unicode;

pub use initials::{matches_initials, predict_by_initials};

/// Decides whether a candidate may be shown.
pub trait CandidateFilter: Send + Sync {
    fn accept(&self, word: &Word) -> bool;
}

impl<F> CandidateFilter for F
where
    F: Fn(&Word) -> bool + Send + Sync,
{
    fn accept(&self, word: &Word) -> bool {
        self(word)
    }
}

/// Rejects candidates whose surface contains emoji.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmojiFilter;

impl CandidateFilter for EmojiFilter {
    fn accept(&self, word: &Word) -> bool {
        !unicode::contains_emoji(&word.surface)
    }
}

enum Stage {
    Query {
        mode: SearchMode,
        key: String,
        /// Only run when nothing has been emitted yet.
        fallback_only: bool,
    },
    Words(Vec<Word>),
    Initials(Reading),
}

/// Limits applied by a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamLimits {
    pub max_surface_length: usize,
    pub initials_limit: usize,
    pub initials_scan_limit: usize,
}

impl From<&CandidateSettings> for StreamLimits {
    fn from(s: &CandidateSettings) -> Self {
        Self {
            max_surface_length: s.max_surface_length,
            initials_limit: s.initials_limit,
            initials_scan_limit: s.initials_scan_limit,
        }
    }
}

pub struct CandidateStream {
    limits: StreamLimits,
    config: SearchConfig,
    previous: Option<Word>,
    stages: VecDeque<Stage>,
    active: Option<WordQuery>,
    seen: HashSet<String>,
    emitted: usize,
    filter: Option<Arc<dyn CandidateFilter>>,
}

impl CandidateStream {
    pub fn new(limits: StreamLimits) -> Self {
        Self {
            limits,
            config: SearchConfig::new(),
            previous: None,
            stages: VecDeque::new(),
            active: None,
            seen: HashSet::new(),
            emitted: 0,
            filter: None,
        }
    }

    /// Start a new session: drop all stages and forget what was emitted.
    /// The filter is kept.
    pub fn reset(&mut self, config: SearchConfig, previous: Option<Word>) {
        self.config = config;
        self.previous = previous;
        self.stages.clear();
        self.active = None;
        self.seen.clear();
        self.emitted = 0;
    }

    pub fn set_filter(&mut self, filter: Option<Arc<dyn CandidateFilter>>) {
        self.filter = filter;
    }

    pub fn push_query(&mut self, mode: SearchMode, key: &str) {
        self.stages.push_back(Stage::Query {
            mode,
            key: key.to_string(),
            fallback_only: false,
        });
    }

    /// A search that only runs if every earlier stage emitted nothing.
    pub fn push_fallback_query(&mut self, mode: SearchMode, key: &str) {
        self.stages.push_back(Stage::Query {
            mode,
            key: key.to_string(),
            fallback_only: true,
        });
    }

    pub fn push_words(&mut self, words: Vec<Word>) {
        self.stages.push_back(Stage::Words(words));
    }

    /// Pinyin initials prediction; only runs if nothing was emitted before.
    pub fn push_initials(&mut self, reading: Reading) {
        self.stages.push_back(Stage::Initials(reading));
    }

    /// Number of candidates handed out since the last reset.
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    /// Open stages until one has results and return its result count, or 0
    /// when every stage is empty. The opened stage stays current.
    pub fn prime(&mut self, dict: &dyn Dictionary) -> usize {
        loop {
            if let Some(query) = &self.active {
                if query.result_count() > 0 {
                    return query.result_count();
                }
                self.active = None;
            }
            if !self.open_next(dict) {
                return 0;
            }
        }
    }

    pub fn next_candidate(&mut self, dict: &dyn Dictionary) -> Option<Word> {
        loop {
            if self.active.is_none() && !self.open_next(dict) {
                return None;
            }
            let next = self.active.as_mut().and_then(WordQuery::next_word);
            let Some(word) = next else {
                self.active = None;
                continue;
            };
            if word.surface.chars().count() > self.limits.max_surface_length
                || self.seen.contains(&word.surface)
            {
                continue;
            }
            if let Some(filter) = &self.filter {
                if !filter.accept(&word) {
                    continue;
                }
            }
            self.seen.insert(word.surface.clone());
            self.emitted += 1;
            return Some(word);
        }
    }

    fn open_next(&mut self, dict: &dyn Dictionary) -> bool {
        while let Some(stage) = self.stages.pop_front() {
            let query = match stage {
                Stage::Query {
                    mode,
                    key,
                    fallback_only,
                } => {
                    if fallback_only && self.emitted > 0 {
                        continue;
                    }
                    dict.search(
                        &self.config,
                        mode,
                        SearchOrder::ByFrequency,
                        &key,
                        self.previous.as_ref(),
                    )
                }
                Stage::Words(words) => WordQuery::from_words(words),
                Stage::Initials(reading) => {
                    if self.emitted > 0 {
                        continue;
                    }
                    WordQuery::from_words(predict_by_initials(
                        dict,
                        &self.config,
                        &reading,
                        self.limits.initials_limit,
                        self.limits.initials_scan_limit,
                    ))
                }
            };
            debug!(results = query.result_count(), "open candidate stage");
            self.active = Some(query);
            return true;
        }
        false
    }
}

impl fmt::Debug for CandidateStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CandidateStream")
            .field("stages", &self.stages.len())
            .field("emitted", &self.emitted)
            .field("filtered", &self.filter.is_some())
            .finish()
    }
}
