use tracing::{debug, debug_span};

use super::{Clause, ClauseConverter, ConverterConfig, SegmentationCache, Sentence};
use crate::dict::{Dictionary, PosKind};
use crate::reading::Reading;

/// Converts a reading into the best-scoring sequence of clauses.
///
/// Keeps a `SegmentationCache` across calls so that successive conversions
/// of an edited reading only derive clauses for spans past the edit. The
/// result never depends on what was cached: a conversion always returns the
/// sentence a fresh converter would.
pub struct SentenceConverter {
    config: ConverterConfig,
    cache: SegmentationCache,
}

impl SentenceConverter {
    pub fn new(config: ConverterConfig) -> Self {
        Self {
            cache: SegmentationCache::new(config.max_input_length),
            config,
        }
    }

    pub fn cache(&self) -> &SegmentationCache {
        &self.cache
    }

    /// Drop all cached state. Required whenever dictionary contents change.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Best sentence for `reading`, or `None` if it is empty or longer than
    /// the cache capacity.
    pub fn convert(
        &mut self,
        dict: &dyn Dictionary,
        clauses: &mut ClauseConverter,
        reading: &Reading,
    ) -> Option<Sentence> {
        let _span = debug_span!("convert_sentence", units = reading.len()).entered();
        let len = reading.len();
        if len == 0 || len > self.cache.capacity() {
            self.cache.clear();
            return None;
        }

        // The clause ending at the divergence point is re-derived too.
        let same = self
            .cache
            .previous()
            .map_or(0, |prev| prev.common_prefix_len(reading))
            .saturating_sub(1);
        self.cache.invalidate_from(same);
        debug!(same, "reuse cached prefix");

        // Only clause derivations survive; sentences are rebuilt from them.
        self.cache.clear_sentences();
        let clause_cost = self.config.clause_cost;
        for start in 0..len {
            let prefix = match start {
                0 => None,
                _ => match self.cache.sentence(start - 1) {
                    Some(s) => Some(s.clone()),
                    None => continue,
                },
            };
            let bound =
                prefix.as_ref().map_or(0, Sentence::frequency) + clause_cost + self.config.freq_learn;

            let last = (start + self.config.max_clause_length).min(len);
            for end in ((start + 1)..=last).rev() {
                if self
                    .cache
                    .sentence(end - 1)
                    .is_some_and(|s| s.frequency() > bound)
                {
                    break;
                }
                let Some(clause) = self.clause_for(dict, clauses, reading, start, end) else {
                    continue;
                };
                let candidate = match &prefix {
                    Some(p) => p.append(clause, clause_cost),
                    None => Sentence::new(clause, clause_cost),
                };
                self.cache.offer(end - 1, candidate);
            }
        }

        self.cache.remember(reading);
        let best = self.cache.sentence(len - 1).cloned();
        debug!(clauses = best.as_ref().map_or(0, Sentence::len));
        best
    }

    /// Best clause for units `start..end`, from the cache or derived now.
    /// `None` only when the span is beyond what the clause converter accepts.
    fn clause_for(
        &mut self,
        dict: &dyn Dictionary,
        clauses: &mut ClauseConverter,
        reading: &Reading,
        start: usize,
        end: usize,
    ) -> Option<Clause> {
        let is_final = end == reading.len();
        if let Some(clause) = self.cache.clause(start, end, is_final) {
            return Some(clause.clone());
        }
        let terminal = dict.pos(if is_final {
            PosKind::SentenceEnd
        } else {
            PosKind::ClauseEnd
        });
        let span = reading.span(start, end);
        let clause = clauses
            .convert_clause(dict, &span, terminal, false)
            .into_iter()
            .next()?;
        self.cache.store_clause(start, end, is_final, clause.clone());
        Some(clause)
    }
}
