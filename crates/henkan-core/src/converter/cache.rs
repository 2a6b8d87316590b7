use std::collections::HashMap;

use super::{Clause, Sentence};
use crate::reading::Reading;

/// Per-end-offset state of the sentence converter.
#[derive(Debug, Clone, Default)]
struct Slot {
    /// Best sentence covering units `0..=index`.
    sentence: Option<Sentence>,
    /// Best clause for each span ending at this offset, keyed by
    /// (start unit, whether the span ends the reading).
    clauses: HashMap<(usize, bool), Clause>,
}

/// Fixed-capacity, end-offset indexed memory of the previous conversion.
///
/// Slot `i` describes spans ending after unit `i`. Everything a slot holds is
/// derived from units `0..=i` alone, so after an edit the slots before the
/// first changed unit stay valid.
#[derive(Debug)]
pub struct SegmentationCache {
    slots: Vec<Slot>,
    previous: Option<Reading>,
}

impl SegmentationCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![Slot::default(); capacity],
            previous: None,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// The reading of the last conversion, if any.
    pub fn previous(&self) -> Option<&Reading> {
        self.previous.as_ref()
    }

    /// Forget everything.
    pub fn clear(&mut self) {
        self.invalidate_from(0);
        self.previous = None;
    }

    /// Reset every slot at offset `from` or beyond.
    pub fn invalidate_from(&mut self, from: usize) {
        for slot in self.slots.iter_mut().skip(from) {
            slot.sentence = None;
            slot.clauses.clear();
        }
    }

    /// Drop all sentences but keep clause derivations.
    pub(super) fn clear_sentences(&mut self) {
        for slot in &mut self.slots {
            slot.sentence = None;
        }
    }

    pub(super) fn remember(&mut self, reading: &Reading) {
        self.previous = Some(reading.clone());
    }

    pub fn sentence(&self, index: usize) -> Option<&Sentence> {
        self.slots.get(index)?.sentence.as_ref()
    }

    /// Store `candidate` at `index` if the slot is empty or holds a strictly
    /// lower-scoring sentence.
    pub(super) fn offer(&mut self, index: usize, candidate: Sentence) -> bool {
        let Some(slot) = self.slots.get_mut(index) else {
            return false;
        };
        match &slot.sentence {
            Some(current) if current.frequency() >= candidate.frequency() => false,
            _ => {
                slot.sentence = Some(candidate);
                true
            }
        }
    }

    pub(super) fn clause(&self, start: usize, end: usize, is_final: bool) -> Option<&Clause> {
        let slot = self.slots.get(end.checked_sub(1)?)?;
        slot.clauses.get(&(start, is_final))
    }

    pub(super) fn store_clause(&mut self, start: usize, end: usize, is_final: bool, clause: Clause) {
        if let Some(slot) = end.checked_sub(1).and_then(|i| self.slots.get_mut(i)) {
            slot.clauses.insert((start, is_final), clause);
        }
    }
}
