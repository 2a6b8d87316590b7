//! In-memory implementation of the dictionary port.
//!
//! Static slots (system, auxiliary, ancillary) are sorted maps from reading to
//! words carrying their raw frequency. The user slot holds registered words up
//! to a fixed capacity. The learn slot holds confirmed words ordered by
//! recency, plus link records (previous word → following word) for link
//! searches; the least recently used entry is evicted at capacity.

use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{
    ConnectMatrix, DictError, DictSlot, Dictionary, FreqBand, Pos, PosKind, SearchConfig,
    SearchMode, SearchOrder, Word, WordQuery, RAW_FREQ_MAX,
};
use crate::settings::settings;

/// The named POS entries a dictionary hands out through `Dictionary::pos`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PosCatalog {
    pub default: Pos,
    pub clause_end: Pos,
    pub sentence_end: Pos,
    pub any_end: Pos,
}

impl PosCatalog {
    pub fn get(&self, kind: PosKind) -> Pos {
        match kind {
            PosKind::Default => self.default,
            PosKind::ClauseEnd => self.clause_end,
            PosKind::SentenceEnd => self.sentence_end,
            PosKind::AnyEnd => self.any_end,
        }
    }

    pub fn from_toml(text: &str) -> Result<Self, DictError> {
        toml::from_str(text).map_err(|e| DictError::Parse(format!("POS catalog: {e}")))
    }
}

impl Default for PosCatalog {
    fn default() -> Self {
        Self {
            default: Pos::new(1, 1),
            clause_end: Pos::new(0, 0),
            sentence_end: Pos::new(0, 0),
            any_end: Pos::new(0, 0),
        }
    }
}

/// A learned word with its last-use tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(super) struct LearnedWord {
    pub(super) word: Word,
    pub(super) last_used: u64,
}

type WordMap = BTreeMap<String, Vec<Word>>;
type LinkKey = (String, String);

pub struct MemoryDictionary {
    system: WordMap,
    auxiliary: WordMap,
    ancillary: WordMap,
    pub(super) user: WordMap,
    pub(super) learn: BTreeMap<String, Vec<LearnedWord>>,
    pub(super) links: HashMap<LinkKey, Vec<LearnedWord>>,
    /// Monotonic learning tick; orders learned words by recency.
    pub(super) clock: u64,
    matrix: ConnectMatrix,
    catalog: PosCatalog,
    max_user_words: usize,
    max_learn_words: usize,
    active: bool,
}

impl MemoryDictionary {
    pub fn new(matrix: ConnectMatrix, catalog: PosCatalog) -> Self {
        let limits = &settings().dictionary;
        Self {
            system: WordMap::new(),
            auxiliary: WordMap::new(),
            ancillary: WordMap::new(),
            user: WordMap::new(),
            learn: BTreeMap::new(),
            links: HashMap::new(),
            clock: 0,
            matrix,
            catalog,
            max_user_words: limits.max_user_words,
            max_learn_words: limits.max_learn_words,
            active: true,
        }
    }

    pub fn with_limits(mut self, max_user_words: usize, max_learn_words: usize) -> Self {
        self.max_user_words = max_user_words;
        self.max_learn_words = max_learn_words;
        self
    }

    /// Insert a word into a slot. `word.frequency` is the raw frequency
    /// (0..=255). User and learn inserts bypass capacity checks.
    pub fn insert(&mut self, slot: DictSlot, word: Word) {
        let mut word = word;
        word.frequency = word.frequency.clamp(0, RAW_FREQ_MAX);
        match slot {
            DictSlot::System => push_unique(&mut self.system, word),
            DictSlot::Auxiliary => push_unique(&mut self.auxiliary, word),
            DictSlot::Ancillary => push_unique(&mut self.ancillary, word),
            DictSlot::User => push_unique(&mut self.user, word),
            DictSlot::Learn => {
                self.clock += 1;
                let tick = self.clock;
                upsert_learned(
                    self.learn.entry(word.reading.clone()).or_default(),
                    word,
                    tick,
                );
            }
        }
    }

    pub fn insert_all(&mut self, slot: DictSlot, words: impl IntoIterator<Item = Word>) {
        for word in words {
            self.insert(slot, word);
        }
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn word_count(&self, slot: DictSlot) -> usize {
        match slot {
            DictSlot::System => count(&self.system),
            DictSlot::Auxiliary => count(&self.auxiliary),
            DictSlot::Ancillary => count(&self.ancillary),
            DictSlot::User => count(&self.user),
            DictSlot::Learn => self.learn.values().map(Vec::len).sum(),
        }
    }

    /// Registered user words, sorted by reading.
    pub fn user_words(&self) -> Vec<Word> {
        self.user.values().flatten().cloned().collect()
    }

    fn static_map(&self, slot: DictSlot) -> &WordMap {
        match slot {
            DictSlot::System => &self.system,
            DictSlot::Auxiliary => &self.auxiliary,
            DictSlot::Ancillary => &self.ancillary,
            _ => &self.user,
        }
    }

    /// Collect matches of one slot, banded, in dictionary order.
    fn collect_slot(
        &self,
        slot: DictSlot,
        band: FreqBand,
        mode: SearchMode,
        key: &str,
        approx: bool,
        out: &mut Vec<Word>,
    ) {
        let matches = |reading: &str| -> bool {
            let reading = if approx {
                reading.to_lowercase()
            } else {
                reading.to_string()
            };
            match mode {
                SearchMode::Exact => reading == key,
                _ => reading.starts_with(key),
            }
        };
        let banded = |word: &Word| Word {
            frequency: band.scale(word.frequency),
            ..word.clone()
        };

        if slot == DictSlot::Learn {
            let mut found: Vec<&LearnedWord> = if approx {
                self.learn
                    .iter()
                    .filter(|(r, _)| matches(r))
                    .flat_map(|(_, v)| v)
                    .collect()
            } else {
                match mode {
                    SearchMode::Exact => self.learn.get(key).into_iter().flatten().collect(),
                    _ => prefix_range(&self.learn, key).flat_map(|(_, v)| v).collect(),
                }
            };
            found.sort_by(|a, b| b.last_used.cmp(&a.last_used));
            out.extend(found.into_iter().map(|l| banded(&l.word)));
            return;
        }

        let map = self.static_map(slot);
        if approx {
            out.extend(
                map.iter()
                    .filter(|(r, _)| matches(r))
                    .flat_map(|(_, v)| v)
                    .map(banded),
            );
            return;
        }
        match mode {
            SearchMode::Exact => out.extend(map.get(key).into_iter().flatten().map(banded)),
            _ => out.extend(prefix_range(map, key).flat_map(|(_, v)| v).map(banded)),
        }
    }

    fn collect_links(&self, band: FreqBand, key: &str, previous: &Word, out: &mut Vec<Word>) {
        let link_key = (previous.reading.clone(), previous.surface.clone());
        let Some(records) = self.links.get(&link_key) else {
            return;
        };
        let mut found: Vec<&LearnedWord> = records
            .iter()
            .filter(|l| l.word.reading.starts_with(key))
            .collect();
        found.sort_by(|a, b| b.last_used.cmp(&a.last_used));
        out.extend(found.into_iter().map(|l| Word {
            frequency: band.scale(l.word.frequency),
            ..l.word.clone()
        }));
    }

    /// Drop the least recently used learned words until within capacity,
    /// together with the link records that point at them.
    fn evict_learned(&mut self) {
        while self.word_count(DictSlot::Learn) > self.max_learn_words {
            let oldest = self
                .learn
                .iter()
                .flat_map(|(r, v)| v.iter().map(move |l| (r, l)))
                .min_by_key(|(_, l)| l.last_used)
                .map(|(r, l)| (r.clone(), l.word.surface.clone()));
            let Some((reading, surface)) = oldest else {
                break;
            };
            debug!(reading = %reading, surface = %surface, "evict learned word");
            if let Some(list) = self.learn.get_mut(&reading) {
                list.retain(|l| l.word.surface != surface);
                if list.is_empty() {
                    self.learn.remove(&reading);
                }
            }
            self.links.remove(&(reading.clone(), surface.clone()));
            self.links.retain(|_, records| {
                records.retain(|l| !(l.word.reading == reading && l.word.surface == surface));
                !records.is_empty()
            });
        }
    }
}

fn count(map: &WordMap) -> usize {
    map.values().map(Vec::len).sum()
}

fn prefix_range<'a, V>(
    map: &'a BTreeMap<String, V>,
    key: &'a str,
) -> impl Iterator<Item = (&'a String, &'a V)> + 'a {
    map.range::<str, _>((Bound::Included(key), Bound::Unbounded))
        .take_while(move |(r, _)| r.starts_with(key))
}

/// Insert, keeping the higher raw frequency on an exact (reading, surface, POS)
/// duplicate.
fn push_unique(map: &mut WordMap, word: Word) {
    let list = map.entry(word.reading.clone()).or_default();
    match list
        .iter_mut()
        .find(|w| w.surface == word.surface && w.pos == word.pos)
    {
        Some(existing) => existing.frequency = existing.frequency.max(word.frequency),
        None => list.push(word),
    }
}

fn upsert_learned(list: &mut Vec<LearnedWord>, word: Word, tick: u64) {
    match list.iter_mut().find(|l| l.word.surface == word.surface) {
        Some(existing) => {
            existing.word.pos = word.pos;
            existing.last_used = tick;
        }
        None => list.push(LearnedWord {
            word,
            last_used: tick,
        }),
    }
}

fn validate(word: &Word) -> Result<(), DictError> {
    if word.reading.is_empty() {
        return Err(DictError::InvalidWord("empty reading".to_string()));
    }
    if word.surface.is_empty() {
        return Err(DictError::InvalidWord("empty surface".to_string()));
    }
    Ok(())
}

impl Dictionary for MemoryDictionary {
    fn search(
        &self,
        config: &SearchConfig,
        mode: SearchMode,
        order: SearchOrder,
        key: &str,
        previous: Option<&Word>,
    ) -> WordQuery {
        if !self.active || config.is_empty() {
            return WordQuery::empty();
        }
        let approx = config.approx();
        let key = match approx {
            Some(pattern) => pattern.normalize(key),
            None => key.to_string(),
        };

        let mut words = Vec::new();
        match mode {
            SearchMode::Exact | SearchMode::Prefix => {
                for &(slot, band) in config.slots() {
                    self.collect_slot(slot, band, mode, &key, approx.is_some(), &mut words);
                }
            }
            SearchMode::Link => {
                if let (Some(prev), Some(band)) = (previous, config.band(DictSlot::Learn)) {
                    self.collect_links(band, &key, prev, &mut words);
                }
            }
        }

        // Same word from several slots: keep the best-scoring occurrence at
        // the position of its first appearance.
        let mut seen: HashMap<(String, String, Pos), usize> = HashMap::new();
        let mut unique: Vec<Word> = Vec::with_capacity(words.len());
        for word in words {
            let id = (word.reading.clone(), word.surface.clone(), word.pos);
            match seen.get(&id) {
                Some(&i) => unique[i].frequency = unique[i].frequency.max(word.frequency),
                None => {
                    seen.insert(id, unique.len());
                    unique.push(word);
                }
            }
        }

        match order {
            SearchOrder::ByFrequency => unique.sort_by(|a, b| b.frequency.cmp(&a.frequency)),
            SearchOrder::ByReading => unique.sort_by(|a, b| {
                a.reading
                    .cmp(&b.reading)
                    .then(b.frequency.cmp(&a.frequency))
            }),
        }
        WordQuery::from_words(unique)
    }

    fn pos(&self, kind: PosKind) -> Pos {
        self.catalog.get(kind)
    }

    fn connect_matrix(&self) -> &ConnectMatrix {
        &self.matrix
    }

    fn learn_word(&mut self, word: &Word, previous: Option<&Word>) -> Result<(), DictError> {
        if !self.active {
            return Err(DictError::Inactive);
        }
        validate(word)?;
        let mut stored = word.clone();
        stored.frequency = RAW_FREQ_MAX;
        self.insert(DictSlot::Learn, stored.clone());

        if let Some(prev) = previous {
            let tick = self.clock;
            let records = self
                .links
                .entry((prev.reading.clone(), prev.surface.clone()))
                .or_default();
            upsert_learned(records, stored, tick);
        }
        self.evict_learned();
        debug!(reading = %word.reading, surface = %word.surface, "learn word");
        Ok(())
    }

    fn add_user_word(&mut self, word: &Word) -> Result<(), DictError> {
        if !self.active {
            return Err(DictError::Inactive);
        }
        validate(word)?;
        if self
            .user
            .get(&word.reading)
            .is_some_and(|list| list.iter().any(|w| w.surface == word.surface))
        {
            return Err(DictError::DuplicateWord {
                reading: word.reading.clone(),
                surface: word.surface.clone(),
            });
        }
        if count(&self.user) >= self.max_user_words {
            return Err(DictError::UserDictionaryFull(self.max_user_words));
        }
        let mut stored = word.clone();
        stored.frequency = RAW_FREQ_MAX;
        self.user
            .entry(stored.reading.clone())
            .or_default()
            .push(stored);
        Ok(())
    }

    fn remove_user_word(&mut self, word: &Word) -> Result<(), DictError> {
        if !self.active {
            return Err(DictError::Inactive);
        }
        let not_found = || DictError::WordNotFound {
            reading: word.reading.clone(),
            surface: word.surface.clone(),
        };
        let list = self.user.get_mut(&word.reading).ok_or_else(not_found)?;
        let before = list.len();
        list.retain(|w| w.surface != word.surface);
        if list.len() == before {
            return Err(not_found());
        }
        if list.is_empty() {
            self.user.remove(&word.reading);
        }
        Ok(())
    }

    fn clear_user_dictionary(&mut self) {
        self.user.clear();
    }

    fn clear_learn_dictionary(&mut self) {
        self.learn.clear();
        self.links.clear();
    }

    fn is_active(&self) -> bool {
        self.active
    }
}
