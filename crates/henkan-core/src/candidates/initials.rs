use crate::dict::{Dictionary, SearchConfig, SearchMode, SearchOrder, Word};
use crate::pinyin;
use crate::reading::Reading;

/// Whether `word_reading` splits into exactly as many syllables as `reading`
/// has units, each syllable starting with the corresponding unit.
///
/// `zg` matches `zhongguo`; `zgr` does not.
pub fn matches_initials(word_reading: &str, reading: &Reading) -> bool {
    let syllables = pinyin::split(word_reading);
    syllables.len() == reading.len()
        && syllables
            .iter()
            .zip(reading.units())
            .all(|(syllable, unit)| syllable.starts_with(unit))
}

/// Words whose syllable initials spell `reading`, best first.
///
/// Scans at most `scan_limit` prefix matches of the first letter and keeps
/// at most `limit` of them.
pub fn predict_by_initials(
    dict: &dyn Dictionary,
    config: &SearchConfig,
    reading: &Reading,
    limit: usize,
    scan_limit: usize,
) -> Vec<Word> {
    let Some(first) = reading.as_str().chars().next() else {
        return Vec::new();
    };
    let key = first.to_string();
    dict.search(config, SearchMode::Prefix, SearchOrder::ByFrequency, &key, None)
        .take(scan_limit)
        .filter(|w| matches_initials(&w.reading, reading))
        .take(limit)
        .collect()
}
