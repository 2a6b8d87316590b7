//! Readings segmented into conversion units, and per-language profiles.
//!
//! A Japanese reading is converted one character at a time; a Chinese reading
//! one pinyin syllable at a time. Every offset the converters deal with is a
//! unit offset into a `Reading`, never a byte or char offset.

use crate::dict::ApproxPattern;
use crate::pinyin;

/// The segmentation unit of a reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadingUnit {
    /// One unit per Unicode scalar value (kana, latin letters).
    Char,
    /// One unit per pinyin syllable; `'` forces a boundary and is dropped.
    PinyinSyllable,
}

/// A reading string with unit boundaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reading {
    text: String,
    /// Byte offsets of unit boundaries: `bounds[0] == 0`,
    /// `bounds[len] == text.len()`.
    bounds: Vec<usize>,
}

impl Reading {
    pub fn new(text: &str, unit: ReadingUnit) -> Self {
        match unit {
            ReadingUnit::Char => Self::chars(text),
            ReadingUnit::PinyinSyllable => Self::pinyin(text),
        }
    }

    /// Character-unit reading.
    pub fn chars(text: &str) -> Self {
        let mut bounds: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        bounds.push(text.len());
        Self {
            text: text.to_string(),
            bounds,
        }
    }

    /// Pinyin-syllable reading. Separators are removed from the normalized
    /// text but still force a unit boundary.
    pub fn pinyin(text: &str) -> Self {
        let mut normalized = String::with_capacity(text.len());
        let mut bounds = vec![0];
        for part in text.split(pinyin::SEPARATOR) {
            let base = normalized.len();
            normalized.push_str(part);
            bounds.extend(pinyin::split_bounds(part).into_iter().skip(1).map(|b| base + b));
        }
        Self {
            text: normalized,
            bounds,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Number of units.
    pub fn len(&self) -> usize {
        self.bounds.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Text of units `start..end`. Out-of-range or inverted ranges are clamped
    /// to an empty or shorter slice.
    pub fn slice(&self, start: usize, end: usize) -> &str {
        let end = end.min(self.len());
        let start = start.min(end);
        &self.text[self.bounds[start]..self.bounds[end]]
    }

    pub fn unit(&self, index: usize) -> &str {
        self.slice(index, index + 1)
    }

    pub fn units(&self) -> impl Iterator<Item = &str> + '_ {
        self.bounds.windows(2).map(|w| &self.text[w[0]..w[1]])
    }

    /// A new reading over units `start..end`, keeping unit boundaries.
    pub fn span(&self, start: usize, end: usize) -> Reading {
        let end = end.min(self.len());
        let start = start.min(end);
        let base = self.bounds[start];
        Reading {
            text: self.text[base..self.bounds[end]].to_string(),
            bounds: self.bounds[start..=end].iter().map(|b| b - base).collect(),
        }
    }

    /// Number of leading units shared with `other` (same text and same
    /// boundaries).
    pub fn common_prefix_len(&self, other: &Reading) -> usize {
        self.units()
            .zip(other.units())
            .take_while(|(a, b)| a == b)
            .count()
    }
}

/// Language-specific behaviour of one engine instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageProfile {
    pub name: &'static str,
    pub unit: ReadingUnit,
    /// Whether clauses may carry an ancillary word (particles, suffixes).
    pub ancillary: bool,
    /// Retry prediction with one unit fewer at a time when nothing matched.
    pub shrinking_fallback: bool,
    /// Fall back to matching units against syllable initials.
    pub initials_fallback: bool,
    /// Offer the katakana form of the reading when browsing a clause.
    pub katakana_alternative: bool,
    pub approx: Option<ApproxPattern>,
}

impl LanguageProfile {
    pub fn japanese() -> Self {
        Self {
            name: "ja",
            unit: ReadingUnit::Char,
            ancillary: true,
            shrinking_fallback: false,
            initials_fallback: false,
            katakana_alternative: true,
            approx: None,
        }
    }

    pub fn chinese() -> Self {
        Self {
            name: "zh",
            unit: ReadingUnit::PinyinSyllable,
            ancillary: false,
            shrinking_fallback: true,
            initials_fallback: true,
            katakana_alternative: false,
            approx: None,
        }
    }

    pub fn english() -> Self {
        Self {
            name: "en",
            unit: ReadingUnit::Char,
            ancillary: false,
            shrinking_fallback: false,
            initials_fallback: false,
            katakana_alternative: false,
            approx: Some(ApproxPattern::IgnoreCase),
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ja" | "japanese" => Some(Self::japanese()),
            "zh" | "chinese" => Some(Self::chinese()),
            "en" | "english" => Some(Self::english()),
            _ => None,
        }
    }

    pub fn reading(&self, text: &str) -> Reading {
        Reading::new(text, self.unit)
    }
}
