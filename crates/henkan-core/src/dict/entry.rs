use serde::{Deserialize, Serialize};

/// Left/right connection classes of a word, indexing the connection matrix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub left: u16,
    pub right: u16,
}

impl Pos {
    pub const fn new(left: u16, right: u16) -> Self {
        Self { left, right }
    }
}

/// A dictionary word as returned by a search.
///
/// `frequency` is the banded score of the search that produced it (higher is
/// better); it is not the raw value stored in the dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Word {
    pub reading: String,
    pub surface: String,
    pub pos: Pos,
    pub frequency: i32,
}

impl Word {
    pub fn new(reading: &str, surface: &str, pos: Pos, frequency: i32) -> Self {
        Self {
            reading: reading.to_string(),
            surface: surface.to_string(),
            pos,
            frequency,
        }
    }
}
