//! Dictionary sources: TSV word lists and dictionary directories.
//!
//! A word list line is `reading<TAB>surface<TAB>left<TAB>right<TAB>freq`
//! with `freq` a raw frequency in 0..=255. Blank lines and `#` comments are
//! skipped.
//!
//! A dictionary directory contains:
//! - `pos.toml`: the POS catalog (optional, defaults apply)
//! - `matrix.bin` or `matrix.txt`: the connection matrix
//! - `system.tsv`, `auxiliary.tsv`, `ancillary.tsv`: word lists (optional)
//! - `user.dat`: persisted user and learned data (optional)

use std::fs;
use std::path::Path;

use tracing::debug;

use super::{ConnectMatrix, DictError, DictSlot, MemoryDictionary, Pos, PosCatalog, Word};

pub const POS_FILE: &str = "pos.toml";
pub const MATRIX_BIN_FILE: &str = "matrix.bin";
pub const MATRIX_TEXT_FILE: &str = "matrix.txt";
pub const USER_DATA_FILE: &str = "user.dat";

/// Word list files and the slot each one fills.
pub const WORD_FILES: [(&str, DictSlot); 3] = [
    ("system.tsv", DictSlot::System),
    ("auxiliary.tsv", DictSlot::Auxiliary),
    ("ancillary.tsv", DictSlot::Ancillary),
];

/// Parse a TSV word list.
pub fn parse_words(text: &str) -> Result<Vec<Word>, DictError> {
    let mut words = Vec::new();
    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() != 5 {
            return Err(DictError::Parse(format!(
                "line {}: expected 5 fields, got {}",
                lineno + 1,
                fields.len()
            )));
        }
        let num = |i: usize, name: &str| -> Result<i64, DictError> {
            fields[i].trim().parse().map_err(|e| {
                DictError::Parse(format!("line {}: invalid {name}: {e}", lineno + 1))
            })
        };
        let left = u16::try_from(num(2, "left")?)
            .map_err(|e| DictError::Parse(format!("line {}: left: {e}", lineno + 1)))?;
        let right = u16::try_from(num(3, "right")?)
            .map_err(|e| DictError::Parse(format!("line {}: right: {e}", lineno + 1)))?;
        let freq = num(4, "freq")?;
        if !(0..=i64::from(super::RAW_FREQ_MAX)).contains(&freq) {
            return Err(DictError::Parse(format!(
                "line {}: frequency {freq} out of range",
                lineno + 1
            )));
        }
        if fields[0].is_empty() || fields[1].is_empty() {
            return Err(DictError::Parse(format!(
                "line {}: empty reading or surface",
                lineno + 1
            )));
        }
        words.push(Word::new(
            fields[0],
            fields[1],
            Pos::new(left, right),
            freq as i32,
        ));
    }
    Ok(words)
}

/// Load a dictionary directory.
pub fn load_dir(dir: &Path) -> Result<MemoryDictionary, DictError> {
    let catalog = match fs::read_to_string(dir.join(POS_FILE)) {
        Ok(text) => PosCatalog::from_toml(&text)?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => PosCatalog::default(),
        Err(e) => return Err(e.into()),
    };

    let bin = dir.join(MATRIX_BIN_FILE);
    let matrix = if bin.exists() {
        ConnectMatrix::open(&bin)?
    } else {
        ConnectMatrix::from_text(&fs::read_to_string(dir.join(MATRIX_TEXT_FILE))?)?
    };

    let mut dict = MemoryDictionary::new(matrix, catalog);
    for (file, slot) in WORD_FILES {
        let path = dir.join(file);
        if !path.exists() {
            continue;
        }
        let words = parse_words(&fs::read_to_string(&path)?)?;
        debug!(file, count = words.len(), "load word list");
        dict.insert_all(slot, words);
    }
    dict.load_user_data(&dir.join(USER_DATA_FILE))?;
    Ok(dict)
}
