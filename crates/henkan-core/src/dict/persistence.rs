//! Persistence of the mutable slots (user words, learned words, links).
//!
//! Layout: magic(4) + version(1) + crc32 of body (4, LE) + bincode body.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::memory::{LearnedWord, MemoryDictionary};
use super::{DictError, Word};

const MAGIC: &[u8; 4] = b"HKUD";
const VERSION: u8 = 1;
const HEADER_SIZE: usize = 4 + 1 + 4;

#[derive(Serialize, Deserialize)]
struct LinkRecord {
    prev_reading: String,
    prev_surface: String,
    next: LearnedWord,
}

#[derive(Serialize, Deserialize)]
struct UserData {
    clock: u64,
    user: Vec<Word>,
    learn: Vec<LearnedWord>,
    links: Vec<LinkRecord>,
}

impl MemoryDictionary {
    /// Serialize user and learned data (HKUD format).
    pub fn user_data_to_bytes(&self) -> Result<Vec<u8>, DictError> {
        let mut links: Vec<LinkRecord> = self
            .links
            .iter()
            .flat_map(|((r, s), records)| {
                records.iter().map(move |next| LinkRecord {
                    prev_reading: r.clone(),
                    prev_surface: s.clone(),
                    next: next.clone(),
                })
            })
            .collect();
        // HashMap order is unstable; keep the file deterministic.
        links.sort_by_key(|l| l.next.last_used);

        let data = UserData {
            clock: self.clock,
            user: self.user.values().flatten().cloned().collect(),
            learn: self.learn.values().flatten().cloned().collect(),
            links,
        };
        let body = bincode::serialize(&data).map_err(DictError::Serialize)?;

        let mut buf = Vec::with_capacity(HEADER_SIZE + body.len());
        buf.extend_from_slice(MAGIC);
        buf.push(VERSION);
        buf.extend_from_slice(&crc32fast::hash(&body).to_le_bytes());
        buf.extend_from_slice(&body);
        Ok(buf)
    }

    /// Replace user and learned data with the contents of `bytes`.
    pub fn load_user_data_bytes(&mut self, bytes: &[u8]) -> Result<(), DictError> {
        if bytes.len() < HEADER_SIZE {
            return Err(DictError::InvalidHeader);
        }
        if &bytes[..4] != MAGIC {
            return Err(DictError::InvalidMagic);
        }
        if bytes[4] != VERSION {
            return Err(DictError::UnsupportedVersion(bytes[4]));
        }
        let stored = u32::from_le_bytes([bytes[5], bytes[6], bytes[7], bytes[8]]);
        let body = &bytes[HEADER_SIZE..];
        if crc32fast::hash(body) != stored {
            return Err(DictError::ChecksumMismatch);
        }
        let data: UserData = bincode::deserialize(body).map_err(DictError::Deserialize)?;

        self.user.clear();
        self.learn.clear();
        self.links.clear();
        for word in data.user {
            self.user.entry(word.reading.clone()).or_default().push(word);
        }
        for learned in data.learn {
            self.learn
                .entry(learned.word.reading.clone())
                .or_default()
                .push(learned);
        }
        for link in data.links {
            self.links
                .entry((link.prev_reading, link.prev_surface))
                .or_default()
                .push(link.next);
        }
        self.clock = data.clock;
        Ok(())
    }

    /// Atomic write: write to .tmp then rename.
    pub fn save_user_data(&self, path: &Path) -> Result<(), DictError> {
        let bytes = self.user_data_to_bytes()?;
        let tmp = path.with_extension("tmp");
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&tmp, &bytes)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }

    /// Load user and learned data from a file. A missing file leaves the
    /// dictionary unchanged.
    pub fn load_user_data(&mut self, path: &Path) -> Result<(), DictError> {
        match fs::read(path) {
            Ok(bytes) => self.load_user_data_bytes(&bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
