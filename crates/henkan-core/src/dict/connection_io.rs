use std::fs::{self, File};
use std::path::Path;

use memmap2::Mmap;

use super::connection::{CellStorage, ConnectMatrix, HEADER_SIZE, MAGIC, VERSION};
use super::DictError;

impl ConnectMatrix {
    /// Build from the text format: line 1 is the class count `N`, followed
    /// by `N` rows of `N` cells (`0`/`1`, whitespace optional between cells).
    /// Blank lines and lines starting with `#` are ignored.
    pub fn from_text(text: &str) -> Result<Self, DictError> {
        let mut lines = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'));

        let header = lines
            .next()
            .ok_or_else(|| DictError::Parse("empty file".to_string()))?;
        let size: u16 = header
            .parse()
            .map_err(|e| DictError::Parse(format!("invalid size '{header}': {e}")))?;
        let n = size as usize;

        let mut cells = Vec::with_capacity(n * n);
        for (row, line) in lines.enumerate() {
            if row >= n {
                return Err(DictError::Parse(format!("expected {n} rows, got more")));
            }
            let before = cells.len();
            for c in line.chars().filter(|c| !c.is_whitespace()) {
                match c {
                    '0' => cells.push(0),
                    '1' => cells.push(1),
                    other => {
                        return Err(DictError::Parse(format!(
                            "row {row}: invalid cell '{other}'"
                        )));
                    }
                }
            }
            let width = cells.len() - before;
            if width != n {
                return Err(DictError::Parse(format!(
                    "row {row}: expected {n} cells, got {width}"
                )));
            }
        }
        if cells.len() != n * n {
            return Err(DictError::Parse(format!(
                "expected {n} rows, got {}",
                cells.len() / n.max(1)
            )));
        }
        Ok(Self::new_owned(size, cells))
    }

    /// Validate a binary header and return the class count.
    fn validate_header(data: &[u8]) -> Result<u16, DictError> {
        if data.len() < HEADER_SIZE {
            return Err(DictError::InvalidHeader);
        }
        if &data[..4] != MAGIC {
            return Err(DictError::InvalidMagic);
        }
        let version = data[4];
        if version != VERSION {
            return Err(DictError::UnsupportedVersion(version));
        }
        let size = u16::from_le_bytes([data[5], data[6]]);
        let expected = size as usize * size as usize;
        let actual = data.len() - HEADER_SIZE;
        if actual != expected {
            return Err(DictError::Parse(format!(
                "expected {expected} bytes of matrix data, got {actual}"
            )));
        }
        Ok(size)
    }

    /// Load from the compiled binary format using memory-mapped I/O.
    pub fn open(path: &Path) -> Result<Self, DictError> {
        let file = File::open(path)?;
        // SAFETY: The file is opened read-only and the mapping is immutable.
        // The Mmap lives as long as this struct; the file must not be
        // modified while the engine is running.
        let mmap = unsafe { Mmap::map(&file)? };
        let size = Self::validate_header(&mmap)?;
        Ok(Self {
            size,
            storage: CellStorage::Mapped(mmap),
        })
    }

    /// Parse the compiled binary format into an owned matrix.
    pub fn from_bytes(data: &[u8]) -> Result<Self, DictError> {
        let size = Self::validate_header(data)?;
        Ok(Self::new_owned(size, data[HEADER_SIZE..].to_vec()))
    }

    /// Serialize to the compiled binary format.
    pub fn to_bytes(&self) -> Vec<u8> {
        let n = self.size as usize;
        let mut buf = Vec::with_capacity(HEADER_SIZE + n * n);
        buf.extend_from_slice(MAGIC);
        buf.push(VERSION);
        buf.extend_from_slice(&self.size.to_le_bytes());
        match &self.storage {
            CellStorage::Owned(cells) => buf.extend_from_slice(cells),
            CellStorage::Mapped(mmap) => buf.extend_from_slice(&mmap[HEADER_SIZE..]),
        }
        buf
    }

    /// Save the compiled binary to a file.
    pub fn save(&self, path: &Path) -> Result<(), DictError> {
        Ok(fs::write(path, self.to_bytes())?)
    }
}
