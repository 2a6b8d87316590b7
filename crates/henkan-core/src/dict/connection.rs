use memmap2::Mmap;

pub(super) const MAGIC: &[u8; 4] = b"HKCM";
pub(super) const VERSION: u8 = 1;
/// Header size before the matrix bytes: magic(4) + version(1) + size(2).
pub(super) const HEADER_SIZE: usize = 4 + 1 + 2;

/// Backing storage for matrix cells: either owned or memory-mapped.
pub(super) enum CellStorage {
    Owned(Vec<u8>),
    Mapped(Mmap),
}

/// Square POS connectivity matrix indexed `[left][right]`.
///
/// A non-zero cell `[l][r]` means a word whose right class is `r` may be
/// followed by a word whose left class is `l`.
pub struct ConnectMatrix {
    pub(super) size: u16,
    pub(super) storage: CellStorage,
}

impl ConnectMatrix {
    /// Build an owned matrix. `cells` is row-major (`left * size + right`) and
    /// is truncated or zero-padded to `size * size`.
    pub fn new_owned(size: u16, mut cells: Vec<u8>) -> Self {
        cells.resize(size as usize * size as usize, 0);
        Self {
            size,
            storage: CellStorage::Owned(cells),
        }
    }

    /// A matrix where every class connects to every class.
    pub fn all_connected(size: u16) -> Self {
        Self::new_owned(size, vec![1; size as usize * size as usize])
    }

    /// Empty matrix: nothing connects.
    pub fn empty() -> Self {
        Self::new_owned(0, Vec::new())
    }

    pub fn size(&self) -> u16 {
        self.size
    }

    /// Raw cell `[left][right]`. Out-of-range indices read as 0.
    pub fn cell(&self, left: u16, right: u16) -> u8 {
        if left >= self.size || right >= self.size {
            return 0;
        }
        let idx = left as usize * self.size as usize + right as usize;
        match &self.storage {
            CellStorage::Owned(cells) => cells.get(idx).copied().unwrap_or(0),
            CellStorage::Mapped(mmap) => mmap.get(HEADER_SIZE + idx).copied().unwrap_or(0),
        }
    }

    /// Whether a word ending in class `prev_right` may be followed by a word
    /// starting with class `next_left`.
    pub fn connects(&self, prev_right: u16, next_left: u16) -> bool {
        self.cell(next_left, prev_right) != 0
    }

    /// Set one cell of an owned matrix. Ignored for mapped or out-of-range cells.
    pub fn set(&mut self, left: u16, right: u16, connected: bool) {
        if left >= self.size || right >= self.size {
            return;
        }
        let idx = left as usize * self.size as usize + right as usize;
        if let CellStorage::Owned(cells) = &mut self.storage {
            cells[idx] = u8::from(connected);
        }
    }
}

impl std::fmt::Debug for ConnectMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let storage = match self.storage {
            CellStorage::Owned(_) => "owned",
            CellStorage::Mapped(_) => "mapped",
        };
        f.debug_struct("ConnectMatrix")
            .field("size", &self.size)
            .field("storage", &storage)
            .finish()
    }
}
