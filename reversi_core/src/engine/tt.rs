#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TTFlag {
    Exact,
    LowerBound, // Beta cutoff (fail-high)
    UpperBound, // Alpha cutoff (fail-low)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TTEntry {
    pub key: u64,
    pub score: i32,
    pub depth: u8,
    pub flag: TTFlag,
}

pub struct TranspositionTable {
    entries: Vec<Option<TTEntry>>,
    mask: usize,
}

const MIN_ENTRIES: usize = 1024;

impl TranspositionTable {
    pub fn new(size_mb: usize) -> Self {
        let entry_size = std::mem::size_of::<Option<TTEntry>>();
        let num_entries = (size_mb * 1024 * 1024) / entry_size;

        // Power of 2 size for efficient masking
        let mut size = 1;
        while size <= num_entries {
            size *= 2;
        }
        size /= 2; // Keep it within memory limit

        if size < MIN_ENTRIES {
            size = MIN_ENTRIES;
        }

        Self {
            entries: vec![None; size],
            mask: size - 1,
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    const fn index(&self, key: u64) -> usize {
        (key as usize) & self.mask
    }

    /// Entry for exactly this key; a slot held by another position is a miss.
    pub fn probe(&self, key: u64) -> Option<TTEntry> {
        self.entries
            .get(self.index(key))
            .copied()
            .flatten()
            .filter(|entry| entry.key == key)
    }

    pub fn store(&mut self, key: u64, score: i32, depth: u8, flag: TTFlag) {
        let idx = self.index(key);
        let Some(slot) = self.entries.get_mut(idx) else {
            return;
        };

        // Replace on collision, or when the new result is at least as deep.
        let replace = match slot {
            None => true,
            Some(entry) => entry.key != key || depth >= entry.depth,
        };

        if replace {
            *slot = Some(TTEntry {
                key,
                score,
                depth,
                flag,
            });
        }
    }

    pub fn clear(&mut self) {
        for entry in &mut self.entries {
            *entry = None;
        }
    }

    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Occupied slots.
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(Option::is_none)
    }
}
