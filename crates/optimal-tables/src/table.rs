//! Flat distance table indexed by encoded state.

/// Entry value for states the traversal never reached.
pub const UNREACHED: i32 = -1;

/// One signed distance per encodable state.
///
/// Entries only ever move from [`UNREACHED`] to a concrete distance; a
/// recorded distance is never overwritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceTable {
    entries: Vec<i32>,
}

impl DistanceTable {
    /// Allocate `len` unreached entries, or `None` if the memory is unavailable.
    pub fn try_new(len: usize) -> Option<Self> {
        let mut entries = Vec::new();
        entries.try_reserve_exact(len).ok()?;
        entries.resize(len, UNREACHED);
        Some(Self { entries })
    }

    pub fn from_entries(entries: Vec<i32>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distance at `index`, `None` if unreached or out of range.
    pub fn get(&self, index: usize) -> Option<i32> {
        self.entries.get(index).copied().filter(|&d| d >= 0)
    }

    pub fn is_reached(&self, index: usize) -> bool {
        self.get(index).is_some()
    }

    /// Record a first-visit distance. Returns `false` if the entry was already set.
    pub fn record(&mut self, index: usize, distance: i32) -> bool {
        debug_assert!(distance >= 0);
        match self.entries.get_mut(index) {
            Some(slot) if *slot == UNREACHED => {
                *slot = distance;
                true
            }
            _ => false,
        }
    }

    /// Raw entries in index order, sentinel included.
    pub fn entries(&self) -> &[i32] {
        &self.entries
    }

    pub fn reached(&self) -> usize {
        self.entries.iter().filter(|&&d| d >= 0).count()
    }

    pub fn max_distance(&self) -> Option<i32> {
        self.entries.iter().copied().filter(|&d| d >= 0).max()
    }

    /// Number of states at each distance `0..=max_distance`.
    pub fn histogram(&self) -> Vec<usize> {
        let mut counts = vec![0; self.max_distance().map_or(0, |d| d as usize + 1)];
        for &d in &self.entries {
            if d >= 0 {
                counts[d as usize] += 1;
            }
        }
        counts
    }
}
