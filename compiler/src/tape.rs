// tape.rs: Simulated tape state
//
// Mirror of the memory the generated program will see at runtime. One
// TapeState is owned by exactly one in-progress build and threaded
// explicitly through the resolver and encoder.

use crate::registry::MemoryProfile;

/// Current simulated cell values plus the simulated pointer position.
///
/// Invariant maintained by the encoder: after every emitted fragment the
/// simulated tape matches what the real tape holds at that point of the
/// generated program, and `pointer` is the cell the last movement run
/// ended on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TapeState {
    pub cells: Vec<i32>,
    pub pointer: usize,
}

impl TapeState {
    /// Fresh tape as left behind by a profile's init snippet: cells equal
    /// to the seed values, pointer at cell 0.
    pub fn new(seeds: &[i32]) -> Self {
        TapeState {
            cells: seeds.to_vec(),
            pointer: 0,
        }
    }

    pub fn from_profile(profile: &MemoryProfile) -> Self {
        Self::new(&profile.seeds)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;

    #[test]
    fn starts_at_profile_seeds_with_pointer_zero() {
        let registry = Registry::with_builtins();
        let profile = registry.lookup("32C").unwrap();
        let tape = TapeState::from_profile(profile);
        assert_eq!(tape.cells, vec![0, 0, 0, 32, 64, 96, 128]);
        assert_eq!(tape.pointer, 0);
    }

    #[test]
    fn independent_copies_per_build() {
        let registry = Registry::with_builtins();
        let profile = registry.lookup("32C").unwrap();
        let mut first = TapeState::from_profile(profile);
        first.cells[4] = 72;
        let second = TapeState::from_profile(profile);
        assert_eq!(second.cells[4], 64);
    }
}
