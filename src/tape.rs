//! The memory tape and what happens when it is accessed out of range.

use std::str::FromStr;

/// Default number of cells on the tape.
pub const DEFAULT_MEMORY_SIZE: usize = 100;

/// Largest tape that may be requested up front (1 GiB of cells).
pub const MAX_MEMORY_SIZE: usize = 1 << 30;

/// How memory access through an out-of-range data pointer is handled.
///
/// Moving the data pointer is never checked; only reading or writing a cell is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TapePolicy {
    /// Fail with `PointerOutOfBounds`.
    #[default]
    Trap,
    /// Index modulo the tape size.
    Wrap,
    /// Extend the tape with zeroed cells to the right. Negative pointers still trap.
    Grow,
}

impl FromStr for TapePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trap" => Ok(TapePolicy::Trap),
            "wrap" => Ok(TapePolicy::Wrap),
            "grow" => Ok(TapePolicy::Grow),
            other => Err(format!("unknown tape policy '{other}' (expected trap, wrap or grow)")),
        }
    }
}

/// Zero-initialised byte cells.
#[derive(Debug, Clone)]
pub struct Tape {
    cells: Vec<u8>,
    policy: TapePolicy,
}

impl Tape {
    /// A tape of `size` cells. A zero size is bumped to one cell.
    pub fn new(size: usize, policy: TapePolicy) -> Self {
        Self {
            cells: vec![0; size.max(1)],
            policy,
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Read-only view of a cell, without growing the tape.
    /// `None` means the access would trap (or is beyond a growable tape).
    pub fn peek(&self, pointer: isize) -> Option<u8> {
        match self.policy {
            TapePolicy::Wrap => Some(self.cells[self.wrapped(pointer)]),
            TapePolicy::Trap | TapePolicy::Grow => {
                let index = usize::try_from(pointer).ok()?;
                self.cells.get(index).copied()
            }
        }
    }

    /// Mutable access to the cell at `pointer`, applying the policy.
    /// `None` means the access is out of bounds.
    pub fn cell_mut(&mut self, pointer: isize) -> Option<&mut u8> {
        match self.policy {
            TapePolicy::Trap => {
                let index = usize::try_from(pointer).ok()?;
                self.cells.get_mut(index)
            }
            TapePolicy::Wrap => {
                let index = self.wrapped(pointer);
                self.cells.get_mut(index)
            }
            TapePolicy::Grow => {
                let index = usize::try_from(pointer).ok()?;
                if index >= self.cells.len() {
                    self.cells.resize(index + 1, 0);
                }
                self.cells.get_mut(index)
            }
        }
    }

    fn wrapped(&self, pointer: isize) -> usize {
        // `len` is at least 1 and fits in isize since it backs a Vec.
        pointer.rem_euclid(self.cells.len() as isize) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_zeroed_with_requested_size() {
        let tape = Tape::new(DEFAULT_MEMORY_SIZE, TapePolicy::Trap);
        assert_eq!(tape.len(), 100);
        assert!(tape.cells().iter().all(|&c| c == 0));
    }

    #[test]
    fn trap_rejects_out_of_range() {
        let mut tape = Tape::new(3, TapePolicy::Trap);
        assert!(tape.cell_mut(-1).is_none());
        assert!(tape.cell_mut(3).is_none());
        assert!(tape.cell_mut(2).is_some());
        assert_eq!(tape.peek(3), None);
    }

    #[test]
    fn wrap_indexes_modulo_size() {
        let mut tape = Tape::new(3, TapePolicy::Wrap);
        *tape.cell_mut(-1).unwrap() = 7;
        assert_eq!(tape.cells(), &[0, 0, 7]);
        *tape.cell_mut(4).unwrap() = 9;
        assert_eq!(tape.peek(1), Some(9));
        assert_eq!(tape.peek(-2), Some(9));
    }

    #[test]
    fn grow_extends_to_the_right_only() {
        let mut tape = Tape::new(2, TapePolicy::Grow);
        assert_eq!(tape.peek(5), None);
        *tape.cell_mut(5).unwrap() = 1;
        assert_eq!(tape.len(), 6);
        assert_eq!(tape.peek(5), Some(1));
        assert!(tape.cell_mut(-1).is_none());
    }

    #[test]
    fn policy_parses_case_insensitively() {
        assert_eq!("WRAP".parse::<TapePolicy>().unwrap(), TapePolicy::Wrap);
        assert_eq!(" grow ".parse::<TapePolicy>().unwrap(), TapePolicy::Grow);
        assert!("circular".parse::<TapePolicy>().is_err());
    }
}
