//! Loop bracket matching.
//!
//! Brackets are resolved lazily: a `[` is only paired with its `]` the first
//! time it executes, and the pair is remembered in both directions so later
//! iterations (and the `]` jumping back) never rescan the program.

use std::collections::HashMap;

use crate::error::InterpreterError;
use crate::instruction::Instruction;

/// Find the `]` matching the `[` at `open_index` by depth counting.
///
/// Fails with [`InterpreterError::UnmatchedBracket`] if the program ends
/// before the depth returns to zero.
pub fn resolve_closing(symbols: &[char], open_index: usize) -> Result<usize, InterpreterError> {
    let mut depth: isize = 1;

    for (index, &ch) in symbols.iter().enumerate().skip(open_index + 1) {
        match ch {
            Instruction::OPEN => depth += 1,
            Instruction::CLOSE => depth -= 1,
            _ => continue,
        }
        if depth == 0 {
            return Ok(index);
        }
    }

    Err(InterpreterError::UnmatchedBracket { index: open_index })
}

/// Memoised bracket pairs, indexed both ways.
#[derive(Debug, Default, Clone)]
pub struct BracketCache {
    closing: HashMap<usize, usize>,
    opening: HashMap<usize, usize>,
}

impl BracketCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Matching `]` for the `[` at `open`, resolving and recording the pair
    /// on first use. Nothing is recorded when resolution fails.
    pub fn closing_for(&mut self, symbols: &[char], open: usize) -> Result<usize, InterpreterError> {
        if let Some(&close) = self.closing.get(&open) {
            return Ok(close);
        }
        let close = resolve_closing(symbols, open)?;
        self.closing.insert(open, close);
        self.opening.insert(close, open);
        Ok(close)
    }

    /// Matching `[` for the `]` at `close`, if that pair was resolved already.
    pub fn opening_for(&self, close: usize) -> Option<usize> {
        self.opening.get(&close).copied()
    }

    pub fn len(&self) -> usize {
        self.closing.len()
    }

    pub fn is_empty(&self) -> bool {
        self.closing.is_empty()
    }

    /// Resolved `(open, close)` pairs, sorted by opener.
    pub fn pairs(&self) -> Vec<(usize, usize)> {
        let mut pairs: Vec<_> = self.closing.iter().map(|(&o, &c)| (o, c)).collect();
        pairs.sort_unstable();
        pairs
    }
}
