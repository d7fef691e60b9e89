//! Program text: loading from disk and filtering down to instructions.

use std::fs;
use std::io;
use std::ops::Index;
use std::path::Path;

use crate::instruction::Instruction;

/// An immutable, 0-indexed instruction stream.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Program {
    symbols: Vec<char>,
}

impl Program {
    /// Build a program from source text, dropping every character that is
    /// not one of `><+-.,[]`.
    pub fn from_source(source: &str) -> Self {
        Self {
            symbols: source.chars().filter(|&c| Instruction::is_symbol(c)).collect(),
        }
    }

    /// Build a program without filtering. Non-instruction characters are kept
    /// and make the engine fail with `InvalidInstruction` when reached.
    pub fn raw(source: &str) -> Self {
        Self {
            symbols: source.chars().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<char> {
        self.symbols.get(index).copied()
    }

    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }
}

impl Index<usize> for Program {
    type Output = char;

    fn index(&self, index: usize) -> &char {
        &self.symbols[index]
    }
}

impl std::fmt::Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for ch in &self.symbols {
            write!(f, "{ch}")?;
        }
        Ok(())
    }
}

/// Read a program file, join its lines without terminators and filter it.
pub fn load(path: impl AsRef<Path>) -> io::Result<Program> {
    let content = fs::read_to_string(path)?;
    let joined: String = content.lines().collect();
    Ok(Program::from_source(&joined))
}
