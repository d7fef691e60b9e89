//! Errors raised while interpreting a program.
//!
//! Every runtime variant carries the instruction index (`index`) that was
//! executing when the failure happened, so diagnostics can point at it.

/// Errors that can occur while interpreting Brainfuck code.
#[derive(Debug, thiserror::Error)]
pub enum InterpreterError {
    /// A `[` has no matching `]` in the rest of the program.
    #[error("Unmatched bracket '[' at instruction {index}")]
    UnmatchedBracket { index: usize },

    /// A `]` tried to jump back but its `[` was never executed.
    #[error("Unpaired closing bracket ']' at instruction {index}")]
    UnpairedClosingBracket { index: usize },

    /// Encountered a character outside the instruction set `><+-.,[]`.
    #[error("Invalid instruction '{ch}' at instruction {index}")]
    InvalidInstruction { ch: char, index: usize },

    /// `,` hit the end of input and the EOF policy is `error`.
    #[error("Input exhausted at instruction {index}")]
    InputExhausted { index: usize },

    /// Memory was accessed through a data pointer outside the tape.
    #[error("Pointer out of bounds at instruction {index} (ptr={pointer})")]
    PointerOutOfBounds { index: usize, pointer: isize },

    /// An underlying I/O error occurred while reading input or writing output.
    #[error("I/O error at instruction {index}: {source}")]
    Io {
        index: usize,
        #[source]
        source: std::io::Error,
    },
}

impl InterpreterError {
    /// Instruction index the error points at.
    pub fn index(&self) -> usize {
        match self {
            InterpreterError::UnmatchedBracket { index }
            | InterpreterError::UnpairedClosingBracket { index }
            | InterpreterError::InvalidInstruction { index, .. }
            | InterpreterError::InputExhausted { index }
            | InterpreterError::PointerOutOfBounds { index, .. }
            | InterpreterError::Io { index, .. } => *index,
        }
    }
}
