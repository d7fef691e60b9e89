//! A tiny Brainfuck interpreter library.
//!
//! The interpreter runs a program over a memory tape (100 cells by default)
//! with a single data pointer.
//!
//! Features and behaviors:
//! - Memory tape initialized to 0; cells wrap at the byte boundaries.
//! - Loop brackets are paired lazily: a `[` is matched with its `]` the first
//!   time it executes, and the pair is cached in both directions.
//! - Malformed brackets are only reported when the offending instruction runs.
//! - Out-of-range memory access traps by default (see [`TapePolicy`]).
//! - Input `,` reads a single byte; end of input is an error by default (see [`EofPolicy`]).
//! - Output `.` writes the byte at the current cell.
//!
//! Quick start:
//!
//! ```no_run
//! use tapebf::{Engine, Program};
//!
//! // Classic "Hello World!" in Brainfuck
//! let code = "++++++++++[>+++++++>++++++++++>+++>+<<<<-]>++.>+.+++++++..+++.>++.<<+++++++++++++++.>.+++.------.--------.>+.>.";
//! let mut bf = Engine::new(Program::from_source(code));
//! bf.run().expect("program should run");
//! ```

pub mod brackets;
pub mod cli_util;
pub mod config;
pub mod engine;
pub mod error;
pub mod instruction;
pub mod program;
pub mod tape;
mod theme;

pub use brackets::{BracketCache, resolve_closing};
pub use config::{Config, ConfigError};
pub use engine::{Effect, Engine, EofPolicy};
pub use error::InterpreterError;
pub use instruction::Instruction;
pub use program::Program;
pub use tape::{DEFAULT_MEMORY_SIZE, MAX_MEMORY_SIZE, Tape, TapePolicy};
