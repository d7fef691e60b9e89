//! The execution engine.
//!
//! The engine owns the program, the memory tape, both pointers and the
//! bracket cache. It runs a plain fetch-decode-execute loop until the
//! instruction pointer falls off the end of the program.
//!
//! Behaviour summary:
//! - Pointer moves are unchecked; accessing a cell out of range follows the
//!   configured [`TapePolicy`] (trap by default).
//! - `+`/`-` wrap at the byte boundaries.
//! - `.` writes the current cell as one raw byte.
//! - `,` reads one byte; end of input follows the [`EofPolicy`] (error by default).
//! - `[` resolves its `]` the first time it runs; a `]` that needs to jump back
//!   to an opener that never ran fails with `UnpairedClosingBracket`.

use std::fmt;
use std::io::{self, Read, Write};
use std::str::FromStr;

use crate::brackets::BracketCache;
use crate::config::Config;
use crate::error::InterpreterError;
use crate::instruction::Instruction;
use crate::program::Program;
use crate::tape::{DEFAULT_MEMORY_SIZE, Tape, TapePolicy};

/// What `,` does once the input stream is exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EofPolicy {
    /// Fail with `InputExhausted`.
    #[default]
    Error,
    /// Store 0 in the current cell.
    Zero,
    /// Store 255 in the current cell (a -1 read result truncated to a byte).
    Max,
    /// Leave the current cell as it is.
    Unchanged,
}

impl FromStr for EofPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" => Ok(EofPolicy::Error),
            "zero" => Ok(EofPolicy::Zero),
            "max" | "255" => Ok(EofPolicy::Max),
            "unchanged" => Ok(EofPolicy::Unchanged),
            other => Err(format!("unknown EOF policy '{other}' (expected error, zero, max or unchanged)")),
        }
    }
}

/// The observable result of executing one instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    MovedPointer { to: isize },
    Incremented { at: isize, from: u8, to: u8 },
    Decremented { at: isize, from: u8, to: u8 },
    Output(u8),
    Input(u8),
    /// End of input; `cell` is the value left in the current cell.
    InputEof { cell: u8 },
    EnteredLoop,
    SkippedLoop { to: usize },
    RepeatedLoop { to: usize },
    ExitedLoop,
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Effect::MovedPointer { to } => write!(f, "Moved pointer head to index {to}"),
            Effect::Incremented { at, from, to } => write!(f, "Increment cell[{at}] from {from} to {to}"),
            Effect::Decremented { at, from, to } => write!(f, "Decrement cell[{at}] from {from} to {to}"),
            Effect::Output(b) => write!(f, "Output byte {b}"),
            Effect::Input(b) => write!(f, "Read byte from input -> {b}"),
            Effect::InputEof { cell } => write!(f, "End of input; cell is {cell}"),
            Effect::EnteredLoop => write!(f, "Enter loop (cell != 0)"),
            Effect::SkippedLoop { to } => write!(f, "Cell is 0; jump forward to matching ']' at IP {to}"),
            Effect::RepeatedLoop { to } => write!(f, "Cell != 0; jump back to matching '[' at IP {to}"),
            Effect::ExitedLoop => write!(f, "Exit loop (cell is 0)"),
        }
    }
}

/// A Brainfuck interpreter instance.
pub struct Engine {
    program: Program,
    tape: Tape,
    data_pointer: isize,
    instruction_pointer: usize,
    cache: BracketCache,
    eof: EofPolicy,
}

impl Engine {
    /// Create an engine with a 100-cell trapping tape and fatal EOF.
    pub fn new(program: Program) -> Self {
        Self::with_parts(program, Tape::new(DEFAULT_MEMORY_SIZE, TapePolicy::Trap), EofPolicy::Error)
    }

    pub fn with_config(program: Program, config: &Config) -> Self {
        Self::with_parts(program, Tape::new(config.memory_size, config.tape), config.eof)
    }

    fn with_parts(program: Program, tape: Tape, eof: EofPolicy) -> Self {
        Self {
            program,
            tape,
            data_pointer: 0,
            instruction_pointer: 0,
            cache: BracketCache::new(),
            eof,
        }
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn memory(&self) -> &[u8] {
        self.tape.cells()
    }

    pub fn data_pointer(&self) -> isize {
        self.data_pointer
    }

    pub fn instruction_pointer(&self) -> usize {
        self.instruction_pointer
    }

    pub fn cache(&self) -> &BracketCache {
        &self.cache
    }

    pub fn is_halted(&self) -> bool {
        self.instruction_pointer >= self.program.len()
    }

    /// Execute the instruction under the instruction pointer.
    ///
    /// Returns `Ok(None)` once the program has halted.
    pub fn step<R, W>(&mut self, input: &mut R, output: &mut W) -> Result<Option<Effect>, InterpreterError>
    where
        R: Read + ?Sized,
        W: Write + ?Sized,
    {
        let ip = self.instruction_pointer;
        let Some(ch) = self.program.get(ip) else {
            return Ok(None);
        };
        let instr = Instruction::decode(ch).ok_or(InterpreterError::InvalidInstruction { ch, index: ip })?;
        let io_err = |source: io::Error| InterpreterError::Io { index: ip, source };

        let effect = match instr {
            Instruction::IncrementPointer => {
                self.data_pointer += 1;
                Effect::MovedPointer { to: self.data_pointer }
            }
            Instruction::DecrementPointer => {
                self.data_pointer -= 1;
                Effect::MovedPointer { to: self.data_pointer }
            }
            Instruction::IncrementCell => {
                let at = self.data_pointer;
                let cell = self.cell_mut()?;
                let from = *cell;
                *cell = from.wrapping_add(1);
                Effect::Incremented { at, from, to: *cell }
            }
            Instruction::DecrementCell => {
                let at = self.data_pointer;
                let cell = self.cell_mut()?;
                let from = *cell;
                *cell = from.wrapping_sub(1);
                Effect::Decremented { at, from, to: *cell }
            }
            Instruction::Output => {
                let byte = *self.cell_mut()?;
                output.write_all(&[byte]).map_err(io_err)?;
                Effect::Output(byte)
            }
            Instruction::Input => {
                let eof = self.eof;
                let cell = self.cell_mut()?;
                // Make anything the program printed so far visible before blocking.
                output.flush().map_err(io_err)?;
                match read_byte(input).map_err(io_err)? {
                    Some(byte) => {
                        *cell = byte;
                        Effect::Input(byte)
                    }
                    None => match eof {
                        EofPolicy::Error => return Err(InterpreterError::InputExhausted { index: ip }),
                        EofPolicy::Zero => {
                            *cell = 0;
                            Effect::InputEof { cell: 0 }
                        }
                        EofPolicy::Max => {
                            *cell = u8::MAX;
                            Effect::InputEof { cell: u8::MAX }
                        }
                        EofPolicy::Unchanged => Effect::InputEof { cell: *cell },
                    },
                }
            }
            Instruction::JumpIfZero => {
                let close = self.cache.closing_for(self.program.symbols(), ip)?;
                if *self.cell_mut()? == 0 {
                    self.instruction_pointer = close;
                    Effect::SkippedLoop { to: close }
                } else {
                    Effect::EnteredLoop
                }
            }
            Instruction::JumpIfNotZero => {
                if *self.cell_mut()? != 0 {
                    let open = self
                        .cache
                        .opening_for(ip)
                        .ok_or(InterpreterError::UnpairedClosingBracket { index: ip })?;
                    self.instruction_pointer = open;
                    Effect::RepeatedLoop { to: open }
                } else {
                    Effect::ExitedLoop
                }
            }
        };

        // Move to the next instruction
        self.instruction_pointer += 1;
        Ok(Some(effect))
    }

    /// Run the program to completion over the given streams.
    pub fn run_with_io<R, W>(&mut self, input: &mut R, output: &mut W) -> Result<(), InterpreterError>
    where
        R: Read + ?Sized,
        W: Write + ?Sized,
    {
        let result = loop {
            match self.step(input, output) {
                Ok(Some(_)) => {}
                Ok(None) => break Ok(()),
                Err(e) => break Err(e),
            }
        };
        self.finish(output, result)
    }

    /// Run the program to completion over stdin/stdout.
    pub fn run(&mut self) -> Result<(), InterpreterError> {
        let mut input = io::stdin().lock();
        let mut output = io::stdout().lock();
        self.run_with_io(&mut input, &mut output)
    }

    /// Like [`Engine::run_with_io`], but also writes one table row per executed
    /// instruction to `trace`.
    pub fn run_traced<R, W, T>(&mut self, input: &mut R, output: &mut W, trace: &mut T) -> Result<(), InterpreterError>
    where
        R: Read + ?Sized,
        W: Write + ?Sized,
        T: Write + ?Sized,
    {
        let trace_err = |index: usize| move |source: io::Error| InterpreterError::Io { index, source };

        writeln!(trace, "STEP | IP  | PTR | CELL | INSTR | ACTION").map_err(trace_err(0))?;
        writeln!(trace, "-----+-----+-----+------+-------+------------------------------------------------")
            .map_err(trace_err(0))?;

        let mut step: usize = 0;
        let result = loop {
            let ip = self.instruction_pointer;
            let ptr = self.data_pointer;
            let cell = self
                .tape
                .peek(ptr)
                .map_or_else(|| "-".to_string(), |c| c.to_string());
            let instr = self.program.get(ip).unwrap_or(' ');

            match self.step(input, output) {
                Ok(Some(effect)) => {
                    if let Err(e) = writeln!(trace, "{step:<4} | {ip:<3} | {ptr:<3} | {cell:<4} |  {instr}    | {effect}") {
                        break Err(trace_err(ip)(e));
                    }
                    step += 1;
                }
                Ok(None) => break Ok(()),
                Err(e) => break Err(e),
            }
        };
        let traced = trace.flush().map_err(trace_err(self.instruction_pointer));
        self.finish(output, result.and(traced))
    }

    fn finish<W>(&self, output: &mut W, result: Result<(), InterpreterError>) -> Result<(), InterpreterError>
    where
        W: Write + ?Sized,
    {
        // Output produced before a failure is still delivered.
        let flushed = output.flush();
        result?;
        flushed.map_err(|source| InterpreterError::Io {
            index: self.instruction_pointer,
            source,
        })
    }

    fn cell_mut(&mut self) -> Result<&mut u8, InterpreterError> {
        let (index, pointer) = (self.instruction_pointer, self.data_pointer);
        self.tape
            .cell_mut(pointer)
            .ok_or(InterpreterError::PointerOutOfBounds { index, pointer })
    }
}

/// Read exactly one byte; `Ok(None)` on EOF.
fn read_byte<R: Read + ?Sized>(input: &mut R) -> io::Result<Option<u8>> {
    let mut buf = [0u8; 1];
    loop {
        match input.read(&mut buf) {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(buf[0])),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}
