use std::io::{self, IsTerminal, Write};

use nu_ansi_term::Style;

use crate::InterpreterError;
use crate::theme::catppuccin::Mocha;

/// Show this many instructions on each side of the caret.
const WINDOW_CHARS: usize = 32;

/// Pretty-print an `InterpreterError` with caret positioning on stderr.
/// If `program` is `Some("bf")`, messages are prefixed with "bf: ...".
pub fn print_interpreter_error(program: Option<&str>, code: &str, err: &InterpreterError) {
    let msg = describe(err);
    let msg = match program {
        Some(p) => format!("{p}: {msg}"),
        None => msg,
    };
    let color = io::stderr().is_terminal();
    eprint!("{}", render_error_with_context(&msg, code, err.index(), color));
    let _ = io::stderr().flush();
}

fn describe(err: &InterpreterError) -> String {
    match err {
        InterpreterError::UnmatchedBracket { .. } => "Runtime error: unmatched bracket '['".to_string(),
        InterpreterError::UnpairedClosingBracket { .. } => {
            "Runtime error: closing bracket ']' reached before its opening bracket".to_string()
        }
        InterpreterError::InvalidInstruction { ch, .. } => format!("Parse error: invalid instruction '{ch}'"),
        InterpreterError::InputExhausted { .. } => "Runtime error: input exhausted".to_string(),
        InterpreterError::PointerOutOfBounds { pointer, .. } => {
            format!("Runtime error: pointer out of bounds (ptr={pointer})")
        }
        InterpreterError::Io { source, .. } => format!("I/O error: {source}"),
    }
}

/// Build a concise error with instruction index and a caret context window,
/// slicing by char index so non-ASCII code is handled.
pub fn render_error_with_context(prefix: &str, code: &str, pos: usize, color: bool) -> String {
    let total_chars = code.chars().count();
    let start_char = pos.saturating_sub(WINDOW_CHARS);
    let end_char = (pos + WINDOW_CHARS + 1).min(total_chars);
    let slice: String = code.chars().skip(start_char).take(end_char.saturating_sub(start_char)).collect();

    // Caret under the exact position
    let underline = format!("{}^", " ".repeat(pos.saturating_sub(start_char)));

    let (headline, caret) = if color {
        (
            Style::new().bold().fg(Mocha::RED).paint(prefix).to_string(),
            Style::new().fg(Mocha::PEACH).paint(underline).to_string(),
        )
    } else {
        (prefix.to_string(), underline)
    };

    let mut out = format!("{headline} at instruction {pos}\n");
    if !slice.is_empty() {
        let slice = if color { Mocha::SURFACE2.paint(slice).to_string() } else { slice };
        out.push_str(&format!("  {slice}\n  {caret}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caret_points_at_instruction() {
        let rendered = render_error_with_context("bf: Runtime error: x", "++]", 2, false);
        assert_eq!(rendered, "bf: Runtime error: x at instruction 2\n  ++]\n    ^\n");
    }

    #[test]
    fn long_programs_are_windowed() {
        let code = format!("{}]{}", "+".repeat(100), "-".repeat(100));
        let rendered = render_error_with_context("err", &code, 100, false);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[1].trim_start().len(), 2 * WINDOW_CHARS + 1);
        assert_eq!(lines[2].trim_start(), "^");
        assert_eq!(lines[2].len() - 2, WINDOW_CHARS + 1);
    }

    #[test]
    fn descriptions_name_the_failure() {
        let err = InterpreterError::UnpairedClosingBracket { index: 0 };
        assert!(describe(&err).contains("closing bracket"));
        let err = InterpreterError::PointerOutOfBounds { index: 0, pointer: -1 };
        assert_eq!(describe(&err), "Runtime error: pointer out of bounds (ptr=-1)");
    }

    #[test]
    fn color_wraps_in_ansi_codes() {
        let rendered = render_error_with_context("err", "+", 0, true);
        assert!(rendered.contains("\u{1b}["));
    }
}
