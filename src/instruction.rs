/// One of the eight Brainfuck instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instruction {
    /// `>`
    IncrementPointer,
    /// `<`
    DecrementPointer,
    /// `+`
    IncrementCell,
    /// `-`
    DecrementCell,
    /// `.`
    Output,
    /// `,`
    Input,
    /// `[`
    JumpIfZero,
    /// `]`
    JumpIfNotZero,
}

impl Instruction {
    pub const OPEN: char = '[';
    pub const CLOSE: char = ']';

    /// Decode a source character; anything outside `><+-.,[]` yields `None`.
    pub fn decode(ch: char) -> Option<Self> {
        Some(match ch {
            '>' => Instruction::IncrementPointer,
            '<' => Instruction::DecrementPointer,
            '+' => Instruction::IncrementCell,
            '-' => Instruction::DecrementCell,
            '.' => Instruction::Output,
            ',' => Instruction::Input,
            '[' => Instruction::JumpIfZero,
            ']' => Instruction::JumpIfNotZero,
            _ => return None,
        })
    }

    pub fn symbol(self) -> char {
        match self {
            Instruction::IncrementPointer => '>',
            Instruction::DecrementPointer => '<',
            Instruction::IncrementCell => '+',
            Instruction::DecrementCell => '-',
            Instruction::Output => '.',
            Instruction::Input => ',',
            Instruction::JumpIfZero => Self::OPEN,
            Instruction::JumpIfNotZero => Self::CLOSE,
        }
    }

    pub fn is_symbol(ch: char) -> bool {
        Self::decode(ch).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_symbol_decodes_to_itself() {
        for ch in "><+-.,[]".chars() {
            let instr = Instruction::decode(ch).expect("alphabet symbol");
            assert_eq!(instr.symbol(), ch);
        }
    }

    #[test]
    fn comments_and_whitespace_are_not_instructions() {
        for ch in ['a', ' ', '\n', '#', '0', 'é'] {
            assert!(!Instruction::is_symbol(ch));
        }
    }
}
