use std::fmt;

use crate::error::ConfigError;

/// One instruction of the agent language.
///
/// The language has four opcodes. Three of them advance the program counter
/// sequentially, wrapping modulo the program length; `Jump` sets it to an
/// absolute 1-based line with no wrapping. That asymmetry is part of the
/// semantics and changes which states are reachable, so it is kept as-is and
/// guarded by load-time validation of jump targets instead of a modulo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// Move one cell to the right; fall through to the next line.
    MoveRight,
    /// Move one cell to the left; fall through to the next line.
    MoveLeft,
    /// On the marked cell: fall through one line. Off it: skip one line.
    BranchOnMark,
    /// Go to the given 1-based line, unconditionally.
    Jump(usize),
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::MoveRight => write!(f, "MR"),
            Instruction::MoveLeft => write!(f, "ML"),
            Instruction::BranchOnMark => write!(f, "IF FLAG"),
            Instruction::Jump(target) => write!(f, "GOTO {target}"),
        }
    }
}

/// An ordered, immutable sequence of instructions with 1-based line
/// addressing (line 1 is index 0).
///
/// Construction validates what execution later relies on: the program is
/// non-empty, and every jump target names an existing line. After that,
/// every tick's counter update is total and the interpreter has no runtime
/// error path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    instructions: Vec<Instruction>,
}

impl Program {
    pub fn new(instructions: Vec<Instruction>) -> Result<Self, ConfigError> {
        if instructions.is_empty() {
            return Err(ConfigError::EmptyProgram);
        }
        let len = instructions.len();
        for (index, instruction) in instructions.iter().enumerate() {
            if let Instruction::Jump(target) = *instruction {
                if target == 0 || target > len {
                    return Err(ConfigError::JumpOutOfRange {
                        line: index + 1,
                        target,
                        len,
                    });
                }
            }
        }
        Ok(Self { instructions })
    }

    /// The built-in rendezvous protocol, loaded for both agents by default.
    ///
    /// Off the marked cell an agent cycles lines 1,2,4,5,6 for a net drift
    /// of +1 per 5 ticks. The first `MR` that lands exactly on the marked
    /// cell makes the following `IF FLAG` fall through to line 3, diverting
    /// the agent into the 7/8 loop: +1 per 2 ticks, forever. Whichever
    /// agent reaches the mark first switches to the fast rate, so the
    /// agents always meet to the right of the mark.
    pub fn rendezvous() -> Self {
        use Instruction::*;
        Self::new(vec![
            MoveRight,    // 1
            BranchOnMark, // 2
            Jump(7),      // 3
            MoveRight,    // 4
            MoveLeft,     // 5
            Jump(1),      // 6
            MoveRight,    // 7
            Jump(7),      // 8
        ])
        .expect("built-in rendezvous program is valid")
    }

    /// Parse a textual program, one instruction per line.
    ///
    /// Mnemonics are those of the agent language: `MR`, `ML`, `IF FLAG`,
    /// `GOTO n`. Blank lines and lines starting with `#` are skipped and do
    /// not count toward line numbering; jump targets address instruction
    /// lines, matching what `listing` prints.
    pub fn parse(source: &str) -> Result<Self, ConfigError> {
        let mut instructions = Vec::new();
        for raw in source.lines() {
            let text = raw.trim();
            if text.is_empty() || text.starts_with('#') {
                continue;
            }
            let line = instructions.len() + 1;
            let instruction = match text {
                "MR" => Instruction::MoveRight,
                "ML" => Instruction::MoveLeft,
                "IF FLAG" => Instruction::BranchOnMark,
                _ => match text.strip_prefix("GOTO ") {
                    Some(arg) => match arg.trim().parse::<usize>() {
                        Ok(target) => Instruction::Jump(target),
                        Err(_) => {
                            return Err(ConfigError::UnknownInstruction {
                                line,
                                text: text.to_string(),
                            });
                        }
                    },
                    None => {
                        return Err(ConfigError::UnknownInstruction {
                            line,
                            text: text.to_string(),
                        });
                    }
                },
            };
            instructions.push(instruction);
        }
        Self::new(instructions)
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        // Always false for a constructed program; kept for slice-like shape.
        self.instructions.is_empty()
    }

    /// The instruction at a program-counter index.
    ///
    /// Indexing is direct: validated construction plus the counter-update
    /// rules keep every pc in `[0, len)`.
    pub fn fetch(&self, pc: usize) -> Instruction {
        self.instructions[pc]
    }

    /// Numbered listing of the program for human inspection.
    pub fn listing(&self) -> String {
        use std::fmt::Write;
        let mut out = String::new();
        for (index, instruction) in self.instructions.iter().enumerate() {
            let _ = writeln!(out, "{} {instruction}", index + 1);
        }
        out
    }
}
