use thiserror::Error;

/// Configuration errors, all raised before the first step executes.
///
/// Once a run is configured and its programs validated, stepping itself
/// cannot fail: every instruction's effect on the program counter is total
/// over the valid index range. The one caller-supplied counter value, a
/// jump target, is checked here at load time, not per tick.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("step budget must be positive, got {0}")]
    StepBudget(i64),

    #[error("program has no instructions")]
    EmptyProgram,

    #[error("line {line}: GOTO {target} is outside the program (valid lines are 1..={len})")]
    JumpOutOfRange {
        line: usize,
        target: usize,
        len: usize,
    },

    #[error("line {line}: unrecognized instruction '{text}'")]
    UnknownInstruction { line: usize, text: String },

    #[error("failed to read program file: {0}")]
    ProgramFile(#[from] std::io::Error),
}
