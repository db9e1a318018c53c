use std::sync::Arc;

use crate::program::{Instruction, Program};

/// One automaton on the integer line: a position, a program counter, and a
/// shared read-only program.
///
/// Agents do nothing on their own; the arena drives them one tick at a time.
/// A tick executes exactly one instruction; there is no multi-instruction
/// step for a single agent.
#[derive(Debug, Clone)]
pub struct Agent {
    pub id: u8,
    pub position: i64,
    /// Index into the program; always in `[0, program.len())`.
    pub pc: usize,
    pub program: Arc<Program>,
}

impl Agent {
    pub fn new(id: u8, position: i64, program: Arc<Program>) -> Self {
        Self {
            id,
            position,
            pc: 0,
            program,
        }
    }

    /// The instruction the next tick will execute.
    pub fn current_instruction(&self) -> Instruction {
        self.program.fetch(self.pc)
    }

    /// The 1-based program line the counter currently points at.
    pub fn current_line(&self) -> usize {
        self.pc + 1
    }

    /// Execute exactly one instruction.
    ///
    /// Sequential instructions advance the counter modulo the program
    /// length; `Jump` sets it absolutely, no modulo. Jump targets were
    /// bounds-checked at program load, so the counter invariant holds
    /// either way.
    pub fn tick(&mut self, marked_cell: i64) {
        let len = self.program.len();
        match self.program.fetch(self.pc) {
            Instruction::MoveRight => {
                self.position += 1;
                self.pc = (self.pc + 1) % len;
            }
            Instruction::MoveLeft => {
                self.position -= 1;
                self.pc = (self.pc + 1) % len;
            }
            Instruction::BranchOnMark => {
                // Fall through on the mark, skip one line off it.
                if self.position == marked_cell {
                    self.pc = (self.pc + 1) % len;
                } else {
                    self.pc = (self.pc + 2) % len;
                }
            }
            Instruction::Jump(target) => {
                self.pc = target - 1;
            }
        }
    }
}
