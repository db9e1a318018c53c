use std::fmt;
use std::sync::Arc;

use crate::agent::Agent;
use crate::error::ConfigError;
use crate::program::Program;
use crate::report::Reporter;

/// Run configuration for an arena.
///
/// Defaults match the reference scenario: agents at -5 and 5, marked cell
/// at the origin, budget of 100 steps. The budget is carried signed so a
/// non-positive value is representable and rejected, rather than silently
/// impossible to express.
#[derive(Debug, Clone, Copy)]
pub struct ArenaConfig {
    /// Starting position of agent 1.
    pub start_1: i64,
    /// Starting position of agent 2.
    pub start_2: i64,
    /// Position of the marked cell, fixed for the run.
    pub marked_cell: i64,
    /// Maximum number of completed steps; must be positive.
    pub step_budget: i64,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            start_1: -5,
            start_2: 5,
            marked_cell: 0,
            step_budget: 100,
        }
    }
}

/// How a run ended. Both variants are successful terminations; the only
/// fatal outcome is a configuration error raised before the first step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The agents reached the same cell. `steps` counts only fully
    /// completed prior steps, never the terminating one.
    Met { position: i64, steps: usize },
    /// The step budget ran out first.
    NotMet { steps: usize },
}

impl RunOutcome {
    pub fn steps(&self) -> usize {
        match *self {
            RunOutcome::Met { steps, .. } | RunOutcome::NotMet { steps } => steps,
        }
    }
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            RunOutcome::Met { position, steps } => {
                write!(f, "met at position {position} after {steps} steps")
            }
            RunOutcome::NotMet { steps } => write!(f, "did not meet after {steps} steps"),
        }
    }
}

/// The arena owns both agents and the counters, and runs the lock-step
/// loop until rendezvous or budget exhaustion.
///
/// There is exactly one thread of control: "lock-step" is simulated
/// alternation, not concurrency. Given the same configuration and
/// programs, the full per-step state sequence is reproducible bit-for-bit;
/// nothing here is random or time-dependent.
#[derive(Debug)]
pub struct Arena {
    pub agents: [Agent; 2],
    pub marked_cell: i64,
    /// Completed steps so far.
    pub steps: usize,
    pub step_budget: usize,
}

impl Arena {
    /// Build an arena, validating the configuration.
    ///
    /// Programs arrive already validated by construction; the budget is
    /// checked here. Nothing past this point can fail.
    pub fn new(config: &ArenaConfig, programs: [Arc<Program>; 2]) -> Result<Self, ConfigError> {
        if config.step_budget <= 0 {
            return Err(ConfigError::StepBudget(config.step_budget));
        }
        let [program_1, program_2] = programs;
        Ok(Self {
            agents: [
                Agent::new(1, config.start_1, program_1),
                Agent::new(2, config.start_2, program_2),
            ],
            marked_cell: config.marked_cell,
            steps: 0,
            step_budget: config.step_budget as usize,
        })
    }

    /// Execute one step. Returns the meeting position on rendezvous.
    ///
    /// Agent 1 always ticks first; if its tick lands it on agent 2, the
    /// step ends right there and agent 2 does not tick. This ordering is a
    /// deliberate tie-break: it changes both the reported step count and,
    /// for some configurations, whether the agents meet at all. The step
    /// counter advances only when a step runs to completion without a
    /// rendezvous.
    pub fn step(&mut self) -> Option<i64> {
        self.agents[0].tick(self.marked_cell);
        if self.agents[0].position == self.agents[1].position {
            return Some(self.agents[0].position);
        }

        self.agents[1].tick(self.marked_cell);
        if self.agents[0].position == self.agents[1].position {
            return Some(self.agents[0].position);
        }

        self.steps += 1;
        None
    }

    /// Run until rendezvous or budget exhaustion.
    ///
    /// The reporter observes state; it cannot influence the outcome.
    /// There is no pre-loop coincidence check: agents that start on the
    /// same cell are first compared after agent 1's first tick.
    pub fn run<R: Reporter>(&mut self, reporter: &mut R) -> RunOutcome {
        reporter.begin(self);

        while self.steps < self.step_budget {
            let met = self.step();
            reporter.step(self);
            if let Some(position) = met {
                let steps = self.steps;
                tracing::debug!(position, steps, "rendezvous");
                return RunOutcome::Met { position, steps };
            }
        }

        tracing::debug!(steps = self.steps, "step budget exhausted");
        RunOutcome::NotMet { steps: self.steps }
    }
}
