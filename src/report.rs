use std::thread;
use std::time::Duration;

use crate::arena::Arena;

/// Observer of arena state, injected into `Arena::run`.
///
/// Reporting is purely presentational: the arena hands out shared
/// references, so no reporter can change what the simulation computes.
/// Swapping reporters must never change the outcome.
pub trait Reporter {
    /// Called once, before the first step.
    fn begin(&mut self, _arena: &Arena) {}

    /// Called after every executed step, the terminating one included.
    fn step(&mut self, _arena: &Arena) {}
}

/// Reporter that renders nothing. Used for headless runs and tests.
pub struct NullReporter;

impl Reporter for NullReporter {}

/// Renders a window of the line to stdout after every step, with an
/// optional pacing delay between steps.
///
/// The delay is cosmetic only and is consulted nowhere else; a zero delay
/// disables pacing entirely.
pub struct ConsoleReporter {
    delay: Duration,
}

impl ConsoleReporter {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Reporter for ConsoleReporter {
    fn begin(&mut self, arena: &Arena) {
        println!("Initial state:");
        print!("{}", render_window(arena));
    }

    fn step(&mut self, arena: &Arena) {
        print!("{}", render_window(arena));
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
    }
}

/// Render a bounded window of the line around the agents.
///
/// The window spans five cells beyond each outermost agent and is
/// stretched by two more when the marked cell falls outside it. Cells
/// render as `[□]`, the marked cell as `[■]`, agents as `[R1]`/`[R2]`, or
/// `[R1+R2]` when coincident; one status line per agent follows.
pub fn render_window(arena: &Arena) -> String {
    use std::fmt::Write;

    let [first, second] = &arena.agents;
    let mut lo = first.position.min(second.position) - 5;
    let mut hi = first.position.max(second.position) + 5;
    if arena.marked_cell < lo {
        lo = arena.marked_cell - 2;
    } else if arena.marked_cell > hi {
        hi = arena.marked_cell + 2;
    }

    let mut out = String::new();
    let _ = writeln!(out, "Step: {}", arena.steps);
    for cell in lo..=hi {
        let glyph = if cell == first.position && cell == second.position {
            "R1+R2"
        } else if cell == first.position {
            "R1"
        } else if cell == second.position {
            "R2"
        } else if cell == arena.marked_cell {
            "■"
        } else {
            "□"
        };
        let _ = write!(out, "[{glyph}]");
    }
    out.push('\n');

    for agent in &arena.agents {
        let _ = writeln!(
            out,
            "Agent {}: position {}, line {}, instruction {}",
            agent.id,
            agent.position,
            agent.current_line(),
            agent.current_instruction(),
        );
    }
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::ArenaConfig;
    use crate::program::Program;
    use std::sync::Arc;

    fn arena(start_1: i64, start_2: i64, marked_cell: i64) -> Arena {
        let program = Arc::new(Program::rendezvous());
        let config = ArenaConfig {
            start_1,
            start_2,
            marked_cell,
            step_budget: 100,
        };
        Arena::new(&config, [Arc::clone(&program), program]).unwrap()
    }

    #[test]
    fn test_window_spans_agents_with_margin() {
        let rendered = render_window(&arena(0, 2, 1));
        let stripe = rendered.lines().nth(1).unwrap();
        // -5..=7 is 13 cells; the mark sits between the agents.
        assert_eq!(stripe.matches('[').count(), 13);
        assert!(stripe.contains("[R1]"));
        assert!(stripe.contains("[R2]"));
        assert!(stripe.contains("[■]"));
        assert_eq!(stripe.matches('□').count(), 10);
    }

    #[test]
    fn test_window_stretches_to_marked_cell() {
        // Mark far to the right of both agents: window grows to mark + 2.
        let rendered = render_window(&arena(0, 2, 20));
        let stripe = rendered.lines().nth(1).unwrap();
        // -5..=22 is 28 cells.
        assert_eq!(stripe.matches('[').count(), 28);
        assert!(stripe.contains("[■]"));
    }

    #[test]
    fn test_coincident_agents_share_a_cell() {
        let rendered = render_window(&arena(3, 3, 0));
        let stripe = rendered.lines().nth(1).unwrap();
        assert!(stripe.contains("[R1+R2]"));
        assert!(!stripe.contains("[R1]["));
    }

    #[test]
    fn test_agents_cover_the_marked_cell() {
        // An agent standing on the mark wins the cell.
        let rendered = render_window(&arena(0, 5, 0));
        let stripe = rendered.lines().nth(1).unwrap();
        assert!(!stripe.contains('■'));
    }

    #[test]
    fn test_status_lines() {
        let rendered = render_window(&arena(-2, 2, 0));
        assert!(rendered.contains("Agent 1: position -2, line 1, instruction MR"));
        assert!(rendered.contains("Agent 2: position 2, line 1, instruction MR"));
        assert!(rendered.starts_with("Step: 0\n"));
    }

    #[test]
    fn test_null_reporter_is_inert() {
        let mut arena = arena(-2, 2, 0);
        let outcome = arena.run(&mut NullReporter);
        assert_eq!(outcome.steps(), 18);
    }
}
