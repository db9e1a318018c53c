use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use linewalk::arena::{Arena, ArenaConfig, RunOutcome};
use linewalk::error::ConfigError;
use linewalk::program::Program;
use linewalk::report::{ConsoleReporter, NullReporter};

#[derive(Parser)]
#[command(
    name = "linewalk",
    about = "Deterministic lock-step rendezvous of two program-driven agents on the integer line"
)]
struct Cli {
    /// Starting position of agent 1.
    #[arg(long, default_value_t = -5, allow_negative_numbers = true)]
    start1: i64,

    /// Starting position of agent 2.
    #[arg(long, default_value_t = 5, allow_negative_numbers = true)]
    start2: i64,

    /// Position of the marked cell.
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    marked_cell: i64,

    /// Maximum number of completed steps before the run is declared lost.
    #[arg(long, default_value_t = 100, allow_negative_numbers = true)]
    step_budget: i64,

    /// Suppress per-step rendering of the line.
    #[arg(long)]
    quiet: bool,

    /// Pacing delay between rendered steps, in milliseconds (0 disables).
    #[arg(long, default_value_t = 200)]
    delay_ms: u64,

    /// Program file for both agents (defaults to the built-in rendezvous
    /// program). One mnemonic per line: MR, ML, IF FLAG, GOTO n.
    #[arg(long)]
    program: Option<PathBuf>,

    /// Separate program file for agent 2 (defaults to agent 1's program).
    #[arg(long)]
    program2: Option<PathBuf>,
}

fn load_program(path: &Path) -> Result<Program, ConfigError> {
    let source = std::fs::read_to_string(path)?;
    Program::parse(&source)
}

fn run(cli: &Cli) -> Result<RunOutcome, ConfigError> {
    let program_1 = match &cli.program {
        Some(path) => Arc::new(load_program(path)?),
        None => Arc::new(Program::rendezvous()),
    };
    let program_2 = match &cli.program2 {
        Some(path) => Arc::new(load_program(path)?),
        None => Arc::clone(&program_1),
    };

    let config = ArenaConfig {
        start_1: cli.start1,
        start_2: cli.start2,
        marked_cell: cli.marked_cell,
        step_budget: cli.step_budget,
    };
    let mut arena = Arena::new(&config, [program_1, program_2])?;

    Ok(if cli.quiet {
        arena.run(&mut NullReporter)
    } else {
        arena.run(&mut ConsoleReporter::new(Duration::from_millis(cli.delay_ms)))
    })
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(outcome) => println!("{outcome}"),
        Err(error) => {
            eprintln!("{error}");
            std::process::exit(1);
        }
    }
}
