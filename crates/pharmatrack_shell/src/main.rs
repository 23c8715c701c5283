//! CLI entry point for pharmatrack
//!
//! Starts a tracker over an in-memory ledger and routes invocations to it.
//! Supports two execution modes:
//! - Interactive: Read invocations from stdin line-by-line
//! - Batch: Read invocations from a script file
//!
//! # Examples
//!
//! Interactive mode:
//! ```bash
//! ./pharmatrack --strict
//! > write A1 box drug classA alice shipped 2024-01-01T00:00Z NY 40.7,-74.0 Aspirin Acme blister 100ct 2024-01-01 LOT1 2026-01-01
//! OK
//! > fetch A1
//! {"assetId":"A1",...}
//! ```
//!
//! Batch mode:
//! ```bash
//! ./pharmatrack --script shipments.txt --keep-going
//! ```

use std::io::{self, BufRead, Write};

use clap::Parser;
use pharmatrack_core::tracker::{
    TrackerDefaultStack, init_tracker, init_tracker_with_validation,
    services::ledger::MemoryLedger,
};
use pharmatrack_shell::{Instruction, print_help, render_response};
use tower::{Service, ServiceExt};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser, Debug)]
#[command(name = "pharmatrack")]
#[command(about = "Asset chain-of-custody tracker session", long_about = None)]
struct Args {
    /// Path to a script file containing invocations to execute (batch mode)
    #[arg(short, long)]
    script: Option<String>,

    /// Require non-empty classification and trace event fields
    #[arg(long, default_value_t = false)]
    strict: bool,

    /// Continue a script after a failed invocation
    #[arg(short, long, default_value_t = false)]
    keep_going: bool,

    /// Log tracker activity to stderr (RUST_LOG takes precedence)
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

type Tracker = TrackerDefaultStack<MemoryLedger>;

/// Outcome of one line
enum Step {
    Continue,
    Failed,
    Quit,
}

#[cfg(not(tarpaulin_include))]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose { "pharmatrack=info" } else { "off" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    fmt().with_writer(io::stderr).with_target(false).with_env_filter(filter).init();

    let mut tracker = if args.strict {
        init_tracker_with_validation(MemoryLedger::new())
    } else {
        init_tracker(MemoryLedger::new())
    };
    info!(strict = args.strict, "Tracker started over in-memory ledger");

    if let Some(script_path) = args.script {
        run_batch_mode(&mut tracker, &script_path, args.keep_going).await
    } else {
        run_interactive_mode(&mut tracker).await
    }
}

/// Run in batch mode, reading invocations from a file
async fn run_batch_mode(
    tracker: &mut Tracker,
    file_path: &str,
    keep_going: bool,
) -> anyhow::Result<()> {
    info!("Running batch mode from file: {}", file_path);

    let file = std::fs::File::open(file_path)
        .map_err(|e| anyhow::anyhow!("Failed to open script '{}': {}", file_path, e))?;
    let reader = io::BufReader::new(file);

    let mut failures = 0usize;
    for (line_num, line) in reader.lines().enumerate() {
        let line = line?;
        debug!("[{}] {}", line_num + 1, line.trim());
        match execute_line(tracker, &line).await? {
            Step::Continue => {}
            Step::Quit => break,
            Step::Failed if keep_going => failures += 1,
            Step::Failed => {
                return Err(anyhow::anyhow!("Script stopped at line {}", line_num + 1));
            }
        }
    }

    if failures > 0 {
        return Err(anyhow::anyhow!("{} invocation(s) failed", failures));
    }
    Ok(())
}

/// Run in interactive mode, reading invocations from stdin
async fn run_interactive_mode(tracker: &mut Tracker) -> anyhow::Result<()> {
    println!("pharmatrack session, type 'help' for available functions");
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        if let Step::Quit = execute_line(tracker, &line?).await? {
            break;
        }
    }
    Ok(())
}

async fn execute_line(tracker: &mut Tracker, line: &str) -> anyhow::Result<Step> {
    let instruction = match Instruction::try_from(line) {
        Ok(instruction) => instruction,
        Err(e) => {
            println!("ERR {}", e);
            return Ok(Step::Failed);
        }
    };
    match instruction {
        Instruction::Nil => Ok(Step::Continue),
        Instruction::Help => {
            print_help();
            Ok(Step::Continue)
        }
        Instruction::Quit => Ok(Step::Quit),
        Instruction::Invoke(invocation) => {
            match tracker.ready().await?.call(invocation).await {
                Ok(response) => {
                    println!("{}", render_response(&response));
                    Ok(Step::Continue)
                }
                Err(e) => {
                    println!("ERR {}", e);
                    Ok(Step::Failed)
                }
            }
        }
    }
}
