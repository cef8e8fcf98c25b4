use clap::{Parser, Subcommand, ValueEnum};
use owo_colors::OwoColorize;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Instant;

use quizref::model::Round;
use quizref::report::{self, ReportOutcome, TableLayout};
use quizref::store::Competition;

const EXIT_SUCCESS: i32 = 0;
const EXIT_SNAPSHOT: i32 = 1;
const EXIT_DATA: i32 = 2;
const EXIT_INCONSISTENT: i32 = 3;
const EXIT_USAGE: i32 = 4;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LayoutArg {
    Full,
    Medium,
    Short,
}

impl From<LayoutArg> for TableLayout {
    fn from(layout: LayoutArg) -> Self {
        match layout {
            LayoutArg::Full => TableLayout::Full,
            LayoutArg::Medium => TableLayout::Medium,
            LayoutArg::Short => TableLayout::Short,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the results table for both rounds
    Results {
        /// Path to the competition snapshot (YAML, or JSON with a .json extension)
        snapshot: PathBuf,

        /// Column density of the table
        #[arg(short, long, value_enum, default_value_t = LayoutArg::Full)]
        layout: LayoutArg,

        /// Restrict the table to one round: 1 (preliminary) or 2 (main)
        #[arg(short, long)]
        round: Option<u8>,
    },
    /// Print the per-question collection of distinct answers
    Collection {
        /// Path to the competition snapshot (YAML, or JSON with a .json extension)
        snapshot: PathBuf,
    },
    /// Print the submission summary for one round
    Summary {
        /// Path to the competition snapshot (YAML, or JSON with a .json extension)
        snapshot: PathBuf,

        /// Round to tally: 1 (preliminary) or 2 (main)
        #[arg(short, long)]
        round: u8,
    },
}

#[derive(Parser, Debug)]
#[command(name = "quizref")]
#[command(about = "Quiz competition scoring and reporting CLI", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

fn main() {
    let cli = Cli::parse();
    let start_time = Instant::now();

    let snapshot_path = match &cli.command {
        Commands::Results { snapshot, .. }
        | Commands::Collection { snapshot }
        | Commands::Summary { snapshot, .. } => snapshot.clone(),
    };

    let snapshot = match quizref::input::load_snapshot(&snapshot_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Snapshot error: {:#}", e);
            std::process::exit(EXIT_SNAPSHOT);
        }
    };

    if cli.verbose {
        eprintln!(
            "Loaded {} teams, {} questions, {} answers, {} emails from {}",
            snapshot.teams.len(),
            snapshot.questions.len(),
            snapshot.answers.len(),
            snapshot.emails.len(),
            snapshot_path.display()
        );
    }

    let competition = match snapshot.into_competition() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Invalid snapshot: {}", e);
            std::process::exit(EXIT_DATA);
        }
    };

    let generated_at = chrono::Utc::now();

    match cli.command {
        Commands::Results { layout, round, .. } => {
            let round = round.map(parse_round);
            let outcome =
                report::results_report(&competition, layout.into(), round, generated_at);
            finish_gated(outcome, &competition, cli.verbose, start_time);
        }
        Commands::Collection { .. } => {
            let outcome = report::collection_report(&competition, generated_at);
            finish_gated(outcome, &competition, cli.verbose, start_time);
        }
        Commands::Summary { round, .. } => {
            let round = parse_round(round);
            match report::summary_report(&competition, round, generated_at) {
                Ok(text) => {
                    println!("{}", text);
                    if cli.verbose {
                        eprintln!("Report built in {:?}", start_time.elapsed());
                    }
                }
                Err(e) => {
                    eprintln!("Report error: {}", e);
                    std::process::exit(EXIT_DATA);
                }
            }
        }
    }

    std::process::exit(EXIT_SUCCESS);
}

fn parse_round(number: u8) -> Round {
    match Round::try_from(number) {
        Ok(round) => round,
        Err(e) => {
            eprintln!("Invalid --round: {}", e);
            std::process::exit(EXIT_USAGE);
        }
    }
}

/// Print a gated report. An inconsistency still prints the violations
/// report but exits non-zero so scripts can tell the two apart.
fn finish_gated(
    outcome: Result<ReportOutcome, quizref::error::EngineError>,
    competition: &Competition,
    verbose: bool,
    start_time: Instant,
) {
    match outcome {
        Ok(ReportOutcome::Ready(text)) => {
            println!("{}", text);
            if verbose {
                eprintln!(
                    "Report for {} teams built in {:?}",
                    competition.teams().len(),
                    start_time.elapsed()
                );
            }
        }
        Ok(ReportOutcome::Blocked(text)) => {
            warn_inconsistent();
            println!("{}", text);
            std::process::exit(EXIT_INCONSISTENT);
        }
        Err(e) => {
            eprintln!("Report error: {}", e);
            std::process::exit(EXIT_DATA);
        }
    }
}

fn warn_inconsistent() {
    let message = "Grading is inconsistent; printing the violations report instead.";
    if std::io::stderr().is_terminal() {
        eprintln!("{}", message.yellow());
    } else {
        eprintln!("{}", message);
    }
}
