//! lexigrade CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod output;

#[derive(Parser)]
#[command(
    name = "lexigrade",
    version,
    about = "Typo-tolerant vocabulary quiz grader"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Grade a single answer
    Check {
        /// The stored answer
        #[arg(long)]
        expected: String,

        /// What the user typed
        #[arg(long)]
        actual: String,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Grade an answer sheet (.toml or .json)
    Grade {
        /// Path to the answer sheet
        #[arg(long)]
        answers: PathBuf,

        /// Week the answers belong to
        #[arg(long)]
        week: Option<u32>,

        /// Output directory (defaults to output_dir from the config)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output format: json, html, all, none
        #[arg(long, default_value = "json")]
        format: String,

        /// Submit the score to the server if it passes
        #[arg(long)]
        submit: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Take an interactive quiz
    Quiz {
        /// Word list TOML file
        #[arg(long, conflicts_with = "week")]
        words: Option<PathBuf>,

        /// Fetch this week's words from the server instead
        #[arg(long)]
        week: Option<u32>,

        /// Page to quiz on (1-based)
        #[arg(long, default_value = "1", conflicts_with = "all")]
        page: usize,

        /// Quiz on every word of the week
        #[arg(long)]
        all: bool,

        /// Question direction: to-word, to-translation
        #[arg(long)]
        direction: Option<String>,

        /// Output directory (defaults to output_dir from the config)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output format: json, html, all, none
        #[arg(long, default_value = "json")]
        format: String,

        /// Submit the score to the server if it passes
        #[arg(long)]
        submit: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate word list TOML files
    Validate {
        /// Path to a word list file or directory
        #[arg(long)]
        words: PathBuf,

        /// Config file path (for the page size)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Compare two saved attempts
    Compare {
        /// Baseline attempt JSON
        #[arg(long)]
        baseline: PathBuf,

        /// Current attempt JSON
        #[arg(long)]
        current: PathBuf,

        /// Exit code 1 if regressions found
        #[arg(long)]
        fail_on_regression: bool,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Show per-week score statistics
    History {
        /// Directory of saved attempts (defaults to output_dir from the config)
        #[arg(long)]
        records: Option<PathBuf>,

        /// Read scores from the server instead
        #[arg(long)]
        remote: bool,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Download a week's words into a TOML word list
    Fetch {
        /// Week to download (lists the available weeks when omitted)
        #[arg(long)]
        week: Option<u32>,

        /// Destination file (prints to stdout when omitted)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config and example word list
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("lexigrade=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check {
            expected,
            actual,
            format,
        } => commands::check::execute(expected, actual, format),
        Commands::Grade {
            answers,
            week,
            output,
            format,
            submit,
            config,
        } => commands::grade::execute(answers, week, output, format, submit, config).await,
        Commands::Quiz {
            words,
            week,
            page,
            all,
            direction,
            output,
            format,
            submit,
            config,
        } => {
            commands::quiz::execute(
                words, week, page, all, direction, output, format, submit, config,
            )
            .await
        }
        Commands::Validate { words, config } => commands::validate::execute(words, config),
        Commands::Compare {
            baseline,
            current,
            fail_on_regression,
            format,
        } => commands::compare::execute(baseline, current, fail_on_regression, format),
        Commands::History {
            records,
            remote,
            format,
            config,
        } => commands::history::execute(records, remote, format, config).await,
        Commands::Fetch {
            week,
            output,
            config,
        } => commands::fetch::execute(week, output, config).await,
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
