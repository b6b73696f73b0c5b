//! quizdeck CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod session;

#[derive(Parser)]
#[command(name = "quizdeck", version, about = "Quiz-taking and grading harness")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take a quiz interactively
    Take {
        /// Quiz id to attempt
        #[arg(long)]
        quiz: i64,

        /// Base URL of the quiz API (overrides config)
        #[arg(long, conflicts_with = "file")]
        url: Option<String>,

        /// Local quiz TOML file or directory instead of the API
        #[arg(long)]
        file: Option<PathBuf>,

        /// Completion store path (overrides config)
        #[arg(long)]
        store: Option<PathBuf>,

        /// Output directory for report artifacts (overrides config)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Report format: text, html, all, none
        #[arg(long, default_value = "all")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List available quizzes with completion badges
    List {
        /// Base URL of the quiz API (overrides config)
        #[arg(long, conflicts_with = "file")]
        url: Option<String>,

        /// Local quiz TOML file or directory instead of the API
        #[arg(long)]
        file: Option<PathBuf>,

        /// Completion store path (overrides config)
        #[arg(long)]
        store: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show stored completion records
    Results {
        /// Completion store path (overrides config)
        #[arg(long)]
        store: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate quiz TOML files
    Validate {
        /// Path to a quiz file or directory
        #[arg(long)]
        quiz: PathBuf,
    },

    /// Create starter config and example quiz
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizdeck=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Take {
            quiz,
            url,
            file,
            store,
            output,
            format,
            config,
        } => commands::take::execute(quiz, url, file, store, output, format, config).await,
        Commands::List {
            url,
            file,
            store,
            config,
        } => commands::list::execute(url, file, store, config).await,
        Commands::Results { store, config } => commands::results::execute(store, config),
        Commands::Validate { quiz } => commands::validate::execute(quiz),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
