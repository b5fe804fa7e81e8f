use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use is_terminal::IsTerminal;
use research_notes::config::ParserConfig;
use research_notes::extract::FallbackExtractor;
use research_notes::ui::render_note;
use research_notes::utils::is_valid_source_url;
use research_notes::NoteDistiller;
use std::io::Read;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Research Notes - turn raw LLM research output into structured, cited records
#[derive(Parser, Debug)]
#[command(name = "research-notes")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Parse LLM-generated research notes into structured records", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (repeat for more verbosity: -v, -vv, -vvv)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short)]
    quiet: bool,

    /// Output format
    #[arg(long, short, value_enum, global = true, default_value_t = OutputFormat::Auto)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

/// Output format for results
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Automatic based on terminal (plain if TTY, JSON otherwise)
    Auto,
    /// JSON format (machine-readable)
    Json,
    /// Plain text format (human-readable)
    Plain,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse raw model output into a structured research note
    Parse {
        /// File containing the raw note text (reads stdin when omitted)
        file: Option<PathBuf>,

        /// File of raw search-result text for fallback source extraction
        #[arg(long)]
        search_text: Option<PathBuf>,
    },

    /// Harvest candidate sources from raw search-result text
    Extract {
        /// File containing the search text (reads stdin when omitted)
        file: Option<PathBuf>,

        /// Number of sources already found (counts toward the threshold)
        #[arg(long, default_value_t = 0)]
        already_found: usize,
    },

    /// Check a URL against the citation filter
    CheckUrl {
        /// The URL to check
        url: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Parse { file, search_text } => {
            let raw = read_input(file.as_deref())?;
            let search = match search_text {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read {}", path.display()))?,
                None => String::new(),
            };

            let note = NoteDistiller::new().distill(&raw, &search)?;
            match effective_format(cli.output) {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&note)?),
                _ => print!("{}", render_note(&note, std::io::stdout().is_terminal())),
            }
        }
        Commands::Extract {
            file,
            already_found,
        } => {
            let search = read_input(file.as_deref())?;
            let config = ParserConfig::default();
            let sources = FallbackExtractor::with_config(config).extract(&search, already_found);
            match effective_format(cli.output) {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&sources)?),
                _ => {
                    for source in &sources {
                        println!("{} ({})", source.title, source.url);
                    }
                }
            }
        }
        Commands::CheckUrl { url } => {
            if is_valid_source_url(&url) {
                println!("valid");
            } else {
                println!("invalid");
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_input(path: Option<&std::path::Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn effective_format(format: OutputFormat) -> OutputFormat {
    match format {
        OutputFormat::Auto => {
            if std::io::stdout().is_terminal() {
                OutputFormat::Plain
            } else {
                OutputFormat::Json
            }
        }
        other => other,
    }
}
