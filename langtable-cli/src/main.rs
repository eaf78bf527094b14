use clap::{Parser, Subcommand};
use langtable_cli::{LookupRequest, run_files, run_lookup, run_validate};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log library activity (repeat for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    commands: Commands,
}

/// Options shared by commands that build a language.
#[derive(clap::Args, Debug)]
struct LanguageArgs {
    /// Base directory containing the `language/` tree [default: config's base_path, or "."]
    #[arg(short, long)]
    base: Option<String>,

    /// Language tag to load, e.g. fr-FR
    #[arg(short, long)]
    lang: String,

    /// JSON file with language options
    #[arg(short, long)]
    config: Option<String>,

    /// Default (baseline) language tag
    #[arg(long)]
    default: Option<String>,

    /// Extra extension files to load, e.g. com_content
    #[arg(short, long = "extension")]
    extensions: Vec<String>,

    /// Enable debug markers and file validation
    #[arg(long)]
    debug: bool,
}

impl From<LanguageArgs> for LookupRequest {
    fn from(args: LanguageArgs) -> Self {
        LookupRequest {
            base: args.base,
            lang: args.lang,
            config: args.config,
            default_language: args.default,
            extensions: args.extensions,
            debug: args.debug,
        }
    }
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Check translation files for structural errors.
    Validate {
        /// The files to check
        #[arg(required = true)]
        files: Vec<String>,
    },

    /// Resolve keys for a language.
    Lookup {
        #[command(flatten)]
        language: LanguageArgs,

        /// Keys to translate
        #[arg(required = true)]
        keys: Vec<String>,
    },

    /// Show which files a language loads, as JSON.
    Files {
        #[command(flatten)]
        language: LanguageArgs,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("langtable={},langtable_cli={}", level, level)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing to JSON: {}", e);
            std::process::exit(1);
        }
    }
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    match args.commands {
        Commands::Validate { files } => match run_validate(&files) {
            Ok(report) => {
                for (file, lines) in &report.files {
                    if lines.is_empty() {
                        println!("✅ {}", file);
                    } else {
                        let lines = lines
                            .iter()
                            .map(usize::to_string)
                            .collect::<Vec<_>>()
                            .join(", ");
                        println!("❌ {} (lines {})", file, lines);
                    }
                }
                if !report.is_clean() {
                    eprintln!("Validation failed: {} error(s)", report.error_count());
                    std::process::exit(1);
                }
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        Commands::Lookup { language, keys } => {
            match run_lookup(&LookupRequest::from(language), &keys) {
                Ok(report) => print_json(&report),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Files { language } => match run_files(&LookupRequest::from(language)) {
            Ok(report) => print_json(&report),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
    }
}
