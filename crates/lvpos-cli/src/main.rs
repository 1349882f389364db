mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "lvpos",
    version,
    about = "Extract positions and metadata from LV (Leistungsverzeichnis) PDFs"
)]
struct Cli {
    /// Log debug output to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the position table of an LV PDF
    Positions {
        /// Path to the LV PDF
        input_file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write the position table to a JSON file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,

        /// Custom JSON cleanup rule file
        #[arg(short, long = "rules", value_name = "FILE", conflicts_with = "preset")]
        rules: Option<PathBuf>,

        /// Predefined cleanup rules (default: "default")
        #[arg(short, long = "preset", value_name = "NAME")]
        preset: Option<String>,
    },
    /// Show cover page, header and remarks of an LV PDF
    Metadata {
        /// Path to the LV PDF
        input_file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Show the parsed header of a single page, or of every page
    Header {
        /// Path to the LV PDF
        input_file: PathBuf,

        /// Page number, starting at 1
        #[arg(short, long, default_value_t = 1, conflicts_with = "all")]
        page: usize,

        /// Show the headers of all pages that carry one
        #[arg(short, long)]
        all: bool,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Inspect cleanup rules
    Rules {
        #[command(subcommand)]
        action: RulesAction,
    },
}

#[derive(Subcommand)]
enum RulesAction {
    /// List predefined cleanup rules and print one of them
    Show {
        /// Preset name
        #[arg(default_value = "default")]
        preset: String,
    },
    /// Validate a custom rule file
    Validate {
        /// Path to JSON rule file
        file: PathBuf,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Positions {
            input_file,
            output,
            out,
            rules,
            preset,
        } => commands::positions::run(input_file, &output, out, rules, preset),
        Commands::Metadata { input_file, output } => {
            commands::metadata::run(input_file, &output)
        }
        Commands::Header {
            input_file,
            page,
            all,
            output,
        } => {
            if all {
                commands::metadata::all_headers(input_file, &output)
            } else {
                commands::metadata::header(input_file, page, &output)
            }
        }
        Commands::Rules { action } => match action {
            RulesAction::Show { preset } => commands::rules::show(&preset),
            RulesAction::Validate { file } => commands::rules::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
