pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;

use blockdeck_core::config::{AppConfig, LoadOptions};

#[derive(Debug, Parser)]
#[command(
    name = "blockdeck",
    about = "Building-block architecture deck generator",
    long_about = "Generate PowerPoint architecture decks from requirement text, \
either through the model-driven agent or the offline pipeline.",
    after_help = "Examples:\n  blockdeck generate \"AI-powered analytics platform with web interface\"\n  blockdeck generate --direct --deck narrative \"secure data platform\"\n  blockdeck catalog\n  blockdeck doctor --json"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum DeckArg {
    /// Single building-block diagram slide.
    Blocks,
    /// Title and per-category slides before the diagram.
    Narrative,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Generate a .pptx deck from requirement text")]
    Generate {
        #[arg(required = true, num_args = 1.., help = "Customer requirements in natural language")]
        requirements: Vec<String>,
        #[arg(long, value_enum, default_value_t = DeckArg::Blocks, help = "Deck shape to build")]
        deck: DeckArg,
        #[arg(long, help = "Skip the model and use the keyword pipeline")]
        direct: bool,
        #[arg(long, help = "Output directory (overrides configuration)")]
        out: Option<PathBuf>,
        #[arg(long, help = "Directory with service icon .png files")]
        icons: Option<PathBuf>,
        #[arg(long, help = "Model name (overrides configuration)")]
        model: Option<String>,
    },
    #[command(about = "Interactive session: one deck per entered requirement line")]
    Repl,
    #[command(about = "Print the service catalog and cross-cutting strip")]
    Catalog {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Validate configuration, output paths, and deck round-trip")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
}

fn init_logging() {
    use blockdeck_core::config::LogFormat::*;
    use tracing::Level;

    // Best-effort: a broken config still gets default logging so doctor can
    // report the problem.
    let logging = AppConfig::load(LoadOptions::default())
        .map(|config| config.logging)
        .unwrap_or_else(|_| AppConfig::default().logging);
    let log_level = logging.level.parse::<Level>().unwrap_or(Level::INFO);

    match logging.format {
        Compact => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).compact().init();
        }
        Pretty => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).pretty().init();
        }
        Json => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).json().init();
        }
    }
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    let result = match cli.command {
        Command::Generate { requirements, deck, direct, out, icons, model } => {
            commands::generate::run(&commands::generate::GenerateArgs {
                requirements: requirements.join(" "),
                deck,
                direct,
                out,
                icons,
                model,
            })
        }
        Command::Repl => commands::repl::run(),
        Command::Catalog { json } => {
            commands::CommandResult { exit_code: 0, output: commands::catalog::run(json) }
        }
        Command::Doctor { json } => {
            commands::CommandResult { exit_code: 0, output: commands::doctor::run(json) }
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
