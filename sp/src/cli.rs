//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::form::{FORM_DAYS_MAX, FORM_DAYS_MIN};
use crate::plan::{DEFAULT_DAYS, Level};

/// skillplan - AI study plans for any skill
#[derive(Parser)]
#[command(
    name = "sp",
    about = "Generate day-by-day study plans for a skill with an LLM",
    version = env!("CARGO_PKG_VERSION"),
    after_help = "Logs are written to: ~/.local/share/skillplan/logs/skillplan.log"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Subcommand to execute (defaults to the TUI)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Subcommand)]
pub enum Command {
    /// Launch the interactive form
    Tui,

    /// Print the recommended number of study days for a skill
    Recommend {
        /// Skill to learn
        skill: String,
    },

    /// Generate a study plan
    Generate {
        /// Skill to learn
        skill: String,

        /// Proficiency level (beginner, intermediate, advanced)
        #[arg(short, long, default_value_t = Level::Beginner)]
        level: Level,

        /// Number of study days
        #[arg(
            short,
            long,
            default_value_t = DEFAULT_DAYS,
            value_parser = clap::value_parser!(u32).range(FORM_DAYS_MIN as i64..=FORM_DAYS_MAX as i64)
        )]
        days: u32,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
}

/// Output format for generated plans
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {}. Use: text or json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}
