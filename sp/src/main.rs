//! skillplan - AI study plans for any skill
//!
//! CLI entry point: the interactive form, or one-shot recommend/generate.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use colored::Colorize;
use eyre::{Context, Result};
use tracing::{info, warn};

use skillplan::cli::{Cli, Command, OutputFormat};
use skillplan::config::Config;
use skillplan::form::FormController;
use skillplan::gateway::PlanGateway;
use skillplan::llm::create_client;
use skillplan::plan::{Level, Plan};
use skillplan::prompts::PromptLoader;
use skillplan::tui;

fn setup_logging(verbose: bool) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("skillplan")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Setup tracing subscriber - write to log file, not stdout/stderr
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    let log_file = fs::File::create(log_dir.join("skillplan.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (verbose: {})", verbose);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    info!(
        "skillplan loaded config: provider={}, model={}",
        config.llm.provider, config.llm.model
    );

    // A missing key is reported per request, not at startup
    if let Err(e) = config.validate() {
        warn!("{}", e);
    }

    let client = create_client(&config.llm).context("Failed to create LLM client")?;
    let prompts = PromptLoader::from_dir(config.prompts.expanded_dir());
    let gateway = Arc::new(PlanGateway::new(client, prompts));

    match cli.command {
        Some(Command::Tui) | None => cmd_tui(&config, gateway).await,
        Some(Command::Recommend { skill }) => cmd_recommend(&gateway, &skill).await,
        Some(Command::Generate {
            skill,
            level,
            days,
            format,
        }) => cmd_generate(&gateway, &skill, level, days, format).await,
    }
}

/// Run the interactive form
async fn cmd_tui(config: &Config, gateway: Arc<PlanGateway>) -> Result<()> {
    let controller = FormController::new(gateway, config.form.debounce());
    tui::run(controller).await
}

/// Print the recommended day count
async fn cmd_recommend(gateway: &PlanGateway, skill: &str) -> Result<()> {
    let days = gateway.recommend_days(skill).await;
    println!("{}", days);
    Ok(())
}

/// Generate and print a plan
async fn cmd_generate(
    gateway: &PlanGateway,
    skill: &str,
    level: Level,
    days: u32,
    format: OutputFormat,
) -> Result<()> {
    if skill.trim().is_empty() {
        eyre::bail!("Skill must not be empty");
    }

    let plan = match gateway.generate_plan(skill, level, days).await {
        Ok(plan) => plan,
        Err(e) => {
            eprintln!("{}", e.to_string().red());
            std::process::exit(1);
        }
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&plan)?),
        OutputFormat::Text => print_plan(skill, level, &plan),
    }
    Ok(())
}

fn print_plan(skill: &str, level: Level, plan: &Plan) {
    println!(
        "{}",
        format!("{}-day {} plan: {}", plan.len(), level, skill.trim()).bold()
    );
    println!();
    for line in skillplan::render::plan_lines(plan) {
        if line.starts_with("Day ") {
            println!("{}", line.cyan().bold());
        } else {
            println!("{}", line);
        }
    }
}
