use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use cfcoach_lib::config::{get_coach_config, CoachConfig};
use cfcoach_lib::models::GenerativeBackend;
use cfcoach_lib::state::app::AppState;
use cfcoach_lib::{logging, report, routes, GenerationMode};

#[derive(Parser)]
#[command(name = "cfcoach")]
#[command(about = "Codeforces submission analysis and training recommendations", long_about = None)]
struct Cli {
    /// Config file (defaults to $CFCOACH_CONFIG or the data dir coach.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize a handle's submissions
    Analyze {
        handle: String,
        /// Saved user.status response to read instead of the API
        #[arg(long)]
        input: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
    /// Print the prompt that would be sent to the generative backend
    Prompt {
        handle: String,
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Produce training recommendations
    Recommend {
        handle: String,
        #[arg(long)]
        input: Option<PathBuf>,
        /// Skip the generative backend and use the template plan
        #[arg(long)]
        offline: bool,
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.json_logs);

    let config = match cli.config.as_deref() {
        Some(path) => CoachConfig::load_from(path)?,
        None => get_coach_config().clone(),
    };
    let state = AppState::with_config(config).context("failed to initialise coach")?;

    match cli.command {
        Commands::Analyze { handle, input, json } => {
            let (profile, analysis) = routes::analyze_handle(&state, &handle, input.as_deref()).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&analysis)?);
            } else {
                print!("{}", report::build_report(&handle, &profile, &analysis));
            }
        }
        Commands::Prompt { handle, input } => {
            let prompt = routes::prompt_for_handle(&state, &handle, input.as_deref()).await?;
            println!("{}", prompt);
        }
        Commands::Recommend { handle, input, offline, json } => {
            let state = if offline {
                state.with_backend(GenerativeBackend::Disabled)
            } else {
                state
            };
            let recommendation = routes::recommend_for_handle(&state, &handle, input.as_deref()).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&recommendation)?);
            } else {
                let label = match recommendation.mode {
                    GenerationMode::Ai => "AI-generated",
                    GenerationMode::Template => "template",
                };
                println!("[{}] {}", label, recommendation.generated_at.format("%Y-%m-%d %H:%M UTC"));
                println!();
                println!("{}", recommendation.content);
            }
        }
    }

    Ok(())
}
