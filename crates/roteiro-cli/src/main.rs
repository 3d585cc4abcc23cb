use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "roteiro")]
#[command(about = "Roteiro - AI viral script generation and refinement", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate scripts for one or more platforms
    Generate {
        /// Topic to write about
        #[arg(long)]
        topic: String,
        /// Target platform (repeat the flag for several)
        #[arg(long = "platform", required = true)]
        platforms: Vec<String>,
        /// Requester identity recorded on the stored prompt
        #[arg(long, default_value = "cli")]
        requester: String,
    },
    /// Apply a natural-language edit to a stored script
    Refine {
        /// Identifier of the stored record
        #[arg(long)]
        id: String,
        /// Edit instruction, e.g. "deixe o gancho mais agressivo"
        #[arg(long)]
        instruction: String,
    },
    /// Inspect model configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show the resolved active model configuration
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            topic,
            platforms,
            requester,
        } => commands::generate::run(topic, platforms, requester).await,
        Commands::Refine { id, instruction } => commands::refine::run(id, instruction).await,
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show().await,
        },
    }
}
