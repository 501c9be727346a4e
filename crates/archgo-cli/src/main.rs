use anyhow::Result;
use archgo_core::playback::Scenario;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

mod commands;
mod context;
mod logging;
mod render;

use context::AppContext;

#[derive(Parser)]
#[command(name = "archgo")]
#[command(
    about = "Architect-Go - turn architecture sketches into backend designs",
    long_about = None
)]
struct Cli {
    /// Use this config.toml instead of the one in the config directory
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a sketch and/or a text description
    Analyze {
        /// Image of the architecture sketch
        #[arg(long)]
        image: Option<PathBuf>,
        /// Free-text description of the architecture
        #[arg(long)]
        context: Option<String>,
        /// Save the result to the vault
        #[arg(long)]
        save: bool,
        /// Vault title (derived from the context when omitted)
        #[arg(long, requires = "save")]
        title: Option<String>,
    },
    /// Manage saved results
    Vault {
        #[command(subcommand)]
        action: VaultAction,
    },
    /// Play a scripted terminal session
    Playback {
        #[arg(value_enum)]
        scenario: ScenarioArg,
        /// Source file scanned for symbol names
        #[arg(long)]
        source: Option<PathBuf>,
    },
    /// Start an interactive session
    Shell,
}

#[derive(Subcommand)]
enum VaultAction {
    /// List saved results, newest first
    List,
    /// Print a saved result
    Show { id: String },
    /// Delete a saved result
    Delete { id: String },
    /// Write the security report of a saved result
    Export {
        id: String,
        /// Target directory (defaults to the configured export directory)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ScenarioArg {
    Simulate,
    Debug,
}

impl From<ScenarioArg> for Scenario {
    fn from(arg: ScenarioArg) -> Self {
        match arg {
            ScenarioArg::Simulate => Scenario::Simulate,
            ScenarioArg::Debug => Scenario::Debug,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let ctx = AppContext::load(cli.config)?;
    let _log_guard = logging::init_tracing(&ctx.config.logging)?;

    match cli.command {
        Commands::Analyze {
            image,
            context,
            save,
            title,
        } => {
            commands::analyze::run(
                &ctx,
                image.as_deref(),
                context.as_deref(),
                save,
                title.as_deref(),
            )
            .await?
        }
        Commands::Vault { action } => match action {
            VaultAction::List => commands::vault::list(&ctx)?,
            VaultAction::Show { id } => commands::vault::show(&ctx, &id)?,
            VaultAction::Delete { id } => commands::vault::delete(&ctx, &id)?,
            VaultAction::Export { id, dir } => commands::vault::export(&ctx, &id, dir.as_deref())?,
        },
        Commands::Playback { scenario, source } => {
            commands::playback::run(scenario.into(), source.as_deref()).await?
        }
        Commands::Shell => commands::shell::run(&ctx).await?,
    }

    Ok(())
}
