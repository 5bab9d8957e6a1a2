use clap::{Parser, Subcommand};
use project_tracker::commands::*;
use project_tracker::core::{error::Result, print_error};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "project-tracker")]
#[command(about = "Track local project folders and their live git status")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show branch, changes, behind count and activity for projects
    Status {
        /// Project folders (defaults to every tracked project)
        paths: Vec<PathBuf>,
        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
        /// List the top contributors under each project
        #[arg(long)]
        contributors: bool,
    },
    /// List tracked projects without touching git
    List {
        /// Print the registry as JSON
        #[arg(long)]
        json: bool,
    },
    /// Start tracking a project folder (defaults to the current directory)
    Track { path: Option<PathBuf> },
    /// Stop tracking a project folder
    Untrack { path: PathBuf },
    /// Pull the latest changes for a project
    Pull { path: PathBuf },
    /// Clone a repository and start tracking it
    #[command(name = "clone")]
    CloneRepo {
        url: String,
        /// Parent folder to clone into (defaults to the current directory)
        #[arg(long)]
        into: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Configure logging based on --debug flag; RUST_LOG still wins when set
    let default_level = if cli.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    if let Err(e) = run(cli.command).await {
        print_error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run(command: Commands) -> Result<()> {
    let ctx = TrackerContext::init()?;

    match command {
        Commands::Status {
            paths,
            json,
            contributors,
        } => {
            execute_status(
                &ctx,
                StatusOptions {
                    paths,
                    json,
                    contributors,
                },
            )
            .await
        }
        Commands::List { json } => execute_list(&ctx, json),
        Commands::Track { path } => execute_track(&ctx, path),
        Commands::Untrack { path } => execute_untrack(&ctx, path),
        Commands::Pull { path } => execute_pull(&ctx, path).await,
        Commands::CloneRepo { url, into } => execute_clone(&ctx, url, into).await,
    }
}
