use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use git_branchguard::cli::{execute, Command, Workspace};
use git_branchguard::context::InvocationContext;
use git_branchguard::git::Git2Repository;

#[derive(Parser)]
#[command(
    name = "git-branchguard",
    version,
    about = "Validate branch names against the branching model and prepare release descriptors"
)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the current branch name and print its merge rules
    ValidateBranch,

    /// Write and commit release.json on the current release branch
    PrepareRelease {
        /// Release version, X.Y.Z
        version: Option<String>,

        /// Free-text description of the release
        description: Option<String>,
    },

    /// Print build metadata for the prepared release as JSON
    BuildInfo,
}

impl From<Commands> for Command {
    fn from(command: Commands) -> Self {
        match command {
            Commands::ValidateBranch => Command::ValidateBranch,
            Commands::PrepareRelease {
                version,
                description,
            } => Command::PrepareRelease {
                version,
                description,
            },
            Commands::BuildInfo => Command::BuildInfo,
        }
    }
}

fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("git_branchguard=error"));

    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);

    if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .try_init()?;
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing()?;

    let root = std::env::current_dir()?;
    let repo = Git2Repository::open(&root);
    let workspace = Workspace {
        vcs: &repo,
        root,
        context: InvocationContext::from_env(),
    };

    let status = execute(&workspace, &args.command.into());
    std::process::exit(status);
}
