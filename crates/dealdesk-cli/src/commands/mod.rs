//! CLI command definitions and handlers.

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use dealdesk_core::entities::EntityKind;
use dealdesk_core::relations::RelationSchema;
use dealdesk_core::snapshot;
use dealdesk_core::store::EntityStore;

pub mod dealership;
pub mod feature;
pub mod init;
pub mod link;
pub mod meeting;
pub mod project;
pub mod seed;
pub mod task;
pub mod ticket;

/// Dealdesk - Dealership Operations Tracker
#[derive(Parser)]
#[command(name = "dealdesk")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory (defaults to current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a dealdesk workspace
    Init,

    /// Populate a demo dataset across every record kind
    Seed,

    /// Manage tickets
    #[command(subcommand)]
    Ticket(ticket::TicketCommands),

    /// Manage dealership accounts
    #[command(subcommand)]
    Dealership(dealership::DealershipCommands),

    /// Manage projects
    #[command(subcommand)]
    Project(project::ProjectCommands),

    /// Manage tasks
    #[command(subcommand)]
    Task(task::TaskCommands),

    /// Manage meetings
    #[command(subcommand)]
    Meeting(meeting::MeetingCommands),

    /// Manage feature announcements
    #[command(subcommand)]
    Feature(feature::FeatureCommands),

    /// Link records together (any kind pair the schema declares)
    #[command(subcommand)]
    Link(link::LinkCommands),
}

impl Cli {
    pub fn execute(self) -> Result<()> {
        let project_dir = match self.project {
            Some(dir) => dir,
            None => std::env::current_dir()?,
        };

        match self.command {
            Commands::Init => init::execute(&project_dir),
            Commands::Seed => seed::execute(&project_dir),
            Commands::Ticket(cmd) => ticket::execute(cmd, &project_dir),
            Commands::Dealership(cmd) => dealership::execute(cmd, &project_dir),
            Commands::Project(cmd) => project::execute(cmd, &project_dir),
            Commands::Task(cmd) => task::execute(cmd, &project_dir),
            Commands::Meeting(cmd) => meeting::execute(cmd, &project_dir),
            Commands::Feature(cmd) => feature::execute(cmd, &project_dir),
            Commands::Link(cmd) => link::execute(cmd, &project_dir),
        }
    }
}

/// Where the snapshot lives under a project directory.
pub(crate) fn state_path(project_dir: &Path) -> PathBuf {
    project_dir.join(".dealdesk/state.json")
}

pub(crate) fn open_store(project_dir: &Path, schema: &RelationSchema) -> Result<EntityStore> {
    let path = state_path(project_dir);
    if !path.exists() {
        return Err(anyhow!(
            "No dealdesk data at {}. Run 'dealdesk init' first.",
            path.display()
        ));
    }
    Ok(snapshot::load(&path, schema)?)
}

pub(crate) fn save_store(project_dir: &Path, store: &EntityStore) -> Result<()> {
    snapshot::save(store, &state_path(project_dir))?;
    Ok(())
}

/// Parse a record kind argument.
pub(crate) fn parse_kind(s: &str) -> Result<EntityKind> {
    EntityKind::parse(s).ok_or_else(|| {
        let kinds: Vec<&str> = EntityKind::ALL.iter().map(|k| k.as_str()).collect();
        anyhow!("unknown kind '{}' (expected one of: {})", s, kinds.join(", "))
    })
}
