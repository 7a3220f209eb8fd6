//! Project commands.

use anyhow::{anyhow, Result};
use clap::{Args, Subcommand};
use colored::Colorize;
use std::path::Path;

use dealdesk_core::entities::{Entity, EntityKind, Project, ProjectStatus};
use dealdesk_core::relations::{delete_entity, RelationSchema};

use super::{open_store, save_store};
use crate::output;

#[derive(Subcommand)]
pub enum ProjectCommands {
    /// Create a new project
    New(NewProjectArgs),

    /// List projects
    List,

    /// Show a project and its linked records
    Show {
        /// Project ID
        id: String,
    },

    /// Set project status (planned, active, on_hold, completed)
    Status {
        /// Project ID
        id: String,
        /// New status
        status: String,
    },

    /// Delete a project, severing all of its links first
    Delete {
        /// Project ID
        id: String,
    },
}

#[derive(Args)]
pub struct NewProjectArgs {
    /// Project name
    pub name: String,

    /// Project description
    #[arg(short, long)]
    pub description: Option<String>,
}

pub fn execute(cmd: ProjectCommands, project_dir: &Path) -> Result<()> {
    let schema = RelationSchema::standard();
    let mut store = open_store(project_dir, &schema)?;

    match cmd {
        ProjectCommands::New(args) => {
            let mut project = Project::new(&args.name);
            project.description = args.description;
            let id = project.id.clone();
            store.insert(Entity::Project(project))?;
            save_store(project_dir, &store)?;
            println!(
                "{} Created project: {} ({})",
                "✓".green().bold(),
                args.name.cyan(),
                id.dimmed()
            );
        }

        ProjectCommands::List => {
            let mut records = store.all_of_kind(EntityKind::Project);
            records.sort_by(|a, b| b.recency().cmp(&a.recency()));
            output::print_records_table(&records);
        }

        ProjectCommands::Show { id } => {
            let entity = store.get(EntityKind::Project, &id)?;
            output::print_detail(&store, &schema, entity);
        }

        ProjectCommands::Status { id, status } => {
            let parsed = ProjectStatus::parse(&status)
                .ok_or_else(|| anyhow!("unknown project status '{}'", status))?;
            match store.get_mut(EntityKind::Project, &id)? {
                Entity::Project(p) => p.set_status(parsed),
                _ => unreachable!("kind-keyed bucket"),
            }
            save_store(project_dir, &store)?;
            println!(
                "{} Project {} is now {}",
                "✓".green().bold(),
                id.dimmed(),
                status.cyan()
            );
        }

        ProjectCommands::Delete { id } => {
            let removed = delete_entity(&mut store, &schema, EntityKind::Project, &id)?;
            save_store(project_dir, &store)?;
            println!(
                "{} Deleted project: {}",
                "✓".green().bold(),
                removed.title().cyan()
            );
        }
    }

    Ok(())
}
