//! Task commands.

use anyhow::{anyhow, Result};
use clap::{Args, Subcommand};
use colored::Colorize;
use std::path::Path;

use dealdesk_core::entities::{Entity, EntityKind, Task, TaskStatus};
use dealdesk_core::relations::{delete_entity, RelationSchema};

use super::{open_store, save_store};
use crate::output;

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Create a new task
    New(NewTaskArgs),

    /// List tasks
    List,

    /// Show a task and its linked records
    Show {
        /// Task ID
        id: String,
    },

    /// Set task status (todo, in_progress, done)
    Status {
        /// Task ID
        id: String,
        /// New status
        status: String,
    },

    /// Delete a task, severing all of its links first
    Delete {
        /// Task ID
        id: String,
    },
}

#[derive(Args)]
pub struct NewTaskArgs {
    /// Task title
    pub title: String,

    /// Assignee
    #[arg(short, long)]
    pub assignee: Option<String>,
}

pub fn execute(cmd: TaskCommands, project_dir: &Path) -> Result<()> {
    let schema = RelationSchema::standard();
    let mut store = open_store(project_dir, &schema)?;

    match cmd {
        TaskCommands::New(args) => {
            let mut task = Task::new(&args.title);
            task.assignee = args.assignee;
            let id = task.id.clone();
            store.insert(Entity::Task(task))?;
            save_store(project_dir, &store)?;
            println!(
                "{} Created task: {} ({})",
                "✓".green().bold(),
                args.title.cyan(),
                id.dimmed()
            );
        }

        TaskCommands::List => {
            let mut records = store.all_of_kind(EntityKind::Task);
            records.sort_by(|a, b| b.recency().cmp(&a.recency()));
            output::print_records_table(&records);
        }

        TaskCommands::Show { id } => {
            let entity = store.get(EntityKind::Task, &id)?;
            output::print_detail(&store, &schema, entity);
        }

        TaskCommands::Status { id, status } => {
            let parsed = TaskStatus::parse(&status)
                .ok_or_else(|| anyhow!("unknown task status '{}'", status))?;
            match store.get_mut(EntityKind::Task, &id)? {
                Entity::Task(t) => t.set_status(parsed),
                _ => unreachable!("kind-keyed bucket"),
            }
            save_store(project_dir, &store)?;
            println!(
                "{} Task {} is now {}",
                "✓".green().bold(),
                id.dimmed(),
                status.cyan()
            );
        }

        TaskCommands::Delete { id } => {
            let removed = delete_entity(&mut store, &schema, EntityKind::Task, &id)?;
            save_store(project_dir, &store)?;
            println!(
                "{} Deleted task: {}",
                "✓".green().bold(),
                removed.title().cyan()
            );
        }
    }

    Ok(())
}
