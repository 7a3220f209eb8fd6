//! Ticket management commands.

use anyhow::{anyhow, Result};
use clap::{Args, Subcommand};
use colored::Colorize;
use std::path::Path;

use dealdesk_core::entities::{Entity, EntityKind, Ticket, TicketStatus};
use dealdesk_core::relations::{delete_entity, RelationSchema};

use super::{open_store, save_store};
use crate::output;

#[derive(Subcommand)]
pub enum TicketCommands {
    /// Create a new ticket
    New(NewTicketArgs),

    /// List tickets
    List,

    /// Show a ticket and its linked records
    Show {
        /// Ticket ID
        id: String,
    },

    /// Set ticket status (open, in_progress, blocked, completed)
    Status {
        /// Ticket ID
        id: String,
        /// New status
        status: String,
    },

    /// Delete a ticket, severing all of its links first
    Delete {
        /// Ticket ID
        id: String,
    },
}

#[derive(Args)]
pub struct NewTicketArgs {
    /// Ticket title
    pub title: String,

    /// Ticket description
    #[arg(short, long)]
    pub description: Option<String>,

    /// Priority (low, medium, high, critical)
    #[arg(long, default_value = "medium")]
    pub priority: String,
}

pub fn execute(cmd: TicketCommands, project_dir: &Path) -> Result<()> {
    let schema = RelationSchema::standard();
    let mut store = open_store(project_dir, &schema)?;

    match cmd {
        TicketCommands::New(args) => {
            let mut ticket = Ticket::new(&args.title);
            ticket.description = args.description;
            ticket.priority = args.priority;
            let id = ticket.id.clone();
            store.insert(Entity::Ticket(ticket))?;
            save_store(project_dir, &store)?;
            println!(
                "{} Created ticket: {} ({})",
                "✓".green().bold(),
                args.title.cyan(),
                id.dimmed()
            );
        }

        TicketCommands::List => {
            let mut records = store.all_of_kind(EntityKind::Ticket);
            records.sort_by(|a, b| b.recency().cmp(&a.recency()));
            output::print_records_table(&records);
        }

        TicketCommands::Show { id } => {
            let entity = store.get(EntityKind::Ticket, &id)?;
            output::print_detail(&store, &schema, entity);
        }

        TicketCommands::Status { id, status } => {
            let parsed = TicketStatus::parse(&status)
                .ok_or_else(|| anyhow!("unknown ticket status '{}'", status))?;
            match store.get_mut(EntityKind::Ticket, &id)? {
                Entity::Ticket(t) => t.set_status(parsed),
                _ => unreachable!("kind-keyed bucket"),
            }
            save_store(project_dir, &store)?;
            println!(
                "{} Ticket {} is now {}",
                "✓".green().bold(),
                id.dimmed(),
                status.cyan()
            );
        }

        TicketCommands::Delete { id } => {
            let removed = delete_entity(&mut store, &schema, EntityKind::Ticket, &id)?;
            save_store(project_dir, &store)?;
            println!(
                "{} Deleted ticket: {}",
                "✓".green().bold(),
                removed.title().cyan()
            );
        }
    }

    Ok(())
}
