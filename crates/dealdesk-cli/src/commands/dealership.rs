//! Dealership account commands.

use anyhow::{anyhow, Result};
use clap::{Args, Subcommand};
use colored::Colorize;
use std::path::Path;

use dealdesk_core::entities::{Dealership, DealershipStatus, Entity, EntityKind};
use dealdesk_core::relations::{delete_entity, RelationSchema};

use super::{open_store, save_store};
use crate::output;

#[derive(Subcommand)]
pub enum DealershipCommands {
    /// Add a dealership account
    New(NewDealershipArgs),

    /// List dealership accounts
    List,

    /// Show a dealership and its linked records
    Show {
        /// Dealership ID
        id: String,
    },

    /// Set account status (onboarding, active, cancelled)
    Status {
        /// Dealership ID
        id: String,
        /// New status
        status: String,
    },

    /// Delete a dealership, severing all of its links first
    Delete {
        /// Dealership ID
        id: String,
    },
}

#[derive(Args)]
pub struct NewDealershipArgs {
    /// Dealership name
    pub name: String,

    /// City
    #[arg(long)]
    pub city: Option<String>,

    /// Account rep
    #[arg(long)]
    pub rep: Option<String>,
}

pub fn execute(cmd: DealershipCommands, project_dir: &Path) -> Result<()> {
    let schema = RelationSchema::standard();
    let mut store = open_store(project_dir, &schema)?;

    match cmd {
        DealershipCommands::New(args) => {
            let mut dealership = Dealership::new(&args.name);
            dealership.city = args.city;
            dealership.account_rep = args.rep;
            let id = dealership.id.clone();
            store.insert(Entity::Dealership(dealership))?;
            save_store(project_dir, &store)?;
            println!(
                "{} Added dealership: {} ({})",
                "✓".green().bold(),
                args.name.cyan(),
                id.dimmed()
            );
        }

        DealershipCommands::List => {
            let mut records = store.all_of_kind(EntityKind::Dealership);
            records.sort_by(|a, b| b.recency().cmp(&a.recency()));
            output::print_records_table(&records);
        }

        DealershipCommands::Show { id } => {
            let entity = store.get(EntityKind::Dealership, &id)?;
            output::print_detail(&store, &schema, entity);
        }

        DealershipCommands::Status { id, status } => {
            let parsed = DealershipStatus::parse(&status)
                .ok_or_else(|| anyhow!("unknown dealership status '{}'", status))?;
            match store.get_mut(EntityKind::Dealership, &id)? {
                Entity::Dealership(d) => d.set_status(parsed),
                _ => unreachable!("kind-keyed bucket"),
            }
            save_store(project_dir, &store)?;
            println!(
                "{} Dealership {} is now {}",
                "✓".green().bold(),
                id.dimmed(),
                status.cyan()
            );
        }

        DealershipCommands::Delete { id } => {
            let removed = delete_entity(&mut store, &schema, EntityKind::Dealership, &id)?;
            save_store(project_dir, &store)?;
            println!(
                "{} Deleted dealership: {}",
                "✓".green().bold(),
                removed.title().cyan()
            );
        }
    }

    Ok(())
}
