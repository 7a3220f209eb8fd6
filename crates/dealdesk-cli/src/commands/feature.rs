//! Feature announcement commands.

use anyhow::{anyhow, Result};
use clap::{Args, Subcommand};
use colored::Colorize;
use std::path::Path;

use dealdesk_core::entities::{Entity, EntityKind, Feature, FeatureStatus};
use dealdesk_core::relations::{delete_entity, RelationSchema};

use super::{open_store, save_store};
use crate::output;

#[derive(Subcommand)]
pub enum FeatureCommands {
    /// Announce a new feature
    New(NewFeatureArgs),

    /// List features
    List,

    /// Show a feature and its linked records
    Show {
        /// Feature ID
        id: String,
    },

    /// Set feature status (proposed, in_development, beta, launched)
    Status {
        /// Feature ID
        id: String,
        /// New status
        status: String,
    },

    /// Delete a feature, severing all of its links first
    Delete {
        /// Feature ID
        id: String,
    },
}

#[derive(Args)]
pub struct NewFeatureArgs {
    /// Feature name
    pub name: String,

    /// One-line summary
    #[arg(short, long)]
    pub summary: Option<String>,
}

pub fn execute(cmd: FeatureCommands, project_dir: &Path) -> Result<()> {
    let schema = RelationSchema::standard();
    let mut store = open_store(project_dir, &schema)?;

    match cmd {
        FeatureCommands::New(args) => {
            let mut feature = Feature::new(&args.name);
            feature.summary = args.summary;
            let id = feature.id.clone();
            store.insert(Entity::Feature(feature))?;
            save_store(project_dir, &store)?;
            println!(
                "{} Created feature: {} ({})",
                "✓".green().bold(),
                args.name.cyan(),
                id.dimmed()
            );
        }

        FeatureCommands::List => {
            let mut records = store.all_of_kind(EntityKind::Feature);
            records.sort_by(|a, b| b.recency().cmp(&a.recency()));
            output::print_records_table(&records);
        }

        FeatureCommands::Show { id } => {
            let entity = store.get(EntityKind::Feature, &id)?;
            output::print_detail(&store, &schema, entity);
        }

        FeatureCommands::Status { id, status } => {
            let parsed = FeatureStatus::parse(&status)
                .ok_or_else(|| anyhow!("unknown feature status '{}'", status))?;
            match store.get_mut(EntityKind::Feature, &id)? {
                Entity::Feature(f) => f.set_status(parsed),
                _ => unreachable!("kind-keyed bucket"),
            }
            save_store(project_dir, &store)?;
            println!(
                "{} Feature {} is now {}",
                "✓".green().bold(),
                id.dimmed(),
                status.cyan()
            );
        }

        FeatureCommands::Delete { id } => {
            let removed = delete_entity(&mut store, &schema, EntityKind::Feature, &id)?;
            save_store(project_dir, &store)?;
            println!(
                "{} Deleted feature: {}",
                "✓".green().bold(),
                removed.title().cyan()
            );
        }
    }

    Ok(())
}
