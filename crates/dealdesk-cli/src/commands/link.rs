//! Relation graph commands: link, unlink, linked, available.
//!
//! Policy refusals (self-link, frozen link) are rendered as one-line
//! messages rather than errors — in the UI these are disabled controls, not
//! failures. A missing endpoint is a logged no-op: a stale screen may race
//! a delete against a link click.

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use std::path::Path;
use tracing::warn;

use dealdesk_core::relations::{available_targets, link, linked_targets, unlink, RelationSchema};
use dealdesk_core::DeskError;

use super::{open_store, parse_kind, save_store};
use crate::output;

#[derive(Subcommand)]
pub enum LinkCommands {
    /// Link two records
    Add(PairArgs),

    /// Remove the link between two records
    Remove(PairArgs),

    /// List records of one kind linked to a record
    List(TargetArgs),

    /// List records of one kind still available to link to a record
    Available(TargetArgs),
}

#[derive(Args)]
pub struct PairArgs {
    /// Record kind (e.g. ticket, dealership)
    pub kind: String,
    /// Record ID
    pub id: String,
    /// Other record kind
    pub target_kind: String,
    /// Other record ID
    pub target_id: String,
}

#[derive(Args)]
pub struct TargetArgs {
    /// Record kind (e.g. ticket, dealership)
    pub kind: String,
    /// Record ID
    pub id: String,
    /// Target record kind
    pub target_kind: String,
}

pub fn execute(cmd: LinkCommands, project_dir: &Path) -> Result<()> {
    let schema = RelationSchema::standard();
    let mut store = open_store(project_dir, &schema)?;

    match cmd {
        LinkCommands::Add(args) => {
            let kind = parse_kind(&args.kind)?;
            let target_kind = parse_kind(&args.target_kind)?;
            match link(&mut store, &schema, kind, &args.id, target_kind, &args.target_id) {
                Ok(()) => {
                    save_store(project_dir, &store)?;
                    println!(
                        "{} Linked {} {} and {} {}",
                        "✓".green().bold(),
                        kind,
                        args.id.dimmed(),
                        target_kind,
                        args.target_id.dimmed()
                    );
                }
                Err(DeskError::SelfLoopRejected { .. }) => {
                    println!("{} A record cannot be linked to itself.", "!".yellow().bold());
                }
                Err(DeskError::NotFound { kind, id }) => {
                    warn!(%kind, id, "link skipped, endpoint no longer exists");
                    println!(
                        "{} {} {} no longer exists; nothing linked.",
                        "!".yellow().bold(),
                        kind,
                        id.dimmed()
                    );
                }
                Err(err) => return Err(err.into()),
            }
        }

        LinkCommands::Remove(args) => {
            let kind = parse_kind(&args.kind)?;
            let target_kind = parse_kind(&args.target_kind)?;
            match unlink(&mut store, &schema, kind, &args.id, target_kind, &args.target_id) {
                Ok(()) => {
                    save_store(project_dir, &store)?;
                    println!(
                        "{} Unlinked {} {} from {} {}",
                        "✓".green().bold(),
                        target_kind,
                        args.target_id.dimmed(),
                        kind,
                        args.id.dimmed()
                    );
                }
                Err(DeskError::LinkFrozen { kind, id }) => {
                    println!(
                        "{} {} {} is closed; its links are frozen and stay in place.",
                        "!".yellow().bold(),
                        kind,
                        id.dimmed()
                    );
                }
                Err(DeskError::SelfLoopRejected { .. }) => {
                    println!("{} A record is never linked to itself.", "!".yellow().bold());
                }
                Err(DeskError::NotFound { kind, id }) => {
                    warn!(%kind, id, "unlink skipped, endpoint no longer exists");
                    println!(
                        "{} {} {} no longer exists; nothing to unlink.",
                        "!".yellow().bold(),
                        kind,
                        id.dimmed()
                    );
                }
                Err(err) => return Err(err.into()),
            }
        }

        LinkCommands::List(args) => {
            let kind = parse_kind(&args.kind)?;
            let target_kind = parse_kind(&args.target_kind)?;
            let linked = linked_targets(&store, &schema, kind, &args.id, target_kind)?;
            output::print_records_table(&linked);
        }

        LinkCommands::Available(args) => {
            let kind = parse_kind(&args.kind)?;
            let target_kind = parse_kind(&args.target_kind)?;
            let available = available_targets(&store, &schema, kind, &args.id, target_kind)?;
            output::print_records_table(&available);
        }
    }

    Ok(())
}
