//! Meeting commands.

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};
use colored::Colorize;
use std::path::Path;

use dealdesk_core::entities::{Entity, EntityKind, Meeting, MeetingStatus};
use dealdesk_core::relations::{delete_entity, RelationSchema};

use super::{open_store, save_store};
use crate::output;

#[derive(Subcommand)]
pub enum MeetingCommands {
    /// Schedule a new meeting
    New(NewMeetingArgs),

    /// List meetings
    List,

    /// Show a meeting and its linked records
    Show {
        /// Meeting ID
        id: String,
    },

    /// Set meeting status (scheduled, held, cancelled)
    Status {
        /// Meeting ID
        id: String,
        /// New status
        status: String,
    },

    /// Delete a meeting, severing all of its links first
    Delete {
        /// Meeting ID
        id: String,
    },
}

#[derive(Args)]
pub struct NewMeetingArgs {
    /// Meeting title
    pub title: String,

    /// Agenda
    #[arg(short, long)]
    pub agenda: Option<String>,

    /// Scheduled time, RFC 3339 (e.g. 2026-09-01T15:00:00Z)
    #[arg(long)]
    pub at: Option<String>,
}

pub fn execute(cmd: MeetingCommands, project_dir: &Path) -> Result<()> {
    let schema = RelationSchema::standard();
    let mut store = open_store(project_dir, &schema)?;

    match cmd {
        MeetingCommands::New(args) => {
            let mut meeting = Meeting::new(&args.title);
            meeting.agenda = args.agenda;
            if let Some(at) = &args.at {
                let parsed: DateTime<Utc> = at
                    .parse()
                    .map_err(|_| anyhow!("invalid RFC 3339 timestamp '{}'", at))?;
                meeting.scheduled_for = Some(parsed);
            }
            let id = meeting.id.clone();
            store.insert(Entity::Meeting(meeting))?;
            save_store(project_dir, &store)?;
            println!(
                "{} Scheduled meeting: {} ({})",
                "✓".green().bold(),
                args.title.cyan(),
                id.dimmed()
            );
        }

        MeetingCommands::List => {
            let mut records = store.all_of_kind(EntityKind::Meeting);
            records.sort_by(|a, b| b.recency().cmp(&a.recency()));
            output::print_records_table(&records);
        }

        MeetingCommands::Show { id } => {
            let entity = store.get(EntityKind::Meeting, &id)?;
            output::print_detail(&store, &schema, entity);
        }

        MeetingCommands::Status { id, status } => {
            let parsed = MeetingStatus::parse(&status)
                .ok_or_else(|| anyhow!("unknown meeting status '{}'", status))?;
            match store.get_mut(EntityKind::Meeting, &id)? {
                Entity::Meeting(m) => m.set_status(parsed),
                _ => unreachable!("kind-keyed bucket"),
            }
            save_store(project_dir, &store)?;
            println!(
                "{} Meeting {} is now {}",
                "✓".green().bold(),
                id.dimmed(),
                status.cyan()
            );
        }

        MeetingCommands::Delete { id } => {
            let removed = delete_entity(&mut store, &schema, EntityKind::Meeting, &id)?;
            save_store(project_dir, &store)?;
            println!(
                "{} Deleted meeting: {}",
                "✓".green().bold(),
                removed.title().cyan()
            );
        }
    }

    Ok(())
}
