//! Workspace initialization command.

use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use dealdesk_core::store::EntityStore;

use super::{save_store, state_path};

pub fn execute(project_dir: &Path) -> Result<()> {
    let path = state_path(project_dir);
    if path.exists() {
        println!(
            "{} Workspace already initialized at {}",
            "!".yellow().bold(),
            path.display()
        );
        return Ok(());
    }

    save_store(project_dir, &EntityStore::new())?;

    println!("{} Initialized dealdesk workspace", "✓".green().bold());
    println!("  State file: {}", path.display());
    println!();
    println!("{}", "Next steps:".bold());
    println!("  dealdesk seed                     # Load a demo dataset");
    println!("  dealdesk ticket new <title>       # Create your first ticket");
    println!("  dealdesk dealership new <name>    # Add a dealership account");
    Ok(())
}
