//! Terminal output formatting.

use colored::{ColoredString, Colorize};
use unicode_width::UnicodeWidthStr;

use dealdesk_core::entities::{Entity, EntityKind};
use dealdesk_core::relations::{linked_targets, RelationSchema};
use dealdesk_core::store::EntityStore;

/// Print records of one kind as a table.
pub fn print_records_table(entities: &[&Entity]) {
    if entities.is_empty() {
        println!("{}", "No records found.".dimmed());
        return;
    }

    println!("{:<10} {:<36} {:<14} {:<12}", "ID", "Title", "Status", "Updated");
    println!("{}", "─".repeat(74));

    for entity in entities {
        let updated = entity
            .recency()
            .map(|t| t.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<10} {:<36} {:<14} {:<12}",
            short_id(entity.id()),
            truncate(entity.title(), 34),
            color_status(entity),
            updated
        );
    }
}

/// Print one record plus everything linked to it, grouped by target kind.
pub fn print_detail(store: &EntityStore, schema: &RelationSchema, entity: &Entity) {
    println!(
        "{} {}",
        entity.title().cyan().bold(),
        format!("({})", entity.id()).dimmed()
    );
    println!("{}: {}", "Kind".bold(), entity.kind());
    println!("{}: {}", "Status".bold(), color_status(entity));

    for rel in schema.relations_of(entity.kind()) {
        let Ok(linked) = linked_targets(store, schema, entity.kind(), entity.id(), rel.target())
        else {
            continue;
        };
        if linked.is_empty() {
            continue;
        }
        println!();
        println!("{} ({})", format!("Linked {}s", rel.target()).bold(), linked.len());
        for target in linked {
            println!(
                "  {} {} {}",
                short_id(target.id()).dimmed(),
                truncate(target.title(), 40),
                format!("[{}]", target.status_label()).dimmed()
            );
        }
    }
}

/// Record counts per kind (after seeding).
pub fn print_counts(store: &EntityStore) {
    for kind in EntityKind::ALL {
        let count = store.count_of_kind(kind);
        if count > 0 {
            println!("  {:<20} {}", kind.to_string(), count);
        }
    }
}

fn color_status(entity: &Entity) -> ColoredString {
    let label = entity.status_label();
    if entity.is_terminal() {
        label.green()
    } else {
        match label {
            "in_progress" | "active" | "beta" => label.yellow(),
            "blocked" | "on_hold" => label.red(),
            "-" => label.dimmed(),
            _ => label.normal(),
        }
    }
}

fn short_id(id: &str) -> &str {
    if id.len() >= 8 { &id[..8] } else { id }
}

/// Truncate to a display width, appending an ellipsis when cut.
fn truncate(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut out = String::new();
    let mut width = 0;
    for c in s.chars() {
        let cw = UnicodeWidthStr::width(c.to_string().as_str());
        if width + cw > max_width.saturating_sub(1) {
            break;
        }
        out.push(c);
        width += cw;
    }
    out.push('…');
    out
}
