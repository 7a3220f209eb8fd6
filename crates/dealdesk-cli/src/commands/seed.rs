//! Demo dataset seeding.

use anyhow::Result;
use chrono::{Duration, Utc};
use colored::Colorize;
use std::path::Path;

use dealdesk_core::entities::{
    Contact, ContactGroup, Dealership, DealershipGroup, DealershipStatus, Entity, EntityKind,
    Feature, FeatureStatus, KnowledgeArticle, Meeting, Project, ProjectStatus, Quarter, Release,
    Shopper, Task, Ticket, TicketStatus,
};
use dealdesk_core::relations::{link, RelationSchema};
use dealdesk_core::store::EntityStore;

use super::{save_store, state_path};

/// Populate a fresh store with a small dataset touching every record kind,
/// then link the pieces together the way a real workspace would look.
pub fn execute(project_dir: &Path) -> Result<()> {
    let path = state_path(project_dir);
    if !path.exists() {
        super::init::execute(project_dir)?;
        println!();
    }

    let schema = RelationSchema::standard();
    let mut store = EntityStore::new();
    let now = Utc::now();

    let apex = Dealership::new("Apex Motors");
    let mut birch = Dealership::new("Birchwood Auto");
    birch.set_status(DealershipStatus::Active);
    let (apex_id, birch_id) = (apex.id.clone(), birch.id.clone());

    let group = DealershipGroup::new("Coastal franchise");
    let group_id = group.id.clone();

    let mut feed = Ticket::new("Inventory feed stale for Apex");
    feed.priority = "high".to_string();
    let mut photos = Ticket::new("Photo uploads rejected");
    photos.set_status(TicketStatus::InProgress);
    let mut pricing = Ticket::new("Request: bulk pricing tool");
    pricing.set_status(TicketStatus::Completed);
    let (feed_id, photos_id, pricing_id) =
        (feed.id.clone(), photos.id.clone(), pricing.id.clone());

    let mut onboarding = Project::new("Dealer onboarding revamp");
    onboarding.set_status(ProjectStatus::Active);
    let onboarding_id = onboarding.id.clone();

    let triage = Task::new("Triage feed connector logs");
    let triage_id = triage.id.clone();

    let mut review = Meeting::new("Apex quarterly review");
    review.scheduled_for = Some(now + Duration::days(7));
    let review_id = review.id.clone();

    let mut bulk = Feature::new("Bulk pricing");
    bulk.set_status(FeatureStatus::Beta);
    let bulk_id = bulk.id.clone();

    let maria = Contact::new("Maria Keller");
    let maria_id = maria.id.clone();
    let announce = ContactGroup::new("Launch announcements");
    let announce_id = announce.id.clone();

    let shopper = Shopper::new("Ana Silva");
    let shopper_id = shopper.id.clone();

    let release = Release::new("2026.9");
    let release_id = release.id.clone();

    let mut q3 = Quarter::new("2026-Q3");
    q3.starts_on = Some(now - Duration::days(53));
    let q3_id = q3.id.clone();

    let runbook = KnowledgeArticle::new("Feed connector runbook");
    let runbook_id = runbook.id.clone();

    store.insert(Entity::Dealership(apex))?;
    store.insert(Entity::Dealership(birch))?;
    store.insert(Entity::DealershipGroup(group))?;
    store.insert(Entity::Ticket(feed))?;
    store.insert(Entity::Ticket(photos))?;
    store.insert(Entity::Ticket(pricing))?;
    store.insert(Entity::Project(onboarding))?;
    store.insert(Entity::Task(triage))?;
    store.insert(Entity::Meeting(review))?;
    store.insert(Entity::Feature(bulk))?;
    store.insert(Entity::Contact(maria))?;
    store.insert(Entity::ContactGroup(announce))?;
    store.insert(Entity::Shopper(shopper))?;
    store.insert(Entity::Release(release))?;
    store.insert(Entity::Quarter(q3))?;
    store.insert(Entity::KnowledgeArticle(runbook))?;

    type K = EntityKind;
    let pairs: &[(EntityKind, &str, EntityKind, &str)] = &[
        (K::Ticket, &feed_id, K::Dealership, &apex_id),
        (K::Ticket, &photos_id, K::Dealership, &apex_id),
        (K::Ticket, &photos_id, K::Dealership, &birch_id),
        (K::Ticket, &feed_id, K::Ticket, &photos_id),
        (K::Ticket, &pricing_id, K::Feature, &bulk_id),
        (K::Ticket, &feed_id, K::Task, &triage_id),
        (K::Ticket, &feed_id, K::KnowledgeArticle, &runbook_id),
        (K::Ticket, &feed_id, K::Shopper, &shopper_id),
        (K::Project, &onboarding_id, K::Dealership, &apex_id),
        (K::Project, &onboarding_id, K::Quarter, &q3_id),
        (K::Project, &onboarding_id, K::Release, &release_id),
        (K::Meeting, &review_id, K::Dealership, &apex_id),
        (K::Meeting, &review_id, K::Contact, &maria_id),
        (K::Feature, &bulk_id, K::Release, &release_id),
        (K::Dealership, &apex_id, K::Contact, &maria_id),
        (K::Dealership, &apex_id, K::DealershipGroup, &group_id),
        (K::Dealership, &birch_id, K::DealershipGroup, &group_id),
        (K::Contact, &maria_id, K::ContactGroup, &announce_id),
        (K::Release, &release_id, K::Quarter, &q3_id),
    ];
    for (kind_a, id_a, kind_b, id_b) in pairs {
        link(&mut store, &schema, *kind_a, id_a, *kind_b, id_b)?;
    }

    save_store(project_dir, &store)?;

    println!("{} Seeded demo dataset:", "✓".green().bold());
    crate::output::print_counts(&store);
    println!();
    println!("Try:");
    println!("  dealdesk dealership list");
    println!("  dealdesk link list dealership {apex_id} ticket");
    Ok(())
}
