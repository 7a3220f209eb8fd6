//! Candidate Query Engine.
//!
//! Read-only derivations for linking UI: what is already linked to a
//! record, and what could still be linked. Never mutates, never fails on a
//! single bad edge — rendering the rest of a view outweighs failing hard.

use std::cmp::Ordering;
use std::collections::HashSet;

use tracing::warn;

use crate::entities::{Entity, EntityKind};
use crate::error::DeskResult;
use crate::store::EntityStore;

use super::schema::RelationSchema;

/// Target kinds whose terminal records are withheld from "available"
/// candidate lists. Closed work is not offered for new links; accounts,
/// meetings, features and the rest stay linkable at any status.
const EXCLUDE_TERMINAL_CANDIDATES: &[EntityKind] =
    &[EntityKind::Ticket, EntityKind::Task, EntityKind::Project];

fn excludes_terminal(target_kind: EntityKind) -> bool {
    EXCLUDE_TERMINAL_CANDIDATES.contains(&target_kind)
}

/// Records of `target_kind` linked to `(kind, id)`, in stable insertion
/// order. An adjacency entry that no longer resolves is skipped with a
/// data-integrity warning rather than failing the whole view.
pub fn linked_targets<'a>(
    store: &'a EntityStore,
    schema: &RelationSchema,
    kind: EntityKind,
    id: &str,
    target_kind: EntityKind,
) -> DeskResult<Vec<&'a Entity>> {
    store.get(kind, id)?;
    let rel = schema.relation_between(kind, target_kind)?;
    let mut out = Vec::new();
    for target_id in store.adjacent_ids(kind, id, rel) {
        match store.get(target_kind, target_id) {
            Ok(entity) => out.push(entity),
            Err(_) => warn!(
                owner = %kind,
                owner_id = id,
                target = %target_kind,
                %target_id,
                "adjacency entry points at a missing record; skipping"
            ),
        }
    }
    Ok(out)
}

/// Records of `target_kind` that `(kind, id)` could still link to:
/// not already linked, not the record itself, and not terminal where the
/// candidate policy excludes closed records. Most recent first; undated
/// records last; id breaks ties so the order is deterministic.
pub fn available_targets<'a>(
    store: &'a EntityStore,
    schema: &RelationSchema,
    kind: EntityKind,
    id: &str,
    target_kind: EntityKind,
) -> DeskResult<Vec<&'a Entity>> {
    store.get(kind, id)?;
    let rel = schema.relation_between(kind, target_kind)?;
    let linked: HashSet<&str> = store
        .adjacent_ids(kind, id, rel)
        .iter()
        .map(String::as_str)
        .collect();
    let hide_terminal = excludes_terminal(target_kind);

    let mut out: Vec<&Entity> = store
        .all_of_kind(target_kind)
        .into_iter()
        .filter(|e| !linked.contains(e.id()))
        .filter(|e| !(kind == target_kind && e.id() == id))
        .filter(|e| !(hide_terminal && e.is_terminal()))
        .collect();

    out.sort_by(|x, y| match (x.recency(), y.recency()) {
        (Some(a), Some(b)) => b.cmp(&a).then_with(|| x.id().cmp(y.id())),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => x.id().cmp(y.id()),
    });
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Dealership, Entity, Meeting, Ticket, TicketStatus};
    use crate::relations::link;
    use crate::relations::schema::RelationSchema;
    use crate::DeskError;
    use chrono::{Duration, Utc};

    fn ctx() -> (EntityStore, RelationSchema) {
        (EntityStore::new(), RelationSchema::standard())
    }

    #[test]
    fn test_linked_targets_keep_insertion_order() {
        let (mut store, schema) = ctx();
        let d = Dealership::new("Apex Motors");
        let did = d.id.clone();
        store.insert(Entity::Dealership(d)).unwrap();

        let mut ids = Vec::new();
        for i in 0..5 {
            let t = Ticket::new(format!("Ticket {i}"));
            ids.push(t.id.clone());
            store.insert(Entity::Ticket(t)).unwrap();
        }
        for tid in &ids {
            link(&mut store, &schema, EntityKind::Dealership, &did, EntityKind::Ticket, tid)
                .unwrap();
        }

        let linked =
            linked_targets(&store, &schema, EntityKind::Dealership, &did, EntityKind::Ticket)
                .unwrap();
        let got: Vec<&str> = linked.iter().map(|e| e.id()).collect();
        assert_eq!(got, ids.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[test]
    fn test_linked_targets_skip_dangling_ids() {
        let (mut store, schema) = ctx();
        let t = Ticket::new("Feed down");
        let tid = t.id.clone();
        store.insert(Entity::Ticket(t)).unwrap();
        let d = Dealership::new("Apex Motors");
        let did = d.id.clone();
        store.insert(Entity::Dealership(d)).unwrap();

        // set_adjacency is a raw store primitive: it can plant an id that
        // resolves to nothing, which is exactly the corruption the query
        // layer must tolerate.
        let rel = schema
            .relation_between(EntityKind::Ticket, EntityKind::Dealership)
            .unwrap();
        store
            .set_adjacency(
                EntityKind::Ticket,
                &tid,
                rel,
                &[did.clone(), "ghost".to_string()],
            )
            .unwrap();

        let linked =
            linked_targets(&store, &schema, EntityKind::Ticket, &tid, EntityKind::Dealership)
                .unwrap();
        assert_eq!(linked.len(), 1);
        assert_eq!(linked[0].id(), did);
    }

    #[test]
    fn test_linked_targets_owner_must_exist() {
        let (store, schema) = ctx();
        let err = linked_targets(&store, &schema, EntityKind::Ticket, "gone", EntityKind::Dealership)
            .unwrap_err();
        assert!(matches!(err, DeskError::NotFound { .. }));
    }

    #[test]
    fn test_available_excludes_linked_self_and_terminal() {
        let (mut store, schema) = ctx();
        let d = Dealership::new("Apex Motors");
        let did = d.id.clone();
        store.insert(Entity::Dealership(d)).unwrap();

        let linked_t = Ticket::new("Already linked");
        let linked_id = linked_t.id.clone();
        store.insert(Entity::Ticket(linked_t)).unwrap();
        link(&mut store, &schema, EntityKind::Dealership, &did, EntityKind::Ticket, &linked_id)
            .unwrap();

        let mut done = Ticket::new("Closed out");
        done.set_status(TicketStatus::Completed);
        let done_id = done.id.clone();
        store.insert(Entity::Ticket(done)).unwrap();

        let open = Ticket::new("Still open");
        let open_id = open.id.clone();
        store.insert(Entity::Ticket(open)).unwrap();

        let avail =
            available_targets(&store, &schema, EntityKind::Dealership, &did, EntityKind::Ticket)
                .unwrap();
        let ids: Vec<&str> = avail.iter().map(|e| e.id()).collect();
        assert_eq!(ids, vec![open_id.as_str()]);
        assert!(!ids.contains(&linked_id.as_str()));
        assert!(!ids.contains(&done_id.as_str()));
    }

    #[test]
    fn test_available_same_kind_excludes_self() {
        let (mut store, schema) = ctx();
        let t1 = Ticket::new("One");
        let t2 = Ticket::new("Two");
        let (id1, id2) = (t1.id.clone(), t2.id.clone());
        store.insert(Entity::Ticket(t1)).unwrap();
        store.insert(Entity::Ticket(t2)).unwrap();

        let avail =
            available_targets(&store, &schema, EntityKind::Ticket, &id1, EntityKind::Ticket)
                .unwrap();
        let ids: Vec<&str> = avail.iter().map(|e| e.id()).collect();
        assert_eq!(ids, vec![id2.as_str()]);
    }

    #[test]
    fn test_available_allows_terminal_dealerships() {
        // Dealerships are not in the exclusion policy: cancelled accounts
        // stay linkable (history still gets attached to them).
        let (mut store, schema) = ctx();
        let t = Ticket::new("Feed down");
        let tid = t.id.clone();
        store.insert(Entity::Ticket(t)).unwrap();

        let mut d = Dealership::new("Closed Lot");
        d.set_status(crate::entities::DealershipStatus::Cancelled);
        let did = d.id.clone();
        store.insert(Entity::Dealership(d)).unwrap();

        let avail =
            available_targets(&store, &schema, EntityKind::Ticket, &tid, EntityKind::Dealership)
                .unwrap();
        assert_eq!(avail.len(), 1);
        assert_eq!(avail[0].id(), did);
    }

    #[test]
    fn test_available_orders_by_recency_undated_last() {
        let (mut store, schema) = ctx();
        let t = Ticket::new("Feed down");
        let tid = t.id.clone();
        store.insert(Entity::Ticket(t)).unwrap();

        let now = Utc::now();
        let mut old = Meeting::new("Old sync");
        old.scheduled_for = Some(now - Duration::days(30));
        let mut fresh = Meeting::new("Fresh sync");
        fresh.scheduled_for = Some(now);
        let undated = Meeting::new("Someday sync");
        let (old_id, fresh_id, undated_id) =
            (old.id.clone(), fresh.id.clone(), undated.id.clone());
        store.insert(Entity::Meeting(old)).unwrap();
        store.insert(Entity::Meeting(fresh)).unwrap();
        store.insert(Entity::Meeting(undated)).unwrap();

        let avail =
            available_targets(&store, &schema, EntityKind::Ticket, &tid, EntityKind::Meeting)
                .unwrap();
        let ids: Vec<&str> = avail.iter().map(|e| e.id()).collect();
        assert_eq!(ids, vec![fresh_id.as_str(), old_id.as_str(), undated_id.as_str()]);
    }
}
