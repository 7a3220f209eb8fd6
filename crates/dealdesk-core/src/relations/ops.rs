//! Graph operations: link, unlink, cascade-delete.
//!
//! The only code path that mutates adjacency. Every operation checks its
//! preconditions before touching the store, so a failed call leaves state
//! untouched; every successful call leaves the reciprocity, no-self-loop,
//! no-duplicate and no-dangling invariants holding.

use tracing::{debug, warn};

use crate::entities::{Entity, EntityKind};
use crate::error::{DeskError, DeskResult};
use crate::store::EntityStore;

use super::schema::RelationSchema;

/// Link two records. Idempotent on an already-linked pair.
///
/// Errors: `NotFound` if either endpoint is absent, `SelfLoopRejected` if
/// both sides are the same record, `UnknownRelation` if the schema has no
/// row for the kind pair.
pub fn link(
    store: &mut EntityStore,
    schema: &RelationSchema,
    kind_a: EntityKind,
    id_a: &str,
    kind_b: EntityKind,
    id_b: &str,
) -> DeskResult<()> {
    store.get(kind_a, id_a)?;
    store.get(kind_b, id_b)?;
    if kind_a == kind_b && id_a == id_b {
        return Err(DeskError::SelfLoopRejected {
            kind: kind_a,
            id: id_a.to_string(),
        });
    }
    let rel = schema.relation_between(kind_a, kind_b)?;
    if store.insert_link(rel, id_a, id_b) {
        debug!(relation = rel.def.name, %kind_a, id_a, %kind_b, id_b, "linked");
    } else {
        debug!(relation = rel.def.name, %kind_a, id_a, %kind_b, id_b, "already linked");
    }
    Ok(())
}

/// Unlink two records. Idempotent on a non-linked pair.
///
/// Policy gate: if the record being removed from the initiator's list — the
/// `(kind_b, id_b)` side — is terminal, the edge is frozen and nothing is
/// mutated. Only the removed side is inspected, never the initiator.
pub fn unlink(
    store: &mut EntityStore,
    schema: &RelationSchema,
    kind_a: EntityKind,
    id_a: &str,
    kind_b: EntityKind,
    id_b: &str,
) -> DeskResult<()> {
    store.get(kind_a, id_a)?;
    let removed_side = store.get(kind_b, id_b)?;
    if kind_a == kind_b && id_a == id_b {
        return Err(DeskError::SelfLoopRejected {
            kind: kind_a,
            id: id_a.to_string(),
        });
    }
    if removed_side.is_terminal() {
        return Err(DeskError::LinkFrozen {
            kind: kind_b,
            id: id_b.to_string(),
        });
    }
    let rel = schema.relation_between(kind_a, kind_b)?;
    if store.remove_link(rel, id_a, id_b) {
        debug!(relation = rel.def.name, %kind_a, id_a, %kind_b, id_b, "unlinked");
    }
    Ok(())
}

/// Strip every reference to `(kind, id)` from the rest of the store, ahead
/// of physical removal. Sweeps every relation the schema declares for
/// `kind` (self-referential and group membership included) and bypasses the
/// frozen-link gate: deletion always wins. Idempotent; safe on a record
/// with zero edges. Returns the number of links severed.
pub fn cascade_delete(
    store: &mut EntityStore,
    schema: &RelationSchema,
    kind: EntityKind,
    id: &str,
) -> DeskResult<usize> {
    let mut severed = 0;
    for rel in schema.relations_of(kind) {
        let targets: Vec<String> = store.adjacent_ids(kind, id, *rel).to_vec();
        for target in &targets {
            if store.remove_link(*rel, id, target) {
                severed += 1;
            }
        }
    }
    if severed > 0 {
        debug!(%kind, id, severed, "cascade removed links");
    }
    Ok(severed)
}

/// Delete a record: cascade first, physical removal second. If the cascade
/// cannot complete the record is left in place, so references to a removed
/// record never survive.
pub fn delete_entity(
    store: &mut EntityStore,
    schema: &RelationSchema,
    kind: EntityKind,
    id: &str,
) -> DeskResult<Entity> {
    store.get(kind, id)?;
    let severed = cascade_delete(store, schema, kind, id)?;
    match store.remove(kind, id) {
        Ok(entity) => Ok(entity),
        Err(err) => {
            // Removal only fails if something still references the record,
            // which would mean the cascade missed an edge.
            warn!(%kind, id, severed, %err, "delete aborted after cascade");
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        Dealership, Entity, Feature, FeatureStatus, Meeting, Shopper, Task, Ticket,
    };
    use crate::relations::linked_targets;

    fn ctx() -> (EntityStore, RelationSchema) {
        (EntityStore::new(), RelationSchema::standard())
    }

    fn add_ticket(store: &mut EntityStore, title: &str) -> String {
        let t = Ticket::new(title);
        let id = t.id.clone();
        store.insert(Entity::Ticket(t)).unwrap();
        id
    }

    fn add_dealership(store: &mut EntityStore, name: &str) -> String {
        let d = Dealership::new(name);
        let id = d.id.clone();
        store.insert(Entity::Dealership(d)).unwrap();
        id
    }

    #[test]
    fn test_link_is_reciprocal() {
        let (mut store, schema) = ctx();
        let tid = add_ticket(&mut store, "Feed down");
        let did = add_dealership(&mut store, "Apex Motors");

        link(&mut store, &schema, EntityKind::Ticket, &tid, EntityKind::Dealership, &did).unwrap();

        let from_ticket =
            linked_targets(&store, &schema, EntityKind::Ticket, &tid, EntityKind::Dealership)
                .unwrap();
        let from_dealership =
            linked_targets(&store, &schema, EntityKind::Dealership, &did, EntityKind::Ticket)
                .unwrap();
        assert_eq!(from_ticket.len(), 1);
        assert_eq!(from_ticket[0].id(), did);
        assert_eq!(from_dealership.len(), 1);
        assert_eq!(from_dealership[0].id(), tid);
    }

    #[test]
    fn test_link_unlink_idempotent() {
        let (mut store, schema) = ctx();
        let tid = add_ticket(&mut store, "Feed down");
        let did = add_dealership(&mut store, "Apex Motors");

        for _ in 0..3 {
            link(&mut store, &schema, EntityKind::Ticket, &tid, EntityKind::Dealership, &did)
                .unwrap();
        }
        assert_eq!(
            linked_targets(&store, &schema, EntityKind::Ticket, &tid, EntityKind::Dealership)
                .unwrap()
                .len(),
            1
        );

        for _ in 0..3 {
            unlink(&mut store, &schema, EntityKind::Ticket, &tid, EntityKind::Dealership, &did)
                .unwrap();
        }
        assert!(
            linked_targets(&store, &schema, EntityKind::Ticket, &tid, EntityKind::Dealership)
                .unwrap()
                .is_empty()
        );
        assert!(
            linked_targets(&store, &schema, EntityKind::Dealership, &did, EntityKind::Ticket)
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn test_self_link_rejected() {
        let (mut store, schema) = ctx();
        let tid = add_ticket(&mut store, "Feed down");
        let err = link(&mut store, &schema, EntityKind::Ticket, &tid, EntityKind::Ticket, &tid)
            .unwrap_err();
        assert!(matches!(err, DeskError::SelfLoopRejected { .. }));
        assert!(
            linked_targets(&store, &schema, EntityKind::Ticket, &tid, EntityKind::Ticket)
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn test_ticket_to_ticket_links() {
        let (mut store, schema) = ctx();
        let t1 = add_ticket(&mut store, "Feed down");
        let t2 = add_ticket(&mut store, "Feed down (duplicate)");

        link(&mut store, &schema, EntityKind::Ticket, &t1, EntityKind::Ticket, &t2).unwrap();
        let linked =
            linked_targets(&store, &schema, EntityKind::Ticket, &t2, EntityKind::Ticket).unwrap();
        assert_eq!(linked.len(), 1);
        assert_eq!(linked[0].id(), t1);
    }

    #[test]
    fn test_link_missing_endpoint() {
        let (mut store, schema) = ctx();
        let tid = add_ticket(&mut store, "Feed down");
        let err = link(&mut store, &schema, EntityKind::Ticket, &tid, EntityKind::Dealership, "gone")
            .unwrap_err();
        assert!(matches!(err, DeskError::NotFound { .. }));
    }

    #[test]
    fn test_link_undeclared_pair() {
        let (mut store, schema) = ctx();
        let s = Shopper::new("Ana Silva");
        let g = crate::entities::ContactGroup::new("Launch list");
        let (sid, gid) = (s.id.clone(), g.id.clone());
        store.insert(Entity::Shopper(s)).unwrap();
        store.insert(Entity::ContactGroup(g)).unwrap();
        let err = link(
            &mut store,
            &schema,
            EntityKind::Shopper,
            &sid,
            EntityKind::ContactGroup,
            &gid,
        )
        .unwrap_err();
        assert!(matches!(err, DeskError::UnknownRelation { .. }));
    }

    #[test]
    fn test_frozen_unlink_blocks_but_cascade_wins() {
        let (mut store, schema) = ctx();
        let tid = add_ticket(&mut store, "Request: bulk pricing");
        let mut f = Feature::new("Bulk pricing");
        f.set_status(FeatureStatus::Launched);
        let fid = f.id.clone();
        store.insert(Entity::Feature(f)).unwrap();

        link(&mut store, &schema, EntityKind::Ticket, &tid, EntityKind::Feature, &fid).unwrap();

        let err = unlink(&mut store, &schema, EntityKind::Ticket, &tid, EntityKind::Feature, &fid)
            .unwrap_err();
        assert!(matches!(err, DeskError::LinkFrozen { .. }));
        assert_eq!(
            linked_targets(&store, &schema, EntityKind::Ticket, &tid, EntityKind::Feature)
                .unwrap()
                .len(),
            1
        );

        // Deleting the launched feature still severs the link.
        delete_entity(&mut store, &schema, EntityKind::Feature, &fid).unwrap();
        assert!(
            linked_targets(&store, &schema, EntityKind::Ticket, &tid, EntityKind::Feature)
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn test_cascade_completeness() {
        let (mut store, schema) = ctx();
        let did = add_dealership(&mut store, "Apex Motors");
        let tickets: Vec<String> = (0..3)
            .map(|i| add_ticket(&mut store, &format!("Ticket {i}")))
            .collect();
        let tasks: Vec<String> = (0..2)
            .map(|i| {
                let t = Task::new(format!("Task {i}"));
                let id = t.id.clone();
                store.insert(Entity::Task(t)).unwrap();
                id
            })
            .collect();
        let m = Meeting::new("Quarterly review");
        let mid = m.id.clone();
        store.insert(Entity::Meeting(m)).unwrap();

        for tid in &tickets {
            link(&mut store, &schema, EntityKind::Dealership, &did, EntityKind::Ticket, tid)
                .unwrap();
        }
        for tid in &tasks {
            link(&mut store, &schema, EntityKind::Dealership, &did, EntityKind::Task, tid).unwrap();
        }
        link(&mut store, &schema, EntityKind::Dealership, &did, EntityKind::Meeting, &mid).unwrap();

        let severed = cascade_delete(&mut store, &schema, EntityKind::Dealership, &did).unwrap();
        assert_eq!(severed, 6);
        store.remove(EntityKind::Dealership, &did).unwrap();

        for tid in &tickets {
            assert!(
                linked_targets(&store, &schema, EntityKind::Ticket, tid, EntityKind::Dealership)
                    .unwrap()
                    .is_empty()
            );
        }
        for tid in &tasks {
            assert!(
                linked_targets(&store, &schema, EntityKind::Task, tid, EntityKind::Dealership)
                    .unwrap()
                    .is_empty()
            );
        }
        assert!(
            linked_targets(&store, &schema, EntityKind::Meeting, &mid, EntityKind::Dealership)
                .unwrap()
                .is_empty()
        );

        // Idempotent: nothing left to sever.
        assert_eq!(
            cascade_delete(&mut store, &schema, EntityKind::Dealership, &did).unwrap(),
            0
        );
    }

    #[test]
    fn test_cascade_sweeps_self_referential_links() {
        let (mut store, schema) = ctx();
        let t1 = add_ticket(&mut store, "Original");
        let t2 = add_ticket(&mut store, "Duplicate");
        link(&mut store, &schema, EntityKind::Ticket, &t1, EntityKind::Ticket, &t2).unwrap();

        cascade_delete(&mut store, &schema, EntityKind::Ticket, &t2).unwrap();
        assert!(
            linked_targets(&store, &schema, EntityKind::Ticket, &t1, EntityKind::Ticket)
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn test_group_membership_cascades_like_any_relation() {
        let (mut store, schema) = ctx();
        let g = crate::entities::DealershipGroup::new("Coastal franchise");
        let gid = g.id.clone();
        store.insert(Entity::DealershipGroup(g)).unwrap();
        let did = add_dealership(&mut store, "Apex Motors");

        link(
            &mut store,
            &schema,
            EntityKind::Dealership,
            &did,
            EntityKind::DealershipGroup,
            &gid,
        )
        .unwrap();
        assert_eq!(
            linked_targets(
                &store,
                &schema,
                EntityKind::DealershipGroup,
                &gid,
                EntityKind::Dealership
            )
            .unwrap()
            .len(),
            1
        );

        delete_entity(&mut store, &schema, EntityKind::Dealership, &did).unwrap();
        assert!(linked_targets(
            &store,
            &schema,
            EntityKind::DealershipGroup,
            &gid,
            EntityKind::Dealership
        )
        .unwrap()
        .is_empty());
    }
}
