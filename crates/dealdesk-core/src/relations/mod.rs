//! The cross-entity relation graph.
//!
//! Three layers, leaf-first:
//! - [`schema`] — the static registry of every legal edge kind between two
//!   record kinds, including self-referential ticket links and group
//!   membership.
//! - [`ops`] — link / unlink / cascade-delete, the only code allowed to
//!   mutate adjacency. Enforces existence, the self-loop ban and the
//!   frozen-link policy at the operation boundary.
//! - [`query`] — read-only derivation of "linked" and "available to link"
//!   sets for detail views.

pub mod ops;
pub mod query;
pub mod schema;

pub use ops::{cascade_delete, delete_entity, link, unlink};
pub use query::{available_targets, linked_targets};
pub use schema::{OrientedRelation, RelationDef, RelationSchema};

#[cfg(test)]
mod tests {
    use crate::entities::{
        Dealership, DealershipStatus, Entity, EntityKind, Ticket, TicketStatus,
    };
    use crate::relations::{available_targets, cascade_delete, link, linked_targets, unlink};
    use crate::relations::schema::RelationSchema;
    use crate::store::EntityStore;
    use crate::DeskError;

    /// End-to-end walk through a ticket/dealership lifecycle: link, close
    /// the ticket, watch it drop out of candidate lists, fail to unlink it,
    /// then cascade the dealership away.
    #[test]
    fn test_ticket_dealership_lifecycle() {
        let schema = RelationSchema::standard();
        let mut store = EntityStore::new();

        let t1 = Ticket::new("Inventory feed stale");
        let d1 = Dealership::new("Apex Motors");
        let (tid, did) = (t1.id.clone(), d1.id.clone());
        store.insert(Entity::Ticket(t1)).unwrap();
        store.insert(Entity::Dealership(d1)).unwrap();

        link(
            &mut store,
            &schema,
            EntityKind::Ticket,
            &tid,
            EntityKind::Dealership,
            &did,
        )
        .unwrap();

        let linked =
            linked_targets(&store, &schema, EntityKind::Dealership, &did, EntityKind::Ticket)
                .unwrap();
        assert_eq!(linked.len(), 1);
        assert_eq!(linked[0].id(), tid);

        // Close the ticket: it must vanish from available lists elsewhere.
        let d2 = Dealership::new("Birchwood Auto");
        let did2 = d2.id.clone();
        store.insert(Entity::Dealership(d2)).unwrap();
        match store.get_mut(EntityKind::Ticket, &tid).unwrap() {
            Entity::Ticket(t) => t.set_status(TicketStatus::Completed),
            _ => unreachable!(),
        }
        let avail = available_targets(
            &store,
            &schema,
            EntityKind::Dealership,
            &did2,
            EntityKind::Ticket,
        )
        .unwrap();
        assert!(avail.iter().all(|e| e.id() != tid));

        // Unlinking the completed ticket is frozen; the link persists.
        let err = unlink(
            &mut store,
            &schema,
            EntityKind::Dealership,
            &did,
            EntityKind::Ticket,
            &tid,
        )
        .unwrap_err();
        assert!(matches!(err, DeskError::LinkFrozen { .. }));
        assert_eq!(
            linked_targets(&store, &schema, EntityKind::Dealership, &did, EntityKind::Ticket)
                .unwrap()
                .len(),
            1
        );

        // Deletion always wins over the freeze.
        cascade_delete(&mut store, &schema, EntityKind::Dealership, &did).unwrap();
        assert!(linked_targets(
            &store,
            &schema,
            EntityKind::Ticket,
            &tid,
            EntityKind::Dealership
        )
        .unwrap()
        .is_empty());
    }

    #[test]
    fn test_cancelled_dealership_does_not_freeze_ticket_unlink() {
        // The freeze gate inspects only the removed side. An active ticket
        // can be unlinked from a cancelled dealership.
        let schema = RelationSchema::standard();
        let mut store = EntityStore::new();

        let t1 = Ticket::new("Photo upload failing");
        let mut d1 = Dealership::new("Closed Lot");
        d1.set_status(DealershipStatus::Cancelled);
        let (tid, did) = (t1.id.clone(), d1.id.clone());
        store.insert(Entity::Ticket(t1)).unwrap();
        store.insert(Entity::Dealership(d1)).unwrap();

        link(
            &mut store,
            &schema,
            EntityKind::Ticket,
            &tid,
            EntityKind::Dealership,
            &did,
        )
        .unwrap();

        // Removing the active ticket from the cancelled dealership is fine.
        unlink(
            &mut store,
            &schema,
            EntityKind::Dealership,
            &did,
            EntityKind::Ticket,
            &tid,
        )
        .unwrap();

        // The reverse direction hits the frozen dealership.
        link(
            &mut store,
            &schema,
            EntityKind::Ticket,
            &tid,
            EntityKind::Dealership,
            &did,
        )
        .unwrap();
        let err = unlink(
            &mut store,
            &schema,
            EntityKind::Ticket,
            &tid,
            EntityKind::Dealership,
            &did,
        )
        .unwrap_err();
        assert!(matches!(err, DeskError::LinkFrozen { .. }));
    }
}
