//! Entity Store.
//!
//! One collection per record kind plus the link index. The old system kept
//! a denormalized id array on each endpoint and relied on disciplined
//! double-writes to keep the two sides in sync; here the dual-array shape
//! is only the read contract. Internally there is one canonical edge set
//! and two derived adjacency views maintained together by a single
//! insert/remove path, so reciprocity is structural.
//!
//! The store enforces no cross-record business policy (self-loop bans,
//! frozen links, existence of both endpoints); that is the job of
//! [`crate::relations::ops`].

use std::collections::{HashMap, HashSet};

use crate::entities::{Entity, EntityKind};
use crate::error::{DeskError, DeskResult};
use crate::relations::schema::OrientedRelation;

/// One undirected link in the canonical edge set. Endpoints are stored in
/// canonical `(kind, id)` order so the same pair always hashes identically.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Edge {
    rel: &'static str,
    a_kind: EntityKind,
    a_id: String,
    b_kind: EntityKind,
    b_id: String,
}

impl Edge {
    fn canonical(rel: &'static str, x: (EntityKind, &str), y: (EntityKind, &str)) -> Self {
        let ((a_kind, a_id), (b_kind, b_id)) = if x <= y { (x, y) } else { (y, x) };
        Self {
            rel,
            a_kind,
            a_id: a_id.to_string(),
            b_kind,
            b_id: b_id.to_string(),
        }
    }

    fn touches(&self, kind: EntityKind, id: &str) -> bool {
        (self.a_kind == kind && self.a_id == id) || (self.b_kind == kind && self.b_id == id)
    }

    pub fn rel_name(&self) -> &'static str {
        self.rel
    }

    pub fn a(&self) -> (EntityKind, &str) {
        (self.a_kind, &self.a_id)
    }

    pub fn b(&self) -> (EntityKind, &str) {
        (self.b_kind, &self.b_id)
    }
}

/// Key of one adjacency view: (owner kind, owner id, field name).
type AdjKey = (EntityKind, String, &'static str);

#[derive(Default)]
struct LinkIndex {
    edges: HashSet<Edge>,
    /// Derived views: deduplicated target ids in insertion order.
    views: HashMap<AdjKey, Vec<String>>,
}

/// In-memory store for every record kind and the links between them.
///
/// Owns all state; created by the application and passed into the relation
/// subsystem rather than living as an ambient global.
pub struct EntityStore {
    records: HashMap<EntityKind, HashMap<String, Entity>>,
    links: LinkIndex,
}

impl EntityStore {
    /// Create an empty store with a collection per kind.
    pub fn new() -> Self {
        let mut records = HashMap::new();
        for kind in EntityKind::ALL {
            records.insert(kind, HashMap::new());
        }
        Self {
            records,
            links: LinkIndex::default(),
        }
    }

    /// Insert a new record. Adjacency starts empty.
    pub fn insert(&mut self, entity: Entity) -> DeskResult<()> {
        let kind = entity.kind();
        let id = entity.id().to_string();
        let bucket = self.records.get_mut(&kind).expect("all kinds seeded");
        if bucket.contains_key(&id) {
            return Err(DeskError::validation(format!(
                "duplicate {kind} id: {id}"
            )));
        }
        bucket.insert(id, entity);
        Ok(())
    }

    /// Fetch a record.
    pub fn get(&self, kind: EntityKind, id: &str) -> DeskResult<&Entity> {
        self.records
            .get(&kind)
            .and_then(|m| m.get(id))
            .ok_or_else(|| DeskError::not_found(kind, id))
    }

    /// Fetch a record mutably (CRUD updates; adjacency is not on records,
    /// so field edits cannot desynchronize the graph).
    pub fn get_mut(&mut self, kind: EntityKind, id: &str) -> DeskResult<&mut Entity> {
        self.records
            .get_mut(&kind)
            .and_then(|m| m.get_mut(id))
            .ok_or_else(|| DeskError::not_found(kind, id))
    }

    pub fn exists(&self, kind: EntityKind, id: &str) -> bool {
        self.records
            .get(&kind)
            .is_some_and(|m| m.contains_key(id))
    }

    /// All records of one kind, in no particular order.
    pub fn all_of_kind(&self, kind: EntityKind) -> Vec<&Entity> {
        self.records
            .get(&kind)
            .map(|m| m.values().collect())
            .unwrap_or_default()
    }

    pub fn count_of_kind(&self, kind: EntityKind) -> usize {
        self.records.get(&kind).map_or(0, HashMap::len)
    }

    /// Physically remove a record. Refuses while links still reference it;
    /// callers cascade first (see [`crate::relations::ops::delete_entity`]).
    pub fn remove(&mut self, kind: EntityKind, id: &str) -> DeskResult<Entity> {
        if !self.exists(kind, id) {
            return Err(DeskError::not_found(kind, id));
        }
        if self.links.edges.iter().any(|e| e.touches(kind, id)) {
            return Err(DeskError::validation(format!(
                "{kind} {id} still has links; cascade before removing"
            )));
        }
        Ok(self
            .records
            .get_mut(&kind)
            .and_then(|m| m.remove(id))
            .expect("checked above"))
    }

    /// Ids adjacent to `(kind, id)` through one relation: deduplicated,
    /// stable insertion order. Empty for never-linked records.
    pub fn adjacent_ids(&self, kind: EntityKind, id: &str, rel: OrientedRelation) -> &[String] {
        debug_assert_eq!(rel.source(), kind);
        self.links
            .views
            .get(&(kind, id.to_string(), rel.source_field()))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether a specific pair is linked through `rel`.
    pub fn is_linked(&self, rel: OrientedRelation, source_id: &str, target_id: &str) -> bool {
        let edge = Edge::canonical(
            rel.def.name,
            (rel.source(), source_id),
            (rel.target(), target_id),
        );
        self.links.edges.contains(&edge)
    }

    /// Replace one adjacency view wholesale. The new set is deduplicated
    /// and applied as edge removals plus insertions against the canonical
    /// set, so the reciprocal views on the far side stay consistent. Never
    /// partially visible: this is a bounded in-memory rewrite.
    pub fn set_adjacency(
        &mut self,
        kind: EntityKind,
        id: &str,
        rel: OrientedRelation,
        new_ids: &[String],
    ) -> DeskResult<()> {
        if rel.source() != kind {
            return Err(DeskError::validation(format!(
                "relation {} is not declared on {kind}",
                rel.def.name
            )));
        }
        let current: Vec<String> = self.adjacent_ids(kind, id, rel).to_vec();
        for old in &current {
            self.remove_link(rel, id, old);
        }
        let mut seen = HashSet::new();
        for new in new_ids {
            if seen.insert(new.as_str()) {
                self.insert_link(rel, id, new);
            }
        }
        Ok(())
    }

    /// Add one reciprocal link. Returns false if it already existed (or
    /// would be a structural self-loop). Both derived views are written on
    /// the same path as the canonical insert.
    pub(crate) fn insert_link(
        &mut self,
        rel: OrientedRelation,
        source_id: &str,
        target_id: &str,
    ) -> bool {
        if rel.source() == rel.target() && source_id == target_id {
            return false;
        }
        let edge = Edge::canonical(
            rel.def.name,
            (rel.source(), source_id),
            (rel.target(), target_id),
        );
        if !self.links.edges.insert(edge) {
            return false;
        }
        self.links
            .views
            .entry((rel.source(), source_id.to_string(), rel.source_field()))
            .or_default()
            .push(target_id.to_string());
        self.links
            .views
            .entry((rel.target(), target_id.to_string(), rel.target_field()))
            .or_default()
            .push(source_id.to_string());
        true
    }

    /// Remove one reciprocal link. Returns false if it was not present.
    pub(crate) fn remove_link(
        &mut self,
        rel: OrientedRelation,
        source_id: &str,
        target_id: &str,
    ) -> bool {
        let edge = Edge::canonical(
            rel.def.name,
            (rel.source(), source_id),
            (rel.target(), target_id),
        );
        if !self.links.edges.remove(&edge) {
            return false;
        }
        if let Some(ids) = self.links.views.get_mut(&(
            rel.source(),
            source_id.to_string(),
            rel.source_field(),
        )) {
            ids.retain(|x| x != target_id);
        }
        if let Some(ids) = self.links.views.get_mut(&(
            rel.target(),
            target_id.to_string(),
            rel.target_field(),
        )) {
            ids.retain(|x| x != source_id);
        }
        true
    }

    /// Every record, for snapshots: kinds in display order, ids sorted.
    pub fn entities(&self) -> Vec<&Entity> {
        let mut out = Vec::new();
        for kind in EntityKind::ALL {
            let mut of_kind = self.all_of_kind(kind);
            of_kind.sort_by(|x, y| x.id().cmp(y.id()));
            out.extend(of_kind);
        }
        out
    }

    /// Every canonical edge, for snapshots.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.links.edges.iter()
    }
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Dealership, Ticket};
    use crate::relations::schema::RelationSchema;

    fn seeded() -> (EntityStore, RelationSchema, String, String) {
        let mut store = EntityStore::new();
        let schema = RelationSchema::standard();
        let t = Ticket::new("CRM import broken");
        let d = Dealership::new("Apex Motors");
        let (tid, did) = (t.id.clone(), d.id.clone());
        store.insert(Entity::Ticket(t)).unwrap();
        store.insert(Entity::Dealership(d)).unwrap();
        (store, schema, tid, did)
    }

    #[test]
    fn test_insert_get_exists_remove() {
        let (mut store, _, tid, _) = seeded();
        assert!(store.exists(EntityKind::Ticket, &tid));
        assert_eq!(store.get(EntityKind::Ticket, &tid).unwrap().id(), tid);
        assert!(store.get(EntityKind::Ticket, "nope").is_err());
        store.remove(EntityKind::Ticket, &tid).unwrap();
        assert!(!store.exists(EntityKind::Ticket, &tid));
        assert!(matches!(
            store.remove(EntityKind::Ticket, &tid),
            Err(DeskError::NotFound { .. })
        ));
    }

    #[test]
    fn test_duplicate_insert_rejected() {
        let (mut store, _, tid, _) = seeded();
        let mut dup = Ticket::new("dup");
        dup.id = tid;
        assert!(matches!(
            store.insert(Entity::Ticket(dup)),
            Err(DeskError::Validation(_))
        ));
    }

    #[test]
    fn test_links_are_reciprocal_by_construction() {
        let (mut store, schema, tid, did) = seeded();
        let rel = schema
            .relation_between(EntityKind::Ticket, EntityKind::Dealership)
            .unwrap();
        assert!(store.insert_link(rel, &tid, &did));
        assert_eq!(store.adjacent_ids(EntityKind::Ticket, &tid, rel), [did.clone()]);
        assert_eq!(
            store.adjacent_ids(EntityKind::Dealership, &did, rel.flipped()),
            [tid.clone()]
        );
        // Re-insert is a no-op, no duplicate view entries.
        assert!(!store.insert_link(rel, &tid, &did));
        assert_eq!(store.adjacent_ids(EntityKind::Ticket, &tid, rel).len(), 1);
        // Removal clears both sides.
        assert!(store.remove_link(rel, &tid, &did));
        assert!(store.adjacent_ids(EntityKind::Ticket, &tid, rel).is_empty());
        assert!(store
            .adjacent_ids(EntityKind::Dealership, &did, rel.flipped())
            .is_empty());
        assert!(!store.remove_link(rel, &tid, &did));
    }

    #[test]
    fn test_remove_refuses_while_linked() {
        let (mut store, schema, tid, did) = seeded();
        let rel = schema
            .relation_between(EntityKind::Ticket, EntityKind::Dealership)
            .unwrap();
        store.insert_link(rel, &tid, &did);
        assert!(matches!(
            store.remove(EntityKind::Dealership, &did),
            Err(DeskError::Validation(_))
        ));
        store.remove_link(rel, &tid, &did);
        store.remove(EntityKind::Dealership, &did).unwrap();
    }

    #[test]
    fn test_set_adjacency_replaces_and_dedupes() {
        let (mut store, schema, tid, did) = seeded();
        let d2 = Dealership::new("Birchwood Auto");
        let did2 = d2.id.clone();
        store.insert(Entity::Dealership(d2)).unwrap();
        let rel = schema
            .relation_between(EntityKind::Ticket, EntityKind::Dealership)
            .unwrap();

        store.insert_link(rel, &tid, &did);
        store
            .set_adjacency(
                EntityKind::Ticket,
                &tid,
                rel,
                &[did2.clone(), did2.clone()],
            )
            .unwrap();
        assert_eq!(store.adjacent_ids(EntityKind::Ticket, &tid, rel), [did2.clone()]);
        // The replaced dealership lost its reciprocal entry.
        assert!(store
            .adjacent_ids(EntityKind::Dealership, &did, rel.flipped())
            .is_empty());
        assert_eq!(
            store.adjacent_ids(EntityKind::Dealership, &did2, rel.flipped()),
            [tid.clone()]
        );
    }

    #[test]
    fn test_structural_self_loop_rejected() {
        let (mut store, schema, tid, _) = seeded();
        let rel = schema
            .relation_between(EntityKind::Ticket, EntityKind::Ticket)
            .unwrap();
        assert!(!store.insert_link(rel, &tid, &tid));
        assert!(store.adjacent_ids(EntityKind::Ticket, &tid, rel).is_empty());
    }
}
