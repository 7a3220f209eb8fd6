//! Whole-store JSON snapshots.
//!
//! Dealdesk is single-session: the CLI loads one snapshot at startup and
//! writes it back after each mutation. The snapshot holds every record plus
//! the canonical link list; the derived adjacency views are rebuilt on
//! load. Writes go through a temp file and rename so a crash mid-save never
//! leaves a torn state file.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::entities::{Entity, EntityKind};
use crate::error::{DeskError, DeskResult};
use crate::relations::schema::RelationSchema;
use crate::store::EntityStore;

pub const SNAPSHOT_VERSION: u32 = 1;

/// Serialized form of the store.
#[derive(Debug, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub entities: Vec<Entity>,
    pub links: Vec<LinkRecord>,
}

/// One canonical edge, by relation name and endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkRecord {
    pub relation: String,
    pub a_kind: EntityKind,
    pub a_id: String,
    pub b_kind: EntityKind,
    pub b_id: String,
}

impl Snapshot {
    /// Capture the current store. Deterministic: records sorted per kind,
    /// links sorted by relation and endpoints.
    pub fn capture(store: &EntityStore) -> Self {
        let entities = store.entities().into_iter().cloned().collect();
        let mut links: Vec<LinkRecord> = store
            .edges()
            .map(|edge| {
                let (a_kind, a_id) = edge.a();
                let (b_kind, b_id) = edge.b();
                LinkRecord {
                    relation: edge.rel_name().to_string(),
                    a_kind,
                    a_id: a_id.to_string(),
                    b_kind,
                    b_id: b_id.to_string(),
                }
            })
            .collect();
        links.sort_by(|x, y| {
            (&x.relation, &x.a_id, &x.b_id).cmp(&(&y.relation, &y.a_id, &y.b_id))
        });
        Self {
            version: SNAPSHOT_VERSION,
            entities,
            links,
        }
    }

    /// Rebuild a store. Links naming an unknown relation or an endpoint
    /// that no longer resolves are dropped with a warning; one bad edge
    /// must not take the whole dataset down.
    pub fn restore(self, schema: &RelationSchema) -> DeskResult<EntityStore> {
        let mut store = EntityStore::new();
        for entity in self.entities {
            store.insert(entity)?;
        }
        for l in self.links {
            if schema.by_name(&l.relation).is_none() {
                warn!(relation = %l.relation, "snapshot names an undeclared relation; dropping link");
                continue;
            }
            let rel = match schema.relation_between(l.a_kind, l.b_kind) {
                Ok(rel) => rel,
                Err(_) => {
                    warn!(relation = %l.relation, "snapshot link pair no longer declared; dropping");
                    continue;
                }
            };
            if !store.exists(l.a_kind, &l.a_id) || !store.exists(l.b_kind, &l.b_id) {
                warn!(
                    relation = %l.relation,
                    a_id = %l.a_id,
                    b_id = %l.b_id,
                    "snapshot link endpoint missing; dropping"
                );
                continue;
            }
            store.insert_link(rel, &l.a_id, &l.b_id);
        }
        Ok(store)
    }
}

/// Write the store to `path` atomically.
pub fn save(store: &EntityStore, path: &Path) -> DeskResult<()> {
    let snapshot = Snapshot::capture(store);
    let json = serde_json::to_string_pretty(&snapshot)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Load a store from `path`.
pub fn load(path: &Path, schema: &RelationSchema) -> DeskResult<EntityStore> {
    let json = fs::read_to_string(path)?;
    let snapshot: Snapshot = serde_json::from_str(&json)?;
    if snapshot.version != SNAPSHOT_VERSION {
        return Err(DeskError::validation(format!(
            "unsupported snapshot version {}",
            snapshot.version
        )));
    }
    snapshot.restore(schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Dealership, Ticket};
    use crate::relations::{link, linked_targets};

    #[test]
    fn test_snapshot_roundtrip() {
        let schema = RelationSchema::standard();
        let mut store = EntityStore::new();
        let t = Ticket::new("Feed down");
        let d = Dealership::new("Apex Motors");
        let (tid, did) = (t.id.clone(), d.id.clone());
        store.insert(Entity::Ticket(t)).unwrap();
        store.insert(Entity::Dealership(d)).unwrap();
        link(&mut store, &schema, EntityKind::Ticket, &tid, EntityKind::Dealership, &did).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        save(&store, &path).unwrap();

        let restored = load(&path, &schema).unwrap();
        assert!(restored.exists(EntityKind::Ticket, &tid));
        assert!(restored.exists(EntityKind::Dealership, &did));
        let linked =
            linked_targets(&restored, &schema, EntityKind::Dealership, &did, EntityKind::Ticket)
                .unwrap();
        assert_eq!(linked.len(), 1);
        assert_eq!(linked[0].id(), tid);
    }

    #[test]
    fn test_restore_drops_links_with_missing_endpoints() {
        let schema = RelationSchema::standard();
        let t = Ticket::new("Feed down");
        let tid = t.id.clone();
        let snapshot = Snapshot {
            version: SNAPSHOT_VERSION,
            entities: vec![Entity::Ticket(t)],
            links: vec![LinkRecord {
                relation: "ticket_dealership".to_string(),
                a_kind: EntityKind::Ticket,
                a_id: tid.clone(),
                b_kind: EntityKind::Dealership,
                b_id: "gone".to_string(),
            }],
        };

        let store = snapshot.restore(&schema).unwrap();
        assert!(
            linked_targets(&store, &schema, EntityKind::Ticket, &tid, EntityKind::Dealership)
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn test_restore_drops_unknown_relation_names() {
        let schema = RelationSchema::standard();
        let snapshot = Snapshot {
            version: SNAPSHOT_VERSION,
            entities: vec![],
            links: vec![LinkRecord {
                relation: "ticket_widget".to_string(),
                a_kind: EntityKind::Ticket,
                a_id: "x".to_string(),
                b_kind: EntityKind::Dealership,
                b_id: "y".to_string(),
            }],
        };
        let store = snapshot.restore(&schema).unwrap();
        assert_eq!(store.edges().count(), 0);
    }

    #[test]
    fn test_load_rejects_future_versions() {
        let schema = RelationSchema::standard();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(
            &path,
            r#"{"version": 99, "entities": [], "links": []}"#,
        )
        .unwrap();
        assert!(matches!(
            load(&path, &schema),
            Err(DeskError::Validation(_))
        ));
    }
}
