//! Relation Schema Registry.
//!
//! A static table of every legal edge kind between two record kinds. Built
//! once at startup, read-only afterwards. Group membership is declared here
//! like any other relation so link/unlink/cascade share one code path, and
//! ticket-to-ticket links are a self-referential row with a single shared
//! field. Requesting an undeclared pair is a programming error surfaced as
//! [`DeskError::UnknownRelation`].

use std::collections::HashMap;

use crate::entities::EntityKind;
use crate::error::{DeskError, DeskResult};

use EntityKind::*;

/// One legal edge kind between two record kinds.
///
/// `a_field` names the adjacency view holding ids of kind `b` as seen from
/// an `a` record, and vice versa. For self-referential rows (`a == b`) both
/// fields are the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationDef {
    pub name: &'static str,
    pub a: EntityKind,
    pub a_field: &'static str,
    pub b: EntityKind,
    pub b_field: &'static str,
    /// Directed group membership (group side is `a`). Kept reciprocal
    /// exactly like symmetric relations; the flag only informs display.
    pub membership: bool,
}

/// Every legal edge kind, one row per unordered kind pair.
const RELATION_TABLE: &[RelationDef] = &[
    rel("ticket_dealership", Ticket, "dealership_ids", Dealership, "ticket_ids"),
    rel("ticket_project", Ticket, "project_ids", Project, "ticket_ids"),
    rel("ticket_task", Ticket, "task_ids", Task, "ticket_ids"),
    rel("ticket_meeting", Ticket, "meeting_ids", Meeting, "ticket_ids"),
    rel("ticket_feature", Ticket, "feature_ids", Feature, "ticket_ids"),
    rel("ticket_contact", Ticket, "contact_ids", Contact, "ticket_ids"),
    rel("ticket_shopper", Ticket, "shopper_ids", Shopper, "ticket_ids"),
    rel("ticket_release", Ticket, "release_ids", Release, "ticket_ids"),
    rel("ticket_article", Ticket, "article_ids", KnowledgeArticle, "ticket_ids"),
    rel("ticket_ticket", Ticket, "linked_ticket_ids", Ticket, "linked_ticket_ids"),
    rel("project_dealership", Project, "dealership_ids", Dealership, "project_ids"),
    rel("project_task", Project, "task_ids", Task, "project_ids"),
    rel("project_meeting", Project, "meeting_ids", Meeting, "project_ids"),
    rel("project_feature", Project, "feature_ids", Feature, "project_ids"),
    rel("project_quarter", Project, "quarter_ids", Quarter, "project_ids"),
    rel("project_release", Project, "release_ids", Release, "project_ids"),
    rel("task_meeting", Task, "meeting_ids", Meeting, "task_ids"),
    rel("task_dealership", Task, "dealership_ids", Dealership, "task_ids"),
    rel("meeting_dealership", Meeting, "dealership_ids", Dealership, "meeting_ids"),
    rel("meeting_contact", Meeting, "contact_ids", Contact, "meeting_ids"),
    rel("meeting_feature", Meeting, "feature_ids", Feature, "meeting_ids"),
    rel("dealership_feature", Dealership, "feature_ids", Feature, "dealership_ids"),
    rel("dealership_contact", Dealership, "contact_ids", Contact, "dealership_ids"),
    rel("dealership_shopper", Dealership, "shopper_ids", Shopper, "dealership_ids"),
    rel("dealership_article", Dealership, "article_ids", KnowledgeArticle, "dealership_ids"),
    member("dealership_group_members", DealershipGroup, "member_ids", Dealership, "group_ids"),
    member("contact_group_members", ContactGroup, "member_ids", Contact, "group_ids"),
    rel("feature_release", Feature, "release_ids", Release, "feature_ids"),
    rel("feature_article", Feature, "article_ids", KnowledgeArticle, "feature_ids"),
    rel("release_quarter", Release, "quarter_ids", Quarter, "release_ids"),
];

const fn rel(
    name: &'static str,
    a: EntityKind,
    a_field: &'static str,
    b: EntityKind,
    b_field: &'static str,
) -> RelationDef {
    RelationDef {
        name,
        a,
        a_field,
        b,
        b_field,
        membership: false,
    }
}

const fn member(
    name: &'static str,
    a: EntityKind,
    a_field: &'static str,
    b: EntityKind,
    b_field: &'static str,
) -> RelationDef {
    RelationDef {
        name,
        a,
        a_field,
        b,
        b_field,
        membership: true,
    }
}

/// A relation viewed from one of its two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrientedRelation {
    pub def: &'static RelationDef,
    /// True when the source side is `def.a`.
    forward: bool,
}

impl OrientedRelation {
    pub fn source(&self) -> EntityKind {
        if self.forward {
            self.def.a
        } else {
            self.def.b
        }
    }

    pub fn target(&self) -> EntityKind {
        if self.forward {
            self.def.b
        } else {
            self.def.a
        }
    }

    /// Adjacency field on the source record (holds target-kind ids).
    pub fn source_field(&self) -> &'static str {
        if self.forward {
            self.def.a_field
        } else {
            self.def.b_field
        }
    }

    /// Adjacency field on the target record.
    pub fn target_field(&self) -> &'static str {
        if self.forward {
            self.def.b_field
        } else {
            self.def.a_field
        }
    }

    /// The same relation seen from the other side.
    pub fn flipped(&self) -> Self {
        Self {
            def: self.def,
            forward: !self.forward,
        }
    }
}

/// The registry: symmetric pair lookup plus a per-kind index for cascade
/// sweeps.
pub struct RelationSchema {
    by_pair: HashMap<(EntityKind, EntityKind), OrientedRelation>,
    by_kind: HashMap<EntityKind, Vec<OrientedRelation>>,
    by_name: HashMap<&'static str, &'static RelationDef>,
}

impl RelationSchema {
    /// Build the standard registry from the static table.
    pub fn standard() -> Self {
        let mut by_pair = HashMap::new();
        let mut by_kind: HashMap<EntityKind, Vec<OrientedRelation>> = HashMap::new();
        let mut by_name = HashMap::new();

        for def in RELATION_TABLE {
            let forward = OrientedRelation { def, forward: true };
            by_pair.insert((def.a, def.b), forward);
            by_kind.entry(def.a).or_default().push(forward);
            if def.a != def.b {
                by_pair.insert((def.b, def.a), forward.flipped());
                by_kind.entry(def.b).or_default().push(forward.flipped());
            }
            by_name.insert(def.name, def);
        }

        Self {
            by_pair,
            by_kind,
            by_name,
        }
    }

    /// Look up the relation between two kinds, oriented so `source() == a`.
    /// Symmetric: `(A, B)` and `(B, A)` return the same relation with the
    /// fields swapped.
    pub fn relation_between(&self, a: EntityKind, b: EntityKind) -> DeskResult<OrientedRelation> {
        self.by_pair
            .get(&(a, b))
            .copied()
            .ok_or(DeskError::UnknownRelation { a, b })
    }

    /// Every relation touching `kind`, oriented with `kind` as the source.
    /// Self-referential relations appear once.
    pub fn relations_of(&self, kind: EntityKind) -> &[OrientedRelation] {
        self.by_kind.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Look up a relation by its table name (snapshot validation).
    pub fn by_name(&self, name: &str) -> Option<&'static RelationDef> {
        self.by_name.get(name).copied()
    }
}
