//! Domain record kinds tracked by Dealdesk.
//!
//! One module per kind. The relation graph never looks inside a record
//! beyond what the [`Record`] trait exposes: id, kind tag, terminal-status
//! flag and a recency timestamp for candidate ordering.

pub mod contact;
pub mod contact_group;
pub mod dealership;
pub mod dealership_group;
pub mod feature;
pub mod knowledge;
pub mod meeting;
pub mod project;
pub mod quarter;
pub mod release;
pub mod shopper;
pub mod task;
pub mod ticket;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use contact::Contact;
pub use contact_group::ContactGroup;
pub use dealership::{Dealership, DealershipStatus};
pub use dealership_group::DealershipGroup;
pub use feature::{Feature, FeatureStatus};
pub use knowledge::KnowledgeArticle;
pub use meeting::{Meeting, MeetingStatus};
pub use project::{Project, ProjectStatus};
pub use quarter::{Quarter, QuarterStatus};
pub use release::{Release, ReleaseStatus};
pub use shopper::Shopper;
pub use task::{Task, TaskStatus};
pub use ticket::{Ticket, TicketStatus};

/// Tag identifying one of the record kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Ticket,
    Project,
    Task,
    Meeting,
    Dealership,
    Feature,
    Contact,
    ContactGroup,
    DealershipGroup,
    Shopper,
    Release,
    Quarter,
    KnowledgeArticle,
}

impl EntityKind {
    /// Every kind, in display order.
    pub const ALL: [EntityKind; 13] = [
        Self::Ticket,
        Self::Project,
        Self::Task,
        Self::Meeting,
        Self::Dealership,
        Self::Feature,
        Self::Contact,
        Self::ContactGroup,
        Self::DealershipGroup,
        Self::Shopper,
        Self::Release,
        Self::Quarter,
        Self::KnowledgeArticle,
    ];

    /// Convert to string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ticket => "ticket",
            Self::Project => "project",
            Self::Task => "task",
            Self::Meeting => "meeting",
            Self::Dealership => "dealership",
            Self::Feature => "feature",
            Self::Contact => "contact",
            Self::ContactGroup => "contact_group",
            Self::DealershipGroup => "dealership_group",
            Self::Shopper => "shopper",
            Self::Release => "release",
            Self::Quarter => "quarter",
            Self::KnowledgeArticle => "knowledge_article",
        }
    }

    /// Parse from string.
    pub fn parse(s: &str) -> Option<Self> {
        EntityKind::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s.to_lowercase())
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The capability the relation graph needs from every record kind.
///
/// `is_terminal` is the per-kind "closed" check consumed by the unlink
/// policy gate and the candidate query engine; each entity module defines
/// what terminal means for its kind (a completed ticket, a launched
/// feature, a cancelled dealership, ...).
pub trait Record {
    fn id(&self) -> &str;
    fn kind(&self) -> EntityKind;
    fn title(&self) -> &str;
    /// Short status label for table output.
    fn status_label(&self) -> &str;
    /// Whether the record is in a closed state that freezes its links.
    fn is_terminal(&self) -> bool;
    /// Timestamp driving "most recent first" candidate ordering.
    /// `None` means undated; undated records sort last.
    fn recency(&self) -> Option<DateTime<Utc>>;
}

/// A record of any kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Entity {
    Ticket(Ticket),
    Project(Project),
    Task(Task),
    Meeting(Meeting),
    Dealership(Dealership),
    Feature(Feature),
    Contact(Contact),
    ContactGroup(ContactGroup),
    DealershipGroup(DealershipGroup),
    Shopper(Shopper),
    Release(Release),
    Quarter(Quarter),
    KnowledgeArticle(KnowledgeArticle),
}

impl Entity {
    fn as_record(&self) -> &dyn Record {
        match self {
            Self::Ticket(r) => r,
            Self::Project(r) => r,
            Self::Task(r) => r,
            Self::Meeting(r) => r,
            Self::Dealership(r) => r,
            Self::Feature(r) => r,
            Self::Contact(r) => r,
            Self::ContactGroup(r) => r,
            Self::DealershipGroup(r) => r,
            Self::Shopper(r) => r,
            Self::Release(r) => r,
            Self::Quarter(r) => r,
            Self::KnowledgeArticle(r) => r,
        }
    }

    pub fn id(&self) -> &str {
        self.as_record().id()
    }

    pub fn kind(&self) -> EntityKind {
        self.as_record().kind()
    }

    pub fn title(&self) -> &str {
        self.as_record().title()
    }

    pub fn status_label(&self) -> &str {
        self.as_record().status_label()
    }

    pub fn is_terminal(&self) -> bool {
        self.as_record().is_terminal()
    }

    pub fn recency(&self) -> Option<DateTime<Utc>> {
        self.as_record().recency()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parse_roundtrip() {
        for kind in EntityKind::ALL {
            assert_eq!(EntityKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(EntityKind::parse("Ticket"), Some(EntityKind::Ticket));
        assert_eq!(EntityKind::parse("widget"), None);
    }

    #[test]
    fn test_entity_delegates_to_record() {
        let ticket = Ticket::new("Sync outage at Apex Motors");
        let id = ticket.id.clone();
        let entity = Entity::Ticket(ticket);
        assert_eq!(entity.id(), id);
        assert_eq!(entity.kind(), EntityKind::Ticket);
        assert!(!entity.is_terminal());
        assert!(entity.recency().is_some());
    }

    #[test]
    fn test_entity_serde_tags_by_kind() {
        let entity = Entity::Dealership(Dealership::new("Apex Motors"));
        let json = serde_json::to_string(&entity).unwrap();
        assert!(json.contains("\"kind\":\"dealership\""));
        let back: Entity = serde_json::from_str(&json).unwrap();
        assert_eq!(back.kind(), EntityKind::Dealership);
    }
}
