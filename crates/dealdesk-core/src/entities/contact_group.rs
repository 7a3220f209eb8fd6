//! Contact group domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{EntityKind, Record};

/// A named group of contacts (e.g. a mailing list for announcements).
/// Membership is a relation, not a field on the group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactGroup {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ContactGroup {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            description: None,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Record for ContactGroup {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> EntityKind {
        EntityKind::ContactGroup
    }

    fn title(&self) -> &str {
        &self.name
    }

    fn status_label(&self) -> &str {
        "-"
    }

    fn is_terminal(&self) -> bool {
        false
    }

    fn recency(&self) -> Option<DateTime<Utc>> {
        Some(self.updated_at)
    }
}
