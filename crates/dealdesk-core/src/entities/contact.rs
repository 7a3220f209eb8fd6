//! Contact domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{EntityKind, Record};

/// A person at a dealership (or partner) we talk to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Contact {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            email: None,
            phone: None,
            role: None,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Record for Contact {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Contact
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
