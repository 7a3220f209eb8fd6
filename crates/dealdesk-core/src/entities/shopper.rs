//! Shopper domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{EntityKind, Record};

/// An end customer shopping at one or more dealerships.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shopper {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Shopper {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            email: None,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Record for Shopper {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Shopper
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
