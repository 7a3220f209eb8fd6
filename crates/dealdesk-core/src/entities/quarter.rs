//! Quarterly plan domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{EntityKind, Record};

/// A quarterly planning bucket, e.g. "2026-Q3".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quarter {
    pub id: String,
    pub label: String,
    pub theme: Option<String>,
    pub status: QuarterStatus,
    pub starts_on: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Quarter {
    pub fn new(label: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            label: label.into(),
            theme: None,
            status: QuarterStatus::Planning,
            starts_on: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn set_status(&mut self, status: QuarterStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }
}

/// Quarter status. `Closed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuarterStatus {
    Planning,
    Active,
    Closed,
}

impl QuarterStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "planning" => Some(Self::Planning),
            "active" => Some(Self::Active),
            "closed" => Some(Self::Closed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Planning => "planning",
            Self::Active => "active",
            Self::Closed => "closed",
        }
    }
}

impl Record for Quarter {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Quarter
    }

    fn title(&self) -> &str {
        &self.label
    }

    fn status_label(&self) -> &str {
        self.status.as_str()
    }

    fn is_terminal(&self) -> bool {
        self.status == QuarterStatus::Closed
    }

    fn recency(&self) -> Option<DateTime<Utc>> {
        self.starts_on
    }
}
