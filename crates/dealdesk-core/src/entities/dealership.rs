//! Dealership account domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{EntityKind, Record};

/// A dealership account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dealership {
    pub id: String,
    pub name: String,
    pub city: Option<String>,
    pub account_rep: Option<String>,
    pub status: DealershipStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Dealership {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            city: None,
            account_rep: None,
            status: DealershipStatus::Onboarding,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn set_status(&mut self, status: DealershipStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }
}

/// Account status. `Cancelled` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DealershipStatus {
    Onboarding,
    Active,
    Cancelled,
}

impl DealershipStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "onboarding" => Some(Self::Onboarding),
            "active" => Some(Self::Active),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Onboarding => "onboarding",
            Self::Active => "active",
            Self::Cancelled => "cancelled",
        }
    }
}

impl Record for Dealership {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Dealership
    }

    fn title(&self) -> &str {
        &self.name
    }

    fn status_label(&self) -> &str {
        self.status.as_str()
    }

    fn is_terminal(&self) -> bool {
        self.status == DealershipStatus::Cancelled
    }

    fn recency(&self) -> Option<DateTime<Utc>> {
        Some(self.updated_at)
    }
}
