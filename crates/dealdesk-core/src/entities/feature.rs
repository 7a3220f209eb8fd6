//! Feature announcement domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{EntityKind, Record};

/// A product feature, from proposal through launch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feature {
    pub id: String,
    pub name: String,
    pub summary: Option<String>,
    pub status: FeatureStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Feature {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            summary: None,
            status: FeatureStatus::Proposed,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn set_status(&mut self, status: FeatureStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }
}

/// Feature status. `Launched` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureStatus {
    Proposed,
    InDevelopment,
    Beta,
    Launched,
}

impl FeatureStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "proposed" => Some(Self::Proposed),
            "in_development" => Some(Self::InDevelopment),
            "beta" => Some(Self::Beta),
            "launched" => Some(Self::Launched),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Proposed => "proposed",
            Self::InDevelopment => "in_development",
            Self::Beta => "beta",
            Self::Launched => "launched",
        }
    }
}

impl Record for Feature {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Feature
    }

    fn title(&self) -> &str {
        &self.name
    }

    fn status_label(&self) -> &str {
        self.status.as_str()
    }

    fn is_terminal(&self) -> bool {
        self.status == FeatureStatus::Launched
    }

    fn recency(&self) -> Option<DateTime<Utc>> {
        Some(self.updated_at)
    }
}
