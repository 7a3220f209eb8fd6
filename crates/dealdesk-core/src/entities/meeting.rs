//! Meeting domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{EntityKind, Record};

/// A scheduled or held meeting.
///
/// Recency comes from `scheduled_for`, not the update timestamp, so the
/// candidate picker surfaces upcoming meetings first; unscheduled meetings
/// sort last.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meeting {
    pub id: String,
    pub title: String,
    pub agenda: Option<String>,
    pub status: MeetingStatus,
    pub scheduled_for: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Meeting {
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            agenda: None,
            status: MeetingStatus::Scheduled,
            scheduled_for: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn set_status(&mut self, status: MeetingStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }
}

/// Meeting status. `Cancelled` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeetingStatus {
    Scheduled,
    Held,
    Cancelled,
}

impl MeetingStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "scheduled" => Some(Self::Scheduled),
            "held" => Some(Self::Held),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Held => "held",
            Self::Cancelled => "cancelled",
        }
    }
}

impl Record for Meeting {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Meeting
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn status_label(&self) -> &str {
        self.status.as_str()
    }

    fn is_terminal(&self) -> bool {
        self.status == MeetingStatus::Cancelled
    }

    fn recency(&self) -> Option<DateTime<Utc>> {
        self.scheduled_for
    }
}
