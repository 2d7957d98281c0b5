//! Tag, timeslot, and notification catalog entries

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// A named tag assignable to participants and tag cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// The unique identifier of the tag.
    pub id: Uuid,
    /// Display name.
    pub name: String,
}

impl Tag {
    /// Creates a new tag.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}

/// A bookable sitting timeslot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeslot {
    /// The unique identifier of the timeslot.
    pub id: Uuid,
    /// The start instant, the sort key for date cells.
    pub start: DateTime<Utc>,
    /// The end instant, if bounded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Utc>>,
}

impl Timeslot {
    /// Creates a new timeslot starting at the given instant.
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            end: None,
        }
    }
}

/// A notification template participants can be subscribed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// The unique identifier of the notification.
    pub id: Uuid,
    /// Display name.
    pub name: String,
}

impl Notification {
    /// Creates a new notification.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}
