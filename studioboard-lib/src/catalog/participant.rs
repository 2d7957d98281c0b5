//! Participant entity

use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// A participant registered under a user profile.
///
/// Participants are the photographed subjects (debutantes, escorts,
/// children) a client signs up; they carry their own contact details plus
/// tag, timeslot, and notification assignments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    /// The unique identifier of the participant.
    pub id: Uuid,

    /// First name.
    pub first: String,

    /// Last name.
    pub last: String,

    /// Middle name.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub middle: String,

    /// Preferred name.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub preferred: String,

    /// Contact email.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub email: String,

    /// Assigned tag ids.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Uuid>,

    /// Scheduled timeslot ids.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub timeslots: Vec<Uuid>,

    /// Subscribed notification ids.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notifications: Vec<Uuid>,
}

impl Participant {
    /// Creates a new participant with the given names.
    pub fn new(first: impl Into<String>, last: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            first: first.into(),
            last: last.into(),
            ..Self::default()
        }
    }
}
