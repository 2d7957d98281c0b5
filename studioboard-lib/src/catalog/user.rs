//! User profile entity

use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use super::Participant;

/// A client user profile, keyed by email.
///
/// Temp users share this shape; they live in a separate catalog list until
/// they complete registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// The unique identifier of the profile.
    pub id: Uuid,

    /// The canonical email address, the linking key.
    pub email: String,

    /// First name.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub first: String,

    /// Last name.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub last: String,

    /// Sitting number, if assigned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sitting: Option<i64>,

    /// Participants registered under this profile.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub participants: Vec<Participant>,
}

impl UserProfile {
    /// Creates a new profile for the given email.
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            first: String::new(),
            last: String::new(),
            sitting: None,
            participants: Vec::new(),
        }
    }

    /// Returns the participant with the given id, if registered here.
    pub fn participant(&self, id: Uuid) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }
}
