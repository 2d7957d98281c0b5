//! Read-only entity catalogs
//!
//! Sorting, link resolution, and synchronization all take a [`Catalogs`]
//! reference instead of reaching into ambient state; the surrounding
//! application fetches and refreshes it through the store.

mod participant;
mod schedule;
mod user;

pub use participant::*;
pub use schedule::*;
pub use user::*;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// The read-only entity context threaded through engine calls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalogs {
    /// Registered user profiles.
    pub users: Vec<UserProfile>,

    /// Profiles created server-side that have not completed registration.
    pub temp_users: Vec<UserProfile>,

    /// Known tags.
    pub tags: Vec<Tag>,

    /// Known timeslots.
    pub timeslots: Vec<Timeslot>,

    /// Known notifications.
    pub notifications: Vec<Notification>,
}

impl Catalogs {
    /// Creates an empty catalog set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Finds a registered user by email (case-insensitive).
    pub fn user_by_email(&self, email: &str) -> Option<&UserProfile> {
        self.users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
    }

    /// Finds a temp user by email (case-insensitive).
    pub fn temp_user_by_email(&self, email: &str) -> Option<&UserProfile> {
        self.temp_users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
    }

    /// Finds a user or temp user by email, registered users first.
    pub fn any_user_by_email(&self, email: &str) -> Option<&UserProfile> {
        self.user_by_email(email)
            .or_else(|| self.temp_user_by_email(email))
    }

    /// Iterates the flattened participant list across users and temp users.
    pub fn participants(&self) -> impl Iterator<Item = &Participant> {
        self.users
            .iter()
            .chain(self.temp_users.iter())
            .flat_map(|u| u.participants.iter())
    }

    /// Finds a participant by id over the flattened list.
    pub fn participant_by_id(&self, id: Uuid) -> Option<&Participant> {
        self.participants().find(|p| p.id == id)
    }

    /// Resolves a tag id to its display name.
    pub fn tag_name(&self, id: Uuid) -> Option<&str> {
        self.tags
            .iter()
            .find(|t| t.id == id)
            .map(|t| t.name.as_str())
    }

    /// Resolves a timeslot id to its start instant.
    pub fn timeslot_start(&self, id: Uuid) -> Option<DateTime<Utc>> {
        self.timeslots.iter().find(|t| t.id == id).map(|t| t.start)
    }

    /// Replaces a user profile in place (registered or temp list), matching
    /// by id. Returns `true` if a profile was replaced.
    pub fn replace_user(&mut self, user: UserProfile) -> bool {
        for slot in self.users.iter_mut().chain(self.temp_users.iter_mut()) {
            if slot.id == user.id {
                *slot = user;
                return true;
            }
        }
        false
    }

    /// Replaces a participant in place under whichever profile owns it.
    /// Returns `true` if a participant was replaced.
    pub fn replace_participant(&mut self, participant: Participant) -> bool {
        for user in self.users.iter_mut().chain(self.temp_users.iter_mut()) {
            for slot in &mut user.participants {
                if slot.id == participant.id {
                    *slot = participant;
                    return true;
                }
            }
        }
        false
    }
}
