//! Link anchors binding cells to domain entities

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use uuid::Uuid;

use crate::error::ParseAnchorError;

/// A semantic field of a user profile that a column can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserField {
    /// First name.
    First,
    /// Last name.
    Last,
    /// Sitting number.
    Sitting,
    /// The anchor email itself.
    Email,
}

impl UserField {
    /// Returns the canonical field name used in anchor strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::First => "first",
            Self::Last => "last",
            Self::Sitting => "sitting",
            Self::Email => "email",
        }
    }
}

impl FromStr for UserField {
    type Err = ParseAnchorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first" => Ok(Self::First),
            "last" => Ok(Self::Last),
            "sitting" => Ok(Self::Sitting),
            "email" => Ok(Self::Email),
            other => Err(ParseAnchorError::UnknownField {
                field: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for UserField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A semantic field of a participant that a column can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParticipantField {
    /// First name.
    First,
    /// Last name.
    Last,
    /// Middle name.
    Middle,
    /// Preferred name.
    Preferred,
    /// Contact email.
    Email,
    /// Assigned tag ids.
    Tags,
    /// Scheduled timeslot ids.
    Timeslot,
    /// Subscribed notification ids.
    Notifications,
}

impl ParticipantField {
    /// Returns the canonical field name used in anchor strings.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::First => "first",
            Self::Last => "last",
            Self::Middle => "middle",
            Self::Preferred => "preferred",
            Self::Email => "email",
            Self::Tags => "tags",
            Self::Timeslot => "timeslot",
            Self::Notifications => "notifications",
        }
    }
}

impl FromStr for ParticipantField {
    type Err = ParseAnchorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first" => Ok(Self::First),
            "last" => Ok(Self::Last),
            "middle" => Ok(Self::Middle),
            "preferred" => Ok(Self::Preferred),
            "email" => Ok(Self::Email),
            "tags" => Ok(Self::Tags),
            "timeslot" => Ok(Self::Timeslot),
            "notifications" => Ok(Self::Notifications),
            other => Err(ParseAnchorError::UnknownField {
                field: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for ParticipantField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Write policy for a proposed field binding.
///
/// `Override` targets a currently-blank cell; `Update` replaces a non-blank
/// one. Callers may flip the proposed policy before applying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WritePolicy {
    /// The target cell is blank; the linked value fills it in.
    Override,
    /// The target cell already holds a value; the edit replaces it.
    Update,
}

/// Per-row metadata binding a cell to a canonical entity field.
///
/// The string encoding (`userEmail:<email>,<field>` /
/// `participantId:<id>,<field>`) is the persisted form and round-trips
/// through [`Display`](fmt::Display) and [`FromStr`].
///
/// # Example
///
/// ```
/// use studioboard_lib::model::{LinkAnchor, UserField};
///
/// let anchor: LinkAnchor = "userEmail:a@x.com,first".parse().unwrap();
/// assert_eq!(anchor, LinkAnchor::user("a@x.com", UserField::First));
/// assert_eq!(anchor.to_string(), "userEmail:a@x.com,first");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LinkAnchor {
    /// Bound to a user profile field, keyed by email.
    User {
        /// The canonical user email.
        email: String,
        /// The bound profile field.
        field: UserField,
    },
    /// Bound to a participant field, keyed by participant id.
    Participant {
        /// The canonical participant id.
        id: Uuid,
        /// The bound participant field.
        field: ParticipantField,
    },
}

impl LinkAnchor {
    /// Creates a user anchor.
    pub fn user(email: impl Into<String>, field: UserField) -> Self {
        Self::User {
            email: email.into(),
            field,
        }
    }

    /// Creates a participant anchor.
    pub fn participant(id: Uuid, field: ParticipantField) -> Self {
        Self::Participant { id, field }
    }

    /// Returns `true` if this anchor binds to a user profile.
    pub fn is_user(&self) -> bool {
        matches!(self, Self::User { .. })
    }

    /// Returns `true` if two anchors reference the same canonical entity.
    pub fn same_entity(&self, other: &LinkAnchor) -> bool {
        match (self, other) {
            (Self::User { email: a, .. }, Self::User { email: b, .. }) => {
                a.eq_ignore_ascii_case(b)
            }
            (Self::Participant { id: a, .. }, Self::Participant { id: b, .. }) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for LinkAnchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User { email, field } => write!(f, "userEmail:{email},{field}"),
            Self::Participant { id, field } => write!(f, "participantId:{id},{field}"),
        }
    }
}

impl FromStr for LinkAnchor {
    type Err = ParseAnchorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(rest) = s.strip_prefix("userEmail:") {
            let (email, field) =
                rest.rsplit_once(',')
                    .ok_or_else(|| ParseAnchorError::MissingField {
                        text: s.to_string(),
                    })?;
            Ok(Self::User {
                email: email.to_string(),
                field: field.parse()?,
            })
        } else if let Some(rest) = s.strip_prefix("participantId:") {
            let (id, field) =
                rest.rsplit_once(',')
                    .ok_or_else(|| ParseAnchorError::MissingField {
                        text: s.to_string(),
                    })?;
            let id = Uuid::parse_str(id).map_err(|_| ParseAnchorError::InvalidId {
                id: id.to_string(),
            })?;
            Ok(Self::Participant {
                id,
                field: field.parse()?,
            })
        } else {
            Err(ParseAnchorError::UnknownPrefix {
                text: s.to_string(),
            })
        }
    }
}

impl Serialize for LinkAnchor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for LinkAnchor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
