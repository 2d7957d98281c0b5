//! Row classification and field-link proposal

use uuid::Uuid;

use super::is_valid_email;
use crate::catalog::Catalogs;
use crate::model::ColumnKind;
use crate::model::LinkAnchor;
use crate::model::ParticipantField;
use crate::model::Table;
use crate::model::UserField;
use crate::model::WritePolicy;

/// Header terms marking a column as describing a participant rather than
/// the account-holding user.
pub const PARTICIPANT_TERMS: &[&str] = &[
    "participant",
    "duchess",
    "deb",
    "escort",
    "daughter",
    "son",
    "child",
];

/// Returns `true` if the header names a participant-describing column.
pub fn header_is_participant_like(header: &str) -> bool {
    let header = header.to_lowercase();
    PARTICIPANT_TERMS.iter().any(|term| header.contains(term))
}

/// How a row relates to the canonical entity catalogs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowIdentity {
    /// Anchored to a registered user.
    User(String),
    /// Anchored to a temp user.
    TempUser(String),
    /// Anchored to a known participant.
    Participant(Uuid),
    /// An email in the row matches a known user or temp user; the row can
    /// be linked.
    Unlinked(String),
    /// An email in the row matches no known entity yet.
    Potential(String),
    /// No anchor and no email found.
    None,
}

impl RowIdentity {
    /// Returns the email this identity pends on, if any.
    pub fn email(&self) -> Option<&str> {
        match self {
            Self::User(email)
            | Self::TempUser(email)
            | Self::Unlinked(email)
            | Self::Potential(email) => Some(email),
            _ => None,
        }
    }
}

/// What a header rule sees of one column's cell at the probed row.
#[derive(Debug)]
pub struct ColumnProbe<'a> {
    /// The header, lowercased.
    pub header: String,
    /// The column kind.
    pub kind: ColumnKind,
    /// The cell text at the probed row.
    pub cell: &'a str,
    /// The email the row's identity pends on, if any.
    pub anchor_email: Option<&'a str>,
}

/// One ordered rule: the first rule whose predicate passes claims the
/// column for its field.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule<F> {
    /// The semantic field this rule assigns.
    pub field: F,
    /// The predicate deciding whether a column matches.
    pub applies: fn(&ColumnProbe<'_>) -> bool,
}

/// The ordered rule lists driving field assignment.
///
/// Swapping these out replaces the header heuristics (say, with explicit
/// user-declared bindings) without touching the resolver's control flow.
#[derive(Debug, Clone)]
pub struct LinkRules {
    /// Rules assigning user profile fields.
    pub user: Vec<FieldRule<UserField>>,
    /// Rules assigning participant fields.
    pub participant: Vec<FieldRule<ParticipantField>>,
}

impl Default for LinkRules {
    fn default() -> Self {
        Self {
            user: vec![
                FieldRule {
                    field: UserField::First,
                    applies: |p| p.header.contains("first"),
                },
                FieldRule {
                    field: UserField::Last,
                    applies: |p| p.header.contains("last"),
                },
                FieldRule {
                    field: UserField::Sitting,
                    applies: |p| p.header.contains("sitting"),
                },
                FieldRule {
                    field: UserField::Email,
                    applies: |p| {
                        p.anchor_email
                            .is_some_and(|email| p.cell.trim().eq_ignore_ascii_case(email))
                    },
                },
            ],
            participant: vec![
                FieldRule {
                    field: ParticipantField::Tags,
                    applies: |p| p.kind == ColumnKind::Tag,
                },
                FieldRule {
                    field: ParticipantField::Timeslot,
                    applies: |p| p.kind == ColumnKind::Date,
                },
                FieldRule {
                    field: ParticipantField::Notifications,
                    applies: |p| p.kind == ColumnKind::Notification,
                },
                FieldRule {
                    field: ParticipantField::First,
                    applies: |p| p.header.contains("first"),
                },
                FieldRule {
                    field: ParticipantField::Last,
                    applies: |p| p.header.contains("last"),
                },
                FieldRule {
                    field: ParticipantField::Middle,
                    applies: |p| p.header.contains("middle"),
                },
                FieldRule {
                    field: ParticipantField::Preferred,
                    applies: |p| p.header.contains("prefer"),
                },
                FieldRule {
                    field: ParticipantField::Email,
                    applies: |p| p.header.contains("email"),
                },
            ],
        }
    }
}

/// A proposed column-to-field binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLink<F> {
    /// The column to bind.
    pub column_id: Uuid,
    /// The semantic field it binds to.
    pub field: F,
    /// Proposed write policy; callers may flip it.
    pub policy: WritePolicy,
}

/// Proposed bindings for both entity kinds; the caller applies the map
/// matching the row's identity.
#[derive(Debug, Clone, Default)]
pub struct ProposedLinks {
    /// Bindings to user profile fields.
    pub user: Vec<FieldLink<UserField>>,
    /// Bindings to participant fields.
    pub participant: Vec<FieldLink<ParticipantField>>,
}

/// Classifies rows and proposes field bindings using a pluggable rule set.
#[derive(Debug, Clone, Default)]
pub struct FieldResolver {
    /// The ordered rule lists.
    pub rules: LinkRules,
}

impl FieldResolver {
    /// Creates a resolver with the default heuristic rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Classifies a row against the entity catalogs.
    ///
    /// Explicit anchor metadata wins; otherwise value columns with a
    /// non-participant header are scanned for a syntactically valid email.
    pub fn detect_entity(&self, table: &Table, row: usize, catalogs: &Catalogs) -> RowIdentity {
        for column in &table.columns {
            if let Some(anchor) = column.anchor(row) {
                match anchor {
                    LinkAnchor::User { email, .. } => {
                        if catalogs.user_by_email(email).is_some() {
                            return RowIdentity::User(email.clone());
                        }
                        if catalogs.temp_user_by_email(email).is_some() {
                            return RowIdentity::TempUser(email.clone());
                        }
                        // Anchored to a user that no longer resolves.
                        return RowIdentity::Potential(email.clone());
                    }
                    LinkAnchor::Participant { id, .. } => {
                        if catalogs.participant_by_id(*id).is_some() {
                            return RowIdentity::Participant(*id);
                        }
                        return RowIdentity::None;
                    }
                }
            }
        }

        for column in &table.columns {
            if column.kind != ColumnKind::Value || header_is_participant_like(&column.header) {
                continue;
            }
            let Some(cell) = column.value(row) else {
                continue;
            };
            let cell = cell.trim();
            if is_valid_email(cell) {
                return if catalogs.any_user_by_email(cell).is_some() {
                    RowIdentity::Unlinked(cell.to_string())
                } else {
                    RowIdentity::Potential(cell.to_string())
                };
            }
        }
        RowIdentity::None
    }

    /// Proposes column-to-field bindings for a classified row.
    ///
    /// Columns already carrying anchor metadata for the row are skipped;
    /// each field is claimed at most once per entity, first matching rule
    /// wins. Participant fields are only assigned to columns with a
    /// participant-indicating header or a tag/date/notification kind.
    pub fn propose_links(&self, table: &Table, row: usize, identity: &RowIdentity) -> ProposedLinks {
        let anchor_email = identity.email();
        let mut proposed = ProposedLinks::default();
        let mut user_claimed: Vec<UserField> = Vec::new();
        let mut participant_claimed: Vec<ParticipantField> = Vec::new();

        for column in &table.columns {
            if column.anchor(row).is_some() {
                continue;
            }
            let cell = column.value(row).unwrap_or_default();
            let probe = ColumnProbe {
                header: column.header.to_lowercase(),
                kind: column.kind,
                cell,
                anchor_email,
            };
            let policy = if column.is_blank(row) {
                WritePolicy::Override
            } else {
                WritePolicy::Update
            };

            for rule in &self.rules.user {
                if user_claimed.contains(&rule.field) || !(rule.applies)(&probe) {
                    continue;
                }
                user_claimed.push(rule.field);
                proposed.user.push(FieldLink {
                    column_id: column.id,
                    field: rule.field,
                    policy,
                });
                break;
            }

            let participant_eligible = header_is_participant_like(&column.header)
                || matches!(
                    column.kind,
                    ColumnKind::Tag | ColumnKind::Date | ColumnKind::Notification
                );
            if !participant_eligible {
                continue;
            }
            for rule in &self.rules.participant {
                if participant_claimed.contains(&rule.field) || !(rule.applies)(&probe) {
                    continue;
                }
                participant_claimed.push(rule.field);
                proposed.participant.push(FieldLink {
                    column_id: column.id,
                    field: rule.field,
                    policy,
                });
                break;
            }
        }
        proposed
    }
}
