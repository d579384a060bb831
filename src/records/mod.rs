//! Typed records returned by the remote list endpoints.
//!
//! Every record kind the list layer displays has an explicit shape here,
//! and is checked once when a page is deserialized. List merging only
//! needs a record's identity, exposed through [`Identified`].

mod assessment;
mod types;

use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

pub use assessment::{Assessment, AssessmentKind};
pub use types::{
    Appointment, AppointmentStatus, Bookmark, BookmarkTarget, CareTeamMember, Category,
    CurrentUser, Post, Practitioner, RecordId,
};

/// A record with a stable server-side identity.
///
/// Two records with equal ids are the same entry, regardless of any
/// other field. Lists use this to avoid appending an entry twice.
pub trait Identified {
    type Id: Eq + Hash + Clone + fmt::Debug + Send + Sync;

    fn id(&self) -> &Self::Id;
}

/// Boundary validation for records coming off the wire.
///
/// Serde enforces presence and types; this covers the rest (empty ids,
/// out-of-range ratings).
pub trait Validate {
    fn validate(&self) -> Result<(), RecordError>;
}

/// A record that deserialized but is not usable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind} record: {reason}")]
pub struct RecordError {
    pub kind: ResourceKind,
    pub reason: String,
}

impl RecordError {
    pub fn new(kind: ResourceKind, reason: impl Into<String>) -> Self {
        Self {
            kind,
            reason: reason.into(),
        }
    }
}

/// The closed set of resources a list can be configured for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Post,
    Appointment,
    Practitioner,
    Bookmark,
    CareTeam,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Post => "post",
            ResourceKind::Appointment => "appointment",
            ResourceKind::Practitioner => "practitioner",
            ResourceKind::Bookmark => "bookmark",
            ResourceKind::CareTeam => "care_team",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ties a record type to its [`ResourceKind`].
pub trait Resource:
    Identified + Validate + serde::de::DeserializeOwned + Serialize + Clone + PartialEq + Send + Sync + 'static
{
    const KIND: ResourceKind;
}

pub(crate) fn require_non_empty(
    kind: ResourceKind,
    field: &str,
    value: &str,
) -> Result<(), RecordError> {
    if value.trim().is_empty() {
        return Err(RecordError::new(kind, format!("{field} is empty")));
    }
    Ok(())
}
