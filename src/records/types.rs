use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use super::{require_non_empty, Identified, RecordError, Resource, ResourceKind, Validate};

/// Server-assigned record id.
///
/// The API is not consistent about id encoding: some endpoints send
/// numbers, others strings. Both deserialize to the same textual id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Unsigned(u64),
            Signed(i64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => RecordId(s),
            Raw::Unsigned(n) => RecordId(n.to_string()),
            Raw::Signed(n) => RecordId(n.to_string()),
        })
    }
}

/// A forum post or reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: RecordId,
    /// Top-level posts have a title; replies do not.
    #[serde(default)]
    pub title: Option<String>,
    pub body: String,
    pub author_id: RecordId,
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub category_id: Option<RecordId>,
    #[serde(default)]
    pub parent_id: Option<RecordId>,
    #[serde(default)]
    pub reply_count: u32,
    pub created_at: String,
}

impl Identified for Post {
    type Id = RecordId;

    fn id(&self) -> &RecordId {
        &self.id
    }
}

impl Validate for Post {
    fn validate(&self) -> Result<(), RecordError> {
        require_non_empty(Self::KIND, "id", self.id.as_str())?;
        require_non_empty(Self::KIND, "authorId", self.author_id.as_str())?;
        if self.parent_id.is_none() && self.title.as_deref().is_none_or(str::is_empty) {
            return Err(RecordError::new(
                Self::KIND,
                "top-level post has no title",
            ));
        }
        Ok(())
    }
}

impl Resource for Post {
    const KIND: ResourceKind = ResourceKind::Post;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Requested,
    Confirmed,
    Completed,
    Cancelled,
}

/// A booked (or requested) appointment slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: RecordId,
    pub practitioner_id: RecordId,
    #[serde(default)]
    pub practitioner_name: Option<String>,
    /// RFC 3339 start time.
    pub starts_at: String,
    /// RFC 3339 end time.
    pub ends_at: String,
    pub status: AppointmentStatus,
}

impl Identified for Appointment {
    type Id = RecordId;

    fn id(&self) -> &RecordId {
        &self.id
    }
}

impl Validate for Appointment {
    fn validate(&self) -> Result<(), RecordError> {
        require_non_empty(Self::KIND, "id", self.id.as_str())?;
        require_non_empty(Self::KIND, "practitionerId", self.practitioner_id.as_str())?;
        require_non_empty(Self::KIND, "startsAt", &self.starts_at)?;
        require_non_empty(Self::KIND, "endsAt", &self.ends_at)
    }
}

impl Resource for Appointment {
    const KIND: ResourceKind = ResourceKind::Appointment;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Practitioner {
    pub id: RecordId,
    pub display_name: String,
    #[serde(default)]
    pub specialties: Vec<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub rating: Option<f32>,
}

impl Identified for Practitioner {
    type Id = RecordId;

    fn id(&self) -> &RecordId {
        &self.id
    }
}

impl Validate for Practitioner {
    fn validate(&self) -> Result<(), RecordError> {
        require_non_empty(Self::KIND, "id", self.id.as_str())?;
        require_non_empty(Self::KIND, "displayName", &self.display_name)?;
        if let Some(rating) = self.rating.filter(|r| !(0.0..=5.0).contains(r)) {
            return Err(RecordError::new(
                Self::KIND,
                format!("rating {rating} outside 0..=5"),
            ));
        }
        Ok(())
    }
}

impl Resource for Practitioner {
    const KIND: ResourceKind = ResourceKind::Practitioner;
}

/// What a bookmark points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkTarget {
    pub kind: ResourceKind,
    pub id: RecordId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub id: RecordId,
    pub target: BookmarkTarget,
    #[serde(default)]
    pub label: Option<String>,
    pub created_at: String,
}

impl Identified for Bookmark {
    type Id = RecordId;

    fn id(&self) -> &RecordId {
        &self.id
    }
}

impl Validate for Bookmark {
    fn validate(&self) -> Result<(), RecordError> {
        require_non_empty(Self::KIND, "id", self.id.as_str())?;
        require_non_empty(Self::KIND, "target.id", self.target.id.as_str())?;
        if self.target.kind == ResourceKind::Bookmark {
            return Err(RecordError::new(Self::KIND, "bookmark targets a bookmark"));
        }
        Ok(())
    }
}

impl Resource for Bookmark {
    const KIND: ResourceKind = ResourceKind::Bookmark;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareTeamMember {
    pub id: RecordId,
    pub practitioner_id: RecordId,
    pub display_name: String,
    #[serde(default)]
    pub role: Option<String>,
}

impl Identified for CareTeamMember {
    type Id = RecordId;

    fn id(&self) -> &RecordId {
        &self.id
    }
}

impl Validate for CareTeamMember {
    fn validate(&self) -> Result<(), RecordError> {
        require_non_empty(Self::KIND, "id", self.id.as_str())?;
        require_non_empty(Self::KIND, "practitionerId", self.practitioner_id.as_str())?;
        require_non_empty(Self::KIND, "displayName", &self.display_name)
    }
}

impl Resource for CareTeamMember {
    const KIND: ResourceKind = ResourceKind::CareTeam;
}

/// The signed-in account, as returned by `/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub id: RecordId,
    pub display_name: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Forum category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: RecordId,
    pub name: String,
    pub slug: String,
}
