use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, Eq)]
pub struct Course {
    pub id: Uuid,
    pub course_code: String,
    pub course_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StudyGroup {
    pub id: Uuid,
    pub name: String,
    pub course_id: Uuid,
    pub creator_id: Uuid,
    pub description: Option<String>,
    pub meeting_time: Option<String>,
    pub location: Option<String>,
    pub created_at: OffsetDateTime,
}

/// Insert payload; the course is already resolved.
#[derive(Debug, Clone)]
pub struct NewStudyGroup {
    pub name: String,
    pub course_id: Uuid,
    pub creator_id: Uuid,
    pub description: Option<String>,
    pub meeting_time: Option<String>,
    pub location: Option<String>,
    pub created_at: OffsetDateTime,
}

/// Flat join row: study_groups ⋈ courses ⟕ users.
#[derive(Debug, FromRow)]
pub struct GroupListingRow {
    pub id: Uuid,
    pub name: String,
    pub course_id: Uuid,
    pub creator_id: Uuid,
    pub description: Option<String>,
    pub meeting_time: Option<String>,
    pub location: Option<String>,
    pub created_at: OffsetDateTime,
    pub course_code: String,
    pub creator_name: Option<String>,
}

/// A group as shown in listings.
#[derive(Debug, Clone, Serialize)]
pub struct GroupListing {
    pub group: StudyGroup,
    pub course_code: String,
    /// `None` when the creator no longer resolves to a user.
    pub creator_name: Option<String>,
}

impl From<GroupListingRow> for GroupListing {
    fn from(r: GroupListingRow) -> Self {
        Self {
            group: StudyGroup {
                id: r.id,
                name: r.name,
                course_id: r.course_id,
                creator_id: r.creator_id,
                description: r.description,
                meeting_time: r.meeting_time,
                location: r.location,
                created_at: r.created_at,
            },
            course_code: r.course_code,
            creator_name: r.creator_name,
        }
    }
}
