use time::OffsetDateTime;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::repo_types::{Course, GroupListing, NewStudyGroup, StudyGroup};
use crate::error::{AppError, StoreError};
use crate::state::AppState;

pub(crate) const MISSING_GROUP_FIELDS: &str = "Group name and course code are required";

/// Input for `create_group`, straight from the form.
#[derive(Debug, Clone, Default)]
pub struct NewGroup {
    pub name: String,
    pub course_code: String,
    pub description: String,
    pub meeting_time: String,
    pub location: String,
}

/// What the groups page shows.
#[derive(Debug, Clone)]
pub struct GroupCatalog {
    pub groups: Vec<GroupListing>,
    pub course_codes: Vec<String>,
}

fn optional(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

/// Returns the course for `course_code`, creating it (named after its code) if unseen.
pub async fn find_or_create_course(st: &AppState, course_code: &str) -> Result<Course, AppError> {
    if let Some(course) = st.catalog.find_course_by_code(course_code).await? {
        return Ok(course);
    }
    match st.catalog.insert_course(course_code, course_code).await {
        Ok(course) => {
            info!(course_id = %course.id, course_code, "course created");
            Ok(course)
        }
        Err(StoreError::UniqueViolation(_)) => {
            debug!(course_code, "course inserted concurrently; re-reading");
            st.catalog
                .find_course_by_code(course_code)
                .await?
                .ok_or_else(|| {
                    AppError::Internal(anyhow::anyhow!(
                        "course {course_code} conflicted on insert but is not readable"
                    ))
                })
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn create_group(
    st: &AppState,
    creator_id: Uuid,
    input: NewGroup,
) -> Result<StudyGroup, AppError> {
    let name = input.name.trim();
    let course_code = input.course_code.trim();
    if name.is_empty() || course_code.is_empty() {
        warn!(%creator_id, "create group with missing fields");
        return Err(AppError::Validation(MISSING_GROUP_FIELDS.into()));
    }

    let course = find_or_create_course(st, course_code).await?;
    let group = st
        .catalog
        .insert_group(&NewStudyGroup {
            name: name.to_string(),
            course_id: course.id,
            creator_id,
            description: optional(&input.description),
            meeting_time: optional(&input.meeting_time),
            location: optional(&input.location),
            created_at: OffsetDateTime::now_utc(),
        })
        .await?;

    info!(group_id = %group.id, %creator_id, course_code = %course.course_code, "study group created");
    Ok(group)
}

/// Groups newest first, optionally narrowed by a case-insensitive course code substring.
pub async fn list_groups(st: &AppState, course_filter: &str) -> Result<GroupCatalog, AppError> {
    let filter = course_filter.trim();
    let filter = (!filter.is_empty()).then_some(filter);

    let groups = st.catalog.list_groups(filter).await?;
    let course_codes = st
        .catalog
        .list_courses()
        .await?
        .into_iter()
        .map(|c| c.course_code)
        .collect();
    Ok(GroupCatalog {
        groups,
        course_codes,
    })
}

pub async fn list_courses(st: &AppState) -> Result<Vec<Course>, AppError> {
    Ok(st.catalog.list_courses().await?)
}
