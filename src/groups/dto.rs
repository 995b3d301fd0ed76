use serde::Deserialize;

use super::services::NewGroup;

/// Form body for `POST /create-group`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateGroupForm {
    pub name: String,
    pub course_code: String,
    pub description: String,
    pub meeting_time: String,
    pub location: String,
}

impl From<&CreateGroupForm> for NewGroup {
    fn from(f: &CreateGroupForm) -> Self {
        Self {
            name: f.name.clone(),
            course_code: f.course_code.clone(),
            description: f.description.clone(),
            meeting_time: f.meeting_time.clone(),
            location: f.location.clone(),
        }
    }
}

/// `GET /groups?course=<substring>`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GroupsQuery {
    pub course: String,
}
