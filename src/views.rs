//! Page view-models. Each page is a plain struct rendered by an askama template;
//! handlers build them from service results and never touch markup directly.

use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use time::{format_description::FormatItem, macros::format_description, OffsetDateTime};
use tracing::error;

use crate::groups::repo_types::{Course, GroupListing};

const CREATED_FMT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute] UTC");

#[derive(Template, Default)]
#[template(path = "login.html")]
pub struct LoginPage {
    pub error: String,
    pub email: String,
}

#[derive(Template, Default)]
#[template(path = "register.html")]
pub struct RegisterPage {
    pub error: String,
    pub name: String,
    pub email: String,
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardPage {
    pub user_name: String,
}

pub struct CourseOption {
    pub code: String,
    pub name: String,
}

impl From<Course> for CourseOption {
    fn from(c: Course) -> Self {
        Self {
            code: c.course_code,
            name: c.course_name,
        }
    }
}

#[derive(Template, Default)]
#[template(path = "create_group.html")]
pub struct CreateGroupPage {
    pub user_name: String,
    pub error: String,
    pub courses: Vec<CourseOption>,
    pub name: String,
    pub course_code: String,
    pub description: String,
    pub meeting_time: String,
    pub location: String,
}

/// One row on the groups page, flattened for the template.
pub struct GroupCard {
    pub name: String,
    pub course_code: String,
    pub creator: String,
    pub description: String,
    pub meeting_time: String,
    pub location: String,
    pub created: String,
}

impl From<GroupListing> for GroupCard {
    fn from(l: GroupListing) -> Self {
        Self {
            created: format_created(l.group.created_at),
            name: l.group.name,
            course_code: l.course_code,
            creator: l.creator_name.unwrap_or_else(|| "a former member".into()),
            description: l.group.description.unwrap_or_default(),
            meeting_time: l.group.meeting_time.unwrap_or_default(),
            location: l.group.location.unwrap_or_default(),
        }
    }
}

fn format_created(at: OffsetDateTime) -> String {
    at.format(CREATED_FMT).unwrap_or_default()
}

#[derive(Template)]
#[template(path = "groups.html")]
pub struct GroupsPage {
    pub user_name: String,
    pub course_filter: String,
    pub course_codes: Vec<String>,
    pub groups: Vec<GroupCard>,
}

#[derive(Template)]
#[template(path = "not_found.html")]
pub struct NotFoundPage;

/// Renders a page as HTML; a template failure becomes a bare 500.
pub fn render<T: Template>(page: &T) -> Response {
    match page.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!(error = %e, "template render failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
        }
    }
}
