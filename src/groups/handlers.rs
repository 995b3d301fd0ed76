use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use tracing::{error, instrument};

use super::{
    dto::{CreateGroupForm, GroupsQuery},
    services,
};
use crate::{
    auth::extractors::CurrentUser,
    error::AppError,
    state::AppState,
    views::{render, CourseOption, CreateGroupPage, GroupCard, GroupsPage},
};

pub fn group_routes() -> Router<AppState> {
    Router::new()
        .route("/create-group", get(create_group_form).post(create_group))
        .route("/groups", get(list_groups))
}

/// Known courses for the form's suggestions; an outage just leaves them empty.
async fn course_options(state: &AppState) -> Vec<CourseOption> {
    match services::list_courses(state).await {
        Ok(courses) => courses.into_iter().map(CourseOption::from).collect(),
        Err(e) => {
            error!(error = %e, "list courses failed");
            Vec::new()
        }
    }
}

#[instrument(skip(state, user), fields(user_id = %user.user_id))]
pub async fn create_group_form(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Response {
    render(&CreateGroupPage {
        user_name: user.user_display_name,
        courses: course_options(&state).await,
        ..CreateGroupPage::default()
    })
}

#[instrument(skip(state, user, form), fields(user_id = %user.user_id))]
pub async fn create_group(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Form(form): Form<CreateGroupForm>,
) -> Response {
    match services::create_group(&state, user.user_id, (&form).into()).await {
        Ok(_) => Redirect::to("/groups").into_response(),
        Err(e) => {
            let (status, message) = match &e {
                AppError::Validation(m) => (StatusCode::OK, m.clone()),
                _ => {
                    error!(error = %e, "create group failed");
                    (StatusCode::INTERNAL_SERVER_ERROR, "Could not create group".to_string())
                }
            };
            let page = CreateGroupPage {
                user_name: user.user_display_name,
                error: message,
                courses: course_options(&state).await,
                name: form.name,
                course_code: form.course_code,
                description: form.description,
                meeting_time: form.meeting_time,
                location: form.location,
            };
            (status, render(&page)).into_response()
        }
    }
}

#[instrument(skip(state, user), fields(user_id = %user.user_id))]
pub async fn list_groups(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(q): Query<GroupsQuery>,
) -> Response {
    let catalog = match services::list_groups(&state, &q.course).await {
        Ok(c) => c,
        Err(e) => {
            error!(error = %e, "list groups failed");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Server error – try again").into_response();
        }
    };
    render(&GroupsPage {
        user_name: user.user_display_name,
        course_filter: q.course.trim().to_string(),
        course_codes: catalog.course_codes,
        groups: catalog.groups.into_iter().map(GroupCard::from).collect(),
    })
}
