use async_trait::async_trait;
use sqlx::PgPool;

use super::repo_types::{Course, GroupListing, GroupListingRow, NewStudyGroup, StudyGroup};
use crate::error::StoreError;

#[async_trait]
pub trait CatalogRepo: Send + Sync {
    async fn find_course_by_code(&self, course_code: &str) -> Result<Option<Course>, StoreError>;

    /// A taken code surfaces as `StoreError::UniqueViolation`.
    async fn insert_course(&self, course_code: &str, course_name: &str)
        -> Result<Course, StoreError>;

    /// Every course, ordered by code.
    async fn list_courses(&self) -> Result<Vec<Course>, StoreError>;

    async fn insert_group(&self, group: &NewStudyGroup) -> Result<StudyGroup, StoreError>;

    /// Newest first; `course_filter` is a case-insensitive substring of the course code.
    async fn list_groups(&self, course_filter: Option<&str>)
        -> Result<Vec<GroupListing>, StoreError>;
}

#[derive(Clone)]
pub struct PgCatalogRepo {
    db: PgPool,
}

impl PgCatalogRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

// Byte order, so listings don't depend on the database's locale.
const LIST_COURSES_SQL: &str = r#"
    SELECT id, course_code, course_name
      FROM courses
     ORDER BY course_code COLLATE "C" ASC
"#;

/// `%filter%` with LIKE metacharacters escaped.
pub(crate) fn contains_pattern(filter: &str) -> String {
    let mut out = String::with_capacity(filter.len() + 2);
    out.push('%');
    for c in filter.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('%');
    out
}

#[async_trait]
impl CatalogRepo for PgCatalogRepo {
    async fn find_course_by_code(&self, course_code: &str) -> Result<Option<Course>, StoreError> {
        let course = sqlx::query_as::<_, Course>(
            r#"
            SELECT id, course_code, course_name
              FROM courses
             WHERE course_code = $1
            "#,
        )
        .bind(course_code)
        .fetch_optional(&self.db)
        .await?;
        Ok(course)
    }

    async fn insert_course(
        &self,
        course_code: &str,
        course_name: &str,
    ) -> Result<Course, StoreError> {
        let course = sqlx::query_as::<_, Course>(
            r#"
            INSERT INTO courses (course_code, course_name)
            VALUES ($1, $2)
            RETURNING id, course_code, course_name
            "#,
        )
        .bind(course_code)
        .bind(course_name)
        .fetch_one(&self.db)
        .await
        .map_err(|e| StoreError::classify(e, "courses.course_code"))?;
        Ok(course)
    }

    async fn list_courses(&self) -> Result<Vec<Course>, StoreError> {
        let rows = sqlx::query_as::<_, Course>(LIST_COURSES_SQL)
            .fetch_all(&self.db)
            .await?;
        Ok(rows)
    }

    async fn insert_group(&self, group: &NewStudyGroup) -> Result<StudyGroup, StoreError> {
        let row = sqlx::query_as::<_, StudyGroup>(
            r#"
            INSERT INTO study_groups
                (name, course_id, creator_id, description, meeting_time, location, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, name, course_id, creator_id, description, meeting_time, location, created_at
            "#,
        )
        .bind(&group.name)
        .bind(group.course_id)
        .bind(group.creator_id)
        .bind(&group.description)
        .bind(&group.meeting_time)
        .bind(&group.location)
        .bind(group.created_at)
        .fetch_one(&self.db)
        .await?;
        Ok(row)
    }

    async fn list_groups(
        &self,
        course_filter: Option<&str>,
    ) -> Result<Vec<GroupListing>, StoreError> {
        let pattern = course_filter.map(contains_pattern);
        let rows = sqlx::query_as::<_, GroupListingRow>(
            r#"
            SELECT g.id, g.name, g.course_id, g.creator_id, g.description,
                   g.meeting_time, g.location, g.created_at,
                   c.course_code,
                   COALESCE(NULLIF(u.name, ''), split_part(u.email, '@', 1)) AS creator_name
              FROM study_groups g
              JOIN courses c ON c.id = g.course_id
              LEFT JOIN users u ON u.id = g.creator_id
             WHERE $1::text IS NULL OR c.course_code ILIKE $1
             ORDER BY g.created_at DESC, g.id DESC
            "#,
        )
        .bind(pattern)
        .fetch_all(&self.db)
        .await?;
        Ok(rows.into_iter().map(GroupListing::from).collect())
    }
}
