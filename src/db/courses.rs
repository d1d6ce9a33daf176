use sqlx::{SqliteConnection, SqlitePool};
use tracing::info;

use super::{begin_write, now, present};
use crate::error::AppError;
use crate::models::{Course, CourseWithProfessor, NewCourseRequest, UpdateCourseRequest};

const ENTITY: &str = "Course";
const COURSE_COLUMNS: &str = "course_id, course_name, course_field, course_duration, course_price, professor_id, created_at";

/// Courses joined with their professor. Inner join: a course only shows up
/// while its professor row exists.
pub async fn fetch_courses_with_professor(
    db: &SqlitePool,
) -> Result<Vec<CourseWithProfessor>, sqlx::Error> {
    sqlx::query_as::<_, CourseWithProfessor>(
        r#"
        SELECT
            c.course_id,
            c.course_name,
            c.course_field,
            c.course_duration,
            c.course_price,
            c.professor_id,
            c.created_at,
            p.name AS professor_name,
            p.email AS professor_email
        FROM courses c
        INNER JOIN professors p ON c.professor_id = p.professor_id
        "#
    )
    .fetch_all(db)
    .await
}

pub async fn find_course_by_id(db: &SqlitePool, id: i64) -> Result<Option<Course>, sqlx::Error> {
    sqlx::query_as::<_, Course>(&format!(
        "SELECT {COURSE_COLUMNS} FROM courses WHERE course_id = ?1"
    ))
    .bind(id)
    .fetch_optional(db)
    .await
}

async fn professor_exists(conn: &mut SqliteConnection, professor_id: i64) -> Result<bool, sqlx::Error> {
    let found: Option<i64> =
        sqlx::query_scalar("SELECT professor_id FROM professors WHERE professor_id = ?1")
            .bind(professor_id)
            .fetch_optional(conn)
            .await?;
    Ok(found.is_some())
}

pub async fn insert_course(
    db: &SqlitePool,
    professor_id: i64,
    req: NewCourseRequest,
) -> Result<Course, AppError> {
    let mut tx = begin_write(db).await?;

    if !professor_exists(&mut tx, professor_id).await? {
        return Err(AppError::NotFound("Professor"));
    }

    let created_at = now();
    let course_id = sqlx::query(
        r#"
        INSERT INTO courses
            (course_name, course_field, course_duration, course_price, professor_id, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#
    )
    .bind(&req.course_name)
    .bind(&req.course_field)
    .bind(&req.course_duration)
    .bind(&req.course_price)
    .bind(professor_id)
    .bind(&created_at)
    .execute(&mut *tx)
    .await
    .map_err(|e| AppError::from_write(ENTITY, e))?
    .last_insert_rowid();

    tx.commit().await?;
    info!(course_id, professor_id, "course created");

    Ok(Course {
        course_id,
        course_name: req.course_name,
        course_field: req.course_field,
        course_duration: req.course_duration,
        course_price: req.course_price,
        professor_id,
        created_at,
    })
}

pub async fn update_course(
    db: &SqlitePool,
    id: i64,
    req: UpdateCourseRequest,
) -> Result<Course, AppError> {
    let mut tx = begin_write(db).await?;

    let mut current = sqlx::query_as::<_, Course>(&format!(
        "SELECT {COURSE_COLUMNS} FROM courses WHERE course_id = ?1"
    ))
    .bind(id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or(AppError::NotFound(ENTITY))?;

    let course_name = present(req.course_name);
    let course_field = present(req.course_field);
    let course_duration = present(req.course_duration);
    let course_price = present(req.course_price);
    let professor_id = req.professor_id;

    if course_name.is_none()
        && course_field.is_none()
        && course_duration.is_none()
        && course_price.is_none()
        && professor_id.is_none()
    {
        return Err(AppError::NoFieldsToUpdate);
    }

    if let Some(professor_id) = professor_id {
        if !professor_exists(&mut tx, professor_id).await? {
            return Err(AppError::NotFound("Professor"));
        }
        current.professor_id = professor_id;
    }
    if let Some(course_name) = course_name {
        current.course_name = course_name;
    }
    if let Some(course_field) = course_field {
        current.course_field = course_field;
    }
    if let Some(course_duration) = course_duration {
        current.course_duration = course_duration;
    }
    if let Some(course_price) = course_price {
        current.course_price = course_price;
    }

    sqlx::query(
        r#"
        UPDATE courses
        SET course_name = ?1,
            course_field = ?2,
            course_duration = ?3,
            course_price = ?4,
            professor_id = ?5
        WHERE course_id = ?6
        "#
    )
    .bind(&current.course_name)
    .bind(&current.course_field)
    .bind(&current.course_duration)
    .bind(&current.course_price)
    .bind(current.professor_id)
    .bind(id)
    .execute(&mut *tx)
    .await
    .map_err(|e| AppError::from_write(ENTITY, e))?;

    tx.commit().await?;
    info!(course_id = id, "course updated");

    Ok(current)
}

pub async fn delete_course(db: &SqlitePool, id: i64) -> Result<(), AppError> {
    let mut tx = begin_write(db).await?;

    let existing: Option<i64> =
        sqlx::query_scalar("SELECT course_id FROM courses WHERE course_id = ?1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
    if existing.is_none() {
        return Err(AppError::NotFound(ENTITY));
    }

    sqlx::query("DELETE FROM courses WHERE course_id = ?1")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    info!(course_id = id, "course deleted");

    Ok(())
}
