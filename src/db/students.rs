use sqlx::SqlitePool;
use tracing::info;

use super::{begin_write, now, present};
use crate::error::AppError;
use crate::models::{NewStudentRequest, Student, UpdateStudentRequest};

const ENTITY: &str = "Student";
const STUDENT_COLUMNS: &str = "students_id, name, age, email, department, password, created_at";

pub async fn fetch_students(db: &SqlitePool) -> Result<Vec<Student>, sqlx::Error> {
    sqlx::query_as::<_, Student>(&format!("SELECT {STUDENT_COLUMNS} FROM students"))
    .fetch_all(db)
    .await
}

pub async fn find_student_by_id(db: &SqlitePool, id: i64) -> Result<Option<Student>, sqlx::Error> {
    sqlx::query_as::<_, Student>(&format!(
        "SELECT {STUDENT_COLUMNS} FROM students WHERE students_id = ?1"
    ))
    .bind(id)
    .fetch_optional(db)
    .await
}

/// Lookup used by student login: both name and email have to match.
pub async fn find_student_by_name_and_email(
    db: &SqlitePool,
    name: &str,
    email: &str,
) -> Result<Option<Student>, sqlx::Error> {
    sqlx::query_as::<_, Student>(&format!(
        "SELECT {STUDENT_COLUMNS} FROM students WHERE name = ?1 AND email = ?2"
    ))
    .bind(name)
    .bind(email)
    .fetch_optional(db)
    .await
}

pub async fn insert_student(db: &SqlitePool, req: NewStudentRequest) -> Result<Student, AppError> {
    let mut tx = begin_write(db).await?;

    let existing: Option<i64> =
        sqlx::query_scalar("SELECT students_id FROM students WHERE email = ?1")
            .bind(&req.email)
            .fetch_optional(&mut *tx)
            .await?;
    if existing.is_some() {
        return Err(AppError::Duplicate(ENTITY));
    }

    let created_at = now();
    let password = present(req.password);

    let students_id = sqlx::query(
        r#"
        INSERT INTO students (name, age, email, department, password, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#
    )
    .bind(&req.name)
    .bind(req.age)
    .bind(&req.email)
    .bind(&req.department)
    .bind(&password)
    .bind(&created_at)
    .execute(&mut *tx)
    .await
    .map_err(|e| AppError::from_write(ENTITY, e))?
    .last_insert_rowid();

    tx.commit().await?;
    info!(students_id, "student created");

    Ok(Student {
        students_id,
        name: req.name,
        age: req.age,
        email: req.email,
        department: req.department,
        password,
        created_at,
    })
}

pub async fn update_student(
    db: &SqlitePool,
    id: i64,
    req: UpdateStudentRequest,
) -> Result<Student, AppError> {
    let mut tx = begin_write(db).await?;

    let mut current = sqlx::query_as::<_, Student>(&format!(
        "SELECT {STUDENT_COLUMNS} FROM students WHERE students_id = ?1"
    ))
    .bind(id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or(AppError::NotFound(ENTITY))?;

    let name = present(req.name);
    let age = req.age.filter(|age| *age != 0);
    let email = present(req.email);
    let department = present(req.department);

    if name.is_none() && age.is_none() && email.is_none() && department.is_none() {
        return Err(AppError::NoFieldsToUpdate);
    }

    if let Some(name) = name {
        current.name = name;
    }
    if let Some(age) = age {
        current.age = age;
    }
    if let Some(email) = email {
        current.email = email;
    }
    if let Some(department) = department {
        current.department = department;
    }

    sqlx::query(
        r#"
        UPDATE students
        SET name = ?1,
            age = ?2,
            email = ?3,
            department = ?4
        WHERE students_id = ?5
        "#
    )
    .bind(&current.name)
    .bind(current.age)
    .bind(&current.email)
    .bind(&current.department)
    .bind(id)
    .execute(&mut *tx)
    .await
    .map_err(|e| AppError::from_write(ENTITY, e))?;

    tx.commit().await?;
    info!(students_id = id, "student updated");

    Ok(current)
}

pub async fn delete_student(db: &SqlitePool, id: i64) -> Result<(), AppError> {
    let mut tx = begin_write(db).await?;

    let existing: Option<i64> =
        sqlx::query_scalar("SELECT students_id FROM students WHERE students_id = ?1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
    if existing.is_none() {
        return Err(AppError::NotFound(ENTITY));
    }

    sqlx::query("DELETE FROM students WHERE students_id = ?1")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    info!(students_id = id, "student deleted");

    Ok(())
}
