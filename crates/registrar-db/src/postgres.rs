//! PostgreSQL backend.

use std::fmt;
use std::marker::PhantomData;

use async_trait::async_trait;
use sqlx::error::ErrorKind as DbErrorKind;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::instrument;

use registrar_core::AppError;
use registrar_models::{
    ApprovalStatus, Course, CourseRegistration, Department, Exam, Faculty, Grade, Student,
    StudentAttendance,
};

use crate::entity::Entity;
use crate::repository::{
    Repository, already_exists, ensure_complete, missing_reference, not_found, still_referenced,
};
use crate::store::{
    Store, already_registered, insufficient_balance, insufficient_vacancy, not_pending,
};

/// Generic repository over one table, driven by the entity's descriptor.
pub struct PgRepository<E> {
    pool: PgPool,
    _entity: PhantomData<fn() -> E>,
}

impl<E> PgRepository<E> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _entity: PhantomData,
        }
    }
}

impl<E: Entity> fmt::Debug for PgRepository<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PgRepository")
            .field("table", &E::TABLE)
            .finish()
    }
}

fn select_list<E: Entity>() -> String {
    format!("id, {}", E::COLUMNS.join(", "))
}

/// Maps constraint violations to the repository error contract.
fn map_write_error<E: Entity>(err: sqlx::Error, deleting: bool) -> AppError {
    if let sqlx::Error::Database(db_err) = &err {
        match db_err.kind() {
            DbErrorKind::UniqueViolation => return already_exists::<E>(),
            DbErrorKind::ForeignKeyViolation if deleting => return still_referenced::<E>(),
            DbErrorKind::ForeignKeyViolation => {
                let parent = db_err.constraint().unwrap_or("record").to_string();
                return missing_reference::<E>(&parent);
            }
            DbErrorKind::CheckViolation | DbErrorKind::NotNullViolation => {
                return AppError::invalid_argument(anyhow::anyhow!(
                    "Invalid {}: {}",
                    E::LABEL,
                    db_err.message()
                ));
            }
            _ => {}
        }
    }
    AppError::internal(err)
}

#[async_trait]
impl<E: Entity> Repository<E> for PgRepository<E> {
    #[instrument(skip(self), fields(table = E::TABLE))]
    async fn get_all(&self) -> Result<Vec<E>, AppError> {
        let sql = format!("SELECT {} FROM {} ORDER BY id", select_list::<E>(), E::TABLE);
        let rows = sqlx::query_as::<_, E>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    #[instrument(skip(self), fields(table = E::TABLE))]
    async fn get_by_id(&self, id: i32) -> Result<E, AppError> {
        let sql = format!("SELECT {} FROM {} WHERE id = $1", select_list::<E>(), E::TABLE);
        sqlx::query_as::<_, E>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(not_found::<E>)
    }

    #[instrument(skip(self, entity), fields(table = E::TABLE))]
    async fn add(&self, entity: E) -> Result<E, AppError> {
        ensure_complete(&entity)?;

        let mut builder: QueryBuilder<'static, Postgres> = QueryBuilder::new(format!(
            "INSERT INTO {} ({}) VALUES (",
            E::TABLE,
            E::COLUMNS.join(", ")
        ));
        {
            let mut binder = builder.separated(", ");
            entity.bind_columns(&mut binder);
        }
        builder.push(format!(") RETURNING {}", select_list::<E>()));

        builder
            .build_query_as::<E>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_write_error::<E>(e, false))
    }

    #[instrument(skip(self, entity), fields(table = E::TABLE, id = entity.id()))]
    async fn update(&self, entity: E) -> Result<E, AppError> {
        ensure_complete(&entity)?;

        let mut builder: QueryBuilder<'static, Postgres> = QueryBuilder::new(format!(
            "UPDATE {} SET ({}) = ROW(",
            E::TABLE,
            E::COLUMNS.join(", ")
        ));
        {
            let mut binder = builder.separated(", ");
            entity.bind_columns(&mut binder);
        }
        builder.push(") WHERE id = ");
        builder.push_bind(entity.id());
        builder.push(format!(" RETURNING {}", select_list::<E>()));

        builder
            .build_query_as::<E>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_write_error::<E>(e, false))?
            .ok_or_else(not_found::<E>)
    }

    #[instrument(skip(self), fields(table = E::TABLE))]
    async fn delete(&self, id: i32) -> Result<E, AppError> {
        let sql = format!(
            "DELETE FROM {} WHERE id = $1 RETURNING {}",
            E::TABLE,
            select_list::<E>()
        );
        sqlx::query_as::<_, E>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_write_error::<E>(e, true))?
            .ok_or_else(not_found::<E>)
    }
}

/// [`Store`] backed by a PostgreSQL pool.
pub struct PgStore {
    pool: PgPool,
    departments: PgRepository<Department>,
    faculty: PgRepository<Faculty>,
    students: PgRepository<Student>,
    courses: PgRepository<Course>,
    exams: PgRepository<Exam>,
    grades: PgRepository<Grade>,
    attendance: PgRepository<StudentAttendance>,
    registrations: PgRepository<CourseRegistration>,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            departments: PgRepository::new(pool.clone()),
            faculty: PgRepository::new(pool.clone()),
            students: PgRepository::new(pool.clone()),
            courses: PgRepository::new(pool.clone()),
            exams: PgRepository::new(pool.clone()),
            grades: PgRepository::new(pool.clone()),
            attendance: PgRepository::new(pool.clone()),
            registrations: PgRepository::new(pool.clone()),
            pool,
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn finish_review(
        &self,
        id: i32,
        target: ApprovalStatus,
        comments: Option<String>,
    ) -> Result<CourseRegistration, AppError> {
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<_, CourseRegistration>(
            "SELECT id, student_id, course_id, approval_status, comments, fees_paid \
             FROM course_registrations WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(not_found::<CourseRegistration>)?;

        if current.approval_status != ApprovalStatus::Pending {
            return Err(not_pending(current.approval_status));
        }

        let updated = sqlx::query_as::<_, CourseRegistration>(
            "UPDATE course_registrations \
             SET approval_status = $2, comments = COALESCE($3, comments) \
             WHERE id = $1 \
             RETURNING id, student_id, course_id, approval_status, comments, fees_paid",
        )
        .bind(id)
        .bind(target)
        .bind(comments)
        .fetch_one(&mut *tx)
        .await?;

        if target == ApprovalStatus::Rejected {
            sqlx::query(
                "UPDATE students SET e_wallet = e_wallet + $2 WHERE id = $1",
            )
            .bind(current.student_id)
            .bind(current.fees_paid)
            .execute(&mut *tx)
            .await?;

            sqlx::query("UPDATE courses SET vacancy = vacancy + 1 WHERE id = $1")
                .bind(current.course_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(updated)
    }
}

impl fmt::Debug for PgStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PgStore").finish_non_exhaustive()
    }
}

#[async_trait]
impl Store for PgStore {
    fn departments(&self) -> &dyn Repository<Department> {
        &self.departments
    }

    fn faculty(&self) -> &dyn Repository<Faculty> {
        &self.faculty
    }

    fn students(&self) -> &dyn Repository<Student> {
        &self.students
    }

    fn courses(&self) -> &dyn Repository<Course> {
        &self.courses
    }

    fn exams(&self) -> &dyn Repository<Exam> {
        &self.exams
    }

    fn grades(&self) -> &dyn Repository<Grade> {
        &self.grades
    }

    fn attendance(&self) -> &dyn Repository<StudentAttendance> {
        &self.attendance
    }

    fn registrations(&self) -> &dyn Repository<CourseRegistration> {
        &self.registrations
    }

    #[instrument(skip(self))]
    async fn enroll(
        &self,
        student_id: i32,
        course_id: i32,
    ) -> Result<CourseRegistration, AppError> {
        let mut tx = self.pool.begin().await?;

        let fees: i64 = sqlx::query_scalar("SELECT fees FROM courses WHERE id = $1 FOR UPDATE")
            .bind(course_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(not_found::<Course>)?;

        let duplicate: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM course_registrations \
             WHERE student_id = $1 AND course_id = $2 AND approval_status <> 'rejected')",
        )
        .bind(student_id)
        .bind(course_id)
        .fetch_one(&mut *tx)
        .await?;
        if duplicate {
            return Err(already_registered());
        }

        let seat = sqlx::query("UPDATE courses SET vacancy = vacancy - 1 WHERE id = $1 AND vacancy > 0")
            .bind(course_id)
            .execute(&mut *tx)
            .await?;
        if seat.rows_affected() == 0 {
            return Err(insufficient_vacancy());
        }

        let charged = sqlx::query(
            "UPDATE students SET e_wallet = e_wallet - $2 WHERE id = $1 AND e_wallet >= $2",
        )
        .bind(student_id)
        .bind(fees)
        .execute(&mut *tx)
        .await?;
        if charged.rows_affected() == 0 {
            let exists: bool =
                sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM students WHERE id = $1)")
                    .bind(student_id)
                    .fetch_one(&mut *tx)
                    .await?;
            return Err(if exists {
                insufficient_balance()
            } else {
                not_found::<Student>()
            });
        }

        let registration = sqlx::query_as::<_, CourseRegistration>(
            "INSERT INTO course_registrations (student_id, course_id, approval_status, fees_paid) \
             VALUES ($1, $2, 'pending', $3) \
             RETURNING id, student_id, course_id, approval_status, comments, fees_paid",
        )
        .bind(student_id)
        .bind(course_id)
        .bind(fees)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_write_error::<CourseRegistration>(e, false))?;

        tx.commit().await?;
        Ok(registration)
    }

    #[instrument(skip(self, comments))]
    async fn approve_registration(
        &self,
        id: i32,
        comments: Option<String>,
    ) -> Result<CourseRegistration, AppError> {
        self.finish_review(id, ApprovalStatus::Approved, comments)
            .await
    }

    #[instrument(skip(self, comments))]
    async fn reject_registration(
        &self,
        id: i32,
        comments: Option<String>,
    ) -> Result<CourseRegistration, AppError> {
        self.finish_review(id, ApprovalStatus::Rejected, comments)
            .await
    }
}
