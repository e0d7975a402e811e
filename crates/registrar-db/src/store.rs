use std::fmt::Debug;

use async_trait::async_trait;

use registrar_core::AppError;
use registrar_models::{
    Course, CourseRegistration, Department, Exam, Faculty, Grade, Student, StudentAttendance,
};

use crate::repository::Repository;

/// The full set of repositories plus the registration workflows that must
/// write several tables at once.
///
/// The workflow methods apply their own guards (a free seat, enough
/// balance, a pending registration) inside one atomic unit, so callers can
/// pre-validate for readable errors without racing each other.
#[async_trait]
pub trait Store: Send + Sync + Debug {
    fn departments(&self) -> &dyn Repository<Department>;
    fn faculty(&self) -> &dyn Repository<Faculty>;
    fn students(&self) -> &dyn Repository<Student>;
    fn courses(&self) -> &dyn Repository<Course>;
    fn exams(&self) -> &dyn Repository<Exam>;
    fn grades(&self) -> &dyn Repository<Grade>;
    fn attendance(&self) -> &dyn Repository<StudentAttendance>;
    fn registrations(&self) -> &dyn Repository<CourseRegistration>;

    /// Takes a seat, charges the course fee and creates a pending
    /// registration, or writes nothing.
    async fn enroll(&self, student_id: i32, course_id: i32)
    -> Result<CourseRegistration, AppError>;

    /// Moves a pending registration to approved.
    async fn approve_registration(
        &self,
        id: i32,
        comments: Option<String>,
    ) -> Result<CourseRegistration, AppError>;

    /// Moves a pending registration to rejected, refunds the fee and frees
    /// the seat.
    async fn reject_registration(
        &self,
        id: i32,
        comments: Option<String>,
    ) -> Result<CourseRegistration, AppError>;
}

pub(crate) fn insufficient_vacancy() -> AppError {
    AppError::business_rule(anyhow::anyhow!("Insufficient vacancy in the course"))
}

pub(crate) fn insufficient_balance() -> AppError {
    AppError::business_rule(anyhow::anyhow!("Insufficient wallet balance"))
}

pub(crate) fn already_registered() -> AppError {
    AppError::already_exists(anyhow::anyhow!(
        "Student is already registered for this course"
    ))
}

pub(crate) fn not_pending(status: impl std::fmt::Display) -> AppError {
    AppError::invalid_state(anyhow::anyhow!("Course registration is already {status}"))
}
