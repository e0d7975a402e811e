use anyhow::anyhow;
use tracing::{info, instrument, warn};

use registrar_core::AppError;
use registrar_db::Store;
use registrar_models::{ApprovalStatus, CourseRegistration};

use crate::metrics::{track_enrollment, track_registration_review};
use crate::modules::non_empty;

pub struct RegistrationService;

impl RegistrationService {
    /// Registers an active student for a course, paying the fee from the
    /// e-wallet. Nothing is written when any check fails.
    #[instrument(skip(store))]
    pub async fn add_course(
        store: &dyn Store,
        student_id: i32,
        course_id: i32,
    ) -> Result<CourseRegistration, AppError> {
        let student = store.students().get_by_id(student_id).await?;
        store.courses().get_by_id(course_id).await?;

        if !student.is_active() {
            track_enrollment(false);
            return Err(AppError::business_rule(anyhow!(
                "Inactive students cannot register for courses"
            )));
        }

        match store.enroll(student_id, course_id).await {
            Ok(registration) => {
                track_enrollment(true);
                info!(registration_id = registration.id, "Student enrolled");
                Ok(registration)
            }
            Err(e) => {
                track_enrollment(false);
                warn!(error = %e, "Enrollment refused");
                Err(e)
            }
        }
    }

    #[instrument(skip(store))]
    pub async fn approve(
        store: &dyn Store,
        id: i32,
        comments: Option<String>,
    ) -> Result<CourseRegistration, AppError> {
        let registration = store.approve_registration(id, comments).await?;
        track_registration_review(ApprovalStatus::Approved.as_str());
        Ok(registration)
    }

    /// Rejects a pending registration, refunding the fee and freeing the seat.
    #[instrument(skip(store))]
    pub async fn reject(
        store: &dyn Store,
        id: i32,
        comments: Option<String>,
    ) -> Result<CourseRegistration, AppError> {
        let registration = store.reject_registration(id, comments).await?;
        track_registration_review(ApprovalStatus::Rejected.as_str());
        Ok(registration)
    }

    /// Removes a reviewed registration without refunding anything. A pending
    /// one still holds a seat and a payment, so it must be rejected first.
    #[instrument(skip(store))]
    pub async fn delete(store: &dyn Store, id: i32) -> Result<CourseRegistration, AppError> {
        let registration = store.registrations().get_by_id(id).await?;
        if registration.approval_status == ApprovalStatus::Pending {
            return Err(AppError::invalid_state(anyhow!(
                "A pending registration must be rejected before it can be deleted"
            )));
        }

        store.registrations().delete(id).await
    }

    #[instrument(skip(store))]
    pub async fn get_registration(
        store: &dyn Store,
        id: i32,
    ) -> Result<CourseRegistration, AppError> {
        store.registrations().get_by_id(id).await
    }

    #[instrument(skip(store))]
    pub async fn get_all_registrations(
        store: &dyn Store,
    ) -> Result<Vec<CourseRegistration>, AppError> {
        non_empty(
            store.registrations().get_all().await?,
            "No course registrations exist",
        )
    }

    async fn filtered(
        store: &dyn Store,
        predicate: impl Fn(&CourseRegistration) -> bool,
    ) -> Result<Vec<CourseRegistration>, AppError> {
        let registrations = store
            .registrations()
            .get_all()
            .await?
            .into_iter()
            .filter(|r| predicate(r))
            .collect();

        non_empty(registrations, "No matching course registrations exist")
    }

    #[instrument(skip(store))]
    pub async fn get_by_student(
        store: &dyn Store,
        student_id: i32,
    ) -> Result<Vec<CourseRegistration>, AppError> {
        Self::filtered(store, |r| r.student_id == student_id).await
    }

    #[instrument(skip(store))]
    pub async fn get_by_course(
        store: &dyn Store,
        course_id: i32,
    ) -> Result<Vec<CourseRegistration>, AppError> {
        Self::filtered(store, |r| r.course_id == course_id).await
    }

    #[instrument(skip(store))]
    pub async fn get_by_student_and_status(
        store: &dyn Store,
        student_id: i32,
        status: ApprovalStatus,
    ) -> Result<Vec<CourseRegistration>, AppError> {
        Self::filtered(store, |r| {
            r.student_id == student_id && r.approval_status == status
        })
        .await
    }

    #[instrument(skip(store))]
    pub async fn get_by_course_and_status(
        store: &dyn Store,
        course_id: i32,
        status: ApprovalStatus,
    ) -> Result<Vec<CourseRegistration>, AppError> {
        Self::filtered(store, |r| r.course_id == course_id && r.approval_status == status).await
    }
}
