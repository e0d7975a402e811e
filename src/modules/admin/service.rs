use anyhow::anyhow;
use tracing::{info, instrument};

use registrar_core::AppError;
use registrar_db::Store;
use registrar_models::admin::PendingActivations;
use registrar_models::faculty::FacultyResponse;
use registrar_models::students::StudentResponse;
use registrar_models::{AccountStatus, FacultyRole};

use crate::metrics::track_account_status_change;

fn already(status: AccountStatus) -> AppError {
    let label = match status {
        AccountStatus::Active => "activated",
        AccountStatus::Inactive => "deactivated",
    };
    AppError::invalid_state(anyhow!("Account is already {label}"))
}

pub struct AdminService;

impl AdminService {
    async fn set_student_status(
        store: &dyn Store,
        id: i32,
        status: AccountStatus,
    ) -> Result<StudentResponse, AppError> {
        let mut student = store.students().get_by_id(id).await?;
        if student.status == status {
            return Err(already(status));
        }

        student.status = status;
        let student = store.students().update(student).await?;

        track_account_status_change("student", status == AccountStatus::Active);
        info!(student_id = id, ?status, "Student status changed");
        Ok(student.into())
    }

    async fn set_faculty_status(
        store: &dyn Store,
        id: i32,
        status: AccountStatus,
    ) -> Result<FacultyResponse, AppError> {
        let mut faculty = store.faculty().get_by_id(id).await?;
        if faculty.status == status {
            return Err(already(status));
        }
        if status == AccountStatus::Inactive && faculty.role == FacultyRole::Admin {
            return Err(AppError::business_rule(anyhow!(
                "An admin account cannot be deactivated"
            )));
        }

        faculty.status = status;
        let faculty = store.faculty().update(faculty).await?;

        track_account_status_change("faculty", status == AccountStatus::Active);
        info!(faculty_id = id, ?status, "Faculty status changed");
        Ok(faculty.into())
    }

    #[instrument(skip(store))]
    pub async fn activate_student(store: &dyn Store, id: i32) -> Result<StudentResponse, AppError> {
        Self::set_student_status(store, id, AccountStatus::Active).await
    }

    #[instrument(skip(store))]
    pub async fn deactivate_student(
        store: &dyn Store,
        id: i32,
    ) -> Result<StudentResponse, AppError> {
        Self::set_student_status(store, id, AccountStatus::Inactive).await
    }

    #[instrument(skip(store))]
    pub async fn activate_faculty(store: &dyn Store, id: i32) -> Result<FacultyResponse, AppError> {
        Self::set_faculty_status(store, id, AccountStatus::Active).await
    }

    #[instrument(skip(store))]
    pub async fn deactivate_faculty(
        store: &dyn Store,
        id: i32,
    ) -> Result<FacultyResponse, AppError> {
        Self::set_faculty_status(store, id, AccountStatus::Inactive).await
    }

    /// Accounts waiting for activation. Both lists may be empty.
    #[instrument(skip(store))]
    pub async fn pending_activations(store: &dyn Store) -> Result<PendingActivations, AppError> {
        let faculty = store
            .faculty()
            .get_all()
            .await?
            .into_iter()
            .filter(|f| !f.is_active())
            .map(FacultyResponse::from)
            .collect();

        let students = store
            .students()
            .get_all()
            .await?
            .into_iter()
            .filter(|s| !s.is_active())
            .map(StudentResponse::from)
            .collect();

        Ok(PendingActivations { faculty, students })
    }
}
