use anyhow::anyhow;
use tracing::instrument;

use registrar_core::{AppError, hash_password, verify_password};
use registrar_db::Store;
use registrar_models::students::{
    CreateStudentDto, StudentResponse, TopUpWalletDto, UpdateStudentDto,
};
use registrar_models::{AccountStatus, ChangePasswordDto, MessageResponse, Student};

use crate::metrics::track_wallet_top_up;
use crate::modules::auth::service::{Account, ensure_email_available};
use crate::modules::non_empty;

/// The department must exist and must not be the Admin pseudo-department.
pub(crate) async fn ensure_department_accepts_students(
    store: &dyn Store,
    department_id: i32,
) -> Result<(), AppError> {
    let department = store.departments().get_by_id(department_id).await?;

    if department.is_admin_department() {
        return Err(AppError::business_rule(anyhow!(
            "Students cannot be placed in the Admin department"
        )));
    }

    Ok(())
}

pub struct StudentService;

impl StudentService {
    /// Admin-created students are active immediately.
    #[instrument(skip(store, dto), fields(email = %dto.email))]
    pub async fn create_student(
        store: &dyn Store,
        dto: CreateStudentDto,
    ) -> Result<StudentResponse, AppError> {
        let email = dto.email.trim().to_string();
        ensure_email_available(store, &email, None).await?;
        ensure_department_accepts_students(store, dto.department_id).await?;

        let student = Student {
            id: 0,
            name: dto.name.trim().to_string(),
            email,
            dob: dto.dob,
            gender: dto.gender,
            mobile: dto.mobile,
            address: dto.address,
            status: AccountStatus::Active,
            department_id: dto.department_id,
            e_wallet: dto.e_wallet.unwrap_or(0),
            password_hash: hash_password(&dto.password)?,
        };

        Ok(store.students().add(student).await?.into())
    }

    #[instrument(skip(store))]
    pub async fn get_students(store: &dyn Store) -> Result<Vec<StudentResponse>, AppError> {
        let students = store.students().get_all().await?;
        let students = non_empty(students, "No students exist")?;
        Ok(students.into_iter().map(StudentResponse::from).collect())
    }

    #[instrument(skip(store))]
    pub async fn get_student(store: &dyn Store, id: i32) -> Result<StudentResponse, AppError> {
        Ok(store.students().get_by_id(id).await?.into())
    }

    #[instrument(skip(store))]
    pub async fn get_students_by_department(
        store: &dyn Store,
        department_id: i32,
    ) -> Result<Vec<StudentResponse>, AppError> {
        store.departments().get_by_id(department_id).await?;

        let students = store
            .students()
            .get_all()
            .await?
            .into_iter()
            .filter(|s| s.department_id == department_id)
            .map(StudentResponse::from)
            .collect();

        non_empty(students, "No students exist in this department")
    }

    #[instrument(skip(store, dto))]
    pub async fn update_student(
        store: &dyn Store,
        id: i32,
        dto: UpdateStudentDto,
    ) -> Result<StudentResponse, AppError> {
        let mut student = store.students().get_by_id(id).await?;

        if let Some(email) = dto.email {
            let email = email.trim().to_string();
            ensure_email_available(store, &email, Some(Account::Student(id))).await?;
            student.email = email;
        }

        if let Some(department_id) = dto.department_id {
            ensure_department_accepts_students(store, department_id).await?;
            student.department_id = department_id;
        }

        if let Some(name) = dto.name {
            student.name = name;
        }
        if let Some(dob) = dto.dob {
            student.dob = dob;
        }
        if let Some(gender) = dto.gender {
            student.gender = gender;
        }
        if let Some(mobile) = dto.mobile {
            student.mobile = mobile;
        }
        if let Some(address) = dto.address {
            student.address = address;
        }

        Ok(store.students().update(student).await?.into())
    }

    #[instrument(skip(store))]
    pub async fn delete_student(store: &dyn Store, id: i32) -> Result<StudentResponse, AppError> {
        Ok(store.students().delete(id).await?.into())
    }

    #[instrument(skip(store))]
    pub async fn top_up_wallet(
        store: &dyn Store,
        id: i32,
        dto: TopUpWalletDto,
    ) -> Result<StudentResponse, AppError> {
        if dto.amount <= 0 {
            return Err(AppError::invalid_argument(anyhow!(
                "Top-up amount must be greater than zero"
            )));
        }

        let mut student = store.students().get_by_id(id).await?;
        student.e_wallet = student
            .e_wallet
            .checked_add(dto.amount)
            .ok_or_else(|| AppError::invalid_argument(anyhow!("Top-up amount is too large")))?;

        let student = store.students().update(student).await?;
        track_wallet_top_up(dto.amount);

        Ok(student.into())
    }

    #[instrument(skip(store, dto))]
    pub async fn change_password(
        store: &dyn Store,
        id: i32,
        dto: ChangePasswordDto,
    ) -> Result<MessageResponse, AppError> {
        let mut student = store.students().get_by_id(id).await?;

        if !verify_password(&dto.current_password, &student.password_hash)? {
            return Err(AppError::unauthorized("Current password is incorrect"));
        }

        student.password_hash = hash_password(&dto.new_password)?;
        store.students().update(student).await?;

        Ok(MessageResponse::new("Password changed successfully"))
    }
}
