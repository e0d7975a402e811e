use anyhow::anyhow;
use tracing::instrument;

use registrar_core::{AppError, hash_password, verify_password};
use registrar_db::Store;
use registrar_models::faculty::{FacultyResponse, UpdateFacultyDto};
use registrar_models::{ChangePasswordDto, MessageResponse};

use crate::modules::auth::service::{Account, ensure_email_available};
use crate::modules::non_empty;

pub struct FacultyService;

impl FacultyService {
    #[instrument(skip(store))]
    pub async fn get_all_faculty(store: &dyn Store) -> Result<Vec<FacultyResponse>, AppError> {
        let faculty = non_empty(store.faculty().get_all().await?, "No faculty exist")?;
        Ok(faculty.into_iter().map(FacultyResponse::from).collect())
    }

    #[instrument(skip(store))]
    pub async fn get_faculty(store: &dyn Store, id: i32) -> Result<FacultyResponse, AppError> {
        Ok(store.faculty().get_by_id(id).await?.into())
    }

    #[instrument(skip(store))]
    pub async fn get_faculty_by_department(
        store: &dyn Store,
        department_id: i32,
    ) -> Result<Vec<FacultyResponse>, AppError> {
        store.departments().get_by_id(department_id).await?;

        let faculty = store
            .faculty()
            .get_all()
            .await?
            .into_iter()
            .filter(|f| f.department_id == Some(department_id))
            .map(FacultyResponse::from)
            .collect();

        non_empty(faculty, "No faculty exist in this department")
    }

    /// Partial update. The head-of-department role and a head's department
    /// are owned by the department workflows and cannot change here.
    #[instrument(skip(store, dto))]
    pub async fn update_faculty(
        store: &dyn Store,
        id: i32,
        dto: UpdateFacultyDto,
    ) -> Result<FacultyResponse, AppError> {
        let mut faculty = store.faculty().get_by_id(id).await?;

        if let Some(role) = dto.role {
            if role.is_head() != faculty.role.is_head() {
                return Err(AppError::business_rule(anyhow!(
                    "The head of department role can only be changed through the department"
                )));
            }
            faculty.role = role;
        }

        if let Some(department_id) = dto.department_id {
            if faculty.role.is_head() && faculty.department_id != Some(department_id) {
                return Err(AppError::business_rule(anyhow!(
                    "A department head cannot be moved to another department"
                )));
            }
            store.departments().get_by_id(department_id).await?;
            faculty.department_id = Some(department_id);
        }

        if let Some(email) = dto.email {
            let email = email.trim().to_string();
            ensure_email_available(store, &email, Some(Account::Faculty(id))).await?;
            faculty.email = email;
        }

        if let Some(name) = dto.name {
            faculty.name = name;
        }
        if let Some(dob) = dto.dob {
            faculty.dob = dob;
        }
        if let Some(gender) = dto.gender {
            faculty.gender = gender;
        }
        if let Some(mobile) = dto.mobile {
            faculty.mobile = mobile;
        }
        if let Some(address) = dto.address {
            faculty.address = address;
        }

        Ok(store.faculty().update(faculty).await?.into())
    }

    #[instrument(skip(store))]
    pub async fn delete_faculty(store: &dyn Store, id: i32) -> Result<FacultyResponse, AppError> {
        let faculty = store.faculty().get_by_id(id).await?;

        if faculty.role.is_head() {
            return Err(AppError::invalid_state(anyhow!(
                "A department head cannot be deleted; change the head first"
            )));
        }

        Ok(store.faculty().delete(id).await?.into())
    }

    #[instrument(skip(store, dto))]
    pub async fn change_password(
        store: &dyn Store,
        id: i32,
        dto: ChangePasswordDto,
    ) -> Result<MessageResponse, AppError> {
        let mut faculty = store.faculty().get_by_id(id).await?;

        if !verify_password(&dto.current_password, &faculty.password_hash)? {
            return Err(AppError::unauthorized("Current password is incorrect"));
        }

        faculty.password_hash = hash_password(&dto.new_password)?;
        store.faculty().update(faculty).await?;

        Ok(MessageResponse::new("Password changed successfully"))
    }
}
