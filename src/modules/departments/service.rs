use anyhow::anyhow;
use tracing::{info, instrument};

use registrar_core::AppError;
use registrar_db::Store;
use registrar_models::departments::{ChangeHeadDto, CreateDepartmentDto, RenameDepartmentDto};
use registrar_models::{Department, Faculty, FacultyRole};

use crate::modules::non_empty;

async fn ensure_name_available(
    store: &dyn Store,
    name: &str,
    except: Option<i32>,
) -> Result<(), AppError> {
    let taken = store
        .departments()
        .get_all()
        .await?
        .iter()
        .any(|d| d.name.eq_ignore_ascii_case(name) && Some(d.id) != except);

    if taken {
        return Err(AppError::already_exists(anyhow!(
            "Department with this name already exists"
        )));
    }

    Ok(())
}

fn ensure_can_head(faculty: &Faculty) -> Result<(), AppError> {
    match faculty.role {
        FacultyRole::Admin => Err(AppError::business_rule(anyhow!(
            "An admin cannot be the head of a department"
        ))),
        FacultyRole::HeadOfDepartment => Err(AppError::business_rule(anyhow!(
            "Faculty member is already the head of a department"
        ))),
        _ => Ok(()),
    }
}

pub struct DepartmentService;

impl DepartmentService {
    /// Creates the department and promotes its head, who moves into it.
    #[instrument(skip(store, dto), fields(name = %dto.name))]
    pub async fn create_department(
        store: &dyn Store,
        dto: CreateDepartmentDto,
    ) -> Result<Department, AppError> {
        let name = dto.name.trim().to_string();
        ensure_name_available(store, &name, None).await?;

        let mut head = store.faculty().get_by_id(dto.head_id).await?;
        ensure_can_head(&head)?;

        let department = store
            .departments()
            .add(Department {
                id: 0,
                name,
                head_id: head.id,
            })
            .await?;

        head.role = FacultyRole::HeadOfDepartment;
        head.department_id = Some(department.id);
        store.faculty().update(head).await?;

        info!(department_id = department.id, head_id = department.head_id, "Department created");
        Ok(department)
    }

    #[instrument(skip(store))]
    pub async fn get_departments(store: &dyn Store) -> Result<Vec<Department>, AppError> {
        non_empty(store.departments().get_all().await?, "No departments exist")
    }

    #[instrument(skip(store))]
    pub async fn get_department(store: &dyn Store, id: i32) -> Result<Department, AppError> {
        store.departments().get_by_id(id).await
    }

    #[instrument(skip(store, dto))]
    pub async fn rename_department(
        store: &dyn Store,
        id: i32,
        dto: RenameDepartmentDto,
    ) -> Result<Department, AppError> {
        let mut department = store.departments().get_by_id(id).await?;
        let name = dto.name.trim().to_string();
        ensure_name_available(store, &name, Some(id)).await?;

        department.name = name;
        store.departments().update(department).await
    }

    /// Hands the department over to one of its own faculty members. The
    /// outgoing head goes back to being a professor in the same department.
    #[instrument(skip(store))]
    pub async fn change_head(
        store: &dyn Store,
        id: i32,
        dto: ChangeHeadDto,
    ) -> Result<Department, AppError> {
        let mut department = store.departments().get_by_id(id).await?;
        let mut new_head = store.faculty().get_by_id(dto.head_id).await?;

        if new_head.id == department.head_id {
            return Err(AppError::business_rule(anyhow!(
                "Faculty member is already the head of this department"
            )));
        }
        if new_head.department_id != Some(id) {
            return Err(AppError::business_rule(anyhow!(
                "The new head must belong to the department"
            )));
        }
        ensure_can_head(&new_head)?;

        let mut outgoing = store.faculty().get_by_id(department.head_id).await?;
        outgoing.role = FacultyRole::Professor;
        store.faculty().update(outgoing).await?;

        new_head.role = FacultyRole::HeadOfDepartment;
        let new_head = store.faculty().update(new_head).await?;

        department.head_id = new_head.id;
        let department = store.departments().update(department).await?;

        info!(department_id = id, head_id = new_head.id, "Department head changed");
        Ok(department)
    }

    /// Only a department whose sole member is its head can be removed. The
    /// head is demoted and detached before the row goes.
    #[instrument(skip(store))]
    pub async fn delete_department(store: &dyn Store, id: i32) -> Result<Department, AppError> {
        let department = store.departments().get_by_id(id).await?;

        let has_students = store
            .students()
            .get_all()
            .await?
            .iter()
            .any(|s| s.department_id == id);
        if has_students {
            return Err(AppError::invalid_state(anyhow!(
                "Department still has students"
            )));
        }

        let has_other_faculty = store
            .faculty()
            .get_all()
            .await?
            .iter()
            .any(|f| f.department_id == Some(id) && f.id != department.head_id);
        if has_other_faculty {
            return Err(AppError::invalid_state(anyhow!(
                "Department still has faculty other than its head"
            )));
        }

        let mut head = store.faculty().get_by_id(department.head_id).await?;
        if head.role.is_head() {
            head.role = FacultyRole::Professor;
        }
        if head.department_id == Some(id) {
            head.department_id = None;
        }
        store.faculty().update(head).await?;

        store.departments().delete(id).await
    }
}
