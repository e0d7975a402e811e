use chrono::NaiveDate;
use tracing::info;

use registrar_config::SeedAccounts;
use registrar_core::{AppError, DEFAULT_COST, hash_password_with_cost};
use registrar_db::Store;
use registrar_models::departments::ADMIN_DEPARTMENT;
use registrar_models::{AccountStatus, Department, Faculty, FacultyRole};

/// What [`seed_bootstrap`] found or created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapSummary {
    pub admin_id: i32,
    pub hod_id: i32,
    pub department_id: i32,
    /// Number of rows written by this run; 0 when everything already existed.
    pub created: usize,
}

pub async fn seed_bootstrap(
    store: &dyn Store,
    accounts: &SeedAccounts,
) -> Result<BootstrapSummary, AppError> {
    seed_bootstrap_with_cost(store, accounts, DEFAULT_COST).await
}

/// Same as [`seed_bootstrap`] with an explicit bcrypt cost.
pub async fn seed_bootstrap_with_cost(
    store: &dyn Store,
    accounts: &SeedAccounts,
    cost: u32,
) -> Result<BootstrapSummary, AppError> {
    let mut created = 0;
    let faculty = store.faculty().get_all().await?;

    let admin = match faculty.iter().find(|f| f.email == accounts.admin_email) {
        Some(admin) => admin.clone(),
        None => {
            created += 1;
            let admin = bootstrap_faculty(
                "Administrator",
                &accounts.admin_email,
                &accounts.admin_password,
                FacultyRole::Admin,
                cost,
            )?;
            store.faculty().add(admin).await?
        }
    };

    let mut hod = match faculty.iter().find(|f| f.email == accounts.hod_email) {
        Some(hod) => hod.clone(),
        None => {
            created += 1;
            let hod = bootstrap_faculty(
                "Head of Administration",
                &accounts.hod_email,
                &accounts.hod_password,
                FacultyRole::Professor,
                cost,
            )?;
            store.faculty().add(hod).await?
        }
    };

    let departments = store.departments().get_all().await?;
    let department = match departments.into_iter().find(Department::is_admin_department) {
        Some(department) => department,
        None => {
            created += 1;
            store
                .departments()
                .add(Department {
                    id: 0,
                    name: ADMIN_DEPARTMENT.to_string(),
                    head_id: hod.id,
                })
                .await?
        }
    };

    if department.head_id == hod.id
        && (hod.role != FacultyRole::HeadOfDepartment || hod.department_id != Some(department.id))
    {
        hod.role = FacultyRole::HeadOfDepartment;
        hod.department_id = Some(department.id);
        hod = store.faculty().update(hod).await?;
        created += 1;
    }

    if admin.department_id.is_none() {
        let mut admin = admin.clone();
        admin.department_id = Some(department.id);
        store.faculty().update(admin).await?;
        created += 1;
    }

    info!(
        admin_id = admin.id,
        hod_id = hod.id,
        department_id = department.id,
        created,
        "Bootstrap accounts ready"
    );

    Ok(BootstrapSummary {
        admin_id: admin.id,
        hod_id: hod.id,
        department_id: department.id,
        created,
    })
}

fn bootstrap_faculty(
    name: &str,
    email: &str,
    password: &str,
    role: FacultyRole,
    cost: u32,
) -> Result<Faculty, AppError> {
    Ok(Faculty {
        id: 0,
        name: name.to_string(),
        email: email.to_string(),
        dob: NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or_default(),
        gender: "unspecified".to_string(),
        mobile: "0000000000".to_string(),
        address: "Registrar office".to_string(),
        role,
        status: AccountStatus::Active,
        department_id: None,
        password_hash: hash_password_with_cost(password, cost)?,
    })
}
