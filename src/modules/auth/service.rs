use anyhow::anyhow;
use tracing::instrument;

use registrar_auth::{Role, create_access_token};
use registrar_config::JwtConfig;
use registrar_core::{AppError, hash_password, verify_password};
use registrar_db::Store;
use registrar_models::auth::{
    LoginRequest, LoginResponse, LoginUser, RegisterFacultyDto, RegisterStudentDto,
};
use registrar_models::faculty::FacultyResponse;
use registrar_models::students::StudentResponse;
use registrar_models::{AccountStatus, Faculty, FacultyRole, Student};

use crate::metrics::{
    track_account_registered, track_jwt_issued, track_login_failure, track_login_success,
};
use crate::modules::students::service::ensure_department_accepts_students;

/// Account that already owns an email and may keep it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Account {
    Faculty(i32),
    Student(i32),
}

/// Emails are unique across faculty and students, ignoring ASCII case.
pub(crate) async fn ensure_email_available(
    store: &dyn Store,
    email: &str,
    owner: Option<Account>,
) -> Result<(), AppError> {
    let taken_by_faculty = store
        .faculty()
        .get_all()
        .await?
        .iter()
        .any(|f| f.email.eq_ignore_ascii_case(email) && owner != Some(Account::Faculty(f.id)));

    let taken = taken_by_faculty
        || store
            .students()
            .get_all()
            .await?
            .iter()
            .any(|s| s.email.eq_ignore_ascii_case(email) && owner != Some(Account::Student(s.id)));

    if taken {
        return Err(AppError::already_exists(anyhow!(
            "An account with this email already exists"
        )));
    }

    Ok(())
}

struct Identity {
    id: i32,
    name: String,
    email: String,
    role: Role,
    password_hash: String,
    active: bool,
}

impl From<Faculty> for Identity {
    fn from(faculty: Faculty) -> Self {
        Self {
            active: faculty.is_active(),
            id: faculty.id,
            name: faculty.name,
            email: faculty.email,
            role: faculty.role.into(),
            password_hash: faculty.password_hash,
        }
    }
}

impl From<Student> for Identity {
    fn from(student: Student) -> Self {
        Self {
            active: student.is_active(),
            id: student.id,
            name: student.name,
            email: student.email,
            role: Role::Student,
            password_hash: student.password_hash,
        }
    }
}

fn invalid_credentials() -> AppError {
    AppError::unauthorized("Invalid email or password")
}

pub struct AuthService;

impl AuthService {
    /// Looks the email up among faculty first, then students.
    async fn find_identity(store: &dyn Store, email: &str) -> Result<Option<Identity>, AppError> {
        if let Some(faculty) = store
            .faculty()
            .get_all()
            .await?
            .into_iter()
            .find(|f| f.email.eq_ignore_ascii_case(email))
        {
            return Ok(Some(faculty.into()));
        }

        Ok(store
            .students()
            .get_all()
            .await?
            .into_iter()
            .find(|s| s.email.eq_ignore_ascii_case(email))
            .map(Identity::from))
    }

    #[instrument(skip(store, dto, jwt_config), fields(email = %dto.email))]
    pub async fn login(
        store: &dyn Store,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        let Some(identity) = Self::find_identity(store, dto.email.trim()).await? else {
            track_login_failure("unknown_email");
            return Err(invalid_credentials());
        };

        if !verify_password(&dto.password, &identity.password_hash)? {
            track_login_failure("password_mismatch");
            return Err(invalid_credentials());
        }

        if !identity.active {
            track_login_failure("inactive");
            return Err(AppError::unauthorized("User not activated"));
        }

        let access_token =
            create_access_token(identity.id, &identity.email, identity.role, jwt_config)?;
        track_jwt_issued();
        track_login_success(identity.role.as_str());

        Ok(LoginResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: jwt_config.access_token_expiry,
            user: LoginUser {
                id: identity.id,
                name: identity.name,
                email: identity.email,
                role: identity.role,
            },
        })
    }

    /// Creates an inactive student account awaiting admin activation.
    #[instrument(skip(store, dto), fields(email = %dto.email))]
    pub async fn register_student(
        store: &dyn Store,
        dto: RegisterStudentDto,
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
            status: AccountStatus::Inactive,
            department_id: dto.department_id,
            e_wallet: 0,
            password_hash: hash_password(&dto.password)?,
        };

        let student = store.students().add(student).await?;
        track_account_registered(Role::Student.as_str());

        Ok(student.into())
    }

    /// Creates an inactive professor account awaiting admin activation.
    #[instrument(skip(store, dto), fields(email = %dto.email))]
    pub async fn register_faculty(
        store: &dyn Store,
        dto: RegisterFacultyDto,
    ) -> Result<FacultyResponse, AppError> {
        let email = dto.email.trim().to_string();
        ensure_email_available(store, &email, None).await?;

        if let Some(department_id) = dto.department_id {
            store.departments().get_by_id(department_id).await?;
        }

        let faculty = Faculty {
            id: 0,
            name: dto.name.trim().to_string(),
            email,
            dob: dto.dob,
            gender: dto.gender,
            mobile: dto.mobile,
            address: dto.address,
            role: FacultyRole::Professor,
            status: AccountStatus::Inactive,
            department_id: dto.department_id,
            password_hash: hash_password(&dto.password)?,
        };

        let faculty = store.faculty().add(faculty).await?;
        track_account_registered(Role::Professor.as_str());

        Ok(faculty.into())
    }
}
