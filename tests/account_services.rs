mod common;

use common::{Campus, PASSWORD, date, jwt_config};
use registrar::modules::admin::service::AdminService;
use registrar::modules::auth::service::AuthService;
use registrar::modules::faculty::service::FacultyService;
use registrar::modules::students::service::StudentService;
use registrar::registrar_auth::{Role, verify_token};
use registrar::registrar_config::SeedAccounts;
use registrar::registrar_core::ErrorKind;
use registrar::registrar_models::auth::{LoginRequest, RegisterFacultyDto, RegisterStudentDto};
use registrar::registrar_models::faculty::UpdateFacultyDto;
use registrar::registrar_models::students::{TopUpWalletDto, UpdateStudentDto};
use registrar::registrar_models::{AccountStatus, ChangePasswordDto, FacultyRole};
use registrar_cli::seeder::seed_bootstrap_with_cost;

fn register_student_dto(email: &str, department_id: i32) -> RegisterStudentDto {
    RegisterStudentDto {
        name: "Alan Turing".to_string(),
        email: email.to_string(),
        password: PASSWORD.to_string(),
        dob: date(2003, 6, 23),
        gender: "M".to_string(),
        mobile: "5550142".to_string(),
        address: "Hall 7".to_string(),
        department_id,
    }
}

fn login(email: &str, password: &str) -> LoginRequest {
    LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    }
}

#[tokio::test]
async fn test_registered_student_must_be_activated_before_login() {
    let campus = Campus::new().await;
    let student = AuthService::register_student(
        &campus.store,
        register_student_dto("alan@uni.edu", campus.department.id),
    )
    .await
    .unwrap();
    assert_eq!(student.status, AccountStatus::Inactive);
    assert_eq!(student.e_wallet, 0);

    let err = AuthService::login(&campus.store, login("alan@uni.edu", PASSWORD), &jwt_config())
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::Unauthorized));
    assert_eq!(err.to_string(), "User not activated");

    AdminService::activate_student(&campus.store, student.id)
        .await
        .unwrap();

    let response = AuthService::login(&campus.store, login("ALAN@uni.edu", PASSWORD), &jwt_config())
        .await
        .unwrap();
    let claims = verify_token(&response.access_token, &jwt_config()).unwrap();
    assert_eq!(response.user.role, Role::Student);
    assert_eq!(claims.user_id().unwrap(), student.id);
}

#[tokio::test]
async fn test_login_rejects_unknown_email_and_wrong_password_alike() {
    let campus = Campus::new().await;

    let unknown = AuthService::login(&campus.store, login("nobody@uni.edu", PASSWORD), &jwt_config())
        .await
        .unwrap_err();
    let wrong = AuthService::login(&campus.store, login("prof@uni.edu", "not-the-password"), &jwt_config())
        .await
        .unwrap_err();

    assert!(unknown.is(ErrorKind::Unauthorized));
    assert_eq!(unknown.to_string(), wrong.to_string());
}

#[tokio::test]
async fn test_faculty_login_carries_faculty_role() {
    let campus = Campus::new().await;

    let response = AuthService::login(&campus.store, login("head@uni.edu", PASSWORD), &jwt_config())
        .await
        .unwrap();

    assert_eq!(response.user.role, Role::HeadOfDepartment);
    assert_eq!(response.token_type, "Bearer");
}

#[tokio::test]
async fn test_registration_email_is_unique_across_account_types() {
    let campus = Campus::new().await;

    let err = AuthService::register_student(
        &campus.store,
        register_student_dto("Prof@Uni.edu", campus.department.id),
    )
    .await
    .unwrap_err();

    assert!(err.is(ErrorKind::AlreadyExists));
}

#[tokio::test]
async fn test_registered_faculty_starts_as_inactive_professor() {
    let campus = Campus::new().await;

    let faculty = AuthService::register_faculty(
        &campus.store,
        RegisterFacultyDto {
            name: "Barbara Liskov".to_string(),
            email: "liskov@uni.edu".to_string(),
            password: PASSWORD.to_string(),
            dob: date(1939, 11, 7),
            gender: "F".to_string(),
            mobile: "5550177".to_string(),
            address: "Faculty Row".to_string(),
            department_id: Some(campus.department.id),
        },
    )
    .await
    .unwrap();

    assert_eq!(faculty.role, FacultyRole::Professor);
    assert_eq!(faculty.status, AccountStatus::Inactive);

    let pending = AdminService::pending_activations(&campus.store).await.unwrap();
    assert_eq!(pending.faculty.len(), 1);
    assert!(pending.students.is_empty());
}

#[tokio::test]
async fn test_students_cannot_join_the_admin_department() {
    let campus = Campus::new().await;
    let summary = seed_bootstrap_with_cost(&campus.store, &SeedAccounts::default(), 4)
        .await
        .unwrap();

    let err = AuthService::register_student(
        &campus.store,
        register_student_dto("alan@uni.edu", summary.department_id),
    )
    .await
    .unwrap_err();
    assert!(err.is(ErrorKind::BusinessRuleViolation));

    let again = seed_bootstrap_with_cost(&campus.store, &SeedAccounts::default(), 4)
        .await
        .unwrap();
    assert_eq!(again.created, 0);
    assert_eq!(again.admin_id, summary.admin_id);
}

#[tokio::test]
async fn test_activation_state_changes() {
    let campus = Campus::new().await;

    let err = AdminService::activate_student(&campus.store, campus.student.id)
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::InvalidState));

    let student = AdminService::deactivate_student(&campus.store, campus.student.id)
        .await
        .unwrap();
    assert_eq!(student.status, AccountStatus::Inactive);

    let err = AdminService::deactivate_faculty(&campus.store, campus.admin.id)
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::BusinessRuleViolation));

    let err = AdminService::activate_faculty(&campus.store, 999)
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::NotFound));
}

#[tokio::test]
async fn test_wallet_top_up() {
    let campus = Campus::new().await;

    let student = StudentService::top_up_wallet(
        &campus.store,
        campus.student.id,
        TopUpWalletDto { amount: 250 },
    )
    .await
    .unwrap();
    assert_eq!(student.e_wallet, 750);

    let err = StudentService::top_up_wallet(
        &campus.store,
        campus.student.id,
        TopUpWalletDto { amount: 0 },
    )
    .await
    .unwrap_err();
    assert!(err.is(ErrorKind::InvalidArgument));
    assert_eq!(campus.wallet(campus.student.id).await, 750);
}

#[tokio::test]
async fn test_student_password_change_requires_current_password() {
    let campus = Campus::new().await;

    let err = StudentService::change_password(
        &campus.store,
        campus.student.id,
        ChangePasswordDto {
            current_password: "guess".to_string(),
            new_password: "brand-new-secret".to_string(),
        },
    )
    .await
    .unwrap_err();
    assert!(err.is(ErrorKind::Unauthorized));

    StudentService::change_password(
        &campus.store,
        campus.student.id,
        ChangePasswordDto {
            current_password: PASSWORD.to_string(),
            new_password: "brand-new-secret".to_string(),
        },
    )
    .await
    .unwrap();

    AuthService::login(&campus.store, login("ada@uni.edu", "brand-new-secret"), &jwt_config())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_update_student_checks_email_and_department() {
    let campus = Campus::new().await;

    let err = StudentService::update_student(
        &campus.store,
        campus.student.id,
        UpdateStudentDto {
            email: Some("head@uni.edu".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(err.is(ErrorKind::AlreadyExists));

    let err = StudentService::update_student(
        &campus.store,
        campus.student.id,
        UpdateStudentDto {
            department_id: Some(999),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(err.is(ErrorKind::NotFound));

    let student = StudentService::update_student(
        &campus.store,
        campus.student.id,
        UpdateStudentDto {
            email: Some("ADA@uni.edu".to_string()),
            mobile: Some("5550000".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(student.mobile, "5550000");
}

#[tokio::test]
async fn test_head_of_department_role_is_managed_by_departments() {
    let campus = Campus::new().await;

    let err = FacultyService::update_faculty(
        &campus.store,
        campus.professor.id,
        UpdateFacultyDto {
            role: Some(FacultyRole::HeadOfDepartment),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(err.is(ErrorKind::BusinessRuleViolation));

    let err = FacultyService::delete_faculty(&campus.store, campus.head.id)
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::InvalidState));

    let promoted = FacultyService::update_faculty(
        &campus.store,
        campus.professor.id,
        UpdateFacultyDto {
            role: Some(FacultyRole::AssociateProfessor),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(promoted.role, FacultyRole::AssociateProfessor);
}

#[tokio::test]
async fn test_faculty_by_department() {
    let campus = Campus::new().await;

    let members = FacultyService::get_faculty_by_department(&campus.store, campus.department.id)
        .await
        .unwrap();

    let mut ids: Vec<i32> = members.iter().map(|f| f.id).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![campus.head.id, campus.professor.id]);
}
