mod common;

use common::{Campus, faculty};
use registrar::modules::departments::service::DepartmentService;
use registrar::registrar_core::ErrorKind;
use registrar::registrar_db::Store;
use registrar::registrar_models::FacultyRole;
use registrar::registrar_models::departments::{
    ChangeHeadDto, CreateDepartmentDto, RenameDepartmentDto,
};

fn create_dto(name: &str, head_id: i32) -> CreateDepartmentDto {
    CreateDepartmentDto {
        name: name.to_string(),
        head_id,
    }
}

#[tokio::test]
async fn test_create_department_promotes_its_head() {
    let campus = Campus::new().await;
    let hire = campus
        .store
        .faculty()
        .add(faculty("euler@uni.edu", FacultyRole::AssociateProfessor))
        .await
        .unwrap();

    let department = DepartmentService::create_department(&campus.store, create_dto("Mathematics", hire.id))
        .await
        .unwrap();

    let head = campus.store.faculty().get_by_id(hire.id).await.unwrap();
    assert_eq!(department.head_id, hire.id);
    assert_eq!(head.role, FacultyRole::HeadOfDepartment);
    assert_eq!(head.department_id, Some(department.id));
}

#[tokio::test]
async fn test_department_names_are_unique_ignoring_case() {
    let campus = Campus::new().await;
    let hire = campus
        .store
        .faculty()
        .add(faculty("euler@uni.edu", FacultyRole::Professor))
        .await
        .unwrap();

    let err = DepartmentService::create_department(&campus.store, create_dto("computer science", hire.id))
        .await
        .unwrap_err();

    assert!(err.is(ErrorKind::AlreadyExists));
}

#[tokio::test]
async fn test_admin_or_sitting_head_cannot_head_a_new_department() {
    let campus = Campus::new().await;

    let err = DepartmentService::create_department(&campus.store, create_dto("Physics", campus.admin.id))
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::BusinessRuleViolation));

    let err = DepartmentService::create_department(&campus.store, create_dto("Physics", campus.head.id))
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::BusinessRuleViolation));
}

#[tokio::test]
async fn test_create_with_unknown_head_is_not_found() {
    let campus = Campus::new().await;

    let err = DepartmentService::create_department(&campus.store, create_dto("Physics", 999))
        .await
        .unwrap_err();

    assert!(err.is(ErrorKind::NotFound));
}

#[tokio::test]
async fn test_change_head_swaps_roles() {
    let campus = Campus::new().await;

    let department = DepartmentService::change_head(
        &campus.store,
        campus.department.id,
        ChangeHeadDto {
            head_id: campus.professor.id,
        },
    )
    .await
    .unwrap();

    let outgoing = campus.store.faculty().get_by_id(campus.head.id).await.unwrap();
    let incoming = campus.store.faculty().get_by_id(campus.professor.id).await.unwrap();
    assert_eq!(department.head_id, campus.professor.id);
    assert_eq!(outgoing.role, FacultyRole::Professor);
    assert_eq!(outgoing.department_id, Some(campus.department.id));
    assert_eq!(incoming.role, FacultyRole::HeadOfDepartment);
}

#[tokio::test]
async fn test_new_head_must_belong_to_the_department() {
    let campus = Campus::new().await;
    let outsider = campus
        .store
        .faculty()
        .add(faculty("euler@uni.edu", FacultyRole::Professor))
        .await
        .unwrap();

    let err = DepartmentService::change_head(
        &campus.store,
        campus.department.id,
        ChangeHeadDto {
            head_id: outsider.id,
        },
    )
    .await
    .unwrap_err();
    assert!(err.is(ErrorKind::BusinessRuleViolation));

    let err = DepartmentService::change_head(
        &campus.store,
        campus.department.id,
        ChangeHeadDto {
            head_id: campus.head.id,
        },
    )
    .await
    .unwrap_err();
    assert!(err.is(ErrorKind::BusinessRuleViolation));
}

#[tokio::test]
async fn test_rename_department() {
    let campus = Campus::new().await;

    let renamed = DepartmentService::rename_department(
        &campus.store,
        campus.department.id,
        RenameDepartmentDto {
            name: "  Computing  ".to_string(),
        },
    )
    .await
    .unwrap();

    assert_eq!(renamed.name, "Computing");
    assert_eq!(renamed.head_id, campus.head.id);
}

#[tokio::test]
async fn test_department_with_members_cannot_be_deleted() {
    let campus = Campus::new().await;

    let err = DepartmentService::delete_department(&campus.store, campus.department.id)
        .await
        .unwrap_err();

    assert!(err.is(ErrorKind::InvalidState));
    assert!(campus.store.departments().get_by_id(campus.department.id).await.is_ok());
}

#[tokio::test]
async fn test_delete_empty_department_releases_its_head() {
    let campus = Campus::new().await;
    let hire = campus
        .store
        .faculty()
        .add(faculty("euler@uni.edu", FacultyRole::Professor))
        .await
        .unwrap();
    let department = DepartmentService::create_department(&campus.store, create_dto("Mathematics", hire.id))
        .await
        .unwrap();

    DepartmentService::delete_department(&campus.store, department.id)
        .await
        .unwrap();

    let released = campus.store.faculty().get_by_id(hire.id).await.unwrap();
    assert_eq!(released.role, FacultyRole::Professor);
    assert_eq!(released.department_id, None);
    let err = campus.store.departments().get_by_id(department.id).await.unwrap_err();
    assert!(err.is(ErrorKind::NotFound));
}
