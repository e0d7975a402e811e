#![allow(dead_code)]

use chrono::NaiveDate;

use registrar::registrar_auth::{Role, create_access_token};
use registrar::registrar_config::JwtConfig;
use registrar::registrar_core::hash_password_with_cost;
use registrar::registrar_db::{MemoryStore, Store};
use registrar::registrar_models::{
    AccountStatus, Course, Department, Exam, Faculty, FacultyRole, Student,
};

/// Cheap bcrypt cost so fixtures stay fast.
pub const TEST_COST: u32 = 4;

pub const PASSWORD: &str = "password123";

pub fn jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test-secret".to_string(),
        access_token_expiry: 3600,
    }
}

pub fn token_for(id: i32, email: &str, role: Role) -> String {
    create_access_token(id, email, role, &jwt_config()).unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn faculty(email: &str, role: FacultyRole) -> Faculty {
    Faculty {
        id: 0,
        name: "Grace Hopper".to_string(),
        email: email.to_string(),
        dob: date(1975, 2, 3),
        gender: "F".to_string(),
        mobile: "5550100".to_string(),
        address: "Faculty Row".to_string(),
        role,
        status: AccountStatus::Active,
        department_id: None,
        password_hash: hash_password_with_cost(PASSWORD, TEST_COST).unwrap(),
    }
}

pub fn student(email: &str, department_id: i32, e_wallet: i64) -> Student {
    Student {
        id: 0,
        name: "Ada Lovelace".to_string(),
        email: email.to_string(),
        dob: date(2004, 12, 10),
        gender: "F".to_string(),
        mobile: "5550199".to_string(),
        address: "Hall 3".to_string(),
        status: AccountStatus::Active,
        department_id,
        e_wallet,
        password_hash: hash_password_with_cost(PASSWORD, TEST_COST).unwrap(),
    }
}

/// A populated store: an admin, a department with its head and a second
/// professor, one active student and one course taught by the professor.
pub struct Campus {
    pub store: MemoryStore,
    pub admin: Faculty,
    pub head: Faculty,
    pub professor: Faculty,
    pub department: Department,
    pub student: Student,
    pub course: Course,
}

impl Campus {
    pub async fn new() -> Self {
        Self::with_course(100, 30).await
    }

    pub async fn with_course(fees: i64, vacancy: i32) -> Self {
        let store = MemoryStore::new();

        let admin = store
            .faculty()
            .add(faculty("admin@uni.edu", FacultyRole::Admin))
            .await
            .unwrap();
        let mut head = store
            .faculty()
            .add(faculty("head@uni.edu", FacultyRole::HeadOfDepartment))
            .await
            .unwrap();

        let department = store
            .departments()
            .add(Department {
                id: 0,
                name: "Computer Science".to_string(),
                head_id: head.id,
            })
            .await
            .unwrap();

        head.department_id = Some(department.id);
        let head = store.faculty().update(head).await.unwrap();

        let mut professor = faculty("prof@uni.edu", FacultyRole::Professor);
        professor.department_id = Some(department.id);
        let professor = store.faculty().add(professor).await.unwrap();

        let student = store
            .students()
            .add(student("ada@uni.edu", department.id, 500))
            .await
            .unwrap();

        let course = store
            .courses()
            .add(Course {
                id: 0,
                name: "Operating Systems".to_string(),
                description: "Processes and memory".to_string(),
                faculty_id: professor.id,
                fees,
                vacancy,
            })
            .await
            .unwrap();

        Self {
            store,
            admin,
            head,
            professor,
            department,
            student,
            course,
        }
    }

    pub async fn add_student(&self, email: &str, e_wallet: i64) -> Student {
        self.store
            .students()
            .add(student(email, self.department.id, e_wallet))
            .await
            .unwrap()
    }

    pub async fn add_exam(&self, total_mark: i32) -> Exam {
        self.store
            .exams()
            .add(Exam {
                id: 0,
                course_id: self.course.id,
                total_mark,
                exam_date: date(2025, 5, 20),
                exam_type: "Final".to_string(),
                start_time: chrono::NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                end_time: chrono::NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            })
            .await
            .unwrap()
    }

    pub async fn wallet(&self, student_id: i32) -> i64 {
        self.store
            .students()
            .get_by_id(student_id)
            .await
            .unwrap()
            .e_wallet
    }

    pub async fn vacancy(&self) -> i32 {
        self.store
            .courses()
            .get_by_id(self.course.id)
            .await
            .unwrap()
            .vacancy
    }
}
