//! Fake academic data for local development.

use std::time::Instant;

use chrono::{Days, NaiveDate, NaiveTime, Utc};
use fake::Fake;
use fake::faker::address::en::StreetName;
use fake::faker::lorem::en::Sentence;
use fake::faker::name::en::{FirstName, LastName};
use tracing::info;

use registrar_core::{AppError, hash_password_with_cost};
use registrar_db::Store;
use registrar_models::{
    AccountStatus, Course, Department, Exam, Faculty, FacultyRole, Student,
};

const SUBJECTS: &[&str] = &[
    "Computer Science",
    "Mathematics",
    "Physics",
    "Chemistry",
    "Economics",
    "History",
    "Linguistics",
    "Biology",
];

#[derive(Debug, Clone)]
pub struct DemoConfig {
    pub departments: usize,
    pub faculty_per_department: usize,
    pub students_per_department: usize,
    /// Password shared by every generated account.
    pub password: String,
    pub hash_cost: u32,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            departments: 3,
            faculty_per_department: 3,
            students_per_department: 20,
            password: "password123".to_string(),
            hash_cost: registrar_core::DEFAULT_COST,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DemoSummary {
    pub departments: usize,
    pub faculty: usize,
    pub students: usize,
    pub courses: usize,
    pub exams: usize,
}

/// Generates departments, each with a head, professors teaching one course
/// (with its exam) apiece, and active students holding some wallet balance.
///
/// Department names that already exist are skipped.
pub async fn seed_demo(store: &dyn Store, config: &DemoConfig) -> Result<DemoSummary, AppError> {
    let start = Instant::now();
    let password_hash = hash_password_with_cost(&config.password, config.hash_cost)?;
    let existing: Vec<String> = store
        .departments()
        .get_all()
        .await?
        .into_iter()
        .map(|d| d.name)
        .collect();

    let mut summary = DemoSummary::default();
    let subjects = SUBJECTS
        .iter()
        .filter(|name| !existing.iter().any(|e| e == *name))
        .take(config.departments);

    for (dept_idx, subject) in subjects.enumerate() {
        let head = store
            .faculty()
            .add(fake_faculty(dept_idx, 0, &password_hash))
            .await?;
        let department = store
            .departments()
            .add(Department {
                id: 0,
                name: subject.to_string(),
                head_id: head.id,
            })
            .await?;

        let mut head = head;
        head.role = FacultyRole::HeadOfDepartment;
        head.department_id = Some(department.id);
        let head = store.faculty().update(head).await?;
        summary.departments += 1;
        summary.faculty += 1;

        let mut teachers = vec![head];
        for idx in 1..config.faculty_per_department {
            let mut member = fake_faculty(dept_idx, idx, &password_hash);
            member.department_id = Some(department.id);
            teachers.push(store.faculty().add(member).await?);
            summary.faculty += 1;
        }

        for (course_idx, teacher) in teachers.iter().enumerate() {
            let course = store
                .courses()
                .add(Course {
                    id: 0,
                    name: format!("{} {}", subject, 101 + course_idx * 100),
                    description: Sentence(4..8).fake(),
                    faculty_id: teacher.id,
                    fees: (50..300).fake::<i64>(),
                    vacancy: (10..40).fake::<i32>(),
                })
                .await?;
            summary.courses += 1;

            store
                .exams()
                .add(fake_exam(course.id, course_idx as u64))
                .await?;
            summary.exams += 1;
        }

        for idx in 0..config.students_per_department {
            store
                .students()
                .add(fake_student(dept_idx, idx, department.id, &password_hash))
                .await?;
            summary.students += 1;
        }
    }

    info!(
        departments = summary.departments,
        faculty = summary.faculty,
        students = summary.students,
        courses = summary.courses,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Demo data seeded"
    );
    Ok(summary)
}

fn fake_email(first: &str, last: &str, tag: &str, group: usize, idx: usize) -> String {
    format!(
        "{}.{}+{}{}@example.com",
        first.to_lowercase(),
        last.to_lowercase(),
        tag,
        group * 1000 + idx
    )
}

fn fake_dob(min_age: i32, max_age: i32) -> NaiveDate {
    let today = Utc::now().date_naive();
    let age_days = (min_age * 365..max_age * 365).fake::<i32>();
    today
        .checked_sub_days(Days::new(age_days.max(0) as u64))
        .unwrap_or(today)
}

fn fake_mobile() -> String {
    format!("0{}", (100_000_000..999_999_999).fake::<u32>())
}

fn fake_faculty(group: usize, idx: usize, password_hash: &str) -> Faculty {
    let first: String = FirstName().fake();
    let last: String = LastName().fake();
    let role = match idx % 3 {
        0 => FacultyRole::Professor,
        1 => FacultyRole::AssociateProfessor,
        _ => FacultyRole::AssistantProfessor,
    };

    Faculty {
        id: 0,
        email: fake_email(&first, &last, "faculty", group, idx),
        name: format!("{first} {last}"),
        dob: fake_dob(30, 65),
        gender: if idx % 2 == 0 { "F" } else { "M" }.to_string(),
        mobile: fake_mobile(),
        address: StreetName().fake(),
        role,
        status: AccountStatus::Active,
        department_id: None,
        password_hash: password_hash.to_string(),
    }
}

fn fake_student(group: usize, idx: usize, department_id: i32, password_hash: &str) -> Student {
    let first: String = FirstName().fake();
    let last: String = LastName().fake();

    Student {
        id: 0,
        email: fake_email(&first, &last, "student", group, idx),
        name: format!("{first} {last}"),
        dob: fake_dob(18, 26),
        gender: if idx % 2 == 0 { "M" } else { "F" }.to_string(),
        mobile: fake_mobile(),
        address: StreetName().fake(),
        status: AccountStatus::Active,
        department_id,
        e_wallet: (0..1000).fake::<i64>(),
        password_hash: password_hash.to_string(),
    }
}

fn fake_exam(course_id: i32, offset: u64) -> Exam {
    let today = Utc::now().date_naive();
    let start = NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default();
    let end = NaiveTime::from_hms_opt(12, 0, 0).unwrap_or_default();

    Exam {
        id: 0,
        course_id,
        total_mark: 100,
        exam_date: today.checked_add_days(Days::new(30 + offset)).unwrap_or(today),
        exam_type: "final".to_string(),
        start_time: start,
        end_time: end,
    }
}
