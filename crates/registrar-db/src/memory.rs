//! In-memory backend with the same constraint semantics as the PostgreSQL
//! schema. Used by the test suites and by local runs without `DATABASE_URL`.

use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use registrar_core::AppError;
use registrar_models::{
    ApprovalStatus, Course, CourseRegistration, Department, Exam, Faculty, Grade, Student,
    StudentAttendance,
};

use crate::entity::Entity;
use crate::repository::{
    Repository, already_exists, ensure_complete, missing_reference, not_found, still_referenced,
};
use crate::store::{
    Store, already_registered, insufficient_balance, insufficient_vacancy, not_pending,
};

#[derive(Debug, Clone)]
pub struct Table<E> {
    rows: BTreeMap<i32, E>,
    next_id: i32,
}

impl<E> Default for Table<E> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl<E> Table<E> {
    fn values(&self) -> impl Iterator<Item = &E> {
        self.rows.values()
    }

    fn contains(&self, id: i32) -> bool {
        self.rows.contains_key(&id)
    }
}

#[derive(Debug, Default)]
pub struct Tables {
    departments: Table<Department>,
    faculty: Table<Faculty>,
    students: Table<Student>,
    courses: Table<Course>,
    exams: Table<Exam>,
    grades: Table<Grade>,
    attendance: Table<StudentAttendance>,
    registrations: Table<CourseRegistration>,
}

/// Per-entity constraints mirrored from the schema: unique keys, foreign
/// keys on write and restrict-on-delete.
pub trait MemoryEntity: Entity {
    fn table(tables: &Tables) -> &Table<Self>;

    fn table_mut(tables: &mut Tables) -> &mut Table<Self>;

    /// Keys that no two rows may share.
    fn unique_keys(&self) -> Vec<String> {
        Vec::new()
    }

    /// Name of the first referenced row that does not exist.
    fn missing_parent(&self, _tables: &Tables) -> Option<&'static str> {
        None
    }

    fn is_referenced(_id: i32, _tables: &Tables) -> bool {
        false
    }
}

impl MemoryEntity for Department {
    fn table(tables: &Tables) -> &Table<Self> {
        &tables.departments
    }

    fn table_mut(tables: &mut Tables) -> &mut Table<Self> {
        &mut tables.departments
    }

    fn unique_keys(&self) -> Vec<String> {
        vec![format!("name:{}", self.name)]
    }

    fn missing_parent(&self, tables: &Tables) -> Option<&'static str> {
        (!tables.faculty.contains(self.head_id)).then_some("faculty")
    }

    fn is_referenced(id: i32, tables: &Tables) -> bool {
        tables.faculty.values().any(|f| f.department_id == Some(id))
            || tables.students.values().any(|s| s.department_id == id)
    }
}

impl MemoryEntity for Faculty {
    fn table(tables: &Tables) -> &Table<Self> {
        &tables.faculty
    }

    fn table_mut(tables: &mut Tables) -> &mut Table<Self> {
        &mut tables.faculty
    }

    fn unique_keys(&self) -> Vec<String> {
        vec![format!("email:{}", self.email)]
    }

    fn missing_parent(&self, tables: &Tables) -> Option<&'static str> {
        match self.department_id {
            Some(id) if !tables.departments.contains(id) => Some("department"),
            _ => None,
        }
    }

    fn is_referenced(id: i32, tables: &Tables) -> bool {
        tables.departments.values().any(|d| d.head_id == id)
            || tables.courses.values().any(|c| c.faculty_id == id)
            || tables.grades.values().any(|g| g.evaluated_by_id == id)
    }
}

impl MemoryEntity for Student {
    fn table(tables: &Tables) -> &Table<Self> {
        &tables.students
    }

    fn table_mut(tables: &mut Tables) -> &mut Table<Self> {
        &mut tables.students
    }

    fn unique_keys(&self) -> Vec<String> {
        vec![format!("email:{}", self.email)]
    }

    fn missing_parent(&self, tables: &Tables) -> Option<&'static str> {
        (!tables.departments.contains(self.department_id)).then_some("department")
    }

    fn is_referenced(id: i32, tables: &Tables) -> bool {
        tables.grades.values().any(|g| g.student_id == id)
            || tables.attendance.values().any(|a| a.student_roll_no == id)
            || tables.registrations.values().any(|r| r.student_id == id)
    }
}

impl MemoryEntity for Course {
    fn table(tables: &Tables) -> &Table<Self> {
        &tables.courses
    }

    fn table_mut(tables: &mut Tables) -> &mut Table<Self> {
        &mut tables.courses
    }

    fn missing_parent(&self, tables: &Tables) -> Option<&'static str> {
        (!tables.faculty.contains(self.faculty_id)).then_some("faculty")
    }

    fn is_referenced(id: i32, tables: &Tables) -> bool {
        tables.exams.values().any(|e| e.course_id == id)
            || tables.attendance.values().any(|a| a.course_id == id)
            || tables.registrations.values().any(|r| r.course_id == id)
    }
}

impl MemoryEntity for Exam {
    fn table(tables: &Tables) -> &Table<Self> {
        &tables.exams
    }

    fn table_mut(tables: &mut Tables) -> &mut Table<Self> {
        &mut tables.exams
    }

    fn unique_keys(&self) -> Vec<String> {
        vec![format!("course:{}", self.course_id)]
    }

    fn missing_parent(&self, tables: &Tables) -> Option<&'static str> {
        (!tables.courses.contains(self.course_id)).then_some("course")
    }

    fn is_referenced(id: i32, tables: &Tables) -> bool {
        tables.grades.values().any(|g| g.exam_id == id)
    }
}

impl MemoryEntity for Grade {
    fn table(tables: &Tables) -> &Table<Self> {
        &tables.grades
    }

    fn table_mut(tables: &mut Tables) -> &mut Table<Self> {
        &mut tables.grades
    }

    fn unique_keys(&self) -> Vec<String> {
        vec![format!("{}:{}", self.student_id, self.exam_id)]
    }

    fn missing_parent(&self, tables: &Tables) -> Option<&'static str> {
        if !tables.students.contains(self.student_id) {
            Some("student")
        } else if !tables.exams.contains(self.exam_id) {
            Some("exam")
        } else if !tables.faculty.contains(self.evaluated_by_id) {
            Some("faculty")
        } else {
            None
        }
    }
}

impl MemoryEntity for StudentAttendance {
    fn table(tables: &Tables) -> &Table<Self> {
        &tables.attendance
    }

    fn table_mut(tables: &mut Tables) -> &mut Table<Self> {
        &mut tables.attendance
    }

    fn unique_keys(&self) -> Vec<String> {
        vec![format!(
            "{}:{}:{}",
            self.student_roll_no, self.course_id, self.date
        )]
    }

    fn missing_parent(&self, tables: &Tables) -> Option<&'static str> {
        if !tables.students.contains(self.student_roll_no) {
            Some("student")
        } else if !tables.courses.contains(self.course_id) {
            Some("course")
        } else {
            None
        }
    }
}

impl MemoryEntity for CourseRegistration {
    fn table(tables: &Tables) -> &Table<Self> {
        &tables.registrations
    }

    fn table_mut(tables: &mut Tables) -> &mut Table<Self> {
        &mut tables.registrations
    }

    fn unique_keys(&self) -> Vec<String> {
        if self.is_active() {
            vec![format!("{}:{}", self.student_id, self.course_id)]
        } else {
            Vec::new()
        }
    }

    fn missing_parent(&self, tables: &Tables) -> Option<&'static str> {
        if !tables.students.contains(self.student_id) {
            Some("student")
        } else if !tables.courses.contains(self.course_id) {
            Some("course")
        } else {
            None
        }
    }
}

type SharedTables = Arc<RwLock<Tables>>;

fn read(tables: &SharedTables) -> Result<RwLockReadGuard<'_, Tables>, AppError> {
    tables
        .read()
        .map_err(|_| AppError::internal_error("In-memory store lock poisoned"))
}

fn write(tables: &SharedTables) -> Result<RwLockWriteGuard<'_, Tables>, AppError> {
    tables
        .write()
        .map_err(|_| AppError::internal_error("In-memory store lock poisoned"))
}

/// Checks every write-time constraint for `entity` against the other rows.
fn check_write<E: MemoryEntity>(entity: &E, tables: &Tables) -> Result<(), AppError> {
    ensure_complete(entity)?;

    let keys = entity.unique_keys();
    let clash = E::table(tables)
        .values()
        .filter(|other| other.id() != entity.id())
        .any(|other| other.unique_keys().iter().any(|key| keys.contains(key)));
    if clash {
        return Err(already_exists::<E>());
    }

    if let Some(parent) = entity.missing_parent(tables) {
        return Err(missing_reference::<E>(parent));
    }
    Ok(())
}

/// Generic repository viewing one table of a [`MemoryStore`].
pub struct MemoryRepository<E> {
    tables: SharedTables,
    _entity: PhantomData<fn() -> E>,
}

impl<E> MemoryRepository<E> {
    fn new(tables: SharedTables) -> Self {
        Self {
            tables,
            _entity: PhantomData,
        }
    }
}

#[async_trait]
impl<E: MemoryEntity> Repository<E> for MemoryRepository<E> {
    async fn get_all(&self) -> Result<Vec<E>, AppError> {
        let tables = read(&self.tables)?;
        Ok(E::table(&tables).values().cloned().collect())
    }

    async fn get_by_id(&self, id: i32) -> Result<E, AppError> {
        let tables = read(&self.tables)?;
        E::table(&tables)
            .rows
            .get(&id)
            .cloned()
            .ok_or_else(not_found::<E>)
    }

    async fn add(&self, mut entity: E) -> Result<E, AppError> {
        let mut tables = write(&self.tables)?;
        let id = E::table(&tables).next_id;
        entity.set_id(id);
        check_write(&entity, &tables)?;

        let table = E::table_mut(&mut tables);
        table.next_id += 1;
        table.rows.insert(id, entity.clone());
        Ok(entity)
    }

    async fn update(&self, entity: E) -> Result<E, AppError> {
        let mut tables = write(&self.tables)?;
        if !E::table(&tables).contains(entity.id()) {
            return Err(not_found::<E>());
        }
        check_write(&entity, &tables)?;

        E::table_mut(&mut tables)
            .rows
            .insert(entity.id(), entity.clone());
        Ok(entity)
    }

    async fn delete(&self, id: i32) -> Result<E, AppError> {
        let mut tables = write(&self.tables)?;
        if !E::table(&tables).contains(id) {
            return Err(not_found::<E>());
        }
        if E::is_referenced(id, &tables) {
            return Err(still_referenced::<E>());
        }

        E::table_mut(&mut tables)
            .rows
            .remove(&id)
            .ok_or_else(not_found::<E>)
    }
}

/// [`Store`] keeping every table in process memory behind one lock.
pub struct MemoryStore {
    tables: SharedTables,
    departments: MemoryRepository<Department>,
    faculty: MemoryRepository<Faculty>,
    students: MemoryRepository<Student>,
    courses: MemoryRepository<Course>,
    exams: MemoryRepository<Exam>,
    grades: MemoryRepository<Grade>,
    attendance: MemoryRepository<StudentAttendance>,
    registrations: MemoryRepository<CourseRegistration>,
}

impl MemoryStore {
    pub fn new() -> Self {
        let tables = SharedTables::default();
        Self {
            departments: MemoryRepository::new(tables.clone()),
            faculty: MemoryRepository::new(tables.clone()),
            students: MemoryRepository::new(tables.clone()),
            courses: MemoryRepository::new(tables.clone()),
            exams: MemoryRepository::new(tables.clone()),
            grades: MemoryRepository::new(tables.clone()),
            attendance: MemoryRepository::new(tables.clone()),
            registrations: MemoryRepository::new(tables.clone()),
            tables,
        }
    }

    fn finish_review(
        &self,
        id: i32,
        target: ApprovalStatus,
        comments: Option<String>,
    ) -> Result<CourseRegistration, AppError> {
        let mut tables = write(&self.tables)?;

        let mut registration = tables
            .registrations
            .rows
            .get(&id)
            .cloned()
            .ok_or_else(not_found::<CourseRegistration>)?;
        if registration.approval_status != ApprovalStatus::Pending {
            return Err(not_pending(registration.approval_status));
        }

        if target == ApprovalStatus::Rejected {
            if let Some(student) = tables.students.rows.get_mut(&registration.student_id) {
                student.e_wallet += registration.fees_paid;
            }
            if let Some(course) = tables.courses.rows.get_mut(&registration.course_id) {
                course.vacancy += 1;
            }
        }

        registration.approval_status = target;
        if comments.is_some() {
            registration.comments = comments;
        }
        tables.registrations.rows.insert(id, registration.clone());
        Ok(registration)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryStore").finish_non_exhaustive()
    }
}

#[async_trait]
impl Store for MemoryStore {
    fn departments(&self) -> &dyn Repository<Department> {
        &self.departments
    }

    fn faculty(&self) -> &dyn Repository<Faculty> {
        &self.faculty
    }

    fn students(&self) -> &dyn Repository<Student> {
        &self.students
    }

    fn courses(&self) -> &dyn Repository<Course> {
        &self.courses
    }

    fn exams(&self) -> &dyn Repository<Exam> {
        &self.exams
    }

    fn grades(&self) -> &dyn Repository<Grade> {
        &self.grades
    }

    fn attendance(&self) -> &dyn Repository<StudentAttendance> {
        &self.attendance
    }

    fn registrations(&self) -> &dyn Repository<CourseRegistration> {
        &self.registrations
    }

    async fn enroll(
        &self,
        student_id: i32,
        course_id: i32,
    ) -> Result<CourseRegistration, AppError> {
        let mut tables = write(&self.tables)?;

        let fees = tables
            .courses
            .rows
            .get(&course_id)
            .map(|c| c.fees)
            .ok_or_else(not_found::<Course>)?;
        let balance = tables
            .students
            .rows
            .get(&student_id)
            .map(|s| s.e_wallet)
            .ok_or_else(not_found::<Student>)?;

        let duplicate = tables
            .registrations
            .values()
            .any(|r| r.student_id == student_id && r.course_id == course_id && r.is_active());
        if duplicate {
            return Err(already_registered());
        }
        if tables.courses.rows.get(&course_id).is_some_and(|c| c.vacancy <= 0) {
            return Err(insufficient_vacancy());
        }
        if balance < fees {
            return Err(insufficient_balance());
        }

        if let Some(course) = tables.courses.rows.get_mut(&course_id) {
            course.vacancy -= 1;
        }
        if let Some(student) = tables.students.rows.get_mut(&student_id) {
            student.e_wallet -= fees;
        }

        let id = tables.registrations.next_id;
        tables.registrations.next_id += 1;
        let registration = CourseRegistration {
            id,
            student_id,
            course_id,
            approval_status: ApprovalStatus::Pending,
            comments: None,
            fees_paid: fees,
        };
        tables.registrations.rows.insert(id, registration.clone());
        Ok(registration)
    }

    async fn approve_registration(
        &self,
        id: i32,
        comments: Option<String>,
    ) -> Result<CourseRegistration, AppError> {
        self.finish_review(id, ApprovalStatus::Approved, comments)
    }

    async fn reject_registration(
        &self,
        id: i32,
        comments: Option<String>,
    ) -> Result<CourseRegistration, AppError> {
        self.finish_review(id, ApprovalStatus::Rejected, comments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use registrar_core::ErrorKind;
    use registrar_models::{AccountStatus, AttendanceStatus, FacultyRole, LetterGrade};

    fn faculty(email: &str) -> Faculty {
        Faculty {
            id: 0,
            name: "Grace".to_string(),
            email: email.to_string(),
            dob: NaiveDate::from_ymd_opt(1975, 2, 3).unwrap(),
            gender: "F".to_string(),
            mobile: "555".to_string(),
            address: "Campus".to_string(),
            role: FacultyRole::Professor,
            status: AccountStatus::Active,
            department_id: None,
            password_hash: "hash".to_string(),
        }
    }

    #[tokio::test]
    async fn test_ids_are_sequential() {
        let store = MemoryStore::new();
        let first = store.faculty().add(faculty("a@uni.edu")).await.unwrap();
        let second = store.faculty().add(faculty("b@uni.edu")).await.unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_unique_email() {
        let store = MemoryStore::new();
        store.faculty().add(faculty("a@uni.edu")).await.unwrap();
        let err = store.faculty().add(faculty("a@uni.edu")).await.unwrap_err();
        assert!(err.is(ErrorKind::AlreadyExists));
    }

    #[tokio::test]
    async fn test_update_may_keep_own_unique_key() {
        let store = MemoryStore::new();
        let mut saved = store.faculty().add(faculty("a@uni.edu")).await.unwrap();
        saved.name = "Grace Hopper".to_string();
        let updated = store.faculty().update(saved).await.unwrap();
        assert_eq!(updated.name, "Grace Hopper");
    }

    #[tokio::test]
    async fn test_missing_parent_is_not_found() {
        let store = MemoryStore::new();
        let department = Department {
            id: 0,
            name: "CS".to_string(),
            head_id: 99,
        };
        let err = store.departments().add(department).await.unwrap_err();
        assert!(err.is(ErrorKind::NotFound));
    }

    #[tokio::test]
    async fn test_delete_restricted_while_referenced() {
        let store = MemoryStore::new();
        let head = store.faculty().add(faculty("h@uni.edu")).await.unwrap();
        store
            .departments()
            .add(Department {
                id: 0,
                name: "CS".to_string(),
                head_id: head.id,
            })
            .await
            .unwrap();

        let err = store.faculty().delete(head.id).await.unwrap_err();
        assert!(err.is(ErrorKind::InvalidState));
        assert!(store.faculty().get_by_id(head.id).await.is_ok());
    }

    /// One row of every entity, wired together.
    struct Rows {
        head: Faculty,
        department: Department,
        student: Student,
        course: Course,
        exam: Exam,
        grade: Grade,
        attendance: StudentAttendance,
        registration: CourseRegistration,
    }

    async fn seeded(store: &MemoryStore) -> Rows {
        let head = store.faculty().add(faculty("h@uni.edu")).await.unwrap();
        let department = store
            .departments()
            .add(Department {
                id: 0,
                name: "CS".to_string(),
                head_id: head.id,
            })
            .await
            .unwrap();
        let student = store
            .students()
            .add(Student {
                id: 0,
                name: "Ada".to_string(),
                email: "ada@uni.edu".to_string(),
                dob: NaiveDate::from_ymd_opt(2004, 12, 10).unwrap(),
                gender: "F".to_string(),
                mobile: "555".to_string(),
                address: "Hall 3".to_string(),
                status: AccountStatus::Active,
                department_id: department.id,
                e_wallet: 0,
                password_hash: "hash".to_string(),
            })
            .await
            .unwrap();
        let course = store
            .courses()
            .add(Course {
                id: 0,
                name: "Compilers".to_string(),
                description: "Parsing and codegen".to_string(),
                faculty_id: head.id,
                fees: 0,
                vacancy: 10,
            })
            .await
            .unwrap();
        let exam = store
            .exams()
            .add(Exam {
                id: 0,
                course_id: course.id,
                total_mark: 100,
                exam_date: NaiveDate::from_ymd_opt(2025, 5, 20).unwrap(),
                exam_type: "Final".to_string(),
                start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                end_time: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            })
            .await
            .unwrap();
        let grade = store
            .grades()
            .add(Grade {
                id: 0,
                student_id: student.id,
                exam_id: exam.id,
                evaluated_by_id: head.id,
                marks_scored: 75.0,
                percentage: 75.0,
                letter_grade: LetterGrade::A,
                comments: None,
            })
            .await
            .unwrap();
        let attendance = store
            .attendance()
            .add(StudentAttendance {
                id: 0,
                student_roll_no: student.id,
                course_id: course.id,
                date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
                status: AttendanceStatus::Present,
            })
            .await
            .unwrap();
        let registration = store
            .registrations()
            .add(CourseRegistration {
                id: 0,
                student_id: student.id,
                course_id: course.id,
                approval_status: ApprovalStatus::Approved,
                comments: None,
                fees_paid: 0,
            })
            .await
            .unwrap();

        Rows {
            head,
            department,
            student,
            course,
            exam,
            grade,
            attendance,
            registration,
        }
    }

    async fn assert_deleted<E: Entity>(repo: &dyn Repository<E>, id: i32) {
        let removed = repo.delete(id).await.unwrap();
        assert_eq!(removed.id(), id);
        let err = repo.get_by_id(id).await.unwrap_err();
        assert!(err.is(ErrorKind::NotFound), "{} {id} still readable", E::LABEL);
    }

    async fn assert_blank_rejected<E: Entity>(repo: &dyn Repository<E>, row: &E, blank: fn(&mut E)) {
        let mut broken = row.clone();
        blank(&mut broken);

        let err = repo.add(broken.clone()).await.unwrap_err();
        assert!(err.is(ErrorKind::InvalidArgument), "{} add accepted", E::LABEL);

        let err = repo.update(broken).await.unwrap_err();
        assert!(err.is(ErrorKind::InvalidArgument), "{} update accepted", E::LABEL);
    }

    #[tokio::test]
    async fn test_every_entity_is_gone_after_delete() {
        let store = MemoryStore::new();
        let rows = seeded(&store).await;

        assert_deleted(store.registrations(), rows.registration.id).await;
        assert_deleted(store.attendance(), rows.attendance.id).await;
        assert_deleted(store.grades(), rows.grade.id).await;
        assert_deleted(store.exams(), rows.exam.id).await;
        assert_deleted(store.courses(), rows.course.id).await;
        assert_deleted(store.students(), rows.student.id).await;
        assert_deleted(store.departments(), rows.department.id).await;
        assert_deleted(store.faculty(), rows.head.id).await;
    }

    #[tokio::test]
    async fn test_blank_required_fields_are_invalid_on_add_and_update() {
        let store = MemoryStore::new();
        let rows = seeded(&store).await;

        assert_blank_rejected(store.departments(), &rows.department, |d| d.name = " ".into()).await;
        assert_blank_rejected(store.faculty(), &rows.head, |f| f.name = String::new()).await;
        assert_blank_rejected(store.faculty(), &rows.head, |f| f.email = String::new()).await;
        assert_blank_rejected(store.faculty(), &rows.head, |f| f.password_hash = String::new())
            .await;
        assert_blank_rejected(store.students(), &rows.student, |s| s.name = String::new()).await;
        assert_blank_rejected(store.students(), &rows.student, |s| s.email = "  ".into()).await;
        assert_blank_rejected(store.courses(), &rows.course, |c| c.name = String::new()).await;
        assert_blank_rejected(store.exams(), &rows.exam, |e| e.exam_type = String::new()).await;
        assert_blank_rejected(store.grades(), &rows.grade, |g| g.marks_scored = f64::NAN).await;

        // Attendance and registration rows carry only typed columns, so a
        // complete row is always accepted.
        assert_eq!(rows.attendance.missing_field(), None);
        assert_eq!(rows.registration.missing_field(), None);

        let department = store.departments().get_by_id(rows.department.id).await.unwrap();
        assert_eq!(department.name, "CS");
        let grade = store.grades().get_by_id(rows.grade.id).await.unwrap();
        assert_eq!(grade.marks_scored, 75.0);
    }
}
