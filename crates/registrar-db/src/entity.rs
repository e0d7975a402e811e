//! Table descriptors for the generic repositories.
//!
//! [`Entity`] tells a repository where an entity lives and how its columns
//! are bound. Column order in [`Entity::COLUMNS`] must match the order of
//! the binds pushed by [`Entity::bind_columns`].

use std::fmt::Debug;

use sqlx::Postgres;
use sqlx::postgres::PgRow;
use sqlx::query_builder::Separated;

use registrar_models::{
    Course, CourseRegistration, Department, Exam, Faculty, Grade, Student, StudentAttendance,
};

pub type ColumnBinder<'qb> = Separated<'qb, 'static, Postgres, &'static str>;

pub trait Entity:
    for<'r> sqlx::FromRow<'r, PgRow> + Clone + Debug + Send + Sync + Unpin + 'static
{
    const TABLE: &'static str;
    /// Human label used in error messages ("No such student exists").
    const LABEL: &'static str;
    /// Every column except `id`.
    const COLUMNS: &'static [&'static str];

    fn id(&self) -> i32;

    fn set_id(&mut self, id: i32);

    /// First required field that is blank, if any.
    fn missing_field(&self) -> Option<&'static str>;

    fn bind_columns(&self, binder: &mut ColumnBinder<'_>);
}

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn first_blank(fields: &[(&'static str, &str)]) -> Option<&'static str> {
    fields
        .iter()
        .find(|(_, value)| blank(value))
        .map(|(name, _)| *name)
}

impl Entity for Department {
    const TABLE: &'static str = "departments";
    const LABEL: &'static str = "department";
    const COLUMNS: &'static [&'static str] = &["name", "head_id"];

    fn id(&self) -> i32 {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = id;
    }

    fn missing_field(&self) -> Option<&'static str> {
        first_blank(&[("name", self.name.as_str())])
    }

    fn bind_columns(&self, binder: &mut ColumnBinder<'_>) {
        binder.push_bind(self.name.clone()).push_bind(self.head_id);
    }
}

impl Entity for Faculty {
    const TABLE: &'static str = "faculty";
    const LABEL: &'static str = "faculty";
    const COLUMNS: &'static [&'static str] = &[
        "name",
        "email",
        "dob",
        "gender",
        "mobile",
        "address",
        "role",
        "status",
        "department_id",
        "password_hash",
    ];

    fn id(&self) -> i32 {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = id;
    }

    fn missing_field(&self) -> Option<&'static str> {
        first_blank(&[
            ("name", self.name.as_str()),
            ("email", self.email.as_str()),
            ("password", self.password_hash.as_str()),
        ])
    }

    fn bind_columns(&self, binder: &mut ColumnBinder<'_>) {
        binder
            .push_bind(self.name.clone())
            .push_bind(self.email.clone())
            .push_bind(self.dob)
            .push_bind(self.gender.clone())
            .push_bind(self.mobile.clone())
            .push_bind(self.address.clone())
            .push_bind(self.role)
            .push_bind(self.status)
            .push_bind(self.department_id)
            .push_bind(self.password_hash.clone());
    }
}

impl Entity for Student {
    const TABLE: &'static str = "students";
    const LABEL: &'static str = "student";
    const COLUMNS: &'static [&'static str] = &[
        "name",
        "email",
        "dob",
        "gender",
        "mobile",
        "address",
        "status",
        "department_id",
        "e_wallet",
        "password_hash",
    ];

    fn id(&self) -> i32 {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = id;
    }

    fn missing_field(&self) -> Option<&'static str> {
        first_blank(&[
            ("name", self.name.as_str()),
            ("email", self.email.as_str()),
            ("password", self.password_hash.as_str()),
        ])
    }

    fn bind_columns(&self, binder: &mut ColumnBinder<'_>) {
        binder
            .push_bind(self.name.clone())
            .push_bind(self.email.clone())
            .push_bind(self.dob)
            .push_bind(self.gender.clone())
            .push_bind(self.mobile.clone())
            .push_bind(self.address.clone())
            .push_bind(self.status)
            .push_bind(self.department_id)
            .push_bind(self.e_wallet)
            .push_bind(self.password_hash.clone());
    }
}

impl Entity for Course {
    const TABLE: &'static str = "courses";
    const LABEL: &'static str = "course";
    const COLUMNS: &'static [&'static str] =
        &["name", "description", "faculty_id", "fees", "vacancy"];

    fn id(&self) -> i32 {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = id;
    }

    fn missing_field(&self) -> Option<&'static str> {
        first_blank(&[("name", self.name.as_str())])
    }

    fn bind_columns(&self, binder: &mut ColumnBinder<'_>) {
        binder
            .push_bind(self.name.clone())
            .push_bind(self.description.clone())
            .push_bind(self.faculty_id)
            .push_bind(self.fees)
            .push_bind(self.vacancy);
    }
}

impl Entity for Exam {
    const TABLE: &'static str = "exams";
    const LABEL: &'static str = "exam";
    const COLUMNS: &'static [&'static str] = &[
        "course_id",
        "total_mark",
        "exam_date",
        "exam_type",
        "start_time",
        "end_time",
    ];

    fn id(&self) -> i32 {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = id;
    }

    fn missing_field(&self) -> Option<&'static str> {
        first_blank(&[("exam_type", self.exam_type.as_str())])
    }

    fn bind_columns(&self, binder: &mut ColumnBinder<'_>) {
        binder
            .push_bind(self.course_id)
            .push_bind(self.total_mark)
            .push_bind(self.exam_date)
            .push_bind(self.exam_type.clone())
            .push_bind(self.start_time)
            .push_bind(self.end_time);
    }
}

impl Entity for Grade {
    const TABLE: &'static str = "grades";
    const LABEL: &'static str = "grade record";
    const COLUMNS: &'static [&'static str] = &[
        "student_id",
        "exam_id",
        "evaluated_by_id",
        "marks_scored",
        "percentage",
        "letter_grade",
        "comments",
    ];

    fn id(&self) -> i32 {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = id;
    }

    fn missing_field(&self) -> Option<&'static str> {
        (!self.marks_scored.is_finite()).then_some("marks_scored")
    }

    fn bind_columns(&self, binder: &mut ColumnBinder<'_>) {
        binder
            .push_bind(self.student_id)
            .push_bind(self.exam_id)
            .push_bind(self.evaluated_by_id)
            .push_bind(self.marks_scored)
            .push_bind(self.percentage)
            .push_bind(self.letter_grade)
            .push_bind(self.comments.clone());
    }
}

impl Entity for StudentAttendance {
    const TABLE: &'static str = "student_attendance";
    const LABEL: &'static str = "attendance record";
    const COLUMNS: &'static [&'static str] = &["student_roll_no", "course_id", "date", "status"];

    fn id(&self) -> i32 {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = id;
    }

    fn missing_field(&self) -> Option<&'static str> {
        None
    }

    fn bind_columns(&self, binder: &mut ColumnBinder<'_>) {
        binder
            .push_bind(self.student_roll_no)
            .push_bind(self.course_id)
            .push_bind(self.date)
            .push_bind(self.status);
    }
}

impl Entity for CourseRegistration {
    const TABLE: &'static str = "course_registrations";
    const LABEL: &'static str = "course registration";
    const COLUMNS: &'static [&'static str] =
        &["student_id", "course_id", "approval_status", "comments", "fees_paid"];

    fn id(&self) -> i32 {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = id;
    }

    fn missing_field(&self) -> Option<&'static str> {
        None
    }

    fn bind_columns(&self, binder: &mut ColumnBinder<'_>) {
        binder
            .push_bind(self.student_id)
            .push_bind(self.course_id)
            .push_bind(self.approval_status)
            .push_bind(self.comments.clone())
            .push_bind(self.fees_paid);
    }
}
