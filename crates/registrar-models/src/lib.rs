//! # Registrar Models
//!
//! Domain entities and DTOs for the Registrar API.
//!
//! Entities mirror the database rows one to one (`FromRow`); closed string
//! sets are enums backed by Postgres enum types. Each module also carries the
//! request DTOs (validated with `validator`) and the response DTOs the HTTP
//! layer serialises.
//!
//! # Modules
//!
//! - [`accounts`]: Faculty roles, account status, age calculation, passwords
//! - [`departments`], [`faculty`], [`students`]: People and their departments
//! - [`courses`], [`exams`], [`grades`]: Teaching and evaluation
//! - [`attendance`]: Daily attendance records and percentages
//! - [`registrations`]: Course registrations and their approval status
//! - [`auth`]: Login and self-registration payloads
//! - [`admin`]: Account activation views

pub mod accounts;
pub mod admin;
pub mod attendance;
pub mod auth;
pub mod courses;
pub mod departments;
pub mod exams;
pub mod faculty;
pub mod grades;
pub mod registrations;
pub mod students;

// Re-export commonly used types at crate root for convenience
pub use accounts::{AccountStatus, ChangePasswordDto, FacultyRole, MessageResponse, age_on};
pub use attendance::{AttendanceStatus, StudentAttendance};
pub use courses::Course;
pub use departments::Department;
pub use exams::Exam;
pub use faculty::Faculty;
pub use grades::{Grade, LetterGrade};
pub use registrations::{ApprovalStatus, CourseRegistration};
pub use students::Student;
