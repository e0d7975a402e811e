use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use registrar_auth::Role;
use registrar_models::admin::PendingActivations;
use registrar_models::attendance::{
    CourseAttendancePercentage, MarkAttendanceDto, UpdateAttendanceDto,
};
use registrar_models::auth::{
    LoginRequest, LoginResponse, LoginUser, RegisterFacultyDto, RegisterStudentDto,
};
use registrar_models::courses::{CreateCourseDto, UpdateCourseDto};
use registrar_models::departments::{ChangeHeadDto, CreateDepartmentDto, RenameDepartmentDto};
use registrar_models::exams::{CreateExamDto, UpdateExamDto};
use registrar_models::faculty::{FacultyResponse, UpdateFacultyDto};
use registrar_models::grades::{CreateGradeDto, UpdateGradeDto};
use registrar_models::registrations::EnrollDto;
use registrar_models::students::{
    CreateStudentDto, StudentResponse, TopUpWalletDto, UpdateStudentDto,
};
use registrar_models::{
    AccountStatus, ApprovalStatus, AttendanceStatus, ChangePasswordDto, Course,
    CourseRegistration, Department, Exam, FacultyRole, Grade, LetterGrade, MessageResponse,
    StudentAttendance,
};

use crate::modules::auth::controller::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::register_student,
        crate::modules::auth::controller::register_faculty,
        crate::modules::admin::controller::get_pending_activations,
        crate::modules::admin::controller::activate_student,
        crate::modules::admin::controller::deactivate_student,
        crate::modules::admin::controller::activate_faculty,
        crate::modules::admin::controller::deactivate_faculty,
        crate::modules::departments::controller::create_department,
        crate::modules::departments::controller::get_departments,
        crate::modules::departments::controller::get_department,
        crate::modules::departments::controller::rename_department,
        crate::modules::departments::controller::change_head,
        crate::modules::departments::controller::delete_department,
        crate::modules::faculty::controller::get_all_faculty,
        crate::modules::faculty::controller::get_faculty,
        crate::modules::faculty::controller::get_faculty_by_department,
        crate::modules::faculty::controller::update_faculty,
        crate::modules::faculty::controller::delete_faculty,
        crate::modules::faculty::controller::change_password,
        crate::modules::students::controller::create_student,
        crate::modules::students::controller::get_students,
        crate::modules::students::controller::get_student,
        crate::modules::students::controller::get_students_by_department,
        crate::modules::students::controller::update_student,
        crate::modules::students::controller::delete_student,
        crate::modules::students::controller::top_up_wallet,
        crate::modules::students::controller::change_password,
        crate::modules::courses::controller::create_course,
        crate::modules::courses::controller::get_courses,
        crate::modules::courses::controller::get_course,
        crate::modules::courses::controller::get_courses_by_faculty,
        crate::modules::courses::controller::update_course,
        crate::modules::courses::controller::delete_course,
        crate::modules::exams::controller::create_exam,
        crate::modules::exams::controller::get_exams,
        crate::modules::exams::controller::get_exam,
        crate::modules::exams::controller::get_exam_by_course,
        crate::modules::exams::controller::update_exam,
        crate::modules::exams::controller::delete_exam,
        crate::modules::grades::controller::add_grade,
        crate::modules::grades::controller::get_all_grades,
        crate::modules::grades::controller::get_grade,
        crate::modules::grades::controller::get_grades_by_student,
        crate::modules::grades::controller::get_grades_by_exam,
        crate::modules::grades::controller::update_grade,
        crate::modules::grades::controller::delete_grade,
        crate::modules::attendance::controller::mark_attendance,
        crate::modules::attendance::controller::get_all_attendance,
        crate::modules::attendance::controller::get_attendance,
        crate::modules::attendance::controller::get_attendance_by_student,
        crate::modules::attendance::controller::get_student_attendance_percentage,
        crate::modules::attendance::controller::get_attendance_by_course,
        crate::modules::attendance::controller::update_attendance,
        crate::modules::attendance::controller::delete_attendance,
        crate::modules::registrations::controller::register_course,
        crate::modules::registrations::controller::get_all_registrations,
        crate::modules::registrations::controller::get_registration,
        crate::modules::registrations::controller::delete_registration,
        crate::modules::registrations::controller::approve_registration,
        crate::modules::registrations::controller::reject_registration,
        crate::modules::registrations::controller::get_registrations_by_student,
        crate::modules::registrations::controller::get_registrations_by_student_and_status,
        crate::modules::registrations::controller::get_registrations_by_course,
        crate::modules::registrations::controller::get_registrations_by_course_and_status,
    ),
    components(
        schemas(
            ErrorResponse,
            MessageResponse,
            Role,
            FacultyRole,
            AccountStatus,
            AttendanceStatus,
            ApprovalStatus,
            LetterGrade,
            LoginRequest,
            LoginResponse,
            LoginUser,
            RegisterStudentDto,
            RegisterFacultyDto,
            ChangePasswordDto,
            PendingActivations,
            Department,
            CreateDepartmentDto,
            RenameDepartmentDto,
            ChangeHeadDto,
            FacultyResponse,
            UpdateFacultyDto,
            StudentResponse,
            CreateStudentDto,
            UpdateStudentDto,
            TopUpWalletDto,
            Course,
            CreateCourseDto,
            UpdateCourseDto,
            Exam,
            CreateExamDto,
            UpdateExamDto,
            Grade,
            CreateGradeDto,
            UpdateGradeDto,
            StudentAttendance,
            MarkAttendanceDto,
            UpdateAttendanceDto,
            CourseAttendancePercentage,
            CourseRegistration,
            EnrollDto,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login and self-registration"),
        (name = "Admin", description = "Account activation"),
        (name = "Departments", description = "Departments and their heads"),
        (name = "Faculty", description = "Faculty members"),
        (name = "Students", description = "Students and their e-wallets"),
        (name = "Courses", description = "Courses, fees and vacancies"),
        (name = "Exams", description = "One exam per course"),
        (name = "Grades", description = "Exam grades and letter bands"),
        (name = "Attendance", description = "Daily attendance and percentages"),
        (name = "Registrations", description = "Course registrations and their review")
    ),
    info(
        title = "Registrar API",
        version = "0.1.0",
        description = "Academic records backend: departments, faculty, students, courses, exams, grades, attendance and course registrations.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
