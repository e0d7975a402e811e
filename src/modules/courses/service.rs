use anyhow::anyhow;
use tracing::instrument;

use registrar_core::AppError;
use registrar_db::Store;
use registrar_models::Course;
use registrar_models::courses::{CreateCourseDto, UpdateCourseDto};

use crate::modules::non_empty;

async fn ensure_name_available(
    store: &dyn Store,
    name: &str,
    except: Option<i32>,
) -> Result<(), AppError> {
    let taken = store
        .courses()
        .get_all()
        .await?
        .iter()
        .any(|c| c.name.eq_ignore_ascii_case(name) && Some(c.id) != except);

    if taken {
        return Err(AppError::already_exists(anyhow!(
            "Course with this name already exists"
        )));
    }

    Ok(())
}

fn ensure_non_negative(fees: i64, vacancy: i32) -> Result<(), AppError> {
    if fees < 0 {
        return Err(AppError::invalid_argument(anyhow!(
            "Course fees cannot be negative"
        )));
    }
    if vacancy < 0 {
        return Err(AppError::invalid_argument(anyhow!(
            "Course vacancy cannot be negative"
        )));
    }
    Ok(())
}

pub struct CourseService;

impl CourseService {
    #[instrument(skip(store, dto), fields(name = %dto.name))]
    pub async fn create_course(store: &dyn Store, dto: CreateCourseDto) -> Result<Course, AppError> {
        ensure_non_negative(dto.fees, dto.vacancy)?;
        store.faculty().get_by_id(dto.faculty_id).await?;

        let name = dto.name.trim().to_string();
        ensure_name_available(store, &name, None).await?;

        store
            .courses()
            .add(Course {
                id: 0,
                name,
                description: dto.description,
                faculty_id: dto.faculty_id,
                fees: dto.fees,
                vacancy: dto.vacancy,
            })
            .await
    }

    #[instrument(skip(store))]
    pub async fn get_courses(store: &dyn Store) -> Result<Vec<Course>, AppError> {
        non_empty(store.courses().get_all().await?, "No courses exist")
    }

    #[instrument(skip(store))]
    pub async fn get_course(store: &dyn Store, id: i32) -> Result<Course, AppError> {
        store.courses().get_by_id(id).await
    }

    #[instrument(skip(store))]
    pub async fn get_courses_by_faculty(
        store: &dyn Store,
        faculty_id: i32,
    ) -> Result<Vec<Course>, AppError> {
        store.faculty().get_by_id(faculty_id).await?;

        let courses = store
            .courses()
            .get_all()
            .await?
            .into_iter()
            .filter(|c| c.faculty_id == faculty_id)
            .collect();

        non_empty(courses, "No courses exist for this faculty member")
    }

    #[instrument(skip(store, dto))]
    pub async fn update_course(
        store: &dyn Store,
        id: i32,
        dto: UpdateCourseDto,
    ) -> Result<Course, AppError> {
        let mut course = store.courses().get_by_id(id).await?;

        if let Some(name) = dto.name {
            ensure_name_available(store, &name, Some(id)).await?;
            course.name = name;
        }
        if let Some(faculty_id) = dto.faculty_id {
            store.faculty().get_by_id(faculty_id).await?;
            course.faculty_id = faculty_id;
        }
        if let Some(description) = dto.description {
            course.description = description;
        }
        if let Some(fees) = dto.fees {
            course.fees = fees;
        }
        if let Some(vacancy) = dto.vacancy {
            course.vacancy = vacancy;
        }
        ensure_non_negative(course.fees, course.vacancy)?;

        store.courses().update(course).await
    }

    #[instrument(skip(store))]
    pub async fn delete_course(store: &dyn Store, id: i32) -> Result<Course, AppError> {
        store.courses().delete(id).await
    }
}
