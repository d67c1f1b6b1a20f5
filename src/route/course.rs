use mongodb::Database;
use rocket::response::status::Created;
use rocket::serde::json::Json;
use rocket::State;
use uuid::Uuid;

use crate::data::course::db::{CourseDbExt, CourseListFilter, CoursePatch};
use crate::data::course::Course;
use crate::middleware::paging::PageState;
use crate::resp::problem::{problems, Problem};

/// List courses, optionally narrowed by category tag and name substring.
#[utoipa::path(
    responses(
        (status = 200, description = "One page of courses", body = Vec<Course>),
    )
)]
#[get("/courses?<category>&<name>")]
#[tracing::instrument]
pub async fn course_list(
    category: Option<String>,
    name: Option<String>,
    page: PageState,
    db: &State<Database>,
) -> Result<Json<Vec<Course>>, Problem> {
    let filter = CourseListFilter { category, name };
    let courses = db.list_courses(filter, page).await?;
    Ok(Json(courses))
}

#[utoipa::path(
    params(
        ("id", description = "course ID")
    ),
    responses(
        (status = 200, description = "Information about the course", body = Course),
        (status = 404, description = "Queried course doesn't exist"),
    )
)]
#[get("/courses/<id>")]
#[tracing::instrument]
pub async fn course_get(id: Uuid, db: &State<Database>) -> Result<Option<Json<Course>>, Problem> {
    let course = db.get_course(id).await?;
    Ok(course.map(Json))
}

#[utoipa::path(
    request_body = Course,
    responses(
        (status = 201, description = "Created course", body = Course),
    )
)]
#[post("/courses", format = "application/json", data = "<course>")]
#[tracing::instrument]
pub async fn course_create(
    course: Json<Course>,
    db: &State<Database>,
) -> Result<Created<Json<Course>>, Problem> {
    let course = db.create_course(course.into_inner()).await?;
    let location = format!("/api/v1/courses/{}", course.id);
    Ok(Created::new(location).body(Json(course)))
}

/// Partial update; returns the post-update document.
#[utoipa::path(
    request_body = CoursePatch,
    responses(
        (status = 200, description = "Course after the update", body = Course),
        (status = 404, description = "Queried course doesn't exist", body = Problem),
    )
)]
#[put("/courses/<id>", format = "application/json", data = "<patch>")]
#[tracing::instrument]
pub async fn course_update(
    id: Uuid,
    patch: Json<CoursePatch>,
    db: &State<Database>,
) -> Result<Json<Course>, Problem> {
    let updated = db.update_course(id, patch.into_inner()).await?;
    updated.map(Json).ok_or_else(|| problems::not_found("Course", id))
}

#[utoipa::path(
    params(
        ("id", description = "course ID")
    ),
    responses(
        (status = 200, description = "Id of the removed course"),
        (status = 404, description = "Queried course doesn't exist"),
    )
)]
#[delete("/courses/<id>")]
#[tracing::instrument]
pub async fn course_delete(id: Uuid, db: &State<Database>) -> Result<Option<String>, Problem> {
    let removed = db.delete_course(id).await?;
    Ok(removed.map(|course| course.id.to_string()))
}

/// Bulk delete as a single `delete_many`. Registrations are not cascaded.
#[utoipa::path(
    request_body = Vec<Uuid>,
    responses(
        (status = 200, description = "Number of removed courses", body = u64),
    )
)]
#[delete("/courses", format = "application/json", data = "<ids>")]
#[tracing::instrument]
pub async fn course_delete_bulk(
    ids: Json<Vec<Uuid>>,
    db: &State<Database>,
) -> Result<Json<u64>, Problem> {
    let deleted = db.delete_courses(&ids).await?;
    Ok(Json(deleted))
}
