use mongodb::Database;
use rocket::response::status::Created;
use rocket::serde::json::Json;
use rocket::State;
use uuid::Uuid;

use crate::data::instructor::db::{InstructorDbExt, InstructorPatch};
use crate::data::instructor::Instructor;
use crate::resp::problem::{problems, Problem};

#[utoipa::path(
    responses(
        (status = 200, description = "All instructors", body = Vec<Instructor>),
    )
)]
#[get("/instructors")]
#[tracing::instrument]
pub async fn instructor_list(db: &State<Database>) -> Result<Json<Vec<Instructor>>, Problem> {
    let instructors = db.list_instructors().await?;
    Ok(Json(instructors))
}

#[utoipa::path(
    params(
        ("id", description = "instructor ID")
    ),
    responses(
        (status = 200, description = "Information about the instructor", body = Instructor),
        (status = 404, description = "Queried instructor doesn't exist"),
    )
)]
#[get("/instructors/<id>")]
#[tracing::instrument]
pub async fn instructor_get(
    id: Uuid,
    db: &State<Database>,
) -> Result<Option<Json<Instructor>>, Problem> {
    let instructor = db.get_instructor(id).await?;
    Ok(instructor.map(Json))
}

#[utoipa::path(request_body = Instructor)]
#[post("/instructors", format = "application/json", data = "<instructor>")]
#[tracing::instrument]
pub async fn instructor_create(
    instructor: Json<Instructor>,
    db: &State<Database>,
) -> Result<Created<Json<Instructor>>, Problem> {
    let instructor = db.create_instructor(instructor.into_inner()).await?;
    let location = format!("/api/v1/instructors/{}", instructor.id);
    Ok(Created::new(location).body(Json(instructor)))
}

#[utoipa::path(
    request_body = InstructorPatch,
    responses(
        (status = 200, description = "Instructor after the update", body = Instructor),
        (status = 404, description = "Queried instructor doesn't exist", body = Problem),
    )
)]
#[put("/instructors/<id>", format = "application/json", data = "<patch>")]
#[tracing::instrument]
pub async fn instructor_update(
    id: Uuid,
    patch: Json<InstructorPatch>,
    db: &State<Database>,
) -> Result<Json<Instructor>, Problem> {
    let updated = db.update_instructor(id, patch.into_inner()).await?;
    updated
        .map(Json)
        .ok_or_else(|| problems::not_found("Instructor", id))
}

#[utoipa::path(
    params(
        ("id", description = "instructor ID")
    ),
    responses(
        (status = 200, description = "Id of the removed instructor"),
        (status = 404, description = "Queried instructor doesn't exist"),
    )
)]
#[delete("/instructors/<id>")]
#[tracing::instrument]
pub async fn instructor_delete(id: Uuid, db: &State<Database>) -> Result<Option<String>, Problem> {
    let removed = db.delete_instructor(id).await?;
    Ok(removed.map(|instructor| instructor.id.to_string()))
}
