use mongodb::Database;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use uuid::Uuid;

use crate::data::webinar::db::{WebinarDbExt, WebinarPatch};
use crate::data::webinar::Webinar;
use crate::resp::problem::{problems, Problem};

#[utoipa::path(
    responses(
        (status = 200, description = "All stored webinars", body = Vec<Webinar>),
    )
)]
#[get("/webinars")]
#[tracing::instrument]
pub async fn webinar_list(db: &State<Database>) -> Result<Json<Vec<Webinar>>, Problem> {
    let webinars = db.list_webinars().await?;
    Ok(Json(webinars))
}

#[utoipa::path(
    params(
        ("id", description = "webinar ID")
    ),
    responses(
        (status = 200, description = "Information about the webinar", body = Webinar),
        (status = 404, description = "Queried webinar doesn't exist"),
    )
)]
#[get("/webinars/<id>")]
#[tracing::instrument]
pub async fn webinar_get(id: Uuid, db: &State<Database>) -> Result<Option<Json<Webinar>>, Problem> {
    let webinar = db.get_webinar(id).await?;
    Ok(webinar.map(Json))
}

/// Get-or-create on `meeting_id`: posting the same meeting twice returns
/// the original document with 200 instead of inserting a duplicate.
#[utoipa::path(
    request_body = Webinar,
    responses(
        (status = 201, description = "Newly stored webinar", body = Webinar),
        (status = 200, description = "Webinar already stored for this meeting id", body = Webinar),
    )
)]
#[post("/webinars", format = "application/json", data = "<webinar>")]
#[tracing::instrument]
pub async fn webinar_create(
    webinar: Json<Webinar>,
    db: &State<Database>,
) -> Result<(Status, Json<Webinar>), Problem> {
    let (webinar, created) = db.get_or_create_webinar(webinar.into_inner()).await?;

    let status = if created { Status::Created } else { Status::Ok };
    Ok((status, Json(webinar)))
}

#[utoipa::path(
    request_body = WebinarPatch,
    responses(
        (status = 200, description = "Webinar after the update", body = Webinar),
        (status = 404, description = "Queried webinar doesn't exist", body = Problem),
    )
)]
#[put("/webinars/<id>", format = "application/json", data = "<patch>")]
#[tracing::instrument]
pub async fn webinar_update(
    id: Uuid,
    patch: Json<WebinarPatch>,
    db: &State<Database>,
) -> Result<Json<Webinar>, Problem> {
    let updated = db.update_webinar(id, patch.into_inner()).await?;
    updated
        .map(Json)
        .ok_or_else(|| problems::not_found("Webinar", id))
}

#[utoipa::path(
    params(
        ("id", description = "webinar ID")
    ),
    responses(
        (status = 200, description = "Id of the removed webinar"),
        (status = 404, description = "Queried webinar doesn't exist"),
    )
)]
#[delete("/webinars/<id>")]
#[tracing::instrument]
pub async fn webinar_delete(id: Uuid, db: &State<Database>) -> Result<Option<String>, Problem> {
    let removed = db.delete_webinar(id).await?;
    Ok(removed.map(|webinar| webinar.id.to_string()))
}
