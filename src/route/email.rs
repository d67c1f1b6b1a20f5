use mongodb::Database;
use rocket::response::status::Created;
use rocket::serde::json::Json;
use rocket::State;
use uuid::Uuid;

use crate::data::email::db::{EmailDbExt, EmailTemplatePatch};
use crate::data::email::EmailTemplate;
use crate::resp::problem::{problems, Problem};

#[utoipa::path(
    responses(
        (status = 200, description = "All email templates", body = Vec<EmailTemplate>),
    )
)]
#[get("/emails")]
#[tracing::instrument]
pub async fn email_list(db: &State<Database>) -> Result<Json<Vec<EmailTemplate>>, Problem> {
    let templates = db.list_email_templates().await?;
    Ok(Json(templates))
}

#[utoipa::path(
    params(
        ("id", description = "email template ID")
    ),
    responses(
        (status = 200, description = "Information about the template", body = EmailTemplate),
        (status = 404, description = "Queried template doesn't exist"),
    )
)]
#[get("/emails/<id>")]
#[tracing::instrument]
pub async fn email_get(
    id: Uuid,
    db: &State<Database>,
) -> Result<Option<Json<EmailTemplate>>, Problem> {
    let template = db.get_email_template(id).await?;
    Ok(template.map(Json))
}

#[utoipa::path(request_body = EmailTemplate)]
#[post("/emails", format = "application/json", data = "<template>")]
#[tracing::instrument]
pub async fn email_create(
    template: Json<EmailTemplate>,
    db: &State<Database>,
) -> Result<Created<Json<EmailTemplate>>, Problem> {
    let template = db.create_email_template(template.into_inner()).await?;
    let location = format!("/api/v1/emails/{}", template.id);
    Ok(Created::new(location).body(Json(template)))
}

#[utoipa::path(
    request_body = EmailTemplatePatch,
    responses(
        (status = 200, description = "Template after the update", body = EmailTemplate),
        (status = 404, description = "Queried template doesn't exist", body = Problem),
    )
)]
#[put("/emails/<id>", format = "application/json", data = "<patch>")]
#[tracing::instrument]
pub async fn email_update(
    id: Uuid,
    patch: Json<EmailTemplatePatch>,
    db: &State<Database>,
) -> Result<Json<EmailTemplate>, Problem> {
    let updated = db.update_email_template(id, patch.into_inner()).await?;
    updated
        .map(Json)
        .ok_or_else(|| problems::not_found("Email template", id))
}

#[utoipa::path(
    params(
        ("id", description = "email template ID")
    ),
    responses(
        (status = 200, description = "Id of the removed template"),
        (status = 404, description = "Queried template doesn't exist"),
    )
)]
#[delete("/emails/<id>")]
#[tracing::instrument]
pub async fn email_delete(id: Uuid, db: &State<Database>) -> Result<Option<String>, Problem> {
    let removed = db.delete_email_template(id).await?;
    Ok(removed.map(|template| template.id.to_string()))
}
