use mongodb::Database;
use rocket::serde::json::Json;
use rocket::State;
use serde_json::Value;

use crate::data::draft::db::DraftDbExt;
use crate::data::draft::CourseDraft;
use crate::resp::problem::Problem;

#[utoipa::path(
    params(
        ("session", description = "opaque editing-session key")
    ),
    responses(
        (status = 200, description = "Stored draft for the session", body = CourseDraft),
        (status = 404, description = "No draft stored for the session"),
    )
)]
#[get("/drafts/<session>")]
#[tracing::instrument]
pub async fn draft_get(
    session: &str,
    db: &State<Database>,
) -> Result<Option<Json<CourseDraft>>, Problem> {
    let draft = db.load_draft(session).await?;
    Ok(draft.map(Json))
}

/// Saves in-progress course form edits; drafts may be partial and are not
/// validated until submitted as a course. Last write wins.
#[utoipa::path(
    responses(
        (status = 200, description = "Stored draft", body = CourseDraft),
    )
)]
#[put("/drafts/<session>", format = "application/json", data = "<course>")]
#[tracing::instrument]
pub async fn draft_put(
    session: &str,
    course: Json<Value>,
    db: &State<Database>,
) -> Result<Json<CourseDraft>, Problem> {
    let draft = db.save_draft(session, course.into_inner()).await?;
    Ok(Json(draft))
}

#[utoipa::path(
    params(
        ("session", description = "opaque editing-session key")
    ),
    responses(
        (status = 200, description = "Session key of the removed draft"),
        (status = 404, description = "No draft stored for the session"),
    )
)]
#[delete("/drafts/<session>")]
#[tracing::instrument]
pub async fn draft_delete(session: &str, db: &State<Database>) -> Result<Option<String>, Problem> {
    let removed = db.clear_draft(session).await?;
    Ok(removed.map(|draft| draft.session))
}
