use mongodb::Database;
use rocket::serde::json::Json;
use rocket::State;

use crate::data::settings::db::SettingsDbExt;
use crate::resp::problem::Problem;

/// Categories are only selected through an explicit PUT; creating a course
/// with a new category never adds it here.
#[utoipa::path(
    responses(
        (status = 200, description = "Currently selected categories", body = Vec<String>),
    )
)]
#[get("/settings/selectedCategories")]
#[tracing::instrument]
pub async fn selected_categories_get(db: &State<Database>) -> Result<Json<Vec<String>>, Problem> {
    let settings = db.get_settings().await?;
    Ok(Json(settings.selected_categories))
}

#[utoipa::path(
    request_body = Vec<String>,
    responses(
        (status = 200, description = "Stored category selection", body = Vec<String>),
    )
)]
#[put(
    "/settings/selectedCategories",
    format = "application/json",
    data = "<categories>"
)]
#[tracing::instrument]
pub async fn selected_categories_put(
    categories: Json<Vec<String>>,
    db: &State<Database>,
) -> Result<Json<Vec<String>>, Problem> {
    let settings = db.put_selected_categories(categories.into_inner()).await?;
    Ok(Json(settings.selected_categories))
}
