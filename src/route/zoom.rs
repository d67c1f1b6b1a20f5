use rocket::serde::json::Json;
use rocket::State;
use serde_json::Value;

use crate::resp::problem::Problem;
use crate::zoom::ZoomClient;

#[utoipa::path(
    responses(
        (status = 200, description = "Zoom meeting list for the configured user"),
        (status = 502, description = "Zoom token or API call failed", body = Problem),
    )
)]
#[get("/zoom/meetings")]
#[tracing::instrument]
pub async fn zoom_meeting_list(zoom: &State<ZoomClient>) -> Result<Json<Value>, Problem> {
    let meetings = zoom.list_meetings().await?;
    Ok(Json(meetings))
}

#[utoipa::path(
    responses(
        (status = 200, description = "Zoom webinar list for the configured user"),
        (status = 502, description = "Zoom token or API call failed", body = Problem),
    )
)]
#[get("/zoom/webinars")]
#[tracing::instrument]
pub async fn zoom_webinar_list(zoom: &State<ZoomClient>) -> Result<Json<Value>, Problem> {
    let webinars = zoom.list_webinars().await?;
    Ok(Json(webinars))
}

/// Proxies the body to Zoom's meeting-creation endpoint unchanged.
#[utoipa::path(
    responses(
        (status = 200, description = "Meeting created by Zoom"),
        (status = 502, description = "Zoom token or API call failed", body = Problem),
    )
)]
#[post("/zoom/meeting", format = "application/json", data = "<body>")]
#[tracing::instrument]
pub async fn zoom_meeting_create(
    body: Json<Value>,
    zoom: &State<ZoomClient>,
) -> Result<Json<Value>, Problem> {
    let meeting = zoom.create_meeting(&body).await?;
    Ok(Json(meeting))
}

#[utoipa::path(
    responses(
        (status = 200, description = "Webinar created by Zoom"),
        (status = 502, description = "Zoom token or API call failed", body = Problem),
    )
)]
#[post("/zoom/webinar", format = "application/json", data = "<body>")]
#[tracing::instrument]
pub async fn zoom_webinar_create(
    body: Json<Value>,
    zoom: &State<ZoomClient>,
) -> Result<Json<Value>, Problem> {
    let webinar = zoom.create_webinar(&body).await?;
    Ok(Json(webinar))
}
