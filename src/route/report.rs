use chrono::{DateTime, Utc};
use mongodb::Database;
use rocket::http::{ContentType, Status};
use rocket::serde::json::Json;
use rocket::State;
use uuid::Uuid;

use crate::data::course::db::CourseDbExt;
use crate::data::registration::db::ReportDbExt;
use crate::data::registration::UserType;
use crate::report::{apply_filter, build_report, to_csv, Completion, ReportFilter, ReportRow};
use crate::resp::problem::{problems, Problem};

fn parse_bound(value: Option<String>, param: &str) -> Result<Option<DateTime<Utc>>, Problem> {
    value
        .map(|v| {
            DateTime::parse_from_rfc3339(&v)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|_| {
                    Problem::new_untyped(Status::BadRequest, "Bad report date bound.")
                        .insert_str("param", param)
                        .insert_str("value", v)
                        .to_owned()
                })
        })
        .transpose()
}

async fn filtered_report(
    db: &Database,
    course_id: Uuid,
    filter: ReportFilter,
) -> Result<Vec<ReportRow>, Problem> {
    let course = db
        .get_course(course_id)
        .await?
        .ok_or_else(|| problems::not_found("Course", course_id))?;

    let registrations = db.list_registrations(course_id).await?;
    let progress = db.list_progress(course_id).await?;
    let payments = db.list_payments(course_id).await?;

    let rows = build_report(&course, &registrations, &progress, &payments, Utc::now());
    Ok(apply_filter(rows, &filter))
}

/// Progress report rows for one course, joined from registrations,
/// progress and payment records.
#[utoipa::path(
    params(
        ("course_id", description = "course ID"),
        ("from" = Option<String>, Query, description = "RFC3339 inclusive lower bound on registration date"),
        ("to" = Option<String>, Query, description = "RFC3339 inclusive upper bound on registration date"),
    ),
    responses(
        (status = 200, description = "Filtered report rows", body = Vec<ReportRow>),
        (status = 400, description = "Malformed date bound", body = Problem),
        (status = 404, description = "Queried course doesn't exist", body = Problem),
    )
)]
#[get("/reports/progress/<course_id>?<from>&<to>&<user_type>&<completion>")]
#[tracing::instrument]
pub async fn report_progress(
    course_id: Uuid,
    from: Option<String>,
    to: Option<String>,
    user_type: Option<UserType>,
    completion: Option<Completion>,
    db: &State<Database>,
) -> Result<Json<Vec<ReportRow>>, Problem> {
    let filter = ReportFilter {
        from: parse_bound(from, "from")?,
        to: parse_bound(to, "to")?,
        user_type,
        completion,
    };

    let rows = filtered_report(db, course_id, filter).await?;
    Ok(Json(rows))
}

/// Same rows as [`report_progress`] rendered as CSV; the row count always
/// matches the filtered JSON view.
#[utoipa::path(
    params(
        ("course_id", description = "course ID"),
    ),
    responses(
        (status = 200, description = "Filtered report as CSV", content_type = "text/csv"),
        (status = 404, description = "Queried course doesn't exist", body = Problem),
    )
)]
#[get("/reports/progress/<course_id>/csv?<from>&<to>&<user_type>&<completion>")]
#[tracing::instrument]
pub async fn report_progress_csv(
    course_id: Uuid,
    from: Option<String>,
    to: Option<String>,
    user_type: Option<UserType>,
    completion: Option<Completion>,
    db: &State<Database>,
) -> Result<(ContentType, String), Problem> {
    let filter = ReportFilter {
        from: parse_bound(from, "from")?,
        to: parse_bound(to, "to")?,
        user_type,
        completion,
    };

    let rows = filtered_report(db, course_id, filter).await?;
    let csv = to_csv(&rows).map_err(|_| {
        Problem::new_untyped(Status::InternalServerError, "Unable to render report CSV.")
    })?;

    Ok((ContentType::CSV, csv))
}

/// Unfiltered registrant listing with payment status per row.
#[utoipa::path(
    params(
        ("course_id", description = "course ID"),
    ),
    responses(
        (status = 200, description = "All registrants of the course", body = Vec<ReportRow>),
        (status = 404, description = "Queried course doesn't exist", body = Problem),
    )
)]
#[get("/reports/registrants/<course_id>")]
#[tracing::instrument]
pub async fn report_registrants(
    course_id: Uuid,
    db: &State<Database>,
) -> Result<Json<Vec<ReportRow>>, Problem> {
    let rows = filtered_report(db, course_id, ReportFilter::default()).await?;
    Ok(Json(rows))
}
