use rocket::http::ContentType;
use rocket::serde::json::Json;
use rocket::State;
use utoipa::ToSchema;

use crate::cert::{self, CertificateData};
use crate::cloudinary::CloudinaryClient;
use crate::data::course::CertificateKind;
use crate::resp::problem::Problem;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CertificateRequest {
    pub kind: CertificateKind,
    pub participant: String,
    pub course: String,
    /// Preformatted display date, e.g. "June 10, 2024".
    pub date: String,
}

/// Renders a certificate PDF. The background is fetched from Cloudinary and
/// the document is built fully in memory, so failures surface as a Problem
/// before any PDF bytes are sent.
#[utoipa::path(
    request_body = CertificateRequest,
    responses(
        (status = 200, description = "Rendered certificate", content_type = "application/pdf"),
        (status = 502, description = "Background image fetch failed", body = Problem),
    )
)]
#[post("/pdf", format = "application/json", data = "<request>")]
#[tracing::instrument]
pub async fn certificate_create(
    request: Json<CertificateRequest>,
    cloudinary: &State<CloudinaryClient>,
) -> Result<(ContentType, Vec<u8>), Problem> {
    let request = request.into_inner();

    let background = cloudinary
        .fetch_background(request.kind)
        .await
        .map_err(Problem::from)?;

    let data = CertificateData {
        participant: request.participant,
        course: request.course,
        date: request.date,
    };

    let pdf = cert::render_certificate(request.kind, &data, &background)?;
    Ok((ContentType::PDF, pdf))
}
