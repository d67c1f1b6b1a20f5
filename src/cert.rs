//! Certificate PDF rendering.
//!
//! A certificate is the kind's Cloudinary background stretched over an A4
//! landscape page with participant/course/date text overlaid at fixed,
//! kind-specific coordinates. The whole document is rendered in memory
//! before any response bytes are written.

use printpdf::image_crate::{load_from_memory, GenericImageView};
use printpdf::{BuiltinFont, Image, ImageTransform, Mm, PdfDocument};
use rocket::http::Status;
use thiserror::Error;
use utoipa::ToSchema;

use crate::data::course::CertificateKind;
use crate::resp::problem::Problem;

const PAGE_WIDTH_MM: f32 = 297.0;
const PAGE_HEIGHT_MM: f32 = 210.0;

// printpdf places raster images at 300 dpi unless told otherwise.
const DEFAULT_DPI: f32 = 300.0;
const MM_PER_INCH: f32 = 25.4;

#[derive(Debug, Error)]
pub enum CertificateError {
    #[error("background image isn't decodable")]
    Image(#[from] printpdf::image_crate::ImageError),
    #[error(transparent)]
    Pdf(#[from] printpdf::Error),
}

impl From<CertificateError> for Problem {
    fn from(e: CertificateError) -> Self {
        Problem::new_untyped(
            Status::InternalServerError,
            "Unable to render certificate PDF.",
        )
        .detail(e)
        .to_owned()
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CertificateData {
    pub participant: String,
    pub course: String,
    /// Preformatted display date, e.g. "June 10, 2024".
    pub date: String,
}

struct TextPlacement {
    /// (x, y, font size in pt); y measured from the bottom of the page.
    participant: (f32, f32, f32),
    course: (f32, f32, f32),
    date: (f32, f32, f32),
}

fn placement(kind: CertificateKind) -> TextPlacement {
    match kind {
        CertificateKind::Completion => TextPlacement {
            participant: (90.0, 120.0, 32.0),
            course: (90.0, 95.0, 20.0),
            date: (90.0, 60.0, 14.0),
        },
        CertificateKind::Attendance => TextPlacement {
            participant: (90.0, 110.0, 28.0),
            course: (90.0, 88.0, 18.0),
            date: (215.0, 40.0, 12.0),
        },
    }
}

pub fn render_certificate(
    kind: CertificateKind,
    data: &CertificateData,
    background: &[u8],
) -> Result<Vec<u8>, CertificateError> {
    let (doc, page, layer) = PdfDocument::new(
        "Certificate",
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "background",
    );
    let background_layer = doc.get_page(page).get_layer(layer);

    let decoded = load_from_memory(background)?;
    let (px_width, px_height) = decoded.dimensions();
    let image = Image::from_dynamic_image(&decoded);

    // Stretch the background to cover the full page.
    let natural_width_mm = px_width as f32 * MM_PER_INCH / DEFAULT_DPI;
    let natural_height_mm = px_height as f32 * MM_PER_INCH / DEFAULT_DPI;
    image.add_to_layer(
        background_layer,
        ImageTransform {
            scale_x: Some(PAGE_WIDTH_MM / natural_width_mm),
            scale_y: Some(PAGE_HEIGHT_MM / natural_height_mm),
            ..Default::default()
        },
    );

    let text_layer = doc.get_page(page).add_layer("text");
    let font = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;
    let detail_font = doc.add_builtin_font(BuiltinFont::Helvetica)?;

    let at = placement(kind);
    text_layer.use_text(
        &data.participant,
        at.participant.2,
        Mm(at.participant.0),
        Mm(at.participant.1),
        &font,
    );
    text_layer.use_text(
        &data.course,
        at.course.2,
        Mm(at.course.0),
        Mm(at.course.1),
        &detail_font,
    );
    text_layer.use_text(
        &data.date,
        at.date.2,
        Mm(at.date.0),
        Mm(at.date.1),
        &detail_font,
    );

    Ok(doc.save_to_bytes()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use printpdf::image_crate::{DynamicImage, ImageOutputFormat};
    use std::io::Cursor;

    fn example_background() -> Vec<u8> {
        let image = DynamicImage::new_rgb8(8, 8);
        let mut bytes = vec![];
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)
            .expect("unable to encode test background");
        bytes
    }

    fn example_data() -> CertificateData {
        CertificateData {
            participant: "Jamie Doe".to_string(),
            course: "Safety Webinar Series".to_string(),
            date: "June 10, 2024".to_string(),
        }
    }

    #[test]
    fn rendered_certificate_is_a_pdf() {
        let bytes =
            render_certificate(CertificateKind::Completion, &example_data(), &example_background())
                .expect("rendering failed");
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn both_kinds_render_with_distinct_layouts() {
        let completion = render_certificate(
            CertificateKind::Completion,
            &example_data(),
            &example_background(),
        )
        .expect("rendering failed");
        let attendance = render_certificate(
            CertificateKind::Attendance,
            &example_data(),
            &example_background(),
        )
        .expect("rendering failed");

        assert!(attendance.starts_with(b"%PDF"));
        assert_ne!(completion, attendance);
    }

    #[test]
    fn garbage_background_is_an_image_error() {
        let result = render_certificate(
            CertificateKind::Completion,
            &example_data(),
            b"not an image",
        );
        assert!(matches!(result, Err(CertificateError::Image(_))));
    }
}
