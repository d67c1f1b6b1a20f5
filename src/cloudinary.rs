//! Cloudinary delivery-URL client; used for certificate backgrounds.

use std::time::Duration;

use crate::config::CloudinaryConfig;
use crate::data::course::CertificateKind;

static OUTBOUND_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug)]
pub struct CloudinaryClient {
    http: reqwest::Client,
    config: CloudinaryConfig,
}

impl CloudinaryClient {
    pub fn new(config: CloudinaryConfig) -> Result<CloudinaryClient, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(OUTBOUND_TIMEOUT)
            .build()?;

        Ok(CloudinaryClient { http, config })
    }

    pub fn background_id(&self, kind: CertificateKind) -> &str {
        match kind {
            CertificateKind::Completion => &self.config.completion_background,
            CertificateKind::Attendance => &self.config.attendance_background,
        }
    }

    pub fn image_url(&self, public_id: &str) -> String {
        format!(
            "{}/{}/image/upload/{}",
            self.config.base_url, self.config.cloud_name, public_id
        )
    }

    pub async fn fetch_background(&self, kind: CertificateKind) -> Result<Vec<u8>, reqwest::Error> {
        let url = self.image_url(self.background_id(kind));

        let response = self.http.get(url).send().await?.error_for_status()?;
        Ok(response.bytes().await?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example_client() -> CloudinaryClient {
        CloudinaryClient::new(CloudinaryConfig {
            base_url: "https://res.cloudinary.com".to_string(),
            cloud_name: "coursedesk".to_string(),
            completion_background: "certificates/completion".to_string(),
            attendance_background: "certificates/attendance".to_string(),
        })
        .expect("unable to build http client")
    }

    #[test]
    fn image_url_uses_delivery_path() {
        let client = example_client();
        assert_eq!(
            client.image_url("certificates/completion"),
            "https://res.cloudinary.com/coursedesk/image/upload/certificates/completion"
        );
    }

    #[test]
    fn background_ids_differ_per_certificate_kind() {
        let client = example_client();
        assert_ne!(
            client.background_id(CertificateKind::Completion),
            client.background_id(CertificateKind::Attendance)
        );
    }
}
