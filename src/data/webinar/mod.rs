use chrono::{DateTime, Utc};
use utoipa::ToSchema;
use uuid::Uuid;

pub mod db;

pub static WEBINAR_COLLECTION_NAME: &str = "webinars";

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, ToSchema)]
pub enum ServiceType {
    Meeting,
    Webinar,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Webinar {
    #[serde(
        default = "Uuid::new_v4",
        rename = "_id",
        with = "bson::serde_helpers::uuid_1_as_binary"
    )]
    pub id: Uuid,
    pub service_type: ServiceType,
    /// External (Zoom) meeting id; deduplicated on create.
    pub meeting_id: String,
    pub topic: String,
    pub starts_on: DateTime<Utc>,
    pub duration_minutes: u32,

    #[serde(default)]
    pub auto_record: bool,
    #[serde(default)]
    pub practice_session: bool,
    #[serde(default)]
    pub authenticated_only: bool,
}
