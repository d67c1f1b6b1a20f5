use chrono::{DateTime, Utc};
use utoipa::ToSchema;

pub mod db;

pub static DRAFT_COLLECTION_NAME: &str = "drafts";

/// In-progress course form edits, keyed by an opaque session string.
/// Drafts may be partial or invalid course payloads; they are only
/// validated once submitted as an actual course.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CourseDraft {
    pub session: String,
    #[schema(value_type = Object)]
    pub course: serde_json::Value,
    #[serde(default = "Utc::now")]
    pub saved_on: DateTime<Utc>,
}
