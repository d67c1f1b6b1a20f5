use utoipa::ToSchema;
use uuid::Uuid;

pub mod db;

pub static EMAIL_COLLECTION_NAME: &str = "email.templates";

/// Subject/body pair used for outbound registration mail.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EmailTemplate {
    #[serde(
        default = "Uuid::new_v4",
        rename = "_id",
        with = "bson::serde_helpers::uuid_1_as_binary"
    )]
    pub id: Uuid,
    pub name: String,
    pub subject: String,
    pub body: String,
}
