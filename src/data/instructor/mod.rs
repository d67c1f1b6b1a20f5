use utoipa::ToSchema;
use uuid::Uuid;

pub mod db;

pub static INSTRUCTOR_COLLECTION_NAME: &str = "instructors";

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Instructor {
    #[serde(
        default = "Uuid::new_v4",
        rename = "_id",
        with = "bson::serde_helpers::uuid_1_as_binary"
    )]
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub title: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub photo_url: Option<String>,
}
