use chrono::{DateTime, Utc};
use utoipa::ToSchema;
use uuid::Uuid;

pub mod db;

pub static REGISTRATION_COLLECTION_NAME: &str = "registrations";
pub static PROGRESS_COLLECTION_NAME: &str = "progress";
pub static PAYMENT_COLLECTION_NAME: &str = "payments";

#[derive(
    Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, ToSchema, FromFormField,
)]
pub enum UserType {
    Member,
    NonMember,
    Staff,
}

/// A user's enrollment in a course.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Registration {
    #[serde(
        default = "Uuid::new_v4",
        rename = "_id",
        with = "bson::serde_helpers::uuid_1_as_binary"
    )]
    pub id: Uuid,
    pub course: Uuid,
    pub user: Uuid,
    pub name: String,
    pub email: String,
    pub user_type: UserType,
    #[serde(default = "Utc::now")]
    pub registered_on: DateTime<Utc>,
}

/// Completion record; `completed` holds course component ids.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Progress {
    #[serde(
        default = "Uuid::new_v4",
        rename = "_id",
        with = "bson::serde_helpers::uuid_1_as_binary"
    )]
    pub id: Uuid,
    pub course: Uuid,
    pub user: Uuid,
    #[serde(default)]
    pub completed: Vec<Uuid>,
    #[serde(default = "Utc::now")]
    pub updated_on: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, ToSchema)]
pub enum PaymentStatus {
    Paid,
    Pending,
    Refunded,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Payment {
    #[serde(
        default = "Uuid::new_v4",
        rename = "_id",
        with = "bson::serde_helpers::uuid_1_as_binary"
    )]
    pub id: Uuid,
    pub course: Uuid,
    pub user: Uuid,
    pub amount_cents: u32,
    pub status: PaymentStatus,
    #[serde(default)]
    pub transaction_id: Option<String>,
    #[serde(default = "Utc::now")]
    pub paid_on: DateTime<Utc>,
}
