use utoipa::ToSchema;

pub mod db;

pub static SETTINGS_COLLECTION_NAME: &str = "settings";

/// Singleton admin settings document. The empty-filter upsert in
/// [`db::SettingsDbExt`] is the only thing keeping it a singleton.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct GlobalSettings {
    #[serde(default)]
    pub selected_categories: Vec<String>,
}
