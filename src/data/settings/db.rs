use bson::doc;
use mongodb::options::UpdateOptions;
use mongodb::Database;

use crate::resp::problem::Problem;

use super::{GlobalSettings, SETTINGS_COLLECTION_NAME};

pub trait SettingsDbExt {
    /// Missing document reads as defaults; nothing is written until the
    /// first `put`.
    async fn get_settings(&self) -> Result<GlobalSettings, Problem>;

    async fn put_selected_categories(
        &self,
        categories: Vec<String>,
    ) -> Result<GlobalSettings, Problem>;
}

impl SettingsDbExt for Database {
    async fn get_settings(&self) -> Result<GlobalSettings, Problem> {
        let settings: Option<GlobalSettings> = self
            .collection(SETTINGS_COLLECTION_NAME)
            .find_one(doc! {}, None)
            .await
            .map_err(Problem::from)?;

        Ok(settings.unwrap_or_default())
    }

    async fn put_selected_categories(
        &self,
        categories: Vec<String>,
    ) -> Result<GlobalSettings, Problem> {
        let options = UpdateOptions::builder().upsert(true).build();

        self.collection::<GlobalSettings>(SETTINGS_COLLECTION_NAME)
            .update_one(
                doc! {},
                doc! { "$set": { "selected_categories": categories.clone() } },
                options,
            )
            .await
            .map_err(Problem::from)?;

        Ok(GlobalSettings {
            selected_categories: categories,
        })
    }
}
