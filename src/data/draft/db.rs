use bson::doc;
use chrono::Utc;
use mongodb::options::{FindOneAndReplaceOptions, ReturnDocument};
use mongodb::Database;

use crate::resp::problem::Problem;

use super::{CourseDraft, DRAFT_COLLECTION_NAME};

pub trait DraftDbExt {
    async fn load_draft(&self, session: &str) -> Result<Option<CourseDraft>, Problem>;

    /// Last write wins; replaces the whole draft for the session.
    async fn save_draft(
        &self,
        session: &str,
        course: serde_json::Value,
    ) -> Result<CourseDraft, Problem>;

    async fn clear_draft(&self, session: &str) -> Result<Option<CourseDraft>, Problem>;
}

impl DraftDbExt for Database {
    async fn load_draft(&self, session: &str) -> Result<Option<CourseDraft>, Problem> {
        self.collection(DRAFT_COLLECTION_NAME)
            .find_one(doc! { "session": session }, None)
            .await
            .map_err(Problem::from)
    }

    async fn save_draft(
        &self,
        session: &str,
        course: serde_json::Value,
    ) -> Result<CourseDraft, Problem> {
        let draft = CourseDraft {
            session: session.to_string(),
            course,
            saved_on: Utc::now(),
        };

        let options = FindOneAndReplaceOptions::builder()
            .upsert(true)
            .return_document(ReturnDocument::After)
            .build();

        let stored = self
            .collection::<CourseDraft>(DRAFT_COLLECTION_NAME)
            .find_one_and_replace(doc! { "session": session }, &draft, options)
            .await
            .map_err(Problem::from)?;

        Ok(stored.unwrap_or(draft))
    }

    async fn clear_draft(&self, session: &str) -> Result<Option<CourseDraft>, Problem> {
        self.collection(DRAFT_COLLECTION_NAME)
            .find_one_and_delete(doc! { "session": session }, None)
            .await
            .map_err(Problem::from)
    }
}
