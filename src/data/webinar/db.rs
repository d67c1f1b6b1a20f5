use bson::{doc, from_bson, Bson, Document};
use chrono::{DateTime, Utc};
use mongodb::options::{FindOneAndUpdateOptions, ReturnDocument};
use mongodb::Database;
use rocket::futures::StreamExt;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::data::filter;
use crate::resp::problem::Problem;

use super::{ServiceType, Webinar, WEBINAR_COLLECTION_NAME};

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct WebinarPatch {
    #[serde(default)]
    pub service_type: Option<ServiceType>,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub starts_on: Option<DateTime<Utc>>,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    pub auto_record: Option<bool>,
    #[serde(default)]
    pub practice_session: Option<bool>,
    #[serde(default)]
    pub authenticated_only: Option<bool>,
}

impl WebinarPatch {
    pub fn to_set_document(&self) -> Result<Document, Problem> {
        let mut set = doc! {};

        if let Some(service_type) = &self.service_type {
            set.insert(
                "service_type",
                bson::to_bson(service_type).map_err(|_| bad_patch())?,
            );
        }
        if let Some(topic) = &self.topic {
            set.insert("topic", topic.as_str());
        }
        if let Some(starts_on) = &self.starts_on {
            set.insert("starts_on", bson::to_bson(starts_on).map_err(|_| bad_patch())?);
        }
        if let Some(duration_minutes) = self.duration_minutes {
            set.insert("duration_minutes", duration_minutes);
        }
        if let Some(auto_record) = self.auto_record {
            set.insert("auto_record", auto_record);
        }
        if let Some(practice_session) = self.practice_session {
            set.insert("practice_session", practice_session);
        }
        if let Some(authenticated_only) = self.authenticated_only {
            set.insert("authenticated_only", authenticated_only);
        }

        Ok(set)
    }
}

fn bad_patch() -> Problem {
    Problem::new_untyped(
        rocket::http::Status::BadRequest,
        "Webinar update isn't BSON serializable.",
    )
}

pub trait WebinarDbExt {
    async fn list_webinars(&self) -> Result<Vec<Webinar>, Problem>;

    async fn get_webinar(&self, id: Uuid) -> Result<Option<Webinar>, Problem>;

    /// Find-before-create on `meeting_id`. Returns the stored document and
    /// whether this call inserted it. Racy under concurrent creates for the
    /// same meeting id.
    async fn get_or_create_webinar(&self, webinar: Webinar) -> Result<(Webinar, bool), Problem>;

    async fn update_webinar(
        &self,
        id: Uuid,
        patch: WebinarPatch,
    ) -> Result<Option<Webinar>, Problem>;

    async fn delete_webinar(&self, id: Uuid) -> Result<Option<Webinar>, Problem>;
}

impl WebinarDbExt for Database {
    async fn list_webinars(&self) -> Result<Vec<Webinar>, Problem> {
        let mut documents = self
            .collection(WEBINAR_COLLECTION_NAME)
            .find(None, None)
            .await
            .map_err(Problem::from)?;

        let mut webinars: Vec<Webinar> = vec![];
        while let Some(result) = documents.next().await {
            let document = Bson::Document(result.map_err(Problem::from)?);
            match from_bson::<Webinar>(document) {
                Ok(webinar) => webinars.push(webinar),
                Err(_) => {
                    tracing::warn!("Unable to deserialize Webinar document.")
                }
            }
        }

        Ok(webinars)
    }

    async fn get_webinar(&self, id: Uuid) -> Result<Option<Webinar>, Problem> {
        self.collection(WEBINAR_COLLECTION_NAME)
            .find_one(filter::by_id(id), None)
            .await
            .map_err(Problem::from)
    }

    async fn get_or_create_webinar(&self, webinar: Webinar) -> Result<(Webinar, bool), Problem> {
        let existing: Option<Webinar> = self
            .collection(WEBINAR_COLLECTION_NAME)
            .find_one(doc! { "meeting_id": &webinar.meeting_id }, None)
            .await
            .map_err(Problem::from)?;

        if let Some(existing) = existing {
            return Ok((existing, false));
        }

        self.collection(WEBINAR_COLLECTION_NAME)
            .insert_one(
                bson::to_document(&webinar).expect("Webinar must be serializable to BSON"),
                None,
            )
            .await
            .map_err(Problem::from)?;

        Ok((webinar, true))
    }

    async fn update_webinar(
        &self,
        id: Uuid,
        patch: WebinarPatch,
    ) -> Result<Option<Webinar>, Problem> {
        let set = patch.to_set_document()?;
        if set.is_empty() {
            return self.get_webinar(id).await;
        }

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        self.collection(WEBINAR_COLLECTION_NAME)
            .find_one_and_update(filter::by_id(id), doc! { "$set": set }, options)
            .await
            .map_err(Problem::from)
    }

    async fn delete_webinar(&self, id: Uuid) -> Result<Option<Webinar>, Problem> {
        self.collection(WEBINAR_COLLECTION_NAME)
            .find_one_and_delete(filter::by_id(id), None)
            .await
            .map_err(Problem::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn webinar_patch_skips_absent_fields() {
        let patch = WebinarPatch {
            topic: Some("Updated topic".to_string()),
            auto_record: Some(true),
            ..Default::default()
        };

        let set = patch.to_set_document().unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.get_str("topic").unwrap(), "Updated topic");
        assert!(set.get_bool("auto_record").unwrap());
    }

    #[test]
    fn empty_webinar_patch_is_empty() {
        assert!(WebinarPatch::default().to_set_document().unwrap().is_empty());
    }
}
