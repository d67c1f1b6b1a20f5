use bson::{doc, from_bson, Bson, Document};
use mongodb::options::{FindOneAndUpdateOptions, ReturnDocument};
use mongodb::Database;
use rocket::futures::StreamExt;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::data::filter;
use crate::resp::problem::Problem;

use super::{EmailTemplate, EMAIL_COLLECTION_NAME};

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct EmailTemplatePatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
}

impl EmailTemplatePatch {
    pub fn to_set_document(&self) -> Document {
        let mut set = doc! {};

        if let Some(name) = &self.name {
            set.insert("name", name.as_str());
        }
        if let Some(subject) = &self.subject {
            set.insert("subject", subject.as_str());
        }
        if let Some(body) = &self.body {
            set.insert("body", body.as_str());
        }

        set
    }
}

pub trait EmailDbExt {
    async fn list_email_templates(&self) -> Result<Vec<EmailTemplate>, Problem>;
    async fn get_email_template(&self, id: Uuid) -> Result<Option<EmailTemplate>, Problem>;
    async fn create_email_template(
        &self,
        template: EmailTemplate,
    ) -> Result<EmailTemplate, Problem>;
    async fn update_email_template(
        &self,
        id: Uuid,
        patch: EmailTemplatePatch,
    ) -> Result<Option<EmailTemplate>, Problem>;
    async fn delete_email_template(&self, id: Uuid) -> Result<Option<EmailTemplate>, Problem>;
}

impl EmailDbExt for Database {
    async fn list_email_templates(&self) -> Result<Vec<EmailTemplate>, Problem> {
        let mut documents = self
            .collection(EMAIL_COLLECTION_NAME)
            .find(None, None)
            .await
            .map_err(Problem::from)?;

        let mut templates: Vec<EmailTemplate> = vec![];
        while let Some(result) = documents.next().await {
            let document = Bson::Document(result.map_err(Problem::from)?);
            match from_bson::<EmailTemplate>(document) {
                Ok(template) => templates.push(template),
                Err(_) => {
                    tracing::warn!("Unable to deserialize EmailTemplate document.")
                }
            }
        }

        Ok(templates)
    }

    async fn get_email_template(&self, id: Uuid) -> Result<Option<EmailTemplate>, Problem> {
        self.collection(EMAIL_COLLECTION_NAME)
            .find_one(filter::by_id(id), None)
            .await
            .map_err(Problem::from)
    }

    async fn create_email_template(
        &self,
        template: EmailTemplate,
    ) -> Result<EmailTemplate, Problem> {
        self.collection(EMAIL_COLLECTION_NAME)
            .insert_one(
                bson::to_document(&template)
                    .expect("EmailTemplate must be serializable to BSON"),
                None,
            )
            .await
            .map_err(Problem::from)?;

        Ok(template)
    }

    async fn update_email_template(
        &self,
        id: Uuid,
        patch: EmailTemplatePatch,
    ) -> Result<Option<EmailTemplate>, Problem> {
        let set = patch.to_set_document();
        if set.is_empty() {
            return self.get_email_template(id).await;
        }

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        self.collection(EMAIL_COLLECTION_NAME)
            .find_one_and_update(filter::by_id(id), doc! { "$set": set }, options)
            .await
            .map_err(Problem::from)
    }

    async fn delete_email_template(&self, id: Uuid) -> Result<Option<EmailTemplate>, Problem> {
        self.collection(EMAIL_COLLECTION_NAME)
            .find_one_and_delete(filter::by_id(id), None)
            .await
            .map_err(Problem::from)
    }
}
