use bson::{doc, from_bson, Bson, Document};
use mongodb::options::{FindOneAndUpdateOptions, ReturnDocument};
use mongodb::Database;
use rocket::futures::StreamExt;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::data::filter;
use crate::resp::problem::Problem;

use super::{Instructor, INSTRUCTOR_COLLECTION_NAME};

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct InstructorPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
}

impl InstructorPatch {
    pub fn to_set_document(&self) -> Document {
        let mut set = doc! {};

        if let Some(name) = &self.name {
            set.insert("name", name.as_str());
        }
        if let Some(title) = &self.title {
            set.insert("title", title.as_str());
        }
        if let Some(email) = &self.email {
            set.insert("email", email.as_str());
        }
        if let Some(phone) = &self.phone {
            set.insert("phone", phone.as_str());
        }
        if let Some(bio) = &self.bio {
            set.insert("bio", bio.as_str());
        }
        if let Some(photo_url) = &self.photo_url {
            set.insert("photo_url", photo_url.as_str());
        }

        set
    }
}

pub trait InstructorDbExt {
    async fn list_instructors(&self) -> Result<Vec<Instructor>, Problem>;
    async fn get_instructor(&self, id: Uuid) -> Result<Option<Instructor>, Problem>;
    async fn create_instructor(&self, instructor: Instructor) -> Result<Instructor, Problem>;
    async fn update_instructor(
        &self,
        id: Uuid,
        patch: InstructorPatch,
    ) -> Result<Option<Instructor>, Problem>;
    async fn delete_instructor(&self, id: Uuid) -> Result<Option<Instructor>, Problem>;
}

impl InstructorDbExt for Database {
    async fn list_instructors(&self) -> Result<Vec<Instructor>, Problem> {
        let mut documents = self
            .collection(INSTRUCTOR_COLLECTION_NAME)
            .find(None, None)
            .await
            .map_err(Problem::from)?;

        let mut instructors: Vec<Instructor> = vec![];
        while let Some(result) = documents.next().await {
            let document = Bson::Document(result.map_err(Problem::from)?);
            match from_bson::<Instructor>(document) {
                Ok(instructor) => instructors.push(instructor),
                Err(_) => {
                    tracing::warn!("Unable to deserialize Instructor document.")
                }
            }
        }

        Ok(instructors)
    }

    async fn get_instructor(&self, id: Uuid) -> Result<Option<Instructor>, Problem> {
        self.collection(INSTRUCTOR_COLLECTION_NAME)
            .find_one(filter::by_id(id), None)
            .await
            .map_err(Problem::from)
    }

    async fn create_instructor(&self, instructor: Instructor) -> Result<Instructor, Problem> {
        self.collection(INSTRUCTOR_COLLECTION_NAME)
            .insert_one(
                bson::to_document(&instructor).expect("Instructor must be serializable to BSON"),
                None,
            )
            .await
            .map_err(Problem::from)?;

        Ok(instructor)
    }

    async fn update_instructor(
        &self,
        id: Uuid,
        patch: InstructorPatch,
    ) -> Result<Option<Instructor>, Problem> {
        let set = patch.to_set_document();
        if set.is_empty() {
            return self.get_instructor(id).await;
        }

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        self.collection(INSTRUCTOR_COLLECTION_NAME)
            .find_one_and_update(filter::by_id(id), doc! { "$set": set }, options)
            .await
            .map_err(Problem::from)
    }

    async fn delete_instructor(&self, id: Uuid) -> Result<Option<Instructor>, Problem> {
        self.collection(INSTRUCTOR_COLLECTION_NAME)
            .find_one_and_delete(filter::by_id(id), None)
            .await
            .map_err(Problem::from)
    }
}
