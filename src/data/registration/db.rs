use bson::{doc, from_bson, Bson};
use mongodb::Database;
use rocket::futures::StreamExt;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::resp::problem::Problem;

use super::{
    Payment, Progress, Registration, PAYMENT_COLLECTION_NAME, PROGRESS_COLLECTION_NAME,
    REGISTRATION_COLLECTION_NAME,
};

async fn collect_for_course<T: DeserializeOwned>(
    db: &Database,
    collection: &str,
    course: Uuid,
) -> Result<Vec<T>, Problem> {
    let mut documents = db
        .collection(collection)
        .find(doc! { "course": course.to_string() }, None)
        .await
        .map_err(Problem::from)?;

    let mut out: Vec<T> = vec![];
    while let Some(result) = documents.next().await {
        let document = Bson::Document(result.map_err(Problem::from)?);
        match from_bson::<T>(document) {
            Ok(value) => out.push(value),
            Err(_) => {
                tracing::warn!(collection, "Unable to deserialize document.")
            }
        }
    }

    Ok(out)
}

pub trait ReportDbExt {
    async fn list_registrations(&self, course: Uuid) -> Result<Vec<Registration>, Problem>;
    async fn list_progress(&self, course: Uuid) -> Result<Vec<Progress>, Problem>;
    async fn list_payments(&self, course: Uuid) -> Result<Vec<Payment>, Problem>;
}

impl ReportDbExt for Database {
    async fn list_registrations(&self, course: Uuid) -> Result<Vec<Registration>, Problem> {
        collect_for_course(self, REGISTRATION_COLLECTION_NAME, course).await
    }

    async fn list_progress(&self, course: Uuid) -> Result<Vec<Progress>, Problem> {
        collect_for_course(self, PROGRESS_COLLECTION_NAME, course).await
    }

    async fn list_payments(&self, course: Uuid) -> Result<Vec<Payment>, Problem> {
        collect_for_course(self, PAYMENT_COLLECTION_NAME, course).await
    }
}
