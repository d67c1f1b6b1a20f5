use bson::{doc, from_bson, Bson, Document};
use mongodb::options::{FindOneAndUpdateOptions, FindOptions, ReturnDocument};
use mongodb::Database;
use rocket::futures::StreamExt;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::data::filter;
use crate::middleware::paging::PageState;
use crate::resp::problem::Problem;

use super::{
    Component, Course, Handout, Pricing, RegistrationWindow, Schedule, COURSE_COLLECTION_NAME,
};

/// Typed list filters. Raw query documents are never accepted from clients.
#[derive(Debug, Default, Clone)]
pub struct CourseListFilter {
    pub category: Option<String>,
    pub name: Option<String>,
}

impl CourseListFilter {
    pub fn to_document(&self) -> Document {
        let mut filter = doc! {};

        if let Some(category) = &self.category {
            filter.insert("categories", category);
        }
        if let Some(name) = &self.name {
            filter.insert(
                "name",
                doc! { "$regex": regex_escape(name), "$options": "i" },
            );
        }

        filter
    }
}

fn regex_escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if "\\^$.|?*+()[]{}".contains(c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Partial update; only present fields are written.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CoursePatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub schedule: Option<Schedule>,
    #[serde(default)]
    pub registration: Option<RegistrationWindow>,
    #[serde(default)]
    pub pricing: Option<Pricing>,
    #[serde(default)]
    pub categories: Option<Vec<String>>,
    #[serde(default)]
    pub students: Option<Vec<Uuid>>,
    #[serde(default)]
    pub ratings: Option<Vec<u8>>,
    #[serde(default)]
    pub handouts: Option<Vec<Handout>>,
    #[serde(default)]
    pub components: Option<Vec<Component>>,
}

#[derive(Serialize)]
struct CoursePatchSet<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    schedule: Option<&'a Schedule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    registration: Option<&'a RegistrationWindow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pricing: Option<&'a Pricing>,
    #[serde(skip_serializing_if = "Option::is_none")]
    categories: Option<&'a Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    students: Option<&'a Vec<Uuid>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ratings: Option<&'a Vec<u8>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    handouts: Option<&'a Vec<Handout>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    components: Option<&'a Vec<Component>>,
}

impl CoursePatch {
    pub fn to_set_document(&self) -> Result<Document, Problem> {
        let set = CoursePatchSet {
            name: self.name.as_ref(),
            description: self.description.as_ref(),
            schedule: self.schedule.as_ref(),
            registration: self.registration.as_ref(),
            pricing: self.pricing.as_ref(),
            categories: self.categories.as_ref(),
            students: self.students.as_ref(),
            ratings: self.ratings.as_ref(),
            handouts: self.handouts.as_ref(),
            components: self.components.as_ref(),
        };

        bson::to_document(&set).map_err(|_| {
            Problem::new_untyped(
                rocket::http::Status::BadRequest,
                "Course update isn't BSON serializable.",
            )
        })
    }
}

pub trait CourseDbExt {
    async fn list_courses(
        &self,
        filter: CourseListFilter,
        page: PageState,
    ) -> Result<Vec<Course>, Problem>;

    async fn get_course(&self, id: Uuid) -> Result<Option<Course>, Problem>;

    async fn create_course(&self, course: Course) -> Result<Course, Problem>;

    async fn update_course(&self, id: Uuid, patch: CoursePatch)
        -> Result<Option<Course>, Problem>;

    async fn delete_course(&self, id: Uuid) -> Result<Option<Course>, Problem>;

    /// Single `delete_many`; replaces per-id delete loops.
    async fn delete_courses(&self, ids: &[Uuid]) -> Result<u64, Problem>;
}

impl CourseDbExt for Database {
    async fn list_courses(
        &self,
        filter: CourseListFilter,
        page: PageState,
    ) -> Result<Vec<Course>, Problem> {
        let options = FindOptions::builder()
            .skip(page.skip())
            .limit(page.limit())
            .build();

        let mut documents = self
            .collection(COURSE_COLLECTION_NAME)
            .find(filter.to_document(), options)
            .await
            .map_err(Problem::from)?;

        let mut courses: Vec<Course> = vec![];
        while let Some(result) = documents.next().await {
            let document = Bson::Document(result.map_err(Problem::from)?);
            match from_bson::<Course>(document) {
                Ok(course) => courses.push(course),
                Err(_) => {
                    tracing::warn!("Unable to deserialize Course document.")
                }
            }
        }

        Ok(courses)
    }

    async fn get_course(&self, id: Uuid) -> Result<Option<Course>, Problem> {
        self.collection(COURSE_COLLECTION_NAME)
            .find_one(filter::by_id(id), None)
            .await
            .map_err(Problem::from)
    }

    async fn create_course(&self, course: Course) -> Result<Course, Problem> {
        self.collection(COURSE_COLLECTION_NAME)
            .insert_one(
                bson::to_document(&course).expect("Course must be serializable to BSON"),
                None,
            )
            .await
            .map_err(Problem::from)?;

        Ok(course)
    }

    async fn update_course(
        &self,
        id: Uuid,
        patch: CoursePatch,
    ) -> Result<Option<Course>, Problem> {
        let set = patch.to_set_document()?;
        if set.is_empty() {
            return self.get_course(id).await;
        }

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        self.collection(COURSE_COLLECTION_NAME)
            .find_one_and_update(filter::by_id(id), doc! { "$set": set }, options)
            .await
            .map_err(Problem::from)
    }

    async fn delete_course(&self, id: Uuid) -> Result<Option<Course>, Problem> {
        self.collection(COURSE_COLLECTION_NAME)
            .find_one_and_delete(filter::by_id(id), None)
            .await
            .map_err(Problem::from)
    }

    async fn delete_courses(&self, ids: &[Uuid]) -> Result<u64, Problem> {
        let result = self
            .collection::<Course>(COURSE_COLLECTION_NAME)
            .delete_many(filter::id_in(ids), None)
            .await
            .map_err(Problem::from)?;

        Ok(result.deleted_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_produces_empty_document() {
        let filter = CourseListFilter::default();
        assert_eq!(filter.to_document(), doc! {});
    }

    #[test]
    fn category_filter_matches_tag_array() {
        let filter = CourseListFilter {
            category: Some("safety".to_string()),
            name: None,
        };
        assert_eq!(filter.to_document(), doc! { "categories": "safety" });
    }

    #[test]
    fn name_filter_escapes_regex_metacharacters() {
        let filter = CourseListFilter {
            category: None,
            name: Some("C++ (intro)".to_string()),
        };

        let document = filter.to_document();
        let name = document.get_document("name").unwrap();
        assert_eq!(
            name.get_str("$regex").unwrap(),
            "C\\+\\+ \\(intro\\)"
        );
    }

    #[test]
    fn empty_patch_serializes_to_empty_set() {
        let set = CoursePatch::default().to_set_document().unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn patch_only_contains_present_fields() {
        let patch = CoursePatch {
            name: Some("Renamed".to_string()),
            ..Default::default()
        };

        let set = patch.to_set_document().unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.get_str("name").unwrap(), "Renamed");
    }
}
