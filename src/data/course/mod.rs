use chrono::{DateTime, Utc};
use utoipa::ToSchema;
use uuid::Uuid;

pub mod db;

pub static COURSE_COLLECTION_NAME: &str = "courses";

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Schedule {
    pub starts_on: DateTime<Utc>,
    pub ends_on: DateTime<Utc>,
    pub length_minutes: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegistrationWindow {
    pub opens_on: DateTime<Utc>,
    pub closes_on: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Pricing {
    pub list_cents: u32,
    #[serde(default)]
    pub member_cents: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Handout {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, ToSchema)]
pub enum CertificateKind {
    Completion,
    Attendance,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind")]
pub enum ComponentKind {
    Webinar { webinar: Uuid },
    Survey { url: String },
    Certificate { certificate: CertificateKind },
}

/// A deliverable attached to a course. Progress records reference
/// components by their id.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Component {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(flatten)]
    pub kind: ComponentKind,
}

/// Where a course sits relative to its schedule and registration window.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, ToSchema)]
pub enum CourseStatus {
    Ongoing,
    OpenRegistration,
    ClosedRegistration,
    Storage,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Course {
    #[serde(
        default = "Uuid::new_v4",
        rename = "_id",
        with = "bson::serde_helpers::uuid_1_as_binary"
    )]
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,

    pub schedule: Schedule,
    pub registration: RegistrationWindow,
    pub pricing: Pricing,

    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub students: Vec<Uuid>,
    /// Ratings are 1..=5 stars.
    #[serde(default)]
    pub ratings: Vec<u8>,
    #[serde(default)]
    pub handouts: Vec<Handout>,
    #[serde(default)]
    pub components: Vec<Component>,
}

impl Course {
    /// Average star rating rounded to two decimals, `None` when unrated.
    pub fn average_rating(&self) -> Option<f64> {
        if self.ratings.is_empty() {
            return None;
        }

        let sum: u32 = self.ratings.iter().map(|r| u32::from(*r)).sum();
        let avg = sum as f64 / self.ratings.len() as f64;
        Some((avg * 100.0).round() / 100.0)
    }

    /// Status shown in catalog/report views.
    ///
    /// Storage once the class has ended, Ongoing while it runs, otherwise
    /// open or closed depending on the registration window.
    pub fn status_at(&self, now: DateTime<Utc>) -> CourseStatus {
        if now >= self.schedule.ends_on {
            return CourseStatus::Storage;
        }
        if now >= self.schedule.starts_on {
            return CourseStatus::Ongoing;
        }
        if now >= self.registration.opens_on && now < self.registration.closes_on {
            return CourseStatus::OpenRegistration;
        }
        CourseStatus::ClosedRegistration
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn example_course() -> Course {
        Course {
            id: Uuid::new_v4(),
            name: "Safety Webinar Series".to_string(),
            description: String::new(),
            schedule: Schedule {
                starts_on: Utc.with_ymd_and_hms(2024, 6, 10, 16, 0, 0).unwrap(),
                ends_on: Utc.with_ymd_and_hms(2024, 6, 10, 18, 0, 0).unwrap(),
                length_minutes: 120,
            },
            registration: RegistrationWindow {
                opens_on: Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap(),
                closes_on: Utc.with_ymd_and_hms(2024, 6, 9, 0, 0, 0).unwrap(),
            },
            pricing: Pricing {
                list_cents: 4900,
                member_cents: Some(2900),
            },
            categories: vec!["safety".to_string()],
            students: vec![],
            ratings: vec![],
            handouts: vec![],
            components: vec![],
        }
    }

    #[test]
    fn status_before_registration_opens_is_closed() {
        let course = example_course();
        let now = Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap();
        assert_eq!(course.status_at(now), CourseStatus::ClosedRegistration);
    }

    #[test]
    fn status_inside_registration_window_is_open() {
        let course = example_course();
        let now = Utc.with_ymd_and_hms(2024, 5, 15, 12, 0, 0).unwrap();
        assert_eq!(course.status_at(now), CourseStatus::OpenRegistration);
    }

    #[test]
    fn status_after_close_before_start_is_closed() {
        let course = example_course();
        let now = Utc.with_ymd_and_hms(2024, 6, 9, 12, 0, 0).unwrap();
        assert_eq!(course.status_at(now), CourseStatus::ClosedRegistration);
    }

    #[test]
    fn status_during_class_is_ongoing() {
        let course = example_course();
        let now = Utc.with_ymd_and_hms(2024, 6, 10, 17, 0, 0).unwrap();
        assert_eq!(course.status_at(now), CourseStatus::Ongoing);
    }

    #[test]
    fn status_after_class_is_storage() {
        let course = example_course();
        let now = Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap();
        assert_eq!(course.status_at(now), CourseStatus::Storage);
    }

    #[test]
    fn average_rating_rounds_to_two_decimals() {
        let mut course = example_course();
        course.ratings = vec![5, 4, 4];
        assert_eq!(course.average_rating(), Some(4.33));
    }

    #[test]
    fn average_rating_of_unrated_course_is_none() {
        assert_eq!(example_course().average_rating(), None);
    }
}
