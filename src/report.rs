//! Progress/registrant report engine.
//!
//! Joins a course's registrations against progress and payment records,
//! applies date-range/user-type/completion filters and renders the result
//! as JSON rows or CSV. The join is left-outer on registrations: missing
//! progress means nothing completed, missing payment means `Pending`.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::data::course::{Course, CourseStatus};
use crate::data::registration::{Payment, PaymentStatus, Progress, Registration, UserType};

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReportRow {
    pub user: Uuid,
    pub name: String,
    pub email: String,
    pub user_type: UserType,
    pub registered_on: DateTime<Utc>,
    pub payment_status: PaymentStatus,
    pub completed_components: usize,
    pub total_components: usize,
    pub complete: bool,
    pub course_status: CourseStatus,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize, ToSchema, FromFormField)]
pub enum Completion {
    Complete,
    Incomplete,
}

#[derive(Debug, Default, Clone)]
pub struct ReportFilter {
    /// Inclusive lower bound on `registered_on`.
    pub from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on `registered_on`.
    pub to: Option<DateTime<Utc>>,
    pub user_type: Option<UserType>,
    pub completion: Option<Completion>,
}

impl ReportFilter {
    pub fn matches(&self, row: &ReportRow) -> bool {
        if let Some(from) = self.from {
            if row.registered_on < from {
                return false;
            }
        }
        if let Some(to) = self.to {
            if row.registered_on > to {
                return false;
            }
        }
        if let Some(user_type) = self.user_type {
            if row.user_type != user_type {
                return false;
            }
        }
        match self.completion {
            Some(Completion::Complete) if !row.complete => return false,
            Some(Completion::Incomplete) if row.complete => return false,
            _ => {}
        }
        true
    }
}

/// One row per registration. Component counts only consider components the
/// course currently has; stale ids in a progress record don't count.
pub fn build_report(
    course: &Course,
    registrations: &[Registration],
    progress: &[Progress],
    payments: &[Payment],
    now: DateTime<Utc>,
) -> Vec<ReportRow> {
    let progress_by_user: HashMap<Uuid, &Progress> =
        progress.iter().map(|p| (p.user, p)).collect();
    let payment_by_user: HashMap<Uuid, &Payment> =
        payments.iter().map(|p| (p.user, p)).collect();

    let total_components = course.components.len();
    let course_status = course.status_at(now);

    registrations
        .iter()
        .map(|registration| {
            let completed_components = progress_by_user
                .get(&registration.user)
                .map(|p| {
                    course
                        .components
                        .iter()
                        .filter(|c| p.completed.contains(&c.id))
                        .count()
                })
                .unwrap_or(0);

            let payment_status = payment_by_user
                .get(&registration.user)
                .map(|p| p.status)
                .unwrap_or(PaymentStatus::Pending);

            ReportRow {
                user: registration.user,
                name: registration.name.clone(),
                email: registration.email.clone(),
                user_type: registration.user_type,
                registered_on: registration.registered_on,
                payment_status,
                completed_components,
                total_components,
                // A course without components has nothing left to do.
                complete: completed_components >= total_components,
                course_status,
            }
        })
        .collect()
}

pub fn apply_filter(mut rows: Vec<ReportRow>, filter: &ReportFilter) -> Vec<ReportRow> {
    rows.retain(|row| filter.matches(row));
    rows
}

/// CSV rendering of report rows; one record per row, headers included.
pub fn to_csv(rows: &[ReportRow]) -> Result<String, csv::Error> {
    let mut writer = csv::Writer::from_writer(vec![]);

    for row in rows {
        writer.serialize(row)?;
    }

    let bytes = writer.into_inner().expect("csv writer over Vec can't fail");
    Ok(String::from_utf8(bytes).expect("csv output must be UTF-8"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::course::{
        Component, ComponentKind, Pricing, RegistrationWindow, Schedule,
    };
    use chrono::TimeZone;

    fn course_with_components(count: usize) -> Course {
        let components = (0..count)
            .map(|_| Component {
                id: Uuid::new_v4(),
                kind: ComponentKind::Survey {
                    url: "https://example.com/survey".to_string(),
                },
            })
            .collect();

        Course {
            id: Uuid::new_v4(),
            name: "Report Course".to_string(),
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
                list_cents: 1000,
                member_cents: None,
            },
            categories: vec![],
            students: vec![],
            ratings: vec![],
            handouts: vec![],
            components,
        }
    }

    fn registration(course: &Course, user: Uuid, user_type: UserType, day: u32) -> Registration {
        Registration {
            id: Uuid::new_v4(),
            course: course.id,
            user,
            name: format!("user-{}", day),
            email: format!("user-{}@example.com", day),
            user_type,
            registered_on: Utc.with_ymd_and_hms(2024, 5, day, 12, 0, 0).unwrap(),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 20, 0, 0, 0).unwrap()
    }

    #[test]
    fn registrant_without_progress_counts_zero_complete() {
        let course = course_with_components(2);
        let user = Uuid::new_v4();
        let regs = vec![registration(&course, user, UserType::Member, 2)];

        let rows = build_report(&course, &regs, &[], &[], now());

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].completed_components, 0);
        assert!(!rows[0].complete);
        assert_eq!(rows[0].payment_status, PaymentStatus::Pending);
    }

    #[test]
    fn completed_components_intersect_current_course_components() {
        let course = course_with_components(2);
        let user = Uuid::new_v4();
        let regs = vec![registration(&course, user, UserType::Member, 2)];

        // One current component done, plus a stale id from a removed one.
        let progress = vec![Progress {
            id: Uuid::new_v4(),
            course: course.id,
            user,
            completed: vec![course.components[0].id, Uuid::new_v4()],
            updated_on: now(),
        }];

        let rows = build_report(&course, &regs, &progress, &[], now());

        assert_eq!(rows[0].completed_components, 1);
        assert_eq!(rows[0].total_components, 2);
        assert!(!rows[0].complete);
    }

    #[test]
    fn course_without_components_reports_complete() {
        let course = course_with_components(0);
        let user = Uuid::new_v4();
        let regs = vec![registration(&course, user, UserType::Staff, 3)];

        let rows = build_report(&course, &regs, &[], &[], now());

        assert!(rows[0].complete);
        assert_eq!(rows[0].total_components, 0);
    }

    #[test]
    fn payment_status_joins_by_user() {
        let course = course_with_components(1);
        let paid = Uuid::new_v4();
        let unpaid = Uuid::new_v4();
        let regs = vec![
            registration(&course, paid, UserType::Member, 2),
            registration(&course, unpaid, UserType::NonMember, 3),
        ];
        let payments = vec![Payment {
            id: Uuid::new_v4(),
            course: course.id,
            user: paid,
            amount_cents: 1000,
            status: PaymentStatus::Paid,
            transaction_id: Some("tx-1".to_string()),
            paid_on: now(),
        }];

        let rows = build_report(&course, &regs, &[], &payments, now());

        assert_eq!(rows[0].payment_status, PaymentStatus::Paid);
        assert_eq!(rows[1].payment_status, PaymentStatus::Pending);
    }

    #[test]
    fn rows_carry_course_status_at_report_time() {
        let course = course_with_components(1);
        let regs = vec![registration(&course, Uuid::new_v4(), UserType::Member, 2)];

        let rows = build_report(&course, &regs, &[], &[], now());
        assert_eq!(rows[0].course_status, CourseStatus::OpenRegistration);

        let after = Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap();
        let rows = build_report(&course, &regs, &[], &[], after);
        assert_eq!(rows[0].course_status, CourseStatus::Storage);
    }

    #[test]
    fn date_range_filter_is_inclusive() {
        let course = course_with_components(0);
        let regs = vec![
            registration(&course, Uuid::new_v4(), UserType::Member, 1),
            registration(&course, Uuid::new_v4(), UserType::Member, 5),
            registration(&course, Uuid::new_v4(), UserType::Member, 9),
        ];
        let rows = build_report(&course, &regs, &[], &[], now());

        let filter = ReportFilter {
            from: Some(Utc.with_ymd_and_hms(2024, 5, 5, 0, 0, 0).unwrap()),
            to: Some(Utc.with_ymd_and_hms(2024, 5, 5, 23, 59, 59).unwrap()),
            ..Default::default()
        };

        let filtered = apply_filter(rows, &filter);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "user-5");
    }

    #[test]
    fn user_type_and_completion_filters_compose() {
        let course = course_with_components(1);
        let member = Uuid::new_v4();
        let staff = Uuid::new_v4();
        let regs = vec![
            registration(&course, member, UserType::Member, 2),
            registration(&course, staff, UserType::Staff, 3),
        ];
        let progress = vec![Progress {
            id: Uuid::new_v4(),
            course: course.id,
            user: staff,
            completed: vec![course.components[0].id],
            updated_on: now(),
        }];
        let rows = build_report(&course, &regs, &progress, &[], now());

        let filter = ReportFilter {
            user_type: Some(UserType::Staff),
            completion: Some(Completion::Complete),
            ..Default::default()
        };
        assert_eq!(apply_filter(rows.clone(), &filter).len(), 1);

        let filter = ReportFilter {
            user_type: Some(UserType::Member),
            completion: Some(Completion::Complete),
            ..Default::default()
        };
        assert_eq!(apply_filter(rows, &filter).len(), 0);
    }

    #[test]
    fn csv_row_count_matches_filtered_rows() {
        let course = course_with_components(1);
        let regs: Vec<Registration> = (1..=6)
            .map(|day| registration(&course, Uuid::new_v4(), UserType::Member, day))
            .collect();
        let rows = build_report(&course, &regs, &[], &[], now());

        let filter = ReportFilter {
            from: Some(Utc.with_ymd_and_hms(2024, 5, 3, 0, 0, 0).unwrap()),
            ..Default::default()
        };
        let filtered = apply_filter(rows, &filter);

        let csv = to_csv(&filtered).expect("csv rendering failed");
        let data_lines = csv.lines().count() - 1; // minus header
        assert_eq!(data_lines, filtered.len());
        assert_eq!(data_lines, 4);
    }

    #[test]
    fn empty_report_renders_empty_csv() {
        let csv = to_csv(&[]).expect("csv rendering failed");
        assert!(csv.is_empty());
    }
}
