use std::collections::BTreeMap;

use rocket::{Build, Rocket, Route};

pub mod certificate;
pub mod course;
pub mod draft;
pub mod email;
pub mod instructor;
pub mod report;
pub mod settings;
pub mod webinar;
pub mod zoom;

use certificate::*;
use course::*;
use draft::*;
use email::*;
use instructor::*;
use report::*;
use settings::*;
use webinar::*;
use zoom::*;

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    data::{
        course::db::CoursePatch,
        course::{
            CertificateKind, Component, ComponentKind, Course, CourseStatus, Handout, Pricing,
            RegistrationWindow, Schedule,
        },
        draft::CourseDraft,
        email::db::EmailTemplatePatch,
        email::EmailTemplate,
        instructor::db::InstructorPatch,
        instructor::Instructor,
        registration::{Payment, PaymentStatus, Progress, Registration, UserType},
        settings::GlobalSettings,
        webinar::db::WebinarPatch,
        webinar::{ServiceType, Webinar},
    },
    resp::problem::Problem,
};

use crate::cert::CertificateData;
use crate::report::{Completion, ReportRow};

#[derive(OpenApi)]
#[openapi(
    paths(
        course_list,
        course_get,
        course_create,
        course_update,
        course_delete,
        course_delete_bulk,
        webinar_list,
        webinar_get,
        webinar_create,
        webinar_update,
        webinar_delete,
        instructor_list,
        instructor_get,
        instructor_create,
        instructor_update,
        instructor_delete,
        email_list,
        email_get,
        email_create,
        email_update,
        email_delete,
        selected_categories_get,
        selected_categories_put,
        zoom_meeting_list,
        zoom_webinar_list,
        zoom_meeting_create,
        zoom_webinar_create,
        certificate_create,
        report_progress,
        report_progress_csv,
        report_registrants,
        draft_get,
        draft_put,
        draft_delete
    ),
    components(schemas(
        Course,
        Schedule,
        RegistrationWindow,
        Pricing,
        Handout,
        Component,
        ComponentKind,
        CertificateKind,
        CourseStatus,
        CoursePatch,
        Webinar,
        ServiceType,
        WebinarPatch,
        Instructor,
        InstructorPatch,
        EmailTemplate,
        EmailTemplatePatch,
        GlobalSettings,
        Registration,
        UserType,
        Progress,
        Payment,
        PaymentStatus,
        ReportRow,
        Completion,
        CertificateRequest,
        CertificateData,
        CourseDraft,
        Problem
    )),
    modifiers(&V1_PREFIX)
)]
pub struct ApiDocV1;

pub struct PathPrefix(pub &'static str);
static V1_PREFIX: PathPrefix = PathPrefix("/api/v1");

impl utoipa::Modify for PathPrefix {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let mut new_paths = BTreeMap::new();

        for (path, item) in std::mem::take(&mut openapi.paths.paths) {
            new_paths.insert(self.0.to_string() + path.as_ref(), item);
        }

        openapi.paths.paths = new_paths;
    }
}

pub fn api_v1() -> Vec<Route> {
    routes![
        course_list,
        course_get,
        course_create,
        course_update,
        course_delete,
        course_delete_bulk,
        webinar_list,
        webinar_get,
        webinar_create,
        webinar_update,
        webinar_delete,
        instructor_list,
        instructor_get,
        instructor_create,
        instructor_update,
        instructor_delete,
        email_list,
        email_get,
        email_create,
        email_update,
        email_delete,
        selected_categories_get,
        selected_categories_put,
        zoom_meeting_list,
        zoom_webinar_list,
        zoom_meeting_create,
        zoom_webinar_create,
        certificate_create,
        report_progress,
        report_progress_csv,
        report_registrants,
        draft_get,
        draft_put,
        draft_delete
    ]
}

pub fn mount_api(rocket: Rocket<Build>) -> Rocket<Build> {
    rocket.mount("/api/v1", api_v1()).mount(
        "/",
        SwaggerUi::new("/swagger/<_..>").url("/api/v1/openapi.json", ApiDocV1::openapi()),
    )
}
