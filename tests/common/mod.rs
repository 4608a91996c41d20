#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;

use course_tracker::error::AppError;
use course_tracker::gateway::CourseGateway;
use course_tracker::models::{CoursePayload, CourseStatus, TrackedCourse};

pub const USER: &str = "681f5e03a1e2df137b1f3330";

pub fn course(id: &str, name: &str, status: CourseStatus, date: Option<&str>) -> TrackedCourse {
    TrackedCourse {
        id: id.to_string(),
        user_id: USER.to_string(),
        course_name: name.to_string(),
        status,
        instructor: None,
        completion_date: date.map(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").unwrap()),
        certificate_link: None,
        progress: 0,
        notes: None,
    }
}

pub fn three_courses() -> Vec<TrackedCourse> {
    vec![
        course("a1", "Rust Fundamentals", CourseStatus::Ongoing, None),
        course("b2", "Linear Algebra", CourseStatus::Completed, Some("2024-04-12")),
        course("c3", "Distributed Systems", CourseStatus::Planned, None),
    ]
}

/// In-memory stand-in for the backend that records how often it is called.
#[derive(Default)]
pub struct FakeGateway {
    courses: Mutex<Vec<TrackedCourse>>,
    failure: Mutex<Option<(u16, Option<String>)>>,
    next_id: AtomicUsize,
    pub list_calls: AtomicUsize,
    pub get_calls: AtomicUsize,
    pub add_calls: AtomicUsize,
    pub update_calls: AtomicUsize,
    pub delete_calls: AtomicUsize,
}

impl FakeGateway {
    pub fn with_courses(courses: Vec<TrackedCourse>) -> Self {
        let gateway = Self::default();
        *gateway.courses.lock().unwrap() = courses;
        gateway
    }

    /// Every following call fails with `status` and the optional message.
    pub fn fail_with(&self, status: u16, message: Option<&str>) {
        *self.failure.lock().unwrap() = Some((status, message.map(str::to_string)));
    }

    pub fn recover(&self) {
        *self.failure.lock().unwrap() = None;
    }

    pub fn stored(&self) -> Vec<TrackedCourse> {
        self.courses.lock().unwrap().clone()
    }

    pub fn count(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }

    fn check(&self, counter: &AtomicUsize) -> Result<(), AppError> {
        counter.fetch_add(1, Ordering::SeqCst);
        match self.failure.lock().unwrap().clone() {
            Some((status, message)) => Err(AppError::Gateway { status, message }),
            None => Ok(()),
        }
    }

    fn not_found() -> AppError {
        AppError::Gateway {
            status: 404,
            message: Some("Tracked course not found or not authorized.".to_string()),
        }
    }
}

fn apply(course: &mut TrackedCourse, payload: &CoursePayload) {
    course.course_name = payload.course_name.clone();
    course.status = payload.status;
    course.instructor = payload.instructor.clone();
    course.completion_date = payload.completion_date;
    course.certificate_link = payload.certificate_link.clone();
    course.progress = payload.progress;
    course.notes = payload.notes.clone();
}

#[async_trait]
impl CourseGateway for FakeGateway {
    async fn list_courses(&self, user_id: &str) -> Result<Vec<TrackedCourse>, AppError> {
        self.check(&self.list_calls)?;
        Ok(self
            .courses
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn get_course(&self, id: &str, user_id: &str) -> Result<TrackedCourse, AppError> {
        self.check(&self.get_calls)?;
        self.courses
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id && c.user_id == user_id)
            .cloned()
            .ok_or_else(Self::not_found)
    }

    async fn add_course(&self, payload: &CoursePayload) -> Result<Option<String>, AppError> {
        self.check(&self.add_calls)?;
        let id = format!("new-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        let mut course = course(&id, "", CourseStatus::Ongoing, None);
        course.user_id = payload.user_id.clone();
        apply(&mut course, payload);
        self.courses.lock().unwrap().push(course);
        Ok(Some("Tracked course added!".to_string()))
    }

    async fn update_course(
        &self,
        id: &str,
        payload: &CoursePayload,
    ) -> Result<Option<String>, AppError> {
        self.check(&self.update_calls)?;
        let mut courses = self.courses.lock().unwrap();
        let course = courses
            .iter_mut()
            .find(|c| c.id == id && c.user_id == payload.user_id)
            .ok_or_else(Self::not_found)?;
        apply(course, payload);
        Ok(Some("Tracked course updated!".to_string()))
    }

    async fn delete_course(&self, id: &str, user_id: &str) -> Result<Option<String>, AppError> {
        self.check(&self.delete_calls)?;
        let mut courses = self.courses.lock().unwrap();
        let before = courses.len();
        courses.retain(|c| !(c.id == id && c.user_id == user_id));
        if courses.len() == before {
            return Err(Self::not_found());
        }
        Ok(Some("Tracked course deleted.".to_string()))
    }
}
