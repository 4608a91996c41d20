use std::sync::Arc;

use tracing::{error, info};

use crate::gateway::CourseGateway;
use crate::models::TrackedCourse;
use crate::query::{ListQuery, SortKey, StatusFilter};
use crate::render::CourseRow;
use crate::session::UserContext;

pub const DELETE_PROMPT: &str =
    "Are you sure you want to delete this course? This action cannot be undone.";

const LOGIN_REQUIRED: &str = "Please log in to view your courses.";
const DELETE_LOGIN_REQUIRED: &str = "Please log in to delete courses.";
const FETCH_FAILED: &str = "Failed to load courses.";
const DELETE_FAILED: &str = "Failed to delete course.";

/// The "My Tracked Courses" view: owns the fetched list and the
/// filter/sort selection applied to it.
pub struct CourseListView {
    gateway: Arc<dyn CourseGateway>,
    user: UserContext,
    activated_for: Option<UserContext>,
    courses: Vec<TrackedCourse>,
    query: ListQuery,
    fetch_error: Option<String>,
    delete_error: Option<String>,
}

impl CourseListView {
    pub fn new(gateway: Arc<dyn CourseGateway>) -> Self {
        Self {
            gateway,
            user: UserContext::anonymous(),
            activated_for: None,
            courses: Vec::new(),
            query: ListQuery::default(),
            fetch_error: None,
            delete_error: None,
        }
    }

    /// Fetches the user's courses. Activating again for the same user is a
    /// no-op.
    pub async fn activate(&mut self, user: &UserContext) {
        if self.activated_for.as_ref() == Some(user) {
            return;
        }
        self.activated_for = Some(user.clone());
        self.user = user.clone();
        self.fetch().await;
    }

    /// Re-fetches unconditionally.
    pub async fn reload(&mut self) {
        self.fetch().await;
    }

    async fn fetch(&mut self) {
        let Some(user_id) = self.user.user_id() else {
            self.courses.clear();
            self.fetch_error = Some(LOGIN_REQUIRED.to_string());
            return;
        };

        info!("fetching tracked courses for {}", user_id);
        match self.gateway.list_courses(user_id).await {
            Ok(courses) => {
                info!("loaded {} tracked courses", courses.len());
                self.courses = courses;
                self.fetch_error = None;
                self.delete_error = None;
            }
            Err(e) => {
                error!("Error fetching tracked courses: {}", e);
                self.courses.clear();
                self.fetch_error = Some(e.user_message(FETCH_FAILED));
            }
        }
    }

    /// Deletes `id` once `confirm` agrees. Returns whether the record was
    /// removed.
    pub async fn delete<F>(&mut self, id: &str, confirm: F) -> bool
    where
        F: FnOnce(&str) -> bool,
    {
        let Some(user_id) = self.user.user_id().map(str::to_string) else {
            self.delete_error = Some(DELETE_LOGIN_REQUIRED.to_string());
            return false;
        };
        if !confirm(DELETE_PROMPT) {
            return false;
        }

        self.delete_error = None;
        match self.gateway.delete_course(id, &user_id).await {
            Ok(message) => {
                info!("{}", message.as_deref().unwrap_or("tracked course deleted"));
                if let Some(pos) = self.courses.iter().position(|c| c.id == id) {
                    self.courses.remove(pos);
                }
                true
            }
            Err(e) => {
                error!("Error deleting tracked course {}: {}", id, e);
                self.delete_error = Some(e.user_message(DELETE_FAILED));
                false
            }
        }
    }

    pub fn set_status_filter(&mut self, filter: StatusFilter) {
        self.query.status = filter;
    }

    pub fn set_sort_key(&mut self, key: SortKey) {
        self.query.sort_key = key;
    }

    pub fn toggle_sort_direction(&mut self) -> bool {
        self.query.toggle_direction()
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    /// Filtered then sorted view of the fetched list.
    pub fn visible(&self) -> Vec<&TrackedCourse> {
        self.query.apply(&self.courses)
    }

    pub fn rows(&self) -> Vec<CourseRow> {
        self.visible().into_iter().map(CourseRow::from_course).collect()
    }

    /// Server order, unfiltered.
    pub fn courses(&self) -> &[TrackedCourse] {
        &self.courses
    }

    pub fn requires_login(&self) -> bool {
        self.activated_for.is_some() && self.user.user_id().is_none()
    }

    pub fn fetch_error(&self) -> Option<&str> {
        self.fetch_error.as_deref()
    }

    pub fn delete_error(&self) -> Option<&str> {
        self.delete_error.as_deref()
    }
}
