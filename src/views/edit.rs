use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use crate::error::AppError;
use crate::gateway::CourseGateway;
use crate::navigation::{Navigator, Route, ScheduledNavigation};
use crate::session::UserContext;
use crate::views::form::{CourseForm, FormField};

const LOGIN_REQUIRED: &str = "Please log in to edit courses.";
const MISSING_ID: &str = "No course ID provided for editing.";
const LOAD_FAILED: &str =
    "Failed to load course details. It might not exist or you might not have access.";
const UPDATE_FAILED: &str = "Failed to update course. Please try again.";
const UPDATED: &str = "Tracked course updated successfully.";

pub struct EditCourseView {
    gateway: Arc<dyn CourseGateway>,
    navigator: Navigator,
    redirect_delay: Duration,
    user: UserContext,
    course_id: Option<String>,
    activated_for: Option<(UserContext, Option<String>)>,
    form: Option<CourseForm>,
    load_error: Option<String>,
    message: Option<String>,
    error: Option<String>,
    redirect: Option<ScheduledNavigation>,
}

impl EditCourseView {
    pub fn new(gateway: Arc<dyn CourseGateway>, navigator: Navigator, redirect_delay: Duration) -> Self {
        Self {
            gateway,
            navigator,
            redirect_delay,
            user: UserContext::anonymous(),
            course_id: None,
            activated_for: None,
            form: None,
            load_error: None,
            message: None,
            error: None,
            redirect: None,
        }
    }

    /// Loads the record being edited. The form only exists after a
    /// successful load; activating again with the same user and id is a
    /// no-op.
    pub async fn activate(&mut self, user: &UserContext, course_id: Option<&str>) {
        let course_id = course_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string);
        let params = (user.clone(), course_id.clone());
        if self.activated_for.as_ref() == Some(&params) {
            return;
        }
        self.activated_for = Some(params);
        self.user = user.clone();
        self.course_id = course_id;
        self.form = None;
        self.load_error = None;
        self.message = None;
        self.error = None;
        self.redirect = None;

        let Some(user_id) = self.user.user_id() else {
            self.load_error = Some(LOGIN_REQUIRED.to_string());
            return;
        };
        let Some(id) = self.course_id.as_deref() else {
            self.load_error = Some(MISSING_ID.to_string());
            return;
        };

        info!("fetching tracked course {} for {}", id, user_id);
        match self.gateway.get_course(id, user_id).await {
            Ok(course) => {
                self.form = Some(CourseForm::from_course(&course));
            }
            Err(e) => {
                error!("Error fetching course for edit: {}", e);
                self.load_error = Some(e.user_message(LOAD_FAILED));
            }
        }
    }

    pub fn update_field(&mut self, field: FormField, value: impl Into<String>) -> Result<(), AppError> {
        match self.form.as_mut() {
            Some(form) => form.update_field(field, value),
            None => Err(AppError::Precondition(
                self.load_error
                    .clone()
                    .unwrap_or_else(|| LOAD_FAILED.to_string()),
            )),
        }
    }

    /// Replaces the record's editable fields. The form is left as is since a
    /// redirect to the list follows.
    pub async fn submit(&mut self) -> bool {
        self.error = None;
        self.message = None;

        let (Some(form), Some(user_id), Some(id)) =
            (self.form.as_ref(), self.user.user_id(), self.course_id.as_deref())
        else {
            warn!("update rejected: course details not loaded");
            self.error = Some(
                self.load_error
                    .clone()
                    .unwrap_or_else(|| LOAD_FAILED.to_string()),
            );
            return false;
        };

        let payload = match form.to_payload(user_id) {
            Ok(payload) => payload,
            Err(e) => {
                warn!("update rejected: {}", e);
                self.error = Some(e.user_message(UPDATE_FAILED));
                return false;
            }
        };

        match self.gateway.update_course(id, &payload).await {
            Ok(message) => {
                info!("updated tracked course {}", id);
                self.message = Some(message.unwrap_or_else(|| UPDATED.to_string()));
                self.redirect = Some(ScheduledNavigation::schedule(
                    self.navigator.clone(),
                    Route::List,
                    self.redirect_delay,
                ));
                true
            }
            Err(e) => {
                error!("Error updating tracked course {}: {}", id, e);
                self.error = Some(e.user_message(UPDATE_FAILED));
                false
            }
        }
    }

    /// `None` whenever the record could not be loaded.
    pub fn form(&self) -> Option<&CourseForm> {
        if self.load_error.is_some() {
            return None;
        }
        self.form.as_ref()
    }

    pub fn course_id(&self) -> Option<&str> {
        self.course_id.as_deref()
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn redirect_pending(&self) -> bool {
        self.redirect.as_ref().is_some_and(|r| !r.is_finished())
    }
}
