use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use crate::error::AppError;
use crate::gateway::CourseGateway;
use crate::navigation::{Navigator, Route, ScheduledNavigation};
use crate::session::UserContext;
use crate::views::form::{CourseForm, FormField};

const LOGIN_REQUIRED: &str = "Please log in to add courses.";
const ADD_FAILED: &str = "Failed to add course. Please try again.";
const ADDED: &str = "Tracked course added successfully.";

pub struct AddCourseView {
    gateway: Arc<dyn CourseGateway>,
    navigator: Navigator,
    redirect_delay: Duration,
    user: UserContext,
    form: CourseForm,
    message: Option<String>,
    error: Option<String>,
    redirect: Option<ScheduledNavigation>,
}

impl AddCourseView {
    pub fn new(
        gateway: Arc<dyn CourseGateway>,
        navigator: Navigator,
        redirect_delay: Duration,
        user: UserContext,
    ) -> Self {
        Self {
            gateway,
            navigator,
            redirect_delay,
            user,
            form: CourseForm::default(),
            message: None,
            error: None,
            redirect: None,
        }
    }

    /// Nothing to fetch; only the user identifier is picked up.
    pub fn activate(&mut self, user: &UserContext) {
        self.user = user.clone();
    }

    pub fn update_field(&mut self, field: FormField, value: impl Into<String>) -> Result<(), AppError> {
        self.form.update_field(field, value)
    }

    /// Validates and submits the form. On success the form is reset and a
    /// redirect to the list is scheduled; on failure the input is kept.
    pub async fn submit(&mut self) -> bool {
        self.error = None;
        self.message = None;

        let Some(user_id) = self.user.user_id() else {
            warn!("add rejected: no active user");
            self.error = Some(LOGIN_REQUIRED.to_string());
            return false;
        };

        let payload = match self.form.to_payload(user_id) {
            Ok(payload) => payload,
            Err(e) => {
                warn!("add rejected: {}", e);
                self.error = Some(e.user_message(ADD_FAILED));
                return false;
            }
        };

        match self.gateway.add_course(&payload).await {
            Ok(message) => {
                info!("added tracked course {:?}", payload.course_name);
                self.message = Some(message.unwrap_or_else(|| ADDED.to_string()));
                self.form.reset();
                self.redirect = Some(ScheduledNavigation::schedule(
                    self.navigator.clone(),
                    Route::List,
                    self.redirect_delay,
                ));
                true
            }
            Err(e) => {
                error!("Error adding tracked course: {}", e);
                self.error = Some(e.user_message(ADD_FAILED));
                false
            }
        }
    }

    pub fn form(&self) -> &CourseForm {
        &self.form
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
