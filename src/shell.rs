use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::gateway::CourseGateway;
use crate::navigation::{Navigator, Route};
use crate::render;
use crate::session::UserContext;
use crate::views::{AddCourseView, CourseListView, EditCourseView};

pub enum ActiveView {
    List(CourseListView),
    Add(AddCourseView),
    Edit(EditCourseView),
}

/// Routes between the list, add and edit pages and hands every page the
/// active user.
pub struct Shell {
    gateway: Arc<dyn CourseGateway>,
    navigator: Navigator,
    redirect_delay: Duration,
    user: UserContext,
    route: Route,
    view: ActiveView,
}

impl Shell {
    pub fn new(
        gateway: Arc<dyn CourseGateway>,
        user: UserContext,
        navigator: Navigator,
        redirect_delay: Duration,
    ) -> Self {
        let view = ActiveView::List(CourseListView::new(gateway.clone()));
        Self {
            gateway,
            navigator,
            redirect_delay,
            user,
            route: Route::List,
            view,
        }
    }

    /// Activates the initial page.
    pub async fn start(&mut self) {
        info!("shell started at {}", self.route);
        self.activate().await;
    }

    /// Mounts `route`. The same route is only re-activated, which is a
    /// no-op unless the user changed; any other route replaces the view and
    /// drops whatever the old one had pending.
    pub async fn navigate(&mut self, route: Route) {
        if route == self.route {
            self.activate().await;
            return;
        }

        info!("navigating {} -> {}", self.route, route);
        self.view = match &route {
            Route::List => ActiveView::List(CourseListView::new(self.gateway.clone())),
            Route::Add => ActiveView::Add(AddCourseView::new(
                self.gateway.clone(),
                self.navigator.clone(),
                self.redirect_delay,
                self.user.clone(),
            )),
            Route::Edit(_) => ActiveView::Edit(EditCourseView::new(
                self.gateway.clone(),
                self.navigator.clone(),
                self.redirect_delay,
            )),
        };
        self.route = route;
        self.activate().await;
    }

    /// Swaps in a new identity, e.g. from a real auth collaborator.
    pub async fn set_user(&mut self, user: UserContext) {
        if user == self.user {
            return;
        }
        info!("active user changed");
        self.user = user;
        self.activate().await;
    }

    async fn activate(&mut self) {
        match &mut self.view {
            ActiveView::List(view) => view.activate(&self.user).await,
            ActiveView::Add(view) => view.activate(&self.user),
            ActiveView::Edit(view) => {
                let id = match &self.route {
                    Route::Edit(id) => Some(id.as_str()),
                    _ => None,
                };
                view.activate(&self.user, id).await;
            }
        }
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn user(&self) -> &UserContext {
        &self.user
    }

    pub fn view(&self) -> &ActiveView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut ActiveView {
        &mut self.view
    }

    pub fn render(&self) -> String {
        let body = match &self.view {
            ActiveView::List(view) => render::render_list(view),
            ActiveView::Add(view) => render::render_add(view),
            ActiveView::Edit(view) => render::render_edit(view),
        };
        format!(
            "Course Tracker | My Courses (/) | Add Course (/add-tracked)    @ {}\n{}",
            self.route, body
        )
    }
}
