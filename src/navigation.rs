use std::fmt;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::error::AppError;

const ADD_PATH: &str = "/add-tracked";
const EDIT_PREFIX: &str = "/edit-tracked/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    List,
    Add,
    Edit(String),
}

impl Route {
    pub fn parse(path: &str) -> Result<Self, AppError> {
        let path = path.trim();
        match path {
            "" | "/" => Ok(Route::List),
            ADD_PATH | "/add-tracked/" => Ok(Route::Add),
            _ => match path.strip_prefix(EDIT_PREFIX) {
                Some(id) if !id.is_empty() && !id.contains('/') => Ok(Route::Edit(id.to_string())),
                Some(_) => Err(AppError::Precondition(
                    "No course ID provided for editing.".to_string(),
                )),
                None => Err(AppError::Precondition(format!("No such page: {}", path))),
            },
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::List => "/".to_string(),
            Route::Add => ADD_PATH.to_string(),
            Route::Edit(id) => format!("{}{}", EDIT_PREFIX, id),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Handle views use to ask the shell for a route change.
#[derive(Debug, Clone)]
pub struct Navigator {
    tx: mpsc::UnboundedSender<Route>,
}

impl Navigator {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Route>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn go(&self, route: Route) {
        debug!("navigation requested: {}", route);
        if self.tx.send(route).is_err() {
            warn!("navigation dropped: shell is gone");
        }
    }
}

/// A navigation that fires after a delay unless cancelled first.
///
/// Dropping the handle cancels it, so a view that is torn down takes its
/// pending redirect with it.
#[derive(Debug)]
pub struct ScheduledNavigation {
    handle: JoinHandle<()>,
}

impl ScheduledNavigation {
    pub fn schedule(navigator: Navigator, route: Route, delay: Duration) -> Self {
        debug!("scheduling navigation to {} in {:?}", route, delay);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            navigator.go(route);
        });
        Self { handle }
    }

    pub fn cancel(self) {
        drop(self);
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for ScheduledNavigation {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
