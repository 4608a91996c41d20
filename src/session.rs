/// Source of the active user identifier. A real auth collaborator replaces
/// [`StaticIdentity`] without touching the views.
pub trait IdentityProvider: Send + Sync {
    fn current_user(&self) -> Option<String>;
}

/// Fixed identifier configured at startup.
#[derive(Debug, Clone)]
pub struct StaticIdentity {
    user_id: Option<String>,
}

impl StaticIdentity {
    pub fn new(user_id: Option<String>) -> Self {
        Self { user_id }
    }
}

impl IdentityProvider for StaticIdentity {
    fn current_user(&self) -> Option<String> {
        self.user_id.clone()
    }
}

/// The user identifier handed down from the shell to every view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserContext {
    user_id: Option<String>,
}

impl UserContext {
    pub fn new(user_id: impl Into<String>) -> Self {
        let user_id = user_id.into();
        Self {
            user_id: Some(user_id).filter(|id| !id.trim().is_empty()),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn acquire(provider: &dyn IdentityProvider) -> Self {
        provider
            .current_user()
            .map(Self::new)
            .unwrap_or_default()
    }

    /// `None` for a missing or blank identifier.
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }
}
