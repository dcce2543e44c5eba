//! Projects domain state and auth backend integration

use crate::ProjectsRepositories;
use axum::extract::FromRef;
use taskhub_auth::AuthBackend;

/// Application state for the Projects domain
#[derive(Clone)]
pub struct ProjectsState {
    pub repos: ProjectsRepositories,
    pub auth: AuthBackend,
}

impl FromRef<ProjectsState> for AuthBackend {
    fn from_ref(state: &ProjectsState) -> Self {
        state.auth.clone()
    }
}
