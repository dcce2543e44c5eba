//! Tenancy domain state and auth backend integration

use crate::TenancyRepositories;
use axum::extract::FromRef;
use taskhub_auth::AuthBackend;

/// Application state for the Tenancy domain
#[derive(Clone)]
pub struct TenancyState {
    pub repos: TenancyRepositories,
    pub auth: AuthBackend,
}

impl FromRef<TenancyState> for AuthBackend {
    fn from_ref(state: &TenancyState) -> Self {
        state.auth.clone()
    }
}
