//! Repository implementations for the Tenancy domain

pub mod organizations;
pub mod users;

use sqlx::PgPool;

pub use organizations::OrganizationRepository;
pub use users::UserRepository;

/// Combined repository access for the Tenancy domain
#[derive(Clone)]
pub struct TenancyRepositories {
    pub organizations: OrganizationRepository,
    pub users: UserRepository,
}

impl TenancyRepositories {
    pub fn new(pool: PgPool) -> Self {
        Self {
            organizations: OrganizationRepository::new(pool.clone()),
            users: UserRepository::new(pool),
        }
    }
}
