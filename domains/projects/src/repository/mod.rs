pub mod projects;
pub mod tasks;

pub use projects::ProjectRepository;
pub use tasks::{TaskRepository, TaskWithContext};

use sqlx::PgPool;

/// All repositories for the projects domain
#[derive(Clone)]
pub struct ProjectsRepositories {
    pub projects: ProjectRepository,
    pub tasks: TaskRepository,
}

impl ProjectsRepositories {
    pub fn new(pool: PgPool) -> Self {
        Self {
            projects: ProjectRepository::new(pool.clone()),
            tasks: TaskRepository::new(pool),
        }
    }
}
