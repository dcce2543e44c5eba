//! Projects domain: projects and the tasks nested under them

pub mod api;
pub mod domain;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::{Project, Task, TaskStatus};

// Re-export repository types
pub use repository::{ProjectRepository, ProjectsRepositories, TaskRepository, TaskWithContext};

// Re-export API types
pub use api::routes;
pub use api::ProjectsState;
