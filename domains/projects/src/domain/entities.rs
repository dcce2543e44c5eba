//! Domain entities for the Projects domain
//!
//! A project belongs to exactly one organization, and that membership is
//! immutable: it is what makes the project's tasks visible to the tenant.
//! Tasks reach their organization only through the parent project.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use taskhub_common::{Error, Result};

/// Maximum project name / task title length (varchar(200))
const MAX_NAME_LENGTH: usize = 200;

/// Maximum description length (CHECK length <= 5000)
const MAX_DESCRIPTION_LENGTH: usize = 5000;

/// Task status — matches the `task_status` DB enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "task_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Open,
    InProgress,
    Done,
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskStatus::Open => write!(f, "open"),
            TaskStatus::InProgress => write!(f, "in_progress"),
            TaskStatus::Done => write!(f, "done"),
        }
    }
}

/// Project entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Create a new project inside an organization
    pub fn new(organization_id: Uuid, name: String, description: Option<String>) -> Result<Self> {
        validate_name(&name)?;
        validate_description(description.as_deref())?;

        let now = Utc::now();
        Ok(Project {
            id: Uuid::new_v4(),
            organization_id,
            name,
            description,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Task entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    pub id: Uuid,
    pub project_id: Uuid,
    pub assignee_id: Option<Uuid>,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Create a new task under a project
    pub fn new(
        project_id: Uuid,
        title: String,
        description: Option<String>,
        assignee_id: Option<Uuid>,
    ) -> Result<Self> {
        validate_name(&title)?;
        validate_description(description.as_deref())?;

        let now = Utc::now();
        Ok(Task {
            id: Uuid::new_v4(),
            project_id,
            assignee_id,
            title,
            description,
            status: TaskStatus::default(),
            created_at: now,
            updated_at: now,
        })
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::Validation("Name is required".to_string()));
    }
    if name.len() > MAX_NAME_LENGTH {
        return Err(Error::Validation(format!(
            "Name must be at most {} characters",
            MAX_NAME_LENGTH
        )));
    }
    Ok(())
}

fn validate_description(description: Option<&str>) -> Result<()> {
    if let Some(d) = description {
        if d.len() > MAX_DESCRIPTION_LENGTH {
            return Err(Error::Validation(format!(
                "Description must be at most {} characters",
                MAX_DESCRIPTION_LENGTH
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_status_display() {
        assert_eq!(TaskStatus::Open.to_string(), "open");
        assert_eq!(TaskStatus::InProgress.to_string(), "in_progress");
        assert_eq!(TaskStatus::Done.to_string(), "done");
    }

    #[test]
    fn test_task_status_default_is_open() {
        assert_eq!(TaskStatus::default(), TaskStatus::Open);
    }

    #[test]
    fn test_task_status_serialization_snake_case() {
        assert_eq!(serde_json::to_string(&TaskStatus::Open).unwrap(), "\"open\"");
        assert_eq!(
            serde_json::to_string(&TaskStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
        assert_eq!(serde_json::to_string(&TaskStatus::Done).unwrap(), "\"done\"");
    }

    #[test]
    fn test_project_creation() {
        let org_id = Uuid::new_v4();
        let project = Project::new(org_id, "API rewrite".to_string(), None).unwrap();

        assert_eq!(project.organization_id, org_id);
        assert_eq!(project.name, "API rewrite");
        assert!(project.description.is_none());
    }

    #[test]
    fn test_project_name_empty_rejected() {
        assert!(Project::new(Uuid::new_v4(), "".to_string(), None).is_err());
        assert!(Project::new(Uuid::new_v4(), "  ".to_string(), None).is_err());
    }

    #[test]
    fn test_project_name_201_chars_rejected() {
        let result = Project::new(Uuid::new_v4(), "a".repeat(201), None);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("at most 200"));
    }

    #[test]
    fn test_project_description_5000_valid() {
        let result = Project::new(
            Uuid::new_v4(),
            "Docs".to_string(),
            Some("d".repeat(5000)),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_project_description_5001_rejected() {
        let result = Project::new(
            Uuid::new_v4(),
            "Docs".to_string(),
            Some("d".repeat(5001)),
        );
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("at most 5000"));
    }

    #[test]
    fn test_task_creation_defaults_to_open() {
        let project_id = Uuid::new_v4();
        let task = Task::new(project_id, "Write tests".to_string(), None, None).unwrap();

        assert_eq!(task.project_id, project_id);
        assert_eq!(task.status, TaskStatus::Open);
        assert!(task.assignee_id.is_none());
    }

    #[test]
    fn test_task_with_assignee() {
        let assignee = Uuid::new_v4();
        let task = Task::new(
            Uuid::new_v4(),
            "Review PR".to_string(),
            Some("Check the query core".to_string()),
            Some(assignee),
        )
        .unwrap();

        assert_eq!(task.assignee_id, Some(assignee));
        assert_eq!(task.description.as_deref(), Some("Check the query core"));
    }

    #[test]
    fn test_task_title_empty_rejected() {
        assert!(Task::new(Uuid::new_v4(), "".to_string(), None, None).is_err());
    }

    #[test]
    fn test_task_serialization_roundtrip() {
        let task = Task::new(Uuid::new_v4(), "Ship it".to_string(), None, None).unwrap();

        let json = serde_json::to_string(&task).unwrap();
        let deserialized: Task = serde_json::from_str(&json).unwrap();

        assert_eq!(task, deserialized);
    }
}
