use crate::error::CoreError;
use crate::models::{Label, NewTaskData, Task, TaskId};
use async_trait::async_trait;

pub mod rest;

pub use rest::{RestConfig, RestRepository};

/// Label operations of the remote service
#[async_trait]
pub trait LabelRepository {
    async fn list_labels(&self) -> Result<Vec<Label>, CoreError>;
}

/// Task operations of the remote service
#[async_trait]
pub trait TaskRepository {
    /// Every active task, flat and in no particular order.
    async fn list_tasks(&self) -> Result<Vec<Task>, CoreError>;
    /// Creates a task and returns it with its remote-assigned id.
    async fn create_task(&self, data: NewTaskData) -> Result<Task, CoreError>;
    /// Replaces the task's label list.
    async fn set_labels(&self, id: &TaskId, labels: Vec<String>) -> Result<(), CoreError>;
}

/// Main repository trait that composes all domain traits
pub trait Repository: LabelRepository + TaskRepository + Send + Sync {}

impl<T> Repository for T where T: LabelRepository + TaskRepository + Send + Sync {}
