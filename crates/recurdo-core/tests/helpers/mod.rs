#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;
use recurdo_core::error::CoreError;
use recurdo_core::models::{Due, Label, NewTaskData, Task, TaskId};
use recurdo_core::repository::{LabelRepository, TaskRepository};

/// Remote operations observed by [`InMemoryRepository`], in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListLabels,
    ListTasks,
    CreateTask { request: NewTaskData, created: TaskId },
    SetLabels { task: TaskId, labels: Vec<String> },
}

#[derive(Default)]
struct State {
    labels: Vec<Label>,
    tasks: Vec<Task>,
    next_id: u64,
    calls: Vec<Call>,
    creates_before_failure: Option<usize>,
}

/// A stand-in for the remote service that applies mutations to its own task
/// list and records every call.
#[derive(Default)]
pub struct InMemoryRepository {
    state: Mutex<State>,
}

impl InMemoryRepository {
    pub fn new(labels: &[&str], tasks: Vec<Task>) -> Self {
        let labels = labels
            .iter()
            .map(|name| Label {
                key: name.to_string(),
                name: name.to_string(),
            })
            .collect();
        Self {
            state: Mutex::new(State {
                labels,
                tasks,
                next_id: 1000,
                ..Default::default()
            }),
        }
    }

    /// Makes every `create_task` after the first `count` fail.
    pub fn fail_creates_after(self, count: usize) -> Self {
        self.state.lock().unwrap().creates_before_failure = Some(count);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn created(&self) -> Vec<(NewTaskData, TaskId)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::CreateTask { request, created } => Some((request, created)),
                _ => None,
            })
            .collect()
    }

    pub fn label_updates(&self) -> Vec<(TaskId, Vec<String>)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::SetLabels { task, labels } => Some((task, labels)),
                _ => None,
            })
            .collect()
    }

    pub fn tasks(&self) -> Vec<Task> {
        self.state.lock().unwrap().tasks.clone()
    }

    pub fn task(&self, id: &TaskId) -> Option<Task> {
        self.tasks().into_iter().find(|t| &t.id == id)
    }
}

#[async_trait]
impl LabelRepository for InMemoryRepository {
    async fn list_labels(&self) -> Result<Vec<Label>, CoreError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::ListLabels);
        Ok(state.labels.clone())
    }
}

#[async_trait]
impl TaskRepository for InMemoryRepository {
    async fn list_tasks(&self) -> Result<Vec<Task>, CoreError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::ListTasks);
        Ok(state.tasks.clone())
    }

    async fn create_task(&self, data: NewTaskData) -> Result<Task, CoreError> {
        let mut state = self.state.lock().unwrap();
        if let Some(remaining) = state.creates_before_failure.as_mut() {
            if *remaining == 0 {
                return Err(CoreError::Api {
                    status: 503,
                    body: "service unavailable".to_string(),
                });
            }
            *remaining -= 1;
        }

        state.next_id += 1;
        let id = TaskId(state.next_id.to_string());
        let task = Task {
            id: id.clone(),
            project_id: data.project_id.clone(),
            section_id: data.section_id.clone(),
            content: data.content.clone(),
            description: data.description.clone(),
            labels: data.labels.clone(),
            parent_id: data.parent_id.clone(),
            order: data.order,
            priority: data.priority,
            due: data.due_date.map(Due::on),
            deadline: data.deadline_date.map(Due::on),
            url: format!("https://todo.test/task/{id}"),
        };
        state.tasks.push(task.clone());
        state.calls.push(Call::CreateTask {
            request: data,
            created: id,
        });
        Ok(task)
    }

    async fn set_labels(&self, id: &TaskId, labels: Vec<String>) -> Result<(), CoreError> {
        let mut state = self.state.lock().unwrap();
        let task = state
            .tasks
            .iter_mut()
            .find(|t| &t.id == id)
            .ok_or_else(|| CoreError::Api {
                status: 404,
                body: format!("task {id} not found"),
            })?;
        task.labels = labels.clone();
        state.calls.push(Call::SetLabels {
            task: id.clone(),
            labels,
        });
        Ok(())
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

/// Builder for snapshot tasks.
pub struct TaskBuilder {
    task: Task,
}

pub fn task(id: &str) -> TaskBuilder {
    TaskBuilder {
        task: Task {
            id: id.into(),
            project_id: "inbox".to_string(),
            content: id.to_string(),
            url: format!("https://todo.test/task/{id}"),
            ..Default::default()
        },
    }
}

impl TaskBuilder {
    pub fn parent(mut self, parent: &str) -> Self {
        self.task.parent_id = Some(parent.into());
        self
    }

    pub fn order(mut self, order: i64) -> Self {
        self.task.order = order;
        self
    }

    pub fn label(mut self, label: &str) -> Self {
        self.task.labels.push(label.to_string());
        self
    }

    pub fn due(mut self, date: NaiveDate) -> Self {
        self.task.due = Some(Due::on(date));
        self
    }

    pub fn deadline(mut self, date: NaiveDate) -> Self {
        self.task.deadline = Some(Due::on(date));
        self
    }

    pub fn build(self) -> Task {
        self.task
    }
}
