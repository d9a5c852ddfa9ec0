//! To-do item client methods

use super::{ApiRequest, ClientError, TASKS_PATH, TodoClient};
use crate::types::{CreateTaskRequest, MessageResponse, Task, TaskUpdate};

impl TodoClient {
    /// List the logged in user's tasks
    pub async fn list_tasks(&self) -> Result<Vec<Task>, ClientError> {
        self.execute(ApiRequest::get(TASKS_PATH)).await
    }

    /// Create a task
    pub async fn create_task(&self, text: &str) -> Result<Task, ClientError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ClientError::BadRequest("task text must not be empty".into()));
        }
        let request = ApiRequest::post(TASKS_PATH).json(&CreateTaskRequest {
            text: text.to_string(),
        })?;
        self.execute(request).await
    }

    /// Change a task's text and/or completion state
    pub async fn update_task(&self, id: &str, update: &TaskUpdate) -> Result<Task, ClientError> {
        if update.is_empty() {
            return Err(ClientError::BadRequest("nothing to update".into()));
        }
        let request = ApiRequest::put(task_path(id)?).json(update)?;
        self.execute(request).await
    }

    /// Delete a task
    pub async fn delete_task(&self, id: &str) -> Result<(), ClientError> {
        let request = ApiRequest::delete(task_path(id)?);
        self.execute::<MessageResponse>(request).await.map(drop)
    }
}

/// Path of a single task; ids are opaque but must stay within one segment
fn task_path(id: &str) -> Result<String, ClientError> {
    let valid = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid {
        return Err(ClientError::BadRequest(format!("invalid task id: {id:?}")));
    }
    Ok(format!("{TASKS_PATH}/{id}"))
}
