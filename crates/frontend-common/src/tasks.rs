//! Task list state for the dashboard

use std::rc::Rc;
use todo_http::types::Task;
use yew::prelude::*;

/// Tasks shown on the dashboard
#[derive(Clone, Debug, PartialEq)]
pub struct TaskList {
    pub tasks: Vec<Task>,
    pub is_loading: bool,
    pub error: Option<String>,
}

/// Task list actions
pub enum TaskAction {
    Loaded(Vec<Task>),
    Added(Task),
    Updated(Task),
    Removed(String),
    Failed(String),
    DismissError,
}

impl Default for TaskList {
    fn default() -> Self {
        Self {
            tasks: Vec::new(),
            is_loading: true, // Start loading until the first fetch returns
            error: None,
        }
    }
}

impl TaskList {
    pub fn remaining(&self) -> usize {
        self.tasks.iter().filter(|task| !task.done).count()
    }
}

impl Reducible for TaskList {
    type Action = TaskAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            TaskAction::Loaded(tasks) => {
                next.tasks = tasks;
                next.is_loading = false;
                next.error = None;
            }
            TaskAction::Added(task) => {
                next.tasks.push(task);
                next.error = None;
            }
            TaskAction::Updated(task) => {
                if let Some(slot) = next.tasks.iter_mut().find(|t| t.id == task.id) {
                    *slot = task;
                }
                next.error = None;
            }
            TaskAction::Removed(id) => {
                next.tasks.retain(|t| t.id != id);
                next.error = None;
            }
            TaskAction::Failed(message) => {
                next.is_loading = false;
                // Cancelled calls produce no message
                if !message.is_empty() {
                    next.error = Some(message);
                }
            }
            TaskAction::DismissError => next.error = None,
        }
        Rc::new(next)
    }
}
