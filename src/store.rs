use chrono::Utc;
use tokio::sync::RwLock;

use crate::error::AppError;
use crate::models::{NewTodo, Todo, TodoPatch};

struct Inner {
    todos: Vec<Todo>,
    next_id: u64,
}

// List and id counter share one lock so ids are never handed out twice
pub struct TodoStore {
    inner: RwLock<Inner>,
}

impl Default for TodoStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TodoStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                todos: Vec::new(),
                next_id: 1,
            }),
        }
    }

    // Insertion order
    pub async fn list(&self) -> Vec<Todo> {
        self.inner.read().await.todos.clone()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.todos.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn create(&self, new_todo: NewTodo) -> Todo {
        let mut inner = self.inner.write().await;

        let todo = Todo {
            id: inner.next_id,
            title: new_todo.title.trim().to_string(),
            description: new_todo
                .description
                .map(|d| d.trim().to_string())
                .unwrap_or_default(),
            completed: false,
            created_at: Utc::now(),
        };
        inner.next_id += 1;
        inner.todos.push(todo.clone());
        todo
    }

    // no trimming here, unlike create
    pub async fn update(&self, id: u64, patch: TodoPatch) -> Result<Todo, AppError> {
        let mut inner = self.inner.write().await;
        let todo = inner
            .todos
            .iter_mut()
            .find(|todo| todo.id == id)
            .ok_or(AppError::NotFound)?;

        if let Some(title) = patch.title {
            todo.title = title;
        }
        if let Some(description) = patch.description {
            todo.description = description;
        }
        if let Some(completed) = patch.completed {
            todo.completed = completed;
        }
        Ok(todo.clone())
    }

    pub async fn delete(&self, id: u64) -> Result<(), AppError> {
        let mut inner = self.inner.write().await;
        let index = inner
            .todos
            .iter()
            .position(|todo| todo.id == id)
            .ok_or(AppError::NotFound)?;
        inner.todos.remove(index);
        Ok(())
    }
}
