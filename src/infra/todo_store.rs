use crate::domain::{StoreError, TodoItem, TodoList, TodoStore};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadTodosError {
    #[error("failed to read todo list: {0}")]
    Read(#[from] io::Error),

    #[error("failed to parse todo list: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum SaveTodosError {
    #[error("failed to encode todo list: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to write todo list: {0}")]
    Write(#[from] io::Error),
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct TodosFile {
    version: u32,
    items: Vec<TodoItem>,
}

fn todos_path(state_dir: &Path) -> PathBuf {
    state_dir.join("todos.json")
}

pub fn load_todos(state_dir: &Path) -> Result<TodoList, LoadTodosError> {
    let path = todos_path(state_dir);
    let raw = match fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(error) if error.kind() == io::ErrorKind::NotFound => {
            return Ok(TodoList::default());
        }
        Err(error) => return Err(error.into()),
    };

    let file: TodosFile = serde_json::from_str(&raw)?;
    Ok(TodoList::from_items(file.items))
}

pub fn save_todos(state_dir: &Path, items: &[TodoItem]) -> Result<(), SaveTodosError> {
    fs::create_dir_all(state_dir)?;

    let path = todos_path(state_dir);
    let tmp = path.with_extension("json.tmp");
    let file = TodosFile {
        version: 1,
        items: items.to_vec(),
    };
    let text = serde_json::to_string_pretty(&file)?;
    fs::write(&tmp, text)?;
    fs::rename(tmp, path)?;
    Ok(())
}

/// Durable store backing the `todo` command in normal runs.
pub struct JsonTodoStore {
    state_dir: PathBuf,
}

impl JsonTodoStore {
    pub fn new(state_dir: PathBuf) -> Self {
        Self { state_dir }
    }
}

impl TodoStore for JsonTodoStore {
    fn save(&mut self, items: &[TodoItem]) -> Result<(), StoreError> {
        save_todos(&self.state_dir, items).map_err(|error| StoreError(error.to_string()))
    }
}

/// Session-only fallback when no state directory is available; mutations
/// succeed but nothing outlives the process.
pub struct SessionTodoStore;

impl TodoStore for SessionTodoStore {
    fn save(&mut self, _items: &[TodoItem]) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn item(id: u64, text: &str) -> TodoItem {
        TodoItem {
            id,
            text: text.to_string(),
            completed: false,
            created_at_rfc3339: "2026-08-07T00:00:00Z".to_string(),
            completed_at_rfc3339: None,
        }
    }

    #[test]
    fn round_trips_items_through_the_versioned_file() {
        let dir = tempdir().expect("tempdir");
        let items = vec![item(1, "first"), item(3, "third")];

        save_todos(dir.path(), &items).expect("save");
        let loaded = load_todos(dir.path()).expect("load");

        assert_eq!(loaded.items(), items.as_slice());
    }

    #[test]
    fn missing_file_yields_an_empty_list() {
        let dir = tempdir().expect("tempdir");
        let loaded = load_todos(dir.path()).expect("load");
        assert!(loaded.is_empty());
    }

    #[test]
    fn corrupt_file_surfaces_a_parse_error() {
        let dir = tempdir().expect("tempdir");
        std::fs::write(dir.path().join("todos.json"), "{not json").expect("write");

        assert!(matches!(
            load_todos(dir.path()),
            Err(LoadTodosError::Parse(_))
        ));
    }

    #[test]
    fn ids_survive_persistence_so_they_are_never_reused() {
        let dir = tempdir().expect("tempdir");

        let mut todos = TodoList::default();
        todos.add("x", "2026-08-07T00:00:00Z".to_string());
        todos.add("y", "2026-08-07T00:00:00Z".to_string());
        todos.remove(1);
        save_todos(dir.path(), todos.items()).expect("save");

        let mut reloaded = load_todos(dir.path()).expect("load");
        let reply = reloaded.add("z", "2026-08-07T00:00:00Z".to_string());
        assert_eq!(reply.text, "Added #3: z");
    }
}
