//! In-memory capability fakes for exercising handlers without real storage,
//! a browser, or the network.

use crate::domain::dispatch::{
    Clock, HostInfo, NavigateError, Navigator, StoreError, ThemeStore, TodoStore, WeatherProbe,
    Workspace,
};
use crate::domain::theme::{Theme, builtin_themes, default_theme};
use crate::domain::todo::{TodoItem, TodoList};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

#[derive(Clone, Default)]
pub struct SharedTodoStore {
    pub saves: Rc<RefCell<Vec<Vec<TodoItem>>>>,
}

impl TodoStore for SharedTodoStore {
    fn save(&mut self, items: &[TodoItem]) -> Result<(), StoreError> {
        self.saves.borrow_mut().push(items.to_vec());
        Ok(())
    }
}

pub struct FailingTodoStore;

impl TodoStore for FailingTodoStore {
    fn save(&mut self, _items: &[TodoItem]) -> Result<(), StoreError> {
        Err(StoreError("failed to write todos: disk full".to_string()))
    }
}

#[derive(Clone, Default)]
pub struct SharedThemeStore {
    pub saved: Rc<RefCell<Option<Theme>>>,
}

impl ThemeStore for SharedThemeStore {
    fn save(&mut self, theme: &Theme) -> Result<(), StoreError> {
        *self.saved.borrow_mut() = Some(theme.clone());
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct RecordingNavigator {
    pub opened: Rc<RefCell<Vec<String>>>,
}

impl Navigator for RecordingNavigator {
    fn open_url(&mut self, url: &str) -> Result<(), NavigateError> {
        self.opened.borrow_mut().push(url.to_string());
        Ok(())
    }
}

pub struct CannedWeather(pub Result<String, String>);

impl WeatherProbe for CannedWeather {
    fn observe(&self) -> Result<String, String> {
        self.0.clone()
    }
}

pub struct FixedClock;

impl Clock for FixedClock {
    fn now_rfc3339(&self) -> String {
        "2026-08-07T00:00:00Z".to_string()
    }

    fn now_display(&self) -> String {
        "Fri Aug 07 2026 00:00:00".to_string()
    }
}

/// Handles into the fakes so tests can observe what handlers persisted or
/// opened after the workspace has consumed the store boxes.
pub struct TestHandles {
    pub todo_saves: Rc<RefCell<Vec<Vec<TodoItem>>>>,
    pub theme_saved: Rc<RefCell<Option<Theme>>>,
    pub opened: Rc<RefCell<Vec<String>>>,
}

pub fn test_workspace() -> (Workspace, TestHandles) {
    let todo_store = SharedTodoStore::default();
    let theme_store = SharedThemeStore::default();
    let navigator = RecordingNavigator::default();

    let handles = TestHandles {
        todo_saves: todo_store.saves.clone(),
        theme_saved: theme_store.saved.clone(),
        opened: navigator.opened.clone(),
    };

    let workspace = Workspace {
        host: HostInfo {
            hostname: "cybersec.test".to_string(),
        },
        todos: TodoList::default(),
        themes: builtin_themes(),
        active_theme: default_theme(),
        todo_store: Box::new(todo_store),
        theme_store: Box::new(theme_store),
        navigator: Box::new(navigator),
        weather: Arc::new(CannedWeather(Ok("Sunny +31°C".to_string()))),
        clock: Box::new(FixedClock),
    };

    (workspace, handles)
}
