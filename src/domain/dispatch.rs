use crate::domain::commands::registry;
use crate::domain::{HistoryEntry, Theme, TodoItem, TodoList};
use std::sync::Arc;
use thiserror::Error;

#[derive(Clone, Debug, Error)]
#[error("{0}")]
pub struct StoreError(pub String);

#[derive(Clone, Debug, Error)]
#[error("{0}")]
pub struct NavigateError(pub String);

/// Mirrors the todo list to durable storage after each mutation.
pub trait TodoStore {
    fn save(&mut self, items: &[TodoItem]) -> Result<(), StoreError>;
}

/// Persists the active color scheme wholesale; no merge semantics.
pub trait ThemeStore {
    fn save(&mut self, theme: &Theme) -> Result<(), StoreError>;
}

/// Opens external resources (browser tabs, mail client).
pub trait Navigator {
    fn open_url(&mut self, url: &str) -> Result<(), NavigateError>;
}

/// One-line weather observation; the only handler capability that crosses a
/// thread boundary, hence the Send + Sync bound.
pub trait WeatherProbe: Send + Sync {
    fn observe(&self) -> Result<String, String>;
}

pub trait Clock {
    fn now_rfc3339(&self) -> String;
    fn now_display(&self) -> String;
}

#[derive(Clone, Debug)]
pub struct HostInfo {
    pub hostname: String,
}

/// Capability bundle handed to handlers. Tests substitute in-memory fakes
/// for every trait object here.
pub struct Workspace {
    pub host: HostInfo,
    pub todos: TodoList,
    pub themes: Vec<Theme>,
    pub active_theme: Theme,
    pub todo_store: Box<dyn TodoStore>,
    pub theme_store: Box<dyn ThemeStore>,
    pub navigator: Box<dyn Navigator>,
    pub weather: Arc<dyn WeatherProbe>,
    pub clock: Box<dyn Clock>,
}

/// Side effects a handler can request from the application shell, beyond its
/// output text.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DispatchEffect {
    Quit,
    ThemeChanged,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HandlerReply {
    pub text: String,
    pub effect: Option<DispatchEffect>,
}

impl HandlerReply {
    pub fn with_effect(text: impl Into<String>, effect: DispatchEffect) -> Self {
        Self {
            text: text.into(),
            effect: Some(effect),
        }
    }
}

impl From<String> for HandlerReply {
    fn from(text: String) -> Self {
        Self { text, effect: None }
    }
}

impl From<&str> for HandlerReply {
    fn from(text: &str) -> Self {
        Self {
            text: text.to_string(),
            effect: None,
        }
    }
}

/// Caught at the dispatch boundary and rendered as a single `Error:` line;
/// a failing handler never takes the session down.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[error("{message}")]
pub struct HandlerError {
    message: String,
}

impl HandlerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<StoreError> for HandlerError {
    fn from(error: StoreError) -> Self {
        Self::new(error.to_string())
    }
}

impl From<NavigateError> for HandlerError {
    fn from(error: NavigateError) -> Self {
        Self::new(error.to_string())
    }
}

pub type HandlerFn = fn(&mut Workspace, &[String]) -> Result<HandlerReply, HandlerError>;
pub type SlowHandlerFn = fn(&SlowContext, &[String]) -> Result<HandlerReply, HandlerError>;

/// The capabilities a slow handler may use off the UI thread.
#[derive(Clone)]
pub struct SlowContext {
    pub weather: Arc<dyn WeatherProbe>,
}

/// Tagged handler registry entry: pure handlers read only static data and
/// their arguments, effectful handlers touch workspace capabilities, slow
/// handlers run on a worker thread while the busy flag is set.
#[derive(Clone, Copy)]
pub enum Handler {
    Pure(HandlerFn),
    Effectful(HandlerFn),
    Slow(SlowHandlerFn),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HandlerKind {
    Pure,
    Effectful,
    Slow,
}

pub struct CommandSpec {
    pub name: &'static str,
    pub handler: Handler,
}

impl CommandSpec {
    pub fn kind(&self) -> HandlerKind {
        match self.handler {
            Handler::Pure(_) => HandlerKind::Pure,
            Handler::Effectful(_) => HandlerKind::Effectful,
            Handler::Slow(_) => HandlerKind::Slow,
        }
    }
}

pub fn find_command(name: &str) -> Option<&'static CommandSpec> {
    registry().iter().find(|spec| spec.name == name)
}

/// Deferred execution of a slow handler, run to completion on a worker
/// thread and reported back over a channel.
pub struct SlowJob {
    job: Box<dyn FnOnce() -> Result<HandlerReply, HandlerError> + Send>,
}

impl SlowJob {
    pub fn run(self) -> Result<HandlerReply, HandlerError> {
        (self.job)()
    }
}

pub enum DispatchOutcome {
    /// Blank input: no history entry, nothing happens.
    Ignored,
    /// `clear` intercepted before table lookup: caller wipes the history.
    Cleared,
    /// A settled command, ready to append to the history.
    Entry {
        entry: HistoryEntry,
        effect: Option<DispatchEffect>,
    },
    /// A slow command; the caller sets the busy flag and runs the job on a
    /// worker thread.
    InFlight { command: String, job: SlowJob },
}

pub fn dispatch(workspace: &mut Workspace, raw: &str) -> DispatchOutcome {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return DispatchOutcome::Ignored;
    }

    if trimmed.eq_ignore_ascii_case("clear") {
        return DispatchOutcome::Cleared;
    }

    let mut tokens = trimmed.split_whitespace();
    let Some(first) = tokens.next() else {
        return DispatchOutcome::Ignored;
    };
    let args = tokens.map(str::to_string).collect::<Vec<_>>();

    let Some(spec) = find_command(&first.to_lowercase()) else {
        return DispatchOutcome::Entry {
            entry: HistoryEntry::new(trimmed, &format!("Command not found: {first}")),
            effect: None,
        };
    };

    match spec.handler {
        Handler::Pure(run) | Handler::Effectful(run) => {
            let (entry, effect) = finish_entry(trimmed, run(workspace, &args));
            DispatchOutcome::Entry { entry, effect }
        }
        Handler::Slow(run) => {
            let context = SlowContext {
                weather: workspace.weather.clone(),
            };
            let command = trimmed.to_string();
            DispatchOutcome::InFlight {
                command,
                job: SlowJob {
                    job: Box::new(move || run(&context, &args)),
                },
            }
        }
    }
}

/// Turns a handler result into a history entry, applying the error boundary.
pub fn finish_entry(
    command: &str,
    result: Result<HandlerReply, HandlerError>,
) -> (HistoryEntry, Option<DispatchEffect>) {
    match result {
        Ok(reply) => (HistoryEntry::new(command, &reply.text), reply.effect),
        Err(error) => (
            HistoryEntry::new(command, &format!("Error: {error}")),
            None,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::testing::test_workspace;
    use crate::domain::{HandlerKind, find_theme};

    fn entry_of(outcome: DispatchOutcome) -> (HistoryEntry, Option<DispatchEffect>) {
        match outcome {
            DispatchOutcome::Entry { entry, effect } => (entry, effect),
            DispatchOutcome::Ignored => panic!("unexpected Ignored"),
            DispatchOutcome::Cleared => panic!("unexpected Cleared"),
            DispatchOutcome::InFlight { .. } => panic!("unexpected InFlight"),
        }
    }

    #[test]
    fn blank_input_is_ignored() {
        let (mut workspace, _handles) = test_workspace();
        assert!(matches!(
            dispatch(&mut workspace, "   "),
            DispatchOutcome::Ignored
        ));
    }

    #[test]
    fn unknown_command_keeps_original_casing() {
        let (mut workspace, _handles) = test_workspace();
        let (entry, effect) = entry_of(dispatch(&mut workspace, "FooBar baz"));

        assert_eq!(entry.outputs, vec!["Command not found: FooBar"]);
        assert_eq!(entry.command, "FooBar baz");
        assert_eq!(effect, None);
    }

    #[test]
    fn clear_is_intercepted_before_the_table() {
        let (mut workspace, _handles) = test_workspace();
        assert!(matches!(
            dispatch(&mut workspace, "  CLEAR  "),
            DispatchOutcome::Cleared
        ));
    }

    #[test]
    fn lookup_is_case_insensitive_with_verbatim_args() {
        let (mut workspace, _handles) = test_workspace();
        let (entry, _) = entry_of(dispatch(&mut workspace, "ECHO Hello World"));
        assert_eq!(entry.outputs, vec!["Hello World"]);
    }

    #[test]
    fn handler_failure_renders_a_single_error_line() {
        let (mut workspace, _handles) = test_workspace();
        workspace.todo_store = Box::new(crate::domain::testing::FailingTodoStore);

        let (entry, effect) = entry_of(dispatch(&mut workspace, "todo add x"));
        assert_eq!(entry.outputs.len(), 1);
        assert!(entry.outputs[0].starts_with("Error: "));
        assert_eq!(effect, None);
    }

    #[test]
    fn theme_set_persists_wholesale_and_signals_reload() {
        let (mut workspace, handles) = test_workspace();
        let (entry, effect) = entry_of(dispatch(&mut workspace, "theme set synthwave"));

        assert_eq!(entry.outputs, vec!["Theme set to synthwave."]);
        assert_eq!(effect, Some(DispatchEffect::ThemeChanged));
        let saved = handles.theme_saved.borrow().clone().expect("persisted");
        assert_eq!(saved.name, "synthwave");
        assert_eq!(workspace.active_theme.name, "synthwave");
    }

    #[test]
    fn unknown_theme_leaves_persisted_state_unchanged() {
        let (mut workspace, handles) = test_workspace();
        let (entry, effect) = entry_of(dispatch(&mut workspace, "theme set doesnotexist"));

        assert_eq!(
            entry.outputs,
            vec!["Theme 'doesnotexist' not found. Try 'theme ls'."]
        );
        assert_eq!(effect, None);
        assert!(handles.theme_saved.borrow().is_none());
        assert_eq!(
            workspace.active_theme.name,
            find_theme(&workspace.themes, "gruvbox")
                .expect("default present")
                .name
        );
    }

    #[test]
    fn todo_mutations_mirror_to_the_store() {
        let (mut workspace, handles) = test_workspace();

        entry_of(dispatch(&mut workspace, "todo add buy milk"));
        entry_of(dispatch(&mut workspace, "todo done 1"));
        assert_eq!(handles.todo_saves.borrow().len(), 2);

        // listing is read-only
        entry_of(dispatch(&mut workspace, "todo ls"));
        assert_eq!(handles.todo_saves.borrow().len(), 2);
    }

    #[test]
    fn link_commands_open_urls_and_confirm() {
        let (mut workspace, handles) = test_workspace();
        let (entry, _) = entry_of(dispatch(&mut workspace, "sudo rm -rf /"));

        assert_eq!(entry.outputs, vec!["Admin access required. Redirecting..."]);
        assert_eq!(handles.opened.borrow().len(), 1);
        assert!(handles.opened.borrow()[0].contains("youtube.com"));
    }

    #[test]
    fn exit_requests_quit_after_rendering() {
        let (mut workspace, _handles) = test_workspace();
        let (entry, effect) = entry_of(dispatch(&mut workspace, "exit"));

        assert_eq!(effect, Some(DispatchEffect::Quit));
        assert!(!entry.outputs.is_empty());
    }

    #[test]
    fn weather_is_the_only_slow_command_and_runs_off_thread() {
        let (mut workspace, _handles) = test_workspace();
        let DispatchOutcome::InFlight { command, job } = dispatch(&mut workspace, "weather") else {
            panic!("weather should go in flight");
        };
        assert_eq!(command, "weather");

        let reply = job.run().expect("canned weather");
        assert_eq!(reply.text, "Sunny +31°C");

        for spec in registry() {
            let expected = spec.name == "weather";
            assert_eq!(spec.kind() == HandlerKind::Slow, expected, "{}", spec.name);
        }
    }

    #[test]
    fn registry_names_are_lowercase_and_unique() {
        let mut seen = std::collections::BTreeSet::new();
        for spec in registry() {
            assert_eq!(spec.name, spec.name.to_lowercase(), "{}", spec.name);
            assert!(seen.insert(spec.name), "duplicate {}", spec.name);
        }
    }

    #[test]
    fn side_effect_free_commands_are_classified_pure() {
        for name in ["help", "echo", "team", "banner", "about", "matrix"] {
            let spec = find_command(name).expect(name);
            assert_eq!(spec.kind(), HandlerKind::Pure, "{name}");
        }
        for name in ["theme", "todo", "sudo", "repo", "discord", "email", "exit"] {
            let spec = find_command(name).expect(name);
            assert_eq!(spec.kind(), HandlerKind::Effectful, "{name}");
        }
    }
}
