mod line_editor;

use crate::domain::{History, RecallCursor, RecallStep};
use crate::ui::Palette;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use std::collections::VecDeque;
use thiserror::Error;

pub use line_editor::LineEditor;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Function-key shortcuts for the most common commands; each fires through
/// the regular submission path and queues like any other input while busy.
pub const QUICK_ACTIONS: &[(&str, &str)] = &[
    ("F1", "help"),
    ("F2", "about"),
    ("F3", "team"),
    ("F4", "clear"),
];

#[derive(Clone, Debug)]
pub struct AppModel {
    pub history: History,
    pub editor: LineEditor,
    pub recall: RecallCursor,
    /// Command line currently running on a worker thread, if any. While set,
    /// submissions queue instead of dispatching; editing stays enabled.
    pub busy: Option<String>,
    /// Submissions that arrived while busy, drained FIFO as commands settle.
    pub pending: VecDeque<String>,
    pub palette: Palette,
    pub theme_name: String,
    pub notice: Option<String>,
    pub scroll_from_bottom: u16,
    pub terminal_size: (u16, u16),
}

impl AppModel {
    pub fn new(palette: Palette, theme_name: String) -> Self {
        Self {
            history: History::default(),
            editor: LineEditor::new(),
            recall: RecallCursor::default(),
            busy: None,
            pending: VecDeque::new(),
            palette,
            theme_name,
            notice: None,
            scroll_from_bottom: 0,
            terminal_size: (0, 0),
        }
    }

    pub fn with_notice(mut self, notice: Option<String>) -> Self {
        self.notice = notice;
        self
    }

    pub fn with_terminal_size(&self, width: u16, height: u16) -> Self {
        let mut next = self.clone();
        next.terminal_size = (width, height);
        next
    }
}

#[derive(Clone, Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Paste(String),
    Mouse(MouseEvent),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AppCommand {
    None,
    Quit,
    /// Dispatch this line against the workspace and record the outcome.
    Submit { line: String },
    /// Wipe the scroll-back without dispatching (Ctrl+L).
    ClearHistory,
}

pub fn update(model: AppModel, event: AppEvent) -> (AppModel, AppCommand) {
    match event {
        AppEvent::Key(key) => update_on_key(model, key),
        AppEvent::Paste(text) => update_on_paste(model, text),
        AppEvent::Mouse(mouse) => update_on_mouse(model, mouse),
    }
}

fn update_on_key(model: AppModel, key: KeyEvent) -> (AppModel, AppCommand) {
    let mut model = model;
    model.notice = None;

    let control = key.modifiers.contains(KeyModifiers::CONTROL);
    if control && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q')) {
        return (model, AppCommand::Quit);
    }
    if control && key.code == KeyCode::Char('l') {
        return (model, AppCommand::ClearHistory);
    }
    if control && key.code == KeyCode::Char('a') {
        model.editor.move_home();
        return (model, AppCommand::None);
    }
    if control && key.code == KeyCode::Char('e') {
        model.editor.move_end();
        return (model, AppCommand::None);
    }

    if let KeyCode::F(n) = key.code {
        let index = n.saturating_sub(1) as usize;
        if let Some((_, command)) = QUICK_ACTIONS.get(index) {
            return submit_or_queue(model, command.to_string());
        }
        return (model, AppCommand::None);
    }

    match key.code {
        KeyCode::Enter => {
            let line = model.editor.take();
            model.recall.reset();
            if line.trim().is_empty() {
                return (model, AppCommand::None);
            }
            submit_or_queue(model, line)
        }
        KeyCode::Up => {
            if let RecallStep::Load(text) = model.recall.back(&model.history) {
                model.editor.set_text(text);
            }
            (model, AppCommand::None)
        }
        KeyCode::Down => {
            match model.recall.forward(&model.history) {
                RecallStep::Load(text) => model.editor.set_text(text),
                RecallStep::ClearBuffer => model.editor.clear(),
                RecallStep::Unchanged => {}
            }
            (model, AppCommand::None)
        }
        KeyCode::Left => {
            model.editor.move_left();
            (model, AppCommand::None)
        }
        KeyCode::Right => {
            model.editor.move_right();
            (model, AppCommand::None)
        }
        KeyCode::Home => {
            model.editor.move_home();
            (model, AppCommand::None)
        }
        KeyCode::End => {
            model.editor.move_end();
            (model, AppCommand::None)
        }
        KeyCode::Backspace => {
            model.editor.backspace();
            (model, AppCommand::None)
        }
        KeyCode::Delete => {
            model.editor.delete_forward();
            (model, AppCommand::None)
        }
        KeyCode::PageUp => {
            model.scroll_from_bottom = model.scroll_from_bottom.saturating_add(10);
            (model, AppCommand::None)
        }
        KeyCode::PageDown => {
            model.scroll_from_bottom = model.scroll_from_bottom.saturating_sub(10);
            (model, AppCommand::None)
        }
        KeyCode::Char(ch) if !control => {
            model.editor.insert_char(ch);
            (model, AppCommand::None)
        }
        _ => (model, AppCommand::None),
    }
}

fn update_on_paste(model: AppModel, text: String) -> (AppModel, AppCommand) {
    let mut model = model;
    model.editor.insert_str(&text);
    (model, AppCommand::None)
}

fn update_on_mouse(model: AppModel, mouse: MouseEvent) -> (AppModel, AppCommand) {
    let mut model = model;
    match mouse.kind {
        MouseEventKind::ScrollUp => {
            model.scroll_from_bottom = model.scroll_from_bottom.saturating_add(3);
        }
        MouseEventKind::ScrollDown => {
            model.scroll_from_bottom = model.scroll_from_bottom.saturating_sub(3);
        }
        _ => {}
    }
    (model, AppCommand::None)
}

/// One submission path for the prompt and the quick actions: while a command
/// is in flight new lines queue FIFO instead of racing the busy one.
fn submit_or_queue(mut model: AppModel, line: String) -> (AppModel, AppCommand) {
    if model.busy.is_some() {
        model.pending.push_back(line);
        return (model, AppCommand::None);
    }
    (model, AppCommand::Submit { line })
}
