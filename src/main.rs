mod app;
mod cli;
mod domain;
mod infra;
mod ui;

use crate::app::{AppCommand, AppEvent, AppModel};
use crate::cli::CliInvocation;
use crate::domain::{
    DispatchEffect, DispatchOutcome, HandlerError, HandlerReply, HostInfo, TodoList, Workspace,
    builtin_themes, default_theme, dispatch, finish_entry,
};
use crate::infra::{
    HttpWeatherProbe, JsonThemeStore, JsonTodoStore, SessionThemeStore, SessionTodoStore,
    SystemClock, SystemNavigator, load_active_theme, load_todos, resolve_hostname,
    resolve_state_dir,
};
use crate::ui::Palette;
use crossterm::event::{
    self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    Event, KeyEventKind,
};
use crossterm::terminal::size as terminal_size;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use crossterm::{ExecutableCommand, execute};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io::{self, Stdout, Write};
use std::sync::Arc;
use std::sync::mpsc::{Sender, channel};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
enum MainError {
    #[error(transparent)]
    App(#[from] crate::app::AppError),

    #[error(transparent)]
    Cli(#[from] crate::cli::CliRunError),
}

/// Completion of a slow handler running on a worker thread.
enum DispatchSignal {
    Finished {
        command: String,
        result: Result<HandlerReply, HandlerError>,
    },
}

fn main() {
    if let Err(error) = run_main() {
        let mut err = io::stderr().lock();
        let _ = writeln!(err, "{error}");
        std::process::exit(1);
    }
}

fn run_main() -> Result<(), MainError> {
    let args = std::env::args().collect::<Vec<_>>();
    let invocation = match crate::cli::parse_invocation(&args) {
        Ok(invocation) => invocation,
        Err(error) => {
            let mut err = io::stderr().lock();
            let _ = writeln!(err, "{error}");
            let _ = writeln!(err);
            print_help();
            std::process::exit(2);
        }
    };

    match invocation {
        CliInvocation::PrintHelp => {
            print_help();
            Ok(())
        }
        CliInvocation::PrintVersion => {
            let mut out = io::stdout().lock();
            let _ = writeln!(out, "{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        CliInvocation::Tui => Ok(run_tui()?),
        CliInvocation::Exec { line } => {
            let (mut workspace, _notices) = build_workspace();
            crate::cli::run_exec(&mut workspace, &line)?;
            Ok(())
        }
    }
}

fn print_help() {
    let text = format!(
        "{name} — the CyberSec Division terminal\n\nUSAGE:\n  {name}                      Start the interactive terminal\n  {name} exec <command...>    Run one terminal command and print its output\n  {name} --help | --version\n\nTERMINAL COMMANDS:\n  Type `help` at the prompt (or run `{name} exec help`) for the full list.\n",
        name = env!("CARGO_PKG_NAME")
    );
    let mut out = io::stdout().lock();
    let _ = write!(out, "{text}");
}

/// Assembles the capability bundle. Storage problems degrade to defaults or
/// session-only stores with a notice; they never block startup.
fn build_workspace() -> (Workspace, Vec<String>) {
    let mut notices = Vec::new();
    let themes = builtin_themes();
    let host = HostInfo {
        hostname: resolve_hostname(),
    };

    let (todos, active_theme, todo_store, theme_store) = match resolve_state_dir() {
        Ok(state_dir) => {
            let todos = match load_todos(&state_dir) {
                Ok(todos) => todos,
                Err(error) => {
                    notices.push(format!("Todo list reset (failed to load): {error}"));
                    TodoList::default()
                }
            };

            let active_theme = match load_active_theme(&state_dir) {
                Ok(Some(theme)) => theme,
                Ok(None) => default_theme(),
                Err(error) => {
                    notices.push(format!("Theme reset (failed to load): {error}"));
                    default_theme()
                }
            };

            let todo_store: Box<dyn crate::domain::TodoStore> =
                Box::new(JsonTodoStore::new(state_dir.clone()));
            let theme_store: Box<dyn crate::domain::ThemeStore> =
                Box::new(JsonThemeStore::new(state_dir));
            (todos, active_theme, todo_store, theme_store)
        }
        Err(error) => {
            notices.push(format!("Persistence disabled: {error}"));
            (
                TodoList::default(),
                default_theme(),
                Box::new(SessionTodoStore) as Box<dyn crate::domain::TodoStore>,
                Box::new(SessionThemeStore) as Box<dyn crate::domain::ThemeStore>,
            )
        }
    };

    let workspace = Workspace {
        host,
        todos,
        themes,
        active_theme,
        todo_store,
        theme_store,
        navigator: Box::new(SystemNavigator),
        weather: Arc::new(HttpWeatherProbe::new()),
        clock: Box::new(SystemClock),
    };
    (workspace, notices)
}

fn run_tui() -> Result<(), crate::app::AppError> {
    let (mut workspace, notices) = build_workspace();
    let palette = Palette::from_theme(&workspace.active_theme);
    let mut model = AppModel::new(palette, workspace.active_theme.name.clone());
    if !notices.is_empty() {
        model = model.with_notice(Some(notices.join("; ")));
    }

    let mut terminal = setup_terminal()?;
    if let Ok((width, height)) = terminal_size() {
        model = model.with_terminal_size(width, height);
    }
    let result = run(&mut terminal, &mut model, &mut workspace);
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>, crate::app::AppError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let _ = stdout.execute(EnableBracketedPaste);
    let _ = stdout.execute(EnableMouseCapture);
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

fn restore_terminal(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
) -> Result<(), crate::app::AppError> {
    disable_raw_mode()?;
    let _ = execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        DisableMouseCapture
    );
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    model: &mut AppModel,
    workspace: &mut Workspace,
) -> Result<(), crate::app::AppError> {
    let (dispatch_tx, dispatch_rx) = channel::<DispatchSignal>();

    // Greet with the banner before the first prompt.
    if submit_line(model, workspace, &dispatch_tx, "banner".to_string()) {
        return Ok(());
    }

    loop {
        while let Ok(signal) = dispatch_rx.try_recv() {
            match signal {
                DispatchSignal::Finished { command, result } => {
                    let (entry, effect) = finish_entry(&command, result);
                    model.history.push(entry);
                    model.busy = None;
                    model.scroll_from_bottom = 0;
                    if apply_effect(model, workspace, effect) {
                        return Ok(());
                    }
                    if drain_pending(model, workspace, &dispatch_tx) {
                        return Ok(());
                    }
                }
            }
        }

        ui::clamp_scroll_state(model);
        terminal.draw(|frame| ui::render(frame, model))?;

        if event::poll(Duration::from_millis(150))? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Release {
                        continue;
                    }
                    let (next, command) = app::update(model.clone(), AppEvent::Key(key));
                    *model = next;
                    match command {
                        AppCommand::None => {}
                        AppCommand::Quit => return Ok(()),
                        AppCommand::ClearHistory => {
                            model.history.clear();
                            model.recall.reset();
                            model.scroll_from_bottom = 0;
                        }
                        AppCommand::Submit { line } => {
                            if submit_line(model, workspace, &dispatch_tx, line) {
                                return Ok(());
                            }
                        }
                    }
                }
                Event::Paste(text) => {
                    let (next, _command) = app::update(model.clone(), AppEvent::Paste(text));
                    *model = next;
                }
                Event::Mouse(mouse) => {
                    let (next, _command) = app::update(model.clone(), AppEvent::Mouse(mouse));
                    *model = next;
                }
                Event::Resize(width, height) => {
                    *model = model.with_terminal_size(width, height);
                }
                _ => {}
            }
        }
    }
}

/// Dispatches one submitted line. Returns true when the session should end
/// (the `exit` command). Slow commands set the busy flag and hand their job
/// to a worker thread; everything else settles synchronously.
fn submit_line(
    model: &mut AppModel,
    workspace: &mut Workspace,
    dispatch_tx: &Sender<DispatchSignal>,
    line: String,
) -> bool {
    match dispatch(workspace, &line) {
        DispatchOutcome::Ignored => false,
        DispatchOutcome::Cleared => {
            model.history.clear();
            model.recall.reset();
            model.scroll_from_bottom = 0;
            false
        }
        DispatchOutcome::Entry { entry, effect } => {
            model.history.push(entry);
            model.scroll_from_bottom = 0;
            apply_effect(model, workspace, effect)
        }
        DispatchOutcome::InFlight { command, job } => {
            model.busy = Some(command.clone());
            let tx = dispatch_tx.clone();
            std::thread::spawn(move || {
                let result = job.run();
                let _ = tx.send(DispatchSignal::Finished { command, result });
            });
            false
        }
    }
}

fn apply_effect(
    model: &mut AppModel,
    workspace: &Workspace,
    effect: Option<DispatchEffect>,
) -> bool {
    match effect {
        None => false,
        Some(DispatchEffect::Quit) => true,
        Some(DispatchEffect::ThemeChanged) => {
            model.palette = Palette::from_theme(&workspace.active_theme);
            model.theme_name = workspace.active_theme.name.clone();
            false
        }
    }
}

/// Runs queued submissions in FIFO order until one goes in flight or the
/// queue empties. Returns true when a queued `exit` ends the session.
fn drain_pending(
    model: &mut AppModel,
    workspace: &mut Workspace,
    dispatch_tx: &Sender<DispatchSignal>,
) -> bool {
    while model.busy.is_none() {
        let Some(line) = model.pending.pop_front() else {
            break;
        };
        if submit_line(model, workspace, dispatch_tx, line) {
            return true;
        }
    }
    false
}
