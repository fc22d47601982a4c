use crate::domain::dispatch::{
    CommandSpec, DispatchEffect, Handler, HandlerError, HandlerReply, SlowContext, Workspace,
};
use crate::domain::society;
use crate::domain::theme::find_theme;
use crate::domain::todo::TodoFilter;

/// The command table. Names are the lowercase lookup keys; the first input
/// token is lowercased before matching. Order follows the help text.
static COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "help",
        handler: Handler::Pure(help),
    },
    CommandSpec {
        name: "about",
        handler: Handler::Pure(about),
    },
    CommandSpec {
        name: "team",
        handler: Handler::Pure(team),
    },
    CommandSpec {
        name: "info-coordinators",
        handler: Handler::Pure(info_coordinators),
    },
    CommandSpec {
        name: "info-members",
        handler: Handler::Pure(info_members),
    },
    CommandSpec {
        name: "info-cybersec",
        handler: Handler::Pure(info_cybersec),
    },
    CommandSpec {
        name: "achievements",
        handler: Handler::Pure(achievements),
    },
    CommandSpec {
        name: "clear",
        handler: Handler::Pure(clear),
    },
    CommandSpec {
        name: "exit",
        handler: Handler::Effectful(exit),
    },
    CommandSpec {
        name: "whoami",
        handler: Handler::Pure(whoami),
    },
    CommandSpec {
        name: "hostname",
        handler: Handler::Effectful(hostname),
    },
    CommandSpec {
        name: "date",
        handler: Handler::Effectful(date),
    },
    CommandSpec {
        name: "echo",
        handler: Handler::Pure(echo),
    },
    CommandSpec {
        name: "neofetch",
        handler: Handler::Pure(neofetch),
    },
    CommandSpec {
        name: "todo",
        handler: Handler::Effectful(todo),
    },
    CommandSpec {
        name: "weather",
        handler: Handler::Slow(weather),
    },
    CommandSpec {
        name: "curl",
        handler: Handler::Pure(curl),
    },
    CommandSpec {
        name: "ping",
        handler: Handler::Pure(ping),
    },
    CommandSpec {
        name: "scan",
        handler: Handler::Pure(scan),
    },
    CommandSpec {
        name: "theme",
        handler: Handler::Effectful(theme),
    },
    CommandSpec {
        name: "banner",
        handler: Handler::Pure(banner),
    },
    CommandSpec {
        name: "matrix",
        handler: Handler::Pure(matrix),
    },
    CommandSpec {
        name: "hack",
        handler: Handler::Pure(hack),
    },
    CommandSpec {
        name: "sudo",
        handler: Handler::Effectful(sudo),
    },
    CommandSpec {
        name: "encrypt",
        handler: Handler::Pure(encrypt),
    },
    CommandSpec {
        name: "hash",
        handler: Handler::Pure(hash),
    },
    CommandSpec {
        name: "repo",
        handler: Handler::Effectful(repo),
    },
    CommandSpec {
        name: "discord",
        handler: Handler::Effectful(discord),
    },
    CommandSpec {
        name: "email",
        handler: Handler::Effectful(email),
    },
];

pub fn registry() -> &'static [CommandSpec] {
    COMMANDS
}

const HELP_TEXT: &str = "\
CYBERSEC DIVISION - TERMINAL COMMANDS
=====================================
[ CYBERSEC ]
  > about
  > team
  > info-coordinators
  > info-members
  > achievements

[ SYSTEM ]
  > help
  > clear
  > exit
  > whoami
  > hostname
  > date
  > echo
  > neofetch

[ TOOLS ]
  > todo
  > weather
  > curl
  > ping

[ CUSTOM ]
  > theme
  > banner

[ FUN ]
  > matrix
  > hack
  > sudo

Tip: Type \"clear\" to clean the terminal.";

const BANNER_TEXT: &str = r"
  /$$$$$$            /$$                          /$$$$$$
 /$$__  $$          | $$                         /$$__  $$
| $$  \__/ /$$   /$$| $$$$$$$   /$$$$$$   /$$$$$$| $$  \__/  /$$$$$$   /$$$$$$$
| $$      | $$  | $$| $$__  $$ /$$__  $$ /$$__  $$|  $$$$$$  /$$__  $$ /$$_____/
| $$      | $$  | $$| $$  \ $$| $$$$$$$$| $$  \__/ \____  $$| $$$$$$$$| $$
| $$    $$| $$  | $$| $$  | $$| $$_____/| $$       /$$  \ $$| $$_____/| $$
|  $$$$$$/|  $$$$$$$| $$$$$$$/|  $$$$$$$| $$      |  $$$$$$/|  $$$$$$$|  $$$$$$$
 \______/  \____  $$|_______/  \_______/|__/       \______/  \_______/ \_______/
           /$$  | $$
          |  $$$$$$/
           \______/

Welcome to CyberSec Division Terminal v2.0
==========================================

[!] Institute: IIIT Allahabad
[!] Location:  Allahabad, India
[!] Website:   geekhaven.iiita.ac.in
[!] GitHub:    github.com/geekhaven/cybersec

Mission: To foster a community of security researchers, ethical hackers,
and CTF enthusiasts dedicated to securing the digital world.

Type 'help' to see available commands.
Type 'team' to meet our coordinators and members.";

const NEOFETCH_TEXT: &str = r"
    .--------.
    | /\ /\  |   guest@cybersec
    | \ v /  |   --------------
    |  |_|   |   OS: GeekHaven OS
    '--------'   Shell: wingterm";

fn help(_workspace: &mut Workspace, _args: &[String]) -> Result<HandlerReply, HandlerError> {
    Ok(HELP_TEXT.into())
}

fn about(_workspace: &mut Workspace, _args: &[String]) -> Result<HandlerReply, HandlerError> {
    Ok(format!(
        "\nCYBERSEC DIVISION - GEEKHAVEN IIITA\n===================================\n\n{}\nLead: {}",
        society::SOCIETY_DESCRIPTION,
        society::SOCIETY_LEAD
    )
    .into())
}

fn team(_workspace: &mut Workspace, _args: &[String]) -> Result<HandlerReply, HandlerError> {
    Ok(format!(
        "{}\n\n{}",
        society::format_coordinators(),
        society::format_members()
    )
    .into())
}

fn info_coordinators(
    _workspace: &mut Workspace,
    args: &[String],
) -> Result<HandlerReply, HandlerError> {
    if args.is_empty() {
        return Ok(society::format_coordinators().into());
    }

    let query = args.join(" ");
    match society::find_coordinator(&query) {
        Some(member) => Ok(society::format_coordinator_profile(member).into()),
        None => Ok("Coordinator not found.".into()),
    }
}

fn info_members(_workspace: &mut Workspace, args: &[String]) -> Result<HandlerReply, HandlerError> {
    if args.is_empty() {
        return Ok(society::format_members().into());
    }

    let query = args.join(" ");
    match society::find_member(&query) {
        Some(member) => Ok(society::format_member_profile(member).into()),
        None => Ok("Member not found.".into()),
    }
}

fn info_cybersec(
    _workspace: &mut Workspace,
    _args: &[String],
) -> Result<HandlerReply, HandlerError> {
    Ok(format!(
        "Lead: {}\nAbout: {}",
        society::SOCIETY_LEAD,
        society::SOCIETY_DESCRIPTION
    )
    .into())
}

fn achievements(
    _workspace: &mut Workspace,
    _args: &[String],
) -> Result<HandlerReply, HandlerError> {
    let lines = society::ACHIEVEMENTS
        .iter()
        .map(|achievement| format!("* {achievement}"))
        .collect::<Vec<_>>();
    Ok(lines.join("\n").into())
}

/// Bare `clear` never reaches the table (the dispatcher intercepts it); this
/// fires only for `clear <junk>` and produces a single empty output line.
fn clear(_workspace: &mut Workspace, _args: &[String]) -> Result<HandlerReply, HandlerError> {
    Ok("".into())
}

fn exit(_workspace: &mut Workspace, _args: &[String]) -> Result<HandlerReply, HandlerError> {
    Ok(HandlerReply::with_effect(
        "Session closed.",
        DispatchEffect::Quit,
    ))
}

fn whoami(_workspace: &mut Workspace, _args: &[String]) -> Result<HandlerReply, HandlerError> {
    Ok("guest@cybersec".into())
}

fn hostname(workspace: &mut Workspace, _args: &[String]) -> Result<HandlerReply, HandlerError> {
    Ok(workspace.host.hostname.clone().into())
}

fn date(workspace: &mut Workspace, _args: &[String]) -> Result<HandlerReply, HandlerError> {
    Ok(workspace.clock.now_display().into())
}

fn echo(_workspace: &mut Workspace, args: &[String]) -> Result<HandlerReply, HandlerError> {
    Ok(args.join(" ").into())
}

fn neofetch(_workspace: &mut Workspace, _args: &[String]) -> Result<HandlerReply, HandlerError> {
    Ok(NEOFETCH_TEXT.into())
}

fn todo(workspace: &mut Workspace, args: &[String]) -> Result<HandlerReply, HandlerError> {
    const USAGE: &str = "Usage: todo [add|ls|done|rm|clear] [args]";

    let Some((subcommand, rest)) = args.split_first() else {
        return Ok(USAGE.into());
    };

    let reply = match subcommand.as_str() {
        "add" => {
            let now = workspace.clock.now_rfc3339();
            workspace.todos.add(&rest.join(" "), now)
        }
        "ls" => {
            let filter = TodoFilter::from_arg(rest.first().map(String::as_str));
            return Ok(workspace.todos.list(filter).into());
        }
        "done" => {
            let Some(id) = rest.first().and_then(|raw| raw.parse::<u64>().ok()) else {
                return Ok("Usage: todo done <id>".into());
            };
            let now = workspace.clock.now_rfc3339();
            workspace.todos.complete(id, now)
        }
        "rm" => {
            let Some(id) = rest.first().and_then(|raw| raw.parse::<u64>().ok()) else {
                return Ok("Usage: todo rm <id>".into());
            };
            workspace.todos.remove(id)
        }
        "clear" => {
            let only_completed = rest.first().is_some_and(|raw| raw == "completed");
            workspace.todos.clear(only_completed)
        }
        _ => return Ok(USAGE.into()),
    };

    if reply.changed {
        workspace.todo_store.save(workspace.todos.items())?;
    }
    Ok(reply.text.into())
}

fn weather(context: &SlowContext, _args: &[String]) -> Result<HandlerReply, HandlerError> {
    match context.weather.observe() {
        Ok(line) => Ok(line.into()),
        Err(_) => Ok("Weather unavailable.".into()),
    }
}

fn curl(_workspace: &mut Workspace, _args: &[String]) -> Result<HandlerReply, HandlerError> {
    Ok("Fetching data...".into())
}

fn ping(_workspace: &mut Workspace, _args: &[String]) -> Result<HandlerReply, HandlerError> {
    Ok("Pong! (1ms)".into())
}

fn scan(_workspace: &mut Workspace, _args: &[String]) -> Result<HandlerReply, HandlerError> {
    Ok("[*] Scanning network... Found: Localhost.".into())
}

fn theme(workspace: &mut Workspace, args: &[String]) -> Result<HandlerReply, HandlerError> {
    const USAGE: &str = "Usage: theme [ls | set <name>]";

    let Some(subcommand) = args.first() else {
        return Ok(USAGE.into());
    };

    match subcommand.as_str() {
        "ls" => {
            let mut out = String::from("AVAILABLE THEMES:\n=================\n\n");
            for (index, theme) in workspace.themes.iter().enumerate() {
                out.push_str(&format!("  {}. {}\n", index + 1, theme.name));
            }
            out.push_str("\nExample: theme set synthwave");
            Ok(out.into())
        }
        "set" => {
            let Some(query) = args.get(1) else {
                return Ok("Error: Please specify a theme name.".into());
            };

            let Some(theme) = find_theme(&workspace.themes, query).cloned() else {
                return Ok(format!("Theme '{query}' not found. Try 'theme ls'.").into());
            };

            workspace.theme_store.save(&theme)?;
            let name = theme.name.clone();
            workspace.active_theme = theme;
            Ok(HandlerReply::with_effect(
                format!("Theme set to {name}."),
                DispatchEffect::ThemeChanged,
            ))
        }
        _ => Ok(USAGE.into()),
    }
}

fn banner(_workspace: &mut Workspace, _args: &[String]) -> Result<HandlerReply, HandlerError> {
    Ok(BANNER_TEXT.into())
}

fn matrix(_workspace: &mut Workspace, _args: &[String]) -> Result<HandlerReply, HandlerError> {
    Ok("The Matrix has you...".into())
}

fn hack(_workspace: &mut Workspace, _args: &[String]) -> Result<HandlerReply, HandlerError> {
    Ok("[*] Simulating breach... Success.".into())
}

fn sudo(workspace: &mut Workspace, _args: &[String]) -> Result<HandlerReply, HandlerError> {
    workspace
        .navigator
        .open_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ")?;
    Ok("Admin access required. Redirecting...".into())
}

fn encrypt(_workspace: &mut Workspace, _args: &[String]) -> Result<HandlerReply, HandlerError> {
    Ok("Encrypted.".into())
}

fn hash(_workspace: &mut Workspace, _args: &[String]) -> Result<HandlerReply, HandlerError> {
    Ok("Hashed.".into())
}

fn repo(workspace: &mut Workspace, _args: &[String]) -> Result<HandlerReply, HandlerError> {
    workspace.navigator.open_url("https://github.com")?;
    Ok("Opening...".into())
}

fn discord(workspace: &mut Workspace, _args: &[String]) -> Result<HandlerReply, HandlerError> {
    workspace.navigator.open_url("https://discord.gg")?;
    Ok("Opening...".into())
}

fn email(workspace: &mut Workspace, _args: &[String]) -> Result<HandlerReply, HandlerError> {
    workspace.navigator.open_url("mailto:geekhaven@iiita.ac.in")?;
    Ok("Opening...".into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dispatch::find_command;
    use crate::domain::testing::test_workspace;

    fn run(workspace: &mut Workspace, name: &str, args: &[&str]) -> String {
        let spec = find_command(name).expect(name);
        let args = args.iter().map(|a| a.to_string()).collect::<Vec<_>>();
        match spec.handler {
            Handler::Pure(run) | Handler::Effectful(run) => {
                run(workspace, &args).expect("handler ok").text
            }
            Handler::Slow(_) => panic!("slow handler in sync test"),
        }
    }

    #[test]
    fn help_lists_every_society_command() {
        let (mut workspace, _handles) = test_workspace();
        let text = run(&mut workspace, "help", &[]);
        for name in ["about", "team", "todo", "theme", "banner", "neofetch"] {
            assert!(text.contains(name), "help missing {name}");
        }
    }

    #[test]
    fn roster_search_renders_profile_with_image() {
        let (mut workspace, _handles) = test_workspace();
        let text = run(&mut workspace, "info-coordinators", &["priya"]);
        assert!(text.starts_with("IMAGE:/team/priya.jpg"));
        assert!(text.contains("Role : CyberSec Vice Head"));

        let missing = run(&mut workspace, "info-coordinators", &["nobody"]);
        assert_eq!(missing, "Coordinator not found.");
    }

    #[test]
    fn multi_word_roster_search_joins_args() {
        let (mut workspace, _handles) = test_workspace();
        let text = run(&mut workspace, "info-members", &["rohan", "verma"]);
        assert!(text.contains("Name : Rohan Verma"));
    }

    #[test]
    fn theme_without_args_prints_usage() {
        let (mut workspace, _handles) = test_workspace();
        assert_eq!(
            run(&mut workspace, "theme", &[]),
            "Usage: theme [ls | set <name>]"
        );
        assert_eq!(
            run(&mut workspace, "theme", &["set"]),
            "Error: Please specify a theme name."
        );
    }

    #[test]
    fn theme_ls_lists_builtins_in_order() {
        let (mut workspace, _handles) = test_workspace();
        let text = run(&mut workspace, "theme", &["ls"]);
        assert!(text.starts_with("AVAILABLE THEMES:"));
        assert!(text.contains("1. gruvbox-dark"));
        assert!(text.contains("Example: theme set synthwave"));
    }

    #[test]
    fn todo_surface_matches_the_documented_subcommands() {
        let (mut workspace, _handles) = test_workspace();
        assert!(run(&mut workspace, "todo", &[]).starts_with("Usage:"));
        assert!(run(&mut workspace, "todo", &["bogus"]).starts_with("Usage:"));

        assert_eq!(
            run(&mut workspace, "todo", &["add", "buy", "milk"]),
            "Added #1: buy milk"
        );
        assert!(run(&mut workspace, "todo", &["ls"]).contains("#1 buy milk"));
        assert_eq!(
            run(&mut workspace, "todo", &["done", "1"]),
            "Completed #1: buy milk"
        );
        assert_eq!(run(&mut workspace, "todo", &["done", "x"]), "Usage: todo done <id>");
        assert_eq!(run(&mut workspace, "todo", &["rm", "1"]), "Removed #1.");
    }

    #[test]
    fn empty_todo_add_does_not_touch_the_list() {
        let (mut workspace, handles) = test_workspace();
        let text = run(&mut workspace, "todo", &["add"]);
        assert!(text.starts_with("Usage:"));
        assert!(workspace.todos.is_empty());
        assert!(handles.todo_saves.borrow().is_empty());
    }

    #[test]
    fn echo_reproduces_arguments_verbatim() {
        let (mut workspace, _handles) = test_workspace();
        assert_eq!(run(&mut workspace, "echo", &["Hello,", "World"]), "Hello, World");
        assert_eq!(run(&mut workspace, "echo", &[]), "");
    }

    #[test]
    fn fixed_output_commands_keep_their_lines() {
        let (mut workspace, _handles) = test_workspace();
        assert_eq!(run(&mut workspace, "whoami", &[]), "guest@cybersec");
        assert_eq!(run(&mut workspace, "matrix", &[]), "The Matrix has you...");
        assert_eq!(run(&mut workspace, "ping", &[]), "Pong! (1ms)");
        assert!(run(&mut workspace, "banner", &[]).contains("Welcome to CyberSec Division Terminal"));
    }
}
