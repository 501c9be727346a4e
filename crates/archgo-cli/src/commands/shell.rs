//! Interactive session shell.
//!
//! Slash commands drive the session controller; any other line is appended to
//! the architecture description.

use std::borrow::Cow::{self, Borrowed, Owned};
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Result;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

use archgo_application::SessionController;
use archgo_core::identity::{LoginRequest, Role};
use archgo_core::playback::Scenario;
use archgo_core::session::Phase;
use archgo_infrastructure::attachment::load_attachment;
use archgo_infrastructure::report_exporter::write_report;

use crate::context::AppContext;
use crate::render;

/// Every command with the argument usage hinted once it is typed.
const COMMANDS: &[(&str, &str)] = &[
    ("/help", ""),
    ("/status", ""),
    ("/start", ""),
    ("/login", "[architect|engineer] <name>"),
    ("/attach", "<path>"),
    ("/detach", ""),
    ("/context", "<text>"),
    ("/scan", ""),
    ("/show", ""),
    ("/save", "[title]"),
    ("/vault", ""),
    ("/open", "<id>"),
    ("/delete", "<id>"),
    ("/simulate", ""),
    ("/debug", ""),
    ("/clear", ""),
    ("/export", "[dir]"),
    ("/rules", ""),
    ("/retry", ""),
    ("/reset", ""),
    ("/home", ""),
    ("/logout", ""),
    ("/quit", ""),
    ("/exit", ""),
];

const ROLES: &[&str] = &["architect", "engineer"];

fn is_command(word: &str) -> bool {
    COMMANDS.iter().any(|(command, _)| *command == word)
}

/// rustyline helper: completes command names, login roles and vault ids.
struct ShellHelper {
    vault_ids: Vec<String>,
}

impl ShellHelper {
    fn new() -> Self {
        Self {
            vault_ids: Vec::new(),
        }
    }

    /// Refreshed before every prompt so `/open` and `/delete` complete ids.
    fn set_vault_ids(&mut self, ids: Vec<String>) {
        self.vault_ids = ids;
    }

    /// Start offset and candidates for the word ending at the end of `line`.
    fn candidates(&self, line: &str) -> (usize, Vec<String>) {
        let Some((command, arg)) = line.split_once(' ') else {
            if !line.starts_with('/') {
                return (0, Vec::new());
            }
            let names = COMMANDS
                .iter()
                .map(|(command, _)| *command)
                .filter(|command| command.starts_with(line))
                .map(String::from)
                .collect();
            return (0, names);
        };

        let start = command.len() + 1;
        let options: Vec<&str> = match command {
            "/login" if !arg.contains(' ') => ROLES.to_vec(),
            "/open" | "/delete" => self.vault_ids.iter().map(String::as_str).collect(),
            _ => return (start, Vec::new()),
        };
        let matches = options
            .into_iter()
            .filter(|option| option.starts_with(arg))
            .map(String::from)
            .collect();
        (start, matches)
    }

    /// The rest of a partially typed command, or its usage once complete.
    fn usage_hint(line: &str) -> Option<String> {
        if !line.starts_with('/') || line.contains(' ') {
            return None;
        }
        if let Some((_, usage)) = COMMANDS.iter().find(|(command, _)| *command == line) {
            return (!usage.is_empty()).then(|| format!(" {}", usage));
        }
        COMMANDS
            .iter()
            .find(|(command, _)| command.starts_with(line))
            .map(|(command, _)| command[line.len()..].to_string())
    }
}

impl Helper for ShellHelper {}

impl Completer for ShellHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, candidates) = self.candidates(&line[..pos]);
        let pairs = candidates
            .into_iter()
            .map(|candidate| Pair {
                display: candidate.clone(),
                replacement: candidate,
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Highlighter for ShellHelper {
    /// Known commands in cyan, mistyped ones in red; arguments untouched.
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if !line.starts_with('/') {
            return Borrowed(line);
        }
        let (command, rest) = line.split_at(line.find(' ').unwrap_or(line.len()));
        let command = if is_command(command) {
            command.bright_cyan()
        } else {
            command.red()
        };
        Owned(format!("{}{}", command, rest))
    }

    fn highlight_char(&self, line: &str, _pos: usize, _forced: bool) -> bool {
        line.starts_with('/')
    }
}

impl Hinter for ShellHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        if pos < line.len() {
            return None;
        }
        Self::usage_hint(line).map(|hint| hint.bright_black().to_string())
    }
}

impl Validator for ShellHelper {}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ShellCommand {
    Help,
    Status,
    Start,
    Login { role: Role, name: String },
    Attach(PathBuf),
    Detach,
    Context(String),
    Describe(String),
    Scan,
    Show,
    Save(Option<String>),
    Vault,
    Open(String),
    Delete(String),
    Playback(Scenario),
    ClearLog,
    Export(Option<PathBuf>),
    Rules,
    Retry,
    Reset,
    Home,
    Logout,
    Quit,
    Unknown(String),
}

impl ShellCommand {
    fn parse(line: &str) -> Self {
        let line = line.trim();
        if line == "quit" || line == "exit" {
            return ShellCommand::Quit;
        }
        let Some(rest) = line.strip_prefix('/') else {
            return ShellCommand::Describe(line.to_string());
        };

        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };
        let optional = || (!arg.is_empty()).then(|| arg.to_string());

        match name {
            "help" => ShellCommand::Help,
            "status" => ShellCommand::Status,
            "start" => ShellCommand::Start,
            "login" => parse_login(arg),
            "attach" if !arg.is_empty() => ShellCommand::Attach(PathBuf::from(arg)),
            "detach" => ShellCommand::Detach,
            "context" => ShellCommand::Context(arg.to_string()),
            "scan" => ShellCommand::Scan,
            "show" => ShellCommand::Show,
            "save" => ShellCommand::Save(optional()),
            "vault" => ShellCommand::Vault,
            "open" if !arg.is_empty() => ShellCommand::Open(arg.to_string()),
            "delete" if !arg.is_empty() => ShellCommand::Delete(arg.to_string()),
            "simulate" => ShellCommand::Playback(Scenario::Simulate),
            "debug" => ShellCommand::Playback(Scenario::Debug),
            "clear" => ShellCommand::ClearLog,
            "export" => ShellCommand::Export(optional().map(PathBuf::from)),
            "rules" => ShellCommand::Rules,
            "retry" => ShellCommand::Retry,
            "reset" => ShellCommand::Reset,
            "home" => ShellCommand::Home,
            "logout" => ShellCommand::Logout,
            "quit" | "exit" => ShellCommand::Quit,
            _ => ShellCommand::Unknown(line.to_string()),
        }
    }
}

/// `/login [architect|engineer] [display name]`
fn parse_login(arg: &str) -> ShellCommand {
    let mut words = arg.split_whitespace().peekable();
    let role = match words.peek().map(|w| Role::from_str(w)) {
        Some(Ok(role)) => {
            words.next();
            role
        }
        _ => Role::default(),
    };
    ShellCommand::Login {
        role,
        name: words.collect::<Vec<_>>().join(" "),
    }
}

fn print_help() {
    let lines = [
        ("/login [architect|engineer] <name>", "sign in"),
        ("<text>", "append to the architecture description"),
        ("/context <text>", "replace the architecture description"),
        ("/attach <path> | /detach", "attach or remove a sketch"),
        ("/scan", "analyze the current input"),
        ("/show | /rules", "print the result or its security rules"),
        ("/save [title]", "save the result to the vault"),
        ("/vault | /open <id> | /delete <id>", "browse saved results"),
        ("/simulate | /debug | /clear", "terminal playback over the generated code"),
        ("/export [dir]", "write the security report"),
        ("/retry | /reset | /home | /logout", "navigate"),
        ("/status | /quit", ""),
    ];
    for (usage, text) in lines {
        println!("  {:<38} {}", usage.bright_cyan(), text.bright_black());
    }
}

fn print_status(controller: &SessionController) {
    println!("{} {}", "phase:".bright_black(), controller.phase());
    if let Some(identity) = controller.identity() {
        println!(
            "{} {} <{}> ({})",
            "user:".bright_black(),
            identity.name,
            identity.email,
            identity.role
        );
    }
    let input = controller.pending_input();
    if let Some(file) = &input.raw_file {
        println!("{} {} ({})", "sketch:".bright_black(), file.name, file.mime_type);
    }
    if !input.free_text_context.is_empty() {
        println!("{} {}", "context:".bright_black(), input.free_text_context);
    }
    if let Some(result) = controller.last_result() {
        let saved = if controller.is_result_saved() { " (saved)" } else { "" };
        println!(
            "{} viability {}{}",
            "result:".bright_black(),
            result.viability_score,
            saved
        );
    }
    if let Some(error) = controller.last_error() {
        println!("{} {}", "error:".bright_black(), error.red());
    }
}

async fn scan(controller: &mut SessionController) -> Result<()> {
    if !controller.submit()? {
        println!(
            "{}",
            "Nothing to analyze: attach a sketch or describe the architecture.".yellow()
        );
        return Ok(());
    }

    println!("{}", "Analyzing architecture...".bright_black());
    match controller.next_outcome().await {
        Some(Phase::Result) => {
            if let Some(result) = controller.last_result() {
                render::print_result(result);
            }
            println!();
            println!("{}", "/save to keep this result, /reset to start over.".bright_black());
        }
        Some(Phase::Error) => {
            if let Some(message) = controller.last_error() {
                println!("{}", message.bright_red());
            }
            println!("{}", "/retry to return to the dashboard.".bright_black());
        }
        _ => {}
    }
    Ok(())
}

/// Runs one command. Returns false when the shell should exit.
async fn execute(
    command: ShellCommand,
    controller: &mut SessionController,
    ctx: &AppContext,
) -> Result<bool> {
    match command {
        ShellCommand::Help => print_help(),
        ShellCommand::Status => print_status(controller),
        ShellCommand::Start => controller.start()?,
        ShellCommand::Login { role, name } => {
            println!("{}", "Authenticating...".bright_black());
            let identity = controller.login(LoginRequest::new(name, role)).await?;
            println!(
                "{}",
                format!("Welcome, {} <{}>", identity.name, identity.email).bright_green()
            );
            render::print_vault_entries(controller.vault_entries());
        }
        ShellCommand::Attach(path) => {
            let (file, preview) = load_attachment(&path)?;
            let label = format!("Attached {} ({})", file.name, file.mime_type);
            controller.attach_file(file, preview)?;
            println!("{}", label.green());
        }
        ShellCommand::Detach => controller.clear_attachment()?,
        ShellCommand::Context(text) => controller.set_context(text)?,
        ShellCommand::Describe(text) => {
            let current = &controller.pending_input().free_text_context;
            let combined = if current.is_empty() {
                text
            } else {
                format!("{}\n{}", current, text)
            };
            controller.set_context(combined)?;
        }
        ShellCommand::Scan => scan(controller).await?,
        ShellCommand::Show => match controller.last_result() {
            Some(result) => render::print_result(result),
            None => println!("{}", "No result to show.".bright_black()),
        },
        ShellCommand::Save(title) => {
            let entry = controller.save_to_vault(title.as_deref())?;
            println!(
                "{}",
                format!("Saved to vault as {} ({})", entry.title, entry.id).green()
            );
        }
        ShellCommand::Vault => {
            controller.refresh_vault();
            render::print_vault_entries(controller.vault_entries());
        }
        ShellCommand::Open(id) => {
            controller.open_vault_entry(&id)?;
            if let Some(result) = controller.last_result() {
                render::print_result(result);
            }
        }
        ShellCommand::Delete(id) => {
            controller.delete_vault_entry(&id)?;
            render::print_vault_entries(controller.vault_entries());
        }
        ShellCommand::Playback(scenario) => {
            let mut run = controller.run_playback(scenario)?;
            while let Some(event) = run.next().await {
                render::print_log_event(&event);
            }
        }
        ShellCommand::ClearLog => controller.clear_playback(),
        ShellCommand::Export(dir) => {
            let report = controller.export_security_report()?;
            let path = write_report(&report, &ctx.export_dir(dir.as_deref()))?;
            println!(
                "{}",
                format!("Security report written to {}", path.display()).green()
            );
        }
        ShellCommand::Rules => match controller.last_result() {
            Some(result) => render::print_rules(result),
            None => println!("{}", "No result loaded.".bright_black()),
        },
        ShellCommand::Retry => controller.retry()?,
        ShellCommand::Reset => controller.reset()?,
        ShellCommand::Home => controller.logo_click()?,
        ShellCommand::Logout => {
            controller.logout()?;
            println!("{}", "Signed out. /start to sign in again.".bright_black());
        }
        ShellCommand::Quit => return Ok(false),
        ShellCommand::Unknown(line) => {
            println!("{}", format!("Unknown command: {} (try /help)", line).bright_black());
        }
    }
    Ok(true)
}

pub async fn run(ctx: &AppContext) -> Result<()> {
    let mut controller =
        SessionController::new(
            ctx.backend_or_unconfigured(),
            ctx.identity_provider(),
            ctx.vault_store()?,
        );
    controller.start()?;

    let mut rl = Editor::new()?;
    rl.set_helper(Some(ShellHelper::new()));

    println!("{}", "=== Architect-Go ===".bright_magenta().bold());
    println!(
        "{}",
        "Sign in with '/login [architect|engineer] <name>', '/help' for commands, '/quit' to exit."
            .bright_black()
    );
    println!();

    loop {
        if let Some(helper) = rl.helper_mut() {
            helper.set_vault_ids(
                controller
                    .vault_entries()
                    .iter()
                    .map(|entry| entry.id.clone())
                    .collect(),
            );
        }
        let prompt = format!("{}> ", controller.phase().to_string().to_lowercase());
        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);

                match execute(ShellCommand::parse(trimmed), &mut controller, ctx).await {
                    Ok(true) => {}
                    Ok(false) => {
                        println!("{}", "Goodbye!".bright_green());
                        break;
                    }
                    Err(e) => eprintln!("{}", format!("Error: {}", e).red()),
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type '/quit' to exit.".yellow());
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_describes_architecture() {
        assert_eq!(
            ShellCommand::parse("  React app talking to Firestore "),
            ShellCommand::Describe("React app talking to Firestore".to_string())
        );
    }

    #[test]
    fn test_login_with_role_and_name() {
        assert_eq!(
            ShellCommand::parse("/login engineer Ada Lovelace"),
            ShellCommand::Login {
                role: Role::Engineer,
                name: "Ada Lovelace".to_string()
            }
        );
        assert_eq!(
            ShellCommand::parse("/login Grace"),
            ShellCommand::Login {
                role: Role::Architect,
                name: "Grace".to_string()
            }
        );
    }

    #[test]
    fn test_optional_arguments() {
        assert_eq!(ShellCommand::parse("/save"), ShellCommand::Save(None));
        assert_eq!(
            ShellCommand::parse("/save Payments v2"),
            ShellCommand::Save(Some("Payments v2".to_string()))
        );
        assert_eq!(
            ShellCommand::parse("/export out/reports"),
            ShellCommand::Export(Some(PathBuf::from("out/reports")))
        );
    }

    #[test]
    fn test_required_argument_missing_is_unknown() {
        assert!(matches!(ShellCommand::parse("/open"), ShellCommand::Unknown(_)));
        assert!(matches!(ShellCommand::parse("/attach"), ShellCommand::Unknown(_)));
    }

    #[test]
    fn test_completes_command_names() {
        let helper = ShellHelper::new();
        assert_eq!(
            helper.candidates("/lo"),
            (0, vec!["/login".to_string(), "/logout".to_string()])
        );
        assert_eq!(helper.candidates("plain text"), (0, vec![]));
    }

    #[test]
    fn test_completes_login_roles() {
        let helper = ShellHelper::new();
        assert_eq!(
            helper.candidates("/login eng"),
            (7, vec!["engineer".to_string()])
        );
        assert_eq!(helper.candidates("/login engineer Ad"), (7, vec![]));
    }

    #[test]
    fn test_completes_vault_ids() {
        let mut helper = ShellHelper::new();
        helper.set_vault_ids(vec!["3f2a-1".to_string(), "9c4e-2".to_string()]);

        assert_eq!(helper.candidates("/open 3f"), (6, vec!["3f2a-1".to_string()]));
        assert_eq!(helper.candidates("/delete ").1.len(), 2);
        assert_eq!(helper.candidates("/save 3f"), (6, vec![]));
    }

    #[test]
    fn test_usage_hints() {
        assert_eq!(ShellHelper::usage_hint("/sa"), Some("ve".to_string()));
        assert_eq!(ShellHelper::usage_hint("/save"), Some(" [title]".to_string()));
        assert_eq!(ShellHelper::usage_hint("/scan"), None);
        assert_eq!(ShellHelper::usage_hint("/open abc"), None);
    }

    #[test]
    fn test_playback_and_quit() {
        assert_eq!(
            ShellCommand::parse("/debug"),
            ShellCommand::Playback(Scenario::Debug)
        );
        assert_eq!(ShellCommand::parse("exit"), ShellCommand::Quit);
        assert_eq!(ShellCommand::parse("/quit"), ShellCommand::Quit);
    }
}
