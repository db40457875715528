//! Arctic Chronicle — interactive terminal expedition client.
//!
//! Owns the single [`Session`] and drives it from stdin commands (or a
//! scripted command file). All domain behavior lives in
//! `chronicle-logic`; this binary only parses input, applies
//! transitions, and renders screens.
//!
//! Usage:
//!   chronicle
//!   chronicle --name Мира --role biologist
//!   chronicle --script demo.txt --export session.json

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use chronicle_logic::session::{CharacterDraft, Screen, Session};

mod command;
mod render;

use command::Command;

#[derive(Parser, Debug)]
#[command(name = "chronicle")]
#[command(about = "Arctic Chronicle — interactive Arctic expedition in the terminal")]
struct Args {
    /// Persona name; with --role, skips the creation screen.
    #[arg(long)]
    name: Option<String>,

    /// Persona role: climatologist | biologist | engineer | journalist (or 1-4).
    #[arg(long)]
    role: Option<String>,

    /// Avatar index (1-6).
    #[arg(long, default_value_t = 1)]
    avatar: usize,

    /// Read commands from a file instead of stdin.
    #[arg(long)]
    script: Option<PathBuf>,

    /// Write the final session state as JSON on exit.
    #[arg(long)]
    export: Option<PathBuf>,
}

/// Initialize logging with a default filter.
///
/// Use the `RUST_LOG` environment variable to override the default.
fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).with_target(false).init();
}

fn main() {
    init_logging();
    let args = Args::parse();

    let mut session = Session::new();
    let mut draft = CharacterDraft::default();

    if let Some(index) = args.avatar.checked_sub(1) {
        if let Some(avatar) = chronicle_logic::session::AVATARS.get(index) {
            draft.avatar = avatar;
        }
    }
    if let Some(name) = &args.name {
        draft.name = name.clone();
    }
    if let Some(role_arg) = &args.role {
        match command::parse(&format!("role {}", role_arg), false) {
            Command::RoleSelect(role) => draft.role = Some(role),
            _ => {
                error!("unknown role '{}'", role_arg);
                process::exit(1);
            }
        }
    }
    if draft.role.is_some() && !draft.name.is_empty() {
        match session.create_character(&draft) {
            Ok(()) => info!("character '{}' created from flags", draft.name),
            Err(errors) => {
                error!("invalid persona flags: {:?}", errors);
                process::exit(1);
            }
        }
    }

    let reader: Box<dyn BufRead> = match &args.script {
        Some(path) => match File::open(path) {
            Ok(file) => {
                info!("replaying commands from {}", path.display());
                Box::new(BufReader::new(file))
            }
            Err(e) => {
                error!("cannot open script '{}': {}", path.display(), e);
                process::exit(1);
            }
        },
        None => Box::new(BufReader::new(io::stdin())),
    };
    let interactive = args.script.is_none();

    print!("{}", render_current(&session, &draft));
    run_loop(reader, interactive, &mut session, &mut draft);

    if let Some(path) = &args.export {
        match export_session(&session, path) {
            Ok(()) => info!("session exported to {}", path.display()),
            Err(e) => error!("export failed: {}", e),
        }
    }
}

fn run_loop(
    reader: Box<dyn BufRead>,
    interactive: bool,
    session: &mut Session,
    draft: &mut CharacterDraft,
) {
    let mut lines = reader.lines();
    loop {
        if interactive {
            print!("> ");
            let _ = io::stdout().flush();
        }
        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(e)) => {
                error!("read error: {}", e);
                break;
            }
            None => break,
        };
        if line.trim().is_empty() {
            continue;
        }

        let on_chat_screen = session.screen == Screen::Ai;
        match command::parse(&line, on_chat_screen) {
            Command::Quit => break,
            cmd => apply(cmd, session, draft),
        }
    }
}

/// Apply one command and print the resulting view.
fn apply(cmd: Command, session: &mut Session, draft: &mut CharacterDraft) {
    match cmd {
        Command::Help => print!("{}", render::help_text()),
        // Quit never reaches here; the loop breaks on it first.
        Command::Quit => {}
        Command::Reset => {
            session.reset();
            *draft = CharacterDraft::default();
            info!("session reset");
            print!("{}", render::start_screen(draft));
        }
        Command::Goto(screen) => {
            if session.goto(screen) {
                print!("{}", render_current(session, draft));
            } else {
                println!("Сначала создайте персонажа (name, role, begin).");
            }
        }
        Command::Year(year) => {
            if session.select_year(year) {
                print!("{}", render::map_screen(session));
            } else {
                warn!("year {} is not in the dataset", year);
                println!("Доступные годы: {:?}", chronicle_logic::climate::years());
            }
        }
        Command::Name(name) => {
            draft.name = name;
            print!("{}", render::start_screen(draft));
        }
        Command::RoleSelect(role) => {
            draft.role = Some(role);
            print!("{}", render::start_screen(draft));
        }
        Command::Avatar(index) => {
            if let Some(avatar) = chronicle_logic::session::AVATARS.get(index) {
                draft.avatar = avatar;
            }
            print!("{}", render::start_screen(draft));
        }
        Command::Begin => match session.create_character(draft) {
            Ok(()) => {
                info!("expedition started for '{}'", draft.name);
                print!("{}", render::map_screen(session));
            }
            Err(errors) => {
                for e in errors {
                    println!("  ✗ {:?}", e);
                }
            }
        },
        Command::MissionStart => {
            if session.begin_mission() {
                print!("{}", render::missions_screen(session));
            } else {
                println!("Миссия уже идёт или персонаж не создан.");
            }
        }
        Command::Answer(a1, a2) => {
            session.set_answers(a1, a2);
            print!("{}", render::missions_screen(session));
        }
        Command::Check => {
            if session.check_answers() {
                print!("{}", render::missions_screen(session));
            } else {
                println!("Введите оба значения (answer <a1> <a2>).");
            }
        }
        Command::Retry => {
            if session.retry_mission() {
                print!("{}", render::missions_screen(session));
            }
        }
        Command::Done => {
            if session.complete_mission() {
                info!(
                    "mission completed ({} total)",
                    session.completed_missions
                );
                print!("{}", render::missions_screen(session));
            } else {
                println!("Сначала пройдите проверку ответов.");
            }
        }
        Command::Back => {
            session.leave_mission();
            print!("{}", render::missions_screen(session));
        }
        Command::Ask(question) => {
            if session.ask_advisor(&question).is_some() {
                print!("{}", render::ai_screen(session));
            }
        }
        Command::Unknown(input) => {
            println!("Неизвестная команда: {:?} (help — список команд)", input);
        }
    }
}

fn render_current(session: &Session, draft: &CharacterDraft) -> String {
    match session.screen {
        Screen::Start | Screen::Intro => render::start_screen(draft),
        Screen::Map => render::map_screen(session),
        Screen::Missions => render::missions_screen(session),
        Screen::Ai => render::ai_screen(session),
        Screen::Profile => render::profile_screen(session),
        Screen::About => render::about_screen(),
    }
}

fn export_session(session: &Session, path: &Path) -> io::Result<()> {
    let json = serde_json::to_string_pretty(session)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    let mut file = File::create(path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}
