//! Command parsing for the terminal client.
//!
//! One line of input becomes one [`Command`]. Parsing is independent of
//! session state except for one rule applied by the caller: on the chat
//! screen, lines that are not a known command are questions.

use chronicle_logic::role::Role;
use chronicle_logic::session::Screen;

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Quit,
    Reset,
    /// Switch to a top-level screen.
    Goto(Screen),
    /// Select a map year.
    Year(u16),
    /// Set the draft persona name.
    Name(String),
    /// Set the draft role.
    RoleSelect(Role),
    /// Set the draft avatar (zero-based index).
    Avatar(usize),
    /// Create the persona from the draft.
    Begin,
    /// Enter the mission task from its intro.
    MissionStart,
    /// Fill both answer fields.
    Answer(String, String),
    /// Grade the entered answers.
    Check,
    /// Back to the task after a failed result.
    Retry,
    /// Collect a successful result and return to the mission list.
    Done,
    /// Leave the task without grading.
    Back,
    /// Ask the advisor a question.
    Ask(String),
    Unknown(String),
}

fn parse_role(token: &str) -> Option<Role> {
    match token.to_lowercase().as_str() {
        "1" | "climatologist" | "климатолог" => Some(Role::Climatologist),
        "2" | "biologist" | "биолог" => Some(Role::Biologist),
        "3" | "engineer" | "инженер" => Some(Role::Engineer),
        "4" | "journalist" | "журналист" => Some(Role::Journalist),
        _ => None,
    }
}

/// Parse one input line. `on_chat_screen` turns unrecognized text into
/// an advisor question instead of an unknown-command error.
pub fn parse(line: &str, on_chat_screen: bool) -> Command {
    let trimmed = line.trim();
    let (head, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((h, r)) => (h, r.trim()),
        None => (trimmed, ""),
    };

    match head.to_lowercase().as_str() {
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        "reset" => Command::Reset,
        "map" => Command::Goto(Screen::Map),
        "missions" => Command::Goto(Screen::Missions),
        "ai" | "chat" => Command::Goto(Screen::Ai),
        "profile" => Command::Goto(Screen::Profile),
        "about" => Command::Goto(Screen::About),
        "year" => match rest.parse::<u16>() {
            Ok(y) => Command::Year(y),
            Err(_) => Command::Unknown(trimmed.to_string()),
        },
        "name" if !rest.is_empty() => Command::Name(rest.to_string()),
        "role" => match parse_role(rest) {
            Some(role) => Command::RoleSelect(role),
            None => Command::Unknown(trimmed.to_string()),
        },
        "avatar" => match rest.parse::<usize>() {
            Ok(n) if (1..=chronicle_logic::session::AVATARS.len()).contains(&n) => {
                Command::Avatar(n - 1)
            }
            _ => Command::Unknown(trimmed.to_string()),
        },
        "begin" => Command::Begin,
        "start" => Command::MissionStart,
        "answer" => match rest.split_once(char::is_whitespace) {
            Some((a1, a2)) => Command::Answer(a1.to_string(), a2.trim().to_string()),
            None => Command::Unknown(trimmed.to_string()),
        },
        "check" => Command::Check,
        "retry" => Command::Retry,
        "done" => Command::Done,
        "back" => Command::Back,
        "ask" if !rest.is_empty() => Command::Ask(rest.to_string()),
        _ if on_chat_screen && !trimmed.is_empty() => Command::Ask(trimmed.to_string()),
        _ => Command::Unknown(trimmed.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_navigation() {
        assert_eq!(parse("map", false), Command::Goto(Screen::Map));
        assert_eq!(parse("  missions  ", false), Command::Goto(Screen::Missions));
        assert_eq!(parse("chat", false), Command::Goto(Screen::Ai));
    }

    #[test]
    fn parses_year_and_answers() {
        assert_eq!(parse("year 2000", false), Command::Year(2000));
        assert_eq!(
            parse("answer 23000 22000", false),
            Command::Answer("23000".into(), "22000".into())
        );
        assert_eq!(
            parse("year soon", false),
            Command::Unknown("year soon".into())
        );
    }

    #[test]
    fn parses_roles_by_number_and_name() {
        assert_eq!(parse("role 2", false), Command::RoleSelect(Role::Biologist));
        assert_eq!(
            parse("role engineer", false),
            Command::RoleSelect(Role::Engineer)
        );
        assert_eq!(
            parse("role Журналист", false),
            Command::RoleSelect(Role::Journalist)
        );
    }

    #[test]
    fn avatar_index_is_one_based_and_bounded() {
        assert_eq!(parse("avatar 1", false), Command::Avatar(0));
        assert_eq!(parse("avatar 6", false), Command::Avatar(5));
        assert_eq!(parse("avatar 7", false), Command::Unknown("avatar 7".into()));
    }

    #[test]
    fn chat_screen_promotes_free_text() {
        assert_eq!(
            parse("Почему тают льды?", true),
            Command::Ask("Почему тают льды?".into())
        );
        assert_eq!(
            parse("Почему тают льды?", false),
            Command::Unknown("Почему тают льды?".into())
        );
        // Known commands still win on the chat screen.
        assert_eq!(parse("map", true), Command::Goto(Screen::Map));
    }
}
