//! Single-session expedition state and its transitions.
//!
//! All mutable state lives in one [`Session`] owned by the client loop
//! and passed by reference; this crate holds no globals. Screens and
//! mission steps are closed enumerations, and every transition is a
//! method so the flow rules stay in one place.
//!
//! # Mission Flow
//!
//! ```text
//! Intro ──start──▶ Task1 ──check──▶ Result
//!                    ▲                │
//!                    └────retry───────┤ (failure, answers preserved)
//! Intro ◀──────────complete──────────┘ (success, counter += 1)
//! ```

use serde::{Deserialize, Serialize};

use crate::advisor::{self, ChatMessage};
use crate::climate::{self, YearRecord};
use crate::metric::{self, RoleMetric};
use crate::mission::{self, MissionAttempt, MissionOutcome, MissionSpec};
use crate::role::Role;

/// Top-level screens of the presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    /// Landing screen shown before anything else.
    Start,
    /// Persona creation form.
    Intro,
    Map,
    Missions,
    About,
    Ai,
    Profile,
}

/// Steps of the mission flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissionStep {
    Intro,
    Task1,
    Result,
}

/// Avatar glyphs offered at persona creation. The first is the default.
pub const AVATARS: [&str; 6] = ["👨‍🔬", "👩‍🔬", "🧑‍💻", "👨‍🚀", "👩‍🚀", "🧑‍🎓"];

/// Missions available over a whole session (one per role; the profile
/// shows progress against this goal).
pub const MISSION_GOAL: u32 = 4;

/// A created expedition persona. Immutable after creation except
/// wholesale reset.
#[derive(Debug, Clone, Serialize)]
pub struct Character {
    pub name: String,
    pub role: Role,
    pub avatar: &'static str,
}

/// Draft persona edited on the start screens before creation.
#[derive(Debug, Clone, Serialize)]
pub struct CharacterDraft {
    pub name: String,
    pub role: Option<Role>,
    pub avatar: &'static str,
}

impl Default for CharacterDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            role: None,
            avatar: AVATARS[0],
        }
    }
}

/// Draft validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftError {
    EmptyName,
    NoRoleSelected,
}

/// Validate a draft, returning all errors found.
pub fn validate_draft(draft: &CharacterDraft) -> Vec<DraftError> {
    let mut errors = Vec::new();
    if draft.name.trim().is_empty() {
        errors.push(DraftError::EmptyName);
    }
    if draft.role.is_none() {
        errors.push(DraftError::NoRoleSelected);
    }
    errors
}

impl CharacterDraft {
    /// Build the character, or report every validation error at once.
    pub fn build(&self) -> Result<Character, Vec<DraftError>> {
        let errors = validate_draft(self);
        match self.role {
            Some(role) if errors.is_empty() => Ok(Character {
                name: self.name.trim().to_string(),
                role,
                avatar: self.avatar,
            }),
            _ => Err(errors),
        }
    }
}

/// Counters derived for the profile screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProfileStats {
    pub completed_missions: u32,
    /// Questions put to the advisor (exchanges beyond the seeded greeting).
    pub questions_asked: usize,
    pub badges_earned: u32,
}

/// The whole in-memory session. Discarded on reset; nothing persists.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub character: Option<Character>,
    pub screen: Screen,
    pub selected_year: u16,
    pub mission_step: MissionStep,
    pub attempt: MissionAttempt,
    pub chat: Vec<ChatMessage>,
    pub completed_missions: u32,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            character: None,
            screen: Screen::Start,
            selected_year: climate::DEFAULT_YEAR,
            mission_step: MissionStep::Intro,
            attempt: MissionAttempt::default(),
            chat: advisor::seed_messages(),
            completed_missions: 0,
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.character.as_ref().map(|c| c.role)
    }

    /// Create the persona from a validated draft and enter the map.
    pub fn create_character(&mut self, draft: &CharacterDraft) -> Result<(), Vec<DraftError>> {
        let character = draft.build()?;
        self.character = Some(character);
        self.screen = Screen::Map;
        Ok(())
    }

    /// Switch screens. Until a persona exists only the start screens
    /// are reachable.
    pub fn goto(&mut self, screen: Screen) -> bool {
        if self.character.is_none() && !matches!(screen, Screen::Start | Screen::Intro) {
            return false;
        }
        self.screen = screen;
        true
    }

    /// Select a year on the map. Only the six dataset years are accepted.
    pub fn select_year(&mut self, year: u16) -> bool {
        if climate::is_dataset_year(year) {
            self.selected_year = year;
            true
        } else {
            false
        }
    }

    /// The record for the selected year.
    pub fn current_record(&self) -> &'static YearRecord {
        climate::record_for_year(self.selected_year)
    }

    /// The metric panel for the selected year and active role.
    pub fn metric(&self) -> RoleMetric {
        metric::derive_metric(self.role(), self.current_record())
    }

    /// The chart series for the active role.
    pub fn series(&self) -> Vec<f64> {
        metric::derive_series(self.role(), &climate::RECORDS)
    }

    /// The active role's mission, if a persona exists.
    pub fn mission_spec(&self) -> Option<MissionSpec> {
        self.role().map(mission::spec_for)
    }

    /// Intro → Task1. Requires a persona.
    pub fn begin_mission(&mut self) -> bool {
        if self.mission_step == MissionStep::Intro && self.character.is_some() {
            self.mission_step = MissionStep::Task1;
            true
        } else {
            false
        }
    }

    /// Store the raw answer fields as entered.
    pub fn set_answers(&mut self, answer1: impl Into<String>, answer2: impl Into<String>) {
        self.attempt.answer1 = answer1.into();
        self.attempt.answer2 = answer2.into();
    }

    /// Task1 → Result, gated on both fields being non-empty. The check
    /// action is the only way to reach Result.
    pub fn check_answers(&mut self) -> bool {
        if self.mission_step == MissionStep::Task1 && self.attempt.is_filled() {
            self.mission_step = MissionStep::Result;
            true
        } else {
            false
        }
    }

    /// Grade the current attempt. Pure; callable any number of times.
    pub fn grade(&self) -> MissionOutcome {
        mission::grade(self.role(), &self.attempt)
    }

    /// Result → Intro after a successful grade: count the mission and
    /// clear the attempt. A failed grade does not count.
    pub fn complete_mission(&mut self) -> bool {
        if self.mission_step == MissionStep::Result && self.grade().correct {
            self.mission_step = MissionStep::Intro;
            self.completed_missions += 1;
            self.attempt.clear();
            true
        } else {
            false
        }
    }

    /// Result → Task1 after a failed grade. Entered values survive so
    /// the user can adjust rather than retype.
    pub fn retry_mission(&mut self) -> bool {
        if self.mission_step == MissionStep::Result {
            self.mission_step = MissionStep::Task1;
            true
        } else {
            false
        }
    }

    /// Task1 → Intro without grading.
    pub fn leave_mission(&mut self) {
        if self.mission_step == MissionStep::Task1 {
            self.mission_step = MissionStep::Intro;
        }
    }

    /// Put a question to the advisor. Appends the user line and the
    /// looked-up response; blank input is a no-op.
    pub fn ask_advisor(&mut self, text: &str) -> Option<&'static str> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        let response = advisor::respond(trimmed);
        self.chat.push(ChatMessage::user(trimmed));
        self.chat.push(ChatMessage::advisor(response));
        Some(response)
    }

    pub fn profile_stats(&self) -> ProfileStats {
        ProfileStats {
            completed_missions: self.completed_missions,
            questions_asked: self.chat.len().saturating_sub(2) / 2,
            badges_earned: u32::from(self.completed_missions > 0),
        }
    }

    /// Badge earned this session, if any.
    pub fn badge(&self) -> Option<&'static str> {
        if self.completed_missions > 0 {
            self.role().map(|r| r.info().badge)
        } else {
            None
        }
    }

    /// Discard the persona and all progress: back to creation, counter
    /// zeroed, attempt cleared, chat reseeded. The selected year is a
    /// map setting and survives.
    pub fn reset(&mut self) {
        self.character = None;
        self.screen = Screen::Intro;
        self.completed_missions = 0;
        self.mission_step = MissionStep::Intro;
        self.attempt.clear();
        self.chat = advisor::seed_messages();
    }
}
