//! Integration tests for the full expedition session pipeline.
//!
//! Exercises: CharacterDraft → Session → year selection → metric/series
//! derivation → mission flow → advisor chat → profile → reset.
//!
//! All tests are pure logic — no terminal, no rendering.

use chronicle_logic::climate::{self, RECORDS};
use chronicle_logic::metric::{derive_metric, derive_series, series_max};
use chronicle_logic::mission::{self, MissionAttempt};
use chronicle_logic::role::Role;
use chronicle_logic::session::{CharacterDraft, MissionStep, Screen, Session, AVATARS};

// ── Helpers ────────────────────────────────────────────────────────────

fn start_session(name: &str, role: Role) -> Session {
    let mut session = Session::new();
    let draft = CharacterDraft {
        name: name.to_string(),
        role: Some(role),
        avatar: AVATARS[3],
    };
    session
        .create_character(&draft)
        .expect("draft with name and role must build");
    session
}

fn run_mission(session: &mut Session, answer1: &str, answer2: &str) -> bool {
    assert!(session.goto(Screen::Missions));
    assert!(session.begin_mission());
    session.set_answers(answer1, answer2);
    assert!(session.check_answers());
    let outcome = session.grade();
    if outcome.correct {
        assert!(session.complete_mission());
    } else {
        assert!(session.retry_mission());
    }
    outcome.correct
}

// ── End-to-end scenarios ───────────────────────────────────────────────

#[test]
fn biologist_expedition_end_to_end() {
    let mut session = start_session("Арина", Role::Biologist);

    // Map: 2025 is preselected; the metric tracks the bear field.
    assert_eq!(session.selected_year, climate::DEFAULT_YEAR);
    assert_eq!(session.metric().value, "~22.0k");
    assert!(session.select_year(2000));
    assert_eq!(session.metric().value, "~23.0k");

    // Chart series covers every record, in thousands.
    let series = session.series();
    assert_eq!(series.len(), RECORDS.len());
    assert!((series_max(&series) - 25.0).abs() < 1e-9);

    // Mission: read the chart, grade, collect the badge.
    assert!(run_mission(&mut session, "23000", "22000"));
    let outcome = mission::grade(
        Some(Role::Biologist),
        &MissionAttempt {
            answer1: "23000".into(),
            answer2: "22000".into(),
        },
    );
    assert!((outcome.change.unwrap() - -1000.0).abs() < 1e-9);
    assert!((outcome.rate_per_year.unwrap() - 40.0).abs() < 1e-9);
    assert_eq!(session.badge(), Some("🐻 Друг медведей"));

    // Advisor exchange lands in the transcript.
    assert!(session.ask_advisor("Почему тают льды?").is_some());
    let stats = session.profile_stats();
    assert_eq!(stats.completed_missions, 1);
    assert_eq!(stats.questions_asked, 1);
    assert_eq!(stats.badges_earned, 1);
}

#[test]
fn climatologist_expedition_end_to_end() {
    let mut session = start_session("Лев", Role::Climatologist);

    assert!(run_mission(&mut session, "0.4", "1.1"));
    let outcome = mission::grade(
        Some(Role::Climatologist),
        &MissionAttempt {
            answer1: "0.4".into(),
            answer2: "1.1".into(),
        },
    );
    assert!((outcome.change.unwrap() - 0.7).abs() < 1e-9);
    assert!((outcome.rate_per_year.unwrap() - 0.028).abs() < 1e-9);
    assert_eq!(session.completed_missions, 1);
}

#[test]
fn failed_attempt_retries_then_succeeds() {
    let mut session = start_session("Ян", Role::Engineer);

    assert!(!run_mission(&mut session, "1.0", "2.0"));
    assert_eq!(session.completed_missions, 0);
    assert_eq!(session.mission_step, MissionStep::Task1);
    // Previous answers survive the retry.
    assert_eq!(session.attempt.answer1, "1.0");

    session.set_answers("10.2", "12.4");
    assert!(session.check_answers());
    assert!(session.grade().correct);
    assert!(session.complete_mission());
    assert_eq!(session.completed_missions, 1);
}

#[test]
fn metric_consistent_for_all_roles_and_years() {
    for record in &RECORDS {
        for role in Role::ALL {
            let metric = derive_metric(Some(role), record);
            assert!(!metric.value.is_empty());
        }
        assert_eq!(derive_metric(None, record).label, "Площадь льда");
    }
    for role in Role::ALL {
        assert_eq!(derive_series(Some(role), &RECORDS).len(), RECORDS.len());
    }
}

#[test]
fn reset_returns_to_creation_with_fresh_state() {
    let mut session = start_session("Ива", Role::Journalist);
    assert!(run_mission(&mut session, "3.8", "4.0"));
    session.ask_advisor("Сколько людей живёт в Арктике?");

    session.reset();
    assert!(session.character.is_none());
    assert_eq!(session.screen, Screen::Intro);
    assert_eq!(session.completed_missions, 0);
    assert_eq!(session.profile_stats().questions_asked, 0);

    // A new persona starts clean.
    let draft = CharacterDraft {
        name: "Ива".to_string(),
        role: Some(Role::Biologist),
        avatar: AVATARS[0],
    };
    session.create_character(&draft).unwrap();
    assert_eq!(session.screen, Screen::Map);
    assert_eq!(session.completed_missions, 0);
}
