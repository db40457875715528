//! Per-role missions and answer grading.
//!
//! Each role has one fixed two-question mission: read a value off the
//! chart for the year 2000, then for 2025. Grading compares the raw
//! text answers against the expected values with a tolerance inferred
//! from the answer's magnitude, then reports the change and the
//! per-year rate between the two compared years.

use serde::{Deserialize, Serialize};

use crate::role::Role;

/// One quiz question with its expected numeric answer.
#[derive(Debug, Clone, Serialize)]
pub struct MissionTask {
    pub question: &'static str,
    pub expected: f64,
    /// Display unit, possibly empty.
    pub unit: &'static str,
}

/// A role's fixed mission: title, framing, and exactly two tasks.
#[derive(Debug, Clone, Serialize)]
pub struct MissionSpec {
    pub title: &'static str,
    pub description: &'static str,
    pub tasks: [MissionTask; 2],
}

/// Raw answer text as entered; parsed only at grading time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionAttempt {
    pub answer1: String,
    pub answer2: String,
}

impl MissionAttempt {
    /// Both fields carry non-whitespace text.
    pub fn is_filled(&self) -> bool {
        !self.answer1.trim().is_empty() && !self.answer2.trim().is_empty()
    }

    pub fn clear(&mut self) {
        self.answer1.clear();
        self.answer2.clear();
    }
}

/// The years every mission question pair refers to.
pub const COMPARISON_YEARS: (u16, u16) = (2000, 2025);

/// Span the per-year rate is averaged over. The grading formula assumes
/// the [`COMPARISON_YEARS`] pair regardless of task wording.
pub const COMPARISON_SPAN_YEARS: f64 = 25.0;

/// Tolerance for large-magnitude answers (bear counts), absolute units.
const TOLERANCE_COARSE: f64 = 100.0;

/// Tolerance for decimal-scale answers (°C, TWh, millions).
const TOLERANCE_FINE: f64 = 0.5;

/// Grading tolerance inferred from the first expected answer's magnitude.
pub fn tolerance_for(expected_first: f64) -> f64 {
    if expected_first > 100.0 {
        TOLERANCE_COARSE
    } else {
        TOLERANCE_FINE
    }
}

/// The mission assigned to a role.
pub fn spec_for(role: Role) -> MissionSpec {
    match role {
        Role::Climatologist => MissionSpec {
            title: "🌡️ Глобальное потепление",
            description: "Проанализируйте температурные аномалии и спрогнозируйте будущее",
            tasks: [
                MissionTask {
                    question: "Какая температурная аномалия была в 2000 году?",
                    expected: 0.4,
                    unit: "°C",
                },
                MissionTask {
                    question: "Какая температурная аномалия в 2025 году?",
                    expected: 1.1,
                    unit: "°C",
                },
            ],
        },
        Role::Biologist => MissionSpec {
            title: "🐻 Популяция белых медведей",
            description: "Изучите динамику популяции и факторы её снижения",
            tasks: [
                MissionTask {
                    question: "Сколько медведей было в 2000 году?",
                    expected: 23000.0,
                    unit: "",
                },
                MissionTask {
                    question: "Сколько медведей в 2025 году?",
                    expected: 22000.0,
                    unit: "",
                },
            ],
        },
        Role::Engineer => MissionSpec {
            title: "⚡ Энергопотребление Арктики",
            description: "Рассчитайте рост энергопотребления и его влияние",
            tasks: [
                MissionTask {
                    question: "Энергопотребление в 2000 году (ТВт·ч)?",
                    expected: 10.2,
                    unit: "ТВт·ч",
                },
                MissionTask {
                    question: "Энергопотребление в 2025 году (ТВт·ч)?",
                    expected: 12.4,
                    unit: "ТВт·ч",
                },
            ],
        },
        Role::Journalist => MissionSpec {
            title: "👥 Население Арктики",
            description: "Исследуйте демографические изменения в регионе",
            tasks: [
                MissionTask {
                    question: "Население Арктики в 2000 году (млн чел)?",
                    expected: 3.8,
                    unit: "млн",
                },
                MissionTask {
                    question: "Население Арктики в 2025 году (млн чел)?",
                    expected: 4.0,
                    unit: "млн",
                },
            ],
        },
    }
}

/// Result of grading a mission attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissionOutcome {
    pub correct: bool,
    /// User-facing verdict line.
    pub message: &'static str,
    /// Change between the two compared years (answer2 − answer1).
    pub change: Option<f64>,
    /// Average change per year over [`COMPARISON_SPAN_YEARS`].
    pub rate_per_year: Option<f64>,
}

impl MissionOutcome {
    fn failure(message: &'static str) -> Self {
        Self {
            correct: false,
            message,
            change: None,
            rate_per_year: None,
        }
    }
}

/// Parse one answer field. Empty, non-numeric, and non-finite input all
/// count as missing.
fn parse_answer(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Grade a mission attempt against the role's expected answers.
///
/// Pure: identical input yields an identical outcome, and no mission
/// state is touched. Both answers must fall strictly inside the
/// tolerance band for the attempt to pass; there is no partial credit.
pub fn grade(role: Option<Role>, attempt: &MissionAttempt) -> MissionOutcome {
    let spec = match role {
        Some(role) => spec_for(role),
        None => return MissionOutcome::failure("Миссия не найдена"),
    };

    let (ans1, ans2) = match (parse_answer(&attempt.answer1), parse_answer(&attempt.answer2)) {
        (Some(a), Some(b)) => (a, b),
        _ => return MissionOutcome::failure("Введите оба значения"),
    };

    let tolerance = tolerance_for(spec.tasks[0].expected);
    let diff1 = (ans1 - spec.tasks[0].expected).abs();
    let diff2 = (ans2 - spec.tasks[1].expected).abs();

    if diff1 < tolerance && diff2 < tolerance {
        MissionOutcome {
            correct: true,
            message: "Отлично! Ты точно определил значения.",
            change: Some(ans2 - ans1),
            rate_per_year: Some((ans2 - ans1).abs() / COMPARISON_SPAN_YEARS),
        }
    } else {
        MissionOutcome::failure("Попробуй ещё раз. Подсказка: смотри на график внимательнее!")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attempt(a1: &str, a2: &str) -> MissionAttempt {
        MissionAttempt {
            answer1: a1.to_string(),
            answer2: a2.to_string(),
        }
    }

    #[test]
    fn every_role_has_two_tasks() {
        for role in Role::ALL {
            let spec = spec_for(role);
            assert!(!spec.title.is_empty());
            assert_eq!(spec.tasks.len(), 2);
        }
    }

    #[test]
    fn no_role_is_mission_not_found() {
        let out = grade(None, &attempt("1", "2"));
        assert!(!out.correct);
        assert_eq!(out.message, "Миссия не найдена");
    }

    #[test]
    fn empty_answer_rejected() {
        let out = grade(Some(Role::Engineer), &attempt("", "12.4"));
        assert!(!out.correct);
        assert_eq!(out.message, "Введите оба значения");
    }

    #[test]
    fn non_numeric_answer_rejected_without_panic() {
        for bad in ["abc", "12,4", "--", "NaN", "inf"] {
            let out = grade(Some(Role::Engineer), &attempt(bad, "12.4"));
            assert!(!out.correct, "{bad:?} must not grade");
            assert_eq!(out.message, "Введите оба значения");
        }
    }

    #[test]
    fn zero_is_a_valid_answer() {
        // Parses fine; graded as an ordinary wrong value.
        let out = grade(Some(Role::Engineer), &attempt("0", "0"));
        assert!(!out.correct);
        assert_eq!(
            out.message,
            "Попробуй ещё раз. Подсказка: смотри на график внимательнее!"
        );
    }

    #[test]
    fn coarse_tolerance_boundary_is_strict() {
        // Expected 23000: off by exactly 100 fails, 99.9 passes.
        let out = grade(Some(Role::Biologist), &attempt("23100", "22000"));
        assert!(!out.correct);
        let out = grade(Some(Role::Biologist), &attempt("23099.9", "22000"));
        assert!(out.correct);
    }

    #[test]
    fn fine_tolerance_boundary_is_strict() {
        // Expected 10.2: off by exactly 0.5 fails, 0.49 passes.
        let out = grade(Some(Role::Engineer), &attempt("10.7", "12.4"));
        assert!(!out.correct);
        let out = grade(Some(Role::Engineer), &attempt("10.69", "12.4"));
        assert!(out.correct);
    }

    #[test]
    fn both_answers_must_pass() {
        let out = grade(Some(Role::Climatologist), &attempt("0.4", "9.9"));
        assert!(!out.correct);
        assert!(out.change.is_none());
        assert!(out.rate_per_year.is_none());
    }

    #[test]
    fn biologist_change_and_rate() {
        let out = grade(Some(Role::Biologist), &attempt("23000", "22000"));
        assert!(out.correct);
        assert!((out.change.unwrap() - -1000.0).abs() < 1e-9);
        assert!((out.rate_per_year.unwrap() - 40.0).abs() < 1e-9);
    }

    #[test]
    fn climatologist_change_and_rate() {
        let out = grade(Some(Role::Climatologist), &attempt("0.4", "1.1"));
        assert!(out.correct);
        assert!((out.change.unwrap() - 0.7).abs() < 1e-9);
        assert!((out.rate_per_year.unwrap() - 0.028).abs() < 1e-9);
    }

    #[test]
    fn grading_is_idempotent() {
        let a = attempt("23000", "22000");
        let first = grade(Some(Role::Biologist), &a);
        let second = grade(Some(Role::Biologist), &a);
        assert_eq!(first, second);
    }

    #[test]
    fn attempt_fill_state() {
        let mut a = attempt("  ", "5");
        assert!(!a.is_filled());
        a.answer1 = "4".into();
        assert!(a.is_filled());
        a.clear();
        assert!(!a.is_filled());
        assert_eq!(a, MissionAttempt::default());
    }

    #[test]
    fn tolerance_threshold() {
        assert!((tolerance_for(23000.0) - 100.0).abs() < f64::EPSILON);
        assert!((tolerance_for(0.4) - 0.5).abs() < f64::EPSILON);
        // 100 itself is not "large".
        assert!((tolerance_for(100.0) - 0.5).abs() < f64::EPSILON);
    }
}
