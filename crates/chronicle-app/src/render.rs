//! Screen rendering for the terminal client.
//!
//! Formats engine output as plain text: metric panels, horizontal bar
//! charts scaled to the series maximum, mission cards, the chat
//! transcript, and the profile. No logic lives here.

use chronicle_logic::advisor::Speaker;
use chronicle_logic::climate::{self, RECORDS};
use chronicle_logic::metric::{ice_decline_percent, series_max};
use chronicle_logic::role::Role;
use chronicle_logic::session::{CharacterDraft, MissionStep, Session, AVATARS, MISSION_GOAL};

/// Bar width of the widest chart entry.
const CHART_WIDTH: usize = 40;

/// Render one bar per record, scaled so the largest value fills the
/// full width. The selected year is marked.
pub fn chart(series: &[f64], selected_year: u16) -> Vec<String> {
    let max = series_max(series);
    series
        .iter()
        .zip(RECORDS.iter())
        .map(|(value, record)| {
            let filled = if max > 0.0 {
                ((value / max) * CHART_WIDTH as f64).round() as usize
            } else {
                0
            };
            let marker = if record.year == selected_year { "▶" } else { " " };
            format!(
                "{} {} │{:<width$} {:.1}",
                marker,
                record.year,
                "█".repeat(filled),
                value,
                width = CHART_WIDTH
            )
        })
        .collect()
}

pub fn start_screen(draft: &CharacterDraft) -> String {
    let mut out = String::new();
    out.push_str("❄ Ледяной Хроникер — экспедиция в Арктику\n\n");
    out.push_str("Создайте персонажа:\n");
    out.push_str(&format!(
        "  имя:    {}\n",
        if draft.name.is_empty() { "—" } else { draft.name.as_str() }
    ));
    out.push_str(&format!("  аватар: {}   (avatar 1-{})\n", draft.avatar, AVATARS.len()));
    out.push_str("  роль:\n");
    for (i, role) in Role::ALL.iter().enumerate() {
        let info = role.info();
        let mark = if draft.role == Some(*role) { "▶" } else { " " };
        out.push_str(&format!("   {} {}. {} — {}\n", mark, i + 1, info.title, info.focus));
    }
    out.push_str("\nКоманды: name <имя>, role <1-4>, avatar <1-6>, begin\n");
    out
}

pub fn map_screen(session: &Session) -> String {
    let record = session.current_record();
    let metric = session.metric();
    let mut out = String::new();

    out.push_str(&format!("── Карта Арктики ── год {} ──\n", session.selected_year));
    out.push_str(&format!(
        "  {}: {}  ({})\n",
        metric.label, metric.value, metric.trend
    ));
    out.push_str(&format!(
        "  Площадь льда: {} млн км²  (-{:.1}% с 1925)\n\n",
        record.ice_area_mkm2,
        ice_decline_percent(record)
    ));

    for line in chart(&session.series(), session.selected_year) {
        out.push_str(&line);
        out.push('\n');
    }
    out.push_str(&format!("\nГоды: {:?}  (year <N>)\n", climate::years()));
    out
}

pub fn missions_screen(session: &Session) -> String {
    let spec = match session.mission_spec() {
        Some(spec) => spec,
        None => return "Миссия не найдена — сначала создайте персонажа.\n".to_string(),
    };

    let mut out = String::new();
    match session.mission_step {
        MissionStep::Intro => {
            out.push_str(&format!("── Миссия ── {}\n", spec.title));
            out.push_str(&format!("  {}\n\n", spec.description));
            for (i, task) in spec.tasks.iter().enumerate() {
                out.push_str(&format!("  Задача {}: {}\n", i + 1, task.question));
            }
            out.push_str("\nКоманда: start\n");
        }
        MissionStep::Task1 => {
            out.push_str(&format!("── {} ── шаг 1 из 1\n\n", spec.title));
            for line in chart(&session.series(), session.selected_year) {
                out.push_str(&line);
                out.push('\n');
            }
            out.push('\n');
            for (i, task) in spec.tasks.iter().enumerate() {
                let entered = if i == 0 {
                    &session.attempt.answer1
                } else {
                    &session.attempt.answer2
                };
                out.push_str(&format!(
                    "  {}. {} [{}] — введено: {}\n",
                    i + 1,
                    task.question,
                    task.unit,
                    if entered.is_empty() { "—" } else { entered }
                ));
            }
            out.push_str("\nКоманды: answer <a1> <a2>, check, back\n");
        }
        MissionStep::Result => {
            let outcome = session.grade();
            out.push_str("── Результат миссии ──\n");
            out.push_str(&format!("  {}\n", outcome.message));
            if outcome.correct {
                if let (Some(change), Some(rate)) = (outcome.change, outcome.rate_per_year) {
                    out.push_str(&format!("  Изменение (2000-2025): {:.2}\n", change));
                    out.push_str(&format!("  Скорость изменения в год: {:.4}\n", rate));
                }
                out.push_str("\nКоманды: done, profile\n");
            } else {
                out.push_str("\nКоманда: retry\n");
            }
        }
    }
    out
}

pub fn ai_screen(session: &Session) -> String {
    let mut out = String::new();
    out.push_str("── Арктина, ИИ-наставник ──\n");
    for message in &session.chat {
        let who = match message.speaker {
            Speaker::Advisor => "Арктина",
            Speaker::User => "Вы",
        };
        out.push_str(&format!("  {}: {}\n", who, message.text));
    }
    out.push_str("\nЗадайте вопрос (или ask <вопрос>)\n");
    out
}

pub fn profile_screen(session: &Session) -> String {
    let character = match &session.character {
        Some(c) => c,
        None => return "Персонаж ещё не создан.\n".to_string(),
    };
    let info = character.role.info();
    let stats = session.profile_stats();

    let mut out = String::new();
    out.push_str(&format!("── Профиль ── {} {}\n", character.avatar, character.name));
    out.push_str(&format!("  Роль: {} — {}\n", info.title, info.focus));
    out.push_str(&format!(
        "  Выполнено миссий: {} / {}\n",
        stats.completed_missions, MISSION_GOAL
    ));
    out.push_str(&format!("  Вопросов ИИ: {}\n", stats.questions_asked));
    match session.badge() {
        Some(badge) => out.push_str(&format!("  Достижения: {}\n", badge)),
        None => out.push_str("  Достижения: выполни первую миссию, чтобы получить бейдж!\n"),
    }
    out
}

pub fn about_screen() -> String {
    "── О проекте ──\n\
     «Ледяной Хроникер» — интерактивный симулятор арктической экспедиции:\n\
     временная карта 1925-2050, миссии по ролям и ИИ-наставник.\n"
        .to_string()
}

pub fn help_text() -> String {
    "Команды: map | missions | ai | profile | about | year <N> | start | \
     answer <a1> <a2> | check | retry | done | back | ask <вопрос> | \
     reset | help | quit\n"
        .to_string()
}
