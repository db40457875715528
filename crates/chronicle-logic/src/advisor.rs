//! Арктина — the deterministic expedition advisor.
//!
//! Despite the in-world framing as an AI mentor, this is an ordered
//! keyword rule table: lowercase the question, test each rule's stems
//! for a substring hit, return the first matching rule's canned
//! response. Rule order is significant; an input touching two topics
//! gets the earlier rule's answer. No inference, no external calls.

use serde::{Deserialize, Serialize};

/// Who said a chat line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Speaker {
    Advisor,
    User,
}

/// One line of the chat transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub speaker: Speaker,
    pub text: String,
}

impl ChatMessage {
    pub fn advisor(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Advisor,
            text: text.into(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            text: text.into(),
        }
    }
}

/// One lookup rule: any stem present in the question selects the response.
struct KeywordRule {
    /// Lowercase stems covering the inflected forms of the topic words.
    stems: &'static [&'static str],
    response: &'static str,
}

/// The rule table, checked top to bottom. First match wins.
const RULES: [KeywordRule; 5] = [
    KeywordRule {
        stems: &["лёд", "лед", "льд", "тает", "тают", "таян"],
        response: "Морской лёд в Арктике тает со скоростью примерно -0.052 млн км² в год. \
                   С 1925 года площадь льда сократилась на 20%. Это влияет на альбедо планеты \
                   и ускоряет потепление.",
    },
    KeywordRule {
        stems: &["медвед", "животн"],
        response: "Популяция белых медведей сокращается на ~2.5% в год из-за потери среды \
                   обитания. Им приходится мигрировать на большие расстояния, что увеличивает \
                   энергозатраты.",
    },
    KeywordRule {
        stems: &["климат", "температур"],
        response: "Температура в Арктике растёт в 2 раза быстрее, чем в среднем по планете. \
                   В 2025 году аномалия составляет +1.1°C относительно базового периода.",
    },
    KeywordRule {
        stems: &["энерг", "электр"],
        response: "Энергопотребление в Арктике растёт на 3.1% в год из-за развития \
                   промышленности и увеличения населённых пунктов. В 2025 году это 12.4 ТВт·ч.",
    },
    KeywordRule {
        stems: &["люд", "населен"],
        response: "Население Арктики составляет около 4 млн человек. Основные жители — \
                   коренные народы (инуиты, саамы) и работники промышленных объектов.",
    },
];

/// Suggestion returned when no rule matches.
pub const FALLBACK_RESPONSE: &str =
    "Интересный вопрос! Попробуй переключить временные слои на карте или начни миссию \
     для более детального изучения темы твоей роли.";

/// The two advisor greetings seeding every fresh chat log.
pub fn seed_messages() -> Vec<ChatMessage> {
    vec![
        ChatMessage::advisor("Привет! Я Арктина 🤖 — твой виртуальный наставник в этой экспедиции."),
        ChatMessage::advisor(
            "Чем могу помочь? Спроси меня о таянии льдов, популяции белых медведей или \
             изменении климата!",
        ),
    ]
}

/// Look up the canned response for a user question.
pub fn respond(user_text: &str) -> &'static str {
    let q = user_text.to_lowercase();
    for rule in &RULES {
        if rule.stems.iter().any(|stem| q.contains(stem)) {
            return rule.response;
        }
    }
    FALLBACK_RESPONSE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ice_question_matches_ice_rule() {
        let answer = respond("Почему тают льды?");
        assert!(answer.starts_with("Морской лёд"));
        assert_ne!(answer, FALLBACK_RESPONSE);
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(respond("ЛЁД"), respond("лёд"));
        assert!(respond("КЛИМАТ меняется?").starts_with("Температура в Арктике"));
    }

    #[test]
    fn bear_question_matches() {
        assert!(respond("Что происходит с медведями?").starts_with("Популяция белых медведей"));
        assert!(respond("Расскажи про животных").starts_with("Популяция белых медведей"));
    }

    #[test]
    fn energy_and_people_rules() {
        assert!(respond("Сколько энергии потребляется?").starts_with("Энергопотребление"));
        assert!(respond("Какое население у региона?").starts_with("Население Арктики"));
    }

    #[test]
    fn unrelated_question_falls_back() {
        assert_eq!(respond("xyz completely unrelated"), FALLBACK_RESPONSE);
        assert_eq!(respond(""), FALLBACK_RESPONSE);
    }

    #[test]
    fn first_match_wins_in_declaration_order() {
        // Both the ice rule and the climate rule could claim this one;
        // the ice rule is declared first.
        let answer = respond("Как таяние льда связано с климатом?");
        assert!(answer.starts_with("Морской лёд"));
    }

    #[test]
    fn respond_is_pure() {
        assert_eq!(respond("медведи"), respond("медведи"));
    }

    #[test]
    fn seed_is_two_advisor_greetings() {
        let seed = seed_messages();
        assert_eq!(seed.len(), 2);
        assert!(seed.iter().all(|m| m.speaker == Speaker::Advisor));
    }
}
