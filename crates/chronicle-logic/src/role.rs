//! Persona roles — the four expedition archetypes.
//!
//! A closed enumeration: each role highlights one field of the climate
//! dataset and carries its own mission and badge. Behavior hangs off
//! the variant via fixed matches, never off inheritance.

use serde::{Deserialize, Serialize};

/// Expedition persona archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Role {
    /// Temperature anomalies, CO₂, climate forecasts.
    Climatologist = 0,
    /// Animal populations, migration, ecosystems.
    Biologist = 1,
    /// Technology, energy, infrastructure.
    Engineer = 2,
    /// Human stories, society, public data.
    Journalist = 3,
}

/// Static registry data for a role.
#[derive(Debug, Clone)]
pub struct RoleInfo {
    /// Display title.
    pub title: &'static str,
    /// One-line description of the role's focus.
    pub focus: &'static str,
    /// Badge label awarded after the first completed mission.
    pub badge: &'static str,
}

impl Role {
    /// All role variants for iteration.
    pub const ALL: [Role; 4] = [
        Role::Climatologist,
        Role::Biologist,
        Role::Engineer,
        Role::Journalist,
    ];

    pub fn info(&self) -> RoleInfo {
        match self {
            Self::Climatologist => RoleInfo {
                title: "Климатолог",
                focus: "Температурные данные, CO₂, метан, прогнозы климата",
                badge: "🌡️ Мастер климата",
            },
            Self::Biologist => RoleInfo {
                title: "Биолог",
                focus: "Популяции животных, миграция, экосистемы",
                badge: "🐻 Друг медведей",
            },
            Self::Engineer => RoleInfo {
                title: "Инженер",
                focus: "Технологии, энергия, инфраструктура, устойчивые решения",
                badge: "⚡ Энергетик",
            },
            Self::Journalist => RoleInfo {
                title: "Журналист",
                focus: "Человеческие истории, влияние на общество, публичные данные",
                badge: "📰 Хроникёр",
            },
        }
    }

    pub fn from_u8(val: u8) -> Option<Self> {
        match val {
            0 => Some(Self::Climatologist),
            1 => Some(Self::Biologist),
            2 => Some(Self::Engineer),
            3 => Some(Self::Journalist),
            _ => None,
        }
    }
}
