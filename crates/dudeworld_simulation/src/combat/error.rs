//! Ошибки инициализации combat компонентов
//!
//! Runtime переходы (block end во время атаки, shot без receiver): это
//! определённые no-op, не ошибки. Ошибка только одна: персонаж собран неправильно.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CombatSetupError {
    #[error("combo chain is empty: a swordsman needs at least one swing")]
    EmptyComboChain,

    #[error("swing #{index} ({animation}) has non-positive rate {rate}")]
    InvalidSwingRate {
        index: usize,
        animation: String,
        rate: f32,
    },

    #[error("telegraph_attacks is enabled but no telegraph decal is assigned")]
    MissingTelegraphDecal,

    #[error("invalid tuning value `{field}` = {value}: {reason}")]
    InvalidTuning {
        field: &'static str,
        value: f32,
        reason: &'static str,
    },
}
