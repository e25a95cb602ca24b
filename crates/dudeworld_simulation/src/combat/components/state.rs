//! Боевые флаги персонажа
//!
//! Флаги не взаимоисключающие (attacking + unbalanced, blocking + running).
//! В конце stun сбрасываются все разом.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Reflect, Serialize, Deserialize)]
pub struct DudeState {
    pub dodging: bool,
    pub dodging_recovery: bool,
    pub blocking: bool,
    pub attacking: bool,
    pub attacking_recovery: bool,
    pub stunned: bool,
    pub running: bool,
    /// Уязвимое окно внутри атаки (не может блокировать/уклоняться)
    pub unbalanced: bool,
}

impl DudeState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
