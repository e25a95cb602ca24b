//! Stamina: knockback budget персонажа

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::combat::config::STAMINA_RECOVERY_RATE;

/// Выносливость (knockback budget)
///
/// В отличие от health может уйти в минус: каждый knockback вычитается
/// целиком, регенерация потом отрабатывает долг.
/// Инвариант: current ≤ max
#[derive(Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
pub struct Stamina {
    pub current: f32,
    pub max: f32,
    pub regen_rate: f32, // units per second
}

impl Default for Stamina {
    fn default() -> Self {
        Self::new(30.0)
    }
}

impl Stamina {
    pub fn new(max: f32) -> Self {
        Self {
            current: max,
            max,
            regen_rate: STAMINA_RECOVERY_RATE,
        }
    }

    /// Вычитает knockback, возвращает true если stamina опустошена (≤ 0)
    pub fn drain(&mut self, amount: f32) -> bool {
        self.current -= amount;
        self.is_depleted()
    }

    pub fn is_depleted(&self) -> bool {
        self.current <= 0.0
    }

    pub fn regenerate(&mut self, delta_time: f32) {
        if self.current < self.max {
            self.current = (self.current + self.regen_rate * delta_time).min(self.max);
        }
    }
}
