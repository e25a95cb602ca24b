//! Combo chain и фазы одного удара.
//!
//! Удар: таймлайн с паузами (wind-up, кадр синхронизации с анимацией,
//! сам удар, cancel window). Вместо корутины состояние хранится явно в
//! `SwingSequence` и продвигается из `Swordsman::tick`.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::combat::CombatSetupError;

/// Один удар комбо-цепочки
#[derive(Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
pub struct SwingEvent {
    /// Имя клипа (telegraph вариант: `{animation}_telegraph`)
    pub animation: String,
    /// Длительность удара (секунды на swing)
    pub rate: f32,
    /// Шаг вперёд во время удара (impulse distance)
    pub step: f32,
}

impl SwingEvent {
    pub fn new(animation: impl Into<String>, rate: f32, step: f32) -> Self {
        Self {
            animation: animation.into(),
            rate,
            step,
        }
    }

    pub fn telegraph_animation(&self) -> String {
        format!("{}_telegraph", self.animation)
    }
}

/// Упорядоченная цепочка ударов персонажа
#[derive(Component, Debug, Clone, Default, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
pub struct ComboChain {
    pub swings: Vec<SwingEvent>,
}

impl ComboChain {
    pub fn new(swings: Vec<SwingEvent>) -> Self {
        Self { swings }
    }

    /// Удар для `swing_number` (1-based). Цепочка короче MAX_SWINGS идёт по кругу.
    pub fn swing_for(&self, swing_number: u32) -> Option<&SwingEvent> {
        if self.swings.is_empty() {
            return None;
        }
        let index = (swing_number.saturating_sub(1) as usize) % self.swings.len();
        self.swings.get(index)
    }

    pub fn validate(&self) -> Result<(), CombatSetupError> {
        if self.swings.is_empty() {
            return Err(CombatSetupError::EmptyComboChain);
        }

        for (index, swing) in self.swings.iter().enumerate() {
            if !(swing.rate > 0.0) {
                return Err(CombatSetupError::InvalidSwingRate {
                    index,
                    animation: swing.animation.clone(),
                    rate: swing.rate,
                });
            }
        }

        Ok(())
    }
}

/// Фаза активного удара
///
/// # Таймлайн
///
/// 1. **TelegraphWindup**: wind-up клип + decal (только первый удар, telegraph_rate − 0.2s)
/// 2. **TelegraphCommit**: decal перекрашен, персонаж unbalanced (0.2s)
/// 3. **AwaitFrame**: impulse + WeaponFired уже отправлены, ждём следующий tick
/// 4. **Swinging**: клип удара играет (rate × (1 − cancel_window))
/// 5. **CancelWindow**: recovery, follow-up input засчитывается (rate × cancel_window)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum SwingPhase {
    TelegraphWindup,
    TelegraphCommit,
    AwaitFrame,
    Swinging,
    CancelWindow,
}

/// Активный удар (не больше одного на персонажа)
#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct SwingSequence {
    pub swing: SwingEvent,
    /// Номер удара в цепочке на момент запуска (1..=MAX_SWINGS)
    pub index: u32,
    pub phase: SwingPhase,
    /// Осталось до следующего перехода (секунды). Для AwaitFrame не используется.
    pub remaining: f32,
}

impl SwingSequence {
    pub fn new(swing: SwingEvent, index: u32, phase: SwingPhase, remaining: f32) -> Self {
        Self {
            swing,
            index,
            phase,
            remaining,
        }
    }

    /// Переход в фазу с таймером; перерасход прошлой фазы переносится
    pub fn enter(&mut self, phase: SwingPhase, duration: f32) {
        self.phase = phase;
        self.remaining += duration;
    }
}
