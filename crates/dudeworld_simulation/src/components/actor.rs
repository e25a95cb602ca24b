//! Базовые компоненты акторов: Dude, Health

use bevy::prelude::*;

use crate::combat::{DamageEvent, DamageReceiver, ShotOutcome};
use crate::components::PhysicsBody;

/// Dude: физическое тело персонажа (зеркало для combat логики)
///
/// Само движение и коллизии живут во внешнем physics layer.
/// ECS видит только team и зеркало флага blocking.
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
#[require(PhysicsBody, Transform)]
pub struct Dude {
    /// Команда (friendly fire фильтр)
    pub team: u32,

    /// Зеркало `DudeState::blocking` (читает physics layer)
    pub blocking: bool,
}

impl Dude {
    pub fn new(team: u32) -> Self {
        Self {
            team,
            blocking: false,
        }
    }
}

/// Здоровье актора
///
/// Инвариант: 0 ≤ current ≤ max
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100)
    }
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }
}

impl DamageReceiver for Health {
    fn on_shot(&mut self, event: &DamageEvent, own_team: Option<u32>) -> ShotOutcome {
        if own_team == Some(event.team) {
            return ShotOutcome::Ignored;
        }

        self.take_damage(event.amount);
        ShotOutcome::Absorbed
    }
}
