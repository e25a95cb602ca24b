//! Movement компоненты: тело с velocity (интеграция во внешнем physics layer)

use bevy::prelude::*;

/// Физическое тело (velocity-change semantics)
///
/// ECS только накапливает impulses в velocity.
/// Интеграцию velocity → position делает physics layer.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct PhysicsBody {
    pub velocity: Vec3,
}

impl PhysicsBody {
    /// Мгновенное изменение скорости
    pub fn apply_impulse(&mut self, impulse: Vec3) {
        self.velocity += impulse;
    }

    /// Гасит остаточный дрейф (dodge → block/attack)
    pub fn halt(&mut self) {
        self.velocity = Vec3::ZERO;
    }
}
