//! Projectile: снаряд / hazard со своим lifetime.
//!
//! Lifecycle:
//! 1. spawn (атака) → `initialize()` на первом tick (impulse + lifetime)
//! 2. `tick(dt)` уменьшает lifetime (кроме environmental)
//! 3. `on_contact()` строит DamageEvent, non-penetrating → `expire()`
//! 4. `expire()` только помечает снаряд; удаляет его owning система
//!    (`release_expired_projectiles`), предварительно отцепив trail/particles.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::combat::DamageEvent;
use crate::components::PhysicsBody;

/// Lifetime до `initialize()` (фактически "бесконечный")
pub const UNSET_LIFETIME: f32 = 9999.0;

#[derive(Component, Debug, Clone, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[require(PhysicsBody, Transform)]
#[serde(default)]
pub struct Projectile {
    pub damage: u32,
    /// 0 = hitscan/instant, lifetime берётся прямо из range
    pub speed: f32,
    pub range: f32,
    pub knockback_force: f32,
    /// None → владельцем считается сам снаряд
    #[serde(skip)]
    pub owner: Option<Entity>,
    pub team: u32,
    /// Статичный hazard (огонь, ловушка): без impulse, без expiry
    pub environmental: bool,
    pub penetrates: bool,
    /// "key=value" эффекты, мержатся в DamageEvent
    pub effects: Vec<String>,
    /// VFX prefab на месте гибели снаряда
    pub impact_effect: Option<String>,

    #[serde(skip)]
    life: f32,
    #[serde(skip)]
    distance_travelled: f32,
    #[serde(skip)]
    initialized: bool,
    #[serde(skip)]
    expiring: bool,

    #[reflect(ignore)]
    #[serde(skip)]
    data: Option<DamageEvent>,
}

impl Default for Projectile {
    fn default() -> Self {
        Self {
            damage: 100,
            speed: 500.0,
            range: UNSET_LIFETIME,
            knockback_force: 0.0,
            owner: None,
            team: 0,
            environmental: false,
            penetrates: false,
            effects: Vec::new(),
            impact_effect: None,
            life: UNSET_LIFETIME,
            distance_travelled: 0.0,
            initialized: false,
            expiring: false,
            data: None,
        }
    }
}

impl Projectile {
    pub fn new(damage: u32, speed: f32, range: f32) -> Self {
        Self {
            damage,
            speed,
            range,
            ..default()
        }
    }

    pub fn with_owner(mut self, owner: Entity, team: u32) -> Self {
        self.owner = Some(owner);
        self.team = team;
        self
    }

    pub fn with_knockback(mut self, knockback_force: f32) -> Self {
        self.knockback_force = knockback_force;
        self
    }

    pub fn with_effects<S: Into<String>>(mut self, effects: impl IntoIterator<Item = S>) -> Self {
        self.effects = effects.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_impact_effect(mut self, prefab: impl Into<String>) -> Self {
        self.impact_effect = Some(prefab.into());
        self
    }

    pub fn environmental(mut self) -> Self {
        self.environmental = true;
        self
    }

    pub fn penetrating(mut self) -> Self {
        self.penetrates = true;
        self
    }

    pub fn life(&self) -> f32 {
        self.life
    }

    pub fn distance_travelled(&self) -> f32 {
        self.distance_travelled
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn is_expiring(&self) -> bool {
        self.expiring
    }

    /// Первый tick снаряда: lifetime + стартовый impulse
    ///
    /// Возвращает величину impulse вдоль forward (None, если impulse не нужен).
    /// Повторный вызов ничего не делает.
    pub fn initialize(&mut self) -> Option<f32> {
        if self.initialized {
            return None;
        }
        self.initialized = true;

        if self.speed == 0.0 {
            self.life = self.range;
            return None;
        }

        if self.environmental {
            return None;
        }

        self.life = self.range / self.speed;
        Some(self.speed)
    }

    /// Fixed tick. Возвращает true если снаряд только что истёк.
    pub fn tick(&mut self, dt: f32, speed: f32) -> bool {
        if self.environmental || self.expiring {
            return false;
        }

        self.distance_travelled += speed * dt;
        self.life -= dt;
        if self.life <= 0.0 {
            return self.expire();
        }
        false
    }

    /// Контакт с другим collider'ом.
    ///
    /// Возвращает DamageEvent для доставки victim'у (None, если контакт проигнорирован).
    /// Первый контакт non-penetrating снаряда выигрывает: дальше снаряд уже expiring.
    pub fn on_contact(
        &mut self,
        self_entity: Entity,
        other: Entity,
        other_is_trigger: bool,
    ) -> Option<DamageEvent> {
        if other_is_trigger || self.expiring {
            return None;
        }

        let owner = self.owner.unwrap_or(self_entity);
        let (damage, knockback, team) = (self.damage, self.knockback_force, self.team);
        let data = self
            .data
            .get_or_insert_with(|| DamageEvent::new(owner, damage, knockback, 0.0, team));

        data.merge_effects(&self.effects);
        data.bullet = Some(self_entity);
        data.victim = Some(other);
        if self.speed > 0.0 {
            data.ranged = true;
        }

        let event = data.clone();

        if !self.penetrates {
            self.expire();
        }

        Some(event)
    }

    /// Пометить снаряд на удаление. Environmental hazards не истекают.
    ///
    /// Возвращает true если снаряд перешёл в expiring.
    pub fn expire(&mut self) -> bool {
        if self.environmental || self.expiring {
            return false;
        }
        self.expiring = true;
        true
    }
}

/// Trail снаряда (child). При гибели снаряда отцепляется и дорисовывается сам.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct TrailEffect;

/// Particle emitter снаряда (child). При гибели снаряда останавливается и отцепляется.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct ParticleEmitter {
    pub emitting: bool,
}

impl Default for ParticleEmitter {
    fn default() -> Self {
        Self { emitting: true }
    }
}
