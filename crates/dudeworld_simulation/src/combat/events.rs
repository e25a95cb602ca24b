//! Combat events: граница между ECS и внешними слоями
//!
//! Inbound (driver/physics → ECS): CombatIntent, ProjectileContact
//! Outbound (ECS → animation/VFX/listeners): AnimationRequest, DecalChanged,
//! SpawnEffectRequest, CombatSignal, SwingStarted, ProjectileExpired
//! Internal: ShotLanded (projectile → damage receivers)
//!
//! Любой event без readers: валидно (fire-and-forget).

use bevy::prelude::*;

use crate::combat::DamageEvent;

// ============================================================================
// Inbound
// ============================================================================

/// Команда от input/AI driver'а
#[derive(Event, Debug, Clone)]
pub struct CombatIntent {
    pub actor: Entity,
    pub action: CombatAction,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CombatAction {
    Attack,
    Block,
    BlockEnd,
    Cancel,
    Stun { duration: f32 },
}

/// Physics layer: снаряд коснулся другого collider'а
#[derive(Event, Debug, Clone)]
pub struct ProjectileContact {
    pub projectile: Entity,
    pub other: Entity,
    /// Trigger/sensor поверхности снаряд игнорирует
    pub other_is_trigger: bool,
}

// ============================================================================
// Internal
// ============================================================================

/// Попадание, готовое к доставке в receivers на target
#[derive(Event, Debug, Clone)]
pub struct ShotLanded {
    pub target: Entity,
    pub event: DamageEvent,
}

// ============================================================================
// Outbound
// ============================================================================

/// Broadcast всем слушателям персонажа
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct CombatSignal {
    pub actor: Entity,
    pub kind: SignalKind,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SignalKind {
    /// Удар начался: остальные input'ы заблокированы
    Disable,
    /// Удар закончился
    Enable,
    /// Оружие активно (hit detection может включаться)
    WeaponFired,
    /// Следующий удар комбо доступен
    FollowUp,
    Stunned { duration: f32 },
    Recovered,
}

/// Запрос к animation player'у персонажа
#[derive(Event, Debug, Clone, PartialEq)]
pub struct AnimationRequest {
    pub actor: Entity,
    pub command: AnimationCommand,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnimationCommand {
    /// `speed: None`: скорость клипа не трогаем
    Play {
        name: String,
        speed: Option<f32>,
        mode: PlayMode,
    },
    Stop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayMode {
    /// Останавливает только клипы своего слоя
    SameLayer,
    /// Остановить всё остальное
    StopAll,
}

/// Decal персонажа поменял состояние
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct DecalChanged {
    pub actor: Entity,
    pub decal: Decal,
    pub state: DecalState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decal {
    Block,
    Telegraph,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecalState {
    Shown,
    /// Телеграф перекрашен: атаку уже не отменить
    Committed,
    /// Скрыт, исходный цвет восстановлен
    Hidden,
}

/// Заспавнить VFX prefab (impact и т.п.)
#[derive(Event, Debug, Clone)]
pub struct SpawnEffectRequest {
    pub prefab: String,
    pub transform: Transform,
}

/// Удар комбо запущен (`on_attack` вернул true)
#[derive(Event, Debug, Clone)]
pub struct SwingStarted {
    pub actor: Entity,
    pub swing_number: u32,
    pub animation: String,
}

/// Снаряд истёк и удалён owning системой
#[derive(Event, Debug, Clone, Copy)]
pub struct ProjectileExpired {
    pub projectile: Entity,
    pub position: Vec3,
}
