//! Combat system module (melee combo + projectiles)
//!
//! ECS ответственность:
//! - Game state: DudeState флаги, combo counters, stamina, stun, lifetime снарядов
//! - Combat rules: combo окна, telegraph, cancel window, knockback → stagger
//! - Events: ShotLanded, CombatSignal, AnimationRequest, DecalChanged
//!
//! Внешние слои (physics, animation player, VFX) ответственны за:
//! - collision detection → ProjectileContact
//! - проигрывание AnimationRequest / DecalChanged / SpawnEffectRequest
//! - интеграцию PhysicsBody.velocity

use bevy::prelude::*;

pub mod components;
pub mod config;
pub mod damage;
pub mod error;
pub mod events;
pub mod systems;

// Re-export основных типов
pub use components::*;
pub use config::SwordsmanConfig;
pub use damage::{parse_effect, DamageEvent, DamageReceiver, ShotOutcome};
pub use error::CombatSetupError;
pub use events::*;
pub use systems::*;

use crate::components::Health;

/// Combat Plugin
///
/// Регистрирует combat системы в FixedUpdate (60Hz).
///
/// Порядок выполнения (один logical thread на персонажа):
/// 1. tick_swordsmen: таймеры, stamina, stun, фазы удара
/// 2. process_combat_intents: команды driver'а
/// 3. consume_queued_follow_ups: FollowUp прошлого tick → следующий удар
/// 4. initialize_projectiles / tick_projectiles: lifetime снарядов
/// 5. process_projectile_contacts → ShotLanded
/// 6. deliver_shots: Swordsman (knockback) и Health (урон)
/// 7. flush_combat_effects: outbox → body + events
/// 8. release_expired_projectiles: owning система удаляет снаряды
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        // Регистрация событий
        app.add_event::<CombatIntent>()
            .add_event::<ProjectileContact>()
            .add_event::<ShotLanded>()
            .add_event::<CombatSignal>()
            .add_event::<AnimationRequest>()
            .add_event::<DecalChanged>()
            .add_event::<SpawnEffectRequest>()
            .add_event::<SwingStarted>()
            .add_event::<ProjectileExpired>();

        app.register_type::<Swordsman>()
            .register_type::<ComboChain>()
            .register_type::<Projectile>()
            .register_type::<TrailEffect>()
            .register_type::<ParticleEmitter>()
            .register_type::<BufferedComboInput>();

        // Регистрация систем в FixedUpdate
        app.add_systems(
            FixedUpdate,
            (
                // Фаза 1: Swordsman timers + intents
                tick_swordsmen,
                process_combat_intents,
                consume_queued_follow_ups,

                // Фаза 2: Projectiles
                initialize_projectiles,
                tick_projectiles,
                process_projectile_contacts,

                // Фаза 3: Damage delivery
                deliver_shots::<Swordsman>,
                deliver_shots::<Health>,

                // Фаза 4: Side effects + cleanup
                flush_combat_effects,
                release_expired_projectiles,
            )
                .chain(), // Последовательное выполнение
        );
    }
}
