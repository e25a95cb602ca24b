//! DudeWorld Simulation Core
//!
//! ECS-симуляция ближнего боя на Bevy 0.16 (strategic layer):
//! - Swordsman: combo цепочки, telegraph, cancel window, block, stun
//! - Projectile: lifetime, контакты, DamageEvent → receivers
//!
//! Physics, анимация и VFX: внешние слои, общаются через events.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

// Публичные модули
pub mod actor;
pub mod combat;
pub mod components;
pub mod logger;

// Re-export базовых компонентов для удобства
pub use actor::{spawn_projectile, spawn_swordsman};
pub use combat::{
    ComboChain, CombatPlugin, CombatSetupError, DamageEvent, DudeState, Projectile, SwingEvent,
    Swordsman, SwordsmanConfig,
};
pub use components::*;
pub use logger::{init_logger, log, log_error, log_info, log_warning};

/// Длина fixed tick симуляции
pub fn fixed_timestep() -> Duration {
    Duration::from_secs_f64(1.0 / combat::config::FIXED_TIMESTEP_HZ)
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_duration(fixed_timestep()))
            .register_type::<Dude>()
            .register_type::<Health>()
            .register_type::<PhysicsBody>()
            .add_plugins(CombatPlugin);
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Время ручное: каждый `app.update()` двигает часы ровно на один fixed tick
/// (первый update только запускает часы). Детерминизм не зависит от wall clock.
pub fn create_headless_app() -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(fixed_timestep()))
        .insert_resource(Time::<Fixed>::from_duration(fixed_timestep()));

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
