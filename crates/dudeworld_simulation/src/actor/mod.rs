//! Actor domain: сборка персонажей и снарядов
//!
//! Spawn helpers проверяют конфигурацию до появления entity:
//! неправильно собранный персонаж: явная ошибка, а не тихий сбой в бою.

use bevy::prelude::*;

use crate::combat::{ComboChain, CombatSetupError, Projectile, Swordsman, SwordsmanConfig};
use crate::components::{Dude, Health};

/// Spawn мечника: Dude (тело) + Health + Swordsman + ComboChain
pub fn spawn_swordsman(
    commands: &mut Commands,
    transform: Transform,
    team: u32,
    config: SwordsmanConfig,
    chain: ComboChain,
) -> Result<Entity, CombatSetupError> {
    let swordsman = Swordsman::new(config, &chain)?;

    let entity = commands
        .spawn((Dude::new(team), transform, Health::default(), swordsman, chain))
        .id();

    crate::logger::log(&format!(
        "Swordsman {:?} spawned (team: {}, position: {:?})",
        entity, team, transform.translation
    ));

    Ok(entity)
}

/// Spawn снаряда. Impulse и lifetime назначит `initialize_projectiles` на первом tick.
pub fn spawn_projectile(commands: &mut Commands, projectile: Projectile, transform: Transform) -> Entity {
    commands.spawn((projectile, transform)).id()
}
