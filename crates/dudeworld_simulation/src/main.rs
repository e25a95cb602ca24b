//! Headless дуэль DudeWorld
//!
//! Два мечника + турель, скрипт intents по тикам. Physics здесь игрушечная:
//! velocity интегрируем сами, контакт снаряда: по дистанции.

use bevy::prelude::*;
use dudeworld_simulation::combat::{
    release_expired_projectiles, tick_swordsmen, BufferedComboInput, CombatAction, CombatIntent,
    ProjectileContact,
};
use dudeworld_simulation::*;

const TICK_COUNT: u32 = 1200;

/// Радиус "тела" для контакта снаряда
const HIT_RADIUS: f32 = 0.75;

/// Затухание шага мечника за tick
const BODY_DAMPING: f32 = 0.8;

#[derive(Resource, Debug, Clone, Copy)]
struct Duel {
    tick: u32,
    attacker: Entity,
    defender: Entity,
}

fn main() -> Result<(), CombatSetupError> {
    println!("Starting DudeWorld headless duel ({} ticks)", TICK_COUNT);

    let mut app = create_headless_app();
    app.add_plugins(SimulationPlugin);

    let chain = ComboChain::new(vec![
        SwingEvent::new("slash_1", 0.4, 3.0),
        SwingEvent::new("slash_2", 0.45, 3.0),
        SwingEvent::new("slash_3", 0.6, 5.0),
    ]);
    let defender_config = SwordsmanConfig {
        telegraph_attacks: true,
        telegraph_decal: Some("effect_telegraphCircle".to_string()),
        stun_resistance: 0.5,
        ..default()
    };

    let attacker = spawn_swordsman(
        &mut app.world_mut().commands(),
        Transform::from_xyz(0.0, 0.0, 0.0).looking_at(Vec3::new(4.0, 0.0, 0.0), Vec3::Y),
        1,
        SwordsmanConfig {
            attack_delay: 0.5,
            ..default()
        },
        chain.clone(),
    )?;
    let defender = spawn_swordsman(
        &mut app.world_mut().commands(),
        Transform::from_xyz(4.0, 0.0, 0.0).looking_at(Vec3::ZERO, Vec3::Y),
        2,
        defender_config,
        chain,
    )?;

    app.world_mut()
        .commands()
        .entity(attacker)
        .insert(BufferedComboInput);
    app.insert_resource(Duel {
        tick: 0,
        attacker,
        defender,
    });

    app.add_systems(FixedUpdate, drive_duel.before(tick_swordsmen))
        .add_systems(
            FixedUpdate,
            (integrate_bodies, detect_contacts)
                .chain()
                .after(release_expired_projectiles),
        );

    for tick in 0..TICK_COUNT {
        app.update();

        if tick % 120 == 0 {
            report(&mut app, tick);
        }
    }

    println!("Duel complete!");
    Ok(())
}

/// Скрипт: attacker давит комбо, defender блокирует волнами, турель стреляет
fn drive_duel(
    mut commands: Commands,
    mut duel: ResMut<Duel>,
    mut intents: EventWriter<CombatIntent>,
) {
    duel.tick += 1;
    let tick = duel.tick;

    if tick % 45 == 0 {
        intents.write(CombatIntent {
            actor: duel.attacker,
            action: CombatAction::Attack,
        });
    }

    match tick % 240 {
        100 => {
            intents.write(CombatIntent {
                actor: duel.defender,
                action: CombatAction::Block,
            });
        }
        160 => {
            intents.write(CombatIntent {
                actor: duel.defender,
                action: CombatAction::BlockEnd,
            });
        }
        200 => {
            intents.write(CombatIntent {
                actor: duel.defender,
                action: CombatAction::Attack,
            });
        }
        _ => {}
    }

    // Турель команды 2 стреляет в attacker
    if tick % 90 == 30 {
        let origin = Transform::from_xyz(10.0, 0.0, 0.0).looking_at(Vec3::ZERO, Vec3::Y);
        let turret_shot = Projectile::new(15, 20.0, 40.0)
            .with_owner(duel.defender, 2)
            .with_knockback(12.0)
            .with_effects(["burn=2"])
            .with_impact_effect("effect_spark");
        spawn_projectile(&mut commands, turret_shot, origin);
    }
}

fn integrate_bodies(
    mut bodies: Query<(&mut Transform, &mut PhysicsBody, Has<Dude>)>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (mut transform, mut body, is_dude) in bodies.iter_mut() {
        transform.translation += body.velocity * delta;
        if is_dude {
            body.velocity *= BODY_DAMPING;
        }
    }
}

fn detect_contacts(
    projectiles: Query<(Entity, &Projectile, &Transform)>,
    dudes: Query<(Entity, &Dude, &Transform)>,
    mut contacts: EventWriter<ProjectileContact>,
) {
    for (projectile_entity, projectile, projectile_transform) in projectiles.iter() {
        if projectile.is_expiring() {
            continue;
        }

        for (dude_entity, dude, dude_transform) in dudes.iter() {
            if dude.team == projectile.team {
                continue;
            }

            let distance = projectile_transform
                .translation
                .distance(dude_transform.translation);
            if distance <= HIT_RADIUS {
                contacts.write(ProjectileContact {
                    projectile: projectile_entity,
                    other: dude_entity,
                    other_is_trigger: false,
                });
            }
        }
    }
}

fn report(app: &mut App, tick: u32) {
    let world = app.world_mut();
    let mut fighters = world.query::<(Entity, &Dude, &Health, &Swordsman)>();
    for (entity, dude, health, swordsman) in fighters.iter(world) {
        log_info(&format!(
            "Tick {}: {:?} team {} | hp {}/{} (alive {}) | stamina {:.1} | swing {} | stunned {} | blocking {}",
            tick,
            entity,
            dude.team,
            health.current,
            health.max,
            health.is_alive(),
            swordsman.stamina().current,
            swordsman.swing_number(),
            swordsman.status.stunned,
            dude.blocking
        ));
    }

    let entity_count = world.entities().len();
    println!("Tick {}: {} entities", tick, entity_count);
}
