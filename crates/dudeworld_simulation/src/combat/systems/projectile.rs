//! Projectile systems: initialize → tick → contacts → release.
//!
//! Снаряд сам себя не удаляет: `expire()` ставит флаг, а
//! `release_expired_projectiles` (owning система) отцепляет визуальные
//! children и деспавнит entity по id.

use bevy::prelude::*;

use crate::combat::events::{ProjectileContact, ProjectileExpired, ShotLanded, SpawnEffectRequest};
use crate::combat::{ParticleEmitter, Projectile, TrailEffect};
use crate::components::PhysicsBody;

/// System: первый tick снаряда (lifetime + стартовый impulse вдоль forward)
pub fn initialize_projectiles(
    mut projectiles: Query<(Entity, &mut Projectile, &mut PhysicsBody, &Transform), Added<Projectile>>,
) {
    for (entity, mut projectile, mut body, transform) in projectiles.iter_mut() {
        if let Some(speed) = projectile.initialize() {
            body.apply_impulse(transform.forward() * speed);
        }

        crate::logger::log(&format!(
            "Projectile {:?} initialized (speed: {}, life: {:.2}s, environmental: {})",
            entity,
            projectile.speed,
            projectile.life(),
            projectile.environmental
        ));
    }
}

/// System: lifetime countdown
pub fn tick_projectiles(
    mut projectiles: Query<(Entity, &mut Projectile, &PhysicsBody)>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (entity, mut projectile, body) in projectiles.iter_mut() {
        if projectile.tick(delta, body.velocity.length()) {
            crate::logger::log(&format!(
                "Projectile {:?} lifetime over ({:.1}m travelled)",
                entity,
                projectile.distance_travelled()
            ));
        }
    }
}

/// System: контакты от physics layer → ShotLanded
///
/// Несколько контактов одного non-penetrating снаряда за tick:
/// срабатывает только первый (дальше снаряд уже expiring).
pub fn process_projectile_contacts(
    mut contacts: EventReader<ProjectileContact>,
    mut projectiles: Query<&mut Projectile>,
    mut shots: EventWriter<ShotLanded>,
) {
    for contact in contacts.read() {
        let Ok(mut projectile) = projectiles.get_mut(contact.projectile) else {
            continue;
        };

        let Some(event) =
            projectile.on_contact(contact.projectile, contact.other, contact.other_is_trigger)
        else {
            continue;
        };

        crate::logger::log(&format!(
            "🎯 Projectile {:?} hit {:?} (dmg: {}, knockback: {}, ranged: {})",
            contact.projectile, contact.other, event.amount, event.knockback, event.ranged
        ));

        shots.write(ShotLanded {
            target: contact.other,
            event,
        });
    }
}

/// Trail/particles (и любые потомки снаряда с Transform)
type VisualQuery<'w, 's> = Query<
    'w,
    's,
    (&'static mut Transform, Has<TrailEffect>, Option<&'static mut ParticleEmitter>),
    Without<Projectile>,
>;

/// System: удаление истёкших снарядов
///
/// 1. impact VFX в позиции снаряда
/// 2. trail/particles во всём поддереве отцепляются (world transform сохраняется)
/// 3. despawn снаряда (вместе с остальными потомками)
pub fn release_expired_projectiles(
    mut commands: Commands,
    projectiles: Query<(Entity, &Projectile, &Transform)>,
    hierarchy: Query<&Children>,
    parents: Query<&ChildOf>,
    mut visuals: VisualQuery,
    mut effects: EventWriter<SpawnEffectRequest>,
    mut expired: EventWriter<ProjectileExpired>,
) {
    for (entity, projectile, transform) in projectiles.iter() {
        if !projectile.is_expiring() {
            continue;
        }

        if let Some(prefab) = &projectile.impact_effect {
            effects.write(SpawnEffectRequest {
                prefab: prefab.clone(),
                transform: *transform,
            });
        }

        // World transforms считаются до мутаций (visuals бывают вложены друг в друга)
        let mut released = Vec::new();
        for descendant in hierarchy.iter_descendants(entity) {
            let Ok((_, is_trail, emitter)) = visuals.get(descendant) else {
                continue;
            };
            if !is_trail && emitter.is_none() {
                continue;
            }

            // Local → world: поднимаемся по предкам до снаряда
            let mut world_transform = local_transform(&visuals, descendant);
            for ancestor in parents.iter_ancestors(descendant) {
                if ancestor == entity {
                    world_transform = transform.mul_transform(world_transform);
                    break;
                }
                world_transform =
                    local_transform(&visuals, ancestor).mul_transform(world_transform);
            }
            released.push((descendant, world_transform));
        }

        for (descendant, world_transform) in released {
            let Ok((mut visual_transform, _, emitter)) = visuals.get_mut(descendant) else {
                continue;
            };
            if let Some(mut emitter) = emitter {
                emitter.emitting = false;
            }

            *visual_transform = world_transform;
            commands.entity(descendant).remove::<ChildOf>();
        }

        expired.write(ProjectileExpired {
            projectile: entity,
            position: transform.translation,
        });
        commands.entity(entity).despawn();
    }
}

fn local_transform(visuals: &VisualQuery, entity: Entity) -> Transform {
    visuals
        .get(entity)
        .map(|(transform, ..)| *transform)
        .unwrap_or(Transform::IDENTITY)
}
