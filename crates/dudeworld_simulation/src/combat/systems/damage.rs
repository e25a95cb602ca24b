//! Доставка попаданий в DamageReceiver компоненты.

use bevy::ecs::component::Mutable;
use bevy::prelude::*;

use crate::combat::events::ShotLanded;
use crate::combat::{DamageReceiver, ShotOutcome};
use crate::components::Dude;

/// System: ShotLanded → `R::on_shot` на target
///
/// Регистрируется по одному экземпляру на каждый тип receiver'а
/// (Swordsman, Health). Target без `R`: тихий no-op.
pub fn deliver_shots<R>(
    mut shots: EventReader<ShotLanded>,
    mut receivers: Query<(&mut R, Option<&Dude>)>,
) where
    R: DamageReceiver + Component<Mutability = Mutable>,
{
    for shot in shots.read() {
        let Ok((mut receiver, dude)) = receivers.get_mut(shot.target) else {
            continue;
        };

        let outcome = receiver.on_shot(&shot.event, dude.map(|d| d.team));

        if outcome == ShotOutcome::Staggered {
            crate::logger::log_info(&format!(
                "💥 {:?} staggered by {:?} (knockback: {})",
                shot.target, shot.event.source, shot.event.knockback
            ));
        }
    }
}
