//! Swordsman systems: tick, driver intents, buffered follow-ups, outbox flush.

use bevy::prelude::*;

use crate::combat::events::{
    AnimationRequest, CombatAction, CombatIntent, CombatSignal, DecalChanged, SignalKind,
    SwingStarted,
};
use crate::combat::{ComboChain, CombatEffect, Swordsman};
use crate::components::{Dude, PhysicsBody};

/// Маркер: персонаж сам продолжает комбо по FollowUp, если follow-up в очереди
///
/// Без маркера очередь только хранится, продолжение решает driver.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct BufferedComboInput;

/// System: fixed tick всех swordsman (таймеры, stamina, stun, фазы удара)
pub fn tick_swordsmen(mut query: Query<&mut Swordsman>, time: Res<Time<Fixed>>) {
    let delta = time.delta_secs();

    for mut swordsman in query.iter_mut() {
        swordsman.tick(delta);
    }
}

/// System: команды driver'а (input/AI) → методы Swordsman
pub fn process_combat_intents(
    mut intents: EventReader<CombatIntent>,
    mut swordsmen: Query<(&mut Swordsman, Option<&ComboChain>)>,
) {
    for intent in intents.read() {
        let Ok((mut swordsman, chain)) = swordsmen.get_mut(intent.actor) else {
            crate::logger::log_warning(&format!(
                "CombatIntent {:?}: actor {:?} has no Swordsman",
                intent.action, intent.actor
            ));
            continue;
        };

        match intent.action {
            CombatAction::Attack => {
                let Some(chain) = chain else {
                    crate::logger::log_warning(&format!(
                        "CombatIntent Attack: actor {:?} has no ComboChain",
                        intent.actor
                    ));
                    continue;
                };
                swordsman.on_attack(chain);
            }
            CombatAction::Block => swordsman.on_block(),
            CombatAction::BlockEnd => swordsman.on_block_end(),
            CombatAction::Cancel => swordsman.on_cancel(),
            CombatAction::Stun { duration } => {
                swordsman.on_stun(duration);
            }
        }
    }
}

/// System: FollowUp + follow-up в очереди + открытое окно → следующий удар комбо
pub fn consume_queued_follow_ups(
    mut signals: EventReader<CombatSignal>,
    mut swordsmen: Query<(&mut Swordsman, &ComboChain), With<BufferedComboInput>>,
) {
    for signal in signals.read() {
        if signal.kind != SignalKind::FollowUp {
            continue;
        }

        let Ok((mut swordsman, chain)) = swordsmen.get_mut(signal.actor) else {
            continue;
        };

        if !swordsman.follow_up_queued() {
            continue;
        }

        // Окно закрылось пока шёл удар: очередь устарела, новая цепочка только по input
        if swordsman.follow_up_timer() <= 0.0 {
            swordsman.on_cancel();
            crate::logger::log(&format!(
                "Buffered follow-up dropped, window closed (actor: {:?})",
                signal.actor
            ));
            continue;
        }

        if swordsman.on_attack(chain) {
            crate::logger::log(&format!(
                "⚔️ Buffered follow-up consumed (actor: {:?}, swing: {})",
                signal.actor,
                swordsman.swing_number()
            ));
        }
    }
}

/// System: применяет outbox каждого swordsman
///
/// - HaltBody / StepImpulse → PhysicsBody (forward из Transform)
/// - Animation / Decal / Signal / SwingStarted → events для внешних слоёв
/// - зеркалит `status.blocking` в `Dude::blocking`
pub fn flush_combat_effects(
    mut swordsmen: Query<(
        Entity,
        &mut Swordsman,
        Option<&mut PhysicsBody>,
        Option<&mut Dude>,
        Option<&Transform>,
    )>,
    time: Res<Time<Fixed>>,
    mut animations: EventWriter<AnimationRequest>,
    mut decals: EventWriter<DecalChanged>,
    mut signals: EventWriter<CombatSignal>,
    mut swings: EventWriter<SwingStarted>,
) {
    let fixed_dt = time.timestep().as_secs_f32();

    for (actor, mut swordsman, mut body, dude, transform) in swordsmen.iter_mut() {
        if let Some(mut dude) = dude {
            if dude.blocking != swordsman.status.blocking {
                dude.blocking = swordsman.status.blocking;
            }
        }

        if swordsman.pending_effects().is_empty() {
            continue;
        }

        for effect in swordsman.drain_effects() {
            match effect {
                CombatEffect::HaltBody => {
                    if let Some(body) = body.as_mut() {
                        body.halt();
                    }
                }
                CombatEffect::StepImpulse { step } => {
                    let (Some(body), Some(transform)) = (body.as_mut(), transform) else {
                        continue;
                    };
                    body.apply_impulse(transform.forward() * step * fixed_dt);
                }
                CombatEffect::Animation(command) => {
                    animations.write(AnimationRequest { actor, command });
                }
                CombatEffect::Decal { decal, state } => {
                    decals.write(DecalChanged {
                        actor,
                        decal,
                        state,
                    });
                }
                CombatEffect::Signal(kind) => {
                    match kind {
                        SignalKind::Stunned { duration } => {
                            crate::logger::log_info(&format!(
                                "💫 Actor {:?} stunned for {:.2}s (stamina: {:.1})",
                                actor,
                                duration,
                                swordsman.stamina().current
                            ));
                        }
                        SignalKind::Recovered => {
                            crate::logger::log_info(&format!(
                                "✅ Actor {:?} recovered from stun",
                                actor
                            ));
                        }
                        _ => {}
                    }
                    signals.write(CombatSignal { actor, kind });
                }
                CombatEffect::SwingStarted {
                    swing_number,
                    animation,
                } => {
                    crate::logger::log(&format!(
                        "⚔️ Swing {} started (actor: {:?}, animation: {})",
                        swing_number, actor, animation
                    ));
                    swings.write(SwingStarted {
                        actor,
                        swing_number,
                        animation,
                    });
                }
            }
        }
    }
}
