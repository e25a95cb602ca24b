//! Tests for swordsman systems (intents, buffered follow-ups, outbox flush).

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use bevy::prelude::*;

    use crate::combat::*;
    use crate::components::{Dude, PhysicsBody};

    const DT: f64 = 0.0625;

    fn test_app() -> App {
        let mut app = App::new();
        app.add_event::<CombatIntent>()
            .add_event::<CombatSignal>()
            .add_event::<AnimationRequest>()
            .add_event::<DecalChanged>()
            .add_event::<SwingStarted>()
            .insert_resource(Time::<Fixed>::from_seconds(DT))
            .add_systems(
                Update,
                (
                    tick_swordsmen,
                    process_combat_intents,
                    consume_queued_follow_ups,
                    flush_combat_effects,
                )
                    .chain(),
            );
        app
    }

    fn step(app: &mut App) {
        app.world_mut()
            .resource_mut::<Time<Fixed>>()
            .advance_by(Duration::from_secs_f64(DT));
        app.update();
    }

    fn chain() -> ComboChain {
        ComboChain::new(vec![
            SwingEvent::new("slash_1", 0.5, 2.0),
            SwingEvent::new("slash_2", 0.5, 3.0),
            SwingEvent::new("slash_3", 0.5, 4.0),
        ])
    }

    fn spawn_fighter(app: &mut App) -> Entity {
        spawn_fighter_with(app, SwordsmanConfig::default(), chain())
    }

    fn spawn_fighter_with(app: &mut App, config: SwordsmanConfig, chain: ComboChain) -> Entity {
        let swordsman = Swordsman::new(config, &chain).expect("valid swordsman");
        app.world_mut()
            .spawn((Dude::new(1), Transform::default(), swordsman, chain))
            .id()
    }

    fn intent(app: &mut App, actor: Entity, action: CombatAction) {
        app.world_mut().send_event(CombatIntent { actor, action });
    }

    fn drain<E: Event>(app: &mut App) -> Vec<E> {
        app.world_mut().resource_mut::<Events<E>>().drain().collect()
    }

    #[test]
    fn test_attack_intent_steps_body_and_broadcasts() {
        let mut app = test_app();
        let fighter = spawn_fighter(&mut app);

        intent(&mut app, fighter, CombatAction::Attack);
        step(&mut app);

        let swings = drain::<SwingStarted>(&mut app);
        assert_eq!(swings.len(), 1);
        assert_eq!(swings[0].actor, fighter);
        assert_eq!(swings[0].swing_number, 1);
        assert_eq!(swings[0].animation, "slash_1");

        let kinds: Vec<SignalKind> = drain::<CombatSignal>(&mut app)
            .into_iter()
            .map(|signal| signal.kind)
            .collect();
        assert_eq!(kinds, vec![SignalKind::Disable, SignalKind::WeaponFired]);

        // forward × step × fixed_dt (Transform по умолчанию смотрит в -Z)
        let body = app.world().get::<PhysicsBody>(fighter).expect("body");
        let expected = Vec3::NEG_Z * 2.0 * DT as f32;
        assert!(body.velocity.abs_diff_eq(expected, 1e-6), "velocity = {:?}", body.velocity);

        // Клип удара приходит следующим tick
        assert!(drain::<AnimationRequest>(&mut app).is_empty());
        step(&mut app);
        let animations = drain::<AnimationRequest>(&mut app);
        assert_eq!(
            animations,
            vec![AnimationRequest {
                actor: fighter,
                command: AnimationCommand::Play {
                    name: "slash_1".to_string(),
                    speed: Some(2.0),
                    mode: PlayMode::StopAll,
                },
            }]
        );
    }

    #[test]
    fn test_block_intents_mirror_dude_flag() {
        let mut app = test_app();
        let fighter = spawn_fighter(&mut app);

        intent(&mut app, fighter, CombatAction::Block);
        step(&mut app);

        assert!(app.world().get::<Dude>(fighter).expect("dude").blocking);
        assert_eq!(
            drain::<DecalChanged>(&mut app),
            vec![DecalChanged {
                actor: fighter,
                decal: Decal::Block,
                state: DecalState::Shown,
            }]
        );

        // Блок режет атаку
        intent(&mut app, fighter, CombatAction::Attack);
        step(&mut app);
        assert!(drain::<SwingStarted>(&mut app).is_empty());

        intent(&mut app, fighter, CombatAction::BlockEnd);
        step(&mut app);
        assert!(!app.world().get::<Dude>(fighter).expect("dude").blocking);
    }

    #[test]
    fn test_stun_intent_and_recovery_signals() {
        let mut app = test_app();
        let fighter = spawn_fighter(&mut app);

        intent(&mut app, fighter, CombatAction::Stun { duration: 0.25 });
        step(&mut app);

        let signals = drain::<CombatSignal>(&mut app);
        assert_eq!(
            signals,
            vec![CombatSignal {
                actor: fighter,
                kind: SignalKind::Stunned { duration: 0.25 },
            }]
        );

        for _ in 0..4 {
            step(&mut app);
        }
        let signals = drain::<CombatSignal>(&mut app);
        assert!(signals.contains(&CombatSignal {
            actor: fighter,
            kind: SignalKind::Recovered,
        }));
        let swordsman = app.world().get::<Swordsman>(fighter).expect("swordsman");
        assert!(!swordsman.status.stunned);
    }

    #[test]
    fn test_intent_for_unknown_actor_is_ignored() {
        let mut app = test_app();
        let stranger = app.world_mut().spawn(Transform::default()).id();

        intent(&mut app, stranger, CombatAction::Attack);
        step(&mut app);

        assert!(drain::<SwingStarted>(&mut app).is_empty());
    }

    #[test]
    fn test_buffered_input_chains_whole_combo() {
        let mut app = test_app();
        let fighter = spawn_fighter(&mut app);
        app.world_mut().entity_mut(fighter).insert(BufferedComboInput);

        intent(&mut app, fighter, CombatAction::Attack);

        let mut swings = Vec::new();
        for _ in 0..60 {
            step(&mut app);
            swings.extend(drain::<SwingStarted>(&mut app).into_iter().map(|s| s.swing_number));
        }

        // Финальный удар сбрасывает очередь: комбо не зацикливается
        assert_eq!(swings, vec![1, 2, 3]);
    }

    /// Один Attack intent, 400 тиков: номера всех запущенных ударов
    fn swings_from_single_intent(config: SwordsmanConfig) -> (Vec<u32>, bool) {
        let mut app = test_app();
        let chain = ComboChain::new(vec![SwingEvent::new("slash_1", 0.5, 2.0)]);
        let fighter = spawn_fighter_with(&mut app, config, chain);
        app.world_mut().entity_mut(fighter).insert(BufferedComboInput);

        intent(&mut app, fighter, CombatAction::Attack);

        let mut swings = Vec::new();
        for _ in 0..400 {
            step(&mut app);
            swings.extend(drain::<SwingStarted>(&mut app).into_iter().map(|s| s.swing_number));
        }

        let swordsman = app.world().get::<Swordsman>(fighter).expect("swordsman");
        (swings, swordsman.follow_up_queued())
    }

    #[test]
    fn test_buffered_input_stops_when_telegraph_outlasts_window() {
        let config = SwordsmanConfig {
            telegraph_attacks: true,
            telegraph_decal: Some("effect_telegraphCircle".into()),
            ..default()
        };

        let (swings, queued) = swings_from_single_intent(config);

        assert_eq!(swings, vec![1]);
        assert!(!queued);
    }

    #[test]
    fn test_buffered_input_with_zero_window_swings_once() {
        let config = SwordsmanConfig {
            follow_up_window: 0.0,
            ..default()
        };

        let (swings, queued) = swings_from_single_intent(config);

        assert_eq!(swings, vec![1]);
        assert!(!queued);
    }

    #[test]
    fn test_unbuffered_fighter_waits_for_driver() {
        let mut app = test_app();
        let fighter = spawn_fighter(&mut app);

        intent(&mut app, fighter, CombatAction::Attack);

        let mut swings = Vec::new();
        for _ in 0..30 {
            step(&mut app);
            swings.extend(drain::<SwingStarted>(&mut app).into_iter().map(|s| s.swing_number));
        }

        assert_eq!(swings, vec![1]);
        let swordsman = app.world().get::<Swordsman>(fighter).expect("swordsman");
        assert!(swordsman.follow_up_queued());
        assert!(!swordsman.is_disabled());
    }

    #[test]
    fn test_cancel_intent_drops_buffered_follow_up() {
        let mut app = test_app();
        let fighter = spawn_fighter(&mut app);
        app.world_mut().entity_mut(fighter).insert(BufferedComboInput);

        intent(&mut app, fighter, CombatAction::Attack);
        step(&mut app);
        assert_eq!(drain::<SwingStarted>(&mut app).len(), 1);
        intent(&mut app, fighter, CombatAction::Cancel);

        let mut swings = Vec::new();
        for _ in 0..30 {
            step(&mut app);
            swings.extend(drain::<SwingStarted>(&mut app).into_iter().map(|s| s.swing_number));
        }

        assert!(swings.is_empty());
    }
}
