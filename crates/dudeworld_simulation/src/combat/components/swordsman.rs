//! Swordsman: combo / block / stun state machine одного персонажа.
//!
//! Компонент чистый: методы меняют только собственное состояние и складывают
//! побочные эффекты (impulse, анимации, decals, broadcast) в outbox.
//! `flush_combat_effects` раз в tick применяет outbox к телу и пишет events.
//!
//! # Состояния (неформально)
//!
//! Idle → Attacking(swing N) → AttackRecovery → Idle,
//! плюс ортогональные Blocking и Stunned, которые блокируют атаку.

use bevy::prelude::*;

use crate::combat::config::{
    SwordsmanConfig, ATTACK_ANIMATION_RATIO, DEFAULT_STUN, FOLLOW_UP_EPSILON, MAX_SWINGS,
    MIN_STUN, TELEGRAPH_COMMIT_LEAD,
};
use crate::combat::events::{AnimationCommand, Decal, DecalState, PlayMode, SignalKind};
use crate::combat::{
    ComboChain, CombatSetupError, DamageEvent, DamageReceiver, DudeState, ShotOutcome, Stamina,
    SwingEvent, SwingPhase, SwingSequence,
};

/// Имя idle клипа после удара
pub const IDLE_ANIMATION: &str = "idle";

/// Побочный эффект, ожидающий применения (см. `flush_combat_effects`)
#[derive(Debug, Clone, PartialEq)]
pub enum CombatEffect {
    /// Погасить дрейф тела (dodge прерван)
    HaltBody,
    /// Шаг вперёд: forward × step × fixed_dt
    StepImpulse { step: f32 },
    Animation(AnimationCommand),
    Decal { decal: Decal, state: DecalState },
    Signal(SignalKind),
    SwingStarted { swing_number: u32, animation: String },
}

#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Swordsman {
    pub config: SwordsmanConfig,

    /// Боевые флаги (driver может выставлять dodging/running)
    pub status: DudeState,

    swing_number: u32,
    follow_up_queued: bool,
    follow_up_timer: f32,
    attack_cooldown: f32,
    stamina: Stamina,

    /// Input lockout на время удара
    disabled: bool,

    /// Локальные часы персонажа (секунды с spawn)
    clock: f32,
    block_start_time: f32,
    telegraph_visible: bool,

    swing: Option<SwingSequence>,
    stun_timer: Option<f32>,

    #[reflect(ignore)]
    outbox: Vec<CombatEffect>,
}

impl Default for Swordsman {
    fn default() -> Self {
        Self::from_config(SwordsmanConfig::default())
    }
}

impl Swordsman {
    /// Собрать swordsman с проверкой конфигурации
    pub fn new(config: SwordsmanConfig, chain: &ComboChain) -> Result<Self, CombatSetupError> {
        config.validate()?;
        chain.validate()?;
        Ok(Self::from_config(config))
    }

    fn from_config(config: SwordsmanConfig) -> Self {
        let stamina = Stamina::new(config.max_stamina);
        Self {
            config,
            status: DudeState::default(),
            swing_number: 0,
            follow_up_queued: false,
            follow_up_timer: 0.0,
            attack_cooldown: 0.0,
            stamina,
            disabled: false,
            clock: 0.0,
            block_start_time: 0.0,
            telegraph_visible: false,
            swing: None,
            stun_timer: None,
            outbox: Vec::new(),
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn swing_number(&self) -> u32 {
        self.swing_number
    }

    pub fn follow_up_queued(&self) -> bool {
        self.follow_up_queued
    }

    pub fn follow_up_timer(&self) -> f32 {
        self.follow_up_timer
    }

    pub fn attack_cooldown(&self) -> f32 {
        self.attack_cooldown
    }

    pub fn stamina(&self) -> &Stamina {
        &self.stamina
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn block_start_time(&self) -> f32 {
        self.block_start_time
    }

    pub fn active_swing(&self) -> Option<&SwingSequence> {
        self.swing.as_ref()
    }

    pub fn stun_remaining(&self) -> Option<f32> {
        self.stun_timer
    }

    pub fn pending_effects(&self) -> &[CombatEffect] {
        &self.outbox
    }

    pub fn drain_effects(&mut self) -> Vec<CombatEffect> {
        std::mem::take(&mut self.outbox)
    }

    // ========================================================================
    // Per-tick update
    // ========================================================================

    /// Fixed tick: таймеры, stamina, stun, активный удар
    pub fn tick(&mut self, dt: f32) {
        self.clock += dt;

        if self.follow_up_timer > 0.0 {
            self.follow_up_timer = (self.follow_up_timer - dt).max(0.0);
        }
        if self.attack_cooldown > 0.0 {
            self.attack_cooldown = (self.attack_cooldown - dt).max(0.0);
        }

        self.stamina.regenerate(dt);
        self.tick_stun(dt);
        self.advance_swing(dt);
    }

    fn tick_stun(&mut self, dt: f32) {
        let Some(remaining) = self.stun_timer.map(|timer| timer - dt) else {
            return;
        };

        if remaining > 0.0 {
            self.stun_timer = Some(remaining);
            return;
        }

        self.stun_timer = None;
        self.status.reset();
        self.outbox.push(CombatEffect::Signal(SignalKind::Recovered));
    }

    // ========================================================================
    // Driver commands
    // ========================================================================

    pub fn on_block(&mut self) {
        if self.status.stunned {
            return;
        }

        if self.status.dodging {
            self.outbox.push(CombatEffect::HaltBody);
        }

        self.status.blocking = true;
        self.block_start_time = self.clock;
        self.outbox.push(CombatEffect::Decal {
            decal: Decal::Block,
            state: DecalState::Shown,
        });
    }

    /// Нельзя опустить блок посреди dodge/run/атаки
    pub fn on_block_end(&mut self) {
        if self.status.dodging || self.status.running || self.status.attacking {
            return;
        }

        let was_blocking = self.status.blocking;
        self.status.blocking = false;
        self.block_start_time = 0.0;

        if was_blocking {
            self.outbox.push(CombatEffect::Decal {
                decal: Decal::Block,
                state: DecalState::Hidden,
            });
        }
    }

    /// Попытка атаки. Возвращает true только если удар запущен.
    ///
    /// Во время активного удара (disabled) input не прерывает его, а ставит
    /// follow-up в очередь (если в цепочке ещё есть место).
    pub fn on_attack(&mut self, chain: &ComboChain) -> bool {
        if self.status.blocking || self.status.stunned || self.attack_cooldown > 0.0 {
            return false;
        }

        if self.status.dodging {
            self.outbox.push(CombatEffect::HaltBody);
        }

        if self.disabled
            && !self.status.stunned
            && (self.status.attacking || self.status.attacking_recovery || self.status.dodging)
        {
            self.follow_up_queued = self.swing_number + 1 < MAX_SWINGS;
            return false;
        }

        if self.swing_number <= MAX_SWINGS {
            self.follow_up_queued = true;
        }

        if self.follow_up_timer <= 0.0 {
            self.swing_number = 0;
            self.follow_up_timer = self.config.follow_up_window + FOLLOW_UP_EPSILON;
        }

        if self.follow_up_timer <= 0.0 || self.swing_number >= MAX_SWINGS {
            return false;
        }

        let Some(swing) = chain.swing_for(self.swing_number + 1).cloned() else {
            return false;
        };

        self.swing_number += 1;
        let rate = swing.rate;
        self.launch_swing(swing, self.swing_number);

        if self.swing_number < MAX_SWINGS {
            self.follow_up_timer = rate + self.config.follow_up_window;
        } else {
            self.swing_number = 0;
            self.follow_up_timer = 0.0;
            self.follow_up_queued = false;
            self.attack_cooldown = self.config.attack_delay;
        }

        true
    }

    pub fn on_cancel(&mut self) {
        self.follow_up_queued = false;
    }

    /// Stun. Возвращает true если stun начался.
    ///
    /// stun_resistance укорачивает stun, но не ниже MIN_STUN.
    pub fn on_stun(&mut self, duration: f32) -> bool {
        if self.status.stunned || self.config.cannot_be_stunned {
            return false;
        }

        let mut duration = duration - self.config.stun_resistance;
        if duration <= 0.0 {
            duration = MIN_STUN;
        }

        self.status.stunned = true;
        self.stun_timer = Some(duration);
        self.outbox
            .push(CombatEffect::Signal(SignalKind::Stunned { duration }));
        true
    }

    pub fn on_disable(&mut self) {
        self.disabled = true;
    }

    pub fn on_enable(&mut self) {
        self.disabled = false;
    }

    // ========================================================================
    // Swing sequence
    // ========================================================================

    fn broadcast(&mut self, kind: SignalKind) {
        self.outbox.push(CombatEffect::Signal(kind));

        // Swordsman сам тоже слушатель своего broadcast
        match kind {
            SignalKind::Disable => self.on_disable(),
            SignalKind::Enable => self.on_enable(),
            _ => {}
        }
    }

    fn launch_swing(&mut self, swing: SwingEvent, index: u32) {
        self.status.dodging = false;
        self.status.attacking = true;
        self.broadcast(SignalKind::Disable);

        self.outbox.push(CombatEffect::SwingStarted {
            swing_number: index,
            animation: swing.animation.clone(),
        });

        if self.config.telegraph_attacks && index <= 1 {
            self.outbox
                .push(CombatEffect::Animation(AnimationCommand::Play {
                    name: swing.telegraph_animation(),
                    speed: None,
                    mode: PlayMode::SameLayer,
                }));
            self.outbox.push(CombatEffect::Decal {
                decal: Decal::Telegraph,
                state: DecalState::Shown,
            });
            self.telegraph_visible = true;

            let windup = self.config.telegraph_rate - TELEGRAPH_COMMIT_LEAD;
            self.swing = Some(SwingSequence::new(
                swing,
                index,
                SwingPhase::TelegraphWindup,
                windup,
            ));
            return;
        }

        self.strike(&swing, index);
        self.swing = Some(SwingSequence::new(swing, index, SwingPhase::AwaitFrame, 0.0));
    }

    /// Момент удара: unbalanced, шаг вперёд, оружие активно
    fn strike(&mut self, swing: &SwingEvent, index: u32) {
        self.status.unbalanced = true;

        if self.telegraph_visible && index == 1 {
            self.outbox.push(CombatEffect::Decal {
                decal: Decal::Telegraph,
                state: DecalState::Hidden,
            });
            self.telegraph_visible = false;
        }

        self.outbox
            .push(CombatEffect::StepImpulse { step: swing.step });
        self.broadcast(SignalKind::WeaponFired);
    }

    fn play_swing_animation(&mut self, swing: &SwingEvent) {
        self.outbox
            .push(CombatEffect::Animation(AnimationCommand::Play {
                name: swing.animation.clone(),
                speed: Some(ATTACK_ANIMATION_RATIO / swing.rate),
                mode: PlayMode::StopAll,
            }));
    }

    fn advance_swing(&mut self, dt: f32) {
        let Some(mut sequence) = self.swing.take() else {
            return;
        };

        let cancel_window = self.config.attack_cancel_window;

        // Кадр синхронизации: клип стартует на следующем tick после strike
        if sequence.phase == SwingPhase::AwaitFrame {
            self.play_swing_animation(&sequence.swing);
            sequence.phase = SwingPhase::Swinging;
            sequence.remaining = sequence.swing.rate * (1.0 - cancel_window);
            self.swing = Some(sequence);
            return;
        }

        sequence.remaining -= dt;

        while sequence.remaining <= 0.0 {
            match sequence.phase {
                SwingPhase::TelegraphWindup => {
                    self.outbox.push(CombatEffect::Decal {
                        decal: Decal::Telegraph,
                        state: DecalState::Committed,
                    });
                    self.status.unbalanced = true;
                    sequence.enter(SwingPhase::TelegraphCommit, TELEGRAPH_COMMIT_LEAD);
                }
                SwingPhase::TelegraphCommit => {
                    self.strike(&sequence.swing, sequence.index);
                    sequence.phase = SwingPhase::AwaitFrame;
                    sequence.remaining = 0.0;
                    break;
                }
                SwingPhase::AwaitFrame => break,
                SwingPhase::Swinging => {
                    // Финальный удар цепочки без recovery окна
                    if sequence.index < MAX_SWINGS {
                        self.status.attacking = false;
                        self.status.unbalanced = false;
                        self.status.attacking_recovery = true;
                    }
                    sequence.enter(
                        SwingPhase::CancelWindow,
                        sequence.swing.rate * cancel_window,
                    );
                }
                SwingPhase::CancelWindow => {
                    self.finish_swing();
                    return;
                }
            }
        }

        self.swing = Some(sequence);
    }

    fn finish_swing(&mut self) {
        self.broadcast(SignalKind::Enable);

        self.status.attacking = false;
        self.status.unbalanced = false;
        self.status.attacking_recovery = false;

        self.outbox
            .push(CombatEffect::Animation(AnimationCommand::Stop));
        self.outbox
            .push(CombatEffect::Animation(AnimationCommand::Play {
                name: IDLE_ANIMATION.to_string(),
                speed: None,
                mode: PlayMode::SameLayer,
            }));

        self.broadcast(SignalKind::FollowUp);
    }
}

impl DamageReceiver for Swordsman {
    /// Knockback съедает stamina; опустошение → stagger (DEFAULT_STUN).
    /// Во время stun stamina продолжает уменьшаться, stun не продлевается.
    fn on_shot(&mut self, event: &DamageEvent, own_team: Option<u32>) -> ShotOutcome {
        if own_team == Some(event.team) {
            return ShotOutcome::Ignored;
        }

        let depleted = self.stamina.drain(event.knockback);
        if depleted && self.on_stun(DEFAULT_STUN) {
            return ShotOutcome::Staggered;
        }

        ShotOutcome::Absorbed
    }
}
