//! Tuning для swordsman (данные дизайнера) + engine-wide константы

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::combat::CombatSetupError;

/// Максимум ударов в одной комбо-цепочке
pub const MAX_SWINGS: u32 = 3;

/// Stun от опустошённой stamina (knockback stagger), секунды
pub const DEFAULT_STUN: f32 = 2.0;

/// Нижняя граница stun после stun_resistance (resistance не обнуляет stun)
pub const MIN_STUN: f32 = 0.5;

/// Запас к follow-up окну при старте новой цепочки
pub const FOLLOW_UP_EPSILON: f32 = 0.001;

/// Последняя часть telegraph: decal перекрашивается, атака "committed"
pub const TELEGRAPH_COMMIT_LEAD: f32 = 0.2;

/// Регенерация stamina (units/sec)
pub const STAMINA_RECOVERY_RATE: f32 = 1.0;

/// Длина анимации удара относительно swing.rate
pub const ATTACK_ANIMATION_RATIO: f32 = 1.0;

/// Fixed timestep симуляции (Hz)
pub const FIXED_TIMESTEP_HZ: f64 = 60.0;

/// Настройки swordsman
///
/// Default значения совпадают с боевым прототипом DudeWorld.
/// Serde: конфиг можно грузить из данных (JSON/RON на стороне хоста).
#[derive(Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[serde(default)]
pub struct SwordsmanConfig {
    /// Максимум stamina (knockback budget)
    pub max_stamina: f32,

    /// Окно после удара, в котором следующий attack продолжает комбо (сек)
    pub follow_up_window: f32,

    /// Первый удар цепочки идёт с wind-up телеграфом
    pub telegraph_attacks: bool,

    /// Длительность телеграфа (сек), включая TELEGRAPH_COMMIT_LEAD
    pub telegraph_rate: f32,

    /// Prefab decal'а телеграфа (обязателен при telegraph_attacks)
    pub telegraph_decal: Option<String>,

    /// Иммунитет к stun
    pub cannot_be_stunned: bool,

    /// Вычитается из длительности каждого stun (сек)
    pub stun_resistance: f32,

    /// Cooldown после финального удара цепочки (сек)
    pub attack_delay: f32,

    /// Доля swing.rate в конце удара, где удар уже можно отменить
    pub attack_cancel_window: f32,
}

impl Default for SwordsmanConfig {
    fn default() -> Self {
        Self {
            max_stamina: 30.0,
            follow_up_window: 0.2,
            telegraph_attacks: false,
            telegraph_rate: 0.6,
            telegraph_decal: None,
            cannot_be_stunned: false,
            stun_resistance: 0.0,
            attack_delay: 0.0,
            attack_cancel_window: 0.25,
        }
    }
}

impl SwordsmanConfig {
    /// Проверка tuning значений (вызывается при сборке Swordsman)
    pub fn validate(&self) -> Result<(), CombatSetupError> {
        if !(self.max_stamina > 0.0) {
            return Err(CombatSetupError::InvalidTuning {
                field: "max_stamina",
                value: self.max_stamina,
                reason: "must be positive",
            });
        }

        if !(self.follow_up_window >= 0.0) {
            return Err(CombatSetupError::InvalidTuning {
                field: "follow_up_window",
                value: self.follow_up_window,
                reason: "must not be negative",
            });
        }

        if !(self.stun_resistance >= 0.0) {
            return Err(CombatSetupError::InvalidTuning {
                field: "stun_resistance",
                value: self.stun_resistance,
                reason: "must not be negative",
            });
        }

        if !(self.attack_delay >= 0.0) {
            return Err(CombatSetupError::InvalidTuning {
                field: "attack_delay",
                value: self.attack_delay,
                reason: "must not be negative",
            });
        }

        if !(0.0..=1.0).contains(&self.attack_cancel_window) {
            return Err(CombatSetupError::InvalidTuning {
                field: "attack_cancel_window",
                value: self.attack_cancel_window,
                reason: "must be a fraction in [0, 1]",
            });
        }

        if self.telegraph_attacks {
            if self.telegraph_decal.is_none() {
                return Err(CombatSetupError::MissingTelegraphDecal);
            }

            if !(self.telegraph_rate >= TELEGRAPH_COMMIT_LEAD) {
                return Err(CombatSetupError::InvalidTuning {
                    field: "telegraph_rate",
                    value: self.telegraph_rate,
                    reason: "must cover the commit lead (0.2s)",
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SwordsmanConfig::default();
        assert_eq!(config.max_stamina, 30.0);
        assert_eq!(config.follow_up_window, 0.2);
        assert_eq!(config.telegraph_rate, 0.6);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_telegraph_requires_decal() {
        let config = SwordsmanConfig {
            telegraph_attacks: true,
            ..default()
        };
        assert_eq!(config.validate(), Err(CombatSetupError::MissingTelegraphDecal));

        let config = SwordsmanConfig {
            telegraph_attacks: true,
            telegraph_decal: Some("effect_telegraphCircle".into()),
            ..default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_tuning() {
        let config = SwordsmanConfig {
            max_stamina: 0.0,
            ..default()
        };
        assert!(matches!(
            config.validate(),
            Err(CombatSetupError::InvalidTuning { field: "max_stamina", .. })
        ));

        let config = SwordsmanConfig {
            attack_cancel_window: 1.5,
            ..default()
        };
        assert!(matches!(
            config.validate(),
            Err(CombatSetupError::InvalidTuning { field: "attack_cancel_window", .. })
        ));
    }

    #[test]
    fn test_config_from_json_uses_defaults_for_missing_fields() {
        let json = r#"{ "max_stamina": 45.0, "stun_resistance": 0.5 }"#;
        let config: SwordsmanConfig = serde_json::from_str(json).expect("valid config json");

        assert_eq!(config.max_stamina, 45.0);
        assert_eq!(config.stun_resistance, 0.5);
        assert_eq!(config.follow_up_window, 0.2);
        assert!(!config.telegraph_attacks);
    }
}
