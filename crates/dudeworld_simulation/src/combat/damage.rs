//! Damage payload: что несёт попадание и кто умеет его принимать
//!
//! Projectile строит `DamageEvent` при первом контакте, stamp'ит bullet/victim
//! и отправляет `ShotLanded`. Каждый `DamageReceiver` компонент на victim
//! получает копию (Swordsman → knockback, Health → урон).
//! Victim без receiver'ов: валидный no-op.

use std::collections::BTreeMap;

use bevy::prelude::*;

/// Попадание (transient, живёт один tick)
///
/// BTreeMap для effects: детерминированный порядок в snapshot/логах.
#[derive(Debug, Clone, PartialEq)]
pub struct DamageEvent {
    /// Кто нанёс (владелец снаряда, либо сам снаряд)
    pub source: Entity,
    pub amount: u32,
    /// Stamina урон (stagger)
    pub knockback: f32,
    pub stun: f32,
    pub team: u32,
    /// Доп. эффекты: "burn" → 5.0
    pub effects: BTreeMap<String, f32>,
    pub bullet: Option<Entity>,
    pub victim: Option<Entity>,
    pub ranged: bool,
}

impl DamageEvent {
    pub fn new(source: Entity, amount: u32, knockback: f32, stun: f32, team: u32) -> Self {
        Self {
            source,
            amount,
            knockback,
            stun,
            team,
            effects: BTreeMap::new(),
            bullet: None,
            victim: None,
            ranged: false,
        }
    }

    /// Merge эффектов формата "key=value"
    ///
    /// Записи не из двух токенов или с нечисловым value пропускаются (warning в лог).
    pub fn merge_effects<S: AsRef<str>>(&mut self, effects: &[S]) {
        for raw in effects {
            let raw = raw.as_ref();
            match parse_effect(raw) {
                Some((key, magnitude)) => {
                    self.effects.insert(key, magnitude);
                }
                None => {
                    crate::logger::log_warning(&format!(
                        "DamageEvent: skipping malformed effect '{}'",
                        raw
                    ));
                }
            }
        }
    }
}

/// Парсит "key=value" → (key, value)
pub fn parse_effect(raw: &str) -> Option<(String, f32)> {
    let bits: Vec<&str> = raw.split('=').collect();
    let [key, value] = bits.as_slice() else {
        return None;
    };

    let magnitude = value.trim().parse::<f32>().ok()?;
    Some((key.trim().to_string(), magnitude))
}

/// Результат обработки попадания receiver'ом
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotOutcome {
    /// Своя команда, ничего не изменилось
    Ignored,
    /// Попадание учтено
    Absorbed,
    /// Попадание опустошило stamina → stun
    Staggered,
}

/// Компонент, который умеет принимать попадания
///
/// `own_team`: команда тела victim (`Dude::team`), если тело есть.
pub trait DamageReceiver {
    fn on_shot(&mut self, event: &DamageEvent, own_team: Option<u32>) -> ShotOutcome;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_effect_valid() {
        assert_eq!(parse_effect("burn=5.0"), Some(("burn".to_string(), 5.0)));
        assert_eq!(parse_effect("slow=0.25"), Some(("slow".to_string(), 0.25)));
    }

    #[test]
    fn test_parse_effect_malformed() {
        assert_eq!(parse_effect("malformed"), None);
        assert_eq!(parse_effect("a=b=c"), None);
        assert_eq!(parse_effect("burn=hot"), None);
    }

    #[test]
    fn test_merge_effects_skips_malformed() {
        let mut event = DamageEvent::new(Entity::PLACEHOLDER, 10, 0.0, 0.0, 1);
        event.merge_effects(&["burn=5.0", "malformed", "a=b=c", "poison=2"]);

        assert_eq!(event.effects.len(), 2);
        assert_eq!(event.effects.get("burn"), Some(&5.0));
        assert_eq!(event.effects.get("poison"), Some(&2.0));
    }

    #[test]
    fn test_merge_effects_overwrites_same_key() {
        let mut event = DamageEvent::new(Entity::PLACEHOLDER, 10, 0.0, 0.0, 1);
        event.merge_effects(&["burn=5.0"]);
        event.merge_effects(&["burn=7.5"]);

        assert_eq!(event.effects.get("burn"), Some(&7.5));
    }
}
