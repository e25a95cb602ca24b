//! Tests for Projectile component (lifetime, contacts, DamageEvent payload).

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use super::super::projectile::*;

    fn entities() -> (Entity, Entity, Entity) {
        let mut world = World::new();
        (
            world.spawn_empty().id(),
            world.spawn_empty().id(),
            world.spawn_empty().id(),
        )
    }

    #[test]
    fn test_instant_projectile_uses_range_as_lifetime() {
        let mut projectile = Projectile::new(10, 0.0, 3.0);
        assert_eq!(projectile.life(), UNSET_LIFETIME);

        assert_eq!(projectile.initialize(), None);
        assert!(projectile.is_initialized());
        assert_eq!(projectile.life(), 3.0);
    }

    #[test]
    fn test_moving_projectile_lifetime_from_range_and_speed() {
        let mut projectile = Projectile::new(10, 20.0, 100.0);

        assert_eq!(projectile.initialize(), Some(20.0));
        assert_eq!(projectile.life(), 5.0);

        // Повторная инициализация ничего не меняет
        assert_eq!(projectile.initialize(), None);
        assert_eq!(projectile.life(), 5.0);
    }

    #[test]
    fn test_tick_expires_once() {
        let mut projectile = Projectile::new(10, 20.0, 100.0);
        projectile.initialize();

        for _ in 0..4 {
            assert!(!projectile.tick(1.0, 20.0));
        }
        assert_eq!(projectile.distance_travelled(), 80.0);
        assert!(!projectile.is_expiring());

        assert!(projectile.tick(1.0, 20.0));
        assert!(projectile.is_expiring());
        assert!(!projectile.tick(1.0, 20.0));
        assert_eq!(projectile.distance_travelled(), 100.0);
    }

    #[test]
    fn test_environmental_hazard_never_expires() {
        let mut projectile = Projectile::new(5, 10.0, 2.0).environmental();

        assert_eq!(projectile.initialize(), None);
        assert_eq!(projectile.life(), UNSET_LIFETIME);

        for _ in 0..100 {
            assert!(!projectile.tick(1.0, 0.0));
        }
        assert!(!projectile.expire());
        assert!(!projectile.is_expiring());

        let (hazard, first, second) = entities();
        assert!(projectile.on_contact(hazard, first, false).is_some());
        assert!(projectile.on_contact(hazard, second, false).is_some());
        assert!(!projectile.is_expiring());
    }

    #[test]
    fn test_contact_builds_damage_event() {
        let (owner, bullet, victim) = entities();
        let mut projectile = Projectile::new(25, 40.0, 80.0)
            .with_owner(owner, 2)
            .with_knockback(12.0);

        let event = projectile
            .on_contact(bullet, victim, false)
            .expect("first contact lands");

        assert_eq!(event.source, owner);
        assert_eq!(event.amount, 25);
        assert_eq!(event.knockback, 12.0);
        assert_eq!(event.team, 2);
        assert_eq!(event.bullet, Some(bullet));
        assert_eq!(event.victim, Some(victim));
        assert!(event.ranged);
        assert!(projectile.is_expiring());
    }

    #[test]
    fn test_ownerless_projectile_is_its_own_source() {
        let (bullet, victim, _) = entities();
        let mut projectile = Projectile::new(10, 0.0, 1.0);

        let event = projectile
            .on_contact(bullet, victim, false)
            .expect("contact lands");
        assert_eq!(event.source, bullet);
        // Hitscan (speed 0) не считается ranged
        assert!(!event.ranged);
    }

    #[test]
    fn test_first_contact_wins() {
        let (bullet, first, second) = entities();
        let mut projectile = Projectile::new(10, 40.0, 80.0);

        assert!(projectile.on_contact(bullet, first, false).is_some());
        assert!(projectile.on_contact(bullet, second, false).is_none());
    }

    #[test]
    fn test_trigger_contacts_are_ignored() {
        let (bullet, trigger, _) = entities();
        let mut projectile = Projectile::new(10, 40.0, 80.0);

        assert!(projectile.on_contact(bullet, trigger, true).is_none());
        assert!(!projectile.is_expiring());
    }

    #[test]
    fn test_penetrating_projectile_hits_everything_in_path() {
        let (bullet, first, second) = entities();
        let mut projectile = Projectile::new(10, 40.0, 80.0).penetrating();

        let hit_first = projectile.on_contact(bullet, first, false).expect("first hit");
        let hit_second = projectile.on_contact(bullet, second, false).expect("second hit");

        assert_eq!(hit_first.victim, Some(first));
        assert_eq!(hit_second.victim, Some(second));
        assert!(!projectile.is_expiring());
    }

    #[test]
    fn test_malformed_effects_are_skipped() {
        let (bullet, victim, _) = entities();
        let mut projectile = Projectile::new(10, 40.0, 80.0).with_effects([
            "burn=5",
            "bogus",
            "slow=0.5=1",
            "freeze=cold",
        ]);

        let event = projectile
            .on_contact(bullet, victim, false)
            .expect("contact lands");

        assert_eq!(event.effects.len(), 1);
        assert_eq!(event.effects.get("burn"), Some(&5.0));
    }

    #[test]
    fn test_projectile_defaults() {
        let projectile = Projectile::default();
        assert_eq!(projectile.damage, 100);
        assert_eq!(projectile.speed, 500.0);
        assert!(!projectile.environmental);
        assert!(!projectile.penetrates);
        assert!(ParticleEmitter::default().emitting);
    }
}
