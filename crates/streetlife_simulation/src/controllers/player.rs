//! Player controller: урон, смерть, попадания выстрелов
//!
//! Ввод и raycast живут у хоста; сюда приходят DamageEvent и ShotImpact.
//! Запасы (патроны, вода) в PlayerStatus, проверки оружия в `weapon`.

use bevy::prelude::*;

use super::{kill_actor, AudioCue, DamageEvent, EffectCue, PlayerDamaged, PlayerKilled, ShotImpact};
use crate::ai::{DieBehavior, StateTrigger};
use super::weapon::Weapon;
use crate::components::{Actor, Animator, ColliderTag, Health};

pub const DAMAGE_CLIP: &str = "Player Damage";
pub const DIE_CLIP: &str = "Player Die";
pub const BLOOD_EFFECT: &str = "Blood";

#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
#[require(Actor, DieBehavior, Animator, PlayerStatus, Weapon)]
pub struct Player;

/// Запасы игрока (здоровье живёт в Health)
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct PlayerStatus {
    pub munition: u32,
    pub max_munition: u32,
    pub water: u32,
    pub max_water: u32,
}

impl Default for PlayerStatus {
    fn default() -> Self {
        Self {
            munition: 30,
            max_munition: 30,
            water: 100,
            max_water: 100,
        }
    }
}

impl PlayerStatus {
    pub fn has_munition(&self) -> bool {
        self.munition > 0
    }

    /// false если патронов уже нет
    pub fn decrease_munition(&mut self) -> bool {
        if self.munition == 0 {
            return false;
        }
        self.munition -= 1;
        true
    }

    /// Полный бак воды. false если он и так полон (награда не тратится).
    pub fn refill_water(&mut self) -> bool {
        if self.water >= self.max_water {
            return false;
        }
        self.water = self.max_water;
        true
    }
}

/// Полное здоровье. false если оно и так полное или игрок мёртв.
pub fn refill_health(health: &mut Health) -> bool {
    if !health.is_alive() || health.current >= health.max {
        return false;
    }
    health.heal(health.max);
    true
}

/// Система: урон игроку
///
/// Мёртвый игрок урон игнорирует. Точка удара передаётся аниматору в
/// локальных координатах (DamageX / DamageZ).
pub fn apply_player_damage(
    mut damage: EventReader<DamageEvent>,
    mut players: Query<(&mut Health, Option<&mut Animator>, &Transform), With<Player>>,
    mut triggers: EventWriter<StateTrigger>,
    mut audio: EventWriter<AudioCue>,
    mut effects: EventWriter<EffectCue>,
    mut damaged: EventWriter<PlayerDamaged>,
    mut killed: EventWriter<PlayerKilled>,
) {
    for event in damage.read() {
        let Ok((mut health, mut animator, transform)) = players.get_mut(event.target) else {
            continue;
        };
        if !health.is_alive() {
            continue;
        }

        effects.write(EffectCue {
            effect: BLOOD_EFFECT.to_string(),
            position: event.point,
            rotation: transform.rotation,
        });

        if event.amount >= health.current {
            kill_actor(event.target, &mut health, animator.as_deref_mut(), &mut triggers);
            audio.write(AudioCue {
                source: event.target,
                clip: DIE_CLIP.to_string(),
            });
            killed.write(PlayerKilled { player: event.target });
            crate::log_info(&format!("☠️ Player {:?} killed", event.target));
            continue;
        }

        health.take_damage(event.amount);
        audio.write(AudioCue {
            source: event.target,
            clip: DAMAGE_CLIP.to_string(),
        });

        if let Some(animator) = animator.as_mut() {
            let local = transform.compute_affine().inverse().transform_point3(event.point);
            animator.set_float("DamageX", local.x);
            animator.set_float("DamageZ", local.z);
            animator.set_trigger("Damage");
        }

        damaged.write(PlayerDamaged {
            player: event.target,
            health: health.current,
        });
    }
}

/// Система: попадание выстрела по монстру/пешеходу → DamageEvent
pub fn damage_shot_actors(
    mut impacts: EventReader<ShotImpact>,
    tags: Query<&ColliderTag>,
    mut damage: EventWriter<DamageEvent>,
) {
    for impact in impacts.read() {
        let Ok(tag) = tags.get(impact.collider) else {
            continue;
        };

        if matches!(tag, ColliderTag::Monster | ColliderTag::Pedestrian) {
            damage.write(DamageEvent {
                target: impact.collider,
                amount: impact.damage,
                point: impact.point,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_munition_runs_out() {
        let mut status = PlayerStatus {
            munition: 2,
            ..default()
        };

        assert!(status.decrease_munition());
        assert!(status.decrease_munition());
        assert!(!status.has_munition());
        assert!(!status.decrease_munition());
        assert_eq!(status.munition, 0);
    }

    #[test]
    fn test_refills_only_when_missing() {
        let mut status = PlayerStatus::default();
        assert!(!status.refill_water());

        status.water = 10;
        assert!(status.refill_water());
        assert_eq!(status.water, status.max_water);

        let mut health = Health::new(100);
        assert!(!refill_health(&mut health));

        health.take_damage(60);
        assert!(refill_health(&mut health));
        assert_eq!(health.current, 100);

        health.kill();
        assert!(!refill_health(&mut health), "dead players don't pick up rewards");
    }
}
