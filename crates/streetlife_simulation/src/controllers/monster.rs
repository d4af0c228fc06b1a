//! Monster controller: блуждание со старта, урон по Health

use bevy::prelude::*;

use super::{kill_actor, AudioCue, DamageEvent};
use crate::ai::{DieBehavior, StateTrigger, Trigger, WanderBehavior};
use crate::components::{Actor, Animator, Health};

pub const DAMAGE_CLIP: &str = "Monster Damage";

#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
#[require(Actor, WanderBehavior, DieBehavior, Animator)]
pub struct Monster {
    pub wander_on_start: bool,
}

impl Default for Monster {
    fn default() -> Self {
        Self { wander_on_start: true }
    }
}

/// Система: свежие монстры сразу начинают бродить
pub fn start_wandering(
    monsters: Query<(Entity, &Monster), Added<Monster>>,
    mut triggers: EventWriter<StateTrigger>,
) {
    for (entity, monster) in monsters.iter() {
        if monster.wander_on_start {
            triggers.write(StateTrigger {
                entity,
                trigger: Trigger::StartWandering,
            });
        }
    }
}

/// Система: урон монстру; смерть на нуле
pub fn apply_monster_damage(
    mut damage: EventReader<DamageEvent>,
    mut monsters: Query<(&mut Health, Option<&mut Animator>), With<Monster>>,
    mut triggers: EventWriter<StateTrigger>,
    mut audio: EventWriter<AudioCue>,
) {
    for event in damage.read() {
        let Ok((mut health, mut animator)) = monsters.get_mut(event.target) else {
            continue;
        };
        if !health.is_alive() {
            continue;
        }

        audio.write(AudioCue {
            source: event.target,
            clip: DAMAGE_CLIP.to_string(),
        });

        // Смертельный урон: kill_actor сам обнулит Health
        if event.amount >= health.current {
            kill_actor(event.target, &mut health, animator.as_deref_mut(), &mut triggers);
        } else {
            health.take_damage(event.amount);
            if let Some(animator) = animator.as_mut() {
                animator.set_trigger("Damage");
            }
        }
    }
}
