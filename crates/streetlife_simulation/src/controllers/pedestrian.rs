//! Pedestrian controller
//!
//! Старт в Idle, опционально патруль после случайной задержки.
//! Монстр рядом → паника. Любой урон смертелен. Наезд машины убивает и
//! отбрасывает тело.

use bevy::prelude::*;
use bevy_rapier3d::prelude::{ExternalImpulse, RigidBody};

use super::{kill_actor, AudioCue, DamageEvent, EffectCue, SensorPhase, SensorSignal};
use crate::ai::{DieBehavior, PatrolBehavior, StateTrigger, Trigger};
use crate::components::{Actor, Animator, ColliderTag, Health, WorldTransforms};

/// Сила толчка тела при наезде машины
pub const CAR_HIT_FORCE: f32 = 700.0;

pub const DAMAGE_CLIP: &str = "Pedestrian Damage";
pub const BLOOD_EFFECT: &str = "Blood";

#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
#[require(Actor, PatrolBehavior, DieBehavior, Animator)]
pub struct Pedestrian {
    /// Начать патруль через 0.5–5 с после спавна
    pub patrol_on_start: bool,
}

impl Pedestrian {
    pub fn patrolling() -> Self {
        Self {
            patrol_on_start: true,
        }
    }
}

/// Система: монстр вошёл в сенсор пешехода → MonsterSensed
pub fn alert_on_monsters(
    mut signals: EventReader<SensorSignal>,
    pedestrians: Query<(), With<Pedestrian>>,
    mut triggers: EventWriter<StateTrigger>,
) {
    for signal in signals.read() {
        if signal.tag != ColliderTag::Monster || signal.phase != SensorPhase::Entered {
            continue;
        }
        if !pedestrians.contains(signal.owner) {
            continue;
        }

        triggers.write(StateTrigger {
            entity: signal.owner,
            trigger: Trigger::MonsterSensed,
        });
    }
}

/// Система: любой урон убивает пешехода
pub fn apply_pedestrian_damage(
    mut damage: EventReader<DamageEvent>,
    mut pedestrians: Query<(&mut Health, Option<&mut Animator>), With<Pedestrian>>,
    mut triggers: EventWriter<StateTrigger>,
    mut audio: EventWriter<AudioCue>,
) {
    for event in damage.read() {
        let Ok((mut health, mut animator)) = pedestrians.get_mut(event.target) else {
            continue;
        };

        if kill_actor(event.target, &mut health, animator.as_deref_mut(), &mut triggers) {
            audio.write(AudioCue {
                source: event.target,
                clip: DAMAGE_CLIP.to_string(),
            });
        }
    }
}

/// Система: кузов машины вошёл в hit сенсор пешехода
///
/// Смерть + тело отдаётся физике с толчком вдоль (машина − пешеход) + кровь.
pub fn knock_down_by_cars(
    mut signals: EventReader<SensorSignal>,
    mut pedestrians: Query<(&mut Health, Option<&mut Animator>, &Transform), With<Pedestrian>>,
    transforms: WorldTransforms,
    mut commands: Commands,
    mut triggers: EventWriter<StateTrigger>,
    mut audio: EventWriter<AudioCue>,
    mut effects: EventWriter<EffectCue>,
) {
    for signal in signals.read() {
        if signal.tag != ColliderTag::CarBody || signal.phase != SensorPhase::Entered {
            continue;
        }

        let Ok((mut health, mut animator, transform)) = pedestrians.get_mut(signal.owner) else {
            continue;
        };

        if !kill_actor(signal.owner, &mut health, animator.as_deref_mut(), &mut triggers) {
            continue;
        }

        let origin = transforms.position(signal.owner).unwrap_or(transform.translation);
        effects.write(EffectCue {
            effect: BLOOD_EFFECT.to_string(),
            position: origin,
            rotation: transform.rotation,
        });
        audio.write(AudioCue {
            source: signal.owner,
            clip: DAMAGE_CLIP.to_string(),
        });

        // Кузов обычно дочерний коллайдер машины: толкаем вдоль мировых позиций
        let direction = transforms
            .position(signal.other)
            .map(|car| (car - origin).normalize_or_zero())
            .unwrap_or(Vec3::ZERO);

        commands.entity(signal.owner).insert((
            RigidBody::Dynamic,
            ExternalImpulse {
                impulse: direction * CAR_HIT_FORCE,
                torque_impulse: Vec3::ZERO,
            },
        ));

        crate::log(&format!("🚗 Pedestrian {:?} hit by car {:?}", signal.owner, signal.other));
    }
}
