//! Награды на уровне: аптечки и канистры с водой
//!
//! Сенсор коробки (фильтр PlayerGrab или Player) ловит игрока. Награда
//! тратится только если что-то пополнила; подобранная коробка исчезает
//! через CONSUME_DELAY (Task::ConsumeReward).

use bevy::prelude::*;

use super::player::{refill_health, Player, PlayerStatus};
use super::{AudioCue, SensorPhase, SensorSignal};
use crate::components::{ColliderTag, Health};
use crate::schedule::{ScheduledTasks, Task, TaskDue};

pub const COLLECT_CLIP: &str = "Collect Reward";

/// Задержка перед удалением подобранной коробки (секунды)
pub const CONSUME_DELAY: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum RewardKind {
    Health,
    Water,
}

#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
#[require(ScheduledTasks, Transform)]
pub struct RewardBox {
    pub kind: RewardKind,
    /// Уже подобрана, ждёт удаления
    pub collected: bool,
}

impl RewardBox {
    pub fn new(kind: RewardKind) -> Self {
        Self { kind, collected: false }
    }
}

/// Игрок за коллайдером: сам коллайдер или его родитель (grab-зона)
fn player_of(collider: Entity, players: &Query<(), With<Player>>, parents: &Query<&ChildOf>) -> Option<Entity> {
    if players.contains(collider) {
        return Some(collider);
    }

    parents
        .get(collider)
        .ok()
        .map(ChildOf::parent)
        .filter(|parent| players.contains(*parent))
}

/// Система: игрок вошёл в сенсор награды
pub fn collect_rewards(
    mut signals: EventReader<SensorSignal>,
    mut boxes: Query<(&mut RewardBox, &mut ScheduledTasks)>,
    player_tags: Query<(), With<Player>>,
    parents: Query<&ChildOf>,
    mut players: Query<(&mut Health, &mut PlayerStatus), With<Player>>,
    mut audio: EventWriter<AudioCue>,
    time: Res<Time<Fixed>>,
) {
    let now = time.elapsed_secs();

    for signal in signals.read() {
        if signal.phase != SensorPhase::Entered {
            continue;
        }
        if !matches!(signal.tag, ColliderTag::Player | ColliderTag::PlayerGrab) {
            continue;
        }

        let Ok((mut reward, mut tasks)) = boxes.get_mut(signal.owner) else {
            continue;
        };
        if reward.collected {
            continue;
        }
        let Some(player) = player_of(signal.other, &player_tags, &parents) else {
            continue;
        };
        let Ok((mut health, mut status)) = players.get_mut(player) else {
            continue;
        };

        let refilled = match reward.kind {
            RewardKind::Health => refill_health(&mut health),
            RewardKind::Water => health.is_alive() && status.refill_water(),
        };
        if !refilled {
            continue;
        }

        reward.collected = true;
        tasks.schedule_after(now, CONSUME_DELAY, Task::ConsumeReward);
        audio.write(AudioCue {
            source: signal.other,
            clip: COLLECT_CLIP.to_string(),
        });

        crate::log(&format!("🎁 {:?} collected {:?} reward {:?}", player, reward.kind, signal.owner));
    }
}

/// Система: удаление подобранных коробок
pub fn consume_rewards(mut due: EventReader<TaskDue>, rewards: Query<(), With<RewardBox>>, mut commands: Commands) {
    for TaskDue { entity, task } in due.read() {
        if matches!(task, Task::ConsumeReward) && rewards.contains(*entity) {
            commands.entity(*entity).despawn();
        }
    }
}
