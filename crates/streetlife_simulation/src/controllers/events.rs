//! Controller events: сообщения вместо engine delegates
//!
//! Хост (физика / анимация / оружие) пишет SensorEvent, DamageEvent,
//! ShotImpact. Контроллеры отвечают StateTrigger + cue событиями для
//! presentation слоя (звук, эффекты, UI).

use bevy::prelude::*;

use crate::components::ColliderTag;

/// Trigger-сенсор актора (дочерний коллайдер или сам актор)
///
/// Сигналит только о коллайдерах с тегом `filter`.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct TriggerSensor {
    pub owner: Entity,
    pub filter: ColliderTag,
}

impl TriggerSensor {
    pub fn new(owner: Entity, filter: ColliderTag) -> Self {
        Self { owner, filter }
    }
}

/// Сырое событие физики хоста: коллайдер вошёл / вышел из trigger зоны
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum SensorEvent {
    TriggerEntered { sensor: Entity, other: Entity },
    TriggerExited { sensor: Entity, other: Entity },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorPhase {
    Entered,
    Exited,
}

/// Отфильтрованный по тегу сигнал для владельца сенсора
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct SensorSignal {
    pub owner: Entity,
    pub other: Entity,
    pub tag: ColliderTag,
    pub phase: SensorPhase,
}

/// Урон актору в мировой точке
#[derive(Event, Debug, Clone, Copy)]
pub struct DamageEvent {
    pub target: Entity,
    pub amount: u32,
    pub point: Vec3,
}

/// Кадр выстрела в анимации игрока (хост → симуляция)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FireRequest {
    pub player: Entity,
}

/// Выстрел прошёл проверки оружия: хост делает raycast и отвечает ShotImpact
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ShotFired {
    pub player: Entity,
    pub origin: Vec3,
    pub direction: Vec3,
}

/// Попадание выстрела игрока (raycast хоста)
#[derive(Event, Debug, Clone, Copy)]
pub struct ShotImpact {
    pub collider: Entity,
    pub point: Vec3,
    pub normal: Vec3,
    pub damage: u32,
}

/// Звук для presentation слоя
#[derive(Event, Debug, Clone, PartialEq)]
pub struct AudioCue {
    pub source: Entity,
    pub clip: String,
}

/// Визуальный эффект (кровь, декали) для presentation слоя
#[derive(Event, Debug, Clone, PartialEq)]
pub struct EffectCue {
    pub effect: String,
    pub position: Vec3,
    pub rotation: Quat,
}

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PlayerDamaged {
    pub player: Entity,
    pub health: u32,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerKilled {
    pub player: Entity,
}

/// Система: SensorEvent → SensorSignal (фильтр по тегу коллайдера)
pub fn route_sensor_events(
    mut events: EventReader<SensorEvent>,
    sensors: Query<&TriggerSensor>,
    tags: Query<&ColliderTag>,
    mut signals: EventWriter<SensorSignal>,
) {
    for event in events.read() {
        let (sensor, other, phase) = match *event {
            SensorEvent::TriggerEntered { sensor, other } => (sensor, other, SensorPhase::Entered),
            SensorEvent::TriggerExited { sensor, other } => (sensor, other, SensorPhase::Exited),
        };

        let Ok(trigger) = sensors.get(sensor) else {
            continue;
        };
        let Ok(tag) = tags.get(other) else {
            continue;
        };

        if *tag != trigger.filter {
            continue;
        }

        signals.write(SensorSignal {
            owner: trigger.owner,
            other,
            tag: *tag,
            phase,
        });
    }
}
