//! Elevator: платформа между bottom и top, запускается игроком
//!
//! Игрок вошёл в trigger остановленного лифта → едем вниз (если наверху)
//! или вверх (если внизу). На крайней высоте лифт встаёт и ждёт.

use bevy::prelude::*;

use crate::components::ColliderTag;
use crate::controllers::{AudioCue, SensorPhase, SensorSignal};

pub const ACTIVATE_CLIP: &str = "Activate Elevator";

#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Elevator {
    pub top: f32,
    pub bottom: f32,
    /// Скорость (м/с)
    pub speed: f32,
    pub is_stopped: bool,
    /// Лифт внизу (следующая поездка вверх)
    pub is_down: bool,
    pub direction: Vec3,
}

impl Default for Elevator {
    fn default() -> Self {
        Self {
            top: 30.0,
            bottom: 24.4,
            speed: 2.0,
            is_stopped: true,
            is_down: false,
            direction: Vec3::ZERO,
        }
    }
}

impl Elevator {
    pub fn move_up(&mut self) {
        self.direction = Vec3::Y * self.speed;
        self.is_stopped = false;
    }

    pub fn move_down(&mut self) {
        self.direction = Vec3::NEG_Y * self.speed;
        self.is_stopped = false;
    }

    /// Запуск игроком. false если лифт уже едет.
    pub fn activate(&mut self) -> bool {
        if !self.is_stopped {
            return false;
        }

        if self.is_down {
            self.move_up();
        } else {
            self.move_down();
        }
        true
    }

    /// Следующая позиция платформы за dt; останавливает лифт на краях
    pub fn step(&mut self, origin: Vec3, dt: f32) -> Vec3 {
        if self.is_stopped {
            self.direction = Vec3::ZERO;
        }

        let target = origin + self.direction * dt;

        if self.is_down && target.y >= self.top {
            self.direction = Vec3::ZERO;
            self.is_stopped = true;
            self.is_down = false;
        } else if !self.is_down && target.y <= self.bottom {
            self.direction = Vec3::ZERO;
            self.is_stopped = true;
            self.is_down = true;
        }

        target
    }
}

/// Система: игрок в trigger лифта
pub fn activate_elevators(
    mut signals: EventReader<SensorSignal>,
    mut elevators: Query<&mut Elevator>,
    mut audio: EventWriter<AudioCue>,
) {
    for signal in signals.read() {
        if signal.tag != ColliderTag::Player || signal.phase != SensorPhase::Entered {
            continue;
        }
        let Ok(mut elevator) = elevators.get_mut(signal.owner) else {
            continue;
        };

        if elevator.activate() {
            audio.write(AudioCue {
                source: signal.owner,
                clip: ACTIVATE_CLIP.to_string(),
            });
            crate::log(&format!("🛗 Elevator {:?} activated (down: {})", signal.owner, elevator.is_down));
        }
    }
}

/// Система: движение платформ
pub fn move_elevators(mut elevators: Query<(&mut Elevator, &mut Transform)>, time: Res<Time<Fixed>>) {
    let dt = time.delta_secs();

    for (mut elevator, mut transform) in elevators.iter_mut() {
        if elevator.is_stopped {
            continue;
        }
        transform.translation = elevator.step(transform.translation, dt);
    }
}
