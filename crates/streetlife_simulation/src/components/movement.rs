//! Movement компоненты: контракт навигационного агента

use bevy::prelude::*;

/// Навигационный агент актора (opaque capability хоста)
///
/// Архитектура:
/// - State hooks пишут high-level intent (`move_towards`, `stop`, `resume`)
/// - Хост (или headless driver в crate::navigation) строит путь и обновляет
///   `remaining_distance`, `path_pending`, `velocity`
///
/// Disabled агент: все вызовы движения: no-op (не ошибка).
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct NavAgent {
    pub enabled: bool,
    /// Максимальная скорость (м/с)
    pub speed: f32,
    /// Дистанция, на которой цель считается достигнутой
    pub stopping_distance: f32,
    pub velocity: Vec3,
    pub is_stopped: bool,
    /// Путь ещё считается (ставится при set_destination, снимается хостом)
    pub path_pending: bool,
    pub remaining_distance: f32,
    pub destination: Option<Vec3>,
}

impl Default for NavAgent {
    fn default() -> Self {
        Self {
            enabled: true,
            speed: 3.5,
            stopping_distance: 0.5,
            velocity: Vec3::ZERO,
            is_stopped: false,
            path_pending: false,
            remaining_distance: 0.0,
            destination: None,
        }
    }
}

impl NavAgent {
    pub fn new(speed: f32) -> Self {
        Self {
            speed,
            ..default()
        }
    }

    pub fn with_stopping_distance(mut self, stopping_distance: f32) -> Self {
        self.stopping_distance = stopping_distance;
        self
    }

    /// Запросить путь к точке. Возвращает false если агент выключен.
    pub fn set_destination(&mut self, target: Vec3) -> bool {
        if !self.enabled {
            return false;
        }

        self.destination = Some(target);
        self.path_pending = true;
        true
    }

    /// set_destination + снять остановку
    pub fn move_towards(&mut self, target: Vec3) -> bool {
        if !self.set_destination(target) {
            return false;
        }

        self.is_stopped = false;
        true
    }

    /// Остановить агента. true если агент реально перешёл в stopped.
    pub fn stop(&mut self) -> bool {
        if self.enabled && !self.is_stopped {
            self.is_stopped = true;
            return true;
        }
        false
    }

    /// Arrival check: remaining ≤ stopping && путь не в процессе расчёта
    ///
    /// Идемпотентен: пока агент стоит на цели, возвращает true каждый вызов.
    pub fn has_arrived(&self) -> bool {
        self.remaining_distance <= self.stopping_distance && !self.path_pending
    }

    /// Выключить навигацию (смерть): дальше все вызовы движения no-op
    pub fn disable(&mut self) {
        self.enabled = false;
        self.velocity = Vec3::ZERO;
    }
}
