//! Базовые компоненты акторов: Actor, Health, ColliderTag

use bevy::prelude::*;
use crate::ai::ActorState;
use crate::schedule::ScheduledTasks;

/// Актор (пешеход, машина, монстр, игрок): всё, у кого есть state machine
///
/// Автоматически добавляет Health, ActorState (Idle), ScheduledTasks, Transform
/// через Required Components.
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
#[require(Health, ActorState, ScheduledTasks, Transform)]
pub struct Actor;

/// Здоровье актора (alive flag = current > 0)
///
/// Инвариант: 0 ≤ current ≤ max
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100)
    }
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }

    pub fn heal(&mut self, amount: u32) {
        self.current = self.current.saturating_add(amount).min(self.max);
    }

    /// Мгновенная смерть (пешеходы умирают от любого урона)
    pub fn kill(&mut self) {
        self.current = 0;
    }
}

/// Тег коллайдера: аналог engine tags/layers для фильтрации триггеров
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
#[reflect(Component)]
pub enum ColliderTag {
    /// Капсула игрока
    Player,
    /// Зона "захвата" вокруг игрока (награды, триггеры пешеходов)
    PlayerGrab,
    Pedestrian,
    Monster,
    /// Кузов машины (сбивает пешеходов)
    CarBody,
    /// Купол машины: препятствие для traffic сенсоров
    CarDome,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_damage() {
        let mut health = Health::new(100);
        health.take_damage(30);
        assert_eq!(health.current, 70);
        assert!(health.is_alive());

        health.take_damage(100); // Saturating sub
        assert_eq!(health.current, 0);
        assert!(!health.is_alive());
    }

    #[test]
    fn test_health_heal_clamped() {
        let mut health = Health::new(100);
        health.take_damage(50);
        health.heal(30);
        assert_eq!(health.current, 80);

        health.heal(u32::MAX);
        assert_eq!(health.current, 100);
    }

    #[test]
    fn test_health_kill() {
        let mut health = Health::new(3);
        health.kill();
        assert!(!health.is_alive());
    }
}
