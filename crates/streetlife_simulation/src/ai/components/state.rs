//! Actor state machine components (active state tag + behaviour parameters)

use bevy::prelude::*;

use crate::waypoints::PathDirection;

/// Активное поведение актора (ровно одно в любой момент)
///
/// Переходы только через `StateTrigger` → `apply_state_triggers`:
/// каждый переход = один exit hook старого + один enter hook нового.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
#[reflect(Component)]
pub enum ActorState {
    /// Начальное состояние после спавна
    #[default]
    Idle,
    /// Обход графа waypoints
    Patrol,
    /// Блуждание по случайным точкам вокруг (монстры)
    Wander,
    /// Бегство к случайному убежищу
    Panic,
    /// Терминальное: навигация выключена, ragdoll после задержки
    Die,
}

impl ActorState {
    pub fn is_terminal(self) -> bool {
        matches!(self, ActorState::Die)
    }
}

/// Патруль: текущая целевая точка графа
///
/// Переживает смену состояний: после паники сюда пишется достигнутое убежище.
/// С `route` актор идёт по Waypath (разворот на концах незамкнутого
/// маршрута), без него берёт случайных потомков графа.
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct PatrolBehavior {
    pub waypoint: Option<Entity>,
    /// Entity с `Waypath`
    pub route: Option<Entity>,
    pub direction: PathDirection,
}

impl PatrolBehavior {
    pub fn starting_at(waypoint: Entity) -> Self {
        Self {
            waypoint: Some(waypoint),
            ..default()
        }
    }

    /// Патруль по маршруту; старт с ближайшей точки маршрута
    pub fn following(route: Entity) -> Self {
        Self {
            route: Some(route),
            ..default()
        }
    }
}

/// Блуждание: радиус выбора следующей точки
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct WanderBehavior {
    pub radius: f32,
}

impl Default for WanderBehavior {
    fn default() -> Self {
        Self { radius: 15.0 }
    }
}

/// Паника: список убежищ + скорость бега
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct PanicBehavior {
    /// Entity с `WaypointList` (убежища)
    pub waypoints: Option<Entity>,
    pub panic_speed: f32,
    /// Скорость агента до входа в панику (восстанавливается на exit)
    pub previous_speed: f32,
    /// Убежище, к которому бежим сейчас
    pub waypoint: Option<Entity>,
}

impl Default for PanicBehavior {
    fn default() -> Self {
        Self {
            waypoints: None,
            panic_speed: 3.8,
            previous_speed: 0.0,
            waypoint: None,
        }
    }
}

impl PanicBehavior {
    pub fn fleeing_to(waypoints: Entity) -> Self {
        Self {
            waypoints: Some(waypoints),
            ..default()
        }
    }
}

/// Смерть: задержка перед ragdoll handoff (секунды)
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct DieBehavior {
    pub ragdoll_delay: f32,
}

impl Default for DieBehavior {
    fn default() -> Self {
        Self { ragdoll_delay: 3.5 }
    }
}
