//! Patrol: обход графа waypoints
//!
//! На каждой точке берём случайного потомка (свойство графа, не состояния),
//! либо следующую точку Waypath, если актору назначен маршрут.
//! Exit останавливает агента и запускает плавное торможение (Task::Brake).

use bevy::prelude::*;
use rand::Rng;

use super::{ActorQueryItem, Capabilities, StateEnv};
use crate::ai::{ActorState, Trigger};
use crate::schedule::Task;
use crate::waypoints::{PathDirection, Waypath};

/// Длительность торможения после остановки (секунды)
pub const BRAKE_DURATION: f32 = 2.0;

pub fn enter(actor: &mut ActorQueryItem<'_>, env: &mut StateEnv<'_, '_, '_>) {
    let graph = env.graph;
    let start = current_waypoint(actor).or_else(|| {
        let route = actor.patrol.as_ref()?.route?;
        graph
            .path(route)?
            .closest_point(actor.transform.translation, |point| graph.position(point))
    });

    if let Some(waypoint) = start {
        move_towards(actor, waypoint, env);
    }
}

pub fn update(actor: &mut ActorQueryItem<'_>, env: &mut StateEnv<'_, '_, '_>) -> Option<Trigger> {
    if !actor.is_alive() || !actor.has_arrived() {
        return None;
    }

    let current = current_waypoint(actor)?;
    let graph = env.graph;
    let route = actor
        .patrol
        .as_ref()
        .and_then(|patrol| patrol.route)
        .and_then(|route| graph.path(route));

    let next = match (route, actor.patrol.as_mut()) {
        (Some(path), Some(patrol)) => next_route_point(path, &mut patrol.direction, current, &mut *env.rng),
        _ => graph.next_child(current, &mut *env.rng),
    };

    // Тупик графа: остаёмся на месте, проверка повторится на следующем тике
    if let Some(next) = next {
        move_towards(actor, next, env);
    }

    None
}

/// Следующая точка маршрута; на конце незамкнутого маршрута разворот
pub fn next_route_point<R: Rng + ?Sized>(
    path: &Waypath,
    direction: &mut PathDirection,
    current: Entity,
    rng: &mut R,
) -> Option<Entity> {
    if !path.random && !path.has_next_point(*direction, current) {
        *direction = direction.reversed();
    }

    path.next_point(*direction, current, rng)
}

pub fn exit(actor: &mut ActorQueryItem<'_>, env: &mut StateEnv<'_, '_, '_>) {
    stop_moving(actor, env.now);
}

pub fn transition(trigger: &Trigger, capabilities: Capabilities) -> Option<ActorState> {
    match trigger {
        Trigger::MonsterSensed if capabilities.panic => Some(ActorState::Panic),
        Trigger::LethalDamage => Some(ActorState::Die),
        _ => None,
    }
}

pub fn current_waypoint(actor: &ActorQueryItem<'_>) -> Option<Entity> {
    actor.patrol.as_ref().and_then(|patrol| patrol.waypoint)
}

/// Отправить агента к waypoint и запомнить его как текущую цель
pub fn move_towards(actor: &mut ActorQueryItem<'_>, waypoint: Entity, env: &StateEnv<'_, '_, '_>) -> bool {
    let Some(position) = env.graph.position(waypoint) else {
        return false;
    };
    let Some(nav) = actor.nav.as_mut() else {
        return false;
    };

    if !nav.move_towards(position) {
        return false;
    }

    if let Some(patrol) = actor.patrol.as_mut() {
        patrol.waypoint = Some(waypoint);
    }
    true
}

/// Остановка (exit, пробка перед машиной) + торможение до нуля за BRAKE_DURATION
pub fn stop_moving(actor: &mut ActorQueryItem<'_>, now: f32) {
    let Some(nav) = actor.nav.as_mut() else {
        return;
    };

    if nav.stop() {
        actor.tasks.schedule(now, Task::Brake { elapsed: 0.0 });
    }
}

/// Продолжить движение к текущей точке после остановки
pub fn resume_moving(actor: &mut ActorQueryItem<'_>, env: &StateEnv<'_, '_, '_>) {
    let stopped = actor
        .nav
        .as_ref()
        .is_some_and(|nav| nav.enabled && nav.is_stopped);

    if !stopped {
        return;
    }

    match current_waypoint(actor) {
        Some(waypoint) => {
            move_towards(actor, waypoint, env);
        }
        None => {
            if let Some(nav) = actor.nav.as_mut() {
                nav.is_stopped = false;
            }
        }
    }
}
