//! Panic: бегство к убежищу из WaypointList
//!
//! Убежище выбирается "за спиной": угол между forward актора и
//! направлением на точку > 90°. Не больше FLEE_SAMPLES попыток, потом
//! берём последний кандидат как есть.

use bevy::prelude::*;
use rand::Rng;

use super::{ActorQueryItem, Capabilities, StateEnv};
use crate::ai::{ActorState, Trigger};
use crate::waypoints::WaypointList;

pub const FLEE_SAMPLES: usize = 20;

/// Точка позади актора (угол к forward строго больше 90°)
pub fn is_behind(origin: Vec3, forward: Vec3, target: Vec3) -> bool {
    let to_target = (target - origin).normalize_or_zero();
    let forward = forward.normalize_or_zero();
    let cos = forward.dot(to_target).clamp(-1.0, 1.0);
    cos.acos().to_degrees() > 90.0
}

/// Выбрать убежище. None только для пустого списка.
pub fn choose_flee_waypoint<R: Rng + ?Sized>(
    list: &WaypointList,
    position_of: impl Fn(Entity) -> Option<Vec3>,
    origin: Vec3,
    forward: Vec3,
    rng: &mut R,
) -> Option<Entity> {
    let mut candidate = None;

    for _ in 0..FLEE_SAMPLES {
        candidate = list.next_random(rng);
        let Some(waypoint) = candidate else {
            return None;
        };

        if position_of(waypoint).is_some_and(|target| is_behind(origin, forward, target)) {
            return Some(waypoint);
        }
    }

    candidate
}

pub fn enter(actor: &mut ActorQueryItem<'_>, env: &mut StateEnv<'_, '_, '_>) {
    let origin = actor.transform.translation;
    let forward = actor.transform.forward().as_vec3();

    let Some(panic) = actor.panic.as_mut() else {
        return;
    };
    let Some(nav) = actor.nav.as_mut() else {
        return;
    };
    if !nav.enabled {
        return;
    }

    panic.previous_speed = nav.speed;

    let graph = env.graph;
    let waypoint = panic
        .waypoints
        .and_then(|list| graph.list(list))
        .and_then(|list| choose_flee_waypoint(list, |e| graph.position(e), origin, forward, &mut *env.rng));
    panic.waypoint = waypoint;

    if let Some(target) = waypoint.and_then(|w| graph.position(w)) {
        nav.move_towards(target);
    }

    nav.speed = panic.panic_speed;
    nav.velocity = nav.velocity.normalize_or_zero() * panic.panic_speed;

    crate::log(&format!("😱 {:?} panics, fleeing to {:?}", actor.entity, waypoint));
}

pub fn update(actor: &mut ActorQueryItem<'_>, _env: &mut StateEnv<'_, '_, '_>) -> Option<Trigger> {
    if !actor.is_alive() || !actor.has_arrived() {
        return None;
    }

    let waypoint = actor.panic.as_ref()?.waypoint?;
    Some(Trigger::SafepointReached { waypoint })
}

pub fn exit(actor: &mut ActorQueryItem<'_>, _env: &mut StateEnv<'_, '_, '_>) {
    let Some(panic) = actor.panic.as_ref() else {
        return;
    };
    let previous_speed = panic.previous_speed;

    if let Some(nav) = actor.nav.as_mut() {
        if nav.enabled {
            nav.speed = previous_speed;
            nav.stop();
        }
    }
}

pub fn transition(trigger: &Trigger, capabilities: Capabilities) -> Option<ActorState> {
    match trigger {
        Trigger::SafepointReached { .. } if capabilities.patrol => Some(ActorState::Patrol),
        Trigger::SafepointReached { .. } => Some(ActorState::Idle),
        Trigger::LethalDamage => Some(ActorState::Die),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::cell::Cell;

    #[test]
    fn test_is_behind() {
        let forward = Vec3::NEG_Z;
        assert!(is_behind(Vec3::ZERO, forward, Vec3::new(0.0, 0.0, 5.0)));
        assert!(!is_behind(Vec3::ZERO, forward, Vec3::new(0.0, 0.0, -5.0)));
        // Ровно 90°: не "позади"
        assert!(!is_behind(Vec3::ZERO, forward, Vec3::new(5.0, 0.0, 0.0)));
    }

    #[test]
    fn test_prefers_waypoint_behind() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let ahead = Entity::from_raw(1);
        let behind = Entity::from_raw(2);
        let list = WaypointList::from_points(vec![ahead, behind]);
        let position_of = |e: Entity| {
            if e == ahead {
                Some(Vec3::new(0.0, 0.0, -10.0))
            } else {
                Some(Vec3::new(0.0, 0.0, 10.0))
            }
        };

        for _ in 0..50 {
            let chosen = choose_flee_waypoint(&list, position_of, Vec3::ZERO, Vec3::NEG_Z, &mut rng);
            assert_eq!(chosen, Some(behind));
        }
    }

    #[test]
    fn test_search_is_bounded_and_falls_back() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let points: Vec<Entity> = (0..4).map(|i| Entity::from_raw(10 + i)).collect();
        let list = WaypointList::from_points(points.clone());
        let lookups = Cell::new(0usize);

        // Все убежища впереди: ни один кандидат не подходит
        let chosen = choose_flee_waypoint(
            &list,
            |_| {
                lookups.set(lookups.get() + 1);
                Some(Vec3::new(0.0, 0.0, -10.0))
            },
            Vec3::ZERO,
            Vec3::NEG_Z,
            &mut rng,
        );

        assert_eq!(lookups.get(), FLEE_SAMPLES);
        assert!(chosen.is_some_and(|c| points.contains(&c)));
    }

    #[test]
    fn test_empty_list_yields_none() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let list = WaypointList::from_points(Vec::new());
        assert_eq!(
            choose_flee_waypoint(&list, |_| Some(Vec3::ZERO), Vec3::ZERO, Vec3::NEG_Z, &mut rng),
            None
        );
    }
}
