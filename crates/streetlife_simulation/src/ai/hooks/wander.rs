//! Wander: бесцельное блуждание вокруг текущей позиции

use bevy::prelude::*;
use rand::Rng;

use super::{ActorQueryItem, Capabilities, StateEnv};
use crate::ai::{ActorState, Trigger, WanderBehavior};

pub fn enter(actor: &mut ActorQueryItem<'_>, _env: &mut StateEnv<'_, '_, '_>) {
    // Цель = собственная позиция: на первом же update агент "прибыл"
    let here = actor.transform.translation;
    if let Some(nav) = actor.nav.as_mut() {
        nav.move_towards(here);
    }
}

pub fn update(actor: &mut ActorQueryItem<'_>, env: &mut StateEnv<'_, '_, '_>) -> Option<Trigger> {
    if !actor.is_alive() || !actor.has_arrived() {
        return None;
    }

    let radius = actor.wander.map_or(WanderBehavior::default().radius, |w| w.radius);
    let target = random_destination(actor.transform, radius, &mut *env.rng);

    // Точка вне walkable area → пробуем снова на следующем тике
    if let Some(destination) = env.nav_area.sample_position(target, radius) {
        if let Some(nav) = actor.nav.as_mut() {
            nav.move_towards(destination);
        }
    }

    None
}

pub fn exit(actor: &mut ActorQueryItem<'_>, _env: &mut StateEnv<'_, '_, '_>) {
    if let Some(nav) = actor.nav.as_mut() {
        nav.stop();
    }
}

pub fn transition(trigger: &Trigger, _capabilities: Capabilities) -> Option<ActorState> {
    match trigger {
        Trigger::LethalDamage => Some(ActorState::Die),
        _ => None,
    }
}

/// Точка впереди актора со случайным смещением в пределах радиуса
pub fn random_destination<R: Rng + ?Sized>(transform: &Transform, radius: f32, rng: &mut R) -> Vec3 {
    let ahead = transform.translation + transform.forward().as_vec3() * radius;
    ahead + random_in_unit_sphere(rng) * radius
}

/// Равномерная точка внутри единичной сферы (rejection sampling)
pub fn random_in_unit_sphere<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    loop {
        let candidate = Vec3::new(
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
        );
        if candidate.length_squared() <= 1.0 {
            return candidate;
        }
    }
}
