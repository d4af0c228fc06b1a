//! Vehicle controller
//!
//! Машины только патрулируют: урон и kill игнорируются (Health не трогаем).
//! Торможение / продолжение движения приходят от traffic сенсора.

use bevy::prelude::*;

use crate::ai::hooks::{patrol, ActorQueryItem, StateEnv};
use crate::ai::{ActorState, PatrolBehavior};
use crate::components::Actor;

#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
#[require(Actor, PatrolBehavior)]
pub struct Vehicle {
    pub patrol_on_start: bool,
}

impl Vehicle {
    pub fn patrolling() -> Self {
        Self {
            patrol_on_start: true,
        }
    }
}

/// Остановить машину (только во время патруля)
pub fn brake(actor: &mut ActorQueryItem<'_>, now: f32) -> bool {
    if *actor.state != ActorState::Patrol {
        return false;
    }

    patrol::stop_moving(actor, now);
    true
}

/// Продолжить движение (только во время патруля)
pub fn resume(actor: &mut ActorQueryItem<'_>, env: &StateEnv<'_, '_, '_>) -> bool {
    if *actor.state != ActorState::Patrol {
        return false;
    }

    patrol::resume_moving(actor, env);
    true
}
