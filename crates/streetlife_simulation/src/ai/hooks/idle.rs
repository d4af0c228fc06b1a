//! Idle: ничего не делаем, ждём триггер

use super::{ActorQueryItem, Capabilities, StateEnv};
use crate::ai::{ActorState, Trigger};

pub fn enter(_actor: &mut ActorQueryItem<'_>, _env: &mut StateEnv<'_, '_, '_>) {}

pub fn update(_actor: &mut ActorQueryItem<'_>, _env: &mut StateEnv<'_, '_, '_>) -> Option<Trigger> {
    None
}

pub fn exit(_actor: &mut ActorQueryItem<'_>, _env: &mut StateEnv<'_, '_, '_>) {}

pub fn transition(trigger: &Trigger, capabilities: Capabilities) -> Option<ActorState> {
    match trigger {
        Trigger::PatrolDelayElapsed if capabilities.patrol => Some(ActorState::Patrol),
        Trigger::StartWandering if capabilities.wander => Some(ActorState::Wander),
        Trigger::MonsterSensed if capabilities.panic => Some(ActorState::Panic),
        Trigger::LethalDamage => Some(ActorState::Die),
        _ => None,
    }
}
