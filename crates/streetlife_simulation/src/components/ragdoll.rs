//! Ragdoll: список rigidbody-костей актора
//!
//! До смерти кости kinematic (ведёт анимация). DieState после задержки
//! переключает их в `RigidBody::Dynamic`: дальше тело симулирует физика хоста.

use bevy::prelude::*;

#[derive(Component, Debug, Clone, Default)]
pub struct Ragdoll {
    pub bodies: Vec<Entity>,
}

impl Ragdoll {
    pub fn new(bodies: Vec<Entity>) -> Self {
        Self { bodies }
    }
}
