//! Locomotion: скорость навигационного агента → параметры анимации ходьбы
//!
//! Планарная скорость (right·v, max(0, forward·v)) ограничивается
//! `maximum_speed` и сглаживается lerp'ом по dt. Остановленный агент
//! сразу выключает Walk.

use bevy::prelude::*;

use crate::components::{Animator, NavAgent};
use crate::SimulationSet;

#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Locomotion {
    /// Максимальная скорость анимации ходьбы
    pub maximum_speed: f32,
    /// Порог |velocity| для Walk=true
    pub walk_threshold: f32,
    /// Сглаженная скорость анимации (X = вбок, Y = вперёд)
    pub velocity: Vec2,
}

impl Default for Locomotion {
    fn default() -> Self {
        Self::pedestrian()
    }
}

impl Locomotion {
    pub fn pedestrian() -> Self {
        Self {
            maximum_speed: 3.8,
            walk_threshold: 1.0,
            velocity: Vec2::ZERO,
        }
    }

    /// Зомби ходят медленнее и переходят на шаг позже
    pub fn zombie() -> Self {
        Self {
            maximum_speed: 2.49,
            walk_threshold: 1.5,
            velocity: Vec2::ZERO,
        }
    }

    /// Целевая скорость анимации в осях актора (назад не ходим)
    pub fn target_velocity(transform: &Transform, velocity: Vec3) -> Vec2 {
        let dx = transform.right().dot(velocity);
        let dy = transform.forward().dot(velocity);
        Vec2::new(dx, dy.max(0.0))
    }

    /// Один шаг сглаживания. Возвращает Walk флаг.
    pub fn advance(&mut self, target: Vec2, dt: f32) -> bool {
        if dt > f32::EPSILON {
            let target = target.clamp_length_max(self.maximum_speed);
            self.velocity = self.velocity.lerp(target, dt.min(1.0));
        }
        self.velocity.length() > self.walk_threshold
    }
}

pub struct LocomotionPlugin;

impl Plugin for LocomotionPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<Locomotion>()
            .add_systems(
                FixedUpdate,
                sync_locomotion
                    .after(crate::navigation::advance_nav_agents)
                    .in_set(SimulationSet::Motion),
            );
    }
}

/// Система: NavAgent.velocity → Walk / VelocityX / VelocityY
pub fn sync_locomotion(
    mut actors: Query<(&NavAgent, &Transform, &mut Locomotion, &mut Animator)>,
    time: Res<Time<Fixed>>,
) {
    let dt = time.delta_secs();

    for (nav, transform, mut locomotion, mut animator) in actors.iter_mut() {
        if nav.enabled && nav.is_stopped {
            animator.set_bool("Walk", false);
            continue;
        }

        let target = Locomotion::target_velocity(transform, nav.velocity);
        let walk = locomotion.advance(target, dt);

        animator.set_bool("Walk", walk);
        animator.set_float("VelocityX", locomotion.velocity.x);
        animator.set_float("VelocityY", locomotion.velocity.y);
    }
}
