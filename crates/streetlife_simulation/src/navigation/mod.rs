//! Headless навигация: простая замена navmesh агента хоста
//!
//! Путь = прямая к destination, считается за один тик. Это не pathfinder:
//! задача модуля в том, чтобы headless прогон и тесты видели прибытие.
//! В игре NavAgent обновляет хост, этот плагин не добавляется.

use bevy::prelude::*;

use crate::components::NavAgent;
use crate::SimulationSet;

/// Walkable area (плоскость на ground_height, опционально ограниченная по XZ)
#[derive(Resource, Debug, Clone, Reflect)]
#[reflect(Resource)]
pub struct NavArea {
    /// Границы по X/Z (None = бесконечная плоскость)
    pub bounds: Option<Rect>,
    pub ground_height: f32,
}

impl Default for NavArea {
    fn default() -> Self {
        Self {
            bounds: None,
            ground_height: 0.0,
        }
    }
}

impl NavArea {
    pub fn bounded(min: Vec2, max: Vec2) -> Self {
        Self {
            bounds: Some(Rect::from_corners(min, max)),
            ..default()
        }
    }

    /// Ближайшая walkable точка к target в пределах max_distance
    pub fn sample_position(&self, target: Vec3, max_distance: f32) -> Option<Vec3> {
        let mut planar = Vec2::new(target.x, target.z);
        if let Some(bounds) = self.bounds {
            planar = planar.clamp(bounds.min, bounds.max);
        }

        let sampled = Vec3::new(planar.x, self.ground_height, planar.y);
        (sampled.distance(target) <= max_distance).then_some(sampled)
    }
}

/// Navigation plugin (headless driver)
pub struct NavigationPlugin;

impl Plugin for NavigationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<NavArea>()
            .register_type::<NavArea>()
            .register_type::<NavAgent>()
            .add_systems(FixedUpdate, advance_nav_agents.in_set(SimulationSet::Motion));
    }
}

/// Система: resolve pending путей + движение по прямой
///
/// Остановленный агент продолжает катиться с текущей velocity
/// (её гасит Task::Brake).
pub fn advance_nav_agents(mut agents: Query<(&mut NavAgent, &mut Transform)>, time: Res<Time<Fixed>>) {
    let dt = time.delta_secs();

    for (mut nav, mut transform) in agents.iter_mut() {
        if !nav.enabled {
            continue;
        }

        let Some(destination) = nav.destination else {
            continue;
        };

        if nav.path_pending {
            nav.path_pending = false;
            nav.remaining_distance = transform.translation.distance(destination);
        }

        if nav.is_stopped {
            let coast = nav.velocity * dt;
            transform.translation += coast;
        } else {
            let offset = destination - transform.translation;
            let distance = offset.length();

            if distance > nav.stopping_distance {
                let direction = offset / distance;
                let step = (nav.speed * dt).min(distance);
                transform.translation += direction * step;
                nav.velocity = direction * nav.speed;
                face_direction(&mut transform, direction);
            } else {
                nav.velocity = Vec3::ZERO;
            }
        }

        nav.remaining_distance = transform.translation.distance(destination);
    }
}

fn face_direction(transform: &mut Transform, direction: Vec3) {
    let planar = Vec3::new(direction.x, 0.0, direction.z);
    if planar.length_squared() > 1e-6 {
        transform.look_to(planar, Vec3::Y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_unbounded_projects_to_ground() {
        let area = NavArea::default();
        assert_eq!(
            area.sample_position(Vec3::new(3.0, 1.0, 4.0), 2.0),
            Some(Vec3::new(3.0, 0.0, 4.0))
        );
        // Слишком высоко над землёй
        assert_eq!(area.sample_position(Vec3::new(3.0, 10.0, 4.0), 2.0), None);
    }

    #[test]
    fn test_sample_clamps_to_bounds() {
        let area = NavArea::bounded(Vec2::splat(-10.0), Vec2::splat(10.0));

        assert_eq!(
            area.sample_position(Vec3::new(11.0, 0.0, 0.0), 5.0),
            Some(Vec3::new(10.0, 0.0, 0.0))
        );
        assert_eq!(area.sample_position(Vec3::new(30.0, 0.0, 0.0), 5.0), None);
    }
}
