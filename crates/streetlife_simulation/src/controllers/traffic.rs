//! Traffic сенсор машины: опрос сферы перед капотом каждые 0.2 с
//!
//! Препятствие = коллайдер с тегом CarDome (чужой). Появилось → brake,
//! исчезло → resume. Опрос живёт как Task::CheckTraffic и прекращается
//! вместе с владельцем (despawn / Suspended).

use bevy::prelude::*;

use super::vehicle;
use crate::ai::hooks::{ActorQuery, StateEnv};
use crate::components::{ColliderTag, WorldTransforms};
use crate::navigation::NavArea;
use crate::schedule::{ScheduledTasks, Task, TaskDue};
use crate::waypoints::WaypointGraph;
use crate::DeterministicRng;

#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct TrafficSensor {
    pub radius: f32,
    /// Центр сферы в локальных координатах машины
    pub offset: Vec3,
    /// Период опроса (секунды)
    pub interval: f32,
    /// Машина сейчас стоит из-за препятствия
    pub is_blocked: bool,
}

impl Default for TrafficSensor {
    fn default() -> Self {
        Self {
            radius: 3.0,
            offset: Vec3::ZERO,
            interval: 0.2,
            is_blocked: false,
        }
    }
}

impl TrafficSensor {
    pub fn ahead(distance: f32) -> Self {
        Self {
            offset: Vec3::NEG_Z * distance,
            ..default()
        }
    }

    pub fn center(&self, transform: &Transform) -> Vec3 {
        transform.transform_point(self.offset)
    }
}

/// Система: первый опрос сразу после появления сенсора
pub fn start_traffic_checks(
    mut sensors: Query<&mut ScheduledTasks, Added<TrafficSensor>>,
    time: Res<Time<Fixed>>,
) {
    let now = time.elapsed_secs();
    for mut tasks in sensors.iter_mut() {
        tasks.schedule(now, Task::CheckTraffic);
    }
}

/// Система: обработка Task::CheckTraffic
pub fn check_traffic(
    mut due: EventReader<TaskDue>,
    mut vehicles: Query<(ActorQuery, &mut TrafficSensor)>,
    obstacles: Query<(Entity, &ColliderTag)>,
    transforms: WorldTransforms,
    graph: WaypointGraph,
    nav_area: Res<NavArea>,
    mut rng: ResMut<DeterministicRng>,
    time: Res<Time<Fixed>>,
) {
    let env = StateEnv {
        graph: &graph,
        nav_area: &*nav_area,
        rng: &mut rng.rng,
        now: time.elapsed_secs(),
    };

    for TaskDue { entity, task } in due.read() {
        if !matches!(task, Task::CheckTraffic) {
            continue;
        }
        let Ok((mut actor, mut sensor)) = vehicles.get_mut(*entity) else {
            continue;
        };

        // Купола обычно дочерние коллайдеры: сравниваем мировые позиции
        let vehicle = transforms.transform(*entity).unwrap_or(*actor.transform);
        let center = sensor.center(&vehicle);
        let blocked = obstacles.iter().any(|(other, tag)| {
            *tag == ColliderTag::CarDome
                && other != *entity
                && !transforms.is_descendant_of(other, *entity)
                && transforms
                    .position(other)
                    .is_some_and(|position| position.distance(center) <= sensor.radius)
        });

        if blocked && !sensor.is_blocked {
            sensor.is_blocked = true;
            vehicle::brake(&mut actor, env.now);
            crate::log(&format!("🚦 Vehicle {:?} blocked, braking", entity));
        } else if !blocked && sensor.is_blocked {
            sensor.is_blocked = false;
            vehicle::resume(&mut actor, &env);
            crate::log(&format!("🚦 Vehicle {:?} clear, resuming", entity));
        }

        actor.tasks.schedule_after(env.now, sensor.interval, Task::CheckTraffic);
    }
}
