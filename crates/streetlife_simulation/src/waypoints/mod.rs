//! Waypoints: граф патрульных точек, маршруты, списки убежищ
//!
//! Waypoint.children: рёбра графа (патруль выбирает случайного потомка).
//! Waypath: упорядоченный маршрут (circular / random).
//! WaypointList: плоский набор (паника выбирает случайную точку).

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use rand::Rng;

use crate::SimulationSet;

pub mod list;
pub mod waypath;
pub mod waypoint;

pub use list::{collect_list_points, WaypointList};
pub use waypath::{PathDirection, Waypath};
pub use waypoint::{Waypoint, DEFAULT_WAYPOINT_COLOR};

/// Waypoints Plugin: регистрация типов + авто-заполнение списков
pub struct WaypointsPlugin;

impl Plugin for WaypointsPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<Waypoint>()
            .register_type::<Waypath>()
            .register_type::<WaypointList>()
            .add_systems(FixedUpdate, collect_list_points.in_set(SimulationSet::Scheduling));
    }
}

/// Read-only доступ к графу waypoints для state hooks
#[derive(SystemParam)]
pub struct WaypointGraph<'w, 's> {
    waypoints: Query<'w, 's, (&'static Waypoint, &'static Transform)>,
    lists: Query<'w, 's, &'static WaypointList>,
    paths: Query<'w, 's, &'static Waypath>,
}

impl<'w, 's> WaypointGraph<'w, 's> {
    /// Мировая позиция waypoint (None если entity не waypoint)
    pub fn position(&self, waypoint: Entity) -> Option<Vec3> {
        self.waypoints
            .get(waypoint)
            .ok()
            .map(|(_, transform)| transform.translation)
    }

    pub fn waypoint(&self, waypoint: Entity) -> Option<&Waypoint> {
        self.waypoints.get(waypoint).ok().map(|(w, _)| w)
    }

    /// Случайный потомок waypoint (None для тупика или не-waypoint)
    pub fn next_child<R: Rng + ?Sized>(&self, waypoint: Entity, rng: &mut R) -> Option<Entity> {
        self.waypoint(waypoint)?.next(rng)
    }

    pub fn list(&self, list: Entity) -> Option<&WaypointList> {
        self.lists.get(list).ok()
    }

    pub fn path(&self, path: Entity) -> Option<&Waypath> {
        self.paths.get(path).ok()
    }
}
