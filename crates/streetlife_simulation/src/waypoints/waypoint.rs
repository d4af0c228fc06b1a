//! Waypoint: узел направленного графа патрульных точек

use bevy::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;

/// Цвет gizmo по умолчанию (зелёный)
pub const DEFAULT_WAYPOINT_COLOR: [f32; 4] = [0.0, 1.0, 0.0, 1.0];

/// Точка маршрута
///
/// Позиция: Transform entity. `children`: исходящие рёбра графа
/// (следующие точки). Создаётся на этапе дизайна сцены, в runtime не удаляется.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Waypoint {
    pub children: Vec<Entity>,
    /// Только для отрисовки (editor gizmos)
    pub color: [f32; 4],
}

impl Default for Waypoint {
    fn default() -> Self {
        Self {
            children: Vec::new(),
            color: DEFAULT_WAYPOINT_COLOR,
        }
    }
}

impl Waypoint {
    pub fn with_children(children: Vec<Entity>) -> Self {
        Self {
            children,
            ..default()
        }
    }

    /// Следующая точка: равновероятно один из прямых потомков
    ///
    /// None если потомков нет (тупик графа).
    pub fn next<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Entity> {
        self.children.choose(rng).copied()
    }

    pub fn is_dead_end(&self) -> bool {
        self.children.is_empty()
    }
}
