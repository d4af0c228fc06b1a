//! Waypath: упорядоченный маршрут из waypoints

use bevy::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;

/// Направление обхода маршрута
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
pub enum PathDirection {
    #[default]
    Forward,
    Backward,
}

impl PathDirection {
    pub fn step(self) -> isize {
        match self {
            PathDirection::Forward => 1,
            PathDirection::Backward => -1,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            PathDirection::Forward => PathDirection::Backward,
            PathDirection::Backward => PathDirection::Forward,
        }
    }
}

/// Маршрут (инвариант: непустой, когда назначен агенту)
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Waypath {
    pub points: Vec<Entity>,
    /// Замкнутый маршрут
    pub circular: bool,
    /// Следующая точка выбирается случайно
    pub random: bool,
}

impl Default for Waypath {
    fn default() -> Self {
        Self {
            points: Vec::new(),
            circular: true,
            random: false,
        }
    }
}

impl Waypath {
    pub fn new(points: Vec<Entity>) -> Self {
        Self {
            points,
            ..default()
        }
    }

    pub fn open(points: Vec<Entity>) -> Self {
        Self {
            points,
            circular: false,
            random: false,
        }
    }

    fn index_of(&self, point: Entity) -> Option<usize> {
        self.points.iter().position(|p| *p == point)
    }

    /// Индекс последней точки в направлении
    fn end_point_index(&self, direction: PathDirection) -> usize {
        match direction {
            PathDirection::Forward => self.points.len().saturating_sub(1),
            PathDirection::Backward => 0,
        }
    }

    pub fn is_end_point(&self, direction: PathDirection, point: Entity) -> bool {
        !self.points.is_empty() && self.index_of(point) == Some(self.end_point_index(direction))
    }

    /// false только для терминальной точки незамкнутого маршрута
    pub fn has_next_point(&self, direction: PathDirection, point: Entity) -> bool {
        self.circular || !self.is_end_point(direction, point)
    }

    /// Следующая точка маршрута
    ///
    /// Детерминированный successor в направлении, либо случайная *другая*
    /// точка для `random` маршрутов. Замкнутый маршрут переходит через край,
    /// незамкнутый на терминальной точке возвращает None (не wrap).
    /// Точка не из маршрута → первая точка в направлении обхода.
    pub fn next_point<R: Rng + ?Sized>(
        &self,
        direction: PathDirection,
        point: Entity,
        rng: &mut R,
    ) -> Option<Entity> {
        if self.points.is_empty() {
            return None;
        }

        if self.random {
            return self.next_random_point(point, rng);
        }

        if !self.has_next_point(direction, point) {
            return None;
        }

        let len = self.points.len() as isize;
        let next_index = match self.index_of(point) {
            Some(index) => (index as isize + direction.step()).rem_euclid(len),
            None => self.end_point_index(direction.reversed()) as isize,
        };

        self.points.get(next_index as usize).copied()
    }

    /// Случайная точка маршрута, отличная от `point` (если есть другие)
    pub fn next_random_point<R: Rng + ?Sized>(&self, point: Entity, rng: &mut R) -> Option<Entity> {
        let others: Vec<Entity> = self.points.iter().copied().filter(|p| *p != point).collect();

        match others.choose(rng) {
            Some(other) => Some(*other),
            None => self.points.first().copied(),
        }
    }

    /// Ближайшая к позиции точка (точки без позиции пропускаются)
    pub fn closest_point(
        &self,
        position: Vec3,
        position_of: impl Fn(Entity) -> Option<Vec3>,
    ) -> Option<Entity> {
        self.points
            .iter()
            .filter_map(|point| position_of(*point).map(|p| (*point, p.distance_squared(position))))
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(point, _)| point)
    }
}
