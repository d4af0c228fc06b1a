//! WaypointList: плоский набор точек (убежища для паники)

use bevy::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;

use super::Waypoint;

#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct WaypointList {
    /// Заполнить `points` из дочерних entity при инициализации
    pub collect_from_children: bool,
    pub points: Vec<Entity>,
}

impl Default for WaypointList {
    fn default() -> Self {
        Self {
            collect_from_children: true,
            points: Vec::new(),
        }
    }
}

impl WaypointList {
    pub fn from_points(points: Vec<Entity>) -> Self {
        Self {
            collect_from_children: false,
            points,
        }
    }

    /// Равновероятный выбор. None для пустого списка.
    pub fn next_random<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Entity> {
        self.points.choose(rng).copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Система: авто-заполнение списков из иерархии (рекурсивно, включая сам entity)
pub fn collect_list_points(
    mut lists: Query<(Entity, &mut WaypointList), Added<WaypointList>>,
    hierarchy: Query<&Children>,
    waypoints: Query<(), With<Waypoint>>,
) {
    for (root, mut list) in lists.iter_mut() {
        if !list.collect_from_children {
            continue;
        }

        let mut collected = Vec::new();
        let mut stack = vec![root];

        // DFS, порядок: как в иерархии сцены
        while let Some(entity) = stack.pop() {
            if waypoints.contains(entity) {
                collected.push(entity);
            }

            if let Ok(children) = hierarchy.get(entity) {
                let children: &[Entity] = children;
                stack.extend(children.iter().rev());
            }
        }

        crate::log(&format!(
            "📍 WaypointList {:?}: collected {} points from children",
            root,
            collected.len()
        ));
        list.points = collected;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_empty_list_has_no_pick() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert_eq!(WaypointList::default().next_random(&mut rng), None);
    }

    #[test]
    fn test_pick_is_member() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let points = vec![Entity::from_raw(1), Entity::from_raw(2)];
        let list = WaypointList::from_points(points.clone());

        for _ in 0..20 {
            let pick = list.next_random(&mut rng).expect("non-empty");
            assert!(points.contains(&pick));
        }
    }

    #[test]
    fn test_collect_from_children() {
        let mut world = World::new();
        let mut schedule = bevy::ecs::schedule::Schedule::default();
        schedule.add_systems(collect_list_points);

        let root = world
            .spawn(WaypointList::default())
            .with_children(|parent| {
                parent.spawn(Waypoint::default());
                parent.spawn(Waypoint::default());
                // Не waypoint: пропускается
                parent.spawn(Transform::default());
            })
            .id();

        schedule.run(&mut world);

        let list = world.get::<WaypointList>(root).expect("list");
        assert_eq!(list.len(), 2);
    }
}
