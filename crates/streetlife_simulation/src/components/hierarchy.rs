//! Мировые transform'ы по цепочке ChildOf
//!
//! Коллайдеры (купол машины, кузов, grab-зона игрока) обычно дочерние
//! entity, их `Transform` локальный. Симуляция не тянет TransformPlugin,
//! поэтому мировую позицию собираем сами: T_root * ... * T_parent * T_local.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

/// Глубже не поднимаемся (защита от битой иерархии)
const MAX_DEPTH: usize = 64;

#[derive(SystemParam)]
pub struct WorldTransforms<'w, 's> {
    nodes: Query<'w, 's, (&'static Transform, Option<&'static ChildOf>)>,
}

impl<'w, 's> WorldTransforms<'w, 's> {
    /// Мировой transform entity (None если у entity нет Transform)
    pub fn transform(&self, entity: Entity) -> Option<Transform> {
        let (local, child_of) = self.nodes.get(entity).ok()?;

        let mut world = *local;
        let mut parent = child_of.map(ChildOf::parent);

        for _ in 0..MAX_DEPTH {
            let Some(current) = parent else {
                break;
            };
            // Родитель без Transform считается корнем
            let Ok((transform, up)) = self.nodes.get(current) else {
                break;
            };

            world = transform.mul_transform(world);
            parent = up.map(ChildOf::parent);
        }

        Some(world)
    }

    pub fn position(&self, entity: Entity) -> Option<Vec3> {
        self.transform(entity).map(|transform| transform.translation)
    }

    /// entity лежит где-то под ancestor (сам ancestor не считается)
    pub fn is_descendant_of(&self, entity: Entity, ancestor: Entity) -> bool {
        let mut parent = self
            .nodes
            .get(entity)
            .ok()
            .and_then(|(_, child_of)| child_of.map(ChildOf::parent));

        for _ in 0..MAX_DEPTH {
            let Some(current) = parent else {
                return false;
            };
            if current == ancestor {
                return true;
            }
            parent = self
                .nodes
                .get(current)
                .ok()
                .and_then(|(_, child_of)| child_of.map(ChildOf::parent));
        }

        false
    }
}
