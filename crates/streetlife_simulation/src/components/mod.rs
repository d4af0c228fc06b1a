//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - actor: базовые характеристики (Actor, Health, ColliderTag)
//! - movement: контракт навигационного агента (NavAgent)
//! - animation: параметры аниматора (Animator)
//! - ragdoll: тела для ragdoll handoff после смерти
//! - hierarchy: мировые позиции дочерних коллайдеров
//! - ai: state machine (ActorState + behaviours, живут в crate::ai)

pub mod actor;
pub mod movement;
pub mod animation;
pub mod ragdoll;
pub mod hierarchy;
pub mod ai;

// Re-exports для удобного импорта
pub use actor::*;
pub use movement::*;
pub use animation::*;
pub use ragdoll::*;
pub use hierarchy::WorldTransforms;
pub use ai::*;
