//! AI компоненты: state machine и поведенческие параметры

// NOTE: ActorState и behaviours определены в crate::ai::components
// Экспортируем их здесь для единообразия импорта `crate::components::*`
pub use crate::ai::{ActorState, DieBehavior, PanicBehavior, PatrolBehavior, WanderBehavior};
