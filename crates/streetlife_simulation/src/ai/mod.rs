//! AI: конечный автомат поведения актора
//!
//! Idle / Patrol / Wander / Panic / Die. Каждое состояние = строка таблицы
//! hooks (enter/update/exit/transition), см. `hooks`.
//!
//! Поток данных за тик:
//! sensors/damage/tasks → StateTrigger → apply_state_triggers → StateLifecycle

use bevy::prelude::*;

use crate::SimulationSet;

pub mod components;
pub mod events;
pub mod hooks;
pub mod systems;

pub use components::*;
pub use events::{LifecyclePhase, StateLifecycle, StateTrigger, Trigger};
pub use hooks::{ActorQuery, Capabilities, StateEnv};

/// AI Plugin
///
/// Регистрирует FSM системы в FixedUpdate для детерминизма:
/// 1. run_state_tasks (Sensing, до контроллеров): StartPatrol / Brake / EnableRagdoll
/// 2. initialize_spawned_states → update_active_states (Behaviour)
/// 3. apply_state_triggers (Transitions)
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<StateTrigger>()
            .add_event::<StateLifecycle>()
            .register_type::<ActorState>()
            .register_type::<PatrolBehavior>()
            .register_type::<WanderBehavior>()
            .register_type::<PanicBehavior>()
            .register_type::<DieBehavior>()
            .add_systems(
                FixedUpdate,
                systems::run_state_tasks
                    .before(crate::controllers::events::route_sensor_events)
                    .in_set(SimulationSet::Sensing),
            )
            .add_systems(
                FixedUpdate,
                (systems::initialize_spawned_states, systems::update_active_states)
                    .chain()
                    .in_set(SimulationSet::Behaviour),
            )
            .add_systems(
                FixedUpdate,
                systems::apply_state_triggers.in_set(SimulationSet::Transitions),
            );
    }
}
