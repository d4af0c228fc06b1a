//! FSM systems: активация, per-tick update, применение триггеров
//!
//! Порядок внутри тика (см. SimulationSet):
//! 1. initialize_spawned_states: enter hook для свежезаспавненных
//! 2. update_active_states: update hooks → StateTrigger
//! 3. apply_state_triggers: exit/enter пары

use bevy::prelude::*;

use crate::ai::hooks::{activate_state, change_state, hooks, next_state, ActorQuery, StateEnv};
use crate::ai::{StateLifecycle, StateTrigger, Trigger};
use crate::navigation::NavArea;
use crate::schedule::Suspended;
use crate::waypoints::WaypointGraph;
use crate::DeterministicRng;

/// Система: enter hook для состояния, с которым актор заспавнен
pub fn initialize_spawned_states(
    mut actors: Query<ActorQuery, Added<crate::ai::ActorState>>,
    graph: WaypointGraph,
    nav_area: Res<NavArea>,
    mut rng: ResMut<DeterministicRng>,
    time: Res<Time<Fixed>>,
    mut lifecycle: EventWriter<StateLifecycle>,
) {
    let mut env = StateEnv {
        graph: &graph,
        nav_area: &*nav_area,
        rng: &mut rng.rng,
        now: time.elapsed_secs(),
    };

    for mut actor in actors.iter_mut() {
        activate_state(&mut actor, &mut env, &mut lifecycle);
    }
}

/// Система: update hook активного состояния каждого (не выключенного) актора
pub fn update_active_states(
    mut actors: Query<ActorQuery, Without<Suspended>>,
    graph: WaypointGraph,
    nav_area: Res<NavArea>,
    mut rng: ResMut<DeterministicRng>,
    time: Res<Time<Fixed>>,
    mut triggers: EventWriter<StateTrigger>,
) {
    let mut env = StateEnv {
        graph: &graph,
        nav_area: &*nav_area,
        rng: &mut rng.rng,
        now: time.elapsed_secs(),
    };

    for mut actor in actors.iter_mut() {
        let state = *actor.state;
        if let Some(trigger) = (hooks(state).update)(&mut actor, &mut env) {
            triggers.write(StateTrigger {
                entity: actor.entity,
                trigger,
            });
        }
    }
}

/// Система: StateTrigger → переход по таблице текущего состояния
///
/// Несколько триггеров одному актору за тик применяются по очереди,
/// каждый против уже обновлённого состояния.
pub fn apply_state_triggers(
    mut triggers: EventReader<StateTrigger>,
    mut actors: Query<ActorQuery>,
    graph: WaypointGraph,
    nav_area: Res<NavArea>,
    mut rng: ResMut<DeterministicRng>,
    time: Res<Time<Fixed>>,
    mut lifecycle: EventWriter<StateLifecycle>,
) {
    let mut env = StateEnv {
        graph: &graph,
        nav_area: &*nav_area,
        rng: &mut rng.rng,
        now: time.elapsed_secs(),
    };

    for event in triggers.read() {
        // Entity могла быть despawned между отправкой и обработкой
        let Ok(mut actor) = actors.get_mut(event.entity) else {
            continue;
        };

        let from = *actor.state;
        let Some(to) = next_state(from, &event.trigger, actor.capabilities()) else {
            continue;
        };

        // Достигнутое убежище становится следующей целью патруля
        if let Trigger::SafepointReached { waypoint } = event.trigger {
            if let Some(patrol) = actor.patrol.as_mut() {
                patrol.waypoint = Some(waypoint);
            }
        }

        change_state(&mut actor, to, &mut env, &mut lifecycle);
    }
}
