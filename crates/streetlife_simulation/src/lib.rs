//! Streetlife Simulation Core
//!
//! ECS-симуляция уличной жизни на Bevy 0.16: пешеходы, машины, монстры,
//! игрок. Ядро: per-actor state machine (Idle / Patrol / Wander / Panic /
//! Die) поверх графа waypoints.
//!
//! HOST BOUNDARY:
//! - ECS = решения (состояния, цели навигации, правила урона)
//! - Хост = физика, navmesh, анимация, рендер, звук (через компоненты и события)

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

// Публичные модули
pub mod ai;
pub mod components;
pub mod controllers;
pub mod elements;
pub mod localization;
pub mod locomotion;
pub mod logger;
pub mod navigation;
pub mod schedule;
pub mod settings;
pub mod waypoints;

// Re-export базовых типов для удобства
pub use ai::{AIPlugin, ActorState, LifecyclePhase, StateLifecycle, StateTrigger, Trigger};
pub use components::*;
pub use controllers::{ControllersPlugin, Monster, Pedestrian, Player, TrafficSensor, Vehicle};
pub use elements::{Elevator, ElementsPlugin};
pub use localization::{LocaleChanged, LocalizationPlugin};
pub use locomotion::{Locomotion, LocomotionPlugin};
pub use logger::{init_logger, log, log_error, log_info, log_warning};
pub use navigation::{NavArea, NavigationPlugin};
pub use schedule::{ScheduledTasks, Suspended, Task, TaskSchedulerPlugin};
pub use settings::{Preferences, SettingsPlugin};
pub use waypoints::{Waypath, Waypoint, WaypointList, WaypointsPlugin};

/// Частота simulation tick
pub const TICK_RATE_HZ: f64 = 60.0;

/// Фазы simulation tick (FixedUpdate, строго последовательно)
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Due задачи, авто-заполнение списков
    Scheduling,
    /// Сенсоры / урон / задачи → StateTrigger
    Sensing,
    /// Enter свежих акторов, update hooks
    Behaviour,
    /// StateTrigger → exit/enter пары
    Transitions,
    /// Навигация, анимация, платформы
    Motion,
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            FixedUpdate,
            (
                SimulationSet::Scheduling,
                SimulationSet::Sensing,
                SimulationSet::Behaviour,
                SimulationSet::Transitions,
                SimulationSet::Motion,
            )
                .chain(),
        );

        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }

        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(TICK_RATE_HZ))
            .add_plugins((
                TaskSchedulerPlugin,
                WaypointsPlugin,
                AIPlugin,
                ControllersPlugin,
                NavigationPlugin,
                LocomotionPlugin,
                ElementsPlugin,
                SettingsPlugin,
                LocalizationPlugin,
            ));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт Bevy App для headless симуляции
///
/// Время продвигается вручную на один tick за `app.update()`, поэтому
/// прогон детерминирован и не зависит от wall clock.
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            1.0 / TICK_RATE_HZ,
        )))
        .insert_resource(DeterministicRng::new(seed))
        .add_plugins(SimulationPlugin);

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
