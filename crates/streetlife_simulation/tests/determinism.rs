//! Тесты детерминизма
//!
//! Одна и та же улица с одинаковым seed даёт идентичный мир: задержки
//! старта патруля, выбор ветки графа и убежища идут через DeterministicRng.

use bevy::prelude::*;
use streetlife_simulation::ai::{PanicBehavior, PatrolBehavior};
use streetlife_simulation::components::{ColliderTag, NavAgent};
use streetlife_simulation::controllers::{SensorEvent, TriggerSensor};
use streetlife_simulation::*;

const TICK_COUNT: usize = 900;

/// Развилки графа: у каждой точки по два потомка
fn spawn_branching_graph(world: &mut World) -> Vec<Entity> {
    let points: Vec<Entity> = (0..8)
        .map(|i| {
            let angle = i as f32 / 8.0 * std::f32::consts::TAU;
            world
                .spawn((
                    Waypoint::default(),
                    Transform::from_xyz(15.0 * angle.cos(), 0.0, 15.0 * angle.sin()),
                ))
                .id()
        })
        .collect();

    for (i, point) in points.iter().enumerate() {
        let children = vec![points[(i + 1) % 8], points[(i + 3) % 8]];
        world.entity_mut(*point).insert(Waypoint::with_children(children));
    }

    points
}

/// Запускает симуляцию и возвращает snapshot мира
fn run_simulation(seed: u64) -> (Vec<u8>, Vec<u8>) {
    let mut app = create_headless_app(seed);
    let world = app.world_mut();

    let points = spawn_branching_graph(world);
    let shelters: Vec<Entity> = (0..4)
        .map(|i| {
            world
                .spawn((Waypoint::default(), Transform::from_xyz(30.0 * i as f32, 0.0, -30.0)))
                .id()
        })
        .collect();
    let safe_list = world.spawn(WaypointList::from_points(shelters)).id();

    let mut sensors = Vec::new();
    for (i, start) in points.iter().enumerate() {
        let pedestrian = world
            .spawn((
                Pedestrian::patrolling(),
                PatrolBehavior::starting_at(*start),
                PanicBehavior::fleeing_to(safe_list),
                NavAgent::new(2.0 + i as f32 * 0.1),
                Transform::from_xyz(i as f32, 0.0, 0.0),
            ))
            .id();
        sensors.push(world.spawn(TriggerSensor::new(pedestrian, ColliderTag::Monster)).id());
    }

    let monster = world
        .spawn((Monster::default(), NavAgent::new(1.0), ColliderTag::Monster))
        .id();

    for tick in 0..TICK_COUNT {
        // Половина пешеходов замечает монстра на 8-й секунде
        if tick == 480 {
            for sensor in sensors.iter().step_by(2) {
                app.world_mut().send_event(SensorEvent::TriggerEntered {
                    sensor: *sensor,
                    other: monster,
                });
            }
        }
        app.update();
    }

    (
        world_snapshot::<Transform>(app.world_mut()),
        world_snapshot::<ActorState>(app.world_mut()),
    )
}

#[test]
fn test_determinism_same_seed() {
    const SEED: u64 = 12345;

    let first = run_simulation(SEED);
    let second = run_simulation(SEED);

    assert_eq!(
        first, second,
        "Симуляция с одинаковым seed ({}) дала разные результаты!",
        SEED
    );
}

#[test]
fn test_determinism_multiple_runs() {
    const SEED: u64 = 42;

    let snapshots: Vec<_> = (0..3).map(|_| run_simulation(SEED)).collect();

    for (i, snapshot) in snapshots.iter().enumerate().skip(1) {
        assert_eq!(snapshots[0], *snapshot, "Прогон {} дал результат отличный от прогона 0", i);
    }
}

#[test]
fn test_different_seeds_diverge() {
    // Разные задержки старта → разные позиции пешеходов
    let (transforms_a, _) = run_simulation(1);
    let (transforms_b, _) = run_simulation(2);

    assert_ne!(transforms_a, transforms_b);
}
