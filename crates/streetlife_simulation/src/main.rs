//! Headless симуляция улицы
//!
//! Кольцо waypoints, патрулирующие пешеходы и машина, список убежищ.
//! На 5-й секунде мимо пешеходов проходит монстр, на 12-й игрок
//! стреляет в одного из них. Раз в секунду печатается счётчик состояний.

use bevy::prelude::*;
use std::collections::BTreeMap;

use streetlife_simulation::ai::{PanicBehavior, PatrolBehavior};
use streetlife_simulation::components::{ColliderTag, NavAgent};
use streetlife_simulation::controllers::{SensorEvent, ShotImpact, TriggerSensor};
use streetlife_simulation::settings::MemoryStore;
use streetlife_simulation::{
    create_headless_app, log_info, ActorState, Locomotion, Monster, Pedestrian, Preferences, TrafficSensor,
    Vehicle, Waypoint, WaypointList,
};

const TICKS: u32 = 60 * 20;

fn spawn_street(world: &mut World) -> (Vec<Entity>, Vec<Entity>, Entity) {
    // Кольцо из 6 точек радиусом 20 м
    let ring: Vec<Entity> = (0..6)
        .map(|i| {
            let angle = i as f32 / 6.0 * std::f32::consts::TAU;
            world
                .spawn((
                    Waypoint::default(),
                    Transform::from_xyz(20.0 * angle.cos(), 0.0, 20.0 * angle.sin()),
                ))
                .id()
        })
        .collect();

    for (i, point) in ring.iter().enumerate() {
        let next = ring[(i + 1) % ring.len()];
        if let Some(mut waypoint) = world.get_mut::<Waypoint>(*point) {
            waypoint.children.push(next);
        }
    }

    // Убежища: дочерние waypoints списка
    let safe_list = world
        .spawn((WaypointList::default(), Transform::default()))
        .with_children(|parent| {
            parent.spawn((Waypoint::default(), Transform::from_xyz(40.0, 0.0, 40.0)));
            parent.spawn((Waypoint::default(), Transform::from_xyz(-40.0, 0.0, -40.0)));
        })
        .id();

    let pedestrians: Vec<Entity> = ring
        .iter()
        .take(3)
        .map(|start| {
            let position = world.get::<Transform>(*start).map(|t| t.translation).unwrap_or_default();
            let pedestrian = world
                .spawn((
                    Pedestrian::patrolling(),
                    PatrolBehavior::starting_at(*start),
                    PanicBehavior::fleeing_to(safe_list),
                    NavAgent::new(1.5),
                    Locomotion::pedestrian(),
                    ColliderTag::Pedestrian,
                    Transform::from_translation(position),
                ))
                .id();
            world.spawn(TriggerSensor::new(pedestrian, ColliderTag::Monster));
            pedestrian
        })
        .collect();

    world.spawn((
        Vehicle::patrolling(),
        PatrolBehavior::starting_at(ring[3]),
        NavAgent::new(8.0),
        TrafficSensor::ahead(4.0),
        Transform::from_translation(Vec3::new(-20.0, 0.0, 0.0)),
    ));

    (pedestrians, ring, safe_list)
}

fn main() {
    let seed = 42;
    println!("Starting Streetlife headless simulation (seed: {})", seed);

    let mut app = create_headless_app(seed);
    app.insert_resource(Preferences::new("streetlife", MemoryStore::new()));

    let (pedestrians, _ring, _safe_list) = spawn_street(app.world_mut());

    let monster = app
        .world_mut()
        .spawn((Monster::default(), NavAgent::new(1.0), ColliderTag::Monster, Transform::default()))
        .id();

    // Сенсоры пешеходов (спавнились сразу после владельца)
    let sensors: Vec<Entity> = {
        let world = app.world_mut();
        let mut query = world.query::<(Entity, &TriggerSensor)>();
        query.iter(world).map(|(entity, _)| entity).collect()
    };

    for tick in 0..TICKS {
        if tick == 60 * 5 {
            log_info("👹 Monster walks by the pedestrians");
            for sensor in &sensors {
                app.world_mut().send_event(SensorEvent::TriggerEntered {
                    sensor: *sensor,
                    other: monster,
                });
            }
        }

        if tick == 60 * 12 {
            if let Some(victim) = pedestrians.first() {
                log_info("🔫 Player shoots a pedestrian");
                app.world_mut().send_event(ShotImpact {
                    collider: *victim,
                    point: Vec3::ZERO,
                    normal: Vec3::Y,
                    damage: 10,
                });
            }
        }

        app.update();

        if tick % 60 == 0 {
            let world = app.world_mut();
            let mut query = world.query::<&ActorState>();
            let mut counts: BTreeMap<String, usize> = BTreeMap::new();
            for state in query.iter(world) {
                *counts.entry(format!("{:?}", state)).or_default() += 1;
            }
            println!("Tick {}: {:?}", tick, counts);
        }
    }

    println!("Simulation complete!");
}
