//! Игрок и окружение: награды, оружие, лифт, анимация ходьбы
//!
//! Те же условия что в fsm_scenarios: headless App, 60 Hz, события
//! хоста пишутся прямо в World.

use bevy::prelude::*;
use streetlife_simulation::ai::PatrolBehavior;
use streetlife_simulation::components::{Animator, ColliderTag, Health, NavAgent};
use streetlife_simulation::controllers::{
    AudioCue, DamageEvent, FireRequest, PlayerStatus, RewardBox, RewardKind, SensorEvent, ShotFired,
    TriggerSensor,
};
use streetlife_simulation::{
    create_headless_app, Elevator, Locomotion, Pedestrian, Player, StateTrigger, Trigger, Waypoint,
};

fn run_ticks(app: &mut App, ticks: usize) {
    for _ in 0..ticks {
        app.update();
    }
}

fn seconds(s: f32) -> usize {
    (s * 60.0).ceil() as usize + 1
}

/// Звуки последнего тика
fn audio_clips(app: &App) -> Vec<(Entity, String)> {
    let events = app.world().resource::<Events<AudioCue>>();
    let mut cursor = events.get_cursor();
    cursor
        .read(events)
        .map(|cue| (cue.source, cue.clip.clone()))
        .collect()
}

fn spawn_reward(app: &mut App, kind: RewardKind, filter: ColliderTag) -> Entity {
    let reward = app.world_mut().spawn(RewardBox::new(kind)).id();
    app.world_mut()
        .entity_mut(reward)
        .insert(TriggerSensor::new(reward, filter));
    reward
}

#[test]
fn test_health_box_heals_through_grab_zone_and_disappears() {
    let mut app = create_headless_app(1);
    let player = app.world_mut().spawn(Player).id();
    let grab = app
        .world_mut()
        .spawn((ColliderTag::PlayerGrab, Transform::default(), ChildOf(player)))
        .id();
    let reward = spawn_reward(&mut app, RewardKind::Health, ColliderTag::PlayerGrab);

    run_ticks(&mut app, 2);
    app.world_mut().send_event(DamageEvent {
        target: player,
        amount: 40,
        point: Vec3::ZERO,
    });
    run_ticks(&mut app, 1);
    assert_eq!(app.world().get::<Health>(player).unwrap().current, 60);

    app.world_mut().send_event(SensorEvent::TriggerEntered {
        sensor: reward,
        other: grab,
    });
    run_ticks(&mut app, 1);

    assert_eq!(app.world().get::<Health>(player).unwrap().current, 100);
    assert!(app.world().get::<RewardBox>(reward).unwrap().collected);
    assert!(audio_clips(&app).contains(&(grab, "Collect Reward".to_string())));

    // Повторный вход в уже подобранную коробку ничего не даёт
    app.world_mut().send_event(SensorEvent::TriggerEntered {
        sensor: reward,
        other: grab,
    });
    run_ticks(&mut app, seconds(0.6));

    assert!(app.world().get::<RewardBox>(reward).is_none(), "collected box is removed");
}

#[test]
fn test_full_health_player_leaves_box_in_place() {
    let mut app = create_headless_app(2);
    let player = app.world_mut().spawn(Player).id();
    let grab = app
        .world_mut()
        .spawn((ColliderTag::PlayerGrab, Transform::default(), ChildOf(player)))
        .id();
    let reward = spawn_reward(&mut app, RewardKind::Health, ColliderTag::PlayerGrab);

    run_ticks(&mut app, 2);
    app.world_mut().send_event(SensorEvent::TriggerEntered {
        sensor: reward,
        other: grab,
    });
    run_ticks(&mut app, 1);

    assert!(audio_clips(&app).is_empty());
    run_ticks(&mut app, seconds(1.0));

    let reward = app.world().get::<RewardBox>(reward).unwrap();
    assert!(!reward.collected);
}

#[test]
fn test_water_box_refills_player_collider() {
    let mut app = create_headless_app(3);
    let player = app
        .world_mut()
        .spawn((
            Player,
            ColliderTag::Player,
            PlayerStatus {
                water: 10,
                ..default()
            },
        ))
        .id();
    let reward = spawn_reward(&mut app, RewardKind::Water, ColliderTag::Player);

    run_ticks(&mut app, 2);
    app.world_mut().send_event(SensorEvent::TriggerEntered {
        sensor: reward,
        other: player,
    });
    run_ticks(&mut app, 1);

    assert_eq!(app.world().get::<PlayerStatus>(player).unwrap().water, 100);
    assert!(audio_clips(&app).contains(&(player, "Collect Reward".to_string())));
}

#[test]
fn test_weapon_fires_then_waits_then_clicks_when_empty() {
    let mut app = create_headless_app(4);
    let player = app.world_mut().spawn((Player, Transform::default())).id();

    run_ticks(&mut app, seconds(0.5));
    app.world_mut().send_event(FireRequest { player });
    run_ticks(&mut app, 1);

    assert_eq!(app.world().get::<PlayerStatus>(player).unwrap().munition, 29);
    assert!(app.world().get::<Animator>(player).unwrap().has_trigger("Fire"));
    {
        let shots = app.world().resource::<Events<ShotFired>>();
        let mut cursor = shots.get_cursor();
        let fired: Vec<_> = cursor.read(shots).copied().collect();
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].player, player);
        assert!((fired[0].direction - Vec3::NEG_Z).length() < 1e-5);
    }

    // Следующий кадр: темп стрельбы не прошёл
    app.world_mut().send_event(FireRequest { player });
    run_ticks(&mut app, 1);
    assert_eq!(app.world().get::<PlayerStatus>(player).unwrap().munition, 29);

    app.world_mut().get_mut::<PlayerStatus>(player).unwrap().munition = 0;
    run_ticks(&mut app, seconds(0.3));
    app.world_mut().send_event(FireRequest { player });
    run_ticks(&mut app, 1);

    assert_eq!(audio_clips(&app), vec![(player, "Weapon Click".to_string())]);
    assert_eq!(app.world().get::<PlayerStatus>(player).unwrap().munition, 0);
}

#[test]
fn test_player_rides_elevator_down() {
    let mut app = create_headless_app(5);
    let elevator = app
        .world_mut()
        .spawn((Elevator::default(), Transform::from_xyz(0.0, 30.0, 0.0)))
        .id();
    app.world_mut()
        .entity_mut(elevator)
        .insert(TriggerSensor::new(elevator, ColliderTag::Player));
    let player = app.world_mut().spawn(ColliderTag::Player).id();

    run_ticks(&mut app, 2);
    app.world_mut().send_event(SensorEvent::TriggerEntered {
        sensor: elevator,
        other: player,
    });
    run_ticks(&mut app, 1);

    assert!(!app.world().get::<Elevator>(elevator).unwrap().is_stopped);
    assert!(audio_clips(&app).contains(&(elevator, "Activate Elevator".to_string())));
    assert!(app.world().get::<Transform>(elevator).unwrap().translation.y < 30.0);

    run_ticks(&mut app, seconds(3.5));

    let state = app.world().get::<Elevator>(elevator).unwrap();
    assert!(state.is_stopped);
    assert!(state.is_down);
    assert!(app.world().get::<Transform>(elevator).unwrap().translation.y <= 24.4);
}

#[test]
fn test_patrolling_pedestrian_drives_walk_animation() {
    let mut app = create_headless_app(6);
    let far = app
        .world_mut()
        .spawn((Waypoint::default(), Transform::from_xyz(0.0, 0.0, -40.0)))
        .id();
    let pedestrian = app
        .world_mut()
        .spawn((
            Pedestrian::default(),
            PatrolBehavior::starting_at(far),
            NavAgent::default(),
            Locomotion::pedestrian(),
        ))
        .id();

    run_ticks(&mut app, 2);
    app.world_mut().send_event(StateTrigger {
        entity: pedestrian,
        trigger: Trigger::PatrolDelayElapsed,
    });
    run_ticks(&mut app, seconds(1.5));

    let animator = app.world().get::<Animator>(pedestrian).unwrap();
    assert_eq!(animator.bool_param("Walk"), Some(true));
    assert!(animator.float_param("VelocityY").unwrap() > 1.0);

    app.world_mut().get_mut::<NavAgent>(pedestrian).unwrap().stop();
    run_ticks(&mut app, 1);

    let animator = app.world().get::<Animator>(pedestrian).unwrap();
    assert_eq!(animator.bool_param("Walk"), Some(false));
}
