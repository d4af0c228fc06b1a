//! Controllers: связка сообщений хоста с state machine
//!
//! - pedestrian: отложенный патруль, паника от монстров, смерть от урона/машин
//! - vehicle: отложенный патруль, торможение по traffic сенсору
//! - monster: блуждание, урон по Health
//! - player: урон, смерть, запасы, попадания выстрелов по акторам
//! - weapon: темп стрельбы, патроны, щелчок вхолостую
//! - rewards: аптечки и вода на уровне
//!
//! Архитектура: хост пишет SensorEvent/DamageEvent/ShotImpact, контроллеры
//! отвечают StateTrigger (для FSM) и cue событиями (для presentation).

use bevy::prelude::*;
use rand::Rng;

use crate::ai::{StateTrigger, Trigger};
use crate::components::{Animator, Health};
use crate::schedule::{ScheduledTasks, Task};
use crate::{DeterministicRng, SimulationSet};

pub mod events;
pub mod monster;
pub mod pedestrian;
pub mod player;
pub mod rewards;
pub mod traffic;
pub mod vehicle;
pub mod weapon;

pub use events::*;
pub use monster::Monster;
pub use pedestrian::Pedestrian;
pub use player::{Player, PlayerStatus};
pub use rewards::{RewardBox, RewardKind};
pub use traffic::TrafficSensor;
pub use vehicle::Vehicle;
pub use weapon::Weapon;

/// Диапазон случайной задержки старта патруля (секунды)
pub const PATROL_START_DELAY: (f32, f32) = (0.5, 5.0);

/// Controllers Plugin
///
/// Все системы в SimulationSet::Sensing, последовательно:
/// 1. route_sensor_events: сырые trigger события → SensorSignal
/// 2. старт поведения (отложенный патруль, блуждание)
/// 3. сенсоры (монстры рядом, наезд машины, награды)
/// 4. выстрелы игрока и их попадания
/// 5. урон по типам акторов
/// 6. traffic сенсоры машин, удаление подобранных наград
///
/// Задачи FSM (`run_state_tasks`) идут до цепочки, лифты после роутинга.
pub struct ControllersPlugin;

impl Plugin for ControllersPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<SensorEvent>()
            .add_event::<SensorSignal>()
            .add_event::<DamageEvent>()
            .add_event::<FireRequest>()
            .add_event::<ShotFired>()
            .add_event::<ShotImpact>()
            .add_event::<AudioCue>()
            .add_event::<EffectCue>()
            .add_event::<PlayerDamaged>()
            .add_event::<PlayerKilled>()
            .register_type::<TriggerSensor>()
            .register_type::<Pedestrian>()
            .register_type::<Vehicle>()
            .register_type::<Monster>()
            .register_type::<Player>()
            .register_type::<PlayerStatus>()
            .register_type::<Weapon>()
            .register_type::<RewardBox>()
            .register_type::<TrafficSensor>();

        app.add_systems(
            FixedUpdate,
            (
                events::route_sensor_events,
                schedule_patrol_start,
                monster::start_wandering,
                traffic::start_traffic_checks,
                pedestrian::alert_on_monsters,
                pedestrian::knock_down_by_cars,
                rewards::collect_rewards,
                weapon::fire_weapons,
                player::damage_shot_actors,
                pedestrian::apply_pedestrian_damage,
                monster::apply_monster_damage,
                player::apply_player_damage,
                traffic::check_traffic,
                rewards::consume_rewards,
            )
                .chain()
                .in_set(SimulationSet::Sensing),
        );
    }
}

/// Случайная задержка старта патруля
pub fn patrol_start_delay<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.gen_range(PATROL_START_DELAY.0..=PATROL_START_DELAY.1)
}

/// Система: свежие пешеходы/машины с patrol_on_start → Task::StartPatrol
pub fn schedule_patrol_start(
    mut pedestrians: Query<(&Pedestrian, &mut ScheduledTasks), Added<Pedestrian>>,
    mut vehicles: Query<(&Vehicle, &mut ScheduledTasks), (Added<Vehicle>, Without<Pedestrian>)>,
    mut rng: ResMut<DeterministicRng>,
    time: Res<Time<Fixed>>,
) {
    let now = time.elapsed_secs();

    let pedestrians = pedestrians
        .iter_mut()
        .filter(|(pedestrian, _)| pedestrian.patrol_on_start)
        .map(|(_, tasks)| tasks);
    let vehicles = vehicles
        .iter_mut()
        .filter(|(vehicle, _)| vehicle.patrol_on_start)
        .map(|(_, tasks)| tasks);

    for mut tasks in pedestrians.chain(vehicles) {
        let delay = patrol_start_delay(&mut rng.rng);
        tasks.schedule_after(now, delay, Task::StartPatrol);
    }
}

/// Убить актора: Health → 0, LethalDamage в FSM, анимация "Die"
///
/// false если актор уже мёртв (повторный kill: no-op).
pub fn kill_actor(
    entity: Entity,
    health: &mut Health,
    animator: Option<&mut Animator>,
    triggers: &mut EventWriter<StateTrigger>,
) -> bool {
    if !health.is_alive() {
        return false;
    }

    health.kill();
    triggers.write(StateTrigger {
        entity,
        trigger: Trigger::LethalDamage,
    });

    if let Some(animator) = animator {
        animator.set_trigger("Die");
    }

    true
}
