//! Handlers для scheduled tasks состояний (StartPatrol, Brake, EnableRagdoll)

use bevy::prelude::*;
use bevy_rapier3d::prelude::RigidBody;

use crate::ai::hooks::patrol::BRAKE_DURATION;
use crate::ai::{ActorState, StateTrigger, Trigger};
use crate::components::{Animator, NavAgent, Ragdoll};
use crate::schedule::{ScheduledTasks, Task, TaskDue};

/// Система: выполнение due задач state machine
pub fn run_state_tasks(
    mut due: EventReader<TaskDue>,
    mut actors: Query<(&ActorState, Option<&mut NavAgent>, &mut ScheduledTasks)>,
    mut animators: Query<&mut Animator>,
    ragdolls: Query<&Ragdoll>,
    mut bodies: Query<&mut RigidBody>,
    mut triggers: EventWriter<StateTrigger>,
    time: Res<Time<Fixed>>,
) {
    let now = time.elapsed_secs();
    let dt = time.delta_secs();

    for TaskDue { entity, task } in due.read() {
        let Ok((state, nav, mut tasks)) = actors.get_mut(*entity) else {
            continue;
        };

        match *task {
            Task::StartPatrol => {
                // Актор мог уже уйти из Idle (паника, смерть)
                if *state == ActorState::Idle {
                    triggers.write(StateTrigger {
                        entity: *entity,
                        trigger: Trigger::PatrolDelayElapsed,
                    });
                }
            }
            Task::Brake { elapsed } => {
                let Some(mut nav) = nav else {
                    continue;
                };
                if let Some(next) = brake_step(&mut nav, elapsed, dt) {
                    tasks.schedule(now, next);
                }
            }
            Task::EnableRagdoll => {
                if let Ok(mut animator) = animators.get_mut(*entity) {
                    animator.enabled = false;
                }

                let mut released = 0;
                if let Ok(ragdoll) = ragdolls.get(*entity) {
                    for bone in &ragdoll.bodies {
                        if let Ok(mut body) = bodies.get_mut(*bone) {
                            *body = RigidBody::Dynamic;
                            released += 1;
                        }
                    }
                }
                if let Ok(mut body) = bodies.get_mut(*entity) {
                    *body = RigidBody::Dynamic;
                }

                crate::log(&format!("🦴 Ragdoll enabled for {:?} ({} bones)", entity, released));
            }
            // Обрабатываются в controllers (traffic, rewards)
            Task::CheckTraffic | Task::ConsumeReward => {}
        }
    }
}

/// Один шаг торможения. Some(next) пока агент стоит и торможение не закончено.
pub fn brake_step(nav: &mut NavAgent, elapsed: f32, dt: f32) -> Option<Task> {
    if !nav.enabled || !nav.is_stopped {
        return None;
    }

    // Время шага учитывается до lerp: первый же тик уже тормозит
    let elapsed = elapsed + dt;
    let t = (elapsed / BRAKE_DURATION).min(1.0);
    nav.velocity = nav.velocity.lerp(Vec3::ZERO, t);

    if elapsed >= BRAKE_DURATION {
        return None;
    }

    Some(Task::Brake { elapsed })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brake_reaches_zero() {
        let mut nav = NavAgent::default();
        nav.velocity = Vec3::new(3.0, 0.0, 0.0);
        nav.stop();

        let mut step = Some(Task::Brake { elapsed: 0.0 });
        let mut ticks = 0;
        while let Some(Task::Brake { elapsed }) = step {
            step = brake_step(&mut nav, elapsed, 1.0 / 60.0);
            ticks += 1;
            assert!(ticks < 200, "brake must finish");
        }

        assert_eq!(nav.velocity, Vec3::ZERO);
    }

    #[test]
    fn test_first_brake_step_slows_down() {
        let mut nav = NavAgent::default();
        nav.velocity = Vec3::new(3.0, 0.0, 0.0);
        nav.stop();

        let dt = 1.0 / 60.0;
        let next = brake_step(&mut nav, 0.0, dt);

        assert_eq!(next, Some(Task::Brake { elapsed: dt }));
        let expected = 3.0 * (1.0 - dt / BRAKE_DURATION);
        assert!((nav.velocity.x - expected).abs() < 1e-5);
        assert!(nav.velocity.x < 3.0);
    }

    #[test]
    fn test_brake_aborts_when_resumed() {
        let mut nav = NavAgent::default();
        nav.velocity = Vec3::new(3.0, 0.0, 0.0);
        nav.stop();
        nav.is_stopped = false;

        assert_eq!(brake_step(&mut nav, 0.5, 1.0 / 60.0), None);
        assert_eq!(nav.velocity, Vec3::new(3.0, 0.0, 0.0));
    }
}
