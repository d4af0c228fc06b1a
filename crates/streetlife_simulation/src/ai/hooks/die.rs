//! Die: терминальное состояние
//!
//! Навигация выключается сразу, ragdoll включается по Task::EnableRagdoll
//! через `ragdoll_delay`. Выхода нет: transition игнорирует всё.

use super::{ActorQueryItem, Capabilities, StateEnv};
use crate::ai::{ActorState, DieBehavior, Trigger};
use crate::schedule::Task;

pub fn enter(actor: &mut ActorQueryItem<'_>, env: &mut StateEnv<'_, '_, '_>) {
    if let Some(nav) = actor.nav.as_mut() {
        nav.disable();
    }

    let delay = actor.die.map_or(DieBehavior::default().ragdoll_delay, |die| die.ragdoll_delay);
    actor.tasks.schedule_after(env.now, delay, Task::EnableRagdoll);

    crate::log(&format!("💀 {:?} died, ragdoll in {:.1}s", actor.entity, delay));
}

pub fn update(_actor: &mut ActorQueryItem<'_>, _env: &mut StateEnv<'_, '_, '_>) -> Option<Trigger> {
    None
}

pub fn exit(_actor: &mut ActorQueryItem<'_>, _env: &mut StateEnv<'_, '_, '_>) {}

pub fn transition(_trigger: &Trigger, _capabilities: Capabilities) -> Option<ActorState> {
    None
}
