//! State hooks: таблица диспетчеризации поведения
//!
//! Каждое `ActorState` описывается четырьмя операциями:
//! - `enter`: setup при активации (кэш скорости, первая цель навигации)
//! - `update`: опрос каждый тик, пока состояние активно
//! - `exit`: teardown (остановка, восстановление скорости, торможение)
//! - `transition`: куда уходим по триггеру (None = игнорируем)
//!
//! Отсутствующий или выключенный NavAgent превращает движение в no-op.

use bevy::ecs::query::QueryData;
use bevy::prelude::*;
use rand_chacha::ChaCha8Rng;

use super::{ActorState, DieBehavior, LifecyclePhase, PanicBehavior, PatrolBehavior, StateLifecycle, Trigger, WanderBehavior};
use crate::components::{Health, NavAgent};
use crate::navigation::NavArea;
use crate::schedule::ScheduledTasks;
use crate::waypoints::WaypointGraph;

pub mod die;
pub mod idle;
pub mod panic;
pub mod patrol;
pub mod wander;

/// Всё, что state hook может читать/менять у актора
#[derive(QueryData)]
#[query_data(mutable)]
pub struct ActorQuery {
    pub entity: Entity,
    pub state: &'static mut ActorState,
    pub transform: &'static Transform,
    pub health: Option<&'static Health>,
    pub nav: Option<&'static mut NavAgent>,
    pub tasks: &'static mut ScheduledTasks,
    pub patrol: Option<&'static mut PatrolBehavior>,
    pub wander: Option<&'static WanderBehavior>,
    pub panic: Option<&'static mut PanicBehavior>,
    pub die: Option<&'static DieBehavior>,
}

impl ActorQueryItem<'_> {
    /// Alive flag (актор без Health считается живым)
    pub fn is_alive(&self) -> bool {
        self.health.map_or(true, |health| health.is_alive())
    }

    /// Агент есть, включён и стоит на цели
    pub fn has_arrived(&self) -> bool {
        self.nav
            .as_ref()
            .is_some_and(|nav| nav.enabled && nav.has_arrived())
    }

    pub fn capabilities(&self) -> Capabilities {
        Capabilities {
            patrol: self.patrol.is_some(),
            wander: self.wander.is_some(),
            panic: self.panic.is_some(),
        }
    }
}

/// Окружение hooks: граф точек, walkable area, RNG, время
pub struct StateEnv<'a, 'w, 's> {
    pub graph: &'a WaypointGraph<'w, 's>,
    pub nav_area: &'a NavArea,
    pub rng: &'a mut ChaCha8Rng,
    /// Simulation clock (секунды)
    pub now: f32,
}

/// Какие поведения доступны актору (по наличию behaviour компонентов)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub patrol: bool,
    pub wander: bool,
    pub panic: bool,
}

pub type EnterHook = fn(&mut ActorQueryItem<'_>, &mut StateEnv<'_, '_, '_>);
pub type UpdateHook = fn(&mut ActorQueryItem<'_>, &mut StateEnv<'_, '_, '_>) -> Option<Trigger>;
pub type ExitHook = fn(&mut ActorQueryItem<'_>, &mut StateEnv<'_, '_, '_>);
pub type TransitionRule = fn(&Trigger, Capabilities) -> Option<ActorState>;

pub struct StateHooks {
    pub enter: EnterHook,
    pub update: UpdateHook,
    pub exit: ExitHook,
    pub transition: TransitionRule,
}

static IDLE_HOOKS: StateHooks = StateHooks {
    enter: idle::enter,
    update: idle::update,
    exit: idle::exit,
    transition: idle::transition,
};

static PATROL_HOOKS: StateHooks = StateHooks {
    enter: patrol::enter,
    update: patrol::update,
    exit: patrol::exit,
    transition: patrol::transition,
};

static WANDER_HOOKS: StateHooks = StateHooks {
    enter: wander::enter,
    update: wander::update,
    exit: wander::exit,
    transition: wander::transition,
};

static PANIC_HOOKS: StateHooks = StateHooks {
    enter: panic::enter,
    update: panic::update,
    exit: panic::exit,
    transition: panic::transition,
};

static DIE_HOOKS: StateHooks = StateHooks {
    enter: die::enter,
    update: die::update,
    exit: die::exit,
    transition: die::transition,
};

pub fn hooks(state: ActorState) -> &'static StateHooks {
    match state {
        ActorState::Idle => &IDLE_HOOKS,
        ActorState::Patrol => &PATROL_HOOKS,
        ActorState::Wander => &WANDER_HOOKS,
        ActorState::Panic => &PANIC_HOOKS,
        ActorState::Die => &DIE_HOOKS,
    }
}

/// Следующее состояние по триггеру (None = триггер игнорируется)
///
/// Переход в текущее же состояние не считается переходом.
pub fn next_state(from: ActorState, trigger: &Trigger, capabilities: Capabilities) -> Option<ActorState> {
    (hooks(from).transition)(trigger, capabilities).filter(|to| *to != from)
}

/// Сменить состояние: exit старого → Exit event → enter нового → Enter event
pub fn change_state(
    actor: &mut ActorQueryItem<'_>,
    to: ActorState,
    env: &mut StateEnv<'_, '_, '_>,
    lifecycle: &mut EventWriter<StateLifecycle>,
) {
    let from = *actor.state;

    (hooks(from).exit)(actor, env);
    lifecycle.write(StateLifecycle {
        entity: actor.entity,
        state: from,
        phase: LifecyclePhase::Exit,
    });

    *actor.state = to;

    (hooks(to).enter)(actor, env);
    lifecycle.write(StateLifecycle {
        entity: actor.entity,
        state: to,
        phase: LifecyclePhase::Enter,
    });

    crate::log(&format!("AI: {:?} {:?} → {:?}", actor.entity, from, to));
}

/// Первичная активация состояния, с которым актор заспавнен (только enter)
pub fn activate_state(
    actor: &mut ActorQueryItem<'_>,
    env: &mut StateEnv<'_, '_, '_>,
    lifecycle: &mut EventWriter<StateLifecycle>,
) {
    let state = *actor.state;
    (hooks(state).enter)(actor, env);
    lifecycle.write(StateLifecycle {
        entity: actor.entity,
        state,
        phase: LifecyclePhase::Enter,
    });
}
