//! AI Events: входы и выходы state machine
//!
//! Sensor/damage/task handlers → StateTrigger → apply_state_triggers
//! apply_state_triggers → StateLifecycle (Exit старого, затем Enter нового)

use bevy::prelude::*;

use super::ActorState;

/// Причина перехода
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Trigger {
    /// Случайная задержка старта патруля истекла
    PatrolDelayElapsed,
    /// Монстр начинает бродить
    StartWandering,
    /// Proximity сенсор заметил монстра
    MonsterSensed,
    /// Паникующий актор добежал до убежища
    SafepointReached { waypoint: Entity },
    /// Смертельный урон
    LethalDamage,
}

#[derive(Event, Debug, Clone)]
pub struct StateTrigger {
    pub entity: Entity,
    pub trigger: Trigger,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecyclePhase {
    Exit,
    Enter,
}

/// Событие: hook жизненного цикла состояния отработал
#[derive(Event, Debug, Clone, PartialEq)]
pub struct StateLifecycle {
    pub entity: Entity,
    pub state: ActorState,
    pub phase: LifecyclePhase,
}
