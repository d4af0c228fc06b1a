//! Scheduled tasks: кооперативные многокадровые routines
//!
//! Вместо корутин хоста: каждая задача имеет явный due time (секунды
//! simulation clock) и живёт в компоненте `ScheduledTasks` владельца.
//!
//! Отмена:
//! - despawn entity → компонент уничтожается вместе с задачами
//! - `Suspended` маркер (объект выключен) → pending задачи молча отбрасываются
//!
//! "Yield до следующего тика" = schedule(now, ..): задача станет due на
//! следующем проходе `collect_due_tasks`.

use bevy::prelude::*;

use crate::SimulationSet;

/// Планировщик задач: abort выключенных → сбор due задач
pub struct TaskSchedulerPlugin;

impl Plugin for TaskSchedulerPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<TaskDue>().add_systems(
            FixedUpdate,
            (abort_suspended_tasks, collect_due_tasks)
                .chain()
                .in_set(SimulationSet::Scheduling),
        );
    }
}

/// Виды отложенных routines
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Task {
    /// Idle → Patrol после случайной задержки (если актор всё ещё Idle)
    StartPatrol,
    /// Плавное торможение агента после остановки патруля
    Brake { elapsed: f32 },
    /// Ragdoll handoff после смерти
    EnableRagdoll,
    /// Периодический опрос traffic сенсора машины
    CheckTraffic,
    /// Подобранная награда исчезает со сцены
    ConsumeReward,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledTask {
    pub due_at: f32,
    pub task: Task,
}

/// Очередь задач одного владельца
#[derive(Component, Debug, Clone, Default)]
pub struct ScheduledTasks {
    pending: Vec<ScheduledTask>,
}

impl ScheduledTasks {
    pub fn schedule(&mut self, due_at: f32, task: Task) {
        self.pending.push(ScheduledTask { due_at, task });
    }

    pub fn schedule_after(&mut self, now: f32, delay: f32, task: Task) {
        self.schedule(now + delay.max(0.0), task);
    }

    /// Забрать все задачи с due_at ≤ now (в порядке постановки)
    pub fn take_due(&mut self, now: f32) -> Vec<Task> {
        let mut due = Vec::new();
        self.pending.retain(|scheduled| {
            if scheduled.due_at <= now {
                due.push(scheduled.task);
                false
            } else {
                true
            }
        });
        due
    }

    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn contains(&self, predicate: impl Fn(&Task) -> bool) -> bool {
        self.pending.iter().any(|scheduled| predicate(&scheduled.task))
    }
}

/// Маркер: владелец выключен, его routines не выполняются
#[derive(Component, Debug, Default)]
pub struct Suspended;

/// Событие: задача стала due (читают handler-системы по виду задачи)
#[derive(Event, Debug, Clone)]
pub struct TaskDue {
    pub entity: Entity,
    pub task: Task,
}

/// Система: выключение объекта молча обрывает его pending routines
pub fn abort_suspended_tasks(mut suspended: Query<&mut ScheduledTasks, Added<Suspended>>) {
    for mut tasks in suspended.iter_mut() {
        if !tasks.is_empty() {
            crate::log(&format!("⏹️ Suspended owner: dropping {} pending tasks", tasks.len()));
            tasks.cancel_all();
        }
    }
}

/// Система: due задачи → TaskDue события
pub fn collect_due_tasks(
    mut owners: Query<(Entity, &mut ScheduledTasks), Without<Suspended>>,
    mut due_events: EventWriter<TaskDue>,
    time: Res<Time<Fixed>>,
) {
    let now = time.elapsed_secs();

    for (entity, mut tasks) in owners.iter_mut() {
        // Не трогаем компонент (change detection), если нечего забирать
        if tasks.is_empty() {
            continue;
        }

        for task in tasks.take_due(now) {
            due_events.write(TaskDue { entity, task });
        }
    }
}
