//! Interactive level elements (zombie title)

use bevy::prelude::*;

use crate::SimulationSet;

pub mod elevator;

pub use elevator::Elevator;

pub struct ElementsPlugin;

impl Plugin for ElementsPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<Elevator>()
            .add_systems(
                FixedUpdate,
                elevator::activate_elevators
                    .after(crate::controllers::events::route_sensor_events)
                    .in_set(SimulationSet::Sensing),
            )
            .add_systems(FixedUpdate, elevator::move_elevators.in_set(SimulationSet::Motion));
    }
}
