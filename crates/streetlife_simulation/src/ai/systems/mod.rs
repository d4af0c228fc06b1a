//! AI systems (state machine driver + task handlers)

pub mod fsm;
pub mod tasks;

pub use fsm::*;
pub use tasks::*;
