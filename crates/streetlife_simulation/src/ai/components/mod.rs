//! AI components

pub mod state;


// Re-export all components
pub use state::*;
