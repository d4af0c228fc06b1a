//! Animator: хранилище параметров анимации (trigger/bool/float)
//!
//! Blending делает хост, симуляция только выставляет параметры.

use bevy::prelude::*;
use std::collections::HashMap;

#[derive(Component, Debug, Clone)]
pub struct Animator {
    pub enabled: bool,
    /// Триггеры, ещё не забранные хостом (в порядке установки)
    triggers: Vec<String>,
    bools: HashMap<String, bool>,
    floats: HashMap<String, f32>,
}

impl Default for Animator {
    fn default() -> Self {
        Self {
            enabled: true,
            triggers: Vec::new(),
            bools: HashMap::new(),
            floats: HashMap::new(),
        }
    }
}

impl Animator {
    pub fn set_trigger(&mut self, name: impl Into<String>) {
        self.triggers.push(name.into());
    }

    pub fn set_bool(&mut self, name: impl Into<String>, value: bool) {
        self.bools.insert(name.into(), value);
    }

    pub fn set_float(&mut self, name: impl Into<String>, value: f32) {
        self.floats.insert(name.into(), value);
    }

    pub fn bool_param(&self, name: &str) -> Option<bool> {
        self.bools.get(name).copied()
    }

    pub fn float_param(&self, name: &str) -> Option<f32> {
        self.floats.get(name).copied()
    }

    pub fn has_trigger(&self, name: &str) -> bool {
        self.triggers.iter().any(|t| t == name)
    }

    /// Хост забирает накопленные триггеры (consume semantics)
    pub fn take_triggers(&mut self) -> Vec<String> {
        std::mem::take(&mut self.triggers)
    }
}
