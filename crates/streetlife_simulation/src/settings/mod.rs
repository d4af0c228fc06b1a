//! Settings: настройки игрока (язык, экран, громкость)
//!
//! - store: SettingsStore backends (память, JSON файл)
//! - preferences: Preferences resource + AudioMixer / DisplayInfo
//! - options: значения пунктов меню настроек

use bevy::prelude::*;

pub mod options;
pub mod preferences;
pub mod store;

pub use preferences::{
    apply_volume_preferences, system_locale, AudioMixer, DisplayInfo, FullScreenMode, Preferences, Resolution,
};
pub use store::{JsonFileStore, MemoryStore, SettingValue, SettingsError, SettingsStore};

/// Settings Plugin
///
/// Preferences сюда не входят: приложение создаёт их явно (namespace +
/// store) и вставляет ресурсом до запуска.
pub struct SettingsPlugin;

impl Plugin for SettingsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AudioMixer>()
            .init_resource::<DisplayInfo>()
            .register_type::<DisplayInfo>()
            .add_systems(Startup, apply_volume_preferences);
    }
}
