//! Preferences: настройки игрока поверх SettingsStore
//!
//! Явно создаваемый Resource (никаких глобальных инстансов): приложение
//! строит `Preferences::new(namespace, store)` и вставляет в World.
//! Ключи хранятся как "{namespace}.{key}".

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use super::store::{Result, SettingsStore};

pub const LOCALE_KEY: &str = "locale.code";
pub const SCREEN_MODE_KEY: &str = "screen.mode";
pub const SCREEN_WIDTH_KEY: &str = "screen.width";
pub const SCREEN_HEIGHT_KEY: &str = "screen.height";
pub const REFRESH_RATE_KEY: &str = "screen.refreshRate";

/// Группы микшера, громкость которых применяется на старте
pub const STARTUP_VOLUME_GROUPS: [&str; 2] = ["music.volume", "effects.volume"];

pub const DEFAULT_LOCALE: &str = "en";

/// Режим окна (нумерация совпадает с хостом)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Reflect)]
pub enum FullScreenMode {
    ExclusiveFullScreen = 0,
    FullScreenWindow = 1,
    MaximizedWindow = 2,
    Windowed = 3,
}

impl FullScreenMode {
    pub fn from_index(index: i64) -> Option<Self> {
        match index {
            0 => Some(Self::ExclusiveFullScreen),
            1 => Some(Self::FullScreenWindow),
            2 => Some(Self::MaximizedWindow),
            3 => Some(Self::Windowed),
            _ => None,
        }
    }

    pub fn index(self) -> i64 {
        self as i64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Reflect)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
    pub refresh_rate: u32,
}

impl Resolution {
    pub fn new(width: u32, height: u32, refresh_rate: u32) -> Self {
        Self {
            width,
            height,
            refresh_rate,
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {} @ {}Hz", self.width, self.height, self.refresh_rate)
    }
}

/// Состояние дисплея хоста (источник fallback значений)
#[derive(Resource, Debug, Clone, Reflect)]
#[reflect(Resource)]
pub struct DisplayInfo {
    pub current: Resolution,
    pub mode: FullScreenMode,
    /// Поддерживаемые разрешения (порядок хоста)
    pub resolutions: Vec<Resolution>,
}

impl Default for DisplayInfo {
    fn default() -> Self {
        Self {
            current: Resolution::new(1920, 1080, 60),
            mode: FullScreenMode::FullScreenWindow,
            resolutions: Vec::new(),
        }
    }
}

impl DisplayInfo {
    pub fn is_fullscreen(&self) -> bool {
        self.mode != FullScreenMode::Windowed
    }
}

/// Параметры аудио микшера (громкость групп в dB)
#[derive(Resource, Debug, Clone, Default)]
pub struct AudioMixer {
    params: HashMap<String, f32>,
}

impl AudioMixer {
    pub fn set_float(&mut self, name: &str, value: f32) {
        self.params.insert(name.to_string(), value);
    }

    pub fn get_float(&self, name: &str) -> Option<f32> {
        self.params.get(name).copied()
    }
}

#[derive(Resource)]
pub struct Preferences {
    namespace: String,
    store: Box<dyn SettingsStore>,
    locale_code: String,
    /// Смена языка, ещё не разосланная как LocaleChanged
    pending_locale: Option<String>,
}

impl Preferences {
    /// Создать настройки; язык читается сразу (fallback: язык системы)
    pub fn new(namespace: impl Into<String>, store: impl SettingsStore + 'static) -> Self {
        let mut preferences = Self {
            namespace: namespace.into(),
            store: Box::new(store),
            locale_code: DEFAULT_LOCALE.to_string(),
            pending_locale: None,
        };
        preferences.load_locale(&system_locale());
        preferences
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Полное имя ключа
    pub fn key(&self, key: &str) -> String {
        format!("{}.{}", self.namespace, key)
    }

    fn load_locale(&mut self, fallback: &str) {
        self.locale_code = self.store.get_string(&self.key(LOCALE_KEY), fallback);
    }

    pub fn locale_code(&self) -> &str {
        &self.locale_code
    }

    pub fn set_locale_code(&mut self, code: &str) {
        self.locale_code = code.to_string();
        let key = self.key(LOCALE_KEY);
        self.store.set_string(&key, code);
        self.pending_locale = Some(code.to_string());
    }

    /// Забрать неразосланную смену языка
    pub fn take_locale_change(&mut self) -> Option<String> {
        self.pending_locale.take()
    }

    pub fn full_screen_mode(&self, display: &DisplayInfo) -> FullScreenMode {
        let fallback = display.mode.index();
        let value = self.store.get_int(&self.key(SCREEN_MODE_KEY), fallback);
        FullScreenMode::from_index(value).unwrap_or(display.mode)
    }

    pub fn set_full_screen_mode(&mut self, display: &mut DisplayInfo, mode: FullScreenMode) {
        display.mode = mode;
        let key = self.key(SCREEN_MODE_KEY);
        self.store.set_int(&key, mode.index());
    }

    /// Громкость группы (dB), по умолчанию 0
    pub fn audio_volume(&self, group: &str) -> f32 {
        self.store.get_float(&self.key(&format!("audio.{}", group)), 0.0)
    }

    pub fn set_audio_volume(&mut self, mixer: &mut AudioMixer, group: &str, volume: f32) {
        mixer.set_float(group, volume);
        let key = self.key(&format!("audio.{}", group));
        self.store.set_float(&key, volume);
    }

    pub fn screen_width(&self, display: &DisplayInfo) -> u32 {
        self.stored_dimension(SCREEN_WIDTH_KEY, display.current.width)
    }

    pub fn screen_height(&self, display: &DisplayInfo) -> u32 {
        self.stored_dimension(SCREEN_HEIGHT_KEY, display.current.height)
    }

    pub fn refresh_rate(&self, display: &DisplayInfo) -> u32 {
        self.stored_dimension(REFRESH_RATE_KEY, display.current.refresh_rate)
    }

    fn stored_dimension(&self, key: &str, fallback: u32) -> u32 {
        let value = self.store.get_int(&self.key(key), fallback as i64);
        u32::try_from(value).unwrap_or(fallback)
    }

    /// Поддерживаемые разрешения: ширина по убыванию, затем высота по убыванию
    pub fn screen_resolutions(&self, display: &DisplayInfo) -> Vec<Resolution> {
        let mut resolutions = display.resolutions.clone();
        resolutions.sort_by(|a, b| b.width.cmp(&a.width).then(b.height.cmp(&a.height)));
        resolutions
    }

    /// Сохранённое разрешение, если дисплей его поддерживает
    ///
    /// Текущее разрешение хоста на некоторых платформах врёт, поэтому
    /// источник истины: сохранённые width/height/refresh rate.
    pub fn resolution(&self, display: &DisplayInfo) -> Option<Resolution> {
        let wanted = Resolution::new(
            self.screen_width(display),
            self.screen_height(display),
            self.refresh_rate(display),
        );
        display.resolutions.iter().copied().find(|r| *r == wanted)
    }

    pub fn set_resolution(&mut self, display: &mut DisplayInfo, resolution: Resolution) {
        display.current = resolution;

        let width = self.key(SCREEN_WIDTH_KEY);
        let height = self.key(SCREEN_HEIGHT_KEY);
        let refresh_rate = self.key(REFRESH_RATE_KEY);
        self.store.set_int(&width, resolution.width as i64);
        self.store.set_int(&height, resolution.height as i64);
        self.store.set_int(&refresh_rate, resolution.refresh_rate as i64);
    }

    pub fn save(&self) -> Result<()> {
        self.store.save()
    }
}

/// Двухбуквенный код языка системы (LC_ALL / LANG), "en" если не определить
pub fn system_locale() -> String {
    let value = std::env::var("LC_ALL")
        .ok()
        .filter(|v| !v.is_empty())
        .or_else(|| std::env::var("LANG").ok());
    locale_code_from(value.as_deref())
}

/// "es_ES.UTF-8" → "es"
pub fn locale_code_from(value: Option<&str>) -> String {
    value
        .map(|v| v.split(['_', '.', '-']).next().unwrap_or_default().to_lowercase())
        .filter(|code| code.len() == 2 && code.chars().all(|c| c.is_ascii_alphabetic()))
        .unwrap_or_else(|| DEFAULT_LOCALE.to_string())
}

/// Система (Startup): применить сохранённую громкость групп к микшеру
pub fn apply_volume_preferences(preferences: Option<Res<Preferences>>, mut mixer: ResMut<AudioMixer>) {
    let Some(preferences) = preferences else {
        return;
    };

    for group in STARTUP_VOLUME_GROUPS {
        mixer.set_float(group, preferences.audio_volume(group));
    }
}
