//! Опции меню настроек: списки значений и выбор по индексу
//!
//! Каждый dropdown меню = фиксированный список значений. Индекс текущего
//! значения берётся из Preferences, выбор индекса пишет значение обратно.

use super::preferences::{AudioMixer, DisplayInfo, FullScreenMode, Preferences, Resolution};

pub const LANGUAGES: [&str; 3] = ["ca", "en", "es"];

/// Громкость: вкл (0 dB) / выкл (-80 dB)
pub const VOLUME_LEVELS: [f32; 2] = [0.0, -80.0];

pub const FULLSCREEN_MODES: [FullScreenMode; 2] = [FullScreenMode::FullScreenWindow, FullScreenMode::Windowed];

pub fn language_index(preferences: &Preferences) -> Option<usize> {
    LANGUAGES.iter().position(|code| *code == preferences.locale_code())
}

pub fn select_language(preferences: &mut Preferences, index: usize) -> bool {
    let Some(code) = LANGUAGES.get(index) else {
        return false;
    };
    preferences.set_locale_code(code);
    true
}

pub fn volume_index(preferences: &Preferences, group: &str) -> Option<usize> {
    let volume = preferences.audio_volume(group);
    VOLUME_LEVELS.iter().position(|level| *level == volume)
}

pub fn select_volume(preferences: &mut Preferences, mixer: &mut AudioMixer, group: &str, index: usize) -> bool {
    let Some(volume) = VOLUME_LEVELS.get(index) else {
        return false;
    };
    preferences.set_audio_volume(mixer, group, *volume);
    true
}

/// Индекс режима окна; None если дисплей не сообщает разрешений (меню скрыто)
pub fn fullscreen_index(preferences: &Preferences, display: &DisplayInfo) -> Option<usize> {
    if display.resolutions.is_empty() {
        return None;
    }
    let mode = preferences.full_screen_mode(display);
    FULLSCREEN_MODES.iter().position(|m| *m == mode)
}

pub fn select_fullscreen(preferences: &mut Preferences, display: &mut DisplayInfo, index: usize) -> bool {
    let Some(mode) = FULLSCREEN_MODES.get(index) else {
        return false;
    };
    preferences.set_full_screen_mode(display, *mode);
    true
}

/// Список разрешений для меню
#[derive(Debug, Clone, PartialEq)]
pub struct ResolutionOptions {
    pub resolutions: Vec<Resolution>,
    pub labels: Vec<String>,
    /// Индекс сохранённого разрешения (None если его нет в списке)
    pub selected: Option<usize>,
}

impl ResolutionOptions {
    /// None если дисплей не сообщает разрешений (меню скрыто)
    pub fn build(preferences: &Preferences, display: &DisplayInfo) -> Option<Self> {
        if display.resolutions.is_empty() {
            return None;
        }

        let current = preferences.resolution(display);
        let resolutions = preferences.screen_resolutions(display);
        let labels = resolutions.iter().map(ToString::to_string).collect();
        let selected = current.and_then(|c| resolutions.iter().position(|r| *r == c));

        Some(Self {
            resolutions,
            labels,
            selected,
        })
    }

    pub fn select(&mut self, preferences: &mut Preferences, display: &mut DisplayInfo, index: usize) -> bool {
        let Some(resolution) = self.resolutions.get(index) else {
            return false;
        };
        preferences.set_resolution(display, *resolution);
        self.selected = Some(index);
        true
    }
}
