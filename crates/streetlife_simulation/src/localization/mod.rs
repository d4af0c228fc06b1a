//! Localization: тексты и списки опций UI по коду языка
//!
//! Preferences::set_locale_code → publish_locale_changes → LocaleChanged →
//! refresh систем. Пустой или отсутствующий перевод оставляет текущий текст.

use bevy::prelude::*;
use std::collections::BTreeMap;

use crate::settings::Preferences;

/// Событие: пользователь сменил язык
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct LocaleChanged {
    pub code: String,
}

/// Переводы одной строки UI ("ca" / "en" / "es" → текст)
#[derive(Component, Debug, Clone, Default)]
#[require(DisplayText)]
pub struct LocalizedText {
    pub translations: BTreeMap<String, String>,
}

impl LocalizedText {
    pub fn with(mut self, locale: &str, text: &str) -> Self {
        self.translations.insert(locale.to_string(), text.to_string());
        self
    }

    /// Текст для языка; None если перевода нет или он пустой
    pub fn translate(&self, locale: &str) -> Option<String> {
        self.translations
            .get(locale)
            .filter(|text| !text.is_empty())
            .map(|text| text.replace("\\n", "\n"))
    }
}

/// Текущий показываемый текст (читает presentation слой)
#[derive(Component, Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayText(pub String);

/// Переводы списка опций dropdown
#[derive(Component, Debug, Clone, Default)]
#[require(DropdownOptions)]
pub struct LocalizedOptions {
    pub translations: BTreeMap<String, Vec<String>>,
}

impl LocalizedOptions {
    pub fn with(mut self, locale: &str, options: &[&str]) -> Self {
        self.translations
            .insert(locale.to_string(), options.iter().map(|o| o.to_string()).collect());
        self
    }

    pub fn translate(&self, locale: &str) -> Option<&[String]> {
        self.translations
            .get(locale)
            .filter(|options| !options.is_empty())
            .map(Vec::as_slice)
    }
}

#[derive(Component, Debug, Clone, Default, PartialEq, Eq)]
pub struct DropdownOptions(pub Vec<String>);

pub struct LocalizationPlugin;

impl Plugin for LocalizationPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<LocaleChanged>().add_systems(
            Update,
            (
                publish_locale_changes,
                localize_new_elements,
                refresh_localized_elements,
            )
                .chain(),
        );
    }
}

/// Система: отложенная смена языка из Preferences → LocaleChanged
pub fn publish_locale_changes(preferences: Option<ResMut<Preferences>>, mut changed: EventWriter<LocaleChanged>) {
    let Some(mut preferences) = preferences else {
        return;
    };

    if let Some(code) = preferences.take_locale_change() {
        crate::log_info(&format!("🌐 Locale changed: {}", code));
        changed.write(LocaleChanged { code });
    }
}

/// Система: новые элементы UI сразу получают текст текущего языка
pub fn localize_new_elements(
    preferences: Option<Res<Preferences>>,
    mut texts: Query<(&LocalizedText, &mut DisplayText), Added<LocalizedText>>,
    mut options: Query<(&LocalizedOptions, &mut DropdownOptions), Added<LocalizedOptions>>,
) {
    let Some(preferences) = preferences else {
        return;
    };

    apply_locale(preferences.locale_code(), texts.iter_mut(), options.iter_mut());
}

/// Система: LocaleChanged → обновить все тексты и опции
pub fn refresh_localized_elements(
    mut changed: EventReader<LocaleChanged>,
    mut texts: Query<(&LocalizedText, &mut DisplayText)>,
    mut options: Query<(&LocalizedOptions, &mut DropdownOptions)>,
) {
    // Важен только последний выбор за кадр
    let Some(event) = changed.read().last() else {
        return;
    };

    apply_locale(&event.code, texts.iter_mut(), options.iter_mut());
}

fn apply_locale<'a>(
    locale: &str,
    texts: impl Iterator<Item = (&'a LocalizedText, Mut<'a, DisplayText>)>,
    options: impl Iterator<Item = (&'a LocalizedOptions, Mut<'a, DropdownOptions>)>,
) {
    for (localized, mut display) in texts {
        if let Some(text) = localized.translate(locale) {
            display.0 = text;
        }
    }

    for (localized, mut dropdown) in options {
        if let Some(translated) = localized.translate(locale) {
            dropdown.0 = translated.to_vec();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_replaces_escaped_newlines() {
        let text = LocalizedText::default().with("en", "Game Over\\nTry again");
        assert_eq!(text.translate("en").as_deref(), Some("Game Over\nTry again"));
    }

    #[test]
    fn test_missing_or_empty_translation() {
        let text = LocalizedText::default().with("en", "Play").with("ca", "");
        assert_eq!(text.translate("ca"), None);
        assert_eq!(text.translate("fr"), None);
    }

    #[test]
    fn test_locale_change_refreshes_ui() {
        let mut app = App::new();
        app.add_plugins(LocalizationPlugin);

        let label = app
            .world_mut()
            .spawn(LocalizedText::default().with("en", "Play").with("es", "Jugar"))
            .id();
        let dropdown = app
            .world_mut()
            .spawn(LocalizedOptions::default().with("en", &["On", "Off"]).with("ca", &[]))
            .id();

        app.world_mut().send_event(LocaleChanged { code: "es".into() });
        app.update();
        assert_eq!(app.world().get::<DisplayText>(label), Some(&DisplayText("Jugar".into())));
        // Нет испанских опций → список не тронут
        assert_eq!(app.world().get::<DropdownOptions>(dropdown), Some(&DropdownOptions::default()));

        app.world_mut().send_event(LocaleChanged { code: "en".into() });
        app.update();
        assert_eq!(
            app.world().get::<DropdownOptions>(dropdown),
            Some(&DropdownOptions(vec!["On".into(), "Off".into()]))
        );
    }
}
