//! The assembled controller model handed to the rendering runtime.

use anyhow::Result;
use serde::Serialize;
use std::fmt;

use super::app::{App, AppKind, FontSet};
use super::entity::EntityHandle;
use super::period::TimePeriod;

/// Language of built-in labels (idle screen, media player states).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English
    #[default]
    En,
    /// French
    Fr,
}

impl Language {
    /// Every supported language.
    pub const ALL: [Self; 2] = [Self::En, Self::Fr];

    /// Parses a language tag (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns an error if the tag is not one of the supported languages.
    pub fn from_tag(tag: &str) -> Result<Self> {
        let tag = tag.trim().to_ascii_lowercase();
        if let Some(language) = Self::ALL.into_iter().find(|l| l.tag() == tag) {
            return Ok(language);
        }
        let supported: Vec<_> = Self::ALL.iter().map(|l| l.tag()).collect();
        anyhow::bail!(
            "Unknown language '{tag}'. Supported: {}",
            supported.join(", ")
        )
    }

    /// Language tag.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Fr => "fr",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Non-owning reference from an app back to its controller.
///
/// Holds the controller's identifier only; resolve it through
/// [`Controller::resolve`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ControllerRef(String);

impl ControllerRef {
    /// Identifier of the referenced controller.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.0
    }
}

/// Hardware inputs and output the menu is attached to.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Peripherals {
    /// Display reference
    pub display: String,
    /// Touchscreen reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub touchscreen: Option<String>,
    /// Rotary encoder reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoder: Option<String>,
    /// Push button reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button: Option<String>,
}

/// Controller-wide settings, fixed before any app is added.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuSettings {
    /// Controller identifier
    pub id: String,
    /// Attached hardware
    pub peripherals: Peripherals,
    /// Circle radius in pixels
    pub radius: u16,
    /// Unfocused button diameter
    pub button_size: u16,
    /// Focused button diameter
    pub button_size_focused: u16,
    /// Inactivity delay before the idle screen
    pub idle_timeout: TimePeriod,
    /// Label language
    pub language: Language,
    /// Custom fonts
    pub fonts: FontSet,
    /// Clock for the idle screen
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_source: Option<EntityHandle>,
}

/// Final aggregate: settings plus the ordered app sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Controller {
    /// Input group the app buttons are registered in
    pub group_name: String,
    /// Controller-wide settings
    #[serde(flatten)]
    pub settings: MenuSettings,
    apps: Vec<App>,
}

impl Controller {
    /// Creates a controller with no apps.
    pub fn new(settings: MenuSettings, group_name: impl Into<String>) -> Self {
        Self {
            group_name: group_name.into(),
            settings,
            apps: Vec::new(),
        }
    }

    /// Reference apps can hold to reach this controller.
    #[must_use]
    pub fn reference(&self) -> ControllerRef {
        ControllerRef(self.settings.id.clone())
    }

    /// Returns this controller if `reference` points at it.
    #[must_use]
    pub fn resolve(&self, reference: &ControllerRef) -> Option<&Self> {
        (reference.0 == self.settings.id).then_some(self)
    }

    /// Appends an app to the render order.
    pub fn add_app(&mut self, app: App) {
        self.apps.push(app);
    }

    /// Apps in render order.
    #[must_use]
    pub fn apps(&self) -> &[App] {
        &self.apps
    }

    /// App at the given index.
    #[must_use]
    pub fn app(&self, index: usize) -> Option<&App> {
        self.apps.get(index)
    }

    /// Number of apps.
    #[must_use]
    pub fn app_count(&self) -> usize {
        self.apps.len()
    }

    /// Controller language.
    #[must_use]
    pub const fn language(&self) -> Language {
        self.settings.language
    }

    /// Language a media player app renders its labels in, looked up through
    /// its controller reference. `None` for other app types or a dangling
    /// reference.
    #[must_use]
    pub fn label_language(&self, app: &App) -> Option<Language> {
        match &app.kind {
            AppKind::MediaPlayer(payload) => payload
                .controller
                .as_ref()
                .and_then(|reference| self.resolve(reference))
                .map(Self::language),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(id: &str) -> MenuSettings {
        MenuSettings {
            id: id.to_string(),
            peripherals: Peripherals {
                display: "round_display".to_string(),
                ..Peripherals::default()
            },
            radius: 85,
            button_size: 50,
            button_size_focused: 58,
            idle_timeout: TimePeriod::from_millis(30_000).unwrap(),
            language: Language::Fr,
            fonts: FontSet::default(),
            time_source: None,
        }
    }

    #[test]
    fn test_language_tags() {
        assert_eq!(Language::from_tag("FR").unwrap(), Language::Fr);
        assert_eq!(Language::from_tag("en").unwrap(), Language::En);
        let error = Language::from_tag("de").unwrap_err();
        assert_eq!(error.to_string(), "Unknown language 'de'. Supported: en, fr");
        assert_eq!(Language::default(), Language::En);
    }

    #[test]
    fn test_reference_resolves_only_to_owner() {
        let controller = Controller::new(settings("dial_menu"), "dial_menu_group");
        let other = Controller::new(settings("other_menu"), "dial_menu_group");

        let reference = controller.reference();
        assert_eq!(reference.id(), "dial_menu");
        assert!(controller.resolve(&reference).is_some());
        assert!(other.resolve(&reference).is_none());
    }
}
