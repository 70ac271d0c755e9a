//! Closed icon symbol table.
//!
//! Each icon key maps to a FontAwesome glyph from the rendering runtime's
//! built-in symbol font. Some keys are aliases that share a glyph.

use serde::{Serialize, Serializer};
use std::fmt;

/// Icon key accepted in an app declaration.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Icon {
    /// No glyph
    #[default]
    None,
    Settings,
    Wifi,
    Bluetooth,
    Brightness,
    Home,
    Music,
    Timer,
    Temperature,
    Power,
    Light,
    Fan,
    Lock,
    Play,
    Pause,
    Stop,
    Next,
    Info,
    Warning,
    Check,
    Cross,
    Gate,
    Garage,
    Blinds,
    Window,
    Thermostat,
    Hvac,
    MediaPlayer,
    Speaker,
    Tv,
}

impl Icon {
    /// Every icon, in symbol table order.
    pub const ALL: [Self; 30] = [
        Self::None,
        Self::Settings,
        Self::Wifi,
        Self::Bluetooth,
        Self::Brightness,
        Self::Home,
        Self::Music,
        Self::Timer,
        Self::Temperature,
        Self::Power,
        Self::Light,
        Self::Fan,
        Self::Lock,
        Self::Play,
        Self::Pause,
        Self::Stop,
        Self::Next,
        Self::Info,
        Self::Warning,
        Self::Check,
        Self::Cross,
        Self::Gate,
        Self::Garage,
        Self::Blinds,
        Self::Window,
        Self::Thermostat,
        Self::Hvac,
        Self::MediaPlayer,
        Self::Speaker,
        Self::Tv,
    ];

    /// Looks up an icon by its declaration key (case-insensitive).
    ///
    /// # Examples
    ///
    /// ```
    /// use dialmenu::models::Icon;
    ///
    /// assert_eq!(Icon::from_key("Light"), Some(Icon::Light));
    /// assert_eq!(Icon::from_key("rocket"), None);
    /// ```
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|icon| icon.key() == key)
    }

    /// Declaration key for this icon.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Settings => "settings",
            Self::Wifi => "wifi",
            Self::Bluetooth => "bluetooth",
            Self::Brightness => "brightness",
            Self::Home => "home",
            Self::Music => "music",
            Self::Timer => "timer",
            Self::Temperature => "temperature",
            Self::Power => "power",
            Self::Light => "light",
            Self::Fan => "fan",
            Self::Lock => "lock",
            Self::Play => "play",
            Self::Pause => "pause",
            Self::Stop => "stop",
            Self::Next => "next",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Check => "check",
            Self::Cross => "cross",
            Self::Gate => "gate",
            Self::Garage => "garage",
            Self::Blinds => "blinds",
            Self::Window => "window",
            Self::Thermostat => "thermostat",
            Self::Hvac => "hvac",
            Self::MediaPlayer => "media_player",
            Self::Speaker => "speaker",
            Self::Tv => "tv",
        }
    }

    /// Glyph rendered for this icon. Empty for [`Icon::None`].
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Settings => "\u{F013}",
            Self::Wifi => "\u{F1EB}",
            Self::Bluetooth => "\u{F293}",
            Self::Brightness => "\u{F185}",
            Self::Home => "\u{F015}",
            Self::Music | Self::MediaPlayer => "\u{F001}",
            Self::Timer => "\u{F017}",
            Self::Temperature | Self::Thermostat | Self::Hvac => "\u{F2C9}",
            Self::Power => "\u{F011}",
            Self::Light => "\u{F0EB}",
            Self::Fan => "\u{F863}",
            Self::Lock => "\u{F023}",
            Self::Play => "\u{F04B}",
            Self::Pause => "\u{F04C}",
            Self::Stop => "\u{F04D}",
            Self::Next => "\u{F051}",
            Self::Info => "\u{F129}",
            Self::Warning => "\u{F071}",
            Self::Check => "\u{F00C}",
            Self::Cross => "\u{F00D}",
            Self::Gate | Self::Garage => "\u{F52B}",
            Self::Blinds | Self::Window => "\u{F8A0}",
            Self::Speaker => "\u{F028}",
            Self::Tv => "\u{F26C}",
        }
    }

    /// Comma-separated list of accepted keys, for error suggestions.
    #[must_use]
    pub fn key_list() -> String {
        Self::ALL
            .iter()
            .map(|icon| icon.key())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl Serialize for Icon {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}
