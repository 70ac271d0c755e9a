//! Compiled, render-ready app records.

use serde::Serialize;
use std::fmt;

use super::controller::ControllerRef;
use super::entity::EntityHandle;
use super::icon::Icon;
use super::rgb::RgbColor;

/// Closed set of app types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AppType {
    /// Launcher entry without entity bindings
    Generic,
    /// Toggles one or more switches
    Switch,
    /// Opens, closes and stops one or more covers
    Cover,
    /// Adjusts a single thermostat
    Climate,
    /// Controls a single media player
    MediaPlayer,
}

impl AppType {
    /// Matches a declared type tag exactly. Returns `None` for unknown tags.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "generic" => Some(Self::Generic),
            "switch" => Some(Self::Switch),
            "cover" => Some(Self::Cover),
            "climate" => Some(Self::Climate),
            "media_player" => Some(Self::MediaPlayer),
            _ => None,
        }
    }

    /// Declaration tag for this type.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Generic => "generic",
            Self::Switch => "switch",
            Self::Cover => "cover",
            Self::Climate => "climate",
            Self::MediaPlayer => "media_player",
        }
    }
}

impl fmt::Display for AppType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Offset of an app button from the menu center, in pixels.
///
/// Screen coordinates: `x` grows to the right, `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Position {
    /// Horizontal offset
    pub x: i32,
    /// Vertical offset
    pub y: i32,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Kind of entity a binding controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BindingKind {
    /// Switch binding
    Switch,
    /// Cover binding
    Cover,
}

/// An app's association with one externally controlled entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct EntityBinding {
    /// Switch or cover
    pub kind: BindingKind,
    /// Resolved entity
    pub entity: EntityHandle,
    /// Label shown for the entity
    pub name: String,
    /// Color shown for the entity
    pub color: RgbColor,
}

/// Font handles propagated from the controller.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FontSet {
    /// Small text font
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_14: Option<EntityHandle>,
    /// Large text font
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_18: Option<EntityHandle>,
}

/// Payload shared by switch and cover apps.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct BindingsPayload {
    /// Bound entities in declaration order
    pub bindings: Vec<EntityBinding>,
    /// Small text font used for binding labels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_14: Option<EntityHandle>,
}

/// Thermostat app payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClimatePayload {
    /// Resolved climate entity
    pub climate: EntityHandle,
    /// Setpoint increment per encoder detent
    pub temperature_step: f32,
    /// Fonts for the setpoint and mode labels
    pub fonts: FontSet,
}

/// Media player app payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaPlayerPayload {
    /// Resolved media player entity
    pub media_player: EntityHandle,
    /// Volume increment per encoder detent
    pub volume_step: f32,
    /// Fonts for the track and volume labels
    pub fonts: FontSet,
    /// Non-owning reference to the owning controller, set during assembly
    #[serde(skip_serializing_if = "Option::is_none")]
    pub controller: Option<ControllerRef>,
}

/// Variant-specific part of an app.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AppKind {
    /// No payload
    Generic,
    /// Switch bindings
    Switch(BindingsPayload),
    /// Cover bindings
    Cover(BindingsPayload),
    /// Thermostat
    Climate(ClimatePayload),
    /// Media player
    MediaPlayer(MediaPlayerPayload),
}

impl AppKind {
    /// App type this payload belongs to.
    #[must_use]
    pub const fn app_type(&self) -> AppType {
        match self {
            Self::Generic => AppType::Generic,
            Self::Switch(_) => AppType::Switch,
            Self::Cover(_) => AppType::Cover,
            Self::Climate(_) => AppType::Climate,
            Self::MediaPlayer(_) => AppType::MediaPlayer,
        }
    }

    /// Switch or cover bindings, empty for other variants.
    #[must_use]
    pub fn bindings(&self) -> &[EntityBinding] {
        match self {
            Self::Switch(payload) | Self::Cover(payload) => &payload.bindings,
            _ => &[],
        }
    }
}

/// The compiled record for one menu entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct App {
    /// Identifier, unique within the controller
    pub id: String,
    /// Display name
    pub name: String,
    /// 0-based declaration position
    pub index: usize,
    /// Button color
    pub color: RgbColor,
    /// Icon key
    pub icon: Icon,
    /// Offset from the menu center
    pub position: Position,
    /// Variant payload
    #[serde(flatten)]
    pub kind: AppKind,
}

impl App {
    /// App type.
    #[must_use]
    pub const fn app_type(&self) -> AppType {
        self.kind.app_type()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_tags_round_trip() {
        for app_type in [
            AppType::Generic,
            AppType::Switch,
            AppType::Cover,
            AppType::Climate,
            AppType::MediaPlayer,
        ] {
            assert_eq!(AppType::from_tag(app_type.tag()), Some(app_type));
        }
        assert_eq!(AppType::from_tag("Switch"), None);
        assert_eq!(AppType::from_tag("light"), None);
    }

    #[test]
    fn test_app_serializes_type_tag() {
        let app = App {
            id: "dial_menu_app_0".to_string(),
            name: "Home".to_string(),
            index: 0,
            color: RgbColor::from_packed(0xFD5C4C),
            icon: Icon::Home,
            position: Position::new(0, -85),
            kind: AppKind::Generic,
        };
        let json = serde_json::to_value(&app).unwrap();
        assert_eq!(json["id"], "dial_menu_app_0");
        assert_eq!(json["type"], "generic");
        assert_eq!(json["icon"], "home");
        assert_eq!(json["color"], "#FD5C4C");
        assert_eq!(json["position"]["y"], -85);
    }
}
